#![deny(missing_docs)]
//! Ollama local model provider for the wordweave LLM gateway.
//!
//! Implements [`wordweave_llm::Provider`] for Ollama's `/api/chat` endpoint.
//! Ollama runs models locally, so there are no auth headers and cost is
//! always absent rather than estimated.

mod client;
mod error;
mod mapping;

pub use client::Ollama;
