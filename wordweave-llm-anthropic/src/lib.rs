#![deny(missing_docs)]
//! Anthropic Messages API binding for the wordweave LLM gateway.

mod client;
mod error;
mod mapping;

pub use client::Anthropic;
