#![deny(missing_docs)]
//! Request intake, environment wiring, and pipeline driving for the
//! wordweave vocabulary-enrichment service.
//!
//! This crate is transport-agnostic: [`intake`] parses and validates one
//! inbound request, [`wiring`] builds the tool registry/supervisor/graph
//! around whichever LLM provider [`config::Config`] selects, and
//! [`pipeline::process_one`] drives a single request through to
//! persistence and notification. `src/main.rs` is a thin CLI wrapper that
//! reads one request from stdin — there is no AWS Lambda runtime anywhere
//! in this workspace's dependency tree, so the binary is a plain process
//! rather than a handler shimmed onto one.

pub mod config;
pub mod intake;
pub mod observer;
pub mod pipeline;
pub mod wiring;
