#![deny(missing_docs)]
//! Idempotent DynamoDB persistence and media-reuse deduplication for the
//! vocabulary-enrichment pipeline.
//!
//! Three layers: [`attr`] converts JSON to DynamoDB's `AttributeValue` wire
//! shape, [`item`] builds the keys and row for a completed state, and
//! [`Store`] wraps `aws_sdk_dynamodb::Client` with the existence check,
//! media-reuse lookup, and conditional-write operations the graph needs.

mod attr;
mod client;
mod error;
mod item;

pub use client::Store;
pub use error::StoreError;
pub use item::{build_item, normalized_search_words, reverse_lookup_key, source_partition_key, target_sort_key};
