#![deny(missing_docs)]
//! Shared domain types for the vocabulary-enrichment pipeline.
//!
//! This crate has no async runtime dependency and no I/O — it is the
//! vocabulary every other crate in the workspace speaks: the closed
//! [`Language`] and [`PartOfSpeech`] enumerations, the mutable
//! [`state::VocabState`] record threaded through the graph engine, key
//! normalization, and the top-level [`error::WordWeaveError`] taxonomy.

pub mod error;
pub mod language;
pub mod normalize;
pub mod part_of_speech;
pub mod state;

pub use error::WordWeaveError;
pub use language::Language;
pub use normalize::normalize_word;
pub use part_of_speech::PartOfSpeech;
pub use state::{
    ExampleSentence, Media, PhotoSrc, Pronunciations, QualityField, QualityOutcome,
    SuggestedWord, Synonym, VocabState,
};
