#![deny(missing_docs)]
//! Graph engine for the vocabulary-enrichment pipeline.
//!
//! [`Graph`] drives a [`wordweave_types::VocabState`] through the fixed
//! sequence validate → classify → translate → sequential quality gate →
//! parallel fan-out → join → final quality check, using
//! [`wordweave_supervisor::Supervisor`] to judge every quality-gated tool
//! call along the way. [`executor::QualityGatedExecutor`] is the retry
//! loop each individual tool call runs through; [`join::Join`] is the
//! barrier the parallel fan-out completes against.

mod error;
mod executor;
mod graph;
mod join;

pub use error::GraphError;
pub use executor::{GateOutcome, QualityGatedExecutor};
pub use graph::{Graph, DEFAULT_DEADLINE};
pub use join::Join;
