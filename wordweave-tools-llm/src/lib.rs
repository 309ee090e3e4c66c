#![deny(missing_docs)]
//! The seven generic, LLM-backed pipeline tools — validation,
//! classification, translation, synonyms, examples, syllables, and
//! conjugation — grounded one-to-one on the `vocab_processor/tools/*.py`
//! reference files.

mod classification;
mod conjugation;
mod examples;
mod feedback;
mod synonyms;
mod syllables;
mod translation;
mod validation;

pub use classification::ClassificationTool;
pub use conjugation::ConjugationTool;
pub use examples::ExamplesTool;
pub use synonyms::SynonymsTool;
pub use syllables::SyllablesTool;
pub use translation::TranslationTool;
pub use validation::ValidationTool;
