#![deny(missing_docs)]
//! The pronunciation tool: text-to-speech generation with idempotent
//! reuse, grounded on `pronunciation_tool.py`.

mod error;
mod synth;
mod tool;
mod voice;

pub use error::AudioError;
pub use synth::Synthesizer;
pub use tool::PronunciationTool;
pub use voice::{VoiceIdentity, VoiceSettings};
