#![deny(missing_docs)]
//! The media tool: finds or reuses a memorable photo for a vocabulary
//! word and uploads it to blob storage, grounded on `media_tool.py`.

mod blob;
mod error;
mod paths;
mod pexels;
mod tool;

pub use blob::{is_cloud_context, Blobs};
pub use error::MediaError;
pub use paths::{english_image_paths, safe_word_key, vocab_audio_paths, EnglishImagePaths, VocabAudioPaths};
pub use pexels::{fetch_photos, mock_photos, PhotoOption};
pub use tool::MediaTool;
