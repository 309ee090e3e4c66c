//! The media tool: English search terms → reuse-or-fetch → LLM selection →
//! blob upload, grounded on `media_tool.py`'s `get_media`.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;

use wordweave_llm::{Gateway, ModelTier, Provider, StructuredRequest, UsageObserver};
use wordweave_store::Store;
use wordweave_tools::schema::{MediaOutput, MediaSearchQuery};
use wordweave_tools::{ToolCallResult, ToolDyn, ToolError};
use wordweave_types::{normalize_word, Media, PhotoSrc};

use crate::blob::{is_cloud_context, Blobs};
use crate::paths::english_image_paths;
use crate::pexels::{fetch_photos, mock_photos, PhotoOption};

const SYSTEM_MEDIA_SPECIALIST: &str = "You are a vocabulary-learning media specialist. \
Respond with concise, learner-facing text in the requested language.";
const PHOTOS_PER_PAGE: u32 = 10;

#[derive(Debug, Deserialize)]
struct MediaInput {
    source_word: String,
    target_word: Option<String>,
    english_word: Option<String>,
    source_language: Option<String>,
    target_language: Option<String>,
    source_definition: Option<Vec<String>>,
    target_additional_info: Option<String>,
    #[serde(default)]
    quality_feedback: Option<String>,
    #[serde(default)]
    previous_issues: Vec<String>,
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Tool implementation wrapping an LLM gateway, the persistence store
/// (for media-reuse lookups), a Pexels client, and blob storage.
pub struct MediaTool<P, O> {
    gateway: Gateway<P, O>,
    store: Arc<Store>,
    blobs: Blobs,
    http: reqwest::Client,
    pexels_api_key: String,
}

impl<P: Provider, O: UsageObserver> MediaTool<P, O> {
    /// Build a media tool around the given gateway, store, and blob client.
    pub fn new(gateway: Gateway<P, O>, store: Arc<Store>, blobs: Blobs, pexels_api_key: impl Into<String>) -> Self {
        Self {
            gateway,
            store,
            blobs,
            http: reqwest::Client::new(),
            pexels_api_key: pexels_api_key.into(),
        }
    }

    async fn search_terms(&self, input: &MediaInput) -> Result<MediaSearchQuery, ToolError> {
        let english_word = input.english_word.clone().unwrap_or_else(|| input.source_word.clone());
        let definition = input
            .source_definition
            .as_ref()
            .map(|d| d.join("; "))
            .unwrap_or_default();
        let notes = input.target_additional_info.clone().unwrap_or_default();

        let prompt = format!(
            "Provide 2-3 one-to-two-word English search terms, broadest first, to find a \
             memorable photo illustrating '{english_word}'. Definition: {definition}. Notes: {notes}."
        );

        let request = StructuredRequest::new(
            ModelTier::Executor,
            SYSTEM_MEDIA_SPECIALIST,
            prompt,
            search_query_schema(),
        );
        let (query, _): (MediaSearchQuery, _) = self
            .gateway
            .complete(request)
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(query)
    }

    async fn adapt_existing_media(
        &self,
        existing: &serde_json::Value,
        input: &MediaInput,
    ) -> Result<(Media, String), ToolError> {
        let matched_word = existing.get("matched_word").and_then(|v| v.as_str()).unwrap_or("unknown");
        let source_language = input.source_language.as_deref().unwrap_or("en");
        let target_word = input.target_word.as_deref().unwrap_or(&input.source_word);

        let prompt = format!(
            "Convert this existing media data to alt/explanation/memory_tip text in {source_language} \
             for '{}' ({source_language}) -> '{target_word}'. Existing media data (reused from \
             search term '{matched_word}'): {existing}. Keep url and src unchanged.",
            input.source_word
        );

        let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_MEDIA_SPECIALIST, prompt.clone(), media_schema());
        let (media, _): (Media, _) = self
            .gateway
            .complete(request)
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok((media, prompt))
    }

    async fn select_best_photo(&self, photos: &[PhotoOption], input: &MediaInput) -> Result<(Media, String), ToolError> {
        let source_language = input.source_language.as_deref().unwrap_or("en");
        let target_language = input.target_language.as_deref().unwrap_or("en");
        let target_word = input.target_word.as_deref().unwrap_or(&input.source_word);

        let mut prompt = format!(
            "Choose the best photo for '{}' ({source_language}) -> '{target_word}' ({target_language}). \
             Translate alt, explanation, and memory_tip into {source_language}. Photos: {}",
            input.source_word,
            serde_json::to_string(photos).unwrap_or_default(),
        );
        if let Some(feedback) = &input.quality_feedback {
            prompt.push_str(&format!("\n\nPrevious attempt feedback: {feedback}"));
        }
        if !input.previous_issues.is_empty() {
            prompt.push_str(&format!("\nPrevious issues: {}", input.previous_issues.join(", ")));
        }
        if !input.suggestions.is_empty() {
            prompt.push_str(&format!("\nSuggestions to address: {}", input.suggestions.join(", ")));
        }

        let request = StructuredRequest::new(ModelTier::Executor, SYSTEM_MEDIA_SPECIALIST, prompt.clone(), media_schema());
        let (media, _): (Media, _) = self
            .gateway
            .complete(request)
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok((media, prompt))
    }

    async fn upload_media(&self, media: &mut Media, english_word: &str) {
        let Some(large2x) = media.src.large2x.clone() else {
            return;
        };
        let Some(small) = media.src.small.clone() else {
            return;
        };

        let paths = english_image_paths(&normalize_word(english_word));

        let large_bytes = match self.http.get(&large2x).send().await {
            Ok(resp) if resp.status().is_success() => resp.bytes().await.ok(),
            _ => None,
        };
        let small_bytes = match self.http.get(&small).send().await {
            Ok(resp) if resp.status().is_success() => resp.bytes().await.ok(),
            _ => None,
        };

        let (Some(large_bytes), Some(small_bytes)) = (large_bytes, small_bytes) else {
            tracing::info!("failed to download image variants, keeping original URLs");
            return;
        };

        let large_upload = self.blobs.put(&paths.large2x_key, large_bytes.to_vec(), "image/jpeg").await;
        let small_upload = self.blobs.put(&paths.medium_key, small_bytes.to_vec(), "image/jpeg").await;

        if let (Ok(large_url), Ok(small_url)) = (large_upload, small_upload) {
            media.src = PhotoSrc {
                large2x: Some(large_url),
                large: None,
                medium: Some(small_url),
            };
        }
    }
}

impl<P: Provider + Send + Sync, O: UsageObserver + Send + Sync> ToolDyn for MediaTool<P, O> {
    fn name(&self) -> &str {
        "media"
    }

    fn description(&self) -> &str {
        "Finds or reuses a memorable photo for a vocabulary word and uploads it to blob storage."
    }

    fn input_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "required": ["source_word"],
            "properties": {
                "source_word": {"type": "string"},
                "target_word": {"type": "string"},
                "english_word": {"type": "string"},
                "source_language": {"type": "string"},
                "target_language": {"type": "string"},
            }
        })
    }

    fn output_schema(&self) -> serde_json::Value {
        media_output_schema()
    }

    fn call(
        &self,
        input: serde_json::Value,
    ) -> Pin<Box<dyn Future<Output = Result<ToolCallResult, ToolError>> + Send + '_>> {
        Box::pin(async move {
            let input: MediaInput =
                serde_json::from_value(input).map_err(|e| ToolError::InvalidInput(e.to_string()))?;

            let search = self.search_terms(&input).await?;

            let existing = self
                .store
                .find_reusable_media(&search.search_query)
                .await
                .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

            if let Some(existing) = existing {
                let (media, prompt) = self.adapt_existing_media(&existing, &input).await?;
                let output = MediaOutput {
                    media,
                    search_query: search.search_query,
                    media_reused: true,
                };
                return Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt));
            }

            let english_word = input.english_word.clone().unwrap_or_else(|| input.source_word.clone());
            let photos = if is_cloud_context() {
                fetch_photos(&self.http, &self.pexels_api_key, &search.search_query, PHOTOS_PER_PAGE)
                    .await
                    .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?
            } else {
                mock_photos(&search.search_query.join(" "), PHOTOS_PER_PAGE)
            };

            if photos.is_empty() {
                let output = MediaOutput {
                    media: Media {
                        url: String::new(),
                        alt: "No photos found matching the query.".to_string(),
                        src: PhotoSrc::default(),
                        explanation: "No suitable images were found for this word.".to_string(),
                        memory_tip: "Try visualizing the word concept in your mind.".to_string(),
                    },
                    search_query: search.search_query,
                    media_reused: false,
                };
                return Ok(ToolCallResult::new(serde_json::to_value(output).unwrap()));
            }

            let (mut media, prompt) = if is_cloud_context() {
                self.select_best_photo(&photos, &input).await?
            } else {
                (
                    mock_media_from_first_photo(&photos[0], input.target_word.as_deref().unwrap_or(&input.source_word)),
                    "local dev mode: first photo used without LLM selection".to_string(),
                )
            };

            self.upload_media(&mut media, &english_word).await;

            let output = MediaOutput {
                media,
                search_query: search.search_query,
                media_reused: false,
            };
            Ok(ToolCallResult::with_prompt(serde_json::to_value(output).unwrap(), prompt))
        })
    }

    fn fallback(&self) -> serde_json::Value {
        serde_json::to_value(MediaOutput::fallback(Vec::new())).unwrap()
    }
}

fn mock_media_from_first_photo(photo: &PhotoOption, target_word: &str) -> Media {
    Media {
        url: photo.url.clone(),
        alt: format!("Mock image for {target_word}"),
        src: PhotoSrc {
            large2x: Some(photo.src.large2x.clone()),
            large: None,
            medium: Some(photo.src.small.clone()),
        },
        explanation: format!("This is a mock image for the word '{target_word}'."),
        memory_tip: format!("Remember '{target_word}' by visualizing this image."),
    }
}

fn search_query_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["search_query"],
        "properties": {
            "search_query": {"type": "array", "items": {"type": "string"}, "minItems": 2, "maxItems": 3}
        }
    })
}

fn media_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["url", "alt", "src", "explanation", "memory_tip"],
        "properties": {
            "url": {"type": "string"},
            "alt": {"type": "string"},
            "src": {"type": "object"},
            "explanation": {"type": "string"},
            "memory_tip": {"type": "string"}
        }
    })
}

fn media_output_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "required": ["media", "search_query", "media_reused"],
        "properties": {
            "media": media_schema(),
            "search_query": {"type": "array", "items": {"type": "string"}},
            "media_reused": {"type": "boolean"}
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_media_carries_target_word_through_copy() {
        let photo = PhotoOption {
            id: serde_json::json!("mock_photo_1"),
            width: 1,
            height: 1,
            url: "https://example.com/p.jpg".to_string(),
            photographer: "x".to_string(),
            alt: None,
            src: crate::pexels::PhotoSrc {
                large2x: "https://example.com/l.jpg".to_string(),
                small: "https://example.com/s.jpg".to_string(),
            },
        };
        let media = mock_media_from_first_photo(&photo, "construir");
        assert!(media.alt.contains("construir"));
        assert_eq!(media.src.large2x.as_deref(), Some("https://example.com/l.jpg"));
    }
}
