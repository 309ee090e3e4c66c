//! Pexels photo search, grounded on `media_tool.py`'s `fetch_photos`.

use serde::Deserialize;

use crate::error::MediaError;

const SEARCH_URL: &str = "https://api.pexels.com/v1/search";
const HTTP_TIMEOUT_SECS: u64 = 30;
const PHOTOS_PER_PAGE: u32 = 10;

/// A single candidate photo, as returned by Pexels (or mocked locally).
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoOption {
    /// Pexels photo id (or a `mock_photo_{n}` marker in local dev mode).
    pub id: serde_json::Value,
    /// Photo width in pixels.
    pub width: u32,
    /// Photo height in pixels.
    pub height: u32,
    /// Canonical Pexels page URL for the photo.
    pub url: String,
    /// Photographer display name.
    pub photographer: String,
    /// Alt text Pexels associates with the photo, if any.
    #[serde(default)]
    pub alt: Option<String>,
    /// The two size variants this tool cares about.
    pub src: PhotoSrc,
}

/// The large/small variant URLs this tool persists.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoSrc {
    /// 2x-density large variant.
    pub large2x: String,
    /// Small variant, used as the thumbnail.
    pub small: String,
}

/// Search Pexels for `query`, asking for up to `per_page` landscape photos.
pub async fn fetch_photos(
    client: &reqwest::Client,
    api_key: &str,
    query: &[String],
    per_page: u32,
) -> Result<Vec<PhotoOption>, MediaError> {
    let search_query = query.join(" ");

    let response = client
        .get(SEARCH_URL)
        .header("Authorization", api_key)
        .query(&[
            ("query", search_query.as_str()),
            ("orientation", "landscape"),
            ("per_page", &per_page.to_string()),
            ("size", "large"),
        ])
        .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
        .send()
        .await
        .map_err(|e| MediaError::Pexels(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(MediaError::Pexels(format!("pexels returned {status}: {body}")));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| MediaError::Pexels(e.to_string()))?;

    let photos = body
        .get("photos")
        .and_then(|p| p.as_array())
        .cloned()
        .unwrap_or_default();

    photos
        .into_iter()
        .map(|photo| serde_json::from_value(photo).map_err(|e| MediaError::Pexels(e.to_string())))
        .collect()
}

/// Deterministic photos for local development, with no network call.
pub fn mock_photos(search_query: &str, per_page: u32) -> Vec<PhotoOption> {
    (1..=per_page.min(3))
        .map(|n| PhotoOption {
            id: serde_json::json!(format!("mock_photo_{n}")),
            width: 4000,
            height: 3000,
            url: format!("https://mock-pexels.local/photo/{n}"),
            photographer: "Mock Photographer".to_string(),
            alt: Some(format!("Mock photo {n} for {search_query}")),
            src: PhotoSrc {
                large2x: format!("https://mock-pexels.local/photo/{n}_large2x.jpg"),
                small: format!("https://mock-pexels.local/photo/{n}_small.jpg"),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_photos_caps_at_three() {
        let photos = mock_photos("house", PHOTOS_PER_PAGE);
        assert_eq!(photos.len(), 3);
        assert!(photos[0].src.large2x.contains("mock_photo_1"));
    }

    #[test]
    fn mock_photos_honors_smaller_per_page() {
        assert_eq!(mock_photos("house", 1).len(), 1);
    }
}
