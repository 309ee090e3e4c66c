//! Maps HTTP/reqwest errors to [`ProviderError`].

use wordweave_llm::ProviderError;

/// Map an HTTP status code (from the OpenAI Chat Completions API) to a [`ProviderError`].
///
/// Reference: <https://platform.openai.com/docs/guides/error-codes>
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match status.as_u16() {
        401 | 403 => ProviderError::AuthFailed(body.to_string()),
        429 => ProviderError::RateLimited,
        500..=599 => ProviderError::RequestFailed(format!("HTTP {status}: {body}")),
        _ => ProviderError::InvalidResponse(format!("HTTP {status}: {body}")),
    }
}

/// Map a [`reqwest::Error`] to a [`ProviderError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::RequestFailed("request timed out".to_string())
    } else {
        ProviderError::Other(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_status_maps_to_rate_limited() {
        assert!(matches!(
            map_http_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down"),
            ProviderError::RateLimited
        ));
    }

    #[test]
    fn unauthorized_status_maps_to_auth_failed() {
        assert!(matches!(
            map_http_status(reqwest::StatusCode::UNAUTHORIZED, "bad key"),
            ProviderError::AuthFailed(_)
        ));
    }
}
