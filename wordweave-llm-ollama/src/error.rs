//! Maps HTTP/reqwest errors to [`ProviderError`].

use wordweave_llm::ProviderError;

/// Map an HTTP status code (from a local Ollama server) to a [`ProviderError`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ProviderError {
    match status.as_u16() {
        404 => ProviderError::InvalidResponse(format!("model not found: {body}")),
        500..=599 => ProviderError::RequestFailed(format!("HTTP {status}: {body}")),
        _ => ProviderError::InvalidResponse(format!("HTTP {status}: {body}")),
    }
}

/// Map a [`reqwest::Error`] to a [`ProviderError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::RequestFailed("request timed out".to_string())
    } else if err.is_connect() {
        ProviderError::RequestFailed(format!("could not reach Ollama server: {err}"))
    } else {
        ProviderError::Other(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_invalid_response() {
        assert!(matches!(
            map_http_status(reqwest::StatusCode::NOT_FOUND, "model not pulled"),
            ProviderError::InvalidResponse(_)
        ));
    }

    #[test]
    fn server_error_maps_to_request_failed() {
        assert!(matches!(
            map_http_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "oops"),
            ProviderError::RequestFailed(_)
        ));
    }
}
