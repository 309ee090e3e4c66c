//! Maps HTTP/reqwest errors to [`ProviderError`].

use wordweave_llm::ProviderError;

/// Map an HTTP status code (from the Anthropic API) to a [`ProviderError`].
///
/// Reference: <https://docs.anthropic.com/en/api/errors>
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
        let err = map_http_status(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert!(matches!(err, ProviderError::RateLimited));
    }

    #[test]
    fn unauthorized_status_maps_to_auth_failed() {
        let err = map_http_status(reqwest::StatusCode::UNAUTHORIZED, "bad key");
        assert!(matches!(err, ProviderError::AuthFailed(_)));
    }

    #[test]
    fn server_error_maps_to_request_failed() {
        let err = map_http_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert!(matches!(err, ProviderError::RequestFailed(_)));
    }
}
