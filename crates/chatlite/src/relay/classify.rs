//! Classification of provider failures.

use crate::llm::LLMError;

const API_KEY_INVALID: &str = "API_KEY_INVALID";
const QUOTA_EXCEEDED: &str = "QUOTA_EXCEEDED";

/// How a provider failure is surfaced to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    InvalidApiKey,
    QuotaExceeded,
    Unavailable,
}

/// Classify a provider error.
///
/// Only `API_KEY_INVALID` and `QUOTA_EXCEEDED` are surfaced, matched on the
/// structured reason first and on the error text otherwise. Everything else,
/// including a bare HTTP 429 or `RESOURCE_EXHAUSTED`, is `Unavailable`.
pub fn classify(err: &LLMError) -> ProviderFailure {
    match err.reason() {
        Some(API_KEY_INVALID) => return ProviderFailure::InvalidApiKey,
        Some(QUOTA_EXCEEDED) => return ProviderFailure::QuotaExceeded,
        _ => {}
    }

    let text = err.to_string();
    if text.contains(API_KEY_INVALID) {
        ProviderFailure::InvalidApiKey
    } else if text.contains(QUOTA_EXCEEDED) {
        ProviderFailure::QuotaExceeded
    } else {
        ProviderFailure::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, message: &str, reason: Option<&str>) -> LLMError {
        LLMError::Api {
            status,
            message: message.to_string(),
            reason: reason.map(str::to_string),
        }
    }

    #[test]
    fn test_reason_code_invalid_key() {
        let err = api_error(400, "API key not valid", Some("API_KEY_INVALID"));
        assert_eq!(classify(&err), ProviderFailure::InvalidApiKey);
    }

    #[test]
    fn test_reason_code_quota() {
        let err = api_error(403, "quota", Some("QUOTA_EXCEEDED"));
        assert_eq!(classify(&err), ProviderFailure::QuotaExceeded);
    }

    #[test]
    fn test_rate_limit_without_quota_code_is_unavailable() {
        let err = api_error(429, "Too Many Requests", None);
        assert_eq!(classify(&err), ProviderFailure::Unavailable);

        let err = api_error(429, "Resource has been exhausted", Some("RESOURCE_EXHAUSTED"));
        assert_eq!(classify(&err), ProviderFailure::Unavailable);

        let err = api_error(429, "slow down", Some("RATE_LIMIT_EXCEEDED"));
        assert_eq!(classify(&err), ProviderFailure::Unavailable);
    }

    #[test]
    fn test_text_fallback() {
        let err = api_error(400, "something API_KEY_INVALID something", None);
        assert_eq!(classify(&err), ProviderFailure::InvalidApiKey);

        let err = api_error(403, "[403] QUOTA_EXCEEDED for project", None);
        assert_eq!(classify(&err), ProviderFailure::QuotaExceeded);
    }

    #[test]
    fn test_other_failures_are_unavailable() {
        let err = api_error(500, "internal", Some("INTERNAL"));
        assert_eq!(classify(&err), ProviderFailure::Unavailable);

        let err = api_error(503, "overloaded", None);
        assert_eq!(classify(&err), ProviderFailure::Unavailable);

        let err = LLMError::Blocked {
            reason: "SAFETY".to_string(),
        };
        assert_eq!(classify(&err), ProviderFailure::Unavailable);
    }
}
