// crates/portal-client/src/error.rs
// Standardized error types for the portal client

use thiserror::Error;

/// Main error type for the portal library
#[derive(Error, Debug)]
pub enum PortalError {
    /// Any non-2xx reply. Deliberately generic: callers get the code, nothing more.
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request body that could not be serialized
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience type alias for Result using PortalError
pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    /// Network failure, non-2xx status and undecodable body all collapse
    /// into the single "request failed" family views react to.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            PortalError::Status { .. } | PortalError::Http(_) | PortalError::Decode { .. }
        )
    }

    /// 401/403 replies; the identity provider owns the recovery flow
    pub fn is_auth(&self) -> bool {
        matches!(self, PortalError::Status { status: 401 | 403 })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            PortalError::Status { status } => Some(*status),
            PortalError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Convert to the message shown in error banners and notifications
    pub fn to_user_string(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // PortalError construction tests
    // ============================================================================

    #[test]
    fn test_status_error_message() {
        let err = PortalError::Status { status: 500 };
        assert_eq!(err.to_string(), "HTTP error! status: 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_decode_error_names_path() {
        let source = serde_json::from_str::<i32>("nope").unwrap_err();
        let err = PortalError::Decode {
            path: "/words?page=1".to_string(),
            source,
        };
        assert!(err.to_string().contains("/words?page=1"));
        assert!(err.is_request_failure());
    }

    #[test]
    fn test_config_error() {
        let err = PortalError::Config("bad url".to_string());
        assert!(err.to_string().contains("configuration error"));
        assert!(!err.is_request_failure());
    }

    // ============================================================================
    // Classification tests
    // ============================================================================

    #[test]
    fn test_auth_statuses() {
        assert!(PortalError::Status { status: 401 }.is_auth());
        assert!(PortalError::Status { status: 403 }.is_auth());
        assert!(!PortalError::Status { status: 404 }.is_auth());
        assert!(!PortalError::Config("x".into()).is_auth());
    }

    #[test]
    fn test_request_failure_family() {
        assert!(PortalError::Status { status: 404 }.is_request_failure());
        assert!(!PortalError::InvalidInput("page".into()).is_request_failure());
        let json = PortalError::Json(serde_json::from_str::<i32>("x").unwrap_err());
        assert!(!json.is_request_failure());
    }

    // ============================================================================
    // From implementations tests
    // ============================================================================

    #[test]
    fn test_from_serde_json() {
        let source = serde_json::from_str::<i32>("nope").unwrap_err();
        let err: PortalError = source.into();
        assert!(matches!(err, PortalError::Json(_)));
        assert!(err.to_string().starts_with("JSON serialization error"));
    }

    #[test]
    fn test_to_user_string() {
        let err = PortalError::InvalidInput("page must be positive".to_string());
        assert_eq!(err.to_user_string(), err.to_string());
    }
}
