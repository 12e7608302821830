//! The API's error body: every failure is `{success: false, error: <message>}`
//! paired 1:1 with an HTTP status by the endpoint layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }

    // Common error constructors
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn unauthorized() -> Self {
        Self::new("Authentication required")
    }

    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(detail)
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_value(ErrorBody::not_found("Blog not found")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Blog not found");
    }
}
