//! Error response DTOs.

use serde::Serialize;

/// Standard error response format. `message` is the primary field; `code`
/// and `details` are machine-readable hints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response with code and message.
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: &str) -> Self {
        self.details = Some(details.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("NOT_FOUND", "User not found")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "NOT_FOUND", "message": "User not found"})
        );
    }

    #[test]
    fn test_details_included_when_present() {
        let response = ErrorResponse::new("BAD_REQUEST", "oops").with_details("field x");
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["details"], "field x");
    }
}
