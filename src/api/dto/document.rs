//! Document-related DTOs for API responses.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{Document, DocumentRecord};

/// Response body for a single record: the store-assigned id plus every
/// document field flattened beside it. Row timestamps stay internal.
#[derive(Debug, Serialize)]
pub struct DocumentResponse<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub document: T,
}

impl<T: Document> From<DocumentRecord<T>> for DocumentResponse<T> {
    fn from(record: DocumentRecord<T>) -> Self {
        Self {
            id: record.id,
            document: record.data,
        }
    }
}

/// Plain confirmation body, e.g. `{"message": "Product deleted"}`.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use serde_json::json;

    #[test]
    fn test_document_response_flattens_fields() {
        let id = Uuid::new_v4();
        let response = DocumentResponse {
            id,
            document: User {
                phone: Some(5551234.5),
                username: Some("a".to_string()),
            },
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({"id": id.to_string(), "phone": 5551234.5, "username": "a"})
        );
    }

    #[test]
    fn test_message_response_shape() {
        let json = serde_json::to_value(MessageResponse::new("User deleted")).unwrap();
        assert_eq!(json, json!({"message": "User deleted"}));
    }
}
