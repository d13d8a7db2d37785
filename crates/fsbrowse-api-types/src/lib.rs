//! Wire types shared by the HTTP server and its clients.

use serde::{Deserialize, Serialize};

/// JSON body returned alongside any error status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// `POST` body: create a directory, or a file with optional text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateContentBody {
    pub make_dir: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// `PUT` body: path, relative to the served root, whose content is copied over
/// the target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplaceContentBody {
    pub src_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_body_omits_missing_text() {
        let body = CreateContentBody {
            make_dir: true,
            text: None,
        };

        let json = serde_json::to_value(&body).expect("serialize create body");

        assert_eq!(json, serde_json::json!({ "make_dir": true }));
    }

    #[test]
    fn error_response_round_trip_json() {
        let response = ErrorResponse::new("PATH_NOT_FOUND", "path not found: /srv/x");

        let json = serde_json::to_string(&response).expect("serialize error response");
        let decoded: ErrorResponse =
            serde_json::from_str(&json).expect("deserialize error response");

        assert_eq!(decoded, response);
    }
}
