//! Google Drive API payload types
//!
//! Data structures for the Drive v3 responses the adapter consumes.

use serde::{Deserialize, Serialize};

/// Drive file resource, restricted to the fields the adapter requests.
///
/// See: https://developers.google.com/drive/api/v3/reference/files#resource
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    /// File ID
    pub id: String,

    /// File name
    pub name: String,

    /// Byte length, reported by Drive as a decimal string; omitted for
    /// folders and some generated files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl DriveFile {
    /// Parsed size, defaulting to 0 when missing or malformed.
    pub fn size_bytes(&self) -> u64 {
        self.size
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }
}

/// files.list response
///
/// See: https://developers.google.com/drive/api/v3/reference/files/list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilesListResponse {
    /// List of files
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

/// Error body returned by the token-introspection endpoint.
///
/// The `error_description` field has been observed both at the top level
/// and nested under an `error` object; both shapes are accepted.
#[derive(Debug, Deserialize)]
pub struct TokenErrorBody {
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub error: Option<TokenErrorDetail>,
}

/// Nested error object inside [`TokenErrorBody`].
#[derive(Debug, Deserialize)]
pub struct TokenErrorDetail {
    #[serde(default)]
    pub error_description: Option<String>,
}

impl TokenErrorBody {
    /// Whether the body carries the provider's "Invalid Value" rejection,
    /// its marker for an unusable access token.
    pub fn is_invalid_token(&self) -> bool {
        let description = self.error_description.as_deref().or_else(|| {
            self.error
                .as_ref()
                .and_then(|e| e.error_description.as_deref())
        });
        description == Some("Invalid Value")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_drive_file() {
        let json = r#"{"id": "abc123", "name": "usc-test", "size": "1024"}"#;

        let file: DriveFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.id, "abc123");
        assert_eq!(file.name, "usc-test");
        assert_eq!(file.size_bytes(), 1024);
    }

    #[test]
    fn test_drive_file_size_defaults_to_zero() {
        let missing: DriveFile = serde_json::from_str(r#"{"id": "a", "name": "n"}"#).unwrap();
        assert_eq!(missing.size_bytes(), 0);

        let malformed: DriveFile =
            serde_json::from_str(r#"{"id": "a", "name": "n", "size": "not-a-number"}"#).unwrap();
        assert_eq!(malformed.size_bytes(), 0);
    }

    #[test]
    fn test_deserialize_files_list_response() {
        let json = r#"{
            "files": [
                {"id": "file1", "name": "usc-one", "size": "10"},
                {"id": "file2", "name": "usc-two", "size": "20"}
            ]
        }"#;

        let response: FilesListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.files.len(), 2);
        assert_eq!(response.files[0].id, "file1");
    }

    #[test]
    fn test_deserialize_empty_files_list() {
        let response: FilesListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.files.is_empty());
    }

    #[test]
    fn test_token_error_top_level() {
        let body: TokenErrorBody =
            serde_json::from_str(r#"{"error_description": "Invalid Value"}"#).unwrap();
        assert!(body.is_invalid_token());
    }

    #[test]
    fn test_token_error_nested() {
        let body: TokenErrorBody =
            serde_json::from_str(r#"{"error": {"error_description": "Invalid Value"}}"#).unwrap();
        assert!(body.is_invalid_token());
    }

    #[test]
    fn test_token_error_other_description() {
        let body: TokenErrorBody =
            serde_json::from_str(r#"{"error_description": "Bad Request"}"#).unwrap();
        assert!(!body.is_invalid_token());

        let empty: TokenErrorBody = serde_json::from_str("{}").unwrap();
        assert!(!empty.is_invalid_token());
    }
}
