use serde_json::Value;

use crate::error::{ResponseError, SdkError};

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionResponse {
    pub status: u16,
    pub body: String,
}

impl SessionResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Human readable error text extracted from the response body
    pub fn error_message(&self) -> String {
        if let Ok(json) = serde_json::from_str::<Value>(&self.body) {
            let candidates = [
                json.get("errorMessage"),
                json.get("errorString"),
                json.get("error").and_then(|e| e.get("errorMessage")),
            ];
            if let Some(message) = candidates
                .into_iter()
                .flatten()
                .filter_map(Value::as_str)
                .find(|s| !s.is_empty())
            {
                return message.to_string();
            }
        }

        if let Some(title) = html_title(&self.body) {
            return title.to_string();
        }

        let text = self.body.trim();
        if text.is_empty() {
            self.status.to_string()
        } else {
            text.to_string()
        }
    }

    /// Parse the body as a JSON object that must carry `key` at the top level
    pub(crate) fn into_document(self, key: &str) -> Result<Value, SdkError> {
        if !self.is_success() {
            return Err(ResponseError::Unsuccessful {
                status: self.status,
                message: self.error_message(),
            }
            .into());
        }

        if self.body.trim().is_empty() {
            return Err(ResponseError::malformed("empty response body").into());
        }

        let document: Value = serde_json::from_str(&self.body)
            .map_err(|e| ResponseError::malformed(format!("body is not JSON: {}", e)))?;

        let (is_empty, has_key) = match document.as_object() {
            Some(map) => (map.is_empty(), map.contains_key(key)),
            None => return Err(ResponseError::malformed("body is not a JSON object").into()),
        };

        if is_empty {
            Err(ResponseError::malformed("empty response object").into())
        } else if !has_key {
            Err(ResponseError::malformed(format!("missing `{}`", key)).into())
        } else {
            Ok(document)
        }
    }
}

/// Text of the `<title>` element of an HTML error page
fn html_title(body: &str) -> Option<&str> {
    // ASCII lowering keeps byte offsets valid for slicing `body`
    let lowered = body.to_ascii_lowercase();
    let open = lowered.find("<title")?;
    let start = open + lowered[open..].find('>')? + 1;
    let end = start + lowered[start..].find("</title")?;
    Some(body[start..end].trim()).filter(|title| !title.is_empty())
}
