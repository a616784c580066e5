//! Endpoint table for the recovery target API

use serde::{Deserialize, Serialize};

use crate::error::SdkError;

const ID_PLACEHOLDER: &str = "{id}";

/// Paths of the endpoints used by this client, relative to the server base URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceTable {
    /// Lists every recovery target
    #[serde(default = "default_recovery_targets")]
    pub recovery_targets: String,
    /// Fetches one recovery target; `{id}` is replaced by the target id
    #[serde(default = "default_recovery_target")]
    pub recovery_target: String,
}

fn default_recovery_targets() -> String {
    "/V4/recoveryTargets".to_string()
}

fn default_recovery_target() -> String {
    "/V4/recoveryTargets/{id}".to_string()
}

impl Default for ServiceTable {
    fn default() -> Self {
        Self {
            recovery_targets: default_recovery_targets(),
            recovery_target: default_recovery_target(),
        }
    }
}

impl ServiceTable {
    pub fn recovery_targets(&self) -> &str {
        &self.recovery_targets
    }

    /// Detail path for a target id
    ///
    /// The id fills a single path segment, so ids that would change the request path are
    /// rejected rather than substituted.
    pub fn recovery_target(&self, id: &str) -> Result<String, SdkError> {
        if !is_path_segment(id) {
            return Err(SdkError::InvalidInput(id.to_string()));
        }
        Ok(self.recovery_target.replace(ID_PLACEHOLDER, id))
    }
}

fn is_path_segment(id: &str) -> bool {
    let reserved = |c: char| {
        matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
    };
    !id.is_empty() && id != "." && id != ".." && !id.chars().any(reserved)
}
