use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ResponseError, SdkError};
use crate::session::SharedSession;

use super::json::scalar_to_string;
use super::target::RecoveryTarget;

const RECOVERY_TARGETS_KEY: &str = "recoveryTargets";

/// Application type reserved for clean room targets, which are never listed
const CLEAN_ROOM: &str = "CLEAN_ROOM";

#[derive(Debug, Deserialize)]
struct TargetRecord {
    id: Value,
    name: String,
    #[serde(rename = "applicationType", default)]
    application_type: String,
}

/// Lower-cased target name to target id, in server listing order
pub type TargetSummary = IndexMap<String, String>;

/// Cached listing of the recovery targets known to the server
pub struct TargetCatalog {
    session: SharedSession,
    targets: Arc<TargetSummary>,
}

/// Catalog key for a target name
pub(crate) fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Build the name to id mapping from a list document
pub(crate) fn parse_catalog(document: &Value) -> Result<TargetSummary, SdkError> {
    let records = document.get(RECOVERY_TARGETS_KEY).cloned().ok_or_else(|| {
        ResponseError::malformed(format!("missing `{}`", RECOVERY_TARGETS_KEY))
    })?;
    let records: Vec<TargetRecord> = serde_json::from_value(records).map_err(|e| {
        ResponseError::malformed(format!("invalid `{}`: {}", RECOVERY_TARGETS_KEY, e))
    })?;

    let mut targets = TargetSummary::new();
    for record in records {
        if record.application_type == CLEAN_ROOM {
            debug!("Skipping clean room target: {}", record.name);
            continue;
        }
        let id = scalar_to_string(&record.id).ok_or_else(|| {
            ResponseError::malformed(format!("target {} has no usable id", record.name))
        })?;
        targets.insert(record.name.to_lowercase(), id);
    }

    Ok(targets)
}

impl TargetCatalog {
    /// Create a catalog and load the target list from the server
    pub async fn new(session: SharedSession) -> Result<Self, SdkError> {
        let mut catalog = Self {
            session,
            targets: Arc::new(TargetSummary::new()),
        };
        catalog.load().await?;
        Ok(catalog)
    }

    /// Fetch the target list, replacing the cached one as a whole
    pub async fn load(&mut self) -> Result<(), SdkError> {
        let path = self.session.services().recovery_targets().to_string();
        let document = self
            .session
            .get(&path)
            .await?
            .into_document(RECOVERY_TARGETS_KEY)?;

        let targets = parse_catalog(&document)?;
        info!("Loaded {} recovery target(s)", targets.len());
        self.targets = Arc::new(targets);
        Ok(())
    }

    /// Reload the target list to pick up server side changes
    pub async fn refresh(&mut self) -> Result<(), SdkError> {
        self.load().await
    }

    pub fn targets(&self) -> &TargetSummary {
        &self.targets
    }

    /// Shared handle to the current listing, unaffected by later refreshes
    pub fn snapshot(&self) -> Arc<TargetSummary> {
        Arc::clone(&self.targets)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Case-insensitive check for a target name
    pub fn contains(&self, name: &str) -> bool {
        self.targets.contains_key(&normalize_name(name))
    }

    /// Id of a target, if the catalog knows it
    pub fn id_of(&self, name: &str) -> Option<&str> {
        self.targets.get(&normalize_name(name)).map(String::as_str)
    }

    /// Load the full configuration of a target by name
    pub async fn get(&self, name: &str) -> Result<RecoveryTarget, SdkError> {
        let name = normalize_name(name);
        let id = self
            .targets
            .get(&name)
            .ok_or_else(|| SdkError::NotFound(name.clone()))?;

        RecoveryTarget::new(Arc::clone(&self.session), &name, Some(id.as_str())).await
    }
}

impl fmt::Display for TargetCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = format!("{:^5}\t{:^20}\n\n", "S. No.", "RecoveryTargets");
        for (index, name) in self.targets.keys().enumerate() {
            out.push_str(&format!("{:^5}\t{:20}\n", index + 1, name));
        }
        f.write_str(out.trim())
    }
}

impl fmt::Debug for TargetCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetCatalog")
            .field("targets", &self.targets)
            .finish_non_exhaustive()
    }
}
