use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::error::SdkError;
use crate::session::SharedSession;

use super::catalog::{normalize_name, TargetCatalog};
use super::detail::TargetDetail;
use super::policy::PolicyType;

const ENTITY_KEY: &str = "entity";

/// A single recovery target with its configuration loaded
pub struct RecoveryTarget {
    session: SharedSession,
    name: String,
    id: String,
    properties: Value,
    detail: TargetDetail,
}

impl RecoveryTarget {
    /// Load a recovery target by name
    ///
    /// When `id` is not given the target list is fetched to resolve it. The detail document
    /// is fetched before returning, so a constructed target is always fully populated.
    pub async fn new(
        session: SharedSession,
        name: &str,
        id: Option<&str>,
    ) -> Result<Self, SdkError> {
        let name = normalize_name(name);

        let id = match id.filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => {
                debug!("Resolving id of recovery target {}", name);
                let catalog = TargetCatalog::new(Arc::clone(&session)).await?;
                catalog
                    .targets()
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| SdkError::NotFound(name.clone()))?
            }
        };

        let (properties, detail) = Self::fetch(&session, &id).await?;

        Ok(Self {
            session,
            name,
            id,
            properties,
            detail,
        })
    }

    async fn fetch(session: &SharedSession, id: &str) -> Result<(Value, TargetDetail), SdkError> {
        let path = session.services().recovery_target(id)?;
        let properties = session.get(&path).await?.into_document(ENTITY_KEY)?;
        let detail = TargetDetail::from_document(&properties);
        debug!("Recovery target {} has policy type {}", id, detail.policy_type());

        Ok((properties, detail))
    }

    /// Re-fetch the detail document and rebuild every field from it
    pub async fn refresh(&mut self) -> Result<(), SdkError> {
        let (properties, detail) = Self::fetch(&self.session, &self.id).await?;
        self.properties = properties;
        self.detail = detail;
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Lower-cased target name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw detail document as returned by the server
    pub fn properties(&self) -> &Value {
        &self.properties
    }

    pub fn detail(&self) -> &TargetDetail {
        &self.detail
    }

    pub fn policy_type(&self) -> PolicyType {
        self.detail.policy_type()
    }
}

impl fmt::Debug for RecoveryTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecoveryTarget")
            .field("name", &self.name)
            .field("id", &self.id)
            .field("detail", &self.detail)
            .finish_non_exhaustive()
    }
}
