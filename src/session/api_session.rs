use crate::error::SdkError;
use crate::services::ServiceTable;

use super::response::SessionResponse;

/// Trait for authenticated sessions against the backup server
#[async_trait::async_trait]
pub trait Session: Send + Sync {
    /// Issue a GET request for a path relative to the server base URL
    async fn get(&self, path: &str) -> Result<SessionResponse, SdkError>;

    /// Endpoint table used to build request paths
    fn services(&self) -> &ServiceTable;
}
