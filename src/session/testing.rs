use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::SdkError;
use crate::services::ServiceTable;

use super::api_session::Session;
use super::response::SessionResponse;

/// Session that answers from a fixed table of paths and records every request
pub(crate) struct StaticSession {
    responses: Mutex<HashMap<String, SessionResponse>>,
    requests: Mutex<Vec<String>>,
    services: ServiceTable,
}

impl StaticSession {
    pub(crate) fn new() -> Self {
        Self {
            responses: Mutex::new(HashMap::new()),
            requests: Mutex::new(Vec::new()),
            services: ServiceTable::default(),
        }
    }

    pub(crate) fn respond(self, path: &str, status: u16, body: &str) -> Self {
        self.set(path, status, body);
        self
    }

    pub(crate) fn set(&self, path: &str, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), SessionResponse::new(status, body));
    }

    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Session for StaticSession {
    async fn get(&self, path: &str) -> Result<SessionResponse, SdkError> {
        self.requests.lock().unwrap().push(path.to_string());
        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| SessionResponse::new(404, "")))
    }

    fn services(&self) -> &ServiceTable {
        &self.services
    }
}
