//! Transport sessions for the backup server REST API
//!
//! A session owns the authenticated HTTP connection and the endpoint table. The recovery
//! target types only ever issue GET requests through the [`Session`] trait, so tests can
//! swap the real HTTP transport for a canned one.

mod api_session;
mod http;
mod response;
#[cfg(test)]
pub(crate) mod testing;

pub use api_session::Session;
pub use http::HttpSession;
pub use response::SessionResponse;

use std::sync::Arc;

/// Type alias for a shared session trait object
pub type SharedSession = Arc<dyn Session>;
