//! Recovery Targets Client Library
//!
//! A client for the recovery target resource of a backup server REST API.

pub mod config;
pub mod error;
pub mod recovery;
pub mod services;
pub mod session;

pub use config::Config;
pub use error::{ResponseError, SdkError};
pub use recovery::{PolicyType, RecoveryTarget, TargetCatalog, TargetDetail};
pub use session::{HttpSession, Session, SessionResponse};
