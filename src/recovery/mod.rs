//! Recovery targets
//!
//! A recovery target describes how a virtual machine is recreated on a destination
//! hypervisor during failover or test boot:
//! - [`TargetCatalog`] lists the targets known to the server by name
//! - [`RecoveryTarget`] loads one target and exposes its configuration
//! - [`TargetDetail`] flattens the detail document, keyed by [`PolicyType`]

mod catalog;
mod detail;
mod json;
mod policy;
mod target;

pub use catalog::{TargetCatalog, TargetSummary};
pub use detail::TargetDetail;
pub use policy::{
    AwsOptions, AzureOptions, HyperVOptions, PolicyOptions, PolicyType, VMwareOptions,
};
pub use target::RecoveryTarget;
