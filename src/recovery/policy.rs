//! Platform specific recovery target options
//!
//! The `entity.policyType` value of a detail document decides which hypervisor platform a
//! target restores to, and with it which part of the document carries meaning. Each
//! platform gets its own options struct; [`PolicyOptions`] holds exactly one of them.

use serde_json::Value;
use std::fmt;
use tracing::warn;

use super::json::{
    bool_at, first_at, int_at, is_truthy, lookup, scalar_to_string, string_at, string_or,
    strings_at, strings_from_objects,
};

/// Hypervisor platform of a recovery target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyType {
    Aws,
    HyperV,
    Azure,
    VMware,
    Unknown,
}

/// Source `policyType` values and the platform each one selects
const POLICY_TYPES: &[(&str, PolicyType)] = &[
    ("AMAZON", PolicyType::Aws),
    ("MICROSOFT", PolicyType::HyperV),
    ("AZURE_RESOURCE_MANAGER", PolicyType::Azure),
    ("VMW_BACKUP_LABTEMPLATE", PolicyType::VMware),
    ("VMW_LIVEMOUNT", PolicyType::VMware),
];

impl PolicyType {
    pub fn from_source(value: &str) -> Self {
        POLICY_TYPES
            .iter()
            .find(|(source, _)| *source == value)
            .map(|(_, policy_type)| *policy_type)
            .unwrap_or(PolicyType::Unknown)
    }

    /// Numeric policy code used by the server
    pub fn code(&self) -> i32 {
        match self {
            PolicyType::Aws => 1,
            PolicyType::HyperV => 2,
            PolicyType::Azure => 7,
            PolicyType::VMware => 13,
            PolicyType::Unknown => -1,
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyType::Aws => "AWS",
            PolicyType::HyperV => "Hyper-V",
            PolicyType::Azure => "Azure",
            PolicyType::VMware => "VMware",
            PolicyType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsOptions {
    pub availability_zone: Option<String>,
    pub volume_type: Option<String>,
    pub encryption_key: Option<String>,
    pub encryption_key_id: Option<String>,
    pub iam_role_name: Option<String>,
    pub iam_role_id: Option<String>,
    pub destination_network: Option<String>,
    pub security_group: String,
    pub instance_type: String,
    pub expiration_time: Option<String>,
    pub test_virtual_network: Option<String>,
    pub test_security_group: String,
    pub test_vm_size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HyperVOptions {
    pub vm_folder: String,
    pub destination_network: Option<String>,
    pub destination_host: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AzureOptions {
    pub resource_group: String,
    pub region: Option<String>,
    pub availability_zone: Option<String>,
    pub storage_account: String,
    pub vm_size: Option<String>,
    pub disk_type: Option<String>,
    pub virtual_network: Option<String>,
    pub security_group: String,
    pub create_public_ip: Option<bool>,
    pub restore_as_managed_vm: Option<bool>,
    pub expiration_time: Option<String>,
    pub test_virtual_network: Option<String>,
    pub test_vm_size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VMwareOptions {
    pub destination_host: String,
    pub datastore: String,
    pub resource_pool: String,
    pub vm_folder: String,
    pub destination_networks: Vec<String>,
    pub vm_storage_policy: Option<String>,
    pub expiration_time: Option<String>,
    pub failover_ma: Option<String>,
    pub isolated_network: Option<bool>,
    pub max_cores: Option<i64>,
    pub max_vm_quota: Option<i64>,
    pub iso_paths: Vec<String>,
    pub server_group: Option<String>,
}

/// The option group that applies to a target's platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyOptions {
    Aws(AwsOptions),
    HyperV(HyperVOptions),
    Azure(AzureOptions),
    VMware(VMwareOptions),
    Unknown,
}

impl PolicyOptions {
    /// Pick the platform from `entity.policyType` and extract its options
    pub fn from_document(doc: &Value) -> Self {
        let source = string_at(doc, &["entity", "policyType"]).unwrap_or_default();
        let policy_type = PolicyType::from_source(&source);

        match policy_type {
            PolicyType::Aws => PolicyOptions::Aws(aws_options(doc)),
            PolicyType::HyperV => PolicyOptions::HyperV(hyperv_options(doc)),
            PolicyType::Azure => PolicyOptions::Azure(azure_options(doc)),
            PolicyType::VMware => PolicyOptions::VMware(vmware_options(doc)),
            PolicyType::Unknown => {
                warn!("Unrecognized recovery target policy type: {:?}", source);
                PolicyOptions::Unknown
            }
        }
    }

    pub fn policy_type(&self) -> PolicyType {
        match self {
            PolicyOptions::Aws(_) => PolicyType::Aws,
            PolicyOptions::HyperV(_) => PolicyType::HyperV,
            PolicyOptions::Azure(_) => PolicyType::Azure,
            PolicyOptions::VMware(_) => PolicyType::VMware,
            PolicyOptions::Unknown => PolicyType::Unknown,
        }
    }
}

/// Render the live mount expiration; hours win over days
pub fn expiration_time(doc: &Value) -> Option<String> {
    let retain = |key: &str| {
        lookup(doc, &["liveMountOptions", "expirationTime", key])
            .filter(|v| is_truthy(v))
            .and_then(scalar_to_string)
    };

    if let Some(hours) = retain("minutesRetainUntil") {
        Some(format!("{} hours", hours))
    } else {
        retain("daysRetainUntil").map(|days| format!("{} days", days))
    }
}

/// `name` of the first object in the array at `path`, or "" when there is none
fn first_name(doc: &Value, path: &[&str], field: &str) -> String {
    first_at(doc, path)
        .and_then(|item| item.get(field))
        .and_then(scalar_to_string)
        .unwrap_or_default()
}

fn aws_options(doc: &Value) -> AwsOptions {
    AwsOptions {
        availability_zone: string_at(doc, &["cloudDestinationOptions", "availabilityZone"]),
        volume_type: string_at(doc, &["cloudDestinationOptions", "volumeType"]),
        encryption_key: string_at(doc, &["cloudDestinationOptions", "encryptionKey", "name"]),
        encryption_key_id: string_at(doc, &["cloudDestinationOptions", "encryptionKey", "id"]),
        iam_role_name: string_at(doc, &["destinationOptions", "iamRole", "name"]),
        iam_role_id: string_at(doc, &["destinationOptions", "iamRole", "id"]),
        destination_network: string_at(
            doc,
            &["networkOptions", "networkCard", "networkDisplayName"],
        ),
        security_group: first_name(doc, &["securityOptions", "securityGroups"], "name"),
        instance_type: first_at(doc, &["cloudDestinationOptions", "instanceTypes"])
            .and_then(scalar_to_string)
            .unwrap_or_else(|| "Auto".to_string()),
        expiration_time: expiration_time(doc),
        test_virtual_network: string_at(doc, &["networkOptions", "cloudNetwork", "label"]),
        test_security_group: first_name(doc, &["securityOptions", "testSecurityGroups"], "name"),
        test_vm_size: string_or(doc, &["cloudDestinationOptions", "vmInstanceType"], "Auto"),
    }
}

fn hyperv_options(doc: &Value) -> HyperVOptions {
    HyperVOptions {
        vm_folder: string_or(doc, &["destinationOptions", "dataStore"], ""),
        destination_network: first_at(doc, &["networkOptions", "networkCard", "networkNames"])
            .and_then(scalar_to_string),
        destination_host: string_or(doc, &["destinationOptions", "destinationHost"], ""),
    }
}

fn azure_options(doc: &Value) -> AzureOptions {
    AzureOptions {
        resource_group: string_or(doc, &["destinationOptions", "destinationHost"], ""),
        region: string_at(doc, &["cloudDestinationOptions", "region", "name"]),
        availability_zone: string_at(doc, &["cloudDestinationOptions", "availabilityZone"]),
        storage_account: string_or(doc, &["destinationOptions", "dataStore"], ""),
        vm_size: string_at(doc, &["cloudDestinationOptions", "vmInstanceType"]),
        disk_type: string_at(doc, &["cloudDestinationOptions", "volumeType"]),
        virtual_network: string_at(
            doc,
            &["networkOptions", "networkCard", "networkDisplayName"],
        ),
        security_group: first_name(doc, &["securityOptions", "securityGroups"], "name"),
        create_public_ip: bool_at(doc, &["cloudDestinationOptions", "publicIP"]),
        restore_as_managed_vm: bool_at(doc, &["cloudDestinationOptions", "restoreAsManagedVM"]),
        expiration_time: expiration_time(doc),
        test_virtual_network: string_at(doc, &["networkOptions", "cloudNetwork", "label"]),
        // The server reports the Azure test failover size under amazonPolicy.
        test_vm_size: first_name(
            doc,
            &["amazonPolicy", "vmInstanceTypes"],
            "vmInstanceTypeName",
        ),
    }
}

fn vmware_options(doc: &Value) -> VMwareOptions {
    let failover_ma = lookup(doc, &["mediaAgent"])
        .filter(|v| is_truthy(v))
        .and_then(|_| string_at(doc, &["mediaAgent", "clientName"]));
    let server_group = lookup(doc, &["associatedClientGroup"])
        .filter(|v| is_truthy(v))
        .and_then(|_| string_at(doc, &["associatedClientGroup", "clientGroupName"]));

    VMwareOptions {
        destination_host: string_or(doc, &["destinationOptions", "destinationHost"], ""),
        datastore: string_or(doc, &["destinationOptions", "dataStore"], ""),
        resource_pool: string_or(doc, &["destinationOptions", "resourcePoolPath"], ""),
        vm_folder: string_or(doc, &["destinationOptions", "vmFolder"], ""),
        destination_networks: strings_at(
            doc,
            &["networkOptions", "networkCard", "destinationNetworks"],
        ),
        vm_storage_policy: string_at(doc, &["vmStoragePolicyName"]),
        expiration_time: expiration_time(doc),
        failover_ma,
        isolated_network: bool_at(doc, &["virtualLabOptions", "configureIsolatedNetwork"]),
        max_cores: int_at(doc, &["maxCores"]),
        max_vm_quota: int_at(doc, &["maxVMQuota"]),
        iso_paths: strings_from_objects(doc, &["isoInfo"], "isoPath"),
        server_group,
    }
}
