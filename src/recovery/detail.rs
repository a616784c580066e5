use serde_json::Value;

use super::json::{lookup, string_at, string_or, strings_from_objects};
use super::policy::{AwsOptions, AzureOptions, PolicyOptions, PolicyType, VMwareOptions};

const GROUP_ACCESS_NODE: &str = "Group";

/// Flattened configuration of one recovery target
///
/// Fields shared by every platform are stored directly; the platform specific ones live in
/// [`PolicyOptions`]. Accessors for a platform other than the target's return `None`, an
/// empty slice or an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDetail {
    application_type: Option<String>,
    destination_hypervisor: Option<String>,
    vm_prefix: String,
    vm_suffix: String,
    access_node: String,
    access_node_client_group: String,
    security_user_names: Vec<String>,
    security_user_group_names: Vec<String>,
    options: PolicyOptions,
}

impl TargetDetail {
    /// Build the detail from a document that has already been checked for `entity`
    pub fn from_document(doc: &Value) -> Self {
        let access_node = string_or(doc, &["accessNode", "name"], "");
        let node_type = lookup(doc, &["accessNode", "type"]).and_then(Value::as_str);
        let access_node_client_group = if node_type == Some(GROUP_ACCESS_NODE) {
            access_node.clone()
        } else {
            String::new()
        };

        Self {
            application_type: string_at(doc, &["entity", "applicationType"]),
            destination_hypervisor: string_at(doc, &["entity", "destinationHypervisor", "name"]),
            vm_prefix: string_or(doc, &["vmDisplayName", "prefix"], ""),
            vm_suffix: string_or(doc, &["vmDisplayName", "suffix"], ""),
            access_node,
            access_node_client_group,
            security_user_names: strings_from_objects(
                doc,
                &["securityOptions", "users"],
                "userName",
            ),
            security_user_group_names: strings_from_objects(
                doc,
                &["securityOptions", "userGroups"],
                "userGroupName",
            ),
            options: PolicyOptions::from_document(doc),
        }
    }

    pub fn policy_type(&self) -> PolicyType {
        self.options.policy_type()
    }

    pub fn options(&self) -> &PolicyOptions {
        &self.options
    }

    pub fn application_type(&self) -> Option<&str> {
        self.application_type.as_deref()
    }

    /// Client name of the destination hypervisor
    pub fn destination_hypervisor(&self) -> Option<&str> {
        self.destination_hypervisor.as_deref()
    }

    pub fn vm_prefix(&self) -> &str {
        &self.vm_prefix
    }

    pub fn vm_suffix(&self) -> &str {
        &self.vm_suffix
    }

    /// Access node (proxy) client name
    pub fn access_node(&self) -> &str {
        &self.access_node
    }

    /// Client group name when the access node is a group, otherwise empty
    pub fn access_node_client_group(&self) -> &str {
        &self.access_node_client_group
    }

    pub fn security_user_names(&self) -> &[String] {
        &self.security_user_names
    }

    pub fn security_user_group_names(&self) -> &[String] {
        &self.security_user_group_names
    }

    fn aws(&self) -> Option<&AwsOptions> {
        match &self.options {
            PolicyOptions::Aws(aws) => Some(aws),
            _ => None,
        }
    }

    fn azure(&self) -> Option<&AzureOptions> {
        match &self.options {
            PolicyOptions::Azure(azure) => Some(azure),
            _ => None,
        }
    }

    fn vmware(&self) -> Option<&VMwareOptions> {
        match &self.options {
            PolicyOptions::VMware(vmware) => Some(vmware),
            _ => None,
        }
    }

    // Fields shared by more than one platform

    /// Hyper-V, VMware
    pub fn destination_host(&self) -> Option<&str> {
        match &self.options {
            PolicyOptions::HyperV(o) => Some(&o.destination_host),
            PolicyOptions::VMware(o) => Some(&o.destination_host),
            _ => None,
        }
    }

    /// Hyper-V, VMware
    pub fn vm_folder(&self) -> Option<&str> {
        match &self.options {
            PolicyOptions::HyperV(o) => Some(&o.vm_folder),
            PolicyOptions::VMware(o) => Some(&o.vm_folder),
            _ => None,
        }
    }

    /// AWS, Hyper-V
    pub fn destination_network(&self) -> Option<&str> {
        match &self.options {
            PolicyOptions::Aws(o) => o.destination_network.as_deref(),
            PolicyOptions::HyperV(o) => o.destination_network.as_deref(),
            _ => None,
        }
    }

    /// AWS, Azure
    pub fn availability_zone(&self) -> Option<&str> {
        match &self.options {
            PolicyOptions::Aws(o) => o.availability_zone.as_deref(),
            PolicyOptions::Azure(o) => o.availability_zone.as_deref(),
            _ => None,
        }
    }

    /// AWS, Azure
    pub fn security_group(&self) -> Option<&str> {
        match &self.options {
            PolicyOptions::Aws(o) => Some(&o.security_group),
            PolicyOptions::Azure(o) => Some(&o.security_group),
            _ => None,
        }
    }

    /// AWS, Azure
    pub fn test_virtual_network(&self) -> Option<&str> {
        match &self.options {
            PolicyOptions::Aws(o) => o.test_virtual_network.as_deref(),
            PolicyOptions::Azure(o) => o.test_virtual_network.as_deref(),
            _ => None,
        }
    }

    /// AWS, Azure
    pub fn test_vm_size(&self) -> Option<&str> {
        match &self.options {
            PolicyOptions::Aws(o) => Some(&o.test_vm_size),
            PolicyOptions::Azure(o) => Some(&o.test_vm_size),
            _ => None,
        }
    }

    /// AWS, Azure, VMware; e.g. "4 hours" or "3 days"
    pub fn expiration_time(&self) -> Option<&str> {
        match &self.options {
            PolicyOptions::Aws(o) => o.expiration_time.as_deref(),
            PolicyOptions::Azure(o) => o.expiration_time.as_deref(),
            PolicyOptions::VMware(o) => o.expiration_time.as_deref(),
            _ => None,
        }
    }

    // AWS

    pub fn volume_type(&self) -> Option<&str> {
        self.aws().and_then(|o| o.volume_type.as_deref())
    }

    pub fn encryption_key(&self) -> Option<&str> {
        self.aws().and_then(|o| o.encryption_key.as_deref())
    }

    pub fn encryption_key_id(&self) -> Option<&str> {
        self.aws().and_then(|o| o.encryption_key_id.as_deref())
    }

    pub fn iam_role_name(&self) -> Option<&str> {
        self.aws().and_then(|o| o.iam_role_name.as_deref())
    }

    pub fn iam_role_id(&self) -> Option<&str> {
        self.aws().and_then(|o| o.iam_role_id.as_deref())
    }

    pub fn instance_type(&self) -> Option<&str> {
        self.aws().map(|o| o.instance_type.as_str())
    }

    pub fn test_security_group(&self) -> Option<&str> {
        self.aws().map(|o| o.test_security_group.as_str())
    }

    // Azure

    pub fn resource_group(&self) -> Option<&str> {
        self.azure().map(|o| o.resource_group.as_str())
    }

    pub fn region(&self) -> Option<&str> {
        self.azure().and_then(|o| o.region.as_deref())
    }

    pub fn storage_account(&self) -> Option<&str> {
        self.azure().map(|o| o.storage_account.as_str())
    }

    pub fn vm_size(&self) -> Option<&str> {
        self.azure().and_then(|o| o.vm_size.as_deref())
    }

    pub fn disk_type(&self) -> Option<&str> {
        self.azure().and_then(|o| o.disk_type.as_deref())
    }

    pub fn virtual_network(&self) -> Option<&str> {
        self.azure().and_then(|o| o.virtual_network.as_deref())
    }

    pub fn create_public_ip(&self) -> Option<bool> {
        self.azure().and_then(|o| o.create_public_ip)
    }

    pub fn restore_as_managed_vm(&self) -> Option<bool> {
        self.azure().and_then(|o| o.restore_as_managed_vm)
    }

    // VMware

    pub fn datastore(&self) -> Option<&str> {
        self.vmware().map(|o| o.datastore.as_str())
    }

    pub fn resource_pool(&self) -> Option<&str> {
        self.vmware().map(|o| o.resource_pool.as_str())
    }

    pub fn destination_networks(&self) -> &[String] {
        self.vmware()
            .map(|o| o.destination_networks.as_slice())
            .unwrap_or_default()
    }

    pub fn vm_storage_policy(&self) -> Option<&str> {
        self.vmware().and_then(|o| o.vm_storage_policy.as_deref())
    }

    /// Preferred media agent for test failover jobs
    pub fn failover_ma(&self) -> Option<&str> {
        self.vmware().and_then(|o| o.failover_ma.as_deref())
    }

    pub fn isolated_network(&self) -> Option<bool> {
        self.vmware().and_then(|o| o.isolated_network)
    }

    /// Maximum CPU cores for live mount
    pub fn max_cores(&self) -> Option<i64> {
        self.vmware().and_then(|o| o.max_cores)
    }

    /// Maximum number of VMs deployed for live mount
    pub fn max_vm_quota(&self) -> Option<i64> {
        self.vmware().and_then(|o| o.max_vm_quota)
    }

    pub fn iso_paths(&self) -> &[String] {
        self.vmware()
            .map(|o| o.iso_paths.as_slice())
            .unwrap_or_default()
    }

    pub fn server_group(&self) -> Option<&str> {
        self.vmware().and_then(|o| o.server_group.as_deref())
    }
}
