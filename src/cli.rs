//! CLI parsing and command execution
//!
//! This module handles command-line argument parsing and routes commands to the appropriate handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use recovery_targets::recovery::{PolicyOptions, RecoveryTarget, TargetCatalog, TargetDetail};
use recovery_targets::session::SharedSession;
use recovery_targets::{Config, HttpSession};

#[derive(Parser)]
#[command(name = "rtctl")]
#[command(about = "Inspect recovery targets configured on a backup server", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "RTCTL_CONFIG")]
    pub config: Option<PathBuf>,

    /// REST API base URL (overrides config file)
    #[arg(long, env = "RECOVERY_API_URL")]
    pub server_url: Option<String>,

    /// Authentication token (overrides config file)
    #[arg(long, env = "RECOVERY_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a sample configuration file
    Init {
        /// Output path for the configuration file
        #[arg(short, long, default_value = "rtctl.toml")]
        output: PathBuf,
    },

    /// List recovery targets
    List,

    /// Check whether a recovery target exists
    Has {
        /// Name of the recovery target
        name: String,
    },

    /// Show the configuration of a recovery target
    Show {
        /// Name of the recovery target
        name: String,

        /// Target id, skips the name lookup
        #[arg(long)]
        id: Option<String>,

        /// Print the raw JSON document instead of the parsed fields
        #[arg(long)]
        raw: bool,
    },
}

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    // Handle init command separately as it doesn't need a session
    if let Commands::Init { output } = cli.command {
        Config::create_sample(&output)
            .with_context(|| format!("Failed to create sample config at {:?}", output))?;
        info!("Sample configuration created at {:?}", output);
        return Ok(());
    }

    // Load configuration
    let mut config = if let Some(config_path) = cli.config {
        Config::from_file(&config_path)
            .with_context(|| format!("Failed to load config from {:?}", config_path))?
    } else {
        Config::from_env().context("Failed to load config from environment")?
    };

    // Override with CLI arguments if provided
    if let Some(url) = cli.server_url {
        config.server.url = url;
    }
    if let Some(token) = cli.token {
        config.server.token = token;
    }

    let session: SharedSession =
        Arc::new(HttpSession::from_config(&config).context("Failed to create HTTP session")?);

    match cli.command {
        Commands::Init { .. } => unreachable!(), // Handled above

        Commands::List => {
            let catalog = TargetCatalog::new(session)
                .await
                .context("Failed to list recovery targets")?;
            if catalog.is_empty() {
                println!("No recovery targets found");
            } else {
                println!("{}", catalog);
            }
        }

        Commands::Has { name } => {
            let catalog = TargetCatalog::new(session)
                .await
                .context("Failed to list recovery targets")?;
            if catalog.contains(&name) {
                println!("Recovery target '{}' exists", name);
            } else {
                anyhow::bail!("Recovery target '{}' does not exist", name);
            }
        }

        Commands::Show { name, id, raw } => {
            let target = match id {
                Some(id) => RecoveryTarget::new(session, &name, Some(id.as_str())).await,
                None => {
                    let catalog = TargetCatalog::new(Arc::clone(&session))
                        .await
                        .context("Failed to list recovery targets")?;
                    catalog.get(&name).await
                }
            }
            .with_context(|| format!("Failed to load recovery target '{}'", name))?;

            if raw {
                let document = serde_json::to_string_pretty(target.properties())
                    .context("Failed to serialize recovery target")?;
                println!("{}", document);
            } else {
                println!("Recovery target: {} (id {})", target.name(), target.id());
                for (field, value) in describe(target.detail()) {
                    println!("  {:<24} {}", field, value);
                }
            }
        }
    }

    Ok(())
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn opt(value: &Option<String>) -> Option<String> {
    value.clone()
}

fn flag(value: Option<bool>) -> Option<String> {
    value.map(|b| if b { "yes" } else { "no" }.to_string())
}

fn list(values: &[String]) -> Option<String> {
    Some(values.join(", "))
}

/// Label/value pairs for the fields a target's platform populates
fn describe(detail: &TargetDetail) -> Vec<(&'static str, String)> {
    let mut fields: Vec<(&'static str, String)> = Vec::new();
    let mut push = |label: &'static str, value: Option<String>| {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            fields.push((label, value));
        }
    };

    push(
        "Policy type",
        Some(format!("{} ({})", detail.policy_type(), detail.policy_type().code())),
    );
    push("Application type", detail.application_type().map(str::to_string));
    push("Destination hypervisor", detail.destination_hypervisor().map(str::to_string));
    push("Access node", text(detail.access_node()));
    push("Access node group", text(detail.access_node_client_group()));
    push("VM prefix", text(detail.vm_prefix()));
    push("VM suffix", text(detail.vm_suffix()));
    push("Users", list(detail.security_user_names()));
    push("User groups", list(detail.security_user_group_names()));

    match detail.options() {
        PolicyOptions::Aws(o) => {
            push("Availability zone", opt(&o.availability_zone));
            push("Volume type", opt(&o.volume_type));
            push("Encryption key", opt(&o.encryption_key));
            push("Encryption key id", opt(&o.encryption_key_id));
            push("IAM role", opt(&o.iam_role_name));
            push("IAM role id", opt(&o.iam_role_id));
            push("Destination network", opt(&o.destination_network));
            push("Security group", text(&o.security_group));
            push("Instance type", text(&o.instance_type));
            push("Expiration time", opt(&o.expiration_time));
            push("Test virtual network", opt(&o.test_virtual_network));
            push("Test security group", text(&o.test_security_group));
            push("Test VM size", text(&o.test_vm_size));
        }
        PolicyOptions::HyperV(o) => {
            push("VM folder", text(&o.vm_folder));
            push("Destination network", opt(&o.destination_network));
            push("Destination host", text(&o.destination_host));
        }
        PolicyOptions::Azure(o) => {
            push("Resource group", text(&o.resource_group));
            push("Region", opt(&o.region));
            push("Availability zone", opt(&o.availability_zone));
            push("Storage account", text(&o.storage_account));
            push("VM size", opt(&o.vm_size));
            push("Disk type", opt(&o.disk_type));
            push("Virtual network", opt(&o.virtual_network));
            push("Security group", text(&o.security_group));
            push("Create public IP", flag(o.create_public_ip));
            push("Restore as managed VM", flag(o.restore_as_managed_vm));
            push("Expiration time", opt(&o.expiration_time));
            push("Test virtual network", opt(&o.test_virtual_network));
            push("Test VM size", text(&o.test_vm_size));
        }
        PolicyOptions::VMware(o) => {
            push("Destination host", text(&o.destination_host));
            push("Datastore", text(&o.datastore));
            push("Resource pool", text(&o.resource_pool));
            push("VM folder", text(&o.vm_folder));
            push("Destination networks", list(&o.destination_networks));
            push("VM storage policy", opt(&o.vm_storage_policy));
            push("Expiration time", opt(&o.expiration_time));
            push("Failover media agent", opt(&o.failover_ma));
            push("Isolated network", flag(o.isolated_network));
            push("Max CPU cores", o.max_cores.map(|n| n.to_string()));
            push("Max VMs", o.max_vm_quota.map(|n| n.to_string()));
            push("ISO paths", list(&o.iso_paths));
            push("Server group", opt(&o.server_group));
        }
        PolicyOptions::Unknown => {}
    }

    fields
}
