//! CNI wire types.
//!
//! Two JSON documents cross the plugin boundary:
//!
//! - the **network configuration** the operator drops into the config
//!   directory (also fed verbatim to the plugin on stdin), and
//! - the **plugin result** a successful ADD prints on stdout.
//!
//! Only the fields this isolator acts on are modeled; everything else a
//! plugin or operator adds is ignored on parse and preserved on disk via
//! the raw bytes kept alongside (see [`crate::config::NetworkConfigInfo`]).

use serde::{Deserialize, Serialize};

// =============================================================================
// Network Configuration
// =============================================================================

/// A CNI network configuration, one per file in the config directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// CNI spec version declared by the configuration.
    #[serde(
        default,
        rename = "cniVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub cni_version: Option<String>,

    /// Network name, unique within the process.
    pub name: String,

    /// Plugin binary name, resolved under the plugin directory.
    #[serde(rename = "type")]
    pub plugin: String,

    /// Optional IPAM delegation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipam: Option<IpamConfig>,
}

/// The `ipam` section of a network configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpamConfig {
    /// IPAM plugin binary name, resolved under the plugin directory.
    #[serde(rename = "type")]
    pub plugin: String,
}

/// Parses a network configuration file.
///
/// `name` and `type` are required and must be non-empty; unknown fields
/// are ignored.
pub fn parse_network_config(bytes: &[u8]) -> Result<NetworkConfig, String> {
    let config: NetworkConfig = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

    if config.name.is_empty() {
        return Err("'name' is empty".to_string());
    }
    if config.plugin.is_empty() {
        return Err("'type' is empty".to_string());
    }
    if let Some(ipam) = &config.ipam {
        if ipam.plugin.is_empty() {
            return Err("'ipam.type' is empty".to_string());
        }
    }

    Ok(config)
}

// =============================================================================
// Plugin Result
// =============================================================================

/// The result a CNI plugin prints on stdout after a successful ADD:
/// assigned addresses, routes, and DNS.
///
/// The isolator checkpoints the raw bytes and only inspects the assigned
/// addresses for logging; every field is therefore optional and lenient.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CniNetworkInfo {
    /// CNI spec version of the result.
    #[serde(
        default,
        rename = "cniVersion",
        skip_serializing_if = "Option::is_none"
    )]
    pub cni_version: Option<String>,

    /// Assigned IPv4 configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip4: Option<IpConfig>,

    /// Assigned IPv6 configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip6: Option<IpConfig>,

    /// DNS settings handed back by the plugin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsConfig>,
}

/// One address family's assignment within a plugin result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpConfig {
    /// Assigned address in CIDR notation.
    pub ip: String,

    /// Default gateway for this family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,

    /// Routes to install via this interface.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteConfig>,
}

/// A route entry within a plugin result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Destination in CIDR notation.
    pub dst: String,

    /// Next hop; the interface gateway when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gw: Option<String>,
}

/// The `dns` section of a plugin result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DnsConfig {
    /// Nameserver addresses.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,

    /// Local domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Search domains.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub search: Vec<String>,

    /// Resolver options.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Parses the stdout of a successful CNI ADD.
pub fn parse_network_info(bytes: &[u8]) -> Result<CniNetworkInfo, String> {
    serde_json::from_slice(bytes).map_err(|e| e.to_string())
}
