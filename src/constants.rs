//! Constants for the CNI network isolation layer.
//!
//! All paths, file names, and environment defaults are defined here to
//! ensure consistency and prevent magic strings throughout the codebase.

// =============================================================================
// State Layout
// =============================================================================

/// Default root directory for checkpointed CNI network state.
///
/// Layout underneath:
///
/// ```text
/// /var/run/magiknet/
/// └── <container-id>/
///     ├── ns                        (bind-mounted namespace handle)
///     └── networks/
///         └── <network-name>/
///             └── <interface>/
///                 └── network.info  (checkpointed plugin result)
/// ```
pub const DEFAULT_STATE_ROOT: &str = "/var/run/magiknet";

/// File name of the bind-mounted network namespace handle.
pub const NAMESPACE_HANDLE_FILE: &str = "ns";

/// Subdirectory holding one directory per joined network.
pub const NETWORKS_SUBDIR: &str = "networks";

/// File name of the checkpointed CNI plugin result.
pub const NETWORK_INFO_FILE: &str = "network.info";

// =============================================================================
// Interface Naming
// =============================================================================

/// Prefix for container-side interface names (`eth0`, `eth1`, ...).
/// Indices are assigned densely in the order networks appear in the
/// container spec.
pub const IFNAME_PREFIX: &str = "eth";

// =============================================================================
// Plugin Environment
// =============================================================================

/// `PATH` handed to CNI plugins when the agent's own environment does not
/// set one. Plugins shell out to tools like `iptables` and need a sane
/// search path.
pub const DEFAULT_EXEC_PATH: &str = "/usr/local/sbin:/usr/local/bin:/usr/sbin:/usr/bin:/sbin:/bin";
