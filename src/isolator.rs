//! The CNI network isolator: lifecycle engine, recovery, and the
//! containerizer-facing contract.
//!
//! # Lifecycle
//!
//! ```text
//!   recover(states, orphans)        once, before anything else
//!        │
//!        ▼
//!   prepare(id, config) ──▶ launch info (new NET | MNT | UTS namespaces)
//!        │                          (containerizer clones the child)
//!        ▼
//!   isolate(id, pid)      ──▶ pin /proc/<pid>/ns/net, ADD per network
//!        │                          (all ADDs awaited, failures joined)
//!        ▼
//!   cleanup(id)           ──▶ DEL per network, unmount, remove state
//! ```
//!
//! # State Discipline
//!
//! The per-container table is the single in-memory authority for "this
//! isolator manages this container". It lives behind an `RwLock` whose
//! critical sections never span an `.await`: plugin subprocesses and
//! stdout drains run without the lock, and their continuations re-acquire
//! it briefly. Within one `isolate` the ADDs for distinct networks run
//! concurrently and are all awaited before returning, so a later
//! `cleanup` can never race an in-flight ADD.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use async_trait::async_trait;
use futures::future::join_all;
use nix::sched::CloneFlags;
use tracing::{info, warn};

use crate::config::{self, NetworkConfigInfo};
use crate::constants::{DEFAULT_STATE_ROOT, IFNAME_PREFIX};
use crate::error::{Error, Result};
use crate::mount;
use crate::paths;
use crate::plugin::{self, CniCommand, PluginOutput};
use crate::spec::{self, CniNetworkInfo};

// =============================================================================
// Flags
// =============================================================================

/// Construction-time configuration handed down by the agent.
///
/// When neither directory is set the isolator runs in degenerate mode:
/// containers without named networks pass through on the host network,
/// and any request for a named network is rejected at `prepare`.
#[derive(Debug, Clone)]
pub struct IsolatorFlags {
    /// Directory holding the CNI plugin binaries.
    pub cni_plugins_dir: Option<PathBuf>,
    /// Directory holding one network configuration file per network.
    pub cni_config_dir: Option<PathBuf>,
    /// Root directory for checkpointed network state.
    pub state_root: PathBuf,
}

impl Default for IsolatorFlags {
    fn default() -> Self {
        Self {
            cni_plugins_dir: None,
            cni_config_dir: None,
            state_root: PathBuf::from(DEFAULT_STATE_ROOT),
        }
    }
}

// =============================================================================
// Containerizer-Facing Types
// =============================================================================

/// Isolation backend of a container, as declared by its spec.
///
/// Only [`ContainerType::Native`] containers can join CNI networks; the
/// other backends bring their own network stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerType {
    /// Native Linux container (namespaces + cgroups).
    Native,
    /// MicroVM-backed container.
    MicroVm,
    /// WebAssembly module.
    Wasm,
}

/// One network membership request from a container spec.
///
/// Entries without a `name` want the host network and are skipped when
/// collecting the networks to join.
#[derive(Debug, Clone, Default)]
pub struct NetworkRequest {
    /// Name of a configured CNI network.
    pub name: Option<String>,
}

/// The slice of a container spec this isolator consumes.
#[derive(Debug, Clone)]
pub struct ContainerConfig {
    /// Isolation backend of the container.
    pub container_type: ContainerType,
    /// Requested network memberships, in join order.
    pub networks: Vec<NetworkRequest>,
}

/// A container the containerizer believes is live, handed to `recover`.
#[derive(Debug, Clone)]
pub struct ContainerState {
    /// Opaque container id.
    pub container_id: String,
    /// Pid of the container's init process, when known.
    pub pid: Option<i32>,
}

/// What `prepare` asks of the clone that launches the container child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLaunchInfo {
    /// Namespaces the child must be cloned into.
    pub namespaces: CloneFlags,
}

/// A limitation reported by a watching isolator. The network isolator
/// never reports one.
#[derive(Debug, Clone, Default)]
pub struct ContainerLimitation {}

/// Resource assignment handed down on `update`; unused by this isolator.
#[derive(Debug, Clone, Default)]
pub struct Resources {}

/// Usage statistics returned by `usage`; always empty for networks.
#[derive(Debug, Clone, Default)]
pub struct ResourceStatistics {}

/// Per-container status contribution; always empty for this isolator.
#[derive(Debug, Clone, Default)]
pub struct ContainerStatus {}

// =============================================================================
// Isolator Contract
// =============================================================================

/// The isolation hooks the containerizer drives.
///
/// `recover` is called exactly once, before any other operation. For each
/// container, `prepare` strictly precedes `isolate` strictly precedes
/// `cleanup`.
#[async_trait]
pub trait Isolator: Send + Sync {
    /// Rebuilds in-memory state from on-disk artifacts after an agent
    /// restart. `states` are containers the containerizer knows to be
    /// live; `orphans` are containers it no longer tracks but which are
    /// still alive and will be cleaned up through the normal path.
    async fn recover(&self, states: &[ContainerState], orphans: &HashSet<String>) -> Result<()>;

    /// Validates the container's network requests before the child is
    /// cloned. Returns `None` when the container passes through on the
    /// host network, otherwise the namespaces the clone must use.
    async fn prepare(
        &self,
        container_id: &str,
        config: &ContainerConfig,
    ) -> Result<Option<ContainerLaunchInfo>>;

    /// Attaches the cloned child (by pid) to its networks.
    async fn isolate(&self, container_id: &str, pid: i32) -> Result<()>;

    /// Detaches the container from its networks and releases all on-disk
    /// state. Idempotent; a failed cleanup may be retried.
    async fn cleanup(&self, container_id: &str) -> Result<()>;

    /// Watches for limitations; no-op for network isolation.
    async fn watch(&self, container_id: &str) -> Result<Option<ContainerLimitation>> {
        let _ = container_id;
        Ok(None)
    }

    /// Applies a resource update; no-op for network isolation.
    async fn update(&self, container_id: &str, resources: &Resources) -> Result<()> {
        let _ = (container_id, resources);
        Ok(())
    }

    /// Reports usage statistics; no-op for network isolation.
    async fn usage(&self, container_id: &str) -> Result<ResourceStatistics> {
        let _ = container_id;
        Ok(ResourceStatistics::default())
    }

    /// Reports per-container status; no-op for network isolation.
    async fn status(&self, container_id: &str) -> Result<ContainerStatus> {
        let _ = container_id;
        Ok(ContainerStatus::default())
    }
}

// =============================================================================
// In-Memory State
// =============================================================================

/// Per-network state of a managed container.
#[derive(Debug, Clone)]
struct NetworkInfo {
    network_name: String,
    /// Container-side interface name, `eth<i>` by join order.
    if_name: String,
    /// Parsed plugin result, set after a successful ADD (or recovered
    /// from the checkpoint). `None` after a crash between plugin success
    /// and checkpoint write; the DEL is then best-effort.
    result: Option<CniNetworkInfo>,
}

/// All network state of one managed container, keyed by network name.
#[derive(Debug, Clone, Default)]
struct ContainerInfo {
    networks: HashMap<String, NetworkInfo>,
}

// =============================================================================
// NetworkIsolator
// =============================================================================

/// The CNI network isolator.
///
/// Owns everything under its state root exclusively; concurrent agents
/// on the same root are not supported. The plugin and configuration
/// directories are read-only inputs, scanned once at construction.
pub struct NetworkIsolator {
    /// Loaded network configurations, keyed by name. Empty in degenerate
    /// mode.
    configs: HashMap<String, NetworkConfigInfo>,
    /// Canonical state root; `None` in degenerate mode.
    state_root: Option<PathBuf>,
    /// Canonical plugin directory; `None` in degenerate mode.
    plugin_dir: Option<PathBuf>,
    /// The in-memory authority for which containers this isolator
    /// manages.
    containers: RwLock<HashMap<String, ContainerInfo>>,
}

impl NetworkIsolator {
    /// Creates the isolator from agent flags.
    ///
    /// With both directories configured this requires root, validates
    /// every network configuration and plugin binary, and prepares the
    /// state root as a shared mount in its own peer group. With neither
    /// configured the isolator is a host-network pass-through.
    pub fn create(flags: &IsolatorFlags) -> Result<Self> {
        if flags.cni_plugins_dir.is_none() && flags.cni_config_dir.is_none() {
            info!("no CNI directories configured, running as host-network pass-through");
            return Ok(Self::with_parts(HashMap::new(), None, None));
        }

        if !nix::unistd::geteuid().is_root() {
            return Err(Error::RootRequired);
        }

        let plugins_dir = match &flags.cni_plugins_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => {
                return Err(Error::MissingFlag {
                    flag: "cni_plugins_dir",
                })
            }
        };
        let config_dir = match &flags.cni_config_dir {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => {
                return Err(Error::MissingFlag {
                    flag: "cni_config_dir",
                })
            }
        };

        if !plugins_dir.exists() {
            return Err(Error::PluginDirNotFound { path: plugins_dir });
        }
        if !config_dir.exists() {
            return Err(Error::ConfigDirNotFound { path: config_dir });
        }

        let entries = fs::read_dir(&plugins_dir).map_err(|e| Error::ListDirFailed {
            path: plugins_dir.clone(),
            reason: e.to_string(),
        })?;
        if entries.count() == 0 {
            return Err(Error::PluginDirEmpty { path: plugins_dir });
        }

        let plugins_dir = plugins_dir
            .canonicalize()
            .map_err(|e| Error::CanonicalizeFailed {
                path: plugins_dir.clone(),
                reason: e.to_string(),
            })?;

        let configs = config::load_network_configs(&config_dir, &plugins_dir)?;

        fs::create_dir_all(&flags.state_root).map_err(|e| Error::StateRootSetupFailed {
            path: flags.state_root.clone(),
            reason: e.to_string(),
        })?;
        let state_root =
            flags
                .state_root
                .canonicalize()
                .map_err(|e| Error::StateRootSetupFailed {
                    path: flags.state_root.clone(),
                    reason: e.to_string(),
                })?;

        mount::ensure_shared_mount(&state_root)?;

        info!(
            networks = configs.len(),
            root = %state_root.display(),
            plugins = %plugins_dir.display(),
            "CNI network isolator initialized"
        );

        Ok(Self::with_parts(configs, Some(state_root), Some(plugins_dir)))
    }

    fn with_parts(
        configs: HashMap<String, NetworkConfigInfo>,
        state_root: Option<PathBuf>,
        plugin_dir: Option<PathBuf>,
    ) -> Self {
        Self {
            configs,
            state_root,
            plugin_dir,
            containers: RwLock::new(HashMap::new()),
        }
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    fn state_root(&self) -> Result<&Path> {
        self.state_root
            .as_deref()
            .ok_or_else(|| Error::Internal("state root not configured".to_string()))
    }

    fn plugin_dir(&self) -> Result<&Path> {
        self.plugin_dir
            .as_deref()
            .ok_or_else(|| Error::Internal("plugin directory not configured".to_string()))
    }

    fn containers_read(
        &self,
    ) -> Result<std::sync::RwLockReadGuard<'_, HashMap<String, ContainerInfo>>> {
        self.containers
            .read()
            .map_err(|e| Error::Internal(format!("lock poisoned: {e}")))
    }

    fn containers_write(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<String, ContainerInfo>>> {
        self.containers
            .write()
            .map_err(|e| Error::Internal(format!("lock poisoned: {e}")))
    }

    /// Snapshots `(network, interface)` pairs for a container, or `None`
    /// when the container is not managed (host network).
    fn network_snapshot(&self, container_id: &str) -> Result<Option<Vec<(String, String)>>> {
        let containers = self.containers_read()?;
        Ok(containers.get(container_id).map(|info| {
            info.networks
                .values()
                .map(|n| (n.network_name.clone(), n.if_name.clone()))
                .collect()
        }))
    }

    /// Runs one ADD: creates the interface directory, invokes the
    /// plugin, and hands its output to [`Self::finish_attach`].
    async fn attach(
        &self,
        container_id: &str,
        network: &str,
        if_name: &str,
        netns: &Path,
    ) -> Result<()> {
        let config = self.configs.get(network).ok_or_else(|| {
            Error::Internal(format!("no configuration for network '{network}'"))
        })?;
        let state_root = self.state_root()?;
        let plugin_dir = self.plugin_dir()?;

        let if_dir = paths::interface_dir(state_root, container_id, network, if_name);
        fs::create_dir_all(&if_dir).map_err(|e| Error::CreateDirFailed {
            path: if_dir.clone(),
            reason: e.to_string(),
        })?;

        let output = plugin::invoke(
            CniCommand::Add,
            container_id,
            if_name,
            netns,
            plugin_dir,
            config,
        )
        .await?;

        self.finish_attach(container_id, network, if_name, config, output)
    }

    /// Continuation after an ADD subprocess completed: verify the exit
    /// status, parse the result, checkpoint the raw bytes, then record
    /// the parsed result in memory. The checkpoint is written before the
    /// in-memory update so the disk stays the authority across restarts.
    fn finish_attach(
        &self,
        container_id: &str,
        network: &str,
        if_name: &str,
        config: &NetworkConfigInfo,
        output: PluginOutput,
    ) -> Result<()> {
        let plugin = &config.config.plugin;

        let exit_code = output.exit_code.ok_or_else(|| Error::PluginNotReaped {
            plugin: plugin.clone(),
        })?;
        if exit_code != 0 {
            return Err(Error::AttachFailed {
                plugin: plugin.clone(),
                id: container_id.to_string(),
                network: network.to_string(),
                output: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }

        let parsed =
            spec::parse_network_info(&output.stdout).map_err(|reason| Error::ResultParseFailed {
                plugin: plugin.clone(),
                reason,
            })?;

        if let Some(ip4) = &parsed.ip4 {
            info!(
                ip = %ip4.ip,
                network,
                container = container_id,
                "assigned IPv4 address from CNI network"
            );
        }
        if let Some(ip6) = &parsed.ip6 {
            info!(
                ip = %ip6.ip,
                network,
                container = container_id,
                "assigned IPv6 address from CNI network"
            );
        }

        let info_path =
            paths::network_info_path(self.state_root()?, container_id, network, if_name);
        fs::write(&info_path, &output.stdout).map_err(|e| Error::CheckpointFailed {
            path: info_path.clone(),
            output: String::from_utf8_lossy(&output.stdout).into_owned(),
            reason: e.to_string(),
        })?;

        let mut containers = self.containers_write()?;
        if let Some(container) = containers.get_mut(container_id) {
            if let Some(net) = container.networks.get_mut(network) {
                net.result = Some(parsed);
            }
        }

        Ok(())
    }

    /// Runs one DEL and, on success, removes the interface directory.
    async fn detach(&self, container_id: &str, network: &str, if_name: &str) -> Result<()> {
        let config = self.configs.get(network).ok_or_else(|| {
            Error::Internal(format!("no configuration for network '{network}'"))
        })?;
        let state_root = self.state_root()?;
        let plugin_dir = self.plugin_dir()?;

        let netns = paths::namespace_handle(state_root, container_id);

        let output = plugin::invoke(
            CniCommand::Del,
            container_id,
            if_name,
            &netns,
            plugin_dir,
            config,
        )
        .await?;

        let plugin = &config.config.plugin;
        let exit_code = output.exit_code.ok_or_else(|| Error::PluginNotReaped {
            plugin: plugin.clone(),
        })?;
        if exit_code != 0 {
            return Err(Error::DetachFailed {
                plugin: plugin.clone(),
                id: container_id.to_string(),
                network: network.to_string(),
                output: String::from_utf8_lossy(&output.stdout).into_owned(),
            });
        }

        // Absent on a cleanup retry whose earlier DEL already succeeded.
        let if_dir = paths::interface_dir(state_root, container_id, network, if_name);
        if if_dir.exists() {
            fs::remove_dir_all(&if_dir).map_err(|e| Error::RemoveDirFailed {
                path: if_dir.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }

    /// Rebuilds one container's in-memory entry from its on-disk state.
    ///
    /// An entry is installed only when the container directory exists,
    /// i.e. when cleanup might still be required; it is installed even
    /// with an empty network map, because the namespace handle may still
    /// need unmounting and the directory removing.
    fn recover_container(&self, container_id: &str) -> Result<()> {
        let state_root = self.state_root()?;

        let container_dir = paths::container_dir(state_root, container_id);
        if !container_dir.exists() {
            // Cleanup already finished, isolation never started, or the
            // container was on the host network.
            return Ok(());
        }

        let mut networks = HashMap::new();
        for network in paths::network_names(state_root, container_id)? {
            if !self.configs.contains_key(&network) {
                return Err(Error::UnknownRecoveredNetwork { name: network });
            }

            let interfaces = paths::interfaces(state_root, container_id, &network)?;
            if interfaces.len() > 1 {
                return Err(Error::MultipleInterfaces { network });
            }
            // Empty when the crash hit between interface-directory
            // removal and container-directory removal.
            let Some(if_name) = interfaces.into_iter().next() else {
                continue;
            };

            let mut recovered = NetworkInfo {
                network_name: network.clone(),
                if_name: if_name.clone(),
                result: None,
            };

            let info_path =
                paths::network_info_path(state_root, container_id, &network, &if_name);
            if info_path.exists() {
                let bytes = fs::read(&info_path).map_err(|e| Error::CheckpointReadFailed {
                    path: info_path.clone(),
                    reason: e.to_string(),
                })?;
                let parsed = spec::parse_network_info(&bytes).map_err(|reason| {
                    Error::CheckpointParseFailed {
                        path: info_path.clone(),
                        reason,
                    }
                })?;
                recovered.result = Some(parsed);
            } else {
                // Crash hit between plugin success and checkpoint write;
                // the ADD may or may not have taken effect and the DEL
                // will be best-effort.
                warn!(
                    container = container_id,
                    network = %network,
                    path = %info_path.display(),
                    "checkpointed CNI plugin output does not exist"
                );
            }

            networks.insert(network, recovered);
        }

        self.containers_write()?
            .insert(container_id.to_string(), ContainerInfo { networks });

        Ok(())
    }
}

#[async_trait]
impl Isolator for NetworkIsolator {
    async fn recover(&self, states: &[ContainerState], orphans: &HashSet<String>) -> Result<()> {
        // Degenerate mode keeps no on-disk state.
        if self.state_root.is_none() {
            return Ok(());
        }

        for state in states {
            self.recover_container(&state.container_id)
                .map_err(|e| Error::RecoveryFailed {
                    id: state.container_id.clone(),
                    reason: e.to_string(),
                })?;
        }

        let state_root = self.state_root()?;
        let entries = fs::read_dir(state_root).map_err(|e| Error::ListDirFailed {
            path: state_root.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut on_disk = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::ListDirFailed {
                path: state_root.to_path_buf(),
                reason: e.to_string(),
            })?;
            if entry.path().is_dir() {
                on_disk.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        for container_id in on_disk {
            {
                let containers = self.containers_read()?;
                if containers.contains_key(&container_id) {
                    continue;
                }
            }

            self.recover_container(&container_id)
                .map_err(|e| Error::RecoveryFailed {
                    id: container_id.clone(),
                    reason: e.to_string(),
                })?;

            // Known orphans are cleaned up by the containerizer through
            // the normal path.
            if orphans.contains(&container_id) {
                continue;
            }

            info!(container = %container_id, "removing unknown orphaned container");

            if let Err(e) = self.cleanup(&container_id).await {
                warn!(
                    container = %container_id,
                    error = %e,
                    "failed to clean up unknown orphaned container"
                );
            }
        }

        Ok(())
    }

    async fn prepare(
        &self,
        container_id: &str,
        config: &ContainerConfig,
    ) -> Result<Option<ContainerLaunchInfo>> {
        let mut containers = self.containers_write()?;

        if containers.contains_key(container_id) {
            return Err(Error::AlreadyPrepared {
                id: container_id.to_string(),
            });
        }

        if config.container_type != ContainerType::Native {
            return Err(Error::UnsupportedContainerType {
                id: container_id.to_string(),
            });
        }

        let mut networks: HashMap<String, NetworkInfo> = HashMap::new();
        let mut if_index = 0;
        for request in &config.networks {
            // Entries without a name want the host network.
            let Some(name) = &request.name else {
                continue;
            };

            if !self.configs.contains_key(name) {
                return Err(Error::UnknownNetwork { name: name.clone() });
            }
            if networks.contains_key(name) {
                return Err(Error::DuplicateNetworkJoin { name: name.clone() });
            }

            networks.insert(
                name.clone(),
                NetworkInfo {
                    network_name: name.clone(),
                    if_name: format!("{IFNAME_PREFIX}{if_index}"),
                    result: None,
                },
            );
            if_index += 1;
        }

        if networks.is_empty() {
            // Host network; nothing for this isolator to do.
            return Ok(None);
        }

        containers.insert(container_id.to_string(), ContainerInfo { networks });

        Ok(Some(ContainerLaunchInfo {
            namespaces: CloneFlags::CLONE_NEWNET
                | CloneFlags::CLONE_NEWNS
                | CloneFlags::CLONE_NEWUTS,
        }))
    }

    async fn isolate(&self, container_id: &str, pid: i32) -> Result<()> {
        // Containers without named networks have no entry and pass
        // through on the host network.
        let networks = match self.network_snapshot(container_id)? {
            None => return Ok(()),
            Some(networks) => networks,
        };

        let state_root = self.state_root()?;

        let container_dir = paths::container_dir(state_root, container_id);
        fs::create_dir_all(&container_dir).map_err(|e| Error::CreateDirFailed {
            path: container_dir.clone(),
            reason: e.to_string(),
        })?;

        // Pin the child's network namespace so it outlives the process;
        // the extra reference is released in cleanup.
        let source = PathBuf::from(format!("/proc/{pid}/ns/net"));
        let target = paths::namespace_handle(state_root, container_id);

        fs::OpenOptions::new()
            .create(true)
            .write(true)
            .open(&target)
            .map_err(|e| Error::CreateFileFailed {
                path: target.clone(),
                reason: e.to_string(),
            })?;

        mount::bind_mount(&source, &target)?;

        info!(
            source = %source.display(),
            target = %target.display(),
            container = container_id,
            "bind mounted network namespace handle"
        );

        // Every ADD is awaited before returning so that cleanup cannot
        // issue a DEL while its paired ADD is still in flight. Failures
        // are collected, never short-circuited.
        let attaches = networks
            .iter()
            .map(|(network, if_name)| self.attach(container_id, network, if_name, &target));

        let messages: Vec<String> = join_all(attaches)
            .await
            .into_iter()
            .filter_map(|result| result.err())
            .map(|e| e.to_string())
            .collect();

        if messages.is_empty() {
            Ok(())
        } else {
            Err(Error::IsolateFailed {
                id: container_id.to_string(),
                messages: messages.join("\n"),
            })
        }
    }

    async fn cleanup(&self, container_id: &str) -> Result<()> {
        // No entry: host network, or recovery determined no cleanup is
        // required.
        let networks = match self.network_snapshot(container_id)? {
            None => return Ok(()),
            Some(networks) => networks,
        };

        let detaches = networks
            .iter()
            .map(|(network, if_name)| self.detach(container_id, network, if_name));

        let messages: Vec<String> = join_all(detaches)
            .await
            .into_iter()
            .filter_map(|result| result.err())
            .map(|e| e.to_string())
            .collect();

        // The entry stays so the containerizer may retry the cleanup.
        if !messages.is_empty() {
            return Err(Error::CleanupFailed {
                id: container_id.to_string(),
                messages: messages.join("\n"),
            });
        }

        let state_root = self.state_root()?;

        let target = paths::namespace_handle(state_root, container_id);
        if target.exists() {
            mount::unmount(&target)?;
        }

        let container_dir = paths::container_dir(state_root, container_id);
        if container_dir.exists() {
            fs::remove_dir_all(&container_dir).map_err(|e| Error::RemoveDirFailed {
                path: container_dir.clone(),
                reason: e.to_string(),
            })?;
        }

        self.containers_write()?.remove(container_id);

        info!(container = container_id, "cleaned up CNI network state");
        Ok(())
    }
}
