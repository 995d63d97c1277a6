//! Error types for the CNI network isolation layer.

use std::path::PathBuf;

/// Result type alias for network isolation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the CNI network isolation layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // =========================================================================
    // Configuration Errors (fatal at construction)
    // =========================================================================
    /// Isolator started without root privileges.
    #[error("the CNI network isolator requires root privileges")]
    RootRequired,

    /// A required flag is missing or empty.
    #[error("missing required '{flag}' flag")]
    MissingFlag { flag: &'static str },

    /// The CNI plugin directory does not exist.
    #[error("the CNI plugin directory '{}' does not exist", path.display())]
    PluginDirNotFound { path: PathBuf },

    /// The CNI network configuration directory does not exist.
    #[error("the CNI network configuration directory '{}' does not exist", path.display())]
    ConfigDirNotFound { path: PathBuf },

    /// The CNI plugin directory contains no entries.
    #[error("the CNI plugin directory '{}' is empty", path.display())]
    PluginDirEmpty { path: PathBuf },

    /// A network configuration file could not be read.
    #[error("failed to read CNI network configuration file '{}': {reason}", path.display())]
    ConfigReadFailed { path: PathBuf, reason: String },

    /// A network configuration file could not be parsed.
    #[error("failed to parse CNI network configuration file '{}': {reason}", path.display())]
    ConfigParseFailed { path: PathBuf, reason: String },

    /// Two configuration files declare the same network name.
    #[error("multiple CNI network configuration files have same name: {name}")]
    DuplicateNetworkName { name: String },

    /// A referenced plugin binary is missing.
    #[error(
        "failed to find CNI plugin '{}' used by CNI network configuration file '{}'",
        path.display(),
        config.display()
    )]
    PluginNotFound { path: PathBuf, config: PathBuf },

    /// A referenced plugin binary has no execute bit set.
    #[error(
        "the CNI plugin '{}' used by CNI network configuration file '{}' is not executable",
        path.display(),
        config.display()
    )]
    PluginNotExecutable { path: PathBuf, config: PathBuf },

    /// No valid network configuration was found at all.
    #[error("unable to find any valid CNI network configuration files under '{}'", path.display())]
    NoNetworkConfigs { path: PathBuf },

    /// The state root could not be created or canonicalized.
    #[error("failed to prepare CNI state root directory '{}': {reason}", path.display())]
    StateRootSetupFailed { path: PathBuf, reason: String },

    /// A configured directory could not be canonicalized.
    #[error("failed to determine canonical path of '{}': {reason}", path.display())]
    CanonicalizeFailed { path: PathBuf, reason: String },

    /// The kernel mount table could not be read or parsed.
    #[error("failed to read mount table: {reason}")]
    MountTableReadFailed { reason: String },

    /// Making the state root a shared mount in its own peer group failed.
    #[error(
        "failed to self bind mount '{}' and make it a shared mount: {reason}",
        path.display()
    )]
    SharedMountFailed { path: PathBuf, reason: String },

    // =========================================================================
    // Validation Errors (at prepare)
    // =========================================================================
    /// The container id has already been prepared.
    #[error("container '{id}' has already been prepared")]
    AlreadyPrepared { id: String },

    /// Only native containers can join CNI networks.
    #[error("can only prepare CNI networks for a native container, not '{id}'")]
    UnsupportedContainerType { id: String },

    /// The requested network is not in the loaded configurations.
    #[error("unknown CNI network '{name}'")]
    UnknownNetwork { name: String },

    /// The container spec lists the same network more than once.
    #[error("attempted to join CNI network '{name}' multiple times")]
    DuplicateNetworkJoin { name: String },

    // =========================================================================
    // Plugin Errors (at isolate/cleanup)
    // =========================================================================
    /// The plugin binary could not be executed at all.
    #[error("failed to execute the CNI plugin '{plugin}': {reason}")]
    PluginExecFailed { plugin: String, reason: String },

    /// The plugin subprocess terminated without an exit code.
    #[error("failed to reap the CNI plugin '{plugin}' subprocess")]
    PluginNotReaped { plugin: String },

    /// A plugin reported failure on ADD; `output` is its verbatim stdout.
    #[error(
        "the CNI plugin '{plugin}' failed to attach container '{id}' \
         to CNI network '{network}': {output}"
    )]
    AttachFailed {
        plugin: String,
        id: String,
        network: String,
        output: String,
    },

    /// A plugin reported failure on DEL; `output` is its verbatim stdout.
    #[error(
        "the CNI plugin '{plugin}' failed to detach container '{id}' \
         from CNI network '{network}': {output}"
    )]
    DetachFailed {
        plugin: String,
        id: String,
        network: String,
        output: String,
    },

    /// A successful plugin's stdout did not parse as a CNI result.
    #[error("failed to parse the output of the CNI plugin '{plugin}': {reason}")]
    ResultParseFailed { plugin: String, reason: String },

    // =========================================================================
    // Lifecycle Errors (aggregated fan-out failures)
    // =========================================================================
    /// One or more ADD invocations failed; `messages` joins every failure
    /// with newlines so the caller sees all root causes.
    #[error("failed to attach container '{id}' to CNI networks:\n{messages}")]
    IsolateFailed { id: String, messages: String },

    /// One or more DEL invocations failed; `messages` joins every failure
    /// with newlines so the caller sees all root causes.
    #[error("failed to detach container '{id}' from CNI networks:\n{messages}")]
    CleanupFailed { id: String, messages: String },

    // =========================================================================
    // Filesystem Errors
    // =========================================================================
    /// Directory creation failed.
    #[error("failed to create directory '{}': {reason}", path.display())]
    CreateDirFailed { path: PathBuf, reason: String },

    /// Directory removal failed.
    #[error("failed to remove directory '{}': {reason}", path.display())]
    RemoveDirFailed { path: PathBuf, reason: String },

    /// Creating the namespace bind-mount point failed.
    #[error("failed to create the bind mount point '{}': {reason}", path.display())]
    CreateFileFailed { path: PathBuf, reason: String },

    /// Directory listing failed.
    #[error("failed to list directory '{}': {reason}", path.display())]
    ListDirFailed { path: PathBuf, reason: String },

    /// Bind-mounting the network namespace handle failed.
    #[error(
        "failed to mount the network namespace handle from '{}' to '{}': {reason}",
        ns_path.display(),
        target.display()
    )]
    BindMountFailed {
        ns_path: PathBuf,
        target: PathBuf,
        reason: String,
    },

    /// Unmounting the network namespace handle failed.
    #[error("failed to unmount the network namespace handle '{}': {reason}", target.display())]
    UnmountFailed { target: PathBuf, reason: String },

    /// Writing the plugin-result checkpoint failed; `output` is the
    /// verbatim plugin stdout that could not be persisted.
    #[error(
        "failed to checkpoint the output of CNI plugin '{output}' to '{}': {reason}",
        path.display()
    )]
    CheckpointFailed {
        path: PathBuf,
        output: String,
        reason: String,
    },

    // =========================================================================
    // Recovery Errors
    // =========================================================================
    /// Per-container recovery failed; agent startup must abort.
    #[error("failed to recover CNI network information for container '{id}': {reason}")]
    RecoveryFailed { id: String, reason: String },

    /// A checkpointed network directory references a network that is no
    /// longer configured.
    #[error("unknown CNI network name '{name}'")]
    UnknownRecoveredNetwork { name: String },

    /// The on-disk state shows more than one interface for a network.
    #[error("more than one interface detected for network '{network}'")]
    MultipleInterfaces { network: String },

    /// A checkpoint file could not be read back.
    #[error("failed to read CNI network information file '{}': {reason}", path.display())]
    CheckpointReadFailed { path: PathBuf, reason: String },

    /// A checkpoint file did not parse as a CNI result.
    #[error("failed to parse CNI network information file '{}': {reason}", path.display())]
    CheckpointParseFailed { path: PathBuf, reason: String },

    // =========================================================================
    // I/O Errors
    // =========================================================================
    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // =========================================================================
    // Internal Errors
    // =========================================================================
    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
