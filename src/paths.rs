//! On-disk layout of checkpointed CNI network state.
//!
//! The layout is deterministic and stable across versions; recovery after
//! an agent restart depends on it. Given a state root `R`:
//!
//! ```text
//! R/<container-id>/                                   container_dir
//! R/<container-id>/ns                                 namespace_handle
//! R/<container-id>/networks/<network>/                network_dir
//! R/<container-id>/networks/<network>/<iface>/        interface_dir
//! R/<container-id>/networks/<network>/<iface>/network.info
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{NAMESPACE_HANDLE_FILE, NETWORKS_SUBDIR, NETWORK_INFO_FILE};
use crate::error::{Error, Result};

/// Returns the on-disk directory for a container's network state.
pub fn container_dir(root: &Path, container_id: &str) -> PathBuf {
    root.join(container_id)
}

/// Returns the bind-mount target that pins the container's network
/// namespace independently of its process.
pub fn namespace_handle(root: &Path, container_id: &str) -> PathBuf {
    container_dir(root, container_id).join(NAMESPACE_HANDLE_FILE)
}

/// Returns the directory for one joined network of a container.
pub fn network_dir(root: &Path, container_id: &str, network: &str) -> PathBuf {
    container_dir(root, container_id)
        .join(NETWORKS_SUBDIR)
        .join(network)
}

/// Returns the directory for one interface of a joined network.
pub fn interface_dir(root: &Path, container_id: &str, network: &str, if_name: &str) -> PathBuf {
    network_dir(root, container_id, network).join(if_name)
}

/// Returns the checkpoint path holding the verbatim stdout of a
/// successful CNI ADD.
pub fn network_info_path(
    root: &Path,
    container_id: &str,
    network: &str,
    if_name: &str,
) -> PathBuf {
    interface_dir(root, container_id, network, if_name).join(NETWORK_INFO_FILE)
}

/// Lists the networks a container has on-disk state for.
///
/// Returns the immediate subdirectory names of
/// `R/<container-id>/networks/`; an absent `networks/` directory yields an
/// empty list.
pub fn network_names(root: &Path, container_id: &str) -> Result<Vec<String>> {
    list_subdirs(&container_dir(root, container_id).join(NETWORKS_SUBDIR))
}

/// Lists the interfaces recorded for one network of a container.
pub fn interfaces(root: &Path, container_id: &str, network: &str) -> Result<Vec<String>> {
    list_subdirs(&network_dir(root, container_id, network))
}

/// Lists immediate subdirectory names, filtering out non-directory
/// entries. A missing parent is treated as empty.
fn list_subdirs(dir: &Path) -> Result<Vec<String>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(dir).map_err(|e| Error::ListDirFailed {
        path: dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::ListDirFailed {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })?;
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }

    names.sort();
    Ok(names)
}
