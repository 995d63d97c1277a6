//! Mount-propagation setup for the CNI state root.
//!
//! Namespace handles are pinned by bind-mounting `/proc/<pid>/ns/net`
//! onto files under the state root. For those bind mounts to propagate
//! correctly across mount namespaces, the state root itself must be a
//! **shared** mount in its **own peer group**.
//!
//! The setup re-propagates with `--make-slave` followed by
//! `--make-shared` instead of a single `--make-shared` (or
//! `--make-private` first): the slave step keeps receiving propagation
//! from a possible parent while the shared step establishes a fresh peer
//! group on the way back up. Collapsing the two steps leaves the root in
//! its parent's peer group.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use nix::mount::MsFlags;
use tracing::info;

use crate::error::{Error, Result};

// =============================================================================
// Mount Table
// =============================================================================

/// One entry of `/proc/self/mountinfo`.
#[derive(Debug, Clone)]
pub struct MountEntry {
    /// Unique mount id.
    pub id: u64,
    /// Mount id of the parent mount.
    pub parent: u64,
    /// Mount point, relative to the process root.
    pub target: PathBuf,
    /// Peer group id when the mount is shared (`shared:N`).
    pub shared_peer_group: Option<u64>,
}

/// Parsed view of the kernel mount table.
#[derive(Debug, Clone)]
pub struct MountTable {
    pub entries: Vec<MountEntry>,
}

impl MountTable {
    /// Reads and parses `/proc/self/mountinfo`.
    pub fn read() -> Result<Self> {
        let content =
            fs::read_to_string("/proc/self/mountinfo").map_err(|e| Error::MountTableReadFailed {
                reason: e.to_string(),
            })?;
        Self::parse(&content)
    }

    /// Parses mountinfo content.
    ///
    /// Line format (optional fields run until the `-` separator):
    ///
    /// ```text
    /// 36 35 98:0 /mnt1 /mnt2 rw,noatime shared:7 - ext3 /dev/root rw
    /// id parent maj:min root mount-point options [optional...] - fstype ...
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let mut entries = Vec::new();

        for line in content.lines() {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 7 {
                return Err(Error::MountTableReadFailed {
                    reason: format!("malformed mountinfo line: '{line}'"),
                });
            }

            let id = fields[0].parse().map_err(|_| Error::MountTableReadFailed {
                reason: format!("malformed mount id in line: '{line}'"),
            })?;
            let parent = fields[1].parse().map_err(|_| Error::MountTableReadFailed {
                reason: format!("malformed parent id in line: '{line}'"),
            })?;

            let mut shared_peer_group = None;
            for field in &fields[6..] {
                if *field == "-" {
                    break;
                }
                if let Some(peer) = field.strip_prefix("shared:") {
                    shared_peer_group = peer.parse().ok();
                }
            }

            entries.push(MountEntry {
                id,
                parent,
                target: PathBuf::from(fields[4]),
                shared_peer_group,
            });
        }

        Ok(Self { entries })
    }

    /// Finds the entry whose mount point is `target`.
    pub fn find_target(&self, target: &Path) -> Option<&MountEntry> {
        self.entries.iter().find(|e| e.target == target)
    }

    /// Finds an entry by mount id.
    pub fn find_id(&self, id: u64) -> Option<&MountEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

// =============================================================================
// Shared-Mount Setup
// =============================================================================

/// What `ensure_shared_mount` has to do for a given mount table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SetupAction {
    /// Not a mount point yet: self bind-mount, then slave, then shared.
    BindAndShare,
    /// Already a mount point but not shared, or shared in the parent's
    /// peer group: redo slave, then shared.
    Reshare,
    /// Already a shared mount in its own peer group.
    Nothing,
}

fn plan_shared_mount(table: &MountTable, root: &Path) -> SetupAction {
    let entry = match table.find_target(root) {
        None => return SetupAction::BindAndShare,
        Some(entry) => entry,
    };

    let peer = match entry.shared_peer_group {
        // Not shared yet, possibly an agent crash while preparing the
        // mount. Safe to redo.
        None => return SetupAction::Reshare,
        Some(peer) => peer,
    };

    // A shared root that shares its parent's peer group must be split
    // into its own.
    match table.find_id(entry.parent) {
        Some(parent) if parent.shared_peer_group == Some(peer) => SetupAction::Reshare,
        _ => SetupAction::Nothing,
    }
}

/// Makes the state root a shared mount in its own peer group. Idempotent.
pub fn ensure_shared_mount(root: &Path) -> Result<()> {
    info!(root = %root.display(), "making the CNI state root a shared mount");

    let table = MountTable::read()?;

    match plan_shared_mount(&table, root) {
        SetupAction::BindAndShare => {
            run_mount(root, &[OsStr::new("--bind"), root.as_os_str(), root.as_os_str()])?;
            run_mount(root, &[OsStr::new("--make-slave"), root.as_os_str()])?;
            run_mount(root, &[OsStr::new("--make-shared"), root.as_os_str()])?;
        }
        SetupAction::Reshare => {
            run_mount(root, &[OsStr::new("--make-slave"), root.as_os_str()])?;
            run_mount(root, &[OsStr::new("--make-shared"), root.as_os_str()])?;
        }
        SetupAction::Nothing => {}
    }

    Ok(())
}

fn run_mount(root: &Path, args: &[&OsStr]) -> Result<()> {
    let output = Command::new("mount")
        .args(args)
        .output()
        .map_err(|e| Error::SharedMountFailed {
            path: root.to_path_buf(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::SharedMountFailed {
            path: root.to_path_buf(),
            reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Namespace Handle Mounts
// =============================================================================

/// Bind-mounts `source` (a `/proc/<pid>/ns/net` handle) onto `target`,
/// pinning the namespace independently of the process.
pub fn bind_mount(source: &Path, target: &Path) -> Result<()> {
    nix::mount::mount(
        Some(source),
        target,
        None::<&str>,
        MsFlags::MS_BIND,
        None::<&str>,
    )
    .map_err(|e| Error::BindMountFailed {
        ns_path: source.to_path_buf(),
        target: target.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Unmounts a pinned namespace handle.
pub fn unmount(target: &Path) -> Result<()> {
    nix::mount::umount(target).map_err(|e| Error::UnmountFailed {
        target: target.to_path_buf(),
        reason: e.to_string(),
    })
}
