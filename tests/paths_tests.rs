//! Tests for the on-disk state layout.
//!
//! The layout must stay deterministic and stable across versions;
//! recovery after an agent restart depends on it. Enumeration helpers
//! must report only directories and treat missing parents as empty.

use std::fs;
use std::path::{Path, PathBuf};

use magiknet::constants::NETWORKS_SUBDIR;
use magiknet::paths::{
    container_dir, interface_dir, interfaces, namespace_handle, network_dir, network_info_path,
    network_names,
};
use tempfile::TempDir;

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_layout_is_deterministic() {
    let root = Path::new("/var/run/magiknet");

    assert_eq!(
        container_dir(root, "c1"),
        PathBuf::from("/var/run/magiknet/c1")
    );
    assert_eq!(
        namespace_handle(root, "c1"),
        PathBuf::from("/var/run/magiknet/c1/ns")
    );
    assert_eq!(
        network_dir(root, "c1", "net1"),
        PathBuf::from("/var/run/magiknet/c1/networks/net1")
    );
    assert_eq!(
        interface_dir(root, "c1", "net1", "eth0"),
        PathBuf::from("/var/run/magiknet/c1/networks/net1/eth0")
    );
    assert_eq!(
        network_info_path(root, "c1", "net1", "eth0"),
        PathBuf::from("/var/run/magiknet/c1/networks/net1/eth0/network.info")
    );
}

// =============================================================================
// Enumeration
// =============================================================================

#[test]
fn test_enumeration_filters_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(network_dir(root, "c1", "netA")).unwrap();
    fs::create_dir_all(network_dir(root, "c1", "netB")).unwrap();
    // A stray regular file must not be reported as a network.
    fs::write(
        container_dir(root, "c1").join(NETWORKS_SUBDIR).join("junk"),
        b"",
    )
    .unwrap();

    let names = network_names(root, "c1").unwrap();
    assert_eq!(names, vec!["netA".to_string(), "netB".to_string()]);
}

#[test]
fn test_enumeration_of_missing_dirs_is_empty() {
    let temp = TempDir::new().unwrap();

    assert!(network_names(temp.path(), "no-such-container")
        .unwrap()
        .is_empty());
    assert!(interfaces(temp.path(), "no-such-container", "net1")
        .unwrap()
        .is_empty());
}

#[test]
fn test_interface_enumeration() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();

    fs::create_dir_all(interface_dir(root, "c1", "net1", "eth0")).unwrap();

    assert_eq!(interfaces(root, "c1", "net1").unwrap(), vec!["eth0"]);
}
