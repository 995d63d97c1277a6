//! Loading and validation of CNI network configurations.
//!
//! The network-configuration directory is scanned exactly once, at
//! isolator construction. Each regular file in it is one network; the
//! referenced plugin binaries must exist under the plugin directory and
//! be executable before the isolator accepts the configuration.

use std::collections::HashMap;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::spec::{self, NetworkConfig};

/// A loaded network configuration.
///
/// Keeps the raw file bytes: they are the plugin's stdin on every ADD and
/// DEL, byte for byte. The source path is retained for diagnostics only.
#[derive(Debug, Clone)]
pub struct NetworkConfigInfo {
    /// Source file, for error messages.
    pub path: PathBuf,
    /// Raw serialized configuration, fed to the plugin on stdin.
    pub bytes: Vec<u8>,
    /// Parsed view of the fields this isolator acts on.
    pub config: NetworkConfig,
}

/// Scans the configuration directory and builds the name-keyed network
/// map.
///
/// Directory entries inside the config dir are skipped; every regular
/// file must parse as a network configuration. Duplicate names, missing
/// plugins, and non-executable plugins are all fatal, as is ending up
/// with zero valid configurations.
pub fn load_network_configs(
    config_dir: &Path,
    plugin_dir: &Path,
) -> Result<HashMap<String, NetworkConfigInfo>> {
    let entries = fs::read_dir(config_dir).map_err(|e| Error::ListDirFailed {
        path: config_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut configs = HashMap::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::ListDirFailed {
            path: config_dir.to_path_buf(),
            reason: e.to_string(),
        })?;

        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        let bytes = fs::read(&path).map_err(|e| Error::ConfigReadFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let config = spec::parse_network_config(&bytes).map_err(|reason| {
            Error::ConfigParseFailed {
                path: path.clone(),
                reason,
            }
        })?;

        if configs.contains_key(&config.name) {
            return Err(Error::DuplicateNetworkName {
                name: config.name.clone(),
            });
        }

        validate_plugin(plugin_dir, &config.plugin, &path)?;
        if let Some(ipam) = &config.ipam {
            validate_plugin(plugin_dir, &ipam.plugin, &path)?;
        }

        info!(
            network = %config.name,
            plugin = %config.plugin,
            path = %path.display(),
            "loaded CNI network configuration"
        );

        configs.insert(
            config.name.clone(),
            NetworkConfigInfo {
                path,
                bytes,
                config,
            },
        );
    }

    if configs.is_empty() {
        return Err(Error::NoNetworkConfigs {
            path: config_dir.to_path_buf(),
        });
    }

    Ok(configs)
}

/// Requires `<plugin_dir>/<plugin>` to exist with at least one execute
/// bit set (owner, group, or other).
fn validate_plugin(plugin_dir: &Path, plugin: &str, config_path: &Path) -> Result<()> {
    let path = plugin_dir.join(plugin);

    let metadata = fs::metadata(&path).map_err(|_| Error::PluginNotFound {
        path: path.clone(),
        config: config_path.to_path_buf(),
    })?;

    if metadata.permissions().mode() & 0o111 == 0 {
        return Err(Error::PluginNotExecutable {
            path,
            config: config_path.to_path_buf(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_plugin(dir: &Path, name: &str, mode: u32) {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(mode);
        fs::set_permissions(&path, perms).unwrap();
    }

    fn write_config(dir: &Path, file: &str, json: &str) {
        fs::write(dir.join(file), json).unwrap();
    }

    #[test]
    fn test_load_valid_configs() {
        let config_dir = TempDir::new().unwrap();
        let plugin_dir = TempDir::new().unwrap();

        write_plugin(plugin_dir.path(), "bridge", 0o755);
        write_plugin(plugin_dir.path(), "host-local", 0o755);
        write_config(
            config_dir.path(),
            "net1.conf",
            r#"{"name":"net1","type":"bridge","ipam":{"type":"host-local"}}"#,
        );
        write_config(
            config_dir.path(),
            "net2.conf",
            r#"{"name":"net2","type":"bridge"}"#,
        );

        let configs = load_network_configs(config_dir.path(), plugin_dir.path()).unwrap();

        assert_eq!(configs.len(), 2);
        assert_eq!(configs["net1"].config.plugin, "bridge");
        assert_eq!(
            configs["net1"].config.ipam.as_ref().unwrap().plugin,
            "host-local"
        );
        // Raw bytes are preserved exactly; they become plugin stdin.
        assert_eq!(
            configs["net2"].bytes,
            br#"{"name":"net2","type":"bridge"}"#.to_vec()
        );
    }

    #[test]
    fn test_subdirectories_are_skipped() {
        let config_dir = TempDir::new().unwrap();
        let plugin_dir = TempDir::new().unwrap();

        write_plugin(plugin_dir.path(), "bridge", 0o755);
        write_config(
            config_dir.path(),
            "net1.conf",
            r#"{"name":"net1","type":"bridge"}"#,
        );
        fs::create_dir(config_dir.path().join("subdir")).unwrap();

        let configs = load_network_configs(config_dir.path(), plugin_dir.path()).unwrap();
        assert_eq!(configs.len(), 1);
    }

    #[test]
    fn test_duplicate_network_name_rejected() {
        let config_dir = TempDir::new().unwrap();
        let plugin_dir = TempDir::new().unwrap();

        write_plugin(plugin_dir.path(), "bridge", 0o755);
        write_config(
            config_dir.path(),
            "a.conf",
            r#"{"name":"net1","type":"bridge"}"#,
        );
        write_config(
            config_dir.path(),
            "b.conf",
            r#"{"name":"net1","type":"bridge"}"#,
        );

        let result = load_network_configs(config_dir.path(), plugin_dir.path());
        assert!(matches!(
            result,
            Err(Error::DuplicateNetworkName { name }) if name == "net1"
        ));
    }

    #[test]
    fn test_missing_plugin_rejected() {
        let config_dir = TempDir::new().unwrap();
        let plugin_dir = TempDir::new().unwrap();

        write_config(
            config_dir.path(),
            "net1.conf",
            r#"{"name":"net1","type":"bridge"}"#,
        );

        let result = load_network_configs(config_dir.path(), plugin_dir.path());
        assert!(matches!(result, Err(Error::PluginNotFound { .. })));
    }

    #[test]
    fn test_non_executable_plugin_rejected() {
        let config_dir = TempDir::new().unwrap();
        let plugin_dir = TempDir::new().unwrap();

        write_plugin(plugin_dir.path(), "bridge", 0o644);
        write_config(
            config_dir.path(),
            "net1.conf",
            r#"{"name":"net1","type":"bridge"}"#,
        );

        let result = load_network_configs(config_dir.path(), plugin_dir.path());
        assert!(matches!(result, Err(Error::PluginNotExecutable { .. })));
    }

    #[test]
    fn test_missing_ipam_plugin_rejected() {
        let config_dir = TempDir::new().unwrap();
        let plugin_dir = TempDir::new().unwrap();

        write_plugin(plugin_dir.path(), "bridge", 0o755);
        write_config(
            config_dir.path(),
            "net1.conf",
            r#"{"name":"net1","type":"bridge","ipam":{"type":"host-local"}}"#,
        );

        let result = load_network_configs(config_dir.path(), plugin_dir.path());
        assert!(matches!(result, Err(Error::PluginNotFound { .. })));
    }

    #[test]
    fn test_malformed_config_rejected() {
        let config_dir = TempDir::new().unwrap();
        let plugin_dir = TempDir::new().unwrap();

        write_config(config_dir.path(), "bad.conf", "not json at all");

        let result = load_network_configs(config_dir.path(), plugin_dir.path());
        assert!(matches!(result, Err(Error::ConfigParseFailed { .. })));
    }

    #[test]
    fn test_empty_config_dir_rejected() {
        let config_dir = TempDir::new().unwrap();
        let plugin_dir = TempDir::new().unwrap();

        let result = load_network_configs(config_dir.path(), plugin_dir.path());
        assert!(matches!(result, Err(Error::NoNetworkConfigs { .. })));
    }
}
