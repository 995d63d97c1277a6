//! CNI plugin subprocess invocation.
//!
//! Plugins are executed per the CNI convention: the operation and its
//! parameters travel in environment variables, the network configuration
//! bytes arrive on stdin, and the result (or error message) comes back on
//! stdout. Stderr is discarded.
//!
//! | Variable           | Value                                        |
//! |--------------------|----------------------------------------------|
//! | `CNI_COMMAND`      | `ADD` or `DEL`                               |
//! | `CNI_CONTAINERID`  | opaque container id                          |
//! | `CNI_PATH`         | plugin directory                             |
//! | `CNI_IFNAME`       | container-side interface name                |
//! | `CNI_NETNS`        | bind-mounted network namespace handle        |
//! | `PATH`             | inherited, or a sane fallback                |
//!
//! The child stays in the agent's session so its lifetime is bounded by
//! the agent; once spawned it always runs to completion.

use std::ffi::OsString;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::config::NetworkConfigInfo;
use crate::constants::DEFAULT_EXEC_PATH;
use crate::error::{Error, Result};

/// The CNI operation to request from a plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CniCommand {
    /// Attach the container to a network.
    Add,
    /// Detach the container from a network.
    Del,
}

impl CniCommand {
    /// The `CNI_COMMAND` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Del => "DEL",
        }
    }
}

impl std::fmt::Display for CniCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exit status and drained stdout of a completed plugin invocation.
#[derive(Debug, Clone)]
pub struct PluginOutput {
    /// Exit code; `None` when the child was terminated by a signal.
    pub exit_code: Option<i32>,
    /// Full stdout. A CNI result on exit 0, an error message otherwise.
    pub stdout: Vec<u8>,
}

/// Invokes a CNI plugin and waits for it to exit with stdout fully
/// drained.
///
/// The plugin binary is `<plugin_dir>/<type>` invoked with argv
/// `[<type>]`; stdin is the raw network-configuration bytes.
pub async fn invoke(
    command: CniCommand,
    container_id: &str,
    if_name: &str,
    netns: &Path,
    plugin_dir: &Path,
    network: &NetworkConfigInfo,
) -> Result<PluginOutput> {
    let plugin = &network.config.plugin;
    let plugin_path = plugin_dir.join(plugin);

    debug!(
        %command,
        container = container_id,
        network = %network.config.name,
        interface = if_name,
        plugin = %plugin,
        "invoking CNI plugin"
    );

    let path_env =
        std::env::var_os("PATH").unwrap_or_else(|| OsString::from(DEFAULT_EXEC_PATH));

    // Built as a std Command first so argv[0] can be set to the bare
    // plugin name, then converted for async supervision.
    let mut cmd = std::process::Command::new(&plugin_path);
    cmd.arg0(plugin)
        .env_clear()
        .env("CNI_COMMAND", command.as_str())
        .env("CNI_CONTAINERID", container_id)
        .env("CNI_PATH", plugin_dir)
        .env("CNI_IFNAME", if_name)
        .env("CNI_NETNS", netns)
        .env("PATH", path_env)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null());

    let mut child = tokio::process::Command::from(cmd)
        .spawn()
        .map_err(|e| Error::PluginExecFailed {
            plugin: plugin.clone(),
            reason: e.to_string(),
        })?;

    // Feed the configuration and close stdin so the plugin sees EOF.
    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| Error::Internal("plugin stdin was not captured".to_string()))?;
    stdin
        .write_all(&network.bytes)
        .await
        .map_err(|e| Error::PluginExecFailed {
            plugin: plugin.clone(),
            reason: format!("failed to write network configuration to stdin: {e}"),
        })?;
    drop(stdin);

    // Completes only once the child has exited and stdout hit EOF.
    let output = child
        .wait_with_output()
        .await
        .map_err(|e| Error::PluginExecFailed {
            plugin: plugin.clone(),
            reason: e.to_string(),
        })?;

    Ok(PluginOutput {
        exit_code: output.status.code(),
        stdout: output.stdout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_plugin(dir: &Path, name: &str, script: &str) {
        let path = dir.join(name);
        fs::write(&path, script).unwrap();
        let mut perms = fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&path, perms).unwrap();
    }

    fn network(name: &str, plugin: &str) -> NetworkConfigInfo {
        let bytes = format!(r#"{{"name":"{name}","type":"{plugin}"}}"#).into_bytes();
        let config = spec::parse_network_config(&bytes).unwrap();
        NetworkConfigInfo {
            path: PathBuf::from(format!("/etc/cni/{name}.conf")),
            bytes,
            config,
        }
    }

    #[tokio::test]
    async fn test_invoke_captures_stdout() {
        let plugin_dir = TempDir::new().unwrap();
        write_plugin(
            plugin_dir.path(),
            "fake",
            "#!/bin/sh\ncat >/dev/null\nprintf '%s' '{\"ip4\":{\"ip\":\"10.0.0.2/24\"}}'\n",
        );

        let output = invoke(
            CniCommand::Add,
            "c1",
            "eth0",
            Path::new("/tmp/ns"),
            plugin_dir.path(),
            &network("net1", "fake"),
        )
        .await
        .unwrap();

        assert_eq!(output.exit_code, Some(0));
        let info = spec::parse_network_info(&output.stdout).unwrap();
        assert_eq!(info.ip4.unwrap().ip, "10.0.0.2/24");
    }

    #[tokio::test]
    async fn test_invoke_passes_environment_and_stdin() {
        let plugin_dir = TempDir::new().unwrap();
        // Echoes the CNI environment plus whatever arrived on stdin.
        write_plugin(
            plugin_dir.path(),
            "fake",
            "#!/bin/sh\nprintf '%s %s %s ' \"$CNI_COMMAND\" \"$CNI_CONTAINERID\" \"$CNI_IFNAME\"\ncat\n",
        );

        let net = network("net1", "fake");
        let output = invoke(
            CniCommand::Del,
            "c42",
            "eth1",
            Path::new("/tmp/ns"),
            plugin_dir.path(),
            &net,
        )
        .await
        .unwrap();

        let stdout = String::from_utf8(output.stdout).unwrap();
        assert_eq!(
            stdout,
            format!("DEL c42 eth1 {}", String::from_utf8(net.bytes).unwrap())
        );
    }

    #[tokio::test]
    async fn test_invoke_reports_nonzero_exit_with_stdout() {
        let plugin_dir = TempDir::new().unwrap();
        write_plugin(
            plugin_dir.path(),
            "fake",
            "#!/bin/sh\ncat >/dev/null\necho 'no address available'\nexit 1\n",
        );

        let output = invoke(
            CniCommand::Add,
            "c1",
            "eth0",
            Path::new("/tmp/ns"),
            plugin_dir.path(),
            &network("net1", "fake"),
        )
        .await
        .unwrap();

        assert_eq!(output.exit_code, Some(1));
        assert!(String::from_utf8_lossy(&output.stdout).contains("no address available"));
    }

    #[tokio::test]
    async fn test_invoke_missing_binary_fails() {
        let plugin_dir = TempDir::new().unwrap();

        let result = invoke(
            CniCommand::Add,
            "c1",
            "eth0",
            Path::new("/tmp/ns"),
            plugin_dir.path(),
            &network("net1", "absent"),
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::PluginExecFailed { plugin, .. }) if plugin == "absent"
        ));
    }
}
