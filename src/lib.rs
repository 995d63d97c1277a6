//! # magiknet
//!
//! **CNI Network Isolation for the magik Container Runtime Family**
//!
//! This crate attaches native containers to CNI networks on behalf of the
//! magik containerizer. Pod semantics live in `magikpod` and single-
//! container OCI lifecycle in `magikrun`; this crate owns exactly one
//! concern: per-container network namespaces and the CNI plugins that
//! populate them.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                            magiknet                                 │
//! ├─────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────────┐    │
//! │  │                      Isolator Trait                         │    │
//! │  │  recover(states, orphans) → prepare(id, config)             │    │
//! │  │        → isolate(id, pid) → cleanup(id)                     │    │
//! │  └──────────────────────────────┬──────────────────────────────┘    │
//! │                                 │                                   │
//! │  ┌──────────────────────────────┼──────────────────────────────┐    │
//! │  │                     Lifecycle Engine                        │    │
//! │  │  eth<i> assignment │ ADD/DEL fan-out │ crash-safe recovery  │    │
//! │  └──────┬──────────────────┬────────────────────┬──────────────┘    │
//! │         │                  │                    │                   │
//! │  ┌──────┴───────┐  ┌───────┴────────┐  ┌────────┴─────────┐         │
//! │  │ Plugin       │  │ Mount Setup    │  │ State Layout     │         │
//! │  │ Invoker      │  │ shared mount,  │  │ ns handle,       │         │
//! │  │ env + stdin  │  │ own peer group │  │ network.info     │         │
//! │  └──────────────┘  └────────────────┘  └──────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Lifecycle
//!
//! The containerizer calls [`Isolator::prepare`] before forking the
//! container child; the returned launch info names the namespaces the
//! clone must use (new network, mount, and UTS). After the clone it calls
//! [`Isolator::isolate`] with the child's pid: the isolator pins the
//! child's network namespace by bind-mounting `/proc/<pid>/ns/net` under
//! its state root, then runs one CNI ADD per requested network, all in
//! parallel, all awaited. On teardown, [`Isolator::cleanup`] runs the
//! matching DELs, unmounts the handle, and removes the on-disk state.
//!
//! On agent startup, [`Isolator::recover`] is called once before any
//! other operation and rebuilds the in-memory table from the artifacts a
//! possibly-crashed previous instance left on disk.
//!
//! # Crash Safety
//!
//! Every ADD's stdout is checkpointed byte-for-byte to
//! `<root>/<id>/networks/<net>/<iface>/network.info` before the parsed
//! result is recorded in memory. Recovery tolerates every crash window:
//! a bind-mounted handle with no ADDs yet, a successful ADD with no
//! checkpoint, and interface directories removed but the container
//! directory still present.
//!
//! # Degenerate Mode
//!
//! With neither the plugin nor the configuration directory configured,
//! the isolator is a pass-through: containers without named networks use
//! the host network untouched, and any request for a named network is
//! rejected at `prepare`.
//!
//! # Example
//!
//! ```rust,ignore
//! use magiknet::{
//!     ContainerConfig, ContainerType, Isolator, IsolatorFlags,
//!     NetworkIsolator, NetworkRequest,
//! };
//!
//! #[tokio::main]
//! async fn main() -> magiknet::Result<()> {
//!     let isolator = NetworkIsolator::create(&IsolatorFlags {
//!         cni_plugins_dir: Some("/opt/cni/bin".into()),
//!         cni_config_dir: Some("/etc/cni/net.d".into()),
//!         ..Default::default()
//!     })?;
//!
//!     isolator.recover(&[], &Default::default()).await?;
//!
//!     let config = ContainerConfig {
//!         container_type: ContainerType::Native,
//!         networks: vec![NetworkRequest { name: Some("bridge".into()) }],
//!     };
//!
//!     if let Some(launch) = isolator.prepare("c1", &config).await? {
//!         // clone the child with launch.namespaces, then:
//!         let pid = 1234;
//!         isolator.isolate("c1", pid).await?;
//!     }
//!
//!     // ... container runs ...
//!
//!     isolator.cleanup("c1").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Platform Support
//!
//! Linux only. Namespace handles, bind mounts, and mount propagation are
//! Linux kernel facilities; there is no fallback.

pub mod config;
pub mod constants;
pub mod error;
pub mod isolator;
pub mod mount;
pub mod paths;
pub mod plugin;
pub mod spec;

pub use error::{Error, Result};
pub use isolator::{
    ContainerConfig, ContainerLaunchInfo, ContainerLimitation, ContainerState, ContainerStatus,
    ContainerType, Isolator, IsolatorFlags, NetworkIsolator, NetworkRequest, ResourceStatistics,
    Resources,
};
