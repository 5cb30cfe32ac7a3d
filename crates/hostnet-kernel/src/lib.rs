//! hostnet-kernel: the engine behind a simulated network of hosts.
//!
//! This crate provides:
//!
//! - **VFS**: Per-host hierarchical storage tree, path resolution, bootstrap
//! - **Lexer**: Splits command lines into words using logos
//! - **Tools**: Command table and builtin commands
//! - **Host**: Credentials, integrity marker, and terminal sessions
//! - **Network**: Host registry, relayed dispatch, and prompts
//! - **Config**: `network.toml` loading

pub mod address;
pub mod config;
pub mod error;
pub mod host;
pub mod lexer;
pub mod network;
pub mod session;
pub mod tools;
pub mod vfs;

pub use address::{AddressGenerator, RandomIpv4, Sequential};
pub use config::NetworkConfig;
pub use error::{Error, Result};
pub use host::Host;
pub use network::Network;
pub use session::{RelayLink, SessionId, SessionState, TerminalSession};
pub use tools::CommandTable;

// Data contracts shared with transports.
pub use hostnet_types::{ExecResult, NodeContents, NodeDescription};
