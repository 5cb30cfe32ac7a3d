//! Execution context handed to every command.

use crate::error::{Error, Result};
use crate::vfs::{FileSystemTree, NodeId, PathResolver, ResolvedParent};

use super::CommandTable;

/// Session-level effect requested by a command.
///
/// Commands cannot reach other hosts. `connect` and `disconnect` record what
/// they want here, and the network carries it out once the host lock is
/// released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionControl {
    Connect(String),
    Disconnect,
}

/// Execution context passed to commands.
///
/// Borrows the owning host's tree for the duration of one command, together
/// with a copy of the session's cursor which is written back afterwards.
pub struct ExecContext<'a> {
    /// The owning host's tree.
    pub tree: &'a mut FileSystemTree,
    /// Current directory of the session.
    pub cwd: NodeId,
    /// Address of the owning host.
    pub address: &'a str,
    /// Username of the owning host.
    pub username: &'a str,
    /// The session was opened by another host.
    pub guest: bool,
    /// The session currently relays to a remote session.
    pub relayed: bool,
    /// Command table, for `help`.
    pub commands: &'a CommandTable,
    /// Requested session transition, if any.
    pub control: Option<SessionControl>,
}

impl<'a> ExecContext<'a> {
    /// Context for a local, unrelayed session rooted at the tree's root.
    pub fn new(tree: &'a mut FileSystemTree, address: &'a str, username: &'a str, commands: &'a CommandTable) -> Self {
        let cwd = tree.root();
        Self {
            tree,
            cwd,
            address,
            username,
            guest: false,
            relayed: false,
            commands,
            control: None,
        }
    }

    /// Resolve a path relative to the cursor.
    pub fn resolve(&self, path: &str) -> Result<NodeId> {
        PathResolver::new(self.tree).resolve(path, Some(self.cwd))
    }

    /// Resolve the directory a new leaf at `path` would live in.
    pub fn resolve_parent(&self, path: &str) -> Result<ResolvedParent> {
        PathResolver::new(self.tree).resolve_parent(path, Some(self.cwd))
    }

    /// Resolve a path that must name a directory.
    pub fn resolve_dir(&self, path: &str) -> Result<NodeId> {
        let id = self.resolve(path)?;
        if !self.tree.node(id)?.is_dir() {
            return Err(Error::NotADirectory(path.to_string()));
        }
        Ok(id)
    }

    /// Resolve a path that must name a file.
    pub fn resolve_file(&self, path: &str) -> Result<NodeId> {
        let id = self.resolve(path)?;
        if !self.tree.node(id)?.is_file() {
            return Err(Error::NotAFile(path.to_string()));
        }
        Ok(id)
    }

    /// Absolute path of the cursor.
    pub fn cwd_path(&self) -> String {
        self.tree.absolute_path(self.cwd).unwrap_or_else(|_| "/".to_string())
    }
}
