//! Terminal sessions.
//!
//! A session is either *Local*, running commands against its own host's
//! tree, or *Relayed*, forwarding every command except `disconnect` to a
//! session on another host. The relay is an explicit [`RelayLink`] looked
//! up through the network registry at forward time.

use std::fmt;

use crate::vfs::NodeId;

/// Identifies a session within its owning host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(pub(crate) u64);

impl SessionId {
    /// The host's own session, created with the host and never closed.
    pub const MAIN: SessionId = SessionId(0);
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// Outgoing link from a session to a session on another host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayLink {
    pub address: String,
    pub session: SessionId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Local,
    Relayed,
}

/// One terminal bound to a host.
#[derive(Debug, Clone)]
pub struct TerminalSession {
    pub(crate) id: SessionId,
    pub(crate) opened_by: String,
    pub(crate) cwd: NodeId,
    pub(crate) relay: Option<RelayLink>,
}

impl TerminalSession {
    pub(crate) fn new(id: SessionId, opened_by: impl Into<String>, cwd: NodeId) -> Self {
        Self {
            id,
            opened_by: opened_by.into(),
            cwd,
            relay: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Address of the host driving this session.
    pub fn opened_by(&self) -> &str {
        &self.opened_by
    }

    /// Current directory.
    pub fn cwd(&self) -> NodeId {
        self.cwd
    }

    pub fn relay(&self) -> Option<&RelayLink> {
        self.relay.as_ref()
    }

    pub fn state(&self) -> SessionState {
        match self.relay {
            Some(_) => SessionState::Relayed,
            None => SessionState::Local,
        }
    }

    /// True when a host other than `owner` opened this session.
    pub fn is_guest(&self, owner: &str) -> bool {
        self.opened_by != owner
    }
}
