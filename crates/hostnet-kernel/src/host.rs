//! Simulated hosts.
//!
//! A host owns one filesystem tree, its credentials, and the table of
//! terminal sessions running against that tree. The reserved
//! `/system/system.dat` file holds an integrity marker that is checked before
//! every command; a host whose marker is gone or altered refuses to run
//! anything until [`Host::repair`] is called.

use std::collections::BTreeMap;

use hostnet_types::ExecResult;

use crate::error::{Error, Result};
use crate::lexer::split_words;
use crate::session::{RelayLink, SessionId, TerminalSession};
use crate::tools::{CommandTable, ExecContext, SessionControl, ToolArgs};
use crate::vfs::{Content, FileSystemTree, NodeId};

/// Reserved directory at the root of every host.
pub const SYSTEM_DIR: &str = "system";
/// Marker file inside [`SYSTEM_DIR`].
pub const SYSTEM_FILE: &str = "system.dat";
/// Expected content of the marker file.
pub const INTEGRITY_MARKER: &str = "hostnet:terminal-os:1";

const USERNAME_LEN: std::ops::RangeInclusive<usize> = 3..=50;
const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 8..=30;

/// What a session step asks the network to do next.
#[derive(Debug)]
pub(crate) enum Step {
    /// The command ran (or failed) locally.
    Done(ExecResult),
    /// The guest session was closed; whoever relays to it must drop the link.
    Closed(ExecResult),
    /// Forward the line to the relayed session.
    Forward(RelayLink),
    /// Open a guest session on `to` and relay to it.
    Connect { from: String, to: String },
    /// The relay was cleared; close the remote guest session.
    Disconnect(RelayLink),
}

/// What a session contributes to the prompt.
#[derive(Debug)]
pub(crate) enum PromptPart {
    Rendered(String),
    Relayed(RelayLink),
}

/// One simulated machine.
#[derive(Debug)]
pub struct Host {
    address: String,
    username: String,
    password: String,
    tree: FileSystemTree,
    sessions: BTreeMap<SessionId, TerminalSession>,
    next_session: u64,
}

impl Host {
    /// Create a host around `tree`, installing the integrity marker.
    ///
    /// An existing `system` entry of the wrong kind is replaced, so any tree
    /// is accepted.
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        mut tree: FileSystemTree,
    ) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        validate_username(&username)?;
        validate_password(&password)?;
        install_marker(&mut tree)?;

        let address = address.into();
        let main = TerminalSession::new(SessionId::MAIN, address.clone(), tree.root());
        Ok(Self {
            address,
            username,
            password,
            tree,
            sessions: BTreeMap::from([(SessionId::MAIN, main)]),
            next_session: 1,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn check_password(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn tree(&self) -> &FileSystemTree {
        &self.tree
    }

    /// Check that `/system/system.dat` exists and holds the marker.
    pub fn verify_integrity(&self) -> Result<()> {
        let root = self.tree.root();
        let system = self
            .tree
            .child(root, SYSTEM_DIR)
            .ok_or_else(|| Error::Corrupted("system directory is missing".into()))?;
        if !self.tree.node(system)?.is_dir() {
            return Err(Error::Corrupted("system is not a directory".into()));
        }
        let marker = self
            .tree
            .child(system, SYSTEM_FILE)
            .ok_or_else(|| Error::Corrupted("system.dat is missing".into()))?;
        match self.tree.node(marker)?.content() {
            Some(Content::Text(text)) if text == INTEGRITY_MARKER => Ok(()),
            Some(_) => Err(Error::Corrupted("system.dat does not hold a valid marker".into())),
            None => Err(Error::Corrupted("system.dat is not a file".into())),
        }
    }

    /// Reinstall the integrity marker.
    pub fn repair(&mut self) -> Result<()> {
        install_marker(&mut self.tree)?;
        self.reconcile_cursors();
        tracing::info!(host = %self.address, "repaired integrity marker");
        Ok(())
    }

    pub fn session(&self, id: SessionId) -> Option<&TerminalSession> {
        self.sessions.get(&id)
    }

    pub fn main_session(&self) -> Option<&TerminalSession> {
        self.session(SessionId::MAIN)
    }

    pub fn sessions(&self) -> impl Iterator<Item = &TerminalSession> {
        self.sessions.values()
    }

    /// Open a guest session for `requester`, starting at the root.
    pub fn open_session(&mut self, requester: &str) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session += 1;
        self.sessions
            .insert(id, TerminalSession::new(id, requester, self.tree.root()));
        tracing::debug!(host = %self.address, session = %id, requester, "opened session");
        id
    }

    /// Close a guest session. The main session cannot be closed.
    pub fn close_session(&mut self, id: SessionId) -> bool {
        if id == SessionId::MAIN {
            return false;
        }
        let closed = self.sessions.remove(&id).is_some();
        if closed {
            tracing::debug!(host = %self.address, session = %id, "closed session");
        }
        closed
    }

    /// Close every guest session opened by `address`.
    pub fn close_sessions_opened_by(&mut self, address: &str) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|&id, s| id == SessionId::MAIN || s.opened_by != address);
        before - self.sessions.len()
    }

    /// Drop relays that point at `address`.
    pub fn clear_relays_to(&mut self, address: &str) -> usize {
        let mut cleared = 0;
        for session in self.sessions.values_mut() {
            if session.relay.as_ref().is_some_and(|l| l.address == address) {
                session.relay = None;
                cleared += 1;
            }
        }
        cleared
    }

    /// Point a session at a remote one, returning the link it replaced.
    pub(crate) fn set_relay(&mut self, id: SessionId, link: RelayLink) -> Result<Option<RelayLink>> {
        let session = self.sessions.get_mut(&id).ok_or(Error::NotConnected)?;
        Ok(session.relay.replace(link))
    }

    pub(crate) fn clear_relay(&mut self, id: SessionId) -> Option<RelayLink> {
        self.sessions.get_mut(&id).and_then(|s| s.relay.take())
    }

    /// Run one command line on a session, as far as this host can take it.
    pub(crate) fn step(&mut self, id: SessionId, line: &str, commands: &CommandTable) -> Step {
        let Some(session) = self.sessions.get(&id) else {
            return Step::Closed(Error::NotConnected.into());
        };
        let guest = session.is_guest(&self.address);
        let cwd = session.cwd;
        let relay = session.relay.clone();

        if let Err(err) = self.verify_integrity() {
            tracing::warn!(host = %self.address, session = %id, error = %err, "integrity check failed");
            if guest {
                self.close_session(id);
                return Step::Closed(err.into());
            }
            return Step::Done(err.into());
        }

        let words = match split_words(line) {
            Ok(words) => words,
            Err(err) => return Step::Done(err.into()),
        };
        let Some((name, rest)) = words.split_first() else {
            return Step::Done(ExecResult::success(""));
        };

        if name.as_str() != "disconnect"
            && let Some(link) = &relay
        {
            return Step::Forward(link.clone());
        }

        let Some(command) = commands.get(name.as_str()) else {
            return Step::Done(Error::CommandNotFound(name.text.clone()).into());
        };
        tracing::debug!(host = %self.address, session = %id, command = name.as_str(), "running command");

        let args = ToolArgs::from(rest.to_vec());
        let mut ctx = ExecContext {
            tree: &mut self.tree,
            cwd,
            address: &self.address,
            username: &self.username,
            guest,
            relayed: relay.is_some(),
            commands,
            control: None,
        };
        let result = (command.run)(&args, &mut ctx);
        let cwd = ctx.cwd;
        let control = ctx.control;

        if let Some(session) = self.sessions.get_mut(&id) {
            session.cwd = cwd;
        }
        self.reconcile_cursors();

        match control {
            Some(SessionControl::Connect(to)) => Step::Connect {
                from: self.address.clone(),
                to,
            },
            Some(SessionControl::Disconnect) => match self.clear_relay(id) {
                Some(link) => Step::Disconnect(link),
                None => Step::Done(Error::NotConnected.into()),
            },
            None => Step::Done(result),
        }
    }

    pub(crate) fn prompt_part(&self, id: SessionId) -> Option<PromptPart> {
        let session = self.sessions.get(&id)?;
        if let Some(link) = &session.relay {
            return Some(PromptPart::Relayed(link.clone()));
        }
        let actor = if session.is_guest(&self.address) {
            format!("{}(guest)", session.opened_by)
        } else {
            self.username.clone()
        };
        let path = self
            .tree
            .absolute_path(session.cwd)
            .unwrap_or_else(|_| "/".to_string());
        Some(PromptPart::Rendered(format!("{actor}:{path}$ ")))
    }

    /// Move every cursor whose directory is no longer in the tree back to the root.
    fn reconcile_cursors(&mut self) {
        let root = self.tree.root();
        for session in self.sessions.values_mut() {
            if !self.tree.contains(session.cwd) {
                tracing::debug!(session = %session.id, "cursor detached, resetting to root");
                session.cwd = root;
            }
        }
    }
}

fn validate_username(username: &str) -> Result<()> {
    let len = username.chars().count();
    if !USERNAME_LEN.contains(&len) {
        return Err(Error::InvalidUsername(format!(
            "must be {} to {} characters, got {len}",
            USERNAME_LEN.start(),
            USERNAME_LEN.end()
        )));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<()> {
    let len = password.chars().count();
    if !PASSWORD_LEN.contains(&len) {
        return Err(Error::InvalidPassword(format!(
            "must be {} to {} characters, got {len}",
            PASSWORD_LEN.start(),
            PASSWORD_LEN.end()
        )));
    }
    Ok(())
}

/// Make sure `/system/system.dat` exists with the marker, replacing entries of the wrong kind.
fn install_marker(tree: &mut FileSystemTree) -> Result<()> {
    let root = tree.root();
    let system = ensure(tree, root, SYSTEM_DIR, true)?;
    let marker = ensure(tree, system, SYSTEM_FILE, false)?;
    tree.set_content(marker, INTEGRITY_MARKER)
}

fn ensure(tree: &mut FileSystemTree, dir: NodeId, name: &str, want_dir: bool) -> Result<NodeId> {
    if let Some(id) = tree.child(dir, name) {
        if tree.node(id)?.is_dir() == want_dir {
            return Ok(id);
        }
        tree.remove(dir, name)?;
    }
    if want_dir {
        tree.add_dir(dir, name)
    } else {
        tree.add_file(dir, name, "")
    }
}
