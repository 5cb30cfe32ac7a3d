//! Error kinds for the filesystem, resolver, hosts and network.

use hostnet_types::ExecResult;
use thiserror::Error;

/// Result type for kernel operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kernel errors.
///
/// Display strings are what a terminal user sees on stderr.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{0:?} is not a valid name.")]
    InvalidName(String),
    #[error("Another storage unit named {0:?} already exists in this directory.")]
    NameConflict(String),
    #[error("{0}: Not a directory")]
    NotADirectory(String),
    #[error("{0}: Not a file")]
    NotAFile(String),
    #[error("{0}: No such file or directory")]
    NotFound(String),
    #[error("{0}: path not found")]
    PathNotFound(String),
    #[error("relative path {0:?} has no working directory to resolve against")]
    NoRelativeContext(String),
    #[error("{0:?}: missing name")]
    MissingName(String),
    #[error("Cannot move a directory to a subdirectory of itself.")]
    Cycle,
    #[error("the root directory cannot be removed, renamed or moved")]
    RootImmutable,
    #[error("{0}: content is not text")]
    NotText(String),
    #[error("system is corrupted: {0}")]
    Corrupted(String),
    #[error("host not found: {0}")]
    HostNotFound(String),
    #[error("not connected to any host.")]
    NotConnected,
    #[error("guest sessions cannot open outbound connections.")]
    GuestConnect,
    #[error("cannot connect a host to itself.")]
    SelfConnect,
    #[error("relay chain exceeds {0} hops")]
    RelayTooDeep(usize),
    #[error("invalid username: {0}")]
    InvalidUsername(String),
    #[error("invalid password: {0}")]
    InvalidPassword(String),
    #[error("could not allocate a unique address after {0} attempts")]
    AddressExhausted(usize),
    #[error("command not found.")]
    CommandNotFound(String),
    #[error("Invalid arguments.\n{0}")]
    BadArguments(String),
}

impl From<Error> for ExecResult {
    fn from(err: Error) -> Self {
        ExecResult::failure(1, err.to_string())
    }
}
