//! Pure data types for hostnet: command results and tree descriptions.
//!
//! This crate is a leaf dependency with no async runtime and no I/O. It exists
//! so that transports (HTTP front-ends, file-drop queues, REPLs) can speak the
//! kernel's wire shapes without pulling in the engine itself.

pub mod description;
pub mod result;

pub use description::*;
pub use result::*;
