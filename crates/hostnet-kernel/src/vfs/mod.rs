//! Virtual filesystem for a simulated host.
//!
//! Each host owns one [`FileSystemTree`]: an arena of [`StorageNode`]s keyed by
//! [`NodeId`]. Directories own their children; children point back at their
//! parent by id only, so the structure never forms reference cycles.
//!
//! ```text
//! /                      # root (empty name, no parent)
//! ├── system/
//! │   └── system.dat     # integrity marker
//! └── home/
//!     └── notes.txt
//! ```
//!
//! - **node**: node data and name validation
//! - **tree**: validated mutations and listings
//! - **path**: path grammar and resolution against a tree
//! - **bootstrap**: building trees from (and exporting to) nested descriptions

mod bootstrap;
mod node;
mod path;
mod tree;

pub use bootstrap::{build_tree, describe};
pub use node::{validate_name, Content, NodeId, NodeKind, StorageNode, MAX_NAME_LEN};
pub use path::{PathResolver, ResolvedParent};
pub use tree::{FileSystemTree, Subtree, TreeLines};
