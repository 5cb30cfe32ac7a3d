//! Nested tree descriptions, the bootstrap and export shape of a host's tree.
//!
//! A description is a list of entries for the children of the root. Each
//! entry has a `name` and `contents`: a list means a directory, a string is a
//! text file and a `{"bytes": [...]}` object is a binary file.
//!
//! ```json
//! [
//!   { "name": "home", "contents": [
//!       { "name": "notes.txt", "contents": "hello" }
//!   ] },
//!   { "name": "blob.bin", "contents": { "bytes": [0, 159, 146, 150] } }
//! ]
//! ```
//!
//! Any other keys (older loaders wrote a `parent` key) are ignored.

use serde::{Deserialize, Serialize};

/// One storage unit in a tree description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    pub contents: NodeContents,
}

/// Contents of a described storage unit.
///
/// Untagged: a JSON array is a directory, a string is text, and an object
/// with a `bytes` array is a byte blob. Bytes are wrapped so an empty blob
/// never reads back as an empty directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeContents {
    Directory(Vec<NodeDescription>),
    Text(String),
    Bytes { bytes: Vec<u8> },
}

impl NodeDescription {
    /// Describe a directory.
    pub fn directory(name: impl Into<String>, children: Vec<NodeDescription>) -> Self {
        Self {
            name: name.into(),
            contents: NodeContents::Directory(children),
        }
    }

    /// Describe a text file.
    pub fn text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: NodeContents::Text(text.into()),
        }
    }

    /// Describe a binary file.
    pub fn bytes(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: NodeContents::Bytes {
                bytes: bytes.into(),
            },
        }
    }

    /// True if this entry describes a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.contents, NodeContents::Directory(_))
    }
}

/// Parse a root description (the list of the root's children) from JSON.
pub fn parse_description(json: &str) -> serde_json::Result<Vec<NodeDescription>> {
    serde_json::from_str(json)
}
