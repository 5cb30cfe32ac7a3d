//! Building trees from nested descriptions, and exporting them back.
//!
//! `build_tree(&describe(&tree))` reproduces the names, order and contents
//! of `tree` (node ids are fresh).

use hostnet_types::{NodeContents, NodeDescription};

use super::node::{Content, NodeId};
use super::tree::FileSystemTree;
use crate::error::Result;

/// Build a tree whose root holds the described entries.
///
/// Every name goes through the usual validation, so a malformed description
/// fails with `InvalidName` or `NameConflict` instead of producing a broken tree.
pub fn build_tree(description: &[NodeDescription]) -> Result<FileSystemTree> {
    let mut tree = FileSystemTree::new();
    let root = tree.root();
    populate(&mut tree, root, description)?;
    Ok(tree)
}

fn populate(tree: &mut FileSystemTree, dir: NodeId, entries: &[NodeDescription]) -> Result<()> {
    for entry in entries {
        match &entry.contents {
            NodeContents::Directory(children) => {
                let id = tree.add_dir(dir, &entry.name)?;
                populate(tree, id, children)?;
            }
            NodeContents::Text(text) => {
                tree.add_file(dir, &entry.name, Content::Text(text.clone()))?;
            }
            NodeContents::Bytes { bytes } => {
                tree.add_file(dir, &entry.name, Content::Bytes(bytes.clone()))?;
            }
        }
    }
    Ok(())
}

/// Describe the root's children in the bootstrap shape.
pub fn describe(tree: &FileSystemTree) -> Vec<NodeDescription> {
    describe_children(tree, tree.root())
}

fn describe_children(tree: &FileSystemTree, dir: NodeId) -> Vec<NodeDescription> {
    let Some(children) = tree.get(dir).and_then(|n| n.children()) else {
        return Vec::new();
    };
    children
        .iter()
        .filter_map(|(name, &id)| {
            let node = tree.get(id)?;
            let contents = match node.content() {
                Some(Content::Text(s)) => NodeContents::Text(s.clone()),
                Some(Content::Bytes(b)) => NodeContents::Bytes { bytes: b.clone() },
                None => NodeContents::Directory(describe_children(tree, id)),
            };
            Some(NodeDescription {
                name: name.clone(),
                contents,
            })
        })
        .collect()
}
