//! The filesystem tree: an arena of storage nodes with validated mutations.
//!
//! All structural changes go through [`FileSystemTree`] methods, which check
//! the naming and containment rules before touching anything. A failed
//! operation leaves the tree unchanged.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::node::{validate_name, Content, NodeId, NodeKind, StorageNode};
use crate::error::{Error, Result};

/// A host's hierarchical file store.
#[derive(Debug, Clone)]
pub struct FileSystemTree {
    nodes: HashMap<NodeId, StorageNode>,
    root: NodeId,
    next_id: u64,
}

/// A subtree detached by [`FileSystemTree::remove`].
///
/// Owns every node that was under the removed entry. Dropping it discards them.
#[derive(Debug)]
pub struct Subtree {
    root: NodeId,
    nodes: HashMap<NodeId, StorageNode>,
}

impl Subtree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Name the subtree's root had in its old parent.
    pub fn name(&self) -> &str {
        self.nodes.get(&self.root).map(|n| n.name()).unwrap_or_default()
    }

    /// Number of nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for FileSystemTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystemTree {
    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        let root = NodeId(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            StorageNode {
                id: root,
                name: String::new(),
                parent: None,
                kind: NodeKind::Directory {
                    children: IndexMap::new(),
                },
            },
        );
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of attached nodes, the root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// True if `id` is attached to this tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&StorageNode> {
        self.nodes.get(&id)
    }

    /// Look up a node, failing with `NotFound` if it is not attached.
    pub fn node(&self, id: NodeId) -> Result<&StorageNode> {
        self.nodes.get(&id).ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut StorageNode> {
        self.nodes.get_mut(&id).ok_or_else(|| Error::NotFound(id.to_string()))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Find a child by exact name within one directory.
    pub fn child(&self, dir: NodeId, name: &str) -> Option<NodeId> {
        self.nodes
            .get(&dir)
            .and_then(|n| n.children())
            .and_then(|c| c.get(name).copied())
    }

    fn children_of(&self, dir: NodeId) -> Result<&IndexMap<String, NodeId>> {
        self.node(dir)?
            .children()
            .ok_or_else(|| Error::NotADirectory(self.label(dir)))
    }

    fn allocate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Path for messages; falls back to the raw id for detached nodes.
    fn label(&self, id: NodeId) -> String {
        self.absolute_path(id).unwrap_or_else(|_| id.to_string())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Mutations
    // ═══════════════════════════════════════════════════════════════════

    /// Add an empty directory as the last child of `parent`.
    pub fn add_dir(&mut self, parent: NodeId, name: &str) -> Result<NodeId> {
        self.add(
            parent,
            name,
            NodeKind::Directory {
                children: IndexMap::new(),
            },
        )
    }

    /// Add a file as the last child of `parent`.
    pub fn add_file(&mut self, parent: NodeId, name: &str, content: impl Into<Content>) -> Result<NodeId> {
        self.add(
            parent,
            name,
            NodeKind::File {
                content: content.into(),
            },
        )
    }

    fn add(&mut self, parent: NodeId, name: &str, kind: NodeKind) -> Result<NodeId> {
        self.check_vacant(parent, name, None)?;
        validate_name(name)?;

        let id = self.allocate_id();
        self.nodes.insert(
            id,
            StorageNode {
                id,
                name: name.to_string(),
                parent: None,
                kind,
            },
        );
        self.attach(parent, id)?;
        tracing::debug!(node = %id, parent = %parent, name, "added storage unit");
        Ok(id)
    }

    /// Detach the child named `name` from `parent` and hand back its subtree.
    pub fn remove(&mut self, parent: NodeId, name: &str) -> Result<Subtree> {
        let id = self
            .children_of(parent)?
            .get(name)
            .copied()
            .ok_or_else(|| Error::NotFound(name.to_string()))?;

        let mut ids = self.descendants(id);
        ids.push(id);
        self.detach(id)?;

        let nodes: HashMap<NodeId, StorageNode> = ids
            .into_iter()
            .filter_map(|i| self.nodes.remove(&i).map(|n| (i, n)))
            .collect();
        tracing::debug!(node = %id, parent = %parent, removed = nodes.len(), "removed storage unit");
        Ok(Subtree { root: id, nodes })
    }

    /// Rename a node in place, keeping its position among its siblings.
    pub fn rename(&mut self, id: NodeId, new_name: &str) -> Result<()> {
        let parent = self.node(id)?.parent.ok_or(Error::RootImmutable)?;
        validate_name(new_name)?;
        self.check_vacant(parent, new_name, Some(id))?;

        let old_name = std::mem::replace(&mut self.node_mut(id)?.name, new_name.to_string());
        if old_name == new_name {
            return Ok(());
        }
        let children = self.children_mut(parent)?;
        if let Some(index) = children.get_index_of(&old_name) {
            children.shift_remove_index(index);
            children.shift_insert(index, new_name.to_string(), id);
        }
        tracing::debug!(node = %id, from = %old_name, to = new_name, "renamed storage unit");
        Ok(())
    }

    /// Move a node under `new_parent`, keeping its name.
    pub fn move_to(&mut self, id: NodeId, new_parent: NodeId) -> Result<()> {
        let name = self.node(id)?.name.clone();
        self.move_as(id, new_parent, &name)
    }

    /// Move a node under `new_parent` with a (possibly) new name.
    ///
    /// Fails with `Cycle` if `new_parent` is the node itself or one of its
    /// descendants, and with `NameConflict` if the destination already holds
    /// a different node with that name.
    pub fn move_as(&mut self, id: NodeId, new_parent: NodeId, new_name: &str) -> Result<()> {
        self.node(id)?;
        self.children_of(new_parent)?;
        self.check_not_within(id, new_parent)?;
        validate_name(new_name)?;
        self.check_vacant(new_parent, new_name, Some(id))?;

        if self.parent(id) == Some(new_parent) {
            return self.rename(id, new_name);
        }

        self.detach(id)?;
        self.node_mut(id)?.name = new_name.to_string();
        self.attach(new_parent, id)?;
        tracing::debug!(node = %id, parent = %new_parent, name = new_name, "moved storage unit");
        Ok(())
    }

    /// Deep-copy a node under `new_parent` as `new_name`.
    ///
    /// Files duplicate their content; directories duplicate the whole subtree
    /// with fresh ids throughout. Copying a directory into itself or one of
    /// its descendants fails with `Cycle`.
    pub fn copy(&mut self, id: NodeId, new_parent: NodeId, new_name: &str) -> Result<NodeId> {
        self.node(id)?;
        self.children_of(new_parent)?;
        self.check_not_within(id, new_parent)?;
        validate_name(new_name)?;
        self.check_vacant(new_parent, new_name, None)?;

        let copy = self.duplicate(id, new_parent, new_name.to_string())?;
        tracing::debug!(node = %id, copy = %copy, parent = %new_parent, "copied storage unit");
        Ok(copy)
    }

    fn duplicate(&mut self, src: NodeId, parent: NodeId, name: String) -> Result<NodeId> {
        let source = self.node(src)?;
        let kind = match &source.kind {
            NodeKind::File { content } => NodeKind::File {
                content: content.clone(),
            },
            NodeKind::Directory { .. } => NodeKind::Directory {
                children: IndexMap::new(),
            },
        };
        let children: Vec<(String, NodeId)> = source
            .children()
            .map(|c| c.iter().map(|(n, i)| (n.clone(), *i)).collect())
            .unwrap_or_default();

        let id = self.allocate_id();
        self.nodes.insert(
            id,
            StorageNode {
                id,
                name,
                parent: None,
                kind,
            },
        );
        self.attach(parent, id)?;

        for (child_name, child) in children {
            self.duplicate(child, id, child_name)?;
        }
        Ok(id)
    }

    /// Replace a file's content.
    pub fn set_content(&mut self, id: NodeId, content: impl Into<Content>) -> Result<()> {
        let label = self.label(id);
        match &mut self.node_mut(id)?.kind {
            NodeKind::File { content: slot } => {
                *slot = content.into();
                tracing::debug!(node = %id, "wrote file content");
                Ok(())
            }
            NodeKind::Directory { .. } => Err(Error::NotAFile(label)),
        }
    }

    fn children_mut(&mut self, dir: NodeId) -> Result<&mut IndexMap<String, NodeId>> {
        let label = self.label(dir);
        match &mut self.node_mut(dir)?.kind {
            NodeKind::Directory { children } => Ok(children),
            NodeKind::File { .. } => Err(Error::NotADirectory(label)),
        }
    }

    fn attach(&mut self, parent: NodeId, id: NodeId) -> Result<()> {
        let name = self.node(id)?.name.clone();
        self.children_mut(parent)?.insert(name, id);
        self.node_mut(id)?.parent = Some(parent);
        Ok(())
    }

    fn detach(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        let name = node.name.clone();
        let Some(parent) = node.parent else {
            return Err(Error::RootImmutable);
        };
        self.children_mut(parent)?.shift_remove(&name);
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    fn check_vacant(&self, dir: NodeId, name: &str, except: Option<NodeId>) -> Result<()> {
        match self.children_of(dir)?.get(name) {
            Some(&existing) if Some(existing) != except => Err(Error::NameConflict(name.to_string())),
            _ => Ok(()),
        }
    }

    fn check_not_within(&self, id: NodeId, target: NodeId) -> Result<()> {
        if id == target || self.is_ancestor(id, target) {
            return Err(Error::Cycle);
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Queries
    // ═══════════════════════════════════════════════════════════════════

    /// True if `ancestor` lies strictly above `id` on the path to the root.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Every node below `id`, depth-first, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let children_of = |id: NodeId| {
            self.nodes
                .get(&id)
                .and_then(|n| n.children())
                .map(|c| c.values().rev().copied().collect::<Vec<_>>())
                .unwrap_or_default()
        };

        let mut out = Vec::new();
        let mut stack = children_of(id);
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(children_of(current));
        }
        out
    }

    /// Child names of a directory, in insertion order.
    pub fn list_immediate(&self, dir: NodeId) -> Result<Vec<&str>> {
        Ok(self.children_of(dir)?.keys().map(String::as_str).collect())
    }

    /// Depth-first, indentation-prefixed rendering of everything below `dir`.
    ///
    /// The iterator reads the tree lazily; calling this again restarts it.
    pub fn list_tree(&self, dir: NodeId) -> Result<TreeLines<'_>> {
        let children = self.children_of(dir)?;
        Ok(TreeLines {
            tree: self,
            stack: children.values().rev().map(|&c| (c, 0)).collect(),
        })
    }

    /// Absolute path of a node; the root renders as `/`.
    pub fn absolute_path(&self, id: NodeId) -> Result<String> {
        let mut names = Vec::new();
        let mut current = self.node(id)?;
        while let Some(parent) = current.parent {
            names.push(current.name.as_str());
            current = self.node(parent)?;
        }
        if names.is_empty() {
            return Ok("/".to_string());
        }
        names.reverse();
        Ok(format!("/{}", names.join("/")))
    }

    /// Content of a file, failing with `NotAFile` for directories.
    pub fn content(&self, id: NodeId) -> Result<&Content> {
        self.node(id)?
            .content()
            .ok_or_else(|| Error::NotAFile(self.label(id)))
    }
}

/// Lazy depth-first rendering produced by [`FileSystemTree::list_tree`].
///
/// Each line is the node name indented two spaces per level; directories
/// carry a trailing `/`.
pub struct TreeLines<'a> {
    tree: &'a FileSystemTree,
    stack: Vec<(NodeId, usize)>,
}

impl Iterator for TreeLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (id, depth) = self.stack.pop()?;
        let node = self.tree.get(id)?;
        if let Some(children) = node.children() {
            self.stack.extend(children.values().rev().map(|&c| (c, depth + 1)));
        }
        let suffix = if node.is_dir() { "/" } else { "" };
        Some(format!("{}{}{}", "  ".repeat(depth), node.name(), suffix))
    }
}
