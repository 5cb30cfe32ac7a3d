//! Path grammar and resolution.
//!
//! A path is `/`-separated segments:
//!
//! - a leading `/` anchors at the root, otherwise the path is relative to a
//!   caller-supplied directory
//! - a trailing `/` marks the path as directory-typed
//! - `.` stays put, `..` goes to the parent (the root is its own parent)
//! - empty segments (`a//b`) are skipped, so `""` and `"/"` name the root
//!
//! Mid-path failures are coarse: a missing segment and an attempt to descend
//! into a file both report `PathNotFound`. Only the final type check
//! (trailing `/` on a file) is precise.

use super::node::NodeId;
use super::tree::FileSystemTree;
use crate::error::{Error, Result};

/// Resolves path strings against one tree.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    tree: &'a FileSystemTree,
}

/// The directory a new leaf would be created in, plus the leaf's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParent {
    pub dir: NodeId,
    pub leaf: String,
    /// The path ended in `/`.
    pub dir_typed: bool,
}

/// Split off the trailing-slash marker. Bare `/` keeps its meaning as root.
fn strip_trailing_slash(path: &str) -> (&str, bool) {
    if path.len() > 1 && path.ends_with('/') {
        (path.trim_end_matches('/'), true)
    } else {
        (path, false)
    }
}

impl<'a> PathResolver<'a> {
    pub fn new(tree: &'a FileSystemTree) -> Self {
        Self { tree }
    }

    /// Resolve `path` to a node.
    ///
    /// Relative paths need `relative_to`; without it they fail with
    /// `NoRelativeContext`.
    pub fn resolve(&self, path: &str, relative_to: Option<NodeId>) -> Result<NodeId> {
        let (body, dir_typed) = strip_trailing_slash(path);
        let node = self.walk(path, body, relative_to)?;
        if dir_typed && !self.tree.node(node)?.is_dir() {
            return Err(Error::NotADirectory(path.to_string()));
        }
        Ok(node)
    }

    /// Resolve everything but the last segment, which need not exist.
    ///
    /// The prefix must name a directory: a missing prefix is `PathNotFound`,
    /// a prefix that is a file is `NotADirectory`. Paths with no final
    /// segment (`""`, `"/"`, `".."`) fail with `MissingName`.
    pub fn resolve_parent(&self, path: &str, relative_to: Option<NodeId>) -> Result<ResolvedParent> {
        let (body, dir_typed) = strip_trailing_slash(path);
        let (prefix, leaf) = match body.rfind('/') {
            Some(0) => ("/", &body[1..]),
            Some(i) => (&body[..i], &body[i + 1..]),
            None => ("", body),
        };
        if leaf.is_empty() || leaf == "." || leaf == ".." {
            return Err(Error::MissingName(path.to_string()));
        }

        // A bare leaf lives in the relative directory, not the root.
        let dir = if prefix.is_empty() {
            relative_to.ok_or_else(|| Error::NoRelativeContext(path.to_string()))?
        } else {
            self.walk(path, prefix, relative_to)?
        };
        if !self.tree.node(dir)?.is_dir() {
            return Err(Error::NotADirectory(prefix.to_string()));
        }

        Ok(ResolvedParent {
            dir,
            leaf: leaf.to_string(),
            dir_typed,
        })
    }

    fn walk(&self, original: &str, body: &str, relative_to: Option<NodeId>) -> Result<NodeId> {
        let mut current = if body.is_empty() || body.starts_with('/') {
            self.tree.root()
        } else {
            relative_to.ok_or_else(|| Error::NoRelativeContext(original.to_string()))?
        };

        for segment in body.split('/') {
            current = match segment {
                "" | "." => current,
                ".." => self.tree.parent(current).unwrap_or(current),
                name => self
                    .tree
                    .child(current, name)
                    .ok_or_else(|| Error::PathNotFound(original.to_string()))?,
            };
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (FileSystemTree, NodeId, NodeId, NodeId) {
        let mut tree = FileSystemTree::new();
        let root = tree.root();
        let home = tree.add_dir(root, "home").unwrap();
        let user = tree.add_dir(home, "user").unwrap();
        let notes = tree.add_file(user, "notes.txt", "hi").unwrap();
        (tree, home, user, notes)
    }

    #[test]
    fn empty_and_slash_are_root() {
        let (tree, _, user, _) = sample();
        let r = PathResolver::new(&tree);
        assert_eq!(r.resolve("", None).unwrap(), tree.root());
        assert_eq!(r.resolve("/", None).unwrap(), tree.root());
        assert_eq!(r.resolve("", Some(user)).unwrap(), tree.root());
    }

    #[test]
    fn absolute_and_relative() {
        let (tree, home, user, notes) = sample();
        let r = PathResolver::new(&tree);
        assert_eq!(r.resolve("/home/user/notes.txt", None).unwrap(), notes);
        assert_eq!(r.resolve("user/notes.txt", Some(home)).unwrap(), notes);
        assert_eq!(r.resolve("notes.txt", Some(user)).unwrap(), notes);
    }

    #[test]
    fn relative_needs_context() {
        let (tree, _, _, _) = sample();
        let r = PathResolver::new(&tree);
        assert_eq!(r.resolve("home", None), Err(Error::NoRelativeContext("home".into())));
    }

    #[test]
    fn dot_segments_navigate() {
        let (tree, home, user, _) = sample();
        let r = PathResolver::new(&tree);
        assert_eq!(r.resolve("..", Some(user)).unwrap(), home);
        assert_eq!(r.resolve("./../user/.", Some(user)).unwrap(), user);
        assert_eq!(r.resolve("/..", None).unwrap(), tree.root());
    }

    #[test]
    fn trailing_slash_requires_directory() {
        let (tree, _, user, _) = sample();
        let r = PathResolver::new(&tree);
        assert_eq!(r.resolve("/home/user/", None).unwrap(), user);
        assert_eq!(
            r.resolve("/home/user/notes.txt/", None),
            Err(Error::NotADirectory("/home/user/notes.txt/".into()))
        );
    }

    #[test]
    fn mid_path_errors_are_coarse() {
        let (tree, _, _, _) = sample();
        let r = PathResolver::new(&tree);
        // Missing segment.
        assert_eq!(
            r.resolve("/home/nobody/x", None),
            Err(Error::PathNotFound("/home/nobody/x".into()))
        );
        // Descending through a file looks the same.
        assert_eq!(
            r.resolve("/home/user/notes.txt/x", None),
            Err(Error::PathNotFound("/home/user/notes.txt/x".into()))
        );
    }

    #[test]
    fn absolute_path_round_trips() {
        let (tree, _, _, _) = sample();
        let r = PathResolver::new(&tree);
        for id in std::iter::once(tree.root()).chain(tree.descendants(tree.root())) {
            let path = tree.absolute_path(id).unwrap();
            assert_eq!(r.resolve(&path, Some(tree.root())).unwrap(), id, "{path}");
        }
    }

    #[test]
    fn parent_allows_new_leaf() {
        let (tree, home, user, _) = sample();
        let r = PathResolver::new(&tree);
        let p = r.resolve_parent("user/new.txt", Some(home)).unwrap();
        assert_eq!(p, ResolvedParent { dir: user, leaf: "new.txt".into(), dir_typed: false });

        let p = r.resolve_parent("/fresh/", None).unwrap();
        assert_eq!(p.dir, tree.root());
        assert_eq!(p.leaf, "fresh");
        assert!(p.dir_typed);

        let p = r.resolve_parent("bare", Some(user)).unwrap();
        assert_eq!(p.dir, user);
    }

    #[test]
    fn parent_prefix_must_exist_and_be_a_directory() {
        let (tree, _, user, _) = sample();
        let r = PathResolver::new(&tree);
        assert_eq!(r.resolve_parent("a/b/", Some(user)), Err(Error::PathNotFound("a/b/".into())));
        assert_eq!(
            r.resolve_parent("notes.txt/inner", Some(user)),
            Err(Error::NotADirectory("notes.txt".into()))
        );
    }

    #[test]
    fn parent_needs_a_leaf() {
        let (tree, _, user, _) = sample();
        let r = PathResolver::new(&tree);
        assert!(matches!(r.resolve_parent("/", None), Err(Error::MissingName(_))));
        assert!(matches!(r.resolve_parent("", Some(user)), Err(Error::MissingName(_))));
        assert!(matches!(r.resolve_parent("..", Some(user)), Err(Error::MissingName(_))));
    }
}
