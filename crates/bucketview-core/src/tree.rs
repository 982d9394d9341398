//! Materialization of a flat object listing into a folder/file tree.
//!
//! S3 has no directories, only keys that look hierarchical. The builder walks
//! every key's segments once, creating nodes as it goes, then a post-order
//! finalize pass establishes the folder/size invariants. Both passes are pure
//! and deterministic; sibling order is first-insertion order.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::{FileNode, ObjectRecord};

/// Build node: a [`FileNode`] in progress plus a keyed child index so sibling
/// lookup stays O(1) on wide listings.
struct TreeNode {
    name: String,
    full_path: String,
    level: usize,
    size: u64,
    last_modified: Option<DateTime<Utc>>,
    children: Vec<TreeNode>,
    child_index: HashMap<String, usize>,
}

impl TreeNode {
    fn new(
        name: &str,
        full_path: &str,
        level: usize,
        size: u64,
        last_modified: Option<DateTime<Utc>>,
    ) -> Self {
        TreeNode {
            name: name.to_string(),
            full_path: full_path.to_string(),
            level,
            size,
            last_modified,
            children: Vec::new(),
            child_index: HashMap::new(),
        }
    }

    /// Descend into the named child, creating it from `record` values if it
    /// does not exist yet. Existing nodes are never overwritten: when a path
    /// is claimed by both a file and a folder, the folder role wins and the
    /// finalize pass recomputes its size from the children.
    fn child_or_insert(&mut self, name: &str, full_path: &str, record: &ObjectRecord) -> usize {
        match self.child_index.get(name) {
            Some(&position) => position,
            None => {
                self.children.push(TreeNode::new(
                    name,
                    full_path,
                    self.level + 1,
                    record.size,
                    record.last_modified,
                ));
                let position = self.children.len() - 1;
                self.child_index.insert(name.to_string(), position);
                position
            }
        }
    }
}

/// Convert a flat record sequence into a nested tree with rolled-up folder
/// sizes. One pass over all path segments, one post-order finalize pass.
pub fn build_file_tree(records: &[ObjectRecord]) -> Vec<FileNode> {
    let mut root = TreeNode::new("", "", 0, 0, None);

    for record in records {
        let segments: Vec<&str> = record.key.split('/').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            continue;
        }

        let mut current = &mut root;
        let mut path = String::new();
        for segment in &segments {
            if !path.is_empty() {
                path.push('/');
            }
            path.push_str(segment);
            let position = current.child_or_insert(segment, &path, record);
            current = &mut current.children[position];
        }
    }

    root.children.into_iter().map(finalize).collect()
}

/// Post-order finalize: a node is a folder iff it ended up with children, and
/// a folder's size is the sum of its children's sizes. This corrects any
/// folder whose size was seeded from the record that happened to create it.
fn finalize(node: TreeNode) -> FileNode {
    if node.children.is_empty() {
        return FileNode {
            name: node.name,
            full_path: node.full_path,
            is_folder: false,
            level: node.level,
            size: node.size,
            last_modified: node.last_modified,
            children: None,
        };
    }

    let children: Vec<FileNode> = node.children.into_iter().map(finalize).collect();
    let size = children.iter().map(|child| child.size).sum();
    FileNode {
        name: node.name,
        full_path: node.full_path,
        is_folder: true,
        level: node.level,
        size,
        last_modified: node.last_modified,
        children: Some(children),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, size: u64) -> ObjectRecord {
        ObjectRecord {
            key: key.to_string(),
            size,
            last_modified: None,
        }
    }

    fn assert_rollup(node: &FileNode) {
        if let Some(children) = &node.children {
            assert!(node.is_folder, "{} has children but is not a folder", node.name);
            assert!(!children.is_empty());
            let sum: u64 = children.iter().map(|child| child.size).sum();
            assert_eq!(node.size, sum, "size of {} does not match children", node.name);
            for child in children {
                assert_eq!(child.level, node.level + 1);
                assert_rollup(child);
            }
        } else {
            assert!(!node.is_folder, "{} is a folder without children", node.name);
        }
    }

    #[test]
    fn test_nested_keys_roll_up() {
        let tree = build_file_tree(&[
            record("a/b.txt", 10),
            record("a/c.txt", 20),
            record("d.txt", 5),
        ]);

        assert_eq!(tree.len(), 2);
        let folder = &tree[0];
        assert_eq!(folder.name, "a");
        assert!(folder.is_folder);
        assert_eq!(folder.size, 30);
        assert_eq!(folder.level, 1);
        let children = folder.children.as_ref().expect("folder children");
        assert_eq!(children.len(), 2);
        assert_eq!((children[0].name.as_str(), children[0].size), ("b.txt", 10));
        assert_eq!((children[1].name.as_str(), children[1].size), ("c.txt", 20));
        assert_eq!(children[0].full_path, "a/b.txt");

        let file = &tree[1];
        assert_eq!(file.name, "d.txt");
        assert!(!file.is_folder);
        assert_eq!(file.size, 5);

        let top_level_sum: u64 = tree.iter().map(|node| node.size).sum();
        assert_eq!(top_level_sum, 35);
    }

    #[test]
    fn test_folder_size_corrected_even_when_seeded_wrong() {
        // The folder node "a" is created by the first record it appears in
        // and seeded with that record's size; finalize must replace it.
        let tree = build_file_tree(&[record("a/deep/x.bin", 7), record("a/y.bin", 3)]);
        assert_eq!(tree[0].size, 10);
        assert_rollup(&tree[0]);
    }

    #[test]
    fn test_rollup_invariant_holds_recursively() {
        let tree = build_file_tree(&[
            record("p/q/r/s.txt", 1),
            record("p/q/r/t.txt", 2),
            record("p/q/u.txt", 4),
            record("p/v.txt", 8),
            record("w.txt", 16),
        ]);
        for node in &tree {
            assert_rollup(node);
        }
        assert_eq!(tree[0].size, 15);
    }

    #[test]
    fn test_deterministic_modulo_record_order() {
        let mut records = vec![
            record("a/b.txt", 10),
            record("a/c/d.txt", 20),
            record("e.txt", 5),
            record("a/c/f.txt", 1),
        ];
        let forward = build_file_tree(&records);
        records.reverse();
        let backward = build_file_tree(&records);

        // Sibling order follows insertion order, so normalize before comparing.
        fn sort(nodes: &mut Vec<FileNode>) {
            nodes.sort_by(|left, right| left.name.cmp(&right.name));
            for node in nodes {
                if let Some(children) = node.children.as_mut() {
                    sort(children);
                }
            }
        }
        let (mut forward, mut backward) = (forward, backward);
        sort(&mut forward);
        sort(&mut backward);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_key_without_slash_is_top_level_leaf() {
        let tree = build_file_tree(&[record("readme.md", 42)]);
        assert_eq!(tree.len(), 1);
        assert!(!tree[0].is_folder);
        assert_eq!(tree[0].level, 1);
        assert_eq!(tree[0].full_path, "readme.md");
    }

    #[test]
    fn test_file_and_folder_at_same_path_prefers_folder() {
        // "a" exists both as an object and as a prefix; the folder role wins
        // and the conflicting leaf's own size is dropped by the rollup.
        let tree = build_file_tree(&[record("a", 5), record("a/b.txt", 10)]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is_folder);
        assert_eq!(tree[0].size, 10);
        assert_rollup(&tree[0]);

        // Same outcome regardless of which record comes first.
        let tree = build_file_tree(&[record("a/b.txt", 10), record("a", 5)]);
        assert!(tree[0].is_folder);
        assert_eq!(tree[0].size, 10);
    }

    #[test]
    fn test_directory_marker_keys() {
        // A marker with nested objects folds into the folder; a childless
        // marker materializes as a plain zero-byte entry.
        let tree = build_file_tree(&[record("a/", 0), record("a/b.txt", 3)]);
        assert_eq!(tree.len(), 1);
        assert!(tree[0].is_folder);
        assert_eq!(tree[0].size, 3);

        let tree = build_file_tree(&[record("empty/", 0)]);
        assert_eq!(tree.len(), 1);
        assert!(!tree[0].is_folder);
        assert_eq!(tree[0].size, 0);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_file_tree(&[]).is_empty());
    }
}
