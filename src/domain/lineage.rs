//! Evolution lineage: tree model, arena, and pre-order flattening.

use std::collections::HashSet;
use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::{instrument, trace};

use crate::domain::entities::dex_number;

/// One node of a lineage tree as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineageNode {
    pub species_id: u32,
    pub species_name: String,
    pub children: Vec<LineageNode>,
}

impl LineageNode {
    pub fn new(species_id: u32, species_name: impl Into<String>) -> Self {
        Self {
            species_id,
            species_name: species_name.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<LineageNode>) -> Self {
        self.children = children;
        self
    }

    /// Total number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// Flattened lineage item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineageEntry {
    pub id: u32,
    pub name: String,
}

impl fmt::Display for LineageEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Flatten a lineage tree into depth-first pre-order.
///
/// `None` yields an empty sequence. A species id seen twice is emitted only at
/// its first position; the repeated position and everything below it are skipped.
pub fn flatten(root: Option<&LineageNode>) -> Vec<LineageEntry> {
    match root {
        Some(root) => LineageArena::from_root(root)
            .iter()
            .map(|(_, node)| node.entry.clone())
            .collect(),
        None => Vec::new(),
    }
}

/// Node stored in the arena.
#[derive(Debug)]
pub struct ArenaNode {
    pub entry: LineageEntry,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in source order
    pub children: Vec<Index>,
}

/// Arena-backed copy of a lineage tree with unique species ids.
///
/// Built with an explicit stack, so arbitrarily deep chains do not recurse.
#[derive(Debug, Default)]
pub struct LineageArena {
    arena: Arena<ArenaNode>,
    root: Option<Index>,
}

impl LineageArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Copy `root` into the arena, skipping repeated species ids.
    #[instrument(level = "trace", skip(root), fields(root = root.species_id))]
    pub fn from_root(root: &LineageNode) -> Self {
        let mut tree = Self::new();
        let mut visited: HashSet<u32> = HashSet::new();
        let mut stack: Vec<(&LineageNode, Option<Index>)> = vec![(root, None)];

        while let Some((node, parent)) = stack.pop() {
            if !visited.insert(node.species_id) {
                trace!(species_id = node.species_id, "repeated species, subtree skipped");
                continue;
            }
            let entry = LineageEntry {
                id: node.species_id,
                name: node.species_name.clone(),
            };
            let idx = tree.insert_node(entry, parent);
            // Reverse so the first child is popped first
            for child in node.children.iter().rev() {
                stack.push((child, Some(idx)));
            }
        }

        tree
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, entry: LineageEntry, parent: Option<Index>) -> Index {
        let node_idx = self.arena.insert(ArenaNode {
            entry,
            parent,
            children: Vec::new(),
        });

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&ArenaNode> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order iterator, first child first.
    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.get_node(idx) {
                stack.extend(node.children.iter().map(|&child| (child, depth + 1)));
            }
        }
        max_depth
    }

    /// Final stages: nodes without children, in pre-order.
    pub fn leaves(&self) -> Vec<&LineageEntry> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| &node.entry)
            .collect()
    }

    /// Render as a `termtree` for terminal display.
    pub fn to_termtree(&self) -> Option<Tree<String>> {
        self.root.map(|root| self.build_termtree(root))
    }

    fn build_termtree(&self, idx: Index) -> Tree<String> {
        match self.get_node(idx) {
            Some(node) => {
                let label = format!("{} {}", dex_number(node.entry.id), node.entry.name);
                let leaves = node
                    .children
                    .iter()
                    .map(|&child| self.build_termtree(child))
                    .collect::<Vec<_>>();
                Tree::new(label).with_leaves(leaves)
            }
            None => Tree::new(String::new()),
        }
    }
}

pub struct PreOrderIter<'a> {
    arena: &'a LineageArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIter<'a> {
    fn new(arena: &'a LineageArena) -> Self {
        let stack = arena.root().into_iter().collect();
        Self { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = (Index, &'a ArenaNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}
