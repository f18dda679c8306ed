use std::collections::HashMap;
use std::fmt::Write;

use log::{debug, trace, warn};

use crate::error::{CodingError, Result};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

/// Position of a node inside its tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Maps each character to the leaf that carries it.
pub type LeafIndex = HashMap<char, NodeId>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf {
        character: char,
        frequency: u64,
        parent: Option<NodeId>,
    },
    Internal {
        frequency: u64,
        left: NodeId,
        right: NodeId,
        parent: Option<NodeId>,
    },
}

impl Node {
    pub fn frequency(&self) -> u64 {
        match self {
            Node::Leaf { frequency, .. } | Node::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Leaf { parent, .. } | Node::Internal { parent, .. } => *parent,
        }
    }

    pub fn character(&self) -> Option<char> {
        match self {
            Node::Leaf { character, .. } => Some(*character),
            Node::Internal { .. } => None,
        }
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            Node::Leaf { .. } => None,
            Node::Internal { left, right, .. } => Some((*left, *right)),
        }
    }

    fn set_parent(&mut self, id: NodeId) {
        match self {
            Node::Leaf { parent, .. } | Node::Internal { parent, .. } => *parent = Some(id),
        }
    }
}

/// A Huffman tree stored in an arena. Children are owned through the arena
/// slots; `parent` fields are plain indices used to walk upwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
    root: NodeId,
    leaves: LeafIndex,
}

impl HuffmanTree {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root.0]
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn leaves(&self) -> &LeafIndex {
        &self.leaves
    }

    /// True when the whole text used one character and no merge happened.
    pub fn is_single_leaf(&self) -> bool {
        matches!(self.root_node(), Node::Leaf { .. })
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Indented dump of the tree: left subtree, this node, right subtree.
    /// Leaves print their character, internal nodes their frequency.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(self.root, 0, &mut out);
        out
    }

    fn render_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let indent = "\t".repeat(depth);
        match &self.nodes[id.0] {
            Node::Leaf { character, .. } => {
                let _ = writeln!(out, "{}{:?}", indent, character);
            }
            Node::Internal {
                frequency,
                left,
                right,
                ..
            } => {
                self.render_node(*left, depth + 1, out);
                let _ = writeln!(out, "{}{}", indent, frequency);
                self.render_node(*right, depth + 1, out);
            }
        }
    }

    /// Checks frequency sums, the parent links of every child, the root
    /// having no parent, and one leaf per indexed character.
    pub fn check_invariants(&self) -> bool {
        if self.root_node().parent().is_some() {
            warn!("Root {:?} has a parent.", self.root);
            return false;
        }

        for (id, node) in self.iter() {
            let Some((left, right)) = node.children() else {
                continue;
            };
            let (Some(l), Some(r)) = (self.node(left), self.node(right)) else {
                warn!("Node {:?} points outside the arena.", id);
                return false;
            };
            if node.frequency() != l.frequency() + r.frequency() {
                warn!(
                    "Node {:?} frequency {} != {} + {}",
                    id,
                    node.frequency(),
                    l.frequency(),
                    r.frequency()
                );
                return false;
            }
            if l.parent() != Some(id) || r.parent() != Some(id) {
                warn!("Children of {:?} do not link back to it.", id);
                return false;
            }
        }

        let leaf_count = self
            .nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count();
        if leaf_count != self.leaves.len() {
            warn!(
                "Tree has {} leaves but indexes {} characters.",
                leaf_count,
                self.leaves.len()
            );
            return false;
        }

        self.leaves
            .iter()
            .all(|(&c, &id)| self.node(id).and_then(Node::character) == Some(c))
    }
}

/// Builds the tree by repeatedly merging the two lightest nodes. The first
/// node taken from the queue becomes the left child.
pub fn build_huffman_tree(frequencies: &FrequencyTable) -> Result<HuffmanTree> {
    debug!(
        "Building Huffman Tree from {} unique symbols",
        frequencies.len()
    );
    if frequencies.is_empty() {
        return Err(CodingError::EmptyInput);
    }

    let mut nodes = Vec::with_capacity(2 * frequencies.len() - 1);
    let mut leaves = LeafIndex::with_capacity(frequencies.len());
    let mut heap = MinHeap::new();

    for (character, frequency) in frequencies.iter() {
        let id = NodeId(nodes.len());
        nodes.push(Node::Leaf {
            character,
            frequency,
            parent: None,
        });
        leaves.insert(character, id);
        heap.insert(frequency, id);
    }
    debug!("Initial heap size: {}", heap.len());

    while heap.len() > 1 {
        let (left_freq, left) = heap.extract_min()?;
        let (right_freq, right) = heap.extract_min()?;

        let frequency = left_freq + right_freq;
        let id = NodeId(nodes.len());
        nodes.push(Node::Internal {
            frequency,
            left,
            right,
            parent: None,
        });
        nodes[left.0].set_parent(id);
        nodes[right.0].set_parent(id);

        trace!(
            "Merged {:?} ({}) and {:?} ({}) into {:?} ({})",
            left, left_freq, right, right_freq, id, frequency
        );
        heap.insert(frequency, id);
    }

    let (_, root) = heap.extract_min()?;
    let tree = HuffmanTree {
        nodes,
        root,
        leaves,
    };

    debug!(
        "Tree construction complete: {} nodes, root frequency {}.",
        tree.len(),
        tree.root_node().frequency()
    );
    Ok(tree)
}
