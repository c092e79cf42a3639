use std::ops::Index;
use total_float_wrap::TotalF64;

/// Index of a node inside the [`Arena`] of the tree that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A leaf (`key` is set, no children) or an internal node (no key, both
/// children set). The wrapper root of a single-symbol tree is the one node
/// with only a `left` child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: Option<char>,
    weight: usize,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

impl Node {
    fn leaf(key: char, weight: usize) -> Self {
        Self {
            key: Some(key),
            weight,
            left: None,
            right: None,
        }
    }

    pub fn key(&self) -> Option<char> {
        self.key
    }

    pub fn weight(&self) -> usize {
        self.weight
    }

    /// Child reached by a "0" bit.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Child reached by a "1" bit.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Share of `total` carried by this node; zero for an empty total.
    pub fn probability(&self, total: usize) -> TotalF64 {
        if total == 0 {
            return TotalF64(0.0);
        }
        TotalF64(self.weight as f64 / total as f64)
    }
}

/// Flat node storage. Nodes are only ever appended, so ids stay valid for
/// the life of the arena.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub(crate) fn push_leaf(&mut self, key: char, weight: usize) -> NodeId {
        self.push(Node::leaf(key, weight))
    }

    pub(crate) fn push_merged(&mut self, zero: NodeId, one: NodeId) -> NodeId {
        let weight = self[zero].weight + self[one].weight;
        self.push(Node {
            key: None,
            weight,
            left: Some(zero),
            right: Some(one),
        })
    }

    /// Root above the lone leaf of a single-symbol text.
    pub(crate) fn push_wrapper(&mut self, leaf: NodeId) -> NodeId {
        let weight = self[leaf].weight;
        self.push(Node {
            key: None,
            weight,
            left: Some(leaf),
            right: None,
        })
    }

    /// Any node shape at all, for exercising the invariant checks.
    #[cfg(test)]
    pub(crate) fn push_raw(
        &mut self,
        key: Option<char>,
        weight: usize,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> NodeId {
        self.push(Node {
            key,
            weight,
            left,
            right,
        })
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}
