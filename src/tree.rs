use log::debug;
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::merge::{self, Strategy};
use crate::node::{Arena, Node, NodeId};
use crate::stats::CompressionStats;
use crate::table::{Code, CodeTable};

/// Merge tree of one text together with its code table.
///
/// Immutable once built; building again from the same text and strategy
/// gives the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    text: String,
    chars: usize,
    strategy: Strategy,
    freq: FrequencyTable,
    arena: Arena,
    root: Option<NodeId>,
    table: CodeTable,
}

impl Tree {
    /// Never fails. An empty text gives a tree without a root; a text with a
    /// single distinct character gives a root whose only ("0") child is that
    /// character's leaf.
    pub fn build(text: &str, strategy: Strategy) -> Self {
        let freq = FrequencyTable::from_text(text);
        let mut arena = Arena::with_capacity(2 * freq.len());

        let root = match merge::build(&mut arena, &freq, strategy) {
            Some(id) if arena[id].is_leaf() => {
                debug!("single symbol {:?}, wrapping its leaf", arena[id].key());
                Some(arena.push_wrapper(id))
            }
            root => root,
        };
        let table = CodeTable::from_root(&arena, root);

        debug!(
            "built {:?} tree: {} chars, {} symbols, {} nodes, depth {}",
            strategy,
            freq.total(),
            freq.len(),
            arena.len(),
            table.depth()
        );

        let tree = Self {
            text: text.to_owned(),
            chars: freq.total(),
            strategy,
            freq,
            arena,
            root,
            table,
        };
        debug_assert_eq!(tree.check_invariants(), Ok(()));
        tree
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.map(|id| &self.arena[id])
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn nodes(&self) -> &Arena {
        &self.arena
    }

    /// Leaves with their codes, in leaf-id order.
    pub fn leaves(&self) -> impl Iterator<Item = (&Node, &Code)> {
        self.table.iter().map(|(id, code)| (&self.arena[id], code))
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.table
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.freq
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of characters in the text.
    pub fn len(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Longest code length.
    pub fn depth(&self) -> usize {
        self.table.depth()
    }

    /// Sum of weight times code length over all leaves.
    pub fn cost(&self) -> usize {
        self.leaves()
            .map(|(leaf, code)| leaf.weight() * code.len())
            .sum()
    }

    /// The text with each character replaced by its code, `separator`
    /// between consecutive codes when given.
    ///
    /// # Panics
    ///
    /// Panics if a character of the text has no code, which a built tree
    /// never allows.
    pub fn encode(&self, separator: Option<char>) -> String {
        match self.table.encode(&self.text, separator) {
            Ok(out) => out,
            Err(e) => panic!("{e}"),
        }
    }

    pub fn compression_stats(&self, bit_width: usize) -> CompressionStats {
        CompressionStats::new(
            bit_width,
            self.chars,
            self.leaves().map(|(leaf, code)| (leaf.weight(), code.len())),
        )
    }

    /// Verifies the structure: every node reachable from the root, leaves
    /// keyed and internal nodes not, two children per internal node (one for
    /// a single-symbol root), weights summing up, one leaf and one code per
    /// distinct character.
    pub fn check_invariants(&self) -> Result<()> {
        let arena = &self.arena;

        let Some(root) = self.root else {
            if let Some((c, _)) = self.freq.symbols().first() {
                return Err(Error::MissingLeaf(*c));
            }
            return match arena.iter().next() {
                Some((id, _)) => Err(Error::UnreachableNode(id)),
                None => Ok(()),
            };
        };

        let mut seen = vec![false; arena.len()];
        let mut leaves: HashMap<char, NodeId> = HashMap::new();
        let mut stack = vec![root];

        while let Some(id) = stack.pop() {
            seen[id.index()] = true;
            let node = &arena[id];

            match (node.left(), node.right()) {
                (None, None) => {
                    let key = node.key().ok_or(Error::KeylessLeaf(id))?;
                    if leaves.insert(key, id).is_some() {
                        return Err(Error::DuplicateLeaf(key));
                    }
                    if self.table.get(id).is_none() {
                        return Err(Error::MissingCode(id));
                    }
                }
                (Some(zero), Some(one)) => {
                    self.check_internal(id, arena[zero].weight() + arena[one].weight())?;
                    stack.push(one);
                    stack.push(zero);
                }
                (Some(only), None) if id == root && arena[only].is_leaf() => {
                    self.check_internal(id, arena[only].weight())?;
                    stack.push(only);
                }
                (Some(_), None) => return Err(Error::SingleChild(id)),
                (None, Some(_)) => return Err(Error::MissingChild(id)),
            }
        }

        if let Some((id, _)) = arena.iter().find(|(id, _)| !seen[id.index()]) {
            return Err(Error::UnreachableNode(id));
        }

        for &(c, expected) in self.freq.symbols() {
            let id = leaves.get(&c).copied().ok_or(Error::MissingLeaf(c))?;
            let actual = arena[id].weight();
            if actual != expected {
                return Err(Error::WeightMismatch {
                    node: id,
                    expected,
                    actual,
                });
            }
        }

        Ok(())
    }

    fn check_internal(&self, id: NodeId, expected: usize) -> Result<()> {
        let node = &self.arena[id];
        if node.key().is_some() {
            return Err(Error::KeyedInternal(id));
        }
        if node.weight() != expected {
            return Err(Error::WeightMismatch {
                node: id,
                expected,
                actual: node.weight(),
            });
        }
        Ok(())
    }
}
