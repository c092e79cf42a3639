use bitvec::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Write};
use std::ops::Index;

use crate::error::{Error, Result};
use crate::node::{Arena, NodeId};

/// Root-to-leaf path: `false` for a "0" step, `true` for a "1" step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code(BitBox);

impl Code {
    pub fn bits(&self) -> &BitSlice {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn write_to(&self, out: &mut String) {
        out.extend(self.0.iter().by_vals().map(|b| if b { '1' } else { '0' }));
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0.iter().by_vals() {
            f.write_char(if b { '1' } else { '0' })?;
        }
        Ok(())
    }
}

/// Code of every leaf of a tree, keyed by leaf id and reachable by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<NodeId, Code>,
    leaves: HashMap<char, NodeId>,
}

impl CodeTable {
    /// Walks the tree below `root` depth first, "0" child before "1" child.
    pub(crate) fn from_root(arena: &Arena, root: Option<NodeId>) -> Self {
        fn traverse(
            arena: &Arena,
            id: NodeId,
            path: &mut BitVec,
            table: &mut CodeTable,
        ) {
            let node = &arena[id];

            // only leaves carry a key
            if let Some(key) = node.key() {
                table.leaves.insert(key, id);
                table.codes.insert(id, Code(path.clone().into_boxed_bitslice()));
                return;
            }

            if let Some(left) = node.left() {
                path.push(false);
                traverse(arena, left, path, table);
                path.pop();
            }

            if let Some(right) = node.right() {
                path.push(true);
                traverse(arena, right, path, table);
                path.pop();
            }
        }

        let mut table = CodeTable::default();
        if let Some(root) = root {
            traverse(arena, root, &mut BitVec::new(), &mut table);
        }
        table
    }

    pub fn get(&self, leaf: NodeId) -> Option<&Code> {
        self.codes.get(&leaf)
    }

    pub fn code_for(&self, symbol: char) -> Option<&Code> {
        self.leaves.get(&symbol).and_then(|id| self.codes.get(id))
    }

    pub fn leaf_for(&self, symbol: char) -> Option<NodeId> {
        self.leaves.get(&symbol).copied()
    }

    /// Entries in leaf-id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Code)> {
        self.codes.iter().map(|(id, code)| (*id, code))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Longest code length; zero for an empty table.
    pub fn depth(&self) -> usize {
        self.codes.values().map(Code::len).max().unwrap_or(0)
    }

    /// Concatenates the codes of `text`, with `separator` between
    /// consecutive codes when given.
    pub fn encode(&self, text: &str, separator: Option<char>) -> Result<String> {
        let mut out = String::new();
        for (i, c) in text.chars().enumerate() {
            let code = self.code_for(c).ok_or(Error::UnknownSymbol(c))?;
            if let (Some(sep), true) = (separator, i > 0) {
                out.push(sep);
            }
            code.write_to(&mut out);
        }
        Ok(out)
    }
}

/// Code of `symbol`.
///
/// # Panics
///
/// Panics if `symbol` has no leaf in the tree.
impl Index<char> for CodeTable {
    type Output = Code;

    fn index(&self, symbol: char) -> &Code {
        match self.code_for(symbol) {
            Some(code) => code,
            None => panic!("no code for symbol {symbol:?}"),
        }
    }
}
