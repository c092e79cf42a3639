use derivative::Derivative;
use log::trace;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;

use crate::frequency::FrequencyTable;
use crate::node::{Arena, NodeId};

/// How the merge loop is driven. Both strategies share the same merge step
/// and therefore build identical trees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    #[default]
    Iterative,
    Recursive,
}

/// Working-list entry, ordered by weight only (heaviest first).
#[derive(Debug, Clone, Copy, Derivative)]
#[derivative(PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    weight: Reverse<usize>,

    #[derivative(PartialEq = "ignore")]
    #[derivative(PartialOrd = "ignore")]
    #[derivative(Ord = "ignore")]
    id: NodeId,
}

impl Entry {
    fn new(arena: &Arena, id: NodeId) -> Self {
        Self {
            weight: Reverse(arena[id].weight()),
            id,
        }
    }
}

/// Allocates one leaf per symbol of `freq` and merges them into a single
/// root. A lone leaf is returned as is; `None` means there were no symbols.
pub(crate) fn build(arena: &mut Arena, freq: &FrequencyTable, strategy: Strategy) -> Option<NodeId> {
    let work: Vec<Entry> = freq
        .symbols()
        .iter()
        .map(|&(c, w)| {
            let id = arena.push_leaf(c, w);
            Entry::new(arena, id)
        })
        .collect();

    match strategy {
        Strategy::Iterative => merge_iterative(arena, work),
        Strategy::Recursive => merge_recursive(arena, work),
    }
}

fn merge_iterative(arena: &mut Arena, mut work: Vec<Entry>) -> Option<NodeId> {
    for _ in 1..work.len() {
        merge_step(arena, &mut work);
    }
    work.pop().map(|e| e.id)
}

/// Splits the `n - 1` merges into halves and reduces each half in turn, so
/// the recursion is only `log2(n)` deep.
fn merge_recursive(arena: &mut Arena, mut work: Vec<Entry>) -> Option<NodeId> {
    fn reduce(arena: &mut Arena, work: &mut Vec<Entry>, merges: usize) {
        match merges {
            0 => {}
            1 => {
                merge_step(arena, work);
            }
            n => {
                reduce(arena, work, n / 2);
                reduce(arena, work, n - n / 2);
            }
        }
    }

    let merges = work.len().saturating_sub(1);
    reduce(arena, &mut work, merges);
    work.pop().map(|e| e.id)
}

/// Joins the two lightest entries (the tail of `work`) and reinserts the
/// result in front of every entry of equal weight. Returns `false` when
/// fewer than two entries remain.
fn merge_step(arena: &mut Arena, work: &mut Vec<Entry>) -> bool {
    if work.len() < 2 {
        return false;
    }
    let (Some(zero), Some(one)) = (work.pop(), work.pop()) else {
        return false;
    };

    let id = arena.push_merged(zero.id, one.id);
    let merged = Entry::new(arena, id);
    let at = work.partition_point(|e| *e < merged);
    trace!(
        "merged {:?} + {:?} -> {:?} (weight {}) at {}",
        zero.id,
        one.id,
        merged.id,
        merged.weight.0,
        at
    );
    work.insert(at, merged);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(weight: usize, id: usize) -> Entry {
        let mut arena = Arena::default();
        let mut last = arena.push_leaf('-', weight);
        for _ in 0..id {
            last = arena.push_leaf('-', weight);
        }
        Entry::new(&arena, last)
    }

    #[test]
    fn entry_compare_weight_only() {
        assert_eq!(entry(3, 0), entry(3, 4));
    }

    #[test]
    fn entry_heavier_sorts_first() {
        for w in 1..=100 {
            assert!(entry(w + 1, 0) < entry(w, 0));
        }
    }

    #[test]
    fn merge_step_inserts_before_equal_weights() {
        let mut arena = Arena::default();
        let ids: Vec<NodeId> = [('a', 3), ('b', 2), ('c', 1), ('d', 1)]
            .iter()
            .map(|&(c, w)| arena.push_leaf(c, w))
            .collect();
        let mut work: Vec<Entry> = ids.iter().map(|&id| Entry::new(&arena, id)).collect();

        assert!(merge_step(&mut arena, &mut work));

        let order: Vec<NodeId> = work.iter().map(|e| e.id).collect();
        let merged = order[1];
        assert_eq!(order, vec![ids[0], merged, ids[1]]);
        assert_eq!(arena[merged].left(), Some(ids[3]));
        assert_eq!(arena[merged].right(), Some(ids[2]));
        assert_eq!(arena[merged].weight(), 2);
    }

    #[test]
    fn merge_step_needs_two_entries() {
        let mut arena = Arena::default();
        let id = arena.push_leaf('a', 1);
        let mut work = vec![Entry::new(&arena, id)];

        assert!(!merge_step(&mut arena, &mut work));
        assert_eq!(work.len(), 1);
    }

    #[test]
    fn no_symbols_no_root() {
        for strategy in [Strategy::Iterative, Strategy::Recursive] {
            let mut arena = Arena::default();
            assert_eq!(build(&mut arena, &FrequencyTable::default(), strategy), None);
        }
    }

    #[test]
    fn lone_symbol_is_root() {
        for strategy in [Strategy::Iterative, Strategy::Recursive] {
            let mut arena = Arena::default();
            let root = build(&mut arena, &FrequencyTable::from_text("aaa"), strategy).unwrap();
            assert_eq!(arena[root].key(), Some('a'));
            assert_eq!(arena.len(), 1);
        }
    }

    #[test]
    fn strategies_agree() {
        let freq = FrequencyTable::from_text("the quick brown fox jumps over the lazy dog");

        let mut a = Arena::default();
        let ra = build(&mut a, &freq, Strategy::Iterative);
        let mut b = Arena::default();
        let rb = build(&mut b, &freq, Strategy::Recursive);

        assert_eq!(ra, rb);
        assert_eq!(a, b);
        // n leaves plus n - 1 merges
        assert_eq!(a.len(), 2 * freq.len() - 1);
    }

    #[test]
    fn recursive_handles_many_symbols() {
        let text: String = (0x4E00..0x4E00 + 20_000).filter_map(char::from_u32).collect();
        let freq = FrequencyTable::from_text(&text);
        assert_eq!(freq.len(), 20_000);

        let mut a = Arena::default();
        let ra = build(&mut a, &freq, Strategy::Recursive);
        let mut b = Arena::default();
        let rb = build(&mut b, &freq, Strategy::Iterative);

        assert_eq!(ra, rb);
        assert_eq!(a, b);
        assert_eq!(a.len(), 2 * 20_000 - 1);
    }
}
