use std::collections::HashMap;

/// Occurrence counts of the distinct characters of a text, heaviest first.
///
/// Characters of equal weight keep the order in which they first appear in
/// the text, so the table is fully determined by its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    symbols: Vec<(char, usize)>,
    total: usize,
}

impl FrequencyTable {
    pub fn from_text(text: &str) -> Self {
        let mut slots: HashMap<char, usize> = HashMap::new();
        let mut symbols: Vec<(char, usize)> = Vec::new();
        let mut total = 0;

        for c in text.chars() {
            total += 1;
            match slots.get(&c).copied() {
                Some(i) => symbols[i].1 += 1,
                None => {
                    slots.insert(c, symbols.len());
                    symbols.push((c, 1));
                }
            }
        }

        // stable: ties stay in first-appearance order
        symbols.sort_by(|a, b| b.1.cmp(&a.1));

        Self { symbols, total }
    }

    pub fn symbols(&self) -> &[(char, usize)] {
        &self.symbols
    }

    /// Number of distinct characters.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of characters in the counted text.
    pub fn total(&self) -> usize {
        self.total
    }
}
