use std::fmt;
use total_float_wrap::TotalF64;

/// Size of an encoding run, measured against a fixed-width encoding of
/// `bit_width` bits per character.
///
/// Bits are counted, never packed: `new_bits` is the length of the "0"/"1"
/// string the codes produce. Counts are kept in `u128`, wide enough for any
/// `bit_width` times any text length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionStats {
    pub bit_width: usize,
    /// `bit_width` times the number of characters.
    pub original_bits: u128,
    /// One fixed-width symbol plus its code, per table entry.
    pub table_bits: u128,
    pub new_bits: u128,
    /// `(table_bits + new_bits) / original_bits`, or `None` when there is
    /// nothing to compare against.
    pub ratio: Option<TotalF64>,
}

impl CompressionStats {
    /// `code_lengths` yields one `(weight, code length)` pair per leaf.
    pub(crate) fn new(
        bit_width: usize,
        chars: usize,
        code_lengths: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let width = bit_width as u128;
        let original_bits = width * chars as u128;
        let (table_bits, new_bits) = code_lengths
            .into_iter()
            .fold((0u128, 0u128), |(table, data), (weight, len)| {
                let len = len as u128;
                (table + width + len, data + weight as u128 * len)
            });

        let ratio = (original_bits != 0)
            .then(|| TotalF64((table_bits + new_bits) as f64 / original_bits as f64));

        Self {
            bit_width,
            original_bits,
            table_bits,
            new_bits,
            ratio,
        }
    }

    pub fn total_bits(&self) -> u128 {
        self.table_bits + self.new_bits
    }

    pub fn ratio(&self) -> Option<f64> {
        self.ratio.as_ref().map(|r| r.0)
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "original: {}", self.original_bits)?;
        writeln!(
            f,
            "new: {} (table:{} / data:{})",
            self.total_bits(),
            self.table_bits,
            self.new_bits
        )?;
        match self.ratio() {
            Some(r) => write!(
                f,
                "compression: {} / {} = {}",
                self.total_bits(),
                self.original_bits,
                r
            ),
            None => write!(f, "compression: not computed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abracadabra_stats() {
        // a:1 b:3 r:3 c:3 d:3
        let s = CompressionStats::new(16, 11, [(5, 1), (2, 3), (2, 3), (1, 3), (1, 3)]);

        assert_eq!(s.original_bits, 176);
        assert_eq!(s.table_bits, 5 * 16 + 13);
        assert_eq!(s.new_bits, 23);
        assert_eq!(s.total_bits(), 116);
        assert_eq!(s.ratio, Some(TotalF64(116.0 / 176.0)));
    }

    #[test]
    fn empty_text_has_no_ratio() {
        let s = CompressionStats::new(16, 0, std::iter::empty());

        assert_eq!(s.original_bits, 0);
        assert_eq!(s.total_bits(), 0);
        assert_eq!(s.ratio(), None);
        assert!(s.to_string().ends_with("compression: not computed"));
    }

    #[test]
    fn zero_width_has_no_ratio() {
        let s = CompressionStats::new(0, 4, [(4, 1)]);

        assert_eq!(s.table_bits, 1);
        assert_eq!(s.new_bits, 4);
        assert_eq!(s.ratio(), None);
    }

    #[test]
    fn widest_bit_width() {
        let s = CompressionStats::new(usize::MAX, 2, [(1, 1), (1, 1)]);
        let max = usize::MAX as u128;

        assert_eq!(s.original_bits, 2 * max);
        assert_eq!(s.table_bits, 2 * (max + 1));
        assert_eq!(s.new_bits, 2);
        assert!(s.ratio().is_some_and(|r| r > 1.0 && r < 1.001));
    }

    #[test]
    fn display_report() {
        let s = CompressionStats::new(8, 4, [(4, 1)]);

        assert_eq!(
            s.to_string(),
            "original: 32\nnew: 13 (table:9 / data:4)\ncompression: 13 / 32 = 0.40625"
        );
    }
}
