use log::debug;
use serde::{Deserialize, Serialize};

use crate::merge::Strategy;
use crate::stats::CompressionStats;
use crate::tree::Tree;

/// Width in bits of the fixed-size encoding a run is compared against.
pub const DEFAULT_BIT_WIDTH: usize = 16;

/// Settings of one encoding run. Missing fields take their defaults when
/// deserialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingOptions {
    pub strategy: Strategy,
    pub bit_width: usize,
    pub separator: Option<char>,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            bit_width: DEFAULT_BIT_WIDTH,
            separator: None,
        }
    }
}

/// Everything one run over a text produces.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub tree: Tree,
    pub encoded: String,
    pub stats: CompressionStats,
}

impl Analysis {
    pub fn new(text: &str, options: &EncodingOptions) -> Self {
        let tree = Tree::build(text, options.strategy);
        let encoded = tree.encode(options.separator);
        let stats = tree.compression_stats(options.bit_width);

        debug!(
            "analysed {} chars: {} -> {} bits",
            tree.len(),
            stats.original_bits,
            stats.total_bits()
        );

        Self {
            tree,
            encoded,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Partial {
        strategy: &'static str,
    }

    #[test]
    fn defaults() {
        let o = EncodingOptions::default();

        assert_eq!(o.strategy, Strategy::Iterative);
        assert_eq!(o.bit_width, 16);
        assert_eq!(o.separator, None);
    }

    #[test]
    fn options_through_msgpack() {
        let o = EncodingOptions {
            strategy: Strategy::Recursive,
            bit_width: 8,
            separator: Some(' '),
        };

        let data = rmp_serde::to_vec_named(&o).unwrap();
        let back: EncodingOptions = rmp_serde::from_slice(&data).unwrap();

        assert_eq!(back, o);
    }

    #[test]
    fn missing_fields_default() {
        let data = rmp_serde::to_vec_named(&Partial {
            strategy: "recursive",
        })
        .unwrap();
        let o: EncodingOptions = rmp_serde::from_slice(&data).unwrap();

        assert_eq!(o.strategy, Strategy::Recursive);
        assert_eq!(o.bit_width, DEFAULT_BIT_WIDTH);
        assert_eq!(o.separator, None);
    }

    #[test]
    fn analysis_runs_pipeline() {
        let options = EncodingOptions {
            separator: Some('-'),
            ..EncodingOptions::default()
        };
        let a = Analysis::new("aaaa", &options);

        assert_eq!(a.encoded, "0-0-0-0");
        assert_eq!(a.stats.original_bits, 64);
        assert_eq!(a.stats.new_bits, 4);
        assert_eq!(a.tree.code_table().len(), 1);
    }
}
