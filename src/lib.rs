//! Prefix-free binary codes for a piece of text.
//!
//! Characters are counted, the two lightest entries are merged until a
//! single root remains, and every leaf gets the "0"/"1" path leading to it:
//!
//! ```
//! use encoding_tree::{build, Strategy};
//!
//! let tree = build("abracadabra", Strategy::Iterative);
//! assert_eq!(tree.code_table()['a'].to_string(), "0");
//! assert_eq!(tree.encode(None).len(), 23);
//! assert!(tree.compression_stats(16).ratio().unwrap() < 1.0);
//! ```
//!
//! Ties between equal weights are broken deterministically: counted
//! characters keep their first-appearance order, and a merged node goes in
//! front of every entry that weighs the same. Both [`Strategy`] variants
//! share that rule and build the same tree.

pub mod error;
pub mod frequency;
pub mod merge;
pub mod node;
pub mod options;
pub mod stats;
pub mod table;
pub mod tree;

pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use merge::Strategy;
pub use node::{Arena, Node, NodeId};
pub use options::{Analysis, EncodingOptions, DEFAULT_BIT_WIDTH};
pub use stats::CompressionStats;
pub use table::{Code, CodeTable};
pub use tree::Tree;

pub fn build(text: &str, strategy: Strategy) -> Tree {
    Tree::build(text, strategy)
}
