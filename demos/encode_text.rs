use encoding_tree::{Analysis, EncodingOptions};
use tracing_subscriber::EnvFilter;

// RUST_LOG=encoding_tree=trace shows the merge steps.
fn init_logging() {
    // also forwards `log` records
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn main() {
    init_logging();

    let s = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("Hello my name is Sam!"));
    let options = EncodingOptions {
        separator: Some(' '),
        ..EncodingOptions::default()
    };
    let run = Analysis::new(&s, &options);

    let depth = run.tree.depth();
    let total = run.tree.len();
    for (leaf, code) in run.tree.leaves() {
        if let Some(key) = leaf.key() {
            println!(
                "{:?}:{:<4} {:>6.3} | {:<depth$}",
                key,
                leaf.weight(),
                leaf.probability(total).0,
                code.to_string()
            );
        }
    }

    println!("\n{:?} encoded:\n{}\n", s, run.encoded);
    println!("{}", run.stats);
}
