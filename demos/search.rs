use std::env;
use std::fs;
use suffixtree_rs::{BuildOptions, SuffixTree};
use tracing_subscriber::EnvFilter;

/// Indexes a file and prints where each pattern occurs.
///
/// Usage: cargo run --example search [--case-sensitive] <filename> <pattern>...
///
/// Set `RUST_LOG=debug` to see construction events.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut options = BuildOptions::default();
    if args.first().map(String::as_str) == Some("--case-sensitive") {
        options = BuildOptions::case_sensitive();
        args.remove(0);
    }

    if args.len() < 2 {
        eprintln!("Usage: {} [--case-sensitive] <filename> <pattern>...", program);
        std::process::exit(1);
    }

    let filename = &args[0];
    let text = fs::read_to_string(filename).unwrap_or_else(|err| {
        eprintln!("Cannot read \"{}\": {}", filename, err);
        std::process::exit(1);
    });

    let tree = SuffixTree::with_options(&text, options);

    for pattern in &args[1..] {
        let mut offsets: Vec<usize> = tree.find(pattern).collect();
        offsets.sort_unstable();
        println!("{:?}: {} occurrence(s)", pattern, offsets.len());
        for offset in offsets.iter().take(20) {
            println!("  {}", offset);
        }
        if offsets.len() > 20 {
            println!("  ... {} more", offsets.len() - 20);
        }
    }

    let stats = tree.stats();

    println!("\n=== Statistics ===");
    println!("Characters indexed: {}", stats.text_length);
    println!("Nodes: {}", stats.nodes);
    println!("Internal nodes: {}", stats.internal_nodes);
    println!("Leaves: {}", stats.leaves);
    println!("Edges: {}", stats.edges);
}
