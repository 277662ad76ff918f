use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use suffixtree_rs::SuffixTree;

/// Generate repetitive text data
fn generate_repetitive_text(size: usize) -> String {
    let pattern = "the quick brown fox jumps over the lazy dog ";
    pattern.repeat(size / pattern.len())
}

/// Generate DNA-like data over a four-letter alphabet
fn generate_dna(size: usize) -> String {
    let bases = ['A', 'C', 'G', 'T'];
    let mut seed = 12345u64;

    (0..size)
        .map(|_| {
            // Simple LCG random
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            bases[((seed >> 16) % 4) as usize]
        })
        .collect()
}

/// Generate low-repetition data (simulating base64)
fn generate_low_repetition(size: usize) -> String {
    let chars: Vec<char> = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/"
        .chars()
        .collect();
    let mut seed = 12345u64;

    (0..size)
        .map(|_| {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            chars[(seed % chars.len() as u64) as usize]
        })
        .collect()
}

fn bench_build(c: &mut Criterion, name: &str, sizes: &[usize], generate: fn(usize) -> String) {
    let mut group = c.benchmark_group(name);

    for size in sizes {
        let data = generate(*size);

        group.bench_with_input(BenchmarkId::new("case_sensitive", size), &data, |b, data| {
            b.iter(|| black_box(SuffixTree::build(black_box(data), true)));
        });

        group.bench_with_input(BenchmarkId::new("case_insensitive", size), &data, |b, data| {
            b.iter(|| black_box(SuffixTree::build(black_box(data), false)));
        });
    }

    group.finish();
}

fn bench_build_repetitive(c: &mut Criterion) {
    bench_build(c, "build_repetitive", &[1_000, 10_000, 100_000], generate_repetitive_text);
}

fn bench_build_dna(c: &mut Criterion) {
    bench_build(c, "build_dna", &[1_000, 10_000, 100_000], generate_dna);
}

fn bench_build_low_repetition(c: &mut Criterion) {
    bench_build(c, "build_low_repetition", &[1_000, 10_000, 50_000], generate_low_repetition);
}

fn bench_find(c: &mut Criterion) {
    let sizes = [1_000, 10_000, 100_000];
    let mut group = c.benchmark_group("find");

    for size in sizes.iter() {
        // Prepare pre-built trees
        let dna = SuffixTree::build(&generate_dna(*size), true);
        let prose = SuffixTree::build(&generate_repetitive_text(*size), true);

        group.bench_with_input(BenchmarkId::new("dna_short", size), &dna, |b, tree| {
            b.iter(|| black_box(tree.find(black_box("GATC")).count()));
        });

        group.bench_with_input(BenchmarkId::new("dna_absent", size), &dna, |b, tree| {
            b.iter(|| black_box(tree.contains(black_box("GATTACAGATTACAGATTACA"))));
        });

        group.bench_with_input(BenchmarkId::new("prose_frequent", size), &prose, |b, tree| {
            b.iter(|| black_box(tree.find(black_box("the ")).count()));
        });
    }

    group.finish();
}

fn bench_traversal(c: &mut Criterion) {
    let sizes = [1_000, 10_000];
    let mut group = c.benchmark_group("traversal");

    for size in sizes.iter() {
        let tree = SuffixTree::build(&generate_dna(*size), true);

        group.bench_with_input(BenchmarkId::new("dfs", size), &tree, |b, tree| {
            b.iter(|| black_box(tree.dfs().count()));
        });

        group.bench_with_input(BenchmarkId::new("bfs_labels", size), &tree, |b, tree| {
            b.iter(|| black_box(tree.bfs().map(|n| n.path_label().len()).sum::<usize>()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_repetitive,
    bench_build_dna,
    bench_build_low_repetition,
    bench_find,
    bench_traversal
);
criterion_main!(benches);
