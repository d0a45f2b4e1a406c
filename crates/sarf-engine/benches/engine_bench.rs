// Criterion benchmarks for sarf-engine.
//
// Loads the sample definitions from ../../data relative to the crate root.
//
// Run:
//   cargo bench -p sarf-engine

use std::path::PathBuf;

use criterion::{Criterion, criterion_group, criterion_main};
use sarf_engine::MorphologyHandle;
use sarf_store::{PatternStore, RootStore};

// ---------------------------------------------------------------------------
// Sample data
// ---------------------------------------------------------------------------

fn read_lines(name: &str) -> Vec<String> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data").join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_default()
        .lines()
        .map(str::to_string)
        .collect()
}

fn sample_handle() -> MorphologyHandle {
    let mut handle = MorphologyHandle::in_memory();
    handle.load_roots(read_lines("roots.txt"));
    handle.load_schemes(read_lines("schemes.txt"));
    handle.load_transformations(read_lines("transformations.txt"));
    handle
}

/// Synthetic three-letter keys drawn from a small Arabic alphabet.
fn synthetic_roots(count: usize) -> Vec<String> {
    let letters: Vec<char> = "بتثجحخدذرزسشصضطظعغفقكلمنهوي".chars().collect();
    let n = letters.len();
    (0..count)
        .map(|i| [letters[i % n], letters[(i / n) % n], letters[(i / (n * n)) % n]].iter().collect())
        .collect()
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Generate every root under every scheme.
fn bench_generate_all(c: &mut Criterion) {
    let mut handle = sample_handle();
    let roots: Vec<String> = handle.roots().into_iter().map(str::to_string).collect();

    c.bench_function("generate_all_sample_roots", |b| {
        b.iter(|| {
            for root in &roots {
                std::hint::black_box(handle.generate_all(root).ok());
            }
        });
    });
}

/// Validate one weak and one regular participle.
fn bench_validate(c: &mut Criterion) {
    let mut handle = sample_handle();

    c.bench_function("validate_participles", |b| {
        b.iter(|| {
            std::hint::black_box(handle.validate("رمي", "رامٍ").ok());
            std::hint::black_box(handle.validate("كتب", "مكتوب").ok());
        });
    });
}

/// Build a tree of 5000 roots from scratch.
fn bench_tree_insert(c: &mut Criterion) {
    let roots = synthetic_roots(5000);

    c.bench_function("root_tree_insert_5000", |b| {
        b.iter(|| {
            let mut store = RootStore::new();
            for root in &roots {
                store.insert(root);
            }
            std::hint::black_box(store.height())
        });
    });
}

/// Fill a pattern table from the default capacity, forcing several resizes.
fn bench_table_put_get(c: &mut Criterion) {
    let keys = synthetic_roots(2000);

    c.bench_function("pattern_table_put_get_2000", |b| {
        b.iter(|| {
            let mut table = PatternStore::new();
            for key in &keys {
                table.put(key, "{1}{2}{3}");
            }
            for key in &keys {
                std::hint::black_box(table.get(key));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_generate_all,
    bench_validate,
    bench_tree_insert,
    bench_table_put_get,
);
criterion_main!(benches);
