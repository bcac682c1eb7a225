//! Report Rendering Benchmarks
//!
//! **Purpose:** Measure snapshot reconciliation and markdown rendering on
//! monorepo-sized inputs
//!
//! **Baseline Metrics (2026-10-19, Rust 1.86):**
//! - Diff 1000 files: ~100-200µs
//! - Render table of 1000 rows: ~0.5-1ms
//! - Full comparison (50 packages x 40 files): ~1-3ms
//!
//! **Regression Threshold:** >15% slower than baseline
//!
//! **How to Run:**
//! ```bash
//! cargo bench --bench report_rendering
//! cargo bench --bench report_rendering -- --save-baseline main
//! cargo bench --bench report_rendering -- --baseline main
//! ```
//!
//! **What's Being Measured:**
//! 1. `diff snapshots/N` - Ordered union and per-file deltas
//! 2. `render diff table/N` - Threshold split, totals and markdown
//! 3. `compare monorepo` - Grouped aggregation, dependency resolution and rendering
//!
//! **Performance Tips:**
//! - Registry lookups are replaced by `OfflineLookup`, so no process is spawned
//! - Group aggregation runs on the rayon pool

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use indexmap::IndexMap;
use std::hint::black_box;

use size_report::comparison::compare;
use size_report::config::{ReportSettings, TableKind};
use size_report::deps::OfflineLookup;
use size_report::diff::{diff_snapshots, GroupedSnapshots, SizeSnapshot};
use size_report::i18n::Messages;
use size_report::manifest::{BuildSnapshot, PackageManifest};
use size_report::report::diff_table;

fn snapshot(files: usize, growth: u64) -> SizeSnapshot {
    (0..files)
        .map(|i| {
            let size = 1_000 + (i as u64 * 37) % 5_000;
            // every third file grows; chunks ending in 7 are dropped from the grown side
            let size = if i % 3 == 0 { size + growth } else { size };
            (format!("/dist/chunk-{}.js", i), size)
        })
        .filter(|(name, _)| growth == 0 || !name.ends_with("7.js"))
        .collect()
}

fn monorepo(packages: usize, files: usize, growth: u64) -> BuildSnapshot {
    let groups: GroupedSnapshots = (0..packages)
        .map(|i| (format!("@scope/pkg-{}", i), snapshot(files, growth)))
        .collect();
    let manifests: IndexMap<String, PackageManifest> = (0..packages)
        .map(|i| {
            let range = if growth == 0 { "^1.0.0" } else { "^1.1.0" };
            let manifest = PackageManifest {
                name: Some(format!("@scope/pkg-{}", i)),
                main: Some("dist/index.js".to_string()),
                dependencies: IndexMap::from([("zod".to_string(), range.to_string())]),
                ..Default::default()
            };
            (format!("packages/pkg-{}", i), manifest)
        })
        .collect();

    BuildSnapshot {
        packages: groups,
        applications: GroupedSnapshots::new(),
        manifests,
    }
}

fn bench_diff_snapshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff snapshots");
    for files in [10, 100, 1000] {
        let before = snapshot(files, 0);
        let after = snapshot(files, 250);
        group.bench_with_input(BenchmarkId::from_parameter(files), &files, |b, _| {
            b.iter(|| black_box(diff_snapshots(&before, &after)));
        });
    }
    group.finish();
}

fn bench_render_diff_table(c: &mut Criterion) {
    let settings = ReportSettings::default();
    let messages = Messages::default();
    let options = settings.options_for(TableKind::Packages);

    let mut group = c.benchmark_group("render diff table");
    for files in [10, 100, 1000] {
        let diffs = diff_snapshots(&snapshot(files, 0), &snapshot(files, 250));
        group.bench_with_input(BenchmarkId::from_parameter(files), &files, |b, _| {
            b.iter(|| {
                black_box(diff_table(
                    &diffs,
                    options,
                    TableKind::Packages,
                    &messages,
                ))
            });
        });
    }
    group.finish();
}

fn bench_compare_monorepo(c: &mut Criterion) {
    let base = monorepo(50, 40, 0);
    let head = monorepo(50, 40, 250);
    let settings = ReportSettings::default();
    let messages = Messages::default();

    c.bench_function("compare monorepo", |b| {
        b.iter(|| {
            black_box(compare(
                &base,
                &head,
                &settings,
                &OfflineLookup,
                &messages,
            ))
        });
    });
}

criterion_group!(
    benches,
    bench_diff_snapshots,
    bench_render_diff_table,
    bench_compare_monorepo
);
criterion_main!(benches);
