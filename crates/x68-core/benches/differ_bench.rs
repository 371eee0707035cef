//! Criterion benchmarks for the keyboard report differencer.
//!
//! The differencer runs on every HID interrupt transfer (up to 1000 Hz for
//! fast gaming keyboards), so a diff must stay comfortably under the 1 ms
//! poll interval.
//!
//! Run with:
//! ```bash
//! cargo bench --package x68-core --bench differ_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use x68_core::engine::differ::ReportDiffer;
use x68_core::{KeyboardReport, ModifierFlags};

// ── Report fixtures ───────────────────────────────────────────────────────────

fn empty() -> KeyboardReport {
    KeyboardReport::default()
}

fn single_key() -> KeyboardReport {
    KeyboardReport::new(0, [0x04, 0, 0, 0, 0, 0])
}

fn full_rollover() -> KeyboardReport {
    KeyboardReport::new(
        ModifierFlags::LEFT_CTRL | ModifierFlags::LEFT_SHIFT,
        [0x04, 0x05, 0x06, 0x07, 0x08, 0x09],
    )
}

fn disjoint_rollover() -> KeyboardReport {
    KeyboardReport::new(
        ModifierFlags::RIGHT_ALT | ModifierFlags::RIGHT_GUI,
        [0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F],
    )
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks a single diff for transitions of increasing size.
fn bench_diff(c: &mut Criterion) {
    let cases: &[(&str, KeyboardReport, KeyboardReport)] = &[
        ("no_change", single_key(), single_key()),
        ("one_make", empty(), single_key()),
        ("one_break", single_key(), empty()),
        ("six_makes_two_modifiers", empty(), full_rollover()),
        ("full_swap", full_rollover(), disjoint_rollover()),
    ];

    let mut group = c.benchmark_group("report_diff");
    for (name, previous, new) in cases {
        group.bench_with_input(
            BenchmarkId::new("transition", name),
            &(*previous, *new),
            |b, (previous, new)| {
                b.iter(|| {
                    let mut differ = ReportDiffer::new();
                    differ.diff(black_box(previous), |_| {});
                    let mut count = 0usize;
                    differ.diff(black_box(new), |_| count += 1);
                    black_box(count)
                })
            },
        );
    }
    group.finish();
}

/// Benchmarks a sustained typing stream: alternating press/release reports.
fn bench_typing_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing_stream");
    group.bench_function("press_release_100_keys", |b| {
        b.iter(|| {
            let mut differ = ReportDiffer::new();
            let mut count = 0usize;
            for usage in 0x04..0x68u8 {
                differ.diff(
                    black_box(&KeyboardReport::new(0, [usage, 0, 0, 0, 0, 0])),
                    |_| count += 1,
                );
                differ.diff(black_box(&KeyboardReport::default()), |_| count += 1);
            }
            black_box(count)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_diff, bench_typing_stream);
criterion_main!(benches);
