//! Criterion benchmarks for the `struct input_event` codec.
//!
//! Measures encoding of single records and of the full burst produced by one
//! maximum-size batch, plus decoding of that burst.
//!
//! Run with:
//! ```bash
//! cargo bench --package tty2keyb-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tty2keyb_core::keymap::KeyCode;
use tty2keyb_core::protocol::codec::{decode_stream, encode_event, encode_event_into};
use tty2keyb_core::protocol::KeyEvent;
use tty2keyb_core::{ByteBatch, MAX_BATCH_LEN};

// ── Fixtures ──────────────────────────────────────────────────────────────────

fn make_batch(len: usize) -> ByteBatch {
    let bytes: Vec<u8> = b"0123456789\n".iter().copied().cycle().take(len).collect();
    ByteBatch::new(bytes).expect("fixture batch is non-empty")
}

fn encode_burst(batch: &ByteBatch) -> Vec<u8> {
    let mut buf = Vec::new();
    for event in batch.keystroke_events() {
        encode_event_into(&mut buf, &event);
    }
    buf
}

// ── Benchmarks ────────────────────────────────────────────────────────────────

fn bench_encode_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_single");

    group.bench_function("press", |b| {
        let ev = KeyEvent::press(KeyCode::Key7);
        b.iter(|| encode_event(black_box(&ev)))
    });
    group.bench_function("sync_report", |b| {
        let ev = KeyEvent::sync_report();
        b.iter(|| encode_event(black_box(&ev)))
    });

    group.finish();
}

fn bench_encode_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_burst");

    for len in [1usize, 16, MAX_BATCH_LEN] {
        let batch = make_batch(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &batch, |b, batch| {
            b.iter(|| encode_burst(black_box(batch)))
        });
    }

    group.finish();
}

fn bench_decode_burst(c: &mut Criterion) {
    let bytes = encode_burst(&make_batch(MAX_BATCH_LEN));

    c.bench_function("decode_burst_255", |b| {
        b.iter(|| decode_stream(black_box(&bytes)).expect("fixture decodes"))
    });
}

criterion_group!(benches, bench_encode_single, bench_encode_burst, bench_decode_burst);
criterion_main!(benches);
