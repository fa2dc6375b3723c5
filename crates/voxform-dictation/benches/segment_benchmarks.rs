//! Benchmarks for result-event handling.
//!
//! Engines resend every slot of the current run on each result event, so
//! long dictations hand the session ever-growing batches. This measures
//! `on_segment` on batches of increasing length where only the tail slot
//! is new.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use voxform_dictation::{
    RecognitionEvent, RecognitionSession, ResultSlot, ScriptedCapability, SessionOptions,
};

/// A batch of `len` final slots with one trailing interim slot.
fn batch(len: usize) -> RecognitionEvent {
    let mut slots: Vec<ResultSlot> = (0..len)
        .map(|i| ResultSlot::final_text(format!("phrase number {}", i)))
        .collect();
    slots.push(ResultSlot::interim("still talking"));
    RecognitionEvent::new(len.saturating_sub(1), slots)
}

fn bench_on_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("on_segment");

    for len in [1usize, 16, 128] {
        let event = batch(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &event, |b, event| {
            let mut session = RecognitionSession::with_capability(
                ScriptedCapability::new(),
                SessionOptions::default().with_target_sink(|t| {
                    black_box(t);
                }),
            );
            session.start();
            b.iter(|| session.on_segment(black_box(event)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_on_segment);
criterion_main!(benches);
