//! The full engine: events, voices, master gain and reverb.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use nature_dsp::{EngineConfig, NatureEngine, SynthEvent, MAX_VOICES};

use crate::BLOCK_SIZES;

fn engine_with_voices(voices: usize, block: usize) -> NatureEngine {
    let mut engine = NatureEngine::new(EngineConfig::default());
    engine
        .prepare(48_000.0, block)
        .expect("48 kHz is a supported rate");
    // Spread notes over every family
    for i in 0..voices {
        let note = 36 + ((i * 7) % 36) as u8;
        engine.handle_event(SynthEvent::note_on(note, 0.8));
    }
    engine
}

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let mut left = vec![0.0f32; size];
        let mut right = vec![0.0f32; size];

        let mut idle = engine_with_voices(0, size);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, &n| {
            b.iter(|| idle.process(black_box(&mut [&mut left[..], &mut right[..]]), n))
        });

        let mut four = engine_with_voices(4, size);
        group.bench_with_input(BenchmarkId::new("4_voices", size), &size, |b, &n| {
            b.iter(|| four.process(black_box(&mut [&mut left[..], &mut right[..]]), n))
        });

        let mut full = engine_with_voices(MAX_VOICES, size);
        group.bench_with_input(BenchmarkId::new("full_pool", size), &size, |b, &n| {
            b.iter(|| full.process(black_box(&mut [&mut left[..], &mut right[..]]), n))
        });
    }

    group.finish();
}
