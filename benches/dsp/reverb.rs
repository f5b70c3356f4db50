//! Benchmarks for the comb reverb.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use nature_dsp::dsp::reverb::CombReverb;

use crate::BLOCK_SIZES;

pub fn bench_reverb(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/reverb");

    for &size in BLOCK_SIZES {
        // Impulse followed by a quiet tone
        let input: Vec<f32> = (0..size)
            .map(|i| {
                if i < 10 {
                    1.0 - (i as f32 / 10.0)
                } else {
                    (i as f32 * 0.05).sin() * 0.1
                }
            })
            .collect();
        let mut left = input.clone();
        let mut right = input.clone();

        let mut reverb = CombReverb::new(48_000.0);
        group.bench_with_input(BenchmarkId::new("stereo", size), &size, |b, _| {
            b.iter(|| {
                left.copy_from_slice(&input);
                right.copy_from_slice(&input);
                reverb.process_stereo(black_box(&mut left), black_box(&mut right), 0.3, 0.9, 0.3);
            })
        });

        let mut reverb = CombReverb::new(48_000.0);
        group.bench_with_input(BenchmarkId::new("mono", size), &size, |b, _| {
            b.iter(|| {
                left.copy_from_slice(&input);
                reverb.process_mono(black_box(&mut left), 0.3, 0.5, 0.9);
            })
        });
    }

    group.finish();
}
