//! Benchmarks for the one-pole lowpass and the bandpass biquad.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use nature_dsp::dsp::filter::{Bandpass, OnePole};
use nature_dsp::dsp::NoiseSource;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        // White noise input, as the water and wind families use
        let mut rng = NoiseSource::new(7);
        let input: Vec<f32> = (0..size).map(|_| rng.next_bipolar()).collect();
        let mut buffer = input.clone();

        let mut lowpass = OnePole::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("one_pole", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = lowpass.lowpass(black_box(x), 3000.0);
                }
            })
        });

        // Fixed center
        let mut bandpass = Bandpass::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("bandpass", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = bandpass.process(black_box(x), 800.0, 2.0);
                }
            })
        });

        // Center moving every sample, coefficients recomputed each time
        let mut bandpass = Bandpass::new(SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("bandpass_swept", size), &size, |b, _| {
            b.iter(|| {
                for (i, (out, &x)) in buffer.iter_mut().zip(&input).enumerate() {
                    let center = 400.0 + i as f32;
                    *out = bandpass.process(black_box(x), center, 1.0);
                }
            })
        });
    }

    group.finish();
}
