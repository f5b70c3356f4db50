//! Benchmarks for phase accumulators, waveforms and noise.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use nature_dsp::dsp::oscillator::{fm, pulse, saw, sine, Phasor};
use nature_dsp::dsp::NoiseSource;

use crate::{BLOCK_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Sine - uses sin() transcendental function
        let mut osc = Phasor::new();
        group.bench_with_input(BenchmarkId::new("sine", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = sine(osc.tick(black_box(440.0), SAMPLE_RATE));
                }
            })
        });

        let mut osc = Phasor::new();
        group.bench_with_input(BenchmarkId::new("sawtooth", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = saw(osc.tick(black_box(150.0), SAMPLE_RATE));
                }
            })
        });

        // Pulse gate times a tone, as the croaks do
        let mut gate = Phasor::new();
        let mut tone = Phasor::new();
        group.bench_with_input(BenchmarkId::new("gated_sine", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    let g = pulse(gate.tick(3.0, SAMPLE_RATE), 0.05);
                    *out = g * sine(tone.tick(black_box(200.0), SAMPLE_RATE));
                }
            })
        });

        // Two sines per sample
        let mut carrier = Phasor::new();
        let mut modulator = Phasor::new();
        group.bench_with_input(BenchmarkId::new("fm", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    let m = sine(modulator.tick(80.0, SAMPLE_RATE));
                    *out = fm(carrier.tick(black_box(4500.0), SAMPLE_RATE), m, 50.0);
                }
            })
        });

        // Noise - xorshift PRNG
        let mut rng = NoiseSource::new(1);
        group.bench_with_input(BenchmarkId::new("noise", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = rng.next_bipolar();
                }
            })
        });
    }

    group.finish();
}
