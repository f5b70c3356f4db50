//! Each sound family rendering every variant, one voice's worth of work.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use nature_dsp::dsp::NoiseSource;
use nature_dsp::sounds::{SoundBank, SoundFamily, StereoBlock};

use crate::SAMPLE_RATE;

const BLOCK: usize = 256;

pub fn bench_sounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/sounds");
    let mut bank = SoundBank::new(SAMPLE_RATE);
    let mut rng = NoiseSource::new(42);
    let mut left = vec![0.0f32; BLOCK];
    let mut right = vec![0.0f32; BLOCK];

    for family in SoundFamily::ALL {
        for variant in 0..family.variant_count() {
            let id = format!("{}/{}", family.name(), family.variant_name(variant));
            group.bench_with_input(BenchmarkId::new(id, BLOCK), &variant, |b, &variant| {
                b.iter(|| {
                    left.fill(0.0);
                    right.fill(0.0);
                    let mut out = StereoBlock::new(&mut left, &mut right);
                    bank.process(family, &mut out, variant, 0.8, black_box(0.6), &mut rng);
                })
            });
        }
    }

    group.finish();
}
