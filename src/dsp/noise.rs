/*
Noise Source
============

Every sound family needs randomness: white noise to feed the water and wind
filters, random pan offsets, drip pitches, swarm partial frequencies. All of
it comes from one generator owned by the engine and handed to each module by
`&mut` reference for the duration of a `process` call.

Keeping the generator explicit (instead of a global) means:
  - two engines never share or race on random state
  - a seed fully determines the rendered audio, so tests can compare blocks

Algorithm: xorshift32
---------------------

    x ^= x << 13
    x ^= x >> 17
    x ^= x << 5

Period 2^32 - 1, one of the cheapest generators with acceptable spectral
flatness for audio noise. The state must never be zero (zero maps to zero
forever), so a zero seed is replaced with a fixed non-zero constant.
*/

const FALLBACK_SEED: u32 = 0x1234_5678;

/// Deterministic xorshift32 noise generator.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    state: u32,
    seed: u32,
}

impl NoiseSource {
    pub fn new(seed: u32) -> Self {
        let seed = if seed == 0 { FALLBACK_SEED } else { seed };
        Self { state: seed, seed }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform value in [0.0, 1.0).
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        // Top 24 bits fit an f32 mantissa exactly
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// Uniform value in [-1.0, 1.0): one sample of white noise.
    #[inline]
    pub fn next_bipolar(&mut self) -> f32 {
        self.next_float() * 2.0 - 1.0
    }

    /// Rewind to the seed this source was created with.
    pub fn reseed(&mut self) {
        self.state = self.seed;
    }
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new(FALLBACK_SEED)
    }
}
