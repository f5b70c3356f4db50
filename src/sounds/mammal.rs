use super::{SoundModule, StereoBlock};
use crate::dsp::oscillator::{sine, Phasor};
use crate::dsp::NoiseSource;

sound_variants! {
    /// Variants of the mammal family.
    MammalSound, default = Wolf, {
        Wolf => "Wolf",
        Coyote => "Coyote",
        Deer => "Deer",
        Fox => "Fox",
    }
}

const VIBRATO_HZ: f32 = 5.0;
const VIBRATO_DEPTH_HZ: f32 = 20.0;

/// Sustained calls: a vibrato howl, plain sine yips and barks, and a noise
/// breath for the deer.
pub struct MammalSynth {
    sample_rate: f32,
    voice: Phasor,
    vibrato: Phasor,
}

impl MammalSynth {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            voice: Phasor::new(),
            vibrato: Phasor::new(),
        }
    }

    fn tone(&mut self, out: &mut StereoBlock<'_>, freq: f32, level: f32) {
        for i in 0..out.len() {
            let sample = sine(self.voice.tick(freq, self.sample_rate)) * level;
            out.add(i, sample, sample);
        }
    }

    fn howl(&mut self, out: &mut StereoBlock<'_>, intensity: f32, pitch: f32) {
        let formant_hz = 200.0 + pitch * 100.0;
        let level = intensity * 0.2;

        for i in 0..out.len() {
            let vibrato = sine(self.vibrato.tick(VIBRATO_HZ, self.sample_rate));
            let freq = formant_hz + vibrato * VIBRATO_DEPTH_HZ;
            let howl = sine(self.voice.tick(freq, self.sample_rate)) * level;
            out.add(i, howl, howl);
        }
    }

    fn breath(&mut self, out: &mut StereoBlock<'_>, intensity: f32, rng: &mut NoiseSource) {
        let level = intensity * 0.2;
        for i in 0..out.len() {
            let sample = rng.next_bipolar() * level;
            out.add(i, sample, sample);
        }
    }
}

impl SoundModule for MammalSynth {
    fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.reset();
    }

    fn reset(&mut self) {
        self.voice.reset();
        self.vibrato.reset();
    }

    fn process(
        &mut self,
        out: &mut StereoBlock<'_>,
        variant: usize,
        amplitude: f32,
        velocity: f32,
        rng: &mut NoiseSource,
    ) {
        match MammalSound::from_index(variant) {
            MammalSound::Wolf => self.howl(out, amplitude, velocity),
            MammalSound::Coyote => self.tone(out, 300.0 + velocity * 150.0, amplitude * 0.15),
            MammalSound::Deer => self.breath(out, amplitude, rng),
            MammalSound::Fox => self.tone(out, 400.0 + velocity * 200.0, amplitude * 0.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn every_variant_is_sane() {
        let mut mammals = MammalSynth::new(SAMPLE_RATE);
        assert_variants_sane(&mut mammals, MammalSound::ALL.len());
    }

    #[test]
    fn howl_is_smooth_across_blocks() {
        let mut mammals = MammalSynth::new(SAMPLE_RATE);
        let (left, _) = render(&mut mammals, MammalSound::Wolf as usize, 1.0, 1.0, 64, 32);
        // 320 Hz at 0.2 moves at most 2*pi*320/48000*0.2 per sample
        assert!(max_step(&left) < 0.01, "step {}", max_step(&left));
    }

    #[test]
    fn fox_level_follows_amplitude() {
        let mut loud = MammalSynth::new(SAMPLE_RATE);
        let mut quiet = MammalSynth::new(SAMPLE_RATE);
        let (l, _) = render(&mut loud, MammalSound::Fox as usize, 1.0, 0.5, 8, 256);
        let (q, _) = render(&mut quiet, MammalSound::Fox as usize, 0.5, 0.5, 8, 256);
        assert!((peak(&l) - 0.2).abs() < 1e-3);
        assert!((peak(&q) - 0.1).abs() < 1e-3);
    }
}
