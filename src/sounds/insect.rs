use super::{PartialBank, SoundModule, StereoBlock};
use crate::dsp::oscillator::{fm, saw, sine, Phasor};
use crate::dsp::NoiseSource;

/*
Insects
=======

Two synthesis styles:

  FM (cricket, cicada)   a high carrier phase-modulated by a slow sine.
                         A large index smears the carrier into a chirping
                         band, the modulator rate sets the chirp rate.

  AM (bee, fly, mosquito) a sawtooth buzz whose loudness wobbles:
                         saw(f) * (1 + depth * sin(am))

Swarm is a bank of free-running sine partials, 3 to 10 of them depending
on velocity.

  variant    carrier (Hz)     mod (Hz)  index/depth  gain   right
  cricket    4000 + 1000 v    80        50           0.3    x0.8
  cicada     5000 + 1500 v    100       80           0.25   x0.9
  bee        150 + 50 v       20        0.5          0.2    =
  fly        100 + 30 v       15        0.8          0.15   =
  mosquito   800 + 200 v      25        0.3          0.1    =
*/

sound_variants! {
    /// Variants of the insect family.
    InsectSound, default = Cricket, {
        Cricket => "Cricket",
        Cicada => "Cicada",
        Bee => "Bee",
        Fly => "Fly",
        Mosquito => "Mosquito",
        Swarm => "Swarm",
    }
}

/// Parameters of one FM chirp recipe.
struct FmVoice {
    base: f32,
    pitch_range: f32,
    modulator_hz: f32,
    index: f32,
    gain: f32,
    right: f32,
}

/// Parameters of one AM buzz recipe.
struct AmVoice {
    base: f32,
    pitch_range: f32,
    modulator_hz: f32,
    depth: f32,
    gain: f32,
}

const CRICKET: FmVoice = FmVoice {
    base: 4000.0,
    pitch_range: 1000.0,
    modulator_hz: 80.0,
    index: 50.0,
    gain: 0.3,
    right: 0.8,
};

const CICADA: FmVoice = FmVoice {
    base: 5000.0,
    pitch_range: 1500.0,
    modulator_hz: 100.0,
    index: 80.0,
    gain: 0.25,
    right: 0.9,
};

const BEE: AmVoice = AmVoice {
    base: 150.0,
    pitch_range: 50.0,
    modulator_hz: 20.0,
    depth: 0.5,
    gain: 0.2,
};

const FLY: AmVoice = AmVoice {
    base: 100.0,
    pitch_range: 30.0,
    modulator_hz: 15.0,
    depth: 0.8,
    gain: 0.15,
};

const MOSQUITO: AmVoice = AmVoice {
    base: 800.0,
    pitch_range: 200.0,
    modulator_hz: 25.0,
    depth: 0.3,
    gain: 0.1,
};

const SWARM_GAIN: f32 = 0.05;

pub struct InsectSynth {
    sample_rate: f32,
    carrier: Phasor,
    modulator: Phasor,
    swarm: PartialBank,
}

impl InsectSynth {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            carrier: Phasor::new(),
            modulator: Phasor::new(),
            swarm: PartialBank::new(100.0, 4000.0),
        }
    }

    fn chirp(&mut self, recipe: &FmVoice, out: &mut StereoBlock<'_>, intensity: f32, pitch: f32) {
        let carrier_hz = recipe.base + pitch * recipe.pitch_range;
        let level = intensity * recipe.gain;

        for i in 0..out.len() {
            let modulator = sine(self.modulator.tick(recipe.modulator_hz, self.sample_rate));
            let carrier = fm(self.carrier.tick(carrier_hz, self.sample_rate), modulator, recipe.index);
            let sample = carrier * level;
            out.add(i, sample, sample * recipe.right);
        }
    }

    fn buzz(&mut self, recipe: &AmVoice, out: &mut StereoBlock<'_>, intensity: f32, pitch: f32) {
        let carrier_hz = recipe.base + pitch * recipe.pitch_range;
        let level = intensity * recipe.gain;

        for i in 0..out.len() {
            let buzz = saw(self.carrier.tick(carrier_hz, self.sample_rate));
            let wobble = sine(self.modulator.tick(recipe.modulator_hz, self.sample_rate));
            let sample = buzz * (1.0 + recipe.depth * wobble) * level;
            out.add(i, sample, sample);
        }
    }
}

impl SoundModule for InsectSynth {
    fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.reset();
    }

    fn reset(&mut self) {
        self.carrier.reset();
        self.modulator.reset();
        self.swarm.reset();
    }

    fn process(
        &mut self,
        out: &mut StereoBlock<'_>,
        variant: usize,
        amplitude: f32,
        velocity: f32,
        rng: &mut NoiseSource,
    ) {
        match InsectSound::from_index(variant) {
            InsectSound::Cricket => self.chirp(&CRICKET, out, amplitude, velocity),
            InsectSound::Cicada => self.chirp(&CICADA, out, amplitude, velocity),
            InsectSound::Bee => self.buzz(&BEE, out, amplitude, velocity),
            InsectSound::Fly => self.buzz(&FLY, out, amplitude, velocity),
            InsectSound::Mosquito => self.buzz(&MOSQUITO, out, amplitude, velocity),
            InsectSound::Swarm => {
                let count = 3 + (velocity * 7.0) as usize;
                self.swarm
                    .render(out, count, amplitude * SWARM_GAIN, self.sample_rate, rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn every_variant_is_sane() {
        let mut insects = InsectSynth::new(SAMPLE_RATE);
        assert_variants_sane(&mut insects, InsectSound::ALL.len());
    }

    #[test]
    fn cricket_right_channel_is_quieter() {
        let mut insects = InsectSynth::new(SAMPLE_RATE);
        let (left, right) = render(&mut insects, InsectSound::Cricket as usize, 1.0, 0.5, 4, 256);
        for (l, r) in left.iter().zip(&right) {
            assert!((r - l * 0.8).abs() < 1e-6);
        }
    }

    #[test]
    fn bee_buzz_has_no_block_edge_clicks() {
        // Same audio rendered in one long block and in many short ones
        let mut whole = InsectSynth::new(SAMPLE_RATE);
        let mut chunked = InsectSynth::new(SAMPLE_RATE);
        let (one, _) = render(&mut whole, InsectSound::Bee as usize, 1.0, 0.5, 1, 4096);
        let (many, _) = render(&mut chunked, InsectSound::Bee as usize, 1.0, 0.5, 64, 64);
        for (a, b) in one.iter().zip(&many) {
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn swarm_is_bounded_by_partial_count() {
        let mut insects = InsectSynth::new(SAMPLE_RATE);
        let (left, _) = render(&mut insects, InsectSound::Swarm as usize, 1.0, 1.0, 20, 256);
        // Ten partials at 0.05 each
        assert!(peak(&left) <= 0.5 + 1e-4);
        assert!(peak(&left) > 0.0);
    }
}
