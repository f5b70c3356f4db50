use super::{SoundModule, StereoBlock};
use crate::dsp::oscillator::{pulse, sine, Phasor};
use crate::dsp::NoiseSource;

/*
Amphibians
==========

Croaks are a tone switched on by a slow pulse gate:

    gate  _|‾|_________|‾|_________      rate Hz, open for `duty` of a cycle
    tone  ~~~~~~~~~~~~~~~~~~~~~~~~~~     sine, keeps running while gated off
    out   _|~|_________|~|_________

Bullfrog adds a second harmonic and a 30 Hz throat flutter on top of a long
gate for the low "jug-o-rum".
*/

sound_variants! {
    /// Variants of the amphibian family.
    AmphibianSound, default = Frog, {
        Frog => "Frog",
        Toad => "Toad",
        TreeFrog => "Tree Frog",
        Bullfrog => "Bullfrog",
    }
}

/// A pulse-gated croak.
struct Croak {
    base: f32,
    pitch_range: f32,
    rate_hz: f32,
    duty: f32,
    gain: f32,
}

const FROG: Croak = Croak {
    base: 150.0,
    pitch_range: 100.0,
    rate_hz: 3.0,
    duty: 0.05,
    gain: 0.3,
};

const TOAD: Croak = Croak {
    base: 100.0,
    pitch_range: 50.0,
    rate_hz: 2.0,
    duty: 0.08,
    gain: 0.3,
};

const TREE_FROG: Croak = Croak {
    base: 2000.0,
    pitch_range: 1000.0,
    rate_hz: 5.0,
    duty: 0.03,
    gain: 0.2,
};

const BULLFROG: Croak = Croak {
    base: 60.0,
    pitch_range: 40.0,
    rate_hz: 1.0,
    duty: 0.25,
    gain: 0.35,
};

const BULLFROG_FLUTTER_HZ: f32 = 30.0;

pub struct AmphibianSynth {
    sample_rate: f32,
    tone: Phasor,
    overtone: Phasor,
    gate: Phasor,
    flutter: Phasor,
}

impl AmphibianSynth {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            tone: Phasor::new(),
            overtone: Phasor::new(),
            gate: Phasor::new(),
            flutter: Phasor::new(),
        }
    }

    fn croak(&mut self, recipe: &Croak, out: &mut StereoBlock<'_>, intensity: f32, pitch: f32) {
        let tone_hz = recipe.base + pitch * recipe.pitch_range;
        let level = intensity * recipe.gain;

        for i in 0..out.len() {
            let gate = pulse(self.gate.tick(recipe.rate_hz, self.sample_rate), recipe.duty);
            let croak = gate * sine(self.tone.tick(tone_hz, self.sample_rate)) * level;
            out.add(i, croak, croak);
        }
    }

    fn bullfrog(&mut self, out: &mut StereoBlock<'_>, intensity: f32, pitch: f32) {
        let recipe = &BULLFROG;
        let tone_hz = recipe.base + pitch * recipe.pitch_range;
        let level = intensity * recipe.gain;

        for i in 0..out.len() {
            let gate = pulse(self.gate.tick(recipe.rate_hz, self.sample_rate), recipe.duty);
            let body = sine(self.tone.tick(tone_hz, self.sample_rate)) * 0.7
                + sine(self.overtone.tick(tone_hz * 2.0, self.sample_rate)) * 0.3;
            let flutter = 0.6 + 0.4 * sine(self.flutter.tick(BULLFROG_FLUTTER_HZ, self.sample_rate));
            let croak = gate * body * flutter * level;
            out.add(i, croak, croak);
        }
    }
}

impl SoundModule for AmphibianSynth {
    fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.reset();
    }

    fn reset(&mut self) {
        self.tone.reset();
        self.overtone.reset();
        self.gate.reset();
        self.flutter.reset();
    }

    fn process(
        &mut self,
        out: &mut StereoBlock<'_>,
        variant: usize,
        amplitude: f32,
        velocity: f32,
        _rng: &mut NoiseSource,
    ) {
        match AmphibianSound::from_index(variant) {
            AmphibianSound::Frog => self.croak(&FROG, out, amplitude, velocity),
            AmphibianSound::Toad => self.croak(&TOAD, out, amplitude, velocity),
            AmphibianSound::TreeFrog => self.croak(&TREE_FROG, out, amplitude, velocity),
            AmphibianSound::Bullfrog => self.bullfrog(out, amplitude, velocity),
        }
    }
}
