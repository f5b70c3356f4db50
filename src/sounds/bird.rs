use super::{PartialBank, SoundModule, StereoBlock};
use crate::dsp::oscillator::{fm, pulse, saw, sine, Phasor};
use crate::dsp::NoiseSource;

sound_variants! {
    /// Variants of the bird family.
    BirdSound, default = Songbird, {
        Songbird => "Songbird",
        Owl => "Owl",
        Crow => "Crow",
        Flock => "Flock",
    }
}

const SONG_MODULATOR_HZ: f32 = 500.0;
const SONG_INDEX: f32 = 10.0;
const HOOT_RATE_HZ: f32 = 2.0;
const HOOT_DUTY: f32 = 0.1;
const FLOCK_GAIN: f32 = 0.05;

/// Songbird warble (FM), owl hoots (gated sine), crow caws (saw and noise)
/// and a flock of sine chirpers.
pub struct BirdSynth {
    sample_rate: f32,
    carrier: Phasor,
    modulator: Phasor,
    gate: Phasor,
    flock: PartialBank,
}

impl BirdSynth {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            carrier: Phasor::new(),
            modulator: Phasor::new(),
            gate: Phasor::new(),
            flock: PartialBank::new(1500.0, 2000.0),
        }
    }

    fn songbird(&mut self, out: &mut StereoBlock<'_>, intensity: f32, pitch: f32) {
        let carrier_hz = 2000.0 + pitch * 1000.0;
        let level = intensity * 0.2;

        for i in 0..out.len() {
            let modulator = sine(self.modulator.tick(SONG_MODULATOR_HZ, self.sample_rate));
            let song = fm(self.carrier.tick(carrier_hz, self.sample_rate), modulator, SONG_INDEX) * level;
            out.add(i, song, song * 0.9);
        }
    }

    fn owl(&mut self, out: &mut StereoBlock<'_>, intensity: f32, pitch: f32) {
        let formant_hz = 400.0 + pitch * 200.0;
        let level = intensity * 0.3;

        for i in 0..out.len() {
            let gate = pulse(self.gate.tick(HOOT_RATE_HZ, self.sample_rate), HOOT_DUTY);
            let hoot = gate * sine(self.carrier.tick(formant_hz, self.sample_rate)) * level;
            out.add(i, hoot, hoot);
        }
    }

    fn crow(&mut self, out: &mut StereoBlock<'_>, intensity: f32, pitch: f32, rng: &mut NoiseSource) {
        let base_hz = 800.0 + pitch * 400.0;
        let level = intensity * 0.25;

        for i in 0..out.len() {
            let rasp = saw(self.carrier.tick(base_hz, self.sample_rate));
            let noise = rng.next_bipolar();
            let caw = (rasp * 0.7 + noise * 0.3) * level;
            out.add(i, caw, caw);
        }
    }
}

impl SoundModule for BirdSynth {
    fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.reset();
    }

    fn reset(&mut self) {
        self.carrier.reset();
        self.modulator.reset();
        self.gate.reset();
        self.flock.reset();
    }

    fn process(
        &mut self,
        out: &mut StereoBlock<'_>,
        variant: usize,
        amplitude: f32,
        velocity: f32,
        rng: &mut NoiseSource,
    ) {
        match BirdSound::from_index(variant) {
            BirdSound::Songbird => self.songbird(out, amplitude, velocity),
            BirdSound::Owl => self.owl(out, amplitude, velocity),
            BirdSound::Crow => self.crow(out, amplitude, velocity, rng),
            BirdSound::Flock => {
                let count = 2 + (velocity * 8.0) as usize;
                self.flock
                    .render(out, count, amplitude * FLOCK_GAIN, self.sample_rate, rng);
            }
        }
    }
}
