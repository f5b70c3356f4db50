use std::f32::consts::PI;

use super::{SoundModule, StereoBlock};
use crate::dsp::filter::{Bandpass, OnePole};
use crate::dsp::oscillator::{sine, Phasor};
use crate::dsp::NoiseSource;

/*
Water
=====

All water sounds are shaped white noise, except drips which are short
pitched blips.

  Rain       noise, slow 0.5 Hz shimmer, one-pole lowpass at 3-5 kHz,
             tiny random pan per sample (each "drop" lands somewhere else)
  Stream     noise through a Q 2 bandpass around 500-1000 Hz, center wobbles
  Ocean      low rumble (100 Hz lowpass) plus a bandpassed wash, swelling
             with a 0.1 Hz "wave" LFO
  Waterfall  wide bandpass at 1-2 kHz, fast 2 Hz center movement
  Drips      2-10 drips per second, each a 50 ms half-sine-windowed tone at
             800-1200 Hz with its own random pan

Velocity is texture: brighter rain, higher stream, faster drips.
*/

sound_variants! {
    /// Variants of the water family.
    WaterSound, default = Rain, {
        Rain => "Rain",
        Stream => "Stream",
        Ocean => "Ocean",
        Waterfall => "Waterfall",
        Drips => "Drips",
    }
}

const LFO_HZ: f32 = 0.5;
const OCEAN_SWELL_HZ: f32 = 0.1;
const WATERFALL_LFO_HZ: f32 = 2.0;
const DRIP_SECONDS: f32 = 0.05;

/// A drip currently sounding.
#[derive(Debug, Clone, Copy)]
struct Drip {
    position: usize,
    length: usize,
    freq: f32,
    level: f32,
    pan: f32,
}

/// Schedules drips across block boundaries.
#[derive(Debug, Clone, Default)]
struct DripScheduler {
    samples_since_drip: f32,
    current: Option<Drip>,
}

pub struct WaterSynth {
    sample_rate: f32,
    lfo: Phasor,
    lowpass: OnePole,
    bandpass: Bandpass,
    drips: DripScheduler,
}

impl WaterSynth {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            lfo: Phasor::new(),
            lowpass: OnePole::new(sample_rate),
            bandpass: Bandpass::new(sample_rate),
            drips: DripScheduler::default(),
        }
    }

    fn rain(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let noise_level = intensity * 0.3;
        let cutoff = 3000.0 + texture * 2000.0;

        for i in 0..out.len() {
            let noise = rng.next_bipolar();
            let shimmer = 1.0 + texture * 0.5 * sine(self.lfo.tick(LFO_HZ, self.sample_rate));
            let filtered = self.lowpass.lowpass(noise * shimmer * noise_level, cutoff);

            let pan = rng.next_float() * 0.1 - 0.05;
            out.add(i, filtered * (1.0 - pan), filtered * (1.0 + pan));
        }
    }

    fn stream(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let base_freq = 500.0 + texture * 500.0;
        let noise_level = intensity * 0.2;

        for i in 0..out.len() {
            let noise = rng.next_bipolar();
            let center = base_freq + texture * 100.0 * sine(self.lfo.tick(LFO_HZ, self.sample_rate));
            let filtered = self.bandpass.process(noise, center, 2.0) * noise_level;

            out.add(i, filtered, filtered * 0.9);
        }
    }

    fn ocean(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let high_freq = 800.0 + texture * 400.0;
        let noise_level = intensity * 0.25;

        for i in 0..out.len() {
            let noise = rng.next_bipolar();
            let rumble = self.lowpass.lowpass(noise, 100.0);
            let wash = self.bandpass.process(noise, high_freq, 1.0);

            let swell = 1.0 + 0.3 * sine(self.lfo.tick(OCEAN_SWELL_HZ, self.sample_rate));
            let ocean = (rumble * 0.6 + wash * 0.4) * swell * noise_level;

            out.add(i, ocean, ocean);
        }
    }

    fn waterfall(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let base_freq = 1000.0 + texture * 1000.0;
        let noise_level = intensity * 0.3;

        for i in 0..out.len() {
            let noise = rng.next_bipolar();
            let center =
                base_freq + texture * 200.0 * sine(self.lfo.tick(WATERFALL_LFO_HZ, self.sample_rate));
            let filtered = self.bandpass.process(noise, center, 1.5) * noise_level;

            out.add(i, filtered, filtered * 0.95);
        }
    }

    fn drips(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let drip_rate = 2.0 + texture * 8.0; // drips per second
        let samples_per_drip = self.sample_rate / drip_rate;
        let drip_length = ((self.sample_rate * DRIP_SECONDS) as usize).max(1);

        for i in 0..out.len() {
            self.drips.samples_since_drip += 1.0;
            if self.drips.samples_since_drip >= samples_per_drip {
                self.drips.samples_since_drip = 0.0;
                self.drips.current = Some(Drip {
                    position: 0,
                    length: drip_length,
                    freq: 800.0 + rng.next_float() * 400.0,
                    level: intensity * (0.3 + rng.next_float() * 0.2),
                    pan: rng.next_bipolar(),
                });
            }

            if let Some(drip) = self.drips.current.as_mut() {
                let t = drip.position as f32 / drip.length as f32;
                let window = (t * PI).sin();
                let seconds = drip.position as f32 / self.sample_rate;
                let sample = sine(drip.freq * seconds) * window * drip.level;

                out.add(i, sample * (1.0 - drip.pan * 0.5), sample * (1.0 + drip.pan * 0.5));

                drip.position += 1;
                if drip.position >= drip.length {
                    self.drips.current = None;
                }
            }
        }
    }
}

impl SoundModule for WaterSynth {
    fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.lowpass.set_sample_rate(sample_rate);
        self.bandpass.set_sample_rate(sample_rate);
        self.reset();
    }

    fn reset(&mut self) {
        self.lfo.reset();
        self.lowpass.reset();
        self.bandpass.reset();
        self.drips = DripScheduler::default();
    }

    fn process(
        &mut self,
        out: &mut StereoBlock<'_>,
        variant: usize,
        amplitude: f32,
        velocity: f32,
        rng: &mut NoiseSource,
    ) {
        match WaterSound::from_index(variant) {
            WaterSound::Rain => self.rain(out, amplitude, velocity, rng),
            WaterSound::Stream => self.stream(out, amplitude, velocity, rng),
            WaterSound::Ocean => self.ocean(out, amplitude, velocity, rng),
            WaterSound::Waterfall => self.waterfall(out, amplitude, velocity, rng),
            WaterSound::Drips => self.drips(out, amplitude, velocity, rng),
        }
    }
}
