use super::{SoundModule, StereoBlock};
use crate::dsp::filter::Bandpass;
use crate::dsp::oscillator::{sine, Phasor};
use crate::dsp::NoiseSource;

/*
Wind
====

Noise through a bandpass whose center moves. The variants differ in how
far and how fast the center moves, and in the Q.

  Breeze   slow 0.2 Hz drift of +-50 Hz around 400-600 Hz
  Gusts    a 0.5-1.5 Hz swell drives both loudness and center frequency
  Whistle  narrow (Q 5) fixed band at 800-1200 Hz
  Storm    wide (Q 0.5) band swept hard at 3 Hz

                gust env
       1.0 |   /\      /\
           |  /  \    /  \
       0.0 |_/    \__/    \__
*/

sound_variants! {
    /// Variants of the wind family.
    WindSound, default = Breeze, {
        Breeze => "Breeze",
        Gusts => "Gusts",
        Whistle => "Whistle",
        Storm => "Storm",
    }
}

const DRIFT_HZ: f32 = 0.2;
const STORM_SWEEP_HZ: f32 = 3.0;

pub struct WindSynth {
    sample_rate: f32,
    lfo: Phasor,
    bandpass: Bandpass,
}

impl WindSynth {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            lfo: Phasor::new(),
            bandpass: Bandpass::new(sample_rate),
        }
    }

    fn breeze(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let base_freq = 400.0 + texture * 200.0;
        let noise_level = intensity * 0.15;

        for i in 0..out.len() {
            let noise = rng.next_bipolar();
            let center = base_freq + 50.0 * sine(self.lfo.tick(DRIFT_HZ, self.sample_rate));
            let sample = self.bandpass.process(noise, center, 1.0) * noise_level;
            out.add(i, sample, sample);
        }
    }

    fn gusts(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let gust_rate = 0.5 + texture;
        let noise_level = intensity * 0.2;

        for i in 0..out.len() {
            let noise = rng.next_bipolar();
            let gust = 0.5 + 0.5 * sine(self.lfo.tick(gust_rate, self.sample_rate));
            let center = 300.0 + 200.0 * gust;
            let sample = self.bandpass.process(noise, center, 1.0) * noise_level * gust;
            out.add(i, sample, sample);
        }
    }

    fn whistle(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let center = 800.0 + texture * 400.0;
        let noise_level = intensity * 0.1;

        for i in 0..out.len() {
            let noise = rng.next_bipolar();
            let sample = self.bandpass.process(noise, center, 5.0) * noise_level;
            out.add(i, sample, sample);
        }
    }

    fn storm(&mut self, out: &mut StereoBlock<'_>, intensity: f32, texture: f32, rng: &mut NoiseSource) {
        let noise_level = intensity * 0.3;

        for i in 0..out.len() {
            let noise = rng.next_bipolar();
            // Sweeps below zero at high texture; the filter clamps the center
            let center = 200.0 + 300.0 * texture * sine(self.lfo.tick(STORM_SWEEP_HZ, self.sample_rate));
            let sample = self.bandpass.process(noise, center, 0.5) * noise_level;
            out.add(i, sample, sample);
        }
    }
}

impl SoundModule for WindSynth {
    fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.bandpass.set_sample_rate(sample_rate);
        self.reset();
    }

    fn reset(&mut self) {
        self.lfo.reset();
        self.bandpass.reset();
    }

    fn process(
        &mut self,
        out: &mut StereoBlock<'_>,
        variant: usize,
        amplitude: f32,
        velocity: f32,
        rng: &mut NoiseSource,
    ) {
        match WindSound::from_index(variant) {
            WindSound::Breeze => self.breeze(out, amplitude, velocity, rng),
            WindSound::Gusts => self.gusts(out, amplitude, velocity, rng),
            WindSound::Whistle => self.whistle(out, amplitude, velocity, rng),
            WindSound::Storm => self.storm(out, amplitude, velocity, rng),
        }
    }
}
