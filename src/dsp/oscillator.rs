use std::f32::consts::TAU;

/*
Phase Accumulators
==================

Every tonal element in the sound families (FM carriers and modulators, AM
buzz, pulse gates, vibrato and filter-sweep LFOs) is driven by a normalized
phase in [0, 1):

    phase += frequency / sample_rate
    if phase >= 1.0 { phase -= 1.0 }

The waveform is then a pure function of phase:

    sine(p)   = sin(2π p)
    saw(p)    = 2p - 1
    pulse(p)  = 1 if p < duty else 0
    fm(c, m)  = sin(2π c + index · m)     m is a sine modulator in [-1, 1]

A `Phasor` lives inside its module and is never reset between blocks. That
is what keeps the audio continuous across block boundaries: a waveform that
restarts at phase zero every block clicks at the block rate.

Wrapping uses `fract()` rather than one subtraction so a frequency above the
sample rate (or a negative one) still leaves the phase in range.
*/

#[derive(Debug, Clone, Copy, Default)]
pub struct Phasor {
    phase: f32,
}

impl Phasor {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Start at an arbitrary phase (wrapped into [0, 1)).
    pub fn with_phase(phase: f32) -> Self {
        Self {
            phase: wrap(phase),
        }
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Return the current phase, then advance by one sample.
    #[inline]
    pub fn tick(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let current = self.phase;
        self.phase += frequency / sample_rate;
        if self.phase >= 1.0 || self.phase < 0.0 {
            self.phase = wrap(self.phase);
        }
        current
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[inline]
fn wrap(phase: f32) -> f32 {
    let wrapped = phase - phase.floor();
    // floor() of a tiny negative value can round the result up to exactly 1.0
    if wrapped >= 1.0 || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

#[inline]
pub fn sine(phase: f32) -> f32 {
    (TAU * phase).sin()
}

#[inline]
pub fn saw(phase: f32) -> f32 {
    2.0 * phase - 1.0
}

/// Phase-modulated sine: `sin(2π carrier + index · modulator)`.
#[inline]
pub fn fm(carrier_phase: f32, modulator: f32, index: f32) -> f32 {
    (TAU * carrier_phase + index * modulator).sin()
}

#[inline]
pub fn pulse(phase: f32, duty: f32) -> f32 {
    if phase < duty {
        1.0
    } else {
        0.0
    }
}
