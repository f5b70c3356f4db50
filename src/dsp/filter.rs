use std::f32::consts::{PI, TAU};

/*
| type           | used by                           | passes          | rejects        |
| -------------- | --------------------------------- | --------------- | -------------- |
| one-pole LP    | rain hiss, ocean rumble           | below cutoff    | above (6 dB/o) |
| two-pole BP    | stream, waterfall, every wind     | around center   | both sides     |

Both filters run continuously for the lifetime of the process, fed by noise
whose cutoff is swept by LFOs. The bandpass is a trapezoidal state-variable
filter: its state is held in integrators rather than past outputs, so moving
the center every sample does not pump energy into the recursion. On top of
that:

  - cutoff is clamped to [MIN_CUTOFF_HZ, 0.45 * sample_rate]. tan() of the
    prewarped frequency goes to infinity at Nyquist.
  - state values that decay into the denormal range are flushed to zero, so
    a silent family does not slowly turn into a CPU hog.
*/

const MIN_CUTOFF_HZ: f32 = 10.0;
const MIN_Q: f32 = 0.1;
const DENORMAL_FLOOR: f32 = 1.0e-20;

#[inline]
fn clamp_cutoff(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let max = (sample_rate * 0.45).max(MIN_CUTOFF_HZ);
    if cutoff_hz.is_finite() {
        cutoff_hz.clamp(MIN_CUTOFF_HZ, max)
    } else {
        MIN_CUTOFF_HZ
    }
}

#[inline]
fn flush_denormal(value: f32) -> f32 {
    if value.abs() < DENORMAL_FLOOR {
        0.0
    } else {
        value
    }
}

/// RC-style one-pole lowpass: `y += alpha * (x - y)`.
#[derive(Debug, Clone)]
pub struct OnePole {
    z1: f32,
    sample_rate: f32,
}

impl OnePole {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            z1: 0.0,
            sample_rate,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    #[inline]
    pub fn coefficient(&self, cutoff_hz: f32) -> f32 {
        let cutoff = clamp_cutoff(cutoff_hz, self.sample_rate);
        let rc = 1.0 / (cutoff * TAU);
        let dt = 1.0 / self.sample_rate;
        dt / (rc + dt)
    }

    #[inline]
    pub fn lowpass(&mut self, input: f32, cutoff_hz: f32) -> f32 {
        let alpha = self.coefficient(cutoff_hz);
        let output = self.z1 + alpha * (input - self.z1);
        self.z1 = flush_denormal(output);
        output
    }

    pub fn reset(&mut self) {
        self.z1 = 0.0;
    }
}

/// Two-pole bandpass, TPT state-variable form, scaled to 0 dB peak gain.
///
/// `q` sets the bandwidth only: the whistle's Q 5 is as loud at its center
/// as the storm's Q 0.5, just narrower.
#[derive(Debug, Clone)]
pub struct Bandpass {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory
    sample_rate: f32,
}

impl Bandpass {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            sample_rate,
        }
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
    }

    #[inline]
    fn compute_g(&self, center_hz: f32) -> f32 {
        let center = clamp_cutoff(center_hz, self.sample_rate);
        (PI * center / self.sample_rate).tan()
    }

    #[inline]
    pub fn process(&mut self, input: f32, center_hz: f32, q: f32) -> f32 {
        let g = self.compute_g(center_hz);
        let k = 1.0 / q.max(MIN_Q);

        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = input - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        k * v1
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
