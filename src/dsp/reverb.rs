//! Reverb - Room Simulation via Parallel Comb Filters
//!
//! A Schroeder-style reverb: eight feedback comb filters run in parallel on
//! the mono sum of the mixed voices, and their averaged output is blended
//! back into both channels.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──→ [Comb  30ms] ──┐
//!                 ├──→ [Comb  37ms] ──┤
//! (L + R) / 2 ────┼──→    ...        ─┼──→ (Σ / 8) ──→ wet
//!                 ├──→ [Comb  79ms] ──┤
//!                 └──→ [Comb  87ms] ──┘
//!
//! out = dry * (1 - mix) + wet * mix          (per channel)
//! ```
//!
//! ## One comb line
//!
//! ```text
//! delayed = ring[write - delay]
//! damped  = delayed * (1 - d) + damped * d        d = damping / 2
//! ring[write] = input + damped * feedback         feedback = room_size / 2
//! ```
//!
//! The damping term is a one-pole lowpass inside the feedback loop, so high
//! frequencies die away faster than lows, the way soft surfaces absorb them.
//! Feedback never exceeds 0.5, which keeps every line unconditionally stable.
//!
//! ## Ring buffers
//!
//! Each line owns a fixed 65536-sample ring, allocated once at construction.
//! The delay in samples is `delay_ms * sample_rate / 1000`; every configured
//! delay must be shorter than the ring. [`CombReverb::supports_sample_rate`]
//! checks that, and the engine refuses to prepare at rates that fail it.

/// Ring length of every comb line (power of two, independent of rate).
pub const REVERB_RING_LEN: usize = 65_536;
const RING_MASK: usize = REVERB_RING_LEN - 1;

/// Comb delay times in milliseconds (mutually prime)
const COMB_DELAYS_MS: [f64; 8] = [30.0, 37.0, 47.0, 53.0, 61.0, 71.0, 79.0, 87.0];
const NUM_LINES: usize = COMB_DELAYS_MS.len();

#[inline]
fn delay_samples(delay_ms: f64, sample_rate: f64) -> usize {
    ((sample_rate * delay_ms / 1000.0) as usize).max(1)
}

/// One feedback comb line (pre-allocated, RT-safe)
struct CombLine {
    buffer: Box<[f32]>,
    delay_samples: usize,
    damped: f32,
}

impl CombLine {
    fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; REVERB_RING_LEN].into_boxed_slice(),
            delay_samples: delay_samples.clamp(1, RING_MASK),
            damped: 0.0,
        }
    }

    #[inline]
    fn process(&mut self, input: f32, write_pos: usize, feedback: f32, damp: f32) -> f32 {
        let read_pos = (write_pos + REVERB_RING_LEN - self.delay_samples) & RING_MASK;
        let delayed = self.buffer[read_pos];

        self.damped = delayed * (1.0 - damp) + self.damped * damp;
        self.buffer[write_pos] = input + self.damped * feedback;

        self.damped
    }

    fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.damped = 0.0;
    }
}

/// Eight-line parallel comb reverb shared by all voices.
pub struct CombReverb {
    lines: [CombLine; NUM_LINES],
    write_pos: usize,
}

impl CombReverb {
    pub fn new(sample_rate: f64) -> Self {
        debug_assert!(
            Self::supports_sample_rate(sample_rate),
            "comb delays must fit in the reverb ring"
        );
        let lines = COMB_DELAYS_MS.map(|ms| CombLine::new(delay_samples(ms, sample_rate)));

        Self {
            lines,
            write_pos: 0,
        }
    }

    /// True if every comb delay fits inside the fixed ring at this rate.
    pub fn supports_sample_rate(sample_rate: f64) -> bool {
        COMB_DELAYS_MS
            .iter()
            .all(|&ms| delay_samples(ms, sample_rate) < REVERB_RING_LEN)
    }

    /// Longest comb delay at this rate, in samples.
    pub fn longest_delay(sample_rate: f64) -> usize {
        delay_samples(COMB_DELAYS_MS[NUM_LINES - 1], sample_rate)
    }

    /// Re-tune the delay lengths (RT-safe, no allocation) and clear the tail.
    pub fn configure(&mut self, sample_rate: f64) {
        debug_assert!(Self::supports_sample_rate(sample_rate));
        for (line, &ms) in self.lines.iter_mut().zip(COMB_DELAYS_MS.iter()) {
            line.delay_samples = delay_samples(ms, sample_rate).clamp(1, RING_MASK);
        }
        self.reset();
    }

    /// Delay of each line in samples, longest last.
    pub fn delay_lengths(&self) -> [usize; NUM_LINES] {
        let mut lengths = [0; NUM_LINES];
        for (len, line) in lengths.iter_mut().zip(self.lines.iter()) {
            *len = line.delay_samples;
        }
        lengths
    }

    /// Feed one mono sample through all lines, returning the wet signal.
    #[inline]
    pub fn tick(&mut self, input: f32, room_size: f32, damping: f32) -> f32 {
        let feedback = room_size * 0.5;
        let damp = damping * 0.5;

        let mut wet = 0.0;
        for line in &mut self.lines {
            wet += line.process(input, self.write_pos, feedback, damp);
        }
        self.write_pos = (self.write_pos + 1) & RING_MASK;

        wet * (1.0 / NUM_LINES as f32)
    }

    /// Process a stereo block in place.
    pub fn process_stereo(
        &mut self,
        left: &mut [f32],
        right: &mut [f32],
        mix: f32,
        room_size: f32,
        damping: f32,
    ) {
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let input = (*l + *r) * 0.5;
            let wet = self.tick(input, room_size, damping);
            *l = *l * (1.0 - mix) + wet * mix;
            *r = *r * (1.0 - mix) + wet * mix;
        }
    }

    /// Process a mono block in place.
    pub fn process_mono(&mut self, buffer: &mut [f32], mix: f32, room_size: f32, damping: f32) {
        for sample in buffer.iter_mut() {
            let wet = self.tick(*sample, room_size, damping);
            *sample = *sample * (1.0 - mix) + wet * mix;
        }
    }

    /// Clear all delay lines and damping states.
    pub fn reset(&mut self) {
        for line in &mut self.lines {
            line.reset();
        }
        self.write_pos = 0;
    }
}
