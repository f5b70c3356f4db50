//! Procedural sound families.
//!
//! Six families (water, wind, insect, bird, amphibian, mammal), each a small
//! closed set of variants. A variant is a fixed recipe: noise through swept
//! filters, FM or AM pairs of phase accumulators, or pulse-gated tones.
//!
//! Every family implements [`SoundModule`] and the engine holds one instance
//! per family in a [`SoundBank`], indexed by [`SoundFamily`]. The shared
//! [`NoiseSource`] is passed into each call; modules never own randomness.
//!
//! Conventions shared by all variants:
//!
//! - output is *added* into the block, never overwritten, so voices mix
//! - `amplitude` is loudness; `velocity` is reused as a texture control
//!   (brightness, pitch or density, depending on the variant)
//! - the right channel is a fixed attenuated or decorrelated copy of the left
//! - an out-of-range variant index renders the family's default variant

/// Declares a family's variant enum with index lookup and a default.
macro_rules! sound_variants {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const DEFAULT: $name = $name::$default;

            /// Variant at `index`, or the family default when out of range.
            pub fn from_index(index: usize) -> Self {
                Self::ALL.get(index).copied().unwrap_or(Self::DEFAULT)
            }

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

pub mod amphibian;
pub mod bird;
pub mod insect;
pub mod mammal;
pub mod water;
pub mod wind;

use crate::dsp::oscillator::{sine, Phasor};
use crate::dsp::NoiseSource;

pub use amphibian::{AmphibianSound, AmphibianSynth};
pub use bird::{BirdSound, BirdSynth};
pub use insect::{InsectSound, InsectSynth};
pub use mammal::{MammalSound, MammalSynth};
pub use water::{WaterSound, WaterSynth};
pub use wind::{WindSound, WindSynth};

/// The six sound families. Discriminants index the [`SoundBank`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SoundFamily {
    #[default]
    Water = 0,
    Wind = 1,
    Insect = 2,
    Bird = 3,
    Amphibian = 4,
    Mammal = 5,
}

impl SoundFamily {
    pub const ALL: [SoundFamily; 6] = [
        SoundFamily::Water,
        SoundFamily::Wind,
        SoundFamily::Insect,
        SoundFamily::Bird,
        SoundFamily::Amphibian,
        SoundFamily::Mammal,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            SoundFamily::Water => "Water",
            SoundFamily::Wind => "Wind",
            SoundFamily::Insect => "Insect",
            SoundFamily::Bird => "Bird",
            SoundFamily::Amphibian => "Amphibian",
            SoundFamily::Mammal => "Mammal",
        }
    }

    /// Number of defined variants in this family.
    pub fn variant_count(self) -> usize {
        match self {
            SoundFamily::Water => WaterSound::ALL.len(),
            SoundFamily::Wind => WindSound::ALL.len(),
            SoundFamily::Insect => InsectSound::ALL.len(),
            SoundFamily::Bird => BirdSound::ALL.len(),
            SoundFamily::Amphibian => AmphibianSound::ALL.len(),
            SoundFamily::Mammal => MammalSound::ALL.len(),
        }
    }

    /// Name of the variant that `index` resolves to (after clamping).
    pub fn variant_name(self, index: usize) -> &'static str {
        match self {
            SoundFamily::Water => WaterSound::from_index(index).name(),
            SoundFamily::Wind => WindSound::from_index(index).name(),
            SoundFamily::Insect => InsectSound::from_index(index).name(),
            SoundFamily::Bird => BirdSound::from_index(index).name(),
            SoundFamily::Amphibian => AmphibianSound::from_index(index).name(),
            SoundFamily::Mammal => MammalSound::from_index(index).name(),
        }
    }
}

/// A block of stereo output that modules add into.
pub struct StereoBlock<'a> {
    pub left: &'a mut [f32],
    pub right: &'a mut [f32],
}

impl<'a> StereoBlock<'a> {
    /// Pair two channel slices; the block length is the shorter of the two.
    pub fn new(left: &'a mut [f32], right: &'a mut [f32]) -> Self {
        let len = left.len().min(right.len());
        Self {
            left: &mut left[..len],
            right: &mut right[..len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.left.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    #[inline]
    pub fn add(&mut self, index: usize, left: f32, right: f32) {
        self.left[index] += left;
        self.right[index] += right;
    }
}

/// Uniform interface of a sound family.
pub trait SoundModule: Send {
    /// Set the sample rate. Called from `prepare`, never from audio.
    fn prepare(&mut self, sample_rate: f32);

    /// Clear oscillator phases and filter state.
    fn reset(&mut self);

    /// Render `variant` for `out.len()` samples, adding into `out`.
    fn process(
        &mut self,
        out: &mut StereoBlock<'_>,
        variant: usize,
        amplitude: f32,
        velocity: f32,
        rng: &mut NoiseSource,
    );
}

/// One module per family, dispatched by table index.
pub struct SoundBank {
    modules: [Box<dyn SoundModule>; 6],
}

impl SoundBank {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            modules: [
                Box::new(WaterSynth::new(sample_rate)),
                Box::new(WindSynth::new(sample_rate)),
                Box::new(InsectSynth::new(sample_rate)),
                Box::new(BirdSynth::new(sample_rate)),
                Box::new(AmphibianSynth::new(sample_rate)),
                Box::new(MammalSynth::new(sample_rate)),
            ],
        }
    }

    pub fn prepare(&mut self, sample_rate: f32) {
        for module in &mut self.modules {
            module.prepare(sample_rate);
        }
    }

    pub fn reset(&mut self) {
        for module in &mut self.modules {
            module.reset();
        }
    }

    #[inline]
    pub fn process(
        &mut self,
        family: SoundFamily,
        out: &mut StereoBlock<'_>,
        variant: usize,
        amplitude: f32,
        velocity: f32,
        rng: &mut NoiseSource,
    ) {
        self.modules[family.index()].process(out, variant, amplitude, velocity, rng);
    }
}

/// A bank of free-running sine partials for crowd textures (swarm, flock).
///
/// Frequencies and phases are drawn on first use. Each block retunes one
/// partial, so the crowd drifts without any phase discontinuity.
#[derive(Debug, Clone)]
pub(crate) struct PartialBank {
    phases: [Phasor; MAX_PARTIALS],
    freqs: [f32; MAX_PARTIALS],
    min_freq: f32,
    spread: f32,
    seeded: bool,
    next_retune: usize,
}

pub(crate) const MAX_PARTIALS: usize = 10;

impl PartialBank {
    pub(crate) fn new(min_freq: f32, spread: f32) -> Self {
        Self {
            phases: [Phasor::new(); MAX_PARTIALS],
            freqs: [min_freq; MAX_PARTIALS],
            min_freq,
            spread,
            seeded: false,
            next_retune: 0,
        }
    }

    fn seed(&mut self, rng: &mut NoiseSource) {
        for (phase, freq) in self.phases.iter_mut().zip(self.freqs.iter_mut()) {
            *freq = self.min_freq + rng.next_float() * self.spread;
            *phase = Phasor::with_phase(rng.next_float());
        }
        self.seeded = true;
    }

    /// Add `count` partials (clamped to the bank size) at `gain` each.
    pub(crate) fn render(
        &mut self,
        out: &mut StereoBlock<'_>,
        count: usize,
        gain: f32,
        sample_rate: f32,
        rng: &mut NoiseSource,
    ) {
        if !self.seeded {
            self.seed(rng);
        }
        let count = count.clamp(1, MAX_PARTIALS);

        let retune = self.next_retune % count;
        self.freqs[retune] = self.min_freq + rng.next_float() * self.spread;
        self.next_retune = self.next_retune.wrapping_add(1);

        for i in 0..out.len() {
            let mut sum = 0.0;
            for (phase, &freq) in self.phases[..count].iter_mut().zip(&self.freqs[..count]) {
                sum += sine(phase.tick(freq, sample_rate));
            }
            let sample = sum * gain;
            out.add(i, sample, sample);
        }
    }

    pub(crate) fn reset(&mut self) {
        self.seeded = false;
        self.next_retune = 0;
        for phase in &mut self.phases {
            phase.reset();
        }
    }
}
