use crate::params::GlobalParams;

/// Amplitude envelope shared by every voice, as stage times in seconds.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    pub attack_secs: f32,
    pub decay_secs: f32,
    pub sustain: f32,
    pub release_secs: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack_secs: 0.05,
            decay_secs: 0.2,
            sustain: 0.8,
            release_secs: 0.5,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Seed of the engine's noise source. Equal seeds render equal audio.
    pub seed: u32,
    pub envelope: EnvelopeConfig,
    /// Capacity of the event ring between `EngineHandle` and the engine.
    pub event_queue_capacity: usize,
    pub initial_params: GlobalParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 0x1234_5678,
            envelope: EnvelopeConfig::default(),
            event_queue_capacity: 1024,
            initial_params: GlobalParams::default(),
        }
    }
}
