#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::params::ParamId;

/// A control event for the engine.
///
/// Events are plain `Copy` data so they can travel through a wait-free ring
/// buffer into the audio thread.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthEvent {
    /// Start (or retrigger) a note. Velocity is normalized to [0, 1].
    NoteOn { note: u8, velocity: f32 },
    NoteOff { note: u8 },
    ParamChange { param: ParamId, value: f32 },
    /// Accepted but currently inert. Amount is in [-1, 1].
    PitchBend { amount: f32 },
    /// Accepted but currently inert.
    ChannelPressure { pressure: f32 },
    /// Silence everything immediately.
    Reset,
}

impl SynthEvent {
    pub fn note_on(note: u8, velocity: f32) -> Self {
        SynthEvent::NoteOn { note, velocity }
    }

    pub fn note_off(note: u8) -> Self {
        SynthEvent::NoteOff { note }
    }
}

/// Source of events drained by the engine at the start of each block.
pub trait EventReceiver {
    fn pop(&mut self) -> Option<SynthEvent>;
}

#[cfg(feature = "rtrb")]
impl EventReceiver for Consumer<SynthEvent> {
    fn pop(&mut self) -> Option<SynthEvent> {
        Consumer::pop(self).ok()
    }
}
