use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use log::warn;
use rtrb::Producer;

use crate::error::EngineError;
use crate::io::converter::midi_to_event;
use crate::io::midi::MidiEvent;
use crate::params::ParamId;
use crate::synth::message::SynthEvent;

/// Control-side handle to a running engine.
///
/// Events pushed here are applied at the start of the engine's next
/// `process` call. The handle is `Send` and meant to live on a UI or MIDI
/// thread; it never blocks.
pub struct EngineHandle {
    tx: Producer<SynthEvent>,
    active_voices: Arc<AtomicUsize>,
}

impl EngineHandle {
    pub(crate) fn new(tx: Producer<SynthEvent>, active_voices: Arc<AtomicUsize>) -> Self {
        Self { tx, active_voices }
    }

    pub fn send(&mut self, event: SynthEvent) -> Result<(), EngineError> {
        self.tx.push(event).map_err(|_| {
            warn!("event queue full, dropping {event:?}");
            EngineError::QueueFull
        })
    }

    pub fn note_on(&mut self, note: u8, velocity: f32) -> Result<(), EngineError> {
        self.send(SynthEvent::NoteOn { note, velocity })
    }

    pub fn note_off(&mut self, note: u8) -> Result<(), EngineError> {
        self.send(SynthEvent::NoteOff { note })
    }

    pub fn set_parameter(&mut self, param: ParamId, value: f32) -> Result<(), EngineError> {
        self.send(SynthEvent::ParamChange { param, value })
    }

    pub fn panic(&mut self) -> Result<(), EngineError> {
        self.send(SynthEvent::Reset)
    }

    /// Decode raw MIDI bytes and forward the result, if any.
    ///
    /// Messages that do not map to an engine event are dropped silently.
    pub fn send_midi(&mut self, bytes: &[u8]) -> Result<(), EngineError> {
        match MidiEvent::parse(bytes).and_then(midi_to_event) {
            Some(event) => self.send(event),
            None => Ok(()),
        }
    }

    /// Voices active as of the last processed sample.
    pub fn active_voice_count(&self) -> usize {
        self.active_voices.load(Ordering::Relaxed)
    }

    /// Free slots in the event queue.
    pub fn available(&self) -> usize {
        self.tx.slots()
    }
}
