use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::dsp::envelope::Envelope;
use crate::sounds::SoundFamily;
use crate::synth::voice::Voice;
use crate::MAX_VOICES;

/*
Voice Allocation
================

A fixed pool of MAX_VOICES voices, created once and reused forever.

On note-on:

  1. a voice already playing this note is retriggered in place
  2. otherwise the first inactive voice in scan order
  3. otherwise the first voice in scan order that is releasing
  4. otherwise voice 0 is stolen

The scan always runs from voice 0 upward, so the choice only depends on the
pool state and never on timing.

The shared counter tracks how many voices are active. It changes exactly
when a voice goes from inactive to active (+1) or back (-1), and is read
without locking from other threads.
*/

pub struct VoicePool {
    voices: [Voice; MAX_VOICES],
    active_count: Arc<AtomicUsize>,
}

impl VoicePool {
    pub fn new(envelope: Envelope) -> Self {
        Self {
            voices: std::array::from_fn(|_| Voice::new(envelope.clone())),
            active_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the active voice counter, for readers on other threads.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.active_count)
    }

    pub fn active_count(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }

    /// Index of the voice the next new note would take.
    pub fn allocate(&self) -> usize {
        if let Some(free) = self.voices.iter().position(|v| !v.is_active()) {
            return free;
        }
        self.voices
            .iter()
            .position(|v| v.is_releasing())
            .unwrap_or(0)
    }

    /// Active voice bound to `note`.
    pub fn find(&self, note: u8) -> Option<usize> {
        self.voices
            .iter()
            .position(|v| v.is_active() && v.note() == note)
    }

    /// Start a note, retriggering or allocating. Returns the voice index.
    pub fn note_on(&mut self, note: u8, velocity: f32, family: SoundFamily, variant: usize) -> usize {
        let index = self.find(note).unwrap_or_else(|| self.allocate());
        let voice = &mut self.voices[index];
        if !voice.is_active() {
            self.active_count.fetch_add(1, Ordering::Relaxed);
        }
        voice.start(note, velocity, family, variant);
        index
    }

    pub fn note_off(&mut self, note: u8) {
        if let Some(index) = self.find(note) {
            self.voices[index].release();
        }
    }

    /// Silence every voice immediately.
    pub fn panic(&mut self) {
        for voice in &mut self.voices {
            voice.free();
        }
        self.active_count.store(0, Ordering::Relaxed);
    }

    /// Render voice `index`'s envelope for this block into `levels`.
    ///
    /// A voice whose envelope finishes is freed and counted out.
    pub fn advance_envelope(&mut self, index: usize, levels: &mut [f32]) {
        let voice = &mut self.voices[index];
        if voice.render_envelope(levels) {
            voice.free();
            self.active_count.fetch_sub(1, Ordering::Relaxed);
        }
    }

    /// Replace every voice's envelope timing. Stage and level are kept.
    pub fn set_envelope_times(&mut self, attack: f32, decay: f32, sustain: f32, release: f32, sample_rate: f32) {
        for voice in &mut self.voices {
            voice
                .envelope_mut()
                .set_times(attack, decay, sustain, release, sample_rate);
        }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn voice(&self, index: usize) -> &Voice {
        &self.voices[index]
    }
}
