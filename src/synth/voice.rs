use crate::dsp::envelope::{Envelope, EnvelopeState};
use crate::sounds::SoundFamily;

/// One slot of the fixed voice pool.
///
/// A voice is bound to a note while active. Its family and variant are
/// resolved once at note-on from the note number and never change until the
/// voice is reused.
#[derive(Debug, Clone)]
pub struct Voice {
    active: bool,
    note: u8,
    velocity: f32,
    family: SoundFamily,
    variant: usize,
    envelope: Envelope,
}

impl Voice {
    pub fn new(envelope: Envelope) -> Self {
        Self {
            active: false,
            note: 0,
            velocity: 0.0,
            family: SoundFamily::default(),
            variant: 0,
            envelope,
        }
    }

    /// Bind to a note and (re)start the envelope from zero.
    pub fn start(&mut self, note: u8, velocity: f32, family: SoundFamily, variant: usize) {
        self.active = true;
        self.note = note;
        self.velocity = velocity.clamp(0.0, 1.0);
        self.family = family;
        self.variant = variant;
        self.envelope.note_on();
    }

    /// Enter release; a voice already releasing or idle is left alone.
    pub fn release(&mut self) {
        if self.active {
            self.envelope.note_off();
        }
    }

    pub fn free(&mut self) {
        self.active = false;
        self.envelope.reset();
    }

    /// Write this block's envelope levels into `out`.
    ///
    /// Returns `true` if the envelope reached Idle during the block.
    pub fn render_envelope(&mut self, out: &mut [f32]) -> bool {
        self.envelope.render(out);
        self.active && !self.envelope.is_active()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_releasing(&self) -> bool {
        self.active && self.envelope.state() == EnvelopeState::Release
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn family(&self) -> SoundFamily {
        self.family
    }

    pub fn variant(&self) -> usize {
        self.variant
    }

    pub fn envelope_mut(&mut self) -> &mut Envelope {
        &mut self.envelope
    }

    pub fn state(&self) -> EnvelopeState {
        self.envelope.state()
    }

    pub fn level(&self) -> f32 {
        self.envelope.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice() -> Voice {
        Voice::new(Envelope::adsr(0.001, 0.001, 0.5, 0.001, 10_000.0))
    }

    #[test]
    fn starts_in_attack_from_zero() {
        let mut v = voice();
        v.start(60, 0.8, SoundFamily::Bird, 0);
        assert!(v.is_active());
        assert_eq!(v.state(), EnvelopeState::Attack);
        assert_eq!(v.level(), 0.0);
        assert_eq!(v.family(), SoundFamily::Bird);
    }

    #[test]
    fn velocity_is_clamped() {
        let mut v = voice();
        v.start(60, 3.0, SoundFamily::Water, 0);
        assert_eq!(v.velocity(), 1.0);
        v.start(60, -1.0, SoundFamily::Water, 0);
        assert_eq!(v.velocity(), 0.0);
    }

    #[test]
    fn release_runs_out_to_idle() {
        let mut v = voice();
        v.start(40, 1.0, SoundFamily::Water, 4);
        let mut buf = [0.0f32; 64];
        assert!(!v.render_envelope(&mut buf));
        v.release();
        assert!(v.is_releasing());
        // 0.5 at 0.1 per sample: idle well within one block
        assert!(v.render_envelope(&mut buf));
        assert_eq!(v.state(), EnvelopeState::Idle);
    }

    #[test]
    fn release_on_free_voice_is_noop() {
        let mut v = voice();
        v.release();
        assert!(!v.is_active());
        assert_eq!(v.state(), EnvelopeState::Idle);
    }
}
