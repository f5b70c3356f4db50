/*
ADSR Envelope Implementation
============================

Every voice carries one linear ADSR envelope. Its level multiplies the
voice's rendered signal sample by sample.

Vocabulary
----------

  level       The envelope's current output value (0.0 to 1.0).

  stage       Idle, Attack, Decay, Sustain or Release. A state machine
              governs transitions.

  rate        How much `level` changes per sample in a ramping stage.
              Derived once from a duration in seconds and the sample rate,
              then stored on the voice.


The Shape: Linear Ramps
-----------------------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release


The Math: Time to Rate
----------------------

    attack_rate  = 1.0               / (attack_time  * sample_rate)
    decay_rate   = (1.0 - sustain)   / (decay_time   * sample_rate)
    release_rate = 1.0               / (release_time * sample_rate)

Release uses a fixed rate from full scale, so releasing from a lower level
finishes proportionally sooner.


The State Machine
-----------------

    Idle ──note_on──→ Attack ──level>=1──→ Decay ──level<=S──→ Sustain
     ↑                  │                    │                    │
     │                  └──────note_off──────┴───────────────────→│
     │                                                            ↓
     └────────────────────────level<=0──────────────────────── Release

note_on restarts Attack from zero from ANY stage (retrigger).
note_off enters Release from Attack, Decay or Sustain at the current level.

Transitions are evaluated once per sample, so a short envelope can pass
through several stages inside one block. Every overshoot is clamped to the
stage target, keeping level within [0, 1] at every sample.
*/

/// The current stage of the envelope state machine.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeState {
    #[default]
    Idle, // Inactive, level = 0
    Attack,  // Ramping up to 1.0
    Decay,   // Ramping down to sustain level
    Sustain, // Holding until note_off
    Release, // Ramping down to 0
}

#[derive(Debug, Clone)]
pub struct Envelope {
    attack_rate: f32,
    decay_rate: f32,
    sustain_level: f32,
    release_rate: f32,

    stage: EnvelopeState,
    level: f32,
}

impl Envelope {
    pub fn new() -> Self {
        Self {
            attack_rate: 1.0,
            decay_rate: 1.0,
            sustain_level: 1.0,
            release_rate: 1.0,
            stage: EnvelopeState::Idle,
            level: 0.0,
        }
    }

    /// Build an envelope from stage durations in seconds.
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32, sample_rate: f32) -> Self {
        let mut env = Self::new();
        env.set_times(attack, decay, sustain, release, sample_rate);
        env
    }

    /// Recompute the per-sample rates. Leaves stage and level untouched.
    pub fn set_times(
        &mut self,
        attack: f32,
        decay: f32,
        sustain: f32,
        release: f32,
        sample_rate: f32,
    ) {
        let sample_rate = sample_rate.max(1.0);
        let sustain = sustain.clamp(0.0, 1.0);
        // One sample is the shortest meaningful stage
        let floor = 1.0 / sample_rate;

        self.attack_rate = 1.0 / (attack.max(floor) * sample_rate);
        self.decay_rate = (1.0 - sustain) / (decay.max(floor) * sample_rate);
        self.sustain_level = sustain;
        self.release_rate = 1.0 / (release.max(floor) * sample_rate);
    }

    /// Gate high: restart the attack from zero.
    pub fn note_on(&mut self) {
        self.level = 0.0;
        self.stage = EnvelopeState::Attack;
    }

    /// Gate low: release from the current level.
    pub fn note_off(&mut self) {
        if matches!(
            self.stage,
            EnvelopeState::Attack | EnvelopeState::Decay | EnvelopeState::Sustain
        ) {
            self.stage = EnvelopeState::Release;
        }
    }

    /// Advance the envelope by one sample and return the new level.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeState::Idle => {
                self.level = 0.0;
            }

            EnvelopeState::Attack => {
                self.level += self.attack_rate;
                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeState::Decay;
                }
            }

            EnvelopeState::Decay => {
                self.level -= self.decay_rate;
                if self.level <= self.sustain_level {
                    self.level = self.sustain_level;
                    self.stage = EnvelopeState::Sustain;
                }
            }

            EnvelopeState::Sustain => {}

            EnvelopeState::Release => {
                self.level -= self.release_rate;
                if self.level <= 0.0 {
                    self.level = 0.0;
                    self.stage = EnvelopeState::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of envelope levels into the buffer.
    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Returns true if the envelope is producing output (not idle).
    pub fn is_active(&self) -> bool {
        !matches!(self.stage, EnvelopeState::Idle)
    }

    /// Force idle at zero level.
    pub fn reset(&mut self) {
        self.stage = EnvelopeState::Idle;
        self.level = 0.0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn state(&self) -> EnvelopeState {
        self.stage
    }

    pub fn attack_rate(&self) -> f32 {
        self.attack_rate
    }

    pub fn decay_rate(&self) -> f32 {
        self.decay_rate
    }

    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }

    pub fn release_rate(&self) -> f32 {
        self.release_rate
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self::new()
    }
}
