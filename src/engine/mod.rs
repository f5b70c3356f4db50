//! The engine: voice pool, sound families, global parameters and reverb,
//! driven one host block at a time.
//!
//! ```text
//!   EngineHandle ──rtrb──┐
//!                        ▼
//!   handle_event ──→ [VoicePool] ──→ per active voice:
//!                                      SoundBank.process   (family, variant)
//!                                      × envelope levels   (per sample)
//!                                      ──→ Σ mix
//!                                   ──→ × master_level ──→ CombReverb ──→ out
//! ```
//!
//! Everything the audio path touches is allocated in [`NatureEngine::new`]
//! and [`NatureEngine::prepare`]. `process` never allocates, locks or logs;
//! host blocks longer than the prepared block size are rendered in chunks.

pub mod allocator;
pub mod config;
#[cfg(feature = "rtrb")]
pub mod handle;

use log::{debug, info, warn};

use self::allocator::VoicePool;
use self::config::EngineConfig;
use crate::dsp::envelope::Envelope;
use crate::dsp::reverb::{CombReverb, REVERB_RING_LEN};
use crate::dsp::NoiseSource;
use crate::error::{EngineError, PresetError};
use crate::io::{midi_to_event, MidiEvent};
use crate::params::{GlobalParams, ParamId, ParamInfo, PARAMETERS};
use crate::patch::Preset;
use crate::sounds::{SoundBank, StereoBlock};
use crate::synth::{map_note, EventReceiver, SynthEvent, Voice};
use crate::MAX_VOICES;

#[cfg(feature = "rtrb")]
use self::handle::EngineHandle;

/// Sample rate assumed until `prepare` is called.
const DEFAULT_SAMPLE_RATE: f64 = 48_000.0;

pub struct NatureEngine {
    config: EngineConfig,
    params: GlobalParams,
    pool: VoicePool,
    sounds: SoundBank,
    reverb: CombReverb,
    rng: NoiseSource,
    events: Option<Box<dyn EventReceiver + Send>>,

    sample_rate: f64,
    block_size: usize,
    prepared: bool,

    // Scratch, sized at prepare
    voice_left: Vec<f32>,
    voice_right: Vec<f32>,
    levels: Vec<f32>,
    mix_left: Vec<f32>,
    mix_right: Vec<f32>,
}

impl NatureEngine {
    pub fn new(config: EngineConfig) -> Self {
        let env = config.envelope;
        let envelope = Envelope::adsr(
            env.attack_secs,
            env.decay_secs,
            env.sustain,
            env.release_secs,
            DEFAULT_SAMPLE_RATE as f32,
        );

        Self {
            params: config.initial_params,
            pool: VoicePool::new(envelope),
            sounds: SoundBank::new(DEFAULT_SAMPLE_RATE as f32),
            reverb: CombReverb::new(DEFAULT_SAMPLE_RATE),
            rng: NoiseSource::new(config.seed),
            events: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            block_size: 0,
            prepared: false,
            voice_left: Vec::new(),
            voice_right: Vec::new(),
            levels: Vec::new(),
            mix_left: Vec::new(),
            mix_right: Vec::new(),
            config,
        }
    }

    /// Build an engine that drains events from `receiver` at every block.
    pub fn with_receiver<R>(config: EngineConfig, receiver: R) -> Self
    where
        R: EventReceiver + Send + 'static,
    {
        let mut engine = Self::new(config);
        engine.events = Some(Box::new(receiver));
        engine
    }

    /// Build an engine together with a handle that feeds it events.
    #[cfg(feature = "rtrb")]
    pub fn with_event_queue(config: EngineConfig) -> (Self, EngineHandle) {
        let capacity = config.event_queue_capacity.max(1);
        let (tx, rx) = rtrb::RingBuffer::<SynthEvent>::new(capacity);
        let engine = Self::with_receiver(config, rx);
        let handle = EngineHandle::new(tx, engine.pool.counter());
        (engine, handle)
    }

    /// Configure for a sample rate and maximum block size.
    ///
    /// On error nothing changes. On success all voices and tails are cleared.
    pub fn prepare(&mut self, sample_rate: f64, block_size: usize) -> Result<(), EngineError> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(EngineError::InvalidSampleRate(sample_rate));
        }
        if block_size == 0 {
            return Err(EngineError::InvalidBlockSize);
        }
        if !CombReverb::supports_sample_rate(sample_rate) {
            return Err(EngineError::SampleRateTooHigh {
                sample_rate,
                needed: CombReverb::longest_delay(sample_rate),
                capacity: REVERB_RING_LEN,
            });
        }

        let env = self.config.envelope;
        self.pool.set_envelope_times(
            env.attack_secs,
            env.decay_secs,
            env.sustain,
            env.release_secs,
            sample_rate as f32,
        );
        self.sounds.prepare(sample_rate as f32);
        self.reverb.configure(sample_rate);
        self.pool.panic();

        self.voice_left = vec![0.0; block_size];
        self.voice_right = vec![0.0; block_size];
        self.levels = vec![0.0; block_size];
        self.mix_left = vec![0.0; block_size];
        self.mix_right = vec![0.0; block_size];

        self.sample_rate = sample_rate;
        self.block_size = block_size;
        self.prepared = true;

        info!(
            "prepared at {sample_rate} Hz, block size {block_size}, reverb delays {:?}",
            self.reverb.delay_lengths()
        );
        Ok(())
    }

    /// Silence voices, sound family state and the reverb tail.
    pub fn reset(&mut self) {
        self.pool.panic();
        self.sounds.reset();
        self.reverb.reset();
        self.rng.reseed();
        debug!("engine reset");
    }

    /// Render `num_samples` into every channel of `outputs`.
    ///
    /// Channels 0 and 1 carry audio (a single channel gets a mono mix),
    /// further channels are cleared. The count is bounded by the shortest
    /// channel.
    pub fn process(&mut self, outputs: &mut [&mut [f32]], num_samples: usize) {
        let frames = outputs
            .iter()
            .map(|ch| ch.len())
            .fold(num_samples, usize::min);
        if frames == 0 || outputs.is_empty() {
            return;
        }

        for channel in outputs.iter_mut() {
            channel[..frames].fill(0.0);
        }
        if !self.prepared {
            return;
        }
        self.drain_events();

        let stereo = outputs.len() >= 2;
        let mut start = 0;
        while start < frames {
            let len = (frames - start).min(self.block_size);
            self.render_chunk(len, stereo);

            outputs[0][start..start + len].copy_from_slice(&self.mix_left[..len]);
            if stereo {
                outputs[1][start..start + len].copy_from_slice(&self.mix_right[..len]);
            }
            start += len;
        }
    }

    /// Render into an interleaved buffer of `channels` channels.
    pub fn process_interleaved(&mut self, out: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        let frames = out.len() / channels;
        out.fill(0.0);
        if frames == 0 || !self.prepared {
            return;
        }
        self.drain_events();

        let stereo = channels >= 2;
        let mut start = 0;
        while start < frames {
            let len = (frames - start).min(self.block_size);
            self.render_chunk(len, stereo);

            let frames_out = out[start * channels..(start + len) * channels].chunks_exact_mut(channels);
            for (i, frame) in frames_out.enumerate() {
                frame[0] = self.mix_left[i];
                if stereo {
                    frame[1] = self.mix_right[i];
                }
            }
            start += len;
        }
    }

    fn drain_events(&mut self) {
        if let Some(mut events) = self.events.take() {
            while let Some(event) = events.pop() {
                self.handle_event(event);
            }
            self.events = Some(events);
        }
    }

    /// Mix every active voice into the mix scratch, then master and reverb.
    fn render_chunk(&mut self, len: usize, stereo: bool) {
        let mix_left = &mut self.mix_left[..len];
        let mix_right = &mut self.mix_right[..len];
        mix_left.fill(0.0);
        mix_right.fill(0.0);

        for index in 0..MAX_VOICES {
            let voice = self.pool.voice(index);
            if !voice.is_active() {
                continue;
            }
            let (family, variant, velocity) = (voice.family(), voice.variant(), voice.velocity());

            let voice_left = &mut self.voice_left[..len];
            let voice_right = &mut self.voice_right[..len];
            voice_left.fill(0.0);
            voice_right.fill(0.0);
            let mut block = StereoBlock::new(voice_left, voice_right);
            self.sounds
                .process(family, &mut block, variant, velocity, velocity, &mut self.rng);

            let levels = &mut self.levels[..len];
            self.pool.advance_envelope(index, levels);

            for i in 0..len {
                mix_left[i] += self.voice_left[i] * levels[i];
                mix_right[i] += self.voice_right[i] * levels[i];
            }
        }

        let master = self.params.master_level();
        let mix = self.params.reverb_mix();
        let room = self.params.reverb_room_size();
        let damping = self.params.reverb_damping();

        if stereo {
            for (l, r) in mix_left.iter_mut().zip(mix_right.iter_mut()) {
                *l *= master;
                *r *= master;
            }
            self.reverb
                .process_stereo(mix_left, mix_right, mix, room, damping);
        } else {
            for l in mix_left.iter_mut() {
                *l *= master;
            }
            self.reverb.process_mono(mix_left, mix, room, damping);
        }
    }

    pub fn handle_event(&mut self, event: SynthEvent) {
        match event {
            SynthEvent::NoteOn { note, velocity } => {
                let velocity = if velocity.is_finite() {
                    velocity.clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let (family, variant) = map_note(note);
                self.pool.note_on(note, velocity, family, variant);
            }
            SynthEvent::NoteOff { note } => self.pool.note_off(note),
            SynthEvent::ParamChange { param, value } => self.params.set(param, value),
            SynthEvent::PitchBend { .. } | SynthEvent::ChannelPressure { .. } => {}
            SynthEvent::Reset => self.panic(),
        }
    }

    /// Decode raw MIDI bytes and apply the resulting event, if any.
    pub fn handle_midi(&mut self, bytes: &[u8]) {
        if let Some(event) = MidiEvent::parse(bytes).and_then(midi_to_event) {
            self.handle_event(event);
        }
    }

    /// Value of the named parameter; unknown ids read as 0.
    pub fn get_parameter(&self, id: &str) -> f32 {
        id.parse::<ParamId>()
            .map(|param| self.params.get(param))
            .unwrap_or(0.0)
    }

    /// Set the named parameter, clamped into range. Unknown ids are ignored.
    pub fn set_parameter(&mut self, id: &str, value: f32) {
        if let Ok(param) = id.parse::<ParamId>() {
            self.params.set(param, value);
        }
    }

    pub fn params(&self) -> &GlobalParams {
        &self.params
    }

    pub fn parameter_count(&self) -> usize {
        PARAMETERS.len()
    }

    pub fn parameter_info(&self, index: usize) -> Option<&'static ParamInfo> {
        PARAMETERS.get(index)
    }

    pub fn save_preset(&self) -> String {
        Preset::from_params(&self.params).to_text()
    }

    /// Apply a preset. A rejected preset leaves every parameter untouched.
    pub fn load_preset(&mut self, text: &str) -> Result<(), PresetError> {
        let preset = Preset::parse(text).inspect_err(|err| warn!("rejected preset: {err}"))?;
        self.params = preset.to_params();
        Ok(())
    }

    /// Parse a preset without applying it.
    pub fn validate_preset(&self, text: &str) -> Result<Preset, PresetError> {
        Preset::parse(text)
    }

    pub fn active_voice_count(&self) -> usize {
        self.pool.active_count()
    }

    pub fn max_polyphony(&self) -> usize {
        MAX_VOICES
    }

    /// Silence every voice immediately. The reverb tail rings out.
    pub fn panic(&mut self) {
        self.pool.panic();
    }

    pub fn latency_samples(&self) -> usize {
        0
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn voices(&self) -> &[Voice] {
        self.pool.voices()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl Default for NatureEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::envelope::EnvelopeState;

    fn prepared() -> NatureEngine {
        let mut engine = NatureEngine::default();
        engine.prepare(48_000.0, 256).unwrap();
        engine
    }

    fn render(engine: &mut NatureEngine, frames: usize) -> (Vec<f32>, Vec<f32>) {
        let mut left = vec![0.0f32; frames];
        let mut right = vec![0.0f32; frames];
        engine.process(&mut [&mut left[..], &mut right[..]], frames);
        (left, right)
    }

    #[test]
    fn prepare_rejects_bad_configuration() {
        let mut engine = NatureEngine::default();
        assert_eq!(
            engine.prepare(0.0, 256),
            Err(EngineError::InvalidSampleRate(0.0))
        );
        assert!(matches!(
            engine.prepare(f64::NAN, 256),
            Err(EngineError::InvalidSampleRate(_))
        ));
        assert_eq!(engine.prepare(48_000.0, 0), Err(EngineError::InvalidBlockSize));
        assert!(matches!(
            engine.prepare(800_000.0, 256),
            Err(EngineError::SampleRateTooHigh { .. })
        ));
        assert!(!engine.is_prepared());
    }

    #[test]
    fn failed_prepare_keeps_previous_state() {
        let mut engine = prepared();
        engine.handle_event(SynthEvent::note_on(60, 1.0));
        assert!(engine.prepare(-1.0, 64).is_err());
        assert_eq!(engine.sample_rate(), 48_000.0);
        assert_eq!(engine.block_size(), 256);
        assert_eq!(engine.active_voice_count(), 1);
    }

    #[test]
    fn unprepared_engine_is_silent() {
        let mut engine = NatureEngine::default();
        engine.handle_event(SynthEvent::note_on(60, 1.0));
        let mut left = vec![1.0f32; 64];
        let mut right = vec![1.0f32; 64];
        engine.process(&mut [&mut left[..], &mut right[..]], 64);
        assert!(left.iter().chain(&right).all(|&s| s == 0.0));
    }

    #[test]
    fn zero_samples_is_a_noop() {
        let mut engine = prepared();
        let mut left = vec![3.0f32; 8];
        let mut right = vec![3.0f32; 8];
        engine.process(&mut [&mut left[..], &mut right[..]], 0);
        assert!(left.iter().all(|&s| s == 3.0));
    }

    #[test]
    fn no_voices_no_output() {
        let mut engine = prepared();
        let (left, right) = render(&mut engine, 1024);
        assert!(left.iter().chain(&right).all(|&s| s == 0.0));
    }

    #[test]
    fn note_produces_sound_and_release_frees_the_voice() {
        let mut engine = prepared();
        engine.handle_event(SynthEvent::note_on(66, 1.0));
        let (left, _) = render(&mut engine, 4800);
        assert!(left.iter().any(|&s| s.abs() > 1e-3));
        assert_eq!(engine.active_voice_count(), 1);

        engine.handle_event(SynthEvent::note_off(66));
        assert_eq!(engine.voices()[0].state(), EnvelopeState::Release);

        // 500 ms release at 48 kHz
        render(&mut engine, 24_500);
        assert_eq!(engine.active_voice_count(), 0);
        assert_eq!(engine.voices()[0].state(), EnvelopeState::Idle);
    }

    #[test]
    fn polyphony_is_capped() {
        let mut engine = prepared();
        for note in 36..72 {
            engine.handle_event(SynthEvent::note_on(note, 0.7));
            assert!(engine.active_voice_count() <= MAX_VOICES);
        }
        assert_eq!(engine.active_voice_count(), MAX_VOICES);
    }

    #[test]
    fn reset_event_silences_voices() {
        let mut engine = prepared();
        for note in 60..64 {
            engine.handle_event(SynthEvent::note_on(note, 1.0));
        }
        engine.handle_event(SynthEvent::Reset);
        assert_eq!(engine.active_voice_count(), 0);
        assert!(engine.voices().iter().all(|v| v.level() == 0.0));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut engine = prepared();
        engine.handle_event(SynthEvent::note_on(40, 1.0));
        render(&mut engine, 512);
        engine.reset();
        engine.reset();
        assert_eq!(engine.active_voice_count(), 0);
        let (left, right) = render(&mut engine, 512);
        assert!(left.iter().chain(&right).all(|&s| s == 0.0));
    }

    #[test]
    fn parameters_by_name() {
        let mut engine = prepared();
        engine.set_parameter("reverb_mix", 2.0);
        assert_eq!(engine.get_parameter("reverb_mix"), 1.0);
        engine.set_parameter("reverb_mix", -2.0);
        assert_eq!(engine.get_parameter("reverb_mix"), 0.0);
        engine.set_parameter("nonsense", 0.3);
        assert_eq!(engine.get_parameter("nonsense"), 0.0);
        assert_eq!(engine.parameter_count(), 4);
        assert_eq!(engine.parameter_info(0).map(|p| p.id), Some(ParamId::MasterLevel));
        assert!(engine.parameter_info(4).is_none());
    }

    #[test]
    fn bad_preset_leaves_parameters_alone() {
        let mut engine = prepared();
        engine.set_parameter("master_level", 0.3);
        let before = *engine.params();
        assert!(engine.load_preset("{\"master_level\":1.0}").is_err());
        assert_eq!(*engine.params(), before);
    }

    #[test]
    fn pitch_bend_and_pressure_are_inert() {
        let mut a = prepared();
        let mut b = prepared();
        for engine in [&mut a, &mut b] {
            engine.handle_event(SynthEvent::note_on(62, 0.8));
        }
        b.handle_event(SynthEvent::PitchBend { amount: 1.0 });
        b.handle_event(SynthEvent::ChannelPressure { pressure: 0.5 });
        assert_eq!(render(&mut a, 1024), render(&mut b, 1024));
    }

    #[test]
    fn long_host_blocks_are_chunked() {
        let mut chunked = NatureEngine::default();
        chunked.prepare(48_000.0, 64).unwrap();
        let mut whole = NatureEngine::default();
        whole.prepare(48_000.0, 64).unwrap();

        for engine in [&mut chunked, &mut whole] {
            engine.handle_event(SynthEvent::note_on(60, 0.9));
        }
        let (one, _) = render(&mut whole, 1000);
        let mut pieces = Vec::new();
        for _ in 0..10 {
            pieces.extend(render(&mut chunked, 100).0);
        }
        assert_eq!(one.len(), pieces.len());
        for (a, b) in one.iter().zip(&pieces) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn mono_and_extra_channels() {
        let mut engine = prepared();
        engine.handle_event(SynthEvent::note_on(62, 1.0));

        let mut mono = vec![0.0f32; 512];
        engine.process(&mut [&mut mono[..]], 512);
        assert!(mono.iter().any(|&s| s != 0.0));

        let mut l = vec![0.0f32; 256];
        let mut r = vec![0.0f32; 256];
        let mut aux = vec![9.0f32; 256];
        engine.process(&mut [&mut l[..], &mut r[..], &mut aux[..]], 256);
        assert!(aux.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn interleaved_matches_planar() {
        let mut planar = prepared();
        let mut interleaved = prepared();
        for engine in [&mut planar, &mut interleaved] {
            engine.handle_event(SynthEvent::note_on(50, 0.6));
        }
        let (left, right) = render(&mut planar, 300);
        let mut buf = vec![0.0f32; 600];
        interleaved.process_interleaved(&mut buf, 2);
        for i in 0..300 {
            assert_eq!(buf[2 * i], left[i]);
            assert_eq!(buf[2 * i + 1], right[i]);
        }
    }

    #[test]
    fn handle_midi_drives_voices() {
        let mut engine = prepared();
        engine.handle_midi(&[0x90, 48, 127]);
        assert_eq!(engine.active_voice_count(), 1);
        engine.handle_midi(&[0x90, 48, 0]);
        assert_eq!(engine.voices()[0].state(), EnvelopeState::Release);
        engine.handle_midi(&[0xB0, 123, 0]);
        assert_eq!(engine.active_voice_count(), 0);
    }
}
