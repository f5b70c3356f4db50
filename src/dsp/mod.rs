//! Low-level DSP primitives used by the sound families and the engine.
//!
//! These components are allocation-free and realtime-safe once constructed,
//! making them safe to embed directly inside synthesis modules. They stay
//! focused on the signal-processing math; the `sounds` modules layer the
//! per-variant recipes on top.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// One-pole lowpass and resonant two-pole bandpass.
pub mod filter;
/// Deterministic white-noise source shared by every sound family.
pub mod noise;
/// Phase accumulators and waveform helpers.
pub mod oscillator;
/// Eight-line parallel comb reverb.
pub mod reverb;

pub use envelope::EnvelopeState;
pub use noise::NoiseSource;
