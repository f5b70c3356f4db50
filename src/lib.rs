pub mod dsp;
pub mod engine; // Orchestrator, voice pool, event handle
pub mod error;
pub mod io;
pub mod params; // Global parameters and their descriptors
pub mod patch; // Preset text format
pub mod sounds; // The six procedural sound families
pub mod synth; // Voices, event protocol, note mapping

pub use engine::{config::EngineConfig, NatureEngine};
#[cfg(feature = "rtrb")]
pub use engine::handle::EngineHandle;
pub use error::{EngineError, PresetError};
pub use params::{GlobalParams, ParamId};
pub use synth::message::SynthEvent;

/// Fixed polyphony of the engine.
pub const MAX_VOICES: usize = 16;
/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
