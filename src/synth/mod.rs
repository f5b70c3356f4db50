// Purpose: Voices, the event protocol, and how notes pick a sound
// This layer sits above the sound families and below the engine

pub mod mapping;
pub mod message;
pub mod voice;

pub use mapping::map_note;
pub use message::{EventReceiver, SynthEvent};
pub use voice::Voice;
