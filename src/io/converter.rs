use crate::{io::midi::MidiEvent, synth::message::SynthEvent};

const ALL_SOUND_OFF: u8 = 120;
const ALL_NOTES_OFF: u8 = 123;

/// Map a MIDI message onto an engine event. All channels are accepted.
pub fn midi_to_event(midi: MidiEvent) -> Option<SynthEvent> {
    match midi {
        MidiEvent::NoteOn { key, velocity: 0, .. } => Some(SynthEvent::NoteOff { note: key }),
        MidiEvent::NoteOn { key, velocity, .. } => Some(SynthEvent::NoteOn {
            note: key,
            velocity: velocity as f32 / 127.0,
        }),
        MidiEvent::NoteOff { key, .. } => Some(SynthEvent::NoteOff { note: key }),
        MidiEvent::PitchBend { value, .. } => Some(SynthEvent::PitchBend {
            amount: value as f32 / 8192.0,
        }),
        MidiEvent::ChannelPressure { pressure, .. } => Some(SynthEvent::ChannelPressure {
            pressure: pressure as f32 / 127.0,
        }),
        MidiEvent::ControlChange {
            controller: ALL_SOUND_OFF | ALL_NOTES_OFF,
            ..
        } => Some(SynthEvent::Reset),
        MidiEvent::ControlChange { .. } | MidiEvent::ProgramChange { .. } => None,
    }
}
