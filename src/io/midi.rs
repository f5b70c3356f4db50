/// A decoded channel voice message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    PitchBend { channel: u8, value: i16 },
    ProgramChange { channel: u8, program: u8 },
    ChannelPressure { channel: u8, pressure: u8 },
}

impl MidiEvent {
    /// Decode one complete message. System and incomplete messages yield
    /// `None`; data bytes are masked to 7 bits.
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        if status < 0x80 {
            return None;
        }
        let channel = status & 0x0F;
        let data1 = || data.first().map(|b| b & 0x7F);
        let data2 = || data.get(1).map(|b| b & 0x7F);

        let event = match status & 0xF0 {
            0x80 => MidiEvent::NoteOff {
                channel,
                key: data1()?,
                velocity: data2()?,
            },
            0x90 => MidiEvent::NoteOn {
                channel,
                key: data1()?,
                velocity: data2()?,
            },
            0xB0 => MidiEvent::ControlChange {
                channel,
                controller: data1()?,
                value: data2()?,
            },
            0xC0 => MidiEvent::ProgramChange {
                channel,
                program: data1()?,
            },
            0xD0 => MidiEvent::ChannelPressure {
                channel,
                pressure: data1()?,
            },
            0xE0 => {
                // 14-bit value, LSB first; centered at 8192
                let raw = ((data2()? as i16) << 7) | data1()? as i16;
                MidiEvent::PitchBend {
                    channel,
                    value: raw - 8192,
                }
            }
            _ => return None,
        };
        Some(event)
    }
}
