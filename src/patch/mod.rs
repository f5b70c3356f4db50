//! Preset text format.
//!
//! A preset is a single flat JSON object holding the four global parameters
//! in a fixed order:
//!
//! ```text
//! {"master_level":0.800000,"reverb_mix":0.150000,"reverb_room_size":0.500000,"reverb_damping":0.500000}
//! ```
//!
//! Writing always produces exactly that shape with six decimals. Reading
//! accepts whitespace between tokens but nothing else: every key once, in
//! order, finite numbers, nothing after the closing brace. Parsing is all or
//! nothing, a rejected preset never changes the engine.

use std::fmt::Write;

use crate::error::PresetError;
use crate::params::{GlobalParams, ParamId};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub master_level: f32,
    pub reverb_mix: f32,
    pub reverb_room_size: f32,
    pub reverb_damping: f32,
}

impl Preset {
    pub fn from_params(params: &GlobalParams) -> Self {
        Self {
            master_level: params.master_level(),
            reverb_mix: params.reverb_mix(),
            reverb_room_size: params.reverb_room_size(),
            reverb_damping: params.reverb_damping(),
        }
    }

    /// The parameters this preset sets, clamped into range.
    pub fn to_params(&self) -> GlobalParams {
        GlobalParams::new(
            self.master_level,
            self.reverb_mix,
            self.reverb_room_size,
            self.reverb_damping,
        )
    }

    fn value(&self, id: ParamId) -> f32 {
        match id {
            ParamId::MasterLevel => self.master_level,
            ParamId::ReverbMix => self.reverb_mix,
            ParamId::ReverbRoomSize => self.reverb_room_size,
            ParamId::ReverbDamping => self.reverb_damping,
        }
    }

    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(112);
        text.push('{');
        for (i, id) in ParamId::ALL.into_iter().enumerate() {
            if i > 0 {
                text.push(',');
            }
            // Writing into a String cannot fail
            let _ = write!(text, "\"{}\":{:.6}", id.as_str(), self.value(id));
        }
        text.push('}');
        text
    }

    pub fn parse(text: &str) -> Result<Self, PresetError> {
        let mut cursor = Cursor::new(text);
        let mut values = [0.0f32; 4];

        cursor.expect('{')?;
        for (i, id) in ParamId::ALL.into_iter().enumerate() {
            if i > 0 {
                cursor.expect(',')?;
            }
            cursor.expect_key(id.as_str())?;
            cursor.expect(':')?;
            values[i] = cursor.number(id.as_str())?;
        }
        cursor.expect('}')?;
        cursor.finish()?;

        Ok(Self {
            master_level: values[0],
            reverb_mix: values[1],
            reverb_room_size: values[2],
            reverb_damping: values[3],
        })
    }
}

impl From<GlobalParams> for Preset {
    fn from(params: GlobalParams) -> Self {
        Self::from_params(&params)
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, token: char) -> Result<(), PresetError> {
        self.skip_whitespace();
        match self.bytes.get(self.pos) {
            Some(&b) if b as char == token => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(PresetError::Expected {
                expected: token,
                position: self.pos,
            }),
            None => Err(PresetError::UnexpectedEnd),
        }
    }

    fn expect_key(&mut self, key: &'static str) -> Result<(), PresetError> {
        self.skip_whitespace();
        let start = self.pos;
        let quoted_len = key.len() + 2;
        let Some(found) = self.bytes.get(start..start + quoted_len) else {
            return Err(PresetError::UnexpectedEnd);
        };
        let matches = found[0] == b'"'
            && found[quoted_len - 1] == b'"'
            && &found[1..quoted_len - 1] == key.as_bytes();
        if !matches {
            return Err(PresetError::UnexpectedKey {
                expected: key,
                position: start,
            });
        }
        self.pos += quoted_len;
        Ok(())
    }

    fn number(&mut self, key: &'static str) -> Result<f32, PresetError> {
        self.skip_whitespace();
        let start = self.pos;
        while self.pos < self.bytes.len()
            && matches!(self.bytes[self.pos], b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return if self.pos == self.bytes.len() {
                Err(PresetError::UnexpectedEnd)
            } else {
                Err(PresetError::InvalidNumber { key })
            };
        }

        // The scanned range is ASCII, so it is valid UTF-8
        let literal = std::str::from_utf8(&self.bytes[start..self.pos])
            .map_err(|_| PresetError::InvalidNumber { key })?;
        match literal.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(PresetError::InvalidNumber { key }),
        }
    }

    fn finish(&mut self) -> Result<(), PresetError> {
        self.skip_whitespace();
        if self.pos == self.bytes.len() {
            Ok(())
        } else {
            Err(PresetError::TrailingContent { position: self.pos })
        }
    }
}
