//! Computer keyboard to engine actions
//!
//! ```text
//!   1 2 3 4 5 6      pick family (water, wind, insect, amphibian, bird, mammal)
//!   z x c v b n      toggle variant 0-5 of the current family
//!   - =              master level
//!   [ ]              reverb mix
//!   ; '              reverb room size
//!   , .              reverb damping
//!   space            panic
//!   s                save preset
//!   q / esc          quit
//! ```

use crossterm::event::KeyCode;

use nature_dsp::ParamId;

/// Lowest note of each half-octave band, in the order of the number keys.
pub const FAMILY_BASE_NOTES: [u8; 6] = [36, 42, 48, 54, 60, 66];

const VARIANT_KEYS: [char; 6] = ['z', 'x', 'c', 'v', 'b', 'n'];
const PARAM_STEP: f32 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SelectFamily(usize),
    ToggleVariant(usize),
    Nudge(ParamId, f32),
    Panic,
    SavePreset,
    Quit,
}

pub fn action_for(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'q' => Action::Quit,
            ' ' => Action::Panic,
            's' => Action::SavePreset,
            '1'..='6' => Action::SelectFamily(c as usize - '1' as usize),
            '-' => Action::Nudge(ParamId::MasterLevel, -PARAM_STEP),
            '=' => Action::Nudge(ParamId::MasterLevel, PARAM_STEP),
            '[' => Action::Nudge(ParamId::ReverbMix, -PARAM_STEP),
            ']' => Action::Nudge(ParamId::ReverbMix, PARAM_STEP),
            ';' => Action::Nudge(ParamId::ReverbRoomSize, -PARAM_STEP),
            '\'' => Action::Nudge(ParamId::ReverbRoomSize, PARAM_STEP),
            ',' => Action::Nudge(ParamId::ReverbDamping, -PARAM_STEP),
            '.' => Action::Nudge(ParamId::ReverbDamping, PARAM_STEP),
            c => {
                let variant = VARIANT_KEYS.iter().position(|&k| k == c)?;
                Action::ToggleVariant(variant)
            }
        },
        _ => return None,
    };
    Some(action)
}
