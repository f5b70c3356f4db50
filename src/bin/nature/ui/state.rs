//! UI-side state
//!
//! The audio thread owns the engine. The UI keeps its own copy of what it
//! has asked for (held notes, parameter values) and reads the voice count
//! through the engine handle.

use std::path::PathBuf;

use nature_dsp::sounds::SoundFamily;
use nature_dsp::synth::map_note;
use nature_dsp::GlobalParams;

use crate::keymap::FAMILY_BASE_NOTES;

pub struct UiState {
    /// Index into `FAMILY_BASE_NOTES`
    pub family_slot: usize,
    /// Notes the UI has started and not yet released
    pub held: [bool; 128],
    pub params: GlobalParams,
    pub sample_rate: f32,
    pub preset_dir: PathBuf,
    /// Last message shown in the status line
    pub status: String,
}

impl UiState {
    pub fn new(sample_rate: f32, preset_dir: PathBuf) -> Self {
        Self {
            family_slot: 0,
            held: [false; 128],
            params: GlobalParams::default(),
            sample_rate,
            preset_dir,
            status: String::new(),
        }
    }

    pub fn family(&self) -> SoundFamily {
        map_note(self.base_note()).0
    }

    pub fn base_note(&self) -> u8 {
        FAMILY_BASE_NOTES[self.family_slot]
    }

    pub fn note_for_variant(&self, variant: usize) -> u8 {
        self.base_note() + variant as u8
    }

    /// Held notes with the family and variant name each plays.
    pub fn held_sounds(&self) -> impl Iterator<Item = (u8, SoundFamily, &'static str)> + '_ {
        self.held
            .iter()
            .enumerate()
            .filter(|(_, &held)| held)
            .map(|(note, _)| {
                let (family, variant) = map_note(note as u8);
                (note as u8, family, family.variant_name(variant))
            })
    }
}
