//! Note number to sound selection.
//!
//! The playable range is three octaves from C2 (36) to B4 (71). Each octave
//! is split in half and each half-octave belongs to one family; the offset
//! inside the half is the variant index.
//!
//! ```text
//!   36 ..= 41   Water       variant = note - 36
//!   42 ..= 47   Wind        variant = note - 42
//!   48 ..= 53   Insect      variant = note - 48
//!   54 ..= 59   Amphibian   variant = note - 54
//!   60 ..= 65   Bird        variant = note - 60
//!   66 ..= 71   Mammal      variant = note - 66
//!   otherwise   Water, variant 0
//! ```
//!
//! The variant index is returned raw. Families with fewer than six variants
//! render their default for the upper keys of their half-octave.

use crate::sounds::SoundFamily;

pub fn map_note(note: u8) -> (SoundFamily, usize) {
    let n = note as usize;
    match note {
        36..=41 => (SoundFamily::Water, n - 36),
        42..=47 => (SoundFamily::Wind, n - 42),
        48..=53 => (SoundFamily::Insect, n - 48),
        54..=59 => (SoundFamily::Amphibian, n - 54),
        60..=65 => (SoundFamily::Bird, n - 60),
        66..=71 => (SoundFamily::Mammal, n - 66),
        _ => (SoundFamily::Water, 0),
    }
}
