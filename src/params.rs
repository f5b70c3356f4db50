//! Global engine parameters.
//!
//! Four continuous controls, all normalized to [0, 1]. Values are clamped on
//! every write so the engine never holds an out-of-range parameter.

use std::fmt;
use std::str::FromStr;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    MasterLevel,
    ReverbMix,
    ReverbRoomSize,
    ReverbDamping,
}

impl ParamId {
    /// In preset and descriptor order.
    pub const ALL: [ParamId; 4] = [
        ParamId::MasterLevel,
        ParamId::ReverbMix,
        ParamId::ReverbRoomSize,
        ParamId::ReverbDamping,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ParamId::MasterLevel => "master_level",
            ParamId::ReverbMix => "reverb_mix",
            ParamId::ReverbRoomSize => "reverb_room_size",
            ParamId::ReverbDamping => "reverb_damping",
        }
    }

    pub fn info(self) -> &'static ParamInfo {
        &PARAMETERS[self as usize]
    }
}

impl fmt::Display for ParamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownParam;

impl FromStr for ParamId {
    type Err = UnknownParam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParamId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or(UnknownParam)
    }
}

/// Static description of one parameter, for hosts and UIs.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamInfo {
    pub id: ParamId,
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
    pub unit: &'static str,
}

pub const PARAMETERS: [ParamInfo; 4] = [
    ParamInfo {
        id: ParamId::MasterLevel,
        name: "Master Level",
        min: 0.0,
        max: 1.0,
        default: 0.8,
        unit: "",
    },
    ParamInfo {
        id: ParamId::ReverbMix,
        name: "Reverb Mix",
        min: 0.0,
        max: 1.0,
        default: 0.15,
        unit: "%",
    },
    ParamInfo {
        id: ParamId::ReverbRoomSize,
        name: "Reverb Room Size",
        min: 0.0,
        max: 1.0,
        default: 0.5,
        unit: "",
    },
    ParamInfo {
        id: ParamId::ReverbDamping,
        name: "Reverb Damping",
        min: 0.0,
        max: 1.0,
        default: 0.5,
        unit: "",
    },
];

/// Current values of the global parameters.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalParams {
    master_level: f32,
    reverb_mix: f32,
    reverb_room_size: f32,
    reverb_damping: f32,
}

impl GlobalParams {
    /// Build from raw values, clamping each into range.
    pub fn new(master_level: f32, reverb_mix: f32, reverb_room_size: f32, reverb_damping: f32) -> Self {
        let mut params = Self::default();
        params.set(ParamId::MasterLevel, master_level);
        params.set(ParamId::ReverbMix, reverb_mix);
        params.set(ParamId::ReverbRoomSize, reverb_room_size);
        params.set(ParamId::ReverbDamping, reverb_damping);
        params
    }

    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::MasterLevel => self.master_level,
            ParamId::ReverbMix => self.reverb_mix,
            ParamId::ReverbRoomSize => self.reverb_room_size,
            ParamId::ReverbDamping => self.reverb_damping,
        }
    }

    /// Clamp into [0, 1] and store. Non-finite values are ignored.
    pub fn set(&mut self, id: ParamId, value: f32) {
        if !value.is_finite() {
            return;
        }
        let info = id.info();
        let value = value.clamp(info.min, info.max);
        match id {
            ParamId::MasterLevel => self.master_level = value,
            ParamId::ReverbMix => self.reverb_mix = value,
            ParamId::ReverbRoomSize => self.reverb_room_size = value,
            ParamId::ReverbDamping => self.reverb_damping = value,
        }
    }

    pub fn master_level(&self) -> f32 {
        self.master_level
    }

    pub fn reverb_mix(&self) -> f32 {
        self.reverb_mix
    }

    pub fn reverb_room_size(&self) -> f32 {
        self.reverb_room_size
    }

    pub fn reverb_damping(&self) -> f32 {
        self.reverb_damping
    }
}

impl Default for GlobalParams {
    fn default() -> Self {
        Self {
            master_level: PARAMETERS[0].default,
            reverb_mix: PARAMETERS[1].default,
            reverb_room_size: PARAMETERS[2].default,
            reverb_damping: PARAMETERS[3].default,
        }
    }
}
