use thiserror::Error;

/// Configuration and transport failures. The audio path never returns these.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("block size must be at least one sample")]
    InvalidBlockSize,

    #[error("sample rate {sample_rate} Hz needs a {needed}-sample reverb delay, ring holds {capacity}")]
    SampleRateTooHigh {
        sample_rate: f64,
        needed: usize,
        capacity: usize,
    },

    #[error("event queue is full")]
    QueueFull,
}

/// Reasons a preset string was rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PresetError {
    #[error("expected '{expected}' at byte {position}")]
    Expected { expected: char, position: usize },

    #[error("expected key \"{expected}\" at byte {position}")]
    UnexpectedKey {
        expected: &'static str,
        position: usize,
    },

    #[error("value for \"{key}\" is not a finite number")]
    InvalidNumber { key: &'static str },

    #[error("unexpected content after the closing brace at byte {position}")]
    TrailingContent { position: usize },

    #[error("preset ended early")]
    UnexpectedEnd,
}
