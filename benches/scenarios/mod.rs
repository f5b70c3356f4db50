//! Scenario benchmarks.
//!
//! One family module rendering each of its variants, and the whole engine
//! with a full voice pool.

mod engine;
mod sounds;

pub use engine::bench_engine;
pub use sounds::bench_sounds;
