//! Sample generation and run orchestration

pub mod generator;
pub mod orchestrator;
pub mod sample;

pub use generator::SampleGenerator;
pub use orchestrator::{BatchResults, Orchestrator, RunResults};
pub use sample::Sample;
