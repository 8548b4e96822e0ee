//! Scheduler tokio para `StepSequencer`.

mod driver;

pub use driver::SequenceDriver;
