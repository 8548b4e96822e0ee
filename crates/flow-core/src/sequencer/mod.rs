//! `StepSequencer`: máquina de estados `Idle -> Running -> Done`.
//!
//! Provee el secuenciador, su builder y el contrato de observadores que usa
//! la capa de presentación para re-renderizar.

mod builder;
mod core;
mod observer;

pub use builder::SequenceBuilder;
pub use core::{StepSequencer, TickOutcome, TimerTicket};
pub use observer::StateObserver;
