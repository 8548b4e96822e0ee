//! flow-core: secuenciador determinista de pasos simulados.
//!
//! Modela un pipeline ordenado de pasos que avanzan `Idle -> Running -> Done`
//! con ejecución serializada (a lo sumo un paso en curso), reproducción de
//! progreso/log por ticks y un registro de eventos append-only que permite
//! reconstruir el estado (replay). No hay temporizadores reales aquí: un
//! scheduler externo llama a `tick` con la cadencia indicada en el `TimerTicket`.
pub mod constants;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod repo;
pub mod sampling;
pub mod sequencer;
pub mod step;

pub use errors::{ConfigIssue, SequencerError};
pub use event::{EventStore, InMemoryEventStore, SequenceEvent, SequenceEventKind};
pub use repo::{build_sequence_definition, InMemorySequenceRepository, SequenceDefinition, SequenceRepository};
pub use sampling::{ConstantSampler, MetricPolicy, MetricSample, MetricSampler, ScriptedSampler};
pub use sequencer::{SequenceBuilder, StateObserver, StepSequencer, TickOutcome, TimerTicket};
pub use step::{Playback, Playhead, SequenceState, StepSlot, StepSpec, StepStatus};
