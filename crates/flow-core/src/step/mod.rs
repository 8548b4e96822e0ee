//! Definiciones relacionadas a Steps.
//!
//! Un Step es una etapa nombrada de un pipeline simulado. Su "cómputo" es
//! únicamente una reproducción temporal: un número fijo de ticks, cada uno
//! avanzando un contador de progreso y revelando líneas de log. Este módulo
//! define:
//! - `StepSpec`: descripción inmutable del paso y de su `Playback`.
//! - `StepStatus`: estado en tiempo de ejecución (`Idle`, `Running`, `Done`).
//! - `SequenceState`: snapshot renderizable de toda la secuencia.

mod spec;
mod state;
mod status;

pub use spec::{Playback, StepSpec};
pub use state::{Playhead, SequenceState, StepSlot};
pub use status::StepStatus;
