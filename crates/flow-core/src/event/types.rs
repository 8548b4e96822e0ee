//! Tipos de evento de la secuencia y estructura `SequenceEvent`.
//!
//! Rol en el flujo:
//! - Cada transición aceptada por el `StepSequencer` emite un evento a un
//!   `EventStore` append-only.
//! - Los eventos permiten reconstruir el `SequenceState` (replay) sin depender
//!   de la instancia viva.
//! - Los comandos ignorados no emiten eventos.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SequenceEventKind {
    /// Primer evento de un `sequence_id`: fija la definición.
    SequenceInitialized { definition_hash: String, step_count: usize },
    /// Un paso pasó de `Idle` a `Running`; progreso y log vuelven a 0.
    StepStarted { step_index: usize, step_id: String },
    /// Tick no terminal.
    StepProgress {
        step_index: usize,
        step_id: String,
        elapsed: u32,
        progress: u32,
        revealed_logs: usize,
    },
    /// Nueva línea de log visible (una por línea).
    LogLineRevealed { step_index: usize, line_index: usize, line: String },
    /// Valor intermedio de métrica.
    MetricSampled { step_index: usize, progress: u32, value: f64 },
    /// El paso llegó a `Done`. `metric` es el valor visible final.
    StepFinished {
        step_index: usize,
        step_id: String,
        metric: Option<f64>,
    },
    /// Todos los pasos `Done`. Se emite una sola vez por ciclo de vida.
    SequenceCompleted { step_count: usize },
    /// Vuelta al estado inicial.
    SequenceReset,
}

impl SequenceEventKind {
    /// Nombre corto de la variante, útil en logs.
    pub fn variant_name(&self) -> &'static str {
        match self {
            SequenceEventKind::SequenceInitialized { .. } => "SequenceInitialized",
            SequenceEventKind::StepStarted { .. } => "StepStarted",
            SequenceEventKind::StepProgress { .. } => "StepProgress",
            SequenceEventKind::LogLineRevealed { .. } => "LogLineRevealed",
            SequenceEventKind::MetricSampled { .. } => "MetricSampled",
            SequenceEventKind::StepFinished { .. } => "StepFinished",
            SequenceEventKind::SequenceCompleted { .. } => "SequenceCompleted",
            SequenceEventKind::SequenceReset => "SequenceReset",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceEvent {
    pub seq: u64, // orden de append dentro de la secuencia
    pub sequence_id: Uuid,
    pub kind: SequenceEventKind,
    pub ts: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_names_match_the_kind() {
        let started = SequenceEventKind::StepStarted { step_index: 0,
                                                       step_id: "remove_water".into() };
        assert_eq!(started.variant_name(), "StepStarted");
        assert_eq!(SequenceEventKind::SequenceReset.variant_name(), "SequenceReset");
        assert_eq!(SequenceEventKind::SequenceCompleted { step_count: 4 }.variant_name(), "SequenceCompleted");
    }
}
