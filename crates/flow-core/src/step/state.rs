//! Snapshot renderizable de una secuencia.
//!
//! `SequenceState` es lo único que la capa de presentación necesita para
//! pintar estilos Idle/Running/Done, barras de progreso y líneas de log. Es
//! `Clone + PartialEq` para que los tests comparen estados completos (por
//! ejemplo, `reset` frente a `initialize`).
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StepStatus;
use crate::repo::SequenceDefinition;
use crate::sampling::MetricSample;

/// Estado de un step dentro de la secuencia.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSlot {
    /// Posición del paso en la secuencia (0-based).
    pub ordinal: usize,
    pub status: StepStatus,
    /// Progreso 0..=100 del último episodio (100 una vez `Done`).
    pub progress: u32,
    pub revealed_logs: usize,
    /// Último valor de métrica visible (muestreado o final).
    pub metric: Option<f64>,
    pub samples: Vec<MetricSample>,
}

impl StepSlot {
    fn idle(ordinal: usize) -> Self {
        Self { ordinal,
               status: StepStatus::Idle,
               progress: 0,
               revealed_logs: 0,
               metric: None,
               samples: Vec::new() }
    }
}

/// Puntero al paso en ejecución.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playhead {
    pub step_index: usize,
    /// Ticks consumidos en el episodio actual.
    pub elapsed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceState {
    pub id: Uuid,
    /// Slots en el orden de la definición, indexados por id de paso.
    pub steps: IndexMap<String, StepSlot>,
    pub playhead: Option<Playhead>,
}

impl SequenceState {
    /// Estado inicial: todos los pasos `Idle`, sin puntero de ejecución.
    pub fn initial(id: Uuid, definition: &SequenceDefinition) -> Self {
        let steps = definition.steps
                              .iter()
                              .enumerate()
                              .map(|(i, s)| (s.id.clone(), StepSlot::idle(i)))
                              .collect();
        Self { id, steps, playhead: None }
    }

    pub fn slot(&self, step_id: &str) -> Option<&StepSlot> {
        self.steps.get(step_id)
    }

    pub fn status_of(&self, step_id: &str) -> Option<StepStatus> {
        self.slot(step_id).map(|s| s.status)
    }

    /// Id del paso en ejecución, si lo hay.
    pub fn running_step(&self) -> Option<&str> {
        self.playhead
            .and_then(|p| self.steps.get_index(p.step_index))
            .map(|(id, _)| id.as_str())
    }

    pub fn running_count(&self) -> usize {
        self.steps.values().filter(|s| s.status == StepStatus::Running).count()
    }

    pub fn done_count(&self) -> usize {
        self.steps.values().filter(|s| s.status == StepStatus::Done).count()
    }

    /// Progreso del paso en ejecución (0 si no hay ninguno).
    pub fn progress(&self) -> u32 {
        self.playhead
            .and_then(|p| self.steps.get_index(p.step_index))
            .map_or(0, |(_, s)| s.progress)
    }

    pub fn is_busy(&self) -> bool {
        self.playhead.is_some()
    }

    /// `allDone`: derivado, nunca almacenado.
    pub fn all_done(&self) -> bool {
        !self.steps.is_empty() && self.steps.values().all(|s| s.status == StepStatus::Done)
    }
}
