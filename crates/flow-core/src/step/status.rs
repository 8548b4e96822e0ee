use serde::{Deserialize, Serialize};

/// Estado de un Step en tiempo de ejecución.
///
/// Las transiciones válidas son:
/// - `Idle` -> `Running`
/// - `Running` -> `Done`
///
/// `Done` es terminal: no hay reversiones ni saltos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepStatus {
    /// El paso no se ha ejecutado todavía.
    Idle,
    /// El paso se está reproduciendo.
    Running,
    /// El paso finalizó.
    Done,
}

impl StepStatus {
    pub fn can_transition_to(self, next: StepStatus) -> bool {
        matches!((self, next), (StepStatus::Idle, StepStatus::Running) | (StepStatus::Running, StepStatus::Done))
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, StepStatus::Done)
    }
}

impl Default for StepStatus {
    fn default() -> Self {
        StepStatus::Idle
    }
}
