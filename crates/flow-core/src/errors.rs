//! Errores del core.
//!
//! El único error real es de configuración al inicializar. Los comandos
//! ignorados (paso ocupado, id inexistente, paso no `Idle`) no son errores:
//! `run_step` devuelve `None` y el estado queda intacto.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Motivo concreto por el que una lista de pasos es inválida.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ConfigIssue {
    #[error("step list is empty")] EmptySteps,
    #[error("step at position {0} has an empty id")] EmptyId(usize),
    #[error("duplicate step id '{0}'")] DuplicateId(String),
    #[error("step '{0}' has a zero tick interval")] ZeroInterval(String),
    #[error("step '{0}' has a zero progress increment")] ZeroIncrement(String),
    #[error("step '{0}' samples its metric every 0 ticks")] ZeroSampleEvery(String),
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SequencerError {
    #[error("invalid config: {0}")] InvalidConfig(#[from] ConfigIssue),
}
