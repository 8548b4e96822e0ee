use flow_core::SequencerError;
use flow_stages::StageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Secuencia inválida: {0}")]
    Sequencer(#[from] SequencerError),
    #[error("Etapa inválida: {0}")]
    Stage(#[from] StageError),
    /// Un temporizador entró en pánico con el lock tomado.
    #[error("Estado de secuencia envenenado")]
    Poisoned,
}
