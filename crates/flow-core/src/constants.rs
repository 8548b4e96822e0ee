//! Constantes del secuenciador.

/// Versión lógica del secuenciador. Forma parte del input del
/// `definition_hash`, de modo que un cambio incompatible en la semántica de
/// playback produce hashes distintos para la misma lista de pasos.
pub const SEQUENCER_VERSION: &str = "S1.0";

/// Valor terminal del contador de progreso.
pub const PROGRESS_MAX: u32 = 100;
