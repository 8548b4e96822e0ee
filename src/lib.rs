//! insilico-flow
//!
//! Este crate une el secuenciador (`flow-core`) y los presets de etapa
//! (`flow-stages`) con un scheduler real sobre tokio:
//! - `config`: configuración de runtime cargada desde el entorno (.env).
//! - `errors`: errores del runtime.
//! - `runtime`: `SequenceDriver`, dueño del único temporizador activo de una
//!   secuencia.

pub mod config;
pub mod errors;
pub mod runtime;

pub use config::{RuntimeConfig, CONFIG};
pub use errors::RuntimeError;
pub use runtime::SequenceDriver;

pub use flow_core;
pub use flow_stages;
