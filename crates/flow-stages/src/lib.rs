//! flow-stages: catálogo de etapas del pipeline in-silico y presets de
//! secuencia para cada vista.
//!
//! - `stage`: orden lineal de etapas y contrato de navegación.
//! - `presets`: listas de pasos y tiempos de cada vista.
//! - `samplers`: jitter cosmético de métricas (score de docking, RMSD).
//! - `molecules` y `results`: constantes mostradas por las vistas.

pub mod molecules;
pub mod presets;
pub mod results;
pub mod samplers;
pub mod stage;

pub use molecules::{AdmetProfile, MoleculeData, INFLIXIMAB_ANALOG, MOLECULES, PENTOXIFYLLINE};
pub use presets::{stage_sequencer, StagePreset};
pub use samplers::{DockingScoreSampler, RmsdSampler};
pub use stage::{next_stage_affordance, Stage, StageError};
