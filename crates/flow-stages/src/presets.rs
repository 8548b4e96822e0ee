//! Presets de secuencia por etapa.
//!
//! Cada vista del pipeline consume el mismo `StepSequencer` parametrizado con
//! su lista de pasos y tiempos. ADMET y el reporte son vistas estáticas y no
//! tienen preset.
use std::time::Duration;

use flow_core::{MetricPolicy, MetricSampler, StepSequencer, StepSpec};
use log::debug;

use crate::molecules::INFLIXIMAB_ANALOG;
use crate::results::MMGBSA_RESULT;
use crate::samplers::{DockingScoreSampler, RmsdSampler};
use crate::stage::{Stage, StageError};

const PROTEIN_PREP_MS: u64 = 4500;
const LIGAND_PREP_MS: u64 = 2000;
const DOCKING_TICK_MS: u64 = 60;
const MMGBSA_TICK_MS: u64 = 40;
const MD_TICK_MS: u64 = 100;
const IFD_MS: u64 = 3000;
const BIOISOSTERE_MS: u64 = 1500;

/// Pasos y playback de una etapa.
#[derive(Debug, Clone, PartialEq)]
pub struct StagePreset {
    pub stage: Stage,
    pub steps: Vec<StepSpec>,
}

impl StagePreset {
    pub fn for_stage(stage: Stage) -> Result<Self, StageError> {
        let steps = match stage {
            Stage::ProteinPrep => protein_prep(),
            Stage::LigandPrep => ligand_prep(),
            Stage::Docking => docking(),
            Stage::Mmgbsa => mmgbsa(),
            Stage::Ifd => ifd(),
            Stage::MdSimulation => md_simulation(),
            Stage::Bioisostere => bioisostere(),
            Stage::Admet | Stage::Report => return Err(StageError::NoSequence(stage.id())),
        };
        Ok(Self { stage, steps })
    }

    /// Sampler aleatorio que usa la vista real (si la etapa muestrea métricas).
    pub fn default_sampler(&self) -> Option<Box<dyn MetricSampler>> {
        match self.stage {
            Stage::Docking => Some(Box::new(DockingScoreSampler::from_entropy())),
            Stage::MdSimulation => Some(Box::new(RmsdSampler::from_entropy())),
            _ => None,
        }
    }

    pub fn into_sequencer(self, sampler: Option<Box<dyn MetricSampler>>) -> Result<StepSequencer, StageError> {
        let stage = self.stage;
        let mut sequencer = StepSequencer::initialize(self.steps)?;
        if let Some(sampler) = sampler {
            sequencer.set_sampler(sampler);
        }
        debug!("stage sequencer ready stage={stage} sequence={} steps={}",
               sequencer.id(),
               sequencer.definition().len());
        Ok(sequencer)
    }
}

/// Secuenciador listo para la vista de `stage`, con su sampler por defecto.
pub fn stage_sequencer(stage: Stage) -> Result<StepSequencer, StageError> {
    let preset = StagePreset::for_stage(stage)?;
    let sampler = preset.default_sampler();
    preset.into_sequencer(sampler)
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

pub fn protein_prep() -> Vec<StepSpec> {
    let delay = ms(PROTEIN_PREP_MS);
    vec![StepSpec::fixed("remove_water", "Desolvation Protocol", delay)
             .with_description("Removing Crystal Waters")
             .with_logs(["Parsing PDB metadata for 2AZ5...",
                         "Identifying HOH/WAT residues...",
                         "Calculating solvent access surface...",
                         "Deleting 412 non-catalytic molecules.",
                         "Validating cavity integrity..."]),
         StepSpec::fixed("add_hydrogens", "Hydrogen Mapping", delay)
             .with_description("Geometric Protonation")
             .with_logs(["Identifying heavy atom coordinates...",
                         "Assigning hybridization states...",
                         "Predicting H-bond network...",
                         "Mapping proton positions (pH 7.4)...",
                         "Correcting valency..."]),
         StepSpec::fixed("optimize_ph", "pH Equilibration", delay)
             .with_description("Protonation State Assignment")
             .with_logs(["Calculating residue pKa values...",
                         "Analyzing Histidine tautomers...",
                         "Assigning Asp/Glu charges...",
                         "Optimizing network electrostatics...",
                         "System neutralized @ pH 7.4."]),
         StepSpec::fixed("minimize", "Energy Minimization", delay)
             .with_description("Force Field Relaxation (OPLS4)")
             .with_logs(["Setting OPLS4 force field...",
                         "Defining potential energy function...",
                         "Steepest descent (Step 0-1000)...",
                         "Conjugate gradient refinement...",
                         "Convergence achieved (0.05 kcal/mol)."]),]
}

pub fn ligand_prep() -> Vec<StepSpec> {
    let delay = ms(LIGAND_PREP_MS);
    vec![StepSpec::fixed("desalting", "Desalting", delay).with_description("Removing counter-ions and solvent remnants."),
         StepSpec::fixed("ionization", "Ionization", delay)
             .with_description("Calculating pKa and assigning protonation states at pH 7.4."),
         StepSpec::fixed("tautomer_gen", "Tautomer Gen", delay).with_description("Identifying the most stable structural isomers."),
         StepSpec::fixed("optimization", "Optimization", delay).with_description("Final OPLS4 force field energy minimization."),]
}

pub fn docking() -> Vec<StepSpec> {
    vec![StepSpec::counter("docking", "Conformational Sampling", ms(DOCKING_TICK_MS), 1)
             .with_description("Lamarckian Genetic Algorithm")
             .with_metric(MetricPolicy::every(5).with_final(INFLIXIMAB_ANALOG.docking_score)),]
}

pub fn mmgbsa() -> Vec<StepSpec> {
    vec![StepSpec::counter("refinement", "Binding Free Energy Refinement", ms(MMGBSA_TICK_MS), 2)
             .with_description("Molecular mechanics with generalized Born surface area solvation")
             .with_metric(MetricPolicy::final_only(MMGBSA_RESULT.delta_g)),]
}

pub fn ifd() -> Vec<StepSpec> {
    vec![StepSpec::fixed("induced_fit", "Induced Fit Simulation", ms(IFD_MS))
             .with_description("Binding pocket side chains rotate and shift around the ligand")]
}

pub fn md_simulation() -> Vec<StepSpec> {
    vec![StepSpec::counter("production", "Production Run", ms(MD_TICK_MS), 1)
             .with_description("Explicit solvent (TIP3P) trajectory, RMSD tracked every 2 ticks")
             .with_metric(MetricPolicy::every(2)),]
}

pub fn bioisostere() -> Vec<StepSpec> {
    vec![StepSpec::fixed("swap", "Bioisosteric Swap", ms(BIOISOSTERE_MS))
             .with_description("Replacing sulfur with oxygen or nitrogen")]
}
