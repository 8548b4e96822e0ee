//! Etapas del pipeline y navegación hacia adelante.
//!
//! El orden es una constante de configuración:
//! protein-prep → ligand-prep → docking → admet → mmgbsa → ifd →
//! md-simulation → bioisostere → report.
use std::fmt;
use std::str::FromStr;

use flow_core::{SequenceState, SequencerError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StageError {
    #[error("unknown stage '{0}'")] UnknownStage(String),
    #[error("stage '{0}' has no step sequence")] NoSequence(&'static str),
    #[error(transparent)] Sequencer(#[from] SequencerError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    ProteinPrep,
    LigandPrep,
    Docking,
    Admet,
    Mmgbsa,
    Ifd,
    MdSimulation,
    Bioisostere,
    Report,
}

impl Stage {
    /// Todas las etapas en orden de pipeline.
    pub const ALL: [Stage; 9] = [Stage::ProteinPrep,
                                 Stage::LigandPrep,
                                 Stage::Docking,
                                 Stage::Admet,
                                 Stage::Mmgbsa,
                                 Stage::Ifd,
                                 Stage::MdSimulation,
                                 Stage::Bioisostere,
                                 Stage::Report];

    pub fn id(self) -> &'static str {
        match self {
            Stage::ProteinPrep => "protein-prep",
            Stage::LigandPrep => "ligand-prep",
            Stage::Docking => "docking",
            Stage::Admet => "admet",
            Stage::Mmgbsa => "mmgbsa",
            Stage::Ifd => "ifd",
            Stage::MdSimulation => "md-simulation",
            Stage::Bioisostere => "bioisostere",
            Stage::Report => "report",
        }
    }

    pub fn route(self) -> String {
        format!("/{}", self.id())
    }

    pub fn title(self) -> &'static str {
        match self {
            Stage::ProteinPrep => "Protein Preparation",
            Stage::LigandPrep => "Ligand Preparation",
            Stage::Docking => "Molecular Docking",
            Stage::Admet => "ADMET Profiling",
            Stage::Mmgbsa => "MM-GBSA Refinement",
            Stage::Ifd => "Induced Fit Docking",
            Stage::MdSimulation => "MD Simulation",
            Stage::Bioisostere => "Bioisosteric Replacement",
            Stage::Report => "Final Report",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Stage::ProteinPrep => "Preparing the TNF-alpha target for computational interaction.",
            Stage::LigandPrep => "Processing drug candidates for molecular docking.",
            Stage::Docking => "Predicting the binding orientation and affinity of candidates.",
            Stage::Admet => "Pharmacokinetics and safety prediction.",
            Stage::Mmgbsa => "Accurate binding free energy calculation.",
            Stage::Ifd => "Modeling receptor flexibility.",
            Stage::MdSimulation => "Simulating binding stability over time.",
            Stage::Bioisostere => "Optimization through functional group substitution.",
            Stage::Report => "Comprehensive analysis of the best repurposed candidate.",
        }
    }

    pub fn importance(self) -> &'static str {
        match self {
            Stage::ProteinPrep => "Accurate biological modeling requires correct protonation and removal of non-biological artifacts.",
            Stage::LigandPrep => "Correct stereochemistry and ionization states are critical for binding affinity prediction.",
            Stage::Docking => "Identifies the most promising binders from a large library of repurposed drugs.",
            Stage::Admet => "A drug must not only bind but also reach the target safely in the human body.",
            Stage::Mmgbsa => "Provides a more rigorous thermodynamic estimate of binding than basic docking.",
            Stage::Ifd => "Proteins are not static; they adapt to the presence of a ligand.",
            Stage::MdSimulation => "Confirms the stability of the drug-protein complex in a physiological environment.",
            Stage::Bioisostere => "Improving potency or safety by swapping atoms while maintaining structural intent.",
            Stage::Report => "Consolidating evidence for clinical consideration or wet-lab validation.",
        }
    }

    pub fn mechanism(self) -> &'static str {
        match self {
            Stage::ProteinPrep => {
                "The protein (2AZ5) is stripped of water molecules, hydrogens are added according to pH 7.4, and energy is minimized."
            }
            Stage::LigandPrep => {
                "Small molecules are desalted, ionized at target pH, and tautomers are generated to find the most bioactive form."
            }
            Stage::Docking => {
                "Using a grid-based search (Autodock Vina) to explore the conformational space of the ligand within the binding site."
            }
            Stage::Admet => "Evaluation of Lipinski Rules, intestinal absorption, Blood-Brain Barrier permeability, and toxicity.",
            Stage::Mmgbsa => "Combines molecular mechanics energies with generalized Born and surface area solvation terms.",
            Stage::Ifd => "The binding pocket amino acids are allowed to rotate and shift to maximize interactions.",
            Stage::MdSimulation => "Numerical integration of Newton's laws over 100ns to track structural RMSD and RMSF.",
            Stage::Bioisostere => "Replacing sulfur with oxygen or nitrogen to tune electronics and hydrogen bonding.",
            Stage::Report => "Aggregating all simulation data into a validated drug profile.",
        }
    }

    pub fn success_criteria(self) -> &'static str {
        match self {
            Stage::ProteinPrep => "A cleaned protein structure with no steric clashes and optimized energy state.",
            Stage::LigandPrep => "A set of energy-minimized 3D conformations for each drug candidate.",
            Stage::Docking => "Low (negative) docking scores indicating strong binding energy.",
            Stage::Admet => "Drug-like properties with low predicted toxicity and high oral bioavailability.",
            Stage::Mmgbsa => "Stable ΔG_bind values confirming spontaneous binding.",
            Stage::Ifd => "Improved binding poses and scores compared to rigid docking.",
            Stage::MdSimulation => "Low RMSD plateau indicating a stable, equilibrated system.",
            Stage::Bioisostere => "Enhanced pharmacological profile without increasing molecular weight significantly.",
            Stage::Report => "A \"Go\" decision for experimental testing of the candidate.",
        }
    }

    /// Siguiente etapa del pipeline (`None` para el reporte).
    pub fn next(self) -> Option<Stage> {
        let i = Stage::ALL.iter().position(|s| *s == self)?;
        Stage::ALL.get(i + 1).copied()
    }

    pub fn from_route(route: &str) -> Option<Stage> {
        Stage::ALL.iter().copied().find(|s| s.route() == route)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Stage {
    type Err = StageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::ALL.iter()
                  .copied()
                  .find(|stage| stage.id() == s)
                  .ok_or_else(|| StageError::UnknownStage(s.to_string()))
    }
}

/// Affordance de navegación: la siguiente etapa, sólo si la secuencia de la
/// etapa actual está completa.
pub fn next_stage_affordance(stage: Stage, state: &SequenceState) -> Option<Stage> {
    if state.all_done() {
        stage.next()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_order_is_linear() {
        let mut walked = vec![Stage::ProteinPrep];
        while let Some(next) = walked.last().and_then(|s| s.next()) {
            walked.push(next);
        }
        assert_eq!(walked, Stage::ALL.to_vec());
        assert_eq!(Stage::Report.next(), None);
    }

    #[test]
    fn ids_and_routes_round_trip() {
        for stage in Stage::ALL {
            assert_eq!(stage.id().parse::<Stage>(), Ok(stage));
            assert_eq!(Stage::from_route(&stage.route()), Some(stage));
        }
        assert_eq!("dashboard".parse::<Stage>(), Err(StageError::UnknownStage("dashboard".into())));
        assert_eq!(Stage::MdSimulation.route(), "/md-simulation");
    }

    #[test]
    fn serde_uses_stage_ids() {
        let json = serde_json::to_string(&Stage::MdSimulation).unwrap();
        assert_eq!(json, "\"md-simulation\"");
        let back: Stage = serde_json::from_str("\"ligand-prep\"").unwrap();
        assert_eq!(back, Stage::LigandPrep);
    }
}
