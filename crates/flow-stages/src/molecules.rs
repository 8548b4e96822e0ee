//! Candidatos de reposicionamiento mostrados por las vistas.
use serde::Serialize;

/// Perfil ADMET (valores fijos, no calculados).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdmetProfile {
    /// Peso molecular (Da).
    pub mw: f64,
    pub hbd: u32,
    pub hba: u32,
    /// Área polar superficial (Å²).
    pub psa: f64,
    /// Absorción intestinal (%).
    pub absorption: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoleculeData {
    pub id: &'static str,
    pub name: &'static str,
    pub smiles: &'static str,
    /// kcal/mol; más negativo = mejor afinidad.
    pub docking_score: f64,
    pub admet: AdmetProfile,
}

pub const PENTOXIFYLLINE: MoleculeData = MoleculeData { id: "drug-1",
                                                        name: "Pentoxifylline",
                                                        smiles: "CN1C=NC2=C1C(=O)N(C(=O)N2C)CCCC(=O)C",
                                                        docking_score: -7.2,
                                                        admet: AdmetProfile { mw: 278.31,
                                                                              hbd: 0,
                                                                              hba: 5,
                                                                              psa: 64.6,
                                                                              absorption: 95.0 } };

pub const INFLIXIMAB_ANALOG: MoleculeData = MoleculeData { id: "drug-2",
                                                           name: "Infliximab-Analog (Small)",
                                                           smiles: "CC(C)C1=C(C=C(C=C1)O)C(=O)N",
                                                           docking_score: -8.9,
                                                           admet: AdmetProfile { mw: 181.2,
                                                                                 hbd: 2,
                                                                                 hba: 2,
                                                                                 psa: 43.3,
                                                                                 absorption: 88.0 } };

pub const MOLECULES: [MoleculeData; 2] = [PENTOXIFYLLINE, INFLIXIMAB_ANALOG];
