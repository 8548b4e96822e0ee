//! Resultados autoritativos que las vistas muestran al completar su secuencia.
use serde::Serialize;

/// Desglose de energía libre de unión (kcal/mol) de la vista MM-GBSA.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BindingEnergyBreakdown {
    pub delta_g: f64,
    pub solvation: f64,
    pub coulomb: f64,
    pub van_der_waals: f64,
}

pub const MMGBSA_RESULT: BindingEnergyBreakdown = BindingEnergyBreakdown { delta_g: -58.4,
                                                                           solvation: 12.5,
                                                                           coulomb: -32.1,
                                                                           van_der_waals: -38.8 };

/// Fila antes/después de la vista de reemplazo bioisostérico.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwapMetric {
    pub label: &'static str,
    pub before: f64,
    pub after: f64,
    pub unit: &'static str,
}

impl SwapMetric {
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}

pub const BIOISOSTERE_METRICS: [SwapMetric; 3] = [SwapMetric { label: "Docking Score",
                                                               before: -7.2,
                                                               after: -9.4,
                                                               unit: "kcal/mol" },
                                                  SwapMetric { label: "Oral Absorption",
                                                               before: 95.0,
                                                               after: 98.0,
                                                               unit: "%" },
                                                  SwapMetric { label: "PSA",
                                                               before: 64.6,
                                                               after: 42.1,
                                                               unit: "Å²" }];
