//! Muestreo de la métrica mostrada durante la reproducción.
//!
//! Los valores intermedios (score de docking, RMSD...) son cosméticos. Se
//! obtienen de un `MetricSampler` inyectable para que los tests usen un stub
//! determinista en lugar de aserciones sobre valores aleatorios.
use serde::{Deserialize, Serialize};

/// Cuándo muestrear y qué valor fijar al terminar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPolicy {
    /// Muestrear cada `sample_every` ticks del episodio; `None` sólo fija
    /// el valor final.
    pub sample_every: Option<u32>,
    /// Valor autoritativo asignado al completar; reemplaza cualquier muestra
    /// intermedia. Con `Some`, el tick terminal no muestrea.
    pub final_value: Option<f64>,
}

impl MetricPolicy {
    pub fn every(sample_every: u32) -> Self {
        Self { sample_every: Some(sample_every),
               final_value: None }
    }

    /// Sin muestras intermedias: sólo `value` al completar.
    pub fn final_only(value: f64) -> Self {
        Self { sample_every: None,
               final_value: Some(value) }
    }

    /// `true` si el tick `elapsed` es un punto de muestreo.
    pub fn is_checkpoint(&self, elapsed: u32) -> bool {
        self.sample_every.is_some_and(|every| every > 0 && elapsed % every == 0)
    }

    pub fn with_final(mut self, value: f64) -> Self {
        self.final_value = Some(value);
        self
    }
}

/// Punto (progreso, valor) registrado para graficar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub progress: u32,
    pub value: f64,
}

/// Fuente de valores de métrica.
pub trait MetricSampler: Send {
    /// Devuelve el valor a mostrar para `step_id` con el progreso actual.
    fn sample(&mut self, step_id: &str, progress: u32) -> f64;
}

impl<F> MetricSampler for F where F: FnMut(&str, u32) -> f64 + Send
{
    fn sample(&mut self, step_id: &str, progress: u32) -> f64 {
        self(step_id, progress)
    }
}

/// Siempre el mismo valor.
#[derive(Debug, Clone, Copy)]
pub struct ConstantSampler(pub f64);

impl MetricSampler for ConstantSampler {
    fn sample(&mut self, _step_id: &str, _progress: u32) -> f64 {
        self.0
    }
}

/// Recorre una lista fija de valores en ciclo.
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSampler {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl MetricSampler for ScriptedSampler {
    fn sample(&mut self, _step_id: &str, _progress: u32) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
