use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::PROGRESS_MAX;
use crate::sampling::MetricPolicy;

/// Forma en que un paso consume tiempo simulado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Playback {
    /// Un único disparo tras `delay`. Si el paso tiene `n` líneas de log el
    /// retraso se divide en `n + 1` ticks de `delay / (n + 1)`.
    Fixed { delay: Duration },
    /// Contador 0..=100 que suma `increment` en cada tick de `interval`.
    Counter { interval: Duration, increment: u32 },
}

/// Descripción inmutable de un paso.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSpec {
    /// Identificador estable y único dentro de la secuencia.
    pub id: String,
    pub label: String,
    pub description: String,
    pub playback: Playback,
    /// Líneas reveladas una a una mientras el paso corre.
    pub logs: Vec<String>,
    /// Política de muestreo de la métrica mostrada (score, RMSD...).
    pub metric: Option<MetricPolicy>,
}

impl StepSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>, playback: Playback) -> Self {
        Self { id: id.into(),
               label: label.into(),
               description: String::new(),
               playback,
               logs: Vec::new(),
               metric: None }
    }

    /// Paso de disparo único.
    pub fn fixed(id: impl Into<String>, label: impl Into<String>, delay: Duration) -> Self {
        Self::new(id, label, Playback::Fixed { delay })
    }

    /// Paso con contador incremental.
    pub fn counter(id: impl Into<String>, label: impl Into<String>, interval: Duration, increment: u32) -> Self {
        Self::new(id, label, Playback::Counter { interval, increment })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_logs<I, S>(mut self, lines: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        self.logs = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_metric(mut self, policy: MetricPolicy) -> Self {
        self.metric = Some(policy);
        self
    }

    /// Ticks necesarios para completar el paso.
    pub fn total_ticks(&self) -> u32 {
        match self.playback {
            Playback::Fixed { .. } => self.logs.len() as u32 + 1,
            Playback::Counter { increment, .. } => {
                PROGRESS_MAX.div_ceil(increment.max(1))
            }
        }
    }

    /// Cadencia a la que el scheduler debe llamar a `tick`.
    pub fn tick_interval(&self) -> Duration {
        match self.playback {
            Playback::Fixed { delay } => delay / (self.logs.len() as u32 + 1),
            Playback::Counter { interval, .. } => interval,
        }
    }

    /// Progreso visible tras `elapsed` ticks, acotado a `PROGRESS_MAX`.
    pub fn progress_at(&self, elapsed: u32) -> u32 {
        let raw = match self.playback {
            Playback::Counter { increment, .. } => elapsed as u64 * increment as u64,
            Playback::Fixed { .. } => elapsed as u64 * PROGRESS_MAX as u64 / self.total_ticks() as u64,
        };
        raw.min(PROGRESS_MAX as u64) as u32
    }

    /// Cantidad de líneas de log reveladas tras `elapsed` ticks.
    pub fn revealed_at(&self, elapsed: u32) -> usize {
        let lines = self.logs.len();
        let total = self.total_ticks();
        if elapsed >= total {
            return lines;
        }
        let evenly = elapsed as u64 * (lines as u64 + 1) / total as u64;
        (evenly as usize).min(lines)
    }
}
