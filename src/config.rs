//! Configuración de runtime.
//! Carga variables de entorno (.env) una sola vez y expone `CONFIG`.
//! Los flags de la CLI pueden sobreescribir estos valores construyendo un
//! `RuntimeConfig` propio.
use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;

use crate::errors::RuntimeError;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenvy::dotenv(); // ignora error si no existe .env
});

/// Parámetros del scheduler.
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Factor de aceleración: los intervalos simulados se dividen por este valor.
    pub time_scale: f64,
    /// Periodo mínimo tras escalar (tokio no admite intervalos de 0).
    pub min_tick: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { time_scale: 1.0,
               min_tick: Duration::from_millis(1) }
    }
}

impl RuntimeConfig {
    /// Lee `INSILICO_TIME_SCALE` e `INSILICO_MIN_TICK_MS`; valores ausentes o
    /// ilegibles caen en el default.
    pub fn from_env() -> Self {
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let time_scale = env::var("INSILICO_TIME_SCALE").ok()
                                                         .and_then(|v| v.parse::<f64>().ok())
                                                         .filter(|v| v.is_finite() && *v > 0.0)
                                                         .unwrap_or(defaults.time_scale);
        let min_tick = env::var("INSILICO_MIN_TICK_MS").ok()
                                                        .and_then(|v| v.parse::<u64>().ok())
                                                        .filter(|v| *v > 0)
                                                        .map(Duration::from_millis)
                                                        .unwrap_or(defaults.min_tick);
        Self { time_scale, min_tick }
    }

    pub fn with_time_scale(mut self, time_scale: f64) -> Result<Self, RuntimeError> {
        if !time_scale.is_finite() || time_scale <= 0.0 {
            return Err(RuntimeError::Config(format!("time scale must be > 0, got {time_scale}")));
        }
        self.time_scale = time_scale;
        Ok(self)
    }

    /// Periodo real para un intervalo simulado.
    pub fn scale(&self, simulated: Duration) -> Duration {
        let nanos = (simulated.as_nanos() as f64 / self.time_scale).round() as u64;
        Duration::from_nanos(nanos).max(self.min_tick)
    }
}

/// Instancia global perezosa de configuración, evaluada una sola vez.
pub static CONFIG: Lazy<RuntimeConfig> = Lazy::new(RuntimeConfig::from_env);
