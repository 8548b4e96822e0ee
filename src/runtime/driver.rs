//! `SequenceDriver`: conecta un `StepSequencer` con un temporizador tokio.
//!
//! El secuenciador vive detrás de `Arc<Mutex<_>>`; `run_step` y cada tick
//! toman el mismo lock, así que nunca se intercalan. Hay como mucho un
//! temporizador vivo por driver: un nuevo episodio, `reset` y `Drop` abortan
//! el anterior, y un tick que aun así llegue tarde es rechazado por la
//! generación del ticket.
use std::sync::{Arc, Mutex, MutexGuard};

use flow_core::{SequenceEvent, SequenceState, StepSequencer, TimerTicket};
use flow_stages::{stage_sequencer, Stage};
use log::{debug, error, info};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::RuntimeConfig;
use crate::errors::RuntimeError;

pub struct SequenceDriver {
    sequencer: Arc<Mutex<StepSequencer>>,
    timer: Option<JoinHandle<()>>,
    config: RuntimeConfig,
}

impl SequenceDriver {
    pub fn new(sequencer: StepSequencer, config: RuntimeConfig) -> Self {
        Self { sequencer: Arc::new(Mutex::new(sequencer)),
               timer: None,
               config }
    }

    /// Driver para el preset de `stage` con su sampler por defecto.
    pub fn for_stage(stage: Stage, config: RuntimeConfig) -> Result<Self, RuntimeError> {
        Ok(Self::new(stage_sequencer(stage)?, config))
    }

    fn lock(&self) -> Result<MutexGuard<'_, StepSequencer>, RuntimeError> {
        self.sequencer.lock().map_err(|_| RuntimeError::Poisoned)
    }

    /// Inicia `step_id` y programa sus ticks. Debe llamarse dentro de un
    /// runtime tokio.
    ///
    /// `Ok(None)` si el secuenciador ignoró el comando; en ese caso el
    /// temporizador en curso (si lo hay) sigue intacto.
    pub fn run_step(&mut self, step_id: &str) -> Result<Option<TimerTicket>, RuntimeError> {
        let ticket = {
            let mut sequencer = self.lock()?;
            match sequencer.run_step(step_id) {
                Some(ticket) => ticket,
                None => return Ok(None),
            }
        };
        self.cancel_timer();
        self.timer = Some(self.spawn_timer(ticket.clone()));
        Ok(Some(ticket))
    }

    fn spawn_timer(&self, ticket: TimerTicket) -> JoinHandle<()> {
        let sequencer = Arc::clone(&self.sequencer);
        let period = self.config.scale(ticket.interval);
        debug!("timer:spawn step={} period={period:?} ticks={}",
               ticket.step_id,
               ticket.total_ticks);
        tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let outcome = match sequencer.lock() {
                    Ok(mut guard) => guard.tick_for(&ticket),
                    Err(_) => {
                        error!("timer:poisoned step={}", ticket.step_id);
                        return;
                    }
                };
                if !outcome.is_pending() {
                    debug!("timer:done step={} outcome={outcome:?}", ticket.step_id);
                    return;
                }
            }
        })
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            handle.abort();
        }
    }

    /// Cancela el temporizador y vuelve al estado inicial.
    pub fn reset(&mut self) -> Result<(), RuntimeError> {
        self.cancel_timer();
        self.lock()?.reset();
        info!("driver reset");
        Ok(())
    }

    /// Copia del estado actual.
    pub fn snapshot(&self) -> Result<SequenceState, RuntimeError> {
        Ok(self.lock()?.state().clone())
    }

    pub fn events(&self) -> Result<Vec<SequenceEvent>, RuntimeError> {
        Ok(self.lock()?.events())
    }

    pub fn is_complete(&self) -> Result<bool, RuntimeError> {
        Ok(self.lock()?.is_complete())
    }

    /// `true` mientras haya un temporizador sin terminar.
    pub fn is_ticking(&self) -> bool {
        self.timer.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Espera a que termine el episodio en curso. Vuelve de inmediato si no
    /// hay temporizador.
    pub async fn wait_idle(&mut self) -> Result<(), RuntimeError> {
        let Some(handle) = self.timer.take() else {
            return Ok(());
        };
        match handle.await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(_) => Err(RuntimeError::Poisoned),
        }
    }
}

impl Drop for SequenceDriver {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
