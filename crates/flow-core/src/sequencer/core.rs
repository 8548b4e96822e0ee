//! Core StepSequencer implementation

use std::time::Duration;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::errors::SequencerError;
use crate::event::{EventStore, InMemoryEventStore, SequenceEvent, SequenceEventKind};
use crate::repo::{build_sequence_definition, SequenceDefinition};
use crate::sampling::{MetricSample, MetricSampler};
use crate::sequencer::{SequenceBuilder, StateObserver};
use crate::step::{Playhead, SequenceState, StepSpec, StepStatus};

/// Agenda de un episodio aceptado por `run_step`.
///
/// El scheduler externo debe llamar a `tick_for` cada `interval`, como mucho
/// `total_ticks` veces. Un ticket de una generación anterior (tras `reset` o
/// un nuevo `run_step`) es rechazado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerTicket {
    pub generation: u64,
    pub step_index: usize,
    pub step_id: String,
    pub interval: Duration,
    pub total_ticks: u32,
}

/// Resultado de un tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// No había paso en ejecución.
    Idle,
    /// El ticket pertenece a una generación cancelada.
    Stale,
    /// Tick intermedio.
    Advanced { step_id: String, progress: u32 },
    /// El paso llegó a `Done`.
    Finished { step_id: String, sequence_complete: bool },
}

impl TickOutcome {
    /// `true` si el scheduler debe seguir llamando a `tick`.
    pub fn is_pending(&self) -> bool {
        matches!(self, TickOutcome::Advanced { .. })
    }
}

/// Secuenciador de pasos simulados.
///
/// Dueño exclusivo del estado de una vista. Garantiza:
/// - a lo sumo un paso `Running`;
/// - transiciones sólo `Idle -> Running -> Done`;
/// - `SequenceCompleted` emitido una única vez hasta el próximo `reset`.
pub struct StepSequencer<E: EventStore = InMemoryEventStore> {
    definition: SequenceDefinition,
    state: SequenceState,
    event_store: E,
    sampler: Option<Box<dyn MetricSampler>>,
    observers: Vec<Box<dyn StateObserver>>,
    generation: u64,
}

impl StepSequencer<InMemoryEventStore> {
    /// Construye una secuencia nueva (todos los pasos `Idle`) con store en memoria.
    pub fn initialize(steps: Vec<StepSpec>) -> Result<Self, SequencerError> {
        let definition = build_sequence_definition(steps)?;
        Ok(Self::with_store(definition, InMemoryEventStore::default(), Uuid::new_v4()))
    }

    /// Builder con stores en memoria.
    pub fn builder() -> SequenceBuilder<InMemoryEventStore> {
        SequenceBuilder::new()
    }
}

impl<E: EventStore> StepSequencer<E> {
    /// Crea el secuenciador sobre una definición ya validada y emite
    /// `SequenceInitialized`.
    pub fn with_store(definition: SequenceDefinition, mut event_store: E, sequence_id: Uuid) -> Self {
        event_store.append_kind(sequence_id,
                                SequenceEventKind::SequenceInitialized { definition_hash: definition.definition_hash.clone(),
                                                                         step_count: definition.len() });
        let state = SequenceState::initial(sequence_id, &definition);
        Self { definition,
               state,
               event_store,
               sampler: None,
               observers: Vec::new(),
               generation: 0 }
    }

    pub fn set_sampler(&mut self, sampler: Box<dyn MetricSampler>) {
        self.sampler = Some(sampler);
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    pub fn id(&self) -> Uuid {
        self.state.id
    }

    pub fn definition(&self) -> &SequenceDefinition {
        &self.definition
    }

    pub fn state(&self) -> &SequenceState {
        &self.state
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// Eventos emitidos por esta secuencia.
    pub fn events(&self) -> Vec<SequenceEvent> {
        self.event_store.list(self.state.id)
    }

    pub fn is_complete(&self) -> bool {
        self.state.all_done()
    }

    /// Inicia `step_id`.
    ///
    /// Comando ignorado (devuelve `None`, estado intacto) si el id no existe,
    /// si hay otro paso en ejecución o si el paso no está `Idle`.
    pub fn run_step(&mut self, step_id: &str) -> Option<TimerTicket> {
        let Some(step_index) = self.state.steps.get_index_of(step_id) else {
            debug!("run_step:ignored sequence={} step={step_id} reason=unknown", self.state.id);
            return None;
        };
        if let Some(running) = self.state.running_step() {
            debug!("run_step:ignored sequence={} step={step_id} reason=busy running={running}",
                   self.state.id);
            return None;
        }
        let slot = &mut self.state.steps[step_index];
        if !slot.status.can_transition_to(StepStatus::Running) {
            debug!("run_step:ignored sequence={} step={step_id} reason=status {:?}",
                   self.state.id,
                   slot.status);
            return None;
        }
        slot.status = StepStatus::Running;
        slot.progress = 0;
        slot.revealed_logs = 0;
        slot.metric = None;
        slot.samples.clear();
        self.state.playhead = Some(Playhead { step_index, elapsed: 0 });
        self.generation += 1;

        let spec = &self.definition.steps[step_index];
        let ticket = TimerTicket { generation: self.generation,
                                   step_index,
                                   step_id: spec.id.clone(),
                                   interval: spec.tick_interval(),
                                   total_ticks: spec.total_ticks() };
        self.event_store.append_kind(self.state.id,
                                     SequenceEventKind::StepStarted { step_index,
                                                                      step_id: spec.id.clone() });
        debug!("run_step:started sequence={} step={} ticks={} interval={:?}",
               self.state.id,
               ticket.step_id,
               ticket.total_ticks,
               ticket.interval);
        self.notify();
        Some(ticket)
    }

    /// Avanza un tick sólo si `ticket` pertenece a la generación vigente.
    pub fn tick_for(&mut self, ticket: &TimerTicket) -> TickOutcome {
        if ticket.generation != self.generation {
            warn!("tick:stale sequence={} step={} ticket_generation={} current={}",
                  self.state.id,
                  ticket.step_id,
                  ticket.generation,
                  self.generation);
            return TickOutcome::Stale;
        }
        self.tick()
    }

    /// Avanza el paso en ejecución una unidad. Sin efecto si no hay ninguno.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(playhead) = self.state.playhead.as_mut() else {
            return TickOutcome::Idle;
        };
        playhead.elapsed += 1;
        let Playhead { step_index, elapsed } = *playhead;

        let spec = &self.definition.steps[step_index];
        let sequence_id = self.state.id;
        let terminal = elapsed >= spec.total_ticks();
        let progress = spec.progress_at(elapsed);
        let revealed = spec.revealed_at(elapsed);

        let slot = &mut self.state.steps[step_index];
        let previously_revealed = slot.revealed_logs;
        slot.progress = progress;
        slot.revealed_logs = revealed;

        if !terminal {
            self.event_store.append_kind(sequence_id,
                                         SequenceEventKind::StepProgress { step_index,
                                                                           step_id: spec.id.clone(),
                                                                           elapsed,
                                                                           progress,
                                                                           revealed_logs: revealed });
        }
        for line_index in previously_revealed..revealed {
            self.event_store.append_kind(sequence_id,
                                         SequenceEventKind::LogLineRevealed { step_index,
                                                                              line_index,
                                                                              line: spec.logs[line_index].clone() });
        }

        if let Some(policy) = spec.metric {
            let checkpoint = policy.is_checkpoint(elapsed);
            let overridden = terminal && policy.final_value.is_some();
            if checkpoint && !overridden {
                if let Some(sampler) = self.sampler.as_mut() {
                    let value = sampler.sample(&spec.id, progress);
                    slot.metric = Some(value);
                    slot.samples.push(MetricSample { progress, value });
                    self.event_store.append_kind(sequence_id,
                                                 SequenceEventKind::MetricSampled { step_index, progress, value });
                }
            }
            if terminal {
                if let Some(value) = policy.final_value {
                    slot.metric = Some(value);
                }
            }
        }

        if !terminal {
            let step_id = spec.id.clone();
            self.notify();
            return TickOutcome::Advanced { step_id, progress };
        }

        slot.status = StepStatus::Done;
        let metric = slot.metric;
        self.state.playhead = None;
        self.event_store.append_kind(sequence_id,
                                     SequenceEventKind::StepFinished { step_index,
                                                                       step_id: spec.id.clone(),
                                                                       metric });
        info!("step finished sequence={sequence_id} step={} metric={metric:?}", spec.id);

        let sequence_complete = self.state.all_done();
        if sequence_complete {
            self.event_store.append_kind(sequence_id,
                                         SequenceEventKind::SequenceCompleted { step_count: self.definition.len() });
            info!("sequence completed sequence={sequence_id} steps={}", self.definition.len());
        }
        let step_id = spec.id.clone();
        self.notify();
        TickOutcome::Finished { step_id, sequence_complete }
    }

    /// Devuelve la secuencia a su estado inicial e invalida cualquier ticket
    /// emitido hasta ahora.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = SequenceState::initial(self.state.id, &self.definition);
        self.event_store.append_kind(self.state.id, SequenceEventKind::SequenceReset);
        info!("sequence reset sequence={}", self.state.id);
        self.notify();
    }

    fn notify(&mut self) {
        for observer in self.observers.iter_mut() {
            observer.on_state_change(&self.state);
        }
    }
}
