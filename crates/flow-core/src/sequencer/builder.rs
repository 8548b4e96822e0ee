//! Builder para `StepSequencer`.
//!
//! Acumula pasos, sampler y observadores y valida la lista completa en
//! `build`, que es el único punto donde puede aparecer `InvalidConfig`.
//!
//! ```ignore
//! let seq = StepSequencer::builder()
//!     .step(StepSpec::fixed("desalting", "Desalting", Duration::from_millis(2000)))
//!     .step(StepSpec::fixed("ionization", "Ionization", Duration::from_millis(2000)))
//!     .build()?;
//! ```

use uuid::Uuid;

use crate::errors::SequencerError;
use crate::event::{EventStore, InMemoryEventStore};
use crate::repo::build_sequence_definition;
use crate::sampling::MetricSampler;
use crate::sequencer::{StateObserver, StepSequencer};
use crate::step::StepSpec;

pub struct SequenceBuilder<E: EventStore = InMemoryEventStore> {
    steps: Vec<StepSpec>,
    event_store: E,
    sampler: Option<Box<dyn MetricSampler>>,
    observers: Vec<Box<dyn StateObserver>>,
    sequence_id: Option<Uuid>,
}

impl SequenceBuilder<InMemoryEventStore> {
    pub fn new() -> Self {
        Self { steps: Vec::new(),
               event_store: InMemoryEventStore::default(),
               sampler: None,
               observers: Vec::new(),
               sequence_id: None }
    }
}

impl Default for SequenceBuilder<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EventStore> SequenceBuilder<E> {
    /// Sustituye la store de eventos conservando el resto de la configuración.
    pub fn event_store<E2: EventStore>(self, event_store: E2) -> SequenceBuilder<E2> {
        SequenceBuilder { steps: self.steps,
                          event_store,
                          sampler: self.sampler,
                          observers: self.observers,
                          sequence_id: self.sequence_id }
    }

    pub fn step(mut self, step: StepSpec) -> Self {
        self.steps.push(step);
        self
    }

    pub fn steps(mut self, steps: impl IntoIterator<Item = StepSpec>) -> Self {
        self.steps.extend(steps);
        self
    }

    pub fn sampler(mut self, sampler: impl MetricSampler + 'static) -> Self {
        self.sampler = Some(Box::new(sampler));
        self
    }

    pub fn observer(mut self, observer: impl StateObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Fija el id de la secuencia (por defecto uno aleatorio).
    pub fn sequence_id(mut self, id: Uuid) -> Self {
        self.sequence_id = Some(id);
        self
    }

    pub fn build(self) -> Result<StepSequencer<E>, SequencerError> {
        let definition = build_sequence_definition(self.steps)?;
        let mut sequencer = StepSequencer::with_store(definition,
                                                      self.event_store,
                                                      self.sequence_id.unwrap_or_else(Uuid::new_v4));
        if let Some(sampler) = self.sampler {
            sequencer.set_sampler(sampler);
        }
        for observer in self.observers {
            sequencer.subscribe(observer);
        }
        Ok(sequencer)
    }
}
