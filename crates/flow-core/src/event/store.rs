use std::collections::HashMap;

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use super::{SequenceEvent, SequenceEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, sequence_id: Uuid, kind: SequenceEventKind) -> SequenceEvent;
    /// Lista eventos de una secuencia (orden ascendente por seq).
    fn list(&self, sequence_id: Uuid) -> Vec<SequenceEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    pub inner: HashMap<Uuid, Vec<SequenceEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, sequence_id: Uuid, kind: SequenceEventKind) -> SequenceEvent {
        let vec = self.inner.entry(sequence_id).or_default();
        let ev = SequenceEvent { seq: vec.len() as u64,
                                 sequence_id,
                                 kind,
                                 ts: Utc::now() };
        debug!("event:append sequence={sequence_id} seq={} kind={}", ev.seq, ev.kind.variant_name());
        vec.push(ev.clone());
        ev
    }

    fn list(&self, sequence_id: Uuid) -> Vec<SequenceEvent> {
        self.inner.get(&sequence_id).cloned().unwrap_or_default()
    }
}
