//! Definición de secuencia (`SequenceDefinition`) y reconstrucción de estado
//! por replay (`SequenceRepository`).
//!
//! El replay consume los eventos en orden y aplica cada uno sobre un
//! `SequenceState`; el resultado debe ser idéntico al estado vivo del
//! secuenciador que los emitió.
use std::collections::HashSet;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::constants::SEQUENCER_VERSION;
use crate::errors::{ConfigIssue, SequencerError};
use crate::event::{SequenceEvent, SequenceEventKind};
use crate::hashing::hash_value;
use crate::sampling::MetricSample;
use crate::step::{Playback, Playhead, SequenceState, StepSpec, StepStatus};

/// Definición inmutable y validada de una secuencia.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDefinition {
    pub steps: Vec<StepSpec>,
    pub definition_hash: String,
}

impl SequenceDefinition {
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Valida la lista de pasos y calcula su `definition_hash`.
///
/// Falla con `InvalidConfig` si la lista está vacía, si hay ids vacíos o
/// repetidos, o si algún playback no puede avanzar (intervalo o incremento 0).
pub fn build_sequence_definition(steps: Vec<StepSpec>) -> Result<SequenceDefinition, SequencerError> {
    if steps.is_empty() {
        return Err(ConfigIssue::EmptySteps.into());
    }
    let mut seen = HashSet::with_capacity(steps.len());
    for (i, s) in steps.iter().enumerate() {
        if s.id.trim().is_empty() {
            return Err(ConfigIssue::EmptyId(i).into());
        }
        if !seen.insert(s.id.as_str()) {
            return Err(ConfigIssue::DuplicateId(s.id.clone()).into());
        }
        if let Playback::Counter { increment: 0, .. } = s.playback {
            return Err(ConfigIssue::ZeroIncrement(s.id.clone()).into());
        }
        if s.tick_interval().is_zero() {
            return Err(ConfigIssue::ZeroInterval(s.id.clone()).into());
        }
        if matches!(s.metric, Some(p) if p.sample_every == Some(0)) {
            return Err(ConfigIssue::ZeroSampleEvery(s.id.clone()).into());
        }
    }
    let definition_hash = hash_value(&definition_json(&steps));
    Ok(SequenceDefinition { steps, definition_hash })
}

fn definition_json(steps: &[StepSpec]) -> Value {
    let steps: Vec<Value> = steps.iter()
                                 .map(|s| {
                                     let playback = match s.playback {
                                         Playback::Fixed { delay } => json!({ "fixed_ms": delay.as_millis() as u64 }),
                                         Playback::Counter { interval, increment } => {
                                             json!({ "interval_ms": interval.as_millis() as u64, "increment": increment })
                                         }
                                     };
                                     json!({
                                         "id": s.id,
                                         "playback": playback,
                                         "log_lines": s.logs.len(),
                                         "sample_every": s.metric.and_then(|m| m.sample_every),
                                     })
                                 })
                                 .collect();
    json!({ "version": SEQUENCER_VERSION, "steps": steps })
}

/// Trait para reconstruir (`replay`) el estado de una secuencia a partir de eventos.
pub trait SequenceRepository {
    fn load(&self, sequence_id: Uuid, events: &[SequenceEvent], definition: &SequenceDefinition) -> SequenceState;
}

#[derive(Debug, Default)]
pub struct InMemorySequenceRepository;

impl InMemorySequenceRepository {
    pub fn new() -> Self {
        Self
    }
}

impl SequenceRepository for InMemorySequenceRepository {
    fn load(&self, sequence_id: Uuid, events: &[SequenceEvent], definition: &SequenceDefinition) -> SequenceState {
        let mut state = SequenceState::initial(sequence_id, definition);
        for ev in events {
            match &ev.kind {
                SequenceEventKind::SequenceInitialized { .. } | SequenceEventKind::SequenceCompleted { .. } => {}
                SequenceEventKind::SequenceReset => state = SequenceState::initial(sequence_id, definition),
                SequenceEventKind::StepStarted { step_index, .. } => {
                    if let Some((_, slot)) = state.steps.get_index_mut(*step_index) {
                        slot.status = StepStatus::Running;
                        slot.progress = 0;
                        slot.revealed_logs = 0;
                        slot.metric = None;
                        slot.samples.clear();
                        state.playhead = Some(Playhead { step_index: *step_index, elapsed: 0 });
                    }
                }
                SequenceEventKind::StepProgress { step_index,
                                                  elapsed,
                                                  progress,
                                                  revealed_logs,
                                                  .. } => {
                    if let Some((_, slot)) = state.steps.get_index_mut(*step_index) {
                        slot.progress = *progress;
                        slot.revealed_logs = *revealed_logs;
                        state.playhead = Some(Playhead { step_index: *step_index, elapsed: *elapsed });
                    }
                }
                SequenceEventKind::LogLineRevealed { step_index, line_index, .. } => {
                    if let Some((_, slot)) = state.steps.get_index_mut(*step_index) {
                        slot.revealed_logs = slot.revealed_logs.max(line_index + 1);
                    }
                }
                SequenceEventKind::MetricSampled { step_index, progress, value } => {
                    if let Some((_, slot)) = state.steps.get_index_mut(*step_index) {
                        slot.metric = Some(*value);
                        slot.samples.push(MetricSample { progress: *progress, value: *value });
                    }
                }
                SequenceEventKind::StepFinished { step_index, metric, .. } => {
                    let lines = definition.steps.get(*step_index).map_or(0, |s| s.logs.len());
                    if let Some((_, slot)) = state.steps.get_index_mut(*step_index) {
                        slot.status = StepStatus::Done;
                        slot.progress = crate::constants::PROGRESS_MAX;
                        slot.revealed_logs = lines;
                        slot.metric = *metric;
                        state.playhead = None;
                    }
                }
            }
        }
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn step(id: &str) -> StepSpec {
        StepSpec::fixed(id, id, Duration::from_millis(2000))
    }

    #[test]
    fn empty_and_duplicate_lists_are_rejected() {
        assert_eq!(build_sequence_definition(vec![]).unwrap_err(),
                   SequencerError::InvalidConfig(ConfigIssue::EmptySteps));
        let err = build_sequence_definition(vec![step("desalting"), step("desalting")]).unwrap_err();
        assert_eq!(err, SequencerError::InvalidConfig(ConfigIssue::DuplicateId("desalting".into())));
    }

    #[test]
    fn zero_playback_is_rejected() {
        let err = build_sequence_definition(vec![StepSpec::counter("dock", "Docking", Duration::from_millis(60), 0)]).unwrap_err();
        assert_eq!(err, SequencerError::InvalidConfig(ConfigIssue::ZeroIncrement("dock".into())));
        let err = build_sequence_definition(vec![StepSpec::fixed("ifd", "IFD", Duration::ZERO)]).unwrap_err();
        assert_eq!(err, SequencerError::InvalidConfig(ConfigIssue::ZeroInterval("ifd".into())));
        let err = build_sequence_definition(vec![StepSpec::fixed(" ", "blank", Duration::from_millis(1))]).unwrap_err();
        assert_eq!(err, SequencerError::InvalidConfig(ConfigIssue::EmptyId(0)));
    }

    #[test]
    fn definition_hash_depends_on_order() {
        let a = build_sequence_definition(vec![step("a"), step("b")]).unwrap();
        let b = build_sequence_definition(vec![step("b"), step("a")]).unwrap();
        let a2 = build_sequence_definition(vec![step("a"), step("b")]).unwrap();
        assert_ne!(a.definition_hash, b.definition_hash);
        assert_eq!(a.definition_hash, a2.definition_hash);
    }
}
