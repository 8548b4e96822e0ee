//! Observador que imprime los cambios de estado en consola.
use flow_core::{SequenceDefinition, SequenceState, StateObserver, StepStatus};

/// Imprime inicio y fin de cada paso, cada línea de log revelada, cada
/// décima de progreso (pasos sin log) y cada métrica nueva.
pub struct ConsolePrinter {
    logs: Vec<Vec<String>>,
    seen: Vec<Seen>,
}

#[derive(Default, Clone)]
struct Seen {
    status: StepStatus,
    revealed: usize,
    decile: u32,
    samples: usize,
}

impl ConsolePrinter {
    pub fn new(definition: &SequenceDefinition) -> Self {
        Self { logs: definition.steps.iter().map(|s| s.logs.clone()).collect(),
               seen: vec![Seen::default(); definition.len()] }
    }

    fn render(&mut self, state: &SequenceState) -> Vec<String> {
        let mut out = Vec::new();
        for (step_id, slot) in state.steps.iter() {
            let Some(seen) = self.seen.get_mut(slot.ordinal) else {
                continue;
            };
            if slot.status == StepStatus::Idle && seen.status != StepStatus::Idle {
                out.push(format!("  [{step_id}] reset"));
                *seen = Seen::default();
                continue;
            }
            if slot.status == StepStatus::Running && seen.status == StepStatus::Idle {
                out.push(format!("  [{step_id}] started"));
            }
            let logs = &self.logs[slot.ordinal];
            for line in logs.iter().take(slot.revealed_logs).skip(seen.revealed) {
                out.push(format!("  [{step_id}] > {line}"));
            }
            let decile = slot.progress / 10;
            if logs.is_empty() && slot.status == StepStatus::Running && decile > seen.decile {
                out.push(format!("  [{step_id}] {:>3}%", slot.progress));
            }
            for sample in slot.samples.iter().skip(seen.samples) {
                out.push(format!("  [{step_id}] metric {:.2} @ {}%", sample.value, sample.progress));
            }
            if slot.status == StepStatus::Done && seen.status != StepStatus::Done {
                match slot.metric {
                    Some(metric) => out.push(format!("  [{step_id}] done (metric {metric:.2})")),
                    None => out.push(format!("  [{step_id}] done")),
                }
            }
            *seen = Seen { status: slot.status,
                           revealed: slot.revealed_logs,
                           decile,
                           samples: slot.samples.len() };
        }
        out
    }
}

impl StateObserver for ConsolePrinter {
    fn on_state_change(&mut self, state: &SequenceState) {
        for line in self.render(state) {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flow_core::{StepSequencer, StepSpec};
    use std::time::Duration;

    #[test]
    fn prints_start_logs_and_completion_once() {
        let step = StepSpec::fixed("minimize", "Minimize", Duration::from_millis(400)).with_logs(["a", "b", "c"]);
        let mut seq = StepSequencer::initialize(vec![step]).unwrap();
        let mut printer = ConsolePrinter::new(seq.definition());

        let ticket = seq.run_step("minimize").unwrap();
        assert_eq!(printer.render(seq.state()), vec!["  [minimize] started"]);
        seq.tick_for(&ticket);
        assert_eq!(printer.render(seq.state()), vec!["  [minimize] > a"]);
        for _ in 1..ticket.total_ticks {
            seq.tick_for(&ticket);
        }
        assert_eq!(printer.render(seq.state()),
                   vec!["  [minimize] > b", "  [minimize] > c", "  [minimize] done"]);
        assert!(printer.render(seq.state()).is_empty());
    }
}
