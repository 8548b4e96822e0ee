use crate::step::SequenceState;

/// Callback de presentación (`onStateChange`).
///
/// Se invoca tras cada transición aceptada: inicio de paso, tick, fin de paso
/// y reset. Nunca tras un comando ignorado.
pub trait StateObserver: Send {
    fn on_state_change(&mut self, state: &SequenceState);
}

impl<F> StateObserver for F where F: FnMut(&SequenceState) + Send
{
    fn on_state_change(&mut self, state: &SequenceState) {
        self(state)
    }
}
