//! Player input as discrete, edge-triggered actions
//!
//! Events can arrive at any time; they are buffered here and drained once at
//! the start of the next tick so physics never sees a mid-tick mutation.

use serde::{Deserialize, Serialize};

use super::tick::Simulation;

/// A single key press, already mapped to its gameplay meaning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Jump,
    DashLeft,
    DashRight,
}

/// Pending actions for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    actions: Vec<InputAction>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            actions: Vec::with_capacity(8),
        }
    }

    pub fn push(&mut self, action: InputAction) {
        self.actions.push(action);
    }

    /// Take everything queued so far, in arrival order
    pub fn drain(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.actions)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

/// Anything that produces actions between ticks (keyboard glue, bots, replays)
pub trait InputSource {
    /// Append actions observed since the last poll
    ///
    /// The simulation is read-only here; sources that only forward key
    /// presses can ignore it.
    fn poll(&mut self, sim: &Simulation, queue: &mut InputQueue);
}
