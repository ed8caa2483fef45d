use super::types::{ShipId, Transition, TugboatPosition};
use std::cell::RefCell;
use std::rc::Rc;

/// Result of one attempt to apply a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The transition ran and its event left the queue
    Executed,
    /// A resource was unavailable; the event stays queued
    Deferred,
}

/// Snapshot taken right after a transition attempt
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionRecord {
    pub ship: ShipId,
    pub transition: Transition,
    /// Time the event was scheduled for
    pub event_time: f64,
    pub clock_before: f64,
    pub clock_after: f64,
    pub outcome: Outcome,
    pub free_docks: usize,
    pub tugboat_busy: bool,
    pub tugboat_position: TugboatPosition,
    /// Cost of an empty tugboat crossing made by this transition
    pub relocation: Option<f64>,
}

/// Observer trait for harbor simulation progress
pub trait HarborObserver {
    /// Called after every transition attempt, executed or deferred
    fn on_transition(&mut self, _record: &TransitionRecord) {}

    /// Called once the event queue has drained
    fn on_run_complete(&mut self, _clock: f64, _ships: usize) {}
}

/// Observer that keeps every transition record.
///
/// Clones share the same storage, so one copy can be handed to the
/// simulation while another is read afterwards.
#[derive(Debug, Clone, Default)]
pub struct TransitionLog {
    records: Rc<RefCell<Vec<TransitionRecord>>>,
}

impl TransitionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<TransitionRecord> {
        self.records.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Records belonging to one ship, in execution order
    pub fn for_ship(&self, ship: ShipId) -> Vec<TransitionRecord> {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.ship == ship)
            .cloned()
            .collect()
    }

    pub fn deferred_count(&self) -> usize {
        self.records
            .borrow()
            .iter()
            .filter(|record| record.outcome == Outcome::Deferred)
            .count()
    }
}

impl HarborObserver for TransitionLog {
    fn on_transition(&mut self, record: &TransitionRecord) {
        self.records.borrow_mut().push(record.clone());
    }
}
