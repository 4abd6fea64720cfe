//! Shared view-model state: three independently replaced slots and one error
//! slot, written only by the action handlers.
//!
//! Every action takes a ticket when it starts. A write is applied only if its
//! ticket is still the newest one issued for that slot, so a slow response can
//! never overwrite the result of an action triggered after it.

use parking_lot::Mutex;
use serde::Serialize;

use crate::models::{CollaborationView, CoordinatorView, StudyPlanView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Coordinator,
    StudyPlan,
    Collaboration,
}

impl Slot {
    fn index(self) -> usize {
        match self {
            Slot::Coordinator => 0,
            Slot::StudyPlan => 1,
            Slot::Collaboration => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub slot: Slot,
    pub seq: u64,
}

#[derive(Debug, Clone)]
pub enum ViewUpdate {
    Coordinator(CoordinatorView),
    StudyPlan(StudyPlanView),
    Collaboration(CollaborationView),
}

impl ViewUpdate {
    pub fn slot(&self) -> Slot {
        match self {
            ViewUpdate::Coordinator(_) => Slot::Coordinator,
            ViewUpdate::StudyPlan(_) => Slot::StudyPlan,
            ViewUpdate::Collaboration(_) => Slot::Collaboration,
        }
    }
}

/// Point-in-time copy of every slot, what presentation reads.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub coordinator: Option<CoordinatorView>,
    pub study_plan: Option<StudyPlanView>,
    pub collaboration: Option<CollaborationView>,
    pub error: Option<String>,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct StoreState {
    coordinator: Option<CoordinatorView>,
    study_plan: Option<StudyPlanView>,
    collaboration: Option<CollaborationView>,
    error: Option<String>,
    next_seq: u64,
    newest: [u64; 3],
    in_flight: [usize; 3],
}

impl StoreState {
    fn settle(&mut self, ticket: Ticket) -> bool {
        let idx = ticket.slot.index();
        self.in_flight[idx] = self.in_flight[idx].saturating_sub(1);
        self.newest[idx] == ticket.seq
    }
}

#[derive(Debug, Default)]
pub struct DashboardStore {
    state: Mutex<StoreState>,
}

impl DashboardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an action on `slot`: clears the error slot and supersedes any
    /// ticket previously issued for the same slot.
    pub fn begin(&self, slot: Slot) -> Ticket {
        let mut state = self.state.lock();
        state.next_seq += 1;
        let seq = state.next_seq;
        state.newest[slot.index()] = seq;
        state.in_flight[slot.index()] += 1;
        state.error = None;
        Ticket { slot, seq }
    }

    /// Replaces the slot outright. Returns false when the ticket was stale and
    /// the view was discarded.
    pub fn commit(&self, ticket: Ticket, update: ViewUpdate) -> bool {
        let mut state = self.state.lock();
        if !state.settle(ticket) || update.slot() != ticket.slot {
            tracing::warn!(slot = ?ticket.slot, seq = ticket.seq, "discarding stale view model");
            return false;
        }

        match update {
            ViewUpdate::Coordinator(view) => state.coordinator = Some(view),
            ViewUpdate::StudyPlan(view) => state.study_plan = Some(view),
            ViewUpdate::Collaboration(view) => state.collaboration = Some(view),
        }
        true
    }

    /// Records a failure. The slot's previous view model is left in place.
    pub fn fail(&self, ticket: Ticket, message: String) -> bool {
        let mut state = self.state.lock();
        if !state.settle(ticket) {
            tracing::warn!(slot = ?ticket.slot, seq = ticket.seq, "discarding stale failure");
            return false;
        }
        state.error = Some(message);
        true
    }

    pub fn coordinator(&self) -> Option<CoordinatorView> {
        self.state.lock().coordinator.clone()
    }

    pub fn study_plan(&self) -> Option<StudyPlanView> {
        self.state.lock().study_plan.clone()
    }

    pub fn collaboration(&self) -> Option<CollaborationView> {
        self.state.lock().collaboration.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().in_flight.iter().any(|count| *count > 0)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let state = self.state.lock();
        DashboardSnapshot {
            coordinator: state.coordinator.clone(),
            study_plan: state.study_plan.clone(),
            collaboration: state.collaboration.clone(),
            error: state.error.clone(),
            loading: state.in_flight.iter().any(|count| *count > 0),
        }
    }
}
