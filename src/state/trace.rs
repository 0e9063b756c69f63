//! Optional observer for committed and rejected transitions.
//!
//! The calculators stay silent. [`MatchState`](super::MatchState) reports to
//! a sink when one is installed, on top of its own `log` output.

use std::cell::RefCell;
use std::rc::Rc;

use super::catalog::PositionKey;
use super::player::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceEvent {
    SubstitutionApplied {
        going_off: Vec<PlayerId>,
        coming_on: Vec<PlayerId>,
        next_out: Option<PlayerId>,
    },
    PositionsSwitched {
        first: PlayerId,
        second: PlayerId,
    },
    GoalieSwitched {
        old_goalie: PlayerId,
        new_goalie: PlayerId,
        old_goalie_position: Option<PositionKey>,
    },
    PlayerInactivated(PlayerId),
    PlayerActivated(PlayerId),
    SubstitutionUndone {
        restored: Vec<PlayerId>,
    },
    OperationRejected {
        operation: &'static str,
        reason: &'static str,
    },
}

impl TraceEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SubstitutionApplied { .. } => "substitution_applied",
            Self::PositionsSwitched { .. } => "positions_switched",
            Self::GoalieSwitched { .. } => "goalie_switched",
            Self::PlayerInactivated(_) => "player_inactivated",
            Self::PlayerActivated(_) => "player_activated",
            Self::SubstitutionUndone { .. } => "substitution_undone",
            Self::OperationRejected { .. } => "operation_rejected",
        }
    }
}

/// Receiver of trace events.
pub trait TraceSink {
    fn record(&mut self, event: &TraceEvent);
}

/// In-memory sink. Clones share the same buffer, so a caller can keep one
/// handle and install the other.
#[derive(Debug, Clone, Default)]
pub struct TraceLog {
    events: Rc<RefCell<Vec<TraceEvent>>>,
}

impl TraceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<TraceEvent> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl TraceSink for TraceLog {
    fn record(&mut self, event: &TraceEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
