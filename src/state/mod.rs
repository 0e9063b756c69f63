//! Match rotation state.
//!
//! This module provides the core types and calculators:
//!
//! - `config` - Team setup and the formation mode it resolves to
//! - `catalog` - Position keys, slots and the role of every slot
//! - `player` - Players and their per-role time
//! - `stint` - Time accrual between role changes
//! - `queue` - Rotation order, active and inactive
//! - `formation` - Who stands where
//! - `lineup` - Formation, players, queue and next-off pointers together
//! - `substitution` - Pairs and carousel substitution algorithms
//! - `switch` - Position and goalie switches
//! - `activation` - Taking substitutes out of the rotation and back
//! - `undo` - Reverting the last substitution
//! - `recommend` - Pre-match position recommendations
//! - `trace` - Optional observer of transitions
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                             MatchState                               │
//! │                                                                      │
//! │  TeamConfig ──▶ FormationMode ──▶ SubstitutionAlgorithm              │
//! │                                                                      │
//! │  ┌────────────────────────────────────────────────────────────────┐  │
//! │  │                            Lineup                              │  │
//! │  │                                                                │  │
//! │  │  Formation      slot → player                                  │  │
//! │  │  RotationQueue  active order │ inactive                        │  │
//! │  │  Players        per-role seconds, stint checkpoint             │  │
//! │  │  NextOut        derived from queue + formation                 │  │
//! │  └────────────────────────────────────────────────────────────────┘  │
//! │          │                                        ▲                  │
//! │          ▼                                        │                  │
//! │   substitution / switch / activation / undo ─────┘                  │
//! │   (pure: &Lineup in, Lineup out)                                     │
//! │                                                                      │
//! │  last_substitution: Option<SubstitutionSnapshot>                     │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use rotation_state::state::{substitution, undo, MatchClock, SubstitutionContext};
//!
//! let ctx = SubstitutionContext::new(mode, rotation, &lineup, MatchClock::running(now));
//! let result = substitution::apply(&ctx)?;
//! let restored = undo::undo(&mode, &result.lineup, Some(&result.snapshot), now)?;
//! ```

pub mod activation;
pub mod catalog;
pub mod config;
pub mod error;
pub mod formation;
pub mod lineup;
pub mod player;
pub mod queue;
pub mod recommend;
pub mod stint;
pub mod substitution;
pub mod switch;
pub mod trace;
pub mod undo;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use catalog::{PairRole, PlayerRole, PlayerStatus, PositionKey, Slot};
pub use config::{
    ConfigurationError, FormationMode, FormationShape, MatchFormat, PairRoleRotation,
    SubstitutionType, TeamConfig, MAX_SUBSTITUTE_SLOTS, PAIRS_SQUAD_SIZE,
};
pub use error::InvalidOperation;
pub use formation::{Formation, Pair};
pub use lineup::{Lineup, NextOut};
pub use player::{Player, PlayerId, PlayerStats};
pub use queue::{InsertPosition, RotationQueue};
pub use recommend::{
    recommend_positions, recommend_positions_seeded, PositionRecommendation,
    RecommendationRequest, RoleHistory,
};
pub use stint::MatchClock;
pub use substitution::{
    SubstitutionAlgorithm, SubstitutionContext, SubstitutionResult, SubstitutionSnapshot,
};
pub use trace::{TraceEvent, TraceLog, TraceSink};

/// One team's match, from kickoff to the final whistle.
///
/// Wraps the pure calculators: every operation computes a new lineup from
/// the current one and commits it only on success. Rule violations are
/// logged, reported to the trace sink and handed back; the state is left
/// untouched.
#[derive(Serialize, Deserialize)]
pub struct MatchState {
    config: TeamConfig,
    mode: FormationMode,
    lineup: Lineup,

    /// Only the most recent substitution can be undone
    last_substitution: Option<SubstitutionSnapshot>,

    #[serde(skip)]
    trace: Option<Box<dyn TraceSink>>,
}

impl fmt::Debug for MatchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchState")
            .field("config", &self.config)
            .field("mode", &self.mode)
            .field("lineup", &self.lineup)
            .field("last_substitution", &self.last_substitution)
            .field("trace", &self.trace.is_some())
            .finish()
    }
}

/// Who moved in a committed substitution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionSummary {
    pub going_off: Vec<PlayerId>,
    pub coming_on: Vec<PlayerId>,
}

impl SubstitutionSummary {
    pub fn is_empty(&self) -> bool {
        self.going_off.is_empty() && self.coming_on.is_empty()
    }
}

impl MatchState {
    /// Validate the configuration and kick off with `formation`.
    pub fn new(
        config: TeamConfig,
        formation: Formation,
        players: Vec<Player>,
        now: DateTime<Utc>,
    ) -> Result<Self, ConfigurationError> {
        let mode = config.mode()?;
        let algorithm = SubstitutionAlgorithm::select(&mode)?;
        let lineup = Lineup::kickoff(&mode, formation, players, MatchClock::running(now))?;

        log::debug!(
            "Kickoff in {} ({}), {} players in rotation",
            mode,
            algorithm.as_str(),
            lineup.queue.active_size()
        );

        Ok(Self {
            config,
            mode,
            lineup,
            last_substitution: None,
            trace: None,
        })
    }

    pub fn config(&self) -> &TeamConfig {
        &self.config
    }

    pub fn mode(&self) -> &FormationMode {
        &self.mode
    }

    pub fn lineup(&self) -> &Lineup {
        &self.lineup
    }

    pub fn formation(&self) -> &Formation {
        &self.lineup.formation
    }

    pub fn players(&self) -> &[Player] {
        &self.lineup.players
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.lineup.player(id)
    }

    pub fn queue(&self) -> &RotationQueue {
        &self.lineup.queue
    }

    pub fn next_out(&self) -> &NextOut {
        &self.lineup.next_out
    }

    pub fn last_substitution(&self) -> Option<&SubstitutionSnapshot> {
        self.last_substitution.as_ref()
    }

    pub fn can_undo(&self) -> bool {
        self.last_substitution.is_some()
    }

    /// Install (or remove) the trace observer.
    pub fn set_trace(&mut self, sink: Option<Box<dyn TraceSink>>) {
        self.trace = sink;
    }

    fn emit(&mut self, event: TraceEvent) {
        if let Some(sink) = self.trace.as_mut() {
            sink.record(&event);
        }
    }

    fn reject(&mut self, operation: &'static str, err: InvalidOperation) -> InvalidOperation {
        log::warn!("{} rejected: {}", operation, err);
        self.emit(TraceEvent::OperationRejected {
            operation,
            reason: err.as_str(),
        });
        err
    }

    /// Replace the lineup after anything but a substitution.
    fn commit(&mut self, lineup: Lineup) {
        self.lineup = lineup;
        self.last_substitution = None;
    }

    /// Bring on the next substitute (paired mode: the sub pair).
    pub fn substitute(
        &mut self,
        clock: MatchClock,
    ) -> Result<SubstitutionSummary, ConfigurationError> {
        self.substitute_many(clock, 1)
    }

    /// Bring on up to `count` substitutes at once.
    pub fn substitute_many(
        &mut self,
        clock: MatchClock,
        count: usize,
    ) -> Result<SubstitutionSummary, ConfigurationError> {
        let ctx = SubstitutionContext::new(
            self.mode,
            self.config.pair_role_rotation,
            &self.lineup,
            clock,
        )
        .with_count(count);
        let result = substitution::apply(&ctx)?;

        if result.is_empty() {
            log::debug!("No active substitute to bring on");
            return Ok(SubstitutionSummary::default());
        }

        log::debug!(
            "Substitution: {:?} off, {:?} on",
            result.going_off_ids,
            result.coming_on_ids
        );

        let summary = SubstitutionSummary {
            going_off: result.going_off_ids,
            coming_on: result.coming_on_ids,
        };
        self.lineup = result.lineup;
        self.last_substitution = Some(result.snapshot);
        self.emit(TraceEvent::SubstitutionApplied {
            going_off: summary.going_off.clone(),
            coming_on: summary.coming_on.clone(),
            next_out: self.lineup.next_out.player.clone(),
        });
        Ok(summary)
    }

    /// Revert the most recent substitution.
    pub fn undo_last_substitution(&mut self, now: DateTime<Utc>) -> Result<(), InvalidOperation> {
        let lineup = undo::undo(&self.mode, &self.lineup, self.last_substitution.as_ref(), now)
            .map_err(|e| self.reject("undo", e))?;

        let restored = self
            .last_substitution
            .take()
            .map(|s| s.going_off_ids)
            .unwrap_or_default();
        log::debug!("Undid substitution, {:?} back on", restored);

        self.lineup = lineup;
        self.emit(TraceEvent::SubstitutionUndone { restored });
        Ok(())
    }

    pub fn switch_positions(
        &mut self,
        clock: MatchClock,
        first: &str,
        second: &str,
    ) -> Result<(), InvalidOperation> {
        let lineup = switch::switch_positions(&self.mode, &self.lineup, clock, first, second)
            .map_err(|e| self.reject("switch_positions", e))?;

        log::debug!("{} and {} switched positions", first, second);
        self.commit(lineup);
        self.emit(TraceEvent::PositionsSwitched {
            first: first.to_string(),
            second: second.to_string(),
        });
        Ok(())
    }

    pub fn switch_goalie(
        &mut self,
        clock: MatchClock,
        new_goalie: &str,
    ) -> Result<(), InvalidOperation> {
        let lineup = switch::switch_goalie(&self.mode, &self.lineup, clock, new_goalie)
            .map_err(|e| self.reject("switch_goalie", e))?;

        // A successful switch implies there was a goalie
        let old_goalie = self.lineup.formation.goalie().cloned().unwrap_or_default();
        let old_goalie_position = lineup.slot_of(&old_goalie).map(|slot| slot.key());
        log::debug!("{} in goal, {} to {:?}", new_goalie, old_goalie, old_goalie_position);

        self.commit(lineup);
        self.emit(TraceEvent::GoalieSwitched {
            old_goalie,
            new_goalie: new_goalie.to_string(),
            old_goalie_position,
        });
        Ok(())
    }

    pub fn inactivate_player(
        &mut self,
        clock: MatchClock,
        id: &str,
    ) -> Result<(), InvalidOperation> {
        let lineup = activation::inactivate(&self.mode, &self.lineup, clock, id)
            .map_err(|e| self.reject("inactivate_player", e))?;

        log::debug!("{} out of the rotation", id);
        self.commit(lineup);
        self.emit(TraceEvent::PlayerInactivated(id.to_string()));
        Ok(())
    }

    pub fn activate_player(
        &mut self,
        clock: MatchClock,
        id: &str,
    ) -> Result<(), InvalidOperation> {
        let lineup = activation::activate(&self.mode, &self.lineup, clock, id)
            .map_err(|e| self.reject("activate_player", e))?;

        log::debug!("{} back in the rotation", id);
        self.commit(lineup);
        self.emit(TraceEvent::PlayerActivated(id.to_string()));
        Ok(())
    }

    /// Make `id` (paired mode: their pair) the next to come off.
    pub fn set_next_to_sub_out(&mut self, id: &str) -> Result<(), InvalidOperation> {
        let lineup = substitution::set_next_to_sub_out(&self.mode, &self.lineup, id)
            .map_err(|e| self.reject("set_next_to_sub_out", e))?;

        log::debug!("{} is next off", id);
        self.commit(lineup);
        Ok(())
    }

    /// Close every running stint, e.g. before reading stats or at a pause.
    pub fn update_all_stats(&mut self, clock: MatchClock) {
        self.lineup.update_all_stats(clock);
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Restore a saved match. The trace observer is not persisted.
    ///
    /// The formation mode is derived from the saved configuration again; a
    /// save whose mode or layout disagrees with it is rejected.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        use serde::de::Error;

        let state: Self = serde_json::from_str(json)?;
        let configured = state.config.mode().map_err(serde_json::Error::custom)?;
        if configured != state.mode {
            return Err(serde_json::Error::custom(
                ConfigurationError::StoredModeMismatch {
                    stored: state.mode,
                    configured,
                },
            ));
        }
        if !state.lineup.formation.matches_mode(&configured) {
            return Err(serde_json::Error::custom(
                ConfigurationError::FormationMismatch(configured),
            ));
        }
        Ok(state)
    }
}
