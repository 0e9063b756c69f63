//! Player state.
//!
//! Each player carries the time they have accumulated per role plus the
//! (status, role, position) triple of the stint they are currently in.
//!
//! # Status Diagram
//!
//! ```text
//!                    substitution
//!   ┌────────────┐ ─────────────────▶ ┌────────────┐
//!   │  OnField   │                    │ Substitute │◀──┐
//!   └────────────┘ ◀───────────────── └─────┬──────┘   │ activate
//!         ▲  │        substitution          │          │
//!         │  │ goalie switch                │ inactivate
//!         │  ▼                              ▼          │
//!   ┌────────────┐                    ┌────────────┐   │
//!   │   Goalie   │                    │  Inactive  │───┘
//!   └────────────┘                    └────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{PairRole, PlayerRole, PlayerStatus, PositionKey, Slot};

/// Player identifier, as issued by the roster layer.
pub type PlayerId = String;

/// Accumulated time and current stint of a player.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub time_on_field_seconds: u64,
    pub time_as_defender_seconds: u64,
    pub time_as_midfielder_seconds: u64,
    pub time_as_attacker_seconds: u64,
    pub time_as_goalie_seconds: u64,
    pub time_as_sub_seconds: u64,

    pub current_role: Option<PlayerRole>,
    pub current_status: Option<PlayerStatus>,
    pub current_position_key: Option<PositionKey>,

    /// Temporarily out of the rotation
    pub is_inactive: bool,

    /// Start of the stint not yet credited
    pub last_stint_checkpoint: Option<DateTime<Utc>>,

    /// Status at kickoff
    pub started_match_as: Option<PlayerStatus>,
}

impl PlayerStats {
    /// Seconds credited to a role bucket.
    pub fn seconds_as(&self, role: PlayerRole) -> u64 {
        match role {
            PlayerRole::Goalie => self.time_as_goalie_seconds,
            PlayerRole::Defender => self.time_as_defender_seconds,
            PlayerRole::Midfielder => self.time_as_midfielder_seconds,
            PlayerRole::Attacker => self.time_as_attacker_seconds,
            PlayerRole::Substitute => self.time_as_sub_seconds,
        }
    }

    pub(crate) fn seconds_as_mut(&mut self, role: PlayerRole) -> &mut u64 {
        match role {
            PlayerRole::Goalie => &mut self.time_as_goalie_seconds,
            PlayerRole::Defender => &mut self.time_as_defender_seconds,
            PlayerRole::Midfielder => &mut self.time_as_midfielder_seconds,
            PlayerRole::Attacker => &mut self.time_as_attacker_seconds,
            PlayerRole::Substitute => &mut self.time_as_sub_seconds,
        }
    }

    /// Every second this player has been credited, counted once.
    pub fn total_seconds(&self) -> u64 {
        self.time_on_field_seconds + self.time_as_goalie_seconds + self.time_as_sub_seconds
    }

    /// The slot described by the current position and role.
    pub fn slot(&self) -> Option<Slot> {
        let key = self.current_position_key?;
        if !key.is_pair() {
            return Some(Slot::Single(key));
        }
        let pair_role = match self.current_role? {
            PlayerRole::Defender => PairRole::Defender,
            PlayerRole::Attacker => PairRole::Attacker,
            _ => return None,
        };
        Some(Slot::Paired(key, pair_role))
    }
}

/// A squad member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,

    /// Display name
    pub name: String,

    #[serde(default)]
    pub stats: PlayerStats,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats: PlayerStats::default(),
        }
    }

    pub fn is_goalie(&self) -> bool {
        self.stats.current_status == Some(PlayerStatus::Goalie)
    }

    pub fn is_on_field(&self) -> bool {
        self.stats.current_status == Some(PlayerStatus::OnField)
    }

    pub fn is_substitute(&self) -> bool {
        self.stats.current_status == Some(PlayerStatus::Substitute)
    }

    pub fn is_inactive(&self) -> bool {
        self.stats.is_inactive
    }
}

/// Find a player by id.
pub fn find<'a>(players: &'a [Player], id: &str) -> Option<&'a Player> {
    players.iter().find(|p| p.id == id)
}

/// Find a mutable player by id.
pub fn find_mut<'a>(players: &'a mut [Player], id: &str) -> Option<&'a mut Player> {
    players.iter_mut().find(|p| p.id == id)
}
