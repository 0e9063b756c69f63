//! Position catalog.
//!
//! Static lookup of which slots exist in each formation mode and which role a
//! player standing in a slot plays. [`role`] is the only place a role is ever
//! derived from a position.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::{FormationMode, FormationShape};

/// Named slot keys across all formations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionKey {
    Goalie,
    LeftDefender,
    RightDefender,
    Defender,
    LeftMidfielder,
    CenterMidfielder,
    RightMidfielder,
    LeftAttacker,
    RightAttacker,
    Attacker,
    LeftPair,
    RightPair,
    SubPair,
    Substitute1,
    Substitute2,
    Substitute3,
}

impl PositionKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goalie => "goalie",
            Self::LeftDefender => "leftDefender",
            Self::RightDefender => "rightDefender",
            Self::Defender => "defender",
            Self::LeftMidfielder => "leftMidfielder",
            Self::CenterMidfielder => "centerMidfielder",
            Self::RightMidfielder => "rightMidfielder",
            Self::LeftAttacker => "leftAttacker",
            Self::RightAttacker => "rightAttacker",
            Self::Attacker => "attacker",
            Self::LeftPair => "leftPair",
            Self::RightPair => "rightPair",
            Self::SubPair => "subPair",
            Self::Substitute1 => "substitute1",
            Self::Substitute2 => "substitute2",
            Self::Substitute3 => "substitute3",
        }
    }

    /// Substitute slot by 1-based index.
    pub fn substitute(index: usize) -> Option<Self> {
        SUBSTITUTE_KEYS.get(index.checked_sub(1)?).copied()
    }

    pub fn is_substitute(&self) -> bool {
        matches!(
            self,
            Self::Substitute1 | Self::Substitute2 | Self::Substitute3 | Self::SubPair
        )
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Self::LeftPair | Self::RightPair | Self::SubPair)
    }
}

impl fmt::Display for PositionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slot within a defender/attacker pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairRole {
    Defender,
    Attacker,
}

impl PairRole {
    pub fn inverse(&self) -> Self {
        match self {
            Self::Defender => Self::Attacker,
            Self::Attacker => Self::Defender,
        }
    }

    pub fn role(&self) -> PlayerRole {
        match self {
            Self::Defender => PlayerRole::Defender,
            Self::Attacker => PlayerRole::Attacker,
        }
    }
}

/// A place a player can stand in a formation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Single(PositionKey),
    Paired(PositionKey, PairRole),
}

impl Slot {
    pub const GOALIE: Slot = Slot::Single(PositionKey::Goalie);

    pub fn key(&self) -> PositionKey {
        match self {
            Self::Single(key) | Self::Paired(key, _) => *key,
        }
    }

    pub fn is_goalie(&self) -> bool {
        self.key() == PositionKey::Goalie
    }

    pub fn is_substitute(&self) -> bool {
        self.key().is_substitute()
    }

    pub fn is_field(&self) -> bool {
        !self.is_goalie() && !self.is_substitute()
    }

    /// Status a player in this slot has.
    pub fn status(&self) -> PlayerStatus {
        if self.is_goalie() {
            PlayerStatus::Goalie
        } else if self.is_substitute() {
            PlayerStatus::Substitute
        } else {
            PlayerStatus::OnField
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(key) => write!(f, "{}", key),
            Self::Paired(key, PairRole::Defender) => write!(f, "{}.defender", key),
            Self::Paired(key, PairRole::Attacker) => write!(f, "{}.attacker", key),
        }
    }
}

/// Role time buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Goalie,
    Defender,
    Midfielder,
    Attacker,
    Substitute,
}

impl PlayerRole {
    /// Outfield roles in recommendation order.
    pub const OUTFIELD: [PlayerRole; 3] = [
        PlayerRole::Defender,
        PlayerRole::Midfielder,
        PlayerRole::Attacker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goalie => "goalie",
            Self::Defender => "defender",
            Self::Midfielder => "midfielder",
            Self::Attacker => "attacker",
            Self::Substitute => "substitute",
        }
    }

    pub fn is_outfield(&self) -> bool {
        Self::OUTFIELD.contains(self)
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a player currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    OnField,
    Substitute,
    Goalie,
}

impl PlayerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OnField => "on_field",
            Self::Substitute => "substitute",
            Self::Goalie => "goalie",
        }
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Substitute slots in bench order.
pub const SUBSTITUTE_KEYS: [PositionKey; 3] = [
    PositionKey::Substitute1,
    PositionKey::Substitute2,
    PositionKey::Substitute3,
];

const TWO_TWO: &[PositionKey] = &[
    PositionKey::LeftDefender,
    PositionKey::RightDefender,
    PositionKey::LeftAttacker,
    PositionKey::RightAttacker,
];

const ONE_TWO_ONE: &[PositionKey] = &[
    PositionKey::Defender,
    PositionKey::LeftMidfielder,
    PositionKey::RightMidfielder,
    PositionKey::Attacker,
];

const TWO_TWO_TWO: &[PositionKey] = &[
    PositionKey::LeftDefender,
    PositionKey::RightDefender,
    PositionKey::LeftMidfielder,
    PositionKey::RightMidfielder,
    PositionKey::LeftAttacker,
    PositionKey::RightAttacker,
];

const TWO_THREE_ONE: &[PositionKey] = &[
    PositionKey::LeftDefender,
    PositionKey::RightDefender,
    PositionKey::LeftMidfielder,
    PositionKey::CenterMidfielder,
    PositionKey::RightMidfielder,
    PositionKey::Attacker,
];

const FIELD_PAIRS: [PositionKey; 2] = [PositionKey::LeftPair, PositionKey::RightPair];

impl FormationShape {
    /// Outfield keys in lineup order (back to front, left to right).
    pub fn field_keys(&self) -> &'static [PositionKey] {
        match self {
            Self::TwoTwo => TWO_TWO,
            Self::OneTwoOne => ONE_TWO_ONE,
            Self::TwoTwoTwo => TWO_TWO_TWO,
            Self::TwoThreeOne => TWO_THREE_ONE,
        }
    }
}

fn pair_slots(key: PositionKey) -> [Slot; 2] {
    [
        Slot::Paired(key, PairRole::Defender),
        Slot::Paired(key, PairRole::Attacker),
    ]
}

impl FormationMode {
    /// Outfield slots in lineup order.
    pub fn field_slots(&self) -> Vec<Slot> {
        match self {
            Self::Individual { shape, .. } => {
                shape.field_keys().iter().map(|k| Slot::Single(*k)).collect()
            }
            Self::Pairs => FIELD_PAIRS.iter().flat_map(|k| pair_slots(*k)).collect(),
        }
    }

    /// Bench slots in bench order.
    pub fn substitute_slots(&self) -> Vec<Slot> {
        match self {
            Self::Individual {
                substitute_slots, ..
            } => SUBSTITUTE_KEYS
                .iter()
                .take(*substitute_slots)
                .map(|k| Slot::Single(*k))
                .collect(),
            Self::Pairs => pair_slots(PositionKey::SubPair).to_vec(),
        }
    }

    /// Goalie, then field, then bench.
    pub fn all_slots(&self) -> Vec<Slot> {
        let mut slots = vec![Slot::GOALIE];
        slots.extend(self.field_slots());
        slots.extend(self.substitute_slots());
        slots
    }

    /// Number of outfield positions (the reactivation index).
    pub fn field_position_count(&self) -> usize {
        match self {
            Self::Individual { shape, .. } => shape.field_keys().len(),
            Self::Pairs => FIELD_PAIRS.len() * 2,
        }
    }

    pub fn contains(&self, slot: Slot) -> bool {
        slot.is_goalie()
            || self.field_slots().contains(&slot)
            || self.substitute_slots().contains(&slot)
    }

    pub fn is_field_slot(&self, slot: Slot) -> bool {
        self.field_slots().contains(&slot)
    }

    /// Outfield slot count per role, roles without slots omitted.
    pub fn role_counts(&self) -> Vec<(PlayerRole, usize)> {
        let slots = self.field_slots();
        PlayerRole::OUTFIELD
            .iter()
            .map(|r| {
                let count = slots
                    .iter()
                    .filter(|s| role(self, **s) == Some(*r))
                    .count();
                (*r, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Role of a player standing in `slot`, or `None` if the slot does not exist
/// in `mode`.
pub fn role(mode: &FormationMode, slot: Slot) -> Option<PlayerRole> {
    if !mode.contains(slot) {
        return None;
    }

    let role = match slot {
        Slot::Paired(_, pair_role) => pair_role.role(),
        Slot::Single(key) => match key {
            PositionKey::Goalie => PlayerRole::Goalie,
            PositionKey::LeftDefender | PositionKey::RightDefender | PositionKey::Defender => {
                PlayerRole::Defender
            }
            PositionKey::LeftMidfielder
            | PositionKey::CenterMidfielder
            | PositionKey::RightMidfielder => PlayerRole::Midfielder,
            PositionKey::LeftAttacker | PositionKey::RightAttacker | PositionKey::Attacker => {
                PlayerRole::Attacker
            }
            PositionKey::Substitute1 | PositionKey::Substitute2 | PositionKey::Substitute3 => {
                PlayerRole::Substitute
            }
            // Pair keys only exist as `Slot::Paired`.
            PositionKey::LeftPair | PositionKey::RightPair | PositionKey::SubPair => return None,
        },
    };

    Some(role)
}
