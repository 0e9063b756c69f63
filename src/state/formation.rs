//! Formation: which player stands in which slot.
//!
//! Individual modes use a flat position map. Paired mode nests a defender and
//! an attacker inside each pair. Both have exactly one goalie slot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::{PairRole, PositionKey, Slot};
use super::config::FormationMode;
use super::player::PlayerId;

/// A defender/attacker pair.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pair {
    pub defender: Option<PlayerId>,
    pub attacker: Option<PlayerId>,
}

impl Pair {
    pub fn new(defender: impl Into<PlayerId>, attacker: impl Into<PlayerId>) -> Self {
        Self {
            defender: Some(defender.into()),
            attacker: Some(attacker.into()),
        }
    }

    pub fn get(&self, role: PairRole) -> Option<&PlayerId> {
        match role {
            PairRole::Defender => self.defender.as_ref(),
            PairRole::Attacker => self.attacker.as_ref(),
        }
    }

    fn slot_mut(&mut self, role: PairRole) -> &mut Option<PlayerId> {
        match role {
            PairRole::Defender => &mut self.defender,
            PairRole::Attacker => &mut self.attacker,
        }
    }

    /// Same players, roles exchanged.
    pub fn inverted(&self) -> Self {
        Self {
            defender: self.attacker.clone(),
            attacker: self.defender.clone(),
        }
    }

    /// Occupants, defender first.
    pub fn members(&self) -> impl Iterator<Item = (PairRole, &PlayerId)> {
        [
            (PairRole::Defender, self.defender.as_ref()),
            (PairRole::Attacker, self.attacker.as_ref()),
        ]
        .into_iter()
        .filter_map(|(role, id)| id.map(|id| (role, id)))
    }
}

/// Slot assignment for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formation {
    Individual {
        goalie: Option<PlayerId>,
        positions: BTreeMap<PositionKey, PlayerId>,
    },
    Pairs {
        goalie: Option<PlayerId>,
        left_pair: Pair,
        right_pair: Pair,
        sub_pair: Pair,
    },
}

impl Formation {
    /// An empty formation shaped for `mode`.
    pub fn empty(mode: &FormationMode) -> Self {
        match mode {
            FormationMode::Individual { .. } => Self::Individual {
                goalie: None,
                positions: BTreeMap::new(),
            },
            FormationMode::Pairs => Self::Pairs {
                goalie: None,
                left_pair: Pair::default(),
                right_pair: Pair::default(),
                sub_pair: Pair::default(),
            },
        }
    }

    /// Build from `(slot, player)` assignments; slots the shape cannot hold
    /// are skipped.
    pub fn from_slots<I, S>(mode: &FormationMode, assignments: I) -> Self
    where
        I: IntoIterator<Item = (Slot, S)>,
        S: Into<PlayerId>,
    {
        let mut formation = Self::empty(mode);
        for (slot, id) in assignments {
            formation.set(slot, Some(id.into()));
        }
        formation
    }

    /// Whether this layout is the one `mode` uses.
    pub fn matches_mode(&self, mode: &FormationMode) -> bool {
        matches!(
            (self, mode),
            (Self::Individual { .. }, FormationMode::Individual { .. })
                | (Self::Pairs { .. }, FormationMode::Pairs)
        )
    }

    pub fn goalie(&self) -> Option<&PlayerId> {
        match self {
            Self::Individual { goalie, .. } | Self::Pairs { goalie, .. } => goalie.as_ref(),
        }
    }

    pub fn pair(&self, key: PositionKey) -> Option<&Pair> {
        match self {
            Self::Pairs {
                left_pair,
                right_pair,
                sub_pair,
                ..
            } => match key {
                PositionKey::LeftPair => Some(left_pair),
                PositionKey::RightPair => Some(right_pair),
                PositionKey::SubPair => Some(sub_pair),
                _ => None,
            },
            Self::Individual { .. } => None,
        }
    }

    fn pair_mut(&mut self, key: PositionKey) -> Option<&mut Pair> {
        match self {
            Self::Pairs {
                left_pair,
                right_pair,
                sub_pair,
                ..
            } => match key {
                PositionKey::LeftPair => Some(left_pair),
                PositionKey::RightPair => Some(right_pair),
                PositionKey::SubPair => Some(sub_pair),
                _ => None,
            },
            Self::Individual { .. } => None,
        }
    }

    /// Replace a whole pair.
    pub fn set_pair(&mut self, key: PositionKey, pair: Pair) {
        if let Some(target) = self.pair_mut(key) {
            *target = pair;
        }
    }

    /// Occupant of a slot.
    pub fn get(&self, slot: Slot) -> Option<&PlayerId> {
        match (self, slot) {
            (_, Slot::Single(PositionKey::Goalie)) => self.goalie(),
            (Self::Individual { positions, .. }, Slot::Single(key)) => positions.get(&key),
            (Self::Pairs { .. }, Slot::Paired(key, role)) => self.pair(key)?.get(role),
            _ => None,
        }
    }

    /// Put a player into (or clear) a slot. Returns the previous occupant.
    pub fn set(&mut self, slot: Slot, id: Option<PlayerId>) -> Option<PlayerId> {
        match slot {
            Slot::Single(PositionKey::Goalie) => {
                let (Self::Individual { goalie, .. } | Self::Pairs { goalie, .. }) = self;
                std::mem::replace(goalie, id)
            }
            Slot::Single(key) => match self {
                Self::Individual { positions, .. } if !key.is_pair() => match id {
                    Some(id) => positions.insert(key, id),
                    None => positions.remove(&key),
                },
                _ => None,
            },
            Slot::Paired(key, role) => {
                let pair = self.pair_mut(key)?;
                std::mem::replace(pair.slot_mut(role), id)
            }
        }
    }

    /// Every occupied slot with its player.
    pub fn occupants(&self) -> Vec<(Slot, PlayerId)> {
        let mut occupied = Vec::new();
        if let Some(goalie) = self.goalie() {
            occupied.push((Slot::GOALIE, goalie.clone()));
        }
        match self {
            Self::Individual { positions, .. } => {
                occupied.extend(
                    positions
                        .iter()
                        .map(|(key, id)| (Slot::Single(*key), id.clone())),
                );
            }
            Self::Pairs {
                left_pair,
                right_pair,
                sub_pair,
                ..
            } => {
                for (key, pair) in [
                    (PositionKey::LeftPair, left_pair),
                    (PositionKey::RightPair, right_pair),
                    (PositionKey::SubPair, sub_pair),
                ] {
                    occupied.extend(
                        pair.members()
                            .map(|(role, id)| (Slot::Paired(key, role), id.clone())),
                    );
                }
            }
        }
        occupied
    }

    /// The slot a player stands in.
    pub fn slot_of(&self, id: &str) -> Option<Slot> {
        self.occupants()
            .into_iter()
            .find(|(_, occupant)| occupant == id)
            .map(|(slot, _)| slot)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.slot_of(id).is_some()
    }
}
