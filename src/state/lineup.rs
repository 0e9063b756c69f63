//! The lineup every calculator takes in and hands back.
//!
//! A `Lineup` bundles the formation, the players, the rotation queue and the
//! derived next-off pointers. Calculators never mutate their input; they clone
//! it, apply one operation and return the new version.

use serde::{Deserialize, Serialize};

use super::catalog::{self, PositionKey, Slot};
use super::config::{ConfigurationError, FormationMode};
use super::formation::Formation;
use super::player::{self, Player, PlayerId};
use super::queue::RotationQueue;
use super::stint::{self, MatchClock, RoleChange};

/// Who comes off next.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NextOut {
    pub player: Option<PlayerId>,
    pub position: Option<PositionKey>,
    pub next_player: Option<PlayerId>,
    pub next_position: Option<PositionKey>,

    /// Paired mode only
    pub pair: Option<PositionKey>,
}

impl NextOut {
    /// Derive the pointers from the queue order.
    pub fn compute(mode: &FormationMode, formation: &Formation, queue: &RotationQueue) -> Self {
        let mut on_field = queue.active().iter().filter_map(|id| {
            formation
                .slot_of(id)
                .filter(|slot| slot.is_field())
                .map(|slot| (id.clone(), slot))
        });

        let first = on_field.next();
        let second = on_field.next();

        Self {
            pair: match mode {
                FormationMode::Pairs => first.as_ref().map(|(_, slot)| slot.key()),
                FormationMode::Individual { .. } => None,
            },
            player: first.as_ref().map(|(id, _)| id.clone()),
            position: first.as_ref().map(|(_, slot)| slot.key()),
            next_player: second.as_ref().map(|(id, _)| id.clone()),
            next_position: second.as_ref().map(|(_, slot)| slot.key()),
        }
    }

    /// Whether either pointer names `id`.
    pub fn tracks(&self, id: &str) -> bool {
        self.player.as_deref() == Some(id) || self.next_player.as_deref() == Some(id)
    }
}

/// Formation, players, queue and pointers of one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lineup {
    pub formation: Formation,
    pub players: Vec<Player>,
    pub queue: RotationQueue,
    pub next_out: NextOut,
}

impl Lineup {
    /// Set everyone up at kickoff and open their first stint.
    ///
    /// The queue is the field slots in lineup order followed by the bench in
    /// bench order; players flagged inactive go straight to the inactive list.
    pub fn kickoff(
        mode: &FormationMode,
        formation: Formation,
        mut players: Vec<Player>,
        clock: MatchClock,
    ) -> Result<Self, ConfigurationError> {
        if !formation.matches_mode(mode) {
            return Err(ConfigurationError::FormationMismatch(*mode));
        }

        for (slot, id) in formation.occupants() {
            let Some(player) = player::find_mut(&mut players, &id) else {
                continue;
            };
            let Some(role) = catalog::role(mode, slot) else {
                return Err(ConfigurationError::FormationMismatch(*mode));
            };
            let stats = &mut player.stats;
            stats.current_status = Some(slot.status());
            stats.current_role = Some(role);
            stats.current_position_key = Some(slot.key());
            stats.started_match_as = Some(slot.status());
            stint::start_new_stint(stats, clock.now);
        }

        let order: Vec<PlayerId> = mode
            .field_slots()
            .into_iter()
            .chain(mode.substitute_slots())
            .filter_map(|slot| formation.get(slot).cloned())
            .collect();
        let queue = RotationQueue::initialize(&order, |id| {
            player::find(&players, id).is_some_and(|p| p.is_inactive())
        });

        let mut lineup = Self {
            formation,
            players,
            queue,
            next_out: NextOut::default(),
        };
        if !mode.is_pairs() {
            lineup.relayout_substitutes(mode);
        }
        lineup.refresh_next_out(mode);
        Ok(lineup)
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        player::find(&self.players, id)
    }

    pub(crate) fn player_mut(&mut self, id: &str) -> Option<&mut Player> {
        player::find_mut(&mut self.players, id)
    }

    pub fn refresh_next_out(&mut self, mode: &FormationMode) {
        self.next_out = NextOut::compute(mode, &self.formation, &self.queue);
    }

    /// Bench players still in the rotation, in bench order.
    pub fn active_substitutes(&self, mode: &FormationMode) -> Vec<PlayerId> {
        mode.substitute_slots()
            .into_iter()
            .filter_map(|slot| self.formation.get(slot))
            .filter(|id| !self.queue.is_inactive(id))
            .cloned()
            .collect()
    }

    /// Rebuild the individual bench from the queue: active substitutes in
    /// queue order, inactive players at the bottom.
    pub(crate) fn relayout_substitutes(&mut self, mode: &FormationMode) {
        let field = mode.field_position_count();
        let bench: Vec<PlayerId> = self
            .queue
            .active()
            .iter()
            .skip(field)
            .chain(self.queue.inactive())
            .cloned()
            .collect();

        let slots = mode.substitute_slots();
        for (index, slot) in slots.iter().enumerate() {
            self.formation.set(*slot, bench.get(index).cloned());
        }
        self.sync_position_keys();
    }

    /// Point every player's position key at the slot they stand in.
    pub(crate) fn sync_position_keys(&mut self) {
        let occupants = self.formation.occupants();
        for player in &mut self.players {
            if let Some((slot, _)) = occupants.iter().find(|(_, id)| *id == player.id) {
                player.stats.current_position_key = Some(slot.key());
            }
        }
    }

    /// Close the player's stint and open one for `slot`. The formation is
    /// left to the caller.
    pub(crate) fn move_to_slot(
        &mut self,
        mode: &FormationMode,
        id: &str,
        slot: Slot,
        clock: MatchClock,
    ) {
        let Some(role) = catalog::role(mode, slot) else {
            return;
        };
        if let Some(player) = self.player_mut(id) {
            stint::change_role(
                &mut player.stats,
                clock,
                RoleChange {
                    status: slot.status(),
                    role,
                    position: Some(slot.key()),
                },
            );
        }
    }

    /// Slot a player stands in.
    pub fn slot_of(&self, id: &str) -> Option<Slot> {
        self.formation.slot_of(id)
    }

    /// Close every running stint, e.g. at the end of a period.
    pub fn update_all_stats(&mut self, clock: MatchClock) {
        for player in &mut self.players {
            if player.stats.current_status.is_some() {
                stint::update_stats(&mut player.stats, clock.now, clock.is_paused);
            }
        }
    }
}
