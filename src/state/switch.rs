//! Position and goalie switches.
//!
//! Both are immediate and do not go through the substitution machinery:
//! nobody leaves the rotation, two players just trade places.

use super::catalog::Slot;
use super::config::FormationMode;
use super::error::InvalidOperation;
use super::lineup::Lineup;
use super::stint::MatchClock;

fn field_slot(mode: &FormationMode, lineup: &Lineup, id: &str) -> Result<Slot, InvalidOperation> {
    let slot = lineup
        .slot_of(id)
        .ok_or_else(|| InvalidOperation::UnknownPlayer(id.to_string()))?;
    if slot.is_goalie() {
        return Err(InvalidOperation::GoalieNotSwitchable(id.to_string()));
    }
    if !mode.is_field_slot(slot) {
        return Err(InvalidOperation::NotInFieldPosition(id.to_string()));
    }
    Ok(slot)
}

/// Two field players exchange positions.
///
/// Each takes the role of the slot they move into; in paired mode that is
/// the counterpart's pair role, and the two also trade queue places so the
/// queue stays grouped by pair.
pub fn switch_positions(
    mode: &FormationMode,
    lineup: &Lineup,
    clock: MatchClock,
    first: &str,
    second: &str,
) -> Result<Lineup, InvalidOperation> {
    if first == second {
        return Err(InvalidOperation::SamePlayer(first.to_string()));
    }
    let first_slot = field_slot(mode, lineup, first)?;
    let second_slot = field_slot(mode, lineup, second)?;

    let mut after = lineup.clone();
    after.formation.set(first_slot, Some(second.to_string()));
    after.formation.set(second_slot, Some(first.to_string()));
    after.move_to_slot(mode, first, second_slot, clock);
    after.move_to_slot(mode, second, first_slot, clock);

    if mode.is_pairs() {
        after.queue.swap(first, second);
    }
    after.refresh_next_out(mode);
    Ok(after)
}

/// Put `new_goalie` in goal; the current goalie takes their slot and their
/// place in the queue.
pub fn switch_goalie(
    mode: &FormationMode,
    lineup: &Lineup,
    clock: MatchClock,
    new_goalie: &str,
) -> Result<Lineup, InvalidOperation> {
    let player = lineup
        .player(new_goalie)
        .ok_or_else(|| InvalidOperation::UnknownPlayer(new_goalie.to_string()))?;
    if player.is_inactive() || lineup.queue.is_inactive(new_goalie) {
        return Err(InvalidOperation::PlayerInactive(new_goalie.to_string()));
    }
    let old_goalie = lineup
        .formation
        .goalie()
        .cloned()
        .ok_or(InvalidOperation::NoGoalie)?;
    if old_goalie == new_goalie {
        return Err(InvalidOperation::AlreadyGoalie(new_goalie.to_string()));
    }
    let slot = lineup
        .slot_of(new_goalie)
        .ok_or_else(|| InvalidOperation::UnknownPlayer(new_goalie.to_string()))?;

    let mut after = lineup.clone();
    after.formation.set(Slot::GOALIE, Some(new_goalie.to_string()));
    after.formation.set(slot, Some(old_goalie.clone()));
    after.move_to_slot(mode, new_goalie, Slot::GOALIE, clock);
    after.move_to_slot(mode, &old_goalie, slot, clock);

    after.queue.replace(new_goalie, &old_goalie);
    after.refresh_next_out(mode);
    Ok(after)
}
