//! Taking substitutes out of the rotation and bringing them back.
//!
//! Only individual modes support this; a paired bench has no spare slot to
//! park someone in.

use super::config::FormationMode;
use super::error::InvalidOperation;
use super::lineup::Lineup;
use super::stint::{self, MatchClock};

/// Park an active substitute at the bottom of the bench.
pub fn inactivate(
    mode: &FormationMode,
    lineup: &Lineup,
    clock: MatchClock,
    id: &str,
) -> Result<Lineup, InvalidOperation> {
    if mode.is_pairs() {
        return Err(InvalidOperation::UnsupportedInPairs("inactivation"));
    }
    let player = lineup
        .player(id)
        .ok_or_else(|| InvalidOperation::UnknownPlayer(id.to_string()))?;
    if player.is_inactive() || lineup.queue.is_inactive(id) {
        return Err(InvalidOperation::PlayerInactive(id.to_string()));
    }
    if !lineup.slot_of(id).is_some_and(|slot| slot.is_substitute()) {
        return Err(InvalidOperation::NotASubstitute(id.to_string()));
    }
    if lineup.active_substitutes(mode).len() <= 1 {
        return Err(InvalidOperation::LastActiveSubstitute(id.to_string()));
    }

    let mut after = lineup.clone();
    if let Some(player) = after.player_mut(id) {
        stint::update_stats(&mut player.stats, clock.now, clock.is_paused);
        player.stats.is_inactive = true;
    }
    after.queue.deactivate(id);
    after.relayout_substitutes(mode);
    after.refresh_next_out(mode);
    Ok(after)
}

/// Return an inactive player to the rotation as the next substitute in.
pub fn activate(
    mode: &FormationMode,
    lineup: &Lineup,
    clock: MatchClock,
    id: &str,
) -> Result<Lineup, InvalidOperation> {
    if mode.is_pairs() {
        return Err(InvalidOperation::UnsupportedInPairs("activation"));
    }
    let player = lineup
        .player(id)
        .ok_or_else(|| InvalidOperation::UnknownPlayer(id.to_string()))?;
    if !player.is_inactive() && !lineup.queue.is_inactive(id) {
        return Err(InvalidOperation::NotInactive(id.to_string()));
    }

    let mut after = lineup.clone();
    if let Some(player) = after.player_mut(id) {
        player.stats.is_inactive = false;
        stint::start_new_stint(&mut player.stats, clock.now);
    }
    after.queue.reactivate(id, mode.field_position_count());
    after.relayout_substitutes(mode);
    after.refresh_next_out(mode);
    Ok(after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::{PositionKey, Slot};
    use crate::state::lineup::fixtures::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inactivate_parks_at_bottom() {
        let (mode, lineup) = individual_lineup(3);
        let after = inactivate(&mode, &lineup, MatchClock::running(t(100)), "E").unwrap();

        assert_eq!(
            after.queue.active(),
            ids(&["A", "B", "C", "D", "F", "G"]).as_slice()
        );
        assert_eq!(after.queue.inactive(), ids(&["E"]).as_slice());
        assert_eq!(
            name_at(&after, Slot::Single(PositionKey::Substitute1)),
            Some("F")
        );
        assert_eq!(
            name_at(&after, Slot::Single(PositionKey::Substitute3)),
            Some("E")
        );

        let e = after.player("E").unwrap();
        assert!(e.is_inactive());
        assert_eq!(e.stats.time_as_sub_seconds, 100);
        assert_eq!(e.stats.current_position_key, Some(PositionKey::Substitute3));
        assert_eq!(
            after.player("F").unwrap().stats.current_position_key,
            Some(PositionKey::Substitute1)
        );
    }

    #[test]
    fn test_inactive_time_not_credited() {
        let (mode, lineup) = individual_lineup(2);
        let mut after = inactivate(&mode, &lineup, MatchClock::running(t(100)), "E").unwrap();
        after.update_all_stats(MatchClock::running(t(400)));
        assert_eq!(after.player("E").unwrap().stats.time_as_sub_seconds, 100);

        let mut back = activate(&mode, &after, MatchClock::running(t(500)), "E").unwrap();
        back.update_all_stats(MatchClock::running(t(560)));
        assert_eq!(back.player("E").unwrap().stats.time_as_sub_seconds, 160);
    }

    #[test]
    fn test_inactivate_rejected() {
        let (mode, lineup) = individual_lineup(2);
        let clock = MatchClock::running(t(10));

        assert_eq!(
            inactivate(&mode, &lineup, clock, "A"),
            Err(InvalidOperation::NotASubstitute("A".to_string()))
        );
        assert_eq!(
            inactivate(&mode, &lineup, clock, "G0"),
            Err(InvalidOperation::NotASubstitute("G0".to_string()))
        );
        assert_eq!(
            inactivate(&mode, &lineup, clock, "x"),
            Err(InvalidOperation::UnknownPlayer("x".to_string()))
        );

        let after = inactivate(&mode, &lineup, clock, "E").unwrap();
        assert_eq!(
            inactivate(&mode, &after, clock, "E"),
            Err(InvalidOperation::PlayerInactive("E".to_string()))
        );
        assert_eq!(
            inactivate(&mode, &after, clock, "F"),
            Err(InvalidOperation::LastActiveSubstitute("F".to_string()))
        );

        let (mode, lineup) = individual_lineup(1);
        assert_eq!(
            inactivate(&mode, &lineup, clock, "E"),
            Err(InvalidOperation::LastActiveSubstitute("E".to_string()))
        );

        let (mode, lineup) = pairs_lineup();
        assert_eq!(
            inactivate(&mode, &lineup, clock, "E"),
            Err(InvalidOperation::UnsupportedInPairs("inactivation"))
        );
    }

    #[test]
    fn test_activate_returns_next_in() {
        let (mode, lineup) = individual_lineup(3);
        let clock = MatchClock::running(t(60));
        let parked = inactivate(&mode, &lineup, clock, "E").unwrap();
        let after = activate(&mode, &parked, MatchClock::running(t(120)), "E").unwrap();

        assert_eq!(
            after.queue.active(),
            ids(&["A", "B", "C", "D", "E", "F", "G"]).as_slice()
        );
        assert!(after.queue.inactive().is_empty());
        assert_eq!(
            name_at(&after, Slot::Single(PositionKey::Substitute1)),
            Some("E")
        );
        assert_eq!(
            name_at(&after, Slot::Single(PositionKey::Substitute3)),
            Some("G")
        );

        let e = after.player("E").unwrap();
        assert!(!e.is_inactive());
        assert_eq!(e.stats.last_stint_checkpoint, Some(t(120)));
    }

    #[test]
    fn test_activate_rejected() {
        let (mode, lineup) = individual_lineup(2);
        assert_eq!(
            activate(&mode, &lineup, MatchClock::running(t(10)), "E"),
            Err(InvalidOperation::NotInactive("E".to_string()))
        );
    }
}
