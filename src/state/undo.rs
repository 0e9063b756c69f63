//! Reverting the most recent substitution.

use chrono::{DateTime, Utc};

use super::catalog;
use super::config::FormationMode;
use super::error::InvalidOperation;
use super::lineup::Lineup;
use super::stint;
use super::substitution::SubstitutionSnapshot;

/// Put the lineup back the way `snapshot` found it.
///
/// Players who came on get their stats from before the substitution back.
/// Players who went off are treated as if they never left: starting from
/// their stats as of the substitution, the time since then is credited to
/// the slot they held. Anything credited to them on the bench in between
/// is discarded.
pub fn undo(
    mode: &FormationMode,
    lineup: &Lineup,
    snapshot: Option<&SubstitutionSnapshot>,
    now: DateTime<Utc>,
) -> Result<Lineup, InvalidOperation> {
    let snapshot = snapshot.ok_or(InvalidOperation::NothingToUndo)?;

    let mut after = lineup.clone();
    after.formation = snapshot.before_formation.clone();
    after.queue = snapshot.before_queue.clone();
    after.next_out = snapshot.before_next_out.clone();

    for (id, stats) in &snapshot.coming_on_original_stats {
        if let Some(player) = after.player_mut(id) {
            player.stats = stats.clone();
        }
    }

    for id in &snapshot.going_off_ids {
        let Some(slot) = snapshot.before_formation.slot_of(id) else {
            continue;
        };
        let role = catalog::role(mode, slot);
        let Some(player) = after.player_mut(id) else {
            continue;
        };

        let stats = &mut player.stats;
        match snapshot.going_off_stats.get(id) {
            Some(at_substitution) => *stats = at_substitution.clone(),
            None => stats.last_stint_checkpoint = Some(snapshot.timestamp),
        }
        stats.current_status = Some(slot.status());
        stats.current_role = role;
        stats.current_position_key = Some(slot.key());
        stint::update_stats(stats, now, false);
    }

    after.sync_position_keys();
    Ok(after)
}
