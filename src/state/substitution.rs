//! Substitution manager.
//!
//! One substitution is one atomic state change produced by a pure function:
//! the algorithm is picked once from the formation mode, takes a
//! [`SubstitutionContext`] and returns a new [`Lineup`] plus the snapshot
//! needed to undo it.
//!
//! # Patterns
//!
//! ```text
//! Simple (1 slot)        Carousel (2 slots)       Advanced carousel (3 slots)
//!
//!  field ◀──▶ s1          field ──▶ s2              field ──▶ s3
//!                           ▲        │                ▲        │
//!                           │        ▼                │        ▼
//!                           s1 ◀──── s2               s1 ◀─ s2 ◀─ s3
//!
//! Pairs
//!
//!  target pair ──▶ sub pair (roles kept, or inverted when swapping)
//!  sub pair    ──▶ target pair (roles kept)
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{PositionKey, Slot};
use super::config::{ConfigurationError, FormationMode, PairRoleRotation};
use super::error::InvalidOperation;
use super::formation::Formation;
use super::lineup::{Lineup, NextOut};
use super::player::{PlayerId, PlayerStats};
use super::queue::{InsertPosition, RotationQueue};
use super::stint::MatchClock;

/// Everything needed to reverse the last substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionSnapshot {
    pub before_formation: Formation,
    pub before_queue: RotationQueue,
    pub before_next_out: NextOut,
    pub going_off_ids: Vec<PlayerId>,
    pub coming_on_ids: Vec<PlayerId>,

    /// Stats of the incoming players before they came on
    pub coming_on_original_stats: BTreeMap<PlayerId, PlayerStats>,

    /// Stats of the outgoing players right after they went off
    #[serde(default)]
    pub going_off_stats: BTreeMap<PlayerId, PlayerStats>,

    pub timestamp: DateTime<Utc>,
}

/// Input of one substitution.
#[derive(Debug, Clone, Copy)]
pub struct SubstitutionContext<'a> {
    pub mode: FormationMode,
    pub rotation: PairRoleRotation,
    pub lineup: &'a Lineup,
    pub clock: MatchClock,

    /// Players (individual) to bring on in this call; clamped to the active
    /// bench. Paired mode always rotates one pair.
    pub count: usize,
}

impl<'a> SubstitutionContext<'a> {
    pub fn new(
        mode: FormationMode,
        rotation: PairRoleRotation,
        lineup: &'a Lineup,
        clock: MatchClock,
    ) -> Self {
        Self {
            mode,
            rotation,
            lineup,
            clock,
            count: 1,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
}

/// Output of one substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionResult {
    pub lineup: Lineup,
    pub going_off_ids: Vec<PlayerId>,
    pub coming_on_ids: Vec<PlayerId>,
    pub snapshot: SubstitutionSnapshot,
}

impl SubstitutionResult {
    /// Nothing could be substituted (no active bench).
    pub fn is_empty(&self) -> bool {
        self.coming_on_ids.is_empty()
    }

    fn unchanged(ctx: &SubstitutionContext) -> Self {
        Self {
            lineup: ctx.lineup.clone(),
            going_off_ids: Vec::new(),
            coming_on_ids: Vec::new(),
            snapshot: snapshot(ctx, ctx.lineup, Vec::new(), Vec::new()),
        }
    }
}

/// The closed set of substitution algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubstitutionAlgorithm {
    /// Target field pair and sub pair trade places.
    Pairs,
    /// field -> substitute1, substitute1 -> field.
    Simple,
    /// field -> substitute2, substitute2 -> substitute1, substitute1 -> field.
    Carousel,
    /// field -> substitute3, substitute3 -> substitute2,
    /// substitute2 -> substitute1, substitute1 -> field.
    AdvancedCarousel,
}

impl SubstitutionAlgorithm {
    /// Pick the algorithm for a formation mode.
    pub fn select(mode: &FormationMode) -> Result<Self, ConfigurationError> {
        match mode {
            FormationMode::Pairs => Ok(Self::Pairs),
            FormationMode::Individual {
                substitute_slots: 1,
                ..
            } => Ok(Self::Simple),
            FormationMode::Individual {
                substitute_slots: 2,
                ..
            } => Ok(Self::Carousel),
            FormationMode::Individual {
                substitute_slots: 3,
                ..
            } => Ok(Self::AdvancedCarousel),
            other => Err(ConfigurationError::UnsupportedMode(*other)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pairs => "pairs",
            Self::Simple => "simple",
            Self::Carousel => "carousel",
            Self::AdvancedCarousel => "advanced_carousel",
        }
    }

    /// Bench slots the carousel cycles through, top first.
    fn bench(&self) -> &'static [PositionKey] {
        match self {
            Self::Pairs => &[PositionKey::SubPair],
            Self::Simple => &[PositionKey::Substitute1],
            Self::Carousel => &[PositionKey::Substitute1, PositionKey::Substitute2],
            Self::AdvancedCarousel => &[
                PositionKey::Substitute1,
                PositionKey::Substitute2,
                PositionKey::Substitute3,
            ],
        }
    }

    /// Run the algorithm.
    ///
    /// Fails when the context's mode does not belong to this algorithm.
    pub fn apply(
        &self,
        ctx: &SubstitutionContext,
    ) -> Result<SubstitutionResult, ConfigurationError> {
        if Self::select(&ctx.mode)? != *self {
            return Err(ConfigurationError::UnsupportedMode(ctx.mode));
        }

        let result = match self {
            Self::Pairs => rotate_pairs(ctx),
            Self::Simple | Self::Carousel | Self::AdvancedCarousel => {
                rotate_individual(ctx, self.bench())
            }
        };
        Ok(result)
    }
}

/// Select the algorithm for `ctx.mode` and apply it.
pub fn apply(ctx: &SubstitutionContext) -> Result<SubstitutionResult, ConfigurationError> {
    SubstitutionAlgorithm::select(&ctx.mode)?.apply(ctx)
}

fn stats_of(lineup: &Lineup, ids: &[PlayerId]) -> BTreeMap<PlayerId, PlayerStats> {
    ids.iter()
        .filter_map(|id| lineup.player(id))
        .map(|p| (p.id.clone(), p.stats.clone()))
        .collect()
}

fn snapshot(
    ctx: &SubstitutionContext,
    after: &Lineup,
    going_off_ids: Vec<PlayerId>,
    coming_on_ids: Vec<PlayerId>,
) -> SubstitutionSnapshot {
    let coming_on_original_stats = stats_of(ctx.lineup, &coming_on_ids);
    let going_off_stats = stats_of(after, &going_off_ids);

    SubstitutionSnapshot {
        before_formation: ctx.lineup.formation.clone(),
        before_queue: ctx.lineup.queue.clone(),
        before_next_out: ctx.lineup.next_out.clone(),
        going_off_ids,
        coming_on_ids,
        coming_on_original_stats,
        going_off_stats,
        timestamp: ctx.clock.now,
    }
}

/// One carousel cycle per incoming player.
///
/// The outgoing players are the first `n` on-field players in queue order.
/// Incoming players are the top `n` active bench players; they fill the
/// vacated positions in order, or in reverse order when roles swap every
/// rotation. The rest of the bench moves up and the outgoing players take
/// the bottom active bench slots in the order they went off.
fn rotate_individual(ctx: &SubstitutionContext, bench: &[PositionKey]) -> SubstitutionResult {
    let before = ctx.lineup;

    let active_bench: Vec<(Slot, PlayerId)> = bench
        .iter()
        .map(|key| Slot::Single(*key))
        .filter_map(|slot| before.formation.get(slot).map(|id| (slot, id.clone())))
        .filter(|(_, id)| !before.queue.is_inactive(id))
        .collect();

    let n = ctx.count.max(1).min(active_bench.len());
    let outgoing: Vec<(Slot, PlayerId)> = before
        .queue
        .active()
        .iter()
        .filter_map(|id| {
            before
                .formation
                .slot_of(id)
                .filter(|slot| slot.is_field())
                .map(|slot| (slot, id.clone()))
        })
        .take(n)
        .collect();

    let n = outgoing.len();
    if n == 0 {
        return SubstitutionResult::unchanged(ctx);
    }

    let incoming: Vec<PlayerId> = active_bench[..n].iter().map(|(_, id)| id.clone()).collect();
    let going_off: Vec<PlayerId> = outgoing.iter().map(|(_, id)| id.clone()).collect();

    let mut after = before.clone();

    for (i, id) in incoming.iter().enumerate() {
        let target = match ctx.rotation {
            PairRoleRotation::KeepThroughoutPeriod => outgoing[i].0,
            PairRoleRotation::SwapEveryRotation => outgoing[n - 1 - i].0,
        };
        after.formation.set(target, Some(id.clone()));
        after.move_to_slot(&ctx.mode, id, target, ctx.clock);
    }

    let new_bench = active_bench[n..]
        .iter()
        .map(|(_, id)| id.clone())
        .chain(going_off.iter().cloned());
    for ((slot, _), id) in active_bench.iter().zip(new_bench) {
        after.formation.set(*slot, Some(id.clone()));
        if going_off.contains(&id) {
            after.move_to_slot(&ctx.mode, &id, *slot, ctx.clock);
        } else if let Some(player) = after.player_mut(&id) {
            // Moving up the bench keeps status and role
            player.stats.current_position_key = Some(slot.key());
        }
    }

    for id in &going_off {
        after.queue.rotate_to_end(id);
    }
    after.refresh_next_out(&ctx.mode);

    let snapshot = snapshot(ctx, &after, going_off.clone(), incoming.clone());
    SubstitutionResult {
        lineup: after,
        snapshot,
        going_off_ids: going_off,
        coming_on_ids: incoming,
    }
}

/// Swap the target field pair with the sub pair.
fn rotate_pairs(ctx: &SubstitutionContext) -> SubstitutionResult {
    let before = ctx.lineup;

    let target = before
        .next_out
        .pair
        .filter(|key| matches!(key, PositionKey::LeftPair | PositionKey::RightPair))
        .or_else(|| NextOut::compute(&ctx.mode, &before.formation, &before.queue).pair)
        .unwrap_or(PositionKey::LeftPair);

    let (Some(out_pair), Some(sub_pair)) = (
        before.formation.pair(target).cloned(),
        before.formation.pair(PositionKey::SubPair).cloned(),
    ) else {
        return SubstitutionResult::unchanged(ctx);
    };
    if sub_pair.members().next().is_none() {
        return SubstitutionResult::unchanged(ctx);
    }

    let parked = match ctx.rotation {
        PairRoleRotation::KeepThroughoutPeriod => out_pair.clone(),
        PairRoleRotation::SwapEveryRotation => out_pair.inverted(),
    };

    let mut after = before.clone();
    after.formation.set_pair(target, sub_pair.clone());
    after.formation.set_pair(PositionKey::SubPair, parked.clone());

    let coming_on: Vec<PlayerId> = sub_pair.members().map(|(_, id)| id.clone()).collect();
    let going_off: Vec<PlayerId> = out_pair.members().map(|(_, id)| id.clone()).collect();

    for (role, id) in sub_pair.members() {
        after.move_to_slot(&ctx.mode, id, Slot::Paired(target, role), ctx.clock);
    }
    for (role, id) in parked.members() {
        after.move_to_slot(
            &ctx.mode,
            id,
            Slot::Paired(PositionKey::SubPair, role),
            ctx.clock,
        );
        after.queue.rotate_to_end(id);
    }
    after.refresh_next_out(&ctx.mode);

    let snapshot = snapshot(ctx, &after, going_off.clone(), coming_on.clone());
    SubstitutionResult {
        lineup: after,
        snapshot,
        going_off_ids: going_off,
        coming_on_ids: coming_on,
    }
}

/// Make an on-field player (paired mode: their whole pair) the next to go
/// off.
pub fn set_next_to_sub_out(
    mode: &FormationMode,
    lineup: &Lineup,
    id: &str,
) -> Result<Lineup, InvalidOperation> {
    let slot = lineup
        .slot_of(id)
        .ok_or_else(|| InvalidOperation::UnknownPlayer(id.to_string()))?;
    if !mode.is_field_slot(slot) {
        return Err(InvalidOperation::NotInFieldPosition(id.to_string()));
    }

    let mut after = lineup.clone();
    match slot {
        Slot::Paired(key, _) => {
            let members: Vec<PlayerId> = lineup
                .formation
                .pair(key)
                .map(|pair| pair.members().map(|(_, id)| id.clone()).collect())
                .unwrap_or_default();
            for member in members.iter().rev() {
                after.queue.insert_at(member, InsertPosition::Start);
            }
        }
        Slot::Single(_) => after.queue.insert_at(id, InsertPosition::Start),
    }
    after.refresh_next_out(mode);
    Ok(after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::catalog::{PairRole, PlayerRole, PlayerStatus};
    use crate::state::config::FormationShape;
    use crate::state::lineup::fixtures::*;
    use pretty_assertions::assert_eq;

    fn substitute(
        mode: FormationMode,
        lineup: &Lineup,
        at: i64,
        rotation: PairRoleRotation,
    ) -> SubstitutionResult {
        let ctx = SubstitutionContext::new(mode, rotation, lineup, MatchClock::running(t(at)));
        apply(&ctx).unwrap()
    }

    fn single(key: PositionKey) -> Slot {
        Slot::Single(key)
    }

    #[test]
    fn test_select() {
        assert_eq!(
            SubstitutionAlgorithm::select(&individual_mode(1)),
            Ok(SubstitutionAlgorithm::Simple)
        );
        assert_eq!(
            SubstitutionAlgorithm::select(&individual_mode(2)),
            Ok(SubstitutionAlgorithm::Carousel)
        );
        assert_eq!(
            SubstitutionAlgorithm::select(&individual_mode(3)),
            Ok(SubstitutionAlgorithm::AdvancedCarousel)
        );
        assert_eq!(
            SubstitutionAlgorithm::select(&FormationMode::Pairs),
            Ok(SubstitutionAlgorithm::Pairs)
        );
    }

    #[test]
    fn test_unknown_mode_is_fatal() {
        let (_, lineup) = individual_lineup(2);
        let mode = FormationMode::Individual {
            shape: FormationShape::TwoTwo,
            substitute_slots: 5,
        };
        let ctx = SubstitutionContext::new(
            mode,
            PairRoleRotation::default(),
            &lineup,
            MatchClock::running(t(10)),
        );
        assert_eq!(
            apply(&ctx),
            Err(ConfigurationError::UnsupportedMode(mode))
        );

        // Algorithm run against a mode it does not serve
        let ctx = SubstitutionContext::new(
            individual_mode(2),
            PairRoleRotation::default(),
            &lineup,
            MatchClock::running(t(10)),
        );
        assert!(SubstitutionAlgorithm::Pairs.apply(&ctx).is_err());
    }

    #[test]
    fn test_simple_trade() {
        let (mode, lineup) = individual_lineup(1);
        let result = substitute(mode, &lineup, 300, PairRoleRotation::default());
        let after = &result.lineup;

        assert_eq!(name_at(after, single(PositionKey::LeftDefender)), Some("E"));
        assert_eq!(name_at(after, single(PositionKey::Substitute1)), Some("A"));
        assert_eq!(after.queue.active(), ids(&["B", "C", "D", "E", "A"]).as_slice());
        assert_eq!(result.going_off_ids, ids(&["A"]));
        assert_eq!(result.coming_on_ids, ids(&["E"]));
        assert_eq!(after.next_out.player.as_deref(), Some("B"));
    }

    #[test]
    fn test_carousel_example() {
        let (mode, lineup) = individual_lineup(2);
        let result = substitute(mode, &lineup, 300, PairRoleRotation::default());
        let after = &result.lineup;

        assert_eq!(name_at(after, single(PositionKey::LeftDefender)), Some("E"));
        assert_eq!(name_at(after, single(PositionKey::Substitute1)), Some("F"));
        assert_eq!(name_at(after, single(PositionKey::Substitute2)), Some("A"));
        assert_eq!(
            after.queue.active(),
            ids(&["B", "C", "D", "E", "F", "A"]).as_slice()
        );
        assert_eq!(after.next_out.player.as_deref(), Some("B"));
        assert_eq!(after.next_out.next_player.as_deref(), Some("C"));
    }

    #[test]
    fn test_advanced_carousel() {
        let (mode, lineup) = individual_lineup(3);
        let result = substitute(mode, &lineup, 300, PairRoleRotation::default());
        let after = &result.lineup;

        assert_eq!(name_at(after, single(PositionKey::LeftDefender)), Some("E"));
        assert_eq!(name_at(after, single(PositionKey::Substitute1)), Some("F"));
        assert_eq!(name_at(after, single(PositionKey::Substitute2)), Some("G"));
        assert_eq!(name_at(after, single(PositionKey::Substitute3)), Some("A"));
        assert_eq!(
            after.queue.active(),
            ids(&["B", "C", "D", "E", "F", "G", "A"]).as_slice()
        );
    }

    #[test]
    fn test_substitution_stats() {
        let (mode, lineup) = individual_lineup(2);
        let result = substitute(mode, &lineup, 300, PairRoleRotation::default());
        let after = &result.lineup;

        let a = after.player("A").unwrap();
        assert_eq!(a.stats.time_as_defender_seconds, 300);
        assert_eq!(a.stats.time_on_field_seconds, 300);
        assert_eq!(a.stats.current_status, Some(PlayerStatus::Substitute));
        assert_eq!(a.stats.current_position_key, Some(PositionKey::Substitute2));
        assert_eq!(a.stats.last_stint_checkpoint, Some(t(300)));

        let e = after.player("E").unwrap();
        assert_eq!(e.stats.time_as_sub_seconds, 300);
        assert_eq!(e.stats.current_status, Some(PlayerStatus::OnField));
        assert_eq!(e.stats.current_role, Some(PlayerRole::Defender));

        // Moving up the bench does not close the stint
        let f = after.player("F").unwrap();
        assert_eq!(f.stats.current_position_key, Some(PositionKey::Substitute1));
        assert_eq!(f.stats.last_stint_checkpoint, Some(t(0)));

        assert_eq!(
            result.snapshot.coming_on_original_stats["E"],
            lineup.player("E").unwrap().stats
        );
        assert_eq!(result.snapshot.going_off_stats["A"], a.stats);
        assert_eq!(result.snapshot.timestamp, t(300));
    }

    #[test]
    fn test_substitution_is_pure() {
        let (mode, lineup) = individual_lineup(2);
        let before = lineup.clone();
        let first = substitute(mode, &lineup, 300, PairRoleRotation::default());
        let second = substitute(mode, &lineup, 300, PairRoleRotation::default());
        assert_eq!(lineup, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_carousel_closure() {
        // Three rotating players cycle back after three substitutions at
        // the same position.
        let (mode, mut lineup) = individual_lineup(2);
        let start = lineup.formation.clone();
        for round in 1..=3 {
            let current = lineup
                .formation
                .get(single(PositionKey::LeftDefender))
                .cloned()
                .unwrap();
            lineup = set_next_to_sub_out(&mode, &lineup, &current).unwrap();
            lineup = substitute(mode, &lineup, round * 100, PairRoleRotation::default()).lineup;
        }
        assert_eq!(lineup.formation, start);

        // Four rotating players with three bench slots
        let (mode, mut lineup) = individual_lineup(3);
        let start = lineup.formation.clone();
        for round in 1..=4 {
            let current = lineup
                .formation
                .get(single(PositionKey::LeftDefender))
                .cloned()
                .unwrap();
            lineup = set_next_to_sub_out(&mode, &lineup, &current).unwrap();
            lineup = substitute(mode, &lineup, round * 100, PairRoleRotation::default()).lineup;
        }
        assert_eq!(lineup.formation, start);
        let a = lineup.player("A").unwrap();
        assert_eq!(a.stats.time_as_defender_seconds, 100);
        assert_eq!(a.stats.time_as_sub_seconds, 300);
    }

    #[test]
    fn test_batch_keep_order() {
        let (mode, lineup) = individual_lineup(3);
        let ctx = SubstitutionContext::new(
            mode,
            PairRoleRotation::KeepThroughoutPeriod,
            &lineup,
            MatchClock::running(t(120)),
        )
        .with_count(2);
        let result = apply(&ctx).unwrap();
        let after = &result.lineup;

        assert_eq!(result.going_off_ids, ids(&["A", "B"]));
        assert_eq!(result.coming_on_ids, ids(&["E", "F"]));
        assert_eq!(name_at(after, single(PositionKey::LeftDefender)), Some("E"));
        assert_eq!(name_at(after, single(PositionKey::RightDefender)), Some("F"));
        assert_eq!(name_at(after, single(PositionKey::Substitute1)), Some("G"));
        assert_eq!(name_at(after, single(PositionKey::Substitute2)), Some("A"));
        assert_eq!(name_at(after, single(PositionKey::Substitute3)), Some("B"));
        assert_eq!(
            after.queue.active(),
            ids(&["C", "D", "E", "F", "G", "A", "B"]).as_slice()
        );

        // Same outcome as two single cycles
        let once = substitute(mode, &lineup, 120, PairRoleRotation::default()).lineup;
        let twice = substitute(mode, &once, 120, PairRoleRotation::default()).lineup;
        assert_eq!(twice.formation, after.formation);
        assert_eq!(twice.queue, after.queue);
    }

    #[test]
    fn test_batch_swapped_order() {
        let (mode, lineup) = individual_lineup(2);
        let ctx = SubstitutionContext::new(
            mode,
            PairRoleRotation::SwapEveryRotation,
            &lineup,
            MatchClock::running(t(120)),
        )
        .with_count(2);
        let after = apply(&ctx).unwrap().lineup;

        assert_eq!(name_at(&after, single(PositionKey::LeftDefender)), Some("F"));
        assert_eq!(name_at(&after, single(PositionKey::RightDefender)), Some("E"));
        assert_eq!(name_at(&after, single(PositionKey::Substitute1)), Some("A"));
        assert_eq!(name_at(&after, single(PositionKey::Substitute2)), Some("B"));
    }

    #[test]
    fn test_batch_clamped_to_bench() {
        let (mode, lineup) = individual_lineup(1);
        let ctx = SubstitutionContext::new(
            mode,
            PairRoleRotation::default(),
            &lineup,
            MatchClock::running(t(60)),
        )
        .with_count(3);
        let result = apply(&ctx).unwrap();
        assert_eq!(result.coming_on_ids, ids(&["E"]));
    }

    #[test]
    fn test_inactive_bench_skipped() {
        let (mode, mut lineup) = individual_lineup(3);
        // F out of the rotation, parked at the bottom
        lineup.queue.deactivate("F");
        lineup.player_mut("F").unwrap().stats.is_inactive = true;
        lineup.relayout_substitutes(&mode);
        assert_eq!(name_at(&lineup, single(PositionKey::Substitute2)), Some("G"));
        assert_eq!(name_at(&lineup, single(PositionKey::Substitute3)), Some("F"));

        let after = substitute(mode, &lineup, 60, PairRoleRotation::default()).lineup;
        assert_eq!(name_at(&after, single(PositionKey::LeftDefender)), Some("E"));
        assert_eq!(name_at(&after, single(PositionKey::Substitute1)), Some("G"));
        assert_eq!(name_at(&after, single(PositionKey::Substitute2)), Some("A"));
        assert_eq!(name_at(&after, single(PositionKey::Substitute3)), Some("F"));
        assert!(!after.queue.active().contains(&"F".to_string()));
    }

    #[test]
    fn test_pairs_keep_roles() {
        let (mode, lineup) = pairs_lineup();
        let result = substitute(mode, &lineup, 240, PairRoleRotation::KeepThroughoutPeriod);
        let after = &result.lineup;

        let left = after.formation.pair(PositionKey::LeftPair).unwrap();
        assert_eq!(left.defender.as_deref(), Some("E"));
        assert_eq!(left.attacker.as_deref(), Some("F"));
        let sub = after.formation.pair(PositionKey::SubPair).unwrap();
        assert_eq!(sub.defender.as_deref(), Some("A"));
        assert_eq!(sub.attacker.as_deref(), Some("B"));

        assert_eq!(
            after.queue.active(),
            ids(&["C", "D", "E", "F", "A", "B"]).as_slice()
        );
        assert_eq!(after.next_out.pair, Some(PositionKey::RightPair));

        let a = after.player("A").unwrap();
        assert_eq!(a.stats.time_as_defender_seconds, 240);
        assert_eq!(a.stats.current_status, Some(PlayerStatus::Substitute));
        assert_eq!(a.stats.current_role, Some(PlayerRole::Defender));
        assert_eq!(a.stats.current_position_key, Some(PositionKey::SubPair));

        let f = after.player("F").unwrap();
        assert_eq!(f.stats.current_role, Some(PlayerRole::Attacker));
        assert_eq!(f.stats.current_position_key, Some(PositionKey::LeftPair));
        assert_eq!(f.stats.time_as_sub_seconds, 240);
    }

    #[test]
    fn test_pairs_swap_every_rotation() {
        let (mode, lineup) = pairs_lineup();
        let rotation = PairRoleRotation::SwapEveryRotation;

        let first = substitute(mode, &lineup, 100, rotation).lineup;
        let sub = first.formation.pair(PositionKey::SubPair).unwrap();
        assert_eq!(sub.defender.as_deref(), Some("B"));
        assert_eq!(sub.attacker.as_deref(), Some("A"));
        assert_eq!(
            first.queue.active(),
            ids(&["C", "D", "E", "F", "B", "A"]).as_slice()
        );

        // Incoming E/F kept their bench roles
        let left = first.formation.pair(PositionKey::LeftPair).unwrap();
        assert_eq!(left.defender.as_deref(), Some("E"));

        let second = substitute(mode, &first, 200, rotation).lineup;
        let right = second.formation.pair(PositionKey::RightPair).unwrap();
        assert_eq!(right.defender.as_deref(), Some("B"));
        assert_eq!(right.attacker.as_deref(), Some("A"));
        assert_eq!(
            second.player("A").unwrap().stats.slot(),
            Some(Slot::Paired(PositionKey::RightPair, PairRole::Attacker))
        );
        assert_eq!(second.next_out.pair, Some(PositionKey::LeftPair));
    }

    #[test]
    fn test_set_next_to_sub_out() {
        let (mode, lineup) = individual_lineup(2);
        let after = set_next_to_sub_out(&mode, &lineup, "C").unwrap();
        assert_eq!(after.next_out.player.as_deref(), Some("C"));
        assert_eq!(after.next_out.position, Some(PositionKey::LeftAttacker));
        assert_eq!(after.next_out.next_player.as_deref(), Some("A"));

        assert_eq!(
            set_next_to_sub_out(&mode, &lineup, "E"),
            Err(InvalidOperation::NotInFieldPosition("E".to_string()))
        );
        assert_eq!(
            set_next_to_sub_out(&mode, &lineup, "G0"),
            Err(InvalidOperation::NotInFieldPosition("G0".to_string()))
        );

        let (mode, lineup) = pairs_lineup();
        let after = set_next_to_sub_out(&mode, &lineup, "D").unwrap();
        assert_eq!(
            after.queue.active(),
            ids(&["C", "D", "A", "B", "E", "F"]).as_slice()
        );
        assert_eq!(after.next_out.pair, Some(PositionKey::RightPair));
    }
}
