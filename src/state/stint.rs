//! Stint time tracking.
//!
//! A stint is the interval a player holds one (status, role) pair. Time is
//! credited in whole seconds when a stint is closed. The checkpoint only
//! advances by the seconds actually credited, so the sub-second remainder
//! carries into the next update instead of being rounded away. Every status
//! or role change goes through [`change_role`] so the close/open pair can
//! never be split.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::{PlayerRole, PlayerStatus, PositionKey};
use super::player::PlayerStats;

/// Caller supplied time for one logical operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchClock {
    pub now: DateTime<Utc>,

    /// Paused time advances checkpoints but is never credited
    pub is_paused: bool,
}

impl MatchClock {
    pub fn running(now: DateTime<Utc>) -> Self {
        Self {
            now,
            is_paused: false,
        }
    }

    pub fn paused(now: DateTime<Utc>) -> Self {
        Self {
            now,
            is_paused: true,
        }
    }
}

/// Whole seconds between two instants, truncated, never negative.
pub fn elapsed_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    let millis = (to - from).num_milliseconds().max(0);
    (millis / 1000) as u64
}

/// Credit `seconds` to the buckets a (status, role) stint accrues into.
pub fn credit(
    stats: &mut PlayerStats,
    status: PlayerStatus,
    role: Option<PlayerRole>,
    seconds: u64,
) {
    match status {
        PlayerStatus::OnField => {
            stats.time_on_field_seconds += seconds;
            let outfield = role.filter(|r| r.is_outfield());
            if let Some(role) = outfield {
                *stats.seconds_as_mut(role) += seconds;
            }
        }
        PlayerStatus::Goalie => stats.time_as_goalie_seconds += seconds,
        PlayerStatus::Substitute => stats.time_as_sub_seconds += seconds,
    }
}

/// Close the running stint up to `now`.
///
/// Only whole seconds are credited. The checkpoint moves forward by exactly
/// the credited amount, so repeated calls at any cadence add up to the
/// real elapsed time. While paused the checkpoint moves to `now` without
/// crediting, so resuming never credits the pause. Inactive players and
/// players without a status are never credited.
pub fn update_stats(stats: &mut PlayerStats, now: DateTime<Utc>, is_paused: bool) {
    let checkpoint = match stats.last_stint_checkpoint {
        Some(checkpoint) => checkpoint,
        None => {
            stats.last_stint_checkpoint = Some(now);
            return;
        }
    };

    let status = match stats.current_status {
        Some(status) if !is_paused && !stats.is_inactive && checkpoint <= now => status,
        _ => {
            stats.last_stint_checkpoint = Some(now);
            return;
        }
    };

    let seconds = elapsed_seconds(checkpoint, now);
    credit(stats, status, stats.current_role, seconds);
    stats.last_stint_checkpoint = Some(checkpoint + Duration::seconds(seconds as i64));
}

/// Open a new stint at `now` without crediting anything.
pub fn start_new_stint(stats: &mut PlayerStats, now: DateTime<Utc>) {
    stats.last_stint_checkpoint = Some(now);
}

/// Target of a role change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleChange {
    pub status: PlayerStatus,
    pub role: PlayerRole,
    pub position: Option<PositionKey>,
}

/// Close the current stint, move the player, open the next stint.
///
/// The next stint starts at the checkpoint left by the close, which is
/// `now` minus any uncredited fraction of a second.
pub fn change_role(stats: &mut PlayerStats, clock: MatchClock, change: RoleChange) {
    update_stats(stats, clock.now, clock.is_paused);
    stats.current_status = Some(change.status);
    stats.current_role = Some(change.role);
    stats.current_position_key = change.position;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap() + Duration::seconds(secs)
    }

    fn field_stats(role: PlayerRole, start: i64) -> PlayerStats {
        PlayerStats {
            current_status: Some(PlayerStatus::OnField),
            current_role: Some(role),
            current_position_key: Some(PositionKey::LeftDefender),
            last_stint_checkpoint: Some(t(start)),
            ..Default::default()
        }
    }

    #[test]
    fn test_update_on_field() {
        let mut stats = field_stats(PlayerRole::Defender, 0);
        update_stats(&mut stats, t(120), false);

        assert_eq!(stats.time_on_field_seconds, 120);
        assert_eq!(stats.time_as_defender_seconds, 120);
        assert_eq!(stats.time_as_attacker_seconds, 0);
        assert_eq!(stats.last_stint_checkpoint, Some(t(120)));
    }

    #[test]
    fn test_update_goalie_and_sub() {
        let mut goalie = PlayerStats {
            current_status: Some(PlayerStatus::Goalie),
            current_role: Some(PlayerRole::Goalie),
            last_stint_checkpoint: Some(t(0)),
            ..Default::default()
        };
        update_stats(&mut goalie, t(30), false);
        assert_eq!(goalie.time_as_goalie_seconds, 30);
        assert_eq!(goalie.time_on_field_seconds, 0);

        let mut sub = PlayerStats {
            current_status: Some(PlayerStatus::Substitute),
            current_role: Some(PlayerRole::Substitute),
            last_stint_checkpoint: Some(t(0)),
            ..Default::default()
        };
        update_stats(&mut sub, t(45), false);
        assert_eq!(sub.time_as_sub_seconds, 45);
        assert_eq!(sub.time_on_field_seconds, 0);
    }

    #[test]
    fn test_paused_resets_without_accrual() {
        let mut stats = field_stats(PlayerRole::Attacker, 0);
        update_stats(&mut stats, t(60), true);
        assert_eq!(stats.total_seconds(), 0);
        assert_eq!(stats.last_stint_checkpoint, Some(t(60)));

        // Resuming only credits time after the pause
        update_stats(&mut stats, t(100), false);
        assert_eq!(stats.time_as_attacker_seconds, 40);
    }

    #[test]
    fn test_time_conservation() {
        let mut stats = field_stats(PlayerRole::Midfielder, 0);
        // (timestamp, paused during the interval ending here)
        let calls = [(10, false), (25, true), (26, false), (90, false), (95, true), (300, false)];
        for (ts, paused) in calls {
            update_stats(&mut stats, t(ts), paused);
        }
        // Unpaused intervals: 0-10, 25-26, 26-90, 95-300
        assert_eq!(stats.time_on_field_seconds, 10 + 1 + 64 + 205);
        assert_eq!(stats.time_as_midfielder_seconds, stats.time_on_field_seconds);
        assert_eq!(stats.time_as_sub_seconds, 0);
    }

    #[test]
    fn test_negative_delta_clamped() {
        let mut stats = field_stats(PlayerRole::Defender, 100);
        update_stats(&mut stats, t(50), false);
        assert_eq!(stats.total_seconds(), 0);
        assert_eq!(stats.last_stint_checkpoint, Some(t(50)));
    }

    #[test]
    fn test_inactive_not_credited() {
        let mut stats = PlayerStats {
            current_status: Some(PlayerStatus::Substitute),
            current_role: Some(PlayerRole::Substitute),
            is_inactive: true,
            last_stint_checkpoint: Some(t(0)),
            ..Default::default()
        };
        update_stats(&mut stats, t(500), false);
        assert_eq!(stats.total_seconds(), 0);
        assert_eq!(stats.last_stint_checkpoint, Some(t(500)));
    }

    #[test]
    fn test_first_update_sets_checkpoint() {
        let mut stats = PlayerStats {
            current_status: Some(PlayerStatus::OnField),
            current_role: Some(PlayerRole::Defender),
            ..Default::default()
        };
        update_stats(&mut stats, t(10), false);
        assert_eq!(stats.total_seconds(), 0);
        assert_eq!(stats.last_stint_checkpoint, Some(t(10)));
    }

    #[test]
    fn test_change_role_closes_and_opens() {
        let mut stats = field_stats(PlayerRole::Defender, 0);
        change_role(
            &mut stats,
            MatchClock::running(t(200)),
            RoleChange {
                status: PlayerStatus::Substitute,
                role: PlayerRole::Substitute,
                position: Some(PositionKey::Substitute1),
            },
        );
        assert_eq!(stats.time_as_defender_seconds, 200);
        assert_eq!(stats.current_status, Some(PlayerStatus::Substitute));
        assert_eq!(stats.current_position_key, Some(PositionKey::Substitute1));
        assert_eq!(stats.last_stint_checkpoint, Some(t(200)));

        update_stats(&mut stats, t(260), false);
        assert_eq!(stats.time_as_sub_seconds, 60);
        assert_eq!(stats.time_as_defender_seconds, 200);
    }

    #[test]
    fn test_elapsed_truncates() {
        assert_eq!(elapsed_seconds(t(0), t(0) + Duration::milliseconds(1499)), 1);
        assert_eq!(elapsed_seconds(t(0), t(0) + Duration::milliseconds(1999)), 1);
        assert_eq!(elapsed_seconds(t(10), t(0)), 0);
    }

    #[test]
    fn test_fractional_cadence_conserves_time() {
        let ms = |millis: i64| t(0) + Duration::milliseconds(millis);

        // Ten updates 1.4s apart
        let mut stats = field_stats(PlayerRole::Defender, 0);
        for i in 1..=10 {
            update_stats(&mut stats, ms(1400 * i), false);
        }
        assert_eq!(stats.time_as_defender_seconds, 14);
        assert_eq!(stats.last_stint_checkpoint, Some(t(14)));

        // Twenty updates 0.5s apart
        let mut stats = field_stats(PlayerRole::Attacker, 0);
        for i in 1..=20 {
            update_stats(&mut stats, ms(500 * i), false);
        }
        assert_eq!(stats.time_as_attacker_seconds, 10);
        assert_eq!(stats.time_on_field_seconds, 10);
    }

    #[test]
    fn test_remainder_carries_across_role_change() {
        let mut stats = field_stats(PlayerRole::Defender, 0);
        let clock = MatchClock::running(t(0) + Duration::milliseconds(2700));
        change_role(
            &mut stats,
            clock,
            RoleChange {
                status: PlayerStatus::Substitute,
                role: PlayerRole::Substitute,
                position: Some(PositionKey::Substitute1),
            },
        );
        assert_eq!(stats.time_as_defender_seconds, 2);
        assert_eq!(stats.last_stint_checkpoint, Some(t(2)));

        update_stats(&mut stats, t(0) + Duration::milliseconds(5000), false);
        assert_eq!(stats.time_as_sub_seconds, 3);
        assert_eq!(stats.total_seconds(), 5);
    }
}
