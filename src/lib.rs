//! Rotation State Library
//!
//! This crate tracks who is on the field, on the bench and in goal during a
//! youth match, and computes the exact state change of every substitution.
//!
//! # Overview
//!
//! The state module provides:
//!
//! - **Rotation Queue** - Who goes off next. Inactive players are kept out
//!   of the queue entirely.
//!
//! - **Stint Tracking** - Per-role seconds, credited exactly once per
//!   interval and never while the clock is paused.
//!
//! - **Substitutions** - Pairs rotation and 1, 2 or 3 slot bench carousels,
//!   with single-step undo.
//!
//! - **Switches** - Position and goalie switches, inactivation and
//!   activation of substitutes.
//!
//! - **Recommendations** - Pre-match positions from past role time.
//!
//! # Design Principles
//!
//! 1. **Calculators are pure** - Each takes the current lineup and returns a
//!    new one; nothing is committed on error.
//!
//! 2. **Configuration errors are fatal** - An unsupported mode is a
//!    `ConfigurationError`; a rule violation is a recoverable
//!    `InvalidOperation`.
//!
//! 3. **Caller owns time** - Every operation takes the current instant, so
//!    results are deterministic.
//!
//! 4. **Serialization-ready** - All state round-trips through JSON.
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use rotation_state::state::{
//!     Formation, FormationShape, MatchClock, MatchState, Player, PositionKey, Slot, TeamConfig,
//! };
//!
//! let config = TeamConfig::individual(FormationShape::TwoTwo, 6);
//! let mode = config.mode().unwrap();
//!
//! let slots = [
//!     (Slot::GOALIE, "gk"),
//!     (Slot::Single(PositionKey::LeftDefender), "ada"),
//!     (Slot::Single(PositionKey::RightDefender), "bo"),
//!     (Slot::Single(PositionKey::LeftAttacker), "cy"),
//!     (Slot::Single(PositionKey::RightAttacker), "di"),
//!     (Slot::Single(PositionKey::Substitute1), "eli"),
//! ];
//! let players = slots.iter().map(|(_, id)| Player::new(*id, *id)).collect();
//! let formation = Formation::from_slots(&mode, slots);
//!
//! let kickoff = Utc::now();
//! let mut game = MatchState::new(config, formation, players, kickoff).unwrap();
//! assert_eq!(game.next_out().player.as_deref(), Some("ada"));
//!
//! // Five minutes in, the substitute comes on
//! let summary = game
//!     .substitute(MatchClock::running(kickoff + Duration::minutes(5)))
//!     .unwrap();
//! assert_eq!(summary.coming_on, vec!["eli".to_string()]);
//! assert_eq!(game.player("ada").unwrap().stats.time_as_defender_seconds, 300);
//! ```

pub mod state;

// Re-export everything from state module at crate root
pub use state::*;
