//! Recoverable rule violations.
//!
//! An `InvalidOperation` never changes state. [`MatchState`](super::MatchState)
//! logs it as a warning and hands it back; callers are free to ignore it.

use thiserror::Error;

use super::player::PlayerId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    #[error("cannot switch a player with itself ({0})")]
    SamePlayer(PlayerId),

    #[error("{0} is the goalie; use a goalie switch")]
    GoalieNotSwitchable(PlayerId),

    #[error("{0} is not in a field position of this formation")]
    NotInFieldPosition(PlayerId),

    #[error("{0} is already the goalie")]
    AlreadyGoalie(PlayerId),

    #[error("there is no goalie to replace")]
    NoGoalie,

    #[error("{0} is inactive")]
    PlayerInactive(PlayerId),

    #[error("{0} is not inactive")]
    NotInactive(PlayerId),

    #[error("only substitutes can be inactivated, {0} is not one")]
    NotASubstitute(PlayerId),

    #[error("inactivating {0} would leave no active substitute")]
    LastActiveSubstitute(PlayerId),

    #[error("{0} is not supported in paired mode")]
    UnsupportedInPairs(&'static str),

    #[error("no substitution to undo")]
    NothingToUndo,
}

impl InvalidOperation {
    /// Short machine-friendly name for traces.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnknownPlayer(_) => "unknown_player",
            Self::SamePlayer(_) => "same_player",
            Self::GoalieNotSwitchable(_) => "goalie_not_switchable",
            Self::NotInFieldPosition(_) => "not_in_field_position",
            Self::AlreadyGoalie(_) => "already_goalie",
            Self::NoGoalie => "no_goalie",
            Self::PlayerInactive(_) => "player_inactive",
            Self::NotInactive(_) => "not_inactive",
            Self::NotASubstitute(_) => "not_a_substitute",
            Self::LastActiveSubstitute(_) => "last_active_substitute",
            Self::UnsupportedInPairs(_) => "unsupported_in_pairs",
            Self::NothingToUndo => "nothing_to_undo",
        }
    }
}
