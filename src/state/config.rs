//! Team configuration.
//!
//! A `TeamConfig` is chosen once before kickoff and never changes during the
//! match. It resolves into a closed [`FormationMode`] which every calculator
//! dispatches on.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum substitute slots an individual formation supports.
pub const MAX_SUBSTITUTE_SLOTS: usize = 3;

/// Squad size required for paired substitution (goalie + three pairs).
pub const PAIRS_SQUAD_SIZE: usize = 7;

/// Match format (players on the field per side, goalie included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchFormat {
    #[serde(rename = "5v5")]
    FiveVsFive,
    #[serde(rename = "7v7")]
    SevenVsSeven,
}

impl MatchFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiveVsFive => "5v5",
            Self::SevenVsSeven => "7v7",
        }
    }

    /// Outfield positions, goalie excluded.
    pub fn field_positions(&self) -> usize {
        match self {
            Self::FiveVsFive => 4,
            Self::SevenVsSeven => 6,
        }
    }
}

impl fmt::Display for MatchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tactical shape of the outfield players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormationShape {
    #[serde(rename = "2-2")]
    TwoTwo,
    #[serde(rename = "1-2-1")]
    OneTwoOne,
    #[serde(rename = "2-2-2")]
    TwoTwoTwo,
    #[serde(rename = "2-3-1")]
    TwoThreeOne,
}

impl FormationShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoTwo => "2-2",
            Self::OneTwoOne => "1-2-1",
            Self::TwoTwoTwo => "2-2-2",
            Self::TwoThreeOne => "2-3-1",
        }
    }

    /// The format this shape is played in.
    pub fn format(&self) -> MatchFormat {
        match self {
            Self::TwoTwo | Self::OneTwoOne => MatchFormat::FiveVsFive,
            Self::TwoTwoTwo | Self::TwoThreeOne => MatchFormat::SevenVsSeven,
        }
    }
}

impl fmt::Display for FormationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How players are rotated on and off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionType {
    /// One player at a time through a substitute carousel
    #[default]
    Individual,
    /// Defender/attacker pairs rotate together
    Pairs,
}

impl SubstitutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Pairs => "pairs",
        }
    }
}

impl fmt::Display for SubstitutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a player's defender/attacker role survives a rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairRoleRotation {
    #[default]
    KeepThroughoutPeriod,
    SwapEveryRotation,
}

impl PairRoleRotation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::KeepThroughoutPeriod => "keep_throughout_period",
            Self::SwapEveryRotation => "swap_every_rotation",
        }
    }
}

/// Per-match team setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub format: MatchFormat,

    /// Everyone dressed for the match, goalie included
    pub squad_size: usize,

    pub formation: FormationShape,

    pub substitution_type: SubstitutionType,

    #[serde(default)]
    pub pair_role_rotation: PairRoleRotation,
}

impl TeamConfig {
    /// Individual substitution for the given shape and squad size.
    pub fn individual(formation: FormationShape, squad_size: usize) -> Self {
        Self {
            format: formation.format(),
            squad_size,
            formation,
            substitution_type: SubstitutionType::Individual,
            pair_role_rotation: PairRoleRotation::default(),
        }
    }

    /// 5v5 paired substitution with seven players.
    pub fn pairs(pair_role_rotation: PairRoleRotation) -> Self {
        Self {
            format: MatchFormat::FiveVsFive,
            squad_size: PAIRS_SQUAD_SIZE,
            formation: FormationShape::TwoTwo,
            substitution_type: SubstitutionType::Pairs,
            pair_role_rotation,
        }
    }

    pub fn with_pair_role_rotation(mut self, rotation: PairRoleRotation) -> Self {
        self.pair_role_rotation = rotation;
        self
    }

    /// Resolve the configuration into the formation mode it describes.
    pub fn mode(&self) -> Result<FormationMode, ConfigurationError> {
        if self.formation.format() != self.format {
            return Err(ConfigurationError::ShapeFormatMismatch {
                format: self.format,
                formation: self.formation,
            });
        }

        match self.substitution_type {
            SubstitutionType::Pairs => {
                if self.formation != FormationShape::TwoTwo || self.squad_size != PAIRS_SQUAD_SIZE
                {
                    return Err(ConfigurationError::UnsupportedPairs {
                        formation: self.formation,
                        squad_size: self.squad_size,
                    });
                }
                Ok(FormationMode::Pairs)
            }
            SubstitutionType::Individual => {
                let on_pitch = self.format.field_positions() + 1;
                let substitute_slots = self.squad_size.saturating_sub(on_pitch);
                if self.squad_size <= on_pitch || substitute_slots > MAX_SUBSTITUTE_SLOTS {
                    return Err(ConfigurationError::UnsupportedSquadSize {
                        format: self.format,
                        squad_size: self.squad_size,
                    });
                }
                Ok(FormationMode::Individual {
                    shape: self.formation,
                    substitute_slots,
                })
            }
        }
    }
}

/// The resolved formation variant a match runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormationMode {
    Individual {
        shape: FormationShape,
        substitute_slots: usize,
    },
    Pairs,
}

impl FormationMode {
    pub fn is_pairs(&self) -> bool {
        matches!(self, Self::Pairs)
    }
}

impl fmt::Display for FormationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Individual {
                shape,
                substitute_slots,
            } => write!(f, "individual {} with {} substitute slot(s)", shape, substitute_slots),
            Self::Pairs => write!(f, "pairs 2-2"),
        }
    }
}

/// A match was set up inconsistently. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("formation {formation} is not played in {format}")]
    ShapeFormatMismatch {
        format: MatchFormat,
        formation: FormationShape,
    },

    #[error("squad of {squad_size} is not supported for {format} individual substitution")]
    UnsupportedSquadSize {
        format: MatchFormat,
        squad_size: usize,
    },

    #[error("pairs substitution needs 2-2 with 7 players, got {formation} with {squad_size}")]
    UnsupportedPairs {
        formation: FormationShape,
        squad_size: usize,
    },

    #[error("no substitution algorithm for {0}")]
    UnsupportedMode(FormationMode),

    #[error("formation layout does not match {0}")]
    FormationMismatch(FormationMode),

    #[error("saved mode {stored} does not match configured {configured}")]
    StoredModeMismatch {
        stored: FormationMode,
        configured: FormationMode,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_individual_modes() {
        for (squad, slots) in [(6, 1), (7, 2), (8, 3)] {
            let mode = TeamConfig::individual(FormationShape::TwoTwo, squad)
                .mode()
                .unwrap();
            assert_eq!(
                mode,
                FormationMode::Individual {
                    shape: FormationShape::TwoTwo,
                    substitute_slots: slots
                }
            );
        }

        let mode = TeamConfig::individual(FormationShape::TwoThreeOne, 9)
            .mode()
            .unwrap();
        assert_eq!(
            mode,
            FormationMode::Individual {
                shape: FormationShape::TwoThreeOne,
                substitute_slots: 2
            }
        );
    }

    #[test]
    fn test_unsupported_squad_sizes() {
        for squad in [0, 5, 9, 12] {
            let result = TeamConfig::individual(FormationShape::TwoTwo, squad).mode();
            assert!(matches!(
                result,
                Err(ConfigurationError::UnsupportedSquadSize { .. })
            ));
        }
    }

    #[test]
    fn test_pairs_mode() {
        let config = TeamConfig::pairs(PairRoleRotation::SwapEveryRotation);
        assert_eq!(config.mode().unwrap(), FormationMode::Pairs);

        let mut bad = config;
        bad.squad_size = 8;
        assert!(matches!(
            bad.mode(),
            Err(ConfigurationError::UnsupportedPairs { .. })
        ));
    }

    #[test]
    fn test_shape_format_mismatch() {
        let mut config = TeamConfig::individual(FormationShape::TwoTwoTwo, 8);
        config.format = MatchFormat::FiveVsFive;
        assert!(matches!(
            config.mode(),
            Err(ConfigurationError::ShapeFormatMismatch { .. })
        ));
    }

    #[test]
    fn test_config_json() {
        let config = TeamConfig::pairs(PairRoleRotation::SwapEveryRotation);
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "format": "5v5",
                "squad_size": 7,
                "formation": "2-2",
                "substitution_type": "pairs",
                "pair_role_rotation": "swap_every_rotation"
            })
        );
        let back: TeamConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }
}
