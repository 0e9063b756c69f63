//! Pre-match position recommendations.
//!
//! Advisory only: nothing here touches a lineup. Each eligible player gets
//! a deficit per role (target share of field slots minus their historical
//! share), and roles are filled defender first, then midfielder, then
//! attacker, by largest deficit. Exact ties are broken by the caller's RNG
//! so nobody is favoured by name or roster order.

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::catalog::{self, PlayerRole, Slot};
use super::config::FormationMode;
use super::player::{Player, PlayerId};

/// Share of past field time per role, 0 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleHistory {
    pub defender_percent: f64,
    pub midfielder_percent: f64,
    pub attacker_percent: f64,
}

impl RoleHistory {
    pub fn percent(&self, role: PlayerRole) -> f64 {
        match role {
            PlayerRole::Defender => self.defender_percent,
            PlayerRole::Midfielder => self.midfielder_percent,
            PlayerRole::Attacker => self.attacker_percent,
            PlayerRole::Goalie | PlayerRole::Substitute => 0.0,
        }
    }

    /// No recorded time in any role.
    pub fn is_empty(&self) -> bool {
        PlayerRole::OUTFIELD.iter().all(|r| self.percent(*r) == 0.0)
    }
}

/// Input of a recommendation run.
#[derive(Debug, Clone, Copy)]
pub struct RecommendationRequest<'a> {
    pub mode: FormationMode,
    pub players: &'a [Player],
    pub goalie: Option<&'a str>,

    /// Players already put on the bench by the coach
    pub assigned_substitutes: &'a [PlayerId],

    /// Missing entries count as no history
    pub history: &'a BTreeMap<PlayerId, RoleHistory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecommendation {
    pub player_id: PlayerId,
    pub slot: Slot,
    pub role: PlayerRole,
    pub reason: String,
    pub has_history: bool,
}

struct Candidate {
    id: PlayerId,
    history: RoleHistory,
    has_history: bool,
}

impl Candidate {
    fn deficit(&self, role: PlayerRole, target: f64) -> f64 {
        if self.has_history {
            target - self.history.percent(role)
        } else {
            target
        }
    }

    fn reason(&self, role: PlayerRole) -> String {
        if self.has_history {
            format!("{}% {} time", self.history.percent(role).round(), role)
        } else {
            "No match history".to_string()
        }
    }
}

/// Suggest a field slot for as many eligible players as there are field
/// slots. Goalie, assigned substitutes and inactive players are skipped.
pub fn recommend_positions<R: Rng + ?Sized>(
    request: &RecommendationRequest,
    rng: &mut R,
) -> Vec<PositionRecommendation> {
    let mut remaining: Vec<Candidate> = request
        .players
        .iter()
        .filter(|p| Some(p.id.as_str()) != request.goalie)
        .filter(|p| !request.assigned_substitutes.contains(&p.id))
        .filter(|p| !p.is_inactive())
        .map(|p| {
            let history = request.history.get(&p.id).copied().unwrap_or_default();
            Candidate {
                id: p.id.clone(),
                has_history: !history.is_empty(),
                history,
            }
        })
        .collect();

    let field_slots = request.mode.field_slots();
    let total = field_slots.len() as f64;
    let mut recommendations = Vec::new();

    for (role, count) in request.mode.role_counts() {
        let target = count as f64 / total * 100.0;

        let mut ranked: Vec<(f64, Candidate)> = remaining
            .drain(..)
            .map(|c| (c.deficit(role, target), c))
            .collect();
        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        shuffle_ties(&mut ranked, rng);

        let slots = field_slots
            .iter()
            .filter(|slot| catalog::role(&request.mode, **slot) == Some(role));

        let mut ranked = ranked.into_iter();
        for (slot, (_, candidate)) in slots.zip(ranked.by_ref()) {
            recommendations.push(PositionRecommendation {
                player_id: candidate.id.clone(),
                slot: *slot,
                role,
                reason: candidate.reason(role),
                has_history: candidate.has_history,
            });
        }
        remaining = ranked.map(|(_, c)| c).collect();
    }

    recommendations
}

/// [`recommend_positions`] with a reproducible tie-break.
pub fn recommend_positions_seeded(
    request: &RecommendationRequest,
    seed: u64,
) -> Vec<PositionRecommendation> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    recommend_positions(request, &mut rng)
}

/// Shuffle each run of equal deficits in a list already sorted by deficit.
fn shuffle_ties<T, R: Rng + ?Sized>(ranked: &mut [(f64, T)], rng: &mut R) {
    let mut start = 0;
    while start < ranked.len() {
        let value = ranked[start].0;
        let end = ranked[start..]
            .iter()
            .position(|(v, _)| *v != value)
            .map_or(ranked.len(), |offset| start + offset);
        ranked[start..end].shuffle(rng);
        start = end;
    }
}
