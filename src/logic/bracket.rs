//! Playoff bracket: symbolic slots at creation, filled with real teams once their seeds are decided.

use crate::logic::pools::POOL_NAMES;
use crate::logic::standings::{pool_standings, sort_rows, PoolStanding, StandingRow};
use crate::models::{GameMatch, MatchId, Stage, TeamId, Tournament, TournamentError};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

/// Where a bracket slot's team comes from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Seed {
    /// "Pool A 1st"
    PoolPlace { pool: String, place: usize },
    /// "QF1 Winner"
    Winner { stage: Stage, position: u32 },
    /// "SF2 Loser"
    Loser { stage: Stage, position: u32 },
}

impl Seed {
    pub fn pool(pool: &str, place: usize) -> Self {
        Seed::PoolPlace {
            pool: pool.to_string(),
            place,
        }
    }

    pub fn winner(stage: Stage, position: u32) -> Self {
        Seed::Winner { stage, position }
    }

    pub fn loser(stage: Stage, position: u32) -> Self {
        Seed::Loser { stage, position }
    }
}

const STAGE_PREFIXES: [(Stage, &str); 4] = [
    (Stage::Quarterfinal, "QF"),
    (Stage::Semifinal, "SF"),
    (Stage::Final, "F"),
    (Stage::ThirdPlace, "TP"),
];

fn stage_prefix(stage: Stage) -> &'static str {
    STAGE_PREFIXES
        .iter()
        .find(|(s, _)| *s == stage)
        .map(|(_, p)| *p)
        .unwrap_or("?")
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::PoolPlace { pool, place } => write!(f, "Pool {} {}", pool, ordinal(*place)),
            Seed::Winner { stage, position } => {
                write!(f, "{}{} Winner", stage_prefix(*stage), position)
            }
            Seed::Loser { stage, position } => {
                write!(f, "{}{} Loser", stage_prefix(*stage), position)
            }
        }
    }
}

impl FromStr for Seed {
    type Err = TournamentError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let unknown = || TournamentError::UnknownSeed(label.to_string());
        let parts: Vec<&str> = label.split_whitespace().collect();

        match parts.as_slice() {
            ["Pool", pool, place] => {
                if !POOL_NAMES.contains(pool) {
                    return Err(unknown());
                }
                let digits = place.trim_end_matches(|c: char| c.is_ascii_alphabetic());
                let n: usize = digits.parse().map_err(|_| unknown())?;
                if n == 0 || ordinal(n) != *place {
                    return Err(unknown());
                }
                Ok(Seed::pool(pool, n))
            }
            [slot, outcome @ ("Winner" | "Loser")] => {
                let split = slot.find(|c: char| c.is_ascii_digit()).ok_or_else(unknown)?;
                let (prefix, number) = slot.split_at(split);
                let stage = STAGE_PREFIXES
                    .iter()
                    .find(|(_, p)| *p == prefix)
                    .map(|(s, _)| *s)
                    .ok_or_else(unknown)?;
                let position: u32 = number.parse().map_err(|_| unknown())?;
                if *outcome == "Winner" {
                    Ok(Seed::winner(stage, position))
                } else {
                    Ok(Seed::loser(stage, position))
                }
            }
            _ => Err(unknown()),
        }
    }
}

/// One knockout slot before any team is known.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffSlot {
    pub stage: Stage,
    pub bracket_position: u32,
    pub team1_seed: String,
    pub team2_seed: String,
}

fn slot(stage: Stage, bracket_position: u32, team1: Seed, team2: Seed) -> PlayoffSlot {
    PlayoffSlot {
        stage,
        bracket_position,
        team1_seed: team1.to_string(),
        team2_seed: team2.to_string(),
    }
}

/// Build the bracket skeleton for the given stages.
///
/// Quarter-finals cross the pools (A1-D2, C1-B2, B1-C2, D1-A2) so pool mates cannot meet
/// before the final. Without quarter-finals the semis take the top two of pools A and B.
pub fn generate_playoff_bracket(stages: &[Stage]) -> Vec<PlayoffSlot> {
    use Stage::*;
    let mut slots = Vec::new();
    let has_quarters = stages.contains(&Quarterfinal);

    if has_quarters {
        slots.push(slot(Quarterfinal, 1, Seed::pool("A", 1), Seed::pool("D", 2)));
        slots.push(slot(Quarterfinal, 2, Seed::pool("C", 1), Seed::pool("B", 2)));
        slots.push(slot(Quarterfinal, 3, Seed::pool("B", 1), Seed::pool("C", 2)));
        slots.push(slot(Quarterfinal, 4, Seed::pool("D", 1), Seed::pool("A", 2)));
    }

    if stages.contains(&Semifinal) {
        if has_quarters {
            slots.push(slot(Semifinal, 1, Seed::winner(Quarterfinal, 1), Seed::winner(Quarterfinal, 2)));
            slots.push(slot(Semifinal, 2, Seed::winner(Quarterfinal, 3), Seed::winner(Quarterfinal, 4)));
        } else {
            slots.push(slot(Semifinal, 1, Seed::pool("A", 1), Seed::pool("B", 2)));
            slots.push(slot(Semifinal, 2, Seed::pool("B", 1), Seed::pool("A", 2)));
        }
    }

    if stages.contains(&ThirdPlace) {
        slots.push(slot(ThirdPlace, 1, Seed::loser(Semifinal, 1), Seed::loser(Semifinal, 2)));
    }

    if stages.contains(&Final) {
        slots.push(slot(Final, 1, Seed::winner(Semifinal, 1), Seed::winner(Semifinal, 2)));
    }

    slots
}

/// Resolve a seed to a team.
///
/// Pool places need every pool match of that pool completed; winners and losers need the
/// feeding match resolved and completed. Otherwise `SeedNotDecided`.
pub fn resolve_seed(
    seed: &Seed,
    pools: &[PoolStanding],
    matches: &[GameMatch],
) -> Result<TeamId, TournamentError> {
    let label = || seed.to_string();

    match seed {
        Seed::PoolPlace { pool, place } => {
            let standing = pools
                .iter()
                .find(|p| p.name == *pool)
                .ok_or_else(|| TournamentError::UnknownSeed(label()))?;
            let row = place
                .checked_sub(1)
                .and_then(|i| standing.rows.get(i))
                .ok_or_else(|| TournamentError::PlaceNotHeld(label()))?;
            if !standing.complete {
                return Err(TournamentError::SeedNotDecided(label()));
            }
            Ok(row.team_id)
        }
        Seed::Winner { stage, position } | Seed::Loser { stage, position } => {
            let feeder = matches
                .iter()
                .find(|m| m.stage == *stage && m.bracket_position == Some(*position))
                .ok_or_else(|| TournamentError::UnknownSeed(label()))?;
            if feeder.placeholder {
                return Err(TournamentError::SeedNotDecided(label()));
            }
            let team = if matches!(seed, Seed::Winner { .. }) {
                feeder.winner_id
            } else {
                feeder.loser_id()
            };
            team.ok_or_else(|| TournamentError::SeedNotDecided(label()))
        }
    }
}

/// Parse a label and resolve it.
pub fn resolve_seed_label(
    label: &str,
    pools: &[PoolStanding],
    matches: &[GameMatch],
) -> Result<TeamId, TournamentError> {
    resolve_seed(&label.parse()?, pools, matches)
}

/// Fill every unplayed playoff match whose two seeds are decided.
///
/// Slots already filled but not yet played are checked again, so a revised feeder result
/// or pool table moves the new team in. Returns the ids of the matches whose teams were set
/// or changed in this call. Undecided slots are left alone; a seed that points at nothing is
/// an error.
///
/// A pool place that no team holds (the short last pool of an uneven split) goes to the
/// best team that did not qualify directly, ranked across all pools by points then wins,
/// once every pool is complete.
pub fn resolve_playoff_bracket(tournament: &mut Tournament) -> Result<Vec<MatchId>, TournamentError> {
    let pools = pool_standings(tournament);
    let vacant = fill_vacant_places(&pools, &tournament.matches);
    let mut resolved = Vec::new();

    for idx in 0..tournament.matches.len() {
        let m = &tournament.matches[idx];
        if m.is_completed() {
            continue;
        }
        let (Some(seed1), Some(seed2)) = (m.team1_seed.clone(), m.team2_seed.clone()) else {
            continue;
        };
        let Some(team1) = decided_team(&seed1, &pools, &vacant, &tournament.matches)? else {
            continue;
        };
        let Some(team2) = decided_team(&seed2, &pools, &vacant, &tournament.matches)? else {
            continue;
        };

        let m = &mut tournament.matches[idx];
        if !m.placeholder && m.team1_id == team1 && m.team2_id == team2 {
            continue;
        }
        let refill = !m.placeholder;
        m.team1_id = team1;
        m.team2_id = team2;
        m.placeholder = false;
        log::info!(
            "{} {} {}: {} vs {}",
            if refill { "Re-resolved" } else { "Resolved" },
            m.stage.display_name(),
            m.bracket_position.unwrap_or(1),
            seed1,
            seed2
        );
        resolved.push(m.id);
    }

    Ok(resolved)
}

/// `Ok(None)` while the seed is still open.
fn decided_team(
    label: &str,
    pools: &[PoolStanding],
    vacant: &HashMap<String, TeamId>,
    matches: &[GameMatch],
) -> Result<Option<TeamId>, TournamentError> {
    match resolve_seed_label(label, pools, matches) {
        Ok(team_id) => Ok(Some(team_id)),
        Err(TournamentError::PlaceNotHeld(label)) => Ok(vacant.get(&label).copied()),
        Err(TournamentError::SeedNotDecided(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

fn bracket_seeds(matches: &[GameMatch]) -> impl Iterator<Item = &str> {
    matches
        .iter()
        .filter(|m| m.stage.is_playoff())
        .flat_map(|m| [m.team1_seed.as_deref(), m.team2_seed.as_deref()])
        .flatten()
}

/// Map each unheld pool-place label to a wildcard team. Empty until every pool is complete.
fn fill_vacant_places(pools: &[PoolStanding], matches: &[GameMatch]) -> HashMap<String, TeamId> {
    let mut qualified = HashSet::new();
    let mut vacant: Vec<&str> = Vec::new();
    for label in bracket_seeds(matches) {
        let Ok(Seed::PoolPlace { pool, place }) = label.parse::<Seed>() else {
            continue;
        };
        let Some(standing) = pools.iter().find(|p| p.name == pool) else {
            continue;
        };
        match place.checked_sub(1).and_then(|i| standing.rows.get(i)) {
            Some(row) => {
                qualified.insert(row.team_id);
            }
            None if !vacant.contains(&label) => vacant.push(label),
            None => {}
        }
    }
    if vacant.is_empty() || !pools.iter().all(|p| p.complete) {
        return HashMap::new();
    }

    let mut wildcards: Vec<StandingRow> = pools
        .iter()
        .flat_map(|p| p.rows.iter())
        .filter(|row| !qualified.contains(&row.team_id))
        .cloned()
        .collect();
    sort_rows(&mut wildcards);
    vacant
        .into_iter()
        .map(str::to_string)
        .zip(wildcards.into_iter().map(|row| row.team_id))
        .collect()
}

/// Whether changing `feeder`'s winner would contradict a playoff match that was already played.
///
/// A pool result is locked once any playoff match has a result; a playoff result once a
/// match seeded by its winner or loser has one.
pub(crate) fn result_is_locked(tournament: &Tournament, feeder: &GameMatch) -> bool {
    let played = || tournament.matches.iter().filter(|m| m.is_completed());
    match (feeder.stage, feeder.bracket_position) {
        (Stage::Pool, _) => played().any(|m| m.stage.is_playoff()),
        (stage, Some(position)) if stage.is_playoff() => played()
            .flat_map(|m| [m.team1_seed.as_deref(), m.team2_seed.as_deref()])
            .flatten()
            .filter_map(|label| label.parse::<Seed>().ok())
            .any(|seed| {
                matches!(
                    seed,
                    Seed::Winner { stage: s, position: p } | Seed::Loser { stage: s, position: p }
                        if s == stage && p == position
                )
            }),
        _ => false,
    }
}
