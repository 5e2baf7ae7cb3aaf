//! Round-robin scheduling across a fixed number of tables, and round recommendations.

use crate::logic::shuffle::shuffle;
use crate::models::TournamentError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One pairing placed on a table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch<T> {
    pub team1_id: T,
    pub team2_id: T,
    pub table_number: u32,
}

/// Matches played at the same time, at most one per table.
pub type Round<T> = Vec<ScheduledMatch<T>>;

/// Generate a complete round robin with the circle method.
///
/// 1. Shuffle the teams; add a bye slot if the count is odd.
/// 2. Keep slot 0 fixed and rotate the others, giving `n - 1` logical rounds where
///    slot `i` meets slot `n - 1 - i`. Pairings against the bye are dropped.
/// 3. A logical round with more pairings than tables is split into consecutive rounds
///    of at most `num_tables` matches, tables numbered from 1 in each.
///
/// Every pair of teams meets exactly once and no team plays twice in a round,
/// whatever the shuffle produced.
pub fn generate_round_robin_schedule<T: Clone, R: Rng + ?Sized>(
    team_ids: &[T],
    num_tables: u32,
    rng: &mut R,
) -> Result<Vec<Round<T>>, TournamentError> {
    if team_ids.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }
    if num_tables == 0 {
        return Err(TournamentError::NoTables);
    }

    let mut slots: Vec<Option<T>> = shuffle(team_ids, rng).into_iter().map(Some).collect();
    if slots.len() % 2 == 1 {
        slots.push(None);
    }
    let n = slots.len();

    let mut rounds = Vec::new();
    for _ in 0..n - 1 {
        let pairings: Vec<(T, T)> = (0..n / 2)
            .filter_map(|i| match (&slots[i], &slots[n - 1 - i]) {
                (Some(a), Some(b)) => Some((a.clone(), b.clone())),
                _ => None,
            })
            .collect();

        for chunk in pairings.chunks(num_tables as usize) {
            rounds.push(
                chunk
                    .iter()
                    .zip(1..)
                    .map(|((a, b), table_number)| ScheduledMatch {
                        team1_id: a.clone(),
                        team2_id: b.clone(),
                        table_number,
                    })
                    .collect(),
            );
        }

        slots[1..].rotate_right(1);
    }

    log::debug!(
        "Scheduled {} teams on {} table(s): {} rounds",
        team_ids.len(),
        num_tables,
        rounds.len()
    );
    Ok(rounds)
}

/// Number of matches in a full round robin of `num_teams`.
///
/// Widened to u64: k(k-1) fits for every u32 k.
pub fn calculate_total_matches(num_teams: u32) -> u64 {
    let k = u64::from(num_teams);
    k * k.saturating_sub(1) / 2
}

/// Minimum number of logical rounds for a full round robin (unlimited tables).
pub fn calculate_total_rounds(num_teams: u32) -> u32 {
    if num_teams % 2 == 0 {
        num_teams.saturating_sub(1)
    } else {
        num_teams
    }
}

/// Suggested round count for the setup form.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecommendation {
    pub recommended: u64,
    pub min: u64,
    pub max: u64,
    pub explanation: String,
}

/// Rounds needed to play a full round robin when every round fills all tables.
pub fn recommend_rounds(
    num_players: u32,
    num_tables: u32,
) -> Result<RoundRecommendation, TournamentError> {
    if num_tables == 0 {
        return Err(TournamentError::NoTables);
    }
    let num_teams = num_players / 2;
    let total_matches = calculate_total_matches(num_teams);
    let rounds_needed = total_matches.div_ceil(u64::from(num_tables));
    let min = rounds_needed.div_ceil(2).max(2);

    let tables = if num_tables > 1 { "tables" } else { "table" };
    let explanation = format!(
        "With {} teams and {} {}: {} total matches across {} rounds. Each round uses all {} {}.",
        num_teams, num_tables, tables, total_matches, rounds_needed, num_tables, tables
    );

    Ok(RoundRecommendation {
        recommended: rounds_needed,
        min,
        max: rounds_needed,
        explanation,
    })
}
