//! Standings: apply or revise a match result, and derive tables from the match history.

use crate::logic::bracket::result_is_locked;
use crate::models::{
    GameMatch, MatchId, Stage, Team, TeamId, TeamStats, Tournament, TournamentError,
    TournamentId, POINTS_PER_WIN,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What changed when a result was submitted. Sent to listeners so views can refresh.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultUpdate {
    pub tournament_id: TournamentId,
    pub match_id: MatchId,
    /// Winner before this submission (Some on a revision or re-submission).
    pub previous_winner_id: Option<TeamId>,
    pub winner_id: TeamId,
    pub completed_at: DateTime<Utc>,
    /// Counters of both teams after the update.
    pub teams: Vec<TeamStats>,
}

/// Set the winner of a match now. See [`apply_result`].
pub fn set_match_winner(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner_id: TeamId,
) -> Result<ResultUpdate, TournamentError> {
    apply_result(tournament, match_id, winner_id, Utc::now())
}

fn team_mut(tournament: &mut Tournament, id: TeamId) -> Result<&mut Team, TournamentError> {
    tournament
        .get_team_mut(id)
        .ok_or(TournamentError::TeamNotFound(id))
}

/// Record `winner_id` as the winner of a match and update both teams' counters.
///
/// - No previous result: winner +1 win / +2 points, the other team +1 loss.
/// - Different previous winner: undo the old outcome first (counters stop at zero), then apply.
/// - Same winner again: counters unchanged, only `completed_at` is refreshed.
///
/// A revision is refused once a playoff match decided by this result has been played.
/// Filled but unplayed slots pick up the change on the next
/// [`resolve_playoff_bracket`](crate::logic::resolve_playoff_bracket).
///
/// Callers must serialize calls per tournament; a revision relies on reading the previous winner.
pub fn apply_result(
    tournament: &mut Tournament,
    match_id: MatchId,
    winner_id: TeamId,
    completed_at: DateTime<Utc>,
) -> Result<ResultUpdate, TournamentError> {
    let m = tournament
        .get_match(match_id)
        .ok_or(TournamentError::MatchNotFound(match_id))?;
    if m.placeholder {
        return Err(TournamentError::UnresolvedMatch(match_id));
    }
    let loser_id = m
        .opponent_of(winner_id)
        .ok_or(TournamentError::WinnerNotInMatch {
            match_id,
            team_id: winner_id,
        })?;
    let previous_winner_id = m.winner_id;
    if previous_winner_id.is_some_and(|previous| previous != winner_id)
        && result_is_locked(tournament, m)
    {
        return Err(TournamentError::ResultLocked(match_id));
    }
    let team_ids = [m.team1_id, m.team2_id];

    match previous_winner_id {
        Some(previous) if previous == winner_id => {
            log::info!("Match {} re-submitted with the same winner", match_id);
        }
        Some(previous) => {
            // The previous loser is the team that now wins.
            if !team_mut(tournament, previous)?.revert_win() {
                log::warn!("Win counter of team {} clamped at zero", previous);
            }
            if !team_mut(tournament, winner_id)?.revert_loss() {
                log::warn!("Loss counter of team {} clamped at zero", winner_id);
            }
            team_mut(tournament, winner_id)?.add_win();
            team_mut(tournament, loser_id)?.add_loss();
            log::info!("Match {} revised: winner {} -> {}", match_id, previous, winner_id);
        }
        None => {
            team_mut(tournament, winner_id)?.add_win();
            team_mut(tournament, loser_id)?.add_loss();
            log::info!("Match {} won by {}", match_id, winner_id);
        }
    }

    if let Some(m) = tournament.get_match_mut(match_id) {
        m.winner_id = Some(winner_id);
        m.completed_at = Some(completed_at);
    }

    let teams = team_ids
        .iter()
        .filter_map(|id| tournament.get_team(*id))
        .map(Team::stats)
        .collect();

    Ok(ResultUpdate {
        tournament_id: tournament.id,
        match_id,
        previous_winner_id,
        winner_id,
        completed_at,
        teams,
    })
}

/// Stats of one team recomputed from completed matches.
pub fn derive_team_stats(team_id: TeamId, matches: &[GameMatch]) -> TeamStats {
    let (played, wins) = matches
        .iter()
        .filter(|m| m.is_completed() && m.involves(team_id))
        .fold((0u32, 0u32), |(played, wins), m| {
            (played + 1, wins + u32::from(m.winner_id == Some(team_id)))
        });
    TeamStats {
        team_id,
        points: wins * POINTS_PER_WIN,
        wins,
        losses: played - wins,
    }
}

/// Overwrite every team's stored counters with the values derived from the match history.
///
/// Repairs drift left behind by clamped revisions.
pub fn recompute_standings(tournament: &mut Tournament) {
    let derived: Vec<TeamStats> = tournament
        .teams
        .iter()
        .map(|t| derive_team_stats(t.id, &tournament.matches))
        .collect();
    for stats in derived {
        if let Some(team) = tournament.get_team_mut(stats.team_id) {
            team.points = stats.points;
            team.wins = stats.wins;
            team.losses = stats.losses;
        }
    }
}

/// One line of a leaderboard or pool table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StandingRow {
    pub team_id: TeamId,
    pub player1_name: String,
    pub player2_name: String,
    pub pool_group: Option<String>,
    pub played: u32,
    pub wins: u32,
    pub losses: u32,
    pub points: u32,
}

fn standing_row(team: &Team, matches: &[GameMatch]) -> StandingRow {
    let stats = derive_team_stats(team.id, matches);
    StandingRow {
        team_id: team.id,
        player1_name: team.player1_name.clone(),
        player2_name: team.player2_name.clone(),
        pool_group: team.pool_group.clone(),
        played: stats.wins + stats.losses,
        wins: stats.wins,
        losses: stats.losses,
        points: stats.points,
    }
}

/// Points descending, then wins descending. Stable, so remaining ties keep team order.
pub(crate) fn sort_rows(rows: &mut [StandingRow]) {
    rows.sort_by(|a, b| b.points.cmp(&a.points).then(b.wins.cmp(&a.wins)));
}

/// All teams ranked over every completed match.
pub fn leaderboard(tournament: &Tournament) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = tournament
        .teams
        .iter()
        .map(|t| standing_row(t, &tournament.matches))
        .collect();
    sort_rows(&mut rows);
    rows
}

/// Ranked table of one pool.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolStanding {
    pub name: String,
    pub rows: Vec<StandingRow>,
    /// Every pool-stage match between this pool's teams has a result.
    pub complete: bool,
}

/// Per-pool tables (pool names in order), counting pool-stage matches only.
pub fn pool_standings(tournament: &Tournament) -> Vec<PoolStanding> {
    let mut pools: BTreeMap<&str, Vec<&Team>> = BTreeMap::new();
    for team in &tournament.teams {
        if let Some(pool) = team.pool_group.as_deref() {
            pools.entry(pool).or_default().push(team);
        }
    }

    let pool_matches: Vec<GameMatch> = tournament
        .matches
        .iter()
        .filter(|m| m.stage == Stage::Pool)
        .cloned()
        .collect();

    pools
        .into_iter()
        .map(|(name, teams)| {
            let mut rows: Vec<StandingRow> =
                teams.iter().map(|t| standing_row(t, &pool_matches)).collect();
            sort_rows(&mut rows);
            let complete = pool_matches
                .iter()
                .filter(|m| teams.iter().any(|t| m.involves(t.id)))
                .all(GameMatch::is_completed);
            PoolStanding {
                name: name.to_string(),
                rows,
                complete,
            }
        })
        .collect()
}

/// Teams sharing the top point total. Empty unless at least two share it.
pub fn find_tied_top_teams(tournament: &Tournament) -> Vec<StandingRow> {
    let rows = leaderboard(tournament);
    let Some(top) = rows.first().map(|r| r.points) else {
        return Vec::new();
    };
    let tied: Vec<StandingRow> = rows.into_iter().filter(|r| r.points == top).collect();
    if tied.len() > 1 {
        tied
    } else {
        Vec::new()
    }
}

/// A tiebreaker makes sense once every match is done, none is pending, and first place is shared.
pub fn can_add_tiebreaker(tournament: &Tournament) -> bool {
    let all_completed = !tournament.matches.is_empty()
        && tournament.matches.iter().all(GameMatch::is_completed);
    let pending_tiebreaker = tournament
        .matches
        .iter()
        .any(|m| m.stage == Stage::Tiebreaker && !m.is_completed());
    all_completed && !pending_tiebreaker && find_tied_top_teams(tournament).len() >= 2
}
