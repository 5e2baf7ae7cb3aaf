//! Tiebreaker: one extra match after the last round to settle a shared first place.

use crate::models::{GameMatch, MatchId, Stage, TeamId, Tournament, TournamentError};

/// Append a tiebreaker between two teams at `max(round) + 1` and grow `num_rounds` if needed.
pub fn add_tiebreaker_match(
    tournament: &mut Tournament,
    team1_id: TeamId,
    team2_id: TeamId,
    table_number: u32,
) -> Result<MatchId, TournamentError> {
    for id in [team1_id, team2_id] {
        if tournament.get_team(id).is_none() {
            return Err(TournamentError::TeamNotFound(id));
        }
    }
    if team1_id == team2_id {
        return Err(TournamentError::SameTeam(team1_id));
    }
    if table_number == 0 || table_number > tournament.num_tables {
        return Err(TournamentError::InvalidTableNumber {
            table: table_number,
            num_tables: tournament.num_tables,
        });
    }

    let next_round = tournament.max_round_number() + 1;
    let m = GameMatch::new(
        tournament.id,
        next_round,
        table_number,
        team1_id,
        team2_id,
        Stage::Tiebreaker,
    );
    let id = m.id;
    tournament.matches.push(m);

    if next_round > tournament.num_rounds {
        tournament.num_rounds = next_round;
    }
    log::info!(
        "Tiebreaker added to tournament {} in round {} on table {}",
        tournament.id,
        next_round,
        table_number
    );
    Ok(id)
}
