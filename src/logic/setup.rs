//! Setup: build a tournament from the organizer's settings and player list.

use crate::logic::bracket::generate_playoff_bracket;
use crate::logic::pools::{create_pool_groups, determine_playoff_format};
use crate::logic::schedule::{generate_round_robin_schedule, Round};
use crate::logic::teams::create_randomized_teams;
use crate::models::{
    GameMatch, Stage, Team, TeamId, Tournament, TournamentError, TournamentFormat,
    TournamentSettings,
};
use rand::Rng;

/// Create a tournament with its teams and every match.
///
/// 1. Draw random teams from the players.
/// 2. Round robin: one schedule over all teams, keeping the first `num_rounds` rounds.
/// 3. Pool + playoff: split teams into pools, schedule each pool separately (each pool's
///    rounds numbered from 1), then add the bracket skeleton after the longest pool schedule.
///
/// Bracket matches carry their seed labels and two stand-in teams until
/// [`resolve_playoff_bracket`](crate::logic::resolve_playoff_bracket) fills them.
pub fn create_tournament<R: Rng + ?Sized>(
    settings: TournamentSettings,
    player_names: &[String],
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    let names: Vec<String> = player_names.iter().map(|n| n.trim().to_string()).collect();
    if names.iter().any(|n| n.is_empty()) {
        return Err(TournamentError::EmptyPlayerName);
    }
    if settings.num_tables == 0 {
        return Err(TournamentError::NoTables);
    }

    let pairs = create_randomized_teams(&names, rng)?;
    if pairs.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }

    let mut tournament = Tournament::new(settings);
    match tournament.format {
        TournamentFormat::RoundRobin => {
            tournament.teams = pairs
                .into_iter()
                .map(|p| Team::new(tournament.id, p.player1, p.player2, None))
                .collect();
            let team_ids: Vec<TeamId> = tournament.teams.iter().map(|t| t.id).collect();
            let schedule = generate_round_robin_schedule(&team_ids, tournament.num_tables, rng)?;
            let kept = (tournament.num_rounds as usize).min(schedule.len());
            push_pool_matches(&mut tournament, &schedule[..kept]);
        }
        TournamentFormat::PoolPlayoff => {
            let format = determine_playoff_format(pairs.len());
            let indices: Vec<usize> = (0..pairs.len()).collect();
            let pools = create_pool_groups(&indices, format.num_pools);

            tournament.teams = pairs
                .into_iter()
                .enumerate()
                .map(|(i, p)| {
                    let pool = pools
                        .iter()
                        .find(|g| g.team_ids.contains(&i))
                        .map(|g| g.name.clone());
                    Team::new(tournament.id, p.player1, p.player2, pool)
                })
                .collect();

            let mut pool_rounds = 0;
            for pool in &pools {
                let ids: Vec<TeamId> = pool.team_ids.iter().map(|&i| tournament.teams[i].id).collect();
                if ids.len() < 2 {
                    continue;
                }
                let schedule = generate_round_robin_schedule(&ids, tournament.num_tables, rng)?;
                pool_rounds = pool_rounds.max(schedule.len() as u32);
                push_pool_matches(&mut tournament, &schedule);
            }

            push_bracket(&mut tournament, &format.stages, pool_rounds);
        }
    }

    log::info!(
        "Created {:?} tournament {} at {}: {} teams, {} matches",
        tournament.format,
        tournament.id,
        tournament.venue_name,
        tournament.teams.len(),
        tournament.matches.len()
    );
    Ok(tournament)
}

fn push_pool_matches(tournament: &mut Tournament, rounds: &[Round<TeamId>]) {
    for (round_index, round) in rounds.iter().enumerate() {
        for m in round {
            tournament.matches.push(GameMatch::new(
                tournament.id,
                round_index as u32 + 1,
                m.table_number,
                m.team1_id,
                m.team2_id,
                Stage::Pool,
            ));
        }
    }
}

/// Playoff rounds follow the pool stage: quarters, semis, then final and 3rd place together.
/// A stage that needs more tables than the venue has spills into the next round.
///
/// Each slot gets its own pair of stand-ins so no team appears twice in a round (given at
/// least two teams per slot in the round).
fn push_bracket(tournament: &mut Tournament, stages: &[Stage], pool_rounds: u32) {
    let num_teams = tournament.teams.len();
    let mut round = pool_rounds;
    let mut current: Option<Stage> = None;
    let mut table = 0;

    for slot in generate_playoff_bracket(stages) {
        let round_key = if slot.stage == Stage::ThirdPlace {
            Stage::Final
        } else {
            slot.stage
        };
        if current != Some(round_key) || table == tournament.num_tables {
            round += 1;
            table = 0;
            current = Some(round_key);
        }
        let first = 2 * table as usize;
        let stand_ins = (
            tournament.teams[first % num_teams].id,
            tournament.teams[(first + 1) % num_teams].id,
        );
        tournament.matches.push(GameMatch::placeholder(
            tournament.id,
            round,
            table + 1,
            slot.stage,
            slot.bracket_position,
            (slot.team1_seed, slot.team2_seed),
            stand_ins,
        ));
        table += 1;
    }
}
