//! Integration tests for round-robin scheduling and round recommendations.

use pool_tournament_web::{
    calculate_total_matches, calculate_total_rounds, generate_round_robin_schedule,
    recommend_rounds, Round, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};

fn assert_complete_round_robin(teams: &[u32], rounds: &[Round<u32>], num_tables: u32) {
    let mut pairs = HashSet::new();
    for round in rounds {
        assert!(!round.is_empty());
        assert!(round.len() <= num_tables as usize);
        let mut in_round = HashSet::new();
        for (i, m) in round.iter().enumerate() {
            assert_eq!(m.table_number, i as u32 + 1);
            assert_ne!(m.team1_id, m.team2_id);
            assert!(in_round.insert(m.team1_id), "team twice in one round");
            assert!(in_round.insert(m.team2_id), "team twice in one round");
            let key = (m.team1_id.min(m.team2_id), m.team1_id.max(m.team2_id));
            assert!(pairs.insert(key), "pair scheduled twice");
        }
    }
    let k = teams.len() as u32;
    assert_eq!(pairs.len() as u64, calculate_total_matches(k));
}

#[test]
fn every_pair_meets_exactly_once() {
    for k in 2..=13u32 {
        let teams: Vec<u32> = (0..k).collect();
        for num_tables in 1..=6 {
            let mut rng = StdRng::seed_from_u64(u64::from(k * 100 + num_tables));
            let rounds = generate_round_robin_schedule(&teams, num_tables, &mut rng).unwrap();
            assert_complete_round_robin(&teams, &rounds, num_tables);
        }
    }
}

#[test]
fn four_teams_on_two_tables_take_three_rounds() {
    let teams = [1u32, 2, 3, 4];
    let rounds = generate_round_robin_schedule(&teams, 2, &mut StdRng::seed_from_u64(5)).unwrap();

    assert_eq!(rounds.len(), 3);
    let mut appearances: HashMap<u32, usize> = HashMap::new();
    for round in &rounds {
        assert_eq!(round.len(), 2);
        for m in round {
            *appearances.entry(m.team1_id).or_default() += 1;
            *appearances.entry(m.team2_id).or_default() += 1;
        }
    }
    assert!(teams.iter().all(|t| appearances[t] == 3));
}

#[test]
fn logical_rounds_split_when_tables_run_out() {
    // 8 teams: 7 logical rounds of 4 pairings; 3 tables splits each into 3 + 1.
    let teams: Vec<u32> = (0..8).collect();
    let rounds = generate_round_robin_schedule(&teams, 3, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(rounds.len(), 14);
    for pair in rounds.chunks(2) {
        assert_eq!(pair[0].len(), 3);
        assert_eq!(pair[1].len(), 1);
        assert_eq!(pair[1][0].table_number, 1);
    }
}

#[test]
fn odd_team_count_gives_one_bye_per_logical_round() {
    let teams: Vec<u32> = (0..5).collect();
    let rounds = generate_round_robin_schedule(&teams, 10, &mut StdRng::seed_from_u64(2)).unwrap();
    assert_eq!(rounds.len(), 5);
    assert!(rounds.iter().all(|r| r.len() == 2));
}

#[test]
fn schedule_works_with_string_ids() {
    let teams = ["red", "blue", "green"];
    let rounds = generate_round_robin_schedule(&teams, 1, &mut StdRng::seed_from_u64(8)).unwrap();
    assert_eq!(rounds.iter().map(Vec::len).sum::<usize>(), 3);
}

#[test]
fn schedule_rejects_too_few_teams_or_tables() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        generate_round_robin_schedule(&[1u32], 2, &mut rng),
        Err(TournamentError::NotEnoughTeams)
    );
    assert_eq!(
        generate_round_robin_schedule::<u32, _>(&[], 2, &mut rng),
        Err(TournamentError::NotEnoughTeams)
    );
    assert_eq!(
        generate_round_robin_schedule(&[1u32, 2], 0, &mut rng),
        Err(TournamentError::NoTables)
    );
}

#[test]
fn total_matches_and_rounds() {
    for k in 0..30u64 {
        assert_eq!(calculate_total_matches(k as u32), k * k.saturating_sub(1) / 2);
    }
    assert_eq!(calculate_total_rounds(0), 0);
    assert_eq!(calculate_total_rounds(4), 3);
    assert_eq!(calculate_total_rounds(5), 5);
}

#[test]
fn recommendation_fills_every_table() {
    let r = recommend_rounds(8, 2).unwrap();
    assert_eq!(r.recommended, 3);
    assert_eq!(r.max, 3);
    assert_eq!(r.min, 2);
    assert_eq!(
        r.explanation,
        "With 4 teams and 2 tables: 6 total matches across 3 rounds. Each round uses all 2 tables."
    );

    let r = recommend_rounds(20, 4).unwrap();
    assert_eq!((r.recommended, r.min, r.max), (12, 6, 12));

    let r = recommend_rounds(11, 1).unwrap();
    assert_eq!(r.max, 10);
    assert!(r.explanation.contains("1 table:"));
}

#[test]
fn recommendation_max_matches_total_matches_over_tables() {
    for players in 0..40u32 {
        for tables in 1..8u32 {
            let r = recommend_rounds(players, tables).unwrap();
            assert_eq!(r.max, calculate_total_matches(players / 2).div_ceil(u64::from(tables)));
            assert_eq!(r.recommended, r.max);
            assert_eq!(r.min, r.max.div_ceil(2).max(2));
        }
    }
}

#[test]
fn total_matches_past_the_u32_square_root() {
    assert_eq!(calculate_total_matches(65_536), 2_147_450_880);
    assert_eq!(calculate_total_matches(65_537), 2_147_516_416);
    let k = u128::from(u32::MAX);
    assert_eq!(u128::from(calculate_total_matches(u32::MAX)), k * (k - 1) / 2);
}

#[test]
fn recommendation_for_a_huge_field() {
    let r = recommend_rounds(200_000, 4).unwrap();
    assert_eq!(r.max, 1_249_987_500);
    assert_eq!(r.min, 624_993_750);
    assert!(r.explanation.contains("4999950000 total matches"));

    let r = recommend_rounds(u32::MAX, 1).unwrap();
    assert_eq!(r.max, calculate_total_matches(u32::MAX / 2));
}

#[test]
fn recommendation_needs_a_table() {
    assert_eq!(recommend_rounds(8, 0), Err(TournamentError::NoTables));
}
