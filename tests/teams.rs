//! Integration tests for the randomizer, team draw and roster import.

use pool_tournament_web::{create_randomized_teams, parse_roster_csv, shuffle, TournamentError};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("P{i}")).collect()
}

#[test]
fn shuffle_is_a_permutation_and_leaves_input_alone() {
    let input: Vec<u32> = (0..20).collect();
    let mut rng = StdRng::seed_from_u64(7);
    let shuffled = shuffle(&input, &mut rng);

    assert_eq!(input, (0..20).collect::<Vec<_>>());
    let mut sorted = shuffled.clone();
    sorted.sort();
    assert_eq!(sorted, input);
}

#[test]
fn shuffle_is_repeatable_with_the_same_seed() {
    let input = names(10);
    let a = shuffle(&input, &mut StdRng::seed_from_u64(42));
    let b = shuffle(&input, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn shuffle_handles_empty_and_single() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(shuffle::<u8, _>(&[], &mut rng).is_empty());
    assert_eq!(shuffle(&["solo"], &mut rng), vec!["solo"]);
}

#[test]
fn teams_pair_every_player_once() {
    let players = names(12);
    let mut rng = StdRng::seed_from_u64(3);
    let teams = create_randomized_teams(&players, &mut rng).unwrap();

    assert_eq!(teams.len(), 6);
    let mut seen: Vec<String> = teams
        .iter()
        .flat_map(|t| [t.player1.clone(), t.player2.clone()])
        .collect();
    for t in &teams {
        assert_ne!(t.player1, t.player2);
    }
    seen.sort();
    let mut expected = players.clone();
    expected.sort();
    assert_eq!(seen, expected);
}

#[test]
fn teams_keep_duplicate_names_as_given() {
    let players: Vec<String> = ["Sam", "Sam", "Alex", "Jo"].iter().map(|s| s.to_string()).collect();
    let teams = create_randomized_teams(&players, &mut StdRng::seed_from_u64(9)).unwrap();
    let sams = teams
        .iter()
        .flat_map(|t| [&t.player1, &t.player2])
        .filter(|n| n.as_str() == "Sam")
        .count();
    assert_eq!(sams, 2);
}

#[test]
fn teams_need_at_least_two_players() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        create_randomized_teams(&names(0), &mut rng),
        Err(TournamentError::NotEnoughPlayers)
    );
    assert_eq!(
        create_randomized_teams(&names(1), &mut rng),
        Err(TournamentError::NotEnoughPlayers)
    );
}

#[test]
fn teams_need_an_even_player_count() {
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        create_randomized_teams(&names(7), &mut rng),
        Err(TournamentError::OddPlayerCount(7))
    );
}

#[test]
fn roster_reads_first_column_and_skips_blanks() {
    let text = "Alice\n  Bob  \n\nCarol,left handed\n , \nDave\n";
    let roster = parse_roster_csv(text).unwrap();
    assert_eq!(roster, vec!["Alice", "Bob", "Carol", "Dave"]);
}

#[test]
fn roster_handles_quoted_names() {
    let roster = parse_roster_csv("\"Smith, Jr.\"\nAnn\n").unwrap();
    assert_eq!(roster, vec!["Smith, Jr.", "Ann"]);
}
