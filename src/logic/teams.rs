//! Team formation: read the roster and draw random two-player teams.

use crate::logic::shuffle::shuffle;
use crate::models::TournamentError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Two players drawn together. Not yet a `Team` (no ids until the tournament exists).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamPair {
    pub player1: String,
    pub player2: String,
}

/// Shuffle the players and pair them consecutively: (0,1), (2,3), ...
///
/// The order of the returned pairs is random too; it is the raw team order used for
/// pool assignment.
pub fn create_randomized_teams<R: Rng + ?Sized>(
    player_names: &[String],
    rng: &mut R,
) -> Result<Vec<TeamPair>, TournamentError> {
    if player_names.len() < 2 {
        return Err(TournamentError::NotEnoughPlayers);
    }
    if player_names.len() % 2 != 0 {
        return Err(TournamentError::OddPlayerCount(player_names.len()));
    }

    let shuffled = shuffle(player_names, rng);
    Ok(shuffled
        .chunks_exact(2)
        .map(|pair| TeamPair {
            player1: pair[0].clone(),
            player2: pair[1].clone(),
        })
        .collect())
}

/// Read player names from CSV text: first column of each record, trimmed; blank names are skipped.
pub fn parse_roster_csv(text: &str) -> Result<Vec<String>, TournamentError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut names = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| TournamentError::InvalidRoster(e.to_string()))?;
        if let Some(name) = record.get(0).filter(|n| !n.is_empty()) {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
