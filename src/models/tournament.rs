//! Tournament, its settings, status and errors.

use crate::models::game::{GameMatch, MatchId};
use crate::models::team::{Team, TeamId};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Broad class of a failure, so callers can pick a response without matching every variant.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad input from the caller; re-prompt, no retry.
    InvalidInput,
    /// A referenced match or team does not exist.
    NotFound,
}

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Fewer than 2 players.
    NotEnoughPlayers,
    /// Players are paired, so the count must be even.
    OddPlayerCount(usize),
    /// A player name was blank.
    EmptyPlayerName,
    /// Fewer than 2 teams to schedule.
    NotEnoughTeams,
    /// At least one table is needed.
    NoTables,
    /// Table number outside 1..=num_tables.
    InvalidTableNumber { table: u32, num_tables: u32 },
    MatchNotFound(MatchId),
    TeamNotFound(TeamId),
    /// The submitted winner is not one of the match's two teams.
    WinnerNotInMatch { match_id: MatchId, team_id: TeamId },
    /// A team cannot be drawn against itself.
    SameTeam(TeamId),
    /// Playoff slot whose seeds have not been resolved to teams yet.
    UnresolvedMatch(MatchId),
    /// Seed label that cannot be parsed or points at nothing.
    UnknownSeed(String),
    /// Seed label that is valid but whose feeding pool or match is not finished.
    SeedNotDecided(String),
    /// Pool place beyond the size of its pool (a short trailing pool).
    PlaceNotHeld(String),
    /// The result feeds a playoff match that has already been played.
    ResultLocked(MatchId),
    /// Roster text that could not be read.
    InvalidRoster(String),
}

impl TournamentError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TournamentError::MatchNotFound(_) | TournamentError::TeamNotFound(_) => {
                ErrorKind::NotFound
            }
            _ => ErrorKind::InvalidInput,
        }
    }
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::NotEnoughPlayers => write!(f, "At least 2 players are required"),
            TournamentError::OddPlayerCount(n) => {
                write!(f, "Number of players must be even to create pairs (got {})", n)
            }
            TournamentError::EmptyPlayerName => write!(f, "Player names cannot be empty"),
            TournamentError::NotEnoughTeams => write!(f, "At least 2 teams are required"),
            TournamentError::NoTables => write!(f, "At least 1 table is required"),
            TournamentError::InvalidTableNumber { table, num_tables } => {
                write!(f, "Table {} does not exist (tables 1-{})", table, num_tables)
            }
            TournamentError::MatchNotFound(_) => write!(f, "Match not found"),
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::WinnerNotInMatch { .. } => {
                write!(f, "Winner must be one of the two teams in the match")
            }
            TournamentError::SameTeam(_) => write!(f, "A team cannot play against itself"),
            TournamentError::UnresolvedMatch(_) => {
                write!(f, "Playoff match teams are not decided yet")
            }
            TournamentError::UnknownSeed(label) => write!(f, "Unknown seed '{}'", label),
            TournamentError::SeedNotDecided(label) => {
                write!(f, "Seed '{}' is not decided yet", label)
            }
            TournamentError::PlaceNotHeld(label) => {
                write!(f, "No team holds '{}'", label)
            }
            TournamentError::ResultLocked(_) => {
                write!(f, "Result cannot change after the matches it decided were played")
            }
            TournamentError::InvalidRoster(msg) => write!(f, "Could not read roster: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Lifecycle of a tournament, set by the organizer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    #[default]
    Setup,
    InProgress,
    Completed,
}

/// How matches are organised.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentFormat {
    /// Every team plays every other team once.
    #[default]
    RoundRobin,
    /// Round robin inside pools, then a knockout bracket.
    PoolPlayoff,
}

/// Organizer input for a new tournament (everything except the player list).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TournamentSettings {
    pub venue_name: String,
    #[serde(default)]
    pub venue_location: Option<String>,
    pub tournament_date: NaiveDate,
    #[serde(default)]
    pub start_time: Option<NaiveTime>,
    pub num_tables: u32,
    pub num_rounds: u32,
    #[serde(default)]
    pub format: TournamentFormat,
}

/// Full tournament state: venue details, teams and every match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub venue_name: String,
    pub venue_location: Option<String>,
    pub tournament_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub num_tables: u32,
    /// Grows when a tiebreaker round is appended.
    pub num_rounds: u32,
    pub status: TournamentStatus,
    pub format: TournamentFormat,
    pub teams: Vec<Team>,
    pub matches: Vec<GameMatch>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    /// Create an empty tournament in Setup state.
    pub fn new(settings: TournamentSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            venue_name: settings.venue_name,
            venue_location: settings.venue_location,
            tournament_date: settings.tournament_date,
            start_time: settings.start_time,
            num_tables: settings.num_tables,
            num_rounds: settings.num_rounds,
            status: TournamentStatus::Setup,
            format: settings.format,
            teams: Vec::new(),
            matches: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: MatchId) -> Option<&GameMatch> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn get_match_mut(&mut self, id: MatchId) -> Option<&mut GameMatch> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    /// Highest round number used by any match (0 when there are none).
    pub fn max_round_number(&self) -> u32 {
        self.matches.iter().map(|m| m.round_number).max().unwrap_or(0)
    }

    /// Set the tournament status. Any transition is allowed; the organizer drives it.
    pub fn set_status(&mut self, status: TournamentStatus) {
        self.status = status;
    }
}
