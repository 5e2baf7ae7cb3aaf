//! Data structures for the pool tournament: teams, matches, tournament record.

mod game;
mod team;
mod tournament;

pub use game::{GameMatch, MatchId, Stage};
pub use team::{Team, TeamId, TeamStats, POINTS_PER_WIN};
pub use tournament::{
    ErrorKind, Tournament, TournamentError, TournamentFormat, TournamentId, TournamentSettings,
    TournamentStatus,
};
