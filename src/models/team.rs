//! Team and TeamStats data structures.

use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (used in matches and lookups).
pub type TeamId = Uuid;

/// Points awarded for a single win.
pub const POINTS_PER_WIN: u32 = 2;

/// Statistics view of a team (for API / display and result notifications).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamStats {
    pub team_id: TeamId,
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
}

impl TeamStats {
    pub fn from_team(t: &Team) -> Self {
        Self {
            team_id: t.id,
            points: t.points,
            wins: t.wins,
            losses: t.losses,
        }
    }
}

/// A two-player team. Counters are only touched by the standings updater.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub tournament_id: TournamentId,
    pub player1_name: String,
    pub player2_name: String,
    pub points: u32,
    pub wins: u32,
    pub losses: u32,
    /// Pool name ("A", "B", ...) in the pool + playoff format, None for round robin.
    pub pool_group: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Team {
    /// Create a new team with zeroed standings.
    pub fn new(
        tournament_id: TournamentId,
        player1_name: impl Into<String>,
        player2_name: impl Into<String>,
        pool_group: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
            points: 0,
            wins: 0,
            losses: 0,
            pool_group,
            created_at: Utc::now(),
        }
    }

    /// Current stats as a separate struct (for API responses).
    pub fn stats(&self) -> TeamStats {
        TeamStats::from_team(self)
    }

    /// Record a win for this team.
    pub fn add_win(&mut self) {
        self.wins += 1;
        self.points += POINTS_PER_WIN;
    }

    /// Record a loss for this team.
    pub fn add_loss(&mut self) {
        self.losses += 1;
    }

    /// Take back one win. Counters stop at zero; returns false if either had to be clamped.
    pub fn revert_win(&mut self) -> bool {
        let exact = self.wins >= 1 && self.points >= POINTS_PER_WIN;
        self.wins = self.wins.saturating_sub(1);
        self.points = self.points.saturating_sub(POINTS_PER_WIN);
        exact
    }

    /// Take back one loss. Stops at zero; returns false if it had to be clamped.
    pub fn revert_loss(&mut self) -> bool {
        let exact = self.losses >= 1;
        self.losses = self.losses.saturating_sub(1);
        exact
    }
}
