//! Match (game) and Stage for pool tournaments.

use crate::models::team::TeamId;
use crate::models::tournament::TournamentId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Phase of the tournament this match belongs to.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Pool,
    Quarterfinal,
    Semifinal,
    Final,
    ThirdPlace,
    Tiebreaker,
}

impl Stage {
    /// Human readable stage name for the bracket and schedule views.
    pub fn display_name(self) -> &'static str {
        match self {
            Stage::Pool => "Pool Stage",
            Stage::Quarterfinal => "Quarter Finals",
            Stage::Semifinal => "Semi Finals",
            Stage::Final => "Final",
            Stage::ThirdPlace => "3rd Place Playoff",
            Stage::Tiebreaker => "Tiebreaker",
        }
    }

    /// Knockout stages that come out of the bracket generator.
    pub fn is_playoff(self) -> bool {
        matches!(
            self,
            Stage::Quarterfinal | Stage::Semifinal | Stage::Final | Stage::ThirdPlace
        )
    }
}

/// A single match between two teams on one table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub tournament_id: TournamentId,
    pub round_number: u32,
    pub table_number: u32,
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    /// None if not yet played.
    pub winner_id: Option<TeamId>,
    /// Refreshed on every result submission, including re-submissions.
    pub completed_at: Option<DateTime<Utc>>,
    pub stage: Stage,
    /// Slot within its playoff stage (1-based), None outside the bracket.
    pub bracket_position: Option<u32>,
    /// Seed labels ("Pool A 1st", "SF1 Winner") for playoff slots.
    pub team1_seed: Option<String>,
    pub team2_seed: Option<String>,
    /// Playoff slot whose team ids are still stand-ins until the seeds are resolved.
    pub placeholder: bool,
    pub created_at: DateTime<Utc>,
}

impl GameMatch {
    /// A regular match with known teams (pool stage, round robin or tiebreaker).
    pub fn new(
        tournament_id: TournamentId,
        round_number: u32,
        table_number: u32,
        team1_id: TeamId,
        team2_id: TeamId,
        stage: Stage,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tournament_id,
            round_number,
            table_number,
            team1_id,
            team2_id,
            winner_id: None,
            completed_at: None,
            stage,
            bracket_position: None,
            team1_seed: None,
            team2_seed: None,
            placeholder: false,
            created_at: Utc::now(),
        }
    }

    /// A bracket slot. `stand_ins` fill the team columns until the seeds resolve.
    pub fn placeholder(
        tournament_id: TournamentId,
        round_number: u32,
        table_number: u32,
        stage: Stage,
        bracket_position: u32,
        seeds: (String, String),
        stand_ins: (TeamId, TeamId),
    ) -> Self {
        Self {
            bracket_position: Some(bracket_position),
            team1_seed: Some(seeds.0),
            team2_seed: Some(seeds.1),
            placeholder: true,
            ..Self::new(
                tournament_id,
                round_number,
                table_number,
                stand_ins.0,
                stand_ins.1,
                stage,
            )
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team1_id == team_id || self.team2_id == team_id
    }

    /// The other team in this match, None if `team_id` is not playing.
    pub fn opponent_of(&self, team_id: TeamId) -> Option<TeamId> {
        if self.team1_id == team_id {
            Some(self.team2_id)
        } else if self.team2_id == team_id {
            Some(self.team1_id)
        } else {
            None
        }
    }

    /// Losing team of a completed match.
    pub fn loser_id(&self) -> Option<TeamId> {
        self.winner_id.and_then(|w| self.opponent_of(w))
    }

    pub fn is_completed(&self) -> bool {
        self.winner_id.is_some()
    }
}
