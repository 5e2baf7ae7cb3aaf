//! Pool tournament web app: library with models and the scheduling / bracket engine.

pub mod logic;
pub mod models;

pub use logic::{
    add_tiebreaker_match, apply_result, calculate_total_matches, calculate_total_rounds,
    can_add_tiebreaker, create_pool_groups, create_randomized_teams, create_tournament,
    derive_team_stats, determine_playoff_format, find_tied_top_teams, generate_playoff_bracket,
    generate_round_robin_schedule, leaderboard, parse_roster_csv, pool_standings,
    recommend_rounds, recompute_standings, resolve_playoff_bracket, resolve_seed,
    resolve_seed_label, set_match_winner, shuffle, PlayoffFormat, PlayoffSlot, PoolGroup,
    PoolStanding, ResultUpdate, Round, RoundRecommendation, ScheduledMatch, Seed, StandingRow,
    TeamPair,
};
pub use models::{
    ErrorKind, GameMatch, MatchId, Stage, Team, TeamId, TeamStats, Tournament, TournamentError,
    TournamentFormat, TournamentId, TournamentSettings, TournamentStatus,
};
