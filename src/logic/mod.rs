//! Tournament business logic: team draw, scheduling, pools, bracket, standings.

mod bracket;
mod pools;
mod schedule;
mod setup;
mod shuffle;
mod standings;
mod teams;
mod tiebreaker;

pub use bracket::{
    generate_playoff_bracket, resolve_playoff_bracket, resolve_seed, resolve_seed_label,
    PlayoffSlot, Seed,
};
pub use pools::{create_pool_groups, determine_playoff_format, PlayoffFormat, PoolGroup, POOL_NAMES};
pub use schedule::{
    calculate_total_matches, calculate_total_rounds, generate_round_robin_schedule,
    recommend_rounds, Round, RoundRecommendation, ScheduledMatch,
};
pub use setup::create_tournament;
pub use shuffle::shuffle;
pub use standings::{
    apply_result, can_add_tiebreaker, derive_team_stats, find_tied_top_teams, leaderboard,
    pool_standings, recompute_standings, set_match_winner, PoolStanding, ResultUpdate, StandingRow,
};
pub use teams::{create_randomized_teams, parse_roster_csv, TeamPair};
pub use tiebreaker::add_tiebreaker_match;
