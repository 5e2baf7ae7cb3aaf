//! Pool stage: split teams into named pools and pick the playoff format.

use crate::models::Stage;
use serde::{Deserialize, Serialize};

/// Pool names in order. No more pools than this are ever created.
pub const POOL_NAMES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PoolGroup<T> {
    pub name: String,
    pub team_ids: Vec<T>,
}

/// Fill pools in input order, `ceil(teams / pools)` teams at a time.
///
/// Trailing pools may be smaller; pools that would be empty are left out.
pub fn create_pool_groups<T: Clone>(team_ids: &[T], num_pools: usize) -> Vec<PoolGroup<T>> {
    let num_pools = num_pools.min(POOL_NAMES.len());
    if num_pools == 0 || team_ids.is_empty() {
        return Vec::new();
    }
    let teams_per_pool = team_ids.len().div_ceil(num_pools);

    team_ids
        .chunks(teams_per_pool)
        .zip(POOL_NAMES)
        .map(|(chunk, name)| PoolGroup {
            name: name.to_string(),
            team_ids: chunk.to_vec(),
        })
        .collect()
}

/// Pool and bracket shape for a given number of teams.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayoffFormat {
    pub num_pools: usize,
    pub teams_per_pool: usize,
    /// Teams advancing from each pool (or in total when there are no pools).
    pub teams_qualify: usize,
    pub stages: Vec<Stage>,
}

/// Choose the playoff format by team count.
///
/// | teams  | pools | per pool    | qualify | bracket           |
/// |--------|-------|-------------|---------|-------------------|
/// | 8      | 2     | 4           | 2       | SF, F, 3rd        |
/// | 12-16  | 4     | ceil(n / 4) | 2       | QF, SF, F, 3rd    |
/// | >= 6   | 2     | ceil(n / 2) | 2       | SF, F, 3rd        |
/// | < 6    | 0     | 0           | 4       | SF, F, 3rd        |
///
/// 9-11 and more than 16 teams fall through to the two-pool row.
pub fn determine_playoff_format(num_teams: usize) -> PlayoffFormat {
    let knockout = vec![Stage::Semifinal, Stage::Final, Stage::ThirdPlace];

    if num_teams == 8 {
        return PlayoffFormat {
            num_pools: 2,
            teams_per_pool: 4,
            teams_qualify: 2,
            stages: knockout,
        };
    }

    if (12..=16).contains(&num_teams) {
        return PlayoffFormat {
            num_pools: 4,
            teams_per_pool: num_teams.div_ceil(4),
            teams_qualify: 2,
            stages: vec![
                Stage::Quarterfinal,
                Stage::Semifinal,
                Stage::Final,
                Stage::ThirdPlace,
            ],
        };
    }

    if num_teams >= 6 {
        return PlayoffFormat {
            num_pools: 2,
            teams_per_pool: num_teams.div_ceil(2),
            teams_qualify: 2,
            stages: knockout,
        };
    }

    // Straight to the semi-finals.
    PlayoffFormat {
        num_pools: 0,
        teams_per_pool: 0,
        teams_qualify: 4,
        stages: knockout,
    }
}
