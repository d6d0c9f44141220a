use crate::data::users::UserMapping;
use crate::engine::identity;

/// Raw per-player result as returned by the game service for one challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerTelemetry {
    pub player_id: Option<String>,
    pub raw_score: Option<i64>,
    pub raw_display_name: String,
}

/// A telemetry record after identity resolution and point assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPlayer {
    pub player_id: Option<String>,
    pub display_identity: String,
    pub score: i64,
    pub points: i64,
}

impl ResolvedPlayer {
    pub fn award(&self) -> Award {
        Award {
            user: self.display_identity.clone(),
            points: self.points,
        }
    }
}

/// One day's point award for one user, fed into the leaderboard merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Award {
    pub user: String,
    pub points: i64,
}

/// Points by finishing position. Positions past the table earn the floor
/// award, so completing a challenge always counts for something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    pub points: Vec<i64>,
    pub floor: i64,
}

impl Default for RankTable {
    fn default() -> Self {
        // Earlier seasons ran [15, 10, 5].
        RankTable { points: vec![4, 3, 2], floor: 1 }
    }
}

impl RankTable {
    pub fn points_for(&self, position: usize) -> i64 {
        self.points.get(position).copied().unwrap_or(self.floor)
    }
}

/// Resolves, ranks and awards one challenge's telemetry. Missing scores count
/// as zero. The sort is stable on purpose: the game service may return equal
/// scores in a meaningful secondary order (completion time), and that order
/// decides ties.
pub fn score_players(
    telemetry: &[PlayerTelemetry],
    mappings: &[UserMapping],
    table: &RankTable,
) -> Vec<ResolvedPlayer> {
    let mut resolved: Vec<ResolvedPlayer> = telemetry
        .iter()
        .map(|t| ResolvedPlayer {
            player_id: t.player_id.clone(),
            display_identity: identity::resolve(
                t.player_id.as_deref(),
                &t.raw_display_name,
                mappings,
            ),
            score: t.raw_score.unwrap_or(0),
            points: 0,
        })
        .collect();

    resolved.sort_by(|a, b| b.score.cmp(&a.score));
    for (position, player) in resolved.iter_mut().enumerate() {
        player.points = table.points_for(position);
    }
    resolved
}
