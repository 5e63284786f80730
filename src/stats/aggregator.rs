use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_queries::MatchQueries;
use crate::db::player_queries::PlayerQueries;
use crate::db::team_queries::TeamQueries;
use crate::errors::TrackerError;
use crate::models::stats::{MatchOutcomeRow, OutcomeStats, StatBlock, StatsKind};
use crate::stats::general::{build_blocks, tally_entity, EntityAggregate};
use crate::stats::outcomes::{summarize_outcomes, OutcomeInput};

/// Service computing derived statistics from stored match history.
/// Everything is recomputed per call; nothing is cached.
pub struct StatsService {
    matches: MatchQueries,
    players: PlayerQueries,
    teams: TeamQueries,
}

impl StatsService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            matches: MatchQueries::new(pool.clone()),
            players: PlayerQueries::new(pool.clone()),
            teams: TeamQueries::new(pool),
        }
    }

    /// Aggregate outcome of every match the team took part in.
    /// Opponents are tallied at team granularity.
    #[tracing::instrument(name = "Team statistics", skip(self))]
    pub async fn team_stats(&self, team_id: Uuid) -> Result<OutcomeStats, TrackerError> {
        let rows = self.matches.list_outcomes_for_teams(&[team_id]).await?;

        let outcomes: Vec<OutcomeInput> = rows
            .iter()
            .map(|row| {
                let (opponent_id, opponent_name) = if row.team_a_id == team_id {
                    (row.team_b_id, row.team_b_name.clone())
                } else {
                    (row.team_a_id, row.team_a_name.clone())
                };
                OutcomeInput {
                    own_team_id: team_id,
                    winner_team_id: row.winner_team_id,
                    round_count: row.round_count,
                    opponents: vec![(opponent_id, opponent_name)],
                }
            })
            .collect();

        Ok(summarize_outcomes(&outcomes))
    }

    /// Aggregate outcome across every team the player belongs to.
    /// Opponents are the opposing players, the queried player excluded.
    #[tracing::instrument(name = "Player statistics", skip(self))]
    pub async fn player_stats(&self, player_id: Uuid) -> Result<OutcomeStats, TrackerError> {
        if self.players.get(player_id).await?.is_none() {
            return Err(TrackerError::NotFound("Player not found".into()));
        }

        let own_team_ids = self.teams.team_ids_for_player(player_id).await?;
        let rows = self.matches.list_outcomes_for_teams(&own_team_ids).await?;

        // One roster fetch for every team seen across the history
        let involved: Vec<Uuid> = rows
            .iter()
            .flat_map(|row| [row.team_a_id, row.team_b_id])
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let rosters = self.players.rosters_by_team(&involved).await?;

        let own_set: HashSet<Uuid> = own_team_ids.iter().copied().collect();
        let outcomes: Vec<OutcomeInput> = rows
            .iter()
            .map(|row| {
                let own_team_id = if own_set.contains(&row.team_a_id) {
                    row.team_a_id
                } else {
                    row.team_b_id
                };
                let opponent_team_id = if own_team_id == row.team_a_id {
                    row.team_b_id
                } else {
                    row.team_a_id
                };

                let opponents = rosters
                    .get(&opponent_team_id)
                    .map(|players| {
                        players
                            .iter()
                            .filter(|p| p.id != player_id)
                            .map(|p| (p.id, p.name.clone()))
                            .collect()
                    })
                    .unwrap_or_default();

                OutcomeInput {
                    own_team_id,
                    winner_team_id: row.winner_team_id,
                    round_count: row.round_count,
                    opponents,
                }
            })
            .collect();

        Ok(summarize_outcomes(&outcomes))
    }

    /// The nine league-wide ranking blocks for all teams or all players.
    /// Match history is loaded once and partitioned per entity.
    #[tracing::instrument(name = "General statistics", skip(self))]
    pub async fn general_stats(&self, kind: StatsKind) -> Result<Vec<StatBlock>, TrackerError> {
        let rows = self.matches.list_all_outcomes().await?;

        let entries = match kind {
            StatsKind::Teams => self.team_aggregates(&rows).await?,
            StatsKind::Players => self.player_aggregates(&rows).await?,
        };

        Ok(build_blocks(kind, &entries))
    }

    async fn team_aggregates(
        &self,
        rows: &[MatchOutcomeRow],
    ) -> Result<Vec<EntityAggregate>, TrackerError> {
        let teams = self.teams.list().await?;

        let mut entries = Vec::new();
        for team in teams {
            let involved = rows
                .iter()
                .filter(|row| row.team_a_id == team.id || row.team_b_id == team.id);
            if let Some(tally) = tally_entity(team.id, involved, |row| {
                if row.team_a_id == team.id {
                    row.team_a_id
                } else {
                    row.team_b_id
                }
            }) {
                entries.push(EntityAggregate {
                    id: team.id,
                    name: team.name,
                    tally,
                });
            }
        }
        Ok(entries)
    }

    async fn player_aggregates(
        &self,
        rows: &[MatchOutcomeRow],
    ) -> Result<Vec<EntityAggregate>, TrackerError> {
        let players = self.players.list().await?;

        let mut teams_of: HashMap<Uuid, HashSet<Uuid>> = HashMap::new();
        for (player_id, team_id) in self.teams.list_memberships().await? {
            teams_of.entry(player_id).or_default().insert(team_id);
        }

        let mut entries = Vec::new();
        for player in players {
            let Some(own_teams) = teams_of.get(&player.id) else {
                continue;
            };

            let involved = rows.iter().filter(|row| {
                own_teams.contains(&row.team_a_id) || own_teams.contains(&row.team_b_id)
            });
            if let Some(tally) = tally_entity(player.id, involved, |row| {
                if own_teams.contains(&row.team_a_id) {
                    row.team_a_id
                } else {
                    row.team_b_id
                }
            }) {
                entries.push(EntityAggregate {
                    id: player.id,
                    name: player.name,
                    tally,
                });
            }
        }
        Ok(entries)
    }
}
