use std::collections::HashMap;

use chrono::Utc;
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::models::player::{Player, PlayerWithTeams};
use crate::models::team::TeamRef;

/// Typed read/write access to the player registry.
#[derive(Debug, Clone)]
pub struct PlayerQueries {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct PlayerTeamRow {
    player_id: Uuid,
    player_name: String,
    team_id: Option<Uuid>,
    team_name: Option<String>,
}

#[derive(Debug, FromRow)]
struct RosterRow {
    team_id: Uuid,
    id: Uuid,
    name: String,
}

impl PlayerQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, player_id: Uuid) -> Result<Option<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>("SELECT id, name FROM players WHERE id = $1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Case-insensitive lookup used for duplicate-name detection
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>("SELECT id, name FROM players WHERE LOWER(name) = LOWER($1)")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert(&self, name: &str) -> Result<Player, sqlx::Error> {
        let player_id = Uuid::new_v4();
        let now = Utc::now();
        debug!("Inserting player '{}' as {}", name, player_id);

        sqlx::query_as::<_, Player>(
            r#"
            INSERT INTO players (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, name
            "#,
        )
        .bind(player_id)
        .bind(name)
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn list(&self) -> Result<Vec<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>("SELECT id, name FROM players ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    pub async fn list_by_team(&self, team_id: Uuid) -> Result<Vec<Player>, sqlx::Error> {
        sqlx::query_as::<_, Player>(
            r#"
            SELECT p.id, p.name
            FROM players p
            JOIN team_players tp ON tp.player_id = p.id
            WHERE tp.team_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await
    }

    /// How many of the given ids actually exist
    pub async fn count_existing(&self, player_ids: &[Uuid]) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM players WHERE id = ANY($1)")
            .bind(player_ids)
            .fetch_one(&self.pool)
            .await
    }

    /// Every player together with the teams they belong to
    pub async fn list_with_teams(&self) -> Result<Vec<PlayerWithTeams>, sqlx::Error> {
        let rows = sqlx::query_as::<_, PlayerTeamRow>(
            r#"
            SELECT p.id AS player_id, p.name AS player_name,
                   t.id AS team_id, t.name AS team_name
            FROM players p
            LEFT JOIN team_players tp ON tp.player_id = p.id
            LEFT JOIN teams t ON t.id = tp.team_id
            ORDER BY p.name, t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut players: Vec<PlayerWithTeams> = Vec::new();
        for row in rows {
            match players.last_mut() {
                Some(last) if last.id == row.player_id => {
                    if let (Some(id), Some(name)) = (row.team_id, row.team_name) {
                        last.teams.push(TeamRef { id, name });
                    }
                }
                _ => {
                    let mut teams = Vec::new();
                    if let (Some(id), Some(name)) = (row.team_id, row.team_name) {
                        teams.push(TeamRef { id, name });
                    }
                    players.push(PlayerWithTeams {
                        id: row.player_id,
                        name: row.player_name,
                        teams,
                    });
                }
            }
        }
        Ok(players)
    }

    /// Rosters of the given teams, keyed by team id
    pub async fn rosters_by_team(
        &self,
        team_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Player>>, sqlx::Error> {
        let rows = sqlx::query_as::<_, RosterRow>(
            r#"
            SELECT tp.team_id, p.id, p.name
            FROM team_players tp
            JOIN players p ON p.id = tp.player_id
            WHERE tp.team_id = ANY($1)
            ORDER BY p.name
            "#,
        )
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut rosters: HashMap<Uuid, Vec<Player>> = HashMap::new();
        for row in rows {
            rosters.entry(row.team_id).or_default().push(Player {
                id: row.id,
                name: row.name,
            });
        }
        Ok(rosters)
    }

    /// Resolve a set of player ids to display names
    pub async fn names_by_id(
        &self,
        player_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Player>("SELECT id, name FROM players WHERE id = ANY($1)")
            .bind(player_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|p| (p.id, p.name)).collect())
    }
}
