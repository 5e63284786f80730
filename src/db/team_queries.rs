use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::player::Player;
use crate::models::team::{Team, TeamWithPlayers};

/// Typed read/write access to the team registry.
#[derive(Debug, Clone)]
pub struct TeamQueries {
    pool: PgPool,
}

impl TeamQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self, team_id: Uuid) -> Result<Option<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT id, name FROM teams WHERE id = $1")
            .bind(team_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn list(&self) -> Result<Vec<Team>, sqlx::Error> {
        sqlx::query_as::<_, Team>("SELECT id, name FROM teams ORDER BY name")
            .fetch_all(&self.pool)
            .await
    }

    /// Create a team and attach its two players in one transaction
    pub async fn insert_with_players(
        &self,
        name: &str,
        player_ids: &[Uuid],
    ) -> Result<TeamWithPlayers, sqlx::Error> {
        let team_id = Uuid::new_v4();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO teams (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            "#,
        )
        .bind(team_id)
        .bind(name)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for player_id in player_ids {
            sqlx::query("INSERT INTO team_players (team_id, player_id) VALUES ($1, $2)")
                .bind(team_id)
                .bind(player_id)
                .execute(&mut *tx)
                .await?;
        }

        let players = sqlx::query_as::<_, Player>(
            r#"
            SELECT p.id, p.name
            FROM players p
            JOIN team_players tp ON tp.player_id = p.id
            WHERE tp.team_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(team_id)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("Created team '{}' with ID: {}", name, team_id);

        Ok(TeamWithPlayers {
            id: team_id,
            name: name.to_string(),
            players,
        })
    }

    /// Does any team already pair up these two players?
    pub async fn pair_exists(&self, first: Uuid, second: Uuid) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM team_players a
                JOIN team_players b ON a.team_id = b.team_id
                WHERE a.player_id = $1 AND b.player_id = $2
            )
            "#,
        )
        .bind(first)
        .bind(second)
        .fetch_one(&self.pool)
        .await
    }

    /// Resolve a set of team ids to display names
    pub async fn names_by_id(
        &self,
        team_ids: &[Uuid],
    ) -> Result<std::collections::HashMap<Uuid, String>, sqlx::Error> {
        let rows = sqlx::query_as::<_, Team>("SELECT id, name FROM teams WHERE id = ANY($1)")
            .bind(team_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|t| (t.id, t.name)).collect())
    }

    /// Ids of every team the player belongs to
    pub async fn team_ids_for_player(&self, player_id: Uuid) -> Result<Vec<Uuid>, sqlx::Error> {
        sqlx::query_scalar::<_, Uuid>(
            "SELECT team_id FROM team_players WHERE player_id = $1 ORDER BY team_id",
        )
        .bind(player_id)
        .fetch_all(&self.pool)
        .await
    }

    /// (player_id, team_id) membership pairs across the whole registry
    pub async fn list_memberships(&self) -> Result<Vec<(Uuid, Uuid)>, sqlx::Error> {
        sqlx::query_as::<_, (Uuid, Uuid)>(
            "SELECT player_id, team_id FROM team_players ORDER BY player_id, team_id",
        )
        .fetch_all(&self.pool)
        .await
    }
}
