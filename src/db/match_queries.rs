use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::models::matches::Match;
use crate::models::round::{Round, RoundInput};
use crate::models::stats::MatchOutcomeRow;

/// Typed read/write access to matches and their rounds.
#[derive(Debug, Clone)]
pub struct MatchQueries {
    pool: PgPool,
}

impl MatchQueries {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        team_a_id: Uuid,
        team_b_id: Uuid,
        match_date: DateTime<Utc>,
        starter_player_id: Option<Uuid>,
        notes: &str,
    ) -> Result<Match, sqlx::Error> {
        let match_id = Uuid::new_v4();
        let now = Utc::now();
        debug!("Inserting match {} ({} vs {})", match_id, team_a_id, team_b_id);

        sqlx::query_as::<_, Match>(
            r#"
            INSERT INTO matches
                (id, team_a_id, team_b_id, match_date, starter_player_id,
                 winner_team_id, final_score, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NULL, 0, $6, $7, $7)
            RETURNING id, team_a_id, team_b_id, match_date,
                      starter_player_id, winner_team_id, final_score, notes
            "#,
        )
        .bind(match_id)
        .bind(team_a_id)
        .bind(team_b_id)
        .bind(match_date)
        .bind(starter_player_id)
        .bind(notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn get(&self, match_id: Uuid) -> Result<Option<Match>, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"
            SELECT id, team_a_id, team_b_id, match_date,
                   starter_player_id, winner_team_id, final_score, notes
            FROM matches
            WHERE id = $1
            "#,
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn get_with_rounds(
        &self,
        match_id: Uuid,
    ) -> Result<Option<(Match, Vec<Round>)>, sqlx::Error> {
        let match_row = match self.get(match_id).await? {
            Some(row) => row,
            None => return Ok(None),
        };
        let rounds = self.list_rounds(match_id).await?;
        Ok(Some((match_row, rounds)))
    }

    pub async fn update_starter(
        &self,
        match_id: Uuid,
        starter_player_id: Uuid,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE matches SET starter_player_id = $1, updated_at = NOW() WHERE id = $2")
            .bind(starter_player_id)
            .bind(match_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn update_result(
        &self,
        match_id: Uuid,
        final_score: i32,
        winner_team_id: Option<Uuid>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            UPDATE matches
            SET final_score = $1, winner_team_id = $2, updated_at = NOW()
            WHERE id = $3
            "#,
        )
        .bind(final_score)
        .bind(winner_team_id)
        .bind(match_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    pub async fn insert_round(
        &self,
        match_id: Uuid,
        round_number: i32,
        input: &RoundInput,
    ) -> Result<Round, sqlx::Error> {
        let round_id = Uuid::new_v4();

        sqlx::query_as::<_, Round>(
            r#"
            INSERT INTO rounds
                (id, match_id, round_number, game_type, round_score, round_details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, NOW())
            RETURNING id, match_id, round_number, game_type, round_score, round_details
            "#,
        )
        .bind(round_id)
        .bind(match_id)
        .bind(round_number)
        .bind(&input.game_type)
        .bind(input.round_score)
        .bind(&input.round_details)
        .fetch_one(&self.pool)
        .await
    }

    /// Rounds of a match in play order
    pub async fn list_rounds(&self, match_id: Uuid) -> Result<Vec<Round>, sqlx::Error> {
        sqlx::query_as::<_, Round>(
            r#"
            SELECT id, match_id, round_number, game_type, round_score, round_details
            FROM rounds
            WHERE match_id = $1
            ORDER BY round_number
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.pool)
        .await
    }

    /// The highest-numbered round of a match, if any
    pub async fn last_round(&self, match_id: Uuid) -> Result<Option<Round>, sqlx::Error> {
        sqlx::query_as::<_, Round>(
            r#"
            SELECT id, match_id, round_number, game_type, round_score, round_details
            FROM rounds
            WHERE match_id = $1
            ORDER BY round_number DESC
            LIMIT 1
            "#,
        )
        .bind(match_id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Rounds of several matches in one go, in play order per match
    pub async fn list_rounds_for_matches(
        &self,
        match_ids: &[Uuid],
    ) -> Result<Vec<Round>, sqlx::Error> {
        sqlx::query_as::<_, Round>(
            r#"
            SELECT id, match_id, round_number, game_type, round_score, round_details
            FROM rounds
            WHERE match_id = ANY($1)
            ORDER BY match_id, round_number
            "#,
        )
        .bind(match_ids)
        .fetch_all(&self.pool)
        .await
    }

    /// Outcome rows (sides, winner, starter, round count) for every match
    /// in which any of the given teams took part.
    pub async fn list_outcomes_for_teams(
        &self,
        team_ids: &[Uuid],
    ) -> Result<Vec<MatchOutcomeRow>, sqlx::Error> {
        sqlx::query_as::<_, MatchOutcomeRow>(
            r#"
            SELECT m.id, m.team_a_id, m.team_b_id,
                   m.starter_player_id, m.winner_team_id,
                   ta.name AS team_a_name, tb.name AS team_b_name,
                   (SELECT COUNT(*) FROM rounds r WHERE r.match_id = m.id) AS round_count
            FROM matches m
            JOIN teams ta ON ta.id = m.team_a_id
            JOIN teams tb ON tb.id = m.team_b_id
            WHERE m.team_a_id = ANY($1) OR m.team_b_id = ANY($1)
            ORDER BY m.id
            "#,
        )
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await
    }

    /// Outcome rows for every stored match
    pub async fn list_all_outcomes(&self) -> Result<Vec<MatchOutcomeRow>, sqlx::Error> {
        sqlx::query_as::<_, MatchOutcomeRow>(
            r#"
            SELECT m.id, m.team_a_id, m.team_b_id,
                   m.starter_player_id, m.winner_team_id,
                   ta.name AS team_a_name, tb.name AS team_b_name,
                   (SELECT COUNT(*) FROM rounds r WHERE r.match_id = m.id) AS round_count
            FROM matches m
            JOIN teams ta ON ta.id = m.team_a_id
            JOIN teams tb ON tb.id = m.team_b_id
            ORDER BY m.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Every match date, newest first
    pub async fn list_dates_desc(&self) -> Result<Vec<DateTime<Utc>>, sqlx::Error> {
        sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT match_date FROM matches ORDER BY match_date DESC",
        )
        .fetch_all(&self.pool)
        .await
    }

    /// Matches within a date window, oldest first
    pub async fn list_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Match>, sqlx::Error> {
        sqlx::query_as::<_, Match>(
            r#"
            SELECT id, team_a_id, team_b_id, match_date,
                   starter_player_id, winner_team_id, final_score, notes
            FROM matches
            WHERE match_date >= $1 AND match_date < $2
            ORDER BY match_date
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
    }
}
