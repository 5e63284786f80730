use sqlx::PgPool;
use uuid::Uuid;

use crate::db::match_queries::MatchQueries;
use crate::errors::TrackerError;
use crate::models::matches::{Match, MatchCreateRequest, MatchUpdateRequest};
use crate::scoring::rounds::{decide_outcome, RoundDecision, RoundPlanner};

/// Service owning the legal progression of a match: creation, round
/// appends and finalization.
pub struct MatchProgressionService {
    matches: MatchQueries,
}

impl MatchProgressionService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            matches: MatchQueries::new(pool),
        }
    }

    /// Create a match in its unscored initial state.
    ///
    /// Team existence is not pre-validated here; a dangling id fails at
    /// the store's foreign keys.
    #[tracing::instrument(name = "Create match", skip(self, request))]
    pub async fn create_match(&self, request: &MatchCreateRequest) -> Result<Match, TrackerError> {
        let team_a_id = request
            .team_a_id
            .ok_or_else(|| TrackerError::InvalidInput("Missing required fields".into()))?;
        let team_b_id = request
            .team_b_id
            .ok_or_else(|| TrackerError::InvalidInput("Missing required fields".into()))?;
        let match_date = request.parsed_date().map_err(TrackerError::InvalidInput)?;

        let created = self
            .matches
            .insert(
                team_a_id,
                team_b_id,
                match_date,
                request.starter_player_id,
                request.notes.as_deref().unwrap_or(""),
            )
            .await?;

        tracing::info!("Created match {} ({} vs {})", created.id, team_a_id, team_b_id);
        Ok(created)
    }

    /// Append submitted rounds to a match and optionally finalize it.
    ///
    /// The starter update is unconditional and unvalidated against the
    /// rosters. Rounds falling outside the numbering policy are dropped
    /// silently along with the rest of the batch. Inserts and the finish
    /// step are independent writes: a failure partway through leaves the
    /// earlier rounds persisted.
    #[tracing::instrument(name = "Append rounds", skip(self, request), fields(match_id = %match_id))]
    pub async fn append_rounds(
        &self,
        match_id: Uuid,
        request: &MatchUpdateRequest,
    ) -> Result<(), TrackerError> {
        let (match_row, existing) = self
            .matches
            .get_with_rounds(match_id)
            .await?
            .ok_or_else(|| TrackerError::NotFound("Match not found".into()))?;

        if let Some(starter_player_id) = request.starter_player_id {
            self.matches
                .update_starter(match_id, starter_player_id)
                .await?;
        }

        if let Some(rounds) = &request.rounds {
            let mut planner = RoundPlanner::new(&existing);
            let mut stored = 0usize;

            for input in rounds {
                match planner.admit(input.round_score) {
                    RoundDecision::Admit(round_number) => {
                        self.matches
                            .insert_round(match_id, round_number, input)
                            .await?;
                        stored += 1;
                    }
                    RoundDecision::Reject => break,
                }
            }

            if stored < rounds.len() {
                tracing::info!(
                    "Dropped {} of {} submitted rounds for match {}",
                    rounds.len() - stored,
                    rounds.len(),
                    match_id
                );
            }
        }

        if request.finish == Some(true) {
            let last_round = self.matches.last_round(match_id).await?;
            let (final_score, winner_team_id) = decide_outcome(
                last_round.map(|r| r.round_score),
                match_row.team_a_id,
                match_row.team_b_id,
            );

            self.matches
                .update_result(match_id, final_score, winner_team_id)
                .await?;

            tracing::info!(
                "Finalized match {}: final score {}, winner {:?}",
                match_id,
                final_score,
                winner_team_id
            );
        }

        Ok(())
    }
}
