//! Round numbering policy for a match in progress.
//!
//! A match holds at most 21 rounds, numbered contiguously from 1.
//! Round 21 is the decider and is only reachable when round 20 was
//! recorded as a deliberate zero-score placeholder. Rounds that fall
//! outside the policy are dropped silently, never errored.

use uuid::Uuid;

use crate::models::round::Round;

/// Hard cap on rounds per match.
pub const MAX_ROUNDS: i32 = 21;

/// The decider round, gated on the placeholder below.
pub const DECIDER_ROUND: i32 = 21;

/// Round 20 must score exactly zero for the decider to open up.
pub const PLACEHOLDER_ROUND: i32 = 20;

/// Outcome of offering one more round to a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundDecision {
    /// Persist the round under this number.
    Admit(i32),
    /// Drop the round and everything after it in the same batch.
    Reject,
}

/// Assigns round numbers across one append batch.
///
/// Seeded from the rounds already stored for the match; every admitted
/// round advances the planner, so the decider gate sees rounds admitted
/// earlier in the same batch as well as stored ones.
#[derive(Debug)]
pub struct RoundPlanner {
    count: i32,
    placeholder_score: Option<i32>,
}

impl RoundPlanner {
    pub fn new(existing: &[Round]) -> Self {
        Self {
            count: existing.len() as i32,
            placeholder_score: existing
                .iter()
                .find(|r| r.round_number == PLACEHOLDER_ROUND)
                .map(|r| r.round_score),
        }
    }

    /// Planner over bare state, without loaded round records.
    pub fn from_parts(existing_count: i32, placeholder_score: Option<i32>) -> Self {
        Self {
            count: existing_count,
            placeholder_score,
        }
    }

    /// Offer the next input round; on `Admit(n)` the caller must persist
    /// it as round `n` before offering another.
    pub fn admit(&mut self, round_score: i32) -> RoundDecision {
        let next = self.count + 1;

        if next > MAX_ROUNDS {
            return RoundDecision::Reject;
        }

        if next == DECIDER_ROUND && self.placeholder_score != Some(0) {
            return RoundDecision::Reject;
        }

        self.count = next;
        if next == PLACEHOLDER_ROUND {
            self.placeholder_score = Some(round_score);
        }

        RoundDecision::Admit(next)
    }
}

/// Derive a match's final score and winner from its last round.
///
/// Positive favors team A, negative team B, zero (or no rounds at all)
/// leaves the match without a winner.
pub fn decide_outcome(
    last_round_score: Option<i32>,
    team_a_id: Uuid,
    team_b_id: Uuid,
) -> (i32, Option<Uuid>) {
    let final_score = last_round_score.unwrap_or(0);

    let winner = if final_score > 0 {
        Some(team_a_id)
    } else if final_score < 0 {
        Some(team_b_id)
    } else {
        None
    };

    (final_score, winner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(number: i32, score: i32) -> Round {
        Round {
            id: Uuid::new_v4(),
            match_id: Uuid::new_v4(),
            round_number: number,
            game_type: "normal".to_string(),
            round_score: score,
            round_details: None,
        }
    }

    #[test]
    fn test_rounds_number_contiguously_from_one() {
        let mut planner = RoundPlanner::new(&[]);
        assert_eq!(planner.admit(5), RoundDecision::Admit(1));
        assert_eq!(planner.admit(-3), RoundDecision::Admit(2));
        assert_eq!(planner.admit(0), RoundDecision::Admit(3));
    }

    #[test]
    fn test_numbering_continues_after_stored_rounds() {
        let existing = vec![round(1, 5), round(2, -2)];
        let mut planner = RoundPlanner::new(&existing);
        assert_eq!(planner.admit(4), RoundDecision::Admit(3));
    }

    #[test]
    fn test_cap_stops_at_twenty_without_placeholder() {
        let mut planner = RoundPlanner::new(&[]);
        for expected in 1..=20 {
            assert_eq!(planner.admit(1), RoundDecision::Admit(expected));
        }
        // Round 20 scored 1, so the decider never opens
        assert_eq!(planner.admit(1), RoundDecision::Reject);
        assert_eq!(planner.admit(1), RoundDecision::Reject);
    }

    #[test]
    fn test_decider_opens_after_zero_placeholder_in_same_batch() {
        let mut planner = RoundPlanner::new(&[]);
        for expected in 1..=19 {
            assert_eq!(planner.admit(2), RoundDecision::Admit(expected));
        }
        assert_eq!(planner.admit(0), RoundDecision::Admit(20));
        assert_eq!(planner.admit(7), RoundDecision::Admit(21));
        // Nothing beyond the decider, ever
        assert_eq!(planner.admit(1), RoundDecision::Reject);
    }

    #[test]
    fn test_decider_opens_after_stored_zero_placeholder() {
        let existing: Vec<Round> = (1..=20)
            .map(|n| round(n, if n == 20 { 0 } else { 3 }))
            .collect();
        let mut planner = RoundPlanner::new(&existing);
        assert_eq!(planner.admit(-4), RoundDecision::Admit(21));
    }

    #[test]
    fn test_decider_blocked_by_stored_nonzero_round_twenty() {
        let existing: Vec<Round> = (1..=20).map(|n| round(n, 3)).collect();
        let mut planner = RoundPlanner::new(&existing);
        assert_eq!(planner.admit(-4), RoundDecision::Reject);
    }

    #[test]
    fn test_outcome_positive_score_goes_to_team_a() {
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        assert_eq!(
            decide_outcome(Some(5), team_a, team_b),
            (5, Some(team_a))
        );
    }

    #[test]
    fn test_outcome_negative_score_goes_to_team_b() {
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        assert_eq!(
            decide_outcome(Some(-2), team_a, team_b),
            (-2, Some(team_b))
        );
    }

    #[test]
    fn test_outcome_zero_score_has_no_winner() {
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        assert_eq!(decide_outcome(Some(0), team_a, team_b), (0, None));
    }

    #[test]
    fn test_outcome_without_rounds_is_scoreless() {
        let team_a = Uuid::new_v4();
        let team_b = Uuid::new_v4();
        assert_eq!(decide_outcome(None, team_a, team_b), (0, None));
    }
}
