//! Shared win/loss aggregation over a set of loaded matches.
//!
//! Used by both the team and the player statistics: the caller decides
//! which side of each match is "own" and who the credited opponents
//! are; everything else is uniform. A match without a declared winner
//! counts as a non-win and feeds the loss-side round minimum.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::stats::OutcomeStats;

/// One match reduced to what the aggregation needs.
#[derive(Debug, Clone)]
pub struct OutcomeInput {
    pub own_team_id: Uuid,
    pub winner_team_id: Option<Uuid>,
    pub round_count: i64,
    /// Opponents credited for this match: the opposing team for team
    /// statistics, the opposing players for player statistics.
    pub opponents: Vec<(Uuid, String)>,
}

/// Win rate as a 2-decimal percentage string, `"0"` with no matches.
pub fn format_win_rate(wins: i64, total_matches: i64) -> String {
    if total_matches > 0 {
        format!("{:.2}", (wins as f64 / total_matches as f64) * 100.0)
    } else {
        "0".to_string()
    }
}

/// Fold a set of match outcomes into the aggregate payload.
pub fn summarize_outcomes(outcomes: &[OutcomeInput]) -> OutcomeStats {
    let total_matches = outcomes.len() as i64;
    let mut wins = 0i64;
    let mut min_win_rounds: Option<i64> = None;
    let mut min_lose_rounds: Option<i64> = None;
    let mut opponent_tally: HashMap<Uuid, (String, i64)> = HashMap::new();

    for outcome in outcomes {
        let is_winner = outcome.winner_team_id == Some(outcome.own_team_id);

        if is_winner {
            wins += 1;
            min_win_rounds = Some(match min_win_rounds {
                Some(current) => current.min(outcome.round_count),
                None => outcome.round_count,
            });
        } else {
            min_lose_rounds = Some(match min_lose_rounds {
                Some(current) => current.min(outcome.round_count),
                None => outcome.round_count,
            });
        }

        for (opponent_id, opponent_name) in &outcome.opponents {
            let entry = opponent_tally
                .entry(*opponent_id)
                .or_insert_with(|| (opponent_name.clone(), 0));
            entry.1 += 1;
        }
    }

    // Highest tally wins; equal tallies resolve to the lowest id so the
    // result does not depend on map iteration order.
    let most_played_against = opponent_tally
        .into_iter()
        .max_by(|(a_id, (_, a_count)), (b_id, (_, b_count))| {
            a_count.cmp(b_count).then_with(|| b_id.cmp(a_id))
        })
        .map(|(_, (name, _))| name);

    OutcomeStats {
        total_matches,
        wins,
        losses: total_matches - wins,
        win_rate: format_win_rate(wins, total_matches),
        most_played_against,
        min_win_rounds,
        min_lose_rounds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    fn outcome(
        own: Uuid,
        winner: Option<Uuid>,
        round_count: i64,
        opponents: Vec<(Uuid, String)>,
    ) -> OutcomeInput {
        OutcomeInput {
            own_team_id: own,
            winner_team_id: winner,
            round_count,
            opponents,
        }
    }

    #[test]
    fn test_empty_history_yields_string_zero_rate() {
        let stats = summarize_outcomes(&[]);
        assert_eq!(stats.total_matches, 0);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.losses, 0);
        assert_eq!(stats.win_rate, "0");
        assert_eq!(stats.most_played_against, None);
        assert_eq!(stats.min_win_rounds, None);
        assert_eq!(stats.min_lose_rounds, None);
    }

    #[test]
    fn test_win_rate_is_two_decimal_percentage() {
        let own = uuid(1);
        let rival = uuid(2);
        let outcomes = vec![
            outcome(own, Some(own), 4, vec![(rival, "B".into())]),
            outcome(own, Some(rival), 6, vec![(rival, "B".into())]),
            outcome(own, Some(own), 3, vec![(rival, "B".into())]),
        ];
        let stats = summarize_outcomes(&outcomes);
        assert_eq!(stats.total_matches, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.win_rate, "66.67");
    }

    #[test]
    fn test_draw_counts_as_loss() {
        let own = uuid(1);
        let rival = uuid(2);
        let outcomes = vec![outcome(own, None, 5, vec![(rival, "B".into())])];
        let stats = summarize_outcomes(&outcomes);
        assert_eq!(stats.wins, 0);
        assert_eq!(stats.losses, 1);
        assert_eq!(stats.min_lose_rounds, Some(5));
        assert_eq!(stats.min_win_rounds, None);
    }

    #[test]
    fn test_round_minimums_track_each_side() {
        let own = uuid(1);
        let rival = uuid(2);
        let outcomes = vec![
            outcome(own, Some(own), 9, vec![(rival, "B".into())]),
            outcome(own, Some(own), 4, vec![(rival, "B".into())]),
            outcome(own, Some(rival), 12, vec![(rival, "B".into())]),
            outcome(own, Some(rival), 7, vec![(rival, "B".into())]),
        ];
        let stats = summarize_outcomes(&outcomes);
        assert_eq!(stats.min_win_rounds, Some(4));
        assert_eq!(stats.min_lose_rounds, Some(7));
    }

    #[test]
    fn test_most_played_against_picks_highest_tally() {
        let own = uuid(1);
        let frequent = uuid(2);
        let rare = uuid(3);
        let outcomes = vec![
            outcome(own, Some(own), 1, vec![(frequent, "Frequent".into())]),
            outcome(own, Some(own), 1, vec![(frequent, "Frequent".into())]),
            outcome(own, Some(own), 1, vec![(rare, "Rare".into())]),
        ];
        let stats = summarize_outcomes(&outcomes);
        assert_eq!(stats.most_played_against.as_deref(), Some("Frequent"));
    }

    #[test]
    fn test_most_played_against_ties_break_to_lowest_id() {
        let own = uuid(9);
        let low = uuid(2);
        let high = uuid(5);
        let outcomes = vec![
            outcome(own, Some(own), 1, vec![(high, "High".into())]),
            outcome(own, Some(own), 1, vec![(low, "Low".into())]),
        ];
        let stats = summarize_outcomes(&outcomes);
        assert_eq!(stats.most_played_against.as_deref(), Some("Low"));
    }

    #[test]
    fn test_multiple_opponents_per_match_each_get_credit() {
        // Player-granularity outcome: two opposing players per match
        let own = uuid(1);
        let first = uuid(2);
        let second = uuid(3);
        let outcomes = vec![
            outcome(
                own,
                Some(own),
                1,
                vec![(first, "First".into()), (second, "Second".into())],
            ),
            outcome(own, Some(own), 1, vec![(first, "First".into())]),
        ];
        let stats = summarize_outcomes(&outcomes);
        assert_eq!(stats.most_played_against.as_deref(), Some("First"));
    }
}
