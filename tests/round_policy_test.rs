use trix_backend::models::round::Round;
use trix_backend::scoring::rounds::{RoundDecision, RoundPlanner, MAX_ROUNDS};
use uuid::Uuid;

fn stored_round(number: i32, score: i32) -> Round {
    Round {
        id: Uuid::new_v4(),
        match_id: Uuid::new_v4(),
        round_number: number,
        game_type: "normal".to_string(),
        round_score: score,
        round_details: None,
    }
}

/// Run one append batch against the planner, returning the numbers
/// that would be persisted.
fn run_batch(planner: &mut RoundPlanner, scores: &[i32]) -> Vec<i32> {
    let mut admitted = Vec::new();
    for &score in scores {
        match planner.admit(score) {
            RoundDecision::Admit(number) => admitted.push(number),
            RoundDecision::Reject => break,
        }
    }
    admitted
}

#[test]
fn test_batch_of_25_on_empty_match_stores_exactly_21() {
    // Round 20 scores zero, so the decider round is reachable
    let scores: Vec<i32> = (0..25).map(|i| if i == 19 { 0 } else { 3 }).collect();

    let mut planner = RoundPlanner::new(&[]);
    let admitted = run_batch(&mut planner, &scores);

    assert_eq!(admitted.len(), MAX_ROUNDS as usize);
    assert_eq!(admitted, (1..=21).collect::<Vec<i32>>());
}

#[test]
fn test_batch_of_25_without_zero_placeholder_stops_at_20() {
    let scores = vec![3; 25];

    let mut planner = RoundPlanner::new(&[]);
    let admitted = run_batch(&mut planner, &scores);

    assert_eq!(admitted, (1..=20).collect::<Vec<i32>>());
}

#[test]
fn test_cap_holds_across_repeated_batches() {
    let mut total_stored: Vec<i32> = Vec::new();

    // Three separate calls of ten rounds each against growing state;
    // every stored round scored 2, so round 20 is no placeholder
    for _ in 0..3 {
        let existing: Vec<Round> = total_stored
            .iter()
            .map(|&n| stored_round(n, 2))
            .collect();
        let mut planner = RoundPlanner::new(&existing);
        let admitted = run_batch(&mut planner, &[2; 10]);
        total_stored.extend(admitted);
    }

    // 10 + 10, then the third batch is cut off at round 20: round 20
    // was stored with score 2, so the decider never opens
    assert_eq!(total_stored.len(), 20);
    assert_eq!(total_stored, (1..=20).collect::<Vec<i32>>());
}

#[test]
fn test_round_numbers_stay_contiguous_and_unique() {
    let existing = vec![stored_round(1, 4), stored_round(2, -1), stored_round(3, 0)];
    let mut planner = RoundPlanner::new(&existing);

    let admitted = run_batch(&mut planner, &[1, 1, 1]);
    assert_eq!(admitted, vec![4, 5, 6]);
}

#[test]
fn test_decider_admitted_only_over_stored_zero_round_20() {
    let with_zero: Vec<Round> = (1..=20)
        .map(|n| stored_round(n, if n == 20 { 0 } else { 5 }))
        .collect();
    let mut planner = RoundPlanner::new(&with_zero);
    assert_eq!(planner.admit(9), RoundDecision::Admit(21));

    let without_zero: Vec<Round> = (1..=20).map(|n| stored_round(n, 5)).collect();
    let mut planner = RoundPlanner::new(&without_zero);
    assert_eq!(planner.admit(9), RoundDecision::Reject);
}

#[test]
fn test_everything_after_first_reject_is_dropped() {
    let existing: Vec<Round> = (1..=19).map(|n| stored_round(n, 1)).collect();
    let mut planner = RoundPlanner::new(&existing);

    // Round 20 scores non-zero, so the batch dies at the decider gate
    // and nothing after it is considered
    let admitted = run_batch(&mut planner, &[4, 4, 4, 4]);
    assert_eq!(admitted, vec![20]);
}
