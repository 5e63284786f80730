//! League-wide rankings across all teams or all players.
//!
//! Nine blocks, each independently sorted. Entities without any match
//! are absent from every block; entities without a win are absent from
//! the two win-rounds-average blocks, which are one underlying list
//! sorted two ways.

use std::cmp::Ordering;
use std::collections::HashSet;

use uuid::Uuid;

use crate::models::stats::{MatchOutcomeRow, StatBlock, StatEntry, StatsKind, StatValue};

/// Per-entity accumulation over its match history.
#[derive(Debug, Default, Clone)]
pub struct EntityTally {
    pub total_matches: i64,
    pub wins: i64,
    pub losses: i64,
    pub starters: i64,
    pub starter_wins: i64,
    pub starter_losses: i64,
    win_rounds_total: i64,
    opponents: HashSet<Uuid>,
}

impl EntityTally {
    pub fn win_rate(&self) -> f64 {
        round2(self.wins as f64 / self.total_matches as f64 * 100.0)
    }

    pub fn loss_rate(&self) -> f64 {
        round2(self.losses as f64 / self.total_matches as f64 * 100.0)
    }

    /// Average round count across wins, None without a win
    pub fn win_rounds_avg(&self) -> Option<f64> {
        if self.wins > 0 {
            Some(round2(self.win_rounds_total as f64 / self.wins as f64))
        } else {
            None
        }
    }

    pub fn distinct_opponents(&self) -> i64 {
        self.opponents.len() as i64
    }
}

/// One ranked entity: id, display name, accumulated tally.
#[derive(Debug, Clone)]
pub struct EntityAggregate {
    pub id: Uuid,
    pub name: String,
    pub tally: EntityTally,
}

/// Fold an entity's matches into a tally. `own_team_of` names the side
/// the entity sat on; returns None when no match involved the entity,
/// which drops it from every block.
pub fn tally_entity<'a, I>(
    entity_id: Uuid,
    rows: I,
    own_team_of: impl Fn(&MatchOutcomeRow) -> Uuid,
) -> Option<EntityTally>
where
    I: IntoIterator<Item = &'a MatchOutcomeRow>,
{
    let mut tally = EntityTally::default();

    for row in rows {
        let own_team_id = own_team_of(row);
        let opponent_id = if own_team_id == row.team_a_id {
            row.team_b_id
        } else {
            row.team_a_id
        };
        let is_winner = row.winner_team_id == Some(own_team_id);

        tally.total_matches += 1;
        tally.opponents.insert(opponent_id);

        if is_winner {
            tally.wins += 1;
            tally.win_rounds_total += row.round_count;
        } else {
            tally.losses += 1;
        }

        // Literal comparison against the entity id: a team entity never
        // matches a starter player id and tallies zero here.
        if row.starter_player_id == Some(entity_id) {
            tally.starters += 1;
            if is_winner {
                tally.starter_wins += 1;
            } else {
                tally.starter_losses += 1;
            }
        }
    }

    if tally.total_matches > 0 {
        Some(tally)
    } else {
        None
    }
}

/// Assemble the nine ranking blocks from the per-entity aggregates.
pub fn build_blocks(kind: StatsKind, entries: &[EntityAggregate]) -> Vec<StatBlock> {
    let noun = kind.noun();

    let mut most_wins = Vec::new();
    let mut most_losses = Vec::new();
    let mut most_matches = Vec::new();
    let mut win_rounds_avg = Vec::new();
    let mut most_different_opponents = Vec::new();
    let mut most_starters = Vec::new();
    let mut starter_wins = Vec::new();
    let mut starter_losses = Vec::new();

    for entry in entries {
        let tally = &entry.tally;

        most_wins.push(stat_entry(entry, StatValue::Score(tally.win_rate())));
        most_losses.push(stat_entry(entry, StatValue::Score(tally.loss_rate())));
        most_matches.push(stat_entry(entry, StatValue::Count(tally.total_matches)));

        if let Some(avg) = tally.win_rounds_avg() {
            win_rounds_avg.push(stat_entry(entry, StatValue::Score(avg)));
        }

        most_different_opponents.push(stat_entry(
            entry,
            StatValue::Count(tally.distinct_opponents()),
        ));
        most_starters.push(stat_entry(entry, StatValue::Count(tally.starters)));
        starter_wins.push(stat_entry(entry, StatValue::Count(tally.starter_wins)));
        starter_losses.push(stat_entry(entry, StatValue::Count(tally.starter_losses)));
    }

    // One underlying list, two presentation orders
    let best_win_rounds_avg = sorted_asc(win_rounds_avg.clone());
    let worst_win_rounds_avg = sorted_desc(win_rounds_avg);

    vec![
        StatBlock {
            key: "mostWins".to_string(),
            title: format!("أكثر {} فوزًا", noun),
            unit: "%".to_string(),
            highlight_label: "نسبة الفوز".to_string(),
            list: sorted_desc(most_wins),
        },
        StatBlock {
            key: "mostLosses".to_string(),
            title: format!("أكثر {} خسارة", noun),
            unit: "%".to_string(),
            highlight_label: "نسبة الخسارة".to_string(),
            list: sorted_desc(most_losses),
        },
        StatBlock {
            key: "mostMatches".to_string(),
            title: format!("أكثر {} شارك بالمسابقات", noun),
            unit: "count".to_string(),
            highlight_label: "عدد المسابقات".to_string(),
            list: sorted_desc(most_matches),
        },
        StatBlock {
            key: "bestWinRoundsAvg".to_string(),
            title: "أفضل معدل جولات في الفوز".to_string(),
            unit: "average".to_string(),
            highlight_label: "متوسط الجولات".to_string(),
            list: best_win_rounds_avg,
        },
        StatBlock {
            key: "worstWinRoundsAvg".to_string(),
            title: "أسوأ معدل جولات في الفوز".to_string(),
            unit: "average".to_string(),
            highlight_label: "متوسط الجولات".to_string(),
            list: worst_win_rounds_avg,
        },
        StatBlock {
            key: "mostDifferentOpponents".to_string(),
            title: format!("أكثر {} فاز على خصوم مختلفين", noun),
            unit: "count".to_string(),
            highlight_label: "عدد الخصوم".to_string(),
            list: sorted_desc(most_different_opponents),
        },
        StatBlock {
            key: "mostStarters".to_string(),
            title: format!("أكثر {} بدأ اللعب", noun),
            unit: "count".to_string(),
            highlight_label: "عدد المرات".to_string(),
            list: sorted_desc(most_starters),
        },
        StatBlock {
            key: "starterWins".to_string(),
            title: "بدأ اللعب وفاز".to_string(),
            unit: "count".to_string(),
            highlight_label: "عدد المسابقات".to_string(),
            list: sorted_desc(starter_wins),
        },
        StatBlock {
            key: "starterLosses".to_string(),
            title: "بدأ اللعب وخسر".to_string(),
            unit: "count".to_string(),
            highlight_label: "عدد المسابقات".to_string(),
            list: sorted_desc(starter_losses),
        },
    ]
}

fn stat_entry(entry: &EntityAggregate, value: StatValue) -> StatEntry {
    StatEntry {
        id: entry.id,
        name: entry.name.clone(),
        value,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Value order first, id order on equal values so rankings are stable
// across storage backends.
fn sorted_desc(mut list: Vec<StatEntry>) -> Vec<StatEntry> {
    list.sort_by(|a, b| {
        b.value
            .as_f64()
            .partial_cmp(&a.value.as_f64())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    list
}

fn sorted_asc(mut list: Vec<StatEntry>) -> Vec<StatEntry> {
    list.sort_by(|a, b| {
        a.value
            .as_f64()
            .partial_cmp(&b.value.as_f64())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uuid(n: u8) -> Uuid {
        Uuid::from_bytes([n; 16])
    }

    fn row(
        team_a: Uuid,
        team_b: Uuid,
        winner: Option<Uuid>,
        starter: Option<Uuid>,
        round_count: i64,
    ) -> MatchOutcomeRow {
        MatchOutcomeRow {
            id: Uuid::new_v4(),
            team_a_id: team_a,
            team_b_id: team_b,
            starter_player_id: starter,
            winner_team_id: winner,
            team_a_name: "A".to_string(),
            team_b_name: "B".to_string(),
            round_count,
        }
    }

    fn aggregate(n: u8, tally: EntityTally) -> EntityAggregate {
        EntityAggregate {
            id: uuid(n),
            name: format!("entity-{}", n),
            tally,
        }
    }

    #[test]
    fn test_tally_counts_wins_losses_and_opponents() {
        let own = uuid(1);
        let rival = uuid(2);
        let other = uuid(3);
        let rows = vec![
            row(own, rival, Some(own), None, 4),
            row(rival, own, Some(rival), None, 6),
            row(own, other, None, None, 3),
        ];

        let tally = tally_entity(own, rows.iter(), |_| own).unwrap();
        assert_eq!(tally.total_matches, 3);
        assert_eq!(tally.wins, 1);
        assert_eq!(tally.losses, 2);
        assert_eq!(tally.distinct_opponents(), 2);
        assert_eq!(tally.win_rounds_avg(), Some(4.0));
    }

    #[test]
    fn test_tally_without_matches_is_none() {
        let own = uuid(1);
        let rows: Vec<MatchOutcomeRow> = Vec::new();
        assert!(tally_entity(own, rows.iter(), |_| own).is_none());
    }

    #[test]
    fn test_starter_metrics_compare_entity_id_literally() {
        let player = uuid(7);
        let team_a = uuid(1);
        let team_b = uuid(2);
        let rows = vec![
            row(team_a, team_b, Some(team_a), Some(player), 5),
            row(team_a, team_b, Some(team_b), Some(player), 8),
            row(team_a, team_b, Some(team_a), None, 2),
        ];

        // As a player entity, starts are tallied
        let tally = tally_entity(player, rows.iter(), |_| team_a).unwrap();
        assert_eq!(tally.starters, 2);
        assert_eq!(tally.starter_wins, 1);
        assert_eq!(tally.starter_losses, 1);

        // As a team entity, the starter is never the entity itself
        let tally = tally_entity(team_a, rows.iter(), |_| team_a).unwrap();
        assert_eq!(tally.starters, 0);
        assert_eq!(tally.starter_wins, 0);
        assert_eq!(tally.starter_losses, 0);
    }

    #[test]
    fn test_blocks_come_in_fixed_order_of_nine() {
        let tally = tally_entity(
            uuid(1),
            [row(uuid(1), uuid(2), Some(uuid(1)), None, 4)].iter(),
            |_| uuid(1),
        )
        .unwrap();
        let blocks = build_blocks(StatsKind::Teams, &[aggregate(1, tally)]);

        let keys: Vec<&str> = blocks.iter().map(|b| b.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "mostWins",
                "mostLosses",
                "mostMatches",
                "bestWinRoundsAvg",
                "worstWinRoundsAvg",
                "mostDifferentOpponents",
                "mostStarters",
                "starterWins",
                "starterLosses",
            ]
        );
    }

    #[test]
    fn test_winless_entity_missing_from_avg_blocks_only() {
        let winner = uuid(1);
        let loser = uuid(2);
        let rows = vec![row(winner, loser, Some(winner), None, 6)];

        let entries = vec![
            aggregate(1, tally_entity(winner, rows.iter(), |_| winner).unwrap()),
            aggregate(2, tally_entity(loser, rows.iter(), |_| loser).unwrap()),
        ];
        let blocks = build_blocks(StatsKind::Teams, &entries);

        for block in &blocks {
            match block.key.as_str() {
                "bestWinRoundsAvg" | "worstWinRoundsAvg" => {
                    assert_eq!(block.list.len(), 1, "block {}", block.key);
                    assert_eq!(block.list[0].id, uuid(1));
                }
                _ => assert_eq!(block.list.len(), 2, "block {}", block.key),
            }
        }
    }

    #[test]
    fn test_avg_blocks_mirror_the_same_values() {
        let mut fast = EntityTally::default();
        fast.total_matches = 2;
        fast.wins = 2;
        fast.win_rounds_total = 6; // avg 3.0

        let mut slow = EntityTally::default();
        slow.total_matches = 2;
        slow.wins = 2;
        slow.win_rounds_total = 14; // avg 7.0

        let entries = vec![aggregate(1, fast), aggregate(2, slow)];
        let blocks = build_blocks(StatsKind::Teams, &entries);

        let best = &blocks[3];
        let worst = &blocks[4];
        assert_eq!(best.list[0].id, uuid(1));
        assert_eq!(best.list[0].value, StatValue::Score(3.0));
        assert_eq!(worst.list[0].id, uuid(2));
        assert_eq!(worst.list[0].value, StatValue::Score(7.0));
    }

    #[test]
    fn test_rates_round_to_two_decimals() {
        let own = uuid(1);
        let rival = uuid(2);
        let rows = vec![
            row(own, rival, Some(own), None, 4),
            row(own, rival, Some(rival), None, 4),
            row(own, rival, Some(rival), None, 4),
        ];
        let tally = tally_entity(own, rows.iter(), |_| own).unwrap();
        assert_eq!(tally.win_rate(), 33.33);
        assert_eq!(tally.loss_rate(), 66.67);
    }

    #[test]
    fn test_equal_values_rank_by_lowest_id() {
        let mut tally = EntityTally::default();
        tally.total_matches = 1;
        tally.wins = 1;
        tally.win_rounds_total = 5;

        let entries = vec![aggregate(9, tally.clone()), aggregate(3, tally)];
        let blocks = build_blocks(StatsKind::Teams, &entries);

        for block in &blocks {
            assert_eq!(block.list[0].id, uuid(3), "block {}", block.key);
        }
    }
}
