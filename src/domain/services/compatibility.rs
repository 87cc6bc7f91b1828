use crate::domain::model::{Comparison, CompatibilityReport, ComparisonMode, Relation, Verdict};
use crate::domain::ports::CoreNumbers;
use crate::domain::services::relations::RelationTable;
use serde::{Deserialize, Serialize};

/// Score cut-offs for the qualitative verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictThresholds {
    pub high: u32,
    pub low: u32,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self { high: 75, low: 35 }
    }
}

impl VerdictThresholds {
    pub fn classify(&self, score: u32) -> Verdict {
        if score >= self.high {
            Verdict::High
        } else if score <= self.low {
            Verdict::Low
        } else {
            Verdict::Average
        }
    }
}

/// `round(points / max * 100)`, rounding halves up like `Math.round`.
pub(crate) fn normalize(points: u32, max_points: u32) -> u32 {
    if max_points == 0 {
        return 0;
    }
    ((points as f64 / max_points as f64) * 100.0).round() as u32
}

// root1-root2, destiny1-destiny2, root1-destiny2, destiny1-root2
fn forward_pairs(a: &impl CoreNumbers, b: &impl CoreNumbers) -> [(u32, u32); 4] {
    let (r1, d1) = (a.root_number(), a.destiny_number());
    let (r2, d2) = (b.root_number(), b.destiny_number());
    [(r1, r2), (d1, d2), (r1, d2), (d1, r2)]
}

fn comparisons(
    a: &impl CoreNumbers,
    b: &impl CoreNumbers,
    table: &RelationTable,
    mode: ComparisonMode,
) -> Vec<Comparison> {
    let forward = forward_pairs(a, b);
    let mirrored = forward.map(|(x, y)| (y, x));

    let pairs: Vec<(u32, u32)> = match mode {
        ComparisonMode::Four => forward.to_vec(),
        ComparisonMode::Bidirectional => forward.iter().chain(mirrored.iter()).copied().collect(),
    };

    pairs
        .into_iter()
        .map(|(from, to)| Comparison {
            from,
            to,
            relation: table.relation(from, to),
        })
        .collect()
}

/// Four one-directional comparisons, normalized over 12 points.
pub fn compatibility_score(a: &impl CoreNumbers, b: &impl CoreNumbers, table: &RelationTable) -> u32 {
    let points: u32 = forward_pairs(a, b)
        .iter()
        .map(|&(x, y)| table.relation(x, y).score())
        .sum();
    normalize(points, 12)
}

/// The four comparisons and their mirrors, normalized over 24 points.
pub fn bidirectional_score(a: &impl CoreNumbers, b: &impl CoreNumbers, table: &RelationTable) -> u32 {
    let points: u32 = comparisons(a, b, table, ComparisonMode::Bidirectional)
        .iter()
        .map(|c| c.relation.score())
        .sum();
    normalize(points, 24)
}

/// Score plus verdict. A single enemy lookup forces `NotCompatible`.
pub fn assess_compatibility(
    a: &impl CoreNumbers,
    b: &impl CoreNumbers,
    table: &RelationTable,
    mode: ComparisonMode,
    thresholds: &VerdictThresholds,
) -> CompatibilityReport {
    let comparisons = comparisons(a, b, table, mode);
    let points: u32 = comparisons.iter().map(|c| c.relation.score()).sum();
    let score = normalize(points, 3 * comparisons.len() as u32);

    let verdict = if comparisons.iter().any(|c| c.relation == Relation::Enemy) {
        Verdict::NotCompatible
    } else {
        thresholds.classify(score)
    };

    tracing::debug!("Compatibility ({:?}): {} points -> {}% {}", mode, points, score, verdict);

    CompatibilityReport {
        mode,
        score,
        verdict,
        comparisons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NumberPair;

    fn pair(root_number: u32, destiny_number: u32) -> NumberPair {
        NumberPair {
            root_number,
            destiny_number,
        }
    }

    // 1 is the enemy of 2; every other lookup between {1,3} and {2,4} is friendly
    fn one_enemy_table() -> RelationTable {
        RelationTable::new()
            .with_rule(1, &[4], &[2])
            .unwrap()
            .with_rule(2, &[1, 3], &[])
            .unwrap()
            .with_rule(3, &[2, 4], &[])
            .unwrap()
            .with_rule(4, &[1, 3], &[])
            .unwrap()
    }

    #[test]
    fn test_single_enemy_forces_not_compatible() {
        let table = one_enemy_table();
        let report = assess_compatibility(
            &pair(1, 3),
            &pair(2, 4),
            &table,
            ComparisonMode::Bidirectional,
            &VerdictThresholds::default(),
        );
        assert_eq!(report.comparisons.len(), 8);
        assert_eq!(report.score, 88);
        assert_eq!(report.verdict, Verdict::NotCompatible);
        assert_eq!(bidirectional_score(&pair(1, 3), &pair(2, 4), &table), 88);
    }

    #[test]
    fn test_bidirectional_differs_from_four_mode() {
        // 5 regards 6 as an enemy, 6 has no opinion of 5
        let table = RelationTable::new().with_rule(5, &[], &[6]).unwrap();
        let (a, b) = (pair(6, 6), pair(5, 5));
        // forward lookups are all 6 -> 5: neutral, 4 points of 12
        assert_eq!(compatibility_score(&a, &b, &table), 33);
        // mirrors add 4 enemy lookups: 4 points of 24
        assert_eq!(bidirectional_score(&a, &b, &table), 17);

        let four = assess_compatibility(&a, &b, &table, ComparisonMode::Four, &VerdictThresholds::default());
        assert_eq!(four.verdict, Verdict::Low);
        let both = assess_compatibility(&a, &b, &table, ComparisonMode::Bidirectional, &VerdictThresholds::default());
        assert_eq!(both.verdict, Verdict::NotCompatible);
    }

    #[test]
    fn test_verdict_thresholds() {
        let friendly = RelationTable::new().with_rule(1, &[1], &[]).unwrap();
        let report = assess_compatibility(
            &pair(1, 1),
            &pair(1, 1),
            &friendly,
            ComparisonMode::Bidirectional,
            &VerdictThresholds::default(),
        );
        assert_eq!(report.score, 100);
        assert_eq!(report.verdict, Verdict::High);

        let neutral = RelationTable::new();
        let report = assess_compatibility(
            &pair(2, 3),
            &pair(4, 5),
            &neutral,
            ComparisonMode::Four,
            &VerdictThresholds::default(),
        );
        assert_eq!(report.score, 33);
        assert_eq!(report.verdict, Verdict::Low);

        let thresholds = VerdictThresholds { high: 90, low: 20 };
        assert_eq!(thresholds.classify(33), Verdict::Average);
        assert_eq!(thresholds.classify(90), Verdict::High);
        assert_eq!(thresholds.classify(20), Verdict::Low);
    }

    #[test]
    fn test_scores_bounded() {
        let table = RelationTable::new()
            .with_rule(1, &[2, 3, 4], &[5, 6])
            .unwrap()
            .with_rule(7, &[7], &[1])
            .unwrap();
        for r1 in 1..=9 {
            for d1 in 1..=9 {
                for r2 in [1, 5, 7] {
                    let (a, b) = (pair(r1, d1), pair(r2, 9));
                    assert!(compatibility_score(&a, &b, &table) <= 100);
                    assert!(bidirectional_score(&a, &b, &table) <= 100);
                }
            }
        }
    }
}
