use crate::domain::model::{DateParts, PersonalCycle};
use crate::domain::ports::CoreNumbers;
use crate::domain::services::compatibility::normalize;
use crate::domain::services::relations::RelationTable;

/// How favorable `target_date` is for someone born on `entity_birth`.
///
/// Personal year, month and day are each scored against the target date's
/// root and destiny numbers: six lookups, normalized over 18 points.
pub fn time_factor_score(
    entity_birth: &DateParts,
    target_date: &DateParts,
    target_numbers: &impl CoreNumbers,
    table: &RelationTable,
) -> u32 {
    let cycle = PersonalCycle::for_date(entity_birth, target_date);
    let targets = [target_numbers.root_number(), target_numbers.destiny_number()];

    let points: u32 = [cycle.year, cycle.month, cycle.day]
        .iter()
        .flat_map(|&personal| targets.iter().map(move |&t| table.relation(personal, t).score()))
        .sum();

    let score = normalize(points, 18);
    tracing::debug!(
        "Time factor for birth {} on {}: cycle={:?} points={} score={}",
        entity_birth,
        target_date,
        cycle,
        points,
        score
    );
    score
}

/// Rounded mean of several entities' time factor scores; 0 for none.
pub fn combined_time_factor(scores: &[u32]) -> u32 {
    if scores.is_empty() {
        return 0;
    }
    let total: u32 = scores.iter().sum();
    let count = scores.len() as u32;
    (2 * total + count) / (2 * count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::NumberPair;

    #[test]
    fn test_all_neutral_scores_one_third() {
        let birth = DateParts::new(28, 10, 1990).unwrap();
        let target = DateParts::new(29, 12, 2025).unwrap();
        let numbers = NumberPair {
            root_number: 2,
            destiny_number: 4,
        };
        assert_eq!(time_factor_score(&birth, &target, &numbers, &RelationTable::new()), 33);
    }

    #[test]
    fn test_scores_cycle_against_target_numbers() {
        // cycle for this pair is year 2, month 5, day 7
        let birth = DateParts::new(28, 10, 1990).unwrap();
        let target = DateParts::new(29, 12, 2025).unwrap();
        let numbers = NumberPair {
            root_number: 2,
            destiny_number: 4,
        };
        let table = RelationTable::new()
            .with_rule(2, &[2, 4], &[])
            .unwrap()
            .with_rule(5, &[], &[2, 4])
            .unwrap()
            .with_rule(7, &[2], &[])
            .unwrap();
        // 3 + 3 + 0 + 0 + 3 + 1 = 10 of 18
        assert_eq!(time_factor_score(&birth, &target, &numbers, &table), 56);
    }

    #[test]
    fn test_combined_time_factor_rounds_half_up() {
        assert_eq!(combined_time_factor(&[33, 56]), 45);
        assert_eq!(combined_time_factor(&[50, 51]), 51);
        assert_eq!(combined_time_factor(&[40]), 40);
        assert_eq!(combined_time_factor(&[]), 0);
    }
}
