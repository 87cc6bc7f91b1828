//! Friend/enemy classification between digits.
//!
//! The table is loaded once from external data and never mutated. Loading
//! rejects anything outside 1-9 and any digit listed as both friend and enemy,
//! so lookups never have to guess.

use crate::domain::model::Relation;
use crate::utils::error::{NumerologyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

const CATALOG: &str = "relation";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationRule {
    pub friendly: BTreeSet<u32>,
    pub enemy: BTreeSet<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RelationTable {
    rules: BTreeMap<u32, RelationRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    friendly: Vec<u32>,
    #[serde(default)]
    enemy: Vec<u32>,
}

impl RelationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{"1": {"friendly": [..], "enemy": [..]}, ...}`.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: HashMap<String, RawRule> = serde_json::from_str(content)
            .map_err(|e| NumerologyError::catalog(CATALOG, e.to_string()))?;

        let mut table = Self::new();
        for (key, rule) in raw {
            let digit: u32 = key.trim().parse().map_err(|_| {
                NumerologyError::catalog(CATALOG, format!("key '{}' is not a digit", key))
            })?;
            table = table.with_rule(digit, &rule.friendly, &rule.enemy)?;
        }
        tracing::debug!("Loaded relation rules for {} digits", table.rules.len());
        Ok(table)
    }

    /// Adds the rule for `digit`, validating every member.
    pub fn with_rule(mut self, digit: u32, friendly: &[u32], enemy: &[u32]) -> Result<Self> {
        check_digit(digit, "key")?;
        for &d in friendly {
            check_digit(d, &format!("{}.friendly", digit))?;
        }
        for &d in enemy {
            check_digit(d, &format!("{}.enemy", digit))?;
        }

        let rule = RelationRule {
            friendly: friendly.iter().copied().collect(),
            enemy: enemy.iter().copied().collect(),
        };
        if let Some(both) = rule.friendly.intersection(&rule.enemy).next() {
            return Err(NumerologyError::catalog(
                CATALOG,
                format!("{} is both friend and enemy of {}", both, digit),
            ));
        }
        if self.rules.insert(digit, rule).is_some() {
            return Err(NumerologyError::catalog(
                CATALOG,
                format!("duplicate rule for {}", digit),
            ));
        }
        Ok(self)
    }

    /// How `a` regards `b`. Digits without a rule regard everyone as neutral.
    pub fn relation(&self, a: u32, b: u32) -> Relation {
        match self.rules.get(&a) {
            Some(rule) if rule.friendly.contains(&b) => Relation::Friendly,
            Some(rule) if rule.enemy.contains(&b) => Relation::Enemy,
            _ => Relation::Neutral,
        }
    }

    pub fn rule(&self, digit: u32) -> Option<&RelationRule> {
        self.rules.get(&digit)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// 3 friendly, 1 neutral, 0 enemy.
pub fn relation_score(table: &RelationTable, a: u32, b: u32) -> u32 {
    table.relation(a, b).score()
}

fn check_digit(value: u32, field: &str) -> Result<()> {
    if (1..=9).contains(&value) {
        Ok(())
    } else {
        Err(NumerologyError::catalog(
            CATALOG,
            format!("{} contains {}, expected a digit 1-9", field, value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relation_lookup() {
        let table = RelationTable::new()
            .with_rule(1, &[2, 3], &[8])
            .unwrap();
        assert_eq!(table.relation(1, 2), Relation::Friendly);
        assert_eq!(table.relation(1, 8), Relation::Enemy);
        assert_eq!(table.relation(1, 5), Relation::Neutral);
        // no rule for 8: neutral in that direction
        assert_eq!(table.relation(8, 1), Relation::Neutral);
        assert_eq!(relation_score(&table, 1, 3), 3);
        assert_eq!(relation_score(&table, 1, 8), 0);
        assert_eq!(relation_score(&table, 4, 4), 1);
    }

    #[test]
    fn test_from_json() {
        let table = RelationTable::from_json_str(
            r#"{"1": {"friendly": [1, 2], "enemy": [8]}, "2": {"friendly": [1]}}"#,
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.relation(2, 1), Relation::Friendly);
        assert!(table.rule(2).unwrap().enemy.is_empty());
    }

    #[test]
    fn test_malformed_tables_fail_fast() {
        for content in [
            r#"{"0": {"friendly": [1]}}"#,
            r#"{"x": {"friendly": [1]}}"#,
            r#"{"1": {"friendly": [10]}}"#,
            r#"{"1": {"friendly": [2], "enemy": [2]}}"#,
            r#"{"1": {"friendly": "2"}}"#,
        ] {
            let err = RelationTable::from_json_str(content).unwrap_err();
            assert!(
                matches!(err, NumerologyError::CatalogError { .. }),
                "{} gave {:?}",
                content,
                err
            );
        }
    }
}
