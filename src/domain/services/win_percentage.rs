//! Team matchup heuristic built from compatibility and time-factor scores.

use crate::domain::model::{BirthProfile, DateParts, Gender, TeamEntry, WinPercentage};
use crate::domain::services::compatibility::compatibility_score;
use crate::domain::services::date_numbers::numerology_for_profile;
use crate::domain::services::relations::RelationTable;
use crate::domain::services::time_factor::{combined_time_factor, time_factor_score};
use crate::utils::error::{NumerologyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinWeights {
    pub captain: f64,
    pub team: f64,
    pub time: f64,
}

impl Default for WinWeights {
    fn default() -> Self {
        Self {
            captain: 0.4,
            team: 0.4,
            time: 0.2,
        }
    }
}

/// Teams keyed by short code, dates checked when loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamRegistry {
    teams: BTreeMap<String, TeamEntry>,
}

impl TeamRegistry {
    pub fn new(teams: BTreeMap<String, TeamEntry>) -> Result<Self> {
        for (key, team) in &teams {
            for (field, value) in [("dob", &team.dob), ("captainDob", &team.captain_dob)] {
                DateParts::parse(value).map_err(|e| {
                    NumerologyError::catalog("team", format!("{}.{}: {}", key, field, e))
                })?;
            }
        }
        Ok(Self { teams })
    }

    /// Parses `{"KEY": {"fullName", "dob", "captain", "captainDob"}, ...}`.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let teams: BTreeMap<String, TeamEntry> = serde_json::from_str(content)
            .map_err(|e| NumerologyError::catalog("team", e.to_string()))?;
        Self::new(teams)
    }

    pub fn get(&self, key: &str) -> Option<&TeamEntry> {
        self.teams.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

fn neutral_profile(dob: &str) -> Result<BirthProfile> {
    Ok(BirthProfile {
        date: DateParts::parse(dob)?,
        gender: Gender::Neutral,
    })
}

pub fn win_percentage(
    registry: &TeamRegistry,
    team_key: &str,
    match_date: &str,
    table: &RelationTable,
    weights: &WinWeights,
) -> Result<WinPercentage> {
    let team = registry.get(team_key).ok_or_else(|| NumerologyError::NotFound {
        kind: "Team".to_string(),
        key: team_key.to_string(),
    })?;

    let match_profile = neutral_profile(match_date).map_err(|e| match e {
        NumerologyError::InvalidInput { message, .. } => {
            NumerologyError::invalid_input("match_date", message)
        }
        other => other,
    })?;
    let team_profile = neutral_profile(&team.dob)?;
    let captain_profile = neutral_profile(&team.captain_dob)?;

    let match_numbers = numerology_for_profile(&match_profile);
    let team_numbers = numerology_for_profile(&team_profile);
    let captain_numbers = numerology_for_profile(&captain_profile);

    let captain_score = compatibility_score(&captain_numbers, &match_numbers, table);
    let team_score = compatibility_score(&team_numbers, &match_numbers, table);

    let time_score = combined_time_factor(&[
        time_factor_score(&captain_profile.date, &match_profile.date, &match_numbers, table),
        time_factor_score(&team_profile.date, &match_profile.date, &match_numbers, table),
    ]);

    let weighted = (weights.captain * captain_score as f64)
        + (weights.team * team_score as f64)
        + (weights.time * time_score as f64);

    let result = WinPercentage {
        team: team.full_name.clone(),
        captain: team.captain.clone(),
        match_date: match_date.trim().to_string(),
        captain_compatibility_score: captain_score,
        team_compatibility_score: team_score,
        time_factor_score: time_score,
        calculated_win_percentage: weighted.round().max(0.0) as u32,
    };
    tracing::info!(
        "Win percentage for {} on {}: {}%",
        team_key,
        result.match_date,
        result.calculated_win_percentage
    );
    Ok(result)
}

/// Both sides of a fixture, computed independently.
pub fn matchup(
    registry: &TeamRegistry,
    home_key: &str,
    away_key: &str,
    match_date: &str,
    table: &RelationTable,
    weights: &WinWeights,
) -> Result<(WinPercentage, WinPercentage)> {
    if home_key == away_key {
        return Err(NumerologyError::invalid_input(
            "team",
            "a matchup needs two different teams",
        ));
    }
    Ok((
        win_percentage(registry, home_key, match_date, table, weights)?,
        win_percentage(registry, away_key, match_date, table, weights)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TeamRegistry {
        TeamRegistry::from_json_str(
            r#"{
                "AAA": {"fullName": "Alpha Anchors", "dob": "2008-01-24", "captain": "A. Captain", "captainDob": "1981-07-07"},
                "BBB": {"fullName": "Bravo Blazers", "dob": "2008-02-20", "captain": "B. Captain", "captainDob": "1987-04-30"}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_neutral_table_gives_one_third_everywhere() {
        let result = win_percentage(
            &registry(),
            "AAA",
            "2025-04-12",
            &RelationTable::new(),
            &WinWeights::default(),
        )
        .unwrap();
        assert_eq!(result.team, "Alpha Anchors");
        assert_eq!(result.captain_compatibility_score, 33);
        assert_eq!(result.team_compatibility_score, 33);
        assert_eq!(result.time_factor_score, 33);
        assert_eq!(result.calculated_win_percentage, 33);
    }

    #[test]
    fn test_all_friendly_table_gives_full_score() {
        let mut table = RelationTable::new();
        for d in 1..=9 {
            table = table.with_rule(d, &[1, 2, 3, 4, 5, 6, 7, 8, 9], &[]).unwrap();
        }
        let result = win_percentage(&registry(), "BBB", "2025-04-12", &table, &WinWeights::default())
            .unwrap();
        assert_eq!(result.calculated_win_percentage, 100);
    }

    #[test]
    fn test_unknown_team_and_bad_date() {
        let err = win_percentage(&registry(), "ZZZ", "2025-04-12", &RelationTable::new(), &WinWeights::default())
            .unwrap_err();
        assert!(matches!(err, NumerologyError::NotFound { .. }));

        let err = win_percentage(&registry(), "AAA", "2025-4", &RelationTable::new(), &WinWeights::default())
            .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_oversized_match_year_is_invalid_input() {
        let err = win_percentage(
            &registry(),
            "AAA",
            "4294967290-12-31",
            &RelationTable::new(),
            &WinWeights::default(),
        )
        .unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_matchup_requires_two_teams() {
        let table = RelationTable::new();
        let weights = WinWeights::default();
        assert!(matchup(&registry(), "AAA", "AAA", "2025-04-12", &table, &weights).is_err());
        let (home, away) = matchup(&registry(), "AAA", "BBB", "2025-04-12", &table, &weights).unwrap();
        assert_eq!(home.team, "Alpha Anchors");
        assert_eq!(away.team, "Bravo Blazers");
    }

    #[test]
    fn test_registry_rejects_bad_dates() {
        let err = TeamRegistry::from_json_str(
            r#"{"AAA": {"fullName": "A", "dob": "2008-13-01", "captain": "C", "captainDob": "1981-07-07"}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, NumerologyError::CatalogError { .. }));
    }
}
