use crate::utils::error::{NumerologyError, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Calendar components as written in a `YYYY-MM-DD` string.
///
/// Only the component ranges are checked (month 1-12, day 1-31); a date such
/// as `2001-02-30` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateParts {
    pub day: u32,
    pub month: u32,
    pub year: u32,
}

impl DateParts {
    /// Largest year a four-digit `YYYY` field can hold.
    pub const MAX_YEAR: u32 = 9999;

    pub fn new(day: u32, month: u32, year: u32) -> Result<Self> {
        if year > Self::MAX_YEAR {
            return Err(NumerologyError::invalid_input(
                "date",
                format!("year {} is above {}", year, Self::MAX_YEAR),
            ));
        }
        if !(1..=12).contains(&month) {
            return Err(NumerologyError::invalid_input(
                "date",
                format!("month {} is outside 1-12", month),
            ));
        }
        if !(1..=31).contains(&day) {
            return Err(NumerologyError::invalid_input(
                "date",
                format!("day {} is outside 1-31", day),
            ));
        }
        Ok(Self { day, month, year })
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(NumerologyError::invalid_input("date", "date is missing"));
        }

        let parts: Vec<&str> = raw.split('-').collect();
        if parts.len() != 3 {
            return Err(NumerologyError::invalid_input(
                "date",
                format!("'{}' is not in YYYY-MM-DD form", raw),
            ));
        }

        let component = |label: &str, text: &str| -> Result<u32> {
            let text = text.trim();
            if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
                return Err(NumerologyError::invalid_input(
                    "date",
                    format!("{} '{}' is not a number", label, text),
                ));
            }
            text.parse::<u32>().map_err(|e| {
                NumerologyError::invalid_input("date", format!("{} '{}': {}", label, text, e))
            })
        };

        let year = component("year", parts[0])?;
        let month = component("month", parts[1])?;
        let day = component("day", parts[2])?;
        Self::new(day, month, year)
    }

    /// Zero-padded `DDMMYYYY`, the digit source for the grid.
    pub fn ddmmyyyy(&self) -> String {
        format!("{:02}{:02}{}", self.day, self.month, self.year)
    }

    pub fn from_chrono(date: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            day: date.day(),
            month: date.month(),
            year: date.year().clamp(0, Self::MAX_YEAR as i32) as u32,
        }
    }
}

impl fmt::Display for DateParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Neutral,
}

impl Gender {
    /// Case-insensitive "male"/"female"; any other non-empty tag is `Neutral`.
    pub fn parse(raw: &str) -> Result<Self> {
        let tag = raw.trim();
        if tag.is_empty() {
            return Err(NumerologyError::invalid_input("gender", "gender is missing"));
        }
        Ok(match tag.to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Neutral,
        })
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthProfile {
    pub date: DateParts,
    pub gender: Gender,
}

impl BirthProfile {
    pub fn parse(dob: &str, gender: &str) -> Result<Self> {
        let date = DateParts::parse(dob).map_err(|e| match e {
            NumerologyError::InvalidInput { message, .. } => {
                NumerologyError::invalid_input("dob", message)
            }
            other => other,
        })?;
        let gender = Gender::parse(gender)?;
        Ok(Self { date, gender })
    }
}

/// Gender-dependent direction number, absent for neutral profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectionalNumber {
    Number(u32),
    NotApplicable,
}

impl DirectionalNumber {
    pub fn value(&self) -> Option<u32> {
        match self {
            DirectionalNumber::Number(n) => Some(*n),
            DirectionalNumber::NotApplicable => None,
        }
    }
}

impl fmt::Display for DirectionalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectionalNumber::Number(n) => write!(f, "{}", n),
            DirectionalNumber::NotApplicable => f.write_str("-"),
        }
    }
}

impl Serialize for DirectionalNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            DirectionalNumber::Number(n) => serializer.serialize_u32(*n),
            DirectionalNumber::NotApplicable => serializer.serialize_str("-"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyResult {
    pub root_number: u32,
    pub destiny_number: u32,
    pub directional_number: DirectionalNumber,
    /// Multiset of digits 1-9; order carries no meaning.
    pub grid_numerals: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameProfile {
    pub destiny_number: u32,
    pub soul_urge_number: u32,
    pub personality_number: u32,
}

/// Root/destiny pair for callers that do not carry a full result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberPair {
    pub root_number: u32,
    pub destiny_number: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonalCycle {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Friendly,
    Neutral,
    Enemy,
}

impl Relation {
    pub fn score(self) -> u32 {
        match self {
            Relation::Friendly => 3,
            Relation::Neutral => 1,
            Relation::Enemy => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComparisonMode {
    /// root/destiny cross comparisons in one direction, max 12 points
    Four,
    /// the four comparisons plus their mirrors, max 24 points
    Bidirectional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    High,
    Average,
    Low,
    #[serde(rename = "Not Compatible")]
    NotCompatible,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Verdict::High => "High",
            Verdict::Average => "Average",
            Verdict::Low => "Low",
            Verdict::NotCompatible => "Not Compatible",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub from: u32,
    pub to: u32,
    pub relation: Relation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityReport {
    pub mode: ComparisonMode,
    pub score: u32,
    pub verdict: Verdict,
    pub comparisons: Vec<Comparison>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDefinition {
    pub name: String,
    pub category: String,
    pub required_digits: [u32; 3],
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub name: String,
    pub category: String,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub full_name: String,
    pub dob: String,
    pub captain: String,
    pub captain_dob: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinPercentage {
    pub team: String,
    pub captain: String,
    pub match_date: String,
    pub captain_compatibility_score: u32,
    pub team_compatibility_score: u32,
    pub time_factor_score: u32,
    pub calculated_win_percentage: u32,
}

/// One line of a roster CSV (`name,dob,gender`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub dob: String,
    #[serde(default)]
    pub gender: String,
}

/// Exported roster line; computed columns hold `Error` when the entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Date of Birth")]
    pub dob: String,
    #[serde(rename = "Gender")]
    pub gender: String,
    #[serde(rename = "Destiny")]
    pub destiny: String,
    #[serde(rename = "Root")]
    pub root: String,
    #[serde(rename = "Directional")]
    pub directional: String,
    #[serde(rename = "Grid 4")]
    pub grid_4: String,
    #[serde(rename = "Grid 9")]
    pub grid_9: String,
    #[serde(rename = "Grid 2")]
    pub grid_2: String,
    #[serde(rename = "Grid 3")]
    pub grid_3: String,
    #[serde(rename = "Grid 5")]
    pub grid_5: String,
    #[serde(rename = "Grid 7")]
    pub grid_7: String,
    #[serde(rename = "Grid 8")]
    pub grid_8: String,
    #[serde(rename = "Grid 1")]
    pub grid_1: String,
    #[serde(rename = "Grid 6")]
    pub grid_6: String,
}

impl ExportRow {
    pub const ERROR: &'static str = "Error";

    pub fn is_error(&self) -> bool {
        self.destiny == Self::ERROR
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportResult {
    pub rows: Vec<ExportRow>,
    pub failed: usize,
    pub csv_output: String,
    pub tsv_output: String,
    pub json_output: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_parts() {
        let date = DateParts::parse("1990-10-28").unwrap();
        assert_eq!(date, DateParts { day: 28, month: 10, year: 1990 });
        assert_eq!(date.ddmmyyyy(), "28101990");
        assert_eq!(date.to_string(), "1990-10-28");
    }

    #[test]
    fn test_parse_date_rejects_malformed_input() {
        for raw in ["", "19901028", "1990/10/28", "28-10-1990", "1990-13-01", "1990-10-32", "1990-1o-01", "1990-10-00"] {
            let err = DateParts::parse(raw).unwrap_err();
            assert!(err.is_invalid_input(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_year_beyond_four_digits_is_rejected() {
        assert!(DateParts::parse("9999-12-31").is_ok());
        for raw in ["10000-01-01", "4294967295-12-31"] {
            let err = DateParts::parse(raw).unwrap_err();
            assert!(err.is_invalid_input(), "{} should be rejected", raw);
        }
        assert!(DateParts::new(1, 1, u32::MAX).is_err());
    }

    #[test]
    fn test_gender_parse() {
        assert_eq!(Gender::parse("MALE").unwrap(), Gender::Male);
        assert_eq!(Gender::parse(" female ").unwrap(), Gender::Female);
        assert_eq!(Gender::parse("Other").unwrap(), Gender::Neutral);
        assert!(Gender::parse("  ").is_err());
    }

    #[test]
    fn test_directional_number_serializes_sentinel() {
        assert_eq!(serde_json::to_string(&DirectionalNumber::Number(4)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&DirectionalNumber::NotApplicable).unwrap(), "\"-\"");
        assert_eq!(serde_json::to_string(&Verdict::NotCompatible).unwrap(), "\"Not Compatible\"");
    }
}
