use crate::adapters::catalog::Catalogs;
use crate::domain::model::{BirthProfile, NameProfile, NumerologyResult, PatternMatch};
use crate::domain::ports::TextCache;
use crate::domain::services::grid::{analyze_grid, NumeralGrid};
use crate::domain::services::{calculate_name_numbers, numerology_for_profile};
use crate::utils::error::{NumerologyError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairReading {
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub indication: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remedy {
    #[serde(default)]
    pub impact: Vec<String>,
    #[serde(default)]
    pub remedies: Vec<String>,
}

/// Canned texts keyed by digit, digit pair or repeated sequence ("111").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InterpretationCatalog {
    number_meanings: BTreeMap<u32, String>,
    root_destiny: BTreeMap<(u32, u32), PairReading>,
    missing_remedies: BTreeMap<u32, Remedy>,
    repeating_impact: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInterpretations {
    #[serde(default)]
    number_meanings: HashMap<String, String>,
    #[serde(default)]
    root_destiny_relations: HashMap<String, HashMap<String, PairReading>>,
    #[serde(default)]
    missing_number_remedies: HashMap<String, Remedy>,
    #[serde(default)]
    repeating_number_impact: HashMap<String, String>,
}

fn digit_key(key: &str, section: &str) -> Result<u32> {
    match key.trim().parse::<u32>() {
        Ok(d) if (1..=9).contains(&d) => Ok(d),
        _ => Err(NumerologyError::catalog(
            "interpretation",
            format!("{} key '{}' is not a digit 1-9", section, key),
        )),
    }
}

impl InterpretationCatalog {
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawInterpretations = serde_json::from_str(content)
            .map_err(|e| NumerologyError::catalog("interpretation", e.to_string()))?;

        let mut catalog = Self::default();
        for (key, text) in raw.number_meanings {
            catalog.number_meanings.insert(digit_key(&key, "numberMeanings")?, text);
        }
        for (root, readings) in raw.root_destiny_relations {
            let root = digit_key(&root, "rootDestinyRelations")?;
            for (destiny, reading) in readings {
                let destiny = digit_key(&destiny, "rootDestinyRelations")?;
                catalog.root_destiny.insert((root, destiny), reading);
            }
        }
        for (key, remedy) in raw.missing_number_remedies {
            catalog.missing_remedies.insert(digit_key(&key, "missingNumberRemedies")?, remedy);
        }
        for (sequence, text) in raw.repeating_number_impact {
            let mut chars = sequence.chars();
            let uniform = match chars.next() {
                Some(first) => first.is_ascii_digit() && chars.all(|c| c == first),
                None => false,
            };
            if !uniform {
                return Err(NumerologyError::catalog(
                    "interpretation",
                    format!("repeatingNumberImpact key '{}' is not a repeated digit", sequence),
                ));
            }
            catalog.repeating_impact.insert(sequence, text);
        }
        Ok(catalog)
    }

    pub fn meaning(&self, digit: u32) -> Option<&str> {
        self.number_meanings.get(&digit).map(String::as_str)
    }

    pub fn root_destiny(&self, root: u32, destiny: u32) -> Option<&PairReading> {
        self.root_destiny.get(&(root, destiny))
    }

    pub fn remedy(&self, digit: u32) -> Option<&Remedy> {
        self.missing_remedies.get(&digit)
    }

    pub fn repeating(&self, sequence: &str) -> Option<&str> {
        self.repeating_impact.get(sequence).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepeatingImpact {
    pub sequence: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingNumber {
    pub digit: u32,
    pub remedy: Option<Remedy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSection {
    pub name: String,
    pub numbers: NameProfile,
    pub destiny_meaning: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyReport {
    pub dob: String,
    pub gender: String,
    pub numbers: NumerologyResult,
    pub grid: NumeralGrid,
    pub root_meaning: Option<String>,
    pub destiny_meaning: Option<String>,
    pub relationship: Option<PairReading>,
    pub repeating: Vec<RepeatingImpact>,
    pub missing: Vec<MissingNumber>,
    pub patterns: Vec<PatternMatch>,
    pub name: Option<NameSection>,
}

impl NumerologyReport {
    pub fn build(
        profile: &BirthProfile,
        numbers: NumerologyResult,
        name: Option<(&str, NameProfile)>,
        catalogs: &Catalogs,
    ) -> Self {
        let texts = &catalogs.interpretations;
        let grid = NumeralGrid::from_numerals(&numbers.grid_numerals);

        // only sequences with a known impact are reported
        let repeating = grid
            .repeated_digits()
            .into_iter()
            .filter_map(|(digit, count)| {
                let sequence = digit.to_string().repeat(count as usize);
                texts.repeating(&sequence).map(|impact| RepeatingImpact {
                    impact: impact.to_string(),
                    sequence,
                })
            })
            .collect();

        let missing = grid
            .missing_digits()
            .into_iter()
            .map(|digit| MissingNumber {
                digit,
                remedy: texts.remedy(digit).cloned(),
            })
            .collect();

        let name = name.map(|(raw, numbers)| NameSection {
            name: raw.trim().to_string(),
            destiny_meaning: texts.meaning(numbers.destiny_number).map(str::to_string),
            numbers,
        });

        Self {
            dob: profile.date.to_string(),
            gender: profile.gender.to_string(),
            root_meaning: texts.meaning(numbers.root_number).map(str::to_string),
            destiny_meaning: texts.meaning(numbers.destiny_number).map(str::to_string),
            relationship: texts
                .root_destiny(numbers.root_number, numbers.destiny_number)
                .cloned(),
            patterns: analyze_grid(&numbers.grid_numerals, &catalogs.patterns),
            repeating,
            missing,
            name,
            grid,
            numbers,
        }
    }

    pub fn render_text(&self) -> String {
        let na = "N/A";
        let numbers = &self.numbers;
        let mut out = String::new();

        let _ = writeln!(out, "Numerology Report");
        let _ = writeln!(out, "For Date of Birth: {} ({})", self.dob, self.gender);
        let _ = writeln!(out);

        let _ = writeln!(out, "Core Numbers:");
        let _ = writeln!(
            out,
            "  Root Number: {} ({})",
            numbers.root_number,
            self.root_meaning.as_deref().unwrap_or(na)
        );
        let _ = writeln!(
            out,
            "  Destiny Number: {} ({})",
            numbers.destiny_number,
            self.destiny_meaning.as_deref().unwrap_or(na)
        );
        let _ = writeln!(out, "  Directional Number: {}", numbers.directional_number);
        let _ = writeln!(out);
        let _ = write!(out, "{}", self.grid);
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "Root-Destiny ({}-{}) Relationship:",
            numbers.root_number, numbers.destiny_number
        );
        match &self.relationship {
            Some(reading) => {
                let _ = writeln!(out, "  Rating: {}", reading.rating.as_deref().unwrap_or(na));
                let _ = writeln!(
                    out,
                    "  Indication: {}",
                    reading.indication.as_deref().unwrap_or(na)
                );
            }
            None => {
                let _ = writeln!(out, "  No specific data for this combination.");
            }
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Impact of Repeating Numbers in Chart:");
        if self.repeating.is_empty() {
            let _ = writeln!(
                out,
                "  No significant repeating number patterns found with specific impacts in the data."
            );
        }
        for item in &self.repeating {
            let _ = writeln!(out, "  - {}: {}", item.sequence, item.impact);
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Missing Numbers Analysis:");
        if self.missing.is_empty() {
            let _ = writeln!(out, "  No missing numbers (1-9) found in the chart.");
        }
        for item in &self.missing {
            let _ = writeln!(out, "  Missing Number: {}", item.digit);
            match &item.remedy {
                Some(remedy) => {
                    let _ = writeln!(out, "    Impact: {}", remedy.impact.join(" "));
                    let _ = writeln!(out, "    Remedies: {}", remedy.remedies.join("; "));
                }
                None => {
                    let _ = writeln!(out, "    No specific impact/remedy data found.");
                }
            }
        }

        if !self.patterns.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "Completed Planes and Arrows:");
            for pattern in &self.patterns {
                let _ = writeln!(
                    out,
                    "  - {} ({}): {}",
                    pattern.name, pattern.category, pattern.interpretation
                );
            }
        }

        if let Some(name) = &self.name {
            let _ = writeln!(out);
            let _ = writeln!(out, "Name Numbers for {}:", name.name);
            let _ = writeln!(
                out,
                "  Destiny: {} ({})",
                name.numbers.destiny_number,
                name.destiny_meaning.as_deref().unwrap_or(na)
            );
            let _ = writeln!(out, "  Soul Urge: {}", name.numbers.soul_urge_number);
            let _ = writeln!(out, "  Personality: {}", name.numbers.personality_number);
        }

        out
    }
}

/// Builds reports and memoizes the rendered text in an injected cache.
pub struct ReportService<C: TextCache> {
    catalogs: Arc<Catalogs>,
    cache: C,
    ttl: Duration,
}

impl<C: TextCache> ReportService<C> {
    pub fn new(catalogs: Arc<Catalogs>, cache: C, ttl: Duration) -> Self {
        Self {
            catalogs,
            cache,
            ttl,
        }
    }

    pub fn build(&self, dob: &str, gender: &str, name: Option<&str>) -> Result<NumerologyReport> {
        let profile = BirthProfile::parse(dob, gender)?;
        let numbers = numerology_for_profile(&profile);
        let name_numbers = match name.filter(|n| !n.trim().is_empty()) {
            Some(raw) => Some((raw, calculate_name_numbers(raw)?)),
            None => None,
        };
        Ok(NumerologyReport::build(
            &profile,
            numbers,
            name_numbers,
            &self.catalogs,
        ))
    }

    pub fn render_text(&self, dob: &str, gender: &str, name: Option<&str>) -> Result<String> {
        let key = cache_key(dob, gender, name);
        if let Some(text) = self.cache.get(&key) {
            tracing::debug!("Report cache hit for {}", key);
            return Ok(text);
        }

        let text = self.build(dob, gender, name)?.render_text();
        self.cache.set(&key, text.clone(), self.ttl);
        Ok(text)
    }
}

fn cache_key(dob: &str, gender: &str, name: Option<&str>) -> String {
    format!(
        "{}|{}|{}",
        dob.trim(),
        gender.trim().to_ascii_lowercase(),
        name.map(crate::domain::services::name_numbers::normalize_name)
            .unwrap_or_default()
    )
}
