use crate::domain::model::{BirthProfile, DirectionalNumber, Gender, NumerologyResult};
use crate::domain::services::reduction::{reduce_to_single_digit, sum_digits};
use crate::utils::error::Result;

/// Parses `dob` (`YYYY-MM-DD`) and `gender`, then derives every date number.
pub fn calculate_numerology_data(dob: &str, gender: &str) -> Result<NumerologyResult> {
    let profile = BirthProfile::parse(dob, gender).map_err(|e| {
        tracing::warn!("Rejected numerology input dob={:?} gender={:?}: {}", dob, gender, e);
        e
    })?;
    Ok(numerology_for_profile(&profile))
}

pub fn numerology_for_profile(profile: &BirthProfile) -> NumerologyResult {
    let date = profile.date;

    let root_number = reduce_to_single_digit(date.day);
    let destiny_number = reduce_to_single_digit(date.day + date.month + date.year);
    let directional_number = directional_number(date.year, profile.gender);

    let mut grid_numerals: Vec<u32> = date
        .ddmmyyyy()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .filter(|&d| d != 0)
        .collect();

    if destiny_number != 0 {
        grid_numerals.push(destiny_number);
    }
    if !day_already_in_grid(date.day) && root_number != 0 {
        grid_numerals.push(root_number);
    }
    if let DirectionalNumber::Number(n) = directional_number {
        grid_numerals.push(n);
    }

    tracing::debug!(
        "Numerology for {}: root={} destiny={} directional={} grid={:?}",
        date,
        root_number,
        destiny_number,
        directional_number,
        grid_numerals
    );

    NumerologyResult {
        root_number,
        destiny_number,
        directional_number,
        grid_numerals,
    }
}

/// Male: 11 - year sum, female: 4 + year sum, both folded into 1-9.
pub fn directional_number(year: u32, gender: Gender) -> DirectionalNumber {
    let year_sum = reduce_to_single_digit(sum_digits(year));
    let raw = match gender {
        Gender::Male => 11 - year_sum,
        Gender::Female => 4 + year_sum,
        Gender::Neutral => return DirectionalNumber::NotApplicable,
    };
    match raw % 9 {
        0 => DirectionalNumber::Number(9),
        n => DirectionalNumber::Number(n),
    }
}

// Days 1-9, 10, 20 and 30 already contribute their reduced digit through DDMMYYYY.
fn day_already_in_grid(day: u32) -> bool {
    (1..=9).contains(&day) || matches!(day, 10 | 20 | 30)
}
