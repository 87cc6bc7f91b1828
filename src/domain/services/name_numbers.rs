use crate::domain::model::NameProfile;
use crate::domain::services::reduction::{reduce_to_single_digit, reduce_to_single_digit_or_master};
use crate::utils::error::{NumerologyError, Result};

/// Pythagorean values for A..Z.
const PYTHAGOREAN: [u32; 26] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, // A-I
    1, 2, 3, 4, 5, 6, 7, 8, 9, // J-R
    1, 2, 3, 4, 5, 6, 7, 8, // S-Z
];

const VOWELS: [char; 5] = ['A', 'E', 'I', 'O', 'U'];

pub fn letter_value(letter: char) -> Option<u32> {
    if letter.is_ascii_uppercase() {
        Some(PYTHAGOREAN[(letter as u8 - b'A') as usize])
    } else {
        None
    }
}

/// Uppercases and keeps only A-Z.
pub fn normalize_name(full_name: &str) -> String {
    full_name
        .to_ascii_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

pub fn calculate_name_numbers(full_name: &str) -> Result<NameProfile> {
    let normalized = normalize_name(full_name);
    if normalized.is_empty() {
        tracing::warn!("No usable letters in name {:?}", full_name);
        return Err(NumerologyError::invalid_input(
            "name",
            "name contains no letters A-Z",
        ));
    }

    let mut destiny_sum = 0;
    let mut soul_urge_sum = 0;
    let mut personality_sum = 0;

    for letter in normalized.chars() {
        let Some(value) = letter_value(letter) else {
            continue;
        };
        destiny_sum += value;
        if VOWELS.contains(&letter) {
            soul_urge_sum += value;
        } else {
            personality_sum += value;
        }
    }

    // personality never keeps master numbers
    let profile = NameProfile {
        destiny_number: reduce_to_single_digit_or_master(destiny_sum),
        soul_urge_number: reduce_to_single_digit_or_master(soul_urge_sum),
        personality_number: reduce_to_single_digit(personality_sum),
    };
    tracing::debug!("Name numbers for {}: {:?}", normalized, profile);
    Ok(profile)
}
