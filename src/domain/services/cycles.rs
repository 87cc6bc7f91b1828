use crate::domain::model::{DateParts, PersonalCycle};
use crate::domain::services::reduction::reduce_to_single_digit;

pub fn personal_year(birth_day: u32, birth_month: u32, target_year: u32) -> u32 {
    reduce_to_single_digit(
        reduce_to_single_digit(birth_day)
            + reduce_to_single_digit(birth_month)
            + reduce_to_single_digit(target_year),
    )
}

pub fn personal_month(personal_year: u32, target_month: u32) -> u32 {
    reduce_to_single_digit(personal_year + reduce_to_single_digit(target_month))
}

pub fn personal_day(personal_month: u32, target_day: u32) -> u32 {
    reduce_to_single_digit(personal_month + reduce_to_single_digit(target_day))
}

impl PersonalCycle {
    /// Year, month and day numbers of someone born on `birth` as of `target`.
    pub fn for_date(birth: &DateParts, target: &DateParts) -> Self {
        let year = personal_year(birth.day, birth.month, target.year);
        let month = personal_month(year, target.month);
        let day = personal_day(month, target.day);
        Self { year, month, day }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_personal_year() {
        // 1 + 1 + (2+0+2+5 -> 9) = 11 -> 2
        assert_eq!(personal_year(28, 10, 2025), 2);
        assert_eq!(personal_year(5, 1, 2001), 9);
    }

    #[test]
    fn test_personal_month_and_day() {
        assert_eq!(personal_month(2, 12), 5);
        assert_eq!(personal_day(5, 29), 7);
        assert_eq!(personal_month(9, 9), 9);
    }

    #[test]
    fn test_cycle_for_date_chains_the_three_numbers() {
        let birth = DateParts::new(28, 10, 1990).unwrap();
        let target = DateParts::new(29, 12, 2025).unwrap();
        let cycle = PersonalCycle::for_date(&birth, &target);
        assert_eq!(cycle, PersonalCycle { year: 2, month: 5, day: 7 });
    }
}
