//! Lo Shu grid placement and plane/arrow detection.
//!
//! ```text
//! 4 9 2
//! 3 5 7
//! 8 1 6
//! ```

use crate::domain::model::{PatternDefinition, PatternMatch};
use crate::utils::error::{NumerologyError, Result};
use serde::Serialize;
use std::fmt;

/// Digit occupying each cell, row by row.
pub const LO_SHU_LAYOUT: [[u32; 3]; 3] = [[4, 9, 2], [3, 5, 7], [8, 1, 6]];

/// (row, column) of `digit` in the Lo Shu layout.
pub fn cell_position(digit: u32) -> Option<(usize, usize)> {
    LO_SHU_LAYOUT.iter().enumerate().find_map(|(row, cells)| {
        cells
            .iter()
            .position(|&d| d == digit)
            .map(|col| (row, col))
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub digit: u32,
    pub occurrences: u32,
}

/// Grid numerals bucketed into their cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumeralGrid {
    cells: [[GridCell; 3]; 3],
}

impl NumeralGrid {
    /// Digits outside 1-9 have no cell and are ignored.
    pub fn from_numerals(numerals: &[u32]) -> Self {
        let mut cells = LO_SHU_LAYOUT.map(|row| {
            row.map(|digit| GridCell {
                digit,
                occurrences: 0,
            })
        });
        for &digit in numerals {
            if let Some((row, col)) = cell_position(digit) {
                cells[row][col].occurrences += 1;
            }
        }
        Self { cells }
    }

    pub fn cells(&self) -> &[[GridCell; 3]; 3] {
        &self.cells
    }

    pub fn occurrences(&self, digit: u32) -> u32 {
        cell_position(digit)
            .map(|(row, col)| self.cells[row][col].occurrences)
            .unwrap_or(0)
    }

    pub fn contains(&self, digit: u32) -> bool {
        self.occurrences(digit) > 0
    }

    /// Digits 1-9 that never occur, ascending.
    pub fn missing_digits(&self) -> Vec<u32> {
        (1..=9).filter(|&d| !self.contains(d)).collect()
    }

    /// (digit, count) for every digit occurring more than once, ascending.
    pub fn repeated_digits(&self) -> Vec<(u32, u32)> {
        (1..=9)
            .map(|d| (d, self.occurrences(d)))
            .filter(|&(_, count)| count > 1)
            .collect()
    }

    /// Cell content as shown on a chart, e.g. `"1 1 1"`; empty when absent.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        let cell = self.cells[row][col];
        vec![cell.digit.to_string(); cell.occurrences as usize].join(" ")
    }
}

impl fmt::Display for NumeralGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (0..3)
            .flat_map(|row| (0..3).map(move |col| (row, col)))
            .map(|(row, col)| self.cell_text(row, col).len())
            .max()
            .unwrap_or(0)
            .max(1);
        let border = format!("+{}", format!("{}+", "-".repeat(width + 2)).repeat(3));

        writeln!(f, "{}", border)?;
        for row in 0..3 {
            write!(f, "|")?;
            for col in 0..3 {
                write!(f, " {:^width$} |", self.cell_text(row, col), width = width)?;
            }
            writeln!(f)?;
            writeln!(f, "{}", border)?;
        }
        Ok(())
    }
}

/// Ordered list of planes and arrows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternCatalog {
    patterns: Vec<PatternDefinition>,
}

impl PatternCatalog {
    pub fn new(patterns: Vec<PatternDefinition>) -> Result<Self> {
        for pattern in &patterns {
            if pattern.name.trim().is_empty() {
                return Err(NumerologyError::catalog("pattern", "pattern with an empty name"));
            }
            if let Some(bad) = pattern.required_digits.iter().find(|d| !(1..=9).contains(*d)) {
                return Err(NumerologyError::catalog(
                    "pattern",
                    format!("'{}' requires {}, expected digits 1-9", pattern.name, bad),
                ));
            }
        }
        Ok(Self { patterns })
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let patterns: Vec<PatternDefinition> = serde_json::from_str(content)
            .map_err(|e| NumerologyError::catalog("pattern", e.to_string()))?;
        Self::new(patterns)
    }

    pub fn patterns(&self) -> &[PatternDefinition] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

/// Patterns whose three digits all appear somewhere in `grid_numerals`.
pub fn analyze_grid(grid_numerals: &[u32], catalog: &PatternCatalog) -> Vec<PatternMatch> {
    let grid = NumeralGrid::from_numerals(grid_numerals);
    catalog
        .patterns()
        .iter()
        .filter(|p| p.required_digits.iter().all(|&d| grid.contains(d)))
        .map(|p| PatternMatch {
            name: p.name.clone(),
            category: p.category.clone(),
            interpretation: p.interpretation.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(name: &str, category: &str, digits: [u32; 3]) -> PatternDefinition {
        PatternDefinition {
            name: name.to_string(),
            category: category.to_string(),
            required_digits: digits,
            interpretation: format!("{} is complete", name),
        }
    }

    fn catalog() -> PatternCatalog {
        PatternCatalog::new(vec![
            pattern("Mental Plane", "plane", [4, 9, 2]),
            pattern("Will Plane", "plane", [9, 5, 1]),
            pattern("Practical Plane", "plane", [8, 1, 6]),
            pattern("Golden Arrow", "arrow", [2, 5, 8]),
        ])
        .unwrap()
    }

    #[test]
    fn test_cell_positions() {
        assert_eq!(cell_position(4), Some((0, 0)));
        assert_eq!(cell_position(5), Some((1, 1)));
        assert_eq!(cell_position(6), Some((2, 2)));
        assert_eq!(cell_position(0), None);
        assert_eq!(cell_position(10), None);
    }

    #[test]
    fn test_grid_counts_missing_and_repeats() {
        // 1990-10-28 male
        let grid = NumeralGrid::from_numerals(&[2, 8, 1, 1, 9, 9, 3, 1, 1]);
        assert_eq!(grid.occurrences(1), 4);
        assert_eq!(grid.cell_text(2, 1), "1 1 1 1");
        assert_eq!(grid.cell_text(1, 1), "");
        assert_eq!(grid.missing_digits(), vec![4, 5, 6, 7]);
        assert_eq!(grid.repeated_digits(), vec![(1, 4), (9, 2)]);
    }

    #[test]
    fn test_grid_display_has_three_rows() {
        let rendered = NumeralGrid::from_numerals(&[4, 9, 2]).to_string();
        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.lines().nth(1).unwrap().contains('4'));
    }

    #[test]
    fn test_analyze_grid_keeps_catalog_order() {
        let matches = analyze_grid(&[1, 2, 4, 5, 9, 9], &catalog());
        let names: Vec<&str> = matches.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Mental Plane", "Will Plane"]);
        assert_eq!(matches[0].category, "plane");
    }

    #[test]
    fn test_removing_a_required_digit_removes_the_pattern() {
        let full = vec![2, 5, 8, 8];
        assert_eq!(analyze_grid(&full, &catalog()).len(), 1);
        for missing in [2, 5, 8] {
            let reduced: Vec<u32> = full.iter().copied().filter(|&d| d != missing).collect();
            assert!(analyze_grid(&reduced, &catalog())
                .iter()
                .all(|m| m.name != "Golden Arrow"));
        }
    }

    #[test]
    fn test_catalog_validation() {
        assert!(PatternCatalog::new(vec![pattern("Bad", "plane", [0, 1, 2])]).is_err());
        assert!(PatternCatalog::new(vec![pattern(" ", "plane", [1, 2, 3])]).is_err());
        let parsed = PatternCatalog::from_json_str(
            r#"[{"name": "Thought Plane", "category": "plane", "requiredDigits": [4, 3, 8], "interpretation": "Planner"}]"#,
        )
        .unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(PatternCatalog::from_json_str(r#"[{"name": "x"}]"#).is_err());
    }
}
