pub mod compatibility;
pub mod cycles;
pub mod date_numbers;
pub mod grid;
pub mod name_numbers;
pub mod reduction;
pub mod relations;
pub mod time_factor;
pub mod win_percentage;

pub use compatibility::{assess_compatibility, bidirectional_score, compatibility_score, VerdictThresholds};
pub use cycles::{personal_day, personal_month, personal_year};
pub use date_numbers::{calculate_numerology_data, numerology_for_profile};
pub use grid::{analyze_grid, NumeralGrid, PatternCatalog};
pub use name_numbers::calculate_name_numbers;
pub use relations::{relation_score, RelationTable};
pub use time_factor::{combined_time_factor, time_factor_score};
pub use win_percentage::{matchup, win_percentage, TeamRegistry, WinWeights};
