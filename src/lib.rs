pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::cache::{MemoryTextCache, NoCache};
pub use adapters::catalog::Catalogs;
pub use adapters::storage::LocalStorage;
pub use app::pipelines::RosterPipeline;
pub use config::toml_config::AppConfig;
pub use core::{ExportEngine, NumerologyReport, ReportService};
pub use domain::model::{
    BirthProfile, CompatibilityReport, ComparisonMode, DateParts, DirectionalNumber, Gender,
    NameProfile, NumerologyResult, PersonalCycle, Relation, Verdict,
};
pub use domain::services::{
    assess_compatibility, calculate_name_numbers, calculate_numerology_data, RelationTable,
};
pub use utils::error::{NumerologyError, Result};
