pub mod export;
pub mod report;

pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage, TextCache};
pub use crate::utils::error::Result;
pub use export::ExportEngine;
pub use report::{InterpretationCatalog, NumerologyReport, ReportService};
