use crate::domain::model::ComparisonMode;
use crate::domain::ports::ConfigProvider;
use crate::domain::services::{VerdictThresholds, WinWeights};
use crate::utils::error::{NumerologyError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    pub export: Option<ExportConfig>,
    pub logging: Option<LoggingConfig>,
}

/// Catalog files relative to `dir`; any file left out uses the built-in table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub dir: String,
    pub relations: Option<String>,
    pub patterns: Option<String>,
    pub interpretations: Option<String>,
    pub teams: Option<String>,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_data_dir(),
            relations: None,
            patterns: None,
            interpretations: None,
            teams: None,
        }
    }
}

fn default_data_dir() -> String {
    "./data".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_player_weight")]
    pub captain_weight: f64,
    #[serde(default = "default_player_weight")]
    pub team_weight: f64,
    #[serde(default = "default_time_weight")]
    pub time_weight: f64,
    #[serde(default = "default_high_threshold")]
    pub high_threshold: u32,
    #[serde(default = "default_low_threshold")]
    pub low_threshold: u32,
    #[serde(default = "default_comparison_mode")]
    pub comparison_mode: ComparisonMode,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            captain_weight: default_player_weight(),
            team_weight: default_player_weight(),
            time_weight: default_time_weight(),
            high_threshold: default_high_threshold(),
            low_threshold: default_low_threshold(),
            comparison_mode: default_comparison_mode(),
        }
    }
}

fn default_player_weight() -> f64 {
    0.4
}

fn default_time_weight() -> f64 {
    0.2
}

fn default_high_threshold() -> u32 {
    75
}

fn default_low_threshold() -> u32 {
    35
}

fn default_comparison_mode() -> ComparisonMode {
    ComparisonMode::Bidirectional
}

impl ScoringConfig {
    pub fn weights(&self) -> WinWeights {
        WinWeights {
            captain: self.captain_weight,
            team: self.team_weight,
            time: self.time_weight,
        }
    }

    pub fn thresholds(&self) -> VerdictThresholds {
        VerdictThresholds {
            high: self.high_threshold,
            low: self.low_threshold,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

fn default_ttl_seconds() -> u64 {
    3600
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub name: Option<String>,
    pub roster: String,
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

pub const OUTPUT_FORMATS: [&str; 3] = ["csv", "tsv", "json"];

impl ConfigProvider for ExportConfig {
    fn roster_path(&self) -> &str {
        &self.roster
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    fn compression_filename(&self) -> Option<&str> {
        self.compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.as_str())
    }

    fn file_stem(&self) -> &str {
        self.name.as_deref().unwrap_or("roster_export")
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_extension("export.roster", &self.roster, &["csv"])?;
        validation::validate_path("export.output_path", &self.output_path)?;
        validation::validate_one_of("export.output_formats", &self.output_formats, &OUTPUT_FORMATS)?;

        if let Some(compression) = self.compression.as_ref().filter(|c| c.enabled) {
            validation::validate_extension("export.compression.filename", &compression.filename, &["zip"])?;
        }
        Ok(())
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(NumerologyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| NumerologyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| NumerologyError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("data.dir", &self.data.dir)?;

        let scoring = &self.scoring;
        validation::validate_range("scoring.captain_weight", scoring.captain_weight, 0.0, 1.0)?;
        validation::validate_range("scoring.team_weight", scoring.team_weight, 0.0, 1.0)?;
        validation::validate_range("scoring.time_weight", scoring.time_weight, 0.0, 1.0)?;
        let total = scoring.captain_weight + scoring.team_weight + scoring.time_weight;
        if (total - 1.0).abs() > 1e-6 {
            return Err(NumerologyError::InvalidConfigValueError {
                field: "scoring".to_string(),
                value: total.to_string(),
                reason: "captain, team and time weights must add up to 1.0".to_string(),
            });
        }

        validation::validate_range("scoring.high_threshold", scoring.high_threshold, 0, 100)?;
        validation::validate_range("scoring.low_threshold", scoring.low_threshold, 0, 100)?;
        if scoring.low_threshold >= scoring.high_threshold {
            return Err(NumerologyError::InvalidConfigValueError {
                field: "scoring.low_threshold".to_string(),
                value: scoring.low_threshold.to_string(),
                reason: format!("must be below high_threshold ({})", scoring.high_threshold),
            });
        }

        if self.cache.enabled {
            validation::validate_range("cache.ttl_seconds", self.cache.ttl_seconds, 1, u64::MAX)?;
        }

        if let Some(export) = &self.export {
            export.validate()?;
        }
        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
