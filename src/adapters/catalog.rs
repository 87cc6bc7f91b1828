use crate::config::toml_config::DataConfig;
use crate::core::report::InterpretationCatalog;
use crate::domain::ports::Storage;
use crate::domain::services::{PatternCatalog, RelationTable, TeamRegistry};
use crate::utils::error::{NumerologyError, Result};

const BUILTIN_RELATIONS: &str = include_str!("../../data/relations.json");
const BUILTIN_PATTERNS: &str = include_str!("../../data/patterns.json");
const BUILTIN_INTERPRETATIONS: &str = include_str!("../../data/interpretations.json");
const BUILTIN_TEAMS: &str = include_str!("../../data/teams.json");

/// Every read-only table the engine consults, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Catalogs {
    pub relations: RelationTable,
    pub patterns: PatternCatalog,
    pub interpretations: InterpretationCatalog,
    pub teams: TeamRegistry,
}

impl Catalogs {
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            relations: RelationTable::from_json_str(BUILTIN_RELATIONS)?,
            patterns: PatternCatalog::from_json_str(BUILTIN_PATTERNS)?,
            interpretations: InterpretationCatalog::from_json_str(BUILTIN_INTERPRETATIONS)?,
            teams: TeamRegistry::from_json_str(BUILTIN_TEAMS)?,
        })
    }

    /// Reads the files named in `config` through `storage`; unnamed or missing ones use the built-in data.
    pub async fn load<S: Storage>(storage: &S, config: &DataConfig) -> Result<Self> {
        let relations = read_or_builtin(storage, config.relations.as_deref(), BUILTIN_RELATIONS).await?;
        let patterns = read_or_builtin(storage, config.patterns.as_deref(), BUILTIN_PATTERNS).await?;
        let interpretations = read_or_builtin(
            storage,
            config.interpretations.as_deref(),
            BUILTIN_INTERPRETATIONS,
        )
        .await?;
        let teams = read_or_builtin(storage, config.teams.as_deref(), BUILTIN_TEAMS).await?;

        let catalogs = Self {
            relations: RelationTable::from_json_str(&relations)?,
            patterns: PatternCatalog::from_json_str(&patterns)?,
            interpretations: InterpretationCatalog::from_json_str(&interpretations)?,
            teams: TeamRegistry::from_json_str(&teams)?,
        };
        tracing::info!(
            "📚 Catalogs loaded: {} relation rules, {} patterns, {} teams",
            catalogs.relations.len(),
            catalogs.patterns.len(),
            catalogs.teams.len()
        );
        Ok(catalogs)
    }
}

async fn read_or_builtin<S: Storage>(
    storage: &S,
    file: Option<&str>,
    builtin: &str,
) -> Result<String> {
    let Some(file) = file else {
        return Ok(builtin.to_string());
    };
    if !storage.exists(file).await {
        tracing::warn!("⚠️ Catalog file {} not found, using built-in table", file);
        return Ok(builtin.to_string());
    }
    tracing::debug!("Reading catalog file {}", file);
    let bytes = storage.read_file(file).await?;
    String::from_utf8(bytes).map_err(|e| NumerologyError::catalog(file, e.to_string()))
}
