use thiserror::Error;

#[derive(Error, Debug)]
pub enum NumerologyError {
    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("{kind} not found: {key}")]
    NotFound { kind: String, key: String },

    #[error("Malformed {catalog} catalog: {message}")]
    CatalogError { catalog: String, message: String },

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl NumerologyError {
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn catalog(catalog: &str, message: impl Into<String>) -> Self {
        Self::CatalogError {
            catalog: catalog.to_string(),
            message: message.into(),
        }
    }

    /// True for errors the caller should surface as a "bad request".
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::Input,
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::CatalogError { .. }
            | Self::CsvError(_)
            | Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ZipError(_) | Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Lookup => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidInput { field, .. } if field == "dob" || field.ends_with("date") => {
                "Use the YYYY-MM-DD format with a month between 1 and 12 and a day between 1 and 31"
                    .to_string()
            }
            Self::InvalidInput { field, .. } if field == "gender" => {
                "Provide a gender such as Male, Female or Neutral".to_string()
            }
            Self::InvalidInput { field, .. } if field == "name" => {
                "Provide a name containing at least one letter A-Z".to_string()
            }
            Self::InvalidInput { .. } => "Check the input values and try again".to_string(),
            Self::NotFound { kind, .. } => {
                format!("Check the {} key against the loaded registry", kind.to_lowercase())
            }
            Self::CatalogError { catalog, .. } => format!(
                "Fix the {} data file or remove it to fall back to the built-in catalog",
                catalog
            ),
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => {
                "Review the TOML configuration file and the environment variables it references"
                    .to_string()
            }
            Self::CsvError(_) => {
                "Make sure the roster is a CSV file with name,dob,gender columns".to_string()
            }
            Self::SerializationError(_) => "Check the JSON data file syntax".to_string(),
            Self::IoError(_) => "Check that the path exists and is readable/writable".to_string(),
            Self::ZipError(_) => "Check free disk space and the output directory".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidInput { field, message } => {
                format!("The value given for '{}' is not valid: {}", field, message)
            }
            Self::NotFound { kind, key } => format!("No {} named '{}' was found", kind, key),
            Self::CatalogError { catalog, .. } => {
                format!("The {} data could not be loaded", catalog)
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            other => format!("Something went wrong: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, NumerologyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_is_medium_severity() {
        let err = NumerologyError::invalid_input("dob", "month 13 is out of range");
        assert!(err.is_invalid_input());
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("YYYY-MM-DD"));
        assert!(err.user_friendly_message().contains("dob"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = NumerologyError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_invalid_input());
    }
}
