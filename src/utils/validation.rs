use crate::utils::error::{NumerologyError, Result};
use std::fmt::Display;
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn invalid(field: &str, value: impl Display, reason: impl Into<String>) -> NumerologyError {
    NumerologyError::InvalidConfigValueError {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.into(),
    }
}

pub fn validate_path(field: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(invalid(field, path, "Path cannot be empty"));
    }
    if path.contains('\0') {
        return Err(invalid(field, path, "Path contains null bytes"));
    }
    Ok(())
}

/// `file` must end in one of `allowed` (without the dot).
pub fn validate_extension(field: &str, file: &str, allowed: &[&str]) -> Result<()> {
    validate_path(field, file)?;
    match Path::new(file).extension().and_then(|ext| ext.to_str()) {
        Some(ext) if allowed.contains(&ext) => Ok(()),
        Some(ext) => Err(invalid(
            field,
            file,
            format!("Unsupported extension .{}; expected {}", ext, allowed.join(", ")),
        )),
        None => Err(invalid(field, file, "File name has no extension")),
    }
}

/// Non-empty list whose every entry is in `allowed`.
pub fn validate_one_of(field: &str, values: &[String], allowed: &[&str]) -> Result<()> {
    if values.is_empty() {
        return Err(invalid(field, "[]", format!("Pick at least one of {}", allowed.join(", "))));
    }
    match values.iter().find(|v| !allowed.contains(&v.as_str())) {
        Some(value) => Err(invalid(
            field,
            value,
            format!("Unsupported value. Valid values: {}", allowed.join(", ")),
        )),
        None => Ok(()),
    }
}

pub fn validate_range<T: PartialOrd + Display + Copy>(field: &str, value: T, min: T, max: T) -> Result<()> {
    if value < min || value > max {
        return Err(invalid(field, value, format!("Value must be between {} and {}", min, max)));
    }
    Ok(())
}

/// Returns the section when present, `MissingConfigError` otherwise.
pub fn required_section<'a, T>(field: &str, section: &'a Option<T>) -> Result<&'a T> {
    section.as_ref().ok_or_else(|| NumerologyError::MissingConfigError {
        field: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data.dir", "./data").is_ok());
        assert!(validate_path("data.dir", "  ").is_err());
        assert!(validate_path("data.dir", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_extension() {
        assert!(validate_extension("export.roster", "roster.csv", &["csv"]).is_ok());
        assert!(validate_extension("export.roster", "roster.xlsx", &["csv"]).is_err());
        assert!(validate_extension("export.roster", "roster", &["csv"]).is_err());
        assert!(validate_extension("export.compression.filename", "", &["zip"]).is_err());
    }

    #[test]
    fn test_validate_range_and_one_of() {
        assert!(validate_range("scoring.team_weight", 0.4, 0.0, 1.0).is_ok());
        assert!(validate_range("scoring.team_weight", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("cache.ttl_seconds", 0u64, 1, u64::MAX).is_err());

        let allowed = ["csv", "tsv", "json"];
        assert!(validate_one_of("export.output_formats", &["csv".to_string()], &allowed).is_ok());
        assert!(validate_one_of("export.output_formats", &["csv".to_string(), "pdf".to_string()], &allowed).is_err());
        assert!(validate_one_of("export.output_formats", &[], &allowed).is_err());
    }

    #[test]
    fn test_required_section() {
        let present = Some(3);
        let missing: Option<u32> = None;
        assert_eq!(*required_section("export", &present).unwrap(), 3);
        assert!(matches!(
            required_section("export", &missing),
            Err(NumerologyError::MissingConfigError { .. })
        ));
    }
}
