//! Configuration validation
//!
//! Rules:
//! - marker and suffixes are non-empty (field rules on `SplitConfig`)
//! - 1 <= queue_capacity <= 1_048_576
//! - primary and secondary suffixes differ
//! - suffixes contain no path separator

use contracts::{ContractError, SplitConfig};
use validator::Validate;

/// Validate a SplitConfig
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(config: &SplitConfig) -> Result<(), ContractError> {
    validate_fields(config)?;
    validate_suffixes_distinct(config)?;
    validate_suffix_separators(config)?;
    Ok(())
}

/// Field-level rules declared with `#[validate(...)]`
fn validate_fields(config: &SplitConfig) -> Result<(), ContractError> {
    let Err(errors) = config.validate() else {
        return Ok(());
    };

    // Report the alphabetically first field so the message is stable
    let first = errors
        .field_errors()
        .into_iter()
        .min_by(|a, b| a.0.cmp(&b.0));

    match first {
        Some((field, field_errors)) => {
            let message = field_errors
                .first()
                .map(|e| {
                    e.message
                        .as_deref()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("invalid value ({})", e.code))
                })
                .unwrap_or_else(|| "invalid value".to_string());
            Err(ContractError::config_validation(field.to_string(), message))
        }
        None => Err(ContractError::config_validation("config", errors.to_string())),
    }
}

/// Both outputs would land on the same file
fn validate_suffixes_distinct(config: &SplitConfig) -> Result<(), ContractError> {
    if config.primary_suffix == config.secondary_suffix {
        return Err(ContractError::config_validation(
            "primary_suffix / secondary_suffix",
            format!(
                "suffixes must differ, both are '{}'",
                config.primary_suffix
            ),
        ));
    }
    Ok(())
}

/// Outputs must stay next to the input
fn validate_suffix_separators(config: &SplitConfig) -> Result<(), ContractError> {
    for (field, suffix) in [
        ("primary_suffix", &config.primary_suffix),
        ("secondary_suffix", &config.secondary_suffix),
    ] {
        if suffix.contains('/') || suffix.contains(std::path::MAIN_SEPARATOR) {
            return Err(ContractError::config_validation(
                field,
                format!("suffix '{suffix}' must not contain a path separator"),
            ));
        }
    }
    Ok(())
}
