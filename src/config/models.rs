use serde::{Deserialize, Serialize};
use std::{borrow::Cow, path::PathBuf};
use validator::{Validate, ValidationError};

/// Runtime settings, built once at startup.
#[derive(Debug, Clone, Validate)]
pub struct SyncConfig {
    #[validate(length(min = 1, message = "API token cannot be empty"))]
    pub api_token: String,

    #[validate(length(min = 1, message = "Zone ID cannot be empty"))]
    pub zone_id: String,

    #[validate(length(min = 1, message = "API base URL cannot be empty"))]
    pub api_base: String,

    pub records_path: PathBuf,

    #[validate(length(min = 1, message = "NS target cannot be empty"))]
    pub ns_target: String,

    #[validate(range(min = 1, message = "TTL must be greater than 0"))]
    pub ttl: u32,

    pub comment: String,
}

/// Contents of `records.yaml`.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct RecordsFile {
    #[serde(default)]
    #[validate(nested)]
    pub records: Vec<DesiredRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DesiredRecord {
    #[validate(length(min = 1, message = "Record name cannot be empty"))]
    #[validate(custom(function = "validate_record_name"))]
    pub name: String,
}

// Blank or dots-only names would normalize to a bare ".zone" name.
fn validate_record_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().trim_matches('.').is_empty() {
        let mut error = ValidationError::new("record_name");
        error.message = Some(Cow::from("Record name must contain a label"));
        return Err(error);
    }
    if name.chars().any(char::is_whitespace) {
        let mut error = ValidationError::new("record_name");
        error.message = Some(Cow::from("Record name cannot contain whitespace"));
        return Err(error);
    }
    Ok(())
}
