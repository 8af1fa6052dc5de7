pub mod models;

pub use models::{DesiredRecord, RecordsFile, SyncConfig};

use crate::api::cloudflare::API_BASE_URL;
use anyhow::{anyhow, Context, Result};
use std::{fs, path::Path};
use validator::Validate;

pub const API_TOKEN_VAR: &str = "CLOUDFLARE_API_TOKEN";
pub const ZONE_ID_VAR: &str = "ZONE_ID";
pub const API_BASE_VAR: &str = "CLOUDFLARE_API_BASE";
pub const RECORDS_FILE_VAR: &str = "RECORDS_FILE";

pub const DEFAULT_RECORDS_FILE: &str = "records.yaml";
pub const NS_TARGET: &str = "ns1.yandexcloud.kz";
pub const RECORD_TTL: u32 = 3600;
pub const RECORD_COMMENT: &str = "proxied to yandex dns";

impl SyncConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (api_token, zone_id) = match (get(API_TOKEN_VAR), get(ZONE_ID_VAR)) {
            (Some(token), Some(zone)) => (token, zone),
            _ => {
                return Err(anyhow!(
                    "{} and {} must be set",
                    API_TOKEN_VAR,
                    ZONE_ID_VAR
                ))
            }
        };

        let config = Self {
            api_token,
            zone_id,
            api_base: get(API_BASE_VAR).unwrap_or_else(|| API_BASE_URL.to_string()),
            records_path: get(RECORDS_FILE_VAR)
                .unwrap_or_else(|| DEFAULT_RECORDS_FILE.to_string())
                .into(),
            ns_target: NS_TARGET.to_string(),
            ttl: RECORD_TTL,
            comment: RECORD_COMMENT.to_string(),
        };

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

pub fn load_records(path: &Path) -> Result<RecordsFile> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read records file: {}", path.display()))?;

    // An empty document has no `records` key either.
    if contents.trim().is_empty() {
        return Ok(RecordsFile::default());
    }

    let records: RecordsFile = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse records file: {}", path.display()))?;
    records
        .validate()
        .with_context(|| format!("Invalid records file: {}", path.display()))?;

    Ok(records)
}
