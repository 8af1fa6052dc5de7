mod config;

use crate::api::ApiDnsRecord;
use crate::config::{SyncConfig, NS_TARGET, RECORD_COMMENT, RECORD_TTL};

pub const ZONE_ID: &str = "zone123";
pub const ZONE_NAME: &str = "example.com";

pub fn test_config(api_base: &str) -> SyncConfig {
    SyncConfig {
        api_token: "test_token".to_string(),
        zone_id: ZONE_ID.to_string(),
        api_base: api_base.to_string(),
        records_path: "records.yaml".into(),
        ns_target: NS_TARGET.to_string(),
        ttl: RECORD_TTL,
        comment: RECORD_COMMENT.to_string(),
    }
}

pub fn record(id: &str, name: &str, r#type: &str, content: &str) -> ApiDnsRecord {
    ApiDnsRecord {
        id: id.to_string(),
        name: name.to_string(),
        r#type: r#type.to_string(),
        content: content.to_string(),
        ttl: 300,
    }
}
