use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiDnsRecord {
    pub id: String,
    pub name: String,
    pub r#type: String,
    pub content: String,
    pub ttl: u32,
}

impl ApiDnsRecord {
    pub fn is_type(&self, record_type: &str) -> bool {
        self.r#type.eq_ignore_ascii_case(record_type)
    }
}

/// Body sent on create and in-place update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecordPayload {
    pub r#type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct ZoneDetails {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub result: Option<T>,
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    pub result_info: Option<ResultInfo>,
}
