use super::models::*;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait DnsApiClient: Send + Sync {
    async fn get_zone_name(&self, zone_id: &str) -> Result<String>;

    /// Every record in the zone, across all pages.
    async fn list_records(&self, zone_id: &str) -> Result<Vec<ApiDnsRecord>>;

    async fn create_record(
        &self,
        zone_id: &str,
        payload: &DnsRecordPayload,
    ) -> Result<ApiDnsRecord>;

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &DnsRecordPayload,
    ) -> Result<ApiDnsRecord>;

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
}
