use super::{client::DnsApiClient, models::*};
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{header::CONTENT_TYPE, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::collections::HashSet;

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";
pub const RECORDS_PER_PAGE: u32 = 1000;

pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

#[async_trait]
impl DnsApiClient for CloudflareClient {
    async fn get_zone_name(&self, zone_id: &str) -> Result<String> {
        let response: ApiResponse<ZoneDetails> = self
            .execute(self.request(Method::GET, &format!("/zones/{}", zone_id)))
            .await
            .with_context(|| format!("Failed to fetch zone {}", zone_id))?;

        let zone = response
            .result
            .ok_or_else(|| anyhow!("Zone response for {} has no result", zone_id))?;
        Ok(zone.name)
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<ApiDnsRecord>> {
        let path = format!("/zones/{}/dns_records", zone_id);
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut page = 1u32;

        loop {
            let request = self
                .request(Method::GET, &path)
                .query(&[("page", page), ("per_page", RECORDS_PER_PAGE)]);
            let response: ApiResponse<Vec<ApiDnsRecord>> = self
                .execute(request)
                .await
                .with_context(|| format!("Failed to list DNS records (page {})", page))?;

            let batch = response.result.unwrap_or_default();
            let fetched = batch.len();
            let before = records.len();
            records.extend(
                batch
                    .into_iter()
                    .filter(|record| seen.insert(record.id.clone())),
            );
            debug!(
                "Fetched page {} with {} records ({} total)",
                page,
                fetched,
                records.len()
            );

            // A page of only known ids means the server is not paging.
            if fetched > 0 && records.len() == before {
                warn!("Page {} repeated earlier records, stopping", page);
                break;
            }

            // Without result_info a short page marks the end.
            let more = match response.result_info {
                Some(info) if info.total_pages > 0 => page < info.total_pages,
                _ => fetched >= RECORDS_PER_PAGE as usize,
            };
            if !more || fetched == 0 {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    async fn create_record(
        &self,
        zone_id: &str,
        payload: &DnsRecordPayload,
    ) -> Result<ApiDnsRecord> {
        let request = self
            .request(Method::POST, &format!("/zones/{}/dns_records", zone_id))
            .json(payload);
        let response: ApiResponse<ApiDnsRecord> = self
            .execute(request)
            .await
            .with_context(|| {
                format!("Failed to create {} record for {}", payload.r#type, payload.name)
            })?;

        response
            .result
            .ok_or_else(|| anyhow!("Create response for {} has no result", payload.name))
    }

    async fn update_record(
        &self,
        zone_id: &str,
        record_id: &str,
        payload: &DnsRecordPayload,
    ) -> Result<ApiDnsRecord> {
        let request = self
            .request(
                Method::PUT,
                &format!("/zones/{}/dns_records/{}", zone_id, record_id),
            )
            .json(payload);
        let response: ApiResponse<ApiDnsRecord> = self
            .execute(request)
            .await
            .with_context(|| format!("Failed to update DNS record {}", record_id))?;

        response
            .result
            .ok_or_else(|| anyhow!("Update response for {} has no result", record_id))
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &format!("/zones/{}/dns_records/{}", zone_id, record_id),
        );
        let _: ApiResponse<serde_json::Value> = self
            .execute(request)
            .await
            .with_context(|| format!("Failed to delete DNS record {}", record_id))?;
        Ok(())
    }
}

impl CloudflareClient {
    pub fn with_base_url(api_token: String, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            api_token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);
        self.client
            .request(method, url)
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json")
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiResponse<T>> {
        let response = request.send().await?;
        let status = response.status();
        let url = response.url().clone();
        let text = response.text().await?;
        debug!("{} responded {}: {}", url, status, text);

        if !status.is_success() {
            bail!("Request to {} failed with status {}: {}", url, status, text);
        }

        let parsed: ApiResponse<T> = serde_json::from_str(&text).map_err(|e| {
            anyhow!("Failed to parse API response: {}. Response: {}", e, text)
        })?;

        if !parsed.success {
            bail!("API request failed: {:?}", parsed.errors);
        }

        Ok(parsed)
    }
}
