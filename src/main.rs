mod api;
mod config;
mod sync;

#[cfg(test)]
mod tests;

use anyhow::Result;
use api::CloudflareClient;
use config::{load_records, SyncConfig};
use sync::NsSync;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();

    let config = SyncConfig::from_env()?;
    let records = load_records(&config.records_path)?;

    let client =
        CloudflareClient::with_base_url(config.api_token.clone(), config.api_base.clone());
    NsSync::new(client, config).run(&records.records).await?;
    Ok(())
}
