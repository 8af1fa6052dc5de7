use crate::api::{ApiDnsRecord, DnsApiClient, DnsRecordPayload};
use crate::config::{DesiredRecord, SyncConfig};
use anyhow::{Context, Result};
use log::{debug, info};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const NS: &str = "NS";
pub const A: &str = "A";

/// Existing zone records keyed by lowercased fully-qualified name.
pub type ExistingRecords = BTreeMap<String, Vec<ApiDnsRecord>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Create { name: String },
    Update { id: String, name: String },
    Convert { id: String, name: String },
    Unchanged { name: String },
    Delete { id: String, name: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Create { name } => write!(f, "➕ Creating NS for {}", name),
            Action::Update { name, .. } => write!(f, "↻ Updating NS for {}", name),
            Action::Convert { name, .. } => write!(f, "↻ Converting A→NS for {}", name),
            Action::Unchanged { name } => write!(f, "✔ NS for {} OK", name),
            Action::Delete { name, .. } => write!(f, "🗑 Deleting obsolete NS for {}", name),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub created: usize,
    pub updated: usize,
    pub converted: usize,
    pub unchanged: usize,
    pub deleted: usize,
}

impl SyncSummary {
    fn record(&mut self, action: &Action) {
        match action {
            Action::Create { .. } => self.created += 1,
            Action::Update { .. } => self.updated += 1,
            Action::Convert { .. } => self.converted += 1,
            Action::Unchanged { .. } => self.unchanged += 1,
            Action::Delete { .. } => self.deleted += 1,
        }
    }
}

fn canonical(name: &str) -> String {
    name.trim_end_matches('.').to_ascii_lowercase()
}

/// Qualifies `subdomain` with `zone_name` unless it already ends with the zone
/// on a label boundary.
pub fn normalize(subdomain: &str, zone_name: &str) -> String {
    let name = canonical(subdomain);
    let zone = canonical(zone_name);

    if name == zone || name.ends_with(&format!(".{}", zone)) {
        name
    } else {
        format!("{}.{}", name, zone)
    }
}

pub fn group_by_name(records: Vec<ApiDnsRecord>) -> ExistingRecords {
    let mut grouped = ExistingRecords::new();
    for record in records {
        grouped
            .entry(canonical(&record.name))
            .or_default()
            .push(record);
    }
    grouped
}

fn points_at(record: &ApiDnsRecord, target: &str) -> bool {
    canonical(&record.content) == canonical(target)
}

fn lowest_id<'a, I>(records: I) -> Option<&'a ApiDnsRecord>
where
    I: Iterator<Item = &'a ApiDnsRecord>,
{
    records.min_by(|a, b| a.id.cmp(&b.id))
}

/// Picks the action converging one desired name to an NS record at `ns_target`.
///
/// Among several NS records, one already pointing at the target wins;
/// otherwise the lowest id is updated. Among several A records the lowest id
/// is converted.
pub fn reconcile_one(full_name: &str, existing: &[ApiDnsRecord], ns_target: &str) -> Action {
    let name = full_name.to_string();

    if existing
        .iter()
        .any(|r| r.is_type(NS) && points_at(r, ns_target))
    {
        return Action::Unchanged { name };
    }

    if let Some(ns) = lowest_id(existing.iter().filter(|r| r.is_type(NS))) {
        return Action::Update {
            id: ns.id.clone(),
            name,
        };
    }

    if let Some(a) = lowest_id(existing.iter().filter(|r| r.is_type(A))) {
        return Action::Convert {
            id: a.id.clone(),
            name,
        };
    }

    Action::Create { name }
}

pub fn prune_obsolete(existing: &ExistingRecords, desired: &BTreeSet<String>) -> Vec<Action> {
    existing
        .iter()
        .filter(|(name, _)| !desired.contains(*name))
        .flat_map(|(name, records)| {
            records
                .iter()
                .filter(|r| r.is_type(NS))
                .map(move |r| Action::Delete {
                    id: r.id.clone(),
                    name: name.clone(),
                })
        })
        .collect()
}

/// Reconcile actions in configuration order, then deletes in name order.
pub fn plan(desired: &[String], existing: &ExistingRecords, ns_target: &str) -> Vec<Action> {
    let mut seen = BTreeSet::new();
    let mut actions = Vec::new();

    for name in desired {
        if !seen.insert(name.clone()) {
            debug!("Skipping duplicate entry for {}", name);
            continue;
        }
        let records = existing.get(name).map(Vec::as_slice).unwrap_or_default();
        actions.push(reconcile_one(name, records, ns_target));
    }

    actions.extend(prune_obsolete(existing, &seen));
    actions
}

pub struct NsSync<C> {
    client: C,
    config: SyncConfig,
}

impl<C: DnsApiClient> NsSync<C> {
    pub fn new(client: C, config: SyncConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch_zone_name(&self) -> Result<String> {
        self.client.get_zone_name(&self.config.zone_id).await
    }

    pub async fn fetch_all_records(&self) -> Result<ExistingRecords> {
        let records = self.client.list_records(&self.config.zone_id).await?;
        debug!("Fetched {} records", records.len());
        Ok(group_by_name(records))
    }

    fn payload(&self, name: &str) -> DnsRecordPayload {
        DnsRecordPayload {
            r#type: NS.to_string(),
            name: name.to_string(),
            content: self.config.ns_target.clone(),
            ttl: self.config.ttl,
            comment: self.config.comment.clone(),
        }
    }

    async fn apply(&self, action: &Action) -> Result<()> {
        let zone_id = &self.config.zone_id;
        match action {
            Action::Create { name } => {
                let created = self
                    .client
                    .create_record(zone_id, &self.payload(name))
                    .await?;
                debug!("Created record {}", created.id);
            }
            Action::Update { id, name } => {
                self.client
                    .update_record(zone_id, id, &self.payload(name))
                    .await?;
            }
            Action::Convert { id, name } => {
                debug!("Overwriting A record {} for {} with NS", id, name);
                self.client
                    .update_record(zone_id, id, &self.payload(name))
                    .await?;
            }
            Action::Delete { id, .. } => self.client.delete_record(zone_id, id).await?,
            Action::Unchanged { .. } => {}
        }
        Ok(())
    }

    /// Converges the zone to `desired`. Stops at the first failed call.
    pub async fn run(&self, desired: &[DesiredRecord]) -> Result<SyncSummary> {
        let zone_name = self.fetch_zone_name().await?;
        info!("Zone: {}", zone_name);
        let existing = self.fetch_all_records().await?;

        let desired: Vec<String> = desired
            .iter()
            .map(|record| normalize(&record.name, &zone_name))
            .collect();

        let mut summary = SyncSummary::default();
        for action in plan(&desired, &existing, &self.config.ns_target) {
            info!("{}", action);
            self.apply(&action)
                .await
                .with_context(|| format!("Failed while applying: {}", action))?;
            summary.record(&action);
        }

        info!(
            "✅ NS synchronization complete ({} created, {} updated, {} converted, {} unchanged, {} deleted)",
            summary.created, summary.updated, summary.converted, summary.unchanged, summary.deleted
        );
        Ok(summary)
    }
}
