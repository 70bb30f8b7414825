// ABOUTME: Storage collaborator contract: natural-key upsert plus lifecycle status inference.
// ABOUTME: Ships an in-memory store for tests/dry wiring and a PostgREST-style REST store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};

use examhub_extract::{ExamRecord, ExamStatus};

use crate::error::CrawlError;

/// Result of persisting one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertOutcome {
    pub is_new: bool,
    pub id: String,
}

/// A registered user who wants to hear about new exams.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub full_name: Option<String>,
}

/// The downstream store. Looks records up by the case-insensitive natural key
/// `(exam_name, organization)`, inserts when absent, updates preserving the
/// existing identifier otherwise, and fills `status` from the date fields
/// when the pipeline left it unset.
#[async_trait]
pub trait ExamStore: Send + Sync {
    async fn upsert(&self, record: &ExamRecord) -> Result<UpsertOutcome, CrawlError>;

    /// Active users to notify about newly discovered exams.
    async fn recipients(&self) -> Result<Vec<Recipient>, CrawlError>;
}

/// Infers the lifecycle status from the application window:
/// past deadline → Closed; future start → Coming Soon; otherwise Open.
pub fn infer_status(record: &ExamRecord, today: NaiveDate) -> ExamStatus {
    if let Some(last) = record.application_last_date {
        if last < today {
            return ExamStatus::Closed;
        }
    }
    if let Some(start) = record.application_start_date {
        if start > today {
            return ExamStatus::ComingSoon;
        }
    }
    ExamStatus::Open
}

/// Applies status inference when the record carries none.
fn with_status(record: &ExamRecord, today: NaiveDate) -> ExamRecord {
    let mut stored = record.clone();
    if stored.status.is_none() {
        stored.status = Some(infer_status(record, today));
    }
    stored
}

/// In-memory store: the default when no endpoint is configured, and the
/// workhorse of the integration tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<(String, ExamRecord)>>,
    recipients: Vec<Recipient>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipients(recipients: Vec<Recipient>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            recipients,
        }
    }

    /// Snapshot of the stored records, in insertion order.
    pub fn records(&self) -> Vec<ExamRecord> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ExamStore for MemoryStore {
    async fn upsert(&self, record: &ExamRecord) -> Result<UpsertOutcome, CrawlError> {
        let stored = with_status(record, chrono::Local::now().date_naive());
        let key = record.natural_key();
        let mut rows = self.rows.lock().unwrap();

        if let Some((id, existing)) = rows.iter_mut().find(|(_, r)| r.natural_key() == key) {
            *existing = stored;
            return Ok(UpsertOutcome {
                is_new: false,
                id: id.clone(),
            });
        }

        let id = format!("exam-{}", rows.len() + 1);
        rows.push((id.clone(), stored));
        Ok(UpsertOutcome { is_new: true, id })
    }

    async fn recipients(&self) -> Result<Vec<Recipient>, CrawlError> {
        Ok(self.recipients.clone())
    }
}

/// Store backed by a PostgREST-compatible endpoint (exams + profiles tables),
/// authenticated with a service key that bypasses row-level security.
pub struct RestStore {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    id: serde_json::Value,
}

impl RestStore {
    pub fn new(endpoint: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Existing row id for the record's natural key, if any. `ilike` without
    /// wildcards gives the case-insensitive equality match the key demands.
    async fn existing_id(&self, record: &ExamRecord) -> Result<Option<String>, CrawlError> {
        let url = format!("{}/exams", self.endpoint);
        let response = self
            .authed(self.client.get(&url).query(&[
                ("select", "id".to_string()),
                ("exam_name", format!("ilike.{}", record.exam_name)),
                ("organization", format!("ilike.{}", record.organization)),
                ("limit", "1".to_string()),
            ]))
            .send()
            .await
            .map_err(|e| CrawlError::storage("Lookup", Some(anyhow::anyhow!(e))))?;

        if !response.status().is_success() {
            return Err(CrawlError::storage(
                "Lookup",
                Some(anyhow::anyhow!("HTTP status {}", response.status().as_u16())),
            ));
        }

        let rows: Vec<IdRow> = response
            .json()
            .await
            .map_err(|e| CrawlError::storage("Lookup", Some(anyhow::anyhow!(e))))?;
        Ok(rows.into_iter().next().map(|row| id_string(&row.id)))
    }

    fn row_body(record: &ExamRecord) -> serde_json::Value {
        let stored = with_status(record, chrono::Local::now().date_naive());
        let mut body = serde_json::to_value(&stored).expect("record serializes");
        body["is_active"] = serde_json::Value::Bool(true);
        body
    }
}

#[async_trait]
impl ExamStore for RestStore {
    async fn upsert(&self, record: &ExamRecord) -> Result<UpsertOutcome, CrawlError> {
        let body = Self::row_body(record);
        let url = format!("{}/exams", self.endpoint);

        if let Some(id) = self.existing_id(record).await? {
            let response = self
                .authed(
                    self.client
                        .patch(&url)
                        .query(&[("id", format!("eq.{}", id))])
                        .json(&body),
                )
                .send()
                .await
                .map_err(|e| CrawlError::storage("Update", Some(anyhow::anyhow!(e))))?;
            if !response.status().is_success() {
                return Err(CrawlError::storage(
                    "Update",
                    Some(anyhow::anyhow!("HTTP status {}", response.status().as_u16())),
                ));
            }
            debug!(exam = %record.exam_name, %id, "updated existing exam");
            return Ok(UpsertOutcome { is_new: false, id });
        }

        let response = self
            .authed(
                self.client
                    .post(&url)
                    .header("Prefer", "return=representation")
                    .json(&body),
            )
            .send()
            .await
            .map_err(|e| CrawlError::storage("Insert", Some(anyhow::anyhow!(e))))?;
        if !response.status().is_success() {
            return Err(CrawlError::storage(
                "Insert",
                Some(anyhow::anyhow!("HTTP status {}", response.status().as_u16())),
            ));
        }

        let rows: Vec<IdRow> = response
            .json()
            .await
            .map_err(|e| CrawlError::storage("Insert", Some(anyhow::anyhow!(e))))?;
        let id = rows
            .into_iter()
            .next()
            .map(|row| id_string(&row.id))
            .unwrap_or_default();
        info!(exam = %record.exam_name, %id, "inserted new exam");
        Ok(UpsertOutcome { is_new: true, id })
    }

    async fn recipients(&self) -> Result<Vec<Recipient>, CrawlError> {
        let url = format!("{}/profiles", self.endpoint);
        let response = self
            .authed(self.client.get(&url).query(&[
                ("select", "email,full_name"),
                ("is_active", "eq.true"),
            ]))
            .send()
            .await
            .map_err(|e| CrawlError::storage("Recipients", Some(anyhow::anyhow!(e))))?;

        if !response.status().is_success() {
            return Err(CrawlError::storage(
                "Recipients",
                Some(anyhow::anyhow!("HTTP status {}", response.status().as_u16())),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| CrawlError::storage("Recipients", Some(anyhow::anyhow!(e))))
    }
}

/// Ids come back as strings or numbers depending on the schema; keep both.
fn id_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use examhub_extract::{ExamLevel, ExamRecord};
    use pretty_assertions::assert_eq;

    fn record(name: &str, last: Option<&str>, start: Option<&str>) -> ExamRecord {
        ExamRecord {
            exam_name: name.to_string(),
            organization: "Staff Selection Commission (SSC)".to_string(),
            level: ExamLevel::Central,
            state: None,
            description: String::new(),
            eligibility: String::new(),
            qualification: String::new(),
            age_limit: String::new(),
            application_start_date: start.map(|s| s.parse().unwrap()),
            application_last_date: last.map(|s| s.parse().unwrap()),
            exam_date: None,
            official_website: "https://ssc.nic.in".to_string(),
            notification_pdf: None,
            application_fee: String::new(),
            selection_process: String::new(),
            status: None,
        }
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn status_inference() {
        let today = day("2026-06-15");

        let closed = record("A", Some("2026-06-14"), None);
        assert_eq!(infer_status(&closed, today), ExamStatus::Closed);

        let coming = record("B", None, Some("2026-07-01"));
        assert_eq!(infer_status(&coming, today), ExamStatus::ComingSoon);

        let open = record("C", Some("2026-06-30"), Some("2026-06-01"));
        assert_eq!(infer_status(&open, today), ExamStatus::Open);

        // Boundary days are still Open.
        assert_eq!(
            infer_status(&record("D", Some("2026-06-15"), None), today),
            ExamStatus::Open
        );
        assert_eq!(
            infer_status(&record("E", None, Some("2026-06-15")), today),
            ExamStatus::Open
        );

        let dateless = record("F", None, None);
        assert_eq!(infer_status(&dateless, today), ExamStatus::Open);

        // A past deadline closes the exam even when the start is in the future.
        let odd = record("G", Some("2026-06-01"), Some("2026-07-01"));
        assert_eq!(infer_status(&odd, today), ExamStatus::Closed);
    }

    #[tokio::test]
    async fn memory_store_inserts_then_updates_by_natural_key() {
        let store = MemoryStore::new();

        let first = store.upsert(&record("SSC CGL 2026", None, None)).await.unwrap();
        assert!(first.is_new);

        // Same key, different case: must update, preserving the id.
        let second = store.upsert(&record("ssc cgl 2026", None, None)).await.unwrap();
        assert!(!second.is_new);
        assert_eq!(second.id, first.id);
        assert_eq!(store.len(), 1);

        let third = store.upsert(&record("SSC CHSL 2026", None, None)).await.unwrap();
        assert!(third.is_new);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn memory_store_fills_status_on_write() {
        let store = MemoryStore::new();
        store
            .upsert(&record("SSC CGL 2026", Some("2000-01-01"), None))
            .await
            .unwrap();
        assert_eq!(store.records()[0].status, Some(ExamStatus::Closed));
    }
}
