//! Airtable client — the single point of entry for all record-store calls.
//!
//! Services depend on the `RecordStore` trait, never on `AirtableClient`
//! directly, so the full-scan fetch can be swapped without touching callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Airtable API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid Airtable URL: {0}")]
    InvalidUrl(String),
}

/// A row as returned by the store: an opaque id plus loosely-typed fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Record {
    #[cfg(test)]
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Named-field accessor. Airtable omits empty cells, and an explicit
    /// `null` is treated the same way.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    #[cfg(test)]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            #[cfg(test)]
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub direction: SortDirection,
}

/// Parameters of a `list records` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    pub view: Option<String>,
    pub filter_by_formula: Option<String>,
    pub fields: Vec<String>,
    pub sort: Vec<Sort>,
}

impl SelectQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }

    pub fn filter_by_formula(mut self, formula: impl Into<String>) -> Self {
        self.filter_by_formula = Some(formula.into());
        self
    }

    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = fields.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort.push(Sort {
            field: field.into(),
            direction,
        });
        self
    }

    /// Encodes the query the way the Airtable REST API expects it in the URL.
    fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(view) = &self.view {
            params.push(("view".to_string(), view.clone()));
        }
        if let Some(formula) = &self.filter_by_formula {
            params.push(("filterByFormula".to_string(), formula.clone()));
        }
        for field in &self.fields {
            params.push(("fields[]".to_string(), field.clone()));
        }
        for (i, sort) in self.sort.iter().enumerate() {
            params.push((format!("sort[{i}][field]"), sort.field.clone()));
            params.push((
                format!("sort[{i}][direction]"),
                sort.direction.as_str().to_string(),
            ));
        }
        params
    }
}

/// Read access to a formula-queryable record store.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every record matching `query`, following the store's own
    /// paging until exhausted.
    async fn select_all(&self, table: &str, query: &SelectQuery)
        -> Result<Vec<Record>, StoreError>;

    async fn find(&self, table: &str, id: &str) -> Result<Record, StoreError>;
}

#[derive(Debug, Deserialize)]
struct ListRecordsResponse {
    records: Vec<Record>,
    offset: Option<String>,
}

#[derive(Clone)]
pub struct AirtableClient {
    client: Client,
    api_url: Url,
    base_id: String,
    api_key: String,
}

impl AirtableClient {
    pub fn new(
        api_url: &str,
        base_id: String,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let api_url = Url::parse(api_url).map_err(|e| StoreError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_url,
            base_id,
            api_key,
        })
    }

    /// `{api_url}/{base_id}/{segments...}`, each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(self.api_url.to_string()))?
            .pop_if_empty()
            .push(&self.base_id)
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        params: &[(String, String)],
    ) -> Result<T, StoreError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecordStore for AirtableClient {
    async fn select_all(
        &self,
        table: &str,
        query: &SelectQuery,
    ) -> Result<Vec<Record>, StoreError> {
        let url = self.endpoint(&[table])?;
        let base_params = query.to_params();

        let mut records = Vec::new();
        let mut offset: Option<String> = None;

        loop {
            let mut params = base_params.clone();
            if let Some(cursor) = &offset {
                params.push(("offset".to_string(), cursor.clone()));
            }

            let page: ListRecordsResponse = self.get_json(url.clone(), &params).await?;
            records.extend(page.records);

            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }

        debug!(
            "Airtable select on '{}' returned {} records",
            table,
            records.len()
        );
        Ok(records)
    }

    async fn find(&self, table: &str, id: &str) -> Result<Record, StoreError> {
        let url = self.endpoint(&[table, id])?;
        let record: Record = self.get_json(url, &[]).await?;
        debug!("Airtable find on '{}' returned record {}", table, record.id);
        Ok(record)
    }
}

/// Airtable reports errors either as `{"error": "NOT_FOUND"}` or as
/// `{"error": {"type": ..., "message": ...}}`. Falls back to the raw body.
fn api_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };
    match value.get("error") {
        Some(Value::String(kind)) => kind.clone(),
        Some(Value::Object(err)) => {
            let kind = err.get("type").and_then(Value::as_str);
            let message = err.get("message").and_then(Value::as_str);
            match (kind, message) {
                (Some(kind), Some(message)) => format!("{kind}: {message}"),
                (Some(only), None) | (None, Some(only)) => only.to_string(),
                (None, None) => body.to_string(),
            }
        }
        _ => body.to_string(),
    }
}
