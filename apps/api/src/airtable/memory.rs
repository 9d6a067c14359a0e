//! In-memory `RecordStore` for tests. Returns canned rows per table and
//! records every query it receives; formulas are not evaluated.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{Record, RecordStore, SelectQuery, StoreError};

#[derive(Default)]
pub struct InMemoryStore {
    tables: HashMap<String, Vec<Record>>,
    failing: bool,
    queries: Mutex<Vec<(String, SelectQuery)>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every call fails with a 422, like a rejected formula.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn with_table(mut self, table: &str, records: Vec<Record>) -> Self {
        self.tables.insert(table.to_string(), records);
        self
    }

    pub fn queries(&self) -> Vec<(String, SelectQuery)> {
        self.queries.lock().unwrap().clone()
    }

    fn check_failing(&self) -> Result<(), StoreError> {
        if self.failing {
            return Err(StoreError::Api {
                status: 422,
                message: "INVALID_FILTER_BY_FORMULA".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn select_all(
        &self,
        table: &str,
        query: &SelectQuery,
    ) -> Result<Vec<Record>, StoreError> {
        self.queries
            .lock()
            .unwrap()
            .push((table.to_string(), query.clone()));
        self.check_failing()?;
        Ok(self.tables.get(table).cloned().unwrap_or_default())
    }

    async fn find(&self, table: &str, id: &str) -> Result<Record, StoreError> {
        self.check_failing()?;
        self.tables
            .get(table)
            .and_then(|rows| rows.iter().find(|r| r.id == id))
            .cloned()
            .ok_or_else(|| StoreError::Api {
                status: 404,
                message: "NOT_FOUND".to_string(),
            })
    }
}

/// Builds a record from a `json!({...})` object of fields.
pub fn record(id: &str, fields: Value) -> Record {
    match fields {
        Value::Object(map) => Record::new(id, map),
        _ => Record::new(id, Default::default()),
    }
}
