//! Record storage
//!
//! The admin reads and writes records as JSON objects through a
//! [`Repository`]. Persistence itself is up to the application;
//! [`InMemoryRepository`] backs demos and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};

use crate::display::column::row_key;
use crate::error::AdminError;

/// Record source of one model
#[async_trait]
pub trait Repository: Send + Sync {
    /// Every record, in storage order
    async fn all(&self) -> Result<Vec<Value>, AdminError>;

    /// The record with key `id`
    async fn find(&self, id: &str) -> Result<Option<Value>, AdminError>;

    /// Store a new record and return it with its key
    async fn create(&self, attributes: Map<String, Value>) -> Result<Value, AdminError>;

    /// Merge `attributes` into record `id` and return the result
    ///
    /// Fails with [`AdminError::RecordNotFound`] if there is no such record.
    async fn update(&self, id: &str, attributes: Map<String, Value>) -> Result<Value, AdminError>;

    /// Remove record `id`, returning whether it existed
    async fn delete(&self, id: &str) -> Result<bool, AdminError>;
}

/// Repository keeping records in memory
#[derive(Debug)]
pub struct InMemoryRepository {
    key_name: String,
    records: RwLock<Vec<Value>>,
    next_id: AtomicU64,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new("id")
    }
}

impl InMemoryRepository {
    /// Empty repository keyed by `key_name`
    pub fn new(key_name: impl Into<String>) -> Self {
        Self {
            key_name: key_name.into(),
            records: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seed with records; new keys continue after the highest numeric key
    #[must_use]
    pub fn with_records<I>(self, records: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        {
            let mut stored = self.records.write();
            stored.extend(records);

            let highest = stored
                .iter()
                .filter_map(|row| row.get(&self.key_name).and_then(Value::as_u64))
                .max()
                .unwrap_or(0);
            self.next_id.store(highest + 1, Ordering::SeqCst);
        }
        self
    }

    fn position(records: &[Value], key_name: &str, id: &str) -> Option<usize> {
        records
            .iter()
            .position(|row| row_key(row, key_name).as_deref() == Some(id))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn all(&self) -> Result<Vec<Value>, AdminError> {
        Ok(self.records.read().clone())
    }

    async fn find(&self, id: &str) -> Result<Option<Value>, AdminError> {
        let records = self.records.read();
        Ok(Self::position(&records, &self.key_name, id).map(|i| records[i].clone()))
    }

    async fn create(&self, mut attributes: Map<String, Value>) -> Result<Value, AdminError> {
        if !attributes.contains_key(&self.key_name) {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst);
            attributes.insert(self.key_name.clone(), Value::from(id));
        }

        let record = Value::Object(attributes);
        self.records.write().push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: &str, attributes: Map<String, Value>) -> Result<Value, AdminError> {
        let mut records = self.records.write();
        let index = Self::position(&records, &self.key_name, id)
            .ok_or_else(|| AdminError::RecordNotFound(id.to_string()))?;

        let Value::Object(record) = &mut records[index] else {
            return Err(AdminError::Repository(format!("record [{id}] is not an object")));
        };
        for (key, value) in attributes {
            if key != self.key_name {
                record.insert(key, value);
            }
        }

        Ok(records[index].clone())
    }

    async fn delete(&self, id: &str) -> Result<bool, AdminError> {
        let mut records = self.records.write();
        Ok(Self::position(&records, &self.key_name, id)
            .map(|index| records.remove(index))
            .is_some())
    }
}
