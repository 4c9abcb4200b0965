//! Hosted message store.
//!
//! The `MessageStore` trait abstracts the remote `messages` table;
//! `SupabaseStore` talks to it through the Supabase (PostgREST) REST API.
//! Records are immutable once written: the store exposes insert and select
//! only, no update or delete.

use async_trait::async_trait;
use tracing::debug;

use crate::config::StoreConfig;
use crate::error::{Result, SmsRelayError};
use crate::models::{MessageRecord, NewMessageRecord};

/// A remote table of message records
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Insert one record and return the rows the store reports as written.
    ///
    /// An empty row set signals a silent write failure and is reconciled by
    /// the caller. Failures map to [`SmsRelayError::StoreWrite`].
    async fn insert_message(&self, record: NewMessageRecord) -> Result<Vec<MessageRecord>>;

    /// Fetch all records, unbounded, in store-default order.
    ///
    /// Failures map to [`SmsRelayError::StoreRead`].
    async fn list_messages(&self) -> Result<Vec<MessageRecord>>;
}

/// Supabase implementation of [`MessageStore`]
pub struct SupabaseStore {
    client: reqwest::Client,
    base_url: String,
    key: String,
    table: String,
}

impl SupabaseStore {
    /// Create a store client from configured credentials.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            key: config.key.clone(),
            table: config.table.clone(),
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl MessageStore for SupabaseStore {
    async fn insert_message(&self, record: NewMessageRecord) -> Result<Vec<MessageRecord>> {
        debug!(table = %self.table, "Inserting message record");

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            // Without this header PostgREST returns no body on insert
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await
            .map_err(|e| SmsRelayError::StoreWrite(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SmsRelayError::StoreWrite(format!(
                "insert failed with status {status}: {text}"
            )));
        }

        response
            .json::<Vec<MessageRecord>>()
            .await
            .map_err(|e| SmsRelayError::StoreWrite(e.to_string()))
    }

    async fn list_messages(&self) -> Result<Vec<MessageRecord>> {
        debug!(table = %self.table, "Fetching all message records");

        let response = self
            .client
            .get(format!("{}?select=*", self.table_url()))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .await
            .map_err(|e| SmsRelayError::StoreRead(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SmsRelayError::StoreRead(format!(
                "select failed with status {status}: {text}"
            )));
        }

        response
            .json::<Vec<MessageRecord>>()
            .await
            .map_err(|e| SmsRelayError::StoreRead(e.to_string()))
    }
}
