//! HTTP client for the SpendWallet spending service.
//!
//! Endpoints, matching the original service:
//! - `GET  /api/spendings?user_id&from&to` - flattened items for a range
//! - `POST /api/spendings/bulk` - append items to a day
//! - `PUT  /api/spendings/bulk` - replace a day's items

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::models::{BulkReceipt, BulkWriteIntent, LineItem, SpendingRecord, WriteMode};

use super::SpendingStore;

#[derive(Debug, Deserialize)]
struct ListResponse {
    items: Vec<SpendingRecord>,
}

#[derive(Debug, Serialize)]
struct BulkRequest<'a> {
    user_id: &'a str,
    items: &'a [LineItem],
    date: NaiveDate,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    saved: usize,
    daily: DailyRef,
}

#[derive(Debug, Deserialize)]
struct DailyRef {
    id: Option<String>,
    date: NaiveDate,
}

/// Spending store backed by the remote HTTP service.
#[derive(Debug, Clone)]
pub struct HttpSpendingStore {
    client: Client,
    base_url: String,
}

impl HttpSpendingStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.service_url.clone())
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }
}

#[async_trait::async_trait]
impl SpendingStore for HttpSpendingStore {
    async fn list_spendings(
        &self,
        user_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SpendingRecord>> {
        let url = format!("{}/api/spendings", self.base_url);
        tracing::debug!(%from, %to, "listing spendings");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("user_id", user_id.to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
            ])
            .send()
            .await
            .with_context(|| format!("Failed to reach spending service at {url}"))?
            .error_for_status()
            .context("Spending service rejected the list request")?
            .json::<ListResponse>()
            .await
            .context("Invalid list response from spending service")?;

        Ok(response.items)
    }

    async fn submit_bulk(&self, user_id: &str, intent: &BulkWriteIntent) -> Result<BulkReceipt> {
        let url = format!("{}/api/spendings/bulk", self.base_url);
        let body = BulkRequest {
            user_id,
            items: &intent.items,
            date: intent.date,
        };

        let request = match intent.mode {
            WriteMode::Append => self.client.post(&url),
            WriteMode::ReplaceDay => self.client.put(&url),
        };
        tracing::debug!(mode = ?intent.mode, date = %intent.date, items = intent.items.len(), "submitting bulk write");

        let response = request
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to reach spending service at {url}"))?
            .error_for_status()
            .context("Spending service rejected the bulk write")?
            .json::<BulkResponse>()
            .await
            .context("Invalid bulk response from spending service")?;

        Ok(BulkReceipt {
            saved: response.saved,
            daily_id: response.daily.id,
            date: response.daily.date,
        })
    }
}
