use futures::stream::{self, Stream, TryStreamExt};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::record::{Record, Table};
use crate::config::RecordsConfig;

#[derive(Debug, Error)]
pub enum RecordsError {
    #[error("{0}")]
    NotFound(String),

    #[error("records API transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("records API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Thin client over the store's REST API. Requests are authenticated with the
/// store's own bearer key; failures are surfaced, never retried.
#[derive(Debug, Clone)]
pub struct RecordsClient {
    http: reqwest::Client,
    api_url: String,
    base_id: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RecordPage {
    #[serde(default)]
    records: Vec<Record>,
    /// Continuation token; absent on the final page.
    offset: Option<String>,
}

impl RecordsClient {
    pub fn new(config: &RecordsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            base_id: config.base_id.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn table_url(&self, table: Table) -> String {
        format!("{}/{}/{}", self.api_url, self.base_id, table.as_str())
    }

    fn record_url(&self, table: Table, id: &str) -> String {
        format!("{}/{}", self.table_url(table), id)
    }

    /// Start a listing query against `table`. The result is paginated by the
    /// store; see [`SelectQuery::pages`] and [`SelectQuery::all`].
    pub fn select(&self, table: Table) -> SelectQuery {
        SelectQuery { client: self.clone(), table, sort_desc: None }
    }

    pub async fn find(&self, table: Table, id: &str) -> Result<Record, RecordsError> {
        let res = self
            .http
            .get(self.record_url(table, id))
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        // Only a record-by-id lookup treats 404 as "no such record"; a 404
        // anywhere else means a misconfigured base and stays an API failure.
        if res.status() == StatusCode::NOT_FOUND {
            return Err(RecordsError::NotFound(format!("{} record {}", table.as_str(), id)));
        }
        let res = check_status(res).await?;
        Ok(res.json().await?)
    }

    pub async fn create(
        &self,
        table: Table,
        fields: Map<String, Value>,
    ) -> Result<Record, RecordsError> {
        let res = self
            .http
            .post(self.table_url(table))
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        let res = check_status(res).await?;
        Ok(res.json().await?)
    }

    /// Replace the named fields of an existing record; fields not named are
    /// left untouched by the store.
    pub async fn update(
        &self,
        table: Table,
        id: &str,
        fields: Map<String, Value>,
    ) -> Result<Record, RecordsError> {
        let res = self
            .http
            .patch(self.record_url(table, id))
            .bearer_auth(&self.api_key)
            .json(&json!({ "fields": fields }))
            .send()
            .await?;
        let res = check_status(res).await?;
        Ok(res.json().await?)
    }
}

async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, RecordsError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(RecordsError::Api { status: status.as_u16(), body })
}

/// A listing query. `pages()` yields the store's pages lazily, following its
/// `offset` continuation token; the sequence is finite and not restartable.
#[derive(Debug, Clone)]
pub struct SelectQuery {
    client: RecordsClient,
    table: Table,
    sort_desc: Option<String>,
}

impl SelectQuery {
    /// Sort results by `field`, descending.
    pub fn sort_desc(mut self, field: &str) -> Self {
        self.sort_desc = Some(field.to_string());
        self
    }

    async fn fetch_page(&self, offset: Option<&str>) -> Result<RecordPage, RecordsError> {
        let mut req = self
            .client
            .http
            .get(self.client.table_url(self.table))
            .bearer_auth(&self.client.api_key);
        if let Some(field) = &self.sort_desc {
            req = req.query(&[("sort[0][field]", field.as_str()), ("sort[0][direction]", "desc")]);
        }
        if let Some(offset) = offset {
            req = req.query(&[("offset", offset)]);
        }
        let res = req.send().await?;
        let res = check_status(res).await?;
        Ok(res.json().await?)
    }

    pub fn pages(self) -> impl Stream<Item = Result<Vec<Record>, RecordsError>> {
        stream::try_unfold((self, Some(None::<String>)), |(query, cursor)| async move {
            let Some(offset) = cursor else {
                return Ok(None);
            };
            let page = query.fetch_page(offset.as_deref()).await?;
            // Some(token) while the store has more pages, then None.
            let next = page.offset.map(Some);
            Ok(Some((page.records, (query, next))))
        })
    }

    /// Drain every page into one vector.
    pub async fn all(self) -> Result<Vec<Record>, RecordsError> {
        let pages = self.pages();
        futures::pin_mut!(pages);
        let mut records = Vec::new();
        while let Some(page) = pages.try_next().await? {
            records.extend(page);
        }
        Ok(records)
    }
}
