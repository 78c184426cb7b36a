use crate::config::FirestoreSettings;
use crate::models::DailyRecord;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Firestore returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can hand over the whole record collection, oldest first.
#[async_trait::async_trait]
pub trait RecordSource: Send + Sync {
    fn describe(&self) -> String;

    async fn fetch_all(&self) -> Result<Vec<DailyRecord>, FetchError>;
}

#[derive(Debug)]
pub struct FirestoreSource {
    http: reqwest::Client,
    settings: FirestoreSettings,
}

impl FirestoreSource {
    pub fn new(settings: FirestoreSettings) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { http, settings })
    }

    fn url(&self) -> String {
        format!(
            "{}/projects/{}/databases/{}/documents:runQuery",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.project_id,
            self.settings.database_id
        )
    }
}

#[async_trait::async_trait]
impl RecordSource for FirestoreSource {
    fn describe(&self) -> String {
        format!(
            "firestore project={} collection={}",
            self.settings.project_id, self.settings.collection
        )
    }

    async fn fetch_all(&self) -> Result<Vec<DailyRecord>, FetchError> {
        let res = self
            .http
            .post(self.url())
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&run_query_body(&self.settings.collection))
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(FetchError::Status { status, body: text });
        }

        let records = decode_run_query(&text)?;
        debug!(count = records.len(), "fetched documents from firestore");
        Ok(records)
    }
}

/// Serves a JSON array of documents from disk.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl RecordSource for SnapshotSource {
    fn describe(&self) -> String {
        format!("snapshot file {}", self.path.display())
    }

    async fn fetch_all(&self) -> Result<Vec<DailyRecord>, FetchError> {
        let bytes = fs::read(&self.path).await.map_err(|source| FetchError::Read {
            path: self.path.clone(),
            source,
        })?;
        let rows: Vec<Value> = serde_json::from_slice(&bytes)?;
        let mut records: Vec<DailyRecord> = rows
            .iter()
            .enumerate()
            .filter_map(|(idx, row)| match row.as_object() {
                Some(fields) => Some(DailyRecord::from_fields(fields)),
                None => {
                    warn!(idx, "skipping snapshot entry that is not an object");
                    None
                }
            })
            .collect();
        records.sort_by(|a, b| a.date.cmp(&b.date));
        debug!(count = records.len(), "loaded documents from snapshot");
        Ok(records)
    }
}

pub fn run_query_body(collection: &str) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "orderBy": [{
                "field": { "fieldPath": "date" },
                "direction": "ASCENDING"
            }]
        }
    })
}

/// Decodes a `runQuery` response. Rows without a `document` (the bare
/// `readTime` row of an empty result) are dropped, and so are documents
/// whose `fields` are unusable, with a warning.
pub fn decode_run_query(body: &str) -> Result<Vec<DailyRecord>, FetchError> {
    let rows: Vec<Value> = serde_json::from_str(body)?;
    let records = rows
        .iter()
        .enumerate()
        .filter_map(|(idx, row)| {
            let document = row.get("document")?;
            let fields = match document.get("fields") {
                Some(Value::Object(fields)) => fields,
                None => return Some(DailyRecord::from_fields(&Map::new())),
                Some(_) => {
                    warn!(idx, "skipping firestore document with malformed fields");
                    return None;
                }
            };
            let plain: Map<String, Value> = fields
                .iter()
                .map(|(key, value)| (key.clone(), decode_value(value)))
                .collect();
            Some(DailyRecord::from_fields(&plain))
        })
        .collect();
    Ok(records)
}

/// Unwraps a Firestore typed value (`{"integerValue": "12"}`) into plain JSON.
pub fn decode_value(value: &Value) -> Value {
    let Some(typed) = value.as_object() else {
        return Value::Null;
    };
    let Some((kind, inner)) = typed.iter().next() else {
        return Value::Null;
    };

    match kind.as_str() {
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" | "booleanValue" => {
            inner.clone()
        }
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse::<i64>().ok())
            .map(Value::from)
            .or_else(|| inner.as_i64().map(Value::from))
            .unwrap_or(Value::Null),
        "doubleValue" => match inner {
            Value::Number(_) => inner.clone(),
            // NaN and Infinity arrive as strings and are gaps downstream.
            _ => Value::Null,
        },
        "mapValue" => {
            let fields = inner
                .get("fields")
                .and_then(Value::as_object)
                .map(|fields| {
                    fields
                        .iter()
                        .map(|(key, value)| (key.clone(), decode_value(value)))
                        .collect()
                })
                .unwrap_or_default();
            Value::Object(fields)
        }
        "arrayValue" => Value::Array(
            inner
                .get("values")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(decode_value).collect())
                .unwrap_or_default(),
        ),
        _ => Value::Null,
    }
}
