//! Batch create/update/delete.
//!
//! The upstream batch endpoint (`{collection}/batch`) accepts
//! `{ "create": [...], "update": [...], "delete": [ids] }` and answers with
//! the same three lists. Each entry is either the resulting resource or an
//! object with an `error` member. The operation is not atomic: any entry in
//! any list can fail while the others succeed, so every entry is reported as
//! its own `Result`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Items to submit in one batch call.
///
/// ```rust
/// use storefront_api::rest::BatchRequest;
///
/// let request: BatchRequest<serde_json::Value, u64> = BatchRequest::new()
///     .create(serde_json::json!({"name": "Linen Shirt"}))
///     .delete(42);
/// assert!(!request.is_empty());
/// assert_eq!(request.len(), 2);
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct BatchRequest<T, Id> {
    /// Resources to create.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub create: Vec<T>,
    /// Resources to update (each must carry its id).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update: Vec<T>,
    /// Ids to delete.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub delete: Vec<Id>,
}

impl<T, Id> Default for BatchRequest<T, Id> {
    fn default() -> Self {
        Self {
            create: Vec::new(),
            update: Vec::new(),
            delete: Vec::new(),
        }
    }
}

impl<T, Id> BatchRequest<T, Id> {
    /// Creates an empty batch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource to create.
    #[must_use]
    pub fn create(mut self, item: T) -> Self {
        self.create.push(item);
        self
    }

    /// Adds a resource to update.
    #[must_use]
    pub fn update(mut self, item: T) -> Self {
        self.update.push(item);
        self
    }

    /// Adds an id to delete.
    #[must_use]
    pub fn delete(mut self, id: Id) -> Self {
        self.delete.push(id);
        self
    }

    /// Total number of entries across the three lists.
    #[must_use]
    pub fn len(&self) -> usize {
        self.create.len() + self.update.len() + self.delete.len()
    }

    /// Returns `true` if there is nothing to submit.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Failure of a single batch entry.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("batch item {} failed ({code}): {message}", id_label(.id))]
pub struct BatchItemError {
    /// The id of the entry, when the upstream reports it.
    pub id: Option<u64>,
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// HTTP status the upstream would have used for this entry.
    pub status: Option<u16>,
}

fn id_label(id: &Option<u64>) -> String {
    id.map_or_else(|| "(new)".to_string(), |id| id.to_string())
}

#[derive(Deserialize)]
struct ItemErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<ItemErrorData>,
}

#[derive(Deserialize)]
struct ItemErrorData {
    #[serde(default)]
    status: Option<u16>,
}

/// Per-entry outcomes of a batch call, in request order.
#[derive(Clone, Debug)]
pub struct BatchResult<T> {
    /// Outcomes of the `create` list.
    pub create: Vec<Result<T, BatchItemError>>,
    /// Outcomes of the `update` list.
    pub update: Vec<Result<T, BatchItemError>>,
    /// Outcomes of the `delete` list.
    pub delete: Vec<Result<T, BatchItemError>>,
}

impl<T> BatchResult<T> {
    /// Returns `true` if every entry in every list succeeded.
    #[must_use]
    pub fn all_succeeded(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Iterates over all failed entries.
    pub fn failures(&self) -> impl Iterator<Item = &BatchItemError> {
        self.create
            .iter()
            .chain(&self.update)
            .chain(&self.delete)
            .filter_map(|outcome| outcome.as_ref().err())
    }
}

impl<T: DeserializeOwned> BatchResult<T> {
    /// Splits a batch response body into per-entry outcomes.
    ///
    /// A missing list is treated as empty. An entry that neither carries an
    /// `error` member nor deserializes into `T` is reported as a failed
    /// entry with code `invalid_item`, without affecting the others.
    #[must_use]
    pub fn from_value(body: &Value) -> Self {
        Self {
            create: parse_list(body.get("create")),
            update: parse_list(body.get("update")),
            delete: parse_list(body.get("delete")),
        }
    }
}

fn parse_list<T: DeserializeOwned>(list: Option<&Value>) -> Vec<Result<T, BatchItemError>> {
    list.and_then(Value::as_array)
        .map(|items| items.iter().map(parse_item).collect())
        .unwrap_or_default()
}

fn parse_item<T: DeserializeOwned>(item: &Value) -> Result<T, BatchItemError> {
    let id = item.get("id").and_then(Value::as_u64).filter(|id| *id != 0);

    if let Some(error) = item.get("error") {
        let body = ItemErrorBody::deserialize(error).ok();
        return Err(BatchItemError {
            id,
            code: body
                .as_ref()
                .and_then(|b| b.code.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            message: body
                .as_ref()
                .and_then(|b| b.message.clone())
                .unwrap_or_else(|| error.to_string()),
            status: body.and_then(|b| b.data).and_then(|d| d.status),
        });
    }

    T::deserialize(item).map_err(|e| BatchItemError {
        id,
        code: "invalid_item".to_string(),
        message: e.to_string(),
        status: None,
    })
}
