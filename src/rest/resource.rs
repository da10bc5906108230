//! REST Resource trait for CRUD and batch operations.
//!
//! Resources that implement [`RestResource`] gain `find()`, `all()`,
//! `create()`, `update()`, `patch()`, `delete()` and `batch()`.
//!
//! # Implementing a Resource
//!
//! 1. Define a struct with serde derives
//! 2. Implement `RestResource` with its name and path table
//! 3. Nested resources override [`RestResource::parent_ids`] and
//!    [`RestResource::set_parent_id`]
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_api::rest::{RestResource, ResourcePath, ResourceOperation};
//! use storefront_api::HttpMethod;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize)]
//! pub struct Coupon {
//!     #[serde(skip_serializing_if = "Option::is_none")]
//!     pub id: Option<u64>,
//!     pub code: String,
//! }
//!
//! impl RestResource for Coupon {
//!     type Id = u64;
//!     type FindParams = ();
//!
//!     const NAME: &'static str = "Coupon";
//!     const PLURAL: &'static str = "coupons";
//!     const PATHS: &'static [ResourcePath] = &[
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "coupons/{id}"),
//!         ResourcePath::new(HttpMethod::Get, ResourceOperation::All, &[], "coupons"),
//!     ];
//!
//!     fn get_id(&self) -> Option<Self::Id> {
//!         self.id
//!     }
//! }
//!
//! let coupon = Coupon::find(&client, 719, None).await?;
//! let page = Coupon::all(&client, &PageQuery::new()).await?;
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::{
    build_path, fetch_paginated, get_path, BatchRequest, BatchResult, PageQuery,
    PaginatedResult, ResourceError, ResourceOperation, ResourcePath, ResourceResponse,
};

/// A REST resource with standard CRUD and batch operations.
///
/// All operations are provided; implementors only declare the name, the
/// path table and how to read the id.
#[allow(async_fn_in_trait)]
pub trait RestResource: Serialize + DeserializeOwned + Clone + Send + Sync + Sized {
    /// The id type (usually `u64`).
    type Id: Display + Serialize + Clone + Send + Sync;

    /// Extra query parameters for `find`.
    type FindParams: Serialize + Default + Send + Sync;

    /// Singular type name, used in errors and logs.
    const NAME: &'static str;

    /// Collection name (e.g., "products").
    const PLURAL: &'static str;

    /// Path templates for every supported operation.
    const PATHS: &'static [ResourcePath];

    /// Returns the id, or `None` for a resource not yet created.
    fn get_id(&self) -> Option<Self::Id>;

    /// Returns the parent ids this instance is nested under.
    fn parent_ids(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// Records a parent id on an instance fetched through a nested path.
    fn set_parent_id(&mut self, _name: &str, _value: &str) {}

    /// Resolves and fills the path template for `operation`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if no template
    /// matches the given ids.
    fn resolve_path(
        operation: ResourceOperation,
        ids: &HashMap<&str, String>,
    ) -> Result<String, ResourceError> {
        let available_ids: Vec<&str> = ids.keys().copied().collect();
        let path = get_path(Self::PATHS, operation, &available_ids).ok_or(
            ResourceError::PathResolutionFailed {
                resource: Self::NAME,
                operation: operation.as_str(),
            },
        )?;
        Ok(build_path(path.template, ids))
    }

    /// Finds a single resource by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the path cannot be resolved, the request
    /// fails, or the body does not match the resource.
    async fn find(
        client: &RestClient,
        id: Self::Id,
        params: Option<Self::FindParams>,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        let mut ids: HashMap<&str, String> = HashMap::new();
        ids.insert("id", id.to_string());
        find_at::<Self>(client, &ids, params).await
    }

    /// Finds a single nested resource by parent id and id.
    ///
    /// # Errors
    ///
    /// Same as [`RestResource::find`].
    async fn find_with_parent<ParentId: Display + Send>(
        client: &RestClient,
        parent_id_name: &str,
        parent_id: ParentId,
        id: Self::Id,
        params: Option<Self::FindParams>,
    ) -> Result<ResourceResponse<Self>, ResourceError> {
        let parent_id = parent_id.to_string();
        let mut ids: HashMap<&str, String> = HashMap::new();
        ids.insert(parent_id_name, parent_id.clone());
        ids.insert("id", id.to_string());

        let mut response = find_at::<Self>(client, &ids, params).await?;
        response.set_parent_id(parent_id_name, &parent_id);
        Ok(response)
    }

    /// Lists one page of resources.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the request fails or the items do not
    /// match the resource.
    async fn all(
        client: &RestClient,
        query: &PageQuery,
    ) -> Result<PaginatedResult<Self>, ResourceError> {
        let path = Self::resolve_path(ResourceOperation::All, &HashMap::new())?;
        fetch_paginated(client, &path, query, Self::NAME).await
    }

    /// Lists one page of resources nested under a parent.
    ///
    /// # Errors
    ///
    /// Same as [`RestResource::all`].
    async fn all_with_parent<ParentId: Display + Send>(
        client: &RestClient,
        parent_id_name: &str,
        parent_id: ParentId,
        query: &PageQuery,
    ) -> Result<PaginatedResult<Self>, ResourceError> {
        let parent_id = parent_id.to_string();
        let mut ids: HashMap<&str, String> = HashMap::new();
        ids.insert(parent_id_name, parent_id.clone());

        let path = Self::resolve_path(ResourceOperation::All, &ids)?;
        let mut page: PaginatedResult<Self> =
            fetch_paginated(client, &path, query, Self::NAME).await?;
        for item in &mut page.items {
            item.set_parent_id(parent_id_name, &parent_id);
        }
        Ok(page)
    }

    /// Creates this resource (POST) and returns the stored version.
    ///
    /// Sent with a single try: a create that timed out may already be
    /// stored, and retrying it would duplicate the record.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the path cannot be resolved, the
    /// resource cannot be serialized, or the request fails.
    async fn create(&self, client: &RestClient) -> Result<Self, ResourceError> {
        let ids = instance_ids(self, false);
        let path = Self::resolve_path(ResourceOperation::Create, &ids)?;
        let body = to_body::<Self>(self)?;

        let response = client.post_with_tries(&path, body, None, 1).await?;
        let created = ResourceResponse::<Self>::from_http_response(response, Self::NAME)?;
        Ok(with_parents(created.into_inner(), &ids))
    }

    /// Replaces this resource (PUT) and returns the stored version.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has
    /// no id, or any other [`ResourceError`] from the request.
    async fn update(&self, client: &RestClient) -> Result<Self, ResourceError> {
        let ids = instance_ids(self, true);
        let path = Self::resolve_path(ResourceOperation::Update, &ids)?;
        let body = to_body::<Self>(self)?;

        let response = client.put(&path, body, None).await?;
        let updated = ResourceResponse::<Self>::from_http_response(response, Self::NAME)?;
        Ok(with_parents(updated.into_inner(), &ids))
    }

    /// Sends only `changes` (PATCH) and returns the stored version.
    ///
    /// # Errors
    ///
    /// Same as [`RestResource::update`].
    async fn patch(&self, client: &RestClient, changes: Value) -> Result<Self, ResourceError> {
        let ids = instance_ids(self, true);
        let path = Self::resolve_path(ResourceOperation::Patch, &ids)?;

        let response = client.patch(&path, changes, None).await?;
        let patched = ResourceResponse::<Self>::from_http_response(response, Self::NAME)?;
        Ok(with_parents(patched.into_inner(), &ids))
    }

    /// Deletes this resource. With `force`, it is removed permanently
    /// instead of moved to the trash.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the resource has
    /// no id, or any other [`ResourceError`] from the request.
    async fn delete(&self, client: &RestClient, force: bool) -> Result<(), ResourceError> {
        let ids = instance_ids(self, true);
        let path = Self::resolve_path(ResourceOperation::Delete, &ids)?;

        let query = force.then(|| {
            let mut query = BTreeMap::new();
            query.insert("force".to_string(), "true".to_string());
            query
        });

        client.delete(&path, query).await?;
        Ok(())
    }

    /// Submits creates, updates and deletes in one call.
    ///
    /// `parent` is required for nested collections, e.g.
    /// `Some(("product_id", "10".to_string()))` for variations.
    ///
    /// Like [`RestResource::create`], a batch is sent with a single try.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnsupportedOperation`] on API versions
    /// without batch endpoints, or any [`ResourceError`] for the call as a
    /// whole. Failures of individual entries are reported in the
    /// [`BatchResult`].
    async fn batch(
        client: &RestClient,
        parent: Option<(&str, String)>,
        request: &BatchRequest<Self, Self::Id>,
    ) -> Result<BatchResult<Self>, ResourceError> {
        if !client.api_version().supports_batch() {
            return Err(ResourceError::UnsupportedOperation {
                resource: Self::NAME,
                operation: ResourceOperation::Batch.as_str(),
                version: client.api_version(),
            });
        }

        let mut ids: HashMap<&str, String> = HashMap::new();
        if let Some((name, value)) = parent {
            ids.insert(name, value);
        }
        let path = Self::resolve_path(ResourceOperation::Batch, &ids)?;
        let body = serde_json::to_value(request).map_err(|source| ResourceError::Serialize {
            resource: Self::NAME,
            source,
        })?;

        let response = client.post_with_tries(&path, body, None, 1).await?;
        let result = BatchResult::from_value(&response.body);

        let failed = result.failures().count();
        if failed > 0 {
            tracing::warn!(
                resource = Self::NAME,
                submitted = request.len(),
                failed,
                "Batch completed with failed entries"
            );
        }

        Ok(result)
    }
}

async fn find_at<R: RestResource>(
    client: &RestClient,
    ids: &HashMap<&str, String>,
    params: Option<R::FindParams>,
) -> Result<ResourceResponse<R>, ResourceError> {
    let path = R::resolve_path(ResourceOperation::Find, ids)?;
    let query = params
        .map(|p| serialize_to_query::<R, _>(&p))
        .transpose()?
        .filter(|q| !q.is_empty());

    let response = client.get(&path, query).await?;
    ResourceResponse::from_http_response(response, R::NAME)
}

fn instance_ids<R: RestResource>(resource: &R, with_id: bool) -> HashMap<&'static str, String> {
    let mut ids: HashMap<&'static str, String> = resource.parent_ids().into_iter().collect();
    if with_id {
        if let Some(id) = resource.get_id() {
            ids.insert("id", id.to_string());
        }
    }
    ids
}

fn with_parents<R: RestResource>(mut resource: R, ids: &HashMap<&'static str, String>) -> R {
    for (name, value) in ids.iter().filter(|(name, _)| **name != "id") {
        resource.set_parent_id(name, value);
    }
    resource
}

fn to_body<R: RestResource>(resource: &R) -> Result<Value, ResourceError> {
    serde_json::to_value(resource).map_err(|source| ResourceError::Serialize {
        resource: R::NAME,
        source,
    })
}

/// Flattens serializable parameters into query pairs.
///
/// Nulls are skipped and arrays become comma-separated lists.
fn serialize_to_query<R: RestResource, P: Serialize>(
    params: &P,
) -> Result<BTreeMap<String, String>, ResourceError> {
    let value = serde_json::to_value(params).map_err(|source| ResourceError::Serialize {
        resource: R::NAME,
        source,
    })?;

    let mut query = BTreeMap::new();

    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::Null => {}
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Array(arr) => {
                    let values: Vec<String> = arr
                        .iter()
                        .filter_map(|v| match v {
                            Value::String(s) => Some(s.clone()),
                            Value::Number(n) => Some(n.to_string()),
                            _ => None,
                        })
                        .collect();
                    if !values.is_empty() {
                        query.insert(key, values.join(","));
                    }
                }
                Value::Object(_) => {
                    query.insert(key, val.to_string());
                }
            }
        }
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HttpMethod;
    use serde::Deserialize;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct MockVariation {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<u64>,
        sku: String,
        #[serde(skip)]
        product_id: Option<u64>,
    }

    #[derive(Debug, Default, Serialize)]
    struct MockFindParams {
        #[serde(skip_serializing_if = "Option::is_none")]
        context: Option<String>,
        include: Vec<u64>,
    }

    impl RestResource for MockVariation {
        type Id = u64;
        type FindParams = MockFindParams;

        const NAME: &'static str = "MockVariation";
        const PLURAL: &'static str = "variations";
        const PATHS: &'static [ResourcePath] = &[
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::Find,
                &["product_id", "id"],
                "products/{product_id}/variations/{id}",
            ),
            ResourcePath::new(
                HttpMethod::Get,
                ResourceOperation::All,
                &["product_id"],
                "products/{product_id}/variations",
            ),
            ResourcePath::new(
                HttpMethod::Put,
                ResourceOperation::Update,
                &["product_id", "id"],
                "products/{product_id}/variations/{id}",
            ),
        ];

        fn get_id(&self) -> Option<Self::Id> {
            self.id
        }

        fn parent_ids(&self) -> Vec<(&'static str, String)> {
            self.product_id
                .map(|id| vec![("product_id", id.to_string())])
                .unwrap_or_default()
        }

        fn set_parent_id(&mut self, name: &str, value: &str) {
            if name == "product_id" {
                self.product_id = value.parse().ok();
            }
        }
    }

    #[test]
    fn test_resolve_path_requires_parent() {
        let mut ids = HashMap::new();
        ids.insert("id", "11".to_string());

        let result = MockVariation::resolve_path(ResourceOperation::Find, &ids);
        assert!(matches!(
            result,
            Err(ResourceError::PathResolutionFailed {
                resource: "MockVariation",
                operation: "find"
            })
        ));

        ids.insert("product_id", "10".to_string());
        assert_eq!(
            MockVariation::resolve_path(ResourceOperation::Find, &ids).unwrap(),
            "products/10/variations/11"
        );
    }

    #[test]
    fn test_instance_ids_include_parent_and_id() {
        let variation = MockVariation {
            id: Some(11),
            sku: "SHIRT-RED-M".to_string(),
            product_id: Some(10),
        };

        let ids = instance_ids(&variation, true);
        assert_eq!(ids.get("id").map(String::as_str), Some("11"));
        assert_eq!(ids.get("product_id").map(String::as_str), Some("10"));
        assert!(!instance_ids(&variation, false).contains_key("id"));
    }

    #[test]
    fn test_with_parents_restores_skipped_field() {
        let mut ids = HashMap::new();
        ids.insert("product_id", "10".to_string());
        ids.insert("id", "11".to_string());

        let stored = MockVariation {
            id: Some(11),
            sku: "SHIRT-RED-M".to_string(),
            product_id: None,
        };
        assert_eq!(with_parents(stored, &ids).product_id, Some(10));
    }

    #[test]
    fn test_serialize_to_query_flattens_values() {
        let params = MockFindParams {
            context: Some("view".to_string()),
            include: vec![1, 2, 3],
        };
        let query = serialize_to_query::<MockVariation, _>(&params).unwrap();

        assert_eq!(query.get("context").map(String::as_str), Some("view"));
        assert_eq!(query.get("include").map(String::as_str), Some("1,2,3"));
    }

    #[test]
    fn test_serialize_to_query_skips_nulls_and_empty_lists() {
        let query = serialize_to_query::<MockVariation, _>(&MockFindParams::default()).unwrap();
        assert!(query.is_empty());
    }
}
