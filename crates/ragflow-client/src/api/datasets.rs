//! Datasets API.

use crate::client::RagflowClient;
use crate::error::{Error, Result};
use crate::types::{CreateDatasetRequest, Dataset, IdsRequest, UpdateDatasetRequest};

/// Query parameters for listing datasets.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ListDatasetsQuery {
    /// Only datasets with exactly this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// 1-based page number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    /// "create_time" or "update_time".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orderby: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<bool>,
}

/// Datasets API client.
pub struct DatasetsApi {
    client: RagflowClient,
}

impl DatasetsApi {
    pub(crate) fn new(client: RagflowClient) -> Self {
        Self { client }
    }

    /// Create a dataset.
    pub async fn create(&self, request: CreateDatasetRequest) -> Result<Dataset> {
        self.client.post("datasets", &request).await
    }

    /// List datasets.
    pub async fn list(&self, query: ListDatasetsQuery) -> Result<Vec<Dataset>> {
        self.client.get_with_query("datasets", &query).await
    }

    /// List datasets with a given name.
    pub async fn list_by_name(&self, name: &str) -> Result<Vec<Dataset>> {
        self.list(ListDatasetsQuery {
            name: Some(name.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Update a dataset. Only the fields set in `request` change.
    pub async fn update(&self, id: &str, request: UpdateDatasetRequest) -> Result<()> {
        self.client.put(&format!("datasets/{}", id), &request).await
    }

    /// Delete datasets by ID.
    ///
    /// The server reads an empty list as "all of them", so an empty
    /// `ids` is rejected before any request is sent.
    pub async fn delete(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::validation("no ids given"));
        }
        self.client.delete("datasets", &IdsRequest { ids }).await
    }
}
