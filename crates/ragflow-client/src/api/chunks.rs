//! Chunks API.

use crate::client::RagflowClient;
use crate::error::{Error, Result};
use crate::types::{
    AddChunkRequest, AddChunkResponse, Chunk, ChunkIdsRequest, ChunkList, UpdateChunkRequest,
};

/// Query parameters for listing chunks.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ListChunksQuery {
    /// Full-text filter on chunk content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Fetch a single chunk by ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

/// Chunks API client, scoped to one document.
pub struct ChunksApi {
    client: RagflowClient,
    dataset_id: String,
    document_id: String,
}

impl ChunksApi {
    pub(crate) fn new(client: RagflowClient, dataset_id: String, document_id: String) -> Self {
        Self {
            client,
            dataset_id,
            document_id,
        }
    }

    fn path(&self) -> String {
        format!(
            "datasets/{}/documents/{}/chunks",
            self.dataset_id, self.document_id
        )
    }

    /// List chunks of the document.
    pub async fn list(&self, query: ListChunksQuery) -> Result<ChunkList> {
        self.client.get_with_query(&self.path(), &query).await
    }

    /// List chunks matching keywords.
    pub async fn search(&self, keywords: &str) -> Result<ChunkList> {
        self.list(ListChunksQuery {
            keywords: Some(keywords.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Add a chunk by hand.
    pub async fn add(&self, request: AddChunkRequest) -> Result<Chunk> {
        let response: AddChunkResponse = self.client.post(&self.path(), &request).await?;
        Ok(response.chunk)
    }

    /// Update a chunk.
    pub async fn update(&self, chunk_id: &str, request: UpdateChunkRequest) -> Result<()> {
        self.client
            .put(&format!("{}/{}", self.path(), chunk_id), &request)
            .await
    }

    /// Delete chunks by ID. An empty list is rejected without a request.
    pub async fn delete(&self, chunk_ids: &[String]) -> Result<()> {
        if chunk_ids.is_empty() {
            return Err(Error::validation("no ids given"));
        }
        self.client
            .delete(&self.path(), &ChunkIdsRequest { chunk_ids })
            .await
    }
}
