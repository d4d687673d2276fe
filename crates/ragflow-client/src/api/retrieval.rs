//! Retrieval API.

use crate::client::RagflowClient;
use crate::error::{Error, Result};
use crate::types::{Chunk, Retrieval, RetrievalRequest};

/// Retrieval API client.
pub struct RetrievalApi {
    client: RagflowClient,
}

impl RetrievalApi {
    pub(crate) fn new(client: RagflowClient) -> Self {
        Self { client }
    }

    /// Run a retrieval query.
    ///
    /// An empty question is rejected with an argument error before any
    /// request is sent.
    pub async fn retrieve(&self, request: RetrievalRequest) -> Result<Retrieval> {
        if request.question.trim().is_empty() {
            return Err(Error::validation("`question` is required."));
        }
        self.client.post("retrieval", &request).await
    }

    /// Search datasets (optionally narrowed to documents) and return the
    /// ranked chunks.
    pub async fn retrieve_chunks(
        &self,
        question: impl Into<String>,
        dataset_ids: Vec<String>,
        document_ids: Vec<String>,
    ) -> Result<Vec<Chunk>> {
        let request = RetrievalRequest::new(question, dataset_ids).with_documents(document_ids);
        Ok(self.retrieve(request).await?.chunks)
    }
}
