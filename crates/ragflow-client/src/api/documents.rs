//! Documents API.

use std::path::Path;

use reqwest::multipart::{Form, Part};

use crate::client::RagflowClient;
use crate::error::{Error, Result};
use crate::types::{
    Document, DocumentIdsRequest, DocumentList, IdsRequest, UpdateDocumentRequest, UploadFile,
};

/// Query parameters for listing documents.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ListDocumentsQuery {
    /// Only documents with exactly this name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Substring match on the document name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orderby: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<bool>,
}

/// Documents API client, scoped to one dataset.
pub struct DocumentsApi {
    client: RagflowClient,
    dataset_id: String,
}

impl DocumentsApi {
    pub(crate) fn new(client: RagflowClient, dataset_id: String) -> Self {
        Self { client, dataset_id }
    }

    fn path(&self) -> String {
        format!("datasets/{}/documents", self.dataset_id)
    }

    /// Upload files as new documents.
    ///
    /// All files travel in one multipart request, one `file` part each; the
    /// server answers with one document per part.
    pub async fn upload(&self, files: Vec<UploadFile>) -> Result<Vec<Document>> {
        if files.is_empty() {
            return Err(Error::validation("no files to upload"));
        }

        let mut form = Form::new();
        for file in files {
            tracing::debug!(file = %file.file_name, size = file.bytes.len(), "adding upload part");
            form = form.part("file", Part::bytes(file.bytes).file_name(file.file_name));
        }
        self.client.post_multipart(&self.path(), form).await
    }

    /// Read files from disk and upload them.
    pub async fn upload_paths<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<Document>> {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            files.push(UploadFile::from_path(path).await?);
        }
        self.upload(files).await
    }

    /// List documents.
    pub async fn list(&self, query: ListDocumentsQuery) -> Result<DocumentList> {
        self.client.get_with_query(&self.path(), &query).await
    }

    /// List documents with a given name.
    pub async fn list_by_name(&self, name: &str) -> Result<DocumentList> {
        self.list(ListDocumentsQuery {
            name: Some(name.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Update a document's name or parsing settings.
    pub async fn update(&self, document_id: &str, request: UpdateDocumentRequest) -> Result<()> {
        self.client
            .put(&format!("{}/{}", self.path(), document_id), &request)
            .await
    }

    /// Download a document's original content.
    pub async fn download(&self, document_id: &str) -> Result<Vec<u8>> {
        self.client
            .get_bytes(&format!("{}/{}", self.path(), document_id))
            .await
    }

    /// Delete documents by ID. An empty list is rejected without a request.
    pub async fn delete(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::validation("no ids given"));
        }
        self.client.delete(&self.path(), &IdsRequest { ids }).await
    }

    /// Start parsing documents into chunks. Returns once parsing is queued.
    pub async fn parse(&self, document_ids: &[String]) -> Result<()> {
        self.client
            .post_unit(
                &format!("datasets/{}/chunks", self.dataset_id),
                &DocumentIdsRequest { document_ids },
            )
            .await
    }

    /// Cancel parsing of documents.
    pub async fn stop_parsing(&self, document_ids: &[String]) -> Result<()> {
        self.client
            .delete(
                &format!("datasets/{}/chunks", self.dataset_id),
                &DocumentIdsRequest { document_ids },
            )
            .await
    }
}
