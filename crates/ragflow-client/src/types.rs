//! Request and response types for the RAGFlow API.
//!
//! These types mirror the server's JSON contract. Unknown fields are ignored
//! and optional server fields fall back to their defaults, so a newer server
//! does not break an older client.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Envelope
// ─────────────────────────────────────────────────────────────────────────────

/// Wrapper around every JSON response: `{code, message, data}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Body for the bulk delete endpoints.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct IdsRequest<'a> {
    pub ids: &'a [String],
}

// ─────────────────────────────────────────────────────────────────────────────
// Datasets
// ─────────────────────────────────────────────────────────────────────────────

/// A named collection of documents used for retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_method: Option<String>,
    #[serde(default)]
    pub document_count: u64,
    #[serde(default)]
    pub chunk_count: u64,
    #[serde(default, alias = "token_num")]
    pub token_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_config: Option<serde_json::Value>,
    /// Creation time, milliseconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
}

/// Request to create a dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDatasetRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_config: Option<serde_json::Value>,
}

impl CreateDatasetRequest {
    /// Create a request with only a name; the server fills in defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the dataset language (e.g. "English").
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the embedding model (e.g. "BAAI/bge-large-zh-v1.5").
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = Some(model.into());
        self
    }

    /// Set the chunking method (e.g. "naive", "qa", "manual").
    pub fn with_chunk_method(mut self, method: impl Into<String>) -> Self {
        self.chunk_method = Some(method.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set who can see the dataset ("me" or "team").
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    pub fn with_parser_config(mut self, config: serde_json::Value) -> Self {
        self.parser_config = Some(config);
        self
    }
}

/// Partial update for a dataset. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDatasetRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_config: Option<serde_json::Value>,
}

impl UpdateDatasetRequest {
    /// True if no field would be sent.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.avatar.is_none()
            && self.description.is_none()
            && self.language.is_none()
            && self.embedding_model.is_none()
            && self.permission.is_none()
            && self.chunk_method.is_none()
            && self.parser_config.is_none()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Documents
// ─────────────────────────────────────────────────────────────────────────────

/// Parsing state of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunStatus {
    Unstart,
    Running,
    Cancel,
    Done,
    Fail,
    #[serde(other)]
    Unknown,
}

/// A document stored in a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default, alias = "kb_id")]
    pub dataset_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_method: Option<String>,
    #[serde(default)]
    pub chunk_count: u64,
    #[serde(default)]
    pub token_count: u64,
    #[serde(default)]
    pub size: u64,
    /// File type reported by the server ("pdf", "doc", ...).
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run: Option<RunStatus>,
    #[serde(default)]
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_fields: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
}

/// One page of documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentList {
    /// Total matching documents on the server, across all pages.
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub docs: Vec<Document>,
}

/// Partial update for a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDocumentRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parser_config: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_fields: Option<HashMap<String, serde_json::Value>>,
}

/// A file to upload into a dataset.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Name the document will get on the server.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk, naming the upload after the file's base name.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::Config(format!("'{}' has no file name", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await.map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { file_name, bytes })
    }
}

/// Body for the parse / stop-parsing endpoints.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct DocumentIdsRequest<'a> {
    pub document_ids: &'a [String],
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunks
// ─────────────────────────────────────────────────────────────────────────────

/// A segment of a document's text used as a retrieval unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Chunk {
    #[serde(alias = "chunk_id")]
    pub id: String,
    #[serde(default, alias = "content_with_weight")]
    pub content: String,
    #[serde(default, alias = "doc_id")]
    pub document_id: String,
    #[serde(default, alias = "kb_id", skip_serializing_if = "Option::is_none")]
    pub dataset_id: Option<String>,
    #[serde(default, alias = "important_kwd")]
    pub important_keywords: Vec<String>,
    #[serde(default, alias = "question_kwd")]
    pub questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(default, alias = "img_id", skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
    /// Name of the owning document.
    #[serde(
        default,
        alias = "docnm_kwd",
        alias = "document_name",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_keyword: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

/// One page of chunks, plus the owning document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkList {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Document>,
}

/// Request to add a chunk to a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddChunkRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub important_keywords: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<String>,
}

impl AddChunkRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_keywords(mut self, keywords: Vec<String>) -> Self {
        self.important_keywords = keywords;
        self
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddChunkResponse {
    pub chunk: Chunk,
}

/// Partial update for a chunk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateChunkRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important_keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChunkIdsRequest<'a> {
    pub chunk_ids: &'a [String],
}

// ─────────────────────────────────────────────────────────────────────────────
// Retrieval
// ─────────────────────────────────────────────────────────────────────────────

/// A retrieval query over one or more datasets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalRequest {
    pub question: String,
    pub dataset_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub document_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector_similarity_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerank_id: Option<String>,
    /// Expand the question with LLM-extracted keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<bool>,
}

impl RetrievalRequest {
    pub fn new(question: impl Into<String>, dataset_ids: Vec<String>) -> Self {
        Self {
            question: question.into(),
            dataset_ids,
            ..Default::default()
        }
    }

    /// Restrict the search to these documents.
    pub fn with_documents(mut self, document_ids: Vec<String>) -> Self {
        self.document_ids = document_ids;
        self
    }
}

/// Per-document hit counts in a retrieval result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocAggregate {
    pub doc_id: String,
    #[serde(default)]
    pub doc_name: String,
    #[serde(default)]
    pub count: u64,
}

/// Ranked chunks returned by a retrieval query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Retrieval {
    #[serde(default)]
    pub chunks: Vec<Chunk>,
    #[serde(default)]
    pub doc_aggs: Vec<DocAggregate>,
    #[serde(default)]
    pub total: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Chats
// ─────────────────────────────────────────────────────────────────────────────

/// LLM settings of a chat assistant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// A variable referenced from the system prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptVariable {
    pub key: String,
    #[serde(default)]
    pub optional: bool,
}

/// Prompt and retrieval settings of a chat assistant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity_threshold: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords_similarity_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<PromptVariable>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerank_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opener: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_quote: Option<bool>,
    /// System prompt text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// A chat assistant bound to one or more datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, alias = "kb_ids")]
    pub dataset_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
}

/// Request to create a chat assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateChatRequest {
    pub name: String,
    #[serde(default)]
    pub dataset_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptConfig>,
}

impl CreateChatRequest {
    pub fn new(name: impl Into<String>, dataset_ids: Vec<String>) -> Self {
        Self {
            name: name.into(),
            dataset_ids,
            ..Default::default()
        }
    }

    pub fn with_llm(mut self, llm: LlmSettings) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn with_prompt(mut self, prompt: PromptConfig) -> Self {
        self.prompt = Some(prompt);
        self
    }
}

/// Partial update for a chat assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateChatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_ids: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm: Option<LlmSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptConfig>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Sessions
// ─────────────────────────────────────────────────────────────────────────────

/// One message in a session transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Chunks cited by an assistant message.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reference: Vec<Chunk>,
}

/// One conversation thread under a chat assistant or agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// Owning chat (or agent) id.
    #[serde(default, alias = "chat", alias = "dialog_id", alias = "agent_id")]
    pub chat_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "message")]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SessionNameRequest<'a> {
    pub name: &'a str,
}

// ─────────────────────────────────────────────────────────────────────────────
// Completions
// ─────────────────────────────────────────────────────────────────────────────

/// A question sent to a chat assistant or agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub question: String,
    #[serde(default)]
    pub stream: bool,
    /// Continue this session; a new one is created when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl CompletionRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Default::default()
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// An answer (or, when streaming, the answer so far).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Completion {
    #[serde(default)]
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

/// Events yielded by a streamed completion.
#[derive(Debug, Clone)]
pub enum CompletionEvent {
    /// Partial answer; each event carries the full answer so far.
    Answer(Completion),
    /// End of stream.
    Done,
}

// ─────────────────────────────────────────────────────────────────────────────
// Agents
// ─────────────────────────────────────────────────────────────────────────────

/// An agent (canvas) defined on the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dsl: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success() {
        let env: Envelope<Dataset> = serde_json::from_value(json!({
            "code": 0,
            "data": {"id": "ds1", "name": "docs", "language": "English", "chunk_method": "naive"}
        }))
        .unwrap();
        assert_eq!(env.code, 0);
        let ds = env.data.unwrap();
        assert_eq!(ds.id, "ds1");
        assert_eq!(ds.chunk_method.as_deref(), Some("naive"));
        assert_eq!(ds.document_count, 0);
    }

    #[test]
    fn test_envelope_error_without_data() {
        let env: Envelope<Dataset> = serde_json::from_value(json!({
            "code": 102,
            "message": "You don't own the dataset ds1."
        }))
        .unwrap();
        assert_eq!(env.code, 102);
        assert!(env.data.is_none());
        assert_eq!(env.message.as_deref(), Some("You don't own the dataset ds1."));
    }

    #[test]
    fn test_create_dataset_skips_unset_fields() {
        let req = CreateDatasetRequest::new("docs").with_language("English");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value, json!({"name": "docs", "language": "English"}));
    }

    #[test]
    fn test_update_dataset_is_empty() {
        assert!(UpdateDatasetRequest::default().is_empty());
        let req = UpdateDatasetRequest {
            name: Some("renamed".into()),
            ..Default::default()
        };
        assert!(!req.is_empty());
    }

    #[test]
    fn test_document_run_status() {
        let doc: Document = serde_json::from_value(json!({
            "id": "d1",
            "dataset_id": "ds1",
            "name": "a.txt",
            "run": "DONE",
            "type": "doc",
            "chunk_count": 3
        }))
        .unwrap();
        assert_eq!(doc.run, Some(RunStatus::Done));
        assert_eq!(doc.file_type.as_deref(), Some("doc"));
        assert_eq!(doc.chunk_count, 3);

        let doc: Document =
            serde_json::from_value(json!({"id": "d2", "name": "b.txt", "run": "PAUSED"})).unwrap();
        assert_eq!(doc.run, Some(RunStatus::Unknown));
    }

    #[test]
    fn test_chunk_accepts_raw_store_names() {
        let chunk: Chunk = serde_json::from_value(json!({
            "chunk_id": "c1",
            "content_with_weight": "hello",
            "doc_id": "d1",
            "kb_id": "ds1",
            "important_kwd": ["greeting"],
            "docnm_kwd": "a.txt",
            "similarity": 0.8
        }))
        .unwrap();
        assert_eq!(chunk.id, "c1");
        assert_eq!(chunk.content, "hello");
        assert_eq!(chunk.document_id, "d1");
        assert_eq!(chunk.dataset_id.as_deref(), Some("ds1"));
        assert_eq!(chunk.important_keywords, vec!["greeting"]);
        assert_eq!(chunk.document_keyword.as_deref(), Some("a.txt"));
    }

    #[test]
    fn test_session_accepts_chat_alias() {
        let session: Session = serde_json::from_value(json!({
            "id": "s1",
            "chat": "c1",
            "name": "New session",
            "messages": [{"role": "assistant", "content": "Hi!"}]
        }))
        .unwrap();
        assert_eq!(session.chat_id, "c1");
        assert_eq!(session.messages.len(), 1);
        assert!(session.messages[0].reference.is_empty());
    }

    #[test]
    fn test_completion_request_serialization() {
        let req = CompletionRequest::new("What is RAG?").with_session("s1");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"question": "What is RAG?", "stream": false, "session_id": "s1"})
        );
    }
}
