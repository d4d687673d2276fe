//! Chat assistants API.

use super::stream::{CompletionStream, completion_events};
use crate::client::RagflowClient;
use crate::error::{Error, Result};
use crate::types::{
    Chat, Completion, CompletionRequest, CreateChatRequest, IdsRequest, UpdateChatRequest,
};

/// Query parameters for listing chat assistants.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ListChatsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
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

/// Chat assistants API client.
pub struct ChatsApi {
    client: RagflowClient,
}

impl ChatsApi {
    pub(crate) fn new(client: RagflowClient) -> Self {
        Self { client }
    }

    /// Create a chat assistant.
    pub async fn create(&self, request: CreateChatRequest) -> Result<Chat> {
        self.client.post("chats", &request).await
    }

    /// List chat assistants.
    pub async fn list(&self, query: ListChatsQuery) -> Result<Vec<Chat>> {
        self.client.get_with_query("chats", &query).await
    }

    /// List chat assistants with a given name.
    pub async fn list_by_name(&self, name: &str) -> Result<Vec<Chat>> {
        self.list(ListChatsQuery {
            name: Some(name.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Update a chat assistant.
    pub async fn update(&self, id: &str, request: UpdateChatRequest) -> Result<()> {
        self.client.put(&format!("chats/{}", id), &request).await
    }

    /// Delete chat assistants by ID. An empty list is rejected without a request.
    pub async fn delete(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::validation("no ids given"));
        }
        self.client.delete("chats", &IdsRequest { ids }).await
    }

    /// Ask a question and wait for the full answer.
    pub async fn complete(
        &self,
        chat_id: &str,
        mut request: CompletionRequest,
    ) -> Result<Completion> {
        request.stream = false;
        self.client
            .post(&format!("chats/{}/completions", chat_id), &request)
            .await
    }

    /// Ask a question and stream the answer as it is generated.
    pub async fn stream(
        &self,
        chat_id: &str,
        mut request: CompletionRequest,
    ) -> Result<CompletionStream> {
        request.stream = true;
        let response = self
            .client
            .post_stream(&format!("chats/{}/completions", chat_id), &request)
            .await?;
        Ok(completion_events(response))
    }
}
