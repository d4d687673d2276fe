//! Chat sessions API.

use crate::client::RagflowClient;
use crate::error::{Error, Result};
use crate::types::{IdsRequest, Session, SessionNameRequest};

/// Query parameters for listing sessions.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ListSessionsQuery {
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

/// Sessions API client, scoped to one chat assistant.
pub struct SessionsApi {
    client: RagflowClient,
    chat_id: String,
}

impl SessionsApi {
    pub(crate) fn new(client: RagflowClient, chat_id: String) -> Self {
        Self { client, chat_id }
    }

    fn path(&self) -> String {
        format!("chats/{}/sessions", self.chat_id)
    }

    /// Open a new session.
    pub async fn create(&self, name: &str) -> Result<Session> {
        self.client
            .post(&self.path(), &SessionNameRequest { name })
            .await
    }

    /// List sessions.
    pub async fn list(&self, query: ListSessionsQuery) -> Result<Vec<Session>> {
        self.client.get_with_query(&self.path(), &query).await
    }

    /// Rename a session.
    pub async fn update(&self, session_id: &str, name: &str) -> Result<()> {
        self.client
            .put(
                &format!("{}/{}", self.path(), session_id),
                &SessionNameRequest { name },
            )
            .await
    }

    /// Delete sessions by ID. An empty list is rejected without a request.
    pub async fn delete(&self, ids: &[String]) -> Result<()> {
        if ids.is_empty() {
            return Err(Error::validation("no ids given"));
        }
        self.client.delete(&self.path(), &IdsRequest { ids }).await
    }
}
