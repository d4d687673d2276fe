//! Agents API.

use super::stream::{CompletionStream, completion_events};
use crate::client::RagflowClient;
use crate::error::Result;
use crate::types::{Agent, Completion, CompletionRequest, Session};

/// Query parameters for listing agents.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct ListAgentsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
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

/// Agents API client.
pub struct AgentsApi {
    client: RagflowClient,
}

impl AgentsApi {
    pub(crate) fn new(client: RagflowClient) -> Self {
        Self { client }
    }

    /// List agents.
    pub async fn list(&self, query: ListAgentsQuery) -> Result<Vec<Agent>> {
        self.client.get_with_query("agents", &query).await
    }

    /// Open a session with an agent.
    pub async fn create_session(&self, agent_id: &str) -> Result<Session> {
        self.client
            .post(
                &format!("agents/{}/sessions", agent_id),
                &serde_json::json!({}),
            )
            .await
    }

    /// Ask an agent a question and wait for the full answer.
    pub async fn complete(
        &self,
        agent_id: &str,
        mut request: CompletionRequest,
    ) -> Result<Completion> {
        request.stream = false;
        self.client
            .post(&format!("agents/{}/completions", agent_id), &request)
            .await
    }

    /// Ask an agent a question and stream the answer.
    pub async fn stream(
        &self,
        agent_id: &str,
        mut request: CompletionRequest,
    ) -> Result<CompletionStream> {
        request.stream = true;
        let response = self
            .client
            .post_stream(&format!("agents/{}/completions", agent_id), &request)
            .await?;
        Ok(completion_events(response))
    }
}
