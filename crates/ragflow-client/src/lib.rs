//! Typed HTTP client for the RAGFlow REST API.
//!
//! One [`RagflowClient`] owns a base URL and an API key and exposes one method
//! per resource/verb pair. Every call is a single request/response exchange:
//! nothing is retried, batched, or paged behind your back.
//!
//! # Example
//!
//! ```no_run
//! use ragflow_client::{CreateDatasetRequest, RagflowClient, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = RagflowClient::builder()
//!     .base_url("http://localhost:9380")
//!     .api_key("ragflow-xxxx")
//!     .build()?;
//!
//! // Create a dataset and upload a document into it
//! let dataset = client
//!     .datasets()
//!     .create(CreateDatasetRequest::new("manuals").with_language("English"))
//!     .await?;
//! let docs = client.documents(&dataset.id).upload_paths(&["guide.pdf"]).await?;
//! client.documents(&dataset.id).parse(&[docs[0].id.clone()]).await?;
//!
//! // Search it
//! let chunks = client
//!     .retrieval()
//!     .retrieve_chunks("How do I reset the device?", vec![dataset.id.clone()], vec![])
//!     .await?;
//! for chunk in chunks {
//!     println!("{}", chunk.content);
//! }
//!
//! // Stream an answer from a chat assistant
//! use futures::StreamExt;
//! let mut stream = client
//!     .chats()
//!     .stream("chat-id", ragflow_client::CompletionRequest::new("Summarize the manual"))
//!     .await?;
//! while let Some(event) = stream.next().await {
//!     match event? {
//!         ragflow_client::CompletionEvent::Answer(c) => println!("{}", c.answer),
//!         ragflow_client::CompletionEvent::Done => println!("[done]"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Datasets**: create, list, update, delete
//! - **Documents**: upload (multipart), list, update, download, delete, parse
//! - **Chunks**: list, add, update, delete
//! - **Retrieval**: ranked chunk search across datasets
//! - **Chats**: create, list, update, delete, completions (plain or streamed)
//! - **Sessions**: create, list, rename, delete
//! - **Agents**: list, sessions, completions

pub mod api;
pub mod client;
pub mod error;
pub mod types;

pub use client::{ClientBuilder, DEFAULT_BASE_URL, RagflowClient};
pub use error::{Error, ErrorKind, Result, RetCode};
pub use api::CompletionStream;
pub use types::*;

// Re-export query types used with list methods
pub use api::{
    ListAgentsQuery, ListChatsQuery, ListChunksQuery, ListDatasetsQuery, ListDocumentsQuery,
    ListSessionsQuery,
};
