//! API endpoint implementations.

mod agents;
mod chats;
mod chunks;
mod datasets;
mod documents;
mod retrieval;
mod sessions;

pub use agents::{AgentsApi, ListAgentsQuery};
pub use chats::{ChatsApi, ListChatsQuery};
pub use chunks::{ChunksApi, ListChunksQuery};
pub use datasets::{DatasetsApi, ListDatasetsQuery};
pub use documents::{DocumentsApi, ListDocumentsQuery};
pub use retrieval::RetrievalApi;
pub use sessions::{ListSessionsQuery, SessionsApi};
pub use stream::CompletionStream;

pub(crate) mod stream;
