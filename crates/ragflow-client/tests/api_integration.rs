//! Wire-contract tests for the RAGFlow client.
//!
//! Each test stands up a wiremock server that answers the way a RAGFlow
//! server does and checks the request the client sends and the value it
//! returns.

use futures::StreamExt;
use ragflow_client::{
    AddChunkRequest, CompletionEvent, CompletionRequest, CreateChatRequest, CreateDatasetRequest,
    ErrorKind, ListChunksQuery, ListDocumentsQuery, LlmSettings, RagflowClient, RunStatus,
    UpdateDatasetRequest, UploadFile,
};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "ragflow-test-key";

fn client_for(server: &MockServer) -> RagflowClient {
    RagflowClient::builder()
        .base_url(server.uri())
        .api_key(API_KEY)
        .build()
        .unwrap()
}

fn ok(data: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": 0, "data": data}))
}

fn api_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"code": code, "message": message}))
}

// ─────────────────────────────────────────────────────────────────────────────
// Datasets
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_dataset_echoes_submitted_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/datasets"))
        .and(header("authorization", "Bearer ragflow-test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "name": "manuals",
            "language": "English",
            "embedding_model": "BAAI/bge-large-zh-v1.5"
        })))
        .respond_with(ok(json!({
            "id": "ds1",
            "name": "manuals",
            "language": "English",
            "embedding_model": "BAAI/bge-large-zh-v1.5",
            "chunk_method": "naive",
            "document_count": 0,
            "create_time": 1729000000000i64
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = CreateDatasetRequest::new("manuals")
        .with_language("English")
        .with_embedding_model("BAAI/bge-large-zh-v1.5");
    let dataset = client_for(&server)
        .datasets()
        .create(request.clone())
        .await
        .unwrap();

    assert_eq!(dataset.id, "ds1");
    assert_eq!(dataset.name, request.name);
    assert_eq!(dataset.language, request.language);
    assert_eq!(dataset.embedding_model, request.embedding_model);
}

#[tokio::test]
async fn test_list_datasets_filters_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .and(query_param("name", "manuals"))
        .respond_with(ok(json!([
            {"id": "ds1", "name": "manuals"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let datasets = client_for(&server)
        .datasets()
        .list_by_name("manuals")
        .await
        .unwrap();

    assert_eq!(datasets.len(), 1);
    assert!(datasets.iter().all(|d| d.name == "manuals"));
}

#[tokio::test]
async fn test_update_dataset_sends_only_patch_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/datasets/ds1"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .datasets()
        .update(
            "ds1",
            UpdateDatasetRequest {
                name: Some("renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_already_deleted_dataset_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/datasets"))
        .and(body_json(json!({"ids": ["ds1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/datasets"))
        .respond_with(api_error(102, "lacks permission for dataset 'ds1'"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let ids = vec!["ds1".to_string()];
    client.datasets().delete(&ids).await.unwrap();

    let err = client.datasets().delete(&ids).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.code(), Some(102));
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_delete_with_empty_ids_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ok(json!(null)))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let results = [
        client.datasets().delete(&[]).await,
        client.documents("ds1").delete(&[]).await,
        client.chunks("ds1", "d1").delete(&[]).await,
        client.chats().delete(&[]).await,
        client.sessions("c1").delete(&[]).await,
    ];
    for result in results {
        let err = result.unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(err.code(), Some(101));
    }
}

#[tokio::test]
async fn test_invalid_api_key_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 109,
            "message": "Authentication error: API key is invalid!",
            "data": false
        })))
        .mount(&server)
        .await;

    let client = RagflowClient::builder()
        .base_url(server.uri())
        .api_key("not-a-real-key")
        .build()
        .unwrap();
    let err = client
        .datasets()
        .list(Default::default())
        .await
        .unwrap_err();

    assert!(err.is_auth_error());
    assert_eq!(err.kind(), ErrorKind::Api);
}

#[tokio::test]
async fn test_http_401_without_envelope_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/chats"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .chats()
        .list(Default::default())
        .await
        .unwrap_err();
    assert!(err.is_auth_error());
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = RagflowClient::builder()
        .base_url("http://127.0.0.1:1")
        .api_key(API_KEY)
        .build()
        .unwrap();

    let err = client
        .datasets()
        .list(Default::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

// ─────────────────────────────────────────────────────────────────────────────
// Documents
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_upload_n_files_in_one_multipart_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/ds1/documents"))
        .and(header("authorization", "Bearer ragflow-test-key"))
        .and(body_string_contains("name=\"file\"; filename=\"a.txt\""))
        .and(body_string_contains("name=\"file\"; filename=\"b.txt\""))
        .respond_with(ok(json!([
            {"id": "d1", "dataset_id": "ds1", "name": "a.txt", "run": "UNSTART"},
            {"id": "d2", "dataset_id": "ds1", "name": "b.txt", "run": "UNSTART"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let files = vec![
        UploadFile::new("a.txt", b"alpha".to_vec()),
        UploadFile::new("b.txt", b"beta".to_vec()),
    ];
    let names: Vec<String> = files.iter().map(|f| f.file_name.clone()).collect();
    let docs = client_for(&server)
        .documents("ds1")
        .upload(files)
        .await
        .unwrap();

    assert_eq!(docs.len(), names.len());
    assert_ne!(docs[0].id, docs[1].id);
    for (doc, name) in docs.iter().zip(&names) {
        assert_eq!(&doc.name, name);
        assert_eq!(doc.run, Some(RunStatus::Unstart));
    }
}

#[tokio::test]
async fn test_upload_paths_reads_files_from_disk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/ds1/documents"))
        .and(body_string_contains("filename=\"notes.md\""))
        .and(body_string_contains("# Notes"))
        .respond_with(ok(json!([
            {"id": "d1", "dataset_id": "ds1", "name": "notes.md"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.md");
    std::fs::write(&file, "# Notes\n").unwrap();

    let docs = client_for(&server)
        .documents("ds1")
        .upload_paths(&[file])
        .await
        .unwrap();
    assert_eq!(docs[0].name, "notes.md");
}

#[tokio::test]
async fn test_upload_without_files_is_rejected_locally() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .documents("ds1")
        .upload(Vec::new())
        .await
        .unwrap_err();
    assert!(err.is_validation_error());
}

#[tokio::test]
async fn test_list_documents_passes_pagination_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/ds1/documents"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "10"))
        .and(query_param("keywords", "guide"))
        .respond_with(ok(json!({
            "total": 11,
            "docs": [{"id": "d11", "dataset_id": "ds1", "name": "guide-11.pdf", "run": "DONE"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let list = client_for(&server)
        .documents("ds1")
        .list(ListDocumentsQuery {
            keywords: Some("guide".into()),
            page: Some(2),
            page_size: Some(10),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(list.total, 11);
    assert_eq!(list.docs.len(), 1);
    assert_eq!(list.docs[0].run, Some(RunStatus::Done));
}

#[tokio::test]
async fn test_download_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/ds1/documents/d1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"%PDF-1.7 raw".to_vec(), "application/octet-stream"),
        )
        .mount(&server)
        .await;

    let bytes = client_for(&server)
        .documents("ds1")
        .download("d1")
        .await
        .unwrap();
    assert_eq!(bytes, b"%PDF-1.7 raw");
}

#[tokio::test]
async fn test_download_missing_document_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/ds1/documents/missing"))
        .respond_with(api_error(102, "The dataset not own the document missing."))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .documents("ds1")
        .download("missing")
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(102));
}

#[tokio::test]
async fn test_download_json_document_with_code_field() {
    let server = MockServer::start().await;
    let content = json!({"code": 3, "title": "exported settings"});
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/ds1/documents/d2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(content.clone()))
        .mount(&server)
        .await;

    let bytes = client_for(&server)
        .documents("ds1")
        .download("d2")
        .await
        .unwrap();
    let downloaded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(downloaded, content);
}

#[tokio::test]
async fn test_parse_and_stop_parsing() {
    let server = MockServer::start().await;
    let body = json!({"document_ids": ["d1", "d2"]});
    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/ds1/chunks"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/datasets/ds1/chunks"))
        .and(body_json(body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let docs = client_for(&server).documents("ds1");
    let ids = vec!["d1".to_string(), "d2".to_string()];
    docs.parse(&ids).await.unwrap();
    docs.stop_parsing(&ids).await.unwrap();
}

// ─────────────────────────────────────────────────────────────────────────────
// Chunks & retrieval
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_chunks_by_keywords() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets/ds1/documents/d1/chunks"))
        .and(query_param("keywords", "reset"))
        .respond_with(ok(json!({
            "total": 1,
            "chunks": [{
                "id": "c1",
                "content": "Hold the button to reset.",
                "document_id": "d1",
                "important_keywords": ["reset"],
                "available": true
            }],
            "doc": {"id": "d1", "dataset_id": "ds1", "name": "guide.pdf", "chunk_count": 1}
        })))
        .mount(&server)
        .await;

    let list = client_for(&server)
        .chunks("ds1", "d1")
        .list(ListChunksQuery {
            keywords: Some("reset".into()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(list.total, 1);
    assert_eq!(list.chunks[0].important_keywords, vec!["reset"]);
    assert_eq!(list.doc.unwrap().name, "guide.pdf");
}

#[tokio::test]
async fn test_add_chunk_unwraps_chunk() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/datasets/ds1/documents/d1/chunks"))
        .and(body_json(json!({"content": "hello", "important_keywords": ["greeting"]})))
        .respond_with(ok(json!({"chunk": {
            "id": "c9",
            "content": "hello",
            "document_id": "d1",
            "important_keywords": ["greeting"]
        }})))
        .mount(&server)
        .await;

    let chunk = client_for(&server)
        .chunks("ds1", "d1")
        .add(AddChunkRequest::new("hello").with_keywords(vec!["greeting".into()]))
        .await
        .unwrap();
    assert_eq!(chunk.id, "c9");
    assert_eq!(chunk.document_id, "d1");
}

#[tokio::test]
async fn test_retrieve_chunks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/retrieval"))
        .and(body_json(json!({
            "question": "How do I reset?",
            "dataset_ids": ["ds1"],
            "document_ids": ["d1"]
        })))
        .respond_with(ok(json!({
            "total": 1,
            "chunks": [{
                "id": "c1",
                "content": "Hold the button to reset.",
                "document_id": "d1",
                "dataset_id": "ds1",
                "document_keyword": "guide.pdf",
                "similarity": 0.91,
                "vector_similarity": 0.88,
                "term_similarity": 0.95
            }],
            "doc_aggs": [{"doc_id": "d1", "doc_name": "guide.pdf", "count": 1}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let chunks = client_for(&server)
        .retrieval()
        .retrieve_chunks("How do I reset?", vec!["ds1".into()], vec!["d1".into()])
        .await
        .unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].document_keyword.as_deref(), Some("guide.pdf"));
    assert_eq!(chunks[0].similarity, Some(0.91));
}

#[tokio::test]
async fn test_retrieval_with_empty_question_is_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/retrieval"))
        .respond_with(ok(json!({"chunks": []})))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .retrieval()
        .retrieve_chunks("   ", vec!["ds1".into()], vec![])
        .await
        .unwrap_err();

    assert!(err.is_validation_error());
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.code(), Some(101));
}

// ─────────────────────────────────────────────────────────────────────────────
// Chats, sessions, agents
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_chat_echoes_submitted_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chats"))
        .and(body_json(json!({
            "name": "support",
            "dataset_ids": ["ds1"],
            "llm": {"model_name": "qwen-plus", "temperature": 0.1}
        })))
        .respond_with(ok(json!({
            "id": "chat1",
            "name": "support",
            "dataset_ids": ["ds1"],
            "llm": {"model_name": "qwen-plus", "temperature": 0.1}
        })))
        .mount(&server)
        .await;

    let llm = LlmSettings {
        model_name: Some("qwen-plus".into()),
        temperature: Some(0.1),
        ..Default::default()
    };
    let chat = client_for(&server)
        .chats()
        .create(CreateChatRequest::new("support", vec!["ds1".into()]).with_llm(llm.clone()))
        .await
        .unwrap();

    assert_eq!(chat.name, "support");
    assert_eq!(chat.dataset_ids, vec!["ds1"]);
    assert_eq!(chat.llm, Some(llm));
}

#[tokio::test]
async fn test_session_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chats/chat1/sessions"))
        .and(body_json(json!({"name": "first"})))
        .respond_with(ok(json!({
            "id": "s1",
            "chat_id": "chat1",
            "name": "first",
            "messages": [{"role": "assistant", "content": "Hi! I am your assistant, can I help you?"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/v1/chats/chat1/sessions/s1"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/chats/chat1/sessions"))
        .respond_with(ok(json!([
            {"id": "s1", "chat": "chat1", "name": "renamed", "messages": []}
        ])))
        .mount(&server)
        .await;

    let sessions = client_for(&server).sessions("chat1");
    let session = sessions.create("first").await.unwrap();
    assert_eq!(session.chat_id, "chat1");
    assert_eq!(session.messages.len(), 1);

    sessions.update(&session.id, "renamed").await.unwrap();
    let listed = sessions.list(Default::default()).await.unwrap();
    assert_eq!(listed[0].name, "renamed");
    assert_eq!(listed[0].chat_id, "chat1");
}

#[tokio::test]
async fn test_chat_completion_non_streamed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chats/chat1/completions"))
        .and(body_json(json!({"question": "Hello?", "stream": false, "session_id": "s1"})))
        .respond_with(ok(json!({
            "answer": "Hi there.",
            "reference": {"chunks": [], "doc_aggs": []},
            "id": "m1",
            "session_id": "s1"
        })))
        .mount(&server)
        .await;

    let completion = client_for(&server)
        .chats()
        .complete("chat1", CompletionRequest::new("Hello?").with_session("s1"))
        .await
        .unwrap();
    assert_eq!(completion.answer, "Hi there.");
    assert_eq!(completion.session_id.as_deref(), Some("s1"));
}

#[tokio::test]
async fn test_agent_completion_streamed() {
    let server = MockServer::start().await;
    let body = concat!(
        "data:{\"code\": 0, \"data\": {\"answer\": \"Hel\", \"session_id\": \"s1\"}}\n\n",
        "data:{\"code\": 0, \"data\": {\"answer\": \"Hello\", \"session_id\": \"s1\"}}\n\n",
        "data:{\"code\": 0, \"data\": true}\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/api/v1/agents/agent1/completions"))
        .and(body_json(json!({"question": "Say hello", "stream": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/event-stream"),
        )
        .mount(&server)
        .await;

    let stream = client_for(&server)
        .agents()
        .stream("agent1", CompletionRequest::new("Say hello"))
        .await
        .unwrap();
    let events: Vec<_> = stream.collect().await;

    let answers: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            Ok(CompletionEvent::Answer(c)) => Some(c.answer.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(answers, vec!["Hel", "Hello"]);

    let done = events
        .iter()
        .filter(|e| matches!(e, Ok(CompletionEvent::Done)))
        .count();
    assert_eq!(done, 1);
    assert!(matches!(events.last(), Some(Ok(CompletionEvent::Done))));
}

#[tokio::test]
async fn test_stream_rejected_before_start_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chats/nope/completions"))
        .respond_with(api_error(102, "You do not own the chat"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .chats()
        .stream("nope", CompletionRequest::new("Hi"))
        .await;
    let err = match result {
        Ok(_) => panic!("expected an error"),
        Err(e) => e,
    };
    assert_eq!(err.code(), Some(102));
}

#[tokio::test]
async fn test_list_agents() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/agents"))
        .and(query_param("title", "triage"))
        .respond_with(ok(json!([
            {"id": "agent1", "title": "triage", "dsl": {"components": {}}}
        ])))
        .mount(&server)
        .await;

    let agents = client_for(&server)
        .agents()
        .list(ragflow_client::ListAgentsQuery {
            title: Some("triage".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(agents[0].title, "triage");
}

#[tokio::test]
async fn test_clones_share_one_client_across_tasks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/datasets"))
        .respond_with(ok(json!([])))
        .expect(4)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.datasets().list(Default::default()).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_empty());
    }
}
