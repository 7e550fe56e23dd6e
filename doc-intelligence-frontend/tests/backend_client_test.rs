use doc_intelligence_frontend::config::BackendSettings;
use doc_intelligence_frontend::error::TransportError;
use doc_intelligence_frontend::services::backend_client::{BackendClient, DocumentBackend};
use doc_intelligence_frontend::services::view_model::build_listing;
use serde_json::json;
use service_core::middleware::CURRENT_REQUEST_ID;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> BackendClient {
    // Trailing slash must not produce a double slash in request paths.
    BackendClient::new(BackendSettings::new(&format!("{}/", server.uri()))).unwrap()
}

#[tokio::test]
async fn list_documents_parses_backend_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/benefit/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "665f1c2e9b1e8a3d4c2b1a00",
                "documentName": "plan.pdf",
                "documentProcessStatus": 3,
                "uploadDateTime": "2024-01-02T10:00:00.1234567Z",
                "user": ""
            },
            {
                "id": "665f1c2e9b1e8a3d4c2b1a01",
                "documentName": "rider.pdf",
                "documentProcessStatus": 2,
                "uploadDateTime": "2024-01-05T16:20:00Z",
                "user": ""
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let documents = client.list_documents().await.unwrap();

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].document_name.as_deref(), Some("plan.pdf"));

    let listing = build_listing(&documents, client.endpoints());
    let rows = listing.rows();
    assert_eq!(rows[0].name, "rider.pdf");
    assert_eq!(rows[0].status_label, "Processing");
    assert_eq!(rows[1].formatted_date, "January 02, 2024 10:00 AM");
    assert!(rows[1].actions[0]
        .url
        .starts_with(&format!("{}/api/benefit/testcase/download?fileName=plan.pdf", server.uri())));
}

#[tokio::test]
async fn list_documents_fails_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/benefit/docs"))
        .respond_with(ResponseTemplate::new(500).set_body_string("mongo unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).list_documents().await.unwrap_err();

    match err {
        TransportError::FetchFailed(cause) => {
            assert!(cause.contains("500"), "{cause}");
            assert!(cause.contains("mongo unavailable"), "{cause}");
        }
        other => panic!("expected FetchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn list_documents_fails_on_non_array_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/benefit/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"documents": []})))
        .mount(&server)
        .await;

    let err = client_for(&server).list_documents().await.unwrap_err();

    assert!(matches!(err, TransportError::FetchFailed(_)));
}

#[tokio::test]
async fn list_documents_fails_when_backend_is_down() {
    let client = BackendClient::new(BackendSettings::new("http://127.0.0.1:9")).unwrap();

    let err = client.list_documents().await.unwrap_err();

    assert!(matches!(err, TransportError::FetchFailed(_)));
    assert_eq!(err.kind(), "fetch_failed");
}

#[tokio::test]
async fn upload_sends_pdf_as_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/benefit/doc/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("File uploaded successfully"))
        .expect(1)
        .mount(&server)
        .await;

    let ack = client_for(&server)
        .upload(b"%PDF-1.7 sample".to_vec(), "plan.pdf")
        .await
        .unwrap();

    assert_eq!(ack.status, 200);
    assert_eq!(ack.message, "File uploaded successfully");

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body = String::from_utf8_lossy(&requests[0].body).to_lowercase();
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"plan.pdf\""));
    assert!(body.contains("content-type: application/pdf"));
    assert!(body.contains("%pdf-1.7 sample"));
}

#[tokio::test]
async fn upload_reports_backend_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/benefit/doc/upload"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload(b"%PDF".to_vec(), "plan.pdf")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Upload failed: HTTP 500 Internal Server Error");
}

#[tokio::test]
async fn oversize_upload_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/benefit/doc/upload"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .upload(vec![0; 3 * 1024 * 1024], "big.pdf")
        .await
        .unwrap_err();

    match err {
        TransportError::FileTooLarge { size, .. } => assert_eq!(size, 3 * 1024 * 1024),
        other => panic!("expected FileTooLarge, got {:?}", other),
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_documents_forwards_inbound_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/benefit/docs"))
        .and(header("x-request-id", "req-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let documents = CURRENT_REQUEST_ID
        .scope("req-42".to_string(), client.list_documents())
        .await
        .unwrap();

    assert!(documents.is_empty());
}
