use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use upload_engine::{
    EngineEvent, EngineSettings, FailureKind, ProcessResponse, ProgressSink, ReqwestUploader,
    UploadRequest, Uploader,
};
use wiremock::matchers::{body_string_contains, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

fn deck(dir: &TempDir, name: &str) -> UploadRequest {
    let path: PathBuf = dir.path().join(name);
    std::fs::write(&path, b"slide-bytes").unwrap();
    UploadRequest {
        file_name: name.to_string(),
        path,
    }
}

fn uploader_for(server: &MockServer) -> ReqwestUploader {
    ReqwestUploader::new(&EngineSettings {
        server: server.uri(),
        ..EngineSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn posts_multipart_file_field_and_parses_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\"; filename=\"deck.pptx\""))
        .and(body_string_contains("slide-bytes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "download_url": "/download/out123.docx",
            "output_file": "out123.docx"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let sink = TestSink::default();
    let response = uploader_for(&server)
        .upload(1, &deck(&dir, "deck.pptx"), &sink)
        .await
        .expect("upload ok");

    assert!(response.success);
    assert_eq!(response.output_file.as_deref(), Some("out123.docx"));
    assert_eq!(sink.take(), vec![EngineEvent::ResponseReceived { attempt: 1 }]);
}

#[tokio::test]
async fn application_failure_is_returned_as_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": false, "error": "bad slide"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let response = uploader_for(&server)
        .upload(2, &deck(&dir, "deck.pdf"), &TestSink::default())
        .await
        .expect("body parsed");

    assert_eq!(
        response,
        ProcessResponse {
            success: false,
            error: Some("bad slide".to_string()),
            ..ProcessResponse::default()
        }
    );
}

#[tokio::test]
async fn non_success_status_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(413)
                .set_body_json(serde_json::json!({"error": "too big", "details": "limit"})),
        )
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let sink = TestSink::default();
    let err = uploader_for(&server)
        .upload(3, &deck(&dir, "deck.ppt"), &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(413));
    assert!(sink.take().is_empty(), "no progress for rejected status");
}

#[tokio::test]
async fn non_json_body_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let sink = TestSink::default();
    let err = uploader_for(&server)
        .upload(4, &deck(&dir, "deck.pdf"), &sink)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::InvalidBody);
    assert_eq!(sink.take(), vec![EngineEvent::ResponseReceived { attempt: 4 }]);
}

#[tokio::test]
async fn missing_file_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let request = UploadRequest {
        file_name: "gone.pdf".to_string(),
        path: PathBuf::from("/definitely/not/here/gone.pdf"),
    };
    let err = uploader_for(&server)
        .upload(5, &request, &TestSink::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::FileRead);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({"success": true, "output_file": "x.docx"})),
        )
        .mount(&server)
        .await;

    let uploader = ReqwestUploader::new(&EngineSettings {
        server: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..EngineSettings::default()
    })
    .unwrap();
    let dir = TempDir::new().unwrap();
    let err = uploader
        .upload(6, &deck(&dir, "deck.pdf"), &TestSink::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}
