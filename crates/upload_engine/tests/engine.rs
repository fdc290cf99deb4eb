use std::sync::mpsc;
use std::time::Duration;

use tempfile::TempDir;
use upload_engine::{EngineEvent, EngineHandle, EngineSettings, UploadRequest};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn recv(rx: &mpsc::Receiver<EngineEvent>) -> EngineEvent {
    rx.recv_timeout(Duration::from_secs(10)).expect("engine event")
}

#[tokio::test(flavor = "multi_thread")]
async fn handle_reports_upload_then_download() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/process"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": true, "output_file": "d.docx"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/download/d.docx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"doc".to_vec()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let file = dir.path().join("d.pdf");
    std::fs::write(&file, b"%PDF").unwrap();

    let (tx, rx) = mpsc::channel();
    let engine = EngineHandle::new(
        EngineSettings {
            server: server.uri(),
            download_dir: dir.path().join("out"),
            ..EngineSettings::default()
        },
        tx,
    )
    .unwrap();

    let events = tokio::task::spawn_blocking(move || {
        engine.submit(
            9,
            UploadRequest {
                file_name: "d.pdf".to_string(),
                path: file,
            },
        );
        let first = recv(&rx);
        let second = recv(&rx);
        engine.download("d.docx");
        let third = recv(&rx);
        vec![first, second, third]
    })
    .await
    .unwrap();

    assert_eq!(events[0], EngineEvent::ResponseReceived { attempt: 9 });
    match &events[1] {
        EngineEvent::UploadCompleted { attempt, result } => {
            assert_eq!(*attempt, 9);
            assert_eq!(
                result.as_ref().unwrap().output_file.as_deref(),
                Some("d.docx")
            );
        }
        other => panic!("unexpected {other:?}"),
    }
    match &events[2] {
        EngineEvent::DownloadCompleted { artifact, result } => {
            assert_eq!(artifact, "d.docx");
            assert_eq!(
                result.as_ref().unwrap(),
                &dir.path().join("out").join("d.docx")
            );
        }
        other => panic!("unexpected {other:?}"),
    }
}
