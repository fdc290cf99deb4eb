use std::fs;

use tempfile::TempDir;
use upload_engine::{DownloadError, Downloader, EngineSettings, ReqwestDownloader};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn downloader(server: &MockServer, dir: &TempDir) -> ReqwestDownloader {
    ReqwestDownloader::new(&EngineSettings {
        server: server.uri(),
        download_dir: dir.path().join("out"),
        ..EngineSettings::default()
    })
    .unwrap()
}

#[tokio::test]
async fn saves_artifact_into_download_dir() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/out123.docx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK-docx".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let saved = downloader(&server, &dir)
        .download("out123.docx")
        .await
        .expect("download ok");

    assert_eq!(saved, dir.path().join("out").join("out123.docx"));
    assert_eq!(fs::read(&saved).unwrap(), b"PK-docx");
}

#[tokio::test]
async fn missing_artifact_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/download/nope.docx"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let err = downloader(&server, &dir)
        .download("nope.docx")
        .await
        .unwrap_err();

    assert!(matches!(err, DownloadError::HttpStatus(404)));
    assert!(!dir.path().join("out").join("nope.docx").exists());
}

#[tokio::test]
async fn hostile_names_stay_inside_download_dir() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"data".to_vec()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let saved = downloader(&server, &dir)
        .download("../escape.docx")
        .await
        .expect("download ok");

    assert_eq!(saved, dir.path().join("out").join("escape.docx"));
}
