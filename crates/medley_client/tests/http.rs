//! Integration tests driving the HTTP client against a stub backend.

use medley_client::{ClientConfig, ClientError, HttpResourceClient, ResourceClient};
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// Serves one canned HTTP response and reports the request head it saw.
async fn stub_server(status_line: &str, body: &str) -> (SocketAddr, oneshot::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    let response = format!(
        "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 8192];
        let n = stream.read(&mut buf).await.unwrap();
        let head = String::from_utf8_lossy(&buf[..n]).into_owned();
        let _ = tx.send(head);
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
    });

    (addr, rx)
}

fn client_for(addr: SocketAddr) -> HttpResourceClient {
    HttpResourceClient::new(ClientConfig::new(format!("http://{addr}"))).unwrap()
}

#[tokio::test]
async fn scan_status_decodes_and_hits_versioned_path() {
    let body = r#"{"active_scans": 1, "scans": [{"scan_id": "s1", "path": "/media/music",
        "started_at": "2024-03-01T10:00:00", "status": "running",
        "files_processed": "42", "deep_scan": "False"}]}"#;
    let (addr, seen) = stub_server("HTTP/1.1 200 OK", body).await;

    let status = client_for(addr).scan_status().await.unwrap();
    assert_eq!(status.active_scans, 1);
    assert_eq!(status.scans[0].files_processed, 42);

    let head = seen.await.unwrap();
    assert!(head.starts_with("GET /api/v1/scan/status"), "got: {head}");
}

#[tokio::test]
async fn health_hits_unversioned_path() {
    let body = r#"{"status": "healthy", "databases":
        {"redis": "connected", "mongodb": "connected", "mysql": "connected"}}"#;
    let (addr, seen) = stub_server("HTTP/1.1 200 OK", body).await;

    let health = client_for(addr).health().await.unwrap();
    assert!(health.all_connected());

    let head = seen.await.unwrap();
    assert!(head.starts_with("GET /health"), "got: {head}");
}

#[tokio::test]
async fn structured_error_body_becomes_server_detail() {
    let (addr, _seen) = stub_server("HTTP/1.1 404 Not Found", r#"{"detail": "path not found"}"#).await;

    let err = client_for(addr)
        .start_scan(&medley_api::StartScan::path("/media/missing"))
        .await
        .unwrap_err();
    assert_eq!(err, ClientError::server(404, "path not found"));
}

#[tokio::test]
async fn unstructured_error_body_has_no_detail() {
    let (addr, _seen) = stub_server("HTTP/1.1 502 Bad Gateway", "upstream fell over").await;

    let err = client_for(addr).stop_scan().await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Server {
            status: 502,
            detail: None
        }
    );
}

#[tokio::test]
async fn delete_uses_path_parameter() {
    let (addr, seen) = stub_server("HTTP/1.1 200 OK", r#"{"message": "deleted"}"#).await;

    let msg = client_for(addr).delete_library(7).await.unwrap();
    assert_eq!(msg.message, "deleted");

    let head = seen.await.unwrap();
    assert!(head.starts_with("DELETE /api/v1/libraries/7"), "got: {head}");
}

#[tokio::test]
async fn detect_duplicates_carries_auto_mark_flag() {
    let (addr, seen) = stub_server("HTTP/1.1 200 OK", r#"{"message": "started"}"#).await;

    client_for(addr).detect_duplicates(true).await.unwrap();

    let head = seen.await.unwrap();
    assert!(
        head.starts_with("POST /api/v1/duplicates/detect?auto_mark=true"),
        "got: {head}"
    );
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client_for(addr).system_status().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport { timeout: false, .. }), "got: {err:?}");
}
