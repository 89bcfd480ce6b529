//! Tests for HTTP module functionality.

use opsman::http::{
    create_http_client, download_with_progress, HttpClientConfig, HttpTransport,
    ProgressTransport, Request, Transport,
};
use opsman::progress::{LiveWriter, Progress, ProgressView};
use reqwest::header::{HeaderValue, USER_AGENT};
use reqwest::Method;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

mod common;
use common::helpers::*;

/// What the one-shot server received.
struct Received {
    head: String,
    body: Vec<u8>,
}

/// Accept one connection, read a request with a Content-Length body and
/// answer `200` with `reply`.
async fn serve_once(listener: TcpListener, reply: &'static str) -> Received {
    let (mut socket, _) = listener.accept().await.unwrap();
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request head");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };
    let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
    let length: usize = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse().ok())
                .flatten()
        })
        .unwrap_or(0);

    let mut body = buf[head_end..].to_vec();
    while body.len() < length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before the request body");
        body.extend_from_slice(&chunk[..n]);
    }

    let response = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.len(),
        reply
    );
    socket.write_all(response.as_bytes()).await.unwrap();
    socket.shutdown().await.unwrap();

    Received { head, body }
}

#[test]
fn test_create_http_client_default() {
    let client = create_http_client(HttpClientConfig::default());
    assert!(client.is_ok());
}

#[test]
fn test_create_http_client_with_headers() {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("om-test-agent"));
    let config = HttpClientConfig {
        headers: Some(headers),
        skip_ssl_validation: true,
        ..HttpClientConfig::default()
    };
    assert!(create_http_client(config).is_ok());
}

#[tokio::test]
async fn test_http_transport_sends_declared_length() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target = format!("http://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(serve_once(listener, "{}"));

    let transport = HttpTransport::from_config(&target, HttpClientConfig::default()).unwrap();
    let request = Request::new(Method::POST, "/api/v0/stemcells")
        .body(chunked_body(&[b"abc", b"def"]), 6);
    let response = transport.execute(request).await.unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.unwrap(), "{}");
    let received = server.await.unwrap();
    assert!(received.head.starts_with("POST /api/v0/stemcells HTTP/1.1"));
    assert!(received.head.to_ascii_lowercase().contains("content-length: 6"));
    assert_eq!(received.body, b"abcdef");
}

#[tokio::test]
async fn test_progress_transport_over_http() {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target = format!("http://{}", listener.local_addr().unwrap());
    let server = tokio::spawn(serve_once(listener, "uploaded"));

    let inner = HttpTransport::from_config(&target, HttpClientConfig::default()).unwrap();
    let view = Arc::new(ProgressView::hidden());
    let transport = ProgressTransport::new(
        Arc::new(inner),
        view.clone(),
        Arc::new(LiveWriter::hidden()),
    );

    let content = create_test_content(200_000);
    let request = Request::new(Method::POST, "/api/v0/available_products").bytes(content.clone());
    let response = transport.execute(request).await.unwrap();

    assert_eq!(response.text().await.unwrap(), "uploaded");
    assert_eq!(view.total(), 200_000);
    assert_eq!(view.current(), 200_000);
    assert!(!view.is_running());
    assert_eq!(server.await.unwrap().body, content);
}

#[tokio::test]
async fn test_download_with_progress() {
    let view = Arc::new(ProgressView::hidden());
    let response = reqwest::Response::from(http::Response::new("some-installation"));
    let mut out = Vec::new();

    let written = download_with_progress(view.clone(), response, &mut out)
        .await
        .unwrap();

    assert_eq!(written, 17);
    assert_eq!(out, b"some-installation");
    assert_eq!(view.current(), 17);
    assert!(!view.is_running());
}
