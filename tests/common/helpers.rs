use async_trait::async_trait;
use bytes::Bytes;
use futures::{stream, StreamExt};
use opsman::api::{Api, ApiBuilder};
use opsman::http::{Body, Request, Transport};
use opsman::progress::{LiveOutput, Progress};
use opsman::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::{Method, Response};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

// Common test constants
pub const WAITING_SUFFIX: &str = "elapsed, waiting for response from Ops Manager...";
pub const TEST_CSRF_PAGE: &str = r#"<html><head>
<meta name="csrf-token" content="some-csrf-token"/>
</head></html>"#;

/// Events recorded by the fakes, shared so ordering across them is visible.
pub type EventLog = Arc<Mutex<Vec<String>>>;

pub fn new_event_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

pub fn events(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Route `tracing` output to the test harness, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// The expected live line after `elapsed`.
pub fn elapsed_line(elapsed: &str) -> String {
    format!("{} {}", elapsed, WAITING_SUFFIX)
}

// === Body Helpers ===

/// A body yielding `chunks` one by one.
pub fn chunked_body(chunks: &[&'static [u8]]) -> Body {
    let chunks: Vec<io::Result<Bytes>> = chunks
        .iter()
        .map(|chunk| Ok(Bytes::from_static(chunk)))
        .collect();
    Body::from_stream(stream::iter(chunks))
}

// === Fake Transport ===

/// What the fake transport answers with.
#[derive(Debug, Clone)]
pub enum Reply {
    Respond {
        status: u16,
        headers: Vec<(&'static str, String)>,
        body: String,
    },
    Fail(String),
}

impl Reply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Reply::Respond {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn redirect(location: &str) -> Self {
        Reply::Respond {
            status: 302,
            headers: vec![("Location", location.to_string())],
            body: String::new(),
        }
    }

    pub fn fail(message: &str) -> Self {
        Reply::Fail(message.to_string())
    }

    fn into_result(self) -> Result<Response> {
        match self {
            Reply::Respond {
                status,
                headers,
                body,
            } => {
                let mut builder = http::Response::builder().status(status);
                for (name, value) in headers {
                    builder = builder.header(name, value);
                }
                let response = builder.body(body).expect("Failed to build response");
                Ok(Response::from(response))
            }
            Reply::Fail(message) => Err(Error::Internal(message)),
        }
    }
}

/// A request as the fake transport saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
    pub content_length: i64,
}

impl RecordedRequest {
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// A [`Transport`] replaying queued replies and recording every request.
///
/// By default it reads the whole request body, then answers. Replies are
/// consumed in order; once the queue is empty every request gets `200 {}`.
#[derive(Debug, Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    skip_body: bool,
    chunk_delay: Duration,
    response_delay: Duration,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, reply: Reply) -> Self {
        self.push_reply(reply);
        self
    }

    /// Answer without reading the request body.
    pub fn without_reading_body(mut self) -> Self {
        self.skip_body = true;
        self
    }

    /// Wait `delay` after reading each body chunk.
    pub fn chunk_delay(mut self, delay: Duration) -> Self {
        self.chunk_delay = delay;
        self
    }

    /// Wait `delay` between reading the body and answering.
    pub fn response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn push_reply(&self, reply: Reply) {
        self.replies.lock().unwrap().push_back(reply);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("No request was sent")
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn execute(&self, mut request: Request) -> Result<Response> {
        let mut body = Vec::new();
        if !self.skip_body {
            if let Some(mut stream) = request.take_body() {
                while let Some(chunk) = stream.next().await {
                    body.extend_from_slice(&chunk?);
                    if !self.chunk_delay.is_zero() {
                        tokio::time::sleep(self.chunk_delay).await;
                    }
                }
            }
        }

        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method().clone(),
            path: request.path().to_string(),
            headers: request.headers().clone(),
            body,
            content_length: request.content_length(),
        });

        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Reply::ok("{}"));
        reply.into_result()
    }
}

// === Fake Progress ===

/// A [`Progress`] recording every call into an [`EventLog`].
#[derive(Debug)]
pub struct FakeProgress {
    log: EventLog,
    total: AtomicI64,
    current: AtomicI64,
}

impl FakeProgress {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            total: AtomicI64::new(0),
            current: AtomicI64::new(0),
        }
    }

    pub fn count(&self, event: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.as_str() == event)
            .count()
    }

    fn record(&self, event: String) {
        self.log.lock().unwrap().push(event);
    }
}

impl Progress for FakeProgress {
    fn set_total(&self, total: i64) {
        self.total.store(total, Ordering::SeqCst);
        self.record(format!("set_total({})", total));
    }

    fn kickoff(&self) {
        self.current.store(0, Ordering::SeqCst);
        self.record("kickoff".to_string());
    }

    fn end(&self) {
        self.record("end".to_string());
    }

    fn add(&self, delta: u64) {
        self.current.fetch_add(delta as i64, Ordering::SeqCst);
        self.record(format!("add({})", delta));
    }

    fn current(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }

    fn total(&self) -> i64 {
        self.total.load(Ordering::SeqCst)
    }
}

// === Fake Live Writer ===

/// A [`LiveOutput`] recording every call into an [`EventLog`].
#[derive(Debug)]
pub struct FakeLiveWriter {
    log: EventLog,
    running: Mutex<bool>,
    lines: Mutex<Vec<String>>,
}

impl FakeLiveWriter {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            running: Mutex::new(false),
            lines: Mutex::new(Vec::new()),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    pub fn is_running(&self) -> bool {
        *self.running.lock().unwrap()
    }

    pub fn count(&self, event: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.as_str() == event)
            .count()
    }
}

impl LiveOutput for FakeLiveWriter {
    fn start(&self) -> Result<()> {
        let mut running = self.running.lock().unwrap();
        if *running {
            return Err(Error::LiveWriterMisuse("start called while already running"));
        }
        *running = true;
        self.log.lock().unwrap().push("start".to_string());
        Ok(())
    }

    fn write_line(&self, line: &str) -> Result<()> {
        if !*self.running.lock().unwrap() {
            return Err(Error::LiveWriterMisuse("write called while idle"));
        }
        self.lines.lock().unwrap().push(line.to_string());
        self.log.lock().unwrap().push(format!("write({})", line));
        Ok(())
    }

    fn stop(&self) {
        let mut running = self.running.lock().unwrap();
        if !*running {
            return;
        }
        *running = false;
        self.log.lock().unwrap().push("stop".to_string());
    }
}

// === Api Helpers ===

/// Everything an API test needs to inspect.
pub struct TestApi {
    pub api: Api,
    pub transport: Arc<FakeTransport>,
    pub progress: Arc<FakeProgress>,
    pub live: Arc<FakeLiveWriter>,
    pub log: EventLog,
}

/// Creates an [`Api`] talking to `transport` through fakes.
pub fn create_test_api(transport: FakeTransport) -> TestApi {
    let log = new_event_log();
    let transport = Arc::new(transport);
    let progress = Arc::new(FakeProgress::new(log.clone()));
    let live = Arc::new(FakeLiveWriter::new(log.clone()));

    let api = ApiBuilder::hidden()
        .transport(transport.clone())
        .progress(progress.clone())
        .live_output(live.clone())
        .build()
        .expect("Failed to build api");

    TestApi {
        api,
        transport,
        progress,
        live,
        log,
    }
}
