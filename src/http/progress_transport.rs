//! Transport decorator reporting progress for long-running requests.
//!
//! [`ProgressTransport`] wraps another [`Transport`]. For each request it
//! counts the request body through a [`ByteCounter`] and runs a tracker task
//! alongside the underlying call. The tracker works in two phases:
//!
//! 1. **Body progress.** The bar advances while bytes are being sent. As soon
//!    as every declared byte has been read (or immediately when the length is
//!    zero or unknown) the bar is ended.
//! 2. **Elapsed time.** While the server works on the request, a live line
//!    reports `"<n>s elapsed, waiting for response from Ops Manager..."` once
//!    per polling interval.
//!
//! If the request finishes during the first phase the bar is ended and the
//! second phase never starts. Either way the tracker has finished and its
//! output is flushed before [`execute`](Transport::execute) returns, and the
//! response or error of the underlying transport is returned as is.
//!
//! # Examples
//!
//! ```rust,no_run
//! use opsman::http::{HttpClientConfig, HttpTransport, ProgressTransport, Request, Transport};
//! use opsman::progress::{LiveWriter, ProgressView};
//! use reqwest::Method;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), opsman::Error> {
//! let inner = HttpTransport::from_config("opsman.example.com", HttpClientConfig::default())?;
//! let transport = ProgressTransport::new(
//!     Arc::new(inner),
//!     Arc::new(ProgressView::default()),
//!     Arc::new(LiveWriter::stderr()),
//! )
//! .with_polling_interval(Duration::from_secs(2));
//!
//! let request = Request::new(Method::POST, "/api/v0/available_products").bytes(vec![0u8; 1024]);
//! let response = transport.execute(request).await?;
//! # Ok(())
//! # }
//! ```

use super::{Body, Request, Transport};
use crate::error::Result;
use crate::progress::{ByteCounter, LiveOutput, Progress};

use async_trait::async_trait;
use reqwest::Response;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::time::{interval_at, sleep, Instant, MissedTickBehavior};
use tracing::{debug, warn};

/// Default time between two progress checks or elapsed-time lines.
pub const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(1);

/// How a tracker run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerOutcome {
    /// The request finished before the body was fully read.
    EndedEarly,
    /// The body was fully read; `ticks` elapsed-time lines were emitted.
    Waited { ticks: u64 },
}

/// A [`Transport`] that draws upload progress and elapsed waiting time.
///
/// Only one request should be in flight per transport, and transports that
/// share a [`LiveOutput`] should not run concurrently.
pub struct ProgressTransport {
    inner: Arc<dyn Transport>,
    progress: Arc<dyn Progress>,
    live: Arc<dyn LiveOutput>,
    polling_interval: Duration,
}

impl ProgressTransport {
    /// Decorate `inner`, reporting through `progress` and `live`.
    pub fn new(
        inner: Arc<dyn Transport>,
        progress: Arc<dyn Progress>,
        live: Arc<dyn LiveOutput>,
    ) -> Self {
        Self {
            inner,
            progress,
            live,
            polling_interval: DEFAULT_POLLING_INTERVAL,
        }
    }

    /// Set the polling interval. A zero interval keeps the default.
    pub fn with_polling_interval(mut self, polling_interval: Duration) -> Self {
        if !polling_interval.is_zero() {
            self.polling_interval = polling_interval;
        }
        self
    }

    /// Time between two progress checks or elapsed-time lines.
    pub fn polling_interval(&self) -> Duration {
        self.polling_interval
    }

    /// The counters this transport reports to.
    pub fn progress(&self) -> Arc<dyn Progress> {
        self.progress.clone()
    }

    fn tracker(&self) -> Tracker {
        Tracker {
            progress: self.progress.clone(),
            live: self.live.clone(),
            polling_interval: self.polling_interval,
        }
    }
}

#[async_trait]
impl Transport for ProgressTransport {
    async fn execute(&self, mut request: Request) -> Result<Response> {
        self.progress.set_total(request.content_length());
        if let Some(body) = request.take_body() {
            let counted = ByteCounter::new(body, self.progress.clone());
            request.set_body(Body::from_stream(counted));
        }
        // Kick off before the body can be read so no byte is counted twice.
        self.progress.kickoff();

        let (request_done_tx, request_done_rx) = oneshot::channel::<()>();
        let (tracker_done_tx, tracker_done_rx) = oneshot::channel::<TrackerOutcome>();
        let tracker = self.tracker();
        tokio::spawn(async move {
            let outcome = tracker.run(request_done_rx).await;
            let _ = tracker_done_tx.send(outcome);
        });

        let result = self.inner.execute(request).await;

        let _ = request_done_tx.send(());
        match tracker_done_rx.await {
            Ok(outcome) => debug!("progress tracker finished: {:?}", outcome),
            Err(_) => warn!("progress tracker stopped without reporting"),
        }

        result
    }
}

struct Tracker {
    progress: Arc<dyn Progress>,
    live: Arc<dyn LiveOutput>,
    polling_interval: Duration,
}

impl Tracker {
    async fn run(self, mut request_done: oneshot::Receiver<()>) -> TrackerOutcome {
        if !self.track_body(&mut request_done).await {
            return TrackerOutcome::EndedEarly;
        }
        let ticks = self.log_elapsed(request_done).await;
        TrackerOutcome::Waited { ticks }
    }

    /// Returns `false` when the request finished before the body did.
    async fn track_body(&self, request_done: &mut oneshot::Receiver<()>) -> bool {
        loop {
            if fired(request_done) {
                self.progress.end();
                debug!("request completed before its body was fully sent");
                return false;
            }

            let total = self.progress.total();
            if total < 0 || self.progress.current() == total {
                self.progress.end();
                return true;
            }

            tokio::select! {
                biased;
                _ = &mut *request_done => {
                    self.progress.end();
                    debug!("request completed before its body was fully sent");
                    return false;
                }
                _ = sleep(self.polling_interval) => {}
            }
        }
    }

    /// Emits one elapsed-time line per interval until the request is done.
    async fn log_elapsed(&self, mut request_done: oneshot::Receiver<()>) -> u64 {
        let started = match self.live.start() {
            Ok(()) => true,
            Err(e) => {
                warn!("not reporting elapsed time: {}", e);
                false
            }
        };

        let start = Instant::now();
        let mut ticker = interval_at(start + self.polling_interval, self.polling_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut ticks = 0;
        loop {
            tokio::select! {
                biased;
                _ = &mut request_done => break,
                now = ticker.tick() => {
                    ticks += 1;
                    if !started {
                        continue;
                    }
                    let line = format!(
                        "{} elapsed, waiting for response from Ops Manager...",
                        format_elapsed(now.duration_since(start))
                    );
                    if let Err(e) = self.live.write_line(&line) {
                        warn!("could not report elapsed time: {}", e);
                    }
                }
            }
        }

        if started {
            self.live.stop();
        }
        ticks
    }
}

fn fired(signal: &mut oneshot::Receiver<()>) -> bool {
    !matches!(signal.try_recv(), Err(TryRecvError::Empty))
}

/// Render a duration rounded to whole seconds, e.g. `5s`, `1m5s`, `2h0m3s`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = (elapsed.as_millis() + 500) / 1000;
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "0s");
        assert_eq!(format_elapsed(Duration::from_millis(4_600)), "5s");
        assert_eq!(format_elapsed(Duration::from_secs(65)), "1m5s");
        assert_eq!(format_elapsed(Duration::from_secs(3_603)), "1h0m3s");
    }
}
