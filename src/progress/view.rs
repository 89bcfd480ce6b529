//! Byte counters shared between a body stream and the progress tracker.
//!
//! [`Progress`] is the capability the transport depends on; [`ProgressView`]
//! is the terminal implementation backed by an indicatif bar.

use super::{ByteCounter, ProgressBarOpts};

use bytes::Bytes;
use futures::Stream;
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Counters observed by the progress tracker.
///
/// `current` is advanced from whichever task reads the body while `total`
/// and `current` are read from the tracker task, so implementations must be
/// safe to share between threads.
pub trait Progress: Send + Sync {
    /// Record the expected byte count. A negative value means unknown.
    fn set_total(&self, total: i64);

    /// Reset `current` to zero and begin drawing.
    fn kickoff(&self);

    /// Finalize the bar. Calls after the first are no-ops.
    fn end(&self);

    /// Advance `current` by `delta` bytes.
    fn add(&self, delta: u64);

    /// Bytes counted since the last kickoff.
    fn current(&self) -> i64;

    /// Expected byte count, negative when unknown.
    fn total(&self) -> i64;
}

/// A progress bar over a single request or response body.
///
/// The view is reused across requests: `set_total` and `kickoff` start a new
/// bar, `end` finishes it.
pub struct ProgressView {
    total: AtomicI64,
    current: AtomicI64,
    running: AtomicBool,
    bar: Mutex<ProgressBar>,
    opts: ProgressBarOpts,
}

impl ProgressView {
    /// Create a view rendering with the given options.
    pub fn new(opts: ProgressBarOpts) -> Self {
        Self {
            total: AtomicI64::new(0),
            current: AtomicI64::new(0),
            running: AtomicBool::new(false),
            bar: Mutex::new(ProgressBar::hidden()),
            opts,
        }
    }

    /// Create a view that counts bytes without drawing anything.
    pub fn hidden() -> Self {
        Self::new(ProgressBarOpts::hidden())
    }

    /// Wrap `stream` so every chunk it yields is counted by this view.
    pub fn new_counter<S, E>(self: &Arc<Self>, stream: S) -> ByteCounter<S>
    where
        S: Stream<Item = Result<Bytes, E>> + Unpin,
    {
        ByteCounter::new(stream, self.clone())
    }

    /// Whether a bar is currently being drawn.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn bar(&self) -> ProgressBar {
        self.bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Default for ProgressView {
    fn default() -> Self {
        Self::new(ProgressBarOpts::default())
    }
}

impl Progress for ProgressView {
    fn set_total(&self, total: i64) {
        self.total.store(total, Ordering::SeqCst);
    }

    fn kickoff(&self) {
        self.current.store(0, Ordering::SeqCst);

        // An empty or unknown length gets no bar at all.
        let bar = match u64::try_from(self.total()) {
            Ok(len) if len > 0 => self.opts.to_progress_bar(len),
            _ => ProgressBar::hidden(),
        };
        *self.bar.lock().unwrap_or_else(PoisonError::into_inner) = bar;
        self.running.store(true, Ordering::SeqCst);
    }

    fn end(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        let bar = self.bar();
        if self.opts.clear {
            bar.finish_and_clear();
        } else {
            bar.finish();
        }
    }

    fn add(&self, delta: u64) {
        self.current.fetch_add(delta as i64, Ordering::SeqCst);
        self.bar().inc(delta);
    }

    fn current(&self) -> i64 {
        self.current.load(Ordering::SeqCst)
    }

    fn total(&self) -> i64 {
        self.total.load(Ordering::SeqCst)
    }
}
