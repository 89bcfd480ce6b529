//! Single-line terminal output that rewrites itself in place.

use crate::error::{Error, Result};

use console::Term;
use std::sync::{Mutex, PoisonError};

/// A line-oriented writer with an explicit running window.
///
/// Lines written between [`start`](LiveOutput::start) and
/// [`stop`](LiveOutput::stop) replace each other. On a terminal the previous
/// line is erased; anywhere else lines are separated by a bare `\r`.
pub trait LiveOutput: Send + Sync {
    /// Enter the running state. Fails if already running.
    fn start(&self) -> Result<()>;

    /// Replace the current line. Fails unless running.
    fn write_line(&self, line: &str) -> Result<()>;

    /// Finalize the current line and go back to idle. No-op when idle.
    fn stop(&self);
}

#[derive(Debug, Default)]
struct LiveState {
    started: bool,
    dirty: bool,
}

/// [`LiveOutput`] drawing on a [`console::Term`].
///
/// The terminal is shared by every transport, so one writer should be created
/// per process and handed to each transport that needs it.
#[derive(Debug)]
pub struct LiveWriter {
    term: Option<Term>,
    state: Mutex<LiveState>,
}

impl LiveWriter {
    /// Create a writer drawing on the given terminal.
    pub fn new(term: Term) -> Self {
        Self {
            term: Some(term),
            state: Mutex::new(LiveState::default()),
        }
    }

    /// Create a writer drawing on standard error.
    pub fn stderr() -> Self {
        Self::new(Term::stderr())
    }

    /// Create a writer that enforces the state machine but draws nothing.
    pub fn hidden() -> Self {
        Self {
            term: None,
            state: Mutex::new(LiveState::default()),
        }
    }

    /// Whether the writer is between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .started
    }
}

impl LiveOutput for LiveWriter {
    fn start(&self) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.started {
            return Err(Error::LiveWriterMisuse("start called while already running"));
        }
        state.started = true;
        state.dirty = false;
        Ok(())
    }

    fn write_line(&self, line: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.started {
            return Err(Error::LiveWriterMisuse("write called while idle"));
        }
        if let Some(term) = &self.term {
            if state.dirty {
                if term.is_term() {
                    term.clear_line()?;
                } else {
                    // Pipes and log files get no escape codes.
                    term.write_str("\r")?;
                }
            }
            term.write_str(line)?;
        }
        state.dirty = true;
        Ok(())
    }

    fn stop(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if !state.started {
            return;
        }
        if let (Some(term), true) = (&self.term, state.dirty) {
            // Keep the last line on screen.
            let _ = term.write_line("");
        }
        *state = LiveState::default();
    }
}
