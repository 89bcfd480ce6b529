//! Tests for the progress module functionality.
//!
//! This file contains tests for progress bar styling, the byte counters and
//! the live writer.

use bytes::Bytes;
use futures::{stream, StreamExt};
use opsman::progress::{ByteCounter, LiveOutput, LiveWriter, Progress, ProgressBarOpts, ProgressView};
use opsman::Error;
use std::io;
use std::sync::Arc;

mod common;
use common::helpers::*;

#[test]
fn test_progress_bar_opts_default() {
    let opts = ProgressBarOpts::default();
    assert!(opts.is_enabled());
    assert!(!opts.clears_on_finish());
    let pb = opts.to_progress_bar(100);
    assert_eq!(pb.length(), Some(100));
}

#[test]
fn test_progress_bar_opts_hidden() {
    let opts = ProgressBarOpts::hidden();
    assert!(!opts.is_enabled());
    assert!(opts.to_progress_bar(100).is_hidden());
}

#[test]
fn test_progress_bar_opts_custom() {
    let mut opts = ProgressBarOpts::new(
        Some(ProgressBarOpts::TEMPLATE_PERCENT.into()),
        Some(ProgressBarOpts::CHARS_FINE.into()),
        true,
        false,
    );
    opts.set_clear(true);
    assert!(opts.clears_on_finish());
    let pb = opts.to_progress_bar(42);
    assert_eq!(pb.length(), Some(42));
}

#[test]
fn test_progress_bar_opts_invalid_template_falls_back() {
    let opts = ProgressBarOpts::new(Some("{wide_bar".into()), None, true, false);
    // Must not panic.
    let _style = opts.to_progress_style();
}

#[tokio::test]
async fn test_view_counts_a_counted_stream() {
    let view = Arc::new(ProgressView::hidden());
    view.set_total(1024);
    view.kickoff();

    let content = create_test_content(1024);
    let chunks: Vec<io::Result<Bytes>> = content
        .chunks(100)
        .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
        .collect();
    let counter = ByteCounter::new(stream::iter(chunks), view.clone());
    let collected: Vec<io::Result<Bytes>> = counter.collect().await;

    assert_eq!(collected.len(), 11);
    assert_eq!(view.current(), view.total());
    view.end();
    assert!(!view.is_running());
}

#[test]
fn test_view_is_reusable_across_requests() {
    let view = ProgressView::hidden();
    for total in [10, 20] {
        view.set_total(total);
        view.kickoff();
        view.add(total as u64);
        assert_eq!(view.current(), total);
        view.end();
    }
}

#[test]
fn test_live_writer_state_machine() {
    let writer = LiveWriter::hidden();
    assert!(!writer.is_running());
    assert!(matches!(
        writer.write_line("too early"),
        Err(Error::LiveWriterMisuse(_))
    ));

    writer.start().unwrap();
    assert!(matches!(writer.start(), Err(Error::LiveWriterMisuse(_))));
    writer.write_line(&elapsed_line("1s")).unwrap();
    writer.stop();
    writer.stop();
    assert!(!writer.is_running());

    writer.start().unwrap();
    writer.stop();
}

#[cfg(unix)]
#[test]
fn test_live_writer_without_tty_writes_plain_carriage_returns() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let term = console::Term::read_write_pair(
        file.reopen().unwrap(),
        file.as_file().try_clone().unwrap(),
    );
    let writer = LiveWriter::new(term);

    writer.start().unwrap();
    writer.write_line(&elapsed_line("1s")).unwrap();
    writer.write_line(&elapsed_line("2s")).unwrap();
    writer.stop();

    let written = std::fs::read_to_string(file.path()).unwrap();
    assert_eq!(
        written,
        format!("{}\r{}\n", elapsed_line("1s"), elapsed_line("2s"))
    );
    assert!(!written.contains('\u{1b}'));
}
