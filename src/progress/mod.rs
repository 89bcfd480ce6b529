//! Progress module containing byte counting and terminal feedback.
//!
//! This module provides everything the progress transport drives while a
//! long-running upload or download is in flight.
//!
//! # Overview
//!
//! - `style` - Progress bar styling options and templates
//! - `view` - The [`Progress`] counters and the [`ProgressView`] bar
//! - `counter` - [`ByteCounter`], a pass-through stream feeding a [`Progress`]
//! - `live` - The [`LiveOutput`] line rewriter used for "elapsed" messages
//!
//! # Examples
//!
//! ## Counting a Body
//!
//! ```rust
//! use opsman::progress::{Progress, ProgressView};
//! use bytes::Bytes;
//! use futures::{stream, StreamExt};
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let view = Arc::new(ProgressView::hidden());
//! view.set_total(5);
//! view.kickoff();
//!
//! let body = stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(b"hello"))]);
//! let mut counted = view.new_counter(body);
//! while let Some(_chunk) = counted.next().await {}
//!
//! assert_eq!(view.current(), view.total());
//! view.end();
//! # }
//! ```
//!
//! ## Hidden Output
//!
//! ```rust
//! use opsman::progress::{LiveWriter, ProgressView};
//!
//! let view = ProgressView::hidden();
//! let live = LiveWriter::hidden();
//! ```

pub(crate) mod counter;
pub(crate) mod live;
pub(crate) mod style;
pub(crate) mod view;

pub use counter::ByteCounter;
pub use live::{LiveOutput, LiveWriter};
pub use style::ProgressBarOpts;
pub use view::{Progress, ProgressView};
