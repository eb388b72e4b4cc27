//! # ladiowatch
//!
//! Watches the NetLadio directory service and reports programs going on and
//! off the air.
//!
//! ## Architecture
//!
//! ```text
//! Fetcher → SnapshotParser → diff against ProgramStore → events
//! ```
//!
//! The [`Watcher`](watcher::Watcher) polls a fixed URL for a gzip-compressed,
//! Shift-JIS encoded headline payload, parses it into a set of
//! [`Program`](domain::Program) records, and diffs it against the previous
//! snapshot. New identities are announced as `Begun`, vanished identities as
//! `Finished`, and the current set stays readable from any thread.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ladiowatch::config::WatcherConfig;
//! use ladiowatch::watcher::{Watcher, WatcherEvent};
//!
//! # async fn demo() -> ladiowatch::app::Result<()> {
//! let watcher = Arc::new(Watcher::new(WatcherConfig::default())?);
//! let mut events = watcher.subscribe();
//! watcher.start()?;
//!
//! while let Ok(event) = events.recv().await {
//!     match event {
//!         WatcherEvent::Begun(p) => println!("on air: {}", p.title),
//!         WatcherEvent::Finished(p) => println!("off air: {}", p.title),
//!         WatcherEvent::Error(e) => eprintln!("update failed: {e}"),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Error types shared across the crate.
pub mod app;

/// Command-line interface and interactive console.
pub mod cli;

/// Watcher configuration with interval parsing helpers.
pub mod config;

/// Core domain model: the [`Program`](domain::Program) record.
pub mod domain;

/// HTTP fetching behind an async trait seam.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for snapshot fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Headline payload parsing.
///
/// Decompresses, decodes and parses the upstream `KEY=VALUE` line format
/// into a snapshot of [`Program`](domain::Program)s.
pub mod parser;

/// Shared snapshot store read by arbitrary threads.
pub mod store;

/// Poll loop, lifecycle control and event fan-out.
pub mod watcher;
