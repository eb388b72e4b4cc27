//! Poll loop and lifecycle control.
//!
//! A [`Watcher`] owns the background task that periodically fetches the
//! program listing, diffs it against the previous snapshot and broadcasts
//! [`WatcherEvent`]s. At most one poll loop runs per watcher instance.

pub mod events;

pub use events::WatcherEvent;

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::app::{Result, WatchError};
use crate::config::WatcherConfig;
use crate::domain::Program;
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::parser::SnapshotParser;
use crate::store::ProgramStore;
use events::EventBus;

/// Watches the directory service for programs going on and off the air.
pub struct Watcher {
    inner: Arc<Inner>,
}

struct Inner {
    config: WatcherConfig,
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    parser: SnapshotParser,
    store: ProgramStore,
    events: EventBus,
    /// Cancellation flag of the active run; `None` while stopped.
    run: Mutex<Option<Arc<AtomicBool>>>,
}

enum CycleOutcome {
    Continue,
    Cancelled,
}

impl Watcher {
    pub fn new(config: WatcherConfig) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(config.fetch_timeout));
        Self::with_fetcher(config, fetcher)
    }

    /// Build a watcher with an injected transport.
    pub fn with_fetcher(
        config: WatcherConfig,
        fetcher: Arc<dyn Fetcher + Send + Sync>,
    ) -> Result<Self> {
        let parser = SnapshotParser::new(&config.encoding)?;

        Ok(Self {
            inner: Arc::new(Inner {
                config,
                fetcher,
                parser,
                store: ProgramStore::new(),
                events: EventBus::new(),
                run: Mutex::new(None),
            }),
        })
    }

    /// Begin polling. Must be called from within a tokio runtime.
    ///
    /// Clears the snapshot store, then spawns the poll loop as a background
    /// task. Fails with [`WatchError::AlreadyRunning`] if a loop is active.
    pub fn start(&self) -> Result<()> {
        let mut run = self.inner.run.lock().expect("lifecycle lock poisoned");
        if run.is_some() {
            return Err(WatchError::AlreadyRunning);
        }

        self.inner.store.clear();

        let cancel = Arc::new(AtomicBool::new(false));
        *run = Some(cancel.clone());

        let inner = self.inner.clone();
        tokio::spawn(poll_loop(inner, cancel));

        info!(url = %self.inner.config.url, "watcher started");
        Ok(())
    }

    /// Request the poll loop to stop. Idempotent; does not wait for the
    /// in-flight cycle, whose result is discarded.
    pub fn stop(&self) {
        let mut run = self.inner.run.lock().expect("lifecycle lock poisoned");
        if let Some(cancel) = run.take() {
            cancel.store(true, Ordering::SeqCst);
            info!("watcher stop requested");
        }
    }

    /// A copy of the current program set. Safe to call in any state; while
    /// stopped it returns the last published snapshot (or an empty set).
    pub fn programs(&self) -> HashSet<Program> {
        self.inner.store.snapshot()
    }

    /// Subscribe to Begun / Finished / Error notifications.
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<WatcherEvent> {
        self.inner.events.subscribe()
    }
}

impl Drop for Watcher {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn poll_loop(inner: Arc<Inner>, cancel: Arc<AtomicBool>) {
    loop {
        match poll_cycle(&inner, &cancel).await {
            Ok(CycleOutcome::Continue) => {}
            Ok(CycleOutcome::Cancelled) => break,
            Err(err) => {
                // A failure observed after a stop request is not reported;
                // the loop was going down anyway.
                if !cancel.load(Ordering::SeqCst) {
                    warn!("program list update failed: {err}");
                    inner.events.publish(WatcherEvent::Error(Arc::new(err)));
                }
                break;
            }
        }

        tokio::time::sleep(inner.config.poll_interval).await;
    }

    // Release the run slot so start() becomes legal again, unless a
    // stop/start pair already installed a fresh cancellation flag.
    let mut run = inner.run.lock().expect("lifecycle lock poisoned");
    if let Some(current) = run.as_ref() {
        if Arc::ptr_eq(current, &cancel) {
            *run = None;
        }
    }
    debug!("poll loop exited");
}

/// One fetch→parse→diff→notify iteration.
async fn poll_cycle(inner: &Inner, cancel: &AtomicBool) -> Result<CycleOutcome> {
    let body = inner.fetcher.fetch(&inner.config.url).await?;
    let next = inner.parser.parse(&body)?;

    let mut current = inner.store.guard();

    // Cancellation is observed once per cycle, under the store lock and
    // before any notification: a stopped watcher discards the candidate
    // snapshot without raising Finished events.
    if cancel.load(Ordering::SeqCst) {
        return Ok(CycleOutcome::Cancelled);
    }

    // All Begun notifications for the cycle precede all Finished
    // notifications, and the swap follows both.
    for program in next.difference(&current) {
        inner.events.publish(WatcherEvent::Begun(program.clone()));
    }
    for program in current.difference(&next) {
        inner.events.publish(WatcherEvent::Finished(program.clone()));
    }

    debug!(programs = next.len(), "snapshot updated");
    *current = next;

    Ok(CycleOutcome::Continue)
}
