use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use log::{debug, trace};

use super::commands::{SearchCommand, SearchResults};
use super::record::{Record, RecordId};
use super::worker;
use crate::error::SpawnError;

/// Callback invoked with the ids of matching records, in dataset order.
///
/// Runs on the coordinator's router thread, never on the caller's thread.
pub type ResultCallback = Box<dyn FnMut(Vec<RecordId>) + Send>;

/// Caller-facing half of the search subsystem.
///
/// Owns the pending-request bookkeeping and talks to the background matcher
/// exclusively through the channel protocol. All public operations are
/// non-blocking; outcomes surface later through the result callback.
///
/// Rapid `search` calls coalesce: at most one query is in flight at the
/// matcher and at most one is queued behind it, with a newer call
/// overwriting the queued one. A burst of keystroke-driven queries thus
/// costs at most two scans, and no stale intermediate result is ever
/// delivered.
pub struct SearchCoordinator {
    command_tx: Sender<SearchCommand>,
    state: Arc<Mutex<RequestState>>,
}

impl SearchCoordinator {
    /// Starts the matcher and router threads.
    ///
    /// `id` only namespaces the background threads; it carries no semantic
    /// weight. `on_results` runs on the router thread each time a
    /// non-suppressed result arrives.
    pub fn new<F>(id: &str, on_results: F) -> Result<Self, SpawnError>
    where
        F: FnMut(Vec<RecordId>) + Send + 'static,
    {
        let (command_tx, result_rx) = worker::spawn(id)?;
        let state = Arc::new(Mutex::new(RequestState::Idle));

        let router_state = Arc::clone(&state);
        let router_tx = command_tx.clone();
        thread::Builder::new()
            .name(format!("{id}-router"))
            .spawn(move || {
                route_results(&result_rx, &router_tx, &router_state, Box::new(on_results));
            })
            .map_err(SpawnError::from)?;

        debug!("search coordinator {id:?} started");
        Ok(Self { command_tx, state })
    }

    /// Replaces the matcher's dataset wholesale.
    ///
    /// Leaves the pending-request state untouched. May be called at any
    /// time; a replacement sent while a scan is in flight is applied once
    /// that scan completes, since the matcher processes one message at a
    /// time in arrival order.
    pub fn initialize(&self, records: Vec<Record>) {
        let _ = self.command_tx.send(SearchCommand::Initialize { records });
    }

    /// Requests a search; never blocks.
    ///
    /// If a query is already in flight the text is queued instead,
    /// overwriting any previously queued query (last writer wins — the
    /// overwritten query is never executed). Always resets suppression from
    /// an earlier [`cancel`](Self::cancel).
    pub fn search(&self, text: impl Into<String>) {
        match self.lock_state().on_search(text.into()) {
            Some(text) => {
                let _ = self.command_tx.send(SearchCommand::Query { text });
            }
            None => trace!("query queued behind in-flight search"),
        }
    }

    /// Marks the in-flight query's eventual result undeliverable and drops
    /// any queued query.
    ///
    /// Advisory only: a scan already running is not aborted, its result is
    /// simply discarded on arrival. A no-op while idle.
    pub fn cancel(&self) {
        self.lock_state().on_cancel();
    }

    fn lock_state(&self) -> MutexGuard<'_, RequestState> {
        // The state is a plain enum; a panicked holder cannot leave it
        // inconsistent, so poisoning is ignored.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        let _ = self.command_tx.send(SearchCommand::Shutdown);
    }
}

/// Receives matcher results, applies the result-arrival transition, and
/// invokes the caller's callback outside the state lock (so the callback
/// may re-enter `search`/`cancel`).
fn route_results(
    result_rx: &Receiver<SearchResults>,
    command_tx: &Sender<SearchCommand>,
    state: &Mutex<RequestState>,
    mut on_results: ResultCallback,
) {
    while let Ok(SearchResults { ids }) = result_rx.recv() {
        let action = state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_result();
        if action.deliver {
            on_results(ids);
        } else {
            trace!("dropping suppressed search result");
        }
        if let Some(text) = action.dispatch {
            let _ = command_tx.send(SearchCommand::Query { text });
        }
    }
    trace!("result router stopping");
}

/// Pending-request state, tagged so that illegal combinations (a queued
/// query while idle) are unrepresentable.
///
/// `suppressed` rides along with the in-flight slot rather than being a
/// state of its own: a cancelled query still occupies that slot until its
/// result arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RequestState {
    /// No query at the matcher.
    Idle,
    /// One query in flight; `suppressed` marks its result undeliverable.
    Searching { suppressed: bool },
    /// One query in flight plus the newest follow-up, dispatched when the
    /// in-flight result arrives.
    SearchingQueued { next: String, suppressed: bool },
}

/// What a result-arrival transition asks the router to do.
#[derive(Debug, PartialEq, Eq)]
struct ResultAction {
    /// Invoke the caller's callback with the arrived ids.
    deliver: bool,
    /// Queued query to send to the matcher next.
    dispatch: Option<String>,
}

impl RequestState {
    /// `search` transition. Returns the query to dispatch now, if any.
    fn on_search(&mut self, text: String) -> Option<String> {
        match self {
            Self::Idle => {
                *self = Self::Searching { suppressed: false };
                Some(text)
            }
            Self::Searching { .. } | Self::SearchingQueued { .. } => {
                *self = Self::SearchingQueued {
                    next: text,
                    suppressed: false,
                };
                None
            }
        }
    }

    /// `cancel` transition.
    fn on_cancel(&mut self) {
        match self {
            Self::Idle => {}
            Self::Searching { suppressed } => *suppressed = true,
            Self::SearchingQueued { .. } => *self = Self::Searching { suppressed: true },
        }
    }

    /// Result-arrival transition: whether to deliver, and what to dispatch.
    ///
    /// A result while idle is unsolicited and ignored. Suppression is
    /// carried over to a dispatched queued query; only a fresh `search`
    /// resets it.
    fn on_result(&mut self) -> ResultAction {
        match std::mem::replace(self, Self::Idle) {
            Self::Idle => ResultAction {
                deliver: false,
                dispatch: None,
            },
            Self::Searching { suppressed } => ResultAction {
                deliver: !suppressed,
                dispatch: None,
            },
            Self::SearchingQueued { next, suppressed } => {
                *self = Self::Searching { suppressed };
                ResultAction {
                    deliver: !suppressed,
                    dispatch: Some(next),
                }
            }
        }
    }
}
