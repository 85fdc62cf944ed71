use std::io;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use log::trace;

use super::commands::{SearchCommand, SearchResults};
use super::engine::SearchEngine;

/// Launches the background matcher thread and returns its channel ends.
///
/// The thread is named after the coordinator's opaque identifier so that
/// multiple coordinators can be told apart in logs and debuggers; the id
/// has no other job.
pub(crate) fn spawn(
    name: &str,
) -> io::Result<(Sender<SearchCommand>, Receiver<SearchResults>)> {
    let (command_tx, command_rx) = mpsc::channel();
    let (result_tx, result_rx) = mpsc::channel();

    thread::Builder::new()
        .name(format!("{name}-matcher"))
        .spawn(move || worker_loop(&command_rx, &result_tx))?;

    Ok((command_tx, result_rx))
}

/// Processes one command fully before looking at the next, so dataset
/// replacement never races a scan.
fn worker_loop(command_rx: &Receiver<SearchCommand>, result_tx: &Sender<SearchResults>) {
    let mut engine = SearchEngine::default();

    while let Ok(command) = command_rx.recv() {
        match command {
            SearchCommand::Initialize { records } => engine.replace_dataset(records),
            SearchCommand::Query { text } => {
                let Some(text) = newest_query(command_rx, &mut engine, text) else {
                    break;
                };
                let ids = engine.search(&text);
                trace!("query {text:?} matched {} records", ids.len());
                if result_tx.send(SearchResults { ids }).is_err() {
                    break;
                }
            }
            SearchCommand::Shutdown => break,
        }
    }
    trace!("matcher thread stopping");
}

/// Drains commands already buffered in the channel before scanning.
///
/// A burst of queries that piled up while the previous scan ran collapses
/// to the newest one; dataset replacements that arrived ahead of the scan
/// are applied first, in arrival order. Returns `None` when a shutdown was
/// queued behind the query.
fn newest_query(
    command_rx: &Receiver<SearchCommand>,
    engine: &mut SearchEngine,
    mut text: String,
) -> Option<String> {
    loop {
        match command_rx.try_recv() {
            Ok(SearchCommand::Query { text: newer }) => {
                trace!("superseding buffered query {text:?}");
                text = newer;
            }
            Ok(SearchCommand::Initialize { records }) => engine.replace_dataset(records),
            Ok(SearchCommand::Shutdown) => return None,
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => return Some(text),
        }
    }
}
