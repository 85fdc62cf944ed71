//! End-to-end tests driving the coordinator, matcher thread, and router
//! thread together. Burst and cancellation tests use a dataset sized so a
//! single scan comfortably outlasts the back-to-back calls that race it.

use std::sync::mpsc;
use std::time::Duration;

use serde_json::json;

use super::record::{Record, RecordId};
use super::SearchCoordinator;

const RESULT_WAIT: Duration = Duration::from_secs(5);
const SILENCE_WAIT: Duration = Duration::from_millis(300);

/// Big enough that one scan takes a few milliseconds on any machine.
const BURST_DATASET: i64 = 200_000;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn sample_records(count: i64) -> Vec<Record> {
    (0..count)
        .map(|i| {
            Record::new(
                i,
                [format!("row-1.item-{i}.x{i}"), format!("row-2.item-{i}.y{i}")],
            )
        })
        .collect()
}

fn coordinator_with(records: Vec<Record>) -> (SearchCoordinator, mpsc::Receiver<Vec<RecordId>>) {
    init_logging();
    let (tx, rx) = mpsc::channel();
    let coordinator = SearchCoordinator::new("test", move |ids| {
        let _ = tx.send(ids);
    })
    .expect("coordinator threads should spawn");
    coordinator.initialize(records);
    (coordinator, rx)
}

fn ids(values: impl IntoIterator<Item = i64>) -> Vec<RecordId> {
    values.into_iter().map(RecordId::from).collect()
}

#[test]
fn delivers_matching_ids_in_dataset_order() {
    let (coordinator, results) = coordinator_with(sample_records(100));

    coordinator.search("row-2");
    let delivered = results.recv_timeout(RESULT_WAIT).unwrap();
    assert_eq!(delivered, ids(0..100));
}

#[test]
fn trailing_delimiter_yields_a_single_hit() {
    let (coordinator, results) = coordinator_with(sample_records(100));

    coordinator.search("row-1.item-10.");
    assert_eq!(results.recv_timeout(RESULT_WAIT).unwrap(), ids([10]));
}

#[test]
fn accented_uppercase_query_matches_through_the_full_stack() {
    let (coordinator, results) = coordinator_with(sample_records(100));

    coordinator.search("rŐw-1.Ítém-1.");
    assert_eq!(results.recv_timeout(RESULT_WAIT).unwrap(), ids([1]));
}

#[test]
fn search_before_initialize_yields_an_empty_result() {
    init_logging();
    let (tx, rx) = mpsc::channel();
    let coordinator = SearchCoordinator::new("uninitialized", move |found| {
        let _ = tx.send(found);
    })
    .unwrap();

    coordinator.search("row-1");
    assert_eq!(rx.recv_timeout(RESULT_WAIT).unwrap(), Vec::<RecordId>::new());
}

#[test]
fn burst_delivers_only_first_and_last_results() {
    let (coordinator, results) = coordinator_with(sample_records(BURST_DATASET));

    coordinator.search("row-2.item-1.");
    coordinator.search("row-2");
    coordinator.search("row-2.item-1");

    let first = results.recv_timeout(RESULT_WAIT).unwrap();
    assert_eq!(first, ids([1]));

    // Ids whose decimal form starts with 1, in dataset order: the middle
    // query's full result set must never show up in between.
    let expected = ids((0..BURST_DATASET).filter(|i| i.to_string().starts_with('1')));
    let second = results.recv_timeout(RESULT_WAIT).unwrap();
    assert_eq!(second, expected);

    assert!(
        results.recv_timeout(SILENCE_WAIT).is_err(),
        "exactly two results expected for a three-query burst"
    );
}

#[test]
fn cancel_suppresses_the_in_flight_result() {
    let (coordinator, results) = coordinator_with(sample_records(BURST_DATASET));

    coordinator.search("row-2.item-1.");
    coordinator.cancel();

    assert!(
        results.recv_timeout(SILENCE_WAIT).is_err(),
        "cancelled search must never invoke the callback"
    );
}

#[test]
fn cancel_drops_the_queued_query_too() {
    let (coordinator, results) = coordinator_with(sample_records(BURST_DATASET));

    coordinator.search("row-1.item-10.");
    coordinator.search("row-2");
    coordinator.cancel();

    assert!(results.recv_timeout(SILENCE_WAIT).is_err());
}

#[test]
fn search_after_cancel_rearms_delivery() {
    let (coordinator, results) = coordinator_with(sample_records(BURST_DATASET));

    coordinator.search("row-1.item-10.");
    coordinator.cancel();
    coordinator.search("row-2.item-42.");

    // The later search resets suppression, so the first query's result is
    // delivered after all, followed by the queued one.
    assert_eq!(results.recv_timeout(RESULT_WAIT).unwrap(), ids([10]));
    assert_eq!(results.recv_timeout(RESULT_WAIT).unwrap(), ids([42]));
}

#[test]
fn dataset_replacement_applies_to_subsequent_searches() {
    let (coordinator, results) = coordinator_with(sample_records(100));

    coordinator.search("row-2.item-5.");
    assert_eq!(results.recv_timeout(RESULT_WAIT).unwrap(), ids([5]));

    coordinator.initialize(vec![Record::new("swap", ["entirely new data"])]);
    coordinator.search("row-2.item-5.");
    assert_eq!(results.recv_timeout(RESULT_WAIT).unwrap(), Vec::<RecordId>::new());

    coordinator.search("entirely");
    assert_eq!(
        results.recv_timeout(RESULT_WAIT).unwrap(),
        vec![RecordId::from("swap")]
    );
}

#[test]
fn records_ingest_from_their_json_shape() {
    init_logging();
    let records: Vec<Record> = serde_json::from_value(json!([
        { "id": 7, "fields": ["Première Étage"] },
        { "id": "attic", "fields": ["tetőtér"] },
    ]))
    .unwrap();

    let (coordinator, results) = coordinator_with(records);

    coordinator.search("premiere");
    assert_eq!(results.recv_timeout(RESULT_WAIT).unwrap(), ids([7]));

    coordinator.search("tetoter");
    assert_eq!(
        results.recv_timeout(RESULT_WAIT).unwrap(),
        vec![RecordId::from("attic")]
    );
}
