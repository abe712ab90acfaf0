use std::sync::Mutex;
use std::sync::mpsc;
use std::thread;

use tracing::debug;

use super::classifier::ClassifyAddress;
use super::types::{ResultEntry, WorkItem};

/// Runs `addresses` through `classifier` on a fixed pool of `workers`
/// threads and returns one entry per input, sorted by original index.
///
/// All work items are enqueued up front; the shared receiver makes the claim
/// atomic, and a drained queue ends each worker's loop. Completed entries
/// flow over a second channel to a collector on the calling thread, which
/// invokes `on_result` as each address finishes (completion order, not
/// input order). No lock is held across the network probe. The call returns
/// only once every item is processed and every worker has exited.
pub fn run_pool<C, F>(
    addresses: &[String],
    workers: usize,
    classifier: &C,
    mut on_result: F,
) -> Vec<ResultEntry>
where
    C: ClassifyAddress + Sync,
    F: FnMut(&ResultEntry),
{
    let worker_count = workers.max(1);

    let (work_tx, work_rx) = mpsc::channel::<WorkItem>();
    for (index, address) in addresses.iter().enumerate() {
        work_tx
            .send(WorkItem {
                index,
                address: address.clone(),
            })
            .expect("work queue receiver is held by this function");
    }
    // Close the queue so workers stop once it drains.
    drop(work_tx);
    let queue = Mutex::new(work_rx);

    let (result_tx, result_rx) = mpsc::channel::<ResultEntry>();
    let mut entries = Vec::with_capacity(addresses.len());

    debug!(items = addresses.len(), workers = worker_count, "pool started");
    thread::scope(|scope| {
        for _ in 0..worker_count {
            let result_tx = result_tx.clone();
            let queue = &queue;
            scope.spawn(move || {
                loop {
                    let claimed = queue.lock().ok().and_then(|rx| rx.recv().ok());
                    let Some(item) = claimed else { break };
                    let outcome = classifier.classify(&item.address);
                    let entry = ResultEntry {
                        index: item.index,
                        address: item.address,
                        outcome,
                    };
                    if result_tx.send(entry).is_err() {
                        break;
                    }
                }
            });
        }
        // Only worker clones remain; the collector ends when they all exit.
        drop(result_tx);
        for entry in result_rx.iter() {
            on_result(&entry);
            entries.push(entry);
        }
    });
    debug!(items = entries.len(), "pool drained");

    entries.sort_unstable_by_key(|entry| entry.index);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Outcome;
    use std::collections::HashSet;

    /// Deterministic, network-free stand-in for the real classifier.
    struct StubClassifier;

    impl ClassifyAddress for StubClassifier {
        fn classify(&self, address: &str) -> Outcome {
            if address.trim().is_empty() {
                Outcome::Blank
            } else if !address.contains('@') {
                Outcome::InvalidFormat
            } else if address.starts_with("nomx") {
                Outcome::NoMailExchange
            } else if address.len() % 2 == 0 {
                Outcome::Valid
            } else {
                Outcome::NonValid
            }
        }
    }

    fn synthetic_input(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| match i % 5 {
                0 => String::new(),
                1 => format!("user{i}"),
                2 => format!("nomx{i}@example.com"),
                3 => format!("user{i}@example.com"),
                _ => format!("other{i}@example.org"),
            })
            .collect()
    }

    #[test]
    fn outcome_sequence_is_identical_across_worker_counts() {
        let input = synthetic_input(1_000);
        let expected: Vec<Outcome> = input
            .iter()
            .map(|address| StubClassifier.classify(address))
            .collect();

        for workers in [1, 5, 50] {
            let entries = run_pool(&input, workers, &StubClassifier, |_| {});
            let outcomes: Vec<Outcome> = entries.iter().map(|e| e.outcome).collect();
            assert_eq!(outcomes, expected, "workers = {workers}");
        }
    }

    #[test]
    fn every_index_appears_exactly_once_in_order() {
        let input = synthetic_input(257);
        let entries = run_pool(&input, 8, &StubClassifier, |_| {});
        assert_eq!(entries.len(), input.len());
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.index, i);
            assert_eq!(entry.address, input[i]);
        }
    }

    #[test]
    fn callback_sees_every_entry_exactly_once() {
        let input = synthetic_input(100);
        let mut seen = HashSet::new();
        let entries = run_pool(&input, 4, &StubClassifier, |entry| {
            assert!(seen.insert(entry.index), "duplicate index {}", entry.index);
        });
        assert_eq!(seen.len(), entries.len());
    }

    #[test]
    fn zero_workers_clamps_to_one() {
        let input = synthetic_input(10);
        let entries = run_pool(&input, 0, &StubClassifier, |_| {});
        assert_eq!(entries.len(), 10);
    }

    #[test]
    fn empty_input_returns_empty() {
        let entries = run_pool(&[], 4, &StubClassifier, |_| {});
        assert!(entries.is_empty());
    }

    #[test]
    fn blank_lines_classify_blank_regardless_of_timing() {
        let input: Vec<String> = (0..64)
            .map(|i| {
                if i % 2 == 0 {
                    String::new()
                } else {
                    format!("user{i}@example.com")
                }
            })
            .collect();
        for workers in [1, 7, 32] {
            let entries = run_pool(&input, workers, &StubClassifier, |_| {});
            for (i, entry) in entries.iter().enumerate() {
                if i % 2 == 0 {
                    assert_eq!(entry.outcome, Outcome::Blank);
                }
            }
        }
    }
}
