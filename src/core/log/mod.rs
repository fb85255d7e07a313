use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

static LOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Queue operation recorded in the log
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    Enqueue,
    Dequeue,
    Reverse,
    Destroy,
}

/// Outcome of a queue operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    Committed,
    Delivered,
    Failed,
}

/// Log entry recording an operation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry<T> {
    pub local_log_id: u64,
    pub op: Op,
    pub item: Option<T>,   // The item enqueued, dequeued or handed to cleanup
    pub state: State,
    pub size_after: usize, // Queue size once the operation finished
}

impl<T: std::fmt::Debug> Display for LogEntry<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogEntry {{ local_log_id: {}, op: {:?}, item: {:?}, state: {:?}, size_after: {} }}",
            self.local_log_id, self.op, self.item, self.state, self.size_after,
        )
    }
}

#[derive(Clone, Debug)]
/// Logger storing all entries
pub struct Logger<T> {
    pub(crate) entries: Vec<LogEntry<T>>,
}

impl<T: Clone> Logger<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Log an operation, returning its id
    pub fn log(&mut self, op: Op, item: Option<T>, state: State, size_after: usize) -> u64 {
        // --- Negative-space assertion: state must match operation ---
        match op {
            Op::Enqueue | Op::Reverse => assert!(
                state == State::Committed,
                "{op:?} must be Committed"
            ),
            Op::Dequeue => assert!(
                matches!(state, State::Delivered | State::Failed),
                "Dequeue must be Delivered or Failed"
            ),
            Op::Destroy => assert!(
                state == State::Delivered,
                "Destroy must deliver to cleanup"
            ),
        }

        // --- Negative-space assertion: only a delivered or enqueued op carries an item ---
        if matches!(op, Op::Reverse) || state == State::Failed {
            assert!(item.is_none(), "{op:?}/{state:?} must not carry an item");
        }

        let local_log_id = LOG_ID_COUNTER.fetch_add(1, Ordering::SeqCst);

        // --- Log entry insertion ---
        let before = self.entries.len();
        self.entries.push(LogEntry {
            local_log_id,
            op,
            item,
            state,
            size_after,
        });

        // --- Negative-space assertion: log length increased exactly by 1 ---
        assert_eq!(
            self.entries.len(),
            before + 1,
            "Logger must increase by exactly one entry"
        );
        tracing::debug!(local_log_id, ?op, ?state, size_after, "logged");
        local_log_id
    }

    /// All entries logged after `log_id`
    pub fn get_entries_since(&self, log_id: u64) -> Vec<LogEntry<T>> {
        self.entries
            .iter()
            .filter(|entry| entry.local_log_id > log_id)
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> &[LogEntry<T>] {
        &self.entries
    }
}

impl<T: Clone> Default for Logger<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Append entries to `path`, one JSON object per line
pub fn append_logs<T: Serialize>(log: &[LogEntry<T>], path: impl AsRef<Path>) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)?;

    for entry in log {
        let json = serde_json::to_string(entry).map_err(io::Error::other)?;
        writeln!(file, "{}", json)?;
    }
    Ok(())
}

/// Thread-safe wrapper
pub type SafeLogger<T> = Arc<Mutex<Logger<T>>>;
