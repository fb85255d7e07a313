//! Queue error types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Queue is empty")]
    Empty,

    #[error("Index out of range: {index} (queue size is {size})")]
    IndexOutOfRange { index: usize, size: usize },

    #[error("Lock poisoned: {what}")]
    Poisoned { what: &'static str },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
