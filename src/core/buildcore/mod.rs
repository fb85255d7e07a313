pub use crate::core::{
    error::{QueueError, QueueResult},
    log::{LogEntry, Logger, Op, SafeLogger, State},
    queue::{Queue, SafeQueue},
};
use std::sync::{Arc, Mutex, MutexGuard};

/// Queue plus operation log, shareable between threads.
///
/// Every call locks the queue first and the logger second, and keeps the
/// queue locked while logging so the log order matches the queue order.
pub struct QueueSystem<T> {
    queue: SafeQueue<T>,
    logger: SafeLogger<T>,
}

impl<T: Clone> QueueSystem<T> {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(Queue::new())),
            logger: Arc::new(Mutex::new(Logger::new())),
        }
    }

    /// Enqueue with logging
    pub fn enqueue(&self, item: T) -> QueueResult<()> {
        let mut queue = self.lock_queue()?;
        queue.enqueue(item.clone());
        self.lock_logger()?
            .log(Op::Enqueue, Some(item), State::Committed, queue.size());
        Ok(())
    }

    /// Dequeue with logging. An empty queue is logged as `Failed`.
    pub fn dequeue(&self) -> QueueResult<T> {
        let mut queue = self.lock_queue()?;
        let result = queue.dequeue();
        let mut logger = self.lock_logger()?;
        match &result {
            Ok(item) => logger.log(Op::Dequeue, Some(item.clone()), State::Delivered, queue.size()),
            Err(_) => logger.log(Op::Dequeue, None, State::Failed, queue.size()),
        };
        result
    }

    /// Copy of the item `index` positions from the front
    pub fn peek(&self, index: usize) -> QueueResult<T> {
        self.lock_queue()?.peek(index).cloned()
    }

    pub fn reverse(&self) -> QueueResult<()> {
        let mut queue = self.lock_queue()?;
        queue.reverse();
        self.lock_logger()?
            .log(Op::Reverse, None, State::Committed, queue.size());
        Ok(())
    }

    pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> QueueResult<bool> {
        Ok(self.lock_queue()?.all(predicate))
    }

    pub fn fold<A>(&self, initial: A, combine: impl FnMut(A, &T) -> A) -> QueueResult<A> {
        Ok(self.lock_queue()?.fold(initial, combine))
    }

    /// Get current queue state as `(size, is_empty)`
    pub fn queue_state(&self) -> QueueResult<(usize, bool)> {
        let queue = self.lock_queue()?;
        Ok((queue.size(), queue.is_empty()))
    }

    /// Expose logs
    pub fn logs(&self) -> QueueResult<Vec<LogEntry<T>>> {
        Ok(self.lock_logger()?.entries().to_vec())
    }

    /// Logs recorded after `log_id`
    pub fn logs_since(&self, log_id: u64) -> QueueResult<Vec<LogEntry<T>>> {
        Ok(self.lock_logger()?.get_entries_since(log_id))
    }

    /// Tear down the queue, passing each remaining item to `cleanup`.
    /// Returns the full operation log, including one `Destroy` entry per item.
    pub fn destroy(self, mut cleanup: impl FnMut(T)) -> QueueResult<Vec<LogEntry<T>>> {
        let queue = std::mem::take(&mut *self.lock_queue()?);
        let mut logger = self.lock_logger()?;
        let mut remaining = queue.size();
        queue.destroy(|item| {
            remaining -= 1;
            logger.log(Op::Destroy, Some(item.clone()), State::Delivered, remaining);
            cleanup(item);
        });
        Ok(std::mem::take(&mut logger.entries))
    }

    fn lock_queue(&self) -> QueueResult<MutexGuard<'_, Queue<T>>> {
        self.queue
            .lock()
            .map_err(|_| QueueError::Poisoned { what: "queue" })
    }

    fn lock_logger(&self) -> QueueResult<MutexGuard<'_, Logger<T>>> {
        self.logger
            .lock()
            .map_err(|_| QueueError::Poisoned { what: "logger" })
    }
}

impl<T: Clone> Default for QueueSystem<T> {
    fn default() -> Self {
        Self::new()
    }
}
