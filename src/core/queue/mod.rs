use std::fmt::{Debug, Formatter};
use std::mem;
use std::sync::{Arc, Mutex};

use slab::Slab;

use crate::core::error::{QueueError, QueueResult};

/// Key of a node inside the queue's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeId(usize);

struct Node<T> {
    data: T,
    next: Option<NodeId>,
}

/// Singly-linked FIFO queue.
///
/// Nodes live in a slab arena and are chained front to back through
/// `next` links. Vacated slots are recycled by the slab's free list, so
/// `enqueue` and `dequeue` stay O(1).
pub struct Queue<T> {
    nodes: Slab<Node<T>>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    size: usize,
}

impl<T> Queue<T> {
    /// Create a new, empty queue
    pub fn new() -> Self {
        let queue = Self {
            nodes: Slab::new(),
            front: None,
            back: None,
            size: 0,
        };
        ensures!(queue.is_queue());
        queue
    }

    /// Number of elements in the queue
    pub fn size(&self) -> usize {
        requires!(self.is_queue());
        self.size
    }

    pub fn len(&self) -> usize {
        self.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Append an item at the back
    pub fn enqueue(&mut self, item: T) {
        requires!(self.is_queue());
        let size_before = self.size;

        let id = NodeId(self.nodes.insert(Node { data: item, next: None }));
        match self.back {
            Some(back) => self.nodes[back.0].next = Some(id),
            None => self.front = Some(id),
        }
        self.back = Some(id);
        self.size += 1;

        tracing::trace!(size = self.size, "enqueue");
        ensures!(self.is_queue());
        ensures!(self.size == size_before + 1);
        ensures!(self.back == Some(id));
    }

    /// Remove and return the front item
    pub fn dequeue(&mut self) -> QueueResult<T> {
        requires!(self.is_queue());
        let Some(front) = self.front else {
            return Err(QueueError::Empty);
        };
        let size_before = self.size;

        let node = self.nodes.remove(front.0);
        self.front = node.next;
        if self.front.is_none() {
            self.back = None;
        }
        self.size -= 1;

        tracing::trace!(size = self.size, "dequeue");
        ensures!(self.is_queue());
        ensures!(self.size + 1 == size_before);
        Ok(node.data)
    }

    /// Borrow the item `index` positions from the front. O(index).
    pub fn peek(&self, index: usize) -> QueueResult<&T> {
        requires!(self.is_queue());
        if index >= self.size {
            return Err(QueueError::IndexOutOfRange {
                index,
                size: self.size,
            });
        }
        self.items()
            .nth(index)
            .ok_or(QueueError::IndexOutOfRange {
                index,
                size: self.size,
            })
    }

    /// Reverse the queue in place by flipping every `next` link.
    pub fn reverse(&mut self) {
        requires!(self.is_queue());
        if self.size <= 1 {
            return;
        }

        let mut prev = None;
        let mut cur = self.front;
        while let Some(id) = cur {
            let node = &mut self.nodes[id.0];
            cur = mem::replace(&mut node.next, prev);
            prev = Some(id);
        }
        mem::swap(&mut self.front, &mut self.back);

        tracing::trace!(size = self.size, "reverse");
        ensures!(self.is_queue());
    }

    /// True if every item satisfies `predicate`. Stops at the first failure.
    pub fn all(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        requires!(self.is_queue());
        self.items().all(predicate)
    }

    /// Left fold over the items, front to back.
    pub fn fold<A>(&self, initial: A, combine: impl FnMut(A, &T) -> A) -> A {
        requires!(self.is_queue());
        self.items().fold(initial, combine)
    }

    /// Tear the queue down, handing every item to `cleanup` front to back.
    pub fn destroy(mut self, mut cleanup: impl FnMut(T)) {
        requires!(self.is_queue());
        let released = self.size;

        let mut cur = self.front.take();
        self.back = None;
        while let Some(id) = cur {
            let node = self.nodes.remove(id.0);
            cur = node.next;
            self.size -= 1;
            cleanup(node.data);
        }

        tracing::trace!(released, "destroy");
        ensures!(self.nodes.is_empty());
    }

    fn items(&self) -> impl Iterator<Item = &T> + '_ {
        std::iter::successors(self.front, |id| self.nodes[id.0].next)
            .map(|id| &self.nodes[id.0].data)
    }

    /// Structural check: `front` reaches `back` in exactly `size - 1` steps,
    /// `back` terminates the chain, and the arena holds no other nodes.
    pub(crate) fn is_queue(&self) -> bool {
        if self.nodes.len() != self.size {
            return false;
        }
        let (Some(front), Some(back)) = (self.front, self.back) else {
            return self.size == 0 && self.front.is_none() && self.back.is_none();
        };

        let mut cur = front;
        // A cycle can never reach `back` within `size` steps.
        for _ in 1..self.size {
            if cur == back {
                return false;
            }
            match self.nodes.get(cur.0).and_then(|node| node.next) {
                Some(next) => cur = next,
                None => return false,
            }
        }
        cur == back && matches!(self.nodes.get(back.0), Some(node) if node.next.is_none())
    }
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Debug> Debug for Queue<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.items()).finish()
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

/// Thread-safe wrapper around the queue
pub type SafeQueue<T> = Arc<Mutex<Queue<T>>>;
