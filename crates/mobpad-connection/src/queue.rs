//! Bounded outbound queue used while the socket is not open.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Which payload to discard when the queue is full.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Evict the oldest queued payload to make room
    #[default]
    DropOldest,
    /// Refuse the new payload
    DropNewest,
}

/// What happened to a payload offered to the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Enqueued {
    /// Stored, nothing lost
    Stored,
    /// Stored after evicting the oldest payload
    EvictedOldest,
    /// Not stored
    Rejected,
}

/// FIFO of payloads awaiting an open socket.
#[derive(Debug, Clone)]
pub struct OutboundQueue {
    items: VecDeque<String>,
    capacity: usize,
    policy: OverflowPolicy,
    dropped: u64,
}

impl OutboundQueue {
    /// Create an empty queue.
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
            policy,
            dropped: 0,
        }
    }

    /// Offer a payload.
    pub fn push(&mut self, payload: String) -> Enqueued {
        if self.items.len() < self.capacity {
            self.items.push_back(payload);
            return Enqueued::Stored;
        }
        self.dropped = self.dropped.saturating_add(1);
        match self.policy {
            OverflowPolicy::DropOldest if self.capacity > 0 => {
                self.items.pop_front();
                self.items.push_back(payload);
                Enqueued::EvictedOldest
            }
            _ => Enqueued::Rejected,
        }
    }

    /// Put a payload back at the head after a failed send.
    pub fn requeue_front(&mut self, payload: String) {
        self.items.push_front(payload);
        while self.items.len() > self.capacity {
            self.items.pop_back();
            self.dropped = self.dropped.saturating_add(1);
        }
    }

    /// Take the oldest payload.
    pub fn pop(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    /// Number of queued payloads.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Payloads lost to overflow so far.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Queued payloads, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(String::as_str)
    }
}
