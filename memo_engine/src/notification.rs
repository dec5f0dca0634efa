//! Notification queue.
//!
//! Mutations that change state leave a short message here; the presentation
//! layer drains it once per frame. The queue has no size cap, so a host that
//! never polls will keep accumulating messages.

use std::collections::VecDeque;

use log::debug;

/// FIFO of human-readable status messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationQueue {
    messages: VecDeque<String>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("notification queued: {message}");
        self.messages.push_back(message);
    }

    /// Take every pending message in append order, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<String> {
        self.messages.drain(..).collect()
    }

    pub fn peek(&self) -> Option<&str> {
        self.messages.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_fifo_order_and_empties() {
        let mut queue = NotificationQueue::new();
        queue.push("New memo added!");
        queue.push("Memo updated!");
        queue.push("New memo added!");
        assert_eq!(queue.peek(), Some("New memo added!"));
        assert_eq!(
            queue.drain(),
            vec!["New memo added!", "Memo updated!", "New memo added!"]
        );
        assert!(queue.is_empty());
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn unpolled_queue_grows_without_bound() {
        let mut queue = NotificationQueue::new();
        for _ in 0..10_000 {
            queue.push("New memo added!");
        }
        assert_eq!(queue.len(), 10_000);
        queue.clear();
        assert!(queue.is_empty());
    }
}
