// crates/portal-client/src/notify.rs
// Transient notification queue (state only, rendering is up to the view)

use std::collections::VecDeque;

/// Oldest notifications are dropped beyond this many
pub const MAX_NOTIFICATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Assigned by the queue on push
    pub id: u64,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            id: 0,
            description: description.into(),
            variant: Variant::Success,
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            id: 0,
            description: description.into(),
            variant: Variant::Error,
        }
    }
}

#[derive(Debug)]
pub struct Notifications {
    queue: VecDeque<Notification>,
    limit: usize,
    next_id: u64,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    pub fn new() -> Self {
        Self::with_limit(MAX_NOTIFICATIONS)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            limit: limit.max(1),
            next_id: 1,
        }
    }

    /// Queue a notification and return its id
    pub fn push(&mut self, mut notification: Notification) -> u64 {
        notification.id = self.next_id;
        self.next_id += 1;
        if self.queue.len() == self.limit {
            self.queue.pop_front();
        }
        let id = notification.id;
        self.queue.push_back(notification);
        id
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.queue.len();
        self.queue.retain(|n| n.id != id);
        self.queue.len() != before
    }

    /// Most recent notification
    pub fn current(&self) -> Option<&Notification> {
        self.queue.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.queue.iter()
    }

    /// Remove and return everything queued, oldest first
    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
