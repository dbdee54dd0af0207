use std::time::{Duration, Instant};

use subclaim_core::Notification;

const LIFETIME: Duration = Duration::from_secs(4);
const WIDE_LIFETIME: Duration = Duration::from_secs(6);
/// Older toasts are dropped past this many.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone)]
pub(crate) struct Toast {
    pub(crate) id: u64,
    pub(crate) notification: Notification,
    expires_at: Instant,
}

/// Bottom-centre notification stack, newest last.
#[derive(Debug, Default)]
pub(crate) struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    pub(crate) fn push(&mut self, notification: Notification, now: Instant) {
        let lifetime = if notification.wide {
            WIDE_LIFETIME
        } else {
            LIFETIME
        };
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            notification,
            expires_at: now + lifetime,
        });
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }
    }

    pub(crate) fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub(crate) fn expire(&mut self, now: Instant) {
        self.items.retain(|t| t.expires_at > now);
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
