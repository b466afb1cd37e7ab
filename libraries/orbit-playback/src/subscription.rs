//! State subscriptions

use crate::types::PlaybackState;
use std::fmt;

/// Handle returned by [`PlayerController::subscribe`](crate::PlayerController::subscribe)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&PlaybackState)>;

/// Registered state listeners, notified in subscription order
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Callback)>,
}

impl Subscribers {
    pub fn add(&mut self, callback: Callback) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push((id, callback));
        id
    }

    /// Returns whether `id` was registered
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn notify(&mut self, state: &PlaybackState) {
        for (_, callback) in &mut self.entries {
            callback(state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("count", &self.entries.len())
            .finish()
    }
}
