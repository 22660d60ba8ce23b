//! Per-key request sequencing.
//!
//! Every request for a key takes a [`Ticket`]. Tickets for the same key pass
//! through a shared gate one at a time, in issue order. A ticket that reaches
//! the gate after a newer ticket was issued for its key is stale and should
//! not be sent.

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use tokio::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Slot {
    latest: AtomicU64,
    gate: Mutex<()>,
}

/// Registry of in-flight request slots.
#[derive(Debug)]
pub struct InFlight<K> {
    slots: Mutex<HashMap<K, Arc<Slot>>>,
}

impl<K> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash> InFlight<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket for `key`, superseding every earlier one.
    ///
    /// Slots of keys with no outstanding ticket are dropped here, so the
    /// registry only holds keys with requests in flight.
    pub async fn issue(&self, key: K) -> Ticket {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots.retain(|_, slot| Arc::strong_count(slot) > 1);
            Arc::clone(slots.entry(key).or_default())
        };
        let seq = slot.latest.fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { slot, seq }
    }
}

/// A place in the queue for one key.
#[derive(Debug)]
pub struct Ticket {
    slot: Arc<Slot>,
    seq: u64,
}

impl Ticket {
    /// Whether no newer ticket has been issued for this key.
    pub fn is_current(&self) -> bool {
        self.slot.latest.load(Ordering::SeqCst) == self.seq
    }

    /// Waits for earlier requests on this key to finish.
    ///
    /// Returns `None` when the ticket was superseded while waiting. The
    /// returned guard keeps later tickets waiting until it is dropped.
    pub async fn acquire(&self) -> Option<MutexGuard<'_, ()>> {
        let guard = self.slot.gate.lock().await;
        if self.is_current() {
            Some(guard)
        } else {
            None
        }
    }
}
