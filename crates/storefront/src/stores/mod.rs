//! Client state containers.
//!
//! [`CartStore`] and [`AuthStore`] are independently owned, cheaply
//! cloneable handles. Each one wraps a pure reducer from the core crate,
//! applies mutations atomically, persists the new state as a side effect,
//! and publishes it to subscribers.

mod auth;
mod cart;

pub use auth::AuthStore;
pub use cart::CartStore;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

use crate::storage::{self, StateStore};

/// A value restored from, and written back to, one storage record.
struct PersistedState<T> {
    key: &'static str,
    storage: Arc<dyn StateStore>,
    state: watch::Sender<T>,
    /// Serializes mutate-then-persist so records land in mutation order.
    write_order: Mutex<()>,
}

impl<T> PersistedState<T>
where
    T: Serialize + DeserializeOwned + Default + Clone,
{
    fn open(storage: Arc<dyn StateStore>, key: &'static str) -> Self {
        let initial = storage::load_or_default(storage.as_ref(), key);
        Self {
            key,
            storage,
            state: watch::Sender::new(initial),
            write_order: Mutex::new(()),
        }
    }

    fn snapshot(&self) -> T {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<T> {
        self.state.subscribe()
    }

    /// Apply `op`, notify subscribers, then persist the result.
    ///
    /// Only concurrent mutations wait on the write; readers see the new
    /// value as soon as `op` has run. The write itself is synchronous:
    /// records are a few kilobytes of JSON for a single shopper, and the CLI
    /// exits right after a mutation returns. A failed write is logged and
    /// the in-memory state is kept.
    fn mutate(&self, op: impl FnOnce(&mut T)) -> T {
        let _order = self
            .write_order
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut updated = T::default();
        self.state.send_modify(|value| {
            op(value);
            updated = value.clone();
        });

        if let Err(e) = storage::save_json(self.storage.as_ref(), self.key, &updated) {
            tracing::warn!(key = self.key, error = %e, "Failed to persist state");
        }
        updated
    }
}
