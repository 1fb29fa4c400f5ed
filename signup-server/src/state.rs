use std::path::PathBuf;
use std::sync::Arc;

use signup_core::ActivityStore;
use tokio::sync::{Mutex, MutexGuard};

/// Shared application state
///
/// Handlers hold the store lock for the whole check-mutate-persist sequence,
/// so concurrent requests cannot interleave between the roster check and the
/// disk write.
#[derive(Clone)]
pub struct AppState {
    store: Arc<Mutex<ActivityStore>>,
}

impl AppState {
    pub fn new(store: ActivityStore) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Load (or seed) the activities file at `data_path`.
    pub fn open(data_path: impl Into<PathBuf>) -> Self {
        Self::new(ActivityStore::open(data_path))
    }

    pub async fn store(&self) -> MutexGuard<'_, ActivityStore> {
        self.store.lock().await
    }
}
