//! Cached collection, tab/search view state and in-flight tracking shared by
//! the design and order controllers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::RwLock;

use threadline_core::error::CoreError;
use threadline_core::presenter::{find_tab, present, Listable, StatusTab};
use threadline_core::status::LifecycleStatus;
use threadline_core::types::DbId;

use crate::error::LifecycleError;
use crate::notify::{Notifier, GENERIC_FAILURE_MESSAGE};

struct ViewState<S: 'static> {
    tab: &'static StatusTab<S>,
    search: String,
}

/// One list screen: the last fetched collection plus the active filter.
///
/// The collection is only ever replaced wholesale by [`ListScreen::replace`];
/// no code path patches an item in place.
pub struct ListScreen<T: Listable> {
    tabs: &'static [StatusTab<T::Status>],
    items: RwLock<Vec<T>>,
    view: RwLock<ViewState<T::Status>>,
    in_flight: Arc<Mutex<HashSet<DbId>>>,
}

impl<T: Listable + Clone> ListScreen<T> {
    /// Create an empty screen over `tabs`, showing `initial`.
    pub fn new(
        tabs: &'static [StatusTab<T::Status>],
        initial: &'static StatusTab<T::Status>,
    ) -> Self {
        Self {
            tabs,
            items: RwLock::new(Vec::new()),
            view: RwLock::new(ViewState {
                tab: initial,
                search: String::new(),
            }),
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn tabs(&self) -> &'static [StatusTab<T::Status>] {
        self.tabs
    }

    pub async fn replace(&self, items: Vec<T>) {
        *self.items.write().await = items;
    }

    /// Every cached item, in backend order.
    pub async fn all(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    /// Cached items passing the active tab and search term.
    pub async fn visible(&self) -> Vec<T> {
        let items = self.items.read().await;
        let view = self.view.read().await;
        present(&items, &view.tab.filter, &view.search)
            .into_iter()
            .cloned()
            .collect()
    }

    pub async fn find(&self, id: DbId) -> Option<T> {
        self.items.read().await.iter().find(|i| i.id() == id).cloned()
    }

    pub async fn active_tab(&self) -> &'static StatusTab<T::Status> {
        self.view.read().await.tab
    }

    pub async fn search(&self) -> String {
        self.view.read().await.search.clone()
    }

    /// Switch tabs by key. Filtering happens in memory; nothing is fetched.
    pub async fn select_tab(&self, key: &str) -> Result<&'static StatusTab<T::Status>, CoreError> {
        let tab = find_tab(self.tabs, key)
            .ok_or_else(|| CoreError::Validation(format!("Unknown tab '{key}'")))?;
        self.view.write().await.tab = tab;
        Ok(tab)
    }

    pub async fn set_search(&self, term: &str) {
        self.view.write().await.search = term.to_string();
    }

    /// Mark `id` as having a mutation in flight.
    ///
    /// Fails with [`LifecycleError::Busy`] when one is already running. The
    /// mark is cleared when the returned guard drops.
    pub fn claim(&self, id: DbId) -> Result<InFlightGuard, LifecycleError> {
        let mut set = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(id) {
            return Err(LifecycleError::Busy {
                entity: <T::Status as LifecycleStatus>::ENTITY,
                id,
            });
        }
        Ok(InFlightGuard {
            set: Arc::clone(&self.in_flight),
            id,
        })
    }

    pub fn is_busy(&self, id: DbId) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }
}

/// Clears an in-flight mark on drop.
#[derive(Debug)]
pub struct InFlightGuard {
    set: Arc<Mutex<HashSet<DbId>>>,
    id: DbId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

/// Log `err`, show the generic failure message once, and hand the error back.
pub(crate) fn report_failure(notifier: &dyn Notifier, err: LifecycleError) -> LifecycleError {
    tracing::warn!(error = %err, kind = ?err.kind(), "Operation failed");
    notifier.error(GENERIC_FAILURE_MESSAGE);
    err
}
