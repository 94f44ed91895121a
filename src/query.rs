//! Query coordination: turn a [`ListQuery`] into a [`ListResult`] against a
//! [`RecordStore`], with a shared loading flag raised for the duration.
//!
//! Every list call waits a fixed latency before touching the store. The
//! in-memory store answers instantly, so the delay stands in for a network
//! round-trip; tests run it on tokio's paused clock.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::{Error, Result};
use crate::observable::{ObservableCell, Subscription};
use crate::search::{filter_records, paginate};
use crate::store::{RecordStore, UserRecord};

/// One list request. Built fresh for every query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page_number: u32,
    pub items_per_page: u32,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new(page_number: u32, items_per_page: u32) -> Self {
        Self {
            page_number,
            items_per_page,
            search: None,
        }
    }

    /// Attach search text. Empty text is stored as no search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let s = search.into();
        self.search = if s.is_empty() { None } else { Some(s) };
        self
    }
}

/// One page of filtered users plus the size of the whole filtered set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListResult {
    pub total_count: usize,
    pub items: Vec<UserRecord>,
}

/// Front door to the record store for the list screen.
#[derive(Clone)]
pub struct QueryCoordinator {
    store: Arc<dyn RecordStore>,
    latency: Duration,
    loading: ObservableCell<bool>,
    in_flight: Arc<Mutex<usize>>,
}

impl QueryCoordinator {
    pub fn new(store: Arc<dyn RecordStore>, latency: Duration) -> Self {
        Self {
            store,
            latency,
            loading: ObservableCell::new(false),
            in_flight: Arc::new(Mutex::new(0)),
        }
    }

    /// Filter, count and slice one page. Never fails; no matches is an empty page.
    #[instrument(name = "query.list", skip(self), fields(page = query.page_number, per_page = query.items_per_page))]
    pub async fn list(&self, query: &ListQuery) -> ListResult {
        let _loading = LoadingGuard::start(&self.in_flight, &self.loading);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let all = self.store.list().await;
        let filtered = filter_records(&all, query.search.as_deref());
        let items = paginate(&filtered, query.page_number, query.items_per_page);
        debug!(
            total = filtered.len(),
            returned = items.len(),
            search = ?query.search,
            "list query finished"
        );
        ListResult {
            total_count: filtered.len(),
            items,
        }
    }

    #[instrument(name = "query.get_by_id", skip(self))]
    pub async fn get_by_id(&self, id: &str) -> Result<UserRecord> {
        self.store
            .find_by_id(id)
            .await
            .ok_or_else(|| Error::not_found(id))
    }

    #[instrument(name = "query.remove", skip(self))]
    pub async fn remove(&self, id: &str) -> Result<()> {
        match self.store.delete_by_id(id).await {
            Ok(()) => {
                info!(user_id = id, "user removed");
                Ok(())
            }
            Err(e) => {
                warn!(user_id = id, error = %e, "remove failed");
                Err(e)
            }
        }
    }

    /// Snapshot of the loading flag.
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Loading flag as a live sequence.
    pub fn loading(&self) -> Subscription<bool> {
        self.loading.subscribe()
    }
}

/// Holds the loading flag up while at least one list call is running.
/// Dropping it (normal return or task abort) lowers the count.
struct LoadingGuard {
    in_flight: Arc<Mutex<usize>>,
    loading: ObservableCell<bool>,
}

impl LoadingGuard {
    fn start(in_flight: &Arc<Mutex<usize>>, loading: &ObservableCell<bool>) -> Self {
        let mut n = in_flight.lock();
        *n += 1;
        if *n == 1 {
            loading.set(true);
        }
        Self {
            in_flight: Arc::clone(in_flight),
            loading: loading.clone(),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let mut n = self.in_flight.lock();
        *n = n.saturating_sub(1);
        if *n == 0 {
            self.loading.set(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn coordinator(latency_ms: u64) -> QueryCoordinator {
        QueryCoordinator::new(
            Arc::new(MemoryStore::seeded()),
            Duration::from_millis(latency_ms),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn search_slices_the_filtered_set() {
        let q = coordinator(1000);
        let res = q.list(&ListQuery::new(1, 5).with_search("Ivan")).await;
        assert_eq!(res.total_count, 4);
        let ids: Vec<&str> = res.items.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u3", "u16", "u17"]);
    }

    #[tokio::test(start_paused = true)]
    async fn unfiltered_last_page_is_short() {
        let q = coordinator(1000);
        let res = q.list(&ListQuery::new(4, 5)).await;
        assert_eq!(res.total_count, 17);
        assert_eq!(res.items.len(), 2);
        let beyond = q.list(&ListQuery::new(5, 5)).await;
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_count, 17);
    }

    #[tokio::test(start_paused = true)]
    async fn list_waits_for_latency() {
        let q = coordinator(1000);
        let started = tokio::time::Instant::now();
        q.list(&ListQuery::new(1, 5)).await;
        assert!(started.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_goes_up_then_down() {
        let q = coordinator(1000);
        let mut seen = q.loading();
        q.list(&ListQuery::new(1, 10)).await;
        let mut flags = Vec::new();
        while let Some(v) = seen.try_next() {
            flags.push(v);
        }
        assert_eq!(flags, vec![false, true, false]);
        assert!(!q.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn loading_flag_resets_when_task_aborted() {
        let q = coordinator(1000);
        let worker = q.clone();
        let handle = tokio::spawn(async move {
            worker.list(&ListQuery::new(1, 5)).await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(q.is_loading());
        handle.abort();
        let _ = handle.await;
        assert!(!q.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_calls_keep_flag_until_last_finishes() {
        let q = coordinator(100);
        let slow = q.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            slow.list(&ListQuery::new(1, 5)).await
        });
        let first = q.list(&ListQuery::new(1, 5)).await;
        assert_eq!(first.items.len(), 5);
        // second call started at t=50 and ends at t=150
        assert!(q.is_loading());
        handle.await.expect("join");
        assert!(!q.is_loading());
    }

    #[tokio::test]
    async fn get_and_remove_report_not_found() {
        let q = coordinator(0);
        assert_eq!(q.get_by_id("u2").await.expect("u2").display_name, "Mikhail X.");
        assert!(q.get_by_id("missing").await.unwrap_err().is_not_found());
        q.remove("u2").await.expect("remove u2");
        assert!(q.get_by_id("u2").await.unwrap_err().is_not_found());
        assert!(q.remove("u2").await.unwrap_err().is_not_found());
        let res = q.list(&ListQuery::new(1, 20)).await;
        assert_eq!(res.total_count, 16);
    }

    #[test]
    fn empty_search_text_is_no_search() {
        assert_eq!(ListQuery::new(1, 5).with_search("").search, None);
        assert_eq!(
            ListQuery::new(1, 5).with_search("iv").search.as_deref(),
            Some("iv")
        );
    }
}
