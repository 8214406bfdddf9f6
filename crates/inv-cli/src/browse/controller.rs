//! Browse state machine: filters, pagination, and fetch scheduling.
//!
//! Query changes never call the server directly. Each change restarts a
//! quiet period; once it elapses a single fetch is issued carrying a
//! sequence number, and a completed fetch is applied only while its
//! sequence is still the newest issued. A burst of edits therefore
//! collapses into one request, and a slow stale response cannot clobber
//! a page that arrived after it.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use inv_api::{ApiError, AssetQuery, InventoryService};
use inv_auth::AuthError;
use inv_core::entities::AssetPage;
use inv_core::filter::FilterError;

/// Rows per page in the browser.
pub const PAGE_SIZE: u32 = 9;

/// How long the query must stay unchanged before a fetch goes out.
pub const QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Total pages for a server-reported row count at the browse page size.
#[must_use]
pub const fn total_pages(total: u32) -> u32 {
    total.div_ceil(PAGE_SIZE)
}

/// Seam between the browse state machine and the asset list endpoint.
///
/// `Ok(None)` means no session is established.
pub trait ListFetcher: Clone + Send + Sync + 'static {
    fn fetch(
        &self,
        query: AssetQuery,
    ) -> impl Future<Output = Result<Option<AssetPage>, ApiError>> + Send;
}

/// [`ListFetcher`] backed by the live service.
#[derive(Clone)]
pub struct ServiceFetcher {
    service: InventoryService,
}

impl ServiceFetcher {
    #[must_use]
    pub const fn new(service: InventoryService) -> Self {
        Self { service }
    }
}

impl ListFetcher for ServiceFetcher {
    fn fetch(
        &self,
        query: AssetQuery,
    ) -> impl Future<Output = Result<Option<AssetPage>, ApiError>> + Send {
        let service = self.service.clone();
        async move { service.fetch_assets(query).await }
    }
}

/// Immutable view of the browse state for rendering.
#[derive(Clone, Debug)]
pub struct BrowseSnapshot {
    /// Most recently applied page.
    pub page: AssetPage,
    /// The query the next fetch will carry; may be ahead of `page`.
    pub query: AssetQuery,
    /// A change is still debouncing or a fetch is in flight.
    pub loading: bool,
    /// Last fetch failure, cleared by the next applied page.
    pub error: Option<String>,
}

impl BrowseSnapshot {
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        total_pages(self.page.total)
    }

    /// Whether advancing a page stays inside the held total.
    #[must_use]
    pub const fn can_next(&self) -> bool {
        self.query.page < self.total_pages()
    }

    #[must_use]
    pub const fn can_prev(&self) -> bool {
        self.query.page > 1
    }
}

struct BrowseState {
    query: AssetQuery,
    page: AssetPage,
    error: Option<String>,
    in_flight: u32,
    dirty: bool,
}

struct Inner {
    state: Mutex<BrowseState>,
    /// Sequence of the newest issued fetch; results from older ones are
    /// discarded on arrival.
    issued: AtomicU64,
    /// Pokes the pump whenever the query becomes dirty.
    wake: Notify,
    /// Fires when a fetch completes, so `settled` can re-check.
    settled: Notify,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, BrowseState> {
        // The lock is only ever held for field updates, never across an
        // await, so a poisoned guard still holds consistent state.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owns the browse query and the held page; fetching runs on a pump task
/// spawned via [`BrowseController::spawn_pump`].
pub struct BrowseController<F: ListFetcher> {
    fetcher: F,
    inner: Arc<Inner>,
}

impl<F: ListFetcher> BrowseController<F> {
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            inner: Arc::new(Inner {
                state: Mutex::new(BrowseState {
                    query: AssetQuery {
                        limit: PAGE_SIZE,
                        ..AssetQuery::default()
                    },
                    page: AssetPage::empty(),
                    error: None,
                    in_flight: 0,
                    dirty: false,
                }),
                issued: AtomicU64::new(0),
                wake: Notify::new(),
                settled: Notify::new(),
            }),
        }
    }

    /// Start the background scheduler that turns query changes into
    /// debounced fetches. Abort the handle when the browser exits.
    pub fn spawn_pump(&self) -> JoinHandle<()> {
        let fetcher = self.fetcher.clone();
        let inner = Arc::clone(&self.inner);
        tokio::spawn(pump(fetcher, inner))
    }

    /// Assign one filter field from its textual form and return to the
    /// first page, since the old offset is meaningless under new filters.
    pub fn set_filter(&self, field: &str, value: &str) -> Result<(), FilterError> {
        let mut state = self.inner.lock();
        state.query.filter.set(field, value)?;
        state.query.page = 1;
        state.dirty = true;
        drop(state);
        self.inner.wake.notify_one();
        Ok(())
    }

    /// Reset every filter and return to the first page.
    pub fn clear_filters(&self) {
        let mut state = self.inner.lock();
        state.query.filter.clear();
        state.query.page = 1;
        state.dirty = true;
        drop(state);
        self.inner.wake.notify_one();
    }

    /// Jump to a 1-based page. Out-of-range pages come back empty from
    /// the server; callers wanting bounds use the snapshot affordances.
    pub fn set_page(&self, page: u32) {
        let mut state = self.inner.lock();
        state.query.page = page.max(1);
        state.dirty = true;
        drop(state);
        self.inner.wake.notify_one();
    }

    /// Advance one page if the held total allows it.
    pub fn next_page(&self) -> bool {
        let mut state = self.inner.lock();
        if state.query.page >= total_pages(state.page.total) {
            return false;
        }
        state.query.page += 1;
        state.dirty = true;
        drop(state);
        self.inner.wake.notify_one();
        true
    }

    /// Step back one page unless already on the first.
    pub fn prev_page(&self) -> bool {
        let mut state = self.inner.lock();
        if state.query.page <= 1 {
            return false;
        }
        state.query.page -= 1;
        state.dirty = true;
        drop(state);
        self.inner.wake.notify_one();
        true
    }

    /// Schedule a fetch of the current query without changing it.
    pub fn reload(&self) {
        let mut state = self.inner.lock();
        state.dirty = true;
        drop(state);
        self.inner.wake.notify_one();
    }

    /// Current state for rendering.
    #[must_use]
    pub fn snapshot(&self) -> BrowseSnapshot {
        let state = self.inner.lock();
        BrowseSnapshot {
            page: state.page.clone(),
            query: state.query.clone(),
            loading: state.dirty || state.in_flight > 0,
            error: state.error.clone(),
        }
    }

    /// Wait until no change is pending and no fetch is in flight.
    pub async fn settled(&self) {
        loop {
            let notified = self.inner.settled.notified();
            tokio::pin!(notified);
            // Register before checking, so a completion landing between
            // the check and the await is not lost.
            notified.as_mut().enable();
            {
                let state = self.inner.lock();
                if !state.dirty && state.in_flight == 0 {
                    return;
                }
            }
            notified.await;
        }
    }
}

async fn pump<F: ListFetcher>(fetcher: F, inner: Arc<Inner>) {
    loop {
        inner.wake.notified().await;
        // Trailing debounce: every further change inside the quiet
        // period restarts the window.
        while tokio::time::timeout(QUIET_PERIOD, inner.wake.notified())
            .await
            .is_ok()
        {}

        let Some((sequence, query)) = take_due(&inner) else {
            continue;
        };
        // Fetches run detached so a slow response never blocks the next
        // debounce window; the sequence guard sorts out arrival order.
        tokio::spawn(execute(fetcher.clone(), Arc::clone(&inner), sequence, query));
    }
}

fn take_due(inner: &Inner) -> Option<(u64, AssetQuery)> {
    let mut state = inner.lock();
    if !state.dirty {
        return None;
    }
    state.dirty = false;
    state.in_flight += 1;
    let sequence = inner.issued.fetch_add(1, Ordering::SeqCst) + 1;
    Some((sequence, state.query.clone()))
}

async fn execute<F: ListFetcher>(fetcher: F, inner: Arc<Inner>, sequence: u64, query: AssetQuery) {
    let result = fetcher.fetch(query).await;

    let mut state = inner.lock();
    state.in_flight -= 1;
    if sequence == inner.issued.load(Ordering::SeqCst) {
        match result {
            Ok(Some(page)) => {
                state.page = page;
                state.error = None;
            }
            Ok(None) => {
                state.error = Some(AuthError::NotAuthenticated.to_string());
            }
            Err(error) => {
                tracing::warn!(%error, "asset page fetch failed");
                state.error = Some(error.to_string());
            }
        }
    } else {
        tracing::debug!(sequence, "discarding superseded asset page");
    }
    drop(state);
    inner.settled.notify_waiters();
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Records every query it sees and synthesizes a 20-row result, so
    /// the pagination math lands on 3 pages of 9.
    #[derive(Clone, Default)]
    struct RecordingFetcher {
        queries: Arc<Mutex<Vec<AssetQuery>>>,
        delays: Arc<Mutex<VecDeque<Duration>>>,
        failures: Arc<Mutex<u32>>,
    }

    impl RecordingFetcher {
        fn calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }

        fn last_query(&self) -> AssetQuery {
            self.queries.lock().unwrap().last().cloned().unwrap()
        }

        fn delay_next(&self, delay: Duration) {
            self.delays.lock().unwrap().push_back(delay);
        }

        fn fail_next(&self) {
            *self.failures.lock().unwrap() += 1;
        }
    }

    impl ListFetcher for RecordingFetcher {
        fn fetch(
            &self,
            query: AssetQuery,
        ) -> impl Future<Output = Result<Option<AssetPage>, ApiError>> + Send {
            let this = self.clone();
            async move {
                this.queries.lock().unwrap().push(query.clone());
                let delay = this.delays.lock().unwrap().pop_front();
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                {
                    let mut failures = this.failures.lock().unwrap();
                    if *failures > 0 {
                        *failures -= 1;
                        return Err(ApiError::Decode("induced failure".to_owned()));
                    }
                }
                Ok(Some(AssetPage {
                    assets: Vec::new(),
                    total: 20,
                    active_assets: 14,
                    inactive_assets: 6,
                    decommissioned_assets: 0,
                    page: query.page,
                    limit: query.limit,
                }))
            }
        }
    }

    async fn wait_for_calls(fetcher: &RecordingFetcher, calls: usize) {
        while fetcher.calls() < calls {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(9), 1);
        assert_eq!(total_pages(10), 2);
        assert_eq!(total_pages(20), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_of_changes_issues_one_fetch() {
        let fetcher = RecordingFetcher::default();
        let controller = BrowseController::new(fetcher.clone());
        let pump = controller.spawn_pump();

        controller.set_filter("name", "dell").unwrap();
        controller.set_filter("location_id", "4").unwrap();
        controller.set_page(2);
        controller.settled().await;

        assert_eq!(fetcher.calls(), 1);
        let query = fetcher.last_query();
        assert_eq!(query.filter.name, "dell");
        assert_eq!(query.filter.location_id, 4);
        assert_eq!(query.page, 2);
        assert_eq!(query.limit, PAGE_SIZE);

        pump.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn changes_inside_the_quiet_window_restart_it() {
        let fetcher = RecordingFetcher::default();
        let controller = BrowseController::new(fetcher.clone());
        let pump = controller.spawn_pump();

        controller.set_filter("name", "d").unwrap();
        tokio::time::advance(Duration::from_millis(300)).await;
        tokio::task::yield_now().await;
        controller.set_filter("name", "de").unwrap();
        tokio::time::advance(Duration::from_millis(300)).await;
        tokio::task::yield_now().await;

        // 600ms after the first edit, 300ms after the second: still quiet.
        assert_eq!(fetcher.calls(), 0);

        controller.settled().await;
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(fetcher.last_query().filter.name, "de");

        pump.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn slow_stale_responses_are_discarded() {
        let fetcher = RecordingFetcher::default();
        fetcher.delay_next(Duration::from_secs(60));
        let controller = BrowseController::new(fetcher.clone());
        let pump = controller.spawn_pump();

        controller.set_page(2);
        wait_for_calls(&fetcher, 1).await;

        controller.set_page(3);
        controller.settled().await;

        assert_eq!(fetcher.calls(), 2);
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.page.page, 3);
        assert!(!snapshot.loading);
        assert_eq!(snapshot.error, None);

        pump.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn filter_changes_return_to_the_first_page() {
        let fetcher = RecordingFetcher::default();
        let controller = BrowseController::new(fetcher.clone());
        let pump = controller.spawn_pump();

        controller.set_page(3);
        controller.settled().await;
        assert_eq!(controller.snapshot().query.page, 3);

        controller.set_filter("status", "active").unwrap();
        controller.settled().await;
        assert_eq!(controller.snapshot().query.page, 1);
        assert_eq!(fetcher.last_query().page, 1);

        pump.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn paging_affordances_stop_at_the_bounds() {
        let fetcher = RecordingFetcher::default();
        let controller = BrowseController::new(fetcher.clone());
        let pump = controller.spawn_pump();

        // Nothing fetched yet: the held total is zero.
        let snapshot = controller.snapshot();
        assert!(!snapshot.can_prev());
        assert!(!snapshot.can_next());

        controller.reload();
        controller.settled().await;
        assert!(controller.snapshot().can_next());
        assert!(!controller.snapshot().can_prev());

        assert!(controller.next_page());
        assert!(controller.next_page());
        assert!(!controller.next_page());
        controller.settled().await;
        assert_eq!(controller.snapshot().query.page, 3);

        assert!(controller.prev_page());
        controller.settled().await;
        assert_eq!(fetcher.last_query().page, 2);

        pump.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_errors_keep_the_held_page() {
        let fetcher = RecordingFetcher::default();
        let controller = BrowseController::new(fetcher.clone());
        let pump = controller.spawn_pump();

        controller.reload();
        controller.settled().await;
        assert_eq!(controller.snapshot().page.total, 20);

        fetcher.fail_next();
        controller.set_page(2);
        controller.settled().await;

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.page.total, 20);
        assert_eq!(snapshot.page.page, 1);
        assert!(snapshot.error.is_some());

        // The next successful fetch clears the error.
        controller.reload();
        controller.settled().await;
        assert_eq!(controller.snapshot().error, None);

        pump.abort();
    }
}
