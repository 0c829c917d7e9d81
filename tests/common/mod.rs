//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use anylist::listing::{FetchError, FilterSet, FilterValue, ListingApi, ListingResponse};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

pub type Page = ListingResponse<String>;

/// Filter controlling how long the mock takes to answer, in milliseconds.
pub const DELAY_KEY: &str = "delayMs";
/// Filter making the mock fail when set to `true`.
pub const FAIL_KEY: &str = "fail";
/// Filter echoed back as the single item of the returned page.
pub const QUERY_KEY: &str = "q";

/// In-process fetch capability driven by the filters it receives.
///
/// Records which calls started, which completed and which were dropped
/// before they could answer.
#[derive(Default)]
pub struct MockListingApi {
    started: Mutex<Vec<String>>,
    completed: Mutex<Vec<String>>,
    dropped: Arc<Mutex<Vec<String>>>,
}

impl MockListingApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn started(&self) -> Vec<String> {
        self.started.lock().clone()
    }

    pub fn completed(&self) -> Vec<String> {
        self.completed.lock().clone()
    }

    pub fn dropped(&self) -> Vec<String> {
        self.dropped.lock().clone()
    }
}

struct DropRecorder {
    query: String,
    armed: bool,
    log: Arc<Mutex<Vec<String>>>,
}

impl Drop for DropRecorder {
    fn drop(&mut self) {
        if self.armed {
            self.log.lock().push(self.query.clone());
        }
    }
}

#[async_trait]
impl ListingApi<FilterSet, Page> for MockListingApi {
    async fn get_all(&self, filters: FilterSet) -> Result<Page, FetchError> {
        let query = filters
            .get(QUERY_KEY)
            .map(ToString::to_string)
            .unwrap_or_default();
        self.started.lock().push(query.clone());

        let mut recorder = DropRecorder {
            query: query.clone(),
            armed: true,
            log: Arc::clone(&self.dropped),
        };

        let delay = filters.get(DELAY_KEY).and_then(FilterValue::as_u32).unwrap_or(0);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(u64::from(delay))).await;
        }
        recorder.armed = false;

        if filters.get(FAIL_KEY) == Some(&FilterValue::Bool(true)) {
            return Err(FetchError::Other(format!("backend rejected '{query}'")));
        }

        self.completed.lock().push(query.clone());
        Ok(Page {
            items: vec![query],
            total_items_count: Some(1),
            page_number: filters.page_number(),
        })
    }
}

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Filters for one mock request.
pub fn query(q: &str, delay_ms: u32) -> FilterSet {
    FilterSet::new().with(QUERY_KEY, q).with(DELAY_KEY, delay_ms)
}

/// Same as [`query`], but the mock fails after the delay.
pub fn failing_query(q: &str, delay_ms: u32) -> FilterSet {
    query(q, delay_ms).with(FAIL_KEY, true)
}

/// Collect every value a watch channel takes, starting with the current one.
pub fn record<T>(mut rx: watch::Receiver<T>) -> Arc<Mutex<Vec<T>>>
where
    T: Clone + Send + Sync + 'static,
{
    let log = Arc::new(Mutex::new(vec![rx.borrow_and_update().clone()]));
    let sink = Arc::clone(&log);
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let value = rx.borrow_and_update().clone();
            sink.lock().push(value);
        }
    });
    log
}

/// The single item of a published mock page.
pub fn item(page: &Option<Page>) -> Option<String> {
    page.as_ref().and_then(|page| page.items.first().cloned())
}
