//! List controller: table view state and when to re-fetch.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::Value;

use milladmin_core::{AdminResult, EntityId, EntityRecord};
use milladmin_gateway::{ListQuery, PageRequest};
use milladmin_store::{EntityStore, FetchOutcome};

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Where filtering/pagination happens for this entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaginationMode {
    /// Every view-state change re-requests from the server.
    Server,
    /// The full collection is fetched once; filter and page in memory.
    Client,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// User-adjustable view state of one table.
#[derive(Debug, Clone)]
pub struct TableState {
    /// 0-based page index.
    pub page_index: usize,
    pub page_size: usize,
    /// Live text as typed; not yet driving requests.
    pub filter_input: String,
    /// Text that has settled through the debounce and drives requests.
    pub committed_filter: String,
    /// Column sort, applied in memory to the visible rows.
    pub sort: Option<(String, SortOrder)>,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            filter_input: String::new(),
            committed_filter: String::new(),
            sort: None,
        }
    }
}

/// Drives one paginated/filterable table over an [`EntityStore`].
///
/// Cheap to clone; clones share view state. Requires a tokio runtime for
/// the debounced filter commit.
pub struct ListController<R: EntityRecord> {
    store: EntityStore<R>,
    mode: PaginationMode,
    debounce: Duration,
    view: Arc<Mutex<TableState>>,
    filter_generation: Arc<AtomicU64>,
}

impl<R: EntityRecord> Clone for ListController<R> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            mode: self.mode,
            debounce: self.debounce,
            view: Arc::clone(&self.view),
            filter_generation: Arc::clone(&self.filter_generation),
        }
    }
}

impl<R: EntityRecord> ListController<R> {
    pub fn new(store: EntityStore<R>, mode: PaginationMode) -> Self {
        Self {
            store,
            mode,
            debounce: DEFAULT_SEARCH_DEBOUNCE,
            view: Arc::new(Mutex::new(TableState::default())),
            filter_generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn store(&self) -> &EntityStore<R> {
        &self.store
    }

    pub fn table_state(&self) -> TableState {
        self.view.lock().unwrap().clone()
    }

    fn query(&self) -> ListQuery {
        match self.mode {
            // Client mode always fetches the whole collection.
            PaginationMode::Client => ListQuery::default(),
            PaginationMode::Server => {
                let view = self.view.lock().unwrap();
                ListQuery {
                    search: (!view.committed_filter.is_empty())
                        .then(|| view.committed_filter.clone()),
                    page: Some(PageRequest {
                        index: view.page_index,
                        size: view.page_size,
                    }),
                }
            }
        }
    }

    /// Fetch with the current view state.
    pub async fn refresh(&self) -> AdminResult<FetchOutcome> {
        self.store.fetch_list(self.query()).await
    }

    /// Change the page index; one fetch in server mode, none in client mode.
    pub async fn set_page(&self, index: usize) -> AdminResult<()> {
        {
            let mut view = self.view.lock().unwrap();
            if view.page_index == index {
                return Ok(());
            }
            view.page_index = index;
        }
        if self.mode == PaginationMode::Server {
            self.refresh().await?;
        }
        Ok(())
    }

    pub async fn set_page_size(&self, size: usize) -> AdminResult<()> {
        {
            let mut view = self.view.lock().unwrap();
            let size = size.max(1);
            if view.page_size == size {
                return Ok(());
            }
            view.page_size = size;
        }
        if self.mode == PaginationMode::Server {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Record a keystroke in the free-text filter.
    ///
    /// Server mode commits the value on the trailing edge of the debounce
    /// window and then issues exactly one fetch; a burst of edits inside
    /// the window yields one request carrying the final text. Client mode
    /// commits immediately (no request is at stake).
    pub fn set_filter_input(&self, text: impl Into<String>) {
        let text = text.into();
        {
            let mut view = self.view.lock().unwrap();
            view.filter_input = text.clone();
            if self.mode == PaginationMode::Client {
                view.committed_filter = text;
                view.page_index = 0;
                return;
            }
        }

        let generation = self.filter_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let this = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(this.debounce).await;
            if this.filter_generation.load(Ordering::SeqCst) != generation {
                return;
            }
            if let Err(err) = this.commit_filter(text).await {
                // The store already recorded the message for the view.
                tracing::warn!(entity = R::ENTITY, error = %err.message(), "debounced filter fetch failed");
            }
        });
    }

    /// Sort the visible rows by a column; `None` restores server order.
    ///
    /// The backend's list endpoint carries no sort parameter, so sorting is
    /// purely a view concern and never triggers a fetch.
    pub fn set_sort(&self, sort: Option<(String, SortOrder)>) {
        self.view.lock().unwrap().sort = sort;
    }

    /// Commit filter text now: reset to page 0 and fetch.
    pub async fn commit_filter(&self, text: impl Into<String>) -> AdminResult<FetchOutcome> {
        {
            let mut view = self.view.lock().unwrap();
            view.committed_filter = text.into();
            view.page_index = 0;
        }
        self.refresh().await
    }

    /// Delete a record, then keep the view off empty pages: deleting the
    /// last remaining row of a page beyond 0 steps the index back before
    /// the refetch.
    pub async fn remove(&self, id: EntityId) -> AdminResult<()> {
        self.store.remove(id).await?;

        let total = self.store.total();
        {
            let mut view = self.view.lock().unwrap();
            let last_page = if total == 0 {
                0
            } else {
                (total as usize - 1) / view.page_size
            };
            if view.page_index > last_page {
                view.page_index = last_page;
            }
        }
        if self.mode == PaginationMode::Server {
            self.refresh().await?;
        }
        Ok(())
    }

    /// Rows the table shows right now.
    ///
    /// Server mode returns the fetched page as-is; client mode filters and
    /// slices the full in-memory collection.
    pub fn visible_rows(&self) -> Vec<R> {
        let items = self.store.snapshot().items;
        let view = self.view.lock().unwrap();
        let mut rows = match self.mode {
            PaginationMode::Server => items,
            PaginationMode::Client => {
                let needle = view.committed_filter.to_lowercase();
                let filtered: Vec<R> = items
                    .into_iter()
                    .filter(|r| needle.is_empty() || record_matches(r, &needle))
                    .collect();
                filtered
                    .into_iter()
                    .skip(view.page_index * view.page_size)
                    .take(view.page_size)
                    .collect()
            }
        };
        if let Some((column, order)) = &view.sort {
            sort_rows(&mut rows, column, *order);
        }
        rows
    }
}

fn record_matches<R: EntityRecord>(record: &R, needle: &str) -> bool {
    match serde_json::to_value(record) {
        Ok(Value::Object(map)) => map.values().any(|v| match v {
            Value::String(s) => s.to_lowercase().contains(needle),
            Value::Number(n) => n.to_string().contains(needle),
            _ => false,
        }),
        _ => false,
    }
}

fn sort_rows<R: EntityRecord>(rows: &mut [R], column: &str, order: SortOrder) {
    rows.sort_by(|a, b| {
        let ord = compare_values(field_value(a, column).as_ref(), field_value(b, column).as_ref());
        match order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
}

fn field_value<R: EntityRecord>(record: &R, column: &str) -> Option<Value> {
    match serde_json::to_value(record) {
        Ok(Value::Object(mut map)) => map.remove(column),
        _ => None,
    }
}

/// Numbers compare numerically, strings case-insensitively; rows missing
/// the column sort last.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => {
            x.to_lowercase().cmp(&y.to_lowercase())
        }
        (Some(x), Some(y)) => x.to_string().cmp(&y.to_string()),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{Item, seeded_gateway};

    #[tokio::test]
    async fn page_change_issues_exactly_one_fetch() {
        let (gw, _) = seeded_gateway(25);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let list = ListController::new(store, PaginationMode::Server);

        list.refresh().await.unwrap();
        assert_eq!(gw.call_count("admin/category/get-data"), 1);

        list.set_page(1).await.unwrap();
        assert_eq!(gw.call_count("admin/category/get-data"), 2);
        assert_eq!(list.visible_rows().len(), 10);

        // Same index again: no fetch.
        list.set_page(1).await.unwrap();
        assert_eq!(gw.call_count("admin/category/get-data"), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_filter_edits_collapse_to_one_fetch_with_final_text() {
        let (gw, _) = seeded_gateway(25);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let list = ListController::new(store, PaginationMode::Server);
        list.refresh().await.unwrap();
        list.set_page(2).await.unwrap();
        let calls_before = gw.call_count("admin/category/get-data");

        list.set_filter_input("i");
        list.set_filter_input("it");
        list.set_filter_input("item 2");
        tokio::time::sleep(Duration::from_millis(600)).await;
        // Let the surviving debounce task finish its fetch.
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        assert_eq!(gw.call_count("admin/category/get-data"), calls_before + 1);
        let last = gw.calls().into_iter().last().unwrap();
        assert_eq!(last.body.unwrap()["search"], "item 2");
        // Committing a filter resets the page.
        assert_eq!(list.table_state().page_index, 0);
        assert_eq!(list.table_state().committed_filter, "item 2");
    }

    #[tokio::test]
    async fn deleting_last_row_of_a_later_page_steps_back() {
        // 21 rows, page size 10: page 2 holds exactly one row.
        let (gw, ids) = seeded_gateway(21);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let list = ListController::new(store, PaginationMode::Server);
        list.refresh().await.unwrap();
        list.set_page(2).await.unwrap();
        assert_eq!(list.visible_rows().len(), 1);

        list.remove(ids[20]).await.unwrap();

        let state = list.table_state();
        assert_eq!(state.page_index, 1, "must step back, not request an empty page");
        assert_eq!(list.visible_rows().len(), 10);
    }

    #[tokio::test]
    async fn client_mode_filters_and_pages_without_requests() {
        let (gw, _) = seeded_gateway(25);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let list = ListController::new(store, PaginationMode::Client).with_debounce(Duration::ZERO);
        list.refresh().await.unwrap();
        assert_eq!(gw.call_count("admin/category/get-data"), 1);

        list.set_filter_input("item 1");
        list.set_page(1).await.unwrap();
        // "item 1" matches Item 1 and Item 10..19: 11 rows, page 1 holds one.
        assert_eq!(list.visible_rows().len(), 1);
        assert_eq!(gw.call_count("admin/category/get-data"), 1, "no re-request in client mode");
    }

    #[tokio::test]
    async fn sorting_reorders_visible_rows_without_a_fetch() {
        let (gw, _) = seeded_gateway(5);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let list = ListController::new(store, PaginationMode::Server);
        list.refresh().await.unwrap();

        list.set_sort(Some(("sequence".to_string(), SortOrder::Desc)));
        let rows = list.visible_rows();
        assert_eq!(rows[0].name, "Item 4");
        assert_eq!(rows[4].name, "Item 0");
        assert_eq!(gw.call_count("admin/category/get-data"), 1, "sorting is view-only");

        list.set_sort(None);
        assert_eq!(list.visible_rows()[0].name, "Item 0");
    }

    #[tokio::test]
    async fn removing_from_page_with_remaining_rows_keeps_index() {
        let (gw, ids) = seeded_gateway(25);
        let store: EntityStore<Item> = EntityStore::new(gw.clone());
        let list = ListController::new(store, PaginationMode::Server);
        list.refresh().await.unwrap();
        list.set_page(1).await.unwrap();

        list.remove(ids[12]).await.unwrap();
        assert_eq!(list.table_state().page_index, 1);
        assert_eq!(list.visible_rows().len(), 10);
    }
}
