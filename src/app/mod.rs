//! Application state for the user list screen.
//!
//! [`AppState`] ties the search box, the page-size selector and the shared
//! page counter to the [`QueryCoordinator`]. Every emission of the page
//! counter issues a list query; search text is debounced and then resets the
//! counter to page 1, which in turn re-queries. Queries run as tokio tasks and
//! report back tagged with a generation number. A newer request aborts the
//! older task, and any late result from a superseded generation is dropped.
pub mod debounce;
pub mod keymap;
pub mod theme;
pub mod update;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{PAGE_SIZE_OPTIONS, Settings};
use crate::error::Result;
use crate::observable::Subscription;
use crate::pagination::PaginationState;
use crate::query::{ListQuery, ListResult, QueryCoordinator};
use crate::store::{RecordStore, UserRecord};

pub use debounce::Debouncer;
pub use keymap::{KeyAction, Keymap};
pub use theme::Theme;

/// How the current page is laid out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Card,
    Row,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Card => ViewMode::Row,
            ViewMode::Row => ViewMode::Card,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Card => "card",
            ViewMode::Row => "row",
        }
    }
}

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Dialogs drawn over the list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    /// `selected`: 0 = Yes, 1 = No.
    DeleteConfirm {
        id: String,
        name: String,
        selected: usize,
    },
    Info {
        message: String,
    },
    Help,
}

type Delivery = (u64, ListResult);

pub struct AppState {
    pub queries: QueryCoordinator,
    pub pagination: PaginationState,
    page_events: Subscription<u32>,
    /// Text as typed, applied after the debounce interval.
    pub search_input: String,
    /// Text the current results were filtered with.
    pub search_query: String,
    search_debounce: Debouncer<String>,
    pub items_per_page: u32,
    pub view_mode: ViewMode,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub result: ListResult,
    pub pages: Vec<u32>,
    /// Selection within the current page.
    pub selected_index: usize,
    pub theme: Theme,
    pub keymap: Keymap,
    generation: u64,
    awaiting: Option<u64>,
    in_flight: Option<JoinHandle<()>>,
    results_tx: mpsc::UnboundedSender<Delivery>,
    results_rx: mpsc::UnboundedReceiver<Delivery>,
    requests_issued: u64,
    last_query: Option<ListQuery>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, settings: &Settings) -> Self {
        let items_per_page = if PAGE_SIZE_OPTIONS.contains(&settings.items_per_page) {
            settings.items_per_page
        } else {
            warn!(
                requested = settings.items_per_page,
                "page size not offered, using default"
            );
            PAGE_SIZE_OPTIONS[0]
        };
        let pagination = PaginationState::new();
        let page_events = pagination.get_current_page();
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            queries: QueryCoordinator::new(store, settings.latency),
            pagination,
            page_events,
            search_input: String::new(),
            search_query: String::new(),
            search_debounce: Debouncer::new(settings.debounce),
            items_per_page,
            view_mode: ViewMode::default(),
            input_mode: InputMode::Normal,
            modal: None,
            result: ListResult::default(),
            pages: Vec::new(),
            selected_index: 0,
            theme: Theme::default(),
            keymap: Keymap::default(),
            generation: 0,
            awaiting: None,
            in_flight: None,
            results_tx,
            results_rx,
            requests_issued: 0,
            last_query: None,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_keymap(mut self, keymap: Keymap) -> Self {
        self.keymap = keymap;
        self
    }

    /// Issue the first query. The page counter's initial value is consumed here
    /// so it does not cause a second one.
    pub fn init(&mut self) {
        self.page_events.drain_latest();
        self.request_reload();
    }

    /// Non-blocking step: apply a due search, react to page changes, take in
    /// finished queries.
    pub fn tick(&mut self) {
        if let Some(text) = self.search_debounce.poll(Instant::now()) {
            self.apply_search(text);
        }
        loop {
            let mut progressed = false;
            if self.page_events.drain_latest().is_some() {
                self.request_reload();
                progressed = true;
            }
            while let Ok((generation, result)) = self.results_rx.try_recv() {
                self.apply_result(generation, result);
                progressed = true;
            }
            if !progressed {
                break;
            }
        }
    }

    /// Drive debounce, page changes and the in-flight query until nothing is pending.
    pub async fn settle(&mut self) {
        loop {
            self.tick();
            if let Some(deadline) = self.search_debounce.deadline() {
                tokio::time::sleep_until(deadline).await;
                continue;
            }
            if self.awaiting.is_some() {
                if let Some((generation, result)) = self.results_rx.recv().await {
                    self.apply_result(generation, result);
                }
                continue;
            }
            break;
        }
    }

    fn build_query(&self) -> ListQuery {
        ListQuery::new(self.pagination.current_page(), self.items_per_page)
            .with_search(self.search_query.clone())
    }

    fn request_reload(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            debug!(generation = self.generation, "cancelling in-flight list query");
            handle.abort();
        }
        self.generation += 1;
        let generation = self.generation;
        let query = self.build_query();
        debug!(generation, ?query, "issuing list query");
        self.last_query = Some(query.clone());
        self.requests_issued += 1;
        self.awaiting = Some(generation);

        let queries = self.queries.clone();
        let tx = self.results_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = queries.list(&query).await;
            // The receiver only goes away with the app itself.
            let _ = tx.send((generation, result));
        }));
    }

    fn apply_result(&mut self, generation: u64, result: ListResult) {
        if generation != self.generation {
            warn!(generation, latest = self.generation, "discarding stale list result");
            return;
        }
        self.awaiting = None;
        self.in_flight = None;
        self.pages = self
            .pagination
            .compute_valid_page_numbers(result.total_count, self.items_per_page);
        self.selected_index = self
            .selected_index
            .min(result.items.len().saturating_sub(1));
        debug!(
            generation,
            total = result.total_count,
            shown = result.items.len(),
            pages = self.pages.len(),
            "list result applied"
        );
        self.result = result;
    }

    // ----- search -----

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leave search mode; the typed text stays and is still applied.
    pub fn end_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    /// Leave search mode and clear the text.
    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.set_search_input(String::new());
    }

    /// Record typed text. Applied once input has been quiet for the debounce interval.
    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
        self.search_debounce
            .push(self.search_input.clone(), Instant::now());
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut text = self.search_input.clone();
        text.push(c);
        self.set_search_input(text);
    }

    pub fn pop_search_char(&mut self) {
        let mut text = self.search_input.clone();
        if text.pop().is_some() {
            self.set_search_input(text);
        }
    }

    fn apply_search(&mut self, text: String) {
        info!(search = %text, "search applied");
        self.search_query = text;
        self.selected_index = 0;
        self.pagination.set_current_page(1);
    }

    // ----- paging -----

    /// Change the page size. Only values from `PAGE_SIZE_OPTIONS` are accepted.
    pub fn set_items_per_page(&mut self, items_per_page: u32) -> bool {
        if !PAGE_SIZE_OPTIONS.contains(&items_per_page) {
            warn!(items_per_page, "rejecting page size outside the offered options");
            return false;
        }
        self.items_per_page = items_per_page;
        self.selected_index = 0;
        self.pagination.set_current_page(1);
        true
    }

    pub fn cycle_page_size(&mut self) {
        let idx = PAGE_SIZE_OPTIONS
            .iter()
            .position(|n| *n == self.items_per_page)
            .map_or(0, |i| (i + 1) % PAGE_SIZE_OPTIONS.len());
        self.set_items_per_page(PAGE_SIZE_OPTIONS[idx]);
    }

    /// Page click. Not validated; an out-of-range page (including 0) is pulled
    /// back to 1 when its result arrives.
    pub fn go_to_page(&mut self, page: u32) {
        self.selected_index = 0;
        self.pagination.set_current_page(page);
    }

    pub fn next_page(&mut self) {
        let current = self.current_page();
        if current < self.total_pages() {
            self.go_to_page(current + 1);
        }
    }

    pub fn prev_page(&mut self) {
        let current = self.current_page();
        if current > 1 {
            self.go_to_page(current - 1);
        }
    }

    pub fn first_page(&mut self) {
        if self.current_page() != 1 {
            self.go_to_page(1);
        }
    }

    pub fn last_page(&mut self) {
        let last = self.total_pages();
        if last > 0 && self.current_page() != last {
            self.go_to_page(last);
        }
    }

    pub fn current_page(&self) -> u32 {
        self.pagination.current_page()
    }

    pub fn total_pages(&self) -> u32 {
        self.pages.len() as u32
    }

    // ----- selection and delete -----

    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.result.items.get(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.result.items.len() {
            self.selected_index += 1;
        }
    }

    /// Open the delete confirmation for the selected user.
    pub fn request_delete_selected(&mut self) {
        if let Some(user) = self.selected_user().cloned() {
            self.modal = Some(ModalState::DeleteConfirm {
                id: user.id,
                name: user.display_name,
                selected: 1,
            });
            self.input_mode = InputMode::Modal;
        }
    }

    /// Remove a user, then reload the current page. `NotFound` is shown in an
    /// info dialog and returned; the list is left as it was.
    pub async fn delete_user(&mut self, id: &str) -> Result<()> {
        match self.queries.remove(id).await {
            Ok(()) => {
                self.request_reload();
                Ok(())
            }
            Err(e) => {
                self.show_info(format!("Could not delete {id}: {e}"));
                Err(e)
            }
        }
    }

    // ----- view and dialogs -----

    pub fn toggle_view(&mut self) {
        self.view_mode = self.view_mode.toggled();
        debug!(view = self.view_mode.label(), "view toggled");
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.modal = Some(ModalState::Info {
            message: message.into(),
        });
        self.input_mode = InputMode::Modal;
    }

    pub fn open_help(&mut self) {
        self.modal = Some(ModalState::Help);
        self.input_mode = InputMode::Modal;
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
        self.input_mode = InputMode::Normal;
    }

    // ----- introspection -----

    pub fn is_loading(&self) -> bool {
        self.queries.is_loading()
    }

    /// Number of list queries issued so far.
    pub fn requests_issued(&self) -> u64 {
        self.requests_issued
    }

    /// The most recently issued query.
    pub fn last_query(&self) -> Option<&ListQuery> {
        self.last_query.as_ref()
    }

    pub fn search_pending(&self) -> bool {
        self.search_debounce.is_pending()
    }
}

impl Drop for AppState {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
