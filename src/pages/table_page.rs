//! Generic paginated table page
//!
//! One `TablePage<T>` backs every entity tab. It owns the columns, the
//! pagination and sort state, the search text and the query that fetches
//! the current page. Any change to the query key issues a new fetch.

use crate::action::Action;
use crate::component::{Component, RenderContext};
use crate::model::{EntityKind, Record};
use crate::route::Route;
use crate::services::{ApiError, BillingApi, ListRequest, Page, QueryRunner};
use crate::table::{
    draw_table, render_rows, ColumnDescriptor, ExpansionState, PaginationController,
    PaginationState, RenderedRow, RowMode, SortDirection, SortState, TableFrame, TableModel,
    TableView, Tone,
};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    Frame,
};
use std::sync::Arc;
use tracing::{info, warn};

/// How a page fetches one page of its entity
pub type FetchPage<T> = fn(&dyn BillingApi, &ListRequest) -> Result<Page<T>, ApiError>;

/// Per-entity pieces plugged into a `TablePage`
pub struct PageDefinition<T> {
    pub columns: Vec<ColumnDescriptor<T>>,
    pub mode: RowMode<T>,
    pub fetch: FetchPage<T>,
    pub empty_message: &'static str,
}

/// Object-safe view of a feature page, used by the app for its tabs
pub trait FeaturePage: Component {
    fn kind(&self) -> EntityKind;

    fn title(&self) -> &'static str {
        self.kind().title()
    }

    /// Apply finished fetches and re-issue stale queries
    fn poll(&mut self) -> bool;

    /// Re-issue the current query now
    fn refresh(&mut self);

    /// Mark cached data stale, it is fetched again on the next poll
    fn invalidate(&mut self);

    fn search(&self) -> &str;

    fn is_searching(&self) -> bool;

    fn total_count(&self) -> Option<usize>;

    fn is_loading(&self) -> bool;
}

/// A fetched page with the offset it was requested at
struct LoadedPage<T> {
    offset: usize,
    page: Page<T>,
}

pub struct TablePage<T: Record> {
    columns: Vec<ColumnDescriptor<T>>,
    mode: RowMode<T>,
    fetch: FetchPage<T>,
    empty_message: &'static str,
    api: Arc<dyn BillingApi>,
    tenant: String,
    pagination: PaginationController,
    sort: Option<SortState>,
    search: String,
    search_mode: bool,
    query: QueryRunner<LoadedPage<T>>,
    /// Key of the last fetch issued, `None` once invalidated
    last_request: Option<ListRequest>,
    expansion: ExpansionState,
    /// Index of the selected item on the current page
    cursor: usize,
    scroll: usize,
}

impl<T: Record> TablePage<T> {
    pub fn new(
        definition: PageDefinition<T>,
        api: Arc<dyn BillingApi>,
        tenant: &str,
        page_size: usize,
    ) -> Self {
        Self {
            columns: definition.columns,
            mode: definition.mode,
            fetch: definition.fetch,
            empty_message: definition.empty_message,
            api,
            tenant: tenant.to_string(),
            pagination: PaginationController::new(PaginationState::new(0, page_size.max(1))),
            sort: None,
            search: String::new(),
            search_mode: false,
            query: QueryRunner::new(T::KIND.slug()),
            last_request: None,
            expansion: ExpansionState::new(),
            cursor: 0,
            scroll: 0,
        }
    }

    pub fn request(&self) -> ListRequest {
        ListRequest::new(self.pagination.state(), self.sort.clone(), &self.search)
    }

    fn items(&self) -> Option<&[T]> {
        self.query.state().data.as_ref().map(|loaded| loaded.page.items.as_slice())
    }

    /// Fetch if the query key changed since the last request
    fn sync_query(&mut self) {
        let request = self.request();
        if self.last_request.as_ref() != Some(&request) {
            self.issue(request);
        }
    }

    fn issue(&mut self, request: ListRequest) {
        let api = Arc::clone(&self.api);
        let fetch = self.fetch;
        self.last_request = Some(request.clone());
        self.query.fetch(move || {
            fetch(api.as_ref(), &request).map(|page| LoadedPage {
                offset: request.offset,
                page,
            })
        });
    }

    fn page_changed(&mut self) {
        self.cursor = 0;
        self.scroll = 0;
        self.sync_query();
    }

    fn clamp_to_total(&mut self) {
        let Some(total) = self.total_count() else {
            return;
        };
        let state = self.pagination.state();
        if state.is_out_of_range(total) {
            let clamped = state.clamped(total);
            info!(
                kind = %T::KIND,
                from = state.page_index,
                to = clamped.page_index,
                total,
                "page past the end, clamping"
            );
            self.pagination.set_pagination(clamped);
            self.page_changed();
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.items().map_or(0, <[T]>::len);
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn next_sort(&self) -> Option<SortState> {
        let sortable: Vec<&'static str> = self
            .columns
            .iter()
            .filter(|c| c.sortable)
            .map(|c| c.id)
            .collect();

        match &self.sort {
            None => sortable.first().map(|id| SortState {
                column: id.to_string(),
                direction: SortDirection::Asc,
            }),
            Some(sort) if sort.direction == SortDirection::Asc => Some(SortState {
                column: sort.column.clone(),
                direction: SortDirection::Desc,
            }),
            Some(sort) => sortable
                .iter()
                .position(|id| *id == sort.column)
                .and_then(|pos| sortable.get(pos + 1))
                .map(|id| SortState {
                    column: id.to_string(),
                    direction: SortDirection::Asc,
                }),
        }
    }

    /// Search and sort changes restart from the first page
    fn query_changed(&mut self) {
        self.expansion.clear();
        self.pagination.first_page();
        self.page_changed();
    }

    fn build(&self) -> (TableView, Vec<RenderedRow>) {
        let state = self.query.state();
        let empty_message = match (&state.error, self.search.is_empty()) {
            (Some(err), _) => format!("Failed to load {}: {}", T::KIND.title().to_lowercase(), err),
            (None, false) => format!("No {} match \"{}\"", T::KIND.title().to_lowercase(), self.search),
            (None, true) => self.empty_message.to_string(),
        };

        let row_id = |item: &T| item.id().to_string();
        let view = TableModel::new(&self.columns)
            .with_row_id(&row_id)
            .with_empty_message(empty_message)
            .with_sort(self.sort.as_ref())
            .build(self.items(), state.is_loading);
        let rows = render_rows(&view, self.items(), &self.mode, &self.expansion);
        (view, rows)
    }

    fn selected<'r>(&self, rows: &'r [RenderedRow]) -> Option<&'r RenderedRow> {
        rows.iter().filter(|row| row.is_selectable()).nth(self.cursor)
    }

    /// Route for the row under the cursor
    fn open_selected(&self) -> Option<Route> {
        let (_, rows) = self.build();
        let RenderedRow::Main { row, link, .. } = self.selected(&rows)? else {
            return None;
        };
        match link {
            Some(link) => match Route::parse(link) {
                Ok(route) => Some(route),
                Err(err) => {
                    warn!(link = %link, error = %err, "row link is not a valid route");
                    None
                }
            },
            None => Some(Route::record(&self.tenant, T::KIND, &row.id)),
        }
    }

    fn toggle_selected(&mut self) {
        if !self.mode.is_expandable() {
            return;
        }
        let id = self
            .items()
            .and_then(|items| items.get(self.cursor))
            .map(|item| item.id().to_string());
        if let Some(id) = id {
            self.expansion.toggle(&id);
        }
    }

    fn title_text(&self) -> String {
        let mut title = T::KIND.title().to_string();
        if let Some(total) = self.total_count() {
            title.push_str(&format!(" ({})", total));
        }
        if self.search_mode {
            title.push_str(&format!(" · /{}▏", self.search));
        } else if !self.search.is_empty() {
            title.push_str(&format!(" · search: {}", self.search));
        }
        title
    }

    fn footer(&self, theme: &Theme) -> Line<'static> {
        let state = self.pagination.state();
        let query = self.query.state();
        let mut spans = Vec::new();

        match self.total_count() {
            Some(total) => {
                spans.push(Span::raw(format!(
                    "Page {}/{}",
                    state.page_index + 1,
                    state.page_count(total)
                )));
                // Rows on screen may still be from the previous request
                let shown = query
                    .data
                    .as_ref()
                    .map(|loaded| (loaded.offset, loaded.page.items.len()));
                if let Some((offset, shown)) = shown.filter(|(_, len)| *len > 0) {
                    let first = offset + 1;
                    spans.push(Span::styled(
                        format!(" · {}-{} of {}", first, first + shown - 1, total),
                        theme.tone(Tone::Muted),
                    ));
                }
            }
            None => spans.push(Span::raw(format!("Page {}", state.page_index + 1))),
        }

        spans.push(Span::styled(
            format!(" · {} per page", state.page_size),
            theme.tone(Tone::Muted),
        ));

        if let Some(sort) = &self.sort {
            spans.push(Span::styled(
                format!(" · sort {} {}", sort.column, sort.direction.indicator()),
                theme.tone(Tone::Accent),
            ));
        }
        if query.is_loading {
            spans.push(Span::styled(" · loading…", theme.tone(Tone::Warning)));
        }
        if let Some(err) = &query.error {
            spans.push(Span::styled(format!(" · {}", err), theme.tone(Tone::Negative)));
        }

        Line::from(spans)
    }
}

impl<T: Record> FeaturePage for TablePage<T> {
    fn kind(&self) -> EntityKind {
        T::KIND
    }

    fn poll(&mut self) -> bool {
        let changed = self.query.poll();
        if changed {
            self.clamp_to_total();
            self.clamp_cursor();
        }
        if self.last_request.is_none() {
            self.sync_query();
        }
        changed
    }

    fn refresh(&mut self) {
        let request = self.request();
        self.issue(request);
    }

    fn invalidate(&mut self) {
        self.last_request = None;
    }

    fn search(&self) -> &str {
        &self.search
    }

    fn is_searching(&self) -> bool {
        self.search_mode
    }

    fn total_count(&self) -> Option<usize> {
        self.query.state().data.as_ref().map(|loaded| loaded.page.total_count)
    }

    fn is_loading(&self) -> bool {
        self.query.state().is_loading
    }
}

impl<T: Record> Component for TablePage<T> {
    fn init(&mut self) -> Result<()> {
        self.sync_query();
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.search_mode {
            let action = match key.code {
                KeyCode::Esc => Some(Action::ClearSearch),
                KeyCode::Enter => Some(Action::ExitSearchMode),
                KeyCode::Backspace => Some(Action::SearchBackspace),
                KeyCode::Char(c) => Some(Action::SearchInput(c)),
                _ => None,
            };
            return Ok(action);
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::CursorDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::CursorUp),
            KeyCode::Char('n') | KeyCode::Right => Some(Action::NextPage),
            KeyCode::Char('p') | KeyCode::Left => Some(Action::PrevPage),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstPage),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastPage),
            KeyCode::Char('z') => Some(Action::CyclePageSize),
            KeyCode::Char('s') => Some(Action::CycleSort),
            KeyCode::Char(' ') => Some(Action::ToggleExpand),
            KeyCode::Enter => Some(Action::OpenRow),
            KeyCode::Char('/') => Some(Action::EnterSearchMode),
            KeyCode::Char('r') => Some(Action::Refresh),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::CursorDown => {
                self.cursor += 1;
                self.clamp_cursor();
            }
            Action::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Action::NextPage => {
                let has_next = self
                    .total_count()
                    .is_some_and(|total| self.pagination.state().has_next(total));
                if has_next && self.pagination.next_page() {
                    self.page_changed();
                }
            }
            Action::PrevPage => {
                if self.pagination.state().has_prev() && self.pagination.prev_page() {
                    self.page_changed();
                }
            }
            Action::FirstPage => {
                if self.pagination.first_page() {
                    self.page_changed();
                }
            }
            Action::LastPage => {
                if let Some(total) = self.total_count() {
                    if self.pagination.last_page(total) {
                        self.page_changed();
                    }
                }
            }
            Action::CyclePageSize => {
                self.pagination.cycle_page_size();
                self.page_changed();
            }
            Action::CycleSort => {
                self.sort = self.next_sort();
                self.query_changed();
            }
            Action::ToggleExpand => self.toggle_selected(),
            Action::OpenRow => return Ok(self.open_selected().map(Action::Navigate)),
            Action::Refresh => self.refresh(),
            Action::EnterSearchMode => self.search_mode = true,
            Action::ExitSearchMode => self.search_mode = false,
            Action::ClearSearch => {
                self.search_mode = false;
                if !self.search.is_empty() {
                    self.search.clear();
                    self.query_changed();
                }
            }
            Action::SearchInput(c) => {
                self.search.push(c);
                self.query_changed();
            }
            Action::SearchBackspace => {
                if self.search.pop().is_some() {
                    self.query_changed();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let (view, rows) = self.build();
        let cursor = rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_selectable())
            .nth(self.cursor)
            .map(|(i, _)| i);
        let title = self.title_text();

        let table = TableFrame {
            title: &title,
            view: &view,
            rows: &rows,
            cursor,
            expandable: self.mode.is_expandable(),
            footer: self.footer(&ctx.theme),
        };
        draw_table(frame, area, &table, &mut self.scroll, &ctx.theme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CreditNote, Customer, Dataset, Invoice, NewCustomer, Plan, Subscription};
    use crate::pages::{customers, invoices};
    use crate::services::FixtureApi;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Mutex;
    use std::time::{Duration, Instant};

    fn api() -> Arc<dyn BillingApi> {
        Arc::new(FixtureApi::new(Dataset::demo("acme"), Duration::ZERO))
    }

    #[derive(Debug, Clone, Copy)]
    enum CustomerListing {
        Served,
        Emptied,
        Failing,
    }

    /// Demo fixture whose customer listing can change between fetches
    struct ScriptedApi {
        inner: FixtureApi,
        customers: Mutex<CustomerListing>,
    }

    impl ScriptedApi {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                inner: FixtureApi::new(Dataset::demo("acme"), Duration::ZERO),
                customers: Mutex::new(CustomerListing::Served),
            })
        }

        fn set_customers(&self, listing: CustomerListing) {
            *self.customers.lock().unwrap() = listing;
        }
    }

    impl BillingApi for ScriptedApi {
        fn list_customers(&self, request: &ListRequest) -> Result<Page<Customer>, ApiError> {
            let listing = *self.customers.lock().unwrap();
            match listing {
                CustomerListing::Served => self.inner.list_customers(request),
                CustomerListing::Emptied => Ok(Page {
                    items: Vec::new(),
                    total_count: 0,
                }),
                CustomerListing::Failing => Err(ApiError::Unavailable("offline".to_string())),
            }
        }

        fn list_invoices(&self, request: &ListRequest) -> Result<Page<Invoice>, ApiError> {
            self.inner.list_invoices(request)
        }

        fn list_subscriptions(&self, request: &ListRequest) -> Result<Page<Subscription>, ApiError> {
            self.inner.list_subscriptions(request)
        }

        fn list_plans(&self, request: &ListRequest) -> Result<Page<Plan>, ApiError> {
            self.inner.list_plans(request)
        }

        fn list_credit_notes(&self, request: &ListRequest) -> Result<Page<CreditNote>, ApiError> {
            self.inner.list_credit_notes(request)
        }

        fn get_record(&self, kind: EntityKind, id: &str) -> Result<serde_json::Value, ApiError> {
            self.inner.get_record(kind, id)
        }

        fn import_customers(&self, customers: Vec<NewCustomer>) -> Result<usize, ApiError> {
            self.inner.import_customers(customers)
        }
    }

    fn customers_page() -> TablePage<Customer> {
        let mut page = customers::page(api(), "acme", 20);
        page.init().unwrap();
        page
    }

    fn settle<T: Record>(page: &mut TablePage<T>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            page.poll();
            if !page.is_loading() {
                return;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("page did not finish loading");
    }

    fn screen<T: Record>(page: &mut TablePage<T>) -> String {
        let ctx = RenderContext::new(Theme::dark(), "acme");
        let mut terminal = Terminal::new(TestBackend::new(120, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                page.draw(frame, area, &ctx).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_init_loads_first_page() {
        let mut page = customers_page();
        assert!(page.is_loading());
        assert!(page.query.state().data.is_none());

        settle(&mut page);
        assert_eq!(page.total_count(), Some(52));
        assert_eq!(page.items().map(<[Customer]>::len), Some(20));
    }

    #[test]
    fn test_out_of_range_page_is_clamped() {
        let mut page = customers_page();
        settle(&mut page);

        page.pagination.set_pagination(PaginationState::new(9, 20));
        page.sync_query();
        settle(&mut page);

        assert_eq!(page.pagination.state().page_index, 2);
        assert_eq!(page.items().map(<[Customer]>::len), Some(12));
    }

    #[test]
    fn test_emptied_results_clamp_to_first_page() {
        let api = ScriptedApi::new();
        let mut page = customers::page(api.clone(), "acme", 20);
        page.init().unwrap();
        settle(&mut page);
        page.update(Action::LastPage).unwrap();
        settle(&mut page);
        assert_eq!(page.pagination.state().page_index, 2);

        api.set_customers(CustomerListing::Emptied);
        page.invalidate();
        page.poll();
        settle(&mut page);

        let state = page.pagination.state();
        assert_eq!(state.page_index, 0);
        assert_eq!(page.total_count(), Some(0));
        assert!(!state.is_out_of_range(0));
        let text = screen(&mut page);
        assert!(text.contains("Page 1/1"));
        assert!(text.contains("No customers"));
    }

    #[test]
    fn test_failed_page_change_keeps_range_of_shown_rows() {
        let api = ScriptedApi::new();
        let mut page = customers::page(api.clone(), "acme", 20);
        page.init().unwrap();
        settle(&mut page);

        api.set_customers(CustomerListing::Failing);
        page.update(Action::NextPage).unwrap();
        settle(&mut page);

        assert_eq!(page.pagination.state().page_index, 1);
        assert!(page.query.state().error.is_some());
        assert_eq!(page.items().map(<[Customer]>::len), Some(20));
        let text = screen(&mut page);
        assert!(text.contains("Page 2/3"));
        assert!(text.contains("1-20 of 52"));
        assert!(!text.contains("21-40"));
    }

    #[test]
    fn test_next_page_waits_for_total() {
        let mut page = customers::page(api(), "acme", 20);
        page.update(Action::NextPage).unwrap();
        assert_eq!(page.pagination.state().page_index, 0);
    }

    #[test]
    fn test_paging_stops_at_last_page() {
        let mut page = customers_page();
        settle(&mut page);

        page.update(Action::LastPage).unwrap();
        assert_eq!(page.pagination.state().page_index, 2);
        settle(&mut page);

        page.update(Action::NextPage).unwrap();
        assert_eq!(page.pagination.state().page_index, 2);

        page.update(Action::PrevPage).unwrap();
        assert_eq!(page.pagination.state().page_index, 1);
        assert_eq!(page.request().offset, 20);
    }

    #[test]
    fn test_search_resets_page_index() {
        let mut page = customers_page();
        settle(&mut page);
        page.update(Action::NextPage).unwrap();
        assert_eq!(page.pagination.state().page_index, 1);

        page.update(Action::EnterSearchMode).unwrap();
        assert!(page.is_searching());
        page.update(Action::SearchInput('h')).unwrap();
        page.update(Action::SearchInput('o')).unwrap();

        assert_eq!(page.pagination.state().page_index, 0);
        assert_eq!(page.request().search.as_deref(), Some("ho"));

        settle(&mut page);
        // Hooli and the Holdings suffix
        assert_eq!(page.total_count(), Some(15));

        page.update(Action::ClearSearch).unwrap();
        assert!(!page.is_searching());
        assert_eq!(page.search(), "");
    }

    #[test]
    fn test_sort_cycles_through_sortable_columns() {
        let mut page = customers_page();
        settle(&mut page);
        page.update(Action::NextPage).unwrap();

        page.update(Action::CycleSort).unwrap();
        assert_eq!(page.pagination.state().page_index, 0);
        assert_eq!(
            page.sort.as_ref(),
            Some(&SortState {
                column: "name".to_string(),
                direction: SortDirection::Asc
            })
        );

        page.update(Action::CycleSort).unwrap();
        assert_eq!(page.sort.as_ref().map(|s| s.direction), Some(SortDirection::Desc));

        page.update(Action::CycleSort).unwrap();
        assert_eq!(page.sort.as_ref().map(|s| s.column.as_str()), Some("email"));

        for _ in 0..8 {
            page.update(Action::CycleSort).unwrap();
        }
        assert_eq!(page.sort.as_ref(), None);
    }

    #[test]
    fn test_cycle_page_size() {
        let mut page = customers_page();
        settle(&mut page);
        page.update(Action::CyclePageSize).unwrap();
        assert_eq!(page.pagination.state(), PaginationState::new(0, 50));

        settle(&mut page);
        assert_eq!(page.items().map(<[Customer]>::len), Some(50));
    }

    #[test]
    fn test_open_row_follows_link() {
        let mut page = customers_page();
        settle(&mut page);
        page.update(Action::CursorDown).unwrap();

        let id = page.items().unwrap()[1].id.clone();
        let action = page.update(Action::OpenRow).unwrap();
        assert_eq!(
            action,
            Some(Action::Navigate(Route::record("acme", EntityKind::Customers, &id)))
        );
    }

    #[test]
    fn test_expand_invoice_adds_sub_row() {
        let mut page: TablePage<Invoice> = invoices::page(api(), "acme", 10);
        page.init().unwrap();
        settle(&mut page);

        let (_, before) = page.build();
        page.update(Action::ToggleExpand).unwrap();
        let (_, expanded) = page.build();
        assert_eq!(expanded.len(), before.len() + 1);
        assert!(matches!(expanded[1], RenderedRow::Sub { .. }));

        // Enter on an expandable row opens its record
        let action = page.update(Action::OpenRow).unwrap();
        let first = page.items().unwrap()[0].id.clone();
        assert_eq!(
            action,
            Some(Action::Navigate(Route::record("acme", EntityKind::Invoices, &first)))
        );

        page.update(Action::ToggleExpand).unwrap();
        assert_eq!(page.build().1.len(), before.len());
    }

    #[test]
    fn test_invalidate_refetches_on_poll() {
        let mut page = customers_page();
        settle(&mut page);
        assert!(!page.is_loading());

        page.invalidate();
        page.poll();
        assert!(page.is_loading());
        assert!(page.query.state().data.is_some());
        settle(&mut page);
    }

    #[test]
    fn test_draw_skeleton_then_rows() {
        let mut page = customers_page();
        let loading = screen(&mut page);
        assert!(loading.contains("Customers"));
        assert!(loading.contains("░"));

        settle(&mut page);
        let loaded = screen(&mut page);
        assert!(loaded.contains("Customers (52)"));
        assert!(loaded.contains("Page 1/3"));
        assert!(loaded.contains("1-20 of 52"));
        assert!(!loaded.contains("░"));
    }
}
