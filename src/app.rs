//! Root application component
//!
//! The App struct implements the Component trait, acting as the root component
//! that delegates event handling and rendering to the active page and dialogs.
//! It coordinates between components but holds no table logic itself.

use crate::action::Action;
use crate::component::{Component, RenderContext};
use crate::components::{
    draw_home_screen, HelpDialog, HomeRenderContext, ImportDialog, QuitDialog, RecordDetailDialog,
};
use crate::config::Config;
use crate::model::{EntityKind, Modal, ModalStack, Tenant};
use crate::pages::{all_pages, FeaturePage};
use crate::route::Route;
use crate::services::{read_customers_csv, BillingApi};
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, trace, warn};

/// Lines moved by PageUp/PageDown in scrollable dialogs
const SCROLL_PAGE: usize = 10;

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    pub config: Config,

    /// Where theme changes are persisted, `None` keeps them in memory
    pub config_path: Option<PathBuf>,

    /// Shared billing API handle, cloned into every fetch
    api: Arc<dyn BillingApi>,

    /// Tenant name and currency shown in the header
    profile: Option<Tenant>,

    /// Tab currently shown
    pub active: EntityKind,

    /// One page per tab, in `EntityKind::all()` order
    pages: Vec<Box<dyn FeaturePage>>,

    /// Modal overlay stack
    pub modals: ModalStack,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Error message to display
    pub error: Option<String>,

    /// Status message to display
    pub status_message: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs
    // ─────────────────────────────────────────────────────────────────────────
    pub quit_dialog: QuitDialog,
    pub help_dialog: HelpDialog,
    pub record_detail: RecordDetailDialog,
    pub import_dialog: ImportDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// Initialization
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: Config, api: Arc<dyn BillingApi>) -> App {
        let pages = all_pages(Arc::clone(&api), &config.tenant_slug, config.page_size);
        App {
            config_path: Config::config_path(),
            config,
            api,
            profile: None,
            active: EntityKind::Customers,
            pages,
            modals: ModalStack::new(),
            should_quit: false,
            error: None,
            status_message: None,
            quit_dialog: QuitDialog,
            help_dialog: HelpDialog::default(),
            record_detail: RecordDetailDialog::new(),
            import_dialog: ImportDialog::default(),
        }
    }

    pub fn with_profile(mut self, profile: Option<Tenant>) -> Self {
        self.profile = profile;
        self
    }

    /// Theme and tenant handed down to every component while drawing
    pub fn context(&self) -> RenderContext {
        RenderContext::new(Theme::for_name(self.config.theme), &self.config.tenant_slug)
            .with_profile(self.profile.clone())
    }

    fn page_mut(&mut self, kind: EntityKind) -> Option<&mut Box<dyn FeaturePage>> {
        self.pages.iter_mut().find(|page| page.kind() == kind)
    }

    fn select_tab(&mut self, kind: EntityKind) {
        self.active = kind;
        self.error = None;
    }

    fn step_tab(&mut self, forward: bool) {
        let all = EntityKind::all();
        let index = self.active.index();
        let next = if forward {
            (index + 1) % all.len()
        } else {
            (index + all.len() - 1) % all.len()
        };
        self.select_tab(all[next]);
    }

    fn navigate(&mut self, route: Route) {
        if route.tenant != self.config.tenant_slug {
            warn!(%route, tenant = %self.config.tenant_slug, "route for another tenant");
            self.error = Some(format!("No such tenant in {}", route));
            return;
        }

        self.select_tab(route.kind);
        if let Some(id) = route.id {
            self.modals.show_detail(route.kind, &id);
            self.record_detail.open(Arc::clone(&self.api), route.kind, &id);
        }
    }

    fn import_customers(&mut self, path: &str) -> Option<Action> {
        let customers = match read_customers_csv(Path::new(path)) {
            Ok(customers) => customers,
            Err(err) => {
                warn!(path, error = %err, "customer import failed");
                self.import_dialog.error = Some(err.to_string());
                return None;
            }
        };

        match self.api.import_customers(customers) {
            Ok(count) => {
                info!(path, count, "customer import finished");
                self.status_message = Some(format!("Imported {} customers", count));
                self.error = None;
                if matches!(self.modals.top(), Some(Modal::ImportCsv)) {
                    self.modals.pop();
                }
                self.select_tab(EntityKind::Customers);
                Some(Action::Invalidate(EntityKind::Customers))
            }
            Err(err) => {
                warn!(path, error = %err, "customer import rejected");
                self.import_dialog.error = Some(err.to_string());
                None
            }
        }
    }

    fn toggle_theme(&mut self) {
        self.config.theme = self.config.theme.toggled();
        self.status_message = Some(format!("Theme: {}", self.config.theme.as_str()));

        if let Some(path) = &self.config_path {
            if let Err(err) = self.config.save_to(path) {
                warn!(error = %err, "failed to save config");
                self.status_message = Some(format!("Theme not saved: {}", err));
            }
        }
    }

    fn scroll_modal(&mut self, action: &Action) {
        let offset = match self.modals.top() {
            Some(Modal::Help) => &mut self.help_dialog.scroll_offset,
            Some(Modal::RecordDetail { .. }) => &mut self.record_detail.scroll_offset,
            _ => return,
        };
        *offset = match action {
            Action::ScrollDown => offset.saturating_add(1),
            Action::ScrollUp => offset.saturating_sub(1),
            Action::PageDown => offset.saturating_add(SCROLL_PAGE),
            Action::PageUp => offset.saturating_sub(SCROLL_PAGE),
            _ => *offset,
        };
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        for page in &mut self.pages {
            page.init()?;
        }
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        if let Some(modal) = self.modals.top().cloned() {
            return self.handle_modal_key_event(&modal, key);
        }

        let active = self.active;
        let Some(page) = self.page_mut(active) else {
            return Ok(None);
        };
        if page.is_searching() {
            return page.handle_key_event(key);
        }

        let action = match key.code {
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('i') => Some(Action::OpenImport),
            KeyCode::Tab => Some(Action::NextTab),
            KeyCode::BackTab => Some(Action::PrevTab),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                EntityKind::all().get(index).copied().map(Action::SelectTab)
            }
            _ => return page.handle_key_event(key),
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        if action != Action::Tick {
            trace!(%action, "dispatch");
        }

        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick => {
                for page in &mut self.pages {
                    page.poll();
                }
                self.record_detail.poll();
            }
            Action::ForceQuit => {
                self.should_quit = true;
            }
            Action::Resize(_, _) => {}

            // ─────────────────────────────────────────────────────────────────
            // Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NextTab => self.step_tab(true),
            Action::PrevTab => self.step_tab(false),
            Action::SelectTab(kind) => self.select_tab(kind),
            Action::Navigate(route) => self.navigate(route),

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (top dialog)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown | Action::PageUp | Action::PageDown => {
                self.scroll_modal(&action);
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenQuitDialog => self.modals.push(Modal::QuitConfirm),
            Action::OpenHelp => {
                self.help_dialog.scroll_offset = 0;
                self.modals.push(Modal::Help);
            }
            Action::OpenImport => {
                self.import_dialog.reset();
                self.modals.push(Modal::ImportCsv);
            }
            Action::CloseModal => {
                self.modals.pop();
            }
            Action::ConfirmModal => match self.modals.top() {
                Some(Modal::QuitConfirm) => return Ok(Some(Action::ForceQuit)),
                Some(Modal::ImportCsv) => {
                    let path = self.import_dialog.path.trim();
                    if path.is_empty() {
                        self.import_dialog.error = Some("Enter the path of a CSV file".to_string());
                    } else {
                        return Ok(Some(Action::ImportCustomers(path.to_string())));
                    }
                }
                _ => {}
            },
            Action::ModalInput(c) => {
                if matches!(self.modals.top(), Some(Modal::ImportCsv)) {
                    self.import_dialog.path.push(c);
                    self.import_dialog.error = None;
                }
            }
            Action::ModalBackspace => {
                if matches!(self.modals.top(), Some(Modal::ImportCsv)) {
                    self.import_dialog.path.pop();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Data
            // ─────────────────────────────────────────────────────────────────
            Action::ImportCustomers(path) => return Ok(self.import_customers(&path)),
            Action::Invalidate(kind) => {
                if let Some(page) = self.page_mut(kind) {
                    page.invalidate();
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // View
            // ─────────────────────────────────────────────────────────────────
            Action::ToggleTheme => self.toggle_theme(),

            // ─────────────────────────────────────────────────────────────────
            // Table and search (delegate to the active page)
            // ─────────────────────────────────────────────────────────────────
            Action::CursorDown
            | Action::CursorUp
            | Action::NextPage
            | Action::PrevPage
            | Action::FirstPage
            | Action::LastPage
            | Action::CyclePageSize
            | Action::CycleSort
            | Action::ToggleExpand
            | Action::OpenRow
            | Action::Refresh
            | Action::EnterSearchMode
            | Action::ExitSearchMode
            | Action::ClearSearch
            | Action::SearchInput(_)
            | Action::SearchBackspace => {
                let active = self.active;
                if let Some(page) = self.page_mut(active) {
                    return page.update(action);
                }
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let totals: Vec<Option<usize>> = self.pages.iter().map(|page| page.total_count()).collect();
        let home = HomeRenderContext {
            active: self.active,
            totals: &totals,
            error: self.error.as_deref(),
            status_message: self.status_message.as_deref(),
        };

        let active = self.active;
        if let Some(page) = self.pages.iter_mut().find(|page| page.kind() == active) {
            draw_home_screen(frame, area, page.as_mut(), &home, ctx)?;
        }

        // Bottom to top, so a help dialog opened over a record stays on top
        let modals: Vec<Modal> = self.modals.iter().cloned().collect();
        for modal in &modals {
            self.draw_modal(frame, area, modal, ctx)?;
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Helper Methods
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    fn handle_modal_key_event(&mut self, modal: &Modal, key: KeyEvent) -> Result<Option<Action>> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.handle_key_event(key),
            Modal::Help => self.help_dialog.handle_key_event(key),
            Modal::RecordDetail { .. } => self.record_detail.handle_key_event(key),
            Modal::ImportCsv => self.import_dialog.handle_key_event(key),
        }
    }

    fn draw_modal(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        modal: &Modal,
        ctx: &RenderContext,
    ) -> Result<()> {
        match modal {
            Modal::QuitConfirm => self.quit_dialog.draw(frame, area, ctx),
            Modal::Help => self.help_dialog.draw(frame, area, ctx),
            Modal::RecordDetail { .. } => self.record_detail.draw(frame, area, ctx),
            Modal::ImportCsv => self.import_dialog.draw(frame, area, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;
    use crate::services::FixtureApi;
    use crate::theme::ThemeName;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    fn app() -> App {
        let api: Arc<dyn BillingApi> =
            Arc::new(FixtureApi::new(Dataset::demo("acme"), Duration::ZERO));
        let mut app = App::new(Config::default(), api);
        app.config_path = None;
        app.init().unwrap();
        app
    }

    fn settle(app: &mut App, done: impl Fn(&App) -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            app.update(Action::Tick).unwrap();
            if done(app) {
                return;
            }
            std::thread::sleep(Duration::from_millis(2));
        }
        panic!("app did not settle");
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dispatch(app: &mut App, action: Action) {
        let mut next = Some(action);
        while let Some(action) = next {
            next = app.update(action).unwrap();
        }
    }

    fn customers_total(app: &App) -> Option<usize> {
        app.pages[EntityKind::Customers.index()].total_count()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("billing-tui-app-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_tab_switching_wraps() {
        let mut app = app();
        app.update(Action::NextTab).unwrap();
        assert_eq!(app.active, EntityKind::Invoices);

        app.update(Action::SelectTab(EntityKind::Customers)).unwrap();
        app.update(Action::PrevTab).unwrap();
        assert_eq!(app.active, EntityKind::CreditNotes);
    }

    #[test]
    fn test_global_keys() {
        let mut app = app();
        assert_eq!(
            app.handle_key_event(key(KeyCode::Char('3'))).unwrap(),
            Some(Action::SelectTab(EntityKind::Subscriptions))
        );
        assert_eq!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::OpenQuitDialog)
        );
        assert_eq!(
            app.handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL))
                .unwrap(),
            Some(Action::ForceQuit)
        );
        // Table keys fall through to the page
        assert_eq!(
            app.handle_key_event(key(KeyCode::Char('n'))).unwrap(),
            Some(Action::NextPage)
        );
    }

    #[test]
    fn test_modal_and_search_take_keys_first() {
        let mut app = app();
        app.update(Action::OpenHelp).unwrap();
        assert_eq!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::CloseModal)
        );
        app.update(Action::CloseModal).unwrap();

        app.update(Action::EnterSearchMode).unwrap();
        assert_eq!(
            app.handle_key_event(key(KeyCode::Char('q'))).unwrap(),
            Some(Action::SearchInput('q'))
        );
    }

    #[test]
    fn test_quit_confirmation() {
        let mut app = app();
        app.update(Action::OpenQuitDialog).unwrap();
        dispatch(&mut app, Action::ConfirmModal);
        assert!(app.should_quit);
    }

    #[test]
    fn test_navigate_to_record_opens_detail() {
        let mut app = app();
        app.update(Action::Navigate(Route::record("acme", EntityKind::Plans, "plan_free")))
            .unwrap();
        assert_eq!(app.active, EntityKind::Plans);
        assert_eq!(
            app.modals.top(),
            Some(&Modal::record_detail(EntityKind::Plans, "plan_free"))
        );

        app.update(Action::Navigate(Route::record("acme", EntityKind::Plans, "plan_growth")))
            .unwrap();
        assert_eq!(app.modals.iter().count(), 1);
    }

    #[test]
    fn test_navigate_other_tenant_is_an_error() {
        let mut app = app();
        app.update(Action::Navigate(Route::list("globex", EntityKind::Invoices)))
            .unwrap();
        assert_eq!(app.active, EntityKind::Customers);
        assert!(app.error.is_some());
        assert!(app.modals.is_empty());
    }

    #[test]
    fn test_scroll_goes_to_top_dialog() {
        let mut app = app();
        app.update(Action::OpenHelp).unwrap();
        app.update(Action::PageDown).unwrap();
        app.update(Action::ScrollUp).unwrap();
        assert_eq!(app.help_dialog.scroll_offset, SCROLL_PAGE - 1);
        assert_eq!(app.record_detail.scroll_offset, 0);
    }

    #[test]
    fn test_import_flow_adds_customers() {
        let mut app = app();
        settle(&mut app, |app| customers_total(app).is_some());
        let before = customers_total(&app).unwrap();

        let path = temp_path("import.csv");
        std::fs::write(
            &path,
            "name,email,currency\nVandelay,art@vandelay.test,usd\nKramerica,k@kramerica.test,USD\n",
        )
        .unwrap();

        app.update(Action::SelectTab(EntityKind::Plans)).unwrap();
        app.update(Action::OpenImport).unwrap();
        for c in path.to_string_lossy().chars() {
            app.update(Action::ModalInput(c)).unwrap();
        }
        dispatch(&mut app, Action::ConfirmModal);
        std::fs::remove_file(&path).ok();

        assert_eq!(app.status_message.as_deref(), Some("Imported 2 customers"));
        assert!(app.modals.is_empty());
        assert_eq!(app.active, EntityKind::Customers);

        settle(&mut app, |app| customers_total(app) == Some(before + 2));
    }

    #[test]
    fn test_import_error_keeps_dialog_open() {
        let mut app = app();
        app.update(Action::OpenImport).unwrap();
        dispatch(&mut app, Action::ConfirmModal);
        assert!(app.import_dialog.error.is_some());

        for c in "/no/such/file.csv".chars() {
            app.update(Action::ModalInput(c)).unwrap();
        }
        dispatch(&mut app, Action::ConfirmModal);

        assert!(app.import_dialog.error.is_some());
        assert_eq!(app.modals.top(), Some(&Modal::ImportCsv));
        assert!(app.status_message.is_none());
    }

    #[test]
    fn test_toggle_theme_saves_config() {
        let mut app = app();
        let path = temp_path("config.json");
        app.config_path = Some(path.clone());

        app.update(Action::ToggleTheme).unwrap();
        assert_eq!(app.context().theme.name, ThemeName::Light);

        let saved = Config::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(saved.theme, ThemeName::Light);
    }

    #[test]
    fn test_draw_home_screen() {
        let mut app = app();
        settle(&mut app, |app| app.pages.iter().all(|page| !page.is_loading()));

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let ctx = app.context();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area, &ctx).unwrap();
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("tenant: acme"));
        assert!(text.contains("1 Customers (52)"));
        assert!(text.contains("Page 1/3"));
    }

    #[test]
    fn test_header_shows_tenant_profile() {
        let mut app = app().with_profile(Dataset::demo("acme").tenant);
        let ctx = app.context();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                app.draw(frame, area, &ctx).unwrap();
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("tenant: Acme (acme) · USD"));
    }
}
