//! Actions emitted by components and applied in `update`

use crate::model::EntityKind;
use crate::route::Route;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick, drains finished fetches
    Tick,
    Resize(u16, u16),
    /// Quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────────
    NextTab,
    PrevTab,
    SelectTab(EntityKind),
    /// Follow an entity route (list or record)
    Navigate(Route),

    // ─────────────────────────────────────────────────────────────────────────
    // Table
    // ─────────────────────────────────────────────────────────────────────────
    CursorDown,
    CursorUp,
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    CyclePageSize,
    CycleSort,
    ToggleExpand,
    /// Follow the link of the row under the cursor
    OpenRow,
    /// Re-issue the current query
    Refresh,

    // ─────────────────────────────────────────────────────────────────────────
    // Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    OpenQuitDialog,
    OpenHelp,
    OpenImport,
    CloseModal,
    ConfirmModal,
    /// Text typed into the top modal's input
    ModalInput(char),
    ModalBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Search
    // ─────────────────────────────────────────────────────────────────────────
    EnterSearchMode,
    /// Leave search mode, keeping the query
    ExitSearchMode,
    /// Leave search mode and drop the query
    ClearSearch,
    SearchInput(char),
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Data
    // ─────────────────────────────────────────────────────────────────────────
    /// Import customers from a CSV file
    ImportCustomers(String),
    /// Cached pages of this kind are stale
    Invalidate(EntityKind),

    // ─────────────────────────────────────────────────────────────────────────
    // View
    // ─────────────────────────────────────────────────────────────────────────
    ToggleTheme,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextTab => write!(f, "NextTab"),
            Action::PrevTab => write!(f, "PrevTab"),
            Action::SelectTab(kind) => write!(f, "SelectTab({})", kind),
            Action::Navigate(route) => write!(f, "Navigate({})", route),
            Action::CursorDown => write!(f, "CursorDown"),
            Action::CursorUp => write!(f, "CursorUp"),
            Action::NextPage => write!(f, "NextPage"),
            Action::PrevPage => write!(f, "PrevPage"),
            Action::FirstPage => write!(f, "FirstPage"),
            Action::LastPage => write!(f, "LastPage"),
            Action::CyclePageSize => write!(f, "CyclePageSize"),
            Action::CycleSort => write!(f, "CycleSort"),
            Action::ToggleExpand => write!(f, "ToggleExpand"),
            Action::OpenRow => write!(f, "OpenRow"),
            Action::Refresh => write!(f, "Refresh"),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::OpenImport => write!(f, "OpenImport"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::ConfirmModal => write!(f, "ConfirmModal"),
            Action::ModalInput(c) => write!(f, "ModalInput('{}')", c),
            Action::ModalBackspace => write!(f, "ModalBackspace"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::ClearSearch => write!(f, "ClearSearch"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ImportCustomers(path) => write!(f, "ImportCustomers({})", path),
            Action::Invalidate(kind) => write!(f, "Invalidate({})", kind),
            Action::ToggleTheme => write!(f, "ToggleTheme"),
        }
    }
}
