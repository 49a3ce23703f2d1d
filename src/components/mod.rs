//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod help_dialog;
pub mod home;
pub mod import_dialog;
pub mod layout;
pub mod quit_dialog;
pub mod record_detail;

pub use help_dialog::HelpDialog;
pub use home::{draw_home_screen, HomeRenderContext};
pub use import_dialog::ImportDialog;
pub use layout::{calculate_main_layout, centered_popup, inset_popup};
pub use quit_dialog::QuitDialog;
pub use record_detail::RecordDetailDialog;
