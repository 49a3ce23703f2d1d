//! Component trait - interface for UI components
//!
//! Components keep their own state and talk to each other through
//! Actions rather than direct state mutation.

use crate::action::Action;
use crate::model::Tenant;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// UI state shared by every component while drawing
///
/// Passed down explicitly from the root instead of living in globals.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub theme: Theme,
    /// Slug used in routes
    pub tenant: String,
    /// Display name and currency from the dataset, if it carries them
    pub profile: Option<Tenant>,
}

impl RenderContext {
    pub fn new(theme: Theme, tenant: impl Into<String>) -> Self {
        Self {
            theme,
            tenant: tenant.into(),
            profile: None,
        }
    }

    pub fn with_profile(mut self, profile: Option<Tenant>) -> Self {
        self.profile = profile;
        self
    }
}

/// Trait for UI components
///
/// 1. `handle_key_event` - convert key events to Actions
/// 2. `update` - process Actions and update state
/// 3. `draw` - render the component
pub trait Component {
    /// Called once after construction
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Map a key event to an Action without touching state
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let _ = key;
        Ok(None)
    }

    /// Apply an Action, optionally returning a follow-up
    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        let _ = action;
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()>;
}
