//! Help dialog component
//!
//! Lists every keyboard shortcut, grouped by where it applies.

use crate::action::Action;
use crate::component::{Component, RenderContext};
use crate::components::inset_popup;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

#[derive(Default)]
pub struct HelpDialog {
    pub scroll_offset: usize,
}

impl Component for HelpDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Some(Action::CloseModal),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let theme = &ctx.theme;
        let dialog_area = inset_popup(area, 4);
        frame.render_widget(Clear, dialog_area);

        let content = build_help_content(theme);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;

        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Keyboard Shortcuts ")
                    .title_style(theme.header())
                    .border_style(theme.key_hint(theme.accent)),
            )
            .scroll((self.scroll_offset as u16, 0));

        frame.render_widget(paragraph, dialog_area);

        if total > visible_height {
            let mut scrollbar_state = ScrollbarState::new(max_scroll).position(self.scroll_offset);

            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                dialog_area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Tabs",
        &[
            ("Tab", "Next tab"),
            ("Shift+Tab", "Previous tab"),
            ("1-5", "Customers, Invoices, Subscriptions, Plans, Credit notes"),
        ],
    ),
    (
        "Table",
        &[
            ("j / ↓", "Next row"),
            ("k / ↑", "Previous row"),
            ("n / →", "Next page"),
            ("p / ←", "Previous page"),
            ("g / G", "First / last page"),
            ("z", "Cycle page size (10, 20, 50, 100)"),
            ("s", "Cycle sort column and direction"),
            ("Space", "Expand or collapse the row (invoices, plans)"),
            ("Enter", "Open the row"),
            ("r", "Refresh the current page"),
        ],
    ),
    (
        "Search",
        &[
            ("/", "Search the current tab"),
            ("Enter", "Keep the search and leave the input"),
            ("Esc", "Clear the search"),
        ],
    ),
    (
        "Console",
        &[
            ("i", "Import customers from CSV"),
            ("t", "Toggle light/dark theme"),
            ("?", "Show this help"),
            ("q", "Quit / Close dialog"),
        ],
    ),
];

fn build_help_content(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (title, shortcuts) in SECTIONS {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} ", title),
            theme.key_hint(theme.warning),
        )));
        lines.push(Line::from(Span::styled(
            format!("  {}", "─".repeat(title.len() + 2)),
            theme.border(),
        )));
        for (key, description) in *shortcuts {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:12}", key), theme.key_hint(theme.accent)),
                Span::styled(description.to_string(), theme.tone(crate::table::Tone::Default)),
            ]));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press q, Esc, or ? to close",
        theme.tone(crate::table::Tone::Muted),
    )));

    lines
}
