//! Record detail dialog
//!
//! Fetches one record by id and shows it as indented key/value lines.

use crate::action::Action;
use crate::component::{Component, RenderContext};
use crate::components::inset_popup;
use crate::model::EntityKind;
use crate::services::{BillingApi, QueryRunner};
use crate::table::Tone;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use serde_json::Value;
use std::sync::Arc;

pub struct RecordDetailDialog {
    query: QueryRunner<Value>,
    record: Option<(EntityKind, String)>,
    pub scroll_offset: usize,
}

impl Default for RecordDetailDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordDetailDialog {
    pub fn new() -> Self {
        Self {
            query: QueryRunner::new("record"),
            record: None,
            scroll_offset: 0,
        }
    }

    /// Start fetching a record, dropping whatever was shown before
    pub fn open(&mut self, api: Arc<dyn BillingApi>, kind: EntityKind, id: &str) {
        self.query.reset();
        self.scroll_offset = 0;
        self.record = Some((kind, id.to_string()));

        let id = id.to_string();
        self.query.fetch(move || api.get_record(kind, &id));
    }

    pub fn poll(&mut self) -> bool {
        self.query.poll()
    }

    fn content(&self, theme: &Theme) -> Vec<Line<'static>> {
        let state = self.query.state();
        if let Some(err) = &state.error {
            return vec![Line::from(Span::styled(
                format!("  {}", err),
                theme.tone(Tone::Negative),
            ))];
        }
        match &state.data {
            Some(value) => {
                let mut lines = Vec::new();
                value_lines(value, 1, theme, &mut lines);
                lines
            }
            None => vec![Line::from(Span::styled("  Loading…", theme.tone(Tone::Muted)))],
        }
    }
}

fn scalar(value: &Value) -> (String, Tone) {
    match value {
        Value::Null => ("—".to_string(), Tone::Muted),
        Value::Bool(b) => (b.to_string(), Tone::Accent),
        Value::Number(n) => (n.to_string(), Tone::Accent),
        Value::String(s) => (s.clone(), Tone::Default),
        Value::Array(items) if items.is_empty() => ("[]".to_string(), Tone::Muted),
        Value::Object(map) if map.is_empty() => ("{}".to_string(), Tone::Muted),
        _ => (String::new(), Tone::Default),
    }
}

fn is_nested(value: &Value) -> bool {
    match value {
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}

/// Flatten JSON into display lines, nested values indented under their key
pub fn value_lines(value: &Value, depth: usize, theme: &Theme, lines: &mut Vec<Line<'static>>) {
    let indent = "  ".repeat(depth);
    let entry = |label: String, child: &Value, lines: &mut Vec<Line<'static>>| {
        if is_nested(child) {
            lines.push(Line::from(Span::styled(
                format!("{}{}:", indent, label),
                theme.key_hint(theme.accent),
            )));
            value_lines(child, depth + 1, theme, lines);
        } else {
            let (text, tone) = scalar(child);
            lines.push(Line::from(vec![
                Span::styled(format!("{}{}: ", indent, label), theme.key_hint(theme.accent)),
                Span::styled(text, theme.tone(tone)),
            ]));
        }
    };

    match value {
        Value::Object(map) => {
            for (key, child) in map {
                entry(key.clone(), child, lines);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                entry(format!("[{}]", i), child, lines);
            }
        }
        other => {
            let (text, tone) = scalar(other);
            lines.push(Line::from(Span::styled(
                format!("{}{}", indent, text),
                theme.tone(tone),
            )));
        }
    }
}

impl Component for RecordDetailDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Action::CloseModal),
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
        let dialog_area = inset_popup(area, 3);
        frame.render_widget(Clear, dialog_area);

        let title = match &self.record {
            Some((kind, id)) => format!(" /{}/{}/{} ", ctx.tenant, kind.slug(), id),
            None => " Record ".to_string(),
        };

        let content = self.content(theme);
        let total = content.len();
        let visible_height = dialog_area.height.saturating_sub(2) as usize;
        let max_scroll = total.saturating_sub(visible_height);
        self.scroll_offset = self.scroll_offset.min(max_scroll);

        let paragraph = Paragraph::new(content)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_style(theme.header())
                    .title_bottom(Line::from(" j/k scroll · Esc close ").right_aligned())
                    .border_style(theme.border()),
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
