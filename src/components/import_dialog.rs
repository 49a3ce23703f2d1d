//! CSV import dialog
//!
//! A single path input. Confirming hands the path to the app, which reads
//! the file and reports back through `error` if it fails.

use crate::action::Action;
use crate::component::{Component, RenderContext};
use crate::components::centered_popup;
use crate::table::Tone;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Default)]
pub struct ImportDialog {
    pub path: String,
    pub error: Option<String>,
}

impl ImportDialog {
    pub fn reset(&mut self) {
        self.path.clear();
        self.error = None;
    }
}

impl Component for ImportDialog {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Esc => Some(Action::CloseModal),
            KeyCode::Enter => Some(Action::ConfirmModal),
            KeyCode::Backspace => Some(Action::ModalBackspace),
            KeyCode::Char(c) => Some(Action::ModalInput(c)),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, ctx: &RenderContext) -> Result<()> {
        let theme = &ctx.theme;
        let popup_area = centered_popup(area, 70, 10);
        frame.render_widget(Clear, popup_area);

        let mut content = vec![
            Line::from(Span::styled(
                "CSV with columns name, email, currency (alias, balance_cents optional)",
                theme.tone(Tone::Muted),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Path: ", theme.key_hint(theme.accent)),
                Span::styled(self.path.clone(), theme.tone(Tone::Default)),
                Span::styled("▏", theme.tone(Tone::Accent)),
            ]),
            Line::from(""),
        ];
        if let Some(error) = &self.error {
            content.push(Line::from(Span::styled(error.clone(), theme.tone(Tone::Negative))));
        }
        content.push(Line::from(vec![
            Span::styled(" Enter ", theme.key_hint(theme.positive)),
            Span::raw("Import  "),
            Span::styled(" Esc ", theme.key_hint(theme.warning)),
            Span::raw("Cancel"),
        ]));

        let paragraph = Paragraph::new(content)
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Import customers ")
                    .title_style(theme.header())
                    .border_style(theme.key_hint(theme.accent)),
            );
        frame.render_widget(paragraph, popup_area);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;
    use crossterm::event::KeyModifiers;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_keys() {
        let mut dialog = ImportDialog::default();
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        assert_eq!(dialog.handle_key_event(key(KeyCode::Char('a'))).unwrap(), Some(Action::ModalInput('a')));
        assert_eq!(dialog.handle_key_event(key(KeyCode::Enter)).unwrap(), Some(Action::ConfirmModal));
        assert_eq!(dialog.handle_key_event(key(KeyCode::Esc)).unwrap(), Some(Action::CloseModal));
    }

    #[test]
    fn test_draw_shows_path_and_error() {
        let mut dialog = ImportDialog {
            path: "customers.csv".to_string(),
            error: Some("line 3: missing required field `email`".to_string()),
        };
        let ctx = RenderContext::new(Theme::light(), "acme");
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                dialog.draw(frame, area, &ctx).unwrap();
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(screen.contains("Import customers"));
        assert!(screen.contains("customers.csv"));
        assert!(screen.contains("missing required field"));
    }
}
