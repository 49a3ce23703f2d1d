//! Table drawing
//!
//! Lays rendered rows out as padded, aligned lines with a fixed header,
//! a scrolling body and a one-line footer.

use super::column::{Align, ColumnWidth};
use super::model::TableView;
use super::row::RenderedRow;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const COLUMN_SEPARATOR: &str = " │ ";
const GUTTER_WIDTH: usize = 2;
const SUB_ROW_INDENT: usize = 4;
const SKELETON_MAX: usize = 12;

/// Everything `draw_table` needs for one frame
pub struct TableFrame<'a> {
    pub title: &'a str,
    pub view: &'a TableView,
    pub rows: &'a [RenderedRow],
    /// Index into `rows`
    pub cursor: Option<usize>,
    pub expandable: bool,
    pub footer: Line<'static>,
}

/// Truncate or pad `text` to exactly `width` display columns
pub fn fit(text: &str, width: usize, align: Align) -> String {
    let text_width = text.width();
    let body = if text_width > width {
        if width == 0 {
            return String::new();
        }
        let mut out = String::new();
        let mut used = 0;
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width - 1 {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        out
    } else {
        text.to_string()
    };

    let pad = width.saturating_sub(body.width());
    match align {
        Align::Left => format!("{}{}", body, " ".repeat(pad)),
        Align::Right => format!("{}{}", " ".repeat(pad), body),
    }
}

/// Display width of each column for the current rows
pub fn column_widths(view: &TableView, rows: &[RenderedRow]) -> Vec<usize> {
    view.headers
        .iter()
        .enumerate()
        .map(|(i, header)| match header.class.width {
            ColumnWidth::Fixed(width) => width,
            ColumnWidth::Auto { max } => {
                // Room for the sort indicator
                let header_width = header.content.text.width() + if header.sortable { 2 } else { 0 };
                let widest_cell = rows
                    .iter()
                    .filter_map(|row| match row {
                        RenderedRow::Main { row, .. } => row.cells.get(i).map(|c| c.text.width()),
                        _ => None,
                    })
                    .max()
                    .unwrap_or(0);
                header_width.max(widest_cell).clamp(1, max.max(1))
            }
        })
        .collect()
}

/// Total width of a line with the given column widths
pub fn row_width(widths: &[usize]) -> usize {
    GUTTER_WIDTH
        + widths.iter().sum::<usize>()
        + COLUMN_SEPARATOR.width() * widths.len().saturating_sub(1)
}

/// Header line followed by a rule
pub fn header_lines(view: &TableView, widths: &[usize], theme: &Theme) -> Vec<Line<'static>> {
    let mut spans = vec![Span::raw(" ".repeat(GUTTER_WIDTH))];
    for (i, (header, width)) in view.headers.iter().zip(widths).enumerate() {
        if i > 0 {
            spans.push(Span::styled(COLUMN_SEPARATOR, theme.border()));
        }
        let text = match header.sorted {
            Some(direction) => format!("{} {}", header.content.text, direction.indicator()),
            None => header.content.text.clone(),
        };
        let style = if header.content.tone == crate::table::Tone::Accent {
            theme.header()
        } else {
            theme.tone(header.content.tone)
        };
        spans.push(Span::styled(fit(&text, *width, header.class.align), style));
    }

    let rule = widths
        .iter()
        .map(|w| "─".repeat(*w))
        .collect::<Vec<_>>()
        .join("─┼─");

    vec![
        Line::from(spans),
        Line::from(Span::styled(
            format!("{}{}", "─".repeat(GUTTER_WIDTH), rule),
            theme.border(),
        )),
    ]
}

/// Body lines and the line index where the cursor row starts
pub fn body_lines(
    table: &TableFrame,
    widths: &[usize],
    full_width: usize,
    theme: &Theme,
) -> (Vec<Line<'static>>, Option<usize>) {
    let mut lines = Vec::new();
    let mut cursor_line = None;

    for (index, row) in table.rows.iter().enumerate() {
        let is_cursor = table.cursor == Some(index);
        if is_cursor {
            cursor_line = Some(lines.len());
        }

        match row {
            RenderedRow::Main { row, expanded, .. } => {
                let gutter = match (is_cursor, table.expandable, expanded) {
                    (_, true, true) => "▾ ",
                    (_, true, false) => "▸ ",
                    (true, false, _) => "▶ ",
                    (false, false, _) => "  ",
                };
                let mut spans = vec![Span::styled(gutter, theme.tone(crate::table::Tone::Accent))];
                for (i, (cell, header)) in row.cells.iter().zip(&table.view.headers).enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(COLUMN_SEPARATOR, theme.border()));
                    }
                    let width = widths.get(i).copied().unwrap_or(10);
                    spans.push(Span::styled(
                        fit(&cell.text, width, header.class.align),
                        theme.tone(cell.tone),
                    ));
                }
                let mut line = Line::from(spans);
                if is_cursor {
                    line = line.style(theme.highlight());
                }
                lines.push(line);
            }
            RenderedRow::Sub { lines: sub_lines, .. } => {
                let indent = " ".repeat(SUB_ROW_INDENT);
                let inner = full_width.saturating_sub(SUB_ROW_INDENT);
                for cell in sub_lines {
                    lines.push(Line::from(vec![
                        Span::raw(indent.clone()),
                        Span::styled(fit(&cell.text, inner, Align::Left), theme.tone(cell.tone)),
                    ]));
                }
            }
            RenderedRow::Skeleton(skeleton) => {
                let mut spans = vec![Span::raw(" ".repeat(GUTTER_WIDTH))];
                for (i, slot) in skeleton.cells.iter().enumerate() {
                    if i > 0 {
                        spans.push(Span::styled(COLUMN_SEPARATOR, theme.border()));
                    }
                    let width = widths.get(i).copied().unwrap_or(1);
                    let text = match slot {
                        Some(_) => "░".repeat(width.min(SKELETON_MAX)),
                        None => String::new(),
                    };
                    spans.push(Span::styled(
                        fit(&text, width, Align::Left),
                        Style::default().fg(theme.skeleton),
                    ));
                }
                lines.push(Line::from(spans));
            }
            RenderedRow::Empty { message, .. } => {
                let pad = full_width.saturating_sub(message.width()) / 2;
                lines.push(Line::from(Span::styled(
                    format!("{}{}", " ".repeat(pad), message),
                    theme.tone(crate::table::Tone::Muted),
                )));
            }
        }
    }

    (lines, cursor_line)
}

/// Scroll offset that keeps `cursor_line` inside a window of `height` lines
pub fn ensure_visible(scroll: usize, cursor_line: Option<usize>, height: usize, total: usize) -> usize {
    let max_scroll = total.saturating_sub(height);
    let scroll = match cursor_line {
        Some(line) if height > 0 && line < scroll => line,
        Some(line) if height > 0 && line >= scroll + height => line + 1 - height,
        _ => scroll,
    };
    scroll.min(max_scroll)
}

/// Draw a table with header, scrolling body and footer into `area`
///
/// `scroll` is the body scroll offset kept by the caller between frames.
pub fn draw_table(
    frame: &mut Frame,
    area: Rect,
    table: &TableFrame,
    scroll: &mut usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", table.title))
        .title_style(theme.header())
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let widths = column_widths(table.view, table.rows);
    let full_width = row_width(&widths).max(inner.width as usize);

    frame.render_widget(Paragraph::new(header_lines(table.view, &widths, theme)), chunks[0]);

    let (lines, cursor_line) = body_lines(table, &widths, full_width, theme);
    let visible_height = chunks[1].height as usize;
    let total = lines.len();
    *scroll = ensure_visible(*scroll, cursor_line, visible_height, total);

    frame.render_widget(
        Paragraph::new(lines).scroll((*scroll as u16, 0)),
        chunks[1],
    );

    if total > visible_height {
        let mut scrollbar_state =
            ScrollbarState::new(total.saturating_sub(visible_height)).position(*scroll);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓")),
            chunks[1],
            &mut scrollbar_state,
        );
    }

    frame.render_widget(Paragraph::new(table.footer.clone()), chunks[2]);
}
