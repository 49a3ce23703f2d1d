//! Home screen chrome around the active page
//!
//! Header, tab strip, status line and help bar. The page itself draws the
//! table between them.

use crate::component::RenderContext;
use crate::components::calculate_main_layout;
use crate::model::EntityKind;
use crate::pages::FeaturePage;
use crate::route::Route;
use crate::table::Tone;
use crate::theme::Theme;
use anyhow::Result;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// App state the chrome needs besides the page
pub struct HomeRenderContext<'a> {
    pub active: EntityKind,
    /// Total per tab once its first page has loaded
    pub totals: &'a [Option<usize>],
    pub error: Option<&'a str>,
    pub status_message: Option<&'a str>,
}

pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    page: &mut dyn FeaturePage,
    home: &HomeRenderContext,
    ctx: &RenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    render_header(frame, layout.header, home, ctx);
    render_tabs(frame, layout.tabs, home, &ctx.theme);
    page.draw(frame, layout.page, ctx)?;
    render_status_bar(frame, layout.status, page, home, &ctx.theme);
    render_help_bar(frame, layout.help, page, &ctx.theme);

    Ok(())
}

fn render_header(frame: &mut Frame, area: Rect, home: &HomeRenderContext, ctx: &RenderContext) {
    let theme = &ctx.theme;
    let route = Route::list(&ctx.tenant, home.active);
    let tenant = match &ctx.profile {
        Some(profile) => format!("{} ({}) · {}", profile.name, ctx.tenant, profile.currency),
        None => ctx.tenant.clone(),
    };
    let line = Line::from(vec![
        Span::styled(
            " billing ",
            Style::default()
                .fg(theme.highlight_fg)
                .bg(theme.highlight_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(format!("tenant: {}", tenant), theme.tone(Tone::Accent)),
        Span::styled(format!("  {}", route), theme.tone(Tone::Default)),
        Span::styled(format!("  theme: {}", theme.name.as_str()), theme.tone(Tone::Muted)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Tab titles with the loaded total, e.g. "2 Invoices (140)"
pub fn tab_titles(totals: &[Option<usize>]) -> Vec<String> {
    EntityKind::all()
        .iter()
        .enumerate()
        .map(|(i, kind)| match totals.get(i).copied().flatten() {
            Some(total) => format!("{} {} ({})", i + 1, kind.title(), total),
            None => format!("{} {}", i + 1, kind.title()),
        })
        .collect()
}

fn render_tabs(frame: &mut Frame, area: Rect, home: &HomeRenderContext, theme: &Theme) {
    let tabs = Tabs::new(tab_titles(home.totals))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(theme.border()),
        )
        .select(home.active.index())
        .style(theme.tone(Tone::Muted))
        .highlight_style(theme.header());

    frame.render_widget(tabs, area);
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    page: &dyn FeaturePage,
    home: &HomeRenderContext,
    theme: &Theme,
) {
    let mut spans = vec![Span::styled(
        format!(" {} ", page.title()),
        Style::default()
            .fg(theme.highlight_fg)
            .bg(theme.accent)
            .add_modifier(Modifier::BOLD),
    )];

    if page.is_loading() {
        spans.push(Span::styled(" loading… ", theme.tone(Tone::Warning)));
    }
    if !page.search().is_empty() {
        spans.push(Span::styled(
            format!(" search: {} ", page.search()),
            theme.tone(Tone::Accent),
        ));
    }

    if let Some(error) = home.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            theme.tone(Tone::Negative),
        ));
    } else if let Some(status) = home.status_message {
        spans.push(Span::styled(format!(" {} ", status), theme.tone(Tone::Positive)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, page: &dyn FeaturePage, theme: &Theme) {
    let hint = |key: &str, label: &str, color| {
        [
            Span::styled(format!(" {} ", key), theme.key_hint(color)),
            Span::raw(format!("{} ", label)),
        ]
    };

    let spans: Vec<Span> = if page.is_searching() {
        [
            hint("Esc", "Clear", theme.warning),
            hint("Enter", "Keep", theme.positive),
        ]
        .concat()
    } else {
        [
            hint("q", "Quit", theme.warning),
            hint("n/p", "Page", theme.accent),
            hint("z", "Size", theme.accent),
            hint("s", "Sort", theme.accent),
            hint("Space", "Expand", theme.accent),
            hint("Enter", "Open", theme.positive),
            hint("/", "Search", theme.accent),
            hint("i", "Import", theme.positive),
            hint("t", "Theme", theme.text),
            hint("?", "Help", theme.text),
        ]
        .concat()
    };

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Left),
        area,
    );
}
