//! Terminal lifecycle
//!
//! Raw mode, the alternate screen and event polling around ratatui's
//! Terminal. A poll timeout is reported as a tick, which the app uses to
//! drain background fetches.

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

const TICK_RATE: Duration = Duration::from_millis(50);

/// Terminal input the main loop reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Nothing arrived within the tick rate
    Tick,
}

impl TerminalEvent {
    /// Key presses and resizes only. Releases and repeats (reported on
    /// Windows), focus and paste events are dropped.
    fn from_crossterm(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Some(TerminalEvent::Key(key)),
            Event::Resize(width, height) => Some(TerminalEvent::Resize(width, height)),
            _ => None,
        }
    }
}

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self { terminal })
    }

    /// Mouse capture stays off so the terminal keeps its own selection
    /// and scrollback.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    /// Restore the terminal, also run on drop
    pub fn exit(&mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        crossterm::execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)?;
        Ok(())
    }

    /// Wait up to one tick. `None` means an event arrived that the app
    /// does not handle.
    pub fn next_event(&self) -> Result<Option<TerminalEvent>> {
        if !event::poll(TICK_RATE)? {
            return Ok(Some(TerminalEvent::Tick));
        }
        Ok(TerminalEvent::from_crossterm(event::read()?))
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}
