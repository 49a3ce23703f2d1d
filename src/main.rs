//! billing-tui - A terminal console for a subscription billing platform
//!
//! This is the main entry point for the billing-tui application.
//! It uses the Component Architecture pattern from ratatui.
//!
//! An optional argument opens a route on start, e.g.
//! `billing-tui /acme/invoices/inv_00001`.

mod action;
mod app;
mod component;
mod components;
mod config;
mod logging;
mod model;
mod pages;
mod route;
mod services;
mod table;
mod theme;
mod tui;

use crate::action::Action;
use crate::app::App;
use crate::component::Component;
use crate::config::Config;
use crate::model::Dataset;
use crate::route::Route;
use crate::services::{BillingApi, FixtureApi};
use crate::tui::{TerminalEvent, Tui};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

fn main() -> Result<()> {
    let config = Config::load_or_default();
    match logging::init_logging(&config) {
        Ok(path) => info!(log = %path.display(), tenant = %config.tenant_slug, "starting billing-tui"),
        Err(err) => eprintln!("Logging disabled: {:#}", err),
    }

    let start_route = std::env::args()
        .nth(1)
        .map(|arg| Route::parse(&arg).with_context(|| format!("Invalid route '{}'", arg)))
        .transpose()?;

    let dataset = match &config.data_file {
        Some(path) => Dataset::load(path)?,
        None => Dataset::demo(&config.tenant_slug),
    };
    let profile = dataset.tenant.clone();
    let api: Arc<dyn BillingApi> = Arc::new(FixtureApi::new(
        dataset,
        Duration::from_millis(config.latency_ms),
    ));

    // Create app state
    let mut app = App::new(config, api).with_profile(profile);
    app.init()?;
    if let Some(route) = start_route {
        app.update(Action::Navigate(route))?;
    }

    // Setup terminal
    let mut tui = Tui::new()?;
    tui.enter()?;

    // Main event loop
    let result = run_app(&mut tui, &mut app);

    // Cleanup terminal
    tui.exit()?;

    if let Err(err) = result {
        error!(error = %err, "exited with error");
        eprintln!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("exited cleanly");
    Ok(())
}

/// Run the main application loop
fn run_app(tui: &mut Tui, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let ctx = app.context();
        let mut draw_result = Ok(());
        tui.draw(|frame| {
            let area = frame.area();
            draw_result = app.draw(frame, area, &ctx);
        })?;
        draw_result?;

        let mut action = match tui.next_event()? {
            Some(TerminalEvent::Key(key)) => app.handle_key_event(key)?,
            Some(TerminalEvent::Resize(w, h)) => Some(Action::Resize(w, h)),
            // Drains finished fetches
            Some(TerminalEvent::Tick) => Some(Action::Tick),
            None => None,
        };

        // Action might produce a follow-up action
        while let Some(a) = action {
            action = app.update(a)?;
        }
    }

    Ok(())
}
