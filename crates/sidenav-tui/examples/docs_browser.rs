//! Browse a sample documentation nav tree. Move with j/k, navigate with
//! Enter and watch the sidebar keep the active link in view.

use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, watch};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sidenav_core::{
    AppConfig, FixedPreference, NavLink, NavNode, NavSection, NavTree, Readiness, ScrollerService,
};
use sidenav_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    widgets::SidebarWidget,
};

fn sample_tree() -> NavTree {
    let section = |title: &str, links: &[&str]| {
        NavNode::Section(NavSection::new(title).with_children(
            links.iter().map(|l| NavNode::Link(NavLink::new(*l))).collect(),
        ))
    };

    NavTree::new(vec![NavNode::Section(
        NavSection::new("Documentation").scrollable(20).with_children(vec![
            NavNode::Link(NavLink::new("Home").activated()),
            section("Getting Started", &["Installation", "Quick Start", "Configuration"]),
            section(
                "User Guide",
                &[
                    "Feeds", "Articles", "Keybindings", "Themes", "Search", "History",
                    "Profiles", "Filtering", "Summaries", "Images", "Export", "Import",
                ],
            ),
            section("Reference", &["CLI", "Config File", "IPC Protocol", "Troubleshooting"]),
            NavNode::Link(NavLink::new("Changelog")),
            NavNode::Link(NavLink::new("License")),
        ]),
    )])
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't tear the alternate screen
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let config = AppConfig::load()?;

    let (nav_tx, nav_rx) = mpsc::unbounded_channel();
    let (ready_tx, ready_rx) = watch::channel(Readiness::Loading);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let mut app = App::new(sample_tree()).with_nav_sender(nav_tx);
    let service = ScrollerService::new(app.tree(), config.scroll.clone(), &FixedPreference(false));
    let service_handle = tokio::spawn(service.run(ready_rx, Some(nav_rx), shutdown_rx));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(config.ui.tick_rate_ms);
    app.resize(terminal.size()?.height.saturating_sub(2));

    let mut first_draw = true;
    while !app.should_quit {
        terminal.draw(|frame| SidebarWidget::render(frame, frame.area(), &app))?;
        if first_draw {
            // First layout is on screen: the document is ready
            let _ = ready_tx.send(Readiness::Ready);
            first_draw = false;
        }

        if let Some(event) = events.next()? {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key)),
                AppEvent::Resize(_, height) => app.resize(height.saturating_sub(2)),
                AppEvent::Tick => {}
            }
        }
    }

    let _ = shutdown_tx.send(true);
    service_handle.await?;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
