mod audio;
mod controller;
mod logging;
mod model;
mod view;

#[cfg(test)]
mod test_support;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use view::AppView;
use audio::RodioEngine;
use controller::AppController;
use model::{AppModel, CatalogClient};

/// How often the render loop checks whether the preview has played out
const FINISHED_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== preview-rs starting ===");

    // The stream has to outlive every sink, so it stays on this stack frame
    let (_output_stream, output_handle) = match RodioEngine::default_output() {
        Ok((stream, handle)) => (Some(stream), Some(handle)),
        Err(e) => {
            tracing::warn!(error = %e, "No audio output, previews will not play");
            (None, None)
        }
    };

    let model = Arc::new(AppModel::new());
    let controller = AppController::new(
        model.clone(),
        RodioEngine::new(output_handle),
        CatalogClient::new(),
    );

    // Initial load, the fetch key runs the same operation later
    controller.spawn_fetch();

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller.clone()).await;

    controller.stop_playback().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("preview-rs shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    let mut last_finished_check = Instant::now();

    loop {
        if last_finished_check.elapsed() >= FINISHED_POLL_INTERVAL {
            last_finished_check = Instant::now();
            controller.release_finished_preview().await;
        }

        model.auto_clear_old_status().await;

        let search = model.get_search_state().await;
        let ui_state = model.get_ui_state().await;
        let playback = model.get_playback_status().await;
        let should_quit = model.should_quit().await;

        terminal.draw(|f| {
            AppView::render(f, &search, &ui_state, &playback);
        })?;

        if should_quit {
            break;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                controller.handle_key_event(key).await;
            }
        }
    }

    Ok(())
}
