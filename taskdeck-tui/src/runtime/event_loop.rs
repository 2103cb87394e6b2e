use crate::api::ApiClient;
use crate::app::App;
use crate::session;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::handle_view_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &mut ApiClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();

    loop {
        // The guard is re-evaluated every frame, so a cleared credential
        // shows the sign-in view on the very next render.
        app.apply_guard(session::guard(client.session()));
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_busy() {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_view_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            // Draw once with the spinner running before awaiting the request.
            app.is_loading = true;
            terminal.draw(|f| ui::render(f, app))?;
            run_action(action, app, client).await;
            app.is_loading = false;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
