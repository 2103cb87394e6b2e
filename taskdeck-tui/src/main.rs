mod api;
mod app;
mod bootstrap;
mod cli;
mod config;
mod logging;
mod login;
mod runtime;
mod session;
mod session_store;
mod store;
mod time_utils;
mod types;
mod ui;

use anyhow::{Context, Result};
use app::{App, AuthMode};
use clap::Parser;
use cli::{Cli, Commands};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use session::Session;
use session_store::SessionStore;
use std::io;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::TaskdeckConfig::load()?;
    logging::init_logging(&config::TaskdeckConfig::log_path()?, &config.log_filter)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let session = Session::persistent(SessionStore::default_location()?)?;
            let mut client = api::ApiClient::new(&config.api_url, session)?;
            tracing::info!(api_url = %config.api_url, "starting");
            let mut app = App::new();
            bootstrap::initialize_app_state(&mut app, &mut client).await;
            run_ui(app, client).await
        }
        Commands::Dev => {
            let mut client = api::ApiClient::dev(Session::default(), api::DevBackend::new())?;
            tracing::info!("starting in dev mode");
            let mut app = App::new();
            bootstrap::initialize_app_state(&mut app, &mut client).await;
            app.set_status(format!(
                "Dev mode: sign in with {} / {}",
                api::DEV_EMAIL,
                api::DEV_PASSWORD
            ));
            run_ui(app, client).await
        }
        Commands::Login => run_cli_auth(&config, AuthMode::SignIn).await,
        Commands::Register => run_cli_auth(&config, AuthMode::SignUp).await,
        Commands::Logout => {
            let store = SessionStore::default_location()?;
            let path = store.path().display().to_string();
            let mut session = Session::persistent(store)?;
            session.clear().context("Failed to remove saved session")?;
            println!("Logged out. Removed {}", path);
            Ok(())
        }
        Commands::ConfigPath => {
            let path = config::TaskdeckConfig::config_path()?;
            config::TaskdeckConfig::ensure_exists(&path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}

async fn run_cli_auth(config: &config::TaskdeckConfig, mode: AuthMode) -> Result<()> {
    let session = Session::persistent(SessionStore::default_location()?)?;
    let mut client = api::ApiClient::new(&config.api_url, session)?;
    login::run_login(&mut client, mode).await
}

async fn run_ui(mut app: App, mut client: api::ApiClient) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = runtime::run_app(&mut terminal, &mut app, &mut client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "event loop failed");
        eprintln!("Error: {:?}", err);
    }

    println!("\nGoodbye!");

    res
}
