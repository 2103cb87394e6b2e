use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "taskdeck")]
#[command(about = "Terminal client for the task manager API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run against the configured task API (default)
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Sign in from the command line and save the session
    Login,
    /// Create an account from the command line and save the session
    Register,
    /// Remove the saved session
    Logout,
    /// Print config path and create default file if missing
    ConfigPath,
}
