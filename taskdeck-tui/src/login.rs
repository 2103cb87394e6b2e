use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::api::ApiClient;
use crate::app::AuthMode;
use crate::types::Credentials;

/// Command-line counterpart of the sign-in view:
/// 1. Prompt for the email on stdin and the password without echo
/// 2. Call /auth/login or /auth/register
/// 3. Persist the returned token through the client's session
pub async fn run_login(client: &mut ApiClient, mode: AuthMode) -> Result<()> {
    let email = prompt_line("Email: ")?;
    let password = rpassword::prompt_password("Password: ").context("Failed to read password")?;
    let credentials = Credentials::new(email.trim(), password);
    if credentials.email.is_empty() || credentials.password.is_empty() {
        anyhow::bail!("Email and password are required");
    }

    let token = match mode {
        AuthMode::SignIn => client.login(&credentials).await,
        AuthMode::SignUp => client.register(&credentials).await,
    }
    .context("Authentication failed")?;

    client.session_mut().establish(token)?;
    match mode {
        AuthMode::SignIn => println!("Login successful. Session saved."),
        AuthMode::SignUp => println!("Account created. Session saved."),
    }
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from stdin")?;
    Ok(line.trim_end().to_string())
}
