use crate::api::ApiClient;
use crate::auth::Auth;
use crate::command::common_flags::CommonFlags;
use crate::render::print_json;
use eyre::Context;
use rollout_core::error::{ApiError, CommandError};

const MIN_TOKEN_LEN: usize = 3;

#[derive(clap::Args, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    action: AuthAction,
}

#[derive(clap::Subcommand, Debug)]
pub enum AuthAction {
    /// Store an API token for later commands
    Login {
        /// API token
        token: String,
    },
    /// Remove the stored API token
    Logout,
    /// Show who the current token belongs to
    Status,
}

impl AuthArgs {
    pub async fn execute(&self, flags: &CommonFlags) -> eyre::Result<()> {
        let auth = Auth::default();
        match &self.action {
            AuthAction::Login { token } => {
                let token = validate_token(token)?;
                auth.store_token(token).wrap_err("failed to store token")?;
                println!("token stored");
            }
            AuthAction::Logout => {
                auth.clear_token().wrap_err("failed to remove stored token")?;
                println!("logged out");
            }
            AuthAction::Status => {
                let Some(token) = flags.token(&auth) else {
                    println!("you are logged out");
                    return Ok(());
                };
                let client = ApiClient::new(&flags.endpoint, &token)?;
                let user = client
                    .current_user()
                    .await
                    .map_err(|e| user_fetch_error(&e))?;
                if flags.output.is_machine_readable() {
                    return print_json(&user);
                }
                let name = user.display_name.as_deref().unwrap_or(&user.name);
                println!("logged in as {name}");
            }
        }
        Ok(())
    }
}

/// Trims the token and rejects ones too short to be real.
pub fn validate_token(token: &str) -> Result<&str, CommandError> {
    let token = token.trim();
    if token.len() < MIN_TOKEN_LEN {
        return Err(CommandError::invalid_parameter("invalid token (too short)"));
    }
    Ok(token)
}

/// A 401 means the token was rejected, anything else is a generic failure.
pub fn user_fetch_error(e: &ApiError) -> CommandError {
    log::debug!("{e:#?}");
    match e.status() {
        Some(401) => CommandError::not_logged_in(
            "token is invalid or expired. \
             Run `rollout auth login <token>` to re-authenticate.",
        ),
        _ => CommandError::exception("failed to validate token"),
    }
}
