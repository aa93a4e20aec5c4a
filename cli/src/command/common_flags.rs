use crate::api::ApiClient;
use crate::auth::Auth;
use crate::config::API_URL;
use rollout_core::error::CommandError;
use rollout_core::output::OutputMode;

/// Flags accepted by every subcommand.
#[derive(clap::Args, Debug, Clone)]
pub struct CommonFlags {
    /// API endpoint
    #[arg(short = 'e', long, global = true, env = "ROLLOUT_API_URL", default_value = API_URL)]
    pub endpoint: String,
    /// API token, defaults to the one stored by `rollout auth login`
    #[arg(long, global = true, env = "ROLLOUT_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    /// Output format: table or json
    #[arg(short = 'o', long, global = true, default_value_t = OutputMode::Table)]
    pub output: OutputMode,
}

impl CommonFlags {
    /// The token given on the command line, or else the one in `auth`.
    pub fn token(&self, auth: &Auth) -> Option<String> {
        self.token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .or_else(|| auth.read_stored_token())
    }

    pub fn api_client(&self) -> eyre::Result<ApiClient> {
        self.api_client_with(&Auth::default())
    }

    fn api_client_with(&self, auth: &Auth) -> eyre::Result<ApiClient> {
        let Some(token) = self.token(auth) else {
            return Err(CommandError::not_logged_in(
                "you are not logged in. Run `rollout auth login <token>` first.",
            )
            .into());
        };
        ApiClient::new(&self.endpoint, &token)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rollout_core::error::ErrorCode;

    fn flags(token: Option<&str>) -> CommonFlags {
        CommonFlags {
            endpoint: "http://localhost:3003".to_owned(),
            token: token.map(str::to_owned),
            output: OutputMode::Table,
        }
    }

    #[test]
    fn test_api_client_without_token() {
        let dir = tempfile::tempdir().unwrap();
        let auth = Auth::in_dir(dir.path());
        for flags in [flags(None), flags(Some("  "))] {
            let e = flags.api_client_with(&auth).err().unwrap();
            let e = e.downcast_ref::<CommandError>().unwrap();
            assert_eq!(e.code, ErrorCode::NotLoggedIn);
        }
    }

    #[test]
    fn test_token_prefers_flag_over_stored() {
        let dir = tempfile::tempdir().unwrap();
        let auth = Auth::in_dir(dir.path());
        auth.store_token("stored-token").unwrap();
        assert_eq!(flags(None).token(&auth).as_deref(), Some("stored-token"));
        let flag_token = flags(Some(" flag-token ")).token(&auth);
        assert_eq!(flag_token.as_deref(), Some("flag-token"));
        assert!(flags(None).api_client_with(&auth).is_ok());
    }
}
