use crate::command::app::AppArgs;
use crate::command::auth::AuthArgs;
use crate::command::common_flags::CommonFlags;
use crate::command::deployment::DeploymentArgs;

mod app;
pub(crate) mod auth;
mod common_flags;
mod deployment;

/// Inspect app deployments and the install metrics of their releases.
#[derive(clap::Parser, Debug)]
#[command(name = "rollout", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
    #[command(flatten)]
    flags: CommonFlags,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Manage the stored API token
    Auth(AuthArgs),
    /// Apps visible to the current user
    App(AppArgs),
    /// Inspect an app's deployments
    Deployment(DeploymentArgs),
}

impl Cli {
    pub async fn run(self) -> eyre::Result<()> {
        match &self.command {
            Command::Auth(args) => args.execute(&self.flags).await,
            Command::App(args) => args.execute(&self.flags).await,
            Command::Deployment(args) => args.execute(&self.flags).await,
        }
    }
}
