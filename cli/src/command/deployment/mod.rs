use crate::command::common_flags::CommonFlags;
use crate::command::deployment::list::ListArgs;
use crate::command::deployment::show::ShowArgs;

mod list;
mod show;

#[derive(clap::Args, Debug)]
pub struct DeploymentArgs {
    #[command(subcommand)]
    action: DeploymentAction,
}

#[derive(clap::Subcommand, Debug)]
pub enum DeploymentAction {
    /// Show one deployment with its latest release and install metrics
    Show(ShowArgs),
    /// List all deployments of an app
    List(ListArgs),
}

impl DeploymentArgs {
    pub async fn execute(&self, flags: &CommonFlags) -> eyre::Result<()> {
        match &self.action {
            DeploymentAction::Show(args) => args.execute(flags).await,
            DeploymentAction::List(args) => args.execute(flags).await,
        }
    }
}
