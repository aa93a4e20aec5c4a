use crate::command::common_flags::CommonFlags;
use crate::render::{print_json, print_table};
use rollout_core::app::AppRef;
use rollout_core::deployment::metrics::display_time;
use rollout_core::deployment::report::{DeploymentRow, ShowOutcome, ShowRequest, show_deployment};

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// App in the form owner/appname
    #[arg(short, long)]
    app: AppRef,
    /// Name of the deployment to show
    #[arg(short = 'd', long = "deploymentName")]
    deployment_name: String,
    /// Print only the deployment key
    #[arg(short = 'k', long = "displayKey")]
    display_key: bool,
}

impl ShowArgs {
    pub async fn execute(&self, flags: &CommonFlags) -> eyre::Result<()> {
        let client = flags.api_client()?;
        let request = ShowRequest {
            app: &self.app,
            deployment_name: &self.deployment_name,
            display_key: self.display_key,
            mode: flags.output,
        };
        match show_deployment(&client, request, display_time).await? {
            ShowOutcome::Key(key) if flags.output.is_machine_readable() => print_json(&key)?,
            ShowOutcome::Key(key) => println!("{key}"),
            ShowOutcome::Row(row) => print_table(&DeploymentRow::titles(false), [row.cells(false)]),
            ShowOutcome::Structured(deployment) => print_json(&deployment)?,
        }
        Ok(())
    }
}
