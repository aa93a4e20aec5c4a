use crate::command::common_flags::CommonFlags;
use crate::render::{print_json, print_table};
use rollout_core::app::AppRef;
use rollout_core::deployment::metrics::display_time;
use rollout_core::deployment::report::{DeploymentRow, ListOutcome, list_deployments};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// App in the form owner/appname
    #[arg(short, long)]
    app: AppRef,
    /// Add a column with each deployment's key
    #[arg(short = 'k', long = "displayKeys")]
    display_keys: bool,
}

impl ListArgs {
    pub async fn execute(&self, flags: &CommonFlags) -> eyre::Result<()> {
        let client = flags.api_client()?;
        match list_deployments(&client, &self.app, flags.output, display_time).await? {
            ListOutcome::Structured(deployments) => print_json(&deployments)?,
            ListOutcome::Rows(rows) if rows.is_empty() => {
                println!("app {} has no deployments", self.app);
            }
            ListOutcome::Rows(rows) => print_table(
                &DeploymentRow::titles(self.display_keys),
                rows.iter().map(|row| row.cells(self.display_keys)),
            ),
        }
        Ok(())
    }
}
