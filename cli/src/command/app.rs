use crate::command::common_flags::CommonFlags;
use crate::render::{print_json, print_table};
use rollout_core::error::CommandError;

#[derive(clap::Args, Debug)]
pub struct AppArgs {
    #[command(subcommand)]
    action: AppAction,
}

#[derive(clap::Subcommand, Debug)]
pub enum AppAction {
    /// List apps visible to the current user
    List,
}

impl AppArgs {
    pub async fn execute(&self, flags: &CommonFlags) -> eyre::Result<()> {
        match self.action {
            AppAction::List => self.list(flags).await,
        }
    }

    async fn list(&self, flags: &CommonFlags) -> eyre::Result<()> {
        let client = flags.api_client()?;
        let apps = client.list_apps().await.map_err(|e| {
            log::error!("{e:#?}");
            CommandError::exception("Failed to fetch apps")
        })?;
        if flags.output.is_machine_readable() {
            return print_json(&apps);
        }
        if apps.is_empty() {
            println!("no apps found");
            return Ok(());
        }
        let rows = apps.iter().map(|app| {
            vec![
                format!("{}/{}", app.owner.name, app.name),
                app.display_name.clone().unwrap_or_default(),
            ]
        });
        print_table(&["App", "Display Name"], rows);
        Ok(())
    }
}
