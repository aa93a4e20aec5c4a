use crate::command::Cli;
use clap::Parser;
use rollout_core::error::{CommandError, ErrorCode};
use tracing_subscriber::EnvFilter;

mod api;
mod auth;
mod command;
mod config;
mod render;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    if let Err(e) = cli.run().await {
        let code = e
            .downcast_ref::<CommandError>()
            .map(|e| e.code)
            .unwrap_or(ErrorCode::Exception);
        eprintln!("error: {e:#}");
        std::process::exit(code.exit_code());
    }
}
