use backend_utils::cli::{Cli, execute_command, load_and_merge_config};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_and_merge_config(&cli)?;

    execute_command(&cli, settings).await
}
