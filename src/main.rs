use anyhow::Result;
use clap::Parser;

use todolist::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli::load_config(cli.config.as_deref(), cli.empty).await?;

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            cli::handle_tui(config).await?;
        }
        Commands::List => {
            cli::handle_list(config).await?;
        }
    }

    Ok(())
}
