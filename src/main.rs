//! Tracker proxy entry point.

use clap::Parser;

use tracker_proxy::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match cli::load_config(cli.config.as_deref()) {
        Ok(config) => match cli.command.unwrap_or_default() {
            Commands::Serve { host, port } => {
                cli::commands::serve::execute(config, host, port).await
            }
            Commands::CheckConfig { json } => cli::commands::check_config::execute(&config, json),
        },
        Err(err) => Err(err),
    };

    if let Err(err) = result {
        cli::handle_error(err);
    }
}
