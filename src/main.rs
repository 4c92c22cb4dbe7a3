use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use linkdrop::cli::{Cli, Commands, ConfigCommands, generate_config};
use linkdrop::config::{get_config, init_config_from};
use linkdrop::errors::LinkdropError;
use linkdrop::runtime::modes::run_server;
use linkdrop::system::logging::init_logging;

#[actix_web::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        }) => generate_config(output_path, force).map(|path| {
            println!("{} Sample configuration written to {}", "✓".green(), path);
        }),
        Some(Commands::Serve) | None => serve(&cli.config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<LinkdropError>() {
                Some(err) => eprintln!("{}", err.format_colored()),
                None => eprintln!("{} {:#}", "[ERROR]".red().bold(), e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn serve(config_path: &str) -> anyhow::Result<()> {
    init_config_from(config_path);
    let config = get_config();

    let _guard = init_logging(&config.logging)?;
    run_server().await
}
