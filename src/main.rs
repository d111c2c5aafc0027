use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use netplay_updater::commands::{self, update::CredentialSource};
use netplay_updater::core::config::Config;

#[derive(Parser)]
#[clap(name = "netplay-updater")]
#[clap(about = "Installs the latest netplay build and the user play key")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Use this config file instead of the default location
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download and install the latest netplay build, then write the play key
    Update {
        /// Read the play key from this JSON file
        #[clap(long)]
        credential_file: Option<PathBuf>,
        /// Fetch the play key from this URL (overrides credential_url in the config)
        #[clap(long)]
        credential_url: Option<String>,
        /// Bearer token for the play key request (defaults to NETPLAY_AUTH_TOKEN)
        #[clap(long)]
        token: Option<String>,
    },
    /// Show the release asset that would be installed on this platform
    Latest,
    /// Report installation, play key and cached download state
    Status,
    /// Print the effective configuration
    Config,
}

fn load_config(path: Option<&PathBuf>) -> netplay_updater::Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = load_config(cli.config.as_ref()).and_then(|config| match cli.command {
        Commands::Update {
            credential_file,
            credential_url,
            token,
        } => {
            let source = CredentialSource {
                file: credential_file,
                url: credential_url,
                token,
            };
            commands::update::run_update(&config, &source)
        }
        Commands::Latest => commands::latest::show_latest(&config),
        Commands::Status => commands::status::show_status(&config),
        Commands::Config => commands::config::show_config(&config),
    });

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
