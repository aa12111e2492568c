use clap::{Parser, Subcommand};
use mammouth_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "mammouth-cli", version, about = "Mammouth mini app CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send today's GM check-in
    Gm {
        /// Print the streak view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the current streak
    Streak {
        #[arg(long)]
        json: bool,
    },
    /// Poll voting and results
    Poll {
        #[command(subcommand)]
        action: commands::poll::PollAction,
    },
    /// Wallet connection
    Wallet {
        #[command(subcommand)]
        action: commands::wallet::WalletAction,
    },
    /// Host user identity
    User {
        #[command(subcommand)]
        action: commands::user::UserAction,
    },
    /// Describe the host environment
    Env {
        #[command(flatten)]
        host: commands::HostArgs,
    },
    /// Show every view at once
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "config unavailable, using defaults");
    }

    let result = match cli.command {
        Commands::Gm { json } => commands::streak::check_in(&config, json),
        Commands::Streak { json } => commands::streak::show(&config, json),
        Commands::Poll { action } => commands::poll::run(&config, action),
        Commands::Wallet { action } => commands::wallet::run(&config, action).await,
        Commands::User { action } => commands::user::run(&config, action).await,
        Commands::Env { host } => commands::env(&config, host).await,
        Commands::Status { json } => commands::status(&config, json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
