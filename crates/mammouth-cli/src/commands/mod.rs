pub mod config;
pub mod poll;
pub mod streak;
pub mod user;
pub mod wallet;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mammouth_core::{Config, FileStore, MiniApp, StaticPlatformSdk, StaticWallet};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Scripted host providers for the identity commands.
#[derive(Args, Debug, Default)]
pub struct HostArgs {
    /// JSON file describing the host SDK (context and sign-in behavior)
    #[arg(long, value_name = "FILE")]
    pub host: Option<PathBuf>,
    /// Comma-separated accounts granted by a browser wallet
    #[arg(long, value_delimiter = ',')]
    pub accounts: Option<Vec<String>>,
    /// Make the browser wallet reject the account request
    #[arg(long, value_name = "MESSAGE")]
    pub reject: Option<String>,
}

pub fn open_app(config: &Config) -> Result<MiniApp<FileStore>, Box<dyn std::error::Error>> {
    let store = FileStore::open_default()?;
    tracing::debug!(dir = %store.dir().display(), "opening state store");
    Ok(MiniApp::open(store, config))
}

pub fn open_app_with_host(
    config: &Config,
    host: &HostArgs,
) -> Result<MiniApp<FileStore>, Box<dyn std::error::Error>> {
    let mut app = open_app(config)?;
    if let Some(path) = &host.host {
        app = app.with_platform_sdk(Arc::new(StaticPlatformSdk::from_json_file(path)?));
    }
    if let Some(message) = &host.reject {
        app = app.with_browser_wallet(Arc::new(StaticWallet::rejecting(message.clone())));
    } else if let Some(accounts) = &host.accounts {
        app = app.with_browser_wallet(Arc::new(StaticWallet::with_accounts(accounts.clone())));
    }
    Ok(app)
}

/// Event-log lines go to stdout, or stderr when stdout carries JSON.
pub fn print_log(app: &MiniApp<FileStore>, json: bool) {
    for line in app.log().lines() {
        if json {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

pub fn print_alert(alert: Option<&str>) {
    if let Some(message) = alert {
        eprintln!("alert: {message}");
    }
}

pub fn print_json<T: Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn env(config: &Config, host: HostArgs) -> CmdResult {
    let app = open_app_with_host(config, &host)?;
    println!("{}", app.env_hint().await);
    Ok(())
}

pub fn status(config: &Config, json: bool) -> CmdResult {
    let app = open_app(config)?;
    let now = chrono::Local::now();
    let streak = app.streak_view(&now);
    let poll = app.poll_view();
    let wallet = app.wallet_view();

    if json {
        return print_json(&serde_json::json!({
            "streak": streak,
            "poll": poll,
            "wallet": wallet,
        }));
    }

    println!("Streak: {} ({})", streak.count, streak.status_flag);
    println!("{}", streak.note);
    println!("Yes: {}  No: {}  ({})", poll.bar_yes, poll.bar_no, poll.meta);
    println!("{}", wallet.text);
    Ok(())
}
