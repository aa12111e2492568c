use clap::Subcommand;
use mammouth_core::Config;

use super::{open_app, open_app_with_host, print_alert, print_json, print_log, CmdResult, HostArgs};

#[derive(Subcommand)]
pub enum WalletAction {
    /// Acquire a wallet from the host, then the browser wallet
    Connect {
        #[command(flatten)]
        host: HostArgs,
        #[arg(long)]
        json: bool,
    },
    /// Show the connected wallet
    Show {
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(config: &Config, action: WalletAction) -> CmdResult {
    match action {
        WalletAction::Connect { host, json } => {
            let mut app = open_app_with_host(config, &host)?;
            let outcome = app.connect_wallet().await?;
            print_log(&app, json);
            print_alert(outcome.alert());
            if json {
                print_json(&outcome)?;
            } else {
                println!("{}", app.wallet_view().text);
            }
        }
        WalletAction::Show { json } => {
            let view = open_app(config)?.wallet_view();
            if json {
                print_json(&view)?;
            } else {
                println!("{}", view.text);
            }
        }
    }
    Ok(())
}
