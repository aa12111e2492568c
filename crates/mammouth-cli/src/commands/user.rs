use clap::Subcommand;
use mammouth_core::Config;

use super::{open_app_with_host, print_alert, print_json, print_log, CmdResult, HostArgs};

#[derive(Subcommand)]
pub enum UserAction {
    /// Read the host user, signing in if needed
    Connect {
        #[command(flatten)]
        host: HostArgs,
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(config: &Config, action: UserAction) -> CmdResult {
    match action {
        UserAction::Connect { host, json } => {
            let mut app = open_app_with_host(config, &host)?;
            let outcome = app.connect_user().await;
            print_log(&app, json);
            print_alert(outcome.alert());

            if json {
                return print_json(&outcome);
            }
            match app.user_view() {
                Some(view) => {
                    println!("{}", view.name);
                    println!("{}", view.id_text);
                }
                None => println!("No user"),
            }
        }
    }
    Ok(())
}
