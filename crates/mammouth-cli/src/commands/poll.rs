use clap::Subcommand;
use mammouth_core::{Config, PollView, VoteOutcome};

use super::{open_app, print_json, print_log, CmdResult};

#[derive(Subcommand)]
pub enum PollAction {
    /// Cast a vote ("yes" or "no"; anything else is ignored)
    Vote {
        choice: String,
        #[arg(long)]
        json: bool,
    },
    /// Reset both counters to zero
    Reset,
    /// Show the results
    Show {
        #[arg(long)]
        json: bool,
    },
}

fn print_view(view: &PollView, json: bool) -> CmdResult {
    if json {
        return print_json(view);
    }
    println!("Yes: {}", view.bar_yes);
    println!("No: {}", view.bar_no);
    println!("{}", view.meta);
    Ok(())
}

pub fn run(config: &Config, action: PollAction) -> CmdResult {
    let mut app = open_app(config)?;
    match action {
        PollAction::Vote { choice, json } => {
            if let VoteOutcome::Ignored(raw) = app.vote(&choice)? {
                tracing::debug!(choice = %raw, "invalid vote choice ignored");
            }
            print_log(&app, json);
            print_view(&app.poll_view(), json)?;
        }
        PollAction::Reset => {
            app.reset_poll()?;
            print_log(&app, false);
            print_view(&app.poll_view(), false)?;
        }
        PollAction::Show { json } => print_view(&app.poll_view(), json)?,
    }
    Ok(())
}
