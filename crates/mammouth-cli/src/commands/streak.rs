use mammouth_core::{Config, StreakView};

use super::{open_app, print_json, print_log, CmdResult};

fn print_view(view: &StreakView, json: bool) -> CmdResult {
    if json {
        return print_json(view);
    }
    println!("Streak: {}", view.count);
    println!("Today: {}", view.status_flag);
    println!("{}", view.note);
    Ok(())
}

pub fn check_in(config: &Config, json: bool) -> CmdResult {
    let mut app = open_app(config)?;
    let now = chrono::Local::now();
    app.check_in(&now)?;
    print_log(&app, json);
    print_view(&app.streak_view(&now), json)
}

pub fn show(config: &Config, json: bool) -> CmdResult {
    let app = open_app(config)?;
    print_view(&app.streak_view(&chrono::Local::now()), json)
}
