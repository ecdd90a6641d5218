//! Line-oriented interactive session over an opened portal.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use portal_core::{JobTab, Msg, Portal, Screen};
use portal_logging::portal_debug;

use super::app::App;
use super::commands::print_changes;

const HELP: &str = "\
next | prev | page N      move through the list
tab all|applied|saved     switch the candidate feed
open JOB                  show applications of one of your jobs
applications | meetings   switch tabs of the opened job
back                      return to your job list
apply ID | save ID        act on a listing
refresh | retry           reload the list, or retry the last failed action
logout | quit
";

#[derive(Debug, PartialEq)]
pub(super) enum ShellInput {
    Send(Msg),
    Help,
    Quit,
}

pub fn run(app: &mut App) -> Result<()> {
    let start = match app.state().screen() {
        Screen::Entry => Portal::CandidateSearch,
        screen => screen.portal(),
    };
    app.open(start)?;
    print_changes(app)?;
    if app.state().screen() == Screen::Entry {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("portal> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line) {
            Ok(ShellInput::Quit) => break,
            Ok(ShellInput::Help) => print!("{HELP}"),
            Ok(ShellInput::Send(msg)) => {
                portal_debug!("shell: {:?}", msg);
                let logout = msg == Msg::LogoutClicked;
                app.send(msg)?;
                print_changes(app)?;
                if logout || app.state().screen() == Screen::Entry {
                    break;
                }
            }
            Err(problem) => println!("{problem} (type `help`)"),
        }
    }
    Ok(())
}

pub(super) fn parse_line(line: &str) -> Result<ShellInput, String> {
    let mut words = line.split_whitespace();
    let command = words.next().unwrap_or_default().to_ascii_lowercase();
    let argument = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments for `{command}`"));
    }

    let msg = match (command.as_str(), argument) {
        ("help" | "?", None) => return Ok(ShellInput::Help),
        ("quit" | "exit", None) => return Ok(ShellInput::Quit),
        ("next", None) => Msg::NextPageClicked,
        ("prev", None) => Msg::PreviousPageClicked,
        ("refresh", None) => Msg::RefreshClicked,
        ("retry", None) => Msg::RetryClicked,
        ("logout", None) => Msg::LogoutClicked,
        ("back", None) => Msg::JobClosed,
        ("applications", None) => Msg::JobTabSelected(JobTab::Applications),
        ("meetings", None) => Msg::JobTabSelected(JobTab::Meetings),
        ("page", Some(raw)) => match raw.parse::<u32>() {
            Ok(page) if page > 0 => Msg::PageSelected(page - 1),
            _ => return Err(format!("`{raw}` is not a page number")),
        },
        ("tab", Some(raw)) => Msg::TabSelected(raw.parse()?),
        ("open", Some(raw)) => Msg::JobOpened(number(raw)?),
        ("apply", Some(raw)) => Msg::ApplyClicked(number(raw)?),
        ("save", Some(raw)) => Msg::SaveClicked(number(raw)?),
        ("page" | "tab" | "open" | "apply" | "save", None) => {
            return Err(format!("`{command}` needs an argument"))
        }
        _ => return Err(format!("unknown command `{}`", line.trim())),
    };
    Ok(ShellInput::Send(msg))
}

fn number(raw: &str) -> Result<u64, String> {
    raw.parse().map_err(|_| format!("`{raw}` is not a valid id"))
}
