use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use portal_core::{
    ApplicationStatus, FeedTab, JobDraft, JobTab, LoginForm, MeetingDraft, Msg, Portal,
    RegistrationForm, ResumeFile, Role, SkillList, StatusUpdate,
};

use super::app::App;
use super::shell;
use crate::cli::{AccountArgs, Commands, RecruiterCommand, RegisterCommand};

pub fn execute(app: &mut App, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            app.send(Msg::LoginSubmitted(LoginForm { email, password }))?;
        }
        Commands::Logout => app.send(Msg::LogoutClicked)?,
        Commands::Register { role } => {
            let form = registration(role)?;
            app.send(Msg::RegistrationSubmitted(form))?;
        }
        Commands::Jobs { tab, page } => {
            if enter(app, Portal::CandidateSearch)? {
                if tab != FeedTab::All {
                    app.send(Msg::TabSelected(tab))?;
                }
                select_page(app, page)?;
            }
        }
        Commands::Apply { job } => {
            if enter(app, Portal::CandidateSearch)? {
                app.send(Msg::ApplyClicked(job))?;
            }
        }
        Commands::Save { job } => {
            if enter(app, Portal::CandidateSearch)? {
                app.send(Msg::SaveClicked(job))?;
            }
        }
        Commands::Recruiter { command } => {
            if enter(app, Portal::RecruiterWorkspace)? {
                recruiter(app, command)?;
            }
        }
        Commands::Shell => return shell::run(app),
    }
    print_changes(app)
}

fn recruiter(app: &mut App, command: RecruiterCommand) -> Result<()> {
    match command {
        RecruiterCommand::Jobs { page } => select_page(app, page),
        RecruiterCommand::Applications { job, page } => {
            app.send(Msg::JobOpened(job))?;
            select_page(app, page)
        }
        RecruiterCommand::Meetings { job, page } => {
            app.send(Msg::JobOpened(job))?;
            app.send(Msg::JobTabSelected(JobTab::Meetings))?;
            select_page(app, page)
        }
        RecruiterCommand::Status {
            application,
            job,
            candidate,
            status,
            note,
        } => {
            app.send(Msg::JobOpened(job))?;
            app.send(Msg::StatusUpdateSubmitted(StatusUpdate {
                application,
                job,
                candidate,
                status: parse_status(&status),
                note,
            }))
        }
        RecruiterCommand::PostJob {
            title,
            description,
            location,
            skills,
            deadline,
            kind,
            stipend,
        } => {
            let mut draft = JobDraft::new(title, description, location).with_skills(&skills);
            draft.deadline = deadline;
            draft.kind = kind;
            draft.stipend = stipend;
            app.send(Msg::JobSubmitted(draft))
        }
        RecruiterCommand::Schedule {
            job,
            time,
            zoom_link,
            candidate,
        } => {
            app.send(Msg::JobOpened(job))?;
            app.send(Msg::JobTabSelected(JobTab::Meetings))?;
            app.send(Msg::MeetingSubmitted(MeetingDraft {
                job,
                candidate,
                time,
                zoom_link,
            }))
        }
    }
}

/// Opens `portal`; false when the session gate sent the user elsewhere.
fn enter(app: &mut App, portal: Portal) -> Result<bool> {
    app.open(portal)?;
    Ok(app.state().screen().portal() == portal)
}

/// Moves the active list to a one-based page number.
pub(super) fn select_page(app: &mut App, page: u32) -> Result<()> {
    let Some(index) = page.checked_sub(1) else {
        bail!("pages start at 1");
    };
    if index == 0 {
        return Ok(());
    }
    app.send(Msg::PageSelected(index))?;
    let shown = app.state().view().list.map(|list| (list.page, list.total_pages));
    if let Some((current, total)) = shown {
        if current != index {
            eprintln!("Page {page} is out of range ({total} page(s)).");
        }
    }
    Ok(())
}

/// Accepts `next-round`, `NextRound`, `NEXT_ROUND` and friends.
pub(super) fn parse_status(raw: &str) -> ApplicationStatus {
    let normalized = raw.trim().replace(['-', ' '], "_").to_ascii_uppercase();
    ApplicationStatus::parse(&normalized)
}

pub(super) fn print_changes(app: &mut App) -> Result<()> {
    if let Some(text) = app.render()? {
        print!("{text}");
    }
    Ok(())
}

fn registration(command: RegisterCommand) -> Result<RegistrationForm> {
    let (role, account, company, position, linkedin, resume) = match command {
        RegisterCommand::Candidate { account, resume } => {
            let file = read_resume(&resume)?;
            (Role::Candidate, account, None, None, None, Some(file))
        }
        RegisterCommand::Recruiter {
            account,
            company,
            position,
            linkedin,
        } => (
            Role::Recruiter,
            account,
            Some(company),
            Some(position),
            linkedin,
            None,
        ),
    };
    let AccountArgs {
        name,
        email,
        password,
        skills,
    } = account;
    Ok(RegistrationForm {
        role,
        name,
        email,
        confirm_password: password.clone(),
        password,
        skills: skill_list(&skills)?,
        company,
        current_position: position,
        linkedin,
        resume,
    })
}

fn skill_list(raw: &str) -> Result<SkillList> {
    let mut skills = SkillList::default();
    for skill in raw.split(',').filter(|skill| !skill.trim().is_empty()) {
        skills.add(skill)?;
    }
    Ok(skills)
}

fn read_resume(path: &Path) -> Result<ResumeFile> {
    let bytes =
        fs::read(path).with_context(|| format!("cannot read resume {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resume.pdf".to_string());
    Ok(ResumeFile { file_name, bytes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_spellings() {
        assert_eq!(parse_status("next-round"), ApplicationStatus::NextRound);
        assert_eq!(parse_status("Selected"), ApplicationStatus::Selected);
        assert_eq!(parse_status(" rejected "), ApplicationStatus::Rejected);
        assert_eq!(
            parse_status("on hold"),
            ApplicationStatus::Other("ON_HOLD".to_string())
        );
    }

    #[test]
    fn skills_are_split_and_deduplicated() {
        let skills = skill_list("rust, sql,,").unwrap();
        assert_eq!(skills.as_slice(), &["rust".to_string(), "sql".to_string()]);
        assert!(skill_list("rust, rust").is_err());
    }
}
