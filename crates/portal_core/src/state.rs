use std::fmt;
use std::str::FromStr;

use crate::controller::CollectionController;
use crate::coordinator::{Mutation, MutationCoordinator, Notice};
use crate::model::{Application, Job, JobId, JobListing, Meeting};
use crate::session::{Portal, SessionStatus};
use crate::view_model::{self, AppViewModel};

/// Candidate feed tabs. Each selects a different endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedTab {
    #[default]
    All,
    Applied,
    Saved,
}

impl FeedTab {
    pub const ALL: [FeedTab; 3] = [FeedTab::All, FeedTab::Applied, FeedTab::Saved];

    pub fn key(self) -> &'static str {
        match self {
            FeedTab::All => "all",
            FeedTab::Applied => "applied",
            FeedTab::Saved => "saved",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            FeedTab::All => "No roles found just yet.",
            FeedTab::Applied => "You have not applied to any roles yet.",
            FeedTab::Saved => "Your saved list is waiting for its first role.",
        }
    }
}

impl fmt::Display for FeedTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FeedTab::All => "Discover",
            FeedTab::Applied => "In review",
            FeedTab::Saved => "Saved",
        };
        f.write_str(label)
    }
}

impl FromStr for FeedTab {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        FeedTab::ALL
            .into_iter()
            .find(|tab| tab.key().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown tab {raw:?} (expected all, applied or saved)"))
    }
}

/// Tabs of an opened job in the recruiter workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobTab {
    Applications,
    Meetings,
}

impl fmt::Display for JobTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobTab::Applications => f.write_str("Applications"),
            JobTab::Meetings => f.write_str("Meetings"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkspaceFocus {
    Jobs,
    Job { job: JobId, tab: JobTab },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Entry,
    JobSearch,
    JobManagement(WorkspaceFocus),
}

impl Screen {
    pub fn portal(self) -> Portal {
        match self {
            Screen::Entry => Portal::Entry,
            Screen::JobSearch => Portal::CandidateSearch,
            Screen::JobManagement(_) => Portal::RecruiterWorkspace,
        }
    }
}

/// The list the pagination bar and refresh act on for the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveList {
    Feed,
    RecruiterJobs,
    Applications,
    Meetings,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub(crate) screen: Screen,
    pub(crate) session: SessionStatus,
    pub(crate) feed: Option<CollectionController<FeedTab, JobListing>>,
    pub(crate) recruiter_jobs: Option<CollectionController<(), Job>>,
    pub(crate) applications: Option<CollectionController<JobId, Application>>,
    pub(crate) meetings: Option<CollectionController<JobId, Meeting>>,
    pub(crate) coordinator: MutationCoordinator,
    pub(crate) notices: Vec<Notice>,
    pub(crate) retry: Option<Mutation>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        view_model::build(self, self.dirty)
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drains the notifications raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> SessionStatus {
        self.session
    }

    pub fn feed(&self) -> Option<&CollectionController<FeedTab, JobListing>> {
        self.feed.as_ref()
    }

    pub fn recruiter_jobs(&self) -> Option<&CollectionController<(), Job>> {
        self.recruiter_jobs.as_ref()
    }

    pub fn applications(&self) -> Option<&CollectionController<JobId, Application>> {
        self.applications.as_ref()
    }

    pub fn meetings(&self) -> Option<&CollectionController<JobId, Meeting>> {
        self.meetings.as_ref()
    }

    pub fn coordinator(&self) -> &MutationCoordinator {
        &self.coordinator
    }

    pub fn retry_available(&self) -> bool {
        self.retry.is_some()
    }

    pub fn active_list(&self) -> Option<ActiveList> {
        match self.screen {
            Screen::Entry => None,
            Screen::JobSearch => Some(ActiveList::Feed),
            Screen::JobManagement(WorkspaceFocus::Jobs) => Some(ActiveList::RecruiterJobs),
            Screen::JobManagement(WorkspaceFocus::Job { tab, .. }) => Some(match tab {
                JobTab::Applications => ActiveList::Applications,
                JobTab::Meetings => ActiveList::Meetings,
            }),
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
        self.dirty = true;
    }

    /// Drops every mounted list; revisiting a view starts over at page 0.
    pub(crate) fn unmount_lists(&mut self) {
        self.feed = None;
        self.recruiter_jobs = None;
        self.applications = None;
        self.meetings = None;
    }
}
