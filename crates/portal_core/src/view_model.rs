use crate::controller::CollectionController;
use crate::coordinator::Notice;
use crate::model::{Application, Job, JobListing, Meeting};
use crate::session::Role;
use crate::state::{ActiveList, AppState, FeedTab, JobTab, Screen, WorkspaceFocus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub screen: Screen,
    pub role: Option<Role>,
    pub list: Option<ListView>,
    pub notices: Vec<Notice>,
    pub retry_available: bool,
    pub pending_mutations: usize,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabView {
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub kind: ActiveList,
    pub heading: String,
    pub tabs: Vec<TabView>,
    pub page: u32,
    pub total_pages: u32,
    pub loading: bool,
    pub error: Option<String>,
    pub cards: Vec<CardView>,
    pub empty_message: String,
    pub has_previous: bool,
    pub has_next: bool,
}

impl ListView {
    /// The pager is only shown when there is somewhere to go.
    pub fn show_pager(&self) -> bool {
        self.total_pages > 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: u64,
    pub title: String,
    pub subtitle: String,
    pub details: Vec<String>,
    pub badges: Vec<String>,
    pub action: Option<String>,
}

/// Turns a record into the card a list renders for it.
pub trait ToCard {
    fn to_card(&self) -> CardView;
}

impl ToCard for JobListing {
    fn to_card(&self) -> CardView {
        let job = &self.job;
        let mut details = vec![
            job.company
                .clone()
                .unwrap_or_else(|| "Confidential team".to_string()),
            job.location.clone().unwrap_or_default(),
            deadline_label(job),
        ];
        if let Some(app) = &self.application {
            let status = app
                .status
                .as_ref()
                .map_or_else(|| "Under review".to_string(), ToString::to_string);
            details.push(format!("Application status: {status}"));
        }
        let mut badges = vec![job.kind.clone().unwrap_or_else(|| "Flexible".to_string())];
        if self.is_saved() {
            badges.push("saved".to_string());
        }
        badges.extend(job.skills.iter().cloned());
        CardView {
            id: job.id,
            title: job.title.clone(),
            subtitle: job.description.clone(),
            details: details.into_iter().filter(|d| !d.is_empty()).collect(),
            badges,
            action: Some(if self.already_applied() {
                "You already applied".to_string()
            } else {
                format!("apply {}", job.id)
            }),
        }
    }
}

impl ToCard for Job {
    fn to_card(&self) -> CardView {
        let mut details = vec![deadline_label(self)];
        if let Some(location) = &self.location {
            details.push(location.clone());
        }
        if let Some(stipend) = self.stipend {
            details.push(format!("Stipend {stipend}"));
        }
        let mut badges: Vec<String> = self.status.iter().cloned().collect();
        badges.extend(self.skills.iter().cloned());
        CardView {
            id: self.id,
            title: self.title.clone(),
            subtitle: self.description.clone(),
            details,
            badges,
            action: Some(format!("open {}", self.id)),
        }
    }
}

impl ToCard for Application {
    fn to_card(&self) -> CardView {
        let mut details = Vec::new();
        if let Some(score) = self.score {
            details.push(format!("Fit score {score:.0}"));
        }
        if let Some(applied_on) = &self.applied_on {
            details.push(format!("Applied {applied_on}"));
        }
        details.push(if self.resume.is_some() {
            "Resume attached".to_string()
        } else {
            "No resume".to_string()
        });
        CardView {
            id: self.id,
            title: self.candidate_email.clone(),
            subtitle: format!("Application #{}", self.id),
            details,
            badges: self
                .status
                .as_ref()
                .map(ToString::to_string)
                .into_iter()
                .collect(),
            action: Some(format!("status {}", self.id)),
        }
    }
}

impl ToCard for Meeting {
    fn to_card(&self) -> CardView {
        CardView {
            id: self.id,
            title: self
                .candidate
                .clone()
                .unwrap_or_else(|| "Open slot".to_string()),
            subtitle: self.time.clone().unwrap_or_else(|| "Time pending".to_string()),
            details: self.zoom_link.iter().cloned().collect(),
            badges: Vec::new(),
            action: None,
        }
    }
}

fn deadline_label(job: &Job) -> String {
    match &job.deadline {
        Some(deadline) => format!("Deadline {deadline}"),
        None => "Rolling".to_string(),
    }
}

fn list_view<K: Clone + PartialEq, T: ToCard>(
    kind: ActiveList,
    heading: String,
    tabs: Vec<TabView>,
    empty_message: &str,
    controller: &CollectionController<K, T>,
) -> ListView {
    ListView {
        kind,
        heading,
        tabs,
        page: controller.page(),
        total_pages: controller.total_pages(),
        loading: controller.is_loading(),
        error: controller.last_error().map(|failure| failure.reason.clone()),
        cards: controller.items().iter().map(ToCard::to_card).collect(),
        empty_message: empty_message.to_string(),
        has_previous: controller.has_previous(),
        has_next: controller.has_next(),
    }
}

fn job_tabs(active: JobTab) -> Vec<TabView> {
    [JobTab::Applications, JobTab::Meetings]
        .into_iter()
        .map(|tab| TabView {
            label: tab.to_string(),
            active: tab == active,
        })
        .collect()
}

pub(crate) fn build(state: &AppState, dirty: bool) -> AppViewModel {
    let list = match (state.active_list(), state.screen()) {
        (Some(ActiveList::Feed), _) => state.feed().map(|feed| {
            let active = *feed.filter();
            let tabs = FeedTab::ALL
                .into_iter()
                .map(|tab| TabView {
                    label: tab.to_string(),
                    active: tab == active,
                })
                .collect();
            list_view(
                ActiveList::Feed,
                "Curated roles that respect your craft".to_string(),
                tabs,
                active.empty_message(),
                feed,
            )
        }),
        (Some(ActiveList::RecruiterJobs), _) => state.recruiter_jobs().map(|jobs| {
            list_view(
                ActiveList::RecruiterJobs,
                "Your roles".to_string(),
                Vec::new(),
                "No roles posted yet.",
                jobs,
            )
        }),
        (
            Some(ActiveList::Applications),
            Screen::JobManagement(WorkspaceFocus::Job { job, tab }),
        ) => state.applications().map(|apps| {
            list_view(
                ActiveList::Applications,
                format!("Job #{job}"),
                job_tabs(tab),
                "No applications yet.",
                apps,
            )
        }),
        (Some(ActiveList::Meetings), Screen::JobManagement(WorkspaceFocus::Job { job, tab })) => {
            state.meetings().map(|meetings| {
                list_view(
                    ActiveList::Meetings,
                    format!("Job #{job}"),
                    job_tabs(tab),
                    "No meetings scheduled.",
                    meetings,
                )
            })
        }
        _ => None,
    };

    AppViewModel {
        screen: state.screen(),
        role: state.session().role,
        list,
        notices: state.notices.clone(),
        retry_available: state.retry_available(),
        pending_mutations: state.coordinator().outstanding(),
        dirty,
    }
}
