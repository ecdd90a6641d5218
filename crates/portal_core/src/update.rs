use crate::controller::{CollectionController, FetchOutcome, FetchRequest};
use crate::coordinator::{Mutation, Notice, RefreshTarget};
use crate::session::{GateDecision, Portal, Role, SessionGate, SessionStatus};
use crate::state::{ActiveList, FeedTab, JobTab, Screen, WorkspaceFocus};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::PortalOpened(portal) => vec![Effect::CheckSession { portal }],
        Msg::SessionChecked { portal, status } => {
            state.session = status;
            match SessionGate::check(&status, portal) {
                GateDecision::Proceed => mount_portal(&mut state, portal),
                GateDecision::Redirect(route) => {
                    state.unmount_lists();
                    state.screen = Screen::Entry;
                    state.mark_dirty();
                    vec![Effect::Redirect(route)]
                }
            }
        }
        Msg::TabSelected(tab) => {
            if state.screen != Screen::JobSearch {
                return (state, Vec::new());
            }
            let request = state.feed.as_mut().and_then(|feed| feed.set_filter(tab));
            if request.is_some() {
                state.mark_dirty();
            }
            request.map(Effect::FetchFeed).into_iter().collect()
        }
        Msg::JobTabSelected(tab) => select_job_tab(&mut state, tab),
        Msg::PageSelected(index) => navigate(&mut state, Nav::Page(index)),
        Msg::NextPageClicked => navigate(&mut state, Nav::Next),
        Msg::PreviousPageClicked => navigate(&mut state, Nav::Previous),
        Msg::RefreshClicked => navigate(&mut state, Nav::Refresh),
        Msg::JobOpened(job) => {
            if !matches!(state.screen, Screen::JobManagement(_)) {
                return (state, Vec::new());
            }
            state.screen = Screen::JobManagement(WorkspaceFocus::Job {
                job,
                tab: JobTab::Applications,
            });
            state.meetings = None;
            let mut applications = CollectionController::new(job);
            let request = applications.mount();
            state.applications = Some(applications);
            state.mark_dirty();
            vec![Effect::FetchApplications(request)]
        }
        Msg::JobClosed => {
            if !matches!(state.screen, Screen::JobManagement(WorkspaceFocus::Job { .. })) {
                return (state, Vec::new());
            }
            state.applications = None;
            state.meetings = None;
            state.screen = Screen::JobManagement(WorkspaceFocus::Jobs);
            let mut jobs = CollectionController::new(());
            let request = jobs.mount();
            state.recruiter_jobs = Some(jobs);
            state.mark_dirty();
            vec![Effect::FetchRecruiterJobs(request)]
        }
        Msg::ApplyClicked(job) => {
            let already_applied = state.feed.as_ref().is_some_and(|feed| {
                feed.items()
                    .iter()
                    .any(|listing| listing.job.id == job && listing.already_applied())
            });
            if already_applied {
                state.notify(Notice::info("You already applied to this role."));
                Vec::new()
            } else {
                submit(&mut state, Mutation::ApplyToJob { job })
            }
        }
        Msg::SaveClicked(job) => submit(&mut state, Mutation::SaveJob { job }),
        Msg::StatusUpdateSubmitted(status_update) => match status_update.validate() {
            Ok(()) => submit(&mut state, Mutation::UpdateApplicationStatus(status_update)),
            Err(err) => reject(&mut state, err),
        },
        Msg::JobSubmitted(draft) => match draft.validate() {
            Ok(()) => submit(&mut state, Mutation::CreateJob(draft)),
            Err(err) => reject(&mut state, err),
        },
        Msg::MeetingSubmitted(draft) => match draft.validate() {
            Ok(()) => submit(&mut state, Mutation::CreateMeeting(draft)),
            Err(err) => reject(&mut state, err),
        },
        Msg::RetryClicked => match state.retry.take() {
            Some(mutation) => submit(&mut state, mutation),
            None => Vec::new(),
        },
        Msg::LoginSubmitted(form) => match form.validate() {
            Ok(()) => vec![Effect::Login(form)],
            Err(err) => reject(&mut state, err),
        },
        Msg::RegistrationSubmitted(form) => match form.validate() {
            Ok(()) => vec![Effect::Register(form)],
            Err(err) => reject(&mut state, err),
        },
        Msg::LoginSettled(result) => match result {
            Ok(role) => signed_in(&mut state, role, "Signed in."),
            Err(reason) => {
                state.notify(Notice::error(format!("Sign-in failed. {reason}")));
                Vec::new()
            }
        },
        Msg::RegistrationSettled(result) => match result {
            Ok(role) => {
                let text = match role {
                    Role::Candidate => "Workspace created. Welcome to Lumenhire!",
                    Role::Recruiter => "Workspace ready. Let us help you hire brilliantly.",
                };
                signed_in(&mut state, role, text)
            }
            Err(reason) => {
                state.notify(Notice::error(format!(
                    "We could not finish sign-up. Try again in a moment. {reason}"
                )));
                Vec::new()
            }
        },
        Msg::LogoutClicked => {
            state.session = SessionStatus::anonymous();
            state.unmount_lists();
            state.retry = None;
            state.screen = Screen::Entry;
            state.mark_dirty();
            vec![Effect::ClearSession, Effect::Redirect(crate::session::Route::Home)]
        }
        Msg::FeedFetched { request, outcome } => {
            settle_list(&mut state, ActiveList::Feed, |s| {
                s.feed.as_mut().map(|feed| apply_outcome(feed, &request, outcome))
            });
            Vec::new()
        }
        Msg::RecruiterJobsFetched { request, outcome } => {
            settle_list(&mut state, ActiveList::RecruiterJobs, |s| {
                s.recruiter_jobs
                    .as_mut()
                    .map(|jobs| apply_outcome(jobs, &request, outcome))
            });
            Vec::new()
        }
        Msg::ApplicationsFetched { request, outcome } => {
            settle_list(&mut state, ActiveList::Applications, |s| {
                s.applications
                    .as_mut()
                    .map(|apps| apply_outcome(apps, &request, outcome))
            });
            Vec::new()
        }
        Msg::MeetingsFetched { request, outcome } => {
            settle_list(&mut state, ActiveList::Meetings, |s| {
                s.meetings
                    .as_mut()
                    .map(|meetings| apply_outcome(meetings, &request, outcome))
            });
            Vec::new()
        }
        Msg::MutationSettled { ticket, result } => {
            let Some(settlement) = state.coordinator.settle(&ticket, result) else {
                return (state, Vec::new());
            };
            if settlement.notice.retry {
                state.retry = Some(ticket.mutation.clone());
            } else if state
                .retry
                .as_ref()
                .is_some_and(|pending| pending.key() == ticket.mutation.key())
            {
                state.retry = None;
            }
            state.notify(settlement.notice);
            settlement
                .refresh
                .and_then(|target| refresh(&mut state, target))
                .into_iter()
                .collect()
        }
    };

    (state, effects)
}

fn mount_portal(state: &mut AppState, portal: Portal) -> Vec<Effect> {
    state.unmount_lists();
    state.mark_dirty();
    match portal {
        Portal::Entry => {
            state.screen = Screen::Entry;
            Vec::new()
        }
        Portal::CandidateSearch => {
            state.screen = Screen::JobSearch;
            let mut feed = CollectionController::new(FeedTab::All);
            let request = feed.mount();
            state.feed = Some(feed);
            vec![Effect::FetchFeed(request)]
        }
        Portal::RecruiterWorkspace => {
            state.screen = Screen::JobManagement(WorkspaceFocus::Jobs);
            let mut jobs = CollectionController::new(());
            let request = jobs.mount();
            state.recruiter_jobs = Some(jobs);
            vec![Effect::FetchRecruiterJobs(request)]
        }
    }
}

fn select_job_tab(state: &mut AppState, tab: JobTab) -> Vec<Effect> {
    let Screen::JobManagement(WorkspaceFocus::Job { job, tab: current }) = state.screen else {
        return Vec::new();
    };
    if current == tab {
        return Vec::new();
    }
    state.screen = Screen::JobManagement(WorkspaceFocus::Job { job, tab });
    state.mark_dirty();
    match tab {
        JobTab::Applications => {
            state.meetings = None;
            let mut applications = CollectionController::new(job);
            let request = applications.mount();
            state.applications = Some(applications);
            vec![Effect::FetchApplications(request)]
        }
        JobTab::Meetings => {
            state.applications = None;
            let mut meetings = CollectionController::new(job);
            let request = meetings.mount();
            state.meetings = Some(meetings);
            vec![Effect::FetchMeetings(request)]
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Nav {
    Page(u32),
    Next,
    Previous,
    Refresh,
}

impl Nav {
    fn apply<K: Clone + PartialEq, T>(
        self,
        controller: &mut CollectionController<K, T>,
    ) -> Option<FetchRequest<K>> {
        match self {
            Nav::Page(index) => controller.set_page(index),
            Nav::Next => controller.next_page(),
            Nav::Previous => controller.previous_page(),
            Nav::Refresh => Some(controller.bump_refresh_token()),
        }
    }
}

fn navigate(state: &mut AppState, nav: Nav) -> Vec<Effect> {
    let effect = match state.active_list() {
        Some(ActiveList::Feed) => state
            .feed
            .as_mut()
            .and_then(|c| nav.apply(c))
            .map(Effect::FetchFeed),
        Some(ActiveList::RecruiterJobs) => state
            .recruiter_jobs
            .as_mut()
            .and_then(|c| nav.apply(c))
            .map(Effect::FetchRecruiterJobs),
        Some(ActiveList::Applications) => state
            .applications
            .as_mut()
            .and_then(|c| nav.apply(c))
            .map(Effect::FetchApplications),
        Some(ActiveList::Meetings) => state
            .meetings
            .as_mut()
            .and_then(|c| nav.apply(c))
            .map(Effect::FetchMeetings),
        None => None,
    };
    if effect.is_some() {
        state.mark_dirty();
    }
    effect.into_iter().collect()
}

/// Bumps the refresh token of a mounted list. Lists that are not on screen
/// are left alone; they reload when next mounted.
fn refresh(state: &mut AppState, target: RefreshTarget) -> Option<Effect> {
    match target {
        RefreshTarget::JobFeed => state
            .feed
            .as_mut()
            .map(|c| Effect::FetchFeed(c.bump_refresh_token())),
        RefreshTarget::RecruiterJobs => state
            .recruiter_jobs
            .as_mut()
            .map(|c| Effect::FetchRecruiterJobs(c.bump_refresh_token())),
        RefreshTarget::Applications => state
            .applications
            .as_mut()
            .map(|c| Effect::FetchApplications(c.bump_refresh_token())),
        RefreshTarget::Meetings => state
            .meetings
            .as_mut()
            .map(|c| Effect::FetchMeetings(c.bump_refresh_token())),
    }
}

/// What a settled fetch did to its controller.
enum Applied {
    Stale,
    Loaded,
    Failed,
}

fn apply_outcome<K: Clone + PartialEq, T>(
    controller: &mut CollectionController<K, T>,
    request: &FetchRequest<K>,
    outcome: FetchOutcome<T>,
) -> Applied {
    let failed = matches!(outcome, FetchOutcome::Failure(_));
    if !controller.on_fetch_settled(request, outcome) {
        Applied::Stale
    } else if failed {
        Applied::Failed
    } else {
        Applied::Loaded
    }
}

fn settle_list(
    state: &mut AppState,
    list: ActiveList,
    apply: impl FnOnce(&mut AppState) -> Option<Applied>,
) {
    match apply(state) {
        Some(Applied::Loaded) => state.mark_dirty(),
        Some(Applied::Failed) => {
            let what = match list {
                ActiveList::Feed => "jobs",
                ActiveList::RecruiterJobs => "your jobs",
                ActiveList::Applications => "applications",
                ActiveList::Meetings => "meetings",
            };
            state.notify(Notice::error(format!("Unable to load {what}. Please retry.")));
        }
        Some(Applied::Stale) | None => {}
    }
}

fn submit(state: &mut AppState, mutation: Mutation) -> Vec<Effect> {
    match state.coordinator.begin(mutation) {
        Some(ticket) => {
            state.mark_dirty();
            vec![Effect::Mutate(ticket)]
        }
        None => Vec::new(),
    }
}

fn reject(state: &mut AppState, err: crate::forms::FormError) -> Vec<Effect> {
    state.notify(Notice::error(err.to_string()));
    Vec::new()
}

fn signed_in(state: &mut AppState, role: Role, text: &str) -> Vec<Effect> {
    state.session = SessionStatus::signed_in(role);
    state.notify(Notice::success(text));
    vec![Effect::Redirect(role.home())]
}
