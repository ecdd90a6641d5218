use std::sync::Once;

use portal_core::{
    update, ActiveList, AppState, Application, ApplicationStatus, ApplicationSummary, Effect,
    FeedTab, FetchFailure, FetchOutcome, FetchRequest, Job, JobListing, JobTab, Msg,
    MutationFailure, MutationTicket, NoticeLevel, Portal, Role, Route, Screen, SessionStatus,
    StatusUpdate, WorkspaceFocus,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(portal_logging::initialize_for_tests);
}

fn job(id: u64) -> Job {
    Job {
        id,
        title: format!("Role {id}"),
        description: "Build the hiring platform".to_string(),
        ..Job::default()
    }
}

fn listings(ids: &[u64]) -> Vec<JobListing> {
    ids.iter().map(|id| JobListing::bare(job(*id))).collect()
}

fn single_effect(effects: Vec<Effect>) -> Effect {
    assert_eq!(effects.len(), 1, "expected exactly one effect: {effects:?}");
    effects.into_iter().next().expect("one effect")
}

fn feed_request(effect: Effect) -> FetchRequest<FeedTab> {
    match effect {
        Effect::FetchFeed(request) => request,
        other => panic!("expected feed fetch, got {other:?}"),
    }
}

fn mutate_ticket(effect: Effect) -> MutationTicket {
    match effect {
        Effect::Mutate(ticket) => ticket,
        other => panic!("expected mutation, got {other:?}"),
    }
}

/// Candidate feed mounted and its first page loaded with 3 pages total.
fn candidate_feed() -> AppState {
    let (state, effects) = update(AppState::new(), Msg::PortalOpened(Portal::CandidateSearch));
    assert_eq!(
        effects,
        vec![Effect::CheckSession {
            portal: Portal::CandidateSearch
        }]
    );
    let (state, effects) = update(
        state,
        Msg::SessionChecked {
            portal: Portal::CandidateSearch,
            status: SessionStatus::signed_in(Role::Candidate),
        },
    );
    let request = feed_request(single_effect(effects));
    let (state, effects) = update(
        state,
        Msg::FeedFetched {
            request,
            outcome: FetchOutcome::Success {
                items: listings(&[1, 2, 3]),
                total_pages: 3,
            },
        },
    );
    assert!(effects.is_empty());
    state
}

fn recruiter_workspace() -> AppState {
    let (state, effects) = update(
        AppState::new(),
        Msg::SessionChecked {
            portal: Portal::RecruiterWorkspace,
            status: SessionStatus::signed_in(Role::Recruiter),
        },
    );
    let Effect::FetchRecruiterJobs(request) = single_effect(effects) else {
        panic!("expected recruiter job fetch");
    };
    let (state, _) = update(
        state,
        Msg::RecruiterJobsFetched {
            request,
            outcome: FetchOutcome::Success {
                items: vec![job(4), job(5)],
                total_pages: 1,
            },
        },
    );
    state
}

#[test]
fn unauthenticated_candidate_is_redirected_home() {
    init_logging();
    let (mut state, effects) = update(
        AppState::new(),
        Msg::SessionChecked {
            portal: Portal::CandidateSearch,
            status: SessionStatus::anonymous(),
        },
    );

    assert_eq!(effects, vec![Effect::Redirect(Route::Home)]);
    assert_eq!(state.screen(), Screen::Entry);
    assert!(state.feed().is_none());
    assert!(state.consume_dirty());
}

#[test]
fn mounted_feed_shows_first_page() {
    init_logging();
    let state = candidate_feed();
    let view = state.view();
    let list = view.list.expect("feed list");

    assert_eq!(list.kind, ActiveList::Feed);
    assert_eq!(list.page, 0);
    assert_eq!(list.total_pages, 3);
    assert_eq!(list.cards.len(), 3);
    assert!(list.show_pager());
    assert_eq!(
        list.tabs.iter().filter(|tab| tab.active).map(|tab| tab.label.as_str()).collect::<Vec<_>>(),
        vec!["Discover"]
    );
}

#[test]
fn tab_change_fetches_first_page_of_new_tab() {
    init_logging();
    let state = candidate_feed();
    let (state, effects) = update(state, Msg::PageSelected(2));
    assert_eq!(feed_request(single_effect(effects)).page, 2);

    let (state, effects) = update(state, Msg::TabSelected(FeedTab::Applied));
    let request = feed_request(single_effect(effects));
    assert_eq!(request.filter, FeedTab::Applied);
    assert_eq!(request.page, 0);

    let (_state, effects) = update(state, Msg::TabSelected(FeedTab::Applied));
    assert!(effects.is_empty());
}

#[test]
fn page_click_during_tab_load_uses_new_tab_page_count() {
    init_logging();
    let state = candidate_feed();
    let (state, effects) = update(state, Msg::TabSelected(FeedTab::Saved));
    let saved = feed_request(single_effect(effects));

    let (state, effects) = update(state, Msg::PageSelected(2));
    assert!(effects.is_empty());

    let (state, _) = update(
        state,
        Msg::FeedFetched {
            request: saved,
            outcome: FetchOutcome::Success {
                items: Vec::new(),
                total_pages: 0,
            },
        },
    );
    let feed = state.feed().expect("feed mounted");
    assert_eq!(feed.page(), 0);
    assert_eq!(feed.total_pages(), 0);
    assert!(!feed.is_loading());
}

#[test]
fn out_of_range_page_click_is_ignored() {
    init_logging();
    let mut state = candidate_feed();
    state.consume_dirty();

    let (mut state, effects) = update(state, Msg::PageSelected(7));

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.feed().map(|feed| feed.page()), Some(0));
}

#[test]
fn slow_response_for_previous_page_does_not_overwrite_newer_page() {
    init_logging();
    let state = candidate_feed();
    let (state, effects) = update(state, Msg::NextPageClicked);
    let page_one = feed_request(single_effect(effects));
    let (state, effects) = update(state, Msg::NextPageClicked);
    let page_two = feed_request(single_effect(effects));

    let (state, _) = update(
        state,
        Msg::FeedFetched {
            request: page_two,
            outcome: FetchOutcome::Success {
                items: listings(&[7, 8]),
                total_pages: 3,
            },
        },
    );
    let (state, _) = update(
        state,
        Msg::FeedFetched {
            request: page_one,
            outcome: FetchOutcome::Success {
                items: listings(&[4, 5, 6]),
                total_pages: 3,
            },
        },
    );

    let feed = state.feed().expect("feed mounted");
    assert_eq!(feed.page(), 2);
    let ids: Vec<u64> = feed.items().iter().map(|listing| listing.job.id).collect();
    assert_eq!(ids, vec![7, 8]);
}

#[test]
fn failed_fetch_keeps_cards_and_raises_notice() {
    init_logging();
    let state = candidate_feed();
    let (state, effects) = update(state, Msg::PageSelected(1));
    let request = feed_request(single_effect(effects));

    let (mut state, _) = update(
        state,
        Msg::FeedFetched {
            request,
            outcome: FetchOutcome::Failure(FetchFailure::new("network error", true)),
        },
    );

    let list = state.view().list.expect("feed list");
    assert_eq!(list.cards.len(), 3);
    assert_eq!(list.error.as_deref(), Some("network error"));
    let notices = state.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].text, "Unable to load jobs. Please retry.");
}

#[test]
fn successful_apply_triggers_exactly_one_refetch() {
    init_logging();
    let state = candidate_feed();
    let (state, effects) = update(state, Msg::ApplyClicked(2));
    let ticket = mutate_ticket(single_effect(effects));

    // A second click while the first is in flight is swallowed.
    let (state, effects) = update(state, Msg::ApplyClicked(2));
    assert!(effects.is_empty());

    let (mut state, effects) = update(
        state,
        Msg::MutationSettled {
            ticket,
            result: Ok(()),
        },
    );
    let request = feed_request(single_effect(effects));
    assert_eq!(request.filter, FeedTab::All);
    assert_eq!(request.page, 0);
    assert_eq!(request.refresh_token, 1);
    assert_eq!(state.take_notices()[0].text, "Application sent.");
}

#[test]
fn failed_mutation_keeps_data_and_offers_retry() {
    init_logging();
    let state = candidate_feed();
    let (state, effects) = update(state, Msg::SaveClicked(3));
    let ticket = mutate_ticket(single_effect(effects));

    let (state, effects) = update(
        state,
        Msg::MutationSettled {
            ticket,
            result: Err(MutationFailure::retryable("timeout")),
        },
    );
    assert!(effects.is_empty());
    assert!(state.retry_available());
    assert_eq!(state.feed().map(|feed| feed.items().len()), Some(3));
    assert_eq!(state.feed().map(|feed| feed.refresh_token()), Some(0));

    let (state, effects) = update(state, Msg::RetryClicked);
    let retried = mutate_ticket(single_effect(effects));
    assert_eq!(retried.mutation, portal_core::Mutation::SaveJob { job: 3 });
    assert!(!state.retry_available());
}

#[test]
fn applying_twice_to_applied_job_is_refused_locally() {
    init_logging();
    let state = candidate_feed();
    let (state, effects) = update(state, Msg::TabSelected(FeedTab::Applied));
    let request = feed_request(single_effect(effects));
    let mut applied = JobListing::bare(job(8));
    applied.application = Some(ApplicationSummary {
        id: 80,
        status: Some(ApplicationStatus::Applied),
        saved: false,
        applied: true,
    });
    let (state, _) = update(
        state,
        Msg::FeedFetched {
            request,
            outcome: FetchOutcome::Success {
                items: vec![applied],
                total_pages: 1,
            },
        },
    );

    let (mut state, effects) = update(state, Msg::ApplyClicked(8));

    assert!(effects.is_empty());
    assert_eq!(state.take_notices()[0].level, NoticeLevel::Info);
}

#[test]
fn opening_a_job_mounts_its_applications() {
    init_logging();
    let state = recruiter_workspace();
    let (state, effects) = update(state, Msg::JobOpened(4));

    let Effect::FetchApplications(request) = single_effect(effects) else {
        panic!("expected applications fetch");
    };
    assert_eq!(request.filter, 4);
    assert_eq!(request.page, 0);
    assert_eq!(
        state.screen(),
        Screen::JobManagement(WorkspaceFocus::Job {
            job: 4,
            tab: JobTab::Applications
        })
    );

    let (state, effects) = update(state, Msg::JobTabSelected(JobTab::Meetings));
    assert!(matches!(single_effect(effects), Effect::FetchMeetings(_)));
    assert!(state.applications().is_none());
    assert_eq!(state.active_list(), Some(ActiveList::Meetings));
}

#[test]
fn status_update_refreshes_applications_only() {
    init_logging();
    let state = recruiter_workspace();
    let (state, effects) = update(state, Msg::JobOpened(4));
    let Effect::FetchApplications(request) = single_effect(effects) else {
        panic!("expected applications fetch");
    };
    let (state, _) = update(
        state,
        Msg::ApplicationsFetched {
            request,
            outcome: FetchOutcome::Success {
                items: vec![Application {
                    id: 40,
                    job_id: 4,
                    status: Some(ApplicationStatus::Applied),
                    score: Some(72.0),
                    applied_on: Some("2026-10-01".to_string()),
                    candidate_email: "ada@example.com".to_string(),
                    resume: None,
                }],
                total_pages: 1,
            },
        },
    );

    let (state, effects) = update(
        state,
        Msg::StatusUpdateSubmitted(StatusUpdate {
            application: 40,
            job: 4,
            candidate: "ada@example.com".to_string(),
            status: ApplicationStatus::NextRound,
            note: "panel on Tuesday".to_string(),
        }),
    );
    let ticket = mutate_ticket(single_effect(effects));

    let (_state, effects) = update(
        state,
        Msg::MutationSettled {
            ticket,
            result: Ok(()),
        },
    );
    let Effect::FetchApplications(request) = single_effect(effects) else {
        panic!("expected applications refetch");
    };
    assert_eq!(request.refresh_token, 1);
}

#[test]
fn invalid_draft_is_rejected_before_any_request() {
    init_logging();
    let state = recruiter_workspace();
    let draft = portal_core::JobDraft::new("", "desc", "Remote");

    let (mut state, effects) = update(state, Msg::JobSubmitted(draft));

    assert!(effects.is_empty());
    assert_eq!(state.coordinator().outstanding(), 0);
    assert_eq!(state.take_notices()[0].text, "title is required");
}

#[test]
fn closing_a_job_restarts_job_list_at_first_page() {
    init_logging();
    let state = recruiter_workspace();
    let (state, _) = update(state, Msg::JobOpened(5));
    let (state, effects) = update(state, Msg::JobClosed);

    let Effect::FetchRecruiterJobs(request) = single_effect(effects) else {
        panic!("expected job list fetch");
    };
    assert_eq!(request.page, 0);
    assert_eq!(
        state.screen(),
        Screen::JobManagement(WorkspaceFocus::Jobs)
    );
}

#[test]
fn login_redirects_to_role_home() {
    init_logging();
    let (state, effects) = update(
        AppState::new(),
        Msg::LoginSettled(Ok(Role::Recruiter)),
    );

    assert_eq!(effects, vec![Effect::Redirect(Route::JobManagement)]);
    assert_eq!(state.session(), SessionStatus::signed_in(Role::Recruiter));
}

#[test]
fn logout_clears_session_and_lists() {
    init_logging();
    let state = candidate_feed();
    let (state, effects) = update(state, Msg::LogoutClicked);

    assert_eq!(
        effects,
        vec![Effect::ClearSession, Effect::Redirect(Route::Home)]
    );
    assert!(state.feed().is_none());
    assert_eq!(state.session(), SessionStatus::anonymous());
}
