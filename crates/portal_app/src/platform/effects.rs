use std::collections::HashMap;
use std::time::Duration;

use anyhow::{bail, Result};
use chrono::Utc;
use portal_core::{
    Effect, FeedTab, FetchFailure, FetchOutcome, FetchRequest, JobId, Msg, Mutation,
    MutationFailure, MutationTicket, Portal, Role, SessionStatus,
};
use portal_engine::{
    ApiError, Collection, Credentials, EngineEvent, EngineHandle, FailureKind, PageBody,
    RequestId, SessionGrant, SessionStore,
};
use portal_logging::{portal_debug, portal_error, portal_info, portal_warn};

use super::records;

/// What an in-flight engine request was issued for.
enum Pending {
    Feed(FetchRequest<FeedTab>),
    RecruiterJobs(FetchRequest<()>),
    Applications(FetchRequest<JobId>),
    Meetings(FetchRequest<JobId>),
    Mutation(MutationTicket),
    Login,
    Register,
}

impl Pending {
    /// Portal to re-check when the backend rejects the session.
    fn portal(&self) -> Portal {
        match self {
            Pending::Feed(_) => Portal::CandidateSearch,
            Pending::Mutation(ticket) => match ticket.mutation {
                Mutation::ApplyToJob { .. } | Mutation::SaveJob { .. } => Portal::CandidateSearch,
                _ => Portal::RecruiterWorkspace,
            },
            Pending::RecruiterJobs(_) | Pending::Applications(_) | Pending::Meetings(_) => {
                Portal::RecruiterWorkspace
            }
            Pending::Login | Pending::Register => Portal::Entry,
        }
    }
}

/// Bridges core effects to the engine and engine events back to messages.
pub struct EffectRunner {
    engine: EngineHandle,
    store: SessionStore,
    next_request: RequestId,
    pending: HashMap<RequestId, Pending>,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, store: SessionStore) -> Self {
        Self {
            engine,
            store,
            next_request: 1,
            pending: HashMap::new(),
        }
    }

    /// Requests issued to the engine and not yet answered.
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// Executes effects. Effects answered locally come back as messages
    /// right away; the rest arrive later through [`EffectRunner::wait`].
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut immediate = Vec::new();
        for effect in effects {
            match effect {
                Effect::CheckSession { portal } => {
                    let status = self.session_status();
                    portal_debug!("CheckSession portal={:?} status={:?}", portal, status);
                    immediate.push(Msg::SessionChecked { portal, status });
                }
                Effect::Redirect(route) => {
                    portal_info!("Redirect to {}", route.path());
                    immediate.push(Msg::PortalOpened(route.portal()));
                }
                Effect::FetchFeed(request) => {
                    let collection = match request.filter {
                        FeedTab::All => Collection::OpenJobs,
                        FeedTab::Applied => Collection::AppliedJobs,
                        FeedTab::Saved => Collection::SavedJobs,
                    };
                    let page = request.page;
                    self.load(Pending::Feed(request), collection, page);
                }
                Effect::FetchRecruiterJobs(request) => {
                    let page = request.page;
                    self.load(Pending::RecruiterJobs(request), Collection::RecruiterJobs, page);
                }
                Effect::FetchApplications(request) => {
                    let collection = Collection::Applications { job: request.filter };
                    let page = request.page;
                    self.load(Pending::Applications(request), collection, page);
                }
                Effect::FetchMeetings(request) => {
                    let collection = Collection::Meetings { job: request.filter };
                    let page = request.page;
                    self.load(Pending::Meetings(request), collection, page);
                }
                Effect::Mutate(ticket) => {
                    let call = records::api_call(&ticket.mutation);
                    portal_info!("Mutate ticket={} call={}", ticket.id, call.label());
                    let token = self.token();
                    let id = self.track(Pending::Mutation(ticket));
                    self.engine.call(id, token, call);
                }
                Effect::Login(form) => {
                    let id = self.track(Pending::Login);
                    self.engine.login(
                        id,
                        Credentials {
                            email: form.email.trim().to_string(),
                            password: form.password,
                        },
                    );
                }
                Effect::Register(form) => {
                    let id = self.track(Pending::Register);
                    self.engine.register(id, records::signup(form));
                }
                Effect::ClearSession => {
                    if let Err(err) = self.store.clear() {
                        portal_error!("Failed to clear session {:?}: {}", self.store.path(), err);
                    }
                }
            }
        }
        immediate
    }

    /// Waits for the next engine answer and turns it into messages.
    pub fn wait(&mut self, timeout: Duration) -> Result<Vec<Msg>> {
        match self.engine.recv_timeout(timeout)? {
            Some(event) => Ok(self.translate(event)),
            None => bail!(
                "the backend did not answer within {}s ({} request(s) outstanding)",
                timeout.as_secs(),
                self.pending.len()
            ),
        }
    }

    fn load(&mut self, pending: Pending, collection: Collection, page: u32) {
        let token = self.token();
        let id = self.track(pending);
        portal_debug!("Fetch request={} {} page={}", id, collection.path(), page);
        self.engine.load_page(id, token, collection, page);
    }

    fn track(&mut self, pending: Pending) -> RequestId {
        let id = self.next_request;
        self.next_request += 1;
        self.pending.insert(id, pending);
        id
    }

    fn token(&self) -> Option<String> {
        self.store.load_active(Utc::now()).map(|grant| grant.token)
    }

    fn session_status(&self) -> SessionStatus {
        match self.store.load_active(Utc::now()) {
            Some(grant) => SessionStatus {
                logged_in: true,
                role: grant.role.parse().ok(),
            },
            None => SessionStatus::anonymous(),
        }
    }

    fn translate(&mut self, event: EngineEvent) -> Vec<Msg> {
        let request_id = event.request_id();
        let Some(pending) = self.pending.remove(&request_id) else {
            portal_warn!("Discarding answer to unknown request {}", request_id);
            return Vec::new();
        };
        let portal = pending.portal();
        let unauthorized = matches!(
            &event,
            EngineEvent::PageLoaded { result: Err(err), .. }
            | EngineEvent::CallCompleted { result: Err(err), .. }
                if err.kind == FailureKind::Unauthorized
        );

        let mut msgs = match (pending, event) {
            (Pending::Feed(request), EngineEvent::PageLoaded { result, .. }) => {
                let outcome = outcome(result, records::feed_page);
                vec![Msg::FeedFetched { request, outcome }]
            }
            (Pending::RecruiterJobs(request), EngineEvent::PageLoaded { result, .. }) => {
                let outcome = outcome(result, records::recruiter_jobs_page);
                vec![Msg::RecruiterJobsFetched { request, outcome }]
            }
            (Pending::Applications(request), EngineEvent::PageLoaded { result, .. }) => {
                let job = request.filter;
                let outcome = outcome(result, |body| records::applications_page(body, job));
                vec![Msg::ApplicationsFetched { request, outcome }]
            }
            (Pending::Meetings(request), EngineEvent::PageLoaded { result, .. }) => {
                let outcome = outcome(result, records::meetings_page);
                vec![Msg::MeetingsFetched { request, outcome }]
            }
            (Pending::Mutation(ticket), EngineEvent::CallCompleted { result, .. }) => {
                let result = result.map_err(|err| {
                    portal_warn!("Mutation {} failed: {}", ticket.id, err);
                    mutation_failure(&err)
                });
                vec![Msg::MutationSettled { ticket, result }]
            }
            (Pending::Login, EngineEvent::SessionGranted { result, .. }) => {
                vec![Msg::LoginSettled(self.grant(result))]
            }
            (Pending::Register, EngineEvent::SessionGranted { result, .. }) => {
                vec![Msg::RegistrationSettled(self.grant(result))]
            }
            (_, event) => {
                portal_error!("Engine answered request {} with {:?}", request_id, event);
                Vec::new()
            }
        };

        if unauthorized {
            portal_warn!("Backend rejected the session; signing out");
            if let Err(err) = self.store.clear() {
                portal_error!("Failed to clear session {:?}: {}", self.store.path(), err);
            }
            msgs.push(Msg::SessionChecked {
                portal,
                status: SessionStatus::anonymous(),
            });
        }
        msgs
    }

    /// Persists a fresh grant and reports the role it was issued for.
    fn grant(&self, result: Result<SessionGrant, ApiError>) -> Result<Role, String> {
        let grant = result.map_err(|err| {
            portal_warn!("Sign-in failed: {}", err);
            err.message
        })?;
        if let Err(err) = self.store.save(&grant) {
            portal_error!("Failed to save session {:?}: {}", self.store.path(), err);
            return Err(format!("could not store the session ({err})"));
        }
        // Unrecognised roles land in the recruiter workspace, matching the entry gate.
        Ok(grant.role.parse().unwrap_or_else(|_| {
            portal_warn!("Unrecognised role {:?} in login response", grant.role);
            Role::Recruiter
        }))
    }
}

fn outcome<T>(
    result: Result<PageBody, ApiError>,
    convert: impl FnOnce(PageBody) -> Option<(Vec<T>, u32)>,
) -> FetchOutcome<T> {
    match result {
        Ok(body) => match convert(body) {
            Some((items, total_pages)) => FetchOutcome::Success { items, total_pages },
            None => FetchOutcome::Failure(FetchFailure::new("unexpected page shape", false)),
        },
        Err(err) => {
            portal_warn!("Fetch failed: {}", err);
            FetchOutcome::Failure(FetchFailure::new(err.to_string(), err.is_retryable()))
        }
    }
}

fn mutation_failure(err: &ApiError) -> MutationFailure {
    if err.is_retryable() {
        MutationFailure::retryable(err.to_string())
    } else {
        MutationFailure::terminal(err.to_string())
    }
}
