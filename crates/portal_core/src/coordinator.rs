//! Mutation-then-refresh coordination.
//!
//! The coordinator never touches a collection directly. A successful settlement
//! names the [`RefreshTarget`] whose refresh token the caller should bump.
use std::collections::BTreeMap;

use crate::forms::{JobDraft, MeetingDraft, StatusUpdate};
use crate::model::{ApplicationId, JobId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    ApplyToJob { job: JobId },
    SaveJob { job: JobId },
    UpdateApplicationStatus(StatusUpdate),
    CreateJob(JobDraft),
    CreateMeeting(MeetingDraft),
}

impl Mutation {
    /// Identity used to suppress duplicate submissions while one is in flight.
    pub fn key(&self) -> MutationKey {
        match self {
            Mutation::ApplyToJob { job } => MutationKey::Apply(*job),
            Mutation::SaveJob { job } => MutationKey::Save(*job),
            Mutation::UpdateApplicationStatus(update) => MutationKey::Status(update.application),
            Mutation::CreateJob(draft) => MutationKey::CreateJob(draft.title.trim().to_lowercase()),
            Mutation::CreateMeeting(draft) => {
                MutationKey::CreateMeeting(draft.job, draft.candidate.clone())
            }
        }
    }

    pub fn refresh_target(&self) -> RefreshTarget {
        match self {
            Mutation::ApplyToJob { .. } | Mutation::SaveJob { .. } => RefreshTarget::JobFeed,
            Mutation::UpdateApplicationStatus(_) => RefreshTarget::Applications,
            Mutation::CreateJob(_) => RefreshTarget::RecruiterJobs,
            Mutation::CreateMeeting(_) => RefreshTarget::Meetings,
        }
    }

    fn success_text(&self) -> &'static str {
        match self {
            Mutation::ApplyToJob { .. } => "Application sent.",
            Mutation::SaveJob { .. } => "Job saved.",
            Mutation::UpdateApplicationStatus(_) => "Status updated.",
            Mutation::CreateJob(_) => "Job published.",
            Mutation::CreateMeeting(_) => "Meeting scheduled.",
        }
    }

    fn failure_text(&self) -> &'static str {
        match self {
            Mutation::ApplyToJob { .. } => "Could not submit your application.",
            Mutation::SaveJob { .. } => "Could not save this job.",
            Mutation::UpdateApplicationStatus(_) => "Could not update status. Try again later.",
            Mutation::CreateJob(_) => "Could not publish the job.",
            Mutation::CreateMeeting(_) => "Could not schedule the meeting.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum MutationKey {
    Apply(JobId),
    Save(JobId),
    Status(ApplicationId),
    CreateJob(String),
    CreateMeeting(JobId, Option<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshTarget {
    JobFeed,
    RecruiterJobs,
    Applications,
    Meetings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationTicket {
    pub id: u64,
    pub mutation: Mutation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Worth offering a retry (network trouble, server overload).
    Retryable,
    /// Retrying the same call will not help.
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationFailure {
    pub class: ErrorClass,
    pub message: String,
}

impl MutationFailure {
    pub fn retryable(message: impl Into<String>) -> Self {
        Self {
            class: ErrorClass::Retryable,
            message: message.into(),
        }
    }

    pub fn terminal(message: impl Into<String>) -> Self {
        Self {
            class: ErrorClass::Terminal,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// User-visible notification (the toast of the web portals).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub retry: bool,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
            retry: false,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
            retry: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
            retry: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub refresh: Option<RefreshTarget>,
    pub notice: Notice,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MutationCoordinator {
    next_id: u64,
    in_flight: BTreeMap<MutationKey, u64>,
}

impl MutationCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `mutation` as in flight. Returns `None` while an identical
    /// mutation for the same target is still outstanding.
    pub fn begin(&mut self, mutation: Mutation) -> Option<MutationTicket> {
        let key = mutation.key();
        if self.in_flight.contains_key(&key) {
            return None;
        }
        self.next_id += 1;
        self.in_flight.insert(key, self.next_id);
        Some(MutationTicket {
            id: self.next_id,
            mutation,
        })
    }

    /// Closes the ticket. Unknown or already settled tickets yield `None`.
    pub fn settle(
        &mut self,
        ticket: &MutationTicket,
        result: Result<(), MutationFailure>,
    ) -> Option<Settlement> {
        let key = ticket.mutation.key();
        if self.in_flight.get(&key) != Some(&ticket.id) {
            return None;
        }
        self.in_flight.remove(&key);

        let settlement = match result {
            Ok(()) => Settlement {
                refresh: Some(ticket.mutation.refresh_target()),
                notice: Notice::success(ticket.mutation.success_text()),
            },
            Err(failure) => {
                let mut notice = Notice::error(format!(
                    "{} {}",
                    ticket.mutation.failure_text(),
                    failure.message
                ));
                notice.retry = failure.class == ErrorClass::Retryable;
                Settlement {
                    refresh: None,
                    notice,
                }
            }
        };
        Some(settlement)
    }

    pub fn outstanding(&self) -> usize {
        self.in_flight.len()
    }
}
