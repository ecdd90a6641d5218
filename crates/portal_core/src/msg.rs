use crate::controller::{FetchOutcome, FetchRequest};
use crate::coordinator::{MutationFailure, MutationTicket};
use crate::forms::{JobDraft, LoginForm, MeetingDraft, RegistrationForm, StatusUpdate};
use crate::model::{Application, Job, JobId, JobListing, Meeting};
use crate::session::{Portal, Role, SessionStatus};
use crate::state::{FeedTab, JobTab};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// A portal view is being activated (navigation or redirect).
    PortalOpened(Portal),
    /// Session lookup finished for a pending activation.
    SessionChecked {
        portal: Portal,
        status: SessionStatus,
    },
    /// Candidate picked a feed tab.
    TabSelected(FeedTab),
    /// Recruiter switched between applications and meetings of the open job.
    JobTabSelected(JobTab),
    /// User clicked a page number (zero based).
    PageSelected(u32),
    NextPageClicked,
    PreviousPageClicked,
    /// Reload the active list in place.
    RefreshClicked,
    /// Recruiter opened the applications of one of their jobs.
    JobOpened(JobId),
    /// Recruiter went back to their job list.
    JobClosed,
    ApplyClicked(JobId),
    SaveClicked(JobId),
    StatusUpdateSubmitted(StatusUpdate),
    JobSubmitted(JobDraft),
    MeetingSubmitted(MeetingDraft),
    /// Re-issue the last mutation that failed with a retryable error.
    RetryClicked,
    LoginSubmitted(LoginForm),
    RegistrationSubmitted(RegistrationForm),
    LoginSettled(Result<Role, String>),
    RegistrationSettled(Result<Role, String>),
    LogoutClicked,
    FeedFetched {
        request: FetchRequest<FeedTab>,
        outcome: FetchOutcome<JobListing>,
    },
    RecruiterJobsFetched {
        request: FetchRequest<()>,
        outcome: FetchOutcome<Job>,
    },
    ApplicationsFetched {
        request: FetchRequest<JobId>,
        outcome: FetchOutcome<Application>,
    },
    MeetingsFetched {
        request: FetchRequest<JobId>,
        outcome: FetchOutcome<Meeting>,
    },
    MutationSettled {
        ticket: MutationTicket,
        result: Result<(), MutationFailure>,
    },
}
