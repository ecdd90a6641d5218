use crate::controller::FetchRequest;
use crate::coordinator::MutationTicket;
use crate::forms::{LoginForm, RegistrationForm};
use crate::model::JobId;
use crate::session::{Portal, Route};
use crate::state::FeedTab;

/// Work the shell must perform on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Run check-login / check-role and answer with `Msg::SessionChecked`.
    CheckSession { portal: Portal },
    Redirect(Route),
    FetchFeed(FetchRequest<FeedTab>),
    FetchRecruiterJobs(FetchRequest<()>),
    FetchApplications(FetchRequest<JobId>),
    FetchMeetings(FetchRequest<JobId>),
    Mutate(MutationTicket),
    Login(LoginForm),
    Register(RegistrationForm),
    ClearSession,
}
