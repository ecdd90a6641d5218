//! Portal core: pure state machine and view-model helpers for the hiring portals.
mod controller;
mod coordinator;
mod effect;
mod forms;
mod model;
mod msg;
mod session;
mod state;
mod update;
mod view_model;

pub use controller::{CollectionController, FetchFailure, FetchOutcome, FetchRequest};
pub use coordinator::{
    ErrorClass, Mutation, MutationCoordinator, MutationFailure, MutationKey, MutationTicket,
    Notice, NoticeLevel, RefreshTarget, Settlement,
};
pub use effect::Effect;
pub use forms::{
    FormError, JobDraft, LoginForm, MeetingDraft, MeetingPayload, RegistrationForm, ResumeFile,
    SkillList, StatusUpdate, MAX_RESUME_BYTES, MIN_PASSWORD_LENGTH,
};
pub use model::{
    split_skills, Application, ApplicationId, ApplicationStatus, ApplicationSummary, Job, JobId,
    JobListing, Meeting, MeetingId,
};
pub use msg::Msg;
pub use session::{GateDecision, Portal, Role, Route, SessionGate, SessionStatus};
pub use state::{ActiveList, AppState, FeedTab, JobTab, Screen, WorkspaceFocus};
pub use update::update;
pub use view_model::{AppViewModel, CardView, ListView, TabView, ToCard};
