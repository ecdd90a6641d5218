//! Portal engine: REST client, session persistence and request execution.
mod client;
mod engine;
mod session_store;
mod types;
mod wire;

pub use client::{ApiSettings, PortalApi, ReqwestPortalApi};
pub use engine::EngineHandle;
pub use session_store::{SessionStore, SessionStoreError};
pub use types::{ApiError, EngineEvent, FailureKind, RequestId};
pub use wire::{
    ApiCall, ApplicationRecord, CandidateSignup, Collection, Credentials, JobRecord,
    JobseekerRecord, MeetingRecord, Page, PageBody, RecruiterSignup, SessionGrant, Signup,
};
