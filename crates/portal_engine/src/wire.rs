//! JSON shapes exchanged with the hiring backend.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub id: u64,
    #[serde(default, alias = "title")]
    pub job_title: String,
    #[serde(default, alias = "description")]
    pub job_description: String,
    /// Comma separated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stipend: Option<i64>,
    #[serde(default, skip_serializing)]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing)]
    pub is_applied: Option<bool>,
    #[serde(default, skip_serializing)]
    pub is_saved: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct JobseekerRecord {
    #[serde(default)]
    pub email: String,
    /// Base64 encoded by the server; only its presence matters here.
    #[serde(default)]
    pub resume: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub job: Option<JobRecord>,
    #[serde(default)]
    pub jobseeker: Option<JobseekerRecord>,
    #[serde(default)]
    pub application_status: Option<String>,
    /// Feed entries carry a display status next to the enum one.
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub saved: Option<bool>,
    #[serde(default)]
    pub is_applied: Option<bool>,
    #[serde(default)]
    pub applied_on: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingRecord {
    #[serde(default, skip_serializing_if = "is_unset")]
    pub id: u64,
    #[serde(default)]
    pub job: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom_link: Option<String>,
}

fn is_unset(id: &u64) -> bool {
    *id == 0
}

/// One page of a collection after defaults are applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
struct PageResponse<T> {
    #[serde(default)]
    content: Option<Vec<T>>,
    #[serde(default)]
    total_pages: Option<u32>,
}

impl<T> PageResponse<T> {
    fn into_page(self, missing_total_pages: u32) -> Page<T> {
        Page {
            items: self.content.unwrap_or_default(),
            total_pages: self.total_pages.unwrap_or(missing_total_pages),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Jobs(Page<JobRecord>),
    Applications(Page<ApplicationRecord>),
    Meetings(Page<MeetingRecord>),
}

impl PageBody {
    pub fn total_pages(&self) -> u32 {
        match self {
            PageBody::Jobs(page) => page.total_pages,
            PageBody::Applications(page) => page.total_pages,
            PageBody::Meetings(page) => page.total_pages,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PageBody::Jobs(page) => page.items.len(),
            PageBody::Applications(page) => page.items.len(),
            PageBody::Meetings(page) => page.items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A paginated resource of the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    OpenJobs,
    AppliedJobs,
    SavedJobs,
    RecruiterJobs,
    Applications { job: u64 },
    Meetings { job: u64 },
}

impl Collection {
    pub fn path(&self) -> String {
        match self {
            Collection::OpenJobs => "/jobseeker/jobs".to_string(),
            Collection::AppliedJobs => "/jobseeker/applied".to_string(),
            Collection::SavedJobs => "/jobseeker/saved".to_string(),
            Collection::RecruiterJobs => "/recruiter/get".to_string(),
            Collection::Applications { job } => format!("/recruiter/get_applications/{job}"),
            Collection::Meetings { job } => format!("/recruiter/getMeeting/{job}"),
        }
    }

    /// Page count assumed when the response omits `totalPages`.
    pub fn missing_total_pages(&self) -> u32 {
        match self {
            Collection::OpenJobs | Collection::AppliedJobs | Collection::SavedJobs => 0,
            Collection::RecruiterJobs
            | Collection::Applications { .. }
            | Collection::Meetings { .. } => 1,
        }
    }

    pub(crate) fn decode(&self, body: &[u8]) -> Result<PageBody, serde_json::Error> {
        let missing = self.missing_total_pages();
        Ok(match self {
            Collection::OpenJobs | Collection::RecruiterJobs => {
                PageBody::Jobs(parse_page(body, missing)?)
            }
            Collection::AppliedJobs | Collection::SavedJobs | Collection::Applications { .. } => {
                PageBody::Applications(parse_page(body, missing)?)
            }
            Collection::Meetings { .. } => PageBody::Meetings(parse_page(body, missing)?),
        })
    }
}

fn parse_page<T: DeserializeOwned>(
    body: &[u8],
    missing_total_pages: u32,
) -> Result<Page<T>, serde_json::Error> {
    let response: PageResponse<T> = serde_json::from_slice(body)?;
    Ok(response.into_page(missing_total_pages))
}

/// A mutating request.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Apply {
        job: u64,
    },
    Save {
        job: u64,
    },
    UpdateStatus {
        application: u64,
        status: String,
        note: String,
        meeting: MeetingRecord,
    },
    CreateJob(JobRecord),
    CreateMeeting(MeetingRecord),
}

impl ApiCall {
    pub fn label(&self) -> &'static str {
        match self {
            ApiCall::Apply { .. } => "apply",
            ApiCall::Save { .. } => "save",
            ApiCall::UpdateStatus { .. } => "update-status",
            ApiCall::CreateJob(_) => "create-job",
            ApiCall::CreateMeeting(_) => "create-meeting",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterSignup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub current_position: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub skills: Vec<String>,
}

/// Sent as a multipart form: a `user` JSON part plus the `resume` file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSignup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub skills: Vec<String>,
    #[serde(skip)]
    pub resume_name: String,
    #[serde(skip)]
    pub resume: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signup {
    Recruiter(RecruiterSignup),
    Candidate(CandidateSignup),
}

impl Signup {
    pub fn credentials(&self) -> Credentials {
        let (email, password) = match self {
            Signup::Recruiter(form) => (&form.email, &form.password),
            Signup::Candidate(form) => (&form.email, &form.password),
        };
        Credentials {
            email: email.clone(),
            password: password.clone(),
        }
    }
}

/// Token handed out by `/user/login`. Also the persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionGrant {
    pub token: String,
    pub role: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionGrant {
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        !self.token.is_empty() && self.expires_at.is_none_or(|expiry| expiry > now)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JwtResponse {
    #[serde(default)]
    jwt_token: Option<String>,
    #[serde(default)]
    expiry_date: Option<serde_json::Value>,
    #[serde(default)]
    role: Option<String>,
}

impl JwtResponse {
    /// `None` when the server answered without a token.
    pub(crate) fn into_grant(self) -> Option<SessionGrant> {
        let token = self.jwt_token.filter(|token| !token.trim().is_empty())?;
        Some(SessionGrant {
            token,
            role: self.role.unwrap_or_default(),
            expires_at: self.expiry_date.as_ref().and_then(parse_expiry),
        })
    }
}

/// The backend serializes `Date` either as epoch millis or as text.
fn parse_expiry(value: &serde_json::Value) -> Option<DateTime<Utc>> {
    match value {
        serde_json::Value::Number(millis) => {
            DateTime::from_timestamp_millis(millis.as_i64()?)
        }
        serde_json::Value::String(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Some(parsed.with_timezone(&Utc));
            }
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
                return Some(naive.and_utc());
            }
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(23, 59, 59))
                .map(|naive| naive.and_utc())
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_per_collection() {
        let feed = Collection::OpenJobs.decode(b"{}").expect("decodes");
        assert_eq!(feed, PageBody::Jobs(Page::default()));

        let jobs = Collection::RecruiterJobs.decode(b"{}").expect("decodes");
        assert_eq!(jobs.total_pages(), 1);
        assert!(jobs.is_empty());
    }

    #[test]
    fn null_content_is_empty() {
        let body = br#"{"content": null, "totalPages": 2}"#;
        let page = Collection::Meetings { job: 4 }.decode(body).expect("decodes");
        assert_eq!(page.total_pages(), 2);
        assert!(page.is_empty());
    }

    #[test]
    fn expiry_accepts_millis_and_text() {
        let millis = serde_json::json!(1_700_000_000_000_i64);
        assert_eq!(
            parse_expiry(&millis).map(|dt| dt.timestamp()),
            Some(1_700_000_000)
        );
        let text = serde_json::json!("2026-01-02T03:04:05Z");
        assert!(parse_expiry(&text).is_some());
        assert!(parse_expiry(&serde_json::json!(true)).is_none());
    }

    #[test]
    fn grant_without_token_is_rejected() {
        let response: JwtResponse =
            serde_json::from_str(r#"{"jwtToken": " ", "role": "RECRUITER"}"#).expect("json");
        assert!(response.into_grant().is_none());
    }

    #[test]
    fn job_draft_omits_server_fields() {
        let job = JobRecord {
            job_title: "Platform engineer".to_string(),
            kind: Some("Full-time".to_string()),
            ..JobRecord::default()
        };
        let json = serde_json::to_value(&job).expect("serializes");
        assert_eq!(json["jobTitle"], "Platform engineer");
        assert_eq!(json["type"], "Full-time");
        assert!(json.get("id").is_none());
        assert!(json.get("isApplied").is_none());
    }
}
