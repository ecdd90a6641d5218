//! Input validation for the dialogs and sign-up flows.
use chrono::NaiveDate;
use thiserror::Error;
use url::Url;

use crate::model::{split_skills, ApplicationId, ApplicationStatus, JobId};
use crate::session::Role;

pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("a resume is required")]
    ResumeRequired,
    #[error("resume is {actual} bytes, the limit is {max}")]
    ResumeTooLarge { max: usize, actual: usize },
    #[error("skill is blank")]
    BlankSkill,
    #[error("skill {0:?} was already added")]
    DuplicateSkill(String),
    #[error("{0:?} is not a YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("{0:?} is not an http(s) link")]
    InvalidLink(String),
    #[error("{0} cannot be assigned from the review dialog")]
    InvalidStatus(String),
}

fn require(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Ordered, duplicate-free skill list as built by the sign-up forms.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SkillList(Vec<String>);

impl SkillList {
    pub fn add(&mut self, raw: &str) -> Result<(), FormError> {
        let skill = raw.trim();
        if skill.is_empty() {
            return Err(FormError::BlankSkill);
        }
        if self.0.iter().any(|existing| existing == skill) {
            return Err(FormError::DuplicateSkill(skill.to_string()));
        }
        self.0.push(skill.to_string());
        Ok(())
    }

    pub fn remove(&mut self, skill: &str) {
        self.0.retain(|existing| existing != skill);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Resume passed through to the sign-up endpoint as a multipart file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationForm {
    pub role: Role,
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub skills: SkillList,
    pub company: Option<String>,
    pub current_position: Option<String>,
    pub linkedin: Option<String>,
    pub resume: Option<ResumeFile>,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.name, "name")?;
        require(&self.email, "email")?;
        if self.role == Role::Recruiter {
            require(self.company.as_deref().unwrap_or(""), "company")?;
            require(
                self.current_position.as_deref().unwrap_or(""),
                "current position",
            )?;
        }
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(FormError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        if self.role == Role::Candidate {
            let resume = self.resume.as_ref().ok_or(FormError::ResumeRequired)?;
            if resume.bytes.len() > MAX_RESUME_BYTES {
                return Err(FormError::ResumeTooLarge {
                    max: MAX_RESUME_BYTES,
                    actual: resume.bytes.len(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.email, "email")?;
        require(&self.password, "password")
    }
}

/// A new role posted from the recruiter workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub deadline: Option<String>,
    pub kind: Option<String>,
    pub location: String,
    pub status: String,
    pub stipend: u32,
}

impl JobDraft {
    pub fn new(title: impl Into<String>, description: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            skills: Vec::new(),
            deadline: None,
            kind: None,
            location: location.into(),
            status: "Open".to_string(),
            stipend: 0,
        }
    }

    pub fn with_skills(mut self, raw: &str) -> Self {
        self.skills = split_skills(raw);
        self
    }

    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.title, "title")?;
        require(&self.description, "description")?;
        require(&self.location, "location")?;
        if let Some(deadline) = &self.deadline {
            if !is_iso_date(deadline) {
                return Err(FormError::InvalidDate(deadline.clone()));
            }
        }
        Ok(())
    }
}

/// An interview slot for a job, optionally tied to one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingDraft {
    pub job: JobId,
    pub candidate: Option<String>,
    pub time: String,
    pub zoom_link: String,
}

impl MeetingDraft {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.time, "time")?;
        require(&self.zoom_link, "zoom link")?;
        match Url::parse(self.zoom_link.trim()) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(FormError::InvalidLink(self.zoom_link.clone())),
        }
    }
}

/// Meeting body attached to a status change. Only `job` and `candidate` are
/// filled; the server schedules the slot itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingPayload {
    pub job: JobId,
    pub candidate: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub application: ApplicationId,
    pub job: JobId,
    pub candidate: String,
    pub status: ApplicationStatus,
    pub note: String,
}

impl StatusUpdate {
    pub fn validate(&self) -> Result<(), FormError> {
        if !self.status.is_review_choice() {
            return Err(FormError::InvalidStatus(self.status.as_wire().to_string()));
        }
        Ok(())
    }

    pub fn meeting(&self) -> MeetingPayload {
        MeetingPayload {
            job: self.job,
            candidate: self.candidate.clone(),
        }
    }
}

/// Strict `YYYY-MM-DD` calendar date.
fn is_iso_date(raw: &str) -> bool {
    raw.len() == 10 && NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_ok()
}
