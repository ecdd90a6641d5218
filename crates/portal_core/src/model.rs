use std::fmt;

pub type JobId = u64;
pub type ApplicationId = u64;
pub type MeetingId = u64;

/// A posted role as the portals display it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub deadline: Option<String>,
    pub kind: Option<String>,
    pub location: Option<String>,
    pub status: Option<String>,
    pub stipend: Option<i64>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationStatus {
    Applied,
    NextRound,
    Selected,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    /// Statuses a recruiter may assign from the review dialog.
    pub const REVIEW_CHOICES: [ApplicationStatus; 3] = [
        ApplicationStatus::NextRound,
        ApplicationStatus::Selected,
        ApplicationStatus::Rejected,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Applied" | "APPLIED" => Self::Applied,
            "NextRound" | "NEXTROUND" | "NEXT_ROUND" => Self::NextRound,
            "Selected" | "SELECTED" => Self::Selected,
            "Rejected" | "REJECTED" => Self::Rejected,
            other => Self::Other(other.to_string()),
        }
    }

    /// Wire value understood by the status endpoint.
    pub fn as_wire(&self) -> &str {
        match self {
            Self::Applied => "Applied",
            Self::NextRound => "NextRound",
            Self::Selected => "Selected",
            Self::Rejected => "Rejected",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_review_choice(&self) -> bool {
        Self::REVIEW_CHOICES.contains(self)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Applied => write!(f, "Applied"),
            Self::NextRound => write!(f, "Next round"),
            Self::Selected => write!(f, "Approved"),
            Self::Rejected => write!(f, "Rejected"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}

/// The candidate's relationship to a job, present on applied/saved entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationSummary {
    pub id: ApplicationId,
    pub status: Option<ApplicationStatus>,
    pub saved: bool,
    pub applied: bool,
}

/// One entry of the candidate job feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobListing {
    pub job: Job,
    pub application: Option<ApplicationSummary>,
}

impl JobListing {
    pub fn bare(job: Job) -> Self {
        Self {
            job,
            application: None,
        }
    }

    pub fn already_applied(&self) -> bool {
        self.application.as_ref().is_some_and(|app| app.applied)
    }

    pub fn is_saved(&self) -> bool {
        self.application.as_ref().is_some_and(|app| app.saved)
    }
}

/// An application as seen from the recruiter workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub status: Option<ApplicationStatus>,
    pub score: Option<f64>,
    pub applied_on: Option<String>,
    pub candidate_email: String,
    pub resume: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    pub id: MeetingId,
    pub job_id: JobId,
    pub candidate: Option<String>,
    pub time: Option<String>,
    pub zoom_link: Option<String>,
}

/// Splits a comma separated skill list, dropping blanks.
pub fn split_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|skill| !skill.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}
