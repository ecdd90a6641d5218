use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Candidate,
    Recruiter,
}

impl Role {
    pub fn as_wire(self) -> &'static str {
        match self {
            Role::Candidate => "CANDIDATE",
            Role::Recruiter => "RECRUITER",
        }
    }

    /// Where a signed-in user of this role lands.
    pub fn home(self) -> Route {
        match self {
            Role::Candidate => Route::JobSearch,
            Role::Recruiter => Route::JobManagement,
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CANDIDATE" | "JOBSEEKER" => Ok(Role::Candidate),
            "RECRUITER" => Ok(Role::Recruiter),
            other => Err(format!("unknown role {other}")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Answer of the check-login / check-role pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStatus {
    pub logged_in: bool,
    pub role: Option<Role>,
}

impl SessionStatus {
    pub fn signed_in(role: Role) -> Self {
        Self {
            logged_in: true,
            role: Some(role),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Portal {
    /// Login / sign-up entry point.
    Entry,
    CandidateSearch,
    RecruiterWorkspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    JobSearch,
    JobManagement,
}

impl Route {
    pub fn portal(self) -> Portal {
        match self {
            Route::Home => Portal::Entry,
            Route::JobSearch => Portal::CandidateSearch,
            Route::JobManagement => Portal::RecruiterWorkspace,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::JobSearch => "/Jobsearch",
            Route::JobManagement => "/Jobmanagement",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Redirect(Route),
}

/// Check-then-branch run once each time a portal view is activated.
pub struct SessionGate;

impl SessionGate {
    pub fn check(status: &SessionStatus, portal: Portal) -> GateDecision {
        match portal {
            Portal::Entry => {
                if status.logged_in {
                    // Unknown role falls through to the workspace, as the login page does.
                    GateDecision::Redirect(status.role.map_or(Route::JobManagement, Role::home))
                } else {
                    GateDecision::Proceed
                }
            }
            Portal::CandidateSearch => Self::protected(status, Role::Candidate),
            Portal::RecruiterWorkspace => Self::protected(status, Role::Recruiter),
        }
    }

    fn protected(status: &SessionStatus, required: Role) -> GateDecision {
        if !status.logged_in {
            return GateDecision::Redirect(Route::Home);
        }
        match status.role {
            Some(role) if role != required => GateDecision::Redirect(role.home()),
            _ => GateDecision::Proceed,
        }
    }
}
