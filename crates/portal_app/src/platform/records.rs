//! Conversions between backend records and portal types.

use portal_core::{
    split_skills, Application, ApplicationStatus, ApplicationSummary, Job, JobId, JobListing,
    Meeting, Mutation, RegistrationForm, Role,
};
use portal_engine::{
    ApiCall, ApplicationRecord, CandidateSignup, JobRecord, MeetingRecord, PageBody,
    RecruiterSignup, Signup,
};

pub(crate) fn job(record: JobRecord) -> Job {
    Job {
        id: record.id,
        title: record.job_title,
        description: record.job_description,
        skills: record.skills.as_deref().map(split_skills).unwrap_or_default(),
        deadline: record.deadline,
        kind: record.kind,
        location: record.location,
        status: record.status,
        stipend: record.stipend,
        company: record.company_name,
    }
}

fn listing_from_job(record: JobRecord) -> JobListing {
    let application = match (record.is_applied, record.is_saved) {
        (None, None) => None,
        (applied, saved) => Some(ApplicationSummary {
            id: 0,
            status: None,
            saved: saved.unwrap_or(false),
            applied: applied.unwrap_or(false),
        }),
    };
    JobListing {
        job: job(record),
        application,
    }
}

/// Applied/saved tab entries nest the job inside the application.
fn listing_from_application(record: ApplicationRecord) -> Option<JobListing> {
    let status = record
        .application_status
        .as_deref()
        .or(record.status.as_deref())
        .map(ApplicationStatus::parse);
    let applied = record
        .is_applied
        .unwrap_or(record.application_status.is_some());
    Some(JobListing {
        job: job(record.job?),
        application: Some(ApplicationSummary {
            id: record.id,
            status,
            saved: record.saved.unwrap_or(false),
            applied,
        }),
    })
}

fn application(record: ApplicationRecord, job_id: JobId) -> Application {
    let (candidate_email, resume) = record
        .jobseeker
        .map(|seeker| (seeker.email, seeker.resume))
        .unwrap_or_default();
    Application {
        id: record.id,
        job_id: record.job.map_or(job_id, |job| job.id),
        status: record
            .application_status
            .as_deref()
            .map(ApplicationStatus::parse),
        score: record.score,
        applied_on: record.applied_on,
        candidate_email,
        resume,
    }
}

fn meeting(record: MeetingRecord) -> Meeting {
    Meeting {
        id: record.id,
        job_id: record.job,
        candidate: record.candidate,
        time: record.time,
        zoom_link: record.zoom_link,
    }
}

pub(crate) fn feed_page(body: PageBody) -> Option<(Vec<JobListing>, u32)> {
    match body {
        PageBody::Jobs(page) => Some((
            page.items.into_iter().map(listing_from_job).collect(),
            page.total_pages,
        )),
        PageBody::Applications(page) => Some((
            page.items
                .into_iter()
                .filter_map(listing_from_application)
                .collect(),
            page.total_pages,
        )),
        PageBody::Meetings(_) => None,
    }
}

pub(crate) fn recruiter_jobs_page(body: PageBody) -> Option<(Vec<Job>, u32)> {
    match body {
        PageBody::Jobs(page) => Some((page.items.into_iter().map(job).collect(), page.total_pages)),
        _ => None,
    }
}

pub(crate) fn applications_page(body: PageBody, job_id: JobId) -> Option<(Vec<Application>, u32)> {
    match body {
        PageBody::Applications(page) => Some((
            page.items
                .into_iter()
                .map(|record| application(record, job_id))
                .collect(),
            page.total_pages,
        )),
        _ => None,
    }
}

pub(crate) fn meetings_page(body: PageBody) -> Option<(Vec<Meeting>, u32)> {
    match body {
        PageBody::Meetings(page) => Some((
            page.items.into_iter().map(meeting).collect(),
            page.total_pages,
        )),
        _ => None,
    }
}

pub(crate) fn api_call(mutation: &Mutation) -> ApiCall {
    match mutation {
        Mutation::ApplyToJob { job } => ApiCall::Apply { job: *job },
        Mutation::SaveJob { job } => ApiCall::Save { job: *job },
        Mutation::UpdateApplicationStatus(update) => {
            let payload = update.meeting();
            ApiCall::UpdateStatus {
                application: update.application,
                status: update.status.as_wire().to_string(),
                note: update.note.clone(),
                meeting: MeetingRecord {
                    job: payload.job,
                    candidate: Some(payload.candidate),
                    ..MeetingRecord::default()
                },
            }
        }
        Mutation::CreateJob(draft) => ApiCall::CreateJob(JobRecord {
            job_title: draft.title.trim().to_string(),
            job_description: draft.description.trim().to_string(),
            skills: Some(draft.skills.join(", ")),
            deadline: draft.deadline.clone(),
            kind: draft.kind.clone(),
            location: Some(draft.location.trim().to_string()),
            status: Some(draft.status.clone()),
            stipend: Some(i64::from(draft.stipend)),
            ..JobRecord::default()
        }),
        Mutation::CreateMeeting(draft) => ApiCall::CreateMeeting(MeetingRecord {
            job: draft.job,
            candidate: draft.candidate.clone(),
            time: Some(draft.time.trim().to_string()),
            zoom_link: Some(draft.zoom_link.trim().to_string()),
            ..MeetingRecord::default()
        }),
    }
}

pub(crate) fn signup(form: RegistrationForm) -> Signup {
    let skills = form.skills.into_vec();
    match form.role {
        Role::Recruiter => Signup::Recruiter(RecruiterSignup {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password,
            company_name: form.company.unwrap_or_default().trim().to_string(),
            current_position: form.current_position.unwrap_or_default().trim().to_string(),
            linkedin: form.linkedin.filter(|link| !link.trim().is_empty()),
            skills,
        }),
        Role::Candidate => {
            let (resume_name, resume) = form
                .resume
                .map(|file| (file.file_name, file.bytes))
                .unwrap_or_default();
            Signup::Candidate(CandidateSignup {
                name: form.name.trim().to_string(),
                email: form.email.trim().to_string(),
                password: form.password,
                skills,
                resume_name,
                resume,
            })
        }
    }
}
