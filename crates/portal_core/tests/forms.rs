use portal_core::{
    ApplicationStatus, FormError, JobDraft, LoginForm, MeetingDraft, RegistrationForm,
    ResumeFile, Role, SkillList, StatusUpdate, MAX_RESUME_BYTES,
};

fn candidate() -> RegistrationForm {
    RegistrationForm {
        role: Role::Candidate,
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        password: "correct horse".to_string(),
        confirm_password: "correct horse".to_string(),
        skills: SkillList::default(),
        company: None,
        current_position: None,
        linkedin: None,
        resume: Some(ResumeFile {
            file_name: "ada.pdf".to_string(),
            bytes: vec![0x25, 0x50, 0x44, 0x46],
        }),
    }
}

#[test]
fn complete_candidate_form_is_valid() {
    assert_eq!(candidate().validate(), Ok(()));
}

#[test]
fn short_or_mismatched_passwords_are_rejected() {
    let mut form = candidate();
    form.password = "short".to_string();
    form.confirm_password = "short".to_string();
    assert_eq!(form.validate(), Err(FormError::PasswordTooShort { min: 8 }));

    let mut form = candidate();
    form.confirm_password = "different horse".to_string();
    assert_eq!(form.validate(), Err(FormError::PasswordMismatch));
}

#[test]
fn candidate_needs_a_resume_under_the_limit() {
    let mut form = candidate();
    form.resume = None;
    assert_eq!(form.validate(), Err(FormError::ResumeRequired));

    let mut form = candidate();
    form.resume = Some(ResumeFile {
        file_name: "huge.pdf".to_string(),
        bytes: vec![0; MAX_RESUME_BYTES + 1],
    });
    assert!(matches!(form.validate(), Err(FormError::ResumeTooLarge { .. })));
}

#[test]
fn recruiter_needs_company_and_position_but_no_resume() {
    let mut form = candidate();
    form.role = Role::Recruiter;
    form.resume = None;
    assert_eq!(form.validate(), Err(FormError::MissingField("company")));

    form.company = Some("Lumenhire".to_string());
    form.current_position = Some("Talent lead".to_string());
    assert_eq!(form.validate(), Ok(()));
}

#[test]
fn skill_list_rejects_blank_and_duplicate_entries() {
    let mut skills = SkillList::default();
    skills.add(" rust ").expect("first skill");
    assert_eq!(skills.add("rust"), Err(FormError::DuplicateSkill("rust".into())));
    assert_eq!(skills.add("   "), Err(FormError::BlankSkill));
    skills.add("sql").expect("second skill");
    skills.remove("rust");
    assert_eq!(skills.as_slice(), &["sql".to_string()]);
}

#[test]
fn login_requires_both_fields() {
    let form = LoginForm {
        email: "ada@example.com".to_string(),
        password: String::new(),
    };
    assert_eq!(form.validate(), Err(FormError::MissingField("password")));
}

#[test]
fn job_draft_checks_deadline_format() {
    let mut draft = JobDraft::new("Backend engineer", "Own the API", "Berlin").with_skills("rust, postgres");
    assert_eq!(draft.skills, vec!["rust".to_string(), "postgres".to_string()]);
    draft.deadline = Some("31/12/2026".to_string());
    assert_eq!(
        draft.validate(),
        Err(FormError::InvalidDate("31/12/2026".to_string()))
    );
    draft.deadline = Some("2025-04-31".to_string());
    assert_eq!(
        draft.validate(),
        Err(FormError::InvalidDate("2025-04-31".to_string()))
    );
    draft.deadline = Some("2026-12-31".to_string());
    assert_eq!(draft.validate(), Ok(()));
}

#[test]
fn meeting_link_must_be_http() {
    let mut draft = MeetingDraft {
        job: 3,
        candidate: None,
        time: "2026-11-02T10:00".to_string(),
        zoom_link: "ftp://zoom.example.com/j/1".to_string(),
    };
    assert!(matches!(draft.validate(), Err(FormError::InvalidLink(_))));
    draft.zoom_link = "https://zoom.example.com/j/1".to_string();
    assert_eq!(draft.validate(), Ok(()));
}

#[test]
fn status_update_only_accepts_review_choices() {
    let update = StatusUpdate {
        application: 1,
        job: 2,
        candidate: "ada@example.com".to_string(),
        status: ApplicationStatus::Applied,
        note: String::new(),
    };
    assert!(matches!(update.validate(), Err(FormError::InvalidStatus(_))));
    assert_eq!(update.meeting().candidate, "ada@example.com");
}
