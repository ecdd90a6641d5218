use portal_core::{GateDecision, Portal, Role, Route, SessionGate, SessionStatus};

#[test]
fn anonymous_users_are_sent_home_from_protected_portals() {
    let status = SessionStatus::anonymous();
    assert_eq!(
        SessionGate::check(&status, Portal::CandidateSearch),
        GateDecision::Redirect(Route::Home)
    );
    assert_eq!(
        SessionGate::check(&status, Portal::RecruiterWorkspace),
        GateDecision::Redirect(Route::Home)
    );
    assert_eq!(SessionGate::check(&status, Portal::Entry), GateDecision::Proceed);
}

#[test]
fn signed_in_users_skip_the_entry_page() {
    assert_eq!(
        SessionGate::check(&SessionStatus::signed_in(Role::Candidate), Portal::Entry),
        GateDecision::Redirect(Route::JobSearch)
    );
    assert_eq!(
        SessionGate::check(&SessionStatus::signed_in(Role::Recruiter), Portal::Entry),
        GateDecision::Redirect(Route::JobManagement)
    );
}

#[test]
fn role_mismatch_redirects_to_own_home() {
    assert_eq!(
        SessionGate::check(
            &SessionStatus::signed_in(Role::Candidate),
            Portal::RecruiterWorkspace
        ),
        GateDecision::Redirect(Route::JobSearch)
    );
    assert_eq!(
        SessionGate::check(&SessionStatus::signed_in(Role::Recruiter), Portal::CandidateSearch),
        GateDecision::Redirect(Route::JobManagement)
    );
}

#[test]
fn matching_role_proceeds() {
    assert_eq!(
        SessionGate::check(&SessionStatus::signed_in(Role::Candidate), Portal::CandidateSearch),
        GateDecision::Proceed
    );
}

#[test]
fn roles_parse_case_insensitively() {
    assert_eq!("candidate".parse::<Role>(), Ok(Role::Candidate));
    assert_eq!(" RECRUITER ".parse::<Role>(), Ok(Role::Recruiter));
    assert!("ADMIN".parse::<Role>().is_err());
    assert_eq!(Route::JobSearch.portal(), Portal::CandidateSearch);
}
