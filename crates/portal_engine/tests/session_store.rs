use std::fs;

use chrono::{Duration, TimeZone, Utc};
use portal_engine::{SessionGrant, SessionStore};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn grant(expires_in: Option<Duration>) -> SessionGrant {
    let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
    SessionGrant {
        token: "jwt-abc".to_string(),
        role: "RECRUITER".to_string(),
        expires_at: expires_in.map(|delta| now + delta),
    }
}

#[test]
fn missing_file_means_signed_out() {
    let temp = TempDir::new().unwrap();
    let store = SessionStore::new(temp.path().join("session.ron"));

    assert_eq!(store.load().unwrap(), None);
    assert_eq!(store.load_active(Utc::now()), None);
}

#[test]
fn saved_session_round_trips_and_replaces_previous() {
    let temp = TempDir::new().unwrap();
    let store = SessionStore::new(temp.path().join("nested").join("session.ron"));

    store.save(&grant(Some(Duration::hours(1)))).unwrap();
    let mut second = grant(None);
    second.token = "jwt-def".to_string();
    store.save(&second).unwrap();

    assert_eq!(store.load().unwrap(), Some(second));
    let leftovers = fs::read_dir(temp.path().join("nested")).unwrap().count();
    assert_eq!(leftovers, 1);
}

#[test]
fn expired_session_is_not_active() {
    let temp = TempDir::new().unwrap();
    let store = SessionStore::new(temp.path().join("session.ron"));
    let saved = grant(Some(Duration::minutes(30)));
    store.save(&saved).unwrap();
    let expiry = saved.expires_at.unwrap();

    assert_eq!(store.load_active(expiry - Duration::minutes(1)), Some(saved));
    assert_eq!(store.load_active(expiry + Duration::minutes(1)), None);
}

#[test]
fn corrupt_file_counts_as_signed_out() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("session.ron");
    fs::write(&path, "not ron at all {").unwrap();
    let store = SessionStore::new(&path);

    assert!(store.load().is_err());
    assert_eq!(store.load_active(Utc::now()), None);
}

#[test]
fn clear_removes_file_and_tolerates_missing() {
    let temp = TempDir::new().unwrap();
    let store = SessionStore::new(temp.path().join("session.ron"));
    store.save(&grant(None)).unwrap();

    store.clear().unwrap();
    assert!(!store.path().exists());
    store.clear().unwrap();
}
