use super::*;
use crate::net::types::SignInMethod;

fn pilot() -> Identity {
    Identity {
        uid: "u1".to_owned(),
        email: Some("pilot@fleet.test".to_owned()),
        display_name: None,
        provider: SignInMethod::Password,
    }
}

#[test]
fn session_defaults_to_unknown() {
    assert_eq!(Session::default(), Session::Unknown);
    assert!(!Session::default().is_resolved());
}

#[test]
fn from_identity_maps_none_to_absent() {
    assert_eq!(Session::from_identity(None), Session::Absent);
    assert_eq!(Session::from_identity(Some(pilot())), Session::Present(pilot()));
}

#[test]
fn resolved_states_report_resolved() {
    assert!(Session::Absent.is_resolved());
    assert!(Session::Present(pilot()).is_resolved());
}

#[test]
fn identity_only_present_when_signed_in() {
    assert_eq!(Session::Unknown.identity(), None);
    assert_eq!(Session::Absent.identity(), None);
    assert_eq!(Session::Present(pilot()).identity().map(|i| i.uid.as_str()), Some("u1"));
}
