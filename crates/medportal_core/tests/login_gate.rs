use medportal_core::{
    GateState, KeyValueStore, LoginConfig, LoginGate, LoginOutcome, MemoryKeyValueStore,
    SESSION_FLAG_KEY,
};

fn flag(session: &MemoryKeyValueStore) -> Option<String> {
    session.get_item(SESSION_FLAG_KEY).unwrap()
}

#[test]
fn unconfigured_gate_is_bypassed_on_load() {
    let gate = LoginGate::new(None, Some("   "));
    let session = MemoryKeyValueStore::new();

    let state = gate.on_load(&session);
    assert_eq!(state, GateState::Bypassed);
    assert!(!state.modal_visible());
    assert_eq!(flag(&session).as_deref(), Some("true"));
}

#[test]
fn unconfigured_gate_bypasses_submit_without_password() {
    let gate = LoginGate::from_config(&LoginConfig::default());
    let session = MemoryKeyValueStore::new();
    let outcome = gate.submit("", &session);
    assert_eq!(outcome, LoginOutcome::Bypassed);
    assert!(!outcome.modal_visible());
    assert_eq!(flag(&session).as_deref(), Some("true"));
}

#[test]
fn either_trimmed_secret_grants_access() {
    let gate = LoginGate::new(Some("  Clave2024 "), Some("respaldo"));
    let session = MemoryKeyValueStore::new();
    assert_eq!(gate.on_load(&session), GateState::LoginRequired);

    assert_eq!(gate.submit("respaldo", &session), LoginOutcome::Granted);
    assert_eq!(gate.on_load(&session), GateState::Authenticated);

    gate.logout(&session);
    assert_eq!(flag(&session), None);
    assert_eq!(gate.submit("Clave2024", &session), LoginOutcome::Granted);
}

#[test]
fn comparison_is_case_sensitive_and_never_locks_out() {
    let gate = LoginGate::new(Some("Clave2024"), None);
    let session = MemoryKeyValueStore::new();

    for _ in 0..10 {
        let outcome = gate.submit("clave2024", &session);
        assert!(matches!(outcome, LoginOutcome::Rejected { shake: true, .. }));
        assert!(outcome.modal_visible());
    }
    assert_eq!(flag(&session), None);
    assert!(gate.submit("Clave2024", &session).is_authenticated());
}

#[test]
fn empty_password_is_blocked_locally() {
    let gate = LoginGate::new(Some("Clave2024"), None);
    let session = MemoryKeyValueStore::new();
    let outcome = gate.submit("", &session);
    assert!(matches!(outcome, LoginOutcome::EmptyPassword { .. }));
    assert_eq!(flag(&session), None);
}

#[test]
fn whitespace_only_password_gets_hint_not_shake() {
    let gate = LoginGate::new(Some("Clave2024"), None);
    let session = MemoryKeyValueStore::new();

    let outcome = gate.submit("   \t", &session);
    assert!(matches!(outcome, LoginOutcome::EmptyPassword { .. }));
    assert_eq!(flag(&session), None);

    let outcome = gate.submit(" Clave2024 ", &session);
    assert!(matches!(outcome, LoginOutcome::Rejected { shake: true, .. }));
}
