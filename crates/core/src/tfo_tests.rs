use super::*;

#[test]
fn not_negotiated_by_default() {
    assert!(!TfoFields::default().negotiated());
}

#[test]
fn negotiated_once_ackkind_set() {
    let fields = TfoFields {
        tfo_ackkind: 34,
        ..Default::default()
    };
    assert!(fields.negotiated());
}
