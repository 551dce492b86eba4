use relatoria_core::error::CoreError;
use relatoria_core::models::lead::{NewLead, is_valid_email};

#[test]
fn valid_lead_is_trimmed() {
    let lead = NewLead::parse(Some("  Ana "), Some(" ana@example.com ")).unwrap();
    assert_eq!(lead.name, "Ana");
    assert_eq!(lead.email, "ana@example.com");
}

#[test]
fn missing_fields_are_rejected() {
    assert_eq!(
        NewLead::parse(None, Some("ana@example.com")),
        Err(CoreError::MissingField("name and email"))
    );
    assert_eq!(
        NewLead::parse(Some("Ana"), Some("   ")),
        Err(CoreError::MissingField("name and email"))
    );
}

#[test]
fn malformed_email_is_rejected() {
    assert_eq!(
        NewLead::parse(Some("Ana"), Some("not-an-email")),
        Err(CoreError::InvalidEmail)
    );
}

#[test]
fn email_shape() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last@sub.example.com.br"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.com"));
    assert!(!is_valid_email("a@@b.com"));
    assert!(!is_valid_email("@b.com"));
}
