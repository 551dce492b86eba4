use relatoria_auth::bearer::token_from_header;
use relatoria_auth::error::AuthError;
use relatoria_auth::static_tokens::StaticTokens;
use relatoria_auth::AuthVerifier;

#[test]
fn bearer_prefix_and_whitespace_are_stripped() {
    assert_eq!(token_from_header(Some("Bearer abc.def ")).unwrap(), "abc.def");
}

#[test]
fn missing_header() {
    assert!(matches!(token_from_header(None), Err(AuthError::MissingHeader)));
}

#[test]
fn empty_token() {
    assert!(matches!(
        token_from_header(Some("Bearer    ")),
        Err(AuthError::MissingToken)
    ));
}

#[tokio::test]
async fn static_tokens_lookup() {
    let tokens = StaticTokens::new().with_user("t1", "u1");
    assert_eq!(tokens.verify("t1").await.unwrap().id, "u1");
    assert!(tokens.verify("t2").await.unwrap_err().is_rejection());
}
