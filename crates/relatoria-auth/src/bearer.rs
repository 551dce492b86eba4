use crate::error::AuthError;

/// Extract the raw credential from an `Authorization` header value.
///
/// Strips a leading `Bearer ` and surrounding whitespace. A header without
/// the prefix is taken as the raw token.
pub fn token_from_header(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}
