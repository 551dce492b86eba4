use tracing::warn;

use relatoria_core::models::report::ReportRequest;

use crate::error::LifecycleError;

/// Ownership is the only authorization boundary: the caller must be the
/// report's `owner_id`, whatever they intend to do with it.
pub fn ensure_owner(report: &ReportRequest, caller_id: &str) -> Result<(), LifecycleError> {
    if report.is_owned_by(caller_id) {
        return Ok(());
    }

    warn!(
        report_id = %report.id,
        user_id = caller_id,
        owner_id = %report.owner_id,
        "caller is not the report owner"
    );
    Err(LifecycleError::Forbidden {
        report_id: report.id.clone(),
        user_id: caller_id.to_string(),
    })
}
