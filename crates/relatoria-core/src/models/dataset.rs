use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::id::RecordId;

/// An uploaded data source.
///
/// Not owner-stamped: access is granted through the report request that
/// references it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub id: RecordId,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub sample_json: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
