//! Object-store locator conventions.
//!
//! Pure string functions. An object is addressed by a bucket plus an
//! in-bucket key; rows store that pair as `bucket/key`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const DEFAULT_PDF_BUCKET: &str = "reports";

pub const DATASET_BUCKET: &str = "datasets";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectLocator {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocator {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// The form written to `pdf_path`/`html_report_path` columns.
    pub fn to_stored_path(&self) -> String {
        format!("{}/{}", self.bucket, self.key)
    }

    /// Resolve a stored PDF path into a locator.
    ///
    /// A leading segment is only taken as the bucket when it names one of the
    /// known PDF buckets; any other path is a key inside the default bucket.
    ///
    /// Legacy paths whose prefix merely looks like a bucket (`pdf-files/x.pdf`)
    /// resolve to the default bucket with the whole path as key. Buckets that
    /// hold such paths must be listed in `PDF_BUCKETS`.
    pub fn resolve_pdf_path(path: &str, rules: &BucketRules) -> Result<Self, CoreError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(CoreError::InvalidPath(path.to_string()));
        }

        if let Some((first, rest)) = path.split_once('/')
            && !rest.is_empty()
            && rules.pdf_buckets.iter().any(|b| b == first)
        {
            return Ok(Self::new(first, rest));
        }

        Ok(Self::new(rules.default_pdf_bucket.clone(), path))
    }

    pub fn dataset_file(rules: &BucketRules, filename: &str) -> Self {
        Self::new(rules.dataset_bucket.clone(), filename)
    }
}

impl std::fmt::Display for ObjectLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

/// Which buckets hold which artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketRules {
    /// Bucket names recognised as the first segment of a stored PDF path.
    pub pdf_buckets: Vec<String>,
    pub default_pdf_bucket: String,
    pub dataset_bucket: String,
}

impl Default for BucketRules {
    fn default() -> Self {
        Self {
            pdf_buckets: vec![DEFAULT_PDF_BUCKET.to_string()],
            default_pdf_bucket: DEFAULT_PDF_BUCKET.to_string(),
            dataset_bucket: DATASET_BUCKET.to_string(),
        }
    }
}
