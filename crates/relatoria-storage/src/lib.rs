//! relatoria-storage
//!
//! Object storage for report PDFs and dataset files. Thin wrapper around the
//! backend's storage REST API.

pub mod error;
pub mod memory;
pub mod objects;

use relatoria_core::BoxFuture;
use relatoria_core::locator::ObjectLocator;

use crate::error::StorageError;

/// Binary artifacts addressed by bucket + key.
pub trait ObjectStore: Send + Sync {
    /// Remove one object. Removing an object that does not exist is not an error.
    fn remove<'a>(&'a self, locator: &'a ObjectLocator) -> BoxFuture<'a, Result<(), StorageError>>;
}
