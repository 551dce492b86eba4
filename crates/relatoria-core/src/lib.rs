//! relatoria-core
//!
//! Pure domain types and object-store locator conventions.
//! No network dependency. This is the shared vocabulary of the RelatorIA backend.

use std::future::Future;
use std::pin::Pin;

pub mod error;
pub mod locator;
pub mod models;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
