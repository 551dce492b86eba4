//! relatoria-lifecycle
//!
//! Report lifecycle controller: how a report request is created, re-queued,
//! and removed, with an audit snapshot taken before every destructive step.

pub mod cleanup;
pub mod controller;
pub mod error;
pub mod guard;
