//! relatoria-audit
//!
//! Application-level audit events for report lifecycle mutations.

pub mod events;
