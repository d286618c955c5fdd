//! HIR layer tests
//!
//! - Symbol index routing and lookups
//! - Service, operation and HTTP binding resolution
//! - Member type resolution and trait translation
//! - Diagnostics for malformed documents
//! - End-to-end scenarios and the fixture sweep

pub mod tests_index;
pub mod tests_members;
pub mod tests_resolver;
pub mod tests_rules;
