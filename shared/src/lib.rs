//! Credential Service Shared Library
//!
//! Request and response types for the credential service API, plus the
//! input validation applied to them. Clients can depend on this crate to
//! speak the same wire format as the backend.

pub mod types;
pub mod validation;

// Re-export commonly used items
pub use types::*;
