//! Database repositories
//!
//! Provides data access layer for user records.

pub mod memory;
pub mod user;

pub use memory::InMemoryUserStore;
pub use user::{CreateUserError, NewUser, UserRecord, UserRepository, UserStore};
