//! Credential use cases: registration and password change.

mod account_service;
mod actor;

pub use account_service::{AccountManager, AccountService};
pub use actor::ActorContext;
