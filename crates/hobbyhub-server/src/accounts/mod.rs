//! Account service.

mod error;
mod service;

pub use error::{AccountError, Operation};
pub use service::{AccountService, AccountSettings, LoginOutcome, LoginSource};
