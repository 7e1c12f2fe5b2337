//! Registration, login, logout and account deletion.

pub mod service;

pub use service::{AccountService, AuthenticatedUser};
