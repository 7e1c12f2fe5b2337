//! # bookwell-database
//!
//! Persistence for Bookwell. [`store`] defines the traits the services
//! depend on; [`repositories`] implements them on PostgreSQL and [`memory`]
//! implements them in process.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{BookingTransaction, HierarchyStore, RevocationStore, Stores, UserStore};
