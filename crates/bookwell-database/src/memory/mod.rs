//! In-process store backend.
//!
//! Keeps all tables behind a single async `RwLock` and serializes bookings
//! with one async mutex per window. Used for local runs and tests.

pub mod store;

pub use store::MemoryStore;
