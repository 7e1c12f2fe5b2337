//! # bookwell-auth
//!
//! Identity and bearer-token handling for Bookwell.
//!
//! ## Modules
//!
//! - `credentials`: user lookup, registration and password verification
//! - `jwt`: signed token issuance and validation
//! - `password`: Argon2id password hashing
//! - `revocation`: the revoked-token list with an in-process cache

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod revocation;

pub use credentials::CredentialStore;
pub use jwt::{Claims, IssuedToken, JwtDecoder, JwtEncoder, TokenService};
pub use password::PasswordHasher;
pub use revocation::RevocationList;
