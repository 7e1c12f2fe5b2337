//! Bearer token encoding, decoding and lifecycle.

pub mod claims;
pub mod decoder;
pub mod encoder;
pub mod service;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};
pub use service::TokenService;
