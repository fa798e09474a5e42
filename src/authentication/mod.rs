//! Bearer tokens, session cookies and the login flow.

pub mod domain;
pub mod http;
mod jwt;

pub use jwt::{DynTokenService, JwtTokenService, TokenError, TokenService};
