//! Authentication module
//!
//! - [`JwtService`]: token issue/validation
//! - [`CurrentUser`]: caller identity
//! - [`attach_user`]: identity-attaching middleware

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use extractor::CurrentUser;
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::attach_user;
