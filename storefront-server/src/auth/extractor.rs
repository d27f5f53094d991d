//! Authenticated caller identity

use crate::auth::Claims;

/// The pre-validated identity of the caller, extracted from a JWT by the
/// [`attach_user`](crate::auth::attach_user) middleware and passed
/// explicitly into every mutating service call.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = std::num::ParseIntError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            id: claims.sub.parse()?,
            email: claims.email,
            name: claims.name,
            role: claims.role,
        })
    }
}
