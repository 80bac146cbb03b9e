//! Well-known role name constants carried in access tokens.

pub const ROLE_ADMIN: &str = "admin";
