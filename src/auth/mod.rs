pub mod claims;
pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod policy;

pub use claims::SessionUser;
pub use extractors::{Caller, RequireAdmin};
pub use jwt::JwtKeys;
