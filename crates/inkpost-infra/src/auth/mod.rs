//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{JwtSessionService, SessionConfig};
pub use password::Argon2PasswordService;
