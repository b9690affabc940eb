//! Authentication ports: session tokens and password hashing.

/// Claims carried by a session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub user_id: i32,
    pub issued_at: i64,
    pub exp: i64,
}

/// Issues and verifies the signed value stored in the session cookie.
pub trait SessionTokenService: Send + Sync {
    /// Issue a fresh session token for a user.
    fn issue(&self, user_id: i32) -> Result<String, AuthError>;

    /// Verify a token's signature and expiry and decode its claims.
    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Session lifetime, used as the cookie's max age.
    fn ttl_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Incorrect username.")]
    IncorrectUsername,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
