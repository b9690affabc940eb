//! Registration and login.

use crate::domain::{NewUser, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthError, PasswordService, UserRepository};

/// Register a new account. The caller is not logged in afterwards.
pub async fn register(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    username: &str,
    password: &str,
) -> Result<User, DomainError> {
    if username.is_empty() {
        return Err(DomainError::validation("Username is required."));
    }
    if password.is_empty() {
        return Err(DomainError::validation("Password is required."));
    }

    if users.find_by_username(username).await?.is_some() {
        return Err(already_registered(username));
    }

    let password_hash = passwords.hash(password)?;

    // The unique index still guards against a concurrent registration.
    let user = users
        .create(NewUser::new(username, password_hash))
        .await
        .map_err(|e| match e {
            RepoError::Constraint(_) => already_registered(username),
            other => other.into(),
        })?;

    tracing::info!(user_id = user.id, "User registered");
    Ok(user)
}

/// Check credentials and return the matching account.
pub async fn authenticate(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    username: &str,
    password: &str,
) -> Result<User, DomainError> {
    let user = users
        .find_by_username(username)
        .await?
        .ok_or(AuthError::IncorrectUsername)?;

    if !passwords.verify(password, &user.password_hash)? {
        tracing::debug!(user_id = user.id, "Password mismatch");
        return Err(AuthError::IncorrectPassword.into());
    }

    Ok(user)
}

fn already_registered(username: &str) -> DomainError {
    DomainError::validation(format!("User {username} is already registered."))
}
