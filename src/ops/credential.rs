//! Credential resolvers: registration and login
//!
//! One state transition per username: Unregistered → Registered. No reset,
//! no lockout. The register result still carries the hash in-process; the
//! wire layer never serializes it.

use crate::auth::{create_token, hash_password, verify_password};
use crate::error::{AppError, ErrorCode, ServiceError, ServiceResult};
use crate::models::{AuthPayload, Credential};
use crate::state::AppState;
use crate::store::StoreError;

/// Register a new username with a one-way salted password hash.
///
/// The existence pre-check gives a clean answer in the common case; the
/// store's unique constraint is the hard guarantee, and its violation maps
/// to the same `DuplicateUser` answer when two registrations race.
pub async fn register(state: &AppState, username: &str, password: &str) -> ServiceResult<Credential> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AppError::validation("username and password are required").into());
    }

    if state
        .store
        .find_credential_by_username(username)
        .await?
        .is_some()
    {
        return Err(AppError::new(ErrorCode::DuplicateUser).into());
    }

    let hash = hash_password(password)?;
    let credential = state
        .store
        .create_credential(username, &hash)
        .await
        .map_err(map_register_error)?;

    tracing::info!(id = credential.id, "user registered");
    Ok(credential)
}

/// A unique-constraint rejection on the insert is the lost side of a
/// registration race; it answers `DuplicateUser` like the pre-check does.
fn map_register_error(err: StoreError) -> ServiceError {
    match err {
        StoreError::UniqueViolation { .. } => AppError::new(ErrorCode::DuplicateUser).into(),
        other => other.into(),
    }
}

/// Verify a password and mint a signed login token (1 hour expiry).
///
/// A missing user and a wrong password stay distinct here; the dispatcher
/// collapses them into one generic answer at the boundary.
pub async fn login(state: &AppState, username: &str, password: &str) -> ServiceResult<AuthPayload> {
    let username = username.trim();

    let Some(user) = state.store.find_credential_by_username(username).await? else {
        tracing::debug!(%username, "login: unknown username");
        return Err(AppError::new(ErrorCode::UserNotFound).into());
    };

    if !verify_password(password, &user.password_hash) {
        tracing::debug!(%username, "login: password mismatch");
        return Err(AppError::new(ErrorCode::InvalidCredentials).into());
    }

    let token = create_token(user.id, &state.jwt_secret)?;
    tracing::info!(id = user.id, "user logged in");

    Ok(AuthPayload { token, user })
}
