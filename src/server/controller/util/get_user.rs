use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{app::AppState, session::user::SessionUserId, user::ActingUser},
    service::token::SecurityTokenMediator,
};

/// Retrieves user information from session and then from database
///
/// # Arguments
/// - `state`: Application state with database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(ActingUser)`: User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))`: User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: User ID exists in session but not found in database (session is cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<ActingUser, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserRepository::new(&state.db).get(user_id).await? else {
        session.clear().await;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user.into())
}

/// Retrieves the user a security token was issued for
///
/// # Returns
/// - `Ok(ActingUser)`: Token is valid and its user exists
/// - `Err(Error::AuthError(AuthError::TokenMissing))`: No token was provided
/// - `Err(Error::AuthError(AuthError::TokenInvalid))`: Token is malformed, expired or forged
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))`: Token user no longer exists
pub async fn get_user_from_token(
    state: &AppState,
    token: Option<&str>,
) -> Result<ActingUser, Error> {
    let user_id = SecurityTokenMediator::from_config(&state.config).verify(token)?;

    let Some(user) = UserRepository::new(&state.db).get(user_id).await? else {
        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user.into())
}
