use sea_orm::ConnectionTrait;

use crate::server::{
    data::access::AccessRepository,
    error::{auth::AuthError, Error},
    model::user::{AccessOperation, ActingUser},
};

/// Model-level access checks, administrators bypass every rule
pub struct AccessService<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AccessService<'a, C> {
    /// Creates a new instance of [`AccessService`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn can(
        &self,
        user: &ActingUser,
        model: &str,
        operation: AccessOperation,
    ) -> Result<bool, Error> {
        if user.is_admin {
            return Ok(true);
        }

        let access_repo = AccessRepository::new(self.db);

        Ok(access_repo.has_access(user.id, model, operation).await?)
    }

    /// Returns [`AuthError::AccessDenied`] unless the user may perform the operation
    pub async fn ensure(
        &self,
        user: &ActingUser,
        model: &str,
        operation: AccessOperation,
    ) -> Result<(), Error> {
        if self.can(user, model, operation).await? {
            return Ok(());
        }

        Err(AuthError::AccessDenied {
            user_id: user.id,
            model: model.to_string(),
            operation,
        }
        .into())
    }
}
