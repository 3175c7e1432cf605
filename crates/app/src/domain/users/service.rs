//! Users service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{ProfileRecord, UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    db: Db,
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgUsersRepository::new(),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        if user.email.trim().is_empty() {
            return Err(UsersServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin().await?;

        let created = self.repository.create_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_profile(&self, user: UserUuid) -> Result<ProfileRecord, UsersServiceError> {
        let mut tx = self.db.begin().await?;

        let profile = self.repository.get_profile(&mut tx, user).await?;

        tx.commit().await?;

        Ok(profile)
    }
}

#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Create a user together with their contact profile.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieve the contact profile for a user.
    async fn get_profile(&self, user: UserUuid) -> Result<ProfileRecord, UsersServiceError>;
}
