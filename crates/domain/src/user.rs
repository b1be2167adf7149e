use chrono::{DateTime, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{
    CreateError, DeleteError, EmailAddress, Name, ReadError, UpdateError, ValidationError,
};

#[allow(async_fn_in_trait)]
pub trait UserService: Send + Sync + 'static {
    async fn get_users(&self) -> Result<Vec<User>, ReadError>;
    async fn get_user(&self, id: UserID) -> Result<User, ReadError>;
    async fn create_user(&self, name: Name, email: EmailAddress) -> Result<User, CreateError>;
    async fn modify_user(
        &self,
        id: UserID,
        name: Option<Name>,
        email: Option<EmailAddress>,
    ) -> Result<User, UpdateError>;
    async fn delete_user(&self, id: UserID) -> Result<UserID, DeleteError>;

    /// Validates an email address and checks it is not used by another user.
    async fn validate_user_email(
        &self,
        email: &str,
        id: UserID,
    ) -> Result<EmailAddress, ValidationError> {
        match EmailAddress::new(email) {
            Ok(email) => match self.get_users().await {
                Ok(users) => {
                    if users.iter().all(|u| u.id == id || u.email != email) {
                        Ok(email)
                    } else {
                        Err(ValidationError::Conflict("email".to_string()))
                    }
                }
                Err(err) => Err(ValidationError::Other(err.into())),
            },
            Err(err) => Err(ValidationError::Other(err.into())),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait UserRepository: Send + Sync + 'static {
    async fn read_users(&self) -> Result<Vec<User>, ReadError>;
    async fn read_user(&self, id: UserID) -> Result<User, ReadError>;
    async fn create_user(&self, name: Name, email: EmailAddress) -> Result<User, CreateError>;
    async fn modify_user(
        &self,
        id: UserID,
        name: Option<Name>,
        email: Option<EmailAddress>,
    ) -> Result<User, UpdateError>;
    async fn delete_user(&self, id: UserID) -> Result<UserID, DeleteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserID,
    pub name: Name,
    pub email: EmailAddress,
    pub created_at: DateTime<Utc>,
}

#[derive(Deref, Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct UserID(Uuid);

impl UserID {
    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for UserID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for UserID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}
