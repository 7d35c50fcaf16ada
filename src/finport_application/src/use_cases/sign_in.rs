use finport_core::{Email, Password, User, UserStore, UserStoreError};

/// Error types specific to the sign-in flow
#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    /// Unknown email and wrong password collapse into this one variant so the
    /// response never reveals which check failed.
    #[error("Invalid email or password.")]
    InvalidCredentials,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl From<UserStoreError> for SignInError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound | UserStoreError::IncorrectPassword => {
                Self::InvalidCredentials
            }
            other => Self::UnexpectedError(other.to_string()),
        }
    }
}

/// Sign-in use case - verifies credentials against the user store
pub struct SignInUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    user_store: &'a U,
}

impl<'a, U> SignInUseCase<'a, U>
where
    U: UserStore + ?Sized,
{
    pub fn new(user_store: &'a U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "SignInUseCase::execute", skip(self, password))]
    pub async fn execute(&self, email: Email, password: Password) -> Result<User, SignInError> {
        let user = self.user_store.authenticate(&email, &password).await?;
        Ok(user)
    }
}
