use finport_core::{
    Email, NewUser, OtpPurpose, OtpStore, OtpStoreError, Password, User, UserStore, UserStoreError,
};

/// Error types specific to the account creation flow
#[derive(Debug, thiserror::Error)]
pub enum CreateUserError {
    #[error("Email not verified. Please verify your email first.")]
    EmailNotVerified,
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
}

/// Account creation use case - consumes a verified signup OTP and persists
/// the new account
pub struct CreateUserUseCase<'a, O, U>
where
    O: OtpStore + ?Sized,
    U: UserStore + ?Sized,
{
    otp_store: &'a O,
    user_store: &'a U,
}

impl<'a, O, U> CreateUserUseCase<'a, O, U>
where
    O: OtpStore + ?Sized,
    U: UserStore + ?Sized,
{
    pub fn new(otp_store: &'a O, user_store: &'a U) -> Self {
        Self {
            otp_store,
            user_store,
        }
    }

    /// Execute the account creation use case
    ///
    /// Requires a verified OTP record issued for signup. The existence check
    /// runs again inside the user store; a concurrent duplicate signup
    /// surfaces as `UserAlreadyExists` from the uniqueness constraint.
    #[tracing::instrument(name = "CreateUserUseCase::execute", skip(self, password))]
    pub async fn execute(
        &self,
        name: String,
        email: Email,
        password: Password,
    ) -> Result<User, CreateUserError> {
        match self.otp_store.peek(&email).await? {
            Some(record) if record.verified && record.purpose == OtpPurpose::Signup => {}
            _ => return Err(CreateUserError::EmailNotVerified),
        }

        let user = self
            .user_store
            .create(NewUser {
                name,
                email: email.clone(),
                password,
            })
            .await?;

        if let Err(error) = self.otp_store.consume(&email).await {
            tracing::warn!("failed to delete consumed signup OTP: {error}");
        }

        Ok(user)
    }
}
