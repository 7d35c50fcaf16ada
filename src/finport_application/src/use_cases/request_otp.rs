use finport_core::{
    CooldownError, CooldownTracker, Email, EmailClient, EmailClientError, OtpPurpose, OtpStore,
    OtpStoreError, UserStore, UserStoreError,
};

use crate::otp_email;

/// Error types specific to the OTP issuance flow
#[derive(Debug, thiserror::Error)]
pub enum RequestOtpError {
    #[error("Please wait {remaining_seconds} seconds before requesting another OTP.")]
    Throttled { remaining_seconds: u64 },
    #[error("User with this email already exists.")]
    AccountAlreadyExists,
    #[error("No account found with this email address.")]
    AccountNotFound,
    #[error("Failed to send OTP. Please try again.")]
    Dispatch(#[source] EmailClientError),
    #[error("Failed to render OTP email: {0}")]
    Template(#[from] askama::Error),
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("Cooldown tracker error: {0}")]
    CooldownError(String),
}

impl From<CooldownError> for RequestOtpError {
    fn from(error: CooldownError) -> Self {
        match error {
            CooldownError::Throttled { remaining_seconds } => {
                Self::Throttled { remaining_seconds }
            }
            CooldownError::UnexpectedError(e) => Self::CooldownError(e),
        }
    }
}

/// OTP issuance use case - throttles, checks account existence rules,
/// generates a code and dispatches it by email
pub struct RequestOtpUseCase<'a, O, C, U, E>
where
    O: OtpStore + ?Sized,
    C: CooldownTracker + ?Sized,
    U: UserStore + ?Sized,
    E: EmailClient + ?Sized,
{
    otp_store: &'a O,
    cooldown: &'a C,
    user_store: &'a U,
    email_client: &'a E,
}

impl<'a, O, C, U, E> RequestOtpUseCase<'a, O, C, U, E>
where
    O: OtpStore + ?Sized,
    C: CooldownTracker + ?Sized,
    U: UserStore + ?Sized,
    E: EmailClient + ?Sized,
{
    pub fn new(otp_store: &'a O, cooldown: &'a C, user_store: &'a U, email_client: &'a E) -> Self {
        Self {
            otp_store,
            cooldown,
            user_store,
            email_client,
        }
    }

    /// Execute the OTP issuance use case
    ///
    /// # Arguments
    /// * `email` - Validated email address of the requester
    /// * `purpose` - Whether the code is for signup or password reset
    ///
    /// # Returns
    /// Ok(()) once the code has been stored and dispatched
    #[tracing::instrument(name = "RequestOtpUseCase::execute", skip(self))]
    pub async fn execute(&self, email: Email, purpose: OtpPurpose) -> Result<(), RequestOtpError> {
        // Throttle before touching the user store to keep load off the database.
        self.cooldown.check(&email).await?;

        let existing_user = self.user_store.find_by_email(&email).await?;
        match purpose {
            OtpPurpose::Signup if existing_user.is_some() => {
                return Err(RequestOtpError::AccountAlreadyExists);
            }
            OtpPurpose::PasswordReset if existing_user.is_none() => {
                return Err(RequestOtpError::AccountNotFound);
            }
            _ => {}
        }

        let code = self.otp_store.issue(email.clone(), purpose).await?;

        let subject = otp_email::subject(purpose);
        let body = otp_email::render(code.as_str(), purpose)?;

        if let Err(error) = self.email_client.send_email(&email, subject, &body).await {
            // The code never reached the user: roll the record back and leave
            // the cooldown unstamped so an immediate retry is possible.
            if let Err(cleanup_error) = self.otp_store.consume(&email).await {
                tracing::warn!("failed to roll back undelivered OTP: {cleanup_error}");
            }
            return Err(RequestOtpError::Dispatch(error));
        }

        self.cooldown.stamp(&email).await?;

        Ok(())
    }
}
