use finport_core::{
    CooldownError, CooldownTracker, Email, OtpCode, OtpPurpose, OtpStore, OtpStoreError, Password,
    UserStore, UserStoreError,
};

/// Error types specific to the password reset flow
#[derive(Debug, thiserror::Error)]
pub enum ResetPasswordError {
    #[error("This OTP was generated for signup, not password reset.")]
    WrongPurpose,
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Password reset use case - re-verifies the OTP, rejects signup-purpose
/// codes, persists the new hash, then releases both the OTP record and the
/// cooldown stamp
pub struct ResetPasswordUseCase<'a, O, U, C>
where
    O: OtpStore + ?Sized,
    U: UserStore + ?Sized,
    C: CooldownTracker + ?Sized,
{
    otp_store: &'a O,
    user_store: &'a U,
    cooldown: &'a C,
}

impl<'a, O, U, C> ResetPasswordUseCase<'a, O, U, C>
where
    O: OtpStore + ?Sized,
    U: UserStore + ?Sized,
    C: CooldownTracker + ?Sized,
{
    pub fn new(otp_store: &'a O, user_store: &'a U, cooldown: &'a C) -> Self {
        Self {
            otp_store,
            user_store,
            cooldown,
        }
    }

    #[tracing::instrument(
        name = "ResetPasswordUseCase::execute",
        skip(self, code, new_password)
    )]
    pub async fn execute(
        &self,
        email: Email,
        code: OtpCode,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        // Re-run the expiry and match checks rather than trusting a
        // previously set verified flag, which could be stale.
        self.otp_store.verify(&email, &code).await?;

        let record = self
            .otp_store
            .peek(&email)
            .await?
            .ok_or(OtpStoreError::NotFound)?;
        if record.purpose == OtpPurpose::Signup {
            return Err(ResetPasswordError::WrongPurpose);
        }

        self.user_store.update_password(&email, new_password).await?;

        if let Err(error) = self.otp_store.consume(&email).await {
            tracing::warn!("failed to delete consumed reset OTP: {error}");
        }
        // Free the slot so the user can immediately request a new code if
        // something went wrong with the fresh password.
        if let Err(error) = self.cooldown.clear(&email).await {
            tracing::warn!("failed to clear resend cooldown: {error}");
        }

        Ok(())
    }
}
