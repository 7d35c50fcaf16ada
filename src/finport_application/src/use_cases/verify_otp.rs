use finport_core::{Email, OtpCode, OtpStore, OtpStoreError};

/// Error types specific to the OTP verification flow
#[derive(Debug, thiserror::Error)]
pub enum VerifyOtpError {
    #[error("OTP store error: {0}")]
    OtpStoreError(#[from] OtpStoreError),
}

/// OTP verification use case - validates a submitted code and flags the
/// record verified without deleting it (deletion is deferred to the flow
/// that consumes the verified code)
pub struct VerifyOtpUseCase<'a, O>
where
    O: OtpStore + ?Sized,
{
    otp_store: &'a O,
}

impl<'a, O> VerifyOtpUseCase<'a, O>
where
    O: OtpStore + ?Sized,
{
    pub fn new(otp_store: &'a O) -> Self {
        Self { otp_store }
    }

    #[tracing::instrument(name = "VerifyOtpUseCase::execute", skip(self, code))]
    pub async fn execute(&self, email: Email, code: OtpCode) -> Result<(), VerifyOtpError> {
        self.otp_store.verify(&email, &code).await?;
        Ok(())
    }
}
