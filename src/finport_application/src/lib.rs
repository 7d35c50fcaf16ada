pub mod otp_email;
pub mod use_cases;

pub use use_cases::{
    create_user::{CreateUserError, CreateUserUseCase},
    request_otp::{RequestOtpError, RequestOtpUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    sign_in::{SignInError, SignInUseCase},
    verify_otp::{VerifyOtpError, VerifyOtpUseCase},
};
