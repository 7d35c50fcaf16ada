//! The one-time-passcode email sent during signup and password reset.

use askama::Template;
use finport_core::OtpPurpose;

#[derive(Template)]
#[template(
    source = r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <h2 style="color: #333; text-align: center;">{{ heading }}</h2>
  <div style="background-color: #f8f9fa; padding: 20px; border-radius: 8px; margin: 20px 0;">
    <p style="font-size: 16px; color: #333; margin-bottom: 20px;">{{ intro }}</p>
    <div style="text-align: center; margin: 30px 0;">
      <span style="font-size: 32px; font-weight: bold; color: #007bff; letter-spacing: 5px;">{{ code }}</span>
    </div>
    <p style="font-size: 14px; color: #666; text-align: center;">
      This code will expire in 10 minutes. Please do not share it with anyone.
    </p>
  </div>
  <div style="text-align: center; margin-top: 30px;">
    <p style="font-size: 12px; color: #999;">If you didn't request this code, please ignore this email.</p>
  </div>
</div>
"#,
    ext = "html"
)]
struct OtpEmail<'a> {
    heading: &'a str,
    intro: &'a str,
    code: &'a str,
}

pub fn subject(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::Signup => "FinPort - Your OTP Code",
        OtpPurpose::PasswordReset => "FinPort - Password Reset OTP",
    }
}

pub fn render(code: &str, purpose: OtpPurpose) -> Result<String, askama::Error> {
    let (heading, intro) = match purpose {
        OtpPurpose::Signup => (
            "FinPort Verification",
            "Welcome to FinPort! Your verification code is:",
        ),
        OtpPurpose::PasswordReset => (
            "Password Reset",
            "You requested a password reset. Your verification code is:",
        ),
    };

    OtpEmail {
        heading,
        intro,
        code,
    }
    .render()
}
