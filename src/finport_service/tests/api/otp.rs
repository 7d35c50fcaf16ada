use crate::helpers::TestApp;

#[tokio::test]
async fn request_otp_stores_a_code_and_reports_the_resend_wait() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/user/request-otp",
            &serde_json::json!({ "email": "a@b.com", "isSignup": true }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "OTP sent to email successfully.");
    assert_eq!(body["canResendAfter"], 60);

    let code = app.issued_code("a@b.com").await;
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    // The code went out through the email collaborator.
    let sent = app.email_client.sent_emails().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "a@b.com");
    assert!(sent[0].content.contains(&code));
}

#[tokio::test]
async fn immediate_resend_is_throttled_with_remaining_time() {
    let app = TestApp::spawn().await;

    let body = serde_json::json!({ "email": "a@b.com", "isSignup": true });
    app.post_json("/api/user/request-otp", &body).await;
    let response = app.post_json("/api/user/request-otp", &body).await;

    assert_eq!(response.status().as_u16(), 429);
    let body: serde_json::Value = response.json().await.unwrap();
    let remaining = body["remainingTime"].as_u64().unwrap();
    assert!(remaining >= 1);
    assert!(remaining <= 60);
}

#[tokio::test]
async fn missing_email_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json("/api/user/request-otp", &serde_json::json!({}))
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Email is required.");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/user/request-otp",
            &serde_json::json!({ "email": "not-an-email", "isSignup": true }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
async fn signup_request_for_existing_account_is_rejected() {
    let app = TestApp::spawn().await;
    app.register_user("Ada", "ada@example.com", "password123").await;

    let response = app
        .post_json(
            "/api/user/request-otp",
            &serde_json::json!({ "email": "ada@example.com", "isSignup": true }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "User with this email already exists.");
}

#[tokio::test]
async fn reset_request_for_unknown_account_is_404() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/user/request-otp",
            &serde_json::json!({ "email": "ghost@example.com", "isSignup": false }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No account found with this email address.");
}

#[tokio::test]
async fn verify_otp_rejects_wrong_code_but_allows_retry() {
    let app = TestApp::spawn().await;

    app.post_json(
        "/api/user/request-otp",
        &serde_json::json!({ "email": "a@b.com", "isSignup": true }),
    )
    .await;
    let code = app.issued_code("a@b.com").await;
    let wrong_code = if code == "111111" { "222222" } else { "111111" };

    let response = app
        .post_json(
            "/api/user/verify-otp",
            &serde_json::json!({ "email": "a@b.com", "otp": wrong_code }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid OTP. Please try again.");

    // The record survived the mismatch, so the right code still verifies.
    let response = app
        .post_json(
            "/api/user/verify-otp",
            &serde_json::json!({ "email": "a@b.com", "otp": code }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn verify_otp_without_a_pending_code_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/user/verify-otp",
            &serde_json::json!({ "email": "a@b.com", "otp": "123456" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "No OTP found for this email. Please request a new one."
    );
}

#[tokio::test]
async fn verify_otp_requires_both_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/user/verify-otp",
            &serde_json::json!({ "email": "a@b.com" }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Email and OTP are required.");
}
