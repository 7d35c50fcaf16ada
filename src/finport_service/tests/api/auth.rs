use crate::helpers::TestApp;

#[tokio::test]
async fn full_signup_and_session_lifecycle() {
    let app = TestApp::spawn().await;

    // Request a signup code.
    let response = app
        .post_json(
            "/api/user/request-otp",
            &serde_json::json!({ "email": "ada@example.com", "isSignup": true }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // A wrong code is rejected.
    let code = app.issued_code("ada@example.com").await;
    let wrong_code = if code == "111111" { "222222" } else { "111111" };
    let response = app
        .post_json(
            "/api/user/verify-otp",
            &serde_json::json!({ "email": "ada@example.com", "otp": wrong_code }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 400);

    // The right code verifies.
    let response = app
        .post_json(
            "/api/user/verify-otp",
            &serde_json::json!({ "email": "ada@example.com", "otp": code }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // Account creation succeeds and never echoes the password.
    let response = app
        .post_json(
            "/api/user/create-user",
            &serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "password123",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 201);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "User created successfully.");
    let user = &body["user"];
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["email"], "ada@example.com");
    assert!(user.get("id").is_some());
    assert!(user.get("createdAt").is_some());
    assert!(user.get("password").is_none());
    assert!(user.get("password_hash").is_none());

    // Sign in; the session cookie lands in the client's cookie store.
    let response = app
        .post_json(
            "/api/user/signin",
            &serde_json::json!({ "email": "ada@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let set_cookie = response
        .headers()
        .get("set-cookie")
        .expect("signin must set a cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("auth_token="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Sign-in successful.");
    assert_eq!(body["redirectTo"], "/dashboard");

    // The session is accepted by the whoami check and the protected route.
    let response = app.get("/api/user/verify-auth").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["email"], "ada@example.com");

    let response = app.get("/api/user/profile").await;
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["user"]["name"], "Ada");

    // Logout clears the cookie; protected routes go dark again.
    let response = app.post_json("/api/user/logout", &serde_json::json!({})).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.get("/api/user/profile").await;
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn create_user_before_otp_verification_is_rejected() {
    let app = TestApp::spawn().await;

    // Code issued but never verified.
    app.post_json(
        "/api/user/request-otp",
        &serde_json::json!({ "email": "ada@example.com", "isSignup": true }),
    )
    .await;

    let response = app
        .post_json(
            "/api/user/create-user",
            &serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "password123",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Email not verified. Please verify your email first."
    );
}

#[tokio::test]
async fn create_user_without_any_otp_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/user/create-user",
            &serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "password123",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn signin_failures_share_one_message() {
    let app = TestApp::spawn().await;
    app.register_user("Ada", "ada@example.com", "password123").await;

    let wrong_password = app
        .post_json(
            "/api/user/signin",
            &serde_json::json!({ "email": "ada@example.com", "password": "wrong-password" }),
        )
        .await;
    let unknown_email = app
        .post_json(
            "/api/user/signin",
            &serde_json::json!({ "email": "ghost@example.com", "password": "password123" }),
        )
        .await;

    assert_eq!(wrong_password.status().as_u16(), 401);
    assert_eq!(unknown_email.status().as_u16(), 401);

    let wrong_password: serde_json::Value = wrong_password.json().await.unwrap();
    let unknown_email: serde_json::Value = unknown_email.json().await.unwrap();
    assert_eq!(wrong_password["error"], unknown_email["error"]);
    assert_eq!(wrong_password["error"], "Invalid email or password.");
}

#[tokio::test]
async fn protected_routes_reject_anonymous_requests() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/user/profile").await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app.get("/api/user/verify-auth").await;
    assert_eq!(response.status().as_u16(), 401);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No authentication token found");
}

#[tokio::test]
async fn password_reset_flow_replaces_the_credential() {
    let app = TestApp::spawn().await;
    app.register_user("Ada", "ada@example.com", "password123").await;

    // Request a reset code and use it directly; the flow re-verifies.
    let response = app
        .post_json(
            "/api/user/request-otp",
            &serde_json::json!({ "email": "ada@example.com", "isSignup": false }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let code = app.issued_code("ada@example.com").await;
    let response = app
        .post_json(
            "/api/user/reset-password",
            &serde_json::json!({
                "email": "ada@example.com",
                "otp": code,
                "newPassword": "brand-new-password",
            }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // Old credential is dead, the new one works.
    let response = app
        .post_json(
            "/api/user/signin",
            &serde_json::json!({ "email": "ada@example.com", "password": "password123" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .post_json(
            "/api/user/signin",
            &serde_json::json!({ "email": "ada@example.com", "password": "brand-new-password" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);

    // The reset cleared the cooldown, so a new code is immediately available.
    let response = app
        .post_json(
            "/api/user/request-otp",
            &serde_json::json!({ "email": "ada@example.com", "isSignup": false }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn signup_otp_cannot_reset_a_password() {
    let app = TestApp::spawn().await;

    // Issue a signup code, then try to spend it on a reset.
    app.post_json(
        "/api/user/request-otp",
        &serde_json::json!({ "email": "new@example.com", "isSignup": true }),
    )
    .await;
    let code = app.issued_code("new@example.com").await;

    let response = app
        .post_json(
            "/api/user/reset-password",
            &serde_json::json!({
                "email": "new@example.com",
                "otp": code,
                "newPassword": "brand-new-password",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body["error"],
        "This OTP was generated for signup, not password reset."
    );
}

#[tokio::test]
async fn reset_password_enforces_the_minimum_length() {
    let app = TestApp::spawn().await;
    app.register_user("Ada", "ada@example.com", "password123").await;

    app.post_json(
        "/api/user/request-otp",
        &serde_json::json!({ "email": "ada@example.com", "isSignup": false }),
    )
    .await;
    let code = app.issued_code("ada@example.com").await;

    let response = app
        .post_json(
            "/api/user/reset-password",
            &serde_json::json!({
                "email": "ada@example.com",
                "otp": code,
                "newPassword": "short",
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Password must be at least 8 characters long.");
}
