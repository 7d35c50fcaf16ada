use crate::helpers::TestApp;

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::spawn().await;

    let response = app.get("/health").await;

    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body.get("timestamp").is_some());
}

#[tokio::test]
async fn root_serves_the_banner() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "FinPort backend running");
}
