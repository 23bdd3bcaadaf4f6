//! HTTP tests for request validation and the error envelope

mod common;

use actix_web::{http::StatusCode, test, App};
use serde_json::{json, Value};

use sp_api::configure;

use common::{TestContext, PHONE};

#[actix_web::test]
async fn test_malformed_json_is_invalid_request() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(configure(ctx.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-sms")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"phone\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("INVALID_REQUEST"));
    assert!(body["timestamp"].is_string());
}

#[actix_web::test]
async fn test_missing_fields_are_invalid_request() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(configure(ctx.state.clone()))).await;

    let cases = [
        ("/api/v1/auth/send-sms", json!({})),
        ("/api/v1/auth/verify-login", json!({"phone": PHONE})),
        ("/api/v1/auth/refresh", json!({})),
    ];

    for (uri, payload) in cases {
        let req = test::TestRequest::post().uri(uri).set_json(payload).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], json!("INVALID_REQUEST"), "{}", uri);
    }
}

#[actix_web::test]
async fn test_empty_fields_fail_validation() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(configure(ctx.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/verify-login")
        .set_json(json!({"phone": PHONE, "code": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], json!("INVALID_REQUEST"));
    assert_eq!(body["error"]["details"]["fields"], json!(["code"]));

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({"refresh_token": ""}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["error"]["code"], json!("INVALID_REQUEST"));
}

#[actix_web::test]
async fn test_unsupported_phone_is_rejected() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(configure(ctx.state.clone()))).await;

    for phone in ["12345", "+79001234567", "+996 700 123 456"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/auth/send-sms")
            .set_json(json!({"phone": phone}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", phone);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], json!("SMS_SEND_FAILED"));
    }

    assert_eq!(ctx.sms.sent_count().await, 0);
}

#[actix_web::test]
async fn test_delivery_failure_is_service_unavailable() {
    let ctx = TestContext::with_failing_sms();
    let app = test::init_service(App::new().configure(configure(ctx.state.clone()))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-sms")
        .set_json(json!({"phone": PHONE}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], json!("SMS_SEND_FAILED"));

    // The undelivered code was discarded, so a retry generates and sends a new one
    ctx.sms.set_should_fail(false);
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/send-sms")
        .set_json(json!({"phone": PHONE}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(ctx.sms.sent_count().await, 1);
}

#[actix_web::test]
async fn test_unknown_route_is_not_found() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(configure(ctx.state.clone()))).await;

    let req = test::TestRequest::get().uri("/api/v2/nothing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], json!("NOT_FOUND"));
}

#[actix_web::test]
async fn test_health_check() {
    let ctx = TestContext::new();
    let app = test::init_service(App::new().configure(configure(ctx.state.clone()))).await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["service"], json!("skypark-api"));
    assert!(body["version"].is_string());
}
