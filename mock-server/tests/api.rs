use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, SEEDED_REFERENCE, TEST_SECRET_KEY, VALID_OTP};
use serde_json::Value;
use tower::{Service, ServiceExt};

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get_request(uri: &str) -> Request<String> {
    Request::builder()
        .uri(uri)
        .header(http::header::AUTHORIZATION, format!("Bearer {TEST_SECRET_KEY}"))
        .body(String::new())
        .unwrap()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .header(http::header::AUTHORIZATION, format!("Bearer {TEST_SECRET_KEY}"))
        .body(body.to_string())
        .unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_bearer_token_returns_401() {
    let resp = app()
        .oneshot(Request::builder().uri("/bank").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "No Authorization Header was found");
}

#[tokio::test]
async fn wrong_bearer_token_returns_401() {
    let resp = app()
        .oneshot(
            Request::builder()
                .uri("/bank")
                .header(http::header::AUTHORIZATION, "Bearer sk_live_wrong")
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(resp).await["message"], "Invalid key");
}

// --- transactions ---

#[tokio::test]
async fn verify_seeded_transaction() {
    let resp = app()
        .oneshot(get_request(&format!("/transaction/verify/{SEEDED_REFERENCE}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["reference"], SEEDED_REFERENCE);
    assert_eq!(body["data"]["amount"], 2000000);
}

#[tokio::test]
async fn verify_unknown_reference_returns_400() {
    let resp = app()
        .oneshot(get_request("/transaction/verify/nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Transaction reference not found");
}

#[tokio::test]
async fn initialize_rejects_missing_email() {
    let resp = app()
        .oneshot(json_request("/transaction/initialize", r#"{"amount":1000}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn initialize_rejects_malformed_json() {
    let resp = app()
        .oneshot(json_request("/transaction/initialize", "{not json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "Invalid JSON body");
}

#[tokio::test]
async fn list_transactions_paginates() {
    let resp = app()
        .oneshot(get_request("/transaction?perPage=1&page=1"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["meta"]["perPage"], 1);
    assert_eq!(body["meta"]["pageCount"], 1);
    assert_eq!(body["meta"]["total_volume"], 2000000);
}

#[tokio::test]
async fn list_transactions_rejects_zero_page() {
    let resp = app()
        .oneshot(get_request("/transaction?page=0"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// --- banks ---

#[tokio::test]
async fn list_banks_defaults_to_nigeria() {
    let resp = app().oneshot(get_request("/bank")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let banks = body["data"].as_array().unwrap();
    assert!(!banks.is_empty());
    assert!(banks.iter().all(|b| b["country"] == "Nigeria"));
    assert!(body["meta"]["next"].is_null());
}

#[tokio::test]
async fn list_banks_follows_cursor() {
    let mut app = app().into_service();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request("/bank?country=ghana&perPage=1&use_cursor=true"))
        .await
        .unwrap();
    let first = body_json(resp).await;
    assert_eq!(first["data"].as_array().unwrap().len(), 1);
    let next = first["meta"]["next"].as_str().unwrap().to_string();

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get_request(&format!("/bank?country=ghana&perPage=1&next={next}")))
        .await
        .unwrap();
    let second = body_json(resp).await;
    assert_ne!(second["data"][0]["id"], first["data"][0]["id"]);
    assert!(second["meta"]["next"].is_null());
    assert!(second["meta"]["previous"].is_string());
}

// --- transfers: full lifecycle ---

#[tokio::test]
async fn transfer_lifecycle() {
    let mut app = app().into_service();

    // recipient
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/transferrecipient",
            r#"{"type":"nuban","name":"Jane Doe","account_number":"0087476870","bank_code":"044"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let recipient = body_json(resp).await;
    assert_eq!(recipient["data"]["details"]["bank_name"], "Access Bank");
    let code = recipient["data"]["recipient_code"].as_str().unwrap().to_string();

    // initiate
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/transfer",
            &format!(r#"{{"source":"balance","amount":5000,"recipient":"{code}","reason":"test","currency":"NGN","reference":"ref-1"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let transfer = body_json(resp).await;
    assert_eq!(transfer["data"]["status"], "otp");
    let transfer_code = transfer["data"]["transfer_code"].as_str().unwrap().to_string();

    // wrong otp: 200 with status false
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/transfer/finalize_transfer",
            &format!(r#"{{"transfer_code":"{transfer_code}","otp":"000000"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Invalid OTP");

    // right otp
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/transfer/finalize_transfer",
            &format!(r#"{{"transfer_code":"{transfer_code}","otp":"{VALID_OTP}"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["status"], "success");

    // finalize again: no longer awaiting otp
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/transfer/finalize_transfer",
            &format!(r#"{{"transfer_code":"{transfer_code}","otp":"{VALID_OTP}"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // duplicate reference
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(json_request(
            "/transfer",
            &format!(r#"{{"source":"balance","amount":5000,"recipient":"{code}","reference":"ref-1"}}"#),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn transfer_to_unknown_recipient_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "/transfer",
            r#"{"source":"balance","amount":5000,"recipient":"RCP_missing"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["message"], "Recipient specified is invalid");
}

#[tokio::test]
async fn recipient_with_unknown_bank_returns_400() {
    let resp = app()
        .oneshot(json_request(
            "/transferrecipient",
            r#"{"type":"nuban","name":"Jane","account_number":"0087476870","bank_code":"999"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
