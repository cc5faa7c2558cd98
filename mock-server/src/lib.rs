//! In-memory imitation of the Paystack endpoints the client uses.
//!
//! Every route requires `Authorization: Bearer <key>` and answers with the
//! `{status, message, data}` envelope. State lives behind one `RwLock` and
//! starts with a fixed bank list and one successful transaction
//! (`0l2qk643pk`).

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

/// Secret key `app()` accepts.
pub const TEST_SECRET_KEY: &str = "sk_test_mock";

/// The only OTP `finalize_transfer` accepts.
pub const VALID_OTP: &str = "123456";

/// Reference of the transaction every fresh server already holds.
pub const SEEDED_REFERENCE: &str = "0l2qk643pk";

const DOMAIN: &str = "test";
const INTEGRATION: i64 = 463433;
const DEFAULT_PER_PAGE: usize = 50;
const TIMESTAMP: &str = "2024-02-04T10:00:00.000Z";

pub type Reply = (StatusCode, Json<Value>);

#[derive(Default)]
pub struct Store {
    next_id: i64,
    /// Insertion order doubles as creation order.
    transactions: Vec<Value>,
    recipients: HashMap<String, Value>,
    transfers: HashMap<String, Value>,
}

impl Store {
    fn seeded() -> Self {
        Self {
            next_id: 1,
            transactions: vec![seeded_transaction()],
            ..Self::default()
        }
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn transaction(&self, reference: &str) -> Option<&Value> {
        self.transactions.iter().find(|t| t["reference"] == reference)
    }
}

pub struct MockState {
    api_key: String,
    store: RwLock<Store>,
}

pub type Db = Arc<MockState>;

pub fn app() -> Router {
    app_with_key(TEST_SECRET_KEY)
}

pub fn app_with_key(api_key: &str) -> Router {
    let db: Db = Arc::new(MockState {
        api_key: api_key.to_string(),
        store: RwLock::new(Store::seeded()),
    });
    Router::new()
        .route("/transaction/initialize", post(initialize_transaction))
        .route("/transaction/verify/{reference}", get(verify_transaction))
        .route("/transaction", get(list_transactions))
        .route("/bank", get(list_banks))
        .route("/transferrecipient", post(create_recipient))
        .route("/transfer", post(initiate_transfer))
        .route("/transfer/finalize_transfer", post(finalize_transfer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock paystack listening");
    }
    axum::serve(listener, app()).await
}

fn success(status: StatusCode, message: &str, data: Value) -> Reply {
    (status, Json(json!({"status": true, "message": message, "data": data})))
}

fn failure(status: StatusCode, message: &str) -> Reply {
    (status, Json(json!({"status": false, "message": message})))
}

fn authorize(db: &MockState, headers: &HeaderMap) -> Result<(), Reply> {
    let expected = format!("Bearer {}", db.api_key);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        Some(_) => Err(failure(StatusCode::UNAUTHORIZED, "Invalid key")),
        None => Err(failure(StatusCode::UNAUTHORIZED, "No Authorization Header was found")),
    }
}

fn parse_body(body: &str) -> Result<Value, Reply> {
    match serde_json::from_str::<Value>(body) {
        Ok(value @ Value::Object(_)) => Ok(value),
        _ => Err(failure(StatusCode::BAD_REQUEST, "Invalid JSON body")),
    }
}

fn required_str<'a>(body: &'a Value, key: &str, message: &str) -> Result<&'a str, Reply> {
    body[key]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, message))
}

fn positive_amount(body: &Value) -> Result<i64, Reply> {
    body["amount"]
        .as_i64()
        .filter(|a| *a > 0)
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Invalid amount"))
}

async fn initialize_transaction(
    State(db): State<Db>,
    headers: HeaderMap,
    body: String,
) -> Result<Reply, Reply> {
    authorize(&db, &headers)?;
    let body = parse_body(&body)?;
    let email = required_str(&body, "email", "Invalid Email Address Passed")?;
    let amount = positive_amount(&body)?;
    let currency = body["currency"].as_str().unwrap_or("NGN");

    let mut store = db.store.write().await;
    let reference = match body["reference"].as_str() {
        Some(r) if store.transaction(r).is_some() => {
            return Err(failure(StatusCode::BAD_REQUEST, "Duplicate Transaction Reference"))
        }
        Some(r) => r.to_string(),
        None => Uuid::new_v4().simple().to_string()[..10].to_string(),
    };
    let id = store.next_id();
    let access_code = format!("ac{id:08}");
    store.transactions.push(json!({
        "id": id,
        "domain": DOMAIN,
        "status": "abandoned",
        "reference": reference,
        "amount": amount,
        "message": null,
        "gateway_response": "The transaction was not completed",
        "paid_at": null,
        "created_at": TIMESTAMP,
        "channel": "card",
        "currency": currency,
        "ip_address": null,
        "metadata": body.get("metadata").cloned().unwrap_or_else(|| json!("")),
        "log": null,
        "fees": null,
        "customer": {
            "id": id,
            "first_name": null,
            "last_name": null,
            "email": email,
            "customer_code": format!("CUS_{id:012}"),
            "phone": null,
            "metadata": null,
            "risk_action": "default"
        },
        "plan": null,
        "requested_amount": amount,
        "createdAt": TIMESTAMP,
        "paidAt": null
    }));
    info!(%reference, amount, "transaction initialized");

    Ok(success(
        StatusCode::OK,
        "Authorization URL created",
        json!({
            "authorization_url": format!("https://checkout.paystack.com/{access_code}"),
            "access_code": access_code,
            "reference": reference
        }),
    ))
}

async fn verify_transaction(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(reference): Path<String>,
) -> Result<Reply, Reply> {
    authorize(&db, &headers)?;
    let store = db.store.read().await;
    let tx = store
        .transaction(&reference)
        .cloned()
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Transaction reference not found"))?;
    Ok(success(StatusCode::OK, "Verification successful", tx))
}

fn page_param(params: &HashMap<String, String>, key: &str, default: usize) -> Result<usize, Reply> {
    match params.get(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| failure(StatusCode::BAD_REQUEST, &format!("{key} must be a positive integer"))),
    }
}

async fn list_transactions(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Reply, Reply> {
    authorize(&db, &headers)?;
    let per_page = page_param(&params, "perPage", DEFAULT_PER_PAGE)?;
    let page = page_param(&params, "page", 1)?;

    let store = db.store.read().await;
    let matching: Vec<&Value> = store
        .transactions
        .iter()
        .rev()
        .filter(|t| params.get("status").is_none_or(|s| t["status"] == s.as_str()))
        .filter(|t| {
            params
                .get("amount")
                .is_none_or(|a| t["amount"].to_string() == *a)
        })
        .collect();

    let total = matching.len();
    let total_volume: i64 = matching
        .iter()
        .filter(|t| t["status"] == "success")
        .filter_map(|t| t["amount"].as_i64())
        .sum();
    let skipped = (page - 1) * per_page;
    let data: Vec<Value> = matching.into_iter().skip(skipped).take(per_page).cloned().collect();

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": true,
            "message": "Transactions retrieved",
            "data": data,
            "meta": {
                "total": total,
                "total_volume": total_volume,
                "skipped": skipped,
                "perPage": per_page,
                "page": page,
                "pageCount": total.div_ceil(per_page)
            }
        })),
    ))
}

async fn list_banks(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Reply, Reply> {
    authorize(&db, &headers)?;
    let per_page = page_param(&params, "perPage", DEFAULT_PER_PAGE)?;
    let country = params
        .get("country")
        .map(|c| c.to_lowercase())
        .unwrap_or_else(|| "nigeria".to_string());

    let banks: Vec<Value> = seeded_banks()
        .into_iter()
        .filter(|b| b["country"].as_str().is_some_and(|c| c.eq_ignore_ascii_case(&country)))
        .filter(|b| params.get("type").is_none_or(|t| b["type"] == t.as_str()))
        .filter(|b| params.get("currency").is_none_or(|c| b["currency"] == c.as_str()))
        .filter(|b| {
            params
                .get("pay_with_bank")
                .is_none_or(|p| b["pay_with_bank"].to_string() == *p)
        })
        .collect();

    // Cursors are the id of the first bank on the requested page.
    let start = match params.get("next") {
        Some(cursor) => banks
            .iter()
            .position(|b| b["id"].to_string() == *cursor)
            .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Invalid cursor"))?,
        None => 0,
    };
    let page: Vec<Value> = banks.iter().skip(start).take(per_page).cloned().collect();
    let next = banks.get(start + per_page).map(|b| b["id"].to_string());
    let previous = if start == 0 {
        None
    } else {
        banks.get(start.saturating_sub(per_page)).map(|b| b["id"].to_string())
    };

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": true,
            "message": "Banks retrieved",
            "data": page,
            "meta": {"next": next, "previous": previous, "perPage": per_page}
        })),
    ))
}

async fn create_recipient(
    State(db): State<Db>,
    headers: HeaderMap,
    body: String,
) -> Result<Reply, Reply> {
    authorize(&db, &headers)?;
    let body = parse_body(&body)?;
    let kind = required_str(&body, "type", "Recipient type is required")?;
    let name = required_str(&body, "name", "Name is required")?;
    let account_number = required_str(&body, "account_number", "Account number is required")?;
    let bank_code = required_str(&body, "bank_code", "Bank code is required")?;
    let bank = seeded_banks()
        .into_iter()
        .find(|b| b["code"] == bank_code)
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Unknown bank code"))?;

    let mut store = db.store.write().await;
    let id = store.next_id();
    let recipient_code = format!("RCP_{id:015}");
    let recipient = json!({
        "active": true,
        "createdAt": TIMESTAMP,
        "currency": body["currency"].as_str().unwrap_or("NGN"),
        "description": body.get("description").cloned().unwrap_or(Value::Null),
        "domain": DOMAIN,
        "email": null,
        "id": id,
        "integration": INTEGRATION,
        "metadata": null,
        "name": name,
        "recipient_code": recipient_code,
        "type": kind,
        "updatedAt": TIMESTAMP,
        "is_deleted": false,
        "details": {
            "authorization_code": null,
            "account_number": account_number,
            "account_name": null,
            "bank_code": bank_code,
            "bank_name": bank["name"]
        }
    });
    store.recipients.insert(recipient_code.clone(), recipient.clone());
    info!(%recipient_code, "recipient created");

    Ok(success(
        StatusCode::CREATED,
        "Transfer recipient created successfully",
        recipient,
    ))
}

async fn initiate_transfer(
    State(db): State<Db>,
    headers: HeaderMap,
    body: String,
) -> Result<Reply, Reply> {
    authorize(&db, &headers)?;
    let body = parse_body(&body)?;
    if body["source"] != "balance" {
        return Err(failure(StatusCode::BAD_REQUEST, "Invalid transfer source"));
    }
    let amount = positive_amount(&body)?;
    let recipient_code = required_str(&body, "recipient", "Recipient is required")?;

    let mut store = db.store.write().await;
    let recipient_id = store
        .recipients
        .get(recipient_code)
        .map(|r| r["id"].clone())
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Recipient specified is invalid"))?;
    let reference = body["reference"].as_str().unwrap_or_default().to_string();
    if !reference.is_empty() && store.transfers.values().any(|t| t["reference"] == reference.as_str()) {
        return Err(failure(StatusCode::BAD_REQUEST, "Duplicate Transfer Reference"));
    }

    let id = store.next_id();
    let transfer_code = format!("TRF_{id:012}");
    let transfer = json!({
        "integration": INTEGRATION,
        "domain": DOMAIN,
        "amount": amount,
        "currency": body["currency"].as_str().unwrap_or("NGN"),
        "source": "balance",
        "reason": body.get("reason").cloned().unwrap_or(Value::Null),
        "recipient": recipient_id,
        "status": "otp",
        "transfer_code": transfer_code,
        "id": id,
        "reference": reference,
        "createdAt": TIMESTAMP,
        "updatedAt": TIMESTAMP
    });
    store.transfers.insert(transfer_code.clone(), transfer.clone());
    info!(%transfer_code, amount, "transfer awaiting otp");

    Ok(success(StatusCode::OK, "Transfer requires OTP to continue", transfer))
}

async fn finalize_transfer(
    State(db): State<Db>,
    headers: HeaderMap,
    body: String,
) -> Result<Reply, Reply> {
    authorize(&db, &headers)?;
    let body = parse_body(&body)?;
    let transfer_code = required_str(&body, "transfer_code", "Transfer code is required")?;
    let otp = required_str(&body, "otp", "OTP is required")?;

    let mut store = db.store.write().await;
    let transfer = store
        .transfers
        .get_mut(transfer_code)
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "Transfer code is invalid"))?;
    if transfer["status"] != "otp" {
        return Err(failure(StatusCode::BAD_REQUEST, "Transfer is not currently awaiting OTP"));
    }
    // Paystack reports a wrong OTP inside a successful HTTP response.
    if otp != VALID_OTP {
        return Ok(failure(StatusCode::OK, "Invalid OTP"));
    }
    transfer["status"] = json!("success");
    info!(%transfer_code, "transfer finalized");

    Ok(success(StatusCode::OK, "Transfer has been queued", transfer.clone()))
}

fn seeded_transaction() -> Value {
    json!({
        "id": 3516052615i64,
        "domain": "test",
        "status": "success",
        "reference": SEEDED_REFERENCE,
        "amount": 2000000,
        "message": null,
        "gateway_response": "Successful",
        "paid_at": "2024-02-03T00:53:26.000Z",
        "created_at": "2024-02-03T00:53:03.000Z",
        "channel": "card",
        "currency": "NGN",
        "ip_address": "105.112.28.160",
        "metadata": "",
        "log": {
            "start_time": 1706921603,
            "time_spent": 4,
            "attempts": 1,
            "errors": 0,
            "success": true,
            "mobile": false,
            "input": [],
            "history": [
                {"type": "action", "message": "Attempted to pay with card", "time": 3},
                {"type": "success", "message": "Successfully paid with card", "time": 4}
            ]
        },
        "fees": 40000,
        "fees_split": null,
        "authorization": {
            "authorization_code": "AUTH_c1u2j76bg5",
            "bin": "408408",
            "last4": "4081",
            "exp_month": "12",
            "exp_year": "2030",
            "channel": "card",
            "card_type": "visa ",
            "bank": "TEST BANK",
            "country_code": "NG",
            "brand": "visa",
            "reusable": true,
            "signature": "SIG_Y4eB6IMiaETU1RztDqaY",
            "account_name": null
        },
        "customer": {
            "id": 157441900,
            "first_name": null,
            "last_name": null,
            "email": "customer@email.com",
            "customer_code": "CUS_7plng9e53v77tva",
            "phone": null,
            "metadata": null,
            "risk_action": "default",
            "international_format_phone": null
        },
        "plan": null,
        "split": {},
        "order_id": null,
        "paidAt": "2024-02-03T00:53:26.000Z",
        "createdAt": "2024-02-03T00:53:03.000Z",
        "requested_amount": 2000000,
        "pos_transaction_data": null,
        "source": null,
        "fees_breakdown": null,
        "transaction_date": "2024-02-03T00:53:03.000Z",
        "plan_object": {},
        "subaccount": {}
    })
}

fn bank(id: i64, name: &str, slug: &str, code: &str, country: &str, currency: &str, kind: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "slug": slug,
        "code": code,
        "longcode": "",
        "gateway": null,
        "pay_with_bank": false,
        "supports_transfer": true,
        "active": true,
        "country": country,
        "currency": currency,
        "type": kind,
        "is_deleted": false,
        "createdAt": "2024-02-02T08:58:01.000Z",
        "updatedAt": "2024-02-02T08:58:01.000Z"
    })
}

fn seeded_banks() -> Vec<Value> {
    vec![
        bank(1, "Access Bank", "access-bank", "044", "Nigeria", "NGN", "nuban"),
        bank(9, "First Bank of Nigeria", "first-bank-of-nigeria", "011", "Nigeria", "NGN", "nuban"),
        bank(21, "Guaranty Trust Bank", "guaranty-trust-bank", "058", "Nigeria", "NGN", "nuban"),
        bank(773, "REHOBOTH MICROFINANCE BANK", "rehoboth-microfinance-bank-ng", "50761", "Nigeria", "NGN", "nuban"),
        bank(28, "Absa Bank Ghana Ltd", "absa-bank-ghana-ltd", "030100", "Ghana", "GHS", "ghipss"),
        bank(302, "MTN Mobile Money", "mtn-ghana", "MTN", "Ghana", "GHS", "mobile_money"),
    ]
}
