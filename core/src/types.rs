//! Request inputs and response DTOs for the Paystack API.
//!
//! # Design
//! Wire names follow the remote API (mostly snake_case, with a few
//! camelCase keys such as `perPage` and `createdAt`). Optional remote fields
//! whose absence or `null` means something are `Nullable<T>`. Other
//! defaulted fields go through `null_as_default`, so a stray `null` decodes
//! to the type's default. Fields without a default stay strict.
//!
//! Inputs implement `Validate`, and list filters implement `FilterFields`
//! in `filter.rs`. These types are defined independently of the
//! mock-server's JSON; the end-to-end tests catch drift between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::nullable::{null_as_default, Nullable};
use crate::validate::{Validate, ValidationErrors};

/// Transaction statuses accepted by the `status` list filter.
pub const TRANSACTION_STATUSES: &[&str] = &["failed", "success", "abandoned"];

/// Countries accepted by the `country` bank filter.
pub const BANK_COUNTRIES: &[&str] = &["ghana", "kenya", "nigeria", "south africa"];

/// Currency used for transfers that don't name one.
pub const DEFAULT_TRANSFER_CURRENCY: &str = "NGN";

/// Transfers are always funded from the integration balance.
pub const TRANSFER_SOURCE: &str = "balance";

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// Envelope wrapping every single-object response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub status: bool,
    pub message: String,
    pub data: T,
}

/// Envelope wrapping every list response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse<T, M> {
    pub status: bool,
    pub message: String,
    pub data: Vec<T>,
    pub meta: M,
}

/// The part of a response every payload shares, success or failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
}

/// Offset pagination used by `GET /transaction`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageMeta {
    #[serde(deserialize_with = "null_as_default")]
    pub total: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_volume: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub skipped: i64,
    #[serde(rename = "perPage", deserialize_with = "null_as_default")]
    pub per_page: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub page: i64,
    #[serde(rename = "pageCount", deserialize_with = "null_as_default")]
    pub page_count: i64,
}

/// Cursor pagination used by `GET /bank`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CursorMeta {
    pub next: Nullable<String>,
    pub previous: Nullable<String>,
    #[serde(rename = "perPage", deserialize_with = "null_as_default")]
    pub per_page: i64,
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// Body of `POST /transaction/initialize`. `amount` is in the currency's
/// subunit (kobo, pesewas, cents).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InitializeTransaction {
    pub email: String,
    pub amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Validate for InitializeTransaction {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("email", &self.email)
            .email("email", &self.email)
            .min("amount", self.amount, 1);
        errors.into_result()
    }
}

/// Checkout details returned by `POST /transaction/initialize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InitializedTransaction {
    pub reference: String,
    pub authorization_url: String,
    pub access_code: String,
}

/// A transaction as returned by verify and list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub domain: String,
    pub status: String,
    pub reference: String,
    pub amount: i64,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub message: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub gateway_response: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub paid_at: Nullable<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub channel: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub ip_address: Nullable<String>,
    /// Either `""` or whatever object the merchant attached.
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub metadata: Nullable<Value>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub log: Nullable<TransactionLog>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub fees: Nullable<i64>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub fees_split: Nullable<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authorization: Authorization,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer: Customer,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub plan: Nullable<Value>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub split: Nullable<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub order_id: Nullable<String>,
    #[serde(rename = "paidAt", default, skip_serializing_if = "Nullable::is_absent")]
    pub paid_at_iso: Nullable<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Nullable::is_absent")]
    pub created_at_iso: Nullable<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub requested_amount: i64,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub pos_transaction_data: Nullable<Value>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub source: Nullable<Value>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub fees_breakdown: Nullable<Value>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub transaction_date: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub plan_object: Nullable<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub subaccount: Nullable<Map<String, Value>>,
}

/// Checkout timeline recorded while the customer paid.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransactionLog {
    #[serde(deserialize_with = "null_as_default")]
    pub start_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub time_spent: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub attempts: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub errors: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub mobile: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub input: Vec<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub history: Vec<LogHistory>,
}

/// One step of the checkout timeline, e.g. `action` or `success`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogHistory {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Seconds since the checkout opened.
    #[serde(deserialize_with = "null_as_default")]
    pub time: i64,
}

/// Reusable card/bank authorization attached to a successful charge.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Authorization {
    #[serde(deserialize_with = "null_as_default")]
    pub authorization_code: String,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub bin: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub last4: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub exp_month: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub exp_year: Nullable<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub channel: String,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub card_type: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub bank: Nullable<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub country_code: String,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub brand: Nullable<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub reusable: bool,
    /// Card fingerprint; `null` for mobile money and bank transfer.
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub signature: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_name: Nullable<String>,
}

/// The paying customer, as embedded in a transaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Customer {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub first_name: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub last_name: Nullable<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub customer_code: String,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub phone: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub metadata: Nullable<Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub risk_action: String,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub international_format_phone: Nullable<String>,
}

/// Query filters for `GET /transaction`. Zero and empty fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListTransactions {
    pub per_page: i64,
    pub page: i64,
    /// Customer ID.
    pub customer: i64,
    pub terminal_id: String,
    /// One of `failed`, `success`, `abandoned`.
    pub status: String,
    /// RFC 3339 lower bound on creation time.
    pub from: String,
    /// RFC 3339 upper bound on creation time.
    pub to: String,
    pub amount: i64,
}

impl Validate for ListTransactions {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .timestamp("from", non_empty(&self.from))
            .timestamp("to", non_empty(&self.to))
            .one_of("status", non_empty(&self.status), TRANSACTION_STATUSES);
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Banks
// ---------------------------------------------------------------------------

/// A bank or mobile money provider from `GET /bank`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bank {
    pub id: i64,
    pub name: String,
    pub slug: String,
    /// Code used as `bank_code` when creating a recipient.
    pub code: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub longcode: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub gateway: Nullable<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pay_with_bank: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub supports_transfer: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    pub country: String,
    pub currency: String,
    #[serde(rename = "type")]
    pub bank_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deleted: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Nullable::is_absent")]
    pub updated_at: Nullable<String>,
}

/// Query filters for `GET /bank`. Boolean filters are sent only when set, so
/// `Some(false)` reaches the API as `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListBanks {
    pub country: String,
    pub use_cursor: Option<bool>,
    pub per_page: i64,
    pub pay_with_bank_transfer: Option<bool>,
    pub pay_with_bank: Option<bool>,
    pub enabled_for_verification: Option<bool>,
    pub next: String,
    pub previous: String,
    pub gateway: String,
    pub bank_type: String,
    pub currency: String,
}

impl Validate for ListBanks {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.one_of("country", non_empty(&self.country), BANK_COUNTRIES);
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Transfer recipients
// ---------------------------------------------------------------------------

/// Body of `POST /transferrecipient`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateRecipient {
    /// Recipient kind, e.g. `nuban`, `mobile_money`, `basa`.
    #[serde(rename = "type")]
    pub recipient_type: String,
    pub name: String,
    pub account_number: String,
    pub bank_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Validate for CreateRecipient {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("type", &self.recipient_type)
            .required("name", &self.name)
            .required("account_number", &self.account_number)
            .required("bank_code", &self.bank_code);
        errors.into_result()
    }
}

/// A transfer recipient as returned by `POST /transferrecipient`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferRecipient {
    #[serde(default, deserialize_with = "null_as_default")]
    pub active: bool,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<String>,
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub integration: i64,
    pub name: String,
    pub recipient_code: String,
    #[serde(rename = "type")]
    pub recipient_type: String,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Nullable::is_absent")]
    pub updated_at: Nullable<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub description: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub email: Nullable<String>,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub metadata: Nullable<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: RecipientDetails,
}

/// Account the recipient is paid into.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecipientDetails {
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub authorization_code: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_number: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub account_name: Nullable<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub bank_code: String,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub bank_name: Nullable<String>,
}

// ---------------------------------------------------------------------------
// Transfers
// ---------------------------------------------------------------------------

/// Caller-facing input for `POST /transfer`. Empty `currency` defaults to
/// NGN and empty `reference` to a fresh UUID when the request is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferInput {
    pub amount: i64,
    /// Recipient code, e.g. `RCP_c8y67uhuvl2xmws`.
    pub recipient: String,
    pub reason: String,
    pub currency: String,
    pub reference: String,
}

impl Validate for TransferInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .min("amount", self.amount, 1)
            .required("recipient", &self.recipient);
        errors.into_result()
    }
}

/// Wire body of `POST /transfer`, after defaults are applied.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub(crate) struct TransferRequest<'a> {
    pub source: &'static str,
    pub reason: &'a str,
    pub amount: i64,
    pub recipient: &'a str,
    pub currency: &'a str,
    pub reference: &'a str,
}

/// Body of `POST /transfer/finalize_transfer`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmTransfer {
    pub transfer_code: String,
    pub otp: String,
}

impl Validate for ConfirmTransfer {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("transfer_code", &self.transfer_code)
            .required("otp", &self.otp);
        errors.into_result()
    }
}

/// A transfer as returned by initiate and finalize.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transfer {
    #[serde(default, deserialize_with = "null_as_default")]
    pub integration: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub reason: Nullable<String>,
    /// Recipient ID on initiate, sometimes the full recipient on finalize.
    #[serde(default)]
    pub recipient: Value,
    pub status: String,
    pub transfer_code: String,
    pub id: i64,
    #[serde(default, skip_serializing_if = "Nullable::is_absent")]
    pub reference: Nullable<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<String>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Nullable::is_absent")]
    pub updated_at: Nullable<String>,
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
