//! Stateless HTTP request builder and response parser for the Paystack API.
//!
//! # Design
//! `PaystackClient` holds only its `ClientConfig` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! validates the input and produces an `HttpRequest`, and a `parse_*` method
//! that consumes an `HttpResponse`. Nothing here touches the network; the
//! `Paystack` facade pairs the two with a `Transport`.
//!
//! Every `parse_*` goes through [`parse_envelope`], so all operations agree
//! on what counts as success: HTTP 200 or 201 *and* `"status": true` in the
//! payload.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::filter::FilterFields;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::{encode_query, with_query};
use crate::types::{
    ApiResponse, Bank, ConfirmTransfer, CreateRecipient, CursorMeta, ErrorBody,
    InitializeTransaction, InitializedTransaction, ListBanks, ListResponse, ListTransactions,
    PageMeta, Transaction, Transfer, TransferInput, TransferRecipient, TransferRequest,
    DEFAULT_TRANSFER_CURRENCY, TRANSFER_SOURCE,
};
use crate::validate::{Validate, ValidationErrors};

pub const INITIALIZE_PATH: &str = "/transaction/initialize";
pub const VERIFY_PATH: &str = "/transaction/verify";
pub const TRANSACTIONS_PATH: &str = "/transaction";
pub const BANKS_PATH: &str = "/bank";
pub const RECIPIENTS_PATH: &str = "/transferrecipient";
pub const TRANSFER_PATH: &str = "/transfer";
pub const FINALIZE_TRANSFER_PATH: &str = "/transfer/finalize_transfer";

/// Synchronous, stateless client for the Paystack API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Safe to share between threads.
#[derive(Debug, Clone)]
pub struct PaystackClient {
    config: ClientConfig,
}

impl PaystackClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_initialize_transaction(
        &self,
        input: &InitializeTransaction,
    ) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.post(INITIALIZE_PATH, input)
    }

    pub fn build_verify_transaction(&self, reference: &str) -> Result<HttpRequest, ApiError> {
        let mut errors = ValidationErrors::new();
        errors
            .required("reference", reference)
            .path_segment("reference", reference);
        errors.into_result()?;

        let base = format!("{}{VERIFY_PATH}", self.config.base_url());
        let mut url = Url::parse(&base)
            .map_err(|e| ApiError::Config(format!("invalid base URL {base}: {e}")))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Config(format!("base URL {base} cannot take a path")))?
            .push(reference);
        Ok(self.request(HttpMethod::Get, url.to_string(), None))
    }

    pub fn build_list_transactions(
        &self,
        filter: &ListTransactions,
    ) -> Result<HttpRequest, ApiError> {
        self.build_list(TRANSACTIONS_PATH, filter)
    }

    pub fn build_list_banks(&self, filter: &ListBanks) -> Result<HttpRequest, ApiError> {
        self.build_list(BANKS_PATH, filter)
    }

    pub fn build_create_recipient(&self, input: &CreateRecipient) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.post(RECIPIENTS_PATH, input)
    }

    /// Fills in `NGN` for an empty currency and a fresh UUID for an empty
    /// reference. The source is always the integration balance.
    pub fn build_transfer(&self, input: &TransferInput) -> Result<HttpRequest, ApiError> {
        input.validate()?;

        let reference = if input.reference.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            input.reference.clone()
        };
        let currency = if input.currency.is_empty() {
            DEFAULT_TRANSFER_CURRENCY
        } else {
            input.currency.as_str()
        };
        let body = TransferRequest {
            source: TRANSFER_SOURCE,
            reason: &input.reason,
            amount: input.amount,
            recipient: &input.recipient,
            currency,
            reference: &reference,
        };
        self.post(TRANSFER_PATH, &body)
    }

    pub fn build_confirm_transfer(&self, input: &ConfirmTransfer) -> Result<HttpRequest, ApiError> {
        input.validate()?;
        self.post(FINALIZE_TRANSFER_PATH, input)
    }

    pub fn parse_initialize_transaction(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<InitializedTransaction>, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_verify_transaction(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<Transaction>, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_list_transactions(
        &self,
        response: HttpResponse,
    ) -> Result<ListResponse<Transaction, PageMeta>, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_list_banks(
        &self,
        response: HttpResponse,
    ) -> Result<ListResponse<Bank, CursorMeta>, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_create_recipient(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<TransferRecipient>, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_transfer(&self, response: HttpResponse) -> Result<ApiResponse<Transfer>, ApiError> {
        parse_envelope(&response)
    }

    pub fn parse_confirm_transfer(
        &self,
        response: HttpResponse,
    ) -> Result<ApiResponse<Transfer>, ApiError> {
        parse_envelope(&response)
    }

    fn build_list<F: FilterFields + Validate>(
        &self,
        path: &str,
        filter: &F,
    ) -> Result<HttpRequest, ApiError> {
        filter.validate()?;
        let query = encode_query(&filter.filter_fields())?;
        let url = format!("{}{}", self.config.base_url(), with_query(path, &query));
        Ok(self.request(HttpMethod::Get, url, None))
    }

    fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let url = format!("{}{path}", self.config.base_url());
        Ok(self.request(HttpMethod::Post, url, Some(body)))
    }

    fn request(&self, method: HttpMethod, path: String, body: Option<String>) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (
                    "Authorization".to_string(),
                    format!("Bearer {}", self.config.api_key()),
                ),
            ],
            body,
        }
    }
}

/// Interpret a Paystack response.
///
/// A status other than 200/201 fails with `ApiError::Http` carrying the
/// payload's `message` (or the raw body when it isn't JSON). A success
/// status whose payload says `"status": false` fails with
/// `ApiError::Rejected`. Only then is the body decoded into `T`.
pub fn parse_envelope<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        let message = match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(body) => body.message,
            Err(_) => response.body.clone(),
        };
        warn!(status = response.status, %message, "paystack request failed");
        return Err(ApiError::Http {
            status: response.status,
            message,
        });
    }

    let envelope: ErrorBody =
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.status {
        warn!(status = response.status, message = %envelope.message, "paystack rejected request");
        return Err(ApiError::Rejected {
            message: envelope.message,
        });
    }

    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}
