//! Synchronous client for the Paystack payments API.
//!
//! # Overview
//! Covers transaction initialization, verification and listing, bank
//! listing, transfer recipients, and transfer initiation/finalization. The
//! crate only shapes requests and responses; settlement happens on
//! Paystack's side.
//!
//! # Design
//! - `PaystackClient` is stateless: it builds `HttpRequest` values and parses
//!   `HttpResponse` values without touching the network.
//! - `Paystack<T>` pairs it with a `Transport` and runs each operation as
//!   validate, build, send, parse. `UreqTransport` is the default.
//! - List filters drop default-valued fields (`FilterFields`) before being
//!   encoded into the query string (`encode_query`).
//! - A response is only a success when the HTTP status is 200/201 and the
//!   payload's `status` flag is true.
//! - Remote fields that may be missing or `null` are `Nullable<T>`.

pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod http;
pub mod nullable;
pub mod paystack;
pub mod query;
pub mod types;
pub mod validate;

pub use client::{parse_envelope, PaystackClient};
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use filter::{FilterFields, FilteredFields};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use nullable::Nullable;
pub use paystack::Paystack;
pub use query::encode_query;
pub use types::{
    ApiResponse, Authorization, Bank, ConfirmTransfer, CreateRecipient, CursorMeta, Customer,
    ErrorBody, InitializeTransaction, InitializedTransaction, ListBanks, ListResponse,
    ListTransactions, LogHistory, PageMeta, RecipientDetails, Transaction, TransactionLog,
    Transfer, TransferInput, TransferRecipient,
};
pub use validate::{FieldError, Validate, ValidationErrors};
