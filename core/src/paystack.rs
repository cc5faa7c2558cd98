//! Executing facade: validate, build, send, parse.
//!
//! Each method is one synchronous round-trip. Validation and request
//! building happen before the transport is touched, so bad input never
//! costs a network call. Nothing is retried.

use tracing::debug;

use crate::client::PaystackClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::types::{
    ApiResponse, Bank, ConfirmTransfer, CreateRecipient, CursorMeta, InitializeTransaction,
    InitializedTransaction, ListBanks, ListResponse, ListTransactions, PageMeta, Transaction,
    Transfer, TransferInput, TransferRecipient,
};

/// Paystack API client bound to a transport.
///
/// ```no_run
/// use paystack_core::{ListBanks, Paystack};
///
/// let paystack = Paystack::new("sk_test_xxx");
/// let banks = paystack.list_banks(&ListBanks {
///     country: "nigeria".to_string(),
///     ..Default::default()
/// })?;
/// println!("{} banks", banks.data.len());
/// # Ok::<(), paystack_core::ApiError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Paystack<T = UreqTransport> {
    client: PaystackClient,
    transport: T,
}

impl Paystack<UreqTransport> {
    /// Client for the production host using the blocking ureq transport.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self::with_transport(config, UreqTransport::new())
    }

    /// See [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, ApiError> {
        Ok(Self::with_config(ClientConfig::from_env()?))
    }
}

impl<T: Transport> Paystack<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: PaystackClient::new(config),
            transport,
        }
    }

    pub fn client(&self) -> &PaystackClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn initialize_transaction(
        &self,
        input: &InitializeTransaction,
    ) -> Result<ApiResponse<InitializedTransaction>, ApiError> {
        let request = self.client.build_initialize_transaction(input)?;
        self.client.parse_initialize_transaction(self.send(request)?)
    }

    pub fn verify_transaction(&self, reference: &str) -> Result<ApiResponse<Transaction>, ApiError> {
        let request = self.client.build_verify_transaction(reference)?;
        self.client.parse_verify_transaction(self.send(request)?)
    }

    pub fn list_transactions(
        &self,
        filter: &ListTransactions,
    ) -> Result<ListResponse<Transaction, PageMeta>, ApiError> {
        let request = self.client.build_list_transactions(filter)?;
        self.client.parse_list_transactions(self.send(request)?)
    }

    pub fn list_banks(&self, filter: &ListBanks) -> Result<ListResponse<Bank, CursorMeta>, ApiError> {
        let request = self.client.build_list_banks(filter)?;
        self.client.parse_list_banks(self.send(request)?)
    }

    pub fn create_recipient(
        &self,
        input: &CreateRecipient,
    ) -> Result<ApiResponse<TransferRecipient>, ApiError> {
        let request = self.client.build_create_recipient(input)?;
        self.client.parse_create_recipient(self.send(request)?)
    }

    pub fn transfer(&self, input: &TransferInput) -> Result<ApiResponse<Transfer>, ApiError> {
        let request = self.client.build_transfer(input)?;
        self.client.parse_transfer(self.send(request)?)
    }

    pub fn confirm_transfer(&self, input: &ConfirmTransfer) -> Result<ApiResponse<Transfer>, ApiError> {
        let request = self.client.build_confirm_transfer(input)?;
        self.client.parse_confirm_transfer(self.send(request)?)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %request.method, path = %request.path, "sending paystack request");
        self.transport.execute(request)
    }
}
