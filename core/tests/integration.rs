//! End-to-end run of every operation against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the `Paystack`
//! facade over real HTTP with the default `UreqTransport`. Confirms that
//! request building, the wire format, and response parsing agree with the
//! server.

use paystack_core::{
    ApiError, ClientConfig, ConfirmTransfer, CreateRecipient, InitializeTransaction, ListBanks,
    ListTransactions, Paystack, TransferInput,
};

fn start_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn paystack(base_url: &str) -> Paystack {
    Paystack::with_config(ClientConfig::new(mock_server::TEST_SECRET_KEY).with_base_url(base_url))
}

#[test]
fn payment_and_transfer_lifecycle() {
    let base_url = start_mock_server();
    let client = paystack(&base_url);

    // Step 1: verify the seeded transaction.
    let verified = client.verify_transaction(mock_server::SEEDED_REFERENCE).unwrap();
    assert!(verified.status);
    assert_eq!(verified.data.reference, "0l2qk643pk");
    assert_eq!(verified.data.amount, 2000000);
    assert_eq!(verified.data.currency, "NGN");

    // Step 2: initialize a new transaction.
    let initialized = client
        .initialize_transaction(&InitializeTransaction {
            email: "johndoe@test.com".to_string(),
            amount: 100_000,
            reference: Some("int-test-ref".to_string()),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(initialized.data.reference, "int-test-ref");
    assert!(initialized.data.authorization_url.ends_with(&initialized.data.access_code));

    // Step 3: the new transaction is listed and verifiable.
    let listed = client
        .list_transactions(&ListTransactions {
            per_page: 10,
            page: 1,
            ..Default::default()
        })
        .unwrap();
    assert_eq!(listed.meta.total, 2);
    assert_eq!(listed.meta.per_page, 10);
    assert_eq!(listed.data[0].reference, "int-test-ref");

    let pending = client.verify_transaction("int-test-ref").unwrap();
    assert_eq!(pending.data.status, "abandoned");
    assert!(pending.data.paid_at.is_null());
    assert_eq!(pending.data.customer.email, "johndoe@test.com");

    // Step 4: status filter reaches the server.
    let successful = client
        .list_transactions(&ListTransactions {
            status: "success".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(successful.data.len(), 1);
    assert_eq!(successful.data[0].reference, "0l2qk643pk");

    // Step 5: a duplicate reference is an HTTP error with the server's message.
    let err = client
        .initialize_transaction(&InitializeTransaction {
            email: "johndoe@test.com".to_string(),
            amount: 100_000,
            reference: Some("int-test-ref".to_string()),
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Http { status: 400, ref message } if message == "Duplicate Transaction Reference"
    ));

    // Step 6: list banks with a cursor.
    let banks = client
        .list_banks(&ListBanks {
            country: "nigeria".to_string(),
            per_page: 2,
            use_cursor: Some(true),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(banks.data.len(), 2);
    assert_eq!(banks.meta.per_page, 2);
    let next = banks.meta.next.get().cloned().unwrap();
    let more = client
        .list_banks(&ListBanks {
            country: "nigeria".to_string(),
            per_page: 2,
            next,
            ..Default::default()
        })
        .unwrap();
    assert!(more.data.iter().all(|b| !banks.data.contains(b)));

    // Step 7: create a recipient (server answers 201).
    let recipient = client
        .create_recipient(&CreateRecipient {
            recipient_type: "nuban".to_string(),
            name: "OLURUNFEMI WINNER DARAMOLA".to_string(),
            account_number: "0087476870".to_string(),
            bank_code: "044".to_string(),
            currency: Some("NGN".to_string()),
            description: Some("test".to_string()),
        })
        .unwrap();
    let recipient_code = recipient.data.recipient_code.clone();
    assert!(recipient_code.starts_with("RCP_"));
    assert_eq!(recipient.data.details.bank_name.get().map(String::as_str), Some("Access Bank"));

    // Step 8: initiate a transfer with defaults filled in.
    let transfer = client
        .transfer(&TransferInput {
            amount: 50 * 100,
            recipient: recipient_code,
            reason: "test".to_string(),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(transfer.data.status, "otp");
    assert_eq!(transfer.data.currency, "NGN");
    assert_eq!(transfer.data.source, "balance");
    assert!(transfer.data.reference.get().is_some_and(|r| !r.is_empty()));
    let transfer_code = transfer.data.transfer_code.clone();

    // Step 9: a wrong OTP comes back as HTTP 200 with status false.
    let err = client
        .confirm_transfer(&ConfirmTransfer {
            transfer_code: transfer_code.clone(),
            otp: "000000".to_string(),
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Rejected { ref message } if message == "Invalid OTP"));

    // Step 10: the right OTP finalizes it.
    let confirmed = client
        .confirm_transfer(&ConfirmTransfer {
            transfer_code,
            otp: mock_server::VALID_OTP.to_string(),
        })
        .unwrap();
    assert_eq!(confirmed.data.status, "success");
    assert_eq!(confirmed.message, "Transfer has been queued");
}

#[test]
fn wrong_key_is_an_http_error() {
    let base_url = start_mock_server();
    let client = Paystack::with_config(ClientConfig::new("sk_test_wrong").with_base_url(&base_url));

    let err = client.list_banks(&ListBanks::default()).unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 401, ref message } if message == "Invalid key"));
}

#[test]
fn unknown_reference_is_an_http_error() {
    let base_url = start_mock_server();
    let err = paystack(&base_url).verify_transaction("missing-ref").unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 400, .. }));
    assert_eq!(err.remote_message(), Some("Transaction reference not found"));
}

#[test]
fn transfer_without_recipient_fails_locally() {
    // Nothing listens here; reaching the network would be a transport error.
    let client = Paystack::with_config(ClientConfig::new("k").with_base_url("http://127.0.0.1:1"));
    let err = client
        .transfer(&TransferInput {
            amount: 5000,
            ..Default::default()
        })
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let client = Paystack::with_config(ClientConfig::new("k").with_base_url("http://127.0.0.1:1"));
    let err = client.verify_transaction("ref").unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
