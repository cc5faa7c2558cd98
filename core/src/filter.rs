//! Reduce a list filter to the fields that should reach the query string.
//!
//! The list endpoints treat a missing parameter differently from an explicit
//! zero, so default values are dropped here. Each filter maps its own fields
//! to wire names; nothing is discovered at runtime.

use serde_json::{Map, Value};

use crate::types::{ListBanks, ListTransactions};

/// Wire name to value, sorted by key.
pub type FilteredFields = Map<String, Value>;

pub trait FilterFields {
    /// The fields that hold a non-default value, keyed by wire name.
    fn filter_fields(&self) -> FilteredFields;
}

/// Accumulates the present fields of one filter.
#[derive(Debug, Default)]
struct Present(FilteredFields);

impl Present {
    fn str(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::from(value));
        }
        self
    }

    fn int(mut self, key: &str, value: i64) -> Self {
        if value != 0 {
            self.0.insert(key.to_string(), Value::from(value));
        }
        self
    }

    fn flag(mut self, key: &str, value: Option<bool>) -> Self {
        if let Some(value) = value {
            self.0.insert(key.to_string(), Value::Bool(value));
        }
        self
    }
}

impl FilterFields for ListTransactions {
    fn filter_fields(&self) -> FilteredFields {
        Present::default()
            .int("perPage", self.per_page)
            .int("page", self.page)
            .int("customer", self.customer)
            .str("terminalid", &self.terminal_id)
            .str("status", &self.status)
            .str("from", &self.from)
            .str("to", &self.to)
            .int("amount", self.amount)
            .0
    }
}

impl FilterFields for ListBanks {
    fn filter_fields(&self) -> FilteredFields {
        Present::default()
            .str("country", &self.country)
            .flag("use_cursor", self.use_cursor)
            .int("perPage", self.per_page)
            .flag("pay_with_bank_transfer", self.pay_with_bank_transfer)
            .flag("pay_with_bank", self.pay_with_bank)
            .flag("enabled_for_verification", self.enabled_for_verification)
            .str("next", &self.next)
            .str("previous", &self.previous)
            .str("gateway", &self.gateway)
            .str("type", &self.bank_type)
            .str("currency", &self.currency)
            .0
    }
}
