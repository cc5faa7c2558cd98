//! Input validation run before any request leaves the process.
//!
//! Each input type implements [`Validate`] by hand, composing the rule
//! helpers below. All rules run; failures are collected and reported
//! together as one [`ValidationErrors`].

use std::fmt;
use std::sync::LazyLock;

use chrono::DateTime;
use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// A single failed constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub rule: &'static str,
}

/// Every constraint an input failed, in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, rule: &'static str) {
        self.errors.push(FieldError { field, rule });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether `field` failed on any rule.
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Check that `value` is present and not blank.
    pub fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, "required");
        }
        self
    }

    /// Check that `value` survives as a single URL path segment. `.` and `..`
    /// would be dropped or resolved away by URL normalisation.
    pub fn path_segment(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value == "." || value == ".." {
            self.add(field, "path_segment");
        }
        self
    }

    /// Check that `value` is at least `min`.
    pub fn min(&mut self, field: &'static str, value: i64, min: i64) -> &mut Self {
        if value < min {
            self.add(field, "min");
        }
        self
    }

    /// Check that `value` looks like an email address.
    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        if !value.is_empty() && !EMAIL_RE.is_match(value) {
            self.add(field, "email");
        }
        self
    }

    /// Check that `value`, when given, is an RFC 3339 date-time.
    pub fn timestamp(&mut self, field: &'static str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            if !is_timestamp(value) {
                self.add(field, "timestamp");
            }
        }
        self
    }

    /// Check that `value`, when given, is one of `allowed`.
    pub fn one_of(&mut self, field: &'static str, value: Option<&str>, allowed: &[&str]) -> &mut Self {
        if let Some(value) = value {
            if !allowed.contains(&value) {
                self.add(field, "oneof");
            }
        }
        self
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "field '{}' failed on the '{}' rule", e.field, e.rule)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Implemented by every request input the client sends.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

pub fn is_timestamp(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}
