//! Generation options and configuration.

use chrono::{DateTime, Utc};

/// Options for generating order documents.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Currency suffix appended to every amount (e.g. "EUR")
    pub currency: String,

    /// `chrono` format string for dates printed in the document
    pub date_format: String,

    /// Store name printed in the footer and the document info
    pub store_name: String,

    /// Fixed wall-clock time; `None` uses the current time
    pub now: Option<DateTime<Utc>>,

    /// Re-read the serialized buffer and verify offsets and lengths
    pub self_check: bool,
}

impl GenerateOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the currency suffix.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    /// Set the date format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Set the store name.
    pub fn with_store_name(mut self, name: impl Into<String>) -> Self {
        self.store_name = name.into();
        self
    }

    /// Pin the wall-clock time used for the footer year and creation date.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Enable or disable the post-serialization self-check.
    pub fn with_self_check(mut self, check: bool) -> Self {
        self.self_check = check;
        self
    }

    /// The wall-clock time to embed.
    pub fn clock(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    /// Format an amount with two decimals and the currency suffix.
    pub fn money(&self, amount: f64) -> String {
        format!("{:.2} {}", amount, self.currency)
    }

    /// Format a timestamp with the configured date format.
    pub fn date(&self, at: &DateTime<Utc>) -> String {
        format_date(at, &self.date_format)
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            store_name: "Storefront".to_string(),
            now: None,
            self_check: true,
        }
    }
}

/// Day/month/year, the store's display convention.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Format a timestamp, falling back to the default format when the pattern
/// is not a valid `chrono` format string.
pub(crate) fn format_date(at: &DateTime<Utc>, pattern: &str) -> String {
    use chrono::format::{Item, StrftimeItems};
    use std::fmt::Write;

    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    let valid = !items.iter().any(|item| matches!(item, Item::Error));
    let mut out = String::new();
    if valid && write!(out, "{}", at.format_with_items(items.into_iter())).is_ok() {
        return out;
    }
    log::warn!("Invalid date format {:?}, using {}", pattern, DEFAULT_DATE_FORMAT);
    at.format(DEFAULT_DATE_FORMAT).to_string()
}
