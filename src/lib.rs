//! # orderdoc
//!
//! Single-page PDF order documents for e-commerce backends.
//!
//! Given an order record this library produces a complete PDF 1.4 file:
//! a status-colored header, order details, a lifecycle timeline summary,
//! the shipping address, the line-item table and the total. The file is
//! serialized by hand (object graph, byte offsets, cross-reference table)
//! using only the standard Type1 fonts, so no font or layout engine is
//! involved.
//!
//! ## Quick Start
//!
//! ```no_run
//! use orderdoc::{generate_from_json, GenerateOptions};
//!
//! fn main() -> orderdoc::Result<()> {
//!     let json = std::fs::read_to_string("order.json")?;
//!     let doc = generate_from_json(&json, &GenerateOptions::default())?;
//!     std::fs::write(&doc.filename, &doc.bytes)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Status-driven output**: receipt, confirmation, preparation note,
//!   shipping note, delivery receipt or cancellation notice
//! - **Lifecycle timeline**: derived per status, also available as JSON
//! - **Safe text**: every string is folded to the standard font repertoire
//! - **Self-checking**: offsets and stream lengths are verified after writing

pub mod document;
pub mod error;
pub mod inspect;
pub mod layout;
pub mod model;
pub mod options;
pub mod sanitize;
pub mod timeline;
pub mod writer;

// Re-export commonly used types
pub use document::{file_name, DocumentStats, GeneratedDocument};
pub use error::{Error, Result};
pub use inspect::{
    detect_format_from_bytes, inspect_bytes, inspect_path, is_pdf_bytes, Inspection, PdfFormat,
};
pub use layout::{Layout, LayoutCursor, ZoneBox, ZoneKind};
pub use model::{
    Color, ItemLine, LineItem, Order, OrderSnapshot, OrderStatus, ShippingAddress, StatusInfo,
};
pub use options::GenerateOptions;
pub use sanitize::{sanitize, sanitize_opt};
pub use timeline::{current_stage, derive_timeline, JsonFormat, TimelineStage};

use chrono::{DateTime, Utc};

/// Generate the document for an order with default options.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use orderdoc::{generate, LineItem, Order, OrderStatus};
///
/// let created = Utc.with_ymd_and_hms(2026, 5, 4, 10, 0, 0).unwrap();
/// let order = Order::new("ord_12345678", OrderStatus::Pending, created, 38.0)
///     .with_item(LineItem::new("Mug", 2, 15.0))
///     .with_item(LineItem::new("Card", 1, 8.0));
///
/// let doc = generate(&order).unwrap();
/// assert_eq!(doc.filename, "Order_Receipt_12345678.pdf");
/// assert!(doc.bytes.starts_with(b"%PDF-1.4"));
/// ```
pub fn generate(order: &Order) -> Result<GeneratedDocument> {
    document::build_document(order, &GenerateOptions::default())
}

/// Generate the document for an order with custom options.
///
/// # Example
///
/// ```no_run
/// use orderdoc::{generate_with_options, GenerateOptions, Order};
///
/// # let order: Order = unimplemented!();
/// let options = GenerateOptions::new()
///     .with_currency("USD")
///     .with_store_name("Corner Shop");
/// let doc = generate_with_options(&order, &options).unwrap();
/// ```
pub fn generate_with_options(order: &Order, options: &GenerateOptions) -> Result<GeneratedDocument> {
    document::build_document(order, options)
}

/// Generate a document when an order was resolved; `None` is a no-op.
pub fn generate_optional(
    order: Option<&Order>,
    options: &GenerateOptions,
) -> Result<Option<GeneratedDocument>> {
    match order {
        Some(order) => document::build_document(order, options).map(Some),
        None => {
            log::debug!("No order resolved, nothing to generate");
            Ok(None)
        }
    }
}

/// Parse an order from JSON and generate its document.
///
/// A JSON `null` is [`Error::MissingOrder`].
pub fn generate_from_json(json: &str, options: &GenerateOptions) -> Result<GeneratedDocument> {
    let order = Order::from_json(json)?;
    document::build_document(&order, options)
}

/// Builder for generating order documents.
///
/// # Example
///
/// ```no_run
/// use orderdoc::OrderDoc;
///
/// let json = std::fs::read_to_string("order.json")?;
/// let doc = OrderDoc::new()
///     .with_currency("GBP")
///     .with_store_name("Tea & Co")
///     .with_date_format("%Y-%m-%d")
///     .generate_json(&json)?;
/// doc.save_to_dir("./out")?;
/// # Ok::<(), orderdoc::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct OrderDoc {
    options: GenerateOptions,
}

impl OrderDoc {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing options.
    pub fn with_options(options: GenerateOptions) -> Self {
        Self { options }
    }

    /// Set the currency suffix.
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.options = self.options.with_currency(currency);
        self
    }

    /// Set the store name.
    pub fn with_store_name(mut self, name: impl Into<String>) -> Self {
        self.options = self.options.with_store_name(name);
        self
    }

    /// Set the date format.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.options = self.options.with_date_format(format);
        self
    }

    /// Pin the wall-clock time.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.options = self.options.with_now(now);
        self
    }

    /// Skip the post-serialization self-check.
    pub fn unchecked(mut self) -> Self {
        self.options = self.options.with_self_check(false);
        self
    }

    /// The options this builder will use.
    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate the document for an order.
    pub fn generate(&self, order: &Order) -> Result<GeneratedDocument> {
        document::build_document(order, &self.options)
    }

    /// Parse an order from JSON and generate its document.
    pub fn generate_json(&self, json: &str) -> Result<GeneratedDocument> {
        generate_from_json(json, &self.options)
    }

    /// Derive the lifecycle timeline of an order.
    pub fn timeline(&self, order: &Order) -> Vec<TimelineStage> {
        derive_timeline(&order.normalize(), &self.options.date_format)
    }
}
