//! Order record as handed over by the order store.

use super::OrderStatus;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order record.
///
/// Field names follow the store's camelCase JSON layout. Line items may be
/// partial; [`Order::normalize`](super::Order::normalize) fills the gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier
    pub id: String,

    /// Current lifecycle status
    pub status: OrderStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Ordered line items
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Amount charged for the order
    #[serde(default)]
    pub total: Option<f64>,

    /// Delivery address, if the order ships
    #[serde(default)]
    pub shipping_address: Option<ShippingAddress>,
}

impl Order {
    /// Create an order without items or shipping address.
    pub fn new(
        id: impl Into<String>,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        total: f64,
    ) -> Self {
        Self {
            id: id.into(),
            status,
            created_at,
            items: Vec::new(),
            total: Some(total),
            shipping_address: None,
        }
    }

    /// Add a line item.
    pub fn with_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// Set the shipping address.
    pub fn with_shipping_address(mut self, address: ShippingAddress) -> Self {
        self.shipping_address = Some(address);
        self
    }

    /// Parse an order from the store's JSON representation.
    ///
    /// A JSON `null` means the store resolved no order and yields
    /// [`Error::MissingOrder`].
    pub fn from_json(json: &str) -> Result<Self> {
        let order: Option<Order> = serde_json::from_str(json)?;
        order.ok_or(Error::MissingOrder)
    }

    /// The last 8 characters of the identifier.
    pub fn short_id(&self) -> String {
        short_id(&self.id)
    }
}

/// A single ordered product. Every field may be missing in stored data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product name
    #[serde(default)]
    pub name: Option<String>,

    /// Ordered quantity
    #[serde(default)]
    pub quantity: Option<u32>,

    /// Price of one unit
    #[serde(default, alias = "price")]
    pub unit_price: Option<f64>,
}

impl LineItem {
    /// Create a complete line item.
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        Self {
            name: Some(name.into()),
            quantity: Some(quantity),
            unit_price: Some(unit_price),
        }
    }
}

/// Delivery address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Recipient name
    pub full_name: String,

    /// Street address
    pub address: String,

    /// Postal code
    pub postal_code: String,

    /// City
    pub city: String,

    /// Contact phone number
    #[serde(default)]
    pub phone: Option<String>,
}

impl ShippingAddress {
    /// Create an address without phone number.
    pub fn new(
        full_name: impl Into<String>,
        address: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            address: address.into(),
            postal_code: postal_code.into(),
            city: city.into(),
            phone: None,
        }
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Last 8 characters of an identifier (the whole identifier if shorter).
pub(crate) fn short_id(id: &str) -> String {
    let count = id.chars().count();
    id.chars().skip(count.saturating_sub(8)).collect()
}
