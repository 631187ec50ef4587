//! Fully-defaulted order snapshot used by the generation pipeline.

use super::order::short_id;
use super::{Order, OrderStatus, ShippingAddress};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Name used for line items stored without one.
pub const DEFAULT_ITEM_NAME: &str = "Product";

/// Immutable, normalized copy of an [`Order`].
///
/// Zone builders read from this and never deal with missing fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSnapshot {
    pub id: String,
    pub short_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<ItemLine>,
    pub total: f64,
    pub shipping_address: Option<ShippingAddress>,
}

/// A complete line item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl ItemLine {
    /// Quantity times unit price.
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

impl Order {
    /// Take a normalized snapshot of the order.
    ///
    /// Missing item fields default to `"Product"`, quantity 0 and price 0.
    /// A missing total and non-finite amounts become 0.
    pub fn normalize(&self) -> OrderSnapshot {
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let name = match item.name.as_deref().map(str::trim) {
                    Some(name) if !name.is_empty() => name.to_string(),
                    _ => {
                        log::warn!(
                            "Order {}: item {} has no name, using \"{}\"",
                            self.id,
                            index,
                            DEFAULT_ITEM_NAME
                        );
                        DEFAULT_ITEM_NAME.to_string()
                    }
                };
                let quantity = item.quantity.unwrap_or_else(|| {
                    log::warn!("Order {}: item {} has no quantity, using 0", self.id, index);
                    0
                });
                let unit_price = match item.unit_price {
                    Some(price) if price.is_finite() => price,
                    _ => {
                        log::warn!("Order {}: item {} has no valid price, using 0", self.id, index);
                        0.0
                    }
                };
                ItemLine {
                    name,
                    quantity,
                    unit_price,
                }
            })
            .collect();

        let total = match self.total {
            Some(total) if total.is_finite() => total,
            Some(_) => {
                log::warn!("Order {}: total is not a finite number, using 0", self.id);
                0.0
            }
            None => {
                log::warn!("Order {}: no total, using 0", self.id);
                0.0
            }
        };

        OrderSnapshot {
            id: self.id.clone(),
            short_id: short_id(&self.id),
            status: self.status,
            created_at: self.created_at,
            items,
            total,
            shipping_address: self.shipping_address.clone(),
        }
    }
}
