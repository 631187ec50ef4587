//! Order model types.
//!
//! [`Order`] is the record handed over by the order store, [`OrderSnapshot`]
//! is its normalized copy that the rest of the pipeline works on, and the
//! [`status`] registry maps every [`OrderStatus`] to its labels and colors.

mod order;
mod snapshot;
pub mod status;

pub use order::{LineItem, Order, ShippingAddress};
pub use snapshot::{ItemLine, OrderSnapshot, DEFAULT_ITEM_NAME};
pub use status::{Color, OrderStatus, StatusInfo};
