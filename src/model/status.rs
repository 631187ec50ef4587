//! Order status and the status registry.
//!
//! Every status-dependent string and color lives in one table so the
//! timeline, the document layout, the filename and the CLI never carry
//! their own conditionals on the status.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order registered, nothing else happened yet
    Pending,
    /// Waiting for the customer's payment
    AwaitingPayment,
    /// Paid and being prepared
    Processing,
    /// Handed to the carrier
    Shipped,
    /// Received by the customer
    Delivered,
    /// Cancelled at any point of the lifecycle
    Cancelled,
}

impl OrderStatus {
    /// Statuses of the forward lifecycle, in order.
    pub const FORWARD: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::AwaitingPayment,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ];

    /// All statuses, forward ones first.
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Pending,
        OrderStatus::AwaitingPayment,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Position in the forward lifecycle, `None` for [`OrderStatus::Cancelled`].
    pub fn forward_index(self) -> Option<usize> {
        Self::FORWARD.iter().position(|s| *s == self)
    }

    /// Wire name of the status (e.g. `"awaiting_payment"`).
    pub fn as_str(self) -> &'static str {
        self.info().key
    }

    /// Registry entry for this status.
    pub fn info(self) -> &'static StatusInfo {
        match self {
            OrderStatus::Pending => &REGISTRY[0],
            OrderStatus::AwaitingPayment => &REGISTRY[1],
            OrderStatus::Processing => &REGISTRY[2],
            OrderStatus::Shipped => &REGISTRY[3],
            OrderStatus::Delivered => &REGISTRY[4],
            OrderStatus::Cancelled => &REGISTRY[5],
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().label)
    }
}

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Build a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }

    pub const WHITE: Color = Color::hex(0xFFFFFF);

    /// Channels scaled to `0.0..=1.0`.
    pub fn unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }

    /// `#RRGGBB` notation.
    pub fn to_hex_string(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Everything the engine and UI need to know about one status.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusInfo {
    /// Wire name
    pub key: &'static str,
    /// Short badge label
    pub label: &'static str,
    /// Badge and accent color
    pub color: Color,
    /// Title of the document generated while the order has this status
    pub doc_title: &'static str,
    /// Timeline title once the stage has been reached
    pub reached_title: &'static str,
    /// Timeline description once the stage has been reached
    pub reached_description: &'static str,
    /// Timeline title while the stage is still ahead
    pub upcoming_title: &'static str,
    /// Timeline description while the stage is still ahead
    pub upcoming_description: &'static str,
}

impl StatusInfo {
    /// Title and description for a stage, depending on whether it was reached.
    pub fn timeline_text(&self, reached: bool) -> (&'static str, &'static str) {
        if reached {
            (self.reached_title, self.reached_description)
        } else {
            (self.upcoming_title, self.upcoming_description)
        }
    }

    /// Document title with spaces replaced by underscores, for filenames.
    pub fn file_stem(&self) -> String {
        self.doc_title.replace(' ', "_")
    }
}

static REGISTRY: [StatusInfo; 6] = [
    StatusInfo {
        key: "pending",
        label: "Pending",
        color: Color::hex(0xF59E0B),
        doc_title: "Order Receipt",
        reached_title: "Order received",
        reached_description: "Your order has been registered and will be reviewed shortly.",
        upcoming_title: "Order pending",
        upcoming_description: "Your order will be registered once submitted.",
    },
    StatusInfo {
        key: "awaiting_payment",
        label: "Awaiting payment",
        color: Color::hex(0xF97316),
        doc_title: "Order Confirmation",
        reached_title: "Payment requested",
        reached_description: "Your order is confirmed. Payment has been requested to start preparation.",
        upcoming_title: "Awaiting payment",
        upcoming_description: "Payment will be requested once the order is confirmed.",
    },
    StatusInfo {
        key: "processing",
        label: "Processing",
        color: Color::hex(0x3B82F6),
        doc_title: "Preparation Note",
        reached_title: "Payment received",
        reached_description: "Payment received. Your order is being prepared in our warehouse.",
        upcoming_title: "Preparation",
        upcoming_description: "Your order will be prepared as soon as payment is received.",
    },
    StatusInfo {
        key: "shipped",
        label: "Shipped",
        color: Color::hex(0x8B5CF6),
        doc_title: "Shipping Note",
        reached_title: "Shipped",
        reached_description: "Your order has been handed to the carrier and is on its way.",
        upcoming_title: "Shipping",
        upcoming_description: "Your order will be shipped once preparation is complete.",
    },
    StatusInfo {
        key: "delivered",
        label: "Delivered",
        color: Color::hex(0x10B981),
        doc_title: "Delivery Receipt",
        reached_title: "Delivered",
        reached_description: "Your order has been delivered. Thank you for shopping with us.",
        upcoming_title: "Delivery",
        upcoming_description: "Delivery will be confirmed when the carrier hands over the parcel.",
    },
    StatusInfo {
        key: "cancelled",
        label: "Cancelled",
        color: Color::hex(0xEF4444),
        doc_title: "Cancellation Notice",
        reached_title: "Order cancelled",
        reached_description: "This order has been cancelled. Any payment made will be refunded.",
        upcoming_title: "Order cancelled",
        upcoming_description: "This order has been cancelled. Any payment made will be refunded.",
    },
];
