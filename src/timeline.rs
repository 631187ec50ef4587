//! Order lifecycle timeline.
//!
//! The forward lifecycle is `pending → awaiting_payment → processing →
//! shipped → delivered`. Cancellation is an absorbing branch: a cancelled
//! order shows the five forward stages with only `pending` reached, followed
//! by a terminal `cancelled` stage.

use crate::error::Result;
use crate::model::{OrderSnapshot, OrderStatus};
use crate::options::format_date;
use serde::{Deserialize, Serialize};

/// One stage of the lifecycle timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStage {
    /// Status this stage stands for
    pub id: OrderStatus,

    /// Display title
    pub title: String,

    /// Display description
    pub description: String,

    /// Display date, when known
    pub date: Option<String>,

    /// Whether the order has reached this stage
    pub active: bool,

    /// Whether this is the final stage of the displayed sequence
    pub is_last: bool,
}

/// Derive the timeline of an order.
///
/// Pure: the same snapshot and format always give the same stages.
pub fn derive_timeline(order: &OrderSnapshot, date_format: &str) -> Vec<TimelineStage> {
    let cancelled = order.status == OrderStatus::Cancelled;
    // A cancelled order is shown as received, nothing further.
    let current_index = order.status.forward_index().unwrap_or(0);
    let last_forward = OrderStatus::FORWARD.len() - 1;

    let mut stages: Vec<TimelineStage> = OrderStatus::FORWARD
        .iter()
        .enumerate()
        .map(|(index, status)| {
            let active = index <= current_index;
            let (title, description) = status.info().timeline_text(active);
            let date = (*status == OrderStatus::Pending)
                .then(|| format_date(&order.created_at, date_format));
            TimelineStage {
                id: *status,
                title: title.to_string(),
                description: description.to_string(),
                date,
                active,
                is_last: !cancelled && index == last_forward,
            }
        })
        .collect();

    if cancelled {
        let (title, description) = OrderStatus::Cancelled.info().timeline_text(true);
        stages.push(TimelineStage {
            id: OrderStatus::Cancelled,
            title: title.to_string(),
            description: description.to_string(),
            date: None,
            active: true,
            is_last: true,
        });
    }

    stages
}

/// The stage describing the order's current state: the last active one.
pub fn current_stage(stages: &[TimelineStage]) -> Option<&TimelineStage> {
    stages.iter().rev().find(|stage| stage.active)
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a timeline to JSON.
pub fn to_json(stages: &[TimelineStage], format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(stages)?,
        JsonFormat::Compact => serde_json::to_string(stages)?,
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Order;
    use crate::options::DEFAULT_DATE_FORMAT;
    use chrono::{TimeZone, Utc};

    fn timeline_for(status: OrderStatus) -> Vec<TimelineStage> {
        let order = Order::new(
            "ord_abcdef0123456789",
            status,
            Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap(),
            10.0,
        );
        derive_timeline(&order.normalize(), DEFAULT_DATE_FORMAT)
    }

    #[test]
    fn test_forward_statuses() {
        for (current, status) in OrderStatus::FORWARD.iter().enumerate() {
            let stages = timeline_for(*status);
            assert_eq!(stages.len(), 5);
            for (index, stage) in stages.iter().enumerate() {
                assert_eq!(stage.id, OrderStatus::FORWARD[index]);
                assert_eq!(stage.active, index <= current, "{:?} stage {}", status, index);
                assert_eq!(stage.is_last, index == 4);
            }
        }
    }

    #[test]
    fn test_cancelled_branch() {
        let stages = timeline_for(OrderStatus::Cancelled);
        assert_eq!(stages.len(), 6);

        let last = stages.last().unwrap();
        assert_eq!(last.id, OrderStatus::Cancelled);
        assert!(last.active);
        assert!(last.is_last);

        assert!(stages[0].active);
        assert!(stages[1..5].iter().all(|s| !s.active && !s.is_last));
    }

    #[test]
    fn test_text_depends_on_reached() {
        let pending = timeline_for(OrderStatus::Pending);
        let processing = timeline_for(OrderStatus::Processing);
        assert_eq!(pending[2].title, "Preparation");
        assert_eq!(processing[2].title, "Payment received");
        assert_ne!(pending[1].description, processing[1].description);
    }

    #[test]
    fn test_pending_stage_has_creation_date() {
        let stages = timeline_for(OrderStatus::Shipped);
        assert_eq!(stages[0].date.as_deref(), Some("01/02/2026"));
        assert!(stages[1..].iter().all(|s| s.date.is_none()));
    }

    #[test]
    fn test_current_stage() {
        let stages = timeline_for(OrderStatus::Shipped);
        assert_eq!(current_stage(&stages).unwrap().id, OrderStatus::Shipped);

        let stages = timeline_for(OrderStatus::Cancelled);
        assert_eq!(current_stage(&stages).unwrap().id, OrderStatus::Cancelled);

        assert!(current_stage(&[]).is_none());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(
            timeline_for(OrderStatus::Processing),
            timeline_for(OrderStatus::Processing)
        );
    }

    #[test]
    fn test_to_json() {
        let stages = timeline_for(OrderStatus::Delivered);
        let pretty = to_json(&stages, JsonFormat::Pretty).unwrap();
        assert!(pretty.contains("\"awaiting_payment\""));
        assert!(pretty.contains('\n'));

        let compact = to_json(&stages, JsonFormat::Compact).unwrap();
        assert!(!compact.contains('\n'));
        assert!(compact.contains("\"is_last\":true"));
    }
}
