//! Property tests for text folding and file structure.

use chrono::{TimeZone, Utc};
use orderdoc::{
    generate_with_options, inspect_bytes, sanitize, GenerateOptions, LineItem, Order, OrderStatus,
};
use proptest::prelude::*;

fn order_with_items(names: &[String], status: OrderStatus) -> Order {
    let created = Utc.with_ymd_and_hms(2026, 2, 14, 11, 0, 0).unwrap();
    let mut order = Order::new("ord_prop_00000042", status, created, 0.0);
    for (index, name) in names.iter().enumerate() {
        order = order.with_item(LineItem::new(name.clone(), index as u32 + 1, 2.5));
    }
    order
}

proptest! {
    #[test]
    fn sanitized_text_is_safe_ascii(input in ".*") {
        let out = sanitize(&input);
        prop_assert!(out.chars().all(|c| (' '..='~').contains(&c)), "{:?}", out);
        prop_assert!(!out.contains(['(', ')', '\\']));
    }

    #[test]
    fn sanitize_is_idempotent(input in ".*") {
        let once = sanitize(&input);
        prop_assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn printable_ascii_survives(input in "[ -'*-\\[\\]-~]*") {
        // Printable ASCII other than parentheses and backslash is unchanged.
        prop_assert_eq!(sanitize(&input), input);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn lengths_and_offsets_match_bytes(
        names in prop::collection::vec("\\PC{0,60}", 0..=50),
        status_index in 0usize..6,
    ) {
        let status = OrderStatus::ALL[status_index];
        let options = GenerateOptions::new()
            .with_now(Utc.with_ymd_and_hms(2026, 2, 15, 0, 0, 0).unwrap())
            .with_self_check(false);
        let doc = generate_with_options(&order_with_items(&names, status), &options).unwrap();

        let report = inspect_bytes(&doc.bytes).unwrap();
        prop_assert_eq!(report.xref_offset, doc.stats.xref_offset);
        prop_assert_eq!(report.size, 9);
        prop_assert_eq!(report.streams.len(), 1);
        prop_assert_eq!(report.streams[0].declared_length, doc.stats.content_length);
        prop_assert_eq!(doc.stats.item_rows, names.len());
        prop_assert!(doc.bytes[15..].is_ascii());
    }
}
