//! Zone builders. Each one reads the cursor, paints, and closes its zone.

use super::{
    truncate_to_width, wrap_words, Canvas, Font, LayoutContext, ZoneKind, CONTENT_WIDTH,
    FOOTER_TOP, MARGIN_LEFT, PAGE_HEIGHT, PAGE_WIDTH,
};
use crate::model::{Color, ShippingAddress};
use crate::sanitize::sanitize;
use crate::timeline::current_stage;

const INK: Color = Color::hex(0x111827);
const MUTED: Color = Color::hex(0x6B7280);
const HEADER_BG: Color = Color::hex(0x1F2937);
const HEADER_SUBTITLE: Color = Color::hex(0xD1D5DB);
const BOX_BG: Color = Color::hex(0xF3F4F6);
const TABLE_HEAD_BG: Color = Color::hex(0x374151);
const ZEBRA_BG: Color = Color::hex(0xF9FAFB);

const HEADER_HEIGHT: f32 = 100.0;
const PADDING: f32 = 12.0;
const INFO_LINE_HEIGHT: f32 = 16.0;
const BOX_TITLE_HEIGHT: f32 = 16.0;
const BOX_LINE_HEIGHT: f32 = 14.0;
const ACCENT_WIDTH: f32 = 4.0;
const WRAP_CHARS: usize = 90;

const ROW_HEIGHT: f32 = 20.0;
const ROW_BASELINE: f32 = 6.0;
const CELL_PADDING: f32 = 8.0;
const COL_PRODUCT: f32 = MARGIN_LEFT + CELL_PADDING;
const COL_QTY_RIGHT: f32 = 390.0;
const COL_UNIT_RIGHT: f32 = 480.0;
const COL_TOTAL_RIGHT: f32 = MARGIN_LEFT + CONTENT_WIDTH - CELL_PADDING;
/// Room left of the Qty column for the product name.
const PRODUCT_MAX_WIDTH: f32 = COL_QTY_RIGHT - 40.0 - COL_PRODUCT;

const TOTAL_BAND_HEIGHT: f32 = 30.0;
const FOOTER_LINE_HEIGHT: f32 = 12.0;
const FOOTER_HEIGHT: f32 = 44.0;

pub(super) fn header(canvas: &mut Canvas, ctx: &LayoutContext<'_>) {
    let info = ctx.order.status.info();
    let top = PAGE_HEIGHT;
    let bottom = top - HEADER_HEIGHT;

    canvas.fill_rect(HEADER_BG, 0.0, bottom, PAGE_WIDTH, HEADER_HEIGHT);
    canvas.text(Font::Bold, 22.0, Color::WHITE, MARGIN_LEFT, top - 42.0, info.doc_title);
    canvas.text(
        Font::Regular,
        12.0,
        HEADER_SUBTITLE,
        MARGIN_LEFT,
        top - 67.0,
        &format!("Order #{}", sanitize(&ctx.order.short_id)),
    );
    canvas.text_right(
        Font::Bold,
        12.0,
        info.color,
        MARGIN_LEFT + CONTENT_WIDTH,
        top - 42.0,
        info.label,
    );

    canvas.close_zone(ZoneKind::Header, top, bottom);
}

pub(super) fn order_info(canvas: &mut Canvas, ctx: &LayoutContext<'_>) {
    let options = ctx.options;
    let rows = [
        ("Date:", sanitize(&options.date(&ctx.order.created_at))),
        ("Status:", ctx.order.status.info().label.to_string()),
        ("Total:", sanitize(&options.money(ctx.order.total))),
    ];

    let top = canvas.cursor().next_top();
    let height = 2.0 * PADDING + rows.len() as f32 * INFO_LINE_HEIGHT;
    let bottom = top - height;
    canvas.fill_rect(BOX_BG, MARGIN_LEFT, bottom, CONTENT_WIDTH, height);

    for (index, (label, value)) in rows.iter().enumerate() {
        let y = top - PADDING - (index as f32 + 1.0) * INFO_LINE_HEIGHT + 4.0;
        canvas.text(Font::Bold, 10.0, INK, MARGIN_LEFT + PADDING, y, label);
        canvas.text(Font::Regular, 10.0, INK, MARGIN_LEFT + PADDING + 60.0, y, value);
    }

    canvas.close_zone(ZoneKind::OrderInfo, top, bottom);
}

pub(super) fn status(canvas: &mut Canvas, ctx: &LayoutContext<'_>) {
    let info = ctx.order.status.info();
    let (title, description) = match current_stage(ctx.stages) {
        Some(stage) => (stage.title.as_str(), stage.description.as_str()),
        None => info.timeline_text(true),
    };
    let lines = wrap_words(&sanitize(description), WRAP_CHARS);
    titled_box(canvas, ZoneKind::Status, Some(info.color), &sanitize(title), &lines);
}

pub(super) fn shipping_address(canvas: &mut Canvas, address: &ShippingAddress) {
    let mut lines = Vec::new();
    lines.extend(wrap_words(&sanitize(&address.full_name), WRAP_CHARS));
    lines.extend(wrap_words(&sanitize(&address.address), WRAP_CHARS));
    lines.extend(wrap_words(
        &sanitize(&format!("{} {}", address.postal_code, address.city)),
        WRAP_CHARS,
    ));
    if let Some(phone) = address.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        lines.push(format!("Phone: {}", sanitize(phone)));
    }
    titled_box(canvas, ZoneKind::ShippingAddress, None, "Shipping address", &lines);
}

/// Light box with a bold title and body lines; grows with the line count.
fn titled_box(
    canvas: &mut Canvas,
    kind: ZoneKind,
    accent: Option<Color>,
    title: &str,
    lines: &[String],
) {
    let top = canvas.cursor().next_top();
    let height = 2.0 * PADDING + BOX_TITLE_HEIGHT + lines.len() as f32 * BOX_LINE_HEIGHT;
    let bottom = top - height;

    canvas.fill_rect(BOX_BG, MARGIN_LEFT, bottom, CONTENT_WIDTH, height);
    let mut text_x = MARGIN_LEFT + PADDING;
    if let Some(color) = accent {
        canvas.fill_rect(color, MARGIN_LEFT, bottom, ACCENT_WIDTH, height);
        text_x += ACCENT_WIDTH;
    }

    canvas.text(Font::Bold, 12.0, INK, text_x, top - PADDING - 10.0, title);
    for (index, line) in lines.iter().enumerate() {
        let y = top - PADDING - BOX_TITLE_HEIGHT - 10.0 - index as f32 * BOX_LINE_HEIGHT;
        canvas.text(Font::Regular, 10.0, INK, text_x, y, line);
    }

    canvas.close_zone(kind, top, bottom);
}

pub(super) fn item_table(canvas: &mut Canvas, ctx: &LayoutContext<'_>) {
    let options = ctx.options;
    let top = canvas.cursor().next_top();

    // Header row
    let header_bottom = top - ROW_HEIGHT;
    canvas.fill_rect(TABLE_HEAD_BG, MARGIN_LEFT, header_bottom, CONTENT_WIDTH, ROW_HEIGHT);
    let y = header_bottom + ROW_BASELINE;
    canvas.text(Font::Bold, 10.0, Color::WHITE, COL_PRODUCT, y, "Product");
    canvas.text_right(Font::Bold, 10.0, Color::WHITE, COL_QTY_RIGHT, y, "Qty");
    canvas.text_right(Font::Bold, 10.0, Color::WHITE, COL_UNIT_RIGHT, y, "Unit price");
    canvas.text_right(Font::Bold, 10.0, Color::WHITE, COL_TOTAL_RIGHT, y, "Total");

    let rows_top = header_bottom;
    for (index, item) in ctx.order.items.iter().enumerate() {
        let row_top = rows_top - index as f32 * ROW_HEIGHT;
        let row_bottom = row_top - ROW_HEIGHT;
        if index % 2 == 1 {
            canvas.fill_rect(ZEBRA_BG, MARGIN_LEFT, row_bottom, CONTENT_WIDTH, ROW_HEIGHT);
        }
        let y = row_bottom + ROW_BASELINE;
        let name = truncate_to_width(
            &sanitize(&item.name),
            Font::Regular,
            10.0,
            PRODUCT_MAX_WIDTH,
        );
        canvas.text(Font::Regular, 10.0, INK, COL_PRODUCT, y, &name);
        canvas.text_right(
            Font::Regular,
            10.0,
            INK,
            COL_QTY_RIGHT,
            y,
            &item.quantity.to_string(),
        );
        canvas.text_right(
            Font::Regular,
            10.0,
            INK,
            COL_UNIT_RIGHT,
            y,
            &sanitize(&options.money(item.unit_price)),
        );
        canvas.text_right(
            Font::Bold,
            10.0,
            INK,
            COL_TOTAL_RIGHT,
            y,
            &sanitize(&options.money(item.line_total())),
        );
    }

    let bottom = rows_top - ctx.order.items.len() as f32 * ROW_HEIGHT;
    canvas.close_zone(ZoneKind::ItemTable, top, bottom);
}

pub(super) fn total(canvas: &mut Canvas, ctx: &LayoutContext<'_>) {
    let top = canvas.cursor().next_top();
    let bottom = top - TOTAL_BAND_HEIGHT;
    canvas.fill_rect(HEADER_BG, MARGIN_LEFT, bottom, CONTENT_WIDTH, TOTAL_BAND_HEIGHT);

    let y = bottom + 10.0;
    canvas.text_right(Font::Bold, 12.0, Color::WHITE, COL_UNIT_RIGHT, y, "TOTAL");
    canvas.text_right(
        Font::Bold,
        12.0,
        Color::WHITE,
        COL_TOTAL_RIGHT,
        y,
        &sanitize(&ctx.options.money(ctx.order.total)),
    );

    canvas.close_zone(ZoneKind::Total, top, bottom);
}

pub(super) fn footer(canvas: &mut Canvas, ctx: &LayoutContext<'_>) {
    let store = sanitize(&ctx.options.store_name);
    let lines = [
        format!("Thank you for your order at {}.", store),
        format!(
            "This document was generated automatically on {} and is not an invoice.",
            sanitize(&ctx.options.date(&ctx.now))
        ),
        format!("Copyright {} {}. All rights reserved.", ctx.now.format("%Y"), store),
    ];

    // Anchored at the page bottom unless the body already reaches past it.
    let top = canvas.cursor().next_top().min(FOOTER_TOP);
    let bottom = top - FOOTER_HEIGHT;
    let center = PAGE_WIDTH / 2.0;
    for (index, line) in lines.iter().enumerate() {
        let y = top - (index as f32 + 1.0) * FOOTER_LINE_HEIGHT;
        canvas.text_centered(Font::Oblique, 8.0, MUTED, center, y, line);
    }

    canvas.close_zone(ZoneKind::Footer, top, bottom);
}

#[cfg(test)]
mod tests {
    use super::super::{build_layout, Layout, LayoutContext, Op, ZoneKind};
    use crate::model::{LineItem, Order, OrderStatus, ShippingAddress};
    use crate::options::GenerateOptions;
    use crate::timeline::derive_timeline;
    use chrono::{TimeZone, Utc};

    fn layout_for(order: &Order) -> Layout {
        let snapshot = order.normalize();
        let options = GenerateOptions::default();
        let stages = derive_timeline(&snapshot, &options.date_format);
        let ctx = LayoutContext {
            order: &snapshot,
            stages: &stages,
            options: &options,
            now: Utc.with_ymd_and_hms(2026, 10, 16, 8, 0, 0).unwrap(),
        };
        build_layout(&ctx)
    }

    fn order(items: usize, address: bool) -> Order {
        let mut order = Order::new(
            "ord_5555666677778888",
            OrderStatus::Processing,
            Utc.with_ymd_and_hms(2026, 9, 1, 14, 0, 0).unwrap(),
            42.0,
        );
        for i in 0..items {
            order = order.with_item(LineItem::new(format!("Item {}", i), 1, 1.0));
        }
        if address {
            order = order.with_shipping_address(
                ShippingAddress::new("Jeanne Martin", "12 rue des Lilas", "69003", "Lyon")
                    .with_phone("+33 6 00 00 00 00"),
            );
        }
        order
    }

    fn text_y(layout: &Layout, prefix: &str) -> f32 {
        layout
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Text { text, y, .. } if text.starts_with(prefix) => Some(*y),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_zone_order_with_address() {
        let layout = layout_for(&order(2, true));
        let kinds: Vec<_> = layout.zones.iter().map(|z| z.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ZoneKind::Header,
                ZoneKind::OrderInfo,
                ZoneKind::Status,
                ZoneKind::ShippingAddress,
                ZoneKind::ItemTable,
                ZoneKind::Total,
                ZoneKind::Footer,
            ]
        );
    }

    #[test]
    fn test_address_box_omitted() {
        let layout = layout_for(&order(2, false));
        assert!(layout.zone(ZoneKind::ShippingAddress).is_none());
        let status = layout.zone(ZoneKind::Status).unwrap();
        let table = layout.zone(ZoneKind::ItemTable).unwrap();
        assert_eq!(table.top, status.bottom - super::super::ZONE_GAP);
    }

    #[test]
    fn test_zones_never_overlap() {
        for items in 0..=50 {
            for address in [false, true] {
                let layout = layout_for(&order(items, address));
                assert_eq!(layout.zones.last().map(|z| z.kind), Some(ZoneKind::Footer));
                for pair in layout.zones.windows(2) {
                    let (prev, next) = (pair[0], pair[1]);
                    assert!(
                        next.top < prev.bottom,
                        "{:?} overlaps {:?} with {} items",
                        next.kind,
                        prev.kind,
                        items
                    );
                    assert!(next.bottom < next.top);
                }
            }
        }
    }

    #[test]
    fn test_address_shifts_table_down() {
        let without = layout_for(&order(3, false));
        let with = layout_for(&order(3, true));
        let a = without.zone(ZoneKind::ItemTable).unwrap();
        let b = with.zone(ZoneKind::ItemTable).unwrap();
        let address = with.zone(ZoneKind::ShippingAddress).unwrap();
        assert!((a.top - b.top - (address.height() + super::super::ZONE_GAP)).abs() < 1e-3);
    }

    #[test]
    fn test_table_height_tracks_items() {
        let layout = layout_for(&order(4, false));
        let table = layout.zone(ZoneKind::ItemTable).unwrap();
        assert_eq!(table.height(), 5.0 * super::ROW_HEIGHT);
    }

    #[test]
    fn test_zebra_rows_painted_before_text() {
        let layout = layout_for(&order(3, false));
        let ops = &layout.ops;
        let text_at = |name: &str| {
            ops.iter()
                .position(|op| matches!(op, Op::Text { text, .. } if text == name))
                .unwrap()
        };
        let (row0, row1) = (text_at("Item 0"), text_at("Item 1"));

        // Only row 1 is odd; its stripe sits between row 0's and row 1's text.
        let stripes: Vec<usize> = ops
            .iter()
            .enumerate()
            .skip(row0)
            .filter(|(_, op)| {
                matches!(op, Op::FillRect { height, .. } if *height == super::ROW_HEIGHT)
            })
            .map(|(i, _)| i)
            .collect();
        assert_eq!(stripes.len(), 1);
        assert!(stripes[0] > row0 && stripes[0] < row1);
    }

    #[test]
    fn test_many_items_flag_overflow() {
        assert!(!layout_for(&order(5, true)).overflow);
        assert!(layout_for(&order(40, true)).overflow);
    }

    #[test]
    fn test_footer_anchored_at_page_bottom() {
        let layout = layout_for(&order(2, false));
        let footer = layout.zone(ZoneKind::Footer).unwrap();
        assert_eq!(footer.top, super::FOOTER_TOP);
        assert_eq!(text_y(&layout, "Thank you"), 52.0);
        assert_eq!(text_y(&layout, "Copyright"), 28.0);
    }

    #[test]
    fn test_footer_moves_below_long_item_list() {
        let layout = layout_for(&order(20, false));
        assert!(layout.overflow);

        let total = layout.zone(ZoneKind::Total).unwrap();
        let footer = layout.zone(ZoneKind::Footer).unwrap();
        assert_eq!(footer.top, total.bottom - super::super::ZONE_GAP);
        for line in ["Thank you", "This document", "Copyright"] {
            let y = text_y(&layout, line);
            assert!(y < total.bottom && y > footer.bottom, "{} at y={}", line, y);
        }
    }

    #[test]
    fn test_wide_product_name_stays_left_of_qty() {
        let wide = "W".repeat(60);
        let order = order(0, false).with_item(LineItem::new(wide.as_str(), 1, 1.0));
        let layout = layout_for(&order);
        let (x, text) = layout
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Text { text, x, .. } if text.starts_with("WWW") => Some((*x, text.clone())),
                _ => None,
            })
            .unwrap();
        assert!(text.ends_with("..."));
        let right = x + super::super::Font::Regular.text_width(&text, 10.0);
        assert!(right < super::COL_QTY_RIGHT - 30.0);
    }

    #[test]
    fn test_footer_has_year_and_store() {
        let layout = layout_for(&order(1, false));
        let texts: Vec<_> = layout
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"Copyright 2026 Storefront. All rights reserved."));
        assert!(texts.contains(&"Order #77778888"));
        assert!(texts.contains(&"Preparation Note"));
    }
}
