//! Generated files opened with an independent PDF reader.

use chrono::{TimeZone, Utc};
use lopdf::{Document, Object};
use orderdoc::{generate_with_options, GenerateOptions, LineItem, Order, OrderStatus};

fn generated(status: OrderStatus, items: usize) -> Vec<u8> {
    let created = Utc.with_ymd_and_hms(2026, 7, 3, 16, 45, 0).unwrap();
    let mut order = Order::new("ord_reader_5150abcd", status, created, items as f64 * 4.0);
    for i in 0..items {
        order = order.with_item(LineItem::new(format!("Item {}", i), 1, 4.0));
    }
    let options = GenerateOptions::new().with_now(created);
    generate_with_options(&order, &options).unwrap().bytes
}

#[test]
fn test_reader_loads_single_page() {
    let bytes = generated(OrderStatus::Processing, 3);
    let doc = Document::load_mem(&bytes).unwrap();

    assert_eq!(doc.version, "1.4");
    assert_eq!(doc.get_pages().len(), 1);
    assert_eq!(doc.objects.len(), 8);
    assert_eq!(doc.trailer.get(b"Root").unwrap().as_reference().unwrap(), (1, 0));
}

#[test]
fn test_reader_sees_fonts_and_content() {
    let bytes = generated(OrderStatus::Shipped, 2);
    let doc = Document::load_mem(&bytes).unwrap();
    let (_, page_id) = doc.get_pages().into_iter().next().unwrap();

    let mut base_fonts: Vec<String> = doc
        .objects
        .values()
        .filter_map(|object| object.as_dict().ok())
        .filter(|dict| dict.has_type(b"Font"))
        .map(|font| {
            String::from_utf8_lossy(font.get(b"BaseFont").unwrap().as_name().unwrap()).to_string()
        })
        .collect();
    base_fonts.sort();
    assert_eq!(
        base_fonts,
        vec!["Helvetica", "Helvetica-Bold", "Helvetica-Oblique"]
    );

    let content = doc.get_page_content(page_id).unwrap();
    let text = String::from_utf8(content).unwrap();
    assert!(text.contains("(Shipping Note) Tj"));
    assert!(text.contains("(Item 1) Tj"));
}

#[test]
fn test_reader_reads_info_dictionary() {
    let bytes = generated(OrderStatus::Delivered, 1);
    let doc = Document::load_mem(&bytes).unwrap();
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_id).unwrap();

    match info.get(b"Title").unwrap() {
        Object::String(title, _) => {
            assert_eq!(title.as_slice(), b"Delivery Receipt - Order #5150abcd")
        }
        other => panic!("unexpected title {:?}", other),
    }
}

#[test]
fn test_reader_accepts_long_orders() {
    let bytes = generated(OrderStatus::Pending, 50);
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}
