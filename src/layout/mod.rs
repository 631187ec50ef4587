//! Page layout and content-stream construction.
//!
//! The page is a fixed Letter canvas (612×792 points, origin bottom-left).
//! Zones are laid out top to bottom through a [`LayoutCursor`]: each zone
//! starts a fixed gap below the previous zone's bottom and reports its own
//! bottom back to the cursor, so optional zones and variable item counts
//! shift everything below them instead of overlapping it.

mod metrics;
mod ops;
mod zones;

pub use metrics::Font;
pub use ops::{encode, Op};

use crate::error::Result;
use crate::model::{Color, OrderSnapshot};
use crate::options::GenerateOptions;
use crate::timeline::TimelineStage;
use chrono::{DateTime, Utc};

/// Page width in points (8.5 in).
pub const PAGE_WIDTH: f32 = 612.0;
/// Page height in points (11 in).
pub const PAGE_HEIGHT: f32 = 792.0;
/// Left edge of the content column.
pub const MARGIN_LEFT: f32 = 50.0;
/// Width of the content column.
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_LEFT;
/// Vertical space between consecutive zones.
pub const ZONE_GAP: f32 = 16.0;
/// Footer top when the body leaves room for it at the page bottom.
pub const FOOTER_TOP: f32 = 64.0;

/// The kinds of zones a page is made of, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Header,
    OrderInfo,
    Status,
    ShippingAddress,
    ItemTable,
    Total,
    Footer,
}

/// Vertical extent of a laid-out zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneBox {
    pub kind: ZoneKind,
    pub top: f32,
    pub bottom: f32,
}

impl ZoneBox {
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Running vertical offset threaded through the zone builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    y: f32,
}

impl LayoutCursor {
    /// A cursor at the top edge of the page.
    pub fn top_of_page() -> Self {
        Self { y: PAGE_HEIGHT }
    }

    /// Bottom of the last placed zone.
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Top for the next zone, one gap below the last one.
    pub fn next_top(&self) -> f32 {
        self.y - ZONE_GAP
    }

    fn advance_to(&mut self, bottom: f32) {
        self.y = bottom;
    }
}

/// Inputs shared by all zone builders.
#[derive(Debug, Clone, Copy)]
pub struct LayoutContext<'a> {
    pub order: &'a OrderSnapshot,
    pub stages: &'a [TimelineStage],
    pub options: &'a GenerateOptions,
    pub now: DateTime<Utc>,
}

/// A laid-out page: operators in paint order plus zone geometry.
#[derive(Debug, Clone)]
pub struct Layout {
    pub ops: Vec<Op>,
    pub zones: Vec<ZoneBox>,
    /// Body content reaches into the footer area
    pub overflow: bool,
}

impl Layout {
    /// Encode the operators into content-stream text.
    pub fn content_stream(&self) -> Result<String> {
        encode(&self.ops)
    }

    /// Geometry of a zone, if it was laid out.
    pub fn zone(&self, kind: ZoneKind) -> Option<&ZoneBox> {
        self.zones.iter().find(|z| z.kind == kind)
    }
}

/// Lay out the whole page.
pub fn build_layout(ctx: &LayoutContext<'_>) -> Layout {
    let mut canvas = Canvas::new();

    zones::header(&mut canvas, ctx);
    zones::order_info(&mut canvas, ctx);
    zones::status(&mut canvas, ctx);
    if let Some(address) = ctx.order.shipping_address.as_ref() {
        zones::shipping_address(&mut canvas, address);
    }
    zones::item_table(&mut canvas, ctx);
    zones::total(&mut canvas, ctx);

    let overflow = canvas.cursor.next_top() < FOOTER_TOP;
    if overflow {
        log::warn!(
            "Order {}: content ends at y={}, footer pushed off its page-bottom anchor ({} items)",
            ctx.order.id,
            canvas.cursor.y(),
            ctx.order.items.len()
        );
    }

    zones::footer(&mut canvas, ctx);

    log::debug!(
        "Laid out {} zones, {} operators for order {}",
        canvas.zones.len(),
        canvas.ops.len(),
        ctx.order.id
    );

    Layout {
        ops: canvas.ops,
        zones: canvas.zones,
        overflow,
    }
}

/// Operator sink with the layout cursor and zone log.
pub(crate) struct Canvas {
    ops: Vec<Op>,
    zones: Vec<ZoneBox>,
    cursor: LayoutCursor,
    fill: Option<Color>,
}

impl Canvas {
    fn new() -> Self {
        Self {
            ops: Vec::new(),
            zones: Vec::new(),
            cursor: LayoutCursor::top_of_page(),
            fill: None,
        }
    }

    pub(crate) fn cursor(&self) -> LayoutCursor {
        self.cursor
    }

    /// Record a finished zone and move the cursor to its bottom.
    pub(crate) fn close_zone(&mut self, kind: ZoneKind, top: f32, bottom: f32) {
        self.zones.push(ZoneBox { kind, top, bottom });
        self.cursor.advance_to(bottom);
    }

    fn set_fill(&mut self, color: Color) {
        if self.fill != Some(color) {
            self.ops.push(Op::FillColor(color));
            self.fill = Some(color);
        }
    }

    pub(crate) fn fill_rect(&mut self, color: Color, x: f32, y: f32, width: f32, height: f32) {
        self.set_fill(color);
        self.ops.push(Op::FillRect {
            x,
            y,
            width,
            height,
        });
    }

    pub(crate) fn text(&mut self, font: Font, size: f32, color: Color, x: f32, y: f32, text: &str) {
        if text.is_empty() {
            return;
        }
        self.set_fill(color);
        self.ops.push(Op::Text {
            font,
            size,
            x,
            y,
            text: text.to_string(),
        });
    }

    /// Text whose right edge sits at `right`.
    pub(crate) fn text_right(
        &mut self,
        font: Font,
        size: f32,
        color: Color,
        right: f32,
        y: f32,
        text: &str,
    ) {
        let x = right - font.text_width(text, size);
        self.text(font, size, color, x, y, text);
    }

    /// Text horizontally centered on `center`.
    pub(crate) fn text_centered(
        &mut self,
        font: Font,
        size: f32,
        color: Color,
        center: f32,
        y: f32,
        text: &str,
    ) {
        let x = center - font.text_width(text, size) / 2.0;
        self.text(font, size, color, x, y, text);
    }
}

/// Greedy word wrap on character count. Words longer than `width` are split.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }
        let word: String = word.into_iter().collect();
        let needed = if line.is_empty() {
            word.chars().count()
        } else {
            line.chars().count() + 1 + word.chars().count()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Shorten `text` so it renders at most `max_width` points wide, marking
/// the cut with `...`.
pub fn truncate_to_width(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if font.text_width(text, size) <= max_width {
        return text.to_string();
    }
    let budget = max_width - font.text_width("...", size);
    let mut out = String::new();
    let mut width = 0.0;
    for c in text.chars() {
        let mut buf = [0u8; 4];
        let w = font.text_width(c.encode_utf8(&mut buf), size);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push_str("...");
    out
}
