//! Content-stream operators and their text encoding.

use super::metrics::Font;
use crate::error::{Error, Result};
use crate::model::Color;

/// A drawing or text operator on the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Set the non-stroking color (`rg`). Used by both fills and text.
    FillColor(Color),
    /// Fill an axis-aligned rectangle (`re f`).
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    /// Show a single line of text (`BT Tf Td Tj ET`).
    Text {
        font: Font,
        size: f32,
        x: f32,
        y: f32,
        text: String,
    },
}

/// Encode operators into content-stream text, one operator group per line.
///
/// Text must already be sanitized: a literal containing anything but
/// printable ASCII, or a parenthesis or backslash, is rejected.
pub fn encode(ops: &[Op]) -> Result<String> {
    let mut out = String::with_capacity(ops.len() * 40);
    for op in ops {
        match op {
            Op::FillColor(color) => {
                let (r, g, b) = color.unit();
                out.push_str(&format!(
                    "{} {} {} rg\n",
                    fmt_num(r),
                    fmt_num(g),
                    fmt_num(b)
                ));
            }
            Op::FillRect {
                x,
                y,
                width,
                height,
            } => {
                out.push_str(&format!(
                    "{} {} {} {} re f\n",
                    fmt_num(*x),
                    fmt_num(*y),
                    fmt_num(*width),
                    fmt_num(*height)
                ));
            }
            Op::Text {
                font,
                size,
                x,
                y,
                text,
            } => {
                check_literal(text)?;
                out.push_str(&format!(
                    "BT /{} {} Tf {} {} Td ({}) Tj ET\n",
                    font.resource_name(),
                    fmt_num(*size),
                    fmt_num(*x),
                    fmt_num(*y),
                    text
                ));
            }
        }
    }
    Ok(out)
}

fn check_literal(text: &str) -> Result<()> {
    match text
        .char_indices()
        .find(|(_, c)| !matches!(c, ' '..='~') || matches!(c, '(' | ')' | '\\'))
    {
        Some((index, c)) => Err(Error::Encoding(format!(
            "character {:?} at {} cannot appear in a literal string: {:?}",
            c, index, text
        ))),
        None => Ok(()),
    }
}

/// Format a number with at most three decimals and no trailing zeros.
pub(crate) fn fmt_num(value: f32) -> String {
    let milli = (value as f64 * 1000.0).round() as i64;
    if milli == 0 {
        return "0".to_string();
    }
    let sign = if milli < 0 { "-" } else { "" };
    let abs = milli.abs();
    let int_part = abs / 1000;
    let frac_part = abs % 1000;
    if frac_part == 0 {
        format!("{}{}", sign, int_part)
    } else {
        let mut s = format!("{}{}.{:03}", sign, int_part, frac_part);
        while s.ends_with('0') {
            s.pop();
        }
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(612.0), "612");
        assert_eq!(fmt_num(12.5), "12.5");
        assert_eq!(fmt_num(-3.25), "-3.25");
        assert_eq!(fmt_num(0.1234), "0.123");
        assert_eq!(fmt_num(1.0 / 3.0), "0.333");
        assert_eq!(fmt_num(0.0001), "0");
    }

    #[test]
    fn test_encode_operators() {
        let ops = vec![
            Op::FillColor(Color::WHITE),
            Op::FillRect {
                x: 0.0,
                y: 692.0,
                width: 612.0,
                height: 100.0,
            },
            Op::Text {
                font: Font::Bold,
                size: 22.0,
                x: 50.0,
                y: 750.0,
                text: "Order Receipt".into(),
            },
        ];
        let stream = encode(&ops).unwrap();
        assert_eq!(
            stream,
            "1 1 1 rg\n0 692 612 100 re f\nBT /F2 22 Tf 50 750 Td (Order Receipt) Tj ET\n"
        );
    }

    #[test]
    fn test_encode_rejects_unsafe_text() {
        for text in ["a(b", "a)b", "a\\b", "caf\u{e9}", "a\nb"] {
            let ops = vec![Op::Text {
                font: Font::Regular,
                size: 10.0,
                x: 0.0,
                y: 0.0,
                text: text.into(),
            }];
            assert!(matches!(encode(&ops), Err(Error::Encoding(_))), "{:?}", text);
        }
    }
}
