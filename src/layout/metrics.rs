//! Standard Type1 font resources and their glyph widths.

/// The three fonts declared in every document's resource table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// `/F1` Helvetica
    Regular,
    /// `/F2` Helvetica-Bold
    Bold,
    /// `/F3` Helvetica-Oblique
    Oblique,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Oblique];

    /// Resource name used in content streams.
    pub fn resource_name(self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
        }
    }

    /// PostScript name of the standard font.
    pub fn base_font(self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }

    fn widths(self) -> &'static [u16; 95] {
        match self {
            Font::Regular | Font::Oblique => &HELVETICA_WIDTHS,
            Font::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }

    /// Advance width of `text` at `size`, in points.
    ///
    /// Characters outside printable ASCII count as a digit width.
    pub fn text_width(self, text: &str, size: f32) -> f32 {
        let widths = self.widths();
        let units: u32 = text
            .bytes()
            .map(|b| match b {
                0x20..=0x7E => widths[(b - 0x20) as usize] as u32,
                _ => MISSING_WIDTH,
            })
            .sum();
        units as f32 * size / 1000.0
    }
}

const MISSING_WIDTH: u32 = 556;

// AFM advance widths for codes 32..=126.
#[rustfmt::skip]
static HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,      // 'p'..'~'
];

#[rustfmt::skip]
static HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names() {
        let names: Vec<_> = Font::ALL.iter().map(|f| f.resource_name()).collect();
        assert_eq!(names, vec!["F1", "F2", "F3"]);
    }

    #[test]
    fn test_text_width() {
        // Digits are 556 units in both weights.
        assert!((Font::Regular.text_width("00", 10.0) - 11.12).abs() < 1e-4);
        assert!((Font::Bold.text_width("00", 10.0) - 11.12).abs() < 1e-4);
        assert_eq!(Font::Regular.text_width("", 12.0), 0.0);
        assert!(Font::Bold.text_width("TOTAL", 12.0) > Font::Regular.text_width("TOTAL", 10.0));
    }

    #[test]
    fn test_width_tables_cover_printable_ascii() {
        assert_eq!(HELVETICA_WIDTHS['A' as usize - 32], 667);
        assert_eq!(HELVETICA_BOLD_WIDTHS['A' as usize - 32], 722);
        assert_eq!(HELVETICA_WIDTHS['~' as usize - 32], 584);
    }
}
