//! Text sanitization for PDF literal strings.
//!
//! The standard Type1 fonts used by the generated documents only guarantee
//! printable ASCII glyphs, and literal strings are delimited by parentheses
//! with the backslash as escape character. Every piece of user or catalog
//! text goes through [`sanitize`] before it reaches a content stream.
//!
//! Policy:
//! - line breaks and tabs become a single space (`\r\n` counts as one break)
//! - `(` and `)` are removed, `\` becomes `/`
//! - accented Latin letters fold to their ASCII base letter
//! - remaining control characters are dropped, other non-ASCII becomes `?`
//!
//! The output is printable ASCII without parentheses or backslashes, so the
//! function is idempotent.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Replacement for characters with no ASCII rendition.
const REPLACEMENT: char = '?';

/// Letters and punctuation that compatibility decomposition leaves alone.
const FOLD_MAP: &[(char, &str)] = &[
    ('ß', "ss"),
    ('Æ', "AE"),
    ('æ', "ae"),
    ('Œ', "OE"),
    ('œ', "oe"),
    ('Ø', "O"),
    ('ø', "o"),
    ('Đ', "D"),
    ('đ', "d"),
    ('Ł', "L"),
    ('ł', "l"),
    ('Þ', "TH"),
    ('þ', "th"),
    ('Ð', "D"),
    ('ð', "d"),
    ('ı', "i"),
    ('\u{2018}', "'"),  // ‘
    ('\u{2019}', "'"),  // ’
    ('\u{201A}', "'"),  // ‚
    ('\u{201C}', "\""), // “
    ('\u{201D}', "\""), // ”
    ('\u{201E}', "\""), // „
    ('\u{00AB}', "\""), // «
    ('\u{00BB}', "\""), // »
    ('\u{2010}', "-"),
    ('\u{2011}', "-"),
    ('\u{2012}', "-"),
    ('\u{2013}', "-"), // en dash
    ('\u{2014}', "-"), // em dash
    ('\u{2212}', "-"), // minus sign
    ('\u{2022}', "-"), // •
    ('\u{00B7}', "-"), // ·
    ('\u{20AC}', "EUR"),
    ('\u{00A3}', "GBP"),
    ('\u{00A9}', "c"),
    ('\u{00AE}', "R"),
    ('\u{00B0}', "o"),
    ('\u{00D7}', "x"),
];

/// Sanitize a string for embedding in a PDF literal string.
///
/// # Example
///
/// ```
/// use orderdoc::sanitize;
///
/// assert_eq!(sanitize("Bûche (x2)\n"), "Buche x2 ");
/// ```
pub fn sanitize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.nfkd().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' | '\t' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => {
                out.push(' ')
            }
            '(' | ')' => {}
            '\\' => out.push('/'),
            c if c.is_ascii_control() => {}
            c if c.is_ascii() => out.push(c),
            c if is_combining_mark(c) => {}
            c if c.is_control() => {}
            c => match fold(c) {
                Some(folded) => out.push_str(folded),
                None if c.is_whitespace() => out.push(' '),
                None => out.push(REPLACEMENT),
            },
        }
    }

    out
}

/// Sanitize an optional string; `None` yields an empty string.
pub fn sanitize_opt(input: Option<&str>) -> String {
    input.map(sanitize).unwrap_or_default()
}

fn fold(c: char) -> Option<&'static str> {
    FOLD_MAP
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}
