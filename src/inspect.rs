//! Structural inspection of generated documents.
//!
//! Reads back a serialized buffer and checks that the cross-reference table,
//! trailer and stream lengths agree with the bytes actually written. Used by
//! the generator's self-check and by the `check` CLI command.

use crate::error::{Error, Result};
use regex::bytes::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// PDF format information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.4")
    pub version: String,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.4"
const XREF_ENTRY_LEN: usize = 20;

/// One in-use cross-reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectEntry {
    pub id: usize,
    pub generation: u16,
    pub offset: usize,
}

/// Declared versus measured length of a stream object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamCheck {
    pub object_id: usize,
    pub declared_length: usize,
    pub actual_length: usize,
}

impl StreamCheck {
    pub fn is_consistent(&self) -> bool {
        self.declared_length == self.actual_length
    }
}

/// Result of a successful inspection.
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub format: PdfFormat,
    pub xref_offset: usize,
    /// `/Size` from the trailer
    pub size: usize,
    /// Object id of `/Root`
    pub root: usize,
    /// Object id of `/Info`, when present
    pub info: Option<usize>,
    pub objects: Vec<ObjectEntry>,
    pub streams: Vec<StreamCheck>,
}

impl Inspection {
    /// Number of in-use objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

/// Detect PDF format from bytes.
///
/// # Returns
/// * `Ok(PdfFormat)` if the data starts with a valid PDF header
/// * `Err(Error::UnknownFormat)` if the data is not a PDF
/// * `Err(Error::UnsupportedVersion)` if the version is malformed
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version })
}

fn is_valid_version(version: &str) -> bool {
    let chars: Vec<char> = version.chars().collect();
    chars.len() == 3 && chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes start with a PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

/// Inspect a file on disk.
///
/// # Example
/// ```no_run
/// use orderdoc::inspect::inspect_path;
///
/// let report = inspect_path("Order_Receipt_12345678.pdf").unwrap();
/// println!("{} objects, xref at {}", report.object_count(), report.xref_offset);
/// ```
pub fn inspect_path<P: AsRef<Path>>(path: P) -> Result<Inspection> {
    let data = fs::read(path)?;
    inspect_bytes(&data)
}

/// Inspect a serialized document.
///
/// Fails with [`Error::Corrupted`] when `startxref`, an xref entry, the
/// trailer or a stream `/Length` disagrees with the bytes.
pub fn inspect_bytes(data: &[u8]) -> Result<Inspection> {
    let format = detect_format_from_bytes(data)?;
    let patterns = Patterns::new()?;

    let xref_offset = find_startxref(&patterns, data)?;
    let table = data
        .get(xref_offset..)
        .ok_or_else(|| corrupted(format!("startxref {} is past end of file", xref_offset)))?;

    let section = patterns
        .xref_header
        .captures(table)
        .ok_or_else(|| corrupted(format!("no xref section at offset {}", xref_offset)))?;
    let first = parse_number(&section[1])?;
    let count = parse_number(&section[2])?;
    let mut cursor = section.get(0).map(|m| m.end()).unwrap_or(0);

    // Every entry takes 20 bytes.
    if count > table.len() / XREF_ENTRY_LEN {
        return Err(corrupted(format!(
            "xref section claims {} entries but only {} bytes follow",
            count,
            table.len()
        )));
    }
    let end_id = first
        .checked_add(count)
        .ok_or_else(|| corrupted(format!("xref section {} {} overflows", first, count)))?;

    let mut objects = Vec::with_capacity(count);
    for index in 0..count {
        let rest = &table[cursor..];
        let entry = patterns
            .xref_entry
            .captures(rest)
            .ok_or_else(|| corrupted(format!("malformed xref entry {}", first + index)))?;
        cursor += entry.get(0).map(|m| m.end()).unwrap_or(0);

        if &entry[3] == b"f" {
            continue;
        }
        let id = first + index;
        let offset = parse_number(&entry[1])?;
        let generation = u16::try_from(parse_number(&entry[2])?).map_err(|_| {
            corrupted(format!(
                "object {} has generation {} beyond 65535",
                id,
                String::from_utf8_lossy(&entry[2])
            ))
        })?;
        check_object_header(data, id, generation, offset)?;
        objects.push(ObjectEntry {
            id,
            generation,
            offset,
        });
    }

    let trailer = patterns
        .trailer
        .captures(&table[cursor..])
        .ok_or_else(|| corrupted("no trailer after xref table"))?;
    let dict = trailer
        .get(1)
        .map(|m| m.as_bytes())
        .ok_or_else(|| corrupted("empty trailer"))?;
    let size = patterns
        .size
        .captures(dict)
        .map(|c| parse_number(&c[1]))
        .transpose()?
        .ok_or_else(|| corrupted("trailer has no /Size"))?;
    let root = patterns
        .root
        .captures(dict)
        .map(|c| parse_number(&c[1]))
        .transpose()?
        .ok_or_else(|| corrupted("trailer has no /Root"))?;
    let info = patterns
        .info
        .captures(dict)
        .map(|c| parse_number(&c[1]))
        .transpose()?;

    if size != end_id {
        return Err(corrupted(format!(
            "trailer /Size {} does not match {} xref entries",
            size, end_id
        )));
    }
    if !objects.iter().any(|o| o.id == root) {
        return Err(corrupted(format!("/Root {} is not an in-use object", root)));
    }

    let mut bounds: Vec<usize> = objects.iter().map(|o| o.offset).collect();
    bounds.push(xref_offset);
    bounds.sort_unstable();

    let mut streams = Vec::new();
    for object in &objects {
        let end = bounds
            .iter()
            .copied()
            .find(|b| *b > object.offset)
            .unwrap_or(xref_offset);
        if let Some(check) = check_stream(&patterns, data, object, end)? {
            if !check.is_consistent() {
                return Err(corrupted(format!(
                    "object {} declares /Length {} but its stream holds {} bytes",
                    check.object_id, check.declared_length, check.actual_length
                )));
            }
            streams.push(check);
        }
    }

    log::debug!(
        "Inspected {}: {} objects, {} streams, xref at {}",
        format,
        objects.len(),
        streams.len(),
        xref_offset
    );

    Ok(Inspection {
        format,
        xref_offset,
        size,
        root,
        info,
        objects,
        streams,
    })
}

/// Compiled byte patterns for the structures read back.
struct Patterns {
    startxref: Regex,
    xref_header: Regex,
    xref_entry: Regex,
    trailer: Regex,
    size: Regex,
    root: Regex,
    info: Regex,
    length: Regex,
    stream: Regex,
}

impl Patterns {
    fn new() -> Result<Self> {
        Ok(Self {
            startxref: compile(r"startxref\s+(\d+)\s+%%EOF\s*$")?,
            xref_header: compile(r"\Axref\r?\n(\d+) (\d+)\r?\n")?,
            xref_entry: compile(r"\A(\d{10}) (\d{5}) ([nf])(?: \r| \n|\r\n)")?,
            trailer: compile(r"\Atrailer\s*<<(.*?)>>")?,
            size: compile(r"/Size (\d+)")?,
            root: compile(r"/Root (\d+) \d+ R")?,
            info: compile(r"/Info (\d+) \d+ R")?,
            length: compile(r"/Length (\d+)")?,
            stream: compile(r">>\s*stream(?:\r\n|\n)")?,
        })
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    // (?s) so `.` spans line breaks inside dictionaries
    Regex::new(&format!("(?s){}", pattern)).map_err(|e| corrupted(e.to_string()))
}

fn find_startxref(patterns: &Patterns, data: &[u8]) -> Result<usize> {
    let tail_start = data.len().saturating_sub(64);
    let tail = &data[tail_start..];
    let captures = patterns
        .startxref
        .captures(tail)
        .ok_or_else(|| corrupted("missing startxref / %%EOF trailer"))?;
    parse_number(&captures[1])
}

fn check_object_header(data: &[u8], id: usize, generation: u16, offset: usize) -> Result<()> {
    let expected = format!("{} {} obj", id, generation);
    match data.get(offset..) {
        Some(rest) if rest.starts_with(expected.as_bytes()) => Ok(()),
        _ => Err(corrupted(format!(
            "xref entry for object {} points at offset {}, which is not its header",
            id, offset
        ))),
    }
}

/// Measure the stream of an object, if it has one.
///
/// The object spans from its offset to `end` (the next object or the xref
/// table), so literal text inside the stream cannot end it early.
fn check_stream(
    patterns: &Patterns,
    data: &[u8],
    object: &ObjectEntry,
    end: usize,
) -> Result<Option<StreamCheck>> {
    let body = data
        .get(object.offset..end)
        .ok_or_else(|| corrupted(format!("object {} overruns the file", object.id)))?;

    let Some(keyword) = patterns.stream.find(body) else {
        return Ok(None);
    };
    let declared_length = patterns
        .length
        .captures(&body[..keyword.start()])
        .map(|c| parse_number(&c[1]))
        .transpose()?
        .ok_or_else(|| corrupted(format!("stream object {} has no /Length", object.id)))?;

    let start = keyword.end();
    let stop = rfind(body, b"endstream")
        .filter(|pos| *pos >= start)
        .ok_or_else(|| corrupted(format!("stream object {} has no endstream", object.id)))?;
    let mut actual_end = stop;
    if body[..actual_end].ends_with(b"\r\n") {
        actual_end -= 2;
    } else if body[..actual_end].ends_with(b"\n") {
        actual_end -= 1;
    }

    Ok(Some(StreamCheck {
        object_id: object.id,
        declared_length,
        actual_length: actual_end.saturating_sub(start),
    }))
}

fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

fn parse_number(digits: &[u8]) -> Result<usize> {
    std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| corrupted(format!("invalid number {:?}", String::from_utf8_lossy(digits))))
}

fn corrupted(message: impl Into<String>) -> Error {
    Error::Corrupted(message.into())
}
