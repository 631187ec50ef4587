//! Document assembly: object graph, byte offsets, cross-reference table.
//!
//! Layout of the output:
//!
//! ```text
//! %PDF-1.4
//! %âãÏÓ
//! 1 0 obj ... endobj        <- offsets[0]
//! ...
//! N 0 obj ... endobj        <- offsets[N-1]
//! xref
//! 0 N+1
//! 0000000000 65535 f
//! {offset:010} 00000 n      (one per object)
//! trailer
//! << /Size N+1 /Root 1 0 R /Info M 0 R >>
//! startxref
//! {xref offset}
//! %%EOF
//! ```

mod object;

pub use object::{reference, ObjectKind, PdfObject};

use crate::error::{Error, Result};
use crate::layout::{Font, PAGE_HEIGHT, PAGE_WIDTH};
use crate::sanitize::sanitize;
use chrono::{DateTime, Utc};
use std::io::Write;

/// File header; the second line marks the file as binary.
pub const PDF_HEADER: &[u8] = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";

/// Metadata written into the document information dictionary.
#[derive(Debug, Clone)]
pub struct DocumentInfo {
    pub title: String,
    pub creator: String,
    pub created: DateTime<Utc>,
}

/// A serialized document and the numbers needed to check it.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub bytes: Vec<u8>,
    /// Byte offset of each object header, indexed by `id - 1`
    pub offsets: Vec<usize>,
    pub xref_offset: usize,
    pub object_count: usize,
    pub content_length: usize,
}

/// Ascending object identifier allocation.
#[derive(Debug)]
struct IdAllocator {
    next_id: usize,
}

impl IdAllocator {
    fn new() -> Self {
        Self { next_id: 1 }
    }

    fn alloc(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Build the object graph around a content stream.
///
/// Identifiers are allocated in the order catalog, page tree, page, content
/// stream, fonts (`/F1`..`/F3`), info.
pub fn build_objects(content: &str, info: &DocumentInfo) -> Result<Vec<PdfObject>> {
    if let Some((index, c)) = content.char_indices().find(|(_, c)| !c.is_ascii()) {
        return Err(Error::Encoding(format!(
            "content stream contains non-ASCII character {:?} at byte {}",
            c, index
        )));
    }

    let mut ids = IdAllocator::new();
    let catalog_id = ids.alloc();
    let pages_id = ids.alloc();
    let page_id = ids.alloc();
    let content_id = ids.alloc();
    let font_ids: Vec<(Font, usize)> = Font::ALL.iter().map(|f| (*f, ids.alloc())).collect();
    let info_id = ids.alloc();

    let font_resources = font_ids
        .iter()
        .map(|(font, id)| format!("/{} {}", font.resource_name(), reference(*id)))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        PdfObject::dictionary(catalog_id, ObjectKind::Catalog)
            .entry("Type", "/Catalog")
            .entry("Pages", reference(pages_id)),
        PdfObject::dictionary(pages_id, ObjectKind::Pages)
            .entry("Type", "/Pages")
            .entry("Kids", format!("[{}]", reference(page_id)))
            .entry("Count", "1"),
        PdfObject::dictionary(page_id, ObjectKind::Page)
            .entry("Type", "/Page")
            .entry("Parent", reference(pages_id))
            .entry(
                "MediaBox",
                format!("[0 0 {} {}]", PAGE_WIDTH as u32, PAGE_HEIGHT as u32),
            )
            .entry("Contents", reference(content_id))
            .entry("Resources", format!("<< /Font << {} >> >>", font_resources)),
        PdfObject::stream(content_id, content.as_bytes().to_vec()),
    ];

    for (font, id) in &font_ids {
        objects.push(
            PdfObject::dictionary(*id, ObjectKind::Font)
                .entry("Type", "/Font")
                .entry("Subtype", "/Type1")
                .entry("BaseFont", format!("/{}", font.base_font()))
                .entry("Encoding", "/WinAnsiEncoding"),
        );
    }

    objects.push(
        PdfObject::dictionary(info_id, ObjectKind::Info)
            .entry("Title", literal(&info.title))
            .entry("Creator", literal(&info.creator))
            .entry(
                "Producer",
                literal(concat!("orderdoc ", env!("CARGO_PKG_VERSION"))),
            )
            .entry("CreationDate", pdf_date(&info.created)),
    );

    Ok(objects)
}

/// Serialize objects (sorted by id, contiguous from 1) into a complete file.
pub fn serialize(objects: &[PdfObject]) -> Result<Assembled> {
    let root = objects
        .iter()
        .find(|o| o.kind == ObjectKind::Catalog)
        .map(|o| o.id)
        .ok_or_else(|| Error::Corrupted("object graph has no catalog".into()))?;
    let info = objects.iter().find(|o| o.kind == ObjectKind::Info).map(|o| o.id);
    for (index, object) in objects.iter().enumerate() {
        if object.id != index + 1 {
            return Err(Error::Corrupted(format!(
                "object ids must be contiguous from 1, found {} at position {}",
                object.id, index
            )));
        }
    }

    let mut writer = PdfWriter::new(Vec::with_capacity(4096));
    writer.write_bytes(PDF_HEADER)?;
    for object in objects {
        writer.write_object(object.id, &object.body())?;
    }
    let xref_offset = writer.write_xref_and_trailer(root, info)?;

    let content_length = objects
        .iter()
        .find(|o| o.kind == ObjectKind::ContentStream)
        .and_then(|o| o.payload())
        .map(|p| p.len())
        .unwrap_or(0);

    let PdfWriter {
        writer: bytes,
        offsets,
        ..
    } = writer;

    log::debug!(
        "Serialized {} objects into {} bytes (xref at {})",
        objects.len(),
        bytes.len(),
        xref_offset
    );

    Ok(Assembled {
        bytes,
        offsets,
        xref_offset,
        object_count: objects.len(),
        content_length,
    })
}

/// Byte sink that keeps the running offset of everything written.
struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    offsets: Vec<usize>,
}

impl<W: Write> PdfWriter<W> {
    fn new(writer: W) -> Self {
        Self {
            writer,
            offset: 0,
            offsets: Vec::new(),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    fn write_str(&mut self, data: &str) -> Result<()> {
        self.write_bytes(data.as_bytes())
    }

    fn write_object(&mut self, id: usize, body: &[u8]) -> Result<()> {
        self.offsets.push(self.offset);
        self.write_str(&format!("{} 0 obj\n", id))?;
        self.write_bytes(body)?;
        self.write_bytes(b"\nendobj\n")
    }

    /// Write the xref table and trailer; returns the xref offset.
    fn write_xref_and_trailer(&mut self, root: usize, info: Option<usize>) -> Result<usize> {
        let xref_start = self.offset;
        let total_objects = self.offsets.len();
        self.write_str(&format!("xref\n0 {}\n", total_objects + 1))?;
        self.write_bytes(b"0000000000 65535 f \n")?;
        for offset in self.offsets.clone() {
            self.write_str(&format!("{:010} 00000 n \n", offset))?;
        }

        let mut trailer = format!(
            "trailer\n<< /Size {} /Root {}",
            total_objects + 1,
            reference(root)
        );
        if let Some(id) = info {
            trailer.push_str(&format!(" /Info {}", reference(id)));
        }
        trailer.push_str(&format!(" >>\nstartxref\n{}\n%%EOF\n", xref_start));
        self.write_str(&trailer)?;
        Ok(xref_start)
    }
}

/// Sanitized literal string.
fn literal(text: &str) -> String {
    format!("({})", sanitize(text))
}

/// `D:YYYYMMDDHHmmSSZ` date string.
fn pdf_date(at: &DateTime<Utc>) -> String {
    format!("({})", at.format("D:%Y%m%d%H%M%SZ"))
}
