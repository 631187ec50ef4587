//! The generation pipeline: normalize, derive the timeline, lay out the page,
//! assemble the object graph and check the result.

use crate::error::{Error, Result};
use crate::inspect;
use crate::layout::{self, LayoutContext};
use crate::model::{Order, OrderStatus};
use crate::options::GenerateOptions;
use crate::timeline::derive_timeline;
use crate::writer::{self, DocumentInfo};
use serde::Serialize;

/// A finished order document.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    /// Complete PDF file contents
    pub bytes: Vec<u8>,
    /// Suggested file name, e.g. `Order_Receipt_12345678.pdf`
    pub filename: String,
    pub stats: DocumentStats,
}

impl GeneratedDocument {
    /// Write the bytes to `dir/filename` and return the full path.
    pub fn save_to_dir<P: AsRef<std::path::Path>>(&self, dir: P) -> Result<std::path::PathBuf> {
        let path = dir.as_ref().join(&self.filename);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Figures about a generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub object_count: usize,
    /// Byte length of the page content stream
    pub content_length: usize,
    pub item_rows: usize,
    pub xref_offset: usize,
    /// Body content reached into the footer area
    pub overflow: bool,
}

/// Generate the document for one order.
pub fn build_document(order: &Order, options: &GenerateOptions) -> Result<GeneratedDocument> {
    let snapshot = order.normalize();
    let stages = derive_timeline(&snapshot, &options.date_format);
    let now = options.clock();

    let ctx = LayoutContext {
        order: &snapshot,
        stages: &stages,
        options,
        now,
    };
    let page = layout::build_layout(&ctx);
    let content = page.content_stream()?;

    let info = snapshot.status.info();
    let doc_info = DocumentInfo {
        title: format!("{} - Order #{}", info.doc_title, snapshot.short_id),
        creator: options.store_name.clone(),
        created: now,
    };
    let objects = writer::build_objects(&content, &doc_info)?;
    let assembled = writer::serialize(&objects)?;

    if options.self_check {
        verify(&assembled)?;
    }

    let filename = file_name(snapshot.status, &snapshot.short_id);
    log::debug!(
        "Generated {} ({} bytes, {} items)",
        filename,
        assembled.bytes.len(),
        snapshot.items.len()
    );

    Ok(GeneratedDocument {
        stats: DocumentStats {
            object_count: assembled.object_count,
            content_length: assembled.content_length,
            item_rows: snapshot.items.len(),
            xref_offset: assembled.xref_offset,
            overflow: page.overflow,
        },
        bytes: assembled.bytes,
        filename,
    })
}

/// Re-read the buffer and compare it with what the writer recorded.
fn verify(assembled: &writer::Assembled) -> Result<()> {
    let report = inspect::inspect_bytes(&assembled.bytes)?;

    if report.xref_offset != assembled.xref_offset {
        return Err(Error::Corrupted(format!(
            "startxref reads {} but the table was written at {}",
            report.xref_offset, assembled.xref_offset
        )));
    }
    let read_back: Vec<usize> = report.objects.iter().map(|o| o.offset).collect();
    if read_back != assembled.offsets {
        return Err(Error::Corrupted(format!(
            "xref offsets {:?} differ from written offsets {:?}",
            read_back, assembled.offsets
        )));
    }
    match report.streams.as_slice() {
        [stream] if stream.declared_length == assembled.content_length => Ok(()),
        streams => Err(Error::Corrupted(format!(
            "expected one content stream of {} bytes, found {:?}",
            assembled.content_length, streams
        ))),
    }
}

/// `<Doc_Title>_<short id>.pdf`, with the id reduced to `[A-Za-z0-9_-]`.
pub fn file_name(status: OrderStatus, short_id: &str) -> String {
    let id: String = short_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}.pdf", status.info().file_stem(), id)
}
