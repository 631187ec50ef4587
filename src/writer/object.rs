//! Numbered objects of the document graph.

/// What an object describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Catalog,
    Pages,
    Page,
    ContentStream,
    Font,
    Info,
}

/// One entry of the object graph: a dictionary, optionally followed by a
/// stream payload.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfObject {
    pub id: usize,
    pub kind: ObjectKind,
    entries: Vec<(&'static str, String)>,
    payload: Option<Vec<u8>>,
}

impl PdfObject {
    /// A plain dictionary object.
    pub fn dictionary(id: usize, kind: ObjectKind) -> Self {
        Self {
            id,
            kind,
            entries: Vec::new(),
            payload: None,
        }
    }

    /// A stream object. `/Length` is the byte length of `payload`.
    pub fn stream(id: usize, payload: Vec<u8>) -> Self {
        let mut object = Self::dictionary(id, ObjectKind::ContentStream);
        object.entries.push(("Length", payload.len().to_string()));
        object.payload = Some(payload);
        object
    }

    /// Add a `/Key value` entry; `value` is written verbatim.
    pub fn entry(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.entries.push((key, value.into()));
        self
    }

    /// Value of an entry, as written.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Stream payload, if any.
    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    /// Serialized body: the dictionary and, for streams, the payload between
    /// `stream` and `endstream`.
    pub fn body(&self) -> Vec<u8> {
        let mut dict = String::from("<<");
        for (key, value) in &self.entries {
            dict.push_str(&format!(" /{} {}", key, value));
        }
        dict.push_str(" >>");

        let mut out = dict.into_bytes();
        if let Some(payload) = &self.payload {
            out.extend_from_slice(b"\nstream\n");
            out.extend_from_slice(payload);
            out.extend_from_slice(b"\nendstream");
        }
        out
    }
}

/// `N 0 R` reference to an object.
pub fn reference(id: usize) -> String {
    format!("{} 0 R", id)
}
