//! Out-of-band references for constructs plain text cannot show inline.
//!
//! Links, images, notes and citations are replaced in the running text by a
//! bracketed index and listed in full at the end of the document.

use crate::align::{Alignment, align};

/// A single registered reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub title: Option<String>,
    pub source: Option<String>,
}

/// Ordered list of references, indexed from 1 in registration order.
#[derive(Debug, Default)]
pub struct ReferenceTable {
    entries: Vec<Reference>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reference and return its 1-based index.
    ///
    /// Every call creates a new entry, even for a repeated target.
    pub fn register(&mut self, title: Option<String>, source: Option<String>) -> usize {
        self.entries.push(Reference { title, source });
        let index = self.entries.len();
        log::debug!("registered reference [{index}]");
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Reference] {
        &self.entries
    }

    /// Render one line per reference, in registration order.
    ///
    /// Bracketed indices are right-aligned to the widest index.
    pub fn render_list(&self) -> String {
        let width = self.entries.len().to_string().len() + 2;

        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let marker = align(&format!("[{}]", i + 1), width, Alignment::Right);
                let text = match (&entry.title, &entry.source) {
                    (Some(title), Some(source)) => format!("{title} - {source}"),
                    (Some(title), None) => title.clone(),
                    (None, Some(source)) => source.clone(),
                    (None, None) => return marker,
                };
                format!("{marker} {text}")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
