//! Plain-text rendering of a [`Document`].
//!
//! Rendering is two-phase. The body is walked first, which numbers headings
//! and collects references as a side effect; the title banner, table of
//! contents and reference list are then produced from the completed tables
//! and placed around the body.

mod block;
mod inline;

use crate::align::center;
use crate::config::Config;
use crate::document::{Document, Metadata};
use crate::error::RenderError;
use crate::headings::HeadingTree;
use crate::references::ReferenceTable;
use crate::wrap::wrap_lines;

/// Title of the heading placed above the reference list.
const REFERENCES_TITLE: &str = "References";

/// Render state for one document.
///
/// Every call to [`Renderer::render`] starts from empty tables, so a
/// renderer can be reused, but must not be shared between concurrent
/// renders.
#[derive(Debug)]
pub struct Renderer {
    width: usize,
    references: ReferenceTable,
    headings: HeadingTree,
}

impl Renderer {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.max_width(),
            references: ReferenceTable::new(),
            headings: HeadingTree::new(),
        }
    }

    pub fn references(&self) -> &ReferenceTable {
        &self.references
    }

    pub fn headings(&self) -> &HeadingTree {
        &self.headings
    }

    /// Render `document` to text ending in a single newline.
    pub fn render(&mut self, document: &Document) -> Result<String, RenderError> {
        self.references = ReferenceTable::new();
        self.headings = HeadingTree::new();

        let mut body = self.blocks(&document.body, self.width)?;

        if !self.references.is_empty() {
            let heading = self.heading(1, REFERENCES_TITLE, self.width);
            body = join_blocks([body, heading, self.references.render_list()]);
        }

        let banner = self.metadata_banner(&document.metadata);
        let toc = self.headings.render_toc();

        let mut out = join_blocks([banner, toc, body]);
        out.push('\n');
        Ok(out)
    }

    /// A `=`-ruled box with the title, authors and date centered inside.
    /// Empty when there is no metadata.
    fn metadata_banner(&self, metadata: &Metadata) -> String {
        if metadata.is_empty() {
            return String::new();
        }

        let width = self.width;
        let rule = "=".repeat(width);
        let mut lines = vec![rule.clone()];

        let title = metadata.title.iter().flat_map(|title| wrap_lines(title, width));
        let date = metadata.date.iter().cloned();
        for line in title.chain(metadata.authors.iter().cloned()).chain(date) {
            lines.push(center(&line, width, ' ').trim_end().to_string());
        }

        lines.push(rule);
        lines.join("\n")
    }
}

/// Join rendered blocks with blank lines, skipping blocks that rendered to
/// nothing.
fn join_blocks(parts: impl IntoIterator<Item = String>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Collapse all whitespace runs to single spaces, for text that must stay on
/// one line.
fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
