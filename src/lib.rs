//! Render structured documents as width-limited plain text.
//!
//! Links, images, footnotes and citations become numbered references listed
//! at the end; headings are numbered and collected into a table of contents.

pub mod align;
mod config;
mod document;
mod error;
pub mod headings;
mod parser;
pub mod references;
mod render;
pub mod wrap;

pub use config::{Config, LayoutConfig};
pub use document::{Attributes, Block, DefinitionItem, Document, Inline, Metadata, Table};
pub use error::{Construct, RenderError};
pub use render::Renderer;

/// Parse markdown text into a document tree.
pub fn parse(markdown: &str) -> Document {
    parser::parse(markdown)
}

/// Render a document using the default config.
pub fn render(document: &Document) -> Result<String, RenderError> {
    render_with_config(document, &Config::compiled_default())
}

/// Render a document with custom config.
pub fn render_with_config(document: &Document, config: &Config) -> Result<String, RenderError> {
    Renderer::new(config).render(document)
}

/// Convert markdown to plain text using default config.
pub fn markdown_to_text(markdown: &str) -> Result<String, RenderError> {
    markdown_to_text_with_config(markdown, &Config::compiled_default())
}

/// Convert markdown to plain text with custom config.
pub fn markdown_to_text_with_config(markdown: &str, config: &Config) -> Result<String, RenderError> {
    render_with_config(&parse(markdown), config)
}
