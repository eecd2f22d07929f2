use super::{Renderer, collapse};
use crate::document::Inline;
use crate::error::{Construct, RenderError};

/// Stand-in for a hard line break. Plain text has no break inside a
/// paragraph, so it becomes a paragraph break.
pub(super) const LINE_BREAK: &str = "\n\n";

impl Renderer {
    /// Render inline content to a single unwrapped string.
    pub(super) fn inlines(&mut self, inlines: &[Inline]) -> Result<String, RenderError> {
        let mut out = String::new();
        self.inlines_into(inlines, &mut out)?;
        Ok(out)
    }

    fn inlines_into(&mut self, inlines: &[Inline], out: &mut String) -> Result<(), RenderError> {
        for inline in inlines {
            self.inline(inline, out)?;
        }
        Ok(())
    }

    fn inline(&mut self, inline: &Inline, out: &mut String) -> Result<(), RenderError> {
        match inline {
            Inline::Str(text) => out.push_str(text),
            Inline::Space | Inline::SoftBreak => out.push(' '),
            Inline::LineBreak => out.push_str(LINE_BREAK),
            Inline::Emph(inner) => self.delimited('_', inner, out)?,
            Inline::Strong(inner) => self.delimited('*', inner, out)?,
            Inline::Strikeout(inner) => self.delimited('-', inner, out)?,
            Inline::SmallCaps(inner) => out.push_str(&self.inlines(inner)?.to_uppercase()),
            // No vertical offset in plain text
            Inline::Subscript(inner) | Inline::Superscript(inner) => self.inlines_into(inner, out)?,
            Inline::Span { content, .. } => self.inlines_into(content, out)?,
            Inline::Code(text) => {
                out.push('`');
                out.push_str(text);
                out.push('`');
            }
            Inline::Link {
                content,
                target,
                title,
            } => {
                let label = self.inlines(content)?;
                self.reference(&label, title.clone(), present(target), out);
            }
            Inline::Image { alt, target, title } => {
                let label = self.inlines(alt)?;
                self.reference(&label, title.clone(), present(target), out);
            }
            Inline::Cite { content, source } => {
                let label = self.inlines(content)?;
                self.reference(&label, None, present(source), out);
            }
            Inline::Note(blocks) => {
                let text = collapse(&self.blocks(blocks, self.width)?);
                self.reference("", present(&text), None, out);
            }
            Inline::RawInline { text, .. } => out.push_str(text),
            Inline::InlineMath(_) => {
                return Err(RenderError::UnsupportedConstruct(Construct::InlineMath));
            }
            Inline::DisplayMath(_) => {
                return Err(RenderError::UnsupportedConstruct(Construct::DisplayMath));
            }
        }
        Ok(())
    }

    fn delimited(&mut self, mark: char, inner: &[Inline], out: &mut String) -> Result<(), RenderError> {
        out.push(mark);
        self.inlines_into(inner, out)?;
        out.push(mark);
        Ok(())
    }

    /// Register a reference and leave `label [n]` in its place.
    fn reference(&mut self, label: &str, title: Option<String>, source: Option<String>, out: &mut String) {
        let index = self.references.register(title, source);
        out.push_str(label);
        out.push_str(&format!(" [{index}]"));
    }
}

fn present(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_string())
}
