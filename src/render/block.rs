use super::inline::LINE_BREAK;
use super::{Renderer, collapse, join_blocks};
use crate::align::{align, center};
use crate::document::{Attributes, Block, DefinitionItem, Inline, Table};
use crate::error::{Construct, RenderError};
use crate::wrap::{wrap, wrap_code, wrap_lines};

/// Raw formats whose content is copied to the output; others are dropped.
const PASSTHROUGH_FORMATS: &[&str] = &["html", "html4", "html5"];

impl Renderer {
    /// Render a sequence of blocks to fit in `width` columns.
    pub(super) fn blocks(&mut self, blocks: &[Block], width: usize) -> Result<String, RenderError> {
        let mut parts = Vec::with_capacity(blocks.len());
        for block in blocks {
            parts.push(self.block(block, width)?);
        }
        Ok(join_blocks(parts))
    }

    fn block(&mut self, block: &Block, width: usize) -> Result<String, RenderError> {
        match block {
            Block::Plain(content) | Block::Paragraph(content) => self.paragraph(content, width),
            Block::Heading { level, content, .. } => {
                let title = collapse(&self.inlines(content)?);
                Ok(self.heading(*level, &title, width))
            }
            Block::BlockQuote(blocks) => {
                let inner = self.blocks(blocks, narrow(width, 2))?;
                Ok(prefix_lines(&inner, "> "))
            }
            Block::HorizontalRule => Ok("-".repeat(width)),
            Block::CodeBlock { text, attributes } => Ok(code_block(text, attributes, width)),
            Block::BulletList(items) => self.list(items, width, |_| "-  ".to_string()),
            Block::OrderedList(items) => self.list(items, width, |n| format!("{n}. ")),
            Block::DefinitionList(items) => self.definition_list(items, width),
            Block::Table(table) => self.table(table),
            Block::RawBlock { format, text } => {
                if PASSTHROUGH_FORMATS.contains(&format.as_str()) {
                    Ok(text.trim_end_matches('\n').to_string())
                } else {
                    log::debug!("dropping raw {format} block");
                    Ok(String::new())
                }
            }
            Block::Div { blocks, .. } => self.blocks(blocks, width),
            Block::CaptionedImage { .. } => {
                Err(RenderError::UnsupportedConstruct(Construct::CaptionedImage))
            }
            Block::LineBlock(_) => Err(RenderError::UnsupportedConstruct(Construct::LineBlock)),
        }
    }

    /// Wrap inline content; hard breaks survive as blank lines.
    fn paragraph(&mut self, content: &[Inline], width: usize) -> Result<String, RenderError> {
        let text = self.inlines(content)?;
        Ok(text
            .split(LINE_BREAK)
            .map(|segment| wrap(segment, width))
            .collect::<Vec<_>>()
            .join(LINE_BREAK))
    }

    /// Number the heading and render its banner:
    ///
    /// ```text
    ///
    /// | 1.2 - Title
    /// +=============
    /// ```
    pub(super) fn heading(&mut self, level: u8, title: &str, width: usize) -> String {
        let number = self.headings.record(level, title);
        format!("\n| {number} - {title}\n+{}", "=".repeat(width.saturating_sub(1)))
    }

    /// Render list items, each introduced by `marker(n)` with continuation
    /// lines indented to match.
    fn list(
        &mut self,
        items: &[Vec<Inline>],
        width: usize,
        marker: impl Fn(usize) -> String,
    ) -> Result<String, RenderError> {
        let mut rendered = Vec::with_capacity(items.len());

        for (i, item) in items.iter().enumerate() {
            let label = marker(i + 1);
            let indent = " ".repeat(label.chars().count());
            let text = self.inlines(item)?;

            let lines: Vec<String> = wrap_lines(&text, narrow(width, indent.len()))
                .iter()
                .enumerate()
                .map(|(j, line)| {
                    let prefix = if j == 0 { &label } else { &indent };
                    format!("{prefix}{line}").trim_end().to_string()
                })
                .collect();
            rendered.push(lines.join("\n"));
        }

        Ok(rendered.join("\n\n"))
    }

    fn definition_list(&mut self, items: &[DefinitionItem], width: usize) -> Result<String, RenderError> {
        let mut entries = Vec::with_capacity(items.len());

        for item in items {
            let mut lines = Vec::new();

            let term = collapse(&self.inlines(&item.term)?);
            if term.is_empty() {
                log::warn!("definition list entry has no term");
            } else {
                lines.push(term);
            }

            let mut definitions = Vec::with_capacity(item.definitions.len());
            for definition in &item.definitions {
                definitions.push(self.inlines(definition)?);
            }
            if !definitions.is_empty() {
                let text = definitions.join(" ");
                for line in wrap_lines(&text, narrow(width, 4)) {
                    lines.push(format!("    {line}").trim_end().to_string());
                }
            }

            entries.push(lines.join("\n"));
        }

        Ok(join_blocks(entries))
    }

    /// Lay out a table with every column as wide as its widest cell.
    ///
    /// Rows are never wrapped, so a table may be wider than the page. Short
    /// rows are padded with empty cells; the caption is not rendered.
    fn table(&mut self, table: &Table) -> Result<String, RenderError> {
        let header = self.cells(&table.header)?;
        let mut rows = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            rows.push(self.cells(row)?);
        }

        let columns = rows
            .iter()
            .map(Vec::len)
            .chain([header.len()])
            .max()
            .unwrap_or(0);
        if columns == 0 {
            return Ok(String::new());
        }
        if rows.iter().any(|row| row.len() != columns) || (!header.is_empty() && header.len() != columns) {
            log::warn!("table rows have differing cell counts; padding to {columns} columns");
        }

        let mut widths = vec![0; columns];
        for row in std::iter::once(&header).chain(&rows) {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let render_row = |cells: &[String]| {
            let cells: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, &width)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    let alignment = table.alignments.get(i).copied().unwrap_or_default();
                    align(cell, width, alignment)
                })
                .collect();
            format!("| {} |", cells.join(" | "))
        };

        let mut lines = Vec::with_capacity(rows.len() + 2);
        if !header.is_empty() {
            lines.push(render_row(&header));
            let rules: Vec<String> = widths.iter().map(|w| "-".repeat(w + 2)).collect();
            lines.push(format!("|{}|", rules.join("|")));
        }
        for row in &rows {
            lines.push(render_row(row));
        }

        Ok(lines.join("\n"))
    }

    fn cells(&mut self, cells: &[Vec<Inline>]) -> Result<Vec<String>, RenderError> {
        let mut out = Vec::with_capacity(cells.len());
        for cell in cells {
            out.push(collapse(&self.inlines(cell)?));
        }
        Ok(out)
    }
}

/// Code framed by centered START/END banners named after the block's class.
fn code_block(text: &str, attributes: &Attributes, width: usize) -> String {
    let label = attributes
        .class()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "CODE".to_string());
    let text = text.strip_suffix('\n').unwrap_or(text);

    [
        center(&format!("START {label}"), width, '-'),
        String::new(),
        wrap_code(text, width),
        String::new(),
        center(&format!("END {label}"), width, '-'),
    ]
    .join("\n")
}

fn prefix_lines(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| format!("{prefix}{line}").trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `width` less `by`, but at least one column.
fn narrow(width: usize, by: usize) -> usize {
    width.saturating_sub(by).max(1)
}
