use std::collections::{HashMap, HashSet};

use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, HeadingLevel, MetadataBlockKind, Options, Parser, Tag, TagEnd,
};
use serde::Deserialize;

use crate::align::Alignment;
use crate::document::{Attributes, Block, DefinitionItem, Document, Inline, Metadata, Table};

/// Parse markdown text into a document
pub fn parse(markdown: &str) -> Document {
    let events: Vec<Event> = Parser::new_ext(markdown, options()).collect();
    let (events, footnotes) = split_footnotes(events);

    let mut resolver = Footnotes {
        definitions: footnotes,
        active: HashSet::new(),
    };
    let mut state = ParseState::default();
    for event in events {
        process_event(event, &mut state, &mut resolver);
    }

    let metadata = std::mem::take(&mut state.metadata);
    Document {
        metadata,
        body: state.finish(),
    }
}

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_DEFINITION_LIST);
    options.insert(Options::ENABLE_SUPERSCRIPT);
    options.insert(Options::ENABLE_SUBSCRIPT);
    options.insert(Options::ENABLE_MATH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    options.insert(Options::ENABLE_PLUSES_DELIMITED_METADATA_BLOCKS);
    options
}

/// Pull footnote definitions out of the event stream, keyed by label, so a
/// reference can be resolved wherever its definition appears.
fn split_footnotes(events: Vec<Event<'_>>) -> (Vec<Event<'_>>, HashMap<String, Vec<Event<'_>>>) {
    let mut body = Vec::with_capacity(events.len());
    let mut definitions = HashMap::new();
    let mut current: Option<(String, Vec<Event>)> = None;

    for event in events {
        match event {
            Event::Start(Tag::FootnoteDefinition(label)) => {
                current = Some((label.into_string(), Vec::new()));
            }
            Event::End(TagEnd::FootnoteDefinition) => {
                if let Some((label, events)) = current.take() {
                    definitions.insert(label, events);
                }
            }
            event => match current.as_mut() {
                Some((_, events)) => events.push(event),
                None => body.push(event),
            },
        }
    }

    (body, definitions)
}

struct Footnotes<'a> {
    definitions: HashMap<String, Vec<Event<'a>>>,
    // Labels being expanded, to stop a note that references itself
    active: HashSet<String>,
}

impl Footnotes<'_> {
    fn resolve(&mut self, label: &str) -> Vec<Block> {
        if self.active.contains(label) {
            log::warn!("footnote {label:?} refers to itself");
            return Vec::new();
        }
        let Some(events) = self.definitions.get(label).cloned() else {
            log::warn!("footnote {label:?} is not defined");
            return Vec::new();
        };

        self.active.insert(label.to_string());
        let mut state = ParseState::default();
        for event in events {
            process_event(event, &mut state, self);
        }
        self.active.remove(label);
        state.finish()
    }
}

#[derive(Default)]
struct ParseState {
    // Current inline content being built
    spans: Vec<Inline>,
    // Enclosing inline containers (emphasis, links, ...) and their parent content
    span_stack: Vec<(Frame, Vec<Inline>)>,

    // Current heading (if in a heading)
    heading: Option<(u8, Attributes)>,

    // Code block state
    in_code_block: bool,
    code_class: Option<String>,
    code_content: String,

    // Raw HTML block being collected
    html: Option<String>,

    // Block containers; the first is the document body, one more per open block quote
    block_stack: Vec<Vec<Block>>,

    // List state
    list_stack: Vec<ListBuilder>,

    // Table state
    table: Option<TableBuilder>,

    // Definition list state
    definitions: Option<DefinitionBuilder>,

    // Metadata block state
    metadata_kind: Option<MetadataBlockKind>,
    metadata_text: String,
    metadata: Metadata,
}

enum Frame {
    Emph,
    Strong,
    Strikeout,
    Superscript,
    Subscript,
    Link { target: String, title: Option<String> },
    Image { target: String, title: Option<String> },
}

#[derive(Default)]
struct ListBuilder {
    ordered: bool,
    items: Vec<Vec<Inline>>,
    current_item_spans: Vec<Inline>,
}

#[derive(Default)]
struct TableBuilder {
    alignments: Vec<Alignment>,
    header: Vec<Vec<Inline>>,
    rows: Vec<Vec<Vec<Inline>>>,
    current_row: Vec<Vec<Inline>>,
    in_head: bool,
}

#[derive(Default)]
struct DefinitionBuilder {
    items: Vec<DefinitionItem>,
    // Paragraph content collected for the definition being parsed
    pending: Vec<Inline>,
}

impl ParseState {
    fn push_block(&mut self, block: Block) {
        if self.block_stack.is_empty() {
            self.block_stack.push(Vec::new());
        }
        if let Some(blocks) = self.block_stack.last_mut() {
            blocks.push(block);
        }
    }

    /// Close any open containers and return the top-level blocks.
    fn finish(mut self) -> Vec<Block> {
        while self.block_stack.len() > 1 {
            if let Some(blocks) = self.block_stack.pop() {
                self.push_block(Block::BlockQuote(blocks));
            }
        }
        let leftover = std::mem::take(&mut self.spans);
        if !leftover.is_empty() {
            self.push_block(Block::Plain(leftover));
        }
        self.block_stack.pop().unwrap_or_default()
    }

    /// Close the innermost inline container around the spans collected
    /// since it opened.
    fn close_frame(&mut self) {
        let Some((frame, parent)) = self.span_stack.pop() else {
            return;
        };
        let content = std::mem::replace(&mut self.spans, parent);
        let inline = match frame {
            Frame::Emph => Inline::Emph(content),
            Frame::Strong => Inline::Strong(content),
            Frame::Strikeout => Inline::Strikeout(content),
            Frame::Superscript => Inline::Superscript(content),
            Frame::Subscript => Inline::Subscript(content),
            Frame::Link { target, title } => Inline::Link {
                content,
                target,
                title,
            },
            Frame::Image { target, title } => Inline::Image {
                alt: content,
                target,
                title,
            },
        };
        self.spans.push(inline);
    }

    fn open_frame(&mut self, frame: Frame) {
        let parent = std::mem::take(&mut self.spans);
        self.span_stack.push((frame, parent));
    }

    /// Move finished paragraph text to wherever it belongs: the open list
    /// item, the open definition, or a new block.
    fn flush_paragraph(&mut self) {
        let content = std::mem::take(&mut self.spans);
        if content.is_empty() {
            return;
        }
        if let Some(list) = self.list_stack.last_mut() {
            append_inlines(&mut list.current_item_spans, content);
        } else if let Some(definitions) = self.definitions.as_mut() {
            append_inlines(&mut definitions.pending, content);
        } else if self.table.is_some() {
            // Ignore paragraphs in tables, handled by cell
        } else {
            self.push_block(Block::Paragraph(content));
        }
    }
}

/// Append `more` to `target`, separated by a space when both are non-empty.
fn append_inlines(target: &mut Vec<Inline>, more: Vec<Inline>) {
    if more.is_empty() {
        return;
    }
    if !target.is_empty() {
        target.push(Inline::Space);
    }
    target.extend(more);
}

fn optional(text: CowStr) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.into_string())
    }
}

fn process_event(event: Event, state: &mut ParseState, footnotes: &mut Footnotes) {
    match event {
        // Metadata
        Event::Start(Tag::MetadataBlock(kind)) => {
            state.metadata_kind = Some(kind);
            state.metadata_text.clear();
        }
        Event::End(TagEnd::MetadataBlock(_)) => {
            if let Some(kind) = state.metadata_kind.take() {
                let text = std::mem::take(&mut state.metadata_text);
                state.metadata = parse_metadata(kind, &text);
            }
        }

        // Headings
        Event::Start(Tag::Heading {
            level,
            id,
            classes,
            attrs,
        }) => {
            let attributes = Attributes {
                id: id.map(CowStr::into_string),
                classes: classes.into_iter().map(CowStr::into_string).collect(),
                pairs: attrs
                    .into_iter()
                    .map(|(k, v)| (k.into_string(), v.map(CowStr::into_string).unwrap_or_default()))
                    .collect(),
            };
            state.heading = Some((heading_level_to_u8(level), attributes));
        }
        Event::End(TagEnd::Heading(_)) => {
            if let Some((level, attributes)) = state.heading.take() {
                let content = std::mem::take(&mut state.spans);
                state.push_block(Block::Heading {
                    level,
                    content,
                    attributes,
                });
            }
        }

        // Paragraphs
        Event::Start(Tag::Paragraph) => {}
        Event::End(TagEnd::Paragraph) => state.flush_paragraph(),

        // Block quotes
        Event::Start(Tag::BlockQuote(_)) => {
            if state.block_stack.is_empty() {
                state.block_stack.push(Vec::new());
            }
            state.block_stack.push(Vec::new());
        }
        Event::End(TagEnd::BlockQuote(_)) => {
            if state.block_stack.len() > 1 {
                if let Some(blocks) = state.block_stack.pop() {
                    state.push_block(Block::BlockQuote(blocks));
                }
            }
        }

        // Text content
        Event::Text(text) => {
            if state.metadata_kind.is_some() {
                state.metadata_text.push_str(&text);
            } else if state.in_code_block {
                state.code_content.push_str(&text);
            } else {
                state.spans.push(Inline::Str(text.into_string()));
            }
        }

        // Inline code
        Event::Code(code) => {
            state.spans.push(Inline::Code(code.into_string()));
        }

        // Math
        Event::InlineMath(math) => state.spans.push(Inline::InlineMath(math.into_string())),
        Event::DisplayMath(math) => state.spans.push(Inline::DisplayMath(math.into_string())),

        // Inline formatting
        Event::Start(Tag::Emphasis) => state.open_frame(Frame::Emph),
        Event::Start(Tag::Strong) => state.open_frame(Frame::Strong),
        Event::Start(Tag::Strikethrough) => state.open_frame(Frame::Strikeout),
        Event::Start(Tag::Superscript) => state.open_frame(Frame::Superscript),
        Event::Start(Tag::Subscript) => state.open_frame(Frame::Subscript),
        Event::End(
            TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::Link
            | TagEnd::Image,
        ) => state.close_frame(),

        // Links and images
        Event::Start(Tag::Link {
            dest_url, title, ..
        }) => state.open_frame(Frame::Link {
            target: dest_url.into_string(),
            title: optional(title),
        }),
        Event::Start(Tag::Image {
            dest_url, title, ..
        }) => state.open_frame(Frame::Image {
            target: dest_url.into_string(),
            title: optional(title),
        }),

        // Footnotes
        Event::FootnoteReference(label) => {
            let blocks = footnotes.resolve(&label);
            state.spans.push(Inline::Note(blocks));
        }

        // Code blocks
        Event::Start(Tag::CodeBlock(kind)) => {
            state.in_code_block = true;
            state.code_class = match kind {
                CodeBlockKind::Fenced(info) => info.split_whitespace().next().map(str::to_string),
                CodeBlockKind::Indented => None,
            };
            state.code_content.clear();
        }
        Event::End(TagEnd::CodeBlock) => {
            state.in_code_block = false;
            let text = std::mem::take(&mut state.code_content);
            let attributes = Attributes {
                classes: state.code_class.take().into_iter().collect(),
                ..Attributes::default()
            };
            state.push_block(Block::CodeBlock { text, attributes });
        }

        // Raw HTML
        Event::Start(Tag::HtmlBlock) => {
            state.html = Some(String::new());
        }
        Event::End(TagEnd::HtmlBlock) => {
            if let Some(text) = state.html.take() {
                state.push_block(Block::RawBlock {
                    format: "html".to_string(),
                    text,
                });
            }
        }
        Event::Html(html) => match state.html.as_mut() {
            Some(text) => text.push_str(&html),
            None => state.spans.push(Inline::RawInline {
                format: "html".to_string(),
                text: html.into_string(),
            }),
        },
        Event::InlineHtml(html) => {
            state.spans.push(Inline::RawInline {
                format: "html".to_string(),
                text: html.into_string(),
            });
        }

        // Lists
        Event::Start(Tag::List(first_item)) => {
            // Text of a tight item that precedes its nested list
            if let Some(parent) = state.list_stack.last_mut() {
                let before = std::mem::take(&mut state.spans);
                append_inlines(&mut parent.current_item_spans, before);
            }
            state.list_stack.push(ListBuilder {
                ordered: first_item.is_some(),
                ..ListBuilder::default()
            });
        }
        Event::End(TagEnd::List(_)) => {
            if let Some(list_builder) = state.list_stack.pop() {
                // If there's a parent list, this is nested: fold it into the open item
                if let Some(parent) = state.list_stack.last_mut() {
                    for item in list_builder.items {
                        append_inlines(&mut parent.current_item_spans, item);
                    }
                } else if list_builder.ordered {
                    state.push_block(Block::OrderedList(list_builder.items));
                } else {
                    state.push_block(Block::BulletList(list_builder.items));
                }
            }
        }

        Event::Start(Tag::Item) => {
            if let Some(list) = state.list_stack.last_mut() {
                list.current_item_spans.clear();
            }
        }
        Event::End(TagEnd::Item) => {
            // Collect any remaining spans
            let remaining = std::mem::take(&mut state.spans);

            if let Some(list) = state.list_stack.last_mut() {
                append_inlines(&mut list.current_item_spans, remaining);
                let content = std::mem::take(&mut list.current_item_spans);
                list.items.push(content);
            }
        }

        // Task list checkboxes
        Event::TaskListMarker(checked) => {
            let marker = if checked { "[x] " } else { "[ ] " };
            state.spans.push(Inline::str(marker));
        }

        // Definition lists
        Event::Start(Tag::DefinitionList) => {
            state.definitions = Some(DefinitionBuilder::default());
        }
        Event::End(TagEnd::DefinitionList) => {
            if let Some(builder) = state.definitions.take() {
                state.push_block(Block::DefinitionList(builder.items));
            }
        }
        Event::Start(Tag::DefinitionListTitle) => {
            state.spans.clear();
        }
        Event::End(TagEnd::DefinitionListTitle) => {
            let term = std::mem::take(&mut state.spans);
            if let Some(builder) = state.definitions.as_mut() {
                builder.items.push(DefinitionItem {
                    term,
                    definitions: Vec::new(),
                });
            }
        }
        Event::Start(Tag::DefinitionListDefinition) => {
            if let Some(builder) = state.definitions.as_mut() {
                builder.pending.clear();
            }
        }
        Event::End(TagEnd::DefinitionListDefinition) => {
            let remaining = std::mem::take(&mut state.spans);
            if let Some(builder) = state.definitions.as_mut() {
                append_inlines(&mut builder.pending, remaining);
                let definition = std::mem::take(&mut builder.pending);
                match builder.items.last_mut() {
                    Some(item) => item.definitions.push(definition),
                    None => builder.items.push(DefinitionItem {
                        term: Vec::new(),
                        definitions: vec![definition],
                    }),
                }
            }
        }

        // Tables
        Event::Start(Tag::Table(alignments)) => {
            state.table = Some(TableBuilder {
                alignments: alignments.into_iter().map(Alignment::from).collect(),
                ..TableBuilder::default()
            });
        }
        Event::End(TagEnd::Table) => {
            if let Some(builder) = state.table.take() {
                let columns = builder.alignments.len();
                state.push_block(Block::Table(Table {
                    caption: Vec::new(),
                    alignments: builder.alignments,
                    widths: vec![0.0; columns],
                    header: builder.header,
                    rows: builder.rows,
                }));
            }
        }

        Event::Start(Tag::TableHead) => {
            if let Some(table) = state.table.as_mut() {
                table.in_head = true;
                table.current_row.clear();
            }
        }
        Event::End(TagEnd::TableHead) => {
            if let Some(table) = state.table.as_mut() {
                table.in_head = false;
                table.header = std::mem::take(&mut table.current_row);
            }
        }

        Event::Start(Tag::TableRow) => {
            if let Some(table) = state.table.as_mut() {
                table.current_row.clear();
            }
        }
        Event::End(TagEnd::TableRow) => {
            if let Some(table) = state.table.as_mut() {
                if !table.in_head {
                    let row = std::mem::take(&mut table.current_row);
                    table.rows.push(row);
                }
            }
        }

        Event::Start(Tag::TableCell) => {
            state.spans.clear();
        }
        Event::End(TagEnd::TableCell) => {
            let cell_content = std::mem::take(&mut state.spans);
            if let Some(table) = state.table.as_mut() {
                table.current_row.push(cell_content);
            }
        }

        // Horizontal rule
        Event::Rule => {
            state.push_block(Block::HorizontalRule);
        }

        // Soft/hard breaks
        Event::SoftBreak => {
            state.spans.push(Inline::SoftBreak);
        }
        Event::HardBreak => {
            state.spans.push(Inline::LineBreak);
        }

        // Ignore other events
        _ => {}
    }
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Front matter fields understood by the renderer. `D` is the format's
/// dynamic value type, so dates may be strings, numbers or TOML datetimes.
#[derive(Debug, Deserialize)]
struct FrontMatter<D> {
    title: Option<String>,
    author: Option<Authors>,
    authors: Option<Authors>,
    date: Option<D>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Authors {
    One(Author),
    Many(Vec<Author>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Author {
    Name(String),
    Entry { name: String },
}

impl Author {
    fn into_name(self) -> String {
        match self {
            Author::Name(name) | Author::Entry { name } => name,
        }
    }
}

/// A front matter value that can be shown as text.
trait FrontMatterValue {
    fn into_text(self) -> Option<String>;
}

impl FrontMatterValue for toml::Value {
    fn into_text(self) -> Option<String> {
        match self {
            toml::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }
}

impl FrontMatterValue for serde_yaml::Value {
    fn into_text(self) -> Option<String> {
        match self {
            serde_yaml::Value::Null => None,
            serde_yaml::Value::String(s) => Some(s),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            other => serde_yaml::to_string(&other).ok(),
        }
    }
}

fn nonempty(text: String) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

impl<D: FrontMatterValue> From<FrontMatter<D>> for Metadata {
    fn from(front: FrontMatter<D>) -> Self {
        let authors = match front.author.or(front.authors) {
            Some(Authors::One(author)) => vec![author],
            Some(Authors::Many(authors)) => authors,
            None => Vec::new(),
        };
        Metadata {
            title: front.title.and_then(nonempty),
            authors: authors
                .into_iter()
                .filter_map(|author| nonempty(author.into_name()))
                .collect(),
            date: front.date.and_then(FrontMatterValue::into_text).and_then(nonempty),
        }
    }
}

fn parse_metadata(kind: MetadataBlockKind, text: &str) -> Metadata {
    match kind {
        MetadataBlockKind::PlusesStyle => match toml::from_str::<FrontMatter<toml::Value>>(text) {
            Ok(front) => front.into(),
            Err(e) => {
                log::warn!("ignoring invalid TOML front matter: {}", e);
                Metadata::default()
            }
        },
        MetadataBlockKind::YamlStyle => {
            if text.trim().is_empty() {
                return Metadata::default();
            }
            match serde_yaml::from_str::<FrontMatter<serde_yaml::Value>>(text) {
                Ok(front) => front.into(),
                Err(e) => {
                    log::warn!("ignoring invalid YAML front matter: {}", e);
                    Metadata::default()
                }
            }
        }
    }
}
