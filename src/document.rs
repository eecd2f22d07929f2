//! The document tree handed to the renderer.

use crate::align::Alignment;

/// A parsed document: metadata plus a sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub metadata: Metadata,
    pub body: Vec<Block>,
}

/// Title block information. Absent fields are `None` / empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub title: Option<String>,
    pub authors: Vec<String>,
    pub date: Option<String>,
}

impl Metadata {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.authors.is_empty() && self.date.is_none()
    }
}

/// Identifier, classes and key/value pairs attached to a block or span.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub pairs: Vec<(String, String)>,
}

impl Attributes {
    pub fn with_class(class: impl Into<String>) -> Self {
        Self {
            classes: vec![class.into()],
            ..Self::default()
        }
    }

    /// The first class, if any.
    pub fn class(&self) -> Option<&str> {
        self.classes.first().map(String::as_str)
    }
}

/// Block-level elements
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Inline content without paragraph semantics (e.g. tight list text).
    Plain(Vec<Inline>),
    Paragraph(Vec<Inline>),
    Heading {
        level: u8,
        content: Vec<Inline>,
        attributes: Attributes,
    },
    BlockQuote(Vec<Block>),
    HorizontalRule,
    CodeBlock {
        text: String,
        attributes: Attributes,
    },
    BulletList(Vec<Vec<Inline>>),
    OrderedList(Vec<Vec<Inline>>),
    DefinitionList(Vec<DefinitionItem>),
    Table(Table),
    RawBlock {
        format: String,
        text: String,
    },
    Div {
        blocks: Vec<Block>,
        attributes: Attributes,
    },
    /// An image with a caption, standing alone as a figure.
    CaptionedImage {
        caption: Vec<Inline>,
        target: String,
        title: Option<String>,
    },
    /// Lines whose breaks and leading spaces are significant.
    LineBlock(Vec<Vec<Inline>>),
}

/// A definition list entry: one term, any number of definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefinitionItem {
    pub term: Vec<Inline>,
    pub definitions: Vec<Vec<Inline>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub caption: Vec<Inline>,
    pub alignments: Vec<Alignment>,
    /// Relative column widths as given by the source; 0.0 means unspecified.
    pub widths: Vec<f64>,
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
}

/// Inline text spans with formatting
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Str(String),
    Space,
    SoftBreak,
    LineBreak,
    Emph(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikeout(Vec<Inline>),
    Subscript(Vec<Inline>),
    Superscript(Vec<Inline>),
    SmallCaps(Vec<Inline>),
    Code(String),
    Link {
        content: Vec<Inline>,
        target: String,
        title: Option<String>,
    },
    Image {
        alt: Vec<Inline>,
        target: String,
        title: Option<String>,
    },
    Note(Vec<Block>),
    Cite {
        content: Vec<Inline>,
        source: String,
    },
    Span {
        content: Vec<Inline>,
        attributes: Attributes,
    },
    RawInline {
        format: String,
        text: String,
    },
    InlineMath(String),
    DisplayMath(String),
}

impl Inline {
    pub fn str(text: impl Into<String>) -> Self {
        Inline::Str(text.into())
    }
}
