use std::fmt;

use thiserror::Error;

/// Node kinds that have no plain-text rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    InlineMath,
    DisplayMath,
    CaptionedImage,
    LineBlock,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::InlineMath => write!(f, "inline math"),
            Construct::DisplayMath => write!(f, "display math"),
            Construct::CaptionedImage => write!(f, "captioned image"),
            Construct::LineBlock => write!(f, "line block"),
        }
    }
}

/// Errors that abort a render.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The document contains a node plain text cannot represent.
    #[error("unsupported construct: {0}")]
    UnsupportedConstruct(Construct),
}
