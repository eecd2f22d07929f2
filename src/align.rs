//! Padding text into fixed-width columns.

/// Horizontal alignment of text within a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// No alignment requested; laid out like [`Alignment::Left`].
    #[default]
    Default,
    Left,
    Right,
    Center,
}

impl Alignment {
    /// Look up an alignment by name (`AlignLeft`, `AlignRight`, `AlignCenter`,
    /// `AlignDefault`, or the bare lowercase forms). Unknown names fall back
    /// to [`Alignment::Left`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "AlignRight" | "right" => Alignment::Right,
            "AlignCenter" | "center" => Alignment::Center,
            "AlignDefault" | "default" => Alignment::Default,
            _ => Alignment::Left,
        }
    }
}

impl From<pulldown_cmark::Alignment> for Alignment {
    fn from(alignment: pulldown_cmark::Alignment) -> Self {
        match alignment {
            pulldown_cmark::Alignment::None => Alignment::Default,
            pulldown_cmark::Alignment::Left => Alignment::Left,
            pulldown_cmark::Alignment::Center => Alignment::Center,
            pulldown_cmark::Alignment::Right => Alignment::Right,
        }
    }
}

/// Center `text` in `width` columns using `fill`.
///
/// An odd remainder goes to the right. Text wider than `width` is returned
/// unpadded, never truncated.
pub fn center(text: &str, width: usize, fill: char) -> String {
    let len = text.chars().count();
    let total = width.saturating_sub(len);
    let left = total / 2;
    let right = total - left;

    let mut out = String::with_capacity(text.len() + total);
    out.extend(std::iter::repeat_n(fill, left));
    out.push_str(text);
    out.extend(std::iter::repeat_n(fill, right));
    out
}

/// Pad `text` with spaces to `width` according to `alignment`.
pub fn align(text: &str, width: usize, alignment: Alignment) -> String {
    let pad = width.saturating_sub(text.chars().count());
    match alignment {
        Alignment::Right => format!("{}{}", " ".repeat(pad), text),
        Alignment::Center => center(text, width, ' '),
        Alignment::Left | Alignment::Default => format!("{}{}", text, " ".repeat(pad)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_even_and_odd() {
        assert_eq!(center("ab", 6, '*'), "**ab**");
        assert_eq!(center("abc", 6, '*'), "*abc**");
    }

    #[test]
    fn center_overflow_is_unpadded() {
        assert_eq!(center("abcdef", 3, '-'), "abcdef");
    }

    #[test]
    fn align_modes() {
        assert_eq!(align("x", 4, Alignment::from_name("AlignRight")), "   x");
        assert_eq!(align("x", 4, Alignment::from_name("AlignCenter")), " x  ");
        assert_eq!(align("x", 4, Alignment::from_name("AlignLeft")), "x   ");
        assert_eq!(align("x", 4, Alignment::from_name("bogus")), "x   ");
        assert_eq!(align("x", 4, Alignment::Default), "x   ");
    }

    #[test]
    fn align_overflow_is_unpadded() {
        assert_eq!(align("wide", 2, Alignment::Right), "wide");
    }
}
