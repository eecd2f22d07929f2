//! Greedy word wrapping for prose and indentation-preserving wrapping for code.
//!
//! Widths are measured in `char`s; wide characters are not accounted for.

/// Wrap `text` into lines no longer than `width`.
///
/// Any whitespace run (newlines included) separates words and is discarded.
/// A word longer than `width` is placed alone on its own line and allowed to
/// overflow. Empty input yields a single empty line.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    // -1 so the first word on a line pays no separator cost
    let mut length: isize = -1;

    for word in text.split_whitespace() {
        let word_len = word.chars().count() as isize;
        if length >= 0 && length + 1 + word_len > width as isize {
            lines.push(std::mem::take(&mut line));
            length = -1;
        }
        if length >= 0 {
            line.push(' ');
        }
        line.push_str(word);
        length += 1 + word_len;
    }

    lines.push(line);
    lines
}

/// Wrap `text` to `width`, joining the lines with `\n`.
///
/// Original line breaks and indentation are not preserved.
pub fn wrap(text: &str, width: usize) -> String {
    wrap_lines(text, width).join("\n")
}

/// Wrap each line of `text` separately, keeping its leading indentation.
///
/// Empty lines survive, so the output never has fewer lines than the input.
/// When the indentation alone reaches `width` the remainder is wrapped to a
/// width of 1, so every word still lands on its own indented line.
pub fn wrap_code(text: &str, width: usize) -> String {
    let mut out = Vec::new();

    for line in text.split('\n') {
        let rest = line.trim_start();
        let indent = &line[..line.len() - rest.len()];
        let indent_len = indent.chars().count();
        let budget = width.saturating_sub(indent_len).max(1);

        for wrapped in wrap_lines(rest, budget) {
            out.push(format!("{indent}{wrapped}"));
        }
    }

    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_one_empty_line() {
        assert_eq!(wrap_lines("", 10), vec![String::new()]);
        assert_eq!(wrap_lines("   \n ", 10), vec![String::new()]);
    }

    #[test]
    fn packs_words_greedily() {
        assert_eq!(
            wrap_lines("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn exact_fit_stays_on_line() {
        assert_eq!(wrap_lines("abcd efghi", 10), vec!["abcd efghi"]);
        assert_eq!(wrap_lines("abcd efghij", 10), vec!["abcd", "efghij"]);
    }

    #[test]
    fn long_word_overflows_alone() {
        assert_eq!(
            wrap_lines("a supercalifragilistic b", 5),
            vec!["a", "supercalifragilistic", "b"]
        );
    }

    #[test]
    fn lines_respect_width_and_keep_tokens() {
        let text = "Lorem ipsum dolor sit amet,  consectetur\n adipiscing elit, sed do eiusmod tempor";
        for width in 1..40 {
            let lines = wrap_lines(text, width);
            for line in &lines {
                let len = line.chars().count();
                assert!(len <= width || !line.contains(' '), "{line:?} at {width}");
            }
            let tokens: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
            assert_eq!(tokens, text.split_whitespace().collect::<Vec<_>>());
        }
    }

    #[test]
    fn zero_width_terminates() {
        assert_eq!(wrap_lines("a b", 0), vec!["a", "b"]);
    }

    #[test]
    fn wrap_discards_line_breaks() {
        assert_eq!(wrap("one\ntwo\n\n  three", 80), "one two three");
    }

    #[test]
    fn wrap_counts_chars_not_bytes() {
        assert_eq!(wrap("héllo wörld", 11), "héllo wörld");
    }

    #[test]
    fn code_keeps_indentation_and_blank_lines() {
        let code = "fn main() {\n    let x = 1;\n\n    call(x);\n}";
        assert_eq!(wrap_code(code, 80), code);
    }

    #[test]
    fn code_wraps_remainder_under_indent() {
        assert_eq!(
            wrap_code("    alpha beta gamma", 14),
            "    alpha beta\n    gamma"
        );
    }

    #[test]
    fn code_indent_wider_than_width() {
        assert_eq!(wrap_code("      a b", 4), "      a\n      b");
    }
}
