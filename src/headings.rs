//! Section numbering and the table of contents.

/// A heading and the headings nested beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadingNode {
    pub title: String,
    pub children: Vec<HeadingNode>,
}

/// Forest of headings, built in document order.
///
/// Nodes are only ever appended; a skipped level gets an untitled
/// placeholder so every heading still has a numbering path.
#[derive(Debug, Default)]
pub struct HeadingTree {
    roots: Vec<HeadingNode>,
}

impl HeadingTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn roots(&self) -> &[HeadingNode] {
        &self.roots
    }

    /// Append a heading at `level` (1-based) and return its numbering path,
    /// e.g. `"2.1.3"`.
    ///
    /// Must be called once per heading, in document order.
    pub fn record(&mut self, level: u8, title: &str) -> String {
        let level = usize::from(level.max(1));
        let mut path = Vec::with_capacity(level);
        let mut siblings = &mut self.roots;

        for _ in 1..level {
            if siblings.is_empty() {
                siblings.push(HeadingNode::default());
            }
            let last = siblings.len() - 1;
            path.push(last + 1);
            siblings = &mut siblings[last].children;
        }

        siblings.push(HeadingNode {
            title: title.to_string(),
            children: Vec::new(),
        });
        path.push(siblings.len());

        let number = join_path(&path);
        log::debug!("heading {number} {title:?}");
        number
    }

    /// Render the table of contents: one line per heading, depth-first,
    /// indented four spaces per level.
    pub fn render_toc(&self) -> String {
        let mut lines = Vec::new();
        let mut path = Vec::new();
        for (i, node) in self.roots.iter().enumerate() {
            path.push(i + 1);
            toc_lines(node, &mut path, &mut lines);
            path.pop();
        }
        lines.join("\n")
    }
}

fn toc_lines(node: &HeadingNode, path: &mut Vec<usize>, lines: &mut Vec<String>) {
    let indent = " ".repeat(4 * (path.len() - 1));
    let line = format!("{indent}{} - {}", join_path(path), node.title);
    lines.push(line.trim_end().to_string());

    for (i, child) in node.children.iter().enumerate() {
        path.push(i + 1);
        toc_lines(child, path, lines);
        path.pop();
    }
}

fn join_path(path: &[usize]) -> String {
    path.iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(".")
}
