use txt::{
    Attributes, Block, Config, Construct, Document, Inline, Metadata, RenderError, Renderer,
    render_with_config,
};

fn config(width: usize) -> Config {
    Config::default().with_max_width(width)
}

fn words(s: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    for (i, word) in s.split(' ').enumerate() {
        if i > 0 {
            inlines.push(Inline::Space);
        }
        inlines.push(Inline::str(word));
    }
    inlines
}

fn heading(level: u8, title: &str) -> Block {
    Block::Heading {
        level,
        content: words(title),
        attributes: Attributes::default(),
    }
}

fn link(label: &str, target: &str) -> Inline {
    Inline::Link {
        content: words(label),
        target: target.into(),
        title: None,
    }
}

fn document(body: Vec<Block>) -> Document {
    Document {
        metadata: Metadata::default(),
        body,
    }
}

#[test]
fn full_document_layout() {
    let doc = Document {
        metadata: Metadata {
            title: Some("Guide".into()),
            authors: Vec::new(),
            date: None,
        },
        body: vec![
            heading(1, "Intro"),
            Block::Paragraph(vec![
                Inline::str("See"),
                Inline::Space,
                link("site", "http://x"),
                Inline::Space,
                Inline::str("now."),
            ]),
            heading(2, "Detail"),
        ],
    };

    let rule = "=".repeat(29);
    let expected = format!(
        "{banner}\n            Guide\n{banner}\n\n\
         1 - Intro\n    1.1 - Detail\n2 - References\n\n\
         \n| 1 - Intro\n+{rule}\n\n\
         See site [1] now.\n\n\
         \n| 1.1 - Detail\n+{rule}\n\n\
         \n| 2 - References\n+{rule}\n\n\
         [1] http://x\n",
        banner = "=".repeat(30),
    );
    assert_eq!(render_with_config(&doc, &config(30)).unwrap(), expected);
}

#[test]
fn heading_numbering_sequence() {
    let doc = document(vec![
        heading(1, "A"),
        heading(1, "B"),
        heading(2, "B1"),
        heading(1, "C"),
    ]);
    let out = render_with_config(&doc, &config(20)).unwrap();
    assert!(out.contains("| 1 - A\n"));
    assert!(out.contains("| 2 - B\n"));
    assert!(out.contains("| 2.1 - B1\n"));
    assert!(out.contains("| 3 - C\n"));
}

#[test]
fn skipped_heading_levels_synthesize_ancestors() {
    let doc = document(vec![heading(3, "Deep")]);
    let out = render_with_config(&doc, &config(20)).unwrap();
    assert!(out.starts_with("1 -\n    1.1 -\n        1.1.1 - Deep\n\n"));
    assert!(out.contains("| 1.1.1 - Deep\n"));
}

#[test]
fn reference_indices_follow_first_use() {
    let doc = document(vec![Block::Paragraph(vec![
        link("a", "http://same"),
        Inline::Space,
        link("b", "http://same"),
        Inline::Space,
        Inline::Image {
            alt: words("c"),
            target: "c.png".into(),
            title: Some("C".into()),
        },
    ])]);
    let out = render_with_config(&doc, &config(40)).unwrap();
    assert!(out.contains("a [1] b [2] c [3]"));
    assert!(out.ends_with("[1] http://same\n[2] http://same\n[3] C - c.png\n"));
}

#[test]
fn no_references_means_no_references_section() {
    let doc = document(vec![heading(1, "Only"), Block::Paragraph(words("text"))]);
    let out = render_with_config(&doc, &config(40)).unwrap();
    assert!(!out.contains("References"));
}

#[test]
fn exactly_one_references_heading() {
    let doc = document(vec![
        heading(1, "One"),
        Block::Paragraph(vec![link("x", "u1")]),
        heading(1, "Two"),
        Block::Paragraph(vec![
            link("y", "u2"),
            Inline::Note(vec![Block::Paragraph(words("a note"))]),
        ]),
    ]);
    let out = render_with_config(&doc, &config(40)).unwrap();
    assert_eq!(out.matches("| 3 - References").count(), 1);
    assert!(out.contains("\n3 - References\n"));
    assert!(out.ends_with("[1] u1\n[2] u2\n[3] a note\n"));
}

#[test]
fn code_block_banners() {
    let doc = document(vec![Block::CodeBlock {
        text: "x".into(),
        attributes: Attributes::default(),
    }]);
    let out = render_with_config(&doc, &config(14)).unwrap();
    assert_eq!(out, "--START CODE--\n\nx\n\n---END CODE---\n");
}

#[test]
fn table_columns_fit_widest_cell() {
    let doc = document(vec![Block::Table(txt::Table {
        header: vec![words("A"), words("Bee")],
        rows: vec![vec![words("1"), words("22")]],
        ..txt::Table::default()
    })]);
    let out = render_with_config(&doc, &config(80)).unwrap();
    assert_eq!(out, "| A | Bee |\n|---|-----|\n| 1 | 22  |\n");
}

#[test]
fn list_items_are_separated_by_one_blank_line() {
    let list = Block::BulletList(vec![words("a"), words("b")]);
    let doc = document(vec![list.clone(), Block::Paragraph(words("after"))]);
    assert_eq!(render_with_config(&doc, &config(20)).unwrap(), "-  a\n\n-  b\n\nafter\n");

    let doc = document(vec![list]);
    assert_eq!(render_with_config(&doc, &config(20)).unwrap(), "-  a\n\n-  b\n");
}

#[test]
fn unsupported_constructs_abort_the_render() {
    let doc = document(vec![
        Block::Paragraph(words("fine")),
        Block::Paragraph(vec![Inline::InlineMath("e=mc^2".into())]),
    ]);
    assert_eq!(
        render_with_config(&doc, &config(80)),
        Err(RenderError::UnsupportedConstruct(Construct::InlineMath))
    );

    let doc = document(vec![Block::LineBlock(vec![words("verse")])]);
    let err = render_with_config(&doc, &config(80)).unwrap_err();
    assert_eq!(err.to_string(), "unsupported construct: line block");
}

#[test]
fn rendering_is_idempotent() {
    let doc = Document {
        metadata: Metadata {
            title: Some("T".into()),
            authors: vec!["A".into()],
            date: Some("D".into()),
        },
        body: vec![
            heading(1, "H"),
            Block::Paragraph(vec![link("l", "t"), Inline::Note(vec![Block::Plain(words("n"))])]),
            Block::BulletList(vec![words("one"), words("two")]),
        ],
    };
    let mut renderer = Renderer::new(&config(30));
    let first = renderer.render(&doc).unwrap();
    let second = renderer.render(&doc).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, render_with_config(&doc, &config(30)).unwrap());
    assert_eq!(renderer.references().len(), 2);
}

#[test]
fn paragraphs_respect_width() {
    let text = "Plain text output should never exceed the configured width unless a single word is longer than it";
    let doc = document(vec![Block::Paragraph(words(text))]);
    for width in [10, 20, 33] {
        let out = render_with_config(&doc, &config(width)).unwrap();
        for line in out.lines() {
            assert!(line.chars().count() <= width, "{line:?} exceeds {width}");
        }
    }
}

#[test]
fn empty_document() {
    assert_eq!(render_with_config(&Document::default(), &config(80)).unwrap(), "\n");
}
