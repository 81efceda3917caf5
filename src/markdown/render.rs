//! Editor document → Markdown rendering.
//!
//! Pure string accumulation; callers decide where the output goes.

use crate::model::{ContainerNode, Document, Mark, MarkType, Node, NodeKind, TextNode};

use super::escape::{calculate_fence_length, escape_markdown};

/// Tracks list context for tight/loose item separation.
#[derive(Debug, Clone)]
struct ListContext {
    /// Items rendered so far.
    counter: usize,
    /// Whether this is a tight list (no blank lines between items).
    is_tight: bool,
}

/// Context for rendering (pure string accumulation, no I/O).
pub struct RenderContext<'a> {
    document: &'a Document,
    output: String,
    line_prefix: String,
    list_stack: Vec<ListContext>,
    at_line_start: bool,
    pending_newline: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(document: &'a Document) -> Self {
        Self {
            document,
            output: String::new(),
            line_prefix: String::new(),
            list_stack: Vec::new(),
            at_line_start: true,
            pending_newline: false,
        }
    }

    /// Render the document, consuming the context.
    pub fn render(mut self) -> String {
        for node in &self.document.content {
            self.walk_node(node);
        }

        if !self.at_line_start {
            self.output.push('\n');
        }
        self.output
    }

    /// A list is tight when every item holds at most one paragraph and no
    /// nested blocks.
    fn is_tight_list(list: &ContainerNode) -> bool {
        list.content.iter().all(|item| {
            let mut paragraphs = 0;
            for child in item.content() {
                match child.kind() {
                    Some(NodeKind::Paragraph) => paragraphs += 1,
                    Some(
                        NodeKind::BulletList
                        | NodeKind::BlockQuote
                        | NodeKind::CodeBlock
                        | NodeKind::Table
                        | NodeKind::Math,
                    ) => return false,
                    _ => {}
                }
            }
            paragraphs <= 1
        })
    }

    /// Write the line prefix if at line start.
    fn ensure_line_started(&mut self) {
        if self.at_line_start {
            self.output.push_str(&self.line_prefix);
            self.at_line_start = false;
        }
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Leave a blank line after the previous block, if there was one.
    fn separate_block(&mut self) {
        if self.pending_newline {
            if !self.at_line_start {
                self.write_newline();
            }
            self.write_newline();
            self.pending_newline = false;
        }
    }

    fn start_block(&mut self) {
        self.separate_block();
        self.ensure_line_started();
    }

    fn end_block(&mut self) {
        self.pending_newline = true;
    }

    fn walk_node(&mut self, node: &Node) {
        match node {
            Node::Text(text) => self.write_text(text),
            Node::Container(container) => self.walk_container(container),
        }
    }

    fn walk_children(&mut self, container: &ContainerNode) {
        for child in &container.content {
            self.walk_node(child);
        }
    }

    fn walk_container(&mut self, node: &ContainerNode) {
        match node.kind {
            NodeKind::Paragraph => {
                self.start_block();
                self.walk_children(node);
                self.end_block();
            }

            NodeKind::Heading => {
                self.start_block();
                let level = node.attrs.level.unwrap_or(1) as usize;
                self.output.push_str(&"#".repeat(level));
                self.output.push(' ');
                self.walk_children(node);
                self.end_block();
            }

            NodeKind::BulletList => {
                // Items start their own lines
                self.separate_block();
                self.list_stack.push(ListContext {
                    counter: 0,
                    is_tight: Self::is_tight_list(node),
                });
                self.walk_children(node);
                self.list_stack.pop();
                self.end_block();
            }

            NodeKind::ListItem => {
                let (is_tight, counter) = self
                    .list_stack
                    .last()
                    .map(|ctx| (ctx.is_tight, ctx.counter))
                    .unwrap_or((true, 0));

                // Loose lists separate items with a blank line
                if !self.at_line_start {
                    self.write_newline();
                }
                if !is_tight && counter > 0 {
                    self.write_newline();
                }
                if let Some(ctx) = self.list_stack.last_mut() {
                    ctx.counter += 1;
                }

                self.ensure_line_started();
                self.output.push_str("- ");
                self.pending_newline = false;

                let old_prefix = self.line_prefix.clone();
                self.line_prefix.push_str("  ");
                self.walk_children(node);
                self.line_prefix = old_prefix;

                self.pending_newline = false;
            }

            NodeKind::BlockQuote => {
                self.separate_block();

                let prefix = "> ";
                if !self.at_line_start {
                    self.output.push_str(prefix);
                }

                let old_prefix = self.line_prefix.clone();
                self.line_prefix.push_str(prefix);
                self.walk_children(node);
                self.line_prefix = old_prefix;

                self.end_block();
            }

            NodeKind::CodeBlock => {
                self.start_block();
                let text: String = node.content.iter().map(Node::text_content).collect();
                let language = node.attrs.language.as_deref().unwrap_or("");
                let fence = "`".repeat(calculate_fence_length(&text, '`'));

                self.output.push_str(&format!("{fence}{language}"));
                self.write_newline();
                for line in text.lines() {
                    self.ensure_line_started();
                    self.output.push_str(line);
                    self.write_newline();
                }
                self.ensure_line_started();
                self.output.push_str(&fence);
                self.end_block();
            }

            NodeKind::Math => {
                self.start_block();
                let formula = node.attrs.formula.as_deref().unwrap_or("");
                self.output.push_str(&format!("$${formula}$$"));
                self.end_block();
            }

            NodeKind::Image => {
                self.start_block();
                let alt = node.attrs.alt.as_deref().unwrap_or("image");
                let src = node.attrs.src.as_deref().unwrap_or("");
                self.output
                    .push_str(&format!("![{}]({})", escape_markdown(alt), src));
                self.end_block();
            }

            NodeKind::Table => {
                self.start_block();
                self.write_table(node);
                self.end_block();
            }

            NodeKind::Link => {
                self.ensure_line_started();
                match node.attrs.href.as_deref() {
                    Some(href) if !href.is_empty() => {
                        self.output.push('[');
                        self.walk_children(node);
                        self.output.push_str(&format!("]({href})"));
                    }
                    _ => self.walk_children(node),
                }
            }

            // Rows and cells outside a table, and transparent wrappers
            NodeKind::TableRow
            | NodeKind::TableHeader
            | NodeKind::TableCell
            | NodeKind::Doc
            | NodeKind::Skip => self.walk_children(node),
        }
    }

    /// Pipe table; the first row is the header.
    fn write_table(&mut self, table: &ContainerNode) {
        let rows: Vec<Vec<String>> = table
            .content
            .iter()
            .map(|row| {
                row.content()
                    .iter()
                    .map(|cell| escape_markdown(&collapse_whitespace(&cell.text_content())))
                    .collect()
            })
            .collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return;
        }

        for (i, row) in rows.iter().enumerate() {
            let mut cells = row.clone();
            cells.resize(width, String::new());
            self.ensure_line_started();
            self.output.push_str(&format!("| {} |", cells.join(" | ")));
            self.write_newline();

            if i == 0 {
                self.ensure_line_started();
                self.output
                    .push_str(&format!("|{}", " --- |".repeat(width)));
                self.write_newline();
            }
        }
    }

    /// Write a text leaf with its marks, keeping outer whitespace outside the
    /// emphasis delimiters.
    fn write_text(&mut self, text: &TextNode) {
        self.ensure_line_started();

        let body = collapse_whitespace(&text.text);
        if body.is_empty() {
            if !text.text.is_empty() && !self.output.ends_with(' ') {
                self.output.push(' ');
            }
            return;
        }

        if text.text.starts_with(char::is_whitespace) && !self.output.ends_with(' ') {
            self.output.push(' ');
        }
        for mark in &text.marks {
            self.output.push_str(open_delimiter(mark));
        }
        self.output.push_str(&escape_markdown(&body));
        for mark in text.marks.iter().rev() {
            self.output.push_str(&close_delimiter(mark));
        }
        if text.text.ends_with(char::is_whitespace) {
            self.output.push(' ');
        }
    }
}

fn open_delimiter(mark: &Mark) -> &'static str {
    match mark.mark_type {
        MarkType::Bold => "**",
        MarkType::Italic => "*",
        MarkType::Superscript => "<sup>",
        MarkType::Strikethrough => "~~",
        MarkType::Link if mark.href().is_some_and(|h| !h.is_empty()) => "[",
        MarkType::Link | MarkType::Color => "",
    }
}

fn close_delimiter(mark: &Mark) -> String {
    match mark.mark_type {
        MarkType::Bold => "**".to_string(),
        MarkType::Italic => "*".to_string(),
        MarkType::Superscript => "</sup>".to_string(),
        MarkType::Strikethrough => "~~".to_string(),
        MarkType::Link => match mark.href() {
            Some(href) if !href.is_empty() => format!("]({href})"),
            _ => String::new(),
        },
        MarkType::Color => String::new(),
    }
}

/// Trim and collapse internal whitespace runs to single spaces.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Render a document to Markdown.
pub fn render_document(document: &Document) -> String {
    RenderContext::new(document).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attrs, ContainerNode};

    fn doc(nodes: Vec<Node>) -> Document {
        Document::new(nodes)
    }

    fn with_attrs(kind: NodeKind, attrs: Attrs, content: Vec<Node>) -> Node {
        ContainerNode::new(kind)
            .with_attrs(attrs)
            .with_content(content)
            .into()
    }

    fn para(texts: &[&str]) -> Node {
        Node::container(
            NodeKind::Paragraph,
            texts.iter().map(|t| Node::text(*t)).collect(),
        )
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        let out = render_document(&doc(vec![para(&["one"]), para(&["two"])]));
        assert_eq!(out, "one\n\ntwo\n");
    }

    #[test]
    fn test_heading_level() {
        let attrs = Attrs {
            level: Some(3),
            ..Attrs::default()
        };
        let out = render_document(&doc(vec![with_attrs(
            NodeKind::Heading,
            attrs,
            vec![Node::text("Title")],
        )]));
        assert_eq!(out, "### Title\n");
    }

    #[test]
    fn test_marks() {
        let bold = TextNode::new("bold ").with_marks(vec![Mark::bold()]);
        let link = TextNode::new("site").with_marks(vec![Mark::italic(), Mark::link("https://x.y")]);
        let sup = TextNode::new("2").with_marks(vec![Mark::superscript()]);
        let out = render_document(&doc(vec![Node::container(
            NodeKind::Paragraph,
            vec![bold.into(), link.into(), Node::text(" x"), sup.into()],
        )]));
        assert_eq!(out, "**bold** *[site](https://x.y)* x<sup>2</sup>\n");
    }

    #[test]
    fn test_tight_nested_list() {
        let inner = Node::container(
            NodeKind::BulletList,
            vec![Node::container(NodeKind::ListItem, vec![para(&["b"])])],
        );
        let list = Node::container(
            NodeKind::BulletList,
            vec![
                Node::container(NodeKind::ListItem, vec![para(&["a"]), inner]),
                Node::container(NodeKind::ListItem, vec![para(&["c"])]),
            ],
        );
        let out = render_document(&doc(vec![list]));
        assert!(out.starts_with("- a\n"));
        assert!(out.contains("  - b\n"));
        assert!(out.contains("- c"));
    }

    #[test]
    fn test_block_quote() {
        let quote = Node::container(NodeKind::BlockQuote, vec![para(&["quoted"])]);
        assert_eq!(render_document(&doc(vec![quote])), "> quoted\n");
    }

    #[test]
    fn test_code_block_fence_and_language() {
        let attrs = Attrs {
            language: Some("rust".to_string()),
            ..Attrs::default()
        };
        let code = with_attrs(
            NodeKind::CodeBlock,
            attrs,
            vec![Node::text("let s = \"```\";\nprintln!(\"{s}\");")],
        );
        let out = render_document(&doc(vec![code]));
        assert_eq!(
            out,
            "````rust\nlet s = \"```\";\nprintln!(\"{s}\");\n````\n"
        );
    }

    #[test]
    fn test_math_and_image() {
        let math = with_attrs(
            NodeKind::Math,
            Attrs {
                formula: Some("x^2".to_string()),
                ..Attrs::default()
            },
            vec![],
        );
        let image = with_attrs(
            NodeKind::Image,
            Attrs {
                src: Some("fig.png".to_string()),
                alt: Some("Figure".to_string()),
                ..Attrs::default()
            },
            vec![],
        );
        let out = render_document(&doc(vec![math, image]));
        assert_eq!(out, "$$x^2$$\n\n![Figure](fig.png)\n");
    }

    #[test]
    fn test_table() {
        let row = |a: &str, b: &str| {
            Node::container(
                NodeKind::TableRow,
                vec![
                    Node::container(NodeKind::TableCell, vec![para(&[a])]),
                    Node::container(NodeKind::TableCell, vec![para(&[b])]),
                ],
            )
        };
        let table = Node::container(NodeKind::Table, vec![row("A", "B"), row("1", "x|y")]);
        let out = render_document(&doc(vec![table]));
        assert_eq!(out, "| A | B |\n| --- | --- |\n| 1 | x\\|y |\n");
    }

    #[test]
    fn test_text_is_escaped() {
        let out = render_document(&doc(vec![para(&["*not bold*"])]));
        assert_eq!(out, "\\*not bold\\*\n");
    }
}
