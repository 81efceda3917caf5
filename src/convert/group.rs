//! Inline run grouping.
//!
//! Siblings are scanned left to right. Consecutive inline siblings (text and
//! inline formatting elements) form a run; a block sibling closes the current
//! run and is built on its own. A closed run becomes one implicit `paragraph`,
//! unless its host takes inline content directly (headings, code blocks).

use super::builder::Builder;
use crate::dom::{self, Handle};
use crate::error::Result;
use crate::model::{ContainerNode, Mark, Node, NodeKind, TextNode};

impl Builder<'_> {
    /// Convert a sibling sequence whose nearest non-skip ancestor is `host`.
    pub(super) fn group_and_convert(
        &mut self,
        siblings: &[Handle],
        host: Option<NodeKind>,
    ) -> Result<Vec<Node>> {
        let mut out = Vec::new();
        let mut run: Vec<&Handle> = Vec::new();

        for sibling in siblings {
            if dom::is_inline(sibling) {
                run.push(sibling);
            } else if dom::is_element(sibling) {
                self.close_run(&mut run, host, &mut out)?;
                out.push(self.build(sibling, host)?);
            }
            // Comments and processing instructions are invisible.
        }
        self.close_run(&mut run, host, &mut out)?;

        Ok(out)
    }

    fn close_run(
        &mut self,
        run: &mut Vec<&Handle>,
        host: Option<NodeKind>,
        out: &mut Vec<Node>,
    ) -> Result<()> {
        if run.is_empty() {
            return Ok(());
        }

        let mut leaves = Vec::new();
        for handle in run.drain(..) {
            self.inline_leaves(handle, &[], &mut leaves)?;
        }

        if self.options.drop_whitespace_runs
            && host != Some(NodeKind::CodeBlock)
            && leaves.iter().all(|leaf| leaf.text.trim().is_empty())
        {
            return Ok(());
        }

        let leaves = leaves.into_iter().map(Node::Text);
        if host.is_some_and(NodeKind::holds_inline_content) {
            out.extend(leaves);
        } else {
            let paragraph = ContainerNode::new(NodeKind::Paragraph).with_content(leaves.collect());
            out.push(paragraph.into());
        }
        Ok(())
    }

    /// A single inline handle converted as its own run, wrapped in a paragraph.
    pub(super) fn inline_paragraph(&mut self, handle: &Handle) -> Result<Node> {
        let mut leaves = Vec::new();
        self.inline_leaves(handle, &[], &mut leaves)?;
        let content = leaves.into_iter().map(Node::Text).collect();
        Ok(ContainerNode::new(NodeKind::Paragraph)
            .with_content(content)
            .into())
    }

    /// One text leaf per descendant text node, carrying the union of the
    /// marks of every inline element between it and the run, outermost first.
    fn inline_leaves(
        &mut self,
        handle: &Handle,
        inherited: &[Mark],
        out: &mut Vec<TextNode>,
    ) -> Result<()> {
        if let Some(text) = dom::text_of(handle) {
            out.push(TextNode::new(text).with_marks(inherited.to_vec()));
            return Ok(());
        }

        self.enter()?;
        let mut marks = inherited.to_vec();
        if let Some(mark) = dom::mark_for(handle)
            && !marks.contains(&mark)
        {
            marks.push(mark);
        }
        for child in handle.children.borrow().iter() {
            self.inline_leaves(child, &marks, out)?;
        }
        self.leave();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertOptions;
    use crate::dom::{body_children, parse_html};
    use crate::model::MarkType;

    fn group(html: &str, options: &ConvertOptions) -> Vec<Node> {
        let dom = parse_html(html);
        let mut builder = Builder::new(options);
        builder.build_top_level(&body_children(&dom)).unwrap()
    }

    #[test]
    fn test_inline_run_becomes_paragraph() {
        let nodes = group("Hello <b>world</b>", &ConvertOptions::default());
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].kind(), Some(NodeKind::Paragraph));
        assert_eq!(nodes[0].leaf_texts(), vec!["Hello ", "world"]);
    }

    #[test]
    fn test_block_splits_runs() {
        let nodes = group("one<ul><li>x</li></ul>two", &ConvertOptions::default());
        let kinds: Vec<_> = nodes.iter().filter_map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Paragraph, NodeKind::BulletList, NodeKind::Paragraph]
        );
    }

    #[test]
    fn test_heading_takes_leaves_directly() {
        let nodes = group("<h2>A <i>b</i></h2>", &ConvertOptions::default());
        let heading = &nodes[0];
        assert_eq!(heading.content().len(), 2);
        assert!(heading.content().iter().all(Node::is_text));
    }

    #[test]
    fn test_host_looks_through_skip() {
        let nodes = group("<h2><span>Title</span></h2>", &ConvertOptions::default());
        let skip = &nodes[0].content()[0];
        assert_eq!(skip.kind(), Some(NodeKind::Skip));
        assert!(skip.content()[0].is_text());
    }

    #[test]
    fn test_later_runs_survive_heading_run() {
        let nodes = group("<h1>A<span></span>B</h1>", &ConvertOptions::default());
        assert_eq!(nodes[0].leaf_texts(), vec!["A", "B"]);
    }

    #[test]
    fn test_nested_marks_union() {
        let nodes = group(r#"<b>a <i>b <a href="/l">c</a></i></b>"#, &ConvertOptions::default());
        let leaves: Vec<_> = nodes[0]
            .content()
            .iter()
            .filter_map(Node::as_text)
            .collect();

        let types = |t: &TextNode| t.marks.iter().map(|m| m.mark_type).collect::<Vec<_>>();
        assert_eq!(types(leaves[0]), vec![MarkType::Bold]);
        assert_eq!(types(leaves[1]), vec![MarkType::Bold, MarkType::Italic]);
        assert_eq!(
            types(leaves[2]),
            vec![MarkType::Bold, MarkType::Italic, MarkType::Link]
        );
        assert_eq!(leaves[2].marks[2].href(), Some("/l"));
    }

    #[test]
    fn test_repeated_mark_not_duplicated() {
        let nodes = group("<b><b>x</b></b>", &ConvertOptions::default());
        let leaf = nodes[0].content()[0].as_text().unwrap();
        assert_eq!(leaf.marks.len(), 1);
    }

    #[test]
    fn test_whitespace_runs() {
        let html = "<ul>\n  <li>x</li>\n</ul>";

        let nodes = group(html, &ConvertOptions::default());
        assert_eq!(nodes[0].content().len(), 1);

        let literal = ConvertOptions::default().with_drop_whitespace_runs(false);
        let nodes = group(html, &literal);
        let kinds: Vec<_> = nodes[0].content().iter().filter_map(Node::kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::Paragraph, NodeKind::ListItem, NodeKind::Paragraph]
        );
    }

    #[test]
    fn test_comments_do_not_split_runs() {
        let nodes = group("a<!-- note -->b", &ConvertOptions::default());
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].leaf_texts(), vec!["a", "b"]);
    }
}
