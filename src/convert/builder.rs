//! Recursive tree builder.

use std::collections::HashSet;

use uuid::Uuid;

use super::ConvertOptions;
use crate::dom::{self, ElementClass, Handle};
use crate::error::{Error, Result};
use crate::model::{Attrs, ContainerNode, Node, NodeKind};

/// Per-call conversion state.
///
/// Holds the recursion depth, the source ids already claimed in this run and
/// the recovered issues. One builder converts one document.
pub(crate) struct Builder<'o> {
    pub(super) options: &'o ConvertOptions,
    depth: usize,
    used_ids: HashSet<Uuid>,
    issues: Vec<Error>,
}

impl<'o> Builder<'o> {
    pub fn new(options: &'o ConvertOptions) -> Self {
        Self {
            options,
            depth: 0,
            used_ids: HashSet::new(),
            issues: Vec::new(),
        }
    }

    /// Convert the children of the document body.
    ///
    /// Top-level inline runs always become paragraphs, so the result never
    /// holds bare text leaves.
    pub fn build_top_level(&mut self, children: &[Handle]) -> Result<Vec<Node>> {
        self.group_and_convert(children, None)
    }

    /// Issues recovered from while building.
    pub fn into_issues(self) -> Vec<Error> {
        self.issues
    }

    /// Convert one source node.
    ///
    /// `host` is the kind of the nearest non-skip ancestor, `None` at the top
    /// level. An inline handle is a run of its own and comes back wrapped in a
    /// paragraph, as a top-level run would.
    pub fn build(&mut self, handle: &Handle, host: Option<NodeKind>) -> Result<Node> {
        if dom::is_inline(handle) {
            return self.inline_paragraph(handle);
        }

        match dom::classify(handle) {
            ElementClass::Container(kind) => self.build_container(handle, kind, host),
            ElementClass::Text => self.inline_paragraph(handle),
        }
    }

    fn build_container(
        &mut self,
        handle: &Handle,
        kind: NodeKind,
        host: Option<NodeKind>,
    ) -> Result<Node> {
        self.enter()?;

        let content = match kind {
            // Terminal kinds; a formula's markup is read into attrs, not content.
            NodeKind::Math | NodeKind::Image => Vec::new(),
            NodeKind::Skip => {
                log::trace!(
                    "skipping <{}> at depth {}",
                    dom::local_name(handle).unwrap_or("?"),
                    self.depth
                );
                let children = handle.children.borrow();
                self.group_and_convert(&children, host)?
            }
            _ => {
                let children = handle.children.borrow();
                self.group_and_convert(&children, Some(kind))?
            }
        };

        let node = ContainerNode {
            kind,
            id: self.node_id(handle),
            attrs: self.attrs_for(handle, kind),
            content,
            marks: Vec::new(),
        };

        self.leave();
        Ok(node.into())
    }

    /// Count one level of nesting, failing past the configured limit.
    pub(super) fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth -= 1;
    }

    fn node_id(&mut self, handle: &Handle) -> Uuid {
        if self.options.reuse_source_ids
            && let Some(raw) = dom::attribute(handle, "data-node-id")
        {
            match Uuid::parse_str(raw.trim()) {
                Ok(id) if self.used_ids.insert(id) => return id,
                Ok(id) => log::debug!("data-node-id {id} already used, assigning a fresh id"),
                Err(e) => log::debug!("ignoring data-node-id {raw:?}: {e}"),
            }
        }
        Uuid::new_v4()
    }

    fn attrs_for(&mut self, handle: &Handle, kind: NodeKind) -> Attrs {
        let mut attrs = Attrs::default();
        match kind {
            NodeKind::Heading => {
                attrs.level = Some(self.heading_level(handle));
            }
            NodeKind::Math => {
                attrs.formula = Some(self.formula(handle));
            }
            NodeKind::CodeBlock => {
                attrs.language = Some(code_language(handle));
            }
            NodeKind::Image => {
                attrs.src = dom::attribute(handle, "src");
                attrs.alt = dom::attribute(handle, "alt");
            }
            _ => {}
        }
        attrs
    }

    /// Level from the digit of the name that classified the element (`h3`, or
    /// a `block-type` of `h3`).
    fn heading_level(&mut self, handle: &Handle) -> u8 {
        let name = dom::attribute(handle, "block-type")
            .or_else(|| dom::local_name(handle).map(str::to_string))
            .unwrap_or_default();

        match name.strip_prefix('h').and_then(|d| d.parse::<u8>().ok()) {
            Some(level) if (1..=4).contains(&level) => level,
            _ => {
                self.issue(NodeKind::Heading, format!("no level in '{name}'"));
                1
            }
        }
    }

    /// Trimmed text of the nested `<math>` element, else the `data-formula`
    /// attribute.
    fn formula(&mut self, handle: &Handle) -> String {
        if let Some(math) = dom::find_first_element(handle, "math") {
            return dom::text_content(&math).trim().to_string();
        }
        if let Some(formula) = dom::attribute(handle, "data-formula") {
            return formula.trim().to_string();
        }
        self.issue(
            NodeKind::Math,
            "no <math> element or data-formula attribute".to_string(),
        );
        String::new()
    }

    fn issue(&mut self, kind: NodeKind, reason: String) {
        let error = Error::MalformedStructure { kind, reason };
        log::warn!("{error}");
        self.issues.push(error);
    }
}

/// Language from the first `language-` class token on the element or on a
/// nested `<code>`. Empty when neither has one.
fn code_language(handle: &Handle) -> String {
    let from = |h: &Handle| {
        dom::class_tokens(h)
            .into_iter()
            .find_map(|token| token.strip_prefix("language-").map(str::to_string))
    };

    from(handle)
        .or_else(|| dom::find_first_element(handle, "code").and_then(|code| from(&code)))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{body_children, find_first_element, parse_html};
    use crate::model::MarkType;

    fn build_first(html: &str, tag: &str, options: &ConvertOptions) -> (Node, Vec<Error>) {
        let dom = parse_html(html);
        let element = find_first_element(&dom.document, tag).unwrap();
        let mut builder = Builder::new(options);
        let node = builder.build(&element, None).unwrap();
        (node, builder.into_issues())
    }

    #[test]
    fn test_heading_level_from_tag() {
        let (node, issues) = build_first("<h3>Title</h3>", "h3", &ConvertOptions::default());
        let heading = node.as_container().unwrap();
        assert_eq!(heading.kind, NodeKind::Heading);
        assert_eq!(heading.attrs.level, Some(3));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_heading_level_from_block_type() {
        let (node, _) = build_first(
            r#"<div block-type="h2">Title</div>"#,
            "div",
            &ConvertOptions::default(),
        );
        assert_eq!(node.as_container().unwrap().attrs.level, Some(2));
    }

    #[test]
    fn test_math_formula_from_nested_math() {
        let (node, issues) = build_first(
            r#"<div block-type="Equation"><math> x^2 + y^2 </math></div>"#,
            "div",
            &ConvertOptions::default(),
        );
        let math = node.as_container().unwrap();
        assert_eq!(math.kind, NodeKind::Math);
        assert_eq!(math.attrs.formula.as_deref(), Some("x^2 + y^2"));
        assert!(math.content.is_empty());
        assert!(issues.is_empty());
    }

    #[test]
    fn test_math_formula_from_attribute() {
        let (node, _) = build_first(
            r#"<div block-type="Equation" data-formula=" E = mc^2 "></div>"#,
            "div",
            &ConvertOptions::default(),
        );
        assert_eq!(
            node.as_container().unwrap().attrs.formula.as_deref(),
            Some("E = mc^2")
        );
    }

    #[test]
    fn test_math_without_formula_is_recorded() {
        let (node, issues) = build_first(
            r#"<div block-type="Equation">just text</div>"#,
            "div",
            &ConvertOptions::default(),
        );
        assert_eq!(node.as_container().unwrap().attrs.formula.as_deref(), Some(""));
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            Error::MalformedStructure {
                kind: NodeKind::Math,
                ..
            }
        ));
    }

    #[test]
    fn test_code_language() {
        let (node, _) = build_first(
            r#"<pre class="block language-rust">fn main() {}</pre>"#,
            "pre",
            &ConvertOptions::default(),
        );
        let code = node.as_container().unwrap();
        assert_eq!(code.attrs.language.as_deref(), Some("rust"));
        assert_eq!(code.content[0].as_text().unwrap().text, "fn main() {}");

        let (node, _) = build_first(
            r#"<pre><code class="language-python">pass</code></pre>"#,
            "pre",
            &ConvertOptions::default(),
        );
        assert_eq!(
            node.as_container().unwrap().attrs.language.as_deref(),
            Some("python")
        );

        let (node, _) = build_first("<pre>x</pre>", "pre", &ConvertOptions::default());
        assert_eq!(node.as_container().unwrap().attrs.language.as_deref(), Some(""));
    }

    #[test]
    fn test_image_attrs() {
        let (node, _) = build_first(
            r#"<img src="fig1.png" alt="Figure 1">"#,
            "img",
            &ConvertOptions::default(),
        );
        let image = node.as_container().unwrap();
        assert_eq!(image.kind, NodeKind::Image);
        assert_eq!(image.attrs.src.as_deref(), Some("fig1.png"));
        assert_eq!(image.attrs.alt.as_deref(), Some("Figure 1"));
    }

    #[test]
    fn test_inline_element_builds_marked_paragraph() {
        let (node, _) = build_first(
            r#"<a href="/x">see <b>here</b></a>"#,
            "a",
            &ConvertOptions::default(),
        );
        let paragraph = node.as_container().unwrap();
        assert_eq!(paragraph.kind, NodeKind::Paragraph);
        let leaves: Vec<_> = paragraph
            .content
            .iter()
            .map(|n| n.as_text().unwrap())
            .collect();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].text, "see ");
        assert!(leaves[0].has_mark(MarkType::Link));
        assert!(!leaves[0].has_mark(MarkType::Bold));
        assert_eq!(leaves[1].text, "here");
        assert!(leaves[1].has_mark(MarkType::Link));
        assert!(leaves[1].has_mark(MarkType::Bold));
    }

    #[test]
    fn test_source_ids_reused_once() {
        let id = "6f1c1f4e-2b7a-4d53-9a0e-0c4b7d9e6a11";
        let html = format!(
            r#"<ul data-node-id="{id}"><li data-node-id="{id}">a</li><li data-node-id="nope">b</li></ul>"#
        );
        let options = ConvertOptions::default().with_reuse_source_ids(true);
        let (node, _) = build_first(&html, "ul", &options);

        let expected = Uuid::parse_str(id).unwrap();
        assert_eq!(node.id(), expected);
        assert_ne!(node.content()[0].id(), expected);
        assert_ne!(node.content()[0].id(), node.content()[1].id());
    }

    #[test]
    fn test_source_ids_ignored_by_default() {
        let id = "6f1c1f4e-2b7a-4d53-9a0e-0c4b7d9e6a11";
        let html = format!(r#"<ul data-node-id="{id}"></ul>"#);
        let (node, _) = build_first(&html, "ul", &ConvertOptions::default());
        assert_ne!(node.id(), Uuid::parse_str(id).unwrap());
    }

    #[test]
    fn test_depth_limit() {
        let html = "<ul><li><ul><li><ul><li>deep</li></ul></li></ul></li></ul>";
        let dom = parse_html(html);
        let options = ConvertOptions::default().with_max_depth(4);
        let mut builder = Builder::new(&options);
        let err = builder.build_top_level(&body_children(&dom)).unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 4 }));

        let options = ConvertOptions::default().with_max_depth(6);
        let mut builder = Builder::new(&options);
        assert!(builder.build_top_level(&body_children(&dom)).is_ok());
    }
}
