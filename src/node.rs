//! Read-only view over a node of the parsed HTML tree.
//!
//! `Node` never mutates the tree and never fails: anything the node doesn't
//! have comes back as `None` or an empty list.

use markup5ever_rcdom::{Handle, NodeData};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    Text,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagInfo {
    pub name: &'static str,
    /// Inline-level in HTML 4. Everything else in the table is block-level.
    pub inline: bool,
}

const fn tag(name: &'static str, inline: bool) -> TagInfo {
    TagInfo { name, inline }
}

// Sorted by name for binary search. Only HTML 4 elements are listed; newer
// tags such as `section` are unknown and therefore not block elements.
static TAGS: &[TagInfo] = &[
    tag("a", true),
    tag("abbr", true),
    tag("acronym", true),
    tag("address", false),
    tag("applet", true),
    tag("area", false),
    tag("b", true),
    tag("base", false),
    tag("basefont", true),
    tag("bdo", true),
    tag("big", true),
    tag("blockquote", false),
    tag("body", false),
    tag("br", true),
    tag("button", true),
    tag("caption", false),
    tag("center", false),
    tag("cite", true),
    tag("code", true),
    tag("col", false),
    tag("colgroup", false),
    tag("dd", false),
    tag("del", true),
    tag("dfn", true),
    tag("dir", false),
    tag("div", false),
    tag("dl", false),
    tag("dt", false),
    tag("em", true),
    tag("embed", true),
    tag("fieldset", false),
    tag("font", true),
    tag("form", false),
    tag("frame", false),
    tag("frameset", false),
    tag("h1", false),
    tag("h2", false),
    tag("h3", false),
    tag("h4", false),
    tag("h5", false),
    tag("h6", false),
    tag("head", false),
    tag("hr", false),
    tag("html", false),
    tag("i", true),
    tag("iframe", true),
    tag("img", true),
    tag("input", true),
    tag("ins", true),
    tag("isindex", false),
    tag("kbd", true),
    tag("label", true),
    tag("legend", false),
    tag("li", false),
    tag("link", false),
    tag("map", true),
    tag("menu", false),
    tag("meta", false),
    tag("noframes", false),
    tag("noscript", false),
    tag("object", true),
    tag("ol", false),
    tag("optgroup", false),
    tag("option", false),
    tag("p", false),
    tag("param", false),
    tag("pre", false),
    tag("q", true),
    tag("s", true),
    tag("samp", true),
    tag("script", true),
    tag("select", true),
    tag("small", true),
    tag("span", true),
    tag("strike", true),
    tag("strong", true),
    tag("style", false),
    tag("sub", true),
    tag("sup", true),
    tag("table", false),
    tag("tbody", false),
    tag("td", false),
    tag("textarea", true),
    tag("tfoot", false),
    tag("th", false),
    tag("thead", false),
    tag("title", false),
    tag("tr", false),
    tag("tt", true),
    tag("u", true),
    tag("ul", false),
    tag("var", true),
];

/// Looks up an element name in the HTML 4 tag table.
pub fn lookup_tag(name: &str) -> Option<&'static TagInfo> {
    TAGS.binary_search_by(|info| info.name.cmp(name))
        .ok()
        .map(|index| &TAGS[index])
}

#[derive(Clone)]
pub struct Node {
    handle: Handle,
}

impl Node {
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    pub fn kind(&self) -> NodeKind {
        match self.handle.data {
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text { .. } => NodeKind::Text,
            _ => NodeKind::Other,
        }
    }

    /// Local tag name of an element, e.g. `"p"`.
    pub fn name(&self) -> Option<&str> {
        match &self.handle.data {
            NodeData::Element { name, .. } => Some(&*name.local),
            _ => None,
        }
    }

    /// Whether this is an element with the given tag name.
    pub fn is(&self, tag_name: &str) -> bool {
        self.name() == Some(tag_name)
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        match &self.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == name)
                .map(|attr| attr.value.to_string()),
            _ => None,
        }
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Text content: a text or comment node's own data, or the concatenated
    /// text of every descendant for elements and documents.
    pub fn content(&self) -> Option<String> {
        match &self.handle.data {
            NodeData::Text { contents } => Some(contents.borrow().to_string()),
            NodeData::Comment { contents } => Some(contents.to_string()),
            NodeData::Element { .. } | NodeData::Document => {
                let mut out = String::new();
                collect_text(&self.handle, &mut out);
                Some(out)
            }
            NodeData::Doctype { .. } | NodeData::ProcessingInstruction { .. } => None,
        }
    }

    /// Child elements and text nodes, minus empty and lone-newline text.
    pub fn children(&self) -> Vec<Node> {
        self.handle
            .children
            .borrow()
            .iter()
            .map(|child| Node::new(child.clone()))
            .filter(|node| match node.kind() {
                NodeKind::Element => true,
                NodeKind::Text => !matches!(node.content().as_deref(), Some("" | "\n")),
                NodeKind::Other => false,
            })
            .collect()
    }

    pub fn first_child(&self) -> Option<Node> {
        self.children().into_iter().next()
    }

    pub fn is_block_element(&self) -> bool {
        self.name()
            .and_then(lookup_tag)
            .is_some_and(|info| !info.inline)
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}

// Document order, with an explicit stack: input nesting depth is unbounded.
fn collect_text(handle: &Handle, out: &mut String) {
    let mut stack: Vec<Handle> = handle.children.borrow().iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        match &node.data {
            NodeData::Text { contents } => out.push_str(&contents.borrow()),
            NodeData::Element { .. } => stack.extend(node.children.borrow().iter().rev().cloned()),
            _ => {}
        }
    }
}
