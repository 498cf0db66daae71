use super::Builder;
use crate::inline::Inline;
use crate::node::{Node, NodeKind};

/// Characters stripped from both ends of a text node.
fn is_newline(c: char) -> bool {
    matches!(
        c,
        '\n' | '\u{0B}' | '\u{0C}' | '\r' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

impl Builder {
    pub(super) fn inline_at(&self, node: &Node, depth: usize) -> Option<Inline> {
        if !self.within_limit(node, depth) {
            return None;
        }

        match node.kind() {
            NodeKind::Text => text_inline(node),
            NodeKind::Element => self.element_inline(node, depth),
            NodeKind::Other => None,
        }
    }

    fn element_inline(&self, node: &Node, depth: usize) -> Option<Inline> {
        let name = node.name()?;
        let children = || self.inlines_at(&node.children(), depth + 1);

        let inline = match name {
            "br" => Inline::LineBreak,
            "code" => Inline::Code(node.content().unwrap_or_default()),
            "em" => Inline::Emphasis(children()),
            "strong" => Inline::Strong(children()),
            "del" => Inline::Strikethrough(children()),
            "a" => Inline::Link {
                destination: node.attr("href").unwrap_or_default(),
                children: children(),
            },
            "img" => Inline::Image {
                source: node.attr("src").unwrap_or_default(),
                children: node
                    .attr("alt")
                    .map(|alt| vec![Inline::Text(alt)])
                    .unwrap_or_default(),
            },
            _ => {
                let content = node.content().filter(|content| !content.is_empty())?;
                log::trace!("Degrading <{name}> to plain text");
                Inline::Text(content)
            }
        };

        Some(inline)
    }
}

fn text_inline(node: &Node) -> Option<Inline> {
    let content = node.content()?;
    match content.trim_matches(is_newline) {
        "" => None,
        " " => Some(Inline::SoftBreak),
        text => Some(Inline::Text(text.to_string())),
    }
}
