use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tokenizer::TokenizerOpts;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::RcDom;

use crate::config::HtmlConfig;
use crate::error::Error;
use crate::node::{Node, NodeKind};

/// An owned HTML tree. Nodes handed out by `root` and `body` keep the
/// underlying tree alive on their own, but nothing here is `Send`: the tree
/// is meant to live for a single conversion.
pub struct HtmlDocument {
    dom: RcDom,
}

impl HtmlDocument {
    pub fn parse(html: &str, config: &HtmlConfig) -> Result<Self, Error> {
        let parse_options = ParseOpts {
            tokenizer: TokenizerOpts {
                exact_errors: config.exact_errors,
                ..Default::default()
            },
            tree_builder: TreeBuilderOpts {
                exact_errors: config.exact_errors,
                scripting_enabled: config.scripting_enabled,
                drop_doctype: config.drop_doctype,
                ..Default::default()
            },
        };

        let dom = parse_document(RcDom::default(), parse_options)
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(Error::Html)?;

        Ok(Self { dom })
    }

    /// The document node itself.
    pub fn document(&self) -> Node {
        Node::new(self.dom.document.clone())
    }

    /// The top-level element, normally `<html>`.
    pub fn root(&self) -> Option<Node> {
        self.document()
            .children()
            .into_iter()
            .find(|node| node.kind() == NodeKind::Element)
    }

    pub fn body(&self) -> Option<Node> {
        self.root()?.children().into_iter().find(|node| node.is("body"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragments_get_wrapped_in_html_and_body() {
        let document = HtmlDocument::parse("<p>hi</p>", &HtmlConfig::default()).unwrap();

        assert!(document.root().unwrap().is("html"));

        let body = document.body().unwrap();
        let children = body.children();
        assert_eq!(children.len(), 1);
        assert!(children[0].is("p"));
    }

    #[test]
    fn doctype_is_not_the_root() {
        let config = HtmlConfig {
            drop_doctype: false,
            ..HtmlConfig::default()
        };
        let document = HtmlDocument::parse("<!DOCTYPE html><p>hi</p>", &config).unwrap();

        assert!(document.root().unwrap().is("html"));
    }

    #[test]
    fn malformed_markup_is_recovered() {
        let document =
            HtmlDocument::parse("<p><em>open <strong>tags", &HtmlConfig::default()).unwrap();
        let body = document.body().unwrap();

        assert_eq!(body.content().as_deref(), Some("open tags"));
    }
}
