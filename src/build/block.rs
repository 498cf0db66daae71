use super::Builder;
use crate::block::{Block, ListItem, TaskListItem};
use crate::inline::Inline;
use crate::node::{Node, NodeKind};

impl Builder {
    pub(super) fn block_at(&self, node: &Node, depth: usize) -> Option<Block> {
        if node.kind() != NodeKind::Element || !self.within_limit(node, depth) {
            return None;
        }
        let name = node.name()?;
        let children = node.children();
        let inlines = || self.inlines_at(&children, depth + 1);
        let heading = |level| Block::Heading {
            level,
            content: inlines(),
        };

        let block = match name {
            "blockquote" => Block::Blockquote {
                children: self.blocks_at(&children, depth + 1),
            },
            "ul" | "ol" if children.iter().any(is_task_list_item) => Block::TaskList {
                tight: is_tight_list(&children),
                items: children
                    .iter()
                    .filter_map(|item| self.task_list_item(item, depth + 1))
                    .collect(),
            },
            "ul" => Block::BulletedList {
                tight: is_tight_list(&children),
                items: self.list_items(&children, depth + 1),
            },
            "ol" => Block::NumberedList {
                tight: is_tight_list(&children),
                start: list_start(node),
                items: self.list_items(&children, depth + 1),
            },
            "pre" => Block::CodeBlock {
                info: node.attr("lang"),
                content: node.content().unwrap_or_default(),
            },
            "p" => Block::Paragraph { content: inlines() },
            "h1" => heading(1),
            "h2" => heading(2),
            "h3" => heading(3),
            "h4" => heading(4),
            "h5" => heading(5),
            "h6" => heading(6),
            "hr" => Block::ThematicBreak,
            "table" => {
                log::debug!("Skipping table: tables have no block representation");
                return None;
            }
            _ => {
                let content = node.content().filter(|content| !content.is_empty())?;
                log::trace!("Degrading <{name}> to a paragraph");
                Block::Paragraph {
                    content: vec![Inline::Text(content)],
                }
            }
        };

        Some(block)
    }

    fn list_items(&self, nodes: &[Node], depth: usize) -> Vec<ListItem> {
        nodes
            .iter()
            .filter(|node| node.is("li"))
            .filter(|node| self.within_limit(node, depth))
            .map(|node| ListItem {
                blocks: self.list_item_blocks(node, depth),
            })
            .collect()
    }

    fn task_list_item(&self, node: &Node, depth: usize) -> Option<TaskListItem> {
        if !node.is("li") || !self.within_limit(node, depth) {
            return None;
        }

        Some(TaskListItem {
            is_completed: is_task_list_item_checked(node),
            blocks: trim_leading_whitespace(self.list_item_blocks(node, depth)),
        })
    }

    /// Splits a list item into an implicit paragraph, made of the inline
    /// children before the first block element, followed by the blocks built
    /// from the rest.
    fn list_item_blocks(&self, item: &Node, depth: usize) -> Vec<Block> {
        let children = item.children();
        let split = children
            .iter()
            .position(Node::is_block_element)
            .unwrap_or(children.len());
        let (leading, rest) = children.split_at(split);

        let mut blocks = Vec::with_capacity(rest.len() + 1);

        let inlines = self.inlines_at(leading, depth + 1);
        if !inlines.is_empty() {
            blocks.push(Block::Paragraph { content: inlines });
        }
        blocks.extend(self.blocks_at(rest, depth + 1));

        blocks
    }
}

/// An `li` with a checkbox, either directly or inside a leading `p`.
fn is_task_list_item(node: &Node) -> bool {
    node.is("li")
        && node.children().iter().any(|child| {
            child.is("input")
                || (child.is("p") && child.children().iter().any(|inner| inner.is("input")))
        })
}

fn is_task_list_item_checked(item: &Node) -> bool {
    let Some(first) = item.first_child() else {
        return false;
    };
    first.has_attr("checked")
        || first
            .first_child()
            .is_some_and(|inner| inner.has_attr("checked"))
}

/// Decided once per list, from the first item alone.
fn is_tight_list(children: &[Node]) -> bool {
    children
        .iter()
        .find(|node| node.is("li"))
        .and_then(Node::first_child)
        .is_none_or(|first| !first.is("p"))
}

fn list_start(node: &Node) -> u32 {
    node.attr("start")
        .and_then(|start| start.parse().ok())
        .unwrap_or(1)
}

/// Removes the space the checkbox leaves in front of a task's text.
fn trim_leading_whitespace(mut blocks: Vec<Block>) -> Vec<Block> {
    if let Some(Block::Paragraph { content }) = blocks.first_mut() {
        if let Some(Inline::Text(value)) = content.first_mut() {
            *value = value.trim_start().to_string();
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HtmlConfig;
    use crate::html::HtmlDocument;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn blocks(html: &str) -> Vec<Block> {
        let document = HtmlDocument::parse(html, &HtmlConfig::default()).unwrap();
        Builder::default().blocks(&document.body().unwrap().children())
    }

    fn block(html: &str) -> Block {
        let mut built = blocks(html);
        assert_eq!(built.len(), 1, "expected one block from {html}: {built:?}");
        built.remove(0)
    }

    fn paragraph(value: &str) -> Block {
        Block::Paragraph {
            content: vec![Inline::Text(value.to_string())],
        }
    }

    #[test]
    fn numbered_list_with_start() {
        assert_eq!(
            block(r#"<ol start="3"><li>a</li><li>b</li></ol>"#),
            Block::NumberedList {
                tight: true,
                start: 3,
                items: vec![
                    ListItem {
                        blocks: vec![paragraph("a")],
                    },
                    ListItem {
                        blocks: vec![paragraph("b")],
                    },
                ],
            }
        );
    }

    #[rstest]
    #[case::missing("<ol><li>a</li></ol>")]
    #[case::not_a_number(r#"<ol start="three"><li>a</li></ol>"#)]
    #[case::negative(r#"<ol start="-2"><li>a</li></ol>"#)]
    fn numbered_list_start_defaults_to_one(#[case] html: &str) {
        let Block::NumberedList { start, .. } = block(html) else {
            panic!("expected a numbered list");
        };
        assert_eq!(start, 1);
    }

    #[rstest]
    #[case::tight("<ul><li>a</li><li><p>b</p></li></ul>", true)]
    #[case::loose("<ul><li><p>a</p></li><li>b</li></ul>", false)]
    #[case::nested_list_first("<ul><li><ul><li>x</li></ul></li></ul>", true)]
    #[case::empty_item("<ul><li></li></ul>", true)]
    fn tightness_follows_first_item(#[case] html: &str, #[case] expected: bool) {
        let Block::BulletedList { tight, .. } = block(html) else {
            panic!("expected a bulleted list");
        };
        assert_eq!(tight, expected);
    }

    #[rstest]
    #[case::direct_checked(r#"<ul><li><input type="checkbox" checked> x</li></ul>"#, true)]
    #[case::direct_unchecked(r#"<ul><li><input type="checkbox"> x</li></ul>"#, false)]
    #[case::wrapped_checked(r#"<ul><li><p><input type="checkbox" checked> x</p></li></ul>"#, true)]
    #[case::wrapped_unchecked(r#"<ul><li><p><input type="checkbox"> x</p></li></ul>"#, false)]
    #[case::ordered(r#"<ol><li><input type="checkbox" checked> x</li></ol>"#, true)]
    fn task_items_are_detected_and_checked(#[case] html: &str, #[case] completed: bool) {
        let Block::TaskList { items, .. } = block(html) else {
            panic!("expected a task list");
        };
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].is_completed, completed);
    }

    #[test]
    fn task_item_scenario() {
        assert_eq!(
            block(r#"<ul><li><input type="checkbox" checked> buy milk</li></ul>"#),
            Block::TaskList {
                tight: true,
                items: vec![TaskListItem {
                    is_completed: true,
                    blocks: vec![paragraph("buy milk")],
                }],
            }
        );
    }

    #[test]
    fn one_task_item_makes_the_whole_list_a_task_list() {
        let Block::TaskList { items, .. } =
            block(r#"<ul><li>plain</li><li><input type="checkbox"> task</li></ul>"#)
        else {
            panic!("expected a task list");
        };

        assert_eq!(
            items,
            vec![
                TaskListItem {
                    is_completed: false,
                    blocks: vec![paragraph("plain")],
                },
                TaskListItem {
                    is_completed: false,
                    blocks: vec![paragraph("task")],
                },
            ]
        );
    }

    #[test]
    fn trim_only_touches_first_text() {
        let Block::TaskList { items, .. } = block(
            r#"<ul><li><input type="checkbox">  lead <em> kept</em> tail</li></ul>"#,
        ) else {
            panic!("expected a task list");
        };

        assert_eq!(
            items[0].blocks,
            vec![Block::Paragraph {
                content: vec![
                    Inline::Text("lead ".to_string()),
                    Inline::Emphasis(vec![Inline::Text(" kept".to_string())]),
                    Inline::Text(" tail".to_string()),
                ],
            }]
        );
    }

    #[test]
    fn list_item_splits_leading_inlines_from_blocks() {
        assert_eq!(
            block("<ul><li>intro <em>text</em><ul><li>nested</li></ul><p>after</p></li></ul>"),
            Block::BulletedList {
                tight: true,
                items: vec![ListItem {
                    blocks: vec![
                        Block::Paragraph {
                            content: vec![
                                Inline::Text("intro ".to_string()),
                                Inline::Emphasis(vec![Inline::Text("text".to_string())]),
                            ],
                        },
                        Block::BulletedList {
                            tight: true,
                            items: vec![ListItem {
                                blocks: vec![paragraph("nested")],
                            }],
                        },
                        paragraph("after"),
                    ],
                }],
            }
        );
    }

    #[test]
    fn list_item_without_leading_inlines_has_no_implicit_paragraph() {
        let Block::BulletedList { items, .. } = block("<ul><li><p>only</p></li></ul>") else {
            panic!("expected a bulleted list");
        };
        assert_eq!(items[0].blocks, vec![paragraph("only")]);
    }

    #[test]
    fn leaf_blocks() {
        assert_eq!(
            blocks(concat!(
                r#"<pre lang="rust"><code>fn main() {}</code></pre>"#,
                "<pre><code></code></pre>",
                "<h2>Title <code>x</code></h2>",
                "<hr>",
                "<h6>small</h6>",
            )),
            vec![
                Block::CodeBlock {
                    info: Some("rust".to_string()),
                    content: "fn main() {}".to_string(),
                },
                Block::CodeBlock {
                    info: None,
                    content: String::new(),
                },
                Block::Heading {
                    level: 2,
                    content: vec![
                        Inline::Text("Title ".to_string()),
                        Inline::Code("x".to_string()),
                    ],
                },
                Block::ThematicBreak,
                Block::Heading {
                    level: 6,
                    content: vec![Inline::Text("small".to_string())],
                },
            ]
        );
    }

    #[test]
    fn blockquote_keeps_only_buildable_children() {
        assert_eq!(
            block("<blockquote><p>a</p><table><tr><td>t</td></tr></table><div></div><p>b</p></blockquote>"),
            Block::Blockquote {
                children: vec![paragraph("a"), paragraph("b")],
            }
        );
    }

    #[test]
    fn tables_produce_nothing() {
        assert_eq!(
            blocks("<p>before</p><table><tr><td>cell</td></tr></table><p>after</p>"),
            vec![paragraph("before"), paragraph("after")]
        );
    }

    #[test]
    fn unknown_elements_degrade_to_paragraphs() {
        assert_eq!(
            blocks("<div>some <b>markup</b></div><section></section>loose text"),
            vec![paragraph("some markup")]
        );
    }
}
