use pulldown_cmark::{Event, LinkType, Tag, TagEnd};

use super::Builder;
use crate::inline::Inline;

/// An inline container waiting for its closing event.
enum Open {
    Emphasis,
    Strong,
    Strikethrough,
    Link(String),
    Image(String),
}

impl Open {
    fn from_tag(tag: Tag<'_>) -> Option<Self> {
        match tag {
            Tag::Emphasis => Some(Open::Emphasis),
            Tag::Strong => Some(Open::Strong),
            Tag::Strikethrough => Some(Open::Strikethrough),
            Tag::Link {
                link_type,
                dest_url,
                ..
            } => Some(Open::Link(destination(link_type, &dest_url))),
            Tag::Image { dest_url, .. } => Some(Open::Image(dest_url.into_string())),
            _ => None,
        }
    }

    fn close(self, children: Vec<Inline>) -> Inline {
        match self {
            Open::Emphasis => Inline::Emphasis(children),
            Open::Strong => Inline::Strong(children),
            Open::Strikethrough => Inline::Strikethrough(children),
            Open::Link(destination) => Inline::Link {
                destination,
                children,
            },
            Open::Image(source) => Inline::Image { source, children },
        }
    }
}

fn destination(link_type: LinkType, dest_url: &str) -> String {
    match link_type {
        LinkType::Email => format!("mailto:{dest_url}"),
        _ => dest_url.to_string(),
    }
}

fn is_inline_end(end: &TagEnd) -> bool {
    matches!(
        end,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link | TagEnd::Image
    )
}

impl Builder {
    /// Builds inlines straight from Markdown events, without going through
    /// HTML.
    ///
    /// Only inline content is kept. Block structure contributes nothing, so
    /// the inlines of consecutive paragraphs run together, and code blocks
    /// and raw HTML blocks are skipped. Raw inline HTML becomes
    /// [`Inline::Html`]. Containers still open when the events run out are
    /// closed around whatever they collected.
    pub fn inlines_from_events<'a, I>(&self, events: I) -> Vec<Inline>
    where
        I: IntoIterator<Item = Event<'a>>,
    {
        let mut stack: Vec<(Open, Vec<Inline>)> = Vec::new();
        let mut root = Vec::new();
        // Containers opened past the depth limit; everything inside is dropped
        let mut skipped = 0usize;
        let mut in_code_block = false;

        for event in events {
            let inline = match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    in_code_block = true;
                    continue;
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    continue;
                }
                _ if in_code_block => continue,

                Event::Start(tag) => {
                    if let Some(open) = Open::from_tag(tag) {
                        if skipped > 0 || stack.len() > self.max_depth {
                            if skipped == 0 {
                                log::debug!(
                                    "Dropping inline nested {} levels deep (limit {})",
                                    stack.len(),
                                    self.max_depth
                                );
                            }
                            skipped += 1;
                        } else {
                            stack.push((open, Vec::new()));
                        }
                    }
                    continue;
                }
                Event::End(end) if is_inline_end(&end) => {
                    if skipped > 0 {
                        skipped -= 1;
                        continue;
                    }
                    match stack.pop() {
                        Some((open, children)) => open.close(children),
                        None => continue,
                    }
                }
                _ if skipped > 0 || stack.len() > self.max_depth => continue,

                Event::Text(text) => Inline::Text(text.into_string()),
                Event::Code(code) => Inline::Code(code.into_string()),
                Event::InlineHtml(html) => Inline::Html(html.into_string()),
                Event::SoftBreak => Inline::SoftBreak,
                Event::HardBreak => Inline::LineBreak,
                other => {
                    log::trace!("Skipping non-inline event {:?}", other);
                    continue;
                }
            };

            match stack.last_mut() {
                Some((_, children)) => children.push(inline),
                None => root.push(inline),
            }
        }

        while let Some((open, children)) = stack.pop() {
            let inline = open.close(children);
            match stack.last_mut() {
                Some((_, parent)) => parent.push(inline),
                None => root.push(inline),
            }
        }

        root
    }
}
