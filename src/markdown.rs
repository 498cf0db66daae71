use std::borrow::Cow;
use std::ops::Range;
use std::sync::LazyLock;

use linkify::{Link, LinkFinder, LinkKind};
use pulldown_cmark::{
    CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use regex::Regex;

use crate::config::MarkdownConfig;

/// Raw HTML tags that are escaped instead of passed through.
static FILTERED_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<(/?(?:title|textarea|style|xmp|iframe|noembed|noframes|script|plaintext))([\s/>]|$)",
    )
    .expect("filtered tag regex")
});

/// Compile Markdown to HTML.
///
/// Code blocks are written as `<pre lang="..."><code>`, soft breaks become
/// plain spaces and raw HTML is passed through (minus filtered tags).
pub fn markdown_to_html(markdown: &str, config: &MarkdownConfig) -> String {
    let mut events = Vec::new();
    for event in markdown_events(markdown, config) {
        process_event(event, config, &mut events);
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Parse Markdown into events with the configured extensions, merging
/// adjacent text and turning bare URLs and email addresses into links.
pub(crate) fn markdown_events<'a>(markdown: &'a str, config: &MarkdownConfig) -> Vec<Event<'a>> {
    let mut options = Options::empty();
    if config.strikethrough {
        options.insert(Options::ENABLE_STRIKETHROUGH);
    }
    if config.tasklist {
        options.insert(Options::ENABLE_TASKLISTS);
    }
    if config.table {
        options.insert(Options::ENABLE_TABLES);
    }

    let parser = TextMergeStream::new(Parser::new_ext(markdown, options));
    let mut state = LinkState::default();
    let mut events = Vec::new();

    for event in parser {
        match event {
            Event::Start(tag @ Tag::CodeBlock(_)) => {
                state.in_code_block = true;
                events.push(Event::Start(tag));
            }
            Event::End(TagEnd::CodeBlock) => {
                state.in_code_block = false;
                events.push(Event::End(TagEnd::CodeBlock));
            }
            Event::Start(tag @ (Tag::Link { .. } | Tag::Image { .. })) => {
                state.link_depth += 1;
                events.push(Event::Start(tag));
            }
            Event::End(end @ (TagEnd::Link | TagEnd::Image)) => {
                state.link_depth = state.link_depth.saturating_sub(1);
                events.push(Event::End(end));
            }
            Event::Text(text) if config.autolink && state.links_allowed() => {
                autolink(text, &mut events);
            }
            other => events.push(other),
        }
    }

    events
}

#[derive(Default)]
struct LinkState {
    // Links and images currently open
    link_depth: usize,
    in_code_block: bool,
}

impl LinkState {
    fn links_allowed(&self) -> bool {
        self.link_depth == 0 && !self.in_code_block
    }
}

fn process_event<'a>(event: Event<'a>, config: &MarkdownConfig, out: &mut Vec<Event<'a>>) {
    match event {
        // Code blocks
        Event::Start(Tag::CodeBlock(kind)) => {
            let lang = match &kind {
                CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
                CodeBlockKind::Indented => None,
            };
            let open = match lang {
                Some(lang) => format!(
                    "<pre lang=\"{}\"><code>",
                    html_escape::encode_double_quoted_attribute(lang)
                ),
                None => "<pre><code>".to_string(),
            };
            out.push(Event::Html(open.into()));
        }
        Event::End(TagEnd::CodeBlock) => {
            out.push(Event::Html("</code></pre>\n".into()));
        }

        // Raw HTML
        Event::Html(raw) if config.tagfilter => out.push(Event::Html(filter_tags(raw))),
        Event::InlineHtml(raw) if config.tagfilter => {
            out.push(Event::InlineHtml(filter_tags(raw)));
        }

        Event::SoftBreak => out.push(Event::Text(" ".into())),

        other => out.push(other),
    }
}

/// A bare link found in a text run.
struct Autolink {
    range: Range<usize>,
    link_type: LinkType,
    destination: String,
}

/// Splits a text run around bare URLs and email addresses, wrapping each in
/// a link.
fn autolink<'a>(text: CowStr<'a>, out: &mut Vec<Event<'a>>) {
    let mut finder = LinkFinder::new();
    finder.url_must_have_scheme(false);

    let found: Vec<Autolink> = finder
        .links(&text)
        .filter_map(|link| autolink_target(&text, &link))
        .collect();
    if found.is_empty() {
        out.push(Event::Text(text));
        return;
    }

    let mut last = 0;
    for link in found {
        if last < link.range.start {
            out.push(Event::Text(text[last..link.range.start].to_string().into()));
        }
        out.push(Event::Start(Tag::Link {
            link_type: link.link_type,
            dest_url: link.destination.into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        out.push(Event::Text(text[link.range.clone()].to_string().into()));
        out.push(Event::End(TagEnd::Link));
        last = link.range.end;
    }
    if last < text.len() {
        out.push(Event::Text(text[last..].to_string().into()));
    }
}

fn autolink_target(text: &str, link: &Link<'_>) -> Option<Autolink> {
    match link.kind() {
        LinkKind::Url => url_target(text, link.start(), link.as_str()),
        LinkKind::Email => email_target(link.start(), link.as_str()),
        _ => None,
    }
}

/// `http://` and `https://` links anywhere, `www.` links only at the start
/// of a word. The domain needs at least one period.
fn url_target(text: &str, start: usize, url: &str) -> Option<Autolink> {
    let url = url.trim_end_matches(['*', '_', '~']);
    let lower = url.to_ascii_lowercase();

    let (host, destination) = if let Some(rest) = lower
        .strip_prefix("http://")
        .or_else(|| lower.strip_prefix("https://"))
    {
        (rest, url.to_string())
    } else if lower.starts_with("www.") && starts_word(text, start) {
        (lower.as_str(), format!("http://{url}"))
    } else {
        return None;
    };

    let domain = host.split(['/', '?', '#']).next().unwrap_or_default();
    if domain.split('.').filter(|label| !label.is_empty()).count() < 2 {
        return None;
    }

    Some(Autolink {
        range: start..start + url.len(),
        link_type: LinkType::Autolink,
        destination,
    })
}

fn starts_word(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_none_or(|c| c.is_whitespace() || matches!(c, '*' | '_' | '~' | '('))
}

/// Email addresses keep only `.`, `-`, `_` and `+` besides alphanumerics in
/// the local part, and can't end in `-` or `_`.
fn email_target(start: usize, email: &str) -> Option<Autolink> {
    let at = email.find('@')?;
    let local_start = email[..at]
        .char_indices()
        .rev()
        .find(|&(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | '+')))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let email = &email[local_start..];
    if email.starts_with('@') || email.ends_with(['-', '_']) {
        return None;
    }

    let start = start + local_start;
    Some(Autolink {
        range: start..start + email.len(),
        link_type: LinkType::Email,
        destination: email.to_string(),
    })
}

fn filter_tags(raw: CowStr<'_>) -> CowStr<'_> {
    let filtered = match FILTERED_TAG.replace_all(&raw, "&lt;${1}${2}") {
        Cow::Borrowed(_) => None,
        Cow::Owned(filtered) => Some(filtered),
    };
    filtered.map_or(raw, CowStr::from)
}
