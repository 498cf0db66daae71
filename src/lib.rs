mod block;
mod build;
mod config;
mod error;
mod html;
mod inline;
mod markdown;
mod node;
mod parser;

pub use block::{Block, ListItem, TaskListItem};
pub use build::Builder;
pub use config::{Config, HtmlConfig, LimitsConfig, MarkdownConfig};
pub use error::Error;
pub use html::HtmlDocument;
pub use inline::{Image, Inline, InlineSliceExt};
pub use markdown::markdown_to_html;
pub use node::{Node, NodeKind, TagInfo, lookup_tag};

/// Parse markdown text into a vector of blocks using the default config.
///
/// A document that can't be built at all comes back empty; use
/// [`parse_with_config`] to see the error instead.
pub fn parse(markdown: &str) -> Vec<Block> {
    parser::or_empty(|| parse_with_config(markdown, &Config::compiled_default()))
}

/// Parse markdown text into a vector of blocks with custom config.
pub fn parse_with_config(markdown: &str, config: &Config) -> Result<Vec<Block>, Error> {
    parser::parse(markdown, config)
}

/// Build blocks from already-rendered HTML using the default config.
pub fn parse_html(html: &str) -> Vec<Block> {
    parser::or_empty(|| parse_html_with_config(html, &Config::compiled_default()))
}

/// Build blocks from already-rendered HTML with custom config.
pub fn parse_html_with_config(html: &str, config: &Config) -> Result<Vec<Block>, Error> {
    parser::parse_html(html, config)
}

/// Parse markdown text into a flat run of inlines using the default config.
///
/// This skips the HTML round trip: raw inline HTML is kept as
/// [`Inline::Html`] and block structure is dropped.
pub fn parse_inlines(markdown: &str) -> Vec<Inline> {
    parse_inlines_with_config(markdown, &Config::compiled_default())
}

/// Parse markdown text into a flat run of inlines with custom config.
pub fn parse_inlines_with_config(markdown: &str, config: &Config) -> Vec<Inline> {
    parser::parse_inlines(markdown, config)
}
