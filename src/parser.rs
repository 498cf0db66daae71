use crate::block::Block;
use crate::build::Builder;
use crate::config::Config;
use crate::error::Error;
use crate::html::HtmlDocument;
use crate::inline::Inline;
use crate::markdown::{markdown_events, markdown_to_html};

/// Parse markdown text into a list of blocks
pub fn parse(markdown: &str, config: &Config) -> Result<Vec<Block>, Error> {
    let html = markdown_to_html(markdown, &config.markdown);
    log::debug!(
        "Compiled {} bytes of markdown to {} bytes of HTML",
        markdown.len(),
        html.len()
    );
    parse_html(&html, config)
}

/// Parse an HTML document into a list of blocks
pub fn parse_html(html: &str, config: &Config) -> Result<Vec<Block>, Error> {
    let document = HtmlDocument::parse(html, &config.html)?;
    let body = document.body().ok_or(Error::MissingBody)?;

    let blocks = Builder::new(&config.limits).blocks(&body.children());
    log::debug!("Built {} top-level blocks", blocks.len());

    Ok(blocks)
}

/// Parse markdown text into inlines straight from its events
pub fn parse_inlines(markdown: &str, config: &Config) -> Vec<Inline> {
    let events = markdown_events(markdown, &config.markdown);
    Builder::new(&config.limits).inlines_from_events(events)
}

/// Runs `convert`, turning a boundary failure into an empty document.
pub fn or_empty(convert: impl FnOnce() -> Result<Vec<Block>, Error>) -> Vec<Block> {
    convert().unwrap_or_else(|e| {
        log::warn!("Producing an empty document: {e}");
        Vec::new()
    })
}
