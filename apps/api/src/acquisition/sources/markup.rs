//! Listing-page parsing shared by the HTML adapters.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::acquisition::sources::{SourceError, DEFAULT_JOB_TYPE, DEFAULT_POSTED_DATE};
use crate::models::posting::{Posting, FIELD_MISSING, URL_UNAVAILABLE};

/// CSS selectors locating one board's listing blocks and their fields.
/// Field selectors are evaluated inside each block.
#[derive(Debug, Clone, Copy)]
pub struct ListingMarkup {
    pub card: &'static str,
    pub title: &'static str,
    /// Element whose `href` links to the listing.
    pub link: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub description: Option<&'static str>,
}

struct CompiledMarkup {
    card: Selector,
    title: Selector,
    link: Selector,
    company: Selector,
    location: Selector,
    description: Option<Selector>,
}

impl ListingMarkup {
    fn compile(&self) -> Result<CompiledMarkup, SourceError> {
        Ok(CompiledMarkup {
            card: selector(self.card)?,
            title: selector(self.title)?,
            link: selector(self.link)?,
            company: selector(self.company)?,
            location: selector(self.location)?,
            description: self.description.map(selector).transpose()?,
        })
    }
}

/// Context stamped onto every posting parsed from one response.
#[derive(Debug, Clone, Copy)]
pub struct ListingContext<'a> {
    pub source: &'a str,
    pub base_url: &'a Url,
    /// Used when a block has no location of its own.
    pub requested_location: &'a str,
}

/// Reads up to `limit` listing blocks in document order.
///
/// The limit counts blocks, so an unreadable block still uses up a slot.
pub fn parse_listings(
    html: &str,
    markup: &ListingMarkup,
    context: ListingContext<'_>,
    limit: usize,
) -> Result<Vec<Posting>, SourceError> {
    let compiled = markup.compile()?;
    let document = Html::parse_document(html);

    let postings = document
        .select(&compiled.card)
        .take(limit)
        .enumerate()
        .filter_map(|(index, card)| {
            let posting = parse_card(card, &compiled, context);
            if posting.is_none() {
                debug!("[{}] skipping unreadable listing #{index}", context.source);
            }
            posting
        })
        .collect();

    Ok(postings)
}

/// A block with neither a title nor a company is not a listing.
fn parse_card(
    card: ElementRef<'_>,
    markup: &CompiledMarkup,
    context: ListingContext<'_>,
) -> Option<Posting> {
    let title = text_of(card, &markup.title);
    let company = text_of(card, &markup.company);
    if title.is_none() && company.is_none() {
        return None;
    }

    let href = card
        .select(&markup.link)
        .next()
        .and_then(|link| link.value().attr("href"));

    Some(Posting {
        title: title.unwrap_or_else(|| FIELD_MISSING.to_string()),
        company: company.unwrap_or_else(|| FIELD_MISSING.to_string()),
        location: text_of(card, &markup.location)
            .unwrap_or_else(|| context.requested_location.to_string()),
        job_type: DEFAULT_JOB_TYPE.to_string(),
        url: resolve_link(context.base_url, href),
        description: markup
            .description
            .as_ref()
            .and_then(|sel| text_of(card, sel))
            .unwrap_or_default(),
        source: context.source.to_string(),
        posted_date: DEFAULT_POSTED_DATE.to_string(),
    })
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Markup(format!("bad selector '{css}': {e:?}")))
}

/// Whitespace-collapsed text of the first match, if it has any.
fn text_of(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let element = card.select(selector).next()?;
    let text = element.text().flat_map(str::split_whitespace).collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}

/// Absolute http(s) link for `href`, or the unavailable sentinel.
pub fn resolve_link(base: &Url, href: Option<&str>) -> String {
    href.map(str::trim)
        .filter(|h| !h.is_empty() && *h != "#")
        .and_then(|h| base.join(h).ok())
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .map(|u| u.to_string())
        .unwrap_or_else(|| URL_UNAVAILABLE.to_string())
}
