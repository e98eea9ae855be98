use std::sync::LazyLock;

use peak_core::{CandidateItem, ExtractionRules};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::text::{collapse_whitespace, element_text};

static ELEVATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\d{1,4})\s*m\b").expect("elevation pattern"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage {
    pub group: String,
    pub items: Vec<CandidateItem>,
}

/// Every table row with a detail link becomes one candidate.
pub fn parse_listing(html: &str, listing_url: &Url, rules: &ExtractionRules) -> ListingPage {
    let document = Html::parse_document(html);
    let group = heading_text(&document).unwrap_or_else(|| group_from_url(listing_url));

    let Some(row_sel) = Selector::parse("tr").ok() else {
        return ListingPage {
            group,
            items: Vec::new(),
        };
    };
    let Some(link_sel) = Selector::parse("a[href]").ok() else {
        return ListingPage {
            group,
            items: Vec::new(),
        };
    };

    let items = document
        .select(&row_sel)
        .filter_map(|row| parse_row(row, &link_sel, listing_url, rules, &group))
        .collect();

    ListingPage { group, items }
}

fn parse_row(
    row: ElementRef,
    link_sel: &Selector,
    listing_url: &Url,
    rules: &ExtractionRules,
    group: &str,
) -> Option<CandidateItem> {
    let (link, address) = row.select(link_sel).find_map(|link| {
        let href = link.value().attr("href")?;
        let address = item_address(href, listing_url, &rules.item_path_prefix)?;
        Some((link, address))
    })?;

    let name = collapse_whitespace(&link.text().collect::<String>());
    let elevation_raw = parse_elevation(&element_text(row));

    Some(CandidateItem {
        name,
        elevation_raw,
        address: address.into(),
        group: group.to_string(),
    })
}

pub fn parse_elevation(row_text: &str) -> Option<u32> {
    ELEVATION_RE
        .captures(row_text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn item_address(href: &str, listing_url: &Url, item_path_prefix: &str) -> Option<Url> {
    let trimmed = href.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let resolved = listing_url.join(trimmed).ok()?;
    if resolved.host_str() != listing_url.host_str() {
        return None;
    }
    resolved
        .path()
        .starts_with(item_path_prefix)
        .then_some(resolved)
}

fn heading_text(document: &Html) -> Option<String> {
    let sel = Selector::parse("h1").ok()?;
    let heading = document.select(&sel).next()?;
    Some(element_text(heading)).filter(|text| !text.is_empty())
}

/// Range name for pages without a heading: `slug/id` when the path ends in a
/// numeric id, else the last segment.
pub fn group_from_url(listing_url: &Url) -> String {
    let segments: Vec<&str> = listing_url
        .path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    match segments.as_slice() {
        [] => listing_url.host_str().unwrap_or_default().to_string(),
        [.., slug, id] if id.chars().all(|c| c.is_ascii_digit()) => format!("{slug}/{id}"),
        [.., last] => (*last).to_string(),
    }
}
