use std::sync::LazyLock;

use peak_core::{CoordinatePair, CoordinateSource, ExtractionRules, ResolvedCoordinates};
use regex::{Regex, RegexBuilder};
use scraper::node::Node;
use scraper::Html;
use scrape_logging::scrape_debug;

static DEGREE_VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]{1,3}[,.][0-9]+)°").expect("degree value pattern"));

const STRATEGIES: [CoordinateSource; 4] = [
    CoordinateSource::Strict,
    CoordinateSource::BandScan,
    CoordinateSource::FirstPair,
    CoordinateSource::UncheckedStrict,
];

#[derive(Debug, Clone)]
pub struct CoordinateResolver {
    label_lower: String,
    strict: Regex,
    rules: ExtractionRules,
}

impl CoordinateResolver {
    pub fn new(rules: &ExtractionRules) -> Result<Self, regex::Error> {
        let strict = RegexBuilder::new(&format!(
            r"{}\s*:?\s*([0-9,.]+)°\s*[NnSs]?.*?([0-9,.]+)°\s*[EeWw]?",
            regex::escape(&rules.coordinate_label)
        ))
        .build()?;
        Ok(Self {
            label_lower: rules.coordinate_label.to_lowercase(),
            strict,
            rules: rules.clone(),
        })
    }

    /// First text node mentioning the coordinate label.
    pub fn locate_line(&self, document: &Html) -> Option<String> {
        document.tree.root().descendants().find_map(|node| match node.value() {
            Node::Text(text) if text.to_lowercase().contains(&self.label_lower) => {
                Some(text.trim().replace('\u{A0}', " "))
            }
            _ => None,
        })
    }

    pub fn resolve(&self, line: Option<&str>, page_text: &str) -> Option<ResolvedCoordinates> {
        let search_text = line
            .map(str::to_string)
            .unwrap_or_else(|| page_text.replace('\u{A0}', " "));
        let strict = self.strict_match(&search_text);
        let scanned = degree_values(page_text);

        STRATEGIES.iter().find_map(|&source| {
            let pair = match source {
                CoordinateSource::Strict => {
                    strict.filter(|p| p.longitude >= self.rules.min_strict_longitude)
                }
                CoordinateSource::BandScan => scanned
                    .windows(2)
                    .find(|w| self.rules.bands.contains(w[0], w[1]))
                    .map(|w| CoordinatePair::new(w[0], w[1])),
                CoordinateSource::FirstPair => match scanned.as_slice() {
                    [lat, lon, ..] => Some(CoordinatePair::new(*lat, *lon)),
                    _ => None,
                },
                CoordinateSource::UncheckedStrict => strict,
            }?;
            scrape_debug!(
                "coordinates {:.5}, {:.5} via {:?}",
                pair.latitude,
                pair.longitude,
                source
            );
            Some(ResolvedCoordinates { pair, source })
        })
    }

    pub fn resolve_document(&self, document: &Html, page_text: &str) -> Option<ResolvedCoordinates> {
        let line = self.locate_line(document);
        self.resolve(line.as_deref(), page_text)
    }

    fn strict_match(&self, text: &str) -> Option<CoordinatePair> {
        let caps = self.strict.captures(text)?;
        let latitude = parse_decimal(caps.get(1)?.as_str())?;
        let longitude = parse_decimal(caps.get(2)?.as_str())?;
        Some(CoordinatePair::new(latitude, longitude))
    }
}

/// Every `<number>°` on the page, in order, with decimal commas accepted.
pub fn degree_values(text: &str) -> Vec<f64> {
    DEGREE_VALUE_RE
        .captures_iter(text)
        .filter_map(|caps| parse_decimal(caps.get(1)?.as_str()))
        .collect()
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse().ok()
}

/// One-shot resolution from page text alone.
pub fn resolve_coordinates(
    page_text: &str,
    rules: &ExtractionRules,
) -> Result<Option<ResolvedCoordinates>, regex::Error> {
    Ok(CoordinateResolver::new(rules)?.resolve(None, page_text))
}
