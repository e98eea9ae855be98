use peak_core::ExtractionRules;
use ego_tree::NodeRef;
use regex::{Regex, RegexBuilder};
use scraper::node::Node;
use scraper::Html;

use crate::text::flatten_node;

#[derive(Debug, Clone)]
pub struct ClassificationMatcher {
    marker: Regex,
    stop: Option<Regex>,
    token: Regex,
    marker_lower: String,
}

impl ClassificationMatcher {
    pub fn new(rules: &ExtractionRules) -> Result<Self, regex::Error> {
        let marker = case_insensitive(&format!(
            r"{}\s*[:\u{{A0}}]?\s*",
            regex::escape(&rules.classification_marker)
        ))?;
        let stop = if rules.classification_stop_labels.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = rules
                .classification_stop_labels
                .iter()
                .map(|label| regex::escape(label))
                .collect();
            Some(case_insensitive(&alternatives.join("|"))?)
        };
        let token = case_insensitive(&format!(r"\b{}\b", regex::escape(&rules.accept_token)))?;

        Ok(Self {
            marker,
            stop,
            token,
            marker_lower: rules.classification_marker.to_lowercase(),
        })
    }

    /// Label text after the marker, up to the next stop label.
    pub fn primary(&self, page_text: &str) -> Option<String> {
        self.marker.find_iter(page_text).find_map(|marker| {
            let rest = &page_text[marker.end()..];
            let first = rest.chars().next()?;
            let end = self
                .stop
                .as_ref()
                .and_then(|stop| stop.find_at(rest, first.len_utf8()))
                .map_or(rest.len(), |m| m.start());
            let label = rest[..end].trim();
            (!label.is_empty()).then(|| label.to_string())
        })
    }

    /// First non-empty remainder after the marker in the block around a
    /// text node that mentions it.
    pub fn fallback(&self, document: &Html) -> Option<String> {
        document.tree.root().descendants().find_map(|node| {
            let Node::Text(text) = node.value() else {
                return None;
            };
            if !text.to_lowercase().contains(&self.marker_lower) {
                return None;
            }
            let parent_text = flatten_node(containing_block(node)?);
            let marker = self.marker.find(&parent_text)?;
            let label = parent_text[marker.end()..].trim();
            (!label.is_empty()).then(|| label.to_string())
        })
    }

    pub fn extract(&self, page_text: &str, document: &Html) -> Option<String> {
        self.primary(page_text).or_else(|| self.fallback(document))
    }

    pub fn is_accepted(&self, label: &str) -> bool {
        self.token.is_match(label)
    }
}

/// Nearest ancestor that is not an inline element, so that `<b>Vrsta:</b> vrh`
/// is read as one unit.
fn containing_block(node: NodeRef<'_, Node>) -> Option<NodeRef<'_, Node>> {
    node.ancestors()
        .find(|ancestor| match ancestor.value() {
            Node::Element(element) => !matches!(
                element.name(),
                "a" | "abbr" | "b" | "em" | "font" | "i" | "label" | "small" | "span" | "strong"
                    | "u"
            ),
            _ => false,
        })
        .or_else(|| node.parent())
}

fn case_insensitive(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

pub fn extract_classification(
    page_text: &str,
    document: &Html,
    rules: &ExtractionRules,
) -> Result<Option<String>, regex::Error> {
    Ok(ClassificationMatcher::new(rules)?.extract(page_text, document))
}
