use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

pub fn document_text(document: &Html) -> String {
    flatten_node(*document.root_element())
}

pub fn element_text(element: ElementRef) -> String {
    flatten_node(*element)
}

/// Non-empty text nodes below `node`, whitespace-collapsed and joined with
/// single spaces. Script and style content is skipped.
pub fn flatten_node(node: NodeRef<'_, Node>) -> String {
    let mut out = String::new();
    visit(node, &mut out);
    out
}

fn visit(node: NodeRef<'_, Node>, out: &mut String) {
    match node.value() {
        Node::Text(text) => push_collapsed(out, text),
        Node::Element(element) => {
            if matches!(
                element.name(),
                "script" | "style" | "noscript" | "template"
            ) {
                return;
            }
            for child in node.children() {
                visit(child, out);
            }
        }
        _ => {
            for child in node.children() {
                visit(child, out);
            }
        }
    }
}

fn push_collapsed(out: &mut String, text: &str) {
    let mut words = text.split_whitespace().peekable();
    if words.peek().is_none() {
        return;
    }
    if !out.is_empty() {
        out.push(' ');
    }
    let mut first = true;
    for word in words {
        if !first {
            out.push(' ');
        }
        out.push_str(word);
        first = false;
    }
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
