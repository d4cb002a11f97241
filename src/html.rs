use itertools::Itertools;
use scraper::Html;

use crate::text::normalize;

/// Turns a posting description (usually HTML) into plain visible text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> String;
}

/// Joins every text node with a space, then collapses whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlTextExtractor;

impl TextExtractor for HtmlTextExtractor {
    fn extract(&self, raw: &str) -> String {
        if raw.trim().is_empty() {
            return String::new();
        }
        let fragment = Html::parse_fragment(raw);
        let joined = fragment.root_element().text().join(" ");
        normalize(&joined)
    }
}

// ── Tests ──
