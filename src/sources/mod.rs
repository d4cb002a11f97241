//! Public job APIs that feed the pipeline.

pub mod remoteok;
pub mod remotive;

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::info;

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::html::TextExtractor;
use crate::pipeline::RawPosting;
use crate::settings::SourceSettings;
use crate::text::{normalize, value_text};

pub use remoteok::RemoteOk;
pub use remotive::Remotive;

pub trait JobSource {
    fn name(&self) -> &'static str;

    fn collect(&self, fetcher: &dyn Fetcher, extractor: &dyn TextExtractor)
        -> Result<Vec<RawPosting>>;
}

/// RemoteOK then Remotive, concatenated. Any retrieval failure aborts.
pub fn collect_posts(
    settings: &SourceSettings,
    fetcher: &dyn Fetcher,
    extractor: &dyn TextExtractor,
) -> Result<Vec<RawPosting>> {
    let sources: Vec<Box<dyn JobSource>> = vec![
        Box::new(RemoteOk::new(settings.remoteok_limit)),
        Box::new(Remotive::new(
            settings.remotive_limit,
            settings.remotive_category.clone(),
            settings.remotive_search.clone(),
        )),
    ];

    let mut posts = Vec::new();
    for source in &sources {
        let batch = source.collect(fetcher, extractor)?;
        info!(source = source.name(), count = batch.len(), "Collected postings");
        posts.extend(batch);
    }
    Ok(posts)
}

pub(crate) fn now_utc() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// First present, non-empty field among `keys`, normalized.
pub(crate) fn field(item: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| item.get(*k))
        .map(|v| normalize(&value_text(v)))
        .find(|s| !s.is_empty())
        .unwrap_or_default()
}

/// Fields shared by both APIs once the per-source names are resolved.
pub(crate) struct Listing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub date_posted_raw: String,
    pub salary_raw: String,
    pub url: String,
    pub description_html: String,
}

impl Listing {
    /// `None` when the listing lacks a title, company or URL.
    pub fn into_posting(
        self,
        source: &str,
        extractor: &dyn TextExtractor,
        scraped_at: &str,
    ) -> Option<RawPosting> {
        if self.title.is_empty() || self.company.is_empty() || self.url.is_empty() {
            return None;
        }
        Some(RawPosting {
            source: source.to_string(),
            title: self.title,
            company: self.company,
            location: self.location,
            date_posted_raw: self.date_posted_raw,
            salary_raw: self.salary_raw,
            url: self.url,
            description: extractor.extract(&self.description_html),
            scraped_at_utc: scraped_at.to_string(),
        })
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineError;
    use crate::html::HtmlTextExtractor;
    use std::cell::RefCell;

    struct FixtureFetcher {
        calls: RefCell<Vec<String>>,
    }

    impl Fetcher for FixtureFetcher {
        fn get(&self, url: &str, _query: &[(&str, &str)]) -> Result<String> {
            self.calls.borrow_mut().push(url.to_string());
            let path = if url.contains("remoteok") {
                "tests/fixtures/remoteok.json"
            } else {
                "tests/fixtures/remotive.json"
            };
            Ok(std::fs::read_to_string(path)?)
        }
    }

    struct DownFetcher;

    impl Fetcher for DownFetcher {
        fn get(&self, url: &str, _query: &[(&str, &str)]) -> Result<String> {
            Err(PipelineError::Retrieval {
                url: url.to_string(),
                attempts: 3,
                reason: "HTTP 503".into(),
            })
        }
    }

    #[test]
    fn collects_both_sources_in_order() {
        let fetcher = FixtureFetcher {
            calls: RefCell::new(Vec::new()),
        };
        let posts = collect_posts(&SourceSettings::default(), &fetcher, &HtmlTextExtractor).unwrap();
        assert_eq!(fetcher.calls.borrow().len(), 2);
        assert!(posts.first().is_some_and(|p| p.source == "RemoteOK"));
        assert!(posts.last().is_some_and(|p| p.source == "Remotive"));
    }

    #[test]
    fn retrieval_failure_is_fatal() {
        let err = collect_posts(&SourceSettings::default(), &DownFetcher, &HtmlTextExtractor)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Retrieval { .. }));
    }

    #[test]
    fn field_falls_back_in_order() {
        let item = serde_json::json!({ "position": "", "title": " Data  Engineer " });
        let map = item.as_object().unwrap();
        assert_eq!(field(map, &["position", "title"]), "Data Engineer");
        assert_eq!(field(map, &["missing"]), "");
    }
}
