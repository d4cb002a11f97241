use serde_json::Value;
use tracing::{debug, warn};

use super::{field, now_utc, JobSource, Listing};
use crate::error::{PipelineError, Result};
use crate::fetch::Fetcher;
use crate::html::TextExtractor;
use crate::pipeline::RawPosting;

pub const API_URL: &str = "https://remotive.com/api/remote-jobs";
const SOURCE_NAME: &str = "Remotive";
const DEFAULT_LOCATION: &str = "Remote";

pub struct Remotive {
    limit: usize,
    category: Option<String>,
    search: Option<String>,
}

impl Remotive {
    pub fn new(limit: usize, category: Option<String>, search: Option<String>) -> Self {
        Remotive {
            limit,
            category,
            search,
        }
    }

    fn query(&self) -> Vec<(&str, &str)> {
        let mut params = Vec::new();
        if let Some(c) = self.category.as_deref().filter(|c| !c.is_empty()) {
            params.push(("category", c));
        }
        if let Some(s) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", s));
        }
        params
    }
}

impl JobSource for Remotive {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn collect(
        &self,
        fetcher: &dyn Fetcher,
        extractor: &dyn TextExtractor,
    ) -> Result<Vec<RawPosting>> {
        let body = fetcher.get(API_URL, &self.query())?;
        parse_payload(&body, self.limit, extractor, &now_utc())
    }
}

/// Expects `{"jobs": [...]}`; any other shape yields no postings.
pub fn parse_payload(
    body: &str,
    limit: usize,
    extractor: &dyn TextExtractor,
    scraped_at: &str,
) -> Result<Vec<RawPosting>> {
    let payload: Value = serde_json::from_str(body).map_err(|e| PipelineError::Payload {
        source_name: SOURCE_NAME.to_string(),
        details: e.to_string(),
    })?;
    let Some(jobs) = payload.get("jobs").and_then(Value::as_array) else {
        warn!("Remotive payload has no jobs array");
        return Ok(Vec::new());
    };

    let mut posts = Vec::new();
    for job in jobs {
        if posts.len() >= limit {
            break;
        }
        let Some(obj) = job.as_object() else {
            continue;
        };

        let mut location = field(obj, &["candidate_required_location"]);
        if location.is_empty() {
            location = DEFAULT_LOCATION.to_string();
        }
        let listing = Listing {
            title: field(obj, &["title"]),
            company: field(obj, &["company_name"]),
            location,
            date_posted_raw: field(obj, &["publication_date"]),
            salary_raw: field(obj, &["salary"]),
            url: field(obj, &["url"]),
            description_html: obj
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        };

        match listing.into_posting(SOURCE_NAME, extractor, scraped_at) {
            Some(p) => posts.push(p),
            None => debug!("Skipping Remotive job without title, company or url"),
        }
    }
    Ok(posts)
}

// ── Tests ──
