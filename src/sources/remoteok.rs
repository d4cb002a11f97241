use serde_json::Value;
use tracing::{debug, warn};

use super::{field, now_utc, JobSource, Listing};
use crate::error::{PipelineError, Result};
use crate::fetch::Fetcher;
use crate::html::TextExtractor;
use crate::pipeline::RawPosting;

pub const API_URL: &str = "https://remoteok.com/api";
const SITE_ROOT: &str = "https://remoteok.com";
const SOURCE_NAME: &str = "RemoteOK";

pub struct RemoteOk {
    limit: usize,
}

impl RemoteOk {
    pub fn new(limit: usize) -> Self {
        RemoteOk { limit }
    }
}

impl JobSource for RemoteOk {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    fn collect(
        &self,
        fetcher: &dyn Fetcher,
        extractor: &dyn TextExtractor,
    ) -> Result<Vec<RawPosting>> {
        let body = fetcher.get(API_URL, &[])?;
        parse_payload(&body, self.limit, extractor, &now_utc())
    }
}

/// The API answers with a JSON array whose first element is a legal notice.
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
    let Some(items) = payload.as_array() else {
        warn!("RemoteOK payload is not an array");
        return Ok(Vec::new());
    };

    let mut posts = Vec::new();
    for item in items.iter().skip(1) {
        if posts.len() >= limit {
            break;
        }
        let Some(obj) = item.as_object() else {
            continue;
        };

        let mut url = field(obj, &["url"]);
        if url.starts_with('/') {
            url = format!("{}{}", SITE_ROOT, url);
        }
        let listing = Listing {
            title: field(obj, &["position", "title"]),
            company: field(obj, &["company"]),
            location: field(obj, &["location"]),
            date_posted_raw: field(obj, &["date", "epoch"]),
            salary_raw: field(obj, &["salary"]),
            url,
            description_html: obj
                .get("description")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        };

        match listing.into_posting(SOURCE_NAME, extractor, scraped_at) {
            Some(p) => posts.push(p),
            None => debug!("Skipping RemoteOK item without title, company or url"),
        }
    }
    Ok(posts)
}

// ── Tests ──
