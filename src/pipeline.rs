//! Raw postings in, deduplicated and enriched postings out.

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::region::{Region, RegionClassifier};
use crate::role::{RoleCategory, RoleClassifier};
use crate::salary::{self, SalaryUnit};
use crate::skills::SkillMatcher;
use crate::text::{normalize, value_text};
use crate::vocab::Vocabulary;

/// One posting as received from a source. Every key is required when read
/// from a file; wrongly typed values are coerced to text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPosting {
    #[serde(deserialize_with = "lenient_text")]
    pub source: String,
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub company: String,
    #[serde(deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(deserialize_with = "lenient_text")]
    pub date_posted_raw: String,
    #[serde(deserialize_with = "lenient_text")]
    pub salary_raw: String,
    #[serde(deserialize_with = "lenient_text")]
    pub url: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub scraped_at_utc: String,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(&value))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPosting {
    #[serde(flatten)]
    pub posting: RawPosting,
    pub role_category: RoleCategory,
    pub region: Region,
    pub skills: Vec<String>,
    pub num_skills: usize,
    pub salary_min_usd_year: Option<f64>,
    pub salary_max_usd_year: Option<f64>,
    pub salary_unit_guess: SalaryUnit,
    pub salary_mid_usd_year: Option<f64>,
}

/// Whitespace cleanup of the free-text identity fields.
pub fn normalize_posting(mut p: RawPosting) -> RawPosting {
    p.title = normalize(&p.title);
    p.company = normalize(&p.company);
    p.location = normalize(&p.location);
    p.description = normalize(&p.description);
    p.source = normalize(&p.source);
    p.url = normalize(&p.url);
    p
}

/// Keep the first posting per URL, preserving input order.
pub fn dedup_by_url(postings: Vec<RawPosting>) -> Vec<RawPosting> {
    postings.into_iter().unique_by(|p| p.url.clone()).collect()
}

/// Holds the compiled classifiers; build once per vocabulary.
#[derive(Debug, Clone)]
pub struct Enricher {
    skills: SkillMatcher,
    roles: RoleClassifier,
    regions: RegionClassifier,
}

impl Enricher {
    pub fn new(vocab: &Vocabulary) -> Self {
        Enricher {
            skills: SkillMatcher::new(&vocab.skills),
            roles: RoleClassifier::new(&vocab.roles),
            regions: RegionClassifier::new(&vocab.regions),
        }
    }

    /// Normalize, dedup by URL, then derive features for each survivor.
    pub fn process(&self, raw: Vec<RawPosting>) -> Vec<EnrichedPosting> {
        let received = raw.len();
        let normalized: Vec<RawPosting> = raw.into_iter().map(normalize_posting).collect();
        let unique = dedup_by_url(normalized);
        let dropped = received - unique.len();
        if dropped > 0 {
            debug!(dropped, "Dropped postings with duplicate URLs");
        }

        let enriched = self.enrich_all(unique);
        let with_salary = enriched
            .iter()
            .filter(|p| p.salary_mid_usd_year.is_some())
            .count();
        info!(
            received,
            kept = enriched.len(),
            duplicates = dropped,
            with_salary,
            "Enriched postings"
        );
        enriched
    }

    #[cfg(feature = "rayon")]
    fn enrich_all(&self, postings: Vec<RawPosting>) -> Vec<EnrichedPosting> {
        postings.into_par_iter().map(|p| self.enrich(p)).collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn enrich_all(&self, postings: Vec<RawPosting>) -> Vec<EnrichedPosting> {
        postings.into_iter().map(|p| self.enrich(p)).collect()
    }

    /// Derive features for a single, already normalized posting.
    pub fn enrich(&self, posting: RawPosting) -> EnrichedPosting {
        let role_category = self.roles.classify(&posting.title);
        let region = self.regions.classify(&posting.location);
        let skills = self
            .skills
            .extract(&format!("{} {}", posting.title, posting.description));
        let salary = salary::parse(&posting.salary_raw);

        EnrichedPosting {
            role_category,
            region,
            num_skills: skills.len(),
            skills,
            salary_min_usd_year: salary.min,
            salary_max_usd_year: salary.max,
            salary_unit_guess: salary.unit,
            salary_mid_usd_year: salary.mid(),
            posting,
        }
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Enricher::new(&Vocabulary::default())
    }
}

// ── Tests ──
