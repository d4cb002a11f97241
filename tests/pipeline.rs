use std::path::Path;

use remote_jobs::error::Result;
use remote_jobs::fetch::Fetcher;
use remote_jobs::html::HtmlTextExtractor;
use remote_jobs::settings::SourceSettings;
use remote_jobs::sources::collect_posts;
use remote_jobs::{Enricher, Region, RoleCategory, SalaryUnit, Vocabulary};

struct FixtureFetcher;

impl Fetcher for FixtureFetcher {
    fn get(&self, url: &str, _query: &[(&str, &str)]) -> Result<String> {
        let path = if url.contains("remoteok") {
            "tests/fixtures/remoteok.json"
        } else {
            "tests/fixtures/remotive.json"
        };
        Ok(std::fs::read_to_string(path)?)
    }
}

fn collected() -> Vec<remote_jobs::RawPosting> {
    collect_posts(&SourceSettings::default(), &FixtureFetcher, &HtmlTextExtractor).unwrap()
}

#[test]
fn collect_then_enrich() {
    let raw = collected();
    // 4 RemoteOK (one duplicate URL) + 3 Remotive
    assert_eq!(raw.len(), 7);

    let out = Enricher::default().process(raw);
    assert_eq!(out.len(), 6);

    let urls: Vec<&str> = out.iter().map(|p| p.posting.url.as_str()).collect();
    let mut unique = urls.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), urls.len());

    let ds = &out[0];
    assert_eq!(ds.role_category, RoleCategory::DataScientist);
    assert_eq!(ds.region, Region::WestCoast);
    assert_eq!(ds.skills, vec!["python", "r", "aws", "docker"]);
    assert_eq!(ds.salary_mid_usd_year, Some(170_000.0));

    // first occurrence of the duplicated URL wins
    let backend = &out[1];
    assert_eq!(backend.posting.description, "Go, PostgreSQL and Kubernetes");
    assert_eq!(backend.region, Region::RemoteUnspecified);
    assert_eq!(backend.salary_min_usd_year, Some(124_800.0));
    assert_eq!(backend.salary_unit_guess, SalaryUnit::Hour);

    let ml = out
        .iter()
        .find(|p| p.posting.source == "Remotive" && p.posting.title == "Machine Learning Engineer")
        .unwrap();
    assert_eq!(ml.role_category, RoleCategory::MlEngineer);
    assert_eq!(ml.salary_min_usd_year, Some(145_600.0));
    assert_eq!(ml.salary_max_usd_year, Some(187_200.0));
    assert_eq!(ml.skills, vec!["machine learning", "pytorch", "gcp", "kubernetes"]);

    let sre = out.last().unwrap();
    assert_eq!(sre.role_category, RoleCategory::DevOps);
    assert_eq!(sre.salary_unit_guess, SalaryUnit::Unknown);
    assert_eq!(sre.salary_mid_usd_year, None);
}

#[test]
fn monthly_euro_salary_is_annualized() {
    let out = Enricher::default().process(collected());
    let de = out
        .iter()
        .find(|p| p.posting.title == "Senior Data Engineer")
        .unwrap();
    assert_eq!(de.salary_unit_guess, SalaryUnit::Month);
    assert_eq!(de.salary_mid_usd_year, Some(48_000.0));
    assert_eq!(de.region, Region::RemoteUnspecified);
}

#[test]
fn runs_are_deterministic() {
    let raw = collected();
    let e = Enricher::default();
    assert_eq!(e.process(raw.clone()), e.process(raw));
}

#[test]
fn custom_vocabulary_changes_classification() {
    let vocab = Vocabulary::from_path(Path::new("tests/fixtures/vocabulary.json")).unwrap();
    let out = Enricher::new(&vocab).process(collected());
    let de = out
        .iter()
        .find(|p| p.posting.title == "Senior Data Engineer")
        .unwrap();
    assert_eq!(de.role_category, RoleCategory::DataEngineer);
    assert_eq!(de.skills, vec!["sql"]);

    let ds = &out[0];
    // "data scientist" is no longer a rule in this vocabulary
    assert_eq!(ds.role_category, RoleCategory::Other);
    assert_eq!(ds.skills, vec!["python", "r"]);
}
