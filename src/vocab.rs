//! Swappable keyword data behind the skill, role and region classifiers.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{PipelineError, Result};
use crate::region::{self, RegionRule};
use crate::role::{self, RoleRule};

pub const DEFAULT_SKILLS: &[&str] = &[
    "python",
    "sql",
    "java",
    "javascript",
    "typescript",
    "c++",
    "r",
    "machine learning",
    "deep learning",
    "nlp",
    "computer vision",
    "pytorch",
    "tensorflow",
    "keras",
    "scikit-learn",
    "pandas",
    "numpy",
    "aws",
    "gcp",
    "azure",
    "docker",
    "kubernetes",
    "react",
    "node",
    "flask",
    "django",
    "fastapi",
    "postgresql",
    "mysql",
    "mongodb",
    "git",
];

/// Sections missing from a vocabulary file keep their built-in value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub skills: Vec<String>,
    pub roles: Vec<RoleRule>,
    pub regions: Vec<RegionRule>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            skills: DEFAULT_SKILLS.iter().map(|s| s.to_string()).collect(),
            roles: role::default_rules(),
            regions: region::default_rules(),
        }
    }
}

impl Vocabulary {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| PipelineError::InvalidInput(format!("vocabulary: {}", e)))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let vocab = Self::from_json(&raw)?;
        info!(
            path = %path.display(),
            skills = vocab.skills.len(),
            roles = vocab.roles.len(),
            regions = vocab.regions.len(),
            "Loaded vocabulary"
        );
        Ok(vocab)
    }

    /// Built-in vocabulary unless a file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::default()),
        }
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleCategory;

    #[test]
    fn partial_file_keeps_defaults() {
        let v = Vocabulary::from_json(r#"{ "skills": ["rust", "go"] }"#).unwrap();
        assert_eq!(v.skills, vec!["rust", "go"]);
        assert_eq!(v.roles, role::default_rules());
        assert_eq!(v.regions, region::default_rules());
    }

    #[test]
    fn role_rules_from_json() {
        let v = Vocabulary::from_json(
            r#"{ "roles": [ { "label": "DevOps", "keywords": ["infra"] } ] }"#,
        )
        .unwrap();
        assert_eq!(v.roles.len(), 1);
        assert_eq!(v.roles[0].label, RoleCategory::DevOps);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = Vocabulary::from_json(
            r#"{ "roles": [ { "label": "Astronaut", "keywords": ["space"] } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidInput(_)));
    }

    #[test]
    fn fixture_file() {
        let v = Vocabulary::from_path(Path::new("tests/fixtures/vocabulary.json")).unwrap();
        assert!(v.skills.contains(&"rust".to_string()));
        assert_eq!(v.regions, region::default_rules());
    }

    #[test]
    fn default_round_trips_through_json() {
        let json = serde_json::to_string(&Vocabulary::default()).unwrap();
        assert_eq!(Vocabulary::from_json(&json).unwrap(), Vocabulary::default());
    }
}
