use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoleCategory {
    #[serde(rename = "Data Scientist")]
    DataScientist,
    #[serde(rename = "ML Engineer")]
    MlEngineer,
    #[serde(rename = "Data Analyst")]
    DataAnalyst,
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
    #[serde(rename = "Data Engineer")]
    DataEngineer,
    #[serde(rename = "DevOps")]
    DevOps,
    #[serde(rename = "Other")]
    Other,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 7] = [
        RoleCategory::DataScientist,
        RoleCategory::MlEngineer,
        RoleCategory::DataAnalyst,
        RoleCategory::SoftwareEngineer,
        RoleCategory::DataEngineer,
        RoleCategory::DevOps,
        RoleCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoleCategory::DataScientist => "Data Scientist",
            RoleCategory::MlEngineer => "ML Engineer",
            RoleCategory::DataAnalyst => "Data Analyst",
            RoleCategory::SoftwareEngineer => "Software Engineer",
            RoleCategory::DataEngineer => "Data Engineer",
            RoleCategory::DevOps => "DevOps",
            RoleCategory::Other => "Other",
        }
    }
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Built-in rule table. Order matters: the first bucket with a hit wins.
pub const DEFAULT_ROLE_RULES: &[(RoleCategory, &[&str])] = &[
    (RoleCategory::DataScientist, &["data scientist", "data science"]),
    (
        RoleCategory::MlEngineer,
        &["machine learning engineer", "ml engineer", "applied scientist"],
    ),
    (RoleCategory::DataAnalyst, &["data analyst", "analytics"]),
    (
        RoleCategory::SoftwareEngineer,
        &[
            "software engineer",
            "backend engineer",
            "frontend engineer",
            "full stack",
            "full-stack",
        ],
    ),
    (RoleCategory::DataEngineer, &["data engineer", "analytics engineer"]),
    (
        RoleCategory::DevOps,
        &["devops", "site reliability", "sre", "platform engineer"],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleRule {
    pub label: RoleCategory,
    pub keywords: Vec<String>,
}

pub fn default_rules() -> Vec<RoleRule> {
    DEFAULT_ROLE_RULES
        .iter()
        .map(|(label, keywords)| RoleRule {
            label: *label,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

/// First-match-wins keyword classifier over job titles.
#[derive(Debug, Clone)]
pub struct RoleClassifier {
    rules: Vec<RoleRule>,
}

impl RoleClassifier {
    pub fn new(rules: &[RoleRule]) -> Self {
        let rules = rules
            .iter()
            .map(|r| RoleRule {
                label: r.label,
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        RoleClassifier { rules }
    }

    pub fn classify(&self, title: &str) -> RoleCategory {
        let lower = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|rule| rule.label)
            .unwrap_or(RoleCategory::Other)
    }
}

impl Default for RoleClassifier {
    fn default() -> Self {
        RoleClassifier::new(&default_rules())
    }
}

// ── Tests ──
