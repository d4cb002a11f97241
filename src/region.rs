use std::fmt;

use serde::{Deserialize, Serialize};

const REMOTE_KEYWORD: &str = "remote";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "West Coast")]
    WestCoast,
    #[serde(rename = "East Coast")]
    EastCoast,
    #[serde(rename = "Central")]
    Central,
    #[serde(rename = "Remote/Unspecified")]
    RemoteUnspecified,
    #[serde(rename = "Other/Unspecified")]
    OtherUnspecified,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::WestCoast,
        Region::EastCoast,
        Region::Central,
        Region::RemoteUnspecified,
        Region::OtherUnspecified,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Region::WestCoast => "West Coast",
            Region::EastCoast => "East Coast",
            Region::Central => "Central",
            Region::RemoteUnspecified => "Remote/Unspecified",
            Region::OtherUnspecified => "Other/Unspecified",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State abbreviations and names per region, checked in order. Matching is
/// plain substring, so two-letter codes also hit inside longer words.
pub const DEFAULT_REGION_RULES: &[(Region, &[&str])] = &[
    (
        Region::WestCoast,
        &["ca", "california", "wa", "washington", "or", "oregon"],
    ),
    (
        Region::EastCoast,
        &[
            "ny",
            "new york",
            "nj",
            "new jersey",
            "ma",
            "massachusetts",
            "dc",
            "virginia",
            "md",
            "maryland",
            "pa",
            "pennsylvania",
        ],
    ),
    (
        Region::Central,
        &["tx", "texas", "il", "illinois", "co", "colorado", "ga", "georgia"],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRule {
    pub label: Region,
    pub keywords: Vec<String>,
}

pub fn default_rules() -> Vec<RegionRule> {
    DEFAULT_REGION_RULES
        .iter()
        .map(|(label, keywords)| RegionRule {
            label: *label,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct RegionClassifier {
    rules: Vec<RegionRule>,
}

impl RegionClassifier {
    pub fn new(rules: &[RegionRule]) -> Self {
        let rules = rules
            .iter()
            .map(|r| RegionRule {
                label: r.label,
                keywords: r.keywords.iter().map(|k| k.to_lowercase()).collect(),
            })
            .collect();
        RegionClassifier { rules }
    }

    pub fn classify(&self, location: &str) -> Region {
        let lower = location.to_lowercase();
        if let Some(rule) = self
            .rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| lower.contains(k.as_str())))
        {
            return rule.label;
        }
        if lower.contains(REMOTE_KEYWORD) {
            Region::RemoteUnspecified
        } else {
            Region::OtherUnspecified
        }
    }
}

impl Default for RegionClassifier {
    fn default() -> Self {
        RegionClassifier::new(&default_rules())
    }
}

// ── Tests ──
