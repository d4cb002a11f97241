//! Fixed-vocabulary skill matching over posting text.

use regex::Regex;
use tracing::warn;

/// Entries this short are matched on word boundaries so that e.g. `r`
/// does not hit inside `your`.
const WORD_MATCH_MAX_LEN: usize = 3;

#[derive(Debug, Clone)]
enum Matcher {
    Word(Regex),
    Substring,
}

#[derive(Debug, Clone)]
struct Entry {
    skill: String,
    matcher: Matcher,
}

/// Compiled form of a skill vocabulary; build once, reuse per record.
#[derive(Debug, Clone)]
pub struct SkillMatcher {
    entries: Vec<Entry>,
}

impl SkillMatcher {
    pub fn new<S: AsRef<str>>(vocabulary: &[S]) -> Self {
        let mut entries: Vec<Entry> = Vec::with_capacity(vocabulary.len());
        for raw in vocabulary {
            let skill = raw.as_ref().to_lowercase();
            if skill.is_empty() || entries.iter().any(|e| e.skill == skill) {
                continue;
            }
            let matcher = if skill.chars().count() <= WORD_MATCH_MAX_LEN || skill == "r" {
                match Regex::new(&format!(r"\b{}\b", regex::escape(&skill))) {
                    Ok(re) => Matcher::Word(re),
                    Err(e) => {
                        warn!(skill = %skill, error = %e, "skipping unmatchable skill");
                        continue;
                    }
                }
            } else {
                Matcher::Substring
            };
            entries.push(Entry { skill, matcher });
        }
        SkillMatcher { entries }
    }

    /// Skills found in `text`, in vocabulary order, each at most once.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.entries
            .iter()
            .filter(|e| match &e.matcher {
                Matcher::Word(re) => re.is_match(&lower),
                Matcher::Substring => lower.contains(e.skill.as_str()),
            })
            .map(|e| e.skill.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One-shot convenience over [`SkillMatcher`].
pub fn extract_skills<S: AsRef<str>>(text: &str, vocabulary: &[S]) -> Vec<String> {
    SkillMatcher::new(vocabulary).extract(text)
}

// ── Tests ──
