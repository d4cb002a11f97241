use std::collections::HashMap;
use std::fmt;

use itertools::Itertools;

use crate::pipeline::EnrichedPosting;
use crate::region::Region;
use crate::role::RoleCategory;

/// Aggregate view of an enriched dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total: usize,
    pub by_role: Vec<(RoleCategory, usize)>,
    pub by_region: Vec<(Region, usize)>,
    pub with_salary: usize,
    pub median_mid_salary: Option<f64>,
    pub top_skills: Vec<(String, usize)>,
}

impl DatasetSummary {
    pub fn from_records(records: &[EnrichedPosting], top_n: usize) -> Self {
        let role_counts = records.iter().counts_by(|r| r.role_category);
        let region_counts = records.iter().counts_by(|r| r.region);

        let mids: Vec<f64> = records
            .iter()
            .filter_map(|r| r.salary_mid_usd_year)
            .sorted_by(|a, b| a.total_cmp(b))
            .collect();

        // Ties keep the order in which skills first appear in the dataset.
        let mut first_seen: HashMap<&str, usize> = HashMap::new();
        let mut skill_counts: HashMap<&str, usize> = HashMap::new();
        for skill in records.iter().flat_map(|r| r.skills.iter()) {
            let next = first_seen.len();
            first_seen.entry(skill.as_str()).or_insert(next);
            *skill_counts.entry(skill.as_str()).or_default() += 1;
        }
        let top_skills = skill_counts
            .into_iter()
            .sorted_by_key(|(skill, count)| (std::cmp::Reverse(*count), first_seen[skill]))
            .take(top_n)
            .map(|(skill, count)| (skill.to_string(), count))
            .collect();

        DatasetSummary {
            total: records.len(),
            by_role: RoleCategory::ALL
                .iter()
                .map(|r| (*r, role_counts.get(r).copied().unwrap_or(0)))
                .collect(),
            by_region: Region::ALL
                .iter()
                .map(|r| (*r, region_counts.get(r).copied().unwrap_or(0)))
                .collect(),
            with_salary: mids.len(),
            median_mid_salary: median(&mids),
            top_skills,
        }
    }
}

fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        None
    } else if n % 2 == 1 {
        Some(sorted[n / 2])
    } else {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    }
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Postings:     {}", self.total)?;
        writeln!(f, "With salary:  {}", self.with_salary)?;
        match self.median_mid_salary {
            Some(m) => writeln!(f, "Median (mid): ${:.0}/year", m)?,
            None => writeln!(f, "Median (mid): -")?,
        }

        writeln!(f, "\n{:<20} | {:>5}", "Role", "Count")?;
        writeln!(f, "{}", "-".repeat(28))?;
        for (role, n) in &self.by_role {
            writeln!(f, "{:<20} | {:>5}", role.label(), n)?;
        }

        writeln!(f, "\n{:<20} | {:>5}", "Region", "Count")?;
        writeln!(f, "{}", "-".repeat(28))?;
        for (region, n) in &self.by_region {
            writeln!(f, "{:<20} | {:>5}", region.label(), n)?;
        }

        if !self.top_skills.is_empty() {
            writeln!(f, "\n--- Top skills ---")?;
            for (skill, n) in &self.top_skills {
                writeln!(f, "  {:<18} {}", skill, n)?;
            }
        }
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_raw;
    use crate::pipeline::Enricher;
    use std::path::Path;

    fn fixture_summary(top_n: usize) -> DatasetSummary {
        let raw = read_raw(Path::new("tests/fixtures/raw_postings.json")).unwrap();
        DatasetSummary::from_records(&Enricher::default().process(raw), top_n)
    }

    #[test]
    fn counts_follow_enumeration_order() {
        let s = fixture_summary(5);
        assert_eq!(s.total, 4);
        assert_eq!(s.by_role.len(), RoleCategory::ALL.len());
        assert_eq!(s.by_role[0], (RoleCategory::DataScientist, 1));
        assert_eq!(s.by_region[3], (Region::RemoteUnspecified, 1));
        assert_eq!(s.by_region.iter().map(|(_, n)| n).sum::<usize>(), 4);
    }

    #[test]
    fn salary_coverage_and_median() {
        let s = fixture_summary(5);
        // 170000 (range mid), 83200 ($40/hr), 95000 (bare number); $500/hr is gated out.
        assert_eq!(s.with_salary, 3);
        assert_eq!(s.median_mid_salary, Some(95_000.0));
    }

    #[test]
    fn top_skills_ranked_by_count_then_first_seen() {
        let s = fixture_summary(3);
        assert_eq!(
            s.top_skills,
            vec![
                ("aws".to_string(), 2),
                ("kubernetes".to_string(), 2),
                ("python".to_string(), 1)
            ]
        );
    }

    #[test]
    fn empty_dataset() {
        let s = DatasetSummary::from_records(&[], 5);
        assert_eq!(s.total, 0);
        assert_eq!(s.median_mid_salary, None);
        assert!(s.top_skills.is_empty());
        assert!(s.to_string().contains("Median (mid): -"));
    }
}
