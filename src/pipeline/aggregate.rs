//! Sorting, subset partitioning, and summary statistics over the enriched
//! record set. This layer only reads; records are never mutated here.

use std::cmp::Reverse;
use std::collections::HashMap;

use crate::pipeline::classify::EnrichedRecord;

/// Number of state buckets reported in the summary histogram.
const TOP_STATES: usize = 10;

/// Sort records for reporting: tier ascending, activities descending.
/// Stable, so equal keys keep their input order.
pub fn sort_for_report(records: &mut [EnrichedRecord]) {
    records.sort_by_key(|r| (r.enrichment.tier, Reverse(r.record.activities)));
}

/// Named subsets of an already-sorted record set, borrowed in sheet order.
#[derive(Debug)]
pub struct Partitions<'a> {
    pub tier1: Vec<&'a EnrichedRecord>,
    pub tier2: Vec<&'a EnrichedRecord>,
    pub tier3: Vec<&'a EnrichedRecord>,
    /// Spanish-market records, preserving the report sort order.
    pub spanish: Vec<&'a EnrichedRecord>,
    /// High-volume records, re-sorted by activities descending only.
    pub high_volume: Vec<&'a EnrichedRecord>,
    /// Records with a non-empty specialty category set, in report order.
    pub mh_relevant: Vec<&'a EnrichedRecord>,
}

/// Partition a sorted record set into the named report subsets.
pub fn partition(records: &[EnrichedRecord]) -> Partitions<'_> {
    let by_tier = |tier: u8| -> Vec<&EnrichedRecord> {
        records.iter().filter(|r| r.enrichment.tier == tier).collect()
    };

    let mut high_volume: Vec<&EnrichedRecord> =
        records.iter().filter(|r| r.enrichment.high_vol).collect();
    high_volume.sort_by_key(|r| Reverse(r.record.activities));

    Partitions {
        tier1: by_tier(1),
        tier2: by_tier(2),
        tier3: by_tier(3),
        spanish: records.iter().filter(|r| r.enrichment.spanish).collect(),
        high_volume,
        mh_relevant: records
            .iter()
            .filter(|r| r.enrichment.mh_relevance())
            .collect(),
    }
}

/// Summary counts derived from the full record set, feeding the diagnostic
/// printout only.
#[derive(Debug, Clone)]
pub struct SummaryStats {
    pub total: usize,
    /// Counts for tiers 1 through 3.
    pub tier_counts: [usize; 3],
    pub spanish: usize,
    pub high_volume: usize,
    pub commendation: usize,
    pub mh_relevant: usize,
    /// Top 10 states by record count, descending. Empty states bucket under
    /// "Unknown".
    pub top_states: Vec<(String, usize)>,
    /// All accreditation-type display texts by record count, descending.
    pub by_accreditation_type: Vec<(String, usize)>,
    /// Whole-percentage completeness, truncating division.
    pub contact_pct: usize,
    pub website_pct: usize,
}

pub fn summarize(records: &[EnrichedRecord]) -> SummaryStats {
    let total = records.len();

    let mut tier_counts = [0usize; 3];
    for r in records {
        let tier = r.enrichment.tier as usize;
        if (1..=3).contains(&tier) {
            tier_counts[tier - 1] += 1;
        }
    }

    let mut states: HashMap<String, usize> = HashMap::new();
    let mut acc_types: HashMap<String, usize> = HashMap::new();
    for r in records {
        let state = if r.record.state.is_empty() {
            "Unknown".to_string()
        } else {
            r.record.state.clone()
        };
        *states.entry(state).or_default() += 1;

        let acc_type = if r.record.accreditation_type.is_empty() {
            "Unknown".to_string()
        } else {
            r.record.accreditation_type.clone()
        };
        *acc_types.entry(acc_type).or_default() += 1;
    }

    let mut top_states = ranked(states);
    top_states.truncate(TOP_STATES);
    let by_accreditation_type = ranked(acc_types);

    let with_contact = records
        .iter()
        .filter(|r| !r.record.contact_name.is_empty())
        .count();
    let with_website = records
        .iter()
        .filter(|r| !r.record.website.is_empty())
        .count();

    SummaryStats {
        total,
        tier_counts,
        spanish: records.iter().filter(|r| r.enrichment.spanish).count(),
        high_volume: records.iter().filter(|r| r.enrichment.high_vol).count(),
        commendation: records.iter().filter(|r| r.enrichment.commendation).count(),
        mh_relevant: records
            .iter()
            .filter(|r| r.enrichment.mh_relevance())
            .count(),
        top_states,
        by_accreditation_type,
        contact_pct: percentage(with_contact, total),
        website_pct: percentage(with_website, total),
    }
}

/// Whole-percentage with truncating division; 0 for an empty set.
fn percentage(part: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        part * 100 / total
    }
}

/// Histogram entries ranked by count descending, name ascending on ties so
/// the output is deterministic.
fn ranked(counts: HashMap<String, usize>) -> Vec<(String, usize)> {
    let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::classify::{rules::RULES, Classifier};
    use crate::pipeline::decode::decode_record;

    fn records(lines: &[&str]) -> Vec<EnrichedRecord> {
        let classifier = Classifier::new(&RULES);
        lines
            .iter()
            .map(|l| classifier.enrich(decode_record(l)))
            .collect()
    }

    fn line(name: &str, state: &str, activities: u32, contact: &str, website: &str) -> String {
        format!(
            "{name}~City~{state}~USA~{website}~S~A~N~{activities}~{contact}~~~~~~ID"
        )
    }

    #[test]
    fn test_sort_tier_then_activities_desc() {
        let l1 = line("A", "OH", 150, "", ""); // tier 1
        let l2 = line("B", "OH", 30, "", ""); // tier 2
        let l3 = line("C", "OH", 120, "", ""); // tier 1
        let mut recs = records(&[&l1, &l2, &l3]);
        sort_for_report(&mut recs);

        let names: Vec<&str> = recs.iter().map(|r| r.record.provider_name.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "B"]);
    }

    #[test]
    fn test_high_volume_subset_stable_by_activities() {
        let lines: Vec<String> = [50u32, 500, 100, 100]
            .iter()
            .enumerate()
            .map(|(i, a)| line(&format!("P{}", i), "OH", *a, "", ""))
            .collect();
        let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        let mut recs = records(&refs);
        sort_for_report(&mut recs);

        let parts = partition(&recs);
        let activities: Vec<u32> = parts
            .high_volume
            .iter()
            .map(|r| r.record.activities)
            .collect();
        assert_eq!(activities, vec![500, 100, 100]);
        // Equal activities keep their relative order.
        assert_eq!(parts.high_volume[1].record.provider_name, "P2");
        assert_eq!(parts.high_volume[2].record.provider_name, "P3");
    }

    #[test]
    fn test_completeness_truncates() {
        let l1 = line("A", "OH", 5, "Jane Doe", "");
        let l2 = line("B", "OH", 5, "", "");
        let l3 = line("C", "OH", 5, "", "");
        let recs = records(&[&l1, &l2, &l3]);

        let stats = summarize(&recs);
        assert_eq!(stats.contact_pct, 33);
        assert_eq!(stats.website_pct, 0);
    }

    #[test]
    fn test_empty_set_stats() {
        let stats = summarize(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.contact_pct, 0);
        assert!(stats.top_states.is_empty());
    }

    #[test]
    fn test_state_histogram_tops_out_at_ten() {
        let lines: Vec<String> = (0..12)
            .map(|i| line(&format!("P{}", i), &format!("S{:02}", i), 5, "", ""))
            .collect();
        let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
        let recs = records(&refs);

        let stats = summarize(&recs);
        assert_eq!(stats.top_states.len(), 10);
    }

    #[test]
    fn test_empty_state_buckets_as_unknown() {
        let l = "P~City~~USA~~S~A~N~5~~~~~~~ID";
        let recs = records(&[l]);
        let stats = summarize(&recs);
        assert_eq!(stats.top_states[0].0, "Unknown");
    }
}
