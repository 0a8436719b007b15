use anyhow::Result;

use accme_report::config::ReportConfig;
use accme_report::pipeline::aggregate::partition;
use accme_report::pipeline::Pipeline;
use accme_report::report::{build_sheets, xlsx, ReportLayout};

/// Three clean records, then the blob form a scrape produces by collapsing
/// the newlines between them to spaces.
const RECORDS: [&str; 3] = [
    "Acme Psych Center~Miami~FL~USA~acme.org~A~C~Y~120~Jane Doe~555-1212~1 Main St~33101~Workshop~Self~PID1",
    "Global Neurology Institute~Toronto~ON~Canada~gni.ca~J~JA~Y~640~~~~~~Joint Sponsor~PID2",
    "Quiet Provider~Nowhere~OH~USA~~S~A~N~5~~~~~~~PID3",
];

fn scraped_blob() -> String {
    RECORDS.join(" ")
}

#[test]
fn test_blob_to_workbook_end_to_end() -> Result<()> {
    let config = ReportConfig::default();
    let result = Pipeline::new(config.clone()).run_from_blob(&scraped_blob());

    assert_eq!(result.stats.total, 3);
    assert_eq!(result.stats.tier_counts, [2, 0, 1]);
    assert_eq!(result.stats.spanish, 1);
    assert_eq!(result.stats.high_volume, 2);
    assert_eq!(result.stats.mh_relevant, 2);
    // 1 of 3 contact names, truncating division
    assert_eq!(result.stats.contact_pct, 33);
    assert_eq!(result.stats.website_pct, 66);

    // Sorted by tier ascending, activities descending
    let ids: Vec<&str> = result
        .records
        .iter()
        .map(|r| r.record.provider_id.as_str())
        .collect();
    assert_eq!(ids, vec!["PID2", "PID1", "PID3"]);

    let parts = partition(&result.records);
    assert_eq!(parts.tier1.len(), 2);
    assert_eq!(parts.spanish.len(), 1);
    assert_eq!(parts.high_volume[0].record.provider_id, "PID2");

    let sheets = build_sheets(&result.records, &parts);
    let names: Vec<&str> = sheets.iter().map(|s| s.name).collect();
    assert_eq!(
        names,
        vec![
            "All Providers",
            "Tier 1 Targets",
            "Mental Health Targets",
            "Spanish Market Focus",
            "High Volume"
        ]
    );

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("providers.xlsx");
    xlsx::write_workbook(&path, &sheets, &ReportLayout::new(config.include_mh_columns))?;
    assert!(std::fs::metadata(&path)?.len() > 0);

    Ok(())
}

#[test]
fn test_reconstruction_recovers_original_records() {
    let outcome =
        accme_report::pipeline::reconstruct::split_by_field_count(&scraped_blob());
    assert_eq!(outcome.records.len(), RECORDS.len());
    for (recovered, original) in outcome.records.iter().zip(RECORDS) {
        assert_eq!(recovered, original);
    }
}

#[test]
fn test_line_and_blob_paths_agree() {
    let lines = RECORDS.join("\n");
    let from_lines = Pipeline::new(ReportConfig::default()).run_from_lines(&lines);
    let from_blob = Pipeline::new(ReportConfig::default()).run_from_blob(&scraped_blob());
    assert_eq!(from_lines.records, from_blob.records);
}
