//! Record boundary reconstruction for scraped registry text.
//!
//! The scrape step reads multi-line page text and joins lines with spaces,
//! destroying the one-record-per-line structure. Records are recovered by
//! counting tilde-separated fields: each record has exactly
//! [`FIELDS_PER_RECORD`] fields, so after accumulating that many segments the
//! last segment must contain "last field of this record" + space + "first
//! field of the next record" (unless it is the true final record).

/// Fixed field count of the registry's provider schema.
pub const FIELDS_PER_RECORD: usize = 16;

/// Outcome of a reconstruction pass.
///
/// The heuristic cannot detect a mis-split caused by a trailing field that
/// legitimately contains a space, so the counts here are the caller's only
/// handle for noticing drift against an expected total.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Reconstructed records, each a tilde-joined field string.
    pub records: Vec<String>,
    /// Number of emitted records with fewer than [`FIELDS_PER_RECORD`]
    /// fields (at most the trailing partial buffer).
    pub short_records: usize,
}

/// Split a space-joined blob back into tilde-delimited records.
///
/// Never fails: a trailing partial buffer is emitted as a best-effort short
/// record rather than discarded, because silent data loss is worse than a
/// malformed tail a human can inspect.
pub fn split_by_field_count(text: &str) -> SplitOutcome {
    let mut records = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut short_records = 0;

    for part in text.split('~') {
        current.push(part.to_string());
        if current.len() == FIELDS_PER_RECORD {
            let last = current.last().map(|s| s.trim().to_string()).unwrap_or_default();
            match last.find(' ') {
                // The space marks the collapsed newline: everything before it
                // closes this record, everything after seeds the next one.
                Some(idx) if idx > 0 => {
                    let next_seed = last[idx + 1..].to_string();
                    *current.last_mut().unwrap() = last[..idx].to_string();
                    records.push(current.join("~"));
                    current = vec![next_seed];
                }
                // No space: this is the true final field of the stream's
                // last record (or a field the heuristic cannot split).
                _ => {
                    *current.last_mut().unwrap() = last;
                    records.push(current.join("~"));
                    current = Vec::new();
                }
            }
        }
    }

    if !current.is_empty() {
        short_records += 1;
        records.push(current.join("~"));
    }

    SplitOutcome {
        records,
        short_records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_record(name: &str, id: &str) -> String {
        // 16 fields: name, 14 middles, id
        let mut fields = vec![name.to_string()];
        for i in 0..14 {
            fields.push(format!("f{}", i));
        }
        fields.push(id.to_string());
        fields.join("~")
    }

    #[test]
    fn test_recovers_space_joined_records() {
        let a = clean_record("Provider A", "PID1");
        let b = clean_record("Provider B", "PID2");
        let c = clean_record("Provider C", "PID3");
        let blob = format!("{} {} {}", a, b, c);

        let outcome = split_by_field_count(&blob);
        assert_eq!(outcome.records, vec![a, b, c]);
        assert_eq!(outcome.short_records, 0);
    }

    #[test]
    fn test_single_record_without_trailing_content() {
        let a = clean_record("Solo Provider", "PID9");
        let outcome = split_by_field_count(&a);
        assert_eq!(outcome.records, vec![a]);
        assert_eq!(outcome.short_records, 0);
    }

    #[test]
    fn test_partial_tail_is_emitted_not_dropped() {
        let a = clean_record("Provider A", "PID1");
        let blob = format!("{} Trailing~Fragment", a);

        let outcome = split_by_field_count(&blob);
        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.records[0], a);
        assert_eq!(outcome.records[1], "Trailing~Fragment");
        assert_eq!(outcome.short_records, 1);
    }

    #[test]
    fn test_no_segment_lost_or_duplicated() {
        let records: Vec<String> = (0..5)
            .map(|i| clean_record(&format!("P{}", i), &format!("ID{}", i)))
            .collect();
        let blob = records.join(" ");

        let outcome = split_by_field_count(&blob);
        let total_fields: usize = outcome
            .records
            .iter()
            .map(|r| r.split('~').count())
            .sum();
        assert_eq!(total_fields, 5 * FIELDS_PER_RECORD);
    }
}
