//! Positional field decoding for tilde-delimited provider records.

use serde::Serialize;

use crate::pipeline::reconstruct::FIELDS_PER_RECORD;

// Short letter codes from the source registry, expanded to display labels.
// Unknown codes pass through unchanged so new registry codes render as
// their raw value instead of breaking the pipeline.
const ACC_TYPE_CODES: &[(&str, &str)] = &[
    ("A", "ACCME Accredited"),
    ("J", "Jointly Accredited"),
    ("S", "State Accredited"),
];

const ACC_STATUS_CODES: &[(&str, &str)] = &[
    ("C", "Accreditation with Commendation"),
    ("A", "Accredited"),
    ("P", "Provisional"),
    ("X", "Probation"),
    ("JA", "Joint Accreditation"),
    ("JC", "Joint with Commendation"),
    ("O", "Other"),
];

const JOINT_PROVIDERSHIP_CODES: &[(&str, &str)] = &[("Y", "Yes"), ("N", "No")];

/// A decoded provider record. Immutable after construction; enrichment is
/// layered on separately and never mutates these fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub provider_name: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub website: String,
    pub accreditation_type: String,
    pub accreditation_status: String,
    pub joint_providership: String,
    pub activities: u32,
    pub contact_name: String,
    pub contact_phone: String,
    pub address: String,
    pub zip: String,
    pub activity_formats: String,
    pub accredited_by: String,
    pub provider_id: String,
}

fn expand_code(table: &[(&str, &str)], code: &str) -> String {
    table
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| (*label).to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Decode one tilde-delimited line into a [`Record`].
///
/// Total and deterministic: short lines are right-padded with empty fields
/// to the full 16, extra fields beyond 16 are ignored, an unparsable
/// activities count becomes 0, and unknown enumeration codes pass through.
pub fn decode_record(line: &str) -> Record {
    let mut fields: Vec<&str> = line.split('~').collect();
    fields.resize(FIELDS_PER_RECORD, "");

    let activities = fields[8].trim().parse::<u32>().unwrap_or(0);

    Record {
        provider_name: html_escape::decode_html_entities(fields[0]).into_owned(),
        city: fields[1].to_string(),
        state: fields[2].to_string(),
        country: fields[3].to_string(),
        website: fields[4].to_string(),
        accreditation_type: expand_code(ACC_TYPE_CODES, fields[5]),
        accreditation_status: expand_code(ACC_STATUS_CODES, fields[6]),
        joint_providership: expand_code(JOINT_PROVIDERSHIP_CODES, fields[7]),
        activities,
        contact_name: fields[9].to_string(),
        contact_phone: fields[10].to_string(),
        address: fields[11].to_string(),
        zip: fields[12].to_string(),
        activity_formats: fields[13].to_string(),
        accredited_by: fields[14].to_string(),
        provider_id: fields[15].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_LINE: &str = "Acme Psych Center~Miami~FL~USA~acme.org~A~C~Y~120~Jane Doe~555-1212~1 Main St~33101~Workshop~Self~PID1";

    #[test]
    fn test_decode_clean_line() {
        let r = decode_record(CLEAN_LINE);
        assert_eq!(r.provider_name, "Acme Psych Center");
        assert_eq!(r.accreditation_type, "ACCME Accredited");
        assert_eq!(r.accreditation_status, "Accreditation with Commendation");
        assert_eq!(r.joint_providership, "Yes");
        assert_eq!(r.activities, 120);
        assert_eq!(r.provider_id, "PID1");
    }

    #[test]
    fn test_short_line_is_right_padded() {
        let r = decode_record("Lonely Provider~Boston~MA");
        assert_eq!(r.provider_name, "Lonely Provider");
        assert_eq!(r.state, "MA");
        assert_eq!(r.country, "");
        assert_eq!(r.activities, 0);
        assert_eq!(r.provider_id, "");
    }

    #[test]
    fn test_unparsable_activities_becomes_zero() {
        let r = decode_record("P~C~ST~USA~~A~A~N~n/a~~~~~~~ID");
        assert_eq!(r.activities, 0);
    }

    #[test]
    fn test_unknown_codes_pass_through() {
        let r = decode_record("P~C~ST~USA~~Z~QQ~M~5~~~~~~~ID");
        assert_eq!(r.accreditation_type, "Z");
        assert_eq!(r.accreditation_status, "QQ");
        assert_eq!(r.joint_providership, "M");
    }

    #[test]
    fn test_html_entities_decoded_in_name() {
        let r = decode_record("Smith &amp; Jones Medical Education~~~~~~~~~~~~~~~ID");
        assert_eq!(r.provider_name, "Smith & Jones Medical Education");
    }
}
