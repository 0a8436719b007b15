//! Rule-based enrichment of decoded provider records.
//!
//! Every derivation is a pure function of the record and the static rule
//! tables: case-insensitive substring matching throughout, first-match-wins
//! for the ordered rules (tier, org type, pitch chain). Enrichment is
//! computed once per record and never recomputed.

pub mod rules;

use serde::Serialize;

use crate::pipeline::decode::Record;
use rules::RuleSet;

/// Activities-per-year threshold for the high-volume segment and Tier 1.
pub const HIGH_VOLUME_THRESHOLD: u32 = 100;
/// Activities-per-year threshold for Tier 2.
const TIER2_ACTIVITY_THRESHOLD: u32 = 20;
/// Activities-per-year threshold for the strongest volume pitch phrase.
const PITCH_HIGH_ACTIVITY_THRESHOLD: u32 = 500;

const ACCME_ACCREDITED: &str = "ACCME Accredited";
const COMMENDATION_MARKER: &str = "Commendation";

/// Attributes derived from a [`Record`] by the classification engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrichment {
    /// Priority tier, 1 = highest.
    pub tier: u8,
    pub spanish: bool,
    pub high_vol: bool,
    pub commendation: bool,
    /// Matched specialty category labels, in rule declaration order.
    pub mh_categories: Vec<String>,
    pub org_type: String,
    pub global_footprint: bool,
    /// Semicolon-joined outreach suggestions; empty when nothing qualifies.
    pub pitch_angle: String,
}

impl Enrichment {
    pub fn mh_relevance(&self) -> bool {
        !self.mh_categories.is_empty()
    }

    /// Display text for the specialty column: matched labels joined.
    pub fn specialty_category(&self) -> String {
        self.mh_categories.join(", ")
    }
}

/// A record together with its derived attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecord {
    pub record: Record,
    pub enrichment: Enrichment,
}

/// The classification engine. Holds a reference to the read-only rule
/// tables; stateless otherwise.
pub struct Classifier<'a> {
    rules: &'a RuleSet,
}

impl<'a> Classifier<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        Self { rules }
    }

    /// Derive all enrichment attributes for a record.
    pub fn enrich(&self, record: Record) -> EnrichedRecord {
        let spanish = self.is_spanish_market(&record);
        let high_vol = record.activities >= HIGH_VOLUME_THRESHOLD;
        let commendation = record.accreditation_status.contains(COMMENDATION_MARKER);
        let mh_categories = self.specialty_categories(&record);
        let org_type = self.org_type(&record);
        let global_footprint = self.global_footprint(&record);
        let tier = self.tier(&record);
        let pitch_angle = self.pitch_angle(
            &record,
            &mh_categories,
            spanish,
            global_footprint,
            commendation,
        );

        EnrichedRecord {
            record,
            enrichment: Enrichment {
                tier,
                spanish,
                high_vol,
                commendation,
                mh_categories,
                org_type,
                global_footprint,
                pitch_angle,
            },
        }
    }

    /// Priority tier, evaluated top-down; the first matching rule wins.
    fn tier(&self, record: &Record) -> u8 {
        if record.activities >= HIGH_VOLUME_THRESHOLD
            || record.accreditation_status.contains(COMMENDATION_MARKER)
            || record.state == self.rules.territory_code
            || self.city_in_spanish_set(record)
        {
            return 1;
        }

        let name_lower = record.provider_name.to_lowercase();
        if record.activities >= TIER2_ACTIVITY_THRESHOLD
            || record.accreditation_type == ACCME_ACCREDITED
            || self
                .rules
                .tier2_name_keywords
                .iter()
                .any(|kw| name_lower.contains(kw))
        {
            return 2;
        }

        3
    }

    fn city_in_spanish_set(&self, record: &Record) -> bool {
        let city_lower = record.city.to_lowercase();
        self.rules.spanish_cities.contains(&city_lower.as_str())
    }

    fn is_spanish_market(&self, record: &Record) -> bool {
        record.state == self.rules.territory_code || self.city_in_spanish_set(record)
    }

    /// All matching specialty categories, scanned against the provider name
    /// and accredited-by text. Declaration order is preserved.
    fn specialty_categories(&self, record: &Record) -> Vec<String> {
        let haystack =
            format!("{} {}", record.provider_name, record.accredited_by).to_lowercase();
        self.rules
            .categories
            .iter()
            .filter(|cat| cat.keywords.iter().any(|kw| haystack.contains(kw)))
            .map(|cat| cat.label.to_string())
            .collect()
    }

    /// Single organization-type label; first ordered rule with a name hit
    /// wins, defaulting when none matches.
    fn org_type(&self, record: &Record) -> String {
        let name_lower = record.provider_name.to_lowercase();
        self.rules
            .org_types
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| name_lower.contains(kw)))
            .map(|rule| rule.label.to_string())
            .unwrap_or_else(|| self.rules.org_type_default.to_string())
    }

    fn global_footprint(&self, record: &Record) -> bool {
        let foreign = !record.country.is_empty()
            && !self
                .rules
                .domestic_countries
                .iter()
                .any(|c| c.eq_ignore_ascii_case(&record.country));
        if foreign {
            return true;
        }
        let name_lower = record.provider_name.to_lowercase();
        self.rules
            .global_keywords
            .iter()
            .any(|kw| name_lower.contains(kw))
    }

    /// Build the semicolon-joined outreach pitch.
    ///
    /// At most one specialty phrase (priority chain, first match wins), then
    /// the Spanish and global phrases independently, then a volume phrase
    /// only when no specialty matched, and finally the commendation phrase
    /// only as a last resort when the list is still empty.
    fn pitch_angle(
        &self,
        record: &Record,
        categories: &[String],
        spanish: bool,
        global_footprint: bool,
        commendation: bool,
    ) -> String {
        let mut phrases: Vec<String> = Vec::new();

        let specialty_phrase = self
            .rules
            .pitch_priority
            .iter()
            .find(|label| categories.iter().any(|c| c == *label))
            .and_then(|label| self.rules.category(label))
            .map(|cat| cat.pitch.to_string())
            .or_else(|| {
                // None of the priority-chain categories matched; fall back to
                // the first remaining matched category in declaration order.
                categories
                    .first()
                    .map(|label| format!("{} specialty content collaboration", label))
            });

        let has_specialty = specialty_phrase.is_some();
        if let Some(phrase) = specialty_phrase {
            phrases.push(phrase);
        }
        if spanish {
            phrases.push(self.rules.pitch_spanish.to_string());
        }
        if global_footprint {
            phrases.push(self.rules.pitch_global.to_string());
        }
        if !has_specialty {
            if record.activities >= PITCH_HIGH_ACTIVITY_THRESHOLD {
                phrases.push(self.rules.pitch_high_activity.to_string());
            } else if record.activities >= HIGH_VOLUME_THRESHOLD {
                phrases.push(self.rules.pitch_scalable_volume.to_string());
            }
        }
        if phrases.is_empty() && commendation {
            phrases.push(self.rules.pitch_commendation.to_string());
        }

        phrases.join("; ")
    }
}
