//! Static rule tables for the classification engine.
//!
//! The tables are declarative data rather than conditional chains so each
//! rule can be inspected and tested on its own. They are constructed once
//! and handed to the [`Classifier`](super::Classifier) by reference; nothing
//! mutates them after startup.

use once_cell::sync::Lazy;

/// A specialty category: matched when any keyword is a substring of the
/// lower-cased provider name + accredited-by text.
#[derive(Debug)]
pub struct CategoryRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
    /// Outreach phrase emitted when this category wins the pitch chain.
    pub pitch: &'static str,
}

/// An organization-type rule: first rule with a substring hit on the
/// lower-cased name wins. Order matters.
#[derive(Debug)]
pub struct OrgTypeRule {
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

#[derive(Debug)]
pub struct RuleSet {
    /// Territory code treated as Spanish-market regardless of city.
    pub territory_code: &'static str,
    /// Lower-cased cities with significant Spanish-language markets.
    pub spanish_cities: &'static [&'static str],
    /// Lower-cased name keywords that qualify a provider for Tier 2.
    pub tier2_name_keywords: &'static [&'static str],
    /// Specialty categories in declaration order; a record may match many.
    pub categories: &'static [CategoryRule],
    /// Category labels in pitch priority order (first match supplies the
    /// single specialty phrase).
    pub pitch_priority: &'static [&'static str],
    /// Ordered organization-type rules; single label, first match wins.
    pub org_types: &'static [OrgTypeRule],
    pub org_type_default: &'static str,
    /// Country codes not considered a global footprint.
    pub domestic_countries: &'static [&'static str],
    /// Lower-cased name keywords implying international reach.
    pub global_keywords: &'static [&'static str],
    pub pitch_spanish: &'static str,
    pub pitch_global: &'static str,
    pub pitch_high_activity: &'static str,
    pub pitch_scalable_volume: &'static str,
    pub pitch_commendation: &'static str,
}

impl RuleSet {
    pub fn category(&self, label: &str) -> Option<&CategoryRule> {
        self.categories.iter().find(|c| c.label == label)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            territory_code: "PR",
            spanish_cities: &[
                "miami",
                "san antonio",
                "los angeles",
                "phoenix",
                "el paso",
                "tucson",
                "albuquerque",
            ],
            tier2_name_keywords: &[
                "medical society",
                "medical association",
                "academy",
                "college",
            ],
            categories: &[
                CategoryRule {
                    label: "Psychiatry",
                    keywords: &["psych", "mental health", "behavioral health"],
                    pitch: "Psychiatric/MH CME content development",
                },
                CategoryRule {
                    label: "Neurology",
                    keywords: &["neurolog", "neuroscien", "brain"],
                    pitch: "Neurology/brain-health CME programming",
                },
                CategoryRule {
                    label: "Substance Use",
                    keywords: &["addict", "substance", "recovery", "opioid"],
                    pitch: "Substance-use disorder education partnership",
                },
                CategoryRule {
                    label: "Child/Adolescent",
                    keywords: &["child", "adolescent", "pediatric", "youth"],
                    pitch: "Child & adolescent behavioral health content",
                },
                CategoryRule {
                    label: "Dementia/Cognitive",
                    keywords: &["dementia", "alzheimer", "cognitive", "geriatr"],
                    pitch: "Dementia and cognitive-care curriculum",
                },
                CategoryRule {
                    label: "Trauma/Crisis",
                    keywords: &["trauma", "crisis", "suicid", "ptsd"],
                    pitch: "Trauma-informed care and crisis response training",
                },
                CategoryRule {
                    label: "Neurodiversity",
                    keywords: &["autism", "adhd", "neurodiver", "developmental"],
                    pitch: "Neurodiversity-focused clinical education",
                },
            ],
            pitch_priority: &[
                "Psychiatry",
                "Neurology",
                "Substance Use",
                "Child/Adolescent",
                "Dementia/Cognitive",
                "Trauma/Crisis",
                "Neurodiversity",
            ],
            org_types: &[
                OrgTypeRule {
                    label: "Hospital/Health System",
                    keywords: &["hospital", "health system", "medical center", "clinic"],
                },
                OrgTypeRule {
                    label: "University/Academic",
                    keywords: &["university", "college", "school of medicine", "academ"],
                },
                OrgTypeRule {
                    label: "Medical Society",
                    keywords: &["society", "association", "academy of"],
                },
                OrgTypeRule {
                    label: "Government",
                    keywords: &["department of", "state of", "county", "federal", "veterans"],
                },
                OrgTypeRule {
                    label: "Education Company",
                    keywords: &["education", "institute", "cme", "training"],
                },
            ],
            org_type_default: "Other",
            domestic_countries: &["USA", "US", "United States"],
            global_keywords: &["international", "global", "worldwide", "pan american"],
            pitch_spanish: "Spanish-language adaptation",
            pitch_global: "International/global distribution",
            pitch_high_activity: "High-volume activity pipeline",
            pitch_scalable_volume: "Scalable activity volume",
            pitch_commendation: "Commendation-level quality partnership",
        }
    }
}

/// The process-wide rule tables, built once at first use.
pub static RULES: Lazy<RuleSet> = Lazy::new(RuleSet::default);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_priority_labels_exist() {
        for label in RULES.pitch_priority {
            assert!(RULES.category(label).is_some(), "no category for {}", label);
        }
    }

    #[test]
    fn test_keywords_are_lower_cased() {
        for cat in RULES.categories {
            for kw in cat.keywords {
                assert_eq!(*kw, kw.to_lowercase());
            }
        }
        for rule in RULES.org_types {
            for kw in rule.keywords {
                assert_eq!(*kw, kw.to_lowercase());
            }
        }
    }
}
