use crate::catalog::SubjectRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    Matematikk,
    Realfag,
    Sprak,
    Samfunn,
    Annet,
}

/// Named classification table. Which one applies depends on the school profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleSet {
    /// Source category first, then code prefix.
    Standard,
    /// Code prefix only, coarser buckets.
    CodePrefix,
}

pub struct RuleTable {
    pub category_rules: &'static [(&'static str, FilterCategory)],
    pub prefix_rules: &'static [(&'static str, FilterCategory)],
    pub buckets: &'static [FilterCategory],
    pub keys: fn(FilterCategory) -> &'static str,
}

static STANDARD: RuleTable = RuleTable {
    category_rules: &[
        ("matematikk", FilterCategory::Matematikk),
        ("naturfag", FilterCategory::Realfag),
        ("teknologi", FilterCategory::Realfag),
        ("språk", FilterCategory::Sprak),
        ("samfunnsfag", FilterCategory::Samfunn),
        ("økonomi", FilterCategory::Samfunn),
        ("bedriftsledelse", FilterCategory::Samfunn),
    ],
    prefix_rules: &[
        ("MAT", FilterCategory::Matematikk),
        ("REA", FilterCategory::Realfag),
        ("INF", FilterCategory::Realfag),
        ("SPR", FilterCategory::Sprak),
        ("ENG", FilterCategory::Sprak),
        ("FSP", FilterCategory::Sprak),
        ("SAM", FilterCategory::Samfunn),
        ("SAK", FilterCategory::Samfunn),
        ("HIS", FilterCategory::Samfunn),
        ("GEO", FilterCategory::Samfunn),
        ("PSY", FilterCategory::Samfunn),
        ("SOS", FilterCategory::Samfunn),
        ("REL", FilterCategory::Samfunn),
        ("MAR", FilterCategory::Samfunn),
        ("ENT", FilterCategory::Samfunn),
        ("MED", FilterCategory::Samfunn),
        ("KOM", FilterCategory::Samfunn),
        ("LED", FilterCategory::Samfunn),
    ],
    buckets: &[
        FilterCategory::Matematikk,
        FilterCategory::Realfag,
        FilterCategory::Sprak,
        FilterCategory::Samfunn,
        FilterCategory::Annet,
    ],
    keys: standard_key,
};

static CODE_PREFIX: RuleTable = RuleTable {
    category_rules: &[],
    prefix_rules: &[
        ("MAT", FilterCategory::Realfag),
        ("REA", FilterCategory::Realfag),
        ("INF", FilterCategory::Realfag),
        ("SPR", FilterCategory::Sprak),
        ("ENG", FilterCategory::Sprak),
        ("FSP", FilterCategory::Sprak),
        ("SAM", FilterCategory::Samfunn),
        ("SAK", FilterCategory::Samfunn),
        ("HIS", FilterCategory::Samfunn),
        ("GEO", FilterCategory::Samfunn),
        ("PSY", FilterCategory::Samfunn),
        ("SOS", FilterCategory::Samfunn),
        ("REL", FilterCategory::Samfunn),
        ("MAR", FilterCategory::Samfunn),
        ("ENT", FilterCategory::Samfunn),
        ("MED", FilterCategory::Samfunn),
        ("KOM", FilterCategory::Samfunn),
        ("LED", FilterCategory::Samfunn),
    ],
    buckets: &[
        FilterCategory::Realfag,
        FilterCategory::Sprak,
        FilterCategory::Samfunn,
        FilterCategory::Annet,
    ],
    keys: code_prefix_key,
};

fn standard_key(category: FilterCategory) -> &'static str {
    match category {
        FilterCategory::Matematikk => "matematikk",
        FilterCategory::Realfag => "realfag",
        FilterCategory::Sprak => "språk",
        FilterCategory::Samfunn => "samfunn",
        FilterCategory::Annet => "annet",
    }
}

fn code_prefix_key(category: FilterCategory) -> &'static str {
    match category {
        // not produced by this table, kept total
        FilterCategory::Matematikk => "realfag",
        FilterCategory::Realfag => "realfag",
        FilterCategory::Sprak => "spraak",
        FilterCategory::Samfunn => "samfunnsfag",
        FilterCategory::Annet => "annet",
    }
}

impl RuleSet {
    pub fn table(self) -> &'static RuleTable {
        match self {
            RuleSet::Standard => &STANDARD,
            RuleSet::CodePrefix => &CODE_PREFIX,
        }
    }

    /// Rule set used by a school profile when settings don't override it.
    pub fn for_school(school: &str) -> Self {
        match school {
            "metis-vgs" => RuleSet::CodePrefix,
            _ => RuleSet::Standard,
        }
    }

    pub fn key(self, category: FilterCategory) -> &'static str {
        (self.table().keys)(category)
    }

    /// Filter buckets in display order.
    pub fn buckets(self) -> &'static [FilterCategory] {
        self.table().buckets
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Some(RuleSet::Standard),
            "code-prefix" | "code_prefix" | "prefix" => Some(RuleSet::CodePrefix),
            _ => None,
        }
    }
}

/// Map a subject to exactly one filter bucket. Never fails: unmatched input is `Annet`.
pub fn classify(record: &SubjectRecord, rules: RuleSet) -> FilterCategory {
    let table = rules.table();

    if let Some(category) = record.category.as_deref() {
        if let Some((_, bucket)) = table.category_rules.iter().find(|(c, _)| *c == category) {
            return *bucket;
        }
    }

    let Some(code) = record.subject_code.as_deref() else {
        return FilterCategory::Annet;
    };
    let prefix: String = code.chars().take(3).collect::<String>().to_uppercase();

    table
        .prefix_rules
        .iter()
        .find(|(p, _)| *p == prefix)
        .map_or(FilterCategory::Annet, |(_, bucket)| *bucket)
}

/// Human-readable label for a filter key or a raw source category.
pub fn category_label(key: &str) -> String {
    let label = match key {
        "matematikk" => "Matematikk",
        "naturfag" => "Naturfag",
        "realfag" => "Realfag",
        "spraak" | "språk" => "Språk",
        "samfunn" => "Samfunn",
        "samfunnsfag" => "Samfunnsfag",
        "økonomi" => "Økonomi",
        "bedriftsledelse" => "Bedriftsledelse",
        "teknologi" => "Teknologi",
        "kunst" => "Kunst",
        "musikk" => "Musikk",
        "annet" => "Annet",
        other => return other.to_string(),
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(category: Option<&str>, code: Option<&str>) -> SubjectRecord {
        SubjectRecord {
            id: "x".into(),
            title: "X".into(),
            category: category.map(String::from),
            subject_code: code.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn nothing_set_is_annet() {
        assert_eq!(classify(&rec(None, None), RuleSet::Standard), FilterCategory::Annet);
        assert_eq!(classify(&rec(None, None), RuleSet::CodePrefix), FilterCategory::Annet);
    }

    #[test]
    fn mat_prefix_any_case() {
        for code in ["MAT1", "mat9", "Mat-X"] {
            assert_eq!(
                classify(&rec(None, Some(code)), RuleSet::Standard),
                FilterCategory::Matematikk,
                "code {code}"
            );
        }
    }

    #[test]
    fn category_field_rules() {
        assert_eq!(classify(&rec(Some("økonomi"), None), RuleSet::Standard), FilterCategory::Samfunn);
        assert_eq!(classify(&rec(Some("bedriftsledelse"), None), RuleSet::Standard), FilterCategory::Samfunn);
        assert_eq!(classify(&rec(Some("naturfag"), None), RuleSet::Standard), FilterCategory::Realfag);
        assert_eq!(classify(&rec(Some("teknologi"), None), RuleSet::Standard), FilterCategory::Realfag);
        assert_eq!(classify(&rec(Some("språk"), None), RuleSet::Standard), FilterCategory::Sprak);
    }

    #[test]
    fn category_beats_code() {
        let r = rec(Some("matematikk"), Some("REA3"));
        assert_eq!(classify(&r, RuleSet::Standard), FilterCategory::Matematikk);
    }

    #[test]
    fn unknown_category_falls_back_to_code() {
        assert_eq!(classify(&rec(Some("musikk"), Some("HIS1")), RuleSet::Standard), FilterCategory::Samfunn);
        assert_eq!(classify(&rec(Some("musikk"), Some("MUS1")), RuleSet::Standard), FilterCategory::Annet);
    }

    #[test]
    fn prefix_table() {
        let cases = [
            ("REA3001", FilterCategory::Realfag),
            ("inf1", FilterCategory::Realfag),
            ("SPR3", FilterCategory::Sprak),
            ("eng", FilterCategory::Sprak),
            ("FSP6", FilterCategory::Sprak),
            ("LED1", FilterCategory::Samfunn),
            ("psy2", FilterCategory::Samfunn),
            ("XYZ9", FilterCategory::Annet),
        ];
        for (code, expected) in cases {
            assert_eq!(classify(&rec(None, Some(code)), RuleSet::Standard), expected, "code {code}");
        }
    }

    #[test]
    fn short_and_empty_codes() {
        assert_eq!(classify(&rec(None, Some("")), RuleSet::Standard), FilterCategory::Annet);
        assert_eq!(classify(&rec(None, Some("MA")), RuleSet::Standard), FilterCategory::Annet);
    }

    #[test]
    fn multibyte_code_does_not_panic() {
        assert_eq!(classify(&rec(None, Some("ØKO1")), RuleSet::Standard), FilterCategory::Annet);
    }

    #[test]
    fn code_prefix_ignores_category() {
        let r = rec(Some("matematikk"), Some("ENG1"));
        assert_eq!(classify(&r, RuleSet::CodePrefix), FilterCategory::Sprak);
        assert_eq!(RuleSet::CodePrefix.key(FilterCategory::Sprak), "spraak");
    }

    #[test]
    fn code_prefix_buckets() {
        let math = classify(&rec(None, Some("MAT1")), RuleSet::CodePrefix);
        assert_eq!(RuleSet::CodePrefix.key(math), "realfag");
        let social = classify(&rec(Some("økonomi"), Some("SAM3")), RuleSet::CodePrefix);
        assert_eq!(RuleSet::CodePrefix.key(social), "samfunnsfag");
        for bucket in RuleSet::CodePrefix.buckets() {
            assert_ne!(*bucket, FilterCategory::Matematikk);
        }
    }

    #[test]
    fn every_prefix_rule_lives_in_its_table() {
        for rules in [RuleSet::Standard, RuleSet::CodePrefix] {
            let table = rules.table();
            for (prefix, bucket) in table.prefix_rules {
                assert_eq!(classify(&rec(None, Some(*prefix)), rules), *bucket, "{rules:?} {prefix}");
            }
            assert!(table.prefix_rules.iter().any(|(p, b)| *p == "HIS" && *b == FilterCategory::Samfunn));
        }
        let social = classify(&rec(None, Some("kom2")), RuleSet::CodePrefix);
        assert_eq!(RuleSet::CodePrefix.key(social), "samfunnsfag");
    }

    #[test]
    fn standard_keys() {
        assert_eq!(RuleSet::Standard.key(FilterCategory::Sprak), "språk");
        assert_eq!(RuleSet::Standard.key(FilterCategory::Samfunn), "samfunn");
    }

    #[test]
    fn school_profiles() {
        assert_eq!(RuleSet::for_school("bergen-private-gymnas"), RuleSet::Standard);
        assert_eq!(RuleSet::for_school("metis-vgs"), RuleSet::CodePrefix);
        assert_eq!(RuleSet::for_school("ukjent-skole"), RuleSet::Standard);
        assert_eq!(RuleSet::parse("Code-Prefix"), Some(RuleSet::CodePrefix));
        assert_eq!(RuleSet::parse("nope"), None);
    }

    #[test]
    fn labels() {
        assert_eq!(category_label("spraak"), "Språk");
        assert_eq!(category_label("språk"), "Språk");
        assert_eq!(category_label("samfunnsfag"), "Samfunnsfag");
        assert_eq!(category_label("samfunn"), "Samfunn");
        assert_eq!(category_label("drama"), "drama");
    }

    #[test]
    fn fixture_classification() {
        let json = std::fs::read_to_string("tests/fixtures/tilbud.json").unwrap();
        let resp: crate::catalog::OfferingResponse = serde_json::from_str(&json).unwrap();
        let key_of = |id: &str| {
            let r = resp.subjects.iter().find(|s| s.id == id).unwrap();
            RuleSet::Standard.key(classify(r, RuleSet::Standard))
        };
        assert_eq!(key_of("okonomistyring"), "samfunn");
        assert_eq!(key_of("matematikk-r1"), "matematikk");
        assert_eq!(key_of("entreprenorskap"), "samfunn");
        assert_eq!(key_of("informasjonsteknologi"), "realfag");
        assert_eq!(key_of("musikk-fordypning"), "annet");
        assert_eq!(key_of("uten-kode"), "annet");
    }
}
