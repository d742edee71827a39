pub mod classify;
pub mod competency;
pub mod paragraphs;

use rayon::prelude::*;

use crate::catalog::{CoreElement, SubjectRecord};
use classify::{category_label, classify, RuleSet};
use competency::{extract_competency_goals, CompetencyExtract};
use paragraphs::{segment_paragraphs, ParagraphBlock, SegmentRules};

const NO_DESCRIPTION: &str = "Ingen beskrivelse tilgjengelig.";
const UNKNOWN_CODE: &str = "Ukjent";
const CURRICULUM_SEARCH: &str = "https://sokeresultat.udir.no/finn-lareplan.html";

/// Everything the renderer needs for one subject, derived fresh from the record.
#[derive(Debug, Clone)]
pub struct SubjectView {
    pub id: String,
    pub title: String,
    pub code: Option<String>,
    pub category: &'static str,
    pub category_label: String,
    pub initials: String,
    pub image_url: Option<String>,
    pub description: String,
    pub how_one_works: ParagraphBlock,
    pub relevance: ParagraphBlock,
    pub competency: CompetencyExtract,
    pub core_elements: Vec<CoreElement>,
    pub related: Vec<String>,
    pub curriculum_url: String,
}

impl SubjectView {
    pub fn code_display(&self) -> &str {
        self.code.as_deref().unwrap_or(UNKNOWN_CODE)
    }

    /// "Fordypning med: a, b", or None without related subjects.
    pub fn related_badge(&self) -> Option<String> {
        if self.related.is_empty() {
            None
        } else {
            Some(format!("Fordypning med: {}", self.related.join(", ")))
        }
    }
}

/// Inputs shared by every view derivation in one run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub rules: RuleSet,
    pub segment: SegmentRules,
    pub image_base: String,
}

impl Pipeline {
    /// record → category + paragraphs + competency goals.
    pub fn derive_view(&self, record: &SubjectRecord) -> SubjectView {
        let category = self.rules.key(classify(record, self.rules));
        let code = record.subject_code.clone().filter(|c| !c.is_empty());

        SubjectView {
            id: record.id.clone(),
            title: record.title.clone(),
            category,
            category_label: category_label(category),
            initials: initials(&record.title),
            image_url: record
                .image_file
                .as_deref()
                .filter(|f| !f.is_empty())
                .map(|f| format!("{}/{}", self.image_base.trim_end_matches('/'), f)),
            description: record
                .about_text
                .clone()
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            how_one_works: segment_paragraphs(record.how_one_works_text.as_deref(), &self.segment),
            relevance: segment_paragraphs(record.relevance_text.as_deref(), &self.segment),
            competency: extract_competency_goals(record.description_html.as_deref()),
            core_elements: record.core_elements.clone(),
            related: record.related_subjects.clone(),
            curriculum_url: curriculum_url(code.as_deref().unwrap_or_default()),
            code,
        }
    }

    /// Derive views for a whole catalog in parallel; output order matches input.
    pub fn derive_all(&self, records: &[SubjectRecord]) -> Vec<SubjectView> {
        records.par_iter().map(|r| self.derive_view(r)).collect()
    }
}

/// Two-letter placeholder shown when a subject has no image.
pub fn initials(title: &str) -> String {
    let words: Vec<&str> = title.split(' ').collect();
    if words.len() == 1 {
        return title.chars().take(2).collect::<String>().to_uppercase();
    }
    words
        .iter()
        .take(2)
        .filter_map(|w| w.chars().next())
        .collect::<String>()
        .to_uppercase()
}

fn curriculum_url(code: &str) -> String {
    format!(
        "{}?query={}&source=Laereplan&fltypefiltermulti=L%C3%A6replan&filtervalues=all",
        CURRICULUM_SEARCH, code
    )
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, OfferingResponse};

    fn pipeline(rules: RuleSet) -> Pipeline {
        Pipeline {
            rules,
            segment: SegmentRules::default(),
            image_base: "https://img.example/fag/".into(),
        }
    }

    fn fixture() -> Catalog {
        let json = std::fs::read_to_string("tests/fixtures/tilbud.json").unwrap();
        let resp: OfferingResponse = serde_json::from_str(&json).unwrap();
        Catalog::from_response("bergen-private-gymnas", resp)
    }

    #[test]
    fn initials_rules() {
        assert_eq!(initials("Biologi"), "BI");
        assert_eq!(initials("Matematikk R1"), "MR");
        assert_eq!(initials("Entreprenørskap og bedriftsutvikling 1"), "EO");
        assert_eq!(initials("Økonomi"), "ØK");
    }

    #[test]
    fn full_view_from_fixture() {
        let catalog = fixture();
        let view = pipeline(RuleSet::Standard).derive_view(catalog.find("okonomistyring").unwrap());
        assert_eq!(view.category, "samfunn");
        assert_eq!(view.category_label, "Samfunn");
        assert_eq!(view.image_url.as_deref(), Some("https://img.example/fag/okonomistyring.jpg"));
        assert_eq!(view.competency.item_count, 3);
        assert_eq!(
            view.how_one_works.paragraphs(),
            [
                "Du arbeider med budsjetter og regnskap. Du lærer å bruke regneark. Det er viktig å forstå sammenhenger.",
                "Faget bygger på praktiske case."
            ]
        );
        assert!(view.relevance.is_placeholder());
        assert!(view.related_badge().is_none());
    }

    #[test]
    fn fallbacks_for_sparse_record() {
        let catalog = fixture();
        let view = pipeline(RuleSet::Standard).derive_view(catalog.find("uten-kode").unwrap());
        assert_eq!(view.category, "annet");
        assert_eq!(view.code_display(), "Ukjent");
        assert_eq!(view.description, "Ingen beskrivelse tilgjengelig.");
        assert!(view.image_url.is_none());
        assert_eq!(view.competency, CompetencyExtract::default());
        assert!(view.core_elements.is_empty());
    }

    #[test]
    fn related_badge_and_curriculum_link() {
        let catalog = fixture();
        let view = pipeline(RuleSet::Standard).derive_view(catalog.find("matematikk-r1").unwrap());
        assert_eq!(view.related_badge().as_deref(), Some("Fordypning med: Matematikk R2"));
        assert!(view.curriculum_url.contains("query=REA3056&"));
        assert_eq!(view.competency.item_count, 2);
    }

    #[test]
    fn derive_all_keeps_order_and_rule_set() {
        let catalog = fixture();
        let views = pipeline(RuleSet::CodePrefix).derive_all(&catalog.subjects);
        let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
        let expected: Vec<&str> = catalog.subjects.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, expected);
        let r1 = views.iter().find(|v| v.id == "matematikk-r1").unwrap();
        assert_eq!(r1.category, "realfag");
        let eng = views.iter().find(|v| v.id == "engelsk-1").unwrap();
        assert_eq!(eng.category, "spraak");
    }
}
