use std::cmp::Ordering;

use serde::{Deserialize, Deserializer};

/// One elective subject as delivered by the school-data API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectRecord {
    pub id: String,
    pub title: String,
    #[serde(rename = "fagkode", default)]
    pub subject_code: Option<String>,
    #[serde(rename = "kategori", default)]
    pub category: Option<String>,
    #[serde(rename = "omFaget", default)]
    pub about_text: Option<String>,
    #[serde(rename = "hvordanArbeiderMan", default)]
    pub how_one_works_text: Option<String>,
    #[serde(rename = "fagetsRelevans", default)]
    pub relevance_text: Option<String>,
    #[serde(rename = "beskrivelseHTML", default)]
    pub description_html: Option<String>,
    #[serde(rename = "kjerneelementer", default, deserialize_with = "null_as_default")]
    pub core_elements: Vec<CoreElement>,
    #[serde(rename = "related", default, deserialize_with = "null_as_default")]
    pub related_subjects: Vec<String>,
    #[serde(rename = "bilde", default)]
    pub image_file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoreElement {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub source: Option<String>,
}

/// Raw `tilbud.json` payload.
#[derive(Debug, Default, Deserialize)]
pub struct OfferingResponse {
    #[serde(rename = "valgfrieProgramfag", default, deserialize_with = "null_as_default")]
    pub subjects: Vec<SubjectRecord>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

/// The API sends `null` for empty lists and texts as often as it omits the key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default)]
pub struct Catalog {
    pub school: String,
    pub source: Option<String>,
    pub subjects: Vec<SubjectRecord>,
}

impl Catalog {
    pub fn from_response(school: &str, response: OfferingResponse) -> Self {
        let mut subjects = response.subjects;
        sort_subjects(&mut subjects);
        Catalog {
            school: school.to_string(),
            source: response.metadata.and_then(|m| m.source),
            subjects,
        }
    }

    pub fn find(&self, id: &str) -> Option<&SubjectRecord> {
        self.subjects.iter().find(|s| s.id == id)
    }
}

/// Alphabetical by title, bokmål order.
pub fn sort_subjects(subjects: &mut [SubjectRecord]) {
    subjects.sort_by(|a, b| compare_nb(&a.title, &b.title));
}

/// Case-insensitive comparison with æ, ø, å sorted after z.
pub fn compare_nb(a: &str, b: &str) -> Ordering {
    let key_a = a.chars().flat_map(char::to_lowercase).map(collation_weight);
    let key_b = b.chars().flat_map(char::to_lowercase).map(collation_weight);
    key_a.cmp(key_b).then_with(|| a.cmp(b))
}

fn collation_weight(c: char) -> u32 {
    match c {
        'æ' | 'ä' => 'z' as u32 + 1,
        'ø' | 'ö' => 'z' as u32 + 2,
        'å' => 'z' as u32 + 3,
        'é' | 'è' => 'e' as u32,
        _ => c as u32,
    }
}
