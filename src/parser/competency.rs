use std::sync::LazyLock;

use regex::Regex;

static GOALS_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h([1-6])(?:\s[^>]*)?>Kompetansemål</h([1-6])\s*>").unwrap());
static HEADING_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<h([1-6])(?:[\s>/]|$)").unwrap());
static LIST_ITEM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<li(?:[\s>/]|$)").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetencyExtract {
    pub html_fragment: Option<String>,
    pub item_count: usize,
}

/// Slice the "Kompetansemål" section out of a subject description.
///
/// Headings are positional anchors only; the markup is never validated. The
/// section runs to the next heading of the same level or the end of input.
pub fn extract_competency_goals(html: Option<&str>) -> CompetencyExtract {
    let Some(html) = html else {
        return CompetencyExtract::default();
    };

    let Some((level, start)) = GOALS_HEADING_RE
        .captures_iter(html)
        .find(|c| c[1] == c[2])
        .and_then(|c| Some((c[1].to_string(), c.get(0)?.end())))
    else {
        return CompetencyExtract::default();
    };

    let rest = &html[start..];
    let end = HEADING_OPEN_RE
        .captures_iter(rest)
        .find(|c| c[1] == level)
        .and_then(|c| c.get(0))
        .map(|m| m.start())
        .unwrap_or(rest.len());

    let fragment = rest[..end].trim();
    CompetencyExtract {
        item_count: LIST_ITEM_RE.find_iter(fragment).count(),
        html_fragment: Some(fragment.to_string()),
    }
}
