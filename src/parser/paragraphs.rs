use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+\s*").unwrap());

pub const PLACEHOLDER: &str = "Innhold kommer snart";

/// Paragraph-break heuristics for narrative text without native breaks.
#[derive(Debug, Clone)]
pub struct SegmentRules {
    /// Case-sensitive substrings that close a paragraph early.
    pub triggers: Vec<String>,
    pub min_sentences: usize,
    pub max_sentences: usize,
}

impl Default for SegmentRules {
    fn default() -> Self {
        SegmentRules {
            triggers: vec!["viktig".into(), "også".into(), "I tillegg".into()],
            min_sentences: 2,
            max_sentences: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphBlock {
    /// Text was absent, empty or whitespace only.
    Placeholder,
    Paragraphs(Vec<String>),
}

impl ParagraphBlock {
    pub fn paragraphs(&self) -> &[String] {
        match self {
            ParagraphBlock::Placeholder => &[],
            ParagraphBlock::Paragraphs(p) => p,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ParagraphBlock::Placeholder)
    }
}

/// Reflow free text into paragraphs of two or three sentences.
///
/// Not grammatically aware: abbreviations with periods split like sentence ends.
pub fn segment_paragraphs(text: Option<&str>, rules: &SegmentRules) -> ParagraphBlock {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return ParagraphBlock::Placeholder;
    };

    let sentences = split_sentences(text);
    let last = sentences.len().saturating_sub(1);
    let mut paragraphs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, sentence) in sentences.iter().enumerate() {
        current.push(sentence.trim());
        let closes = current.len() >= rules.min_sentences
            && (current.len() >= rules.max_sentences
                || i == last
                || rules.triggers.iter().any(|t| sentence.contains(t.as_str())));
        if closes {
            paragraphs.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        paragraphs.push(current.join(" "));
    }

    ParagraphBlock::Paragraphs(paragraphs)
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut end = 0;
    for m in SENTENCE_RE.find_iter(text) {
        if m.start() > end && !text[end..m.start()].trim().is_empty() {
            sentences.push(&text[end..m.start()]);
        }
        sentences.push(m.as_str());
        end = m.end();
    }
    if sentences.is_empty() {
        return vec![text];
    }
    // unterminated tail
    if !text[end..].trim().is_empty() {
        sentences.push(&text[end..]);
    }
    sentences
}
