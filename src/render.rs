use std::fmt::Write;

use crate::parser::classify::{category_label, RuleSet};
use crate::parser::paragraphs::{ParagraphBlock, PLACEHOLDER};
use crate::parser::SubjectView;

const NO_GOALS: &str = "Ingen kompetansemål tilgjengelig";
const NO_CORE_ELEMENTS: &str = "Ingen kjerneelementer tilgjengelig";

/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn placeholder(text: &str) -> String {
    format!("<p class=\"placeholder-text\">{}</p>", text)
}

pub fn paragraphs_html(block: &ParagraphBlock) -> String {
    match block {
        ParagraphBlock::Placeholder => placeholder(PLACEHOLDER),
        ParagraphBlock::Paragraphs(paragraphs) => paragraphs
            .iter()
            .map(|p| format!("<p>{}</p>", escape_html(p)))
            .collect(),
    }
}

/// Collapsible section. `count` renders as a "(n)" badge when non-zero.
pub fn accordion(id: &str, title: &str, content: &str, count: Option<usize>) -> String {
    let badge = count
        .filter(|n| *n > 0)
        .map(|n| format!(" <span class=\"accordion-count\">({})</span>", n))
        .unwrap_or_default();
    format!(
        "<div class=\"fag-accordion\" data-accordion-id=\"{id}\">\
         <div class=\"accordion-header\" role=\"button\" tabindex=\"0\" aria-expanded=\"false\">\
         <h3>{title}{badge}</h3><span class=\"accordion-icon\" aria-hidden=\"true\">▼</span></div>\
         <div class=\"accordion-content\">{content}</div></div>",
        id = escape_html(id),
        title = escape_html(title),
    )
}

fn image_html(view: &SubjectView, class: &str) -> String {
    let title = escape_html(&view.title);
    match &view.image_url {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\" class=\"{}\" loading=\"lazy\">",
            escape_html(url),
            title,
            class
        ),
        None => format!("<span>{}</span>", escape_html(&view.initials)),
    }
}

pub fn card(view: &SubjectView) -> String {
    format!(
        "<article class=\"fag-card\" data-category=\"{category}\" data-id=\"{id}\" tabindex=\"0\">\
         <div class=\"fag-card-image\">{image}</div>\
         <div class=\"fag-card-content\"><h2>{title}</h2>\
         <span class=\"fagkode\">{code}</span>\
         <p class=\"description\">{description}</p></div></article>",
        category = escape_html(view.category),
        id = escape_html(&view.id),
        image = image_html(view, "fag-card-img"),
        title = escape_html(&view.title),
        code = escape_html(view.code_display()),
        description = escape_html(&view.description),
    )
}

pub fn detail(view: &SubjectView) -> String {
    let mut out = String::new();
    let code = escape_html(view.code.as_deref().unwrap_or_default());
    let related = view
        .related_badge()
        .map(|b| format!("<span class=\"related-badge\">{}</span>", escape_html(&b)))
        .unwrap_or_default();

    let hero_class = if view.image_url.is_some() {
        "modal-hero"
    } else {
        "modal-hero no-image"
    };
    let _ = write!(out, "<section class=\"fag-detail\" id=\"fag-{}\">", escape_html(&view.id));
    let _ = write!(out, "<div class=\"{}\">", hero_class);
    if view.image_url.is_some() {
        out.push_str(&image_html(view, "modal-hero-image"));
        out.push_str("<div class=\"modal-hero-overlay\"></div>");
    }
    let _ = write!(
        out,
        "<div class=\"modal-hero-content\"><h2>{}</h2><div class=\"modal-hero-badges\">\
         <span class=\"fagkode-badge\">{}</span>{}</div></div></div>",
        escape_html(&view.title),
        code,
        related
    );

    let _ = write!(
        out,
        "<div class=\"modal-body\"><div class=\"om-faget\"><h2>Om faget</h2><p>{}</p></div>",
        escape_html(&view.description)
    );

    let goals = view
        .competency
        .html_fragment
        .clone()
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| placeholder(NO_GOALS));
    let core = if view.core_elements.is_empty() {
        placeholder(NO_CORE_ELEMENTS)
    } else {
        view.core_elements
            .iter()
            .map(|k| {
                format!(
                    "<div class=\"kjerneelement\"><h4>{}</h4><p>{}</p></div>",
                    escape_html(&k.title),
                    escape_html(&k.content)
                )
            })
            .collect()
    };

    out.push_str("<div class=\"fag-accordions\">");
    out.push_str(&accordion(
        "hvordan",
        "Hvordan arbeider man i faget?",
        &paragraphs_html(&view.how_one_works),
        None,
    ));
    out.push_str(&accordion("relevans", "Fagets relevans", &paragraphs_html(&view.relevance), None));
    out.push_str(&accordion(
        "kompetanse",
        "I dette faget lærer du å ...",
        &goals,
        Some(view.competency.item_count),
    ));
    out.push_str(&accordion("kjerne", "Kjerneelementer", &core, Some(view.core_elements.len())));
    out.push_str("</div>");

    let _ = write!(
        out,
        "<a href=\"{}\" target=\"_blank\" class=\"btn-lareplan\">Se full læreplan på udir.no →</a>",
        escape_html(&view.curriculum_url)
    );
    out.push_str("</div></section>");
    out
}

pub fn filter_buttons(rules: RuleSet) -> String {
    let mut out = String::from(
        "<div class=\"filters\"><button class=\"filter-btn active\" data-category=\"all\">Alle</button>",
    );
    for bucket in rules.buckets() {
        let key = rules.key(*bucket);
        let _ = write!(
            out,
            "<button class=\"filter-btn\" data-category=\"{}\">{}</button>",
            escape_html(key),
            escape_html(&category_label(key))
        );
    }
    out.push_str("</div>");
    out
}

/// Standalone catalog page: filters, card grid, then one detail section per subject.
pub fn page(school: &str, rules: RuleSet, views: &[SubjectView]) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"nb\">\n<head><meta charset=\"utf-8\"><title>Fagkatalog</title></head>\n\
         <body>\n<div id=\"fagkatalog\" data-school=\"{}\">\n",
        escape_html(school)
    );
    out.push_str("<input type=\"search\" id=\"search\" placeholder=\"Søk etter fag eller fagkode\">\n");
    out.push_str(&filter_buttons(rules));
    out.push_str("\n<div id=\"fag-grid\">\n");
    if views.is_empty() {
        out.push_str("<p class=\"loading\">Ingen fag funnet.</p>\n");
    }
    for view in views {
        out.push_str(&card(view));
        out.push('\n');
    }
    out.push_str("</div>\n<div id=\"fag-details\">\n");
    for view in views {
        out.push_str(&detail(view));
        out.push('\n');
    }
    out.push_str("</div>\n</div>\n</body>\n</html>\n");
    out
}
