use chrono::{NaiveDate, Utc};

use crate::render::escape_html;
use crate::settings::DEFAULT_SCHOOL;

pub const CONTAINER_ID: &str = "fagkatalog";

/// Asset URLs a host page loads, cache-busted once per day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedAssets {
    pub school: String,
    pub loader: String,
    pub stylesheet: String,
    pub theme: String,
    pub markup: String,
    pub script: String,
}

impl EmbedAssets {
    pub fn for_school(base: &str, school: &str, date: NaiveDate) -> Self {
        let base = base.trim_end_matches('/');
        let version = date.format("%Y-%m-%d");
        EmbedAssets {
            school: school.to_string(),
            loader: format!("{}/embed.js", base),
            stylesheet: format!("{}/style.css?v={}", base, version),
            theme: format!("{}/themes/{}.css?v={}", base, school, version),
            markup: format!("{}/index.html?v={}", base, version),
            script: format!("{}/app.js?v={}", base, version),
        }
    }

    /// Versioned with the UTC date so every host page agrees on the day.
    pub fn today(base: &str, school: &str) -> Self {
        Self::for_school(base, school, Utc::now().date_naive())
    }

    /// Markup to paste into a host page.
    pub fn snippet(&self) -> String {
        let container = if self.school == DEFAULT_SCHOOL {
            format!("<div id=\"{}\"></div>", CONTAINER_ID)
        } else {
            format!(
                "<div id=\"{}\" data-school=\"{}\"></div>",
                CONTAINER_ID,
                escape_html(&self.school)
            )
        };
        format!("{}\n<script src=\"{}\"></script>", container, escape_html(&self.loader))
    }

    /// Load order: base styles, theme, markup, then the script.
    pub fn load_order(&self) -> [&str; 4] {
        [
            self.stylesheet.as_str(),
            self.theme.as_str(),
            self.markup.as_str(),
            self.script.as_str(),
        ]
    }
}
