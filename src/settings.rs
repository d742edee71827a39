use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::CatalogError;
use crate::parser::classify::RuleSet;
use crate::parser::paragraphs::SegmentRules;

pub const DEFAULT_SCHOOL: &str = "bergen-private-gymnas";
const DEFAULT_API_BASE: &str = "https://fredeids-metis.github.io/school-data/api/2025-01";
const DEFAULT_IMAGE_BASE: &str = "https://fredeids-metis.github.io/school-data/images/fag";
const DEFAULT_EMBED_BASE: &str = "https://fredeids-metis.github.io/fagkatalog-bpg";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_base: String,
    pub image_base: String,
    pub embed_base: String,
    pub school: String,
    #[serde(default)]
    pub rule_set: Option<String>,
    #[serde(default)]
    pub paragraph_triggers: Option<Vec<String>>,
}

impl Settings {
    /// Defaults, then `fagkatalog.toml` if present, then `FAGKATALOG_*` env vars.
    pub fn load() -> Result<Self, CatalogError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("fagkatalog").required(false))
                .add_source(
                    Environment::with_prefix("FAGKATALOG")
                        .try_parsing(true)
                        .list_separator(",")
                        .with_list_parse_key("paragraph_triggers"),
                ),
        )
    }

    fn from_builder(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, CatalogError> {
        let settings = Config::builder()
            .set_default("api_base", DEFAULT_API_BASE)?
            .set_default("image_base", DEFAULT_IMAGE_BASE)?
            .set_default("embed_base", DEFAULT_EMBED_BASE)?
            .set_default("school", DEFAULT_SCHOOL)?
            .add_source(builder.build()?)
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Explicit override wins, otherwise the school's profile decides.
    pub fn rule_set(&self, school: &str) -> Result<RuleSet, CatalogError> {
        match self.rule_set.as_deref() {
            Some(name) => RuleSet::parse(name).ok_or_else(|| CatalogError::UnknownRuleSet(name.to_string())),
            None => Ok(RuleSet::for_school(school)),
        }
    }

    pub fn segment_rules(&self) -> SegmentRules {
        match &self.paragraph_triggers {
            Some(triggers) => SegmentRules {
                triggers: triggers.clone(),
                ..Default::default()
            },
            None => SegmentRules::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(toml: &str) -> Settings {
        Settings::from_builder(
            Config::builder().add_source(File::from_str(toml, config::FileFormat::Toml)),
        )
        .unwrap()
    }

    #[test]
    fn defaults() {
        let s = from_toml("");
        assert_eq!(s.school, DEFAULT_SCHOOL);
        assert_eq!(s.api_base, DEFAULT_API_BASE);
        assert_eq!(s.rule_set(&s.school).unwrap(), RuleSet::Standard);
        assert_eq!(s.segment_rules().triggers, SegmentRules::default().triggers);
    }

    #[test]
    fn profile_picks_rule_set() {
        let s = from_toml("school = \"metis-vgs\"");
        assert_eq!(s.rule_set(&s.school).unwrap(), RuleSet::CodePrefix);
    }

    #[test]
    fn explicit_rule_set_overrides_profile() {
        let s = from_toml("school = \"metis-vgs\"\nrule_set = \"standard\"");
        assert_eq!(s.rule_set(&s.school).unwrap(), RuleSet::Standard);
    }

    #[test]
    fn unknown_rule_set_is_an_error() {
        let s = from_toml("rule_set = \"fancy\"");
        assert!(matches!(s.rule_set(&s.school), Err(CatalogError::UnknownRuleSet(n)) if n == "fancy"));
    }

    #[test]
    fn trigger_override() {
        let s = from_toml("paragraph_triggers = [\"Dessuten\"]");
        let rules = s.segment_rules();
        assert_eq!(rules.triggers, vec!["Dessuten".to_string()]);
        assert_eq!(rules.max_sentences, 3);
    }
}
