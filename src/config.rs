//! Page content and tuning, read from `content/site.json`.

use std::time::Duration;

use log::Level;
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::typing::{
    TypingAnimator, TypingError, TypingTimings, DEFAULT_DELETE_SPEED, DEFAULT_PAUSE,
    DEFAULT_TYPE_SPEED,
};

const BUNDLED_SITE: &str = include_str!("../content/site.json");

const TYPE_SPEED_MS_BOUNDS: (u64, u64) = (20, 1_000);
const DELETE_SPEED_MS_BOUNDS: (u64, u64) = (10, 1_000);
const PAUSE_MS_BOUNDS: (u64, u64) = (100, 10_000);
const SKILL_LEVEL_MAX: u8 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("site content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("site content has no typing phrases")]
    EmptyPhraseList,
    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

impl From<TypingError> for ConfigError {
    fn from(error: TypingError) -> Self {
        match error {
            TypingError::NoPhrases => Self::EmptyPhraseList,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    pub owner: Owner,
    pub typing: TypingSettings,
    pub about: About,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub socials: Vec<SocialLink>,
    pub contact: ContactSettings,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Owner {
    pub name: String,
    pub brand: String,
    pub initials: String,
    pub tagline: String,
    pub summary: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TypingSettings {
    pub phrases: Vec<String>,
    #[serde(default)]
    pub type_speed_ms: Option<u64>,
    #[serde(default)]
    pub delete_speed_ms: Option<u64>,
    #[serde(default)]
    pub pause_ms: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct About {
    pub heading: String,
    #[serde(default)]
    pub journey: Vec<String>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct EducationEntry {
    pub period: String,
    pub title: String,
    pub institution: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent.
    #[serde(deserialize_with = "skill_level")]
    pub level: u8,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// CSS gradient used for the card banner.
    pub accent: String,
    #[serde(default)]
    pub code_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    Github,
    Linkedin,
    Facebook,
    Email,
    Other,
}

impl SocialKind {
    pub fn icon(self) -> &'static str {
        match self {
            Self::Github => "⌥",
            Self::Linkedin => "in",
            Self::Facebook => "f",
            Self::Email => "✉",
            Self::Other => "↗",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SocialLink {
    pub label: String,
    pub href: String,
    pub kind: SocialKind,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ContactSettings {
    pub email: String,
    pub intro: String,
}

// Any integer is accepted so one stray level cannot reject the whole page.
fn skill_level<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = i64::deserialize(deserializer)?;
    Ok(u8::try_from(raw.clamp(0, i64::from(SKILL_LEVEL_MAX))).unwrap_or(SKILL_LEVEL_MAX))
}

fn default_log_level() -> String {
    crate::logging::DEFAULT_LOG_LEVEL.as_str().to_ascii_lowercase()
}

fn millis_with_bounds(value: Option<u64>, default: Duration, bounds: (u64, u64)) -> Duration {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .map(Duration::from_millis)
        .unwrap_or(default)
}

impl TypingSettings {
    pub fn timings(&self) -> TypingTimings {
        let type_speed =
            millis_with_bounds(self.type_speed_ms, DEFAULT_TYPE_SPEED, TYPE_SPEED_MS_BOUNDS);
        let mut delete_speed = millis_with_bounds(
            self.delete_speed_ms,
            DEFAULT_DELETE_SPEED,
            DELETE_SPEED_MS_BOUNDS,
        );
        let pause = millis_with_bounds(self.pause_ms, DEFAULT_PAUSE, PAUSE_MS_BOUNDS);

        if delete_speed >= type_speed {
            delete_speed = (type_speed / 2).max(Duration::from_millis(DELETE_SPEED_MS_BOUNDS.0));
        }

        TypingTimings {
            type_speed,
            delete_speed,
            pause,
        }
    }
}

impl SiteConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SiteConfig = serde_json::from_str(text)?;

        if config.typing.phrases.is_empty() {
            return Err(ConfigError::EmptyPhraseList);
        }

        Ok(config)
    }

    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_json(BUNDLED_SITE)
    }

    /// The bundled content, or the built-in fallback plus the reason it was needed.
    pub fn load() -> (Self, Option<ConfigError>) {
        match Self::bundled() {
            Ok(config) => (config, None),
            Err(error) => (Self::fallback(), Some(error)),
        }
    }

    pub fn fallback() -> Self {
        Self {
            log_level: default_log_level(),
            owner: Owner {
                name: "Portfolio".to_string(),
                brand: "Portfolio".to_string(),
                initials: "P".to_string(),
                tagline: "Developer".to_string(),
                summary: String::new(),
            },
            typing: TypingSettings {
                phrases: vec!["Developer".to_string()],
                type_speed_ms: None,
                delete_speed_ms: None,
                pause_ms: None,
            },
            about: About {
                heading: "About Me".to_string(),
                journey: Vec::new(),
                education: Vec::new(),
            },
            skills: Vec::new(),
            projects: Vec::new(),
            socials: Vec::new(),
            contact: ContactSettings {
                email: String::new(),
                intro: String::new(),
            },
        }
    }

    pub fn log_level(&self) -> Result<Level, ConfigError> {
        self.log_level
            .trim()
            .parse::<Level>()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn animator(&self) -> Result<TypingAnimator, ConfigError> {
        Ok(TypingAnimator::new(
            self.typing.phrases.clone(),
            self.typing.timings(),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"{
        "owner": {
            "name": "Ada",
            "brand": "ada",
            "initials": "A",
            "tagline": "Engineer",
            "summary": "Builds things."
        },
        "typing": { "phrases": ["Engineer", "Writer"] },
        "about": { "heading": "About" },
        "skills": [{ "name": "Rust", "level": 140 }, { "name": "SQL", "level": 70 }],
        "contact": { "email": "ada@example.com", "intro": "Say hi." }
    }"#;

    fn settings(
        type_ms: Option<u64>,
        delete_ms: Option<u64>,
        pause_ms: Option<u64>,
    ) -> TypingSettings {
        TypingSettings {
            phrases: vec!["x".to_string()],
            type_speed_ms: type_ms,
            delete_speed_ms: delete_ms,
            pause_ms,
        }
    }

    #[test]
    fn bundled_content_parses() {
        let config = SiteConfig::bundled().expect("bundled site.json should be valid");

        assert!(!config.typing.phrases.is_empty());
        assert!(config.animator().is_ok());
        assert!(config.log_level().is_ok());
        assert!(!config.contact.email.is_empty());
    }

    #[test]
    fn missing_optional_sections_default_to_empty() {
        let config = SiteConfig::from_json(MINIMAL).expect("minimal content parses");

        assert_eq!(config.log_level, "info");
        assert!(config.projects.is_empty());
        assert!(config.socials.is_empty());
        assert!(config.about.education.is_empty());
    }

    #[test]
    fn skill_levels_are_capped_at_one_hundred() {
        let config = SiteConfig::from_json(MINIMAL).expect("minimal content parses");
        let levels: Vec<u8> = config.skills.iter().map(|skill| skill.level).collect();

        assert_eq!(levels, vec![100, 70]);
    }

    #[test]
    fn skill_levels_outside_a_byte_are_clamped_not_rejected() {
        let text = MINIMAL.replace(
            r#"[{ "name": "Rust", "level": 140 }, { "name": "SQL", "level": 70 }]"#,
            r#"[{ "name": "Rust", "level": 300 }, { "name": "SQL", "level": -5 }]"#,
        );

        let config = SiteConfig::from_json(&text).expect("out-of-range levels still parse");
        let levels: Vec<u8> = config.skills.iter().map(|skill| skill.level).collect();

        assert_eq!(levels, vec![100, 0]);
        assert_eq!(config.contact.email, "ada@example.com");
    }

    #[test]
    fn empty_phrase_list_is_rejected() {
        let text = MINIMAL.replace(r#"["Engineer", "Writer"]"#, "[]");

        let result = SiteConfig::from_json(&text);
        assert!(matches!(result, Err(ConfigError::EmptyPhraseList)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = SiteConfig::from_json("{ \"owner\": ");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn unset_timings_use_defaults() {
        assert_eq!(settings(None, None, None).timings(), TypingTimings::default());
    }

    #[test]
    fn out_of_bounds_timings_fall_back_to_defaults() {
        let timings = settings(Some(5), Some(5_000), Some(50)).timings();

        assert_eq!(timings, TypingTimings::default());
    }

    #[test]
    fn in_bounds_timings_are_kept() {
        let timings = settings(Some(150), Some(40), Some(1_500)).timings();

        assert_eq!(
            timings,
            TypingTimings {
                type_speed: Duration::from_millis(150),
                delete_speed: Duration::from_millis(40),
                pause: Duration::from_millis(1_500),
            }
        );
    }

    #[test]
    fn delete_speed_not_faster_than_typing_is_halved() {
        let timings = settings(Some(80), Some(200), None).timings();

        assert_eq!(timings.delete_speed, Duration::from_millis(40));

        let slowest = settings(Some(20), Some(20), None).timings();
        assert_eq!(slowest.delete_speed, Duration::from_millis(10));
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        let mut config = SiteConfig::fallback();
        config.log_level = " DEBUG ".to_string();
        assert_eq!(config.log_level().expect("valid level"), Level::Debug);

        config.log_level = "chatty".to_string();
        assert!(matches!(config.log_level(), Err(ConfigError::LogLevel(_))));
    }

    #[test]
    fn fallback_content_still_animates() {
        let config = SiteConfig::fallback();

        let animator = config.animator().expect("fallback has a phrase");
        assert_eq!(animator.current_phrase(), "Developer");
    }
}
