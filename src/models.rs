use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One dictionary entry belonging to exactly one lesson.
///
/// `word` is the only mandatory field; every other textual field is always
/// present in persisted form (empty string when unknown), so deserialization
/// fills missing fields with defaults instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyItem {
    #[serde(default)]
    pub id: String,
    pub word: String,
    #[serde(default)]
    pub pinyin: String,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definition_vi: String,
    #[serde(default)]
    pub definition_en: String,
    #[serde(default)]
    pub example_zh: String,
    #[serde(default)]
    pub example_vi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// A titled, numbered bundle of vocabulary within one scope.
///
/// `number` uniqueness within a scope is a display convention, not a storage
/// invariant; duplicates only degrade sort stability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub number: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryType {
    Hsk,
    Yct,
    Topic,
}

/// A compile-time defined grouping used only as a lookup key for lessons.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub r#type: CategoryType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    pub icon: &'static str,
}

impl Category {
    pub fn scope(&self) -> Scope {
        match self.r#type {
            CategoryType::Hsk => Scope::Hsk(self.level.unwrap_or(1)),
            CategoryType::Yct => Scope::Yct(self.level.unwrap_or(1)),
            CategoryType::Topic => Scope::Topic(self.id.to_string()),
        }
    }
}

/// Lookup key grouping lessons: an HSK level, a YCT level, or a free-form
/// topic id. One canonical string form (`hsk3`, `yct2`, `food`) is used for
/// cache keys, remote rows and URLs alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    Hsk(u8),
    Yct(u8),
    Topic(String),
}

impl Scope {
    pub fn key(&self) -> String {
        match self {
            Scope::Hsk(level) => format!("hsk{level}"),
            Scope::Yct(level) => format!("yct{level}"),
            Scope::Topic(id) => id.clone(),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scope key: {0}")]
pub struct ScopeParseError(pub String);

impl FromStr for Scope {
    type Err = ScopeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ScopeParseError(s.to_string()));
        }

        if let Some(level) = parse_leveled(s, "hsk") {
            return Ok(Scope::Hsk(level));
        }
        if let Some(level) = parse_leveled(s, "yct") {
            return Ok(Scope::Yct(level));
        }

        // Topic ids double as scope keys and end up in file names and URL
        // query filters, so the charset is restricted.
        if s.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        {
            return Ok(Scope::Topic(s.to_string()));
        }

        Err(ScopeParseError(s.to_string()))
    }
}

fn parse_leveled(s: &str, prefix: &str) -> Option<u8> {
    let rest = s.strip_prefix(prefix)?;
    let level: u8 = rest.parse().ok()?;
    (1..=9).contains(&level).then_some(level)
}

impl Serialize for Scope {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key())
    }
}

impl<'de> Deserialize<'de> for Scope {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
