//! Identifier case conversion.
//!
//! All functions are total and deterministic. Converting an identifier that
//! is already in a convention leaves it unchanged, so a second application of
//! any converter is a no-op for identifiers made of ASCII letters, digits,
//! `_`, `-` and whitespace.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

// Constant patterns, compiling them cannot fail.
// Lowercase letter or digit followed by an uppercase letter: "userName", "v2Beta"
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("constant pattern"));

// End of an acronym before a capitalized word: "HTTPServer"
static ACRONYM_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("constant pattern"));

/// Split an identifier into lowercase words.
///
/// ```rust
/// use schema_graph::naming::to_words;
///
/// assert_eq!(to_words("HTTPServerV2"), vec!["http", "server", "v2"]);
/// assert_eq!(to_words("user_name-field id"), vec!["user", "name", "field", "id"]);
/// ```
pub fn to_words(s: &str) -> Vec<String> {
    let spaced = LOWER_UPPER.replace_all(s, "$1 $2");
    let spaced = ACRONYM_WORD.replace_all(&spaced, "$1 $2");

    spaced
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub fn to_snake_case(s: &str) -> String {
    to_words(s).join("_")
}

pub fn to_kebab_case(s: &str) -> String {
    to_words(s).join("-")
}

pub fn to_camel_case(s: &str) -> String {
    let words = join_single_letters(to_words(s), 1);
    words
        .iter()
        .enumerate()
        .map(|(i, word)| if i == 0 { word.clone() } else { capitalize(word) })
        .collect()
}

pub fn to_pascal_case(s: &str) -> String {
    join_single_letters(to_words(s), 0)
        .iter()
        .map(|word| capitalize(word))
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join a capitalized one-letter word onto the next word when the pair would
/// otherwise read back as a single acronym ("a", "b1" -> "AB1" -> "ab1").
///
/// Words before `from` are not capitalized and left alone.
fn join_single_letters(words: Vec<String>, from: usize) -> Vec<String> {
    let mut joined: Vec<String> = Vec::with_capacity(words.len());

    for (i, word) in words.into_iter().enumerate() {
        if let Some(previous) = joined.last_mut() {
            if i > from && is_single_letter(previous) && starts_without_lowercase_tail(&word) {
                previous.push_str(&word);
                continue;
            }
        }
        joined.push(word);
    }
    joined
}

fn is_single_letter(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}

fn starts_without_lowercase_tail(word: &str) -> bool {
    let mut chars = word.chars();
    match (chars.next(), chars.next()) {
        (Some(first), second) => {
            first.is_alphabetic() && !second.is_some_and(|c| c.is_ascii_lowercase())
        }
        (None, _) => false,
    }
}

/// Target naming convention for node names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamingConvention {
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
}

impl NamingConvention {
    pub const ALL: [NamingConvention; 4] = [
        NamingConvention::SnakeCase,
        NamingConvention::CamelCase,
        NamingConvention::PascalCase,
        NamingConvention::KebabCase,
    ];

    /// Convert an identifier to this convention.
    pub fn convert(&self, s: &str) -> String {
        match self {
            NamingConvention::SnakeCase => to_snake_case(s),
            NamingConvention::CamelCase => to_camel_case(s),
            NamingConvention::PascalCase => to_pascal_case(s),
            NamingConvention::KebabCase => to_kebab_case(s),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NamingConvention::SnakeCase => "snake_case",
            NamingConvention::CamelCase => "camelCase",
            NamingConvention::PascalCase => "PascalCase",
            NamingConvention::KebabCase => "kebab-case",
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingConvention {
    type Err = String;

    /// Accepts the canonical names and their plain word forms ("snake", "pascal", ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match to_snake_case(s).as_str() {
            "snake" | "snake_case" => Ok(NamingConvention::SnakeCase),
            "camel" | "camel_case" => Ok(NamingConvention::CamelCase),
            "pascal" | "pascal_case" => Ok(NamingConvention::PascalCase),
            "kebab" | "kebab_case" => Ok(NamingConvention::KebabCase),
            _ => Err(format!("unknown naming convention '{}'", s)),
        }
    }
}
