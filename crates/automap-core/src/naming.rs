//! Naming conventions for property names
//!
//! A naming convention converts a property name into a canonical list of
//! lower-case words and back. Chaining the destination convention's
//! `to_canonical` with the source convention's `from_canonical` is how a
//! `camelCase` destination property finds its `snake_case` source.
//!
//! The capital-letter conventions only start a word at an upper-case
//! letter, so digits belong to the word before them. A separated name
//! whose word is all digits (`line_2`) therefore comes back merged
//! (`line2`) after a trip through `camelCase`. Start such words with a
//! letter or pair the two names explicitly.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use regex::Regex;
use std::fmt::Debug;
use std::sync::OnceLock;

/// Bidirectional transform between a property name and its word segments
pub trait NamingConvention: Debug + Send + Sync {
    /// Short identifier, e.g. `snake_case`
    fn name(&self) -> &'static str;

    /// Split a property name into lower-case words
    fn to_canonical(&self, name: &str) -> Vec<String>;

    /// Join lower-case words into a property name
    fn from_canonical(&self, words: &[String]) -> String;
}

/// Leaves names untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdentityNamingConvention;

/// `camelCase`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CamelCaseNamingConvention;

/// `PascalCase`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PascalCaseNamingConvention;

/// `snake_case`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnakeCaseNamingConvention;

/// `kebab-case`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KebabCaseNamingConvention;

impl NamingConvention for IdentityNamingConvention {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn to_canonical(&self, name: &str) -> Vec<String> {
        vec![name.to_string()]
    }

    fn from_canonical(&self, words: &[String]) -> String {
        words.concat()
    }
}

impl NamingConvention for CamelCaseNamingConvention {
    fn name(&self) -> &'static str {
        "camel_case"
    }

    fn to_canonical(&self, name: &str) -> Vec<String> {
        split_on_capitals(name)
    }

    fn from_canonical(&self, words: &[String]) -> String {
        let mut name = String::new();
        for (i, word) in words.iter().enumerate() {
            if i == 0 {
                name.push_str(&word.to_lowercase());
            } else {
                name.push_str(&capitalize(word));
            }
        }
        name
    }
}

impl NamingConvention for PascalCaseNamingConvention {
    fn name(&self) -> &'static str {
        "pascal_case"
    }

    fn to_canonical(&self, name: &str) -> Vec<String> {
        split_on_capitals(name)
    }

    fn from_canonical(&self, words: &[String]) -> String {
        words.iter().map(|word| capitalize(word)).collect()
    }
}

impl NamingConvention for SnakeCaseNamingConvention {
    fn name(&self) -> &'static str {
        "snake_case"
    }

    fn to_canonical(&self, name: &str) -> Vec<String> {
        split_on_separator(name, '_')
    }

    fn from_canonical(&self, words: &[String]) -> String {
        join_lowercase(words, "_")
    }
}

impl NamingConvention for KebabCaseNamingConvention {
    fn name(&self) -> &'static str {
        "kebab_case"
    }

    fn to_canonical(&self, name: &str) -> Vec<String> {
        split_on_separator(name, '-')
    }

    fn from_canonical(&self, words: &[String]) -> String {
        join_lowercase(words, "-")
    }
}

/// Segments start at every upper-case letter; digits never start one
fn capital_segments() -> &'static Regex {
    static SEGMENTS: OnceLock<Regex> = OnceLock::new();
    SEGMENTS.get_or_init(|| {
        Regex::new(r"[[:upper:]][^[:upper:]]*|[^[:upper:]]+").expect("segment pattern is valid")
    })
}

fn split_on_capitals(name: &str) -> Vec<String> {
    capital_segments()
        .find_iter(name)
        .map(|segment| segment.as_str().to_lowercase())
        .collect()
}

fn split_on_separator(name: &str, separator: char) -> Vec<String> {
    name.split(separator)
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn join_lowercase(words: &[String], separator: &str) -> String {
    words
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
