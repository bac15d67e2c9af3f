//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for property names, naming
//! conventions and object documents used by the property tests.

#![cfg(test)]

use crate::config::NamingConventionKind;
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{Map, Value};

/// Strategy for generating canonical word lists (lowercase, non-empty words)
pub fn word_list_strategy() -> impl Strategy<Value = Vec<String>> {
    vec("[a-z][a-z0-9]{0,6}", 1..5)
}

/// Strategy for generating snake_case property names
pub fn snake_case_name_strategy() -> impl Strategy<Value = String> {
    word_list_strategy().prop_map(|words| words.join("_"))
}

/// Strategy for generating built-in naming conventions
pub fn naming_convention_kind_strategy() -> impl Strategy<Value = NamingConventionKind> {
    prop_oneof![
        Just(NamingConventionKind::Identity),
        Just(NamingConventionKind::CamelCase),
        Just(NamingConventionKind::PascalCase),
        Just(NamingConventionKind::SnakeCase),
        Just(NamingConventionKind::KebabCase),
    ]
}

/// Strategy for generating scalar JSON values
pub fn scalar_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ]
}

/// Strategy for generating flat object documents with snake_case keys
pub fn document_strategy() -> impl Strategy<Value = Value> {
    btree_map(snake_case_name_strategy(), scalar_value_strategy(), 0..8).prop_map(|fields| {
        let object: Map<String, Value> = fields.into_iter().collect();
        Value::Object(object)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_word_list_strategy_generates_lowercase_words(words in word_list_strategy()) {
            prop_assert!(!words.is_empty());
            for word in &words {
                prop_assert!(!word.is_empty());
                prop_assert_eq!(word.to_lowercase(), word.clone());
            }
        }

        #[test]
        fn test_document_strategy_generates_objects(document in document_strategy()) {
            prop_assert!(document.is_object());
        }

        #[test]
        fn test_naming_convention_kind_round_trips(kind in naming_convention_kind_strategy()) {
            let json = serde_json::to_string(&kind).unwrap();
            let back: NamingConventionKind = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, kind);
        }
    }
}
