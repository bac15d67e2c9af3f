//! Declarative configuration of the global default options
//!
//! An [`OptionsConfig`] describes the serializable part of [`Options`]
//! (naming conventions and flags) so defaults can live in a JSON file next
//! to the application. Unset fields leave the current value alone.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::naming::{
    CamelCaseNamingConvention, IdentityNamingConvention, KebabCaseNamingConvention,
    NamingConvention, PascalCaseNamingConvention, SnakeCaseNamingConvention,
};
use crate::options::Options;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Built-in naming conventions, by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConventionKind {
    Identity,
    CamelCase,
    PascalCase,
    SnakeCase,
    KebabCase,
}

impl NamingConventionKind {
    pub fn convention(self) -> Arc<dyn NamingConvention> {
        match self {
            NamingConventionKind::Identity => Arc::new(IdentityNamingConvention),
            NamingConventionKind::CamelCase => Arc::new(CamelCaseNamingConvention),
            NamingConventionKind::PascalCase => Arc::new(PascalCaseNamingConvention),
            NamingConventionKind::SnakeCase => Arc::new(SnakeCaseNamingConvention),
            NamingConventionKind::KebabCase => Arc::new(KebabCaseNamingConvention),
        }
    }
}

/// Serializable description of the global default options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsConfig {
    /// Naming convention of source properties
    pub source_naming_convention: Option<NamingConventionKind>,

    /// Naming convention of destination properties
    pub destination_naming_convention: Option<NamingConventionKind>,

    /// Build destinations with `Default` instead of their initializer
    pub skip_constructor: Option<bool>,

    /// Skip writes whose source value is null
    pub ignore_null_properties: Option<bool>,
}

impl OptionsConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Overwrite the fields of `options` this configuration sets
    pub fn apply_to(&self, options: &mut Options) {
        let (mut source, mut destination) = options.naming_convention_handles();
        if let Some(kind) = self.source_naming_convention {
            source = Some(kind.convention());
        }
        if let Some(kind) = self.destination_naming_convention {
            destination = Some(kind.convention());
        }
        options.set_naming_convention_handles(source, destination);

        match self.skip_constructor {
            Some(true) => options.skip_constructor(),
            Some(false) => options.dont_skip_constructor(),
            None => {}
        }
        if let Some(ignore) = self.ignore_null_properties {
            options.set_ignore_null_properties(ignore);
        }
    }
}

impl Options {
    /// Default options overlaid with `config`
    pub fn from_config(config: &OptionsConfig) -> Self {
        let mut options = Options::default();
        config.apply_to(&mut options);
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config = OptionsConfig::from_json_str(
            r#"{
                "source_naming_convention": "snake_case",
                "destination_naming_convention": "camel_case",
                "skip_constructor": false,
                "ignore_null_properties": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.source_naming_convention, Some(NamingConventionKind::SnakeCase));
        assert_eq!(
            config.destination_naming_convention,
            Some(NamingConventionKind::CamelCase)
        );

        let options = Options::from_config(&config);
        assert_eq!(options.source_naming_convention().map(|c| c.name()), Some("snake_case"));
        assert_eq!(
            options.destination_naming_convention().map(|c| c.name()),
            Some("camel_case")
        );
        assert!(!options.should_skip_constructor());
        assert!(options.should_ignore_null_properties());
    }

    #[test]
    fn test_empty_config_keeps_defaults() {
        let config = OptionsConfig::from_json_str("{}").unwrap();
        assert_eq!(config, OptionsConfig::default());

        let options = Options::from_config(&config);
        assert!(options.source_naming_convention().is_none());
        assert!(options.should_skip_constructor());
    }

    #[test]
    fn test_partial_config_only_overrides_what_it_sets() {
        let mut options = Options::default();
        options.set_naming_conventions(PascalCaseNamingConvention, KebabCaseNamingConvention);

        let config = OptionsConfig {
            destination_naming_convention: Some(NamingConventionKind::SnakeCase),
            ..OptionsConfig::default()
        };
        config.apply_to(&mut options);

        assert_eq!(options.source_naming_convention().map(|c| c.name()), Some("pascal_case"));
        assert_eq!(
            options.destination_naming_convention().map(|c| c.name()),
            Some("snake_case")
        );
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let err = OptionsConfig::from_json_str(r#"{"naming": "snake_case"}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json { .. }));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"source_naming_convention": "kebab_case"}}"#).unwrap();

        let config = OptionsConfig::from_file(file.path()).unwrap();
        assert_eq!(config.source_naming_convention, Some(NamingConventionKind::KebabCase));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = OptionsConfig::from_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, crate::Error::Io { .. }));
    }
}
