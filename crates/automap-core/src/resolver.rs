//! Source property name resolution
//!
//! Given a destination property, a [`NameResolver`] decides which source
//! property feeds it.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::operation::Operation;
use crate::options::Options;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Strategy turning a destination property name into a source property name
pub trait NameResolver: fmt::Debug + Send + Sync {
    fn resolve(&self, destination_property: &str, operation: &Operation, options: &Options)
        -> Result<String>;
}

/// Resolves names through the configured naming conventions
///
/// When either convention is unset the name is returned unchanged. A
/// `FromProperty` operation always resolves to its fixed source name.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConventionNameResolver;

impl NameResolver for ConventionNameResolver {
    fn resolve(
        &self,
        destination_property: &str,
        operation: &Operation,
        options: &Options,
    ) -> Result<String> {
        if let Operation::FromProperty(source_property) = operation {
            return Ok(source_property.clone());
        }

        match (
            options.source_naming_convention(),
            options.destination_naming_convention(),
        ) {
            (Some(source), Some(destination)) => {
                let words = destination.to_canonical(destination_property);
                Ok(source.from_canonical(&words))
            }
            _ => Ok(destination_property.to_string()),
        }
    }
}

/// Returns the destination name unchanged
///
/// Refuses to resolve when naming conventions are configured, since they
/// would otherwise be silently ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNameResolver;

impl NameResolver for IdentityNameResolver {
    fn resolve(
        &self,
        destination_property: &str,
        _operation: &Operation,
        options: &Options,
    ) -> Result<String> {
        if options.source_naming_convention().is_some()
            || options.destination_naming_convention().is_some()
        {
            return Err(Error::invalid_property(
                destination_property,
                "<identity resolver>",
                "naming conventions are configured but the identity resolver ignores them",
            ));
        }
        Ok(destination_property.to_string())
    }
}

type ResolveFn = dyn Fn(&str, &Operation, &Options) -> Result<String> + Send + Sync;

/// Delegates resolution to a caller supplied function
#[derive(Clone)]
pub struct CallbackNameResolver {
    callback: Arc<ResolveFn>,
}

impl CallbackNameResolver {
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&str, &Operation, &Options) -> Result<String> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Resolver backed by a static rename table; unknown names pass through
    pub fn from_table<I, K, V>(table: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let table: std::collections::HashMap<String, String> = table
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self::new(move |name, _, _| {
            Ok(table.get(name).cloned().unwrap_or_else(|| name.to_string()))
        })
    }
}

impl fmt::Debug for CallbackNameResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackNameResolver").finish_non_exhaustive()
    }
}

impl NameResolver for CallbackNameResolver {
    fn resolve(
        &self,
        destination_property: &str,
        operation: &Operation,
        options: &Options,
    ) -> Result<String> {
        (self.callback)(destination_property, operation, options)
    }
}
