//! Registry of type-pair mappings
//!
//! The registry owns the global default [`Options`] and every registered
//! [`Mapping`]. It is mutated during configuration only; once handed to a
//! [`Mapper`](crate::Mapper) it is read-only.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::config::OptionsConfig;
use crate::mapping::{Mapping, MappingBuilder};
use crate::options::Options;
use crate::types::{Mappable, TypeKey, TypePair};
use crate::{Error, Result};
use log::debug;
use std::collections::HashMap;

/// Keyed store of mappings plus the global default options
#[derive(Debug, Default)]
pub struct Registry {
    mappings: HashMap<TypePair, Mapping>,
    options: Options,
}

impl Registry {
    /// Empty registry with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty registry with the given global options
    pub fn with_options(options: Options) -> Self {
        Self {
            mappings: HashMap::new(),
            options,
        }
    }

    /// Empty registry whose global options come from a configuration
    pub fn from_config(config: &OptionsConfig) -> Self {
        Self::with_options(Options::from_config(config))
    }

    /// Register the `S -> D` mapping, or reopen it when it already exists
    ///
    /// New mappings start from a copy of the global options as they are at
    /// this moment.
    pub fn register_mapping<S: Mappable, D: Mappable>(&mut self) -> MappingBuilder<'_, S, D> {
        MappingBuilder::new(self)
    }

    pub(crate) fn ensure_mapping<S: Mappable, D: Mappable>(&mut self) -> &mut Mapping {
        let Registry { mappings, options } = self;
        mappings.entry(TypePair::of::<S, D>()).or_insert_with(|| {
            debug!(
                "Registering mapping {} -> {}",
                std::any::type_name::<S>(),
                std::any::type_name::<D>()
            );
            Mapping::between::<S, D>(options)
        })
    }

    pub fn has_mapping_for(&self, source: &TypeKey, destination: &TypeKey) -> bool {
        self.mappings
            .contains_key(&TypePair::new(*source, *destination))
    }

    /// Typed form of [`Registry::has_mapping_for`]
    pub fn has_mapping<S: 'static, D: 'static>(&self) -> bool {
        self.mappings.contains_key(&TypePair::of::<S, D>())
    }

    /// The mapping for a pair, failing with `UnregisteredMapping` when absent
    pub fn get_mapping_for(&self, source: &TypeKey, destination: &TypeKey) -> Result<&Mapping> {
        self.mapping_for_pair(&TypePair::new(*source, *destination))
    }

    pub(crate) fn mapping_for_pair(&self, pair: &TypePair) -> Result<&Mapping> {
        self.mappings
            .get(pair)
            .ok_or_else(|| Error::unregistered(pair.source, pair.destination))
    }

    /// Mutable access for further configuration of an existing mapping
    pub fn get_mapping_for_mut(
        &mut self,
        source: &TypeKey,
        destination: &TypeKey,
    ) -> Result<&mut Mapping> {
        self.mappings
            .get_mut(&TypePair::new(*source, *destination))
            .ok_or_else(|| Error::unregistered(source, destination))
    }

    /// Global default options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mutable global defaults; existing mappings keep their own copies
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }

    pub fn set_options(&mut self, options: Options) {
        self.options = options;
    }

    /// Registered pairs
    pub fn pairs(&self) -> impl Iterator<Item = &TypePair> {
        self.mappings.keys()
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}
