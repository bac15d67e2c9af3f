//! Mapping execution
//!
//! [`Mapper`] is the public entry point. It looks up the mapping for a type
//! pair, builds or accepts the destination, and applies the operation of
//! every destination property. Typed entry points convert to and from object
//! documents exactly once per call, so a failure never leaves a partially
//! written destination behind.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::mapping::Mapping;
use crate::registry::Registry;
use crate::types::{from_document, to_document, Mappable, TypePair};
use crate::Result;
use log::{debug, trace};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;
use std::marker::PhantomData;

/// Anything able to populate a destination document from a source document
///
/// Used for whole-object custom mappers and for explicit nested mappers.
pub trait ObjectMapper: Send + Sync {
    /// Populate `destination` (an instance document of `pair.destination`)
    /// from `source` and return it
    fn map_document(&self, source: &Value, destination: Value, pair: &TypePair) -> Result<Value>;
}

/// Orchestrates mappings registered in a [`Registry`]
#[derive(Debug, Default)]
pub struct Mapper {
    registry: Registry,
}

impl Mapper {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Build a mapper from a fresh registry configured by `configure`
    ///
    /// ```
    /// use automap_core::{Mappable, Mapper};
    /// use serde::{Deserialize, Serialize};
    ///
    /// #[derive(Default, Serialize, Deserialize)]
    /// struct Source { name: String }
    /// impl Mappable for Source {}
    ///
    /// #[derive(Default, Serialize, Deserialize)]
    /// struct Destination { name: String }
    /// impl Mappable for Destination {}
    ///
    /// let mapper = Mapper::initialize(|registry| {
    ///     registry.register_mapping::<Source, Destination>();
    ///     Ok(())
    /// })?;
    ///
    /// let destination: Destination = mapper.map(&Source { name: "Hello".into() })?;
    /// assert_eq!(destination.name, "Hello");
    /// # Ok::<(), automap_core::Error>(())
    /// ```
    pub fn initialize<F>(configure: F) -> Result<Self>
    where
        F: FnOnce(&mut Registry) -> Result<()>,
    {
        let mut registry = Registry::new();
        configure(&mut registry)?;
        Ok(Self::new(registry))
    }

    /// The registry this mapper executes against
    pub fn configuration(&self) -> &Registry {
        &self.registry
    }

    /// Map `source` into a new `D`
    pub fn map<S: Mappable, D: Mappable>(&self, source: &S) -> Result<D> {
        let pair = TypePair::of::<S, D>();
        let mapping = self.registry.mapping_for_pair(&pair)?;
        let source = to_document(source)?;
        let destination = mapping
            .destination_descriptor()
            .instantiate(mapping.should_skip_constructor())?;
        let destination = self.populate(mapping, &source, destination)?;
        from_document(destination)
    }

    /// Map `source` onto an existing `destination`
    ///
    /// Properties without a counterpart keep their current values. Fields
    /// serde skips are handed over through [`Mappable::assign_mapped`].
    pub fn map_to_object<S: Mappable, D: Mappable>(
        &self,
        source: &S,
        destination: &mut D,
    ) -> Result<()> {
        let pair = TypePair::of::<S, D>();
        let mapping = self.registry.mapping_for_pair(&pair)?;
        let source = to_document(source)?;
        let document = self.populate(mapping, &source, to_document(destination)?)?;
        destination.assign_mapped(from_document(document)?);
        Ok(())
    }

    /// Map every element of `sources`, preserving order
    ///
    /// The first failing element aborts the whole call.
    pub fn map_multiple<'s, S, D, I>(&self, sources: I) -> Result<Vec<D>>
    where
        S: Mappable,
        D: Mappable,
        I: IntoIterator<Item = &'s S>,
    {
        sources.into_iter().map(|source| self.map(source)).collect()
    }

    /// Type-erased mapping of a source document into a new destination
    /// document of `pair.destination`
    pub fn map_new_document(&self, source: &Value, pair: &TypePair) -> Result<Value> {
        let mapping = self.registry.mapping_for_pair(pair)?;
        let destination = mapping
            .destination_descriptor()
            .instantiate(mapping.should_skip_constructor())?;
        self.populate(mapping, source, destination)
    }

    fn populate(&self, mapping: &Mapping, source: &Value, mut destination: Value) -> Result<Value> {
        if let Some(custom) = mapping.custom_mapper() {
            debug!("Routing {} through its custom mapper", mapping.pair());
            return custom.map_document(source, destination, &mapping.pair());
        }

        for property in destination_properties(mapping, &destination) {
            let operation = mapping.operation_for(&property);
            trace!(
                "Applying {} operation to '{}'",
                operation.operation().kind(),
                property
            );
            operation.apply(&property, source, &mut destination, self)?;
        }
        Ok(destination)
    }
}

impl ObjectMapper for Mapper {
    fn map_document(&self, source: &Value, destination: Value, pair: &TypePair) -> Result<Value> {
        let mapping = self.registry.mapping_for_pair(pair)?;
        self.populate(mapping, source, destination)
    }
}

/// Properties to visit on the destination
///
/// Declared properties for regular types. Dynamic property bags have no
/// declared shape, so their current keys and the explicit overrides are used.
fn destination_properties(mapping: &Mapping, destination: &Value) -> Vec<String> {
    let descriptor = mapping.destination_descriptor();
    if !descriptor.is_dynamic() {
        return descriptor.properties().to_vec();
    }

    let mut properties: BTreeSet<String> = destination
        .as_object()
        .map(|fields| fields.keys().cloned().collect())
        .unwrap_or_default();
    properties.extend(mapping.member_overrides().map(str::to_string));
    properties.into_iter().collect()
}

/// [`ObjectMapper`] backed by a typed closure
pub struct TypedMapper<S, D, F> {
    callback: F,
    _types: PhantomData<fn() -> (S, D)>,
}

impl<S, D, F> TypedMapper<S, D, F>
where
    S: Mappable,
    D: Mappable,
    F: Fn(&S, &mut D) -> Result<()> + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            _types: PhantomData,
        }
    }
}

impl<S, D, F> ObjectMapper for TypedMapper<S, D, F>
where
    S: Mappable,
    D: Mappable,
    F: Fn(&S, &mut D) -> Result<()> + Send + Sync,
{
    fn map_document(&self, source: &Value, destination: Value, _pair: &TypePair) -> Result<Value> {
        let source: S = from_document(source.clone())?;
        let mut destination: D = from_document(destination)?;
        (self.callback)(&source, &mut destination)?;
        to_document(&destination)
    }
}

impl<S, D, F> fmt::Debug for TypedMapper<S, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedMapper")
            .field("source", &std::any::type_name::<S>())
            .field("destination", &std::any::type_name::<D>())
            .finish()
    }
}
