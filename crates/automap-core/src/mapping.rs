//! Configuration of a single (source, destination) type pair
//!
//! A [`Mapping`] holds the per-property operation overrides and a private
//! copy of the options. [`MappingBuilder`] is the typed, fluent front end
//! returned by [`Registry::register_mapping`](crate::Registry::register_mapping).
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::accessor::PropertyAccessor;
use crate::mapper::{ObjectMapper, TypedMapper};
use crate::naming::NamingConvention;
use crate::operation::{BoundOperation, NameMemo, Operation};
use crate::options::Options;
use crate::registry::Registry;
use crate::resolver::NameResolver;
use crate::types::{Mappable, TypeDescriptor, TypeKey, TypePair};
use crate::{Error, Result};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Configuration for one ordered source -> destination pair
pub struct Mapping {
    source: TypeDescriptor,
    destination: TypeDescriptor,
    operations: HashMap<String, Operation>,
    options: Options,
    custom_mapper: Option<Arc<dyn ObjectMapper>>,
    has_reverse: bool,
    names: NameMemo,
}

impl Mapping {
    /// New mapping seeded with a copy of `defaults`
    pub fn new(source: TypeDescriptor, destination: TypeDescriptor, defaults: &Options) -> Self {
        Self {
            source,
            destination,
            operations: HashMap::new(),
            options: defaults.clone(),
            custom_mapper: None,
            has_reverse: false,
            names: NameMemo::default(),
        }
    }

    /// Typed shorthand for [`Mapping::new`]
    pub fn between<S: Mappable, D: Mappable>(defaults: &Options) -> Self {
        Self::new(TypeDescriptor::of::<S>(), TypeDescriptor::of::<D>(), defaults)
    }

    pub fn source_type(&self) -> TypeKey {
        self.source.key()
    }

    pub fn destination_type(&self) -> TypeKey {
        self.destination.key()
    }

    pub fn pair(&self) -> TypePair {
        TypePair::new(self.source.key(), self.destination.key())
    }

    pub fn source_descriptor(&self) -> &TypeDescriptor {
        &self.source
    }

    pub fn destination_descriptor(&self) -> &TypeDescriptor {
        &self.destination
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Register an explicit operation for one destination property
    ///
    /// The property must be declared on the destination type, unless the
    /// destination is a dynamic property bag. Registering the same property
    /// again replaces the earlier operation.
    pub fn for_member(
        &mut self,
        property: impl Into<String>,
        operation: Operation,
    ) -> Result<&mut Self> {
        let property = property.into();
        if !self.destination.is_dynamic() && !self.destination.declares(&property) {
            return Err(Error::invalid_property(
                property,
                self.destination.name(),
                "the destination type does not declare this property",
            ));
        }

        if let Some(previous) = self.operations.insert(property.clone(), operation) {
            debug!(
                "Replaced {} operation for '{}' on {}",
                previous.kind(),
                property,
                self.pair()
            );
        }
        self.names.clear();
        Ok(self)
    }

    /// Explicitly configured properties
    pub fn member_overrides(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// The operation governing `property`, bound to this mapping's options
    ///
    /// An explicit override wins over the configured default operation.
    pub fn operation_for(&self, property: &str) -> BoundOperation<'_> {
        let operation = self
            .operations
            .get(property)
            .unwrap_or_else(|| self.options.default_operation());
        BoundOperation::new(operation, &self.options, &self.names)
    }

    /// Run `configure` against this mapping's private options
    pub fn set_defaults<F>(&mut self, configure: F) -> &mut Self
    where
        F: FnOnce(&mut Options),
    {
        configure(&mut self.options);
        self.names.clear();
        self
    }

    pub fn with_naming_conventions(
        &mut self,
        source: impl NamingConvention + 'static,
        destination: impl NamingConvention + 'static,
    ) -> &mut Self {
        self.set_defaults(|options| options.set_naming_conventions(source, destination))
    }

    pub fn with_default_operation(&mut self, operation: Operation) -> &mut Self {
        self.set_defaults(|options| options.set_default_operation(operation))
    }

    pub fn with_name_resolver(&mut self, resolver: impl NameResolver + 'static) -> &mut Self {
        self.set_defaults(|options| options.set_name_resolver(resolver))
    }

    pub fn with_property_accessor(
        &mut self,
        accessor: impl PropertyAccessor + 'static,
    ) -> &mut Self {
        self.set_defaults(|options| options.set_property_accessor(accessor))
    }

    pub fn skip_constructor(&mut self) -> &mut Self {
        self.set_defaults(Options::skip_constructor)
    }

    pub fn dont_skip_constructor(&mut self) -> &mut Self {
        self.set_defaults(Options::dont_skip_constructor)
    }

    pub fn ignore_null_properties(&mut self) -> &mut Self {
        self.set_defaults(|options| options.set_ignore_null_properties(true))
    }

    pub fn should_skip_constructor(&self) -> bool {
        self.options.should_skip_constructor()
    }

    /// Delegate the whole object population to `mapper`
    pub fn use_custom_mapper(&mut self, mapper: impl ObjectMapper + 'static) -> &mut Self {
        debug!("Custom mapper installed for {}", self.pair());
        self.custom_mapper = Some(Arc::new(mapper));
        self
    }

    pub fn provides_custom_mapper(&self) -> bool {
        self.custom_mapper.is_some()
    }

    pub fn custom_mapper(&self) -> Option<&dyn ObjectMapper> {
        self.custom_mapper.as_deref()
    }

    /// Whether the inverse pair was registered through `reverse_map`
    pub fn has_reverse(&self) -> bool {
        self.has_reverse
    }
}

impl fmt::Debug for Mapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapping")
            .field("source", &self.source.key())
            .field("destination", &self.destination.key())
            .field("operations", &self.operations)
            .field("options", &self.options)
            .field("custom_mapper", &self.custom_mapper.is_some())
            .field("has_reverse", &self.has_reverse)
            .finish()
    }
}

/// Fluent, typed handle on the `S -> D` mapping of a [`Registry`]
///
/// ```
/// use automap_core::{Mappable, Operation, Registry};
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
/// let mut registry = Registry::new();
/// registry
///     .register_mapping::<Source, Destination>()
///     .for_member("name", Operation::set_to("fixed"))?
///     .reverse_map();
///
/// assert!(registry.has_mapping::<Destination, Source>());
/// # Ok::<(), automap_core::Error>(())
/// ```
pub struct MappingBuilder<'a, S, D> {
    registry: &'a mut Registry,
    _types: PhantomData<fn() -> (S, D)>,
}

impl<'a, S: Mappable, D: Mappable> MappingBuilder<'a, S, D> {
    pub(crate) fn new(registry: &'a mut Registry) -> Self {
        registry.ensure_mapping::<S, D>();
        Self {
            registry,
            _types: PhantomData,
        }
    }

    /// The mapping being configured
    pub fn mapping(&mut self) -> &mut Mapping {
        self.registry.ensure_mapping::<S, D>()
    }

    pub fn for_member(mut self, property: impl Into<String>, operation: Operation) -> Result<Self> {
        self.mapping().for_member(property, operation)?;
        Ok(self)
    }

    /// Bare callback form of `for_member`, the callback receives the typed
    /// source
    pub fn for_member_from<T, F>(self, property: impl Into<String>, callback: F) -> Result<Self>
    where
        T: Serialize,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        self.for_member(property, Operation::map_from_source(callback))
    }

    pub fn set_defaults<F>(mut self, configure: F) -> Self
    where
        F: FnOnce(&mut Options),
    {
        self.mapping().set_defaults(configure);
        self
    }

    pub fn with_naming_conventions(
        mut self,
        source: impl NamingConvention + 'static,
        destination: impl NamingConvention + 'static,
    ) -> Self {
        self.mapping().with_naming_conventions(source, destination);
        self
    }

    pub fn with_default_operation(mut self, operation: Operation) -> Self {
        self.mapping().with_default_operation(operation);
        self
    }

    pub fn with_name_resolver(mut self, resolver: impl NameResolver + 'static) -> Self {
        self.mapping().with_name_resolver(resolver);
        self
    }

    pub fn with_property_accessor(mut self, accessor: impl PropertyAccessor + 'static) -> Self {
        self.mapping().with_property_accessor(accessor);
        self
    }

    pub fn skip_constructor(mut self) -> Self {
        self.mapping().skip_constructor();
        self
    }

    pub fn dont_skip_constructor(mut self) -> Self {
        self.mapping().dont_skip_constructor();
        self
    }

    pub fn ignore_null_properties(mut self) -> Self {
        self.mapping().ignore_null_properties();
        self
    }

    pub fn use_custom_mapper(mut self, mapper: impl ObjectMapper + 'static) -> Self {
        self.mapping().use_custom_mapper(mapper);
        self
    }

    /// Populate the destination with a typed closure instead of per-property
    /// operations
    pub fn use_custom_mapper_fn<F>(self, callback: F) -> Self
    where
        F: Fn(&S, &mut D) -> Result<()> + Send + Sync + 'static,
    {
        self.use_custom_mapper(TypedMapper::new(callback))
    }

    /// Register the inverse `D -> S` mapping with swapped naming conventions
    ///
    /// Registering it again is a no-op. Returns the builder of the inverse
    /// mapping.
    pub fn reverse_map(mut self) -> MappingBuilder<'a, D, S> {
        let forward = self.mapping();
        forward.has_reverse = true;
        let (source_convention, destination_convention) =
            forward.options.naming_convention_handles();

        let reverse_pair = TypePair::of::<D, S>();
        if !self.registry.has_mapping_for(&reverse_pair.source, &reverse_pair.destination) {
            debug!("Registering reverse mapping {}", reverse_pair);
            let reverse = self.registry.ensure_mapping::<D, S>();
            if source_convention.is_some() && destination_convention.is_some() {
                reverse
                    .options
                    .set_naming_convention_handles(destination_convention, source_convention);
            }
            reverse.has_reverse = true;
        }
        MappingBuilder::new(self.registry)
    }
}
