//! Per-property mapping operations
//!
//! Every destination property is produced by exactly one [`Operation`]. The
//! set of operations is closed; a mapping binds the operation to its own
//! [`Options`] through [`BoundOperation`] before it is applied.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::mapper::{Mapper, ObjectMapper};
use crate::options::Options;
use crate::types::{Mappable, TypeDescriptor, TypePair};
use crate::{Error, Result};
use log::trace;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Callback producing a destination value from the source document
pub type MapFromFn = dyn Fn(&Value) -> anyhow::Result<Value> + Send + Sync;

/// How a single destination property gets its value
#[derive(Clone, Default)]
pub enum Operation {
    /// Resolve the source name through the name resolver and copy the value
    #[default]
    Default,
    /// Leave the destination property untouched
    Ignore,
    /// Write the callback result unconditionally
    MapFrom(Arc<MapFromFn>),
    /// Copy from a fixed source property, bypassing name resolution
    FromProperty(String),
    /// Write a constant value
    SetTo(Value),
    /// Map the source value through another registered mapping
    MapTo(Delegate),
}

impl Operation {
    pub fn ignore() -> Self {
        Operation::Ignore
    }

    /// Callback over the raw source document
    pub fn map_from<F>(callback: F) -> Self
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        Operation::MapFrom(Arc::new(move |source| Ok(callback(source))))
    }

    /// Fallible callback over the raw source document
    pub fn try_map_from<F>(callback: F) -> Self
    where
        F: Fn(&Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Operation::MapFrom(Arc::new(callback))
    }

    /// Callback over the typed source object
    ///
    /// The source document is deserialized into `S` on every call and the
    /// result serialized back into a value.
    pub fn map_from_source<S, T, F>(callback: F) -> Self
    where
        S: DeserializeOwned,
        T: Serialize,
        F: Fn(&S) -> T + Send + Sync + 'static,
    {
        Operation::MapFrom(Arc::new(move |document| {
            let source: S = serde_json::from_value(document.clone())?;
            Ok(serde_json::to_value(callback(&source))?)
        }))
    }

    pub fn from_property(source_property: impl Into<String>) -> Self {
        Operation::FromProperty(source_property.into())
    }

    pub fn set_to(value: impl Into<Value>) -> Self {
        Operation::SetTo(value.into())
    }

    /// Map the property through the registered `S -> D` mapping of the
    /// mapper executing the outer mapping
    pub fn map_to<S: Mappable, D: Mappable>() -> Self {
        Operation::MapTo(Delegate {
            pair: TypePair::of::<S, D>(),
            destination: TypeDescriptor::of::<D>(),
            mapper: None,
        })
    }

    /// Map the property with an explicit mapper
    pub fn map_to_with<S: Mappable, D: Mappable>(mapper: impl ObjectMapper + 'static) -> Self {
        Operation::MapTo(Delegate {
            pair: TypePair::of::<S, D>(),
            destination: TypeDescriptor::of::<D>(),
            mapper: Some(Arc::new(mapper)),
        })
    }

    /// Short name of the variant
    pub fn kind(&self) -> &'static str {
        match self {
            Operation::Default => "default",
            Operation::Ignore => "ignore",
            Operation::MapFrom(_) => "map_from",
            Operation::FromProperty(_) => "from_property",
            Operation::SetTo(_) => "set_to",
            Operation::MapTo(_) => "map_to",
        }
    }
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Default => f.write_str("Default"),
            Operation::Ignore => f.write_str("Ignore"),
            Operation::MapFrom(_) => f.write_str("MapFrom(<callback>)"),
            Operation::FromProperty(name) => f.debug_tuple("FromProperty").field(name).finish(),
            Operation::SetTo(value) => f.debug_tuple("SetTo").field(value).finish(),
            Operation::MapTo(delegate) => f.debug_tuple("MapTo").field(delegate).finish(),
        }
    }
}

/// Target of a [`Operation::MapTo`]
#[derive(Clone)]
pub struct Delegate {
    pair: TypePair,
    destination: TypeDescriptor,
    mapper: Option<Arc<dyn ObjectMapper>>,
}

impl Delegate {
    pub fn pair(&self) -> &TypePair {
        &self.pair
    }

    pub fn has_explicit_mapper(&self) -> bool {
        self.mapper.is_some()
    }
}

impl fmt::Debug for Delegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delegate")
            .field("pair", &self.pair)
            .field("explicit_mapper", &self.mapper.is_some())
            .finish()
    }
}

/// Write-once memo of resolved source property names, keyed by destination
/// property
#[derive(Debug, Default)]
pub(crate) struct NameMemo {
    names: RwLock<HashMap<String, String>>,
}

impl NameMemo {
    fn get_or_resolve<F>(&self, property: &str, resolve: F) -> Result<String>
    where
        F: FnOnce() -> Result<String>,
    {
        if let Some(name) = self
            .names
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(property)
        {
            return Ok(name.clone());
        }

        let name = resolve()?;
        self.names
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(property.to_string())
            .or_insert_with(|| name.clone());
        Ok(name)
    }

    pub(crate) fn clear(&mut self) {
        self.names
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// An operation bound to the options of the mapping that owns it
#[derive(Debug, Clone, Copy)]
pub struct BoundOperation<'a> {
    operation: &'a Operation,
    options: &'a Options,
    names: &'a NameMemo,
}

impl<'a> BoundOperation<'a> {
    pub(crate) fn new(operation: &'a Operation, options: &'a Options, names: &'a NameMemo) -> Self {
        Self {
            operation,
            options,
            names,
        }
    }

    pub fn operation(&self) -> &'a Operation {
        self.operation
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    /// Source property feeding `property`
    ///
    /// A fixed `FromProperty` name wins; otherwise the name resolver decides
    /// and the answer is memoized for the owning mapping.
    pub fn source_property_name(&self, property: &str) -> Result<String> {
        if let Operation::FromProperty(name) = self.operation {
            return Ok(name.clone());
        }
        self.names.get_or_resolve(property, || {
            self.options
                .name_resolver()
                .resolve(property, self.operation, self.options)
        })
    }

    /// Produce `property` on `destination` from `source`
    ///
    /// `mapper` executes nested mappings for [`Operation::MapTo`].
    pub fn apply(
        &self,
        property: &str,
        source: &Value,
        destination: &mut Value,
        mapper: &Mapper,
    ) -> Result<()> {
        let accessor = self.options.property_accessor();
        match self.operation {
            Operation::Ignore => Ok(()),
            Operation::Default | Operation::FromProperty(_) => {
                let source_property = self.source_property_name(property)?;
                match self.read_source(source, &source_property, property) {
                    Some(value) => accessor.set_property(destination, property, value),
                    None => Ok(()),
                }
            }
            Operation::MapFrom(callback) => {
                let value = (**callback)(source).map_err(|err| Error::Callback {
                    property: property.to_string(),
                    source: err,
                })?;
                accessor.set_property(destination, property, value)
            }
            Operation::SetTo(value) => accessor.set_property(destination, property, value.clone()),
            Operation::MapTo(delegate) => {
                let source_property = self.source_property_name(property)?;
                let value = match self.read_source(source, &source_property, property) {
                    Some(value) => value,
                    None => return Ok(()),
                };
                let mapped = match value {
                    Value::Null => Value::Null,
                    Value::Array(items) => Value::Array(
                        items
                            .iter()
                            .map(|item| self.map_nested(delegate, item, mapper))
                            .collect::<Result<Vec<_>>>()?,
                    ),
                    other => self.map_nested(delegate, &other, mapper)?,
                };
                accessor.set_property(destination, property, mapped)
            }
        }
    }

    /// Read the source value, `None` when the write should be skipped
    fn read_source(&self, source: &Value, source_property: &str, property: &str) -> Option<Value> {
        let accessor = self.options.property_accessor();
        if !accessor.has_property(source, source_property) {
            trace!(
                "No source property '{}' for '{}', skipping",
                source_property,
                property
            );
            return None;
        }

        let value = accessor.get_property(source, source_property)?;
        if value.is_null() && self.options.should_ignore_null_properties() {
            trace!("Ignoring null source property '{}'", source_property);
            return None;
        }
        Some(value)
    }

    fn map_nested(&self, delegate: &Delegate, item: &Value, mapper: &Mapper) -> Result<Value> {
        match &delegate.mapper {
            Some(explicit) => {
                let destination = delegate
                    .destination
                    .instantiate(self.options.should_skip_constructor())?;
                explicit.map_document(item, destination, &delegate.pair)
            }
            None => mapper.map_new_document(item, &delegate.pair),
        }
    }
}
