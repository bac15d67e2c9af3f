//! Resolved configuration for one mapping
//!
//! `Options` is a plain value. The registry owns the global defaults and each
//! mapping starts from a clone of them, so overriding a field on one mapping
//! never leaks into the defaults or into sibling mappings. Collaborators are
//! held behind `Arc`, which keeps cloning cheap.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::accessor::{DocumentAccessor, PropertyAccessor};
use crate::naming::NamingConvention;
use crate::operation::Operation;
use crate::resolver::{ConventionNameResolver, NameResolver};
use std::sync::Arc;

/// Naming, resolution, access and construction settings for a mapping
#[derive(Debug, Clone)]
pub struct Options {
    source_naming_convention: Option<Arc<dyn NamingConvention>>,
    destination_naming_convention: Option<Arc<dyn NamingConvention>>,
    name_resolver: Arc<dyn NameResolver>,
    default_operation: Operation,
    property_accessor: Option<Arc<dyn PropertyAccessor>>,
    skip_constructor: bool,
    ignore_null_properties: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source_naming_convention: None,
            destination_naming_convention: None,
            name_resolver: Arc::new(ConventionNameResolver),
            default_operation: Operation::Default,
            property_accessor: None,
            skip_constructor: true,
            ignore_null_properties: false,
        }
    }
}

impl Options {
    pub fn source_naming_convention(&self) -> Option<&dyn NamingConvention> {
        self.source_naming_convention.as_deref()
    }

    pub fn destination_naming_convention(&self) -> Option<&dyn NamingConvention> {
        self.destination_naming_convention.as_deref()
    }

    pub fn set_source_naming_convention(&mut self, convention: impl NamingConvention + 'static) {
        self.source_naming_convention = Some(Arc::new(convention));
    }

    pub fn set_destination_naming_convention(
        &mut self,
        convention: impl NamingConvention + 'static,
    ) {
        self.destination_naming_convention = Some(Arc::new(convention));
    }

    /// Set both conventions at once
    pub fn set_naming_conventions(
        &mut self,
        source: impl NamingConvention + 'static,
        destination: impl NamingConvention + 'static,
    ) {
        self.set_source_naming_convention(source);
        self.set_destination_naming_convention(destination);
    }

    /// Drop both conventions, reverting to name-for-name matching
    pub fn clear_naming_conventions(&mut self) {
        self.source_naming_convention = None;
        self.destination_naming_convention = None;
    }

    pub(crate) fn naming_convention_handles(
        &self,
    ) -> (
        Option<Arc<dyn NamingConvention>>,
        Option<Arc<dyn NamingConvention>>,
    ) {
        (
            self.source_naming_convention.clone(),
            self.destination_naming_convention.clone(),
        )
    }

    pub(crate) fn set_naming_convention_handles(
        &mut self,
        source: Option<Arc<dyn NamingConvention>>,
        destination: Option<Arc<dyn NamingConvention>>,
    ) {
        self.source_naming_convention = source;
        self.destination_naming_convention = destination;
    }

    pub fn name_resolver(&self) -> &dyn NameResolver {
        self.name_resolver.as_ref()
    }

    pub fn set_name_resolver(&mut self, resolver: impl NameResolver + 'static) {
        self.name_resolver = Arc::new(resolver);
    }

    pub fn default_operation(&self) -> &Operation {
        &self.default_operation
    }

    pub fn set_default_operation(&mut self, operation: Operation) {
        self.default_operation = operation;
    }

    /// The configured accessor, or the structural [`DocumentAccessor`]
    pub fn property_accessor(&self) -> &dyn PropertyAccessor {
        match &self.property_accessor {
            Some(accessor) => accessor.as_ref(),
            None => &DocumentAccessor,
        }
    }

    pub fn set_property_accessor(&mut self, accessor: impl PropertyAccessor + 'static) {
        self.property_accessor = Some(Arc::new(accessor));
    }

    pub fn should_skip_constructor(&self) -> bool {
        self.skip_constructor
    }

    pub fn skip_constructor(&mut self) {
        self.skip_constructor = true;
    }

    pub fn dont_skip_constructor(&mut self) {
        self.skip_constructor = false;
    }

    pub fn should_ignore_null_properties(&self) -> bool {
        self.ignore_null_properties
    }

    pub fn set_ignore_null_properties(&mut self, ignore: bool) {
        self.ignore_null_properties = ignore;
    }
}
