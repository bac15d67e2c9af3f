//! Automap Core - Convention-based object mapping engine
//!
//! This crate copies data between objects of two types by following
//! property-name conventions, with per-member overrides where the
//! conventions are not enough.
//!
//! # Main Components
//!
//! - **Registry**: Type-pair keyed store of [`Mapping`]s plus global default [`Options`]
//! - **Operations**: How a destination property gets its value ([`Operation`])
//! - **Naming**: Conventions and resolvers translating property names between types
//! - **Mapper**: Executes registered mappings on typed values or raw documents
//! - **Configuration**: Default options loaded from JSON ([`OptionsConfig`])
//!
//! Types take part by implementing [`Mappable`]; the engine works on their
//! serde representation, so private fields are mapped like public ones.
//!
//! # Example
//!
//! ```
//! use automap_core::{Mappable, Mapper, Result};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct Post {
//!     title: String,
//!     body: String,
//! }
//! impl Mappable for Post {}
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct PostView {
//!     title: String,
//!     summary: String,
//! }
//! impl Mappable for PostView {}
//!
//! fn example() -> Result<()> {
//!     let mapper = Mapper::initialize(|registry| {
//!         registry
//!             .register_mapping::<Post, PostView>()
//!             .for_member_from("summary", |post: &Post| {
//!                 post.body.chars().take(5).collect::<String>()
//!             })?;
//!         Ok(())
//!     })?;
//!
//!     let post = Post { title: "Hello".into(), body: "Lorem ipsum".into() };
//!     let view: PostView = mapper.map(&post)?;
//!     assert_eq!(view.title, "Hello");
//!     assert_eq!(view.summary, "Lorem");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

pub mod accessor;
pub mod config;
pub mod error;
pub mod mapper;
pub mod mapping;
pub mod naming;
pub mod operation;
pub mod options;
pub mod registry;
pub mod resolver;
pub mod types;

#[cfg(test)]
pub mod proptest_strategies;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use types::{from_document, to_document, Mappable, TypeDescriptor, TypeKey, TypePair};

pub use accessor::{DocumentAccessor, PropertyAccessor};
pub use config::{NamingConventionKind, OptionsConfig};
pub use mapper::{Mapper, ObjectMapper, TypedMapper};
pub use mapping::{Mapping, MappingBuilder};
pub use naming::{
    CamelCaseNamingConvention, IdentityNamingConvention, KebabCaseNamingConvention,
    NamingConvention, PascalCaseNamingConvention, SnakeCaseNamingConvention,
};
pub use operation::{BoundOperation, Delegate, Operation};
pub use options::Options;
pub use registry::Registry;
pub use resolver::{
    CallbackNameResolver, ConventionNameResolver, IdentityNameResolver, NameResolver,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_error_creation() {
        let err = Error::unregistered("Source", "Destination");
        assert!(err.to_string().contains("Source"));
        assert!(err.is_unregistered_mapping());
    }

    #[test]
    fn test_default_options() {
        let options = Options::default();
        assert!(options.should_skip_constructor());
        assert!(!options.should_ignore_null_properties());
    }
}
