//! Property access on object documents
//!
//! A [`PropertyAccessor`] reads, writes and probes named properties of an
//! object document. Documents are produced through serde, so the accessor sees
//! every serialized field no matter how it is declared in Rust.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::types::kind_of;
use crate::{Error, Result};
use serde_json::Value;
use std::fmt::Debug;

/// Visibility-agnostic get/set/has on named properties
pub trait PropertyAccessor: Debug + Send + Sync {
    /// Whether `object` carries a property called `name`
    fn has_property(&self, object: &Value, name: &str) -> bool;

    /// Read a property, `None` when it does not exist
    fn get_property(&self, object: &Value, name: &str) -> Option<Value>;

    /// Write a property, creating it when absent
    fn set_property(&self, object: &mut Value, name: &str, value: Value) -> Result<()>;
}

/// Structural accessor working directly on object keys
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentAccessor;

impl PropertyAccessor for DocumentAccessor {
    fn has_property(&self, object: &Value, name: &str) -> bool {
        object
            .as_object()
            .map(|fields| fields.contains_key(name))
            .unwrap_or(false)
    }

    fn get_property(&self, object: &Value, name: &str) -> Option<Value> {
        object.as_object()?.get(name).cloned()
    }

    fn set_property(&self, object: &mut Value, name: &str, value: Value) -> Result<()> {
        let kind = kind_of(object);
        match object.as_object_mut() {
            Some(fields) => {
                fields.insert(name.to_string(), value);
                Ok(())
            }
            None => Err(Error::Shape {
                type_name: kind.to_string(),
                message: format!("cannot set property '{}' on a non-object document", name),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::to_document;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    mod visibility {
        use serde::{Deserialize, Serialize};

        #[derive(Debug, Serialize, Deserialize)]
        pub struct Visibility {
            pub public_property: bool,
            pub(crate) protected_property: bool,
            private_property: bool,
        }

        impl Visibility {
            pub fn new() -> Self {
                Self {
                    public_property: true,
                    protected_property: true,
                    private_property: true,
                }
            }

            pub fn private_property(&self) -> bool {
                self.private_property
            }
        }
    }

    use visibility::Visibility;

    #[test]
    fn test_gets_properties_regardless_of_visibility() {
        let accessor = DocumentAccessor;
        let document = to_document(&Visibility::new()).unwrap();

        assert_eq!(accessor.get_property(&document, "public_property"), Some(json!(true)));
        assert_eq!(accessor.get_property(&document, "protected_property"), Some(json!(true)));
        assert_eq!(accessor.get_property(&document, "private_property"), Some(json!(true)));
        assert_eq!(accessor.get_property(&document, "no_property"), None);
    }

    #[test]
    fn test_sets_a_private_property() {
        let accessor = DocumentAccessor;
        let mut document = to_document(&Visibility::new()).unwrap();
        accessor
            .set_property(&mut document, "private_property", json!(false))
            .unwrap();

        let visibility: Visibility = serde_json::from_value(document).unwrap();
        assert!(!visibility.private_property());
        assert!(visibility.public_property);
    }

    #[test]
    fn test_checks_property_existence() {
        let accessor = DocumentAccessor;
        let document = to_document(&Visibility::new()).unwrap();

        assert!(accessor.has_property(&document, "public_property"));
        assert!(accessor.has_property(&document, "protected_property"));
        assert!(accessor.has_property(&document, "private_property"));
        assert!(!accessor.has_property(&document, "no_property"));
    }

    #[test]
    fn test_property_bags() {
        let accessor = DocumentAccessor;
        let mut bag = json!({"name": "Name"});

        assert!(accessor.has_property(&bag, "name"));
        assert!(!accessor.has_property(&bag, "no_name"));

        accessor.set_property(&mut bag, "name", json!("overridden")).unwrap();
        assert_eq!(bag["name"], "overridden");
    }

    #[test]
    fn test_null_valued_property_still_exists() {
        #[derive(Serialize, Deserialize)]
        struct Post {
            id: Option<u32>,
        }

        let accessor = DocumentAccessor;
        let document = to_document(&Post { id: None }).unwrap();
        assert!(accessor.has_property(&document, "id"));
        assert_eq!(accessor.get_property(&document, "id"), Some(Value::Null));
    }

    #[test]
    fn test_set_on_scalar_fails() {
        let accessor = DocumentAccessor;
        let mut scalar = json!(42);
        let err = accessor
            .set_property(&mut scalar, "name", json!("x"))
            .unwrap_err();
        assert!(matches!(err, Error::Shape { .. }));
        assert!(!accessor.has_property(&scalar, "name"));
    }
}
