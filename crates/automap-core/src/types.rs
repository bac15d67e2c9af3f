//! Type identifiers and the object collaborator interface
//!
//! The engine never touches concrete Rust types directly. Registered types are
//! described by a [`TypeDescriptor`] captured once at registration time, and
//! instances travel through the engine in their serde document form.
//!
//! Copyright (c) 2025 Automap Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use serde::Serialize;
use serde_json::{Map, Value};
use std::any::TypeId;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Stable handle naming a concrete Rust type
///
/// Equality and hashing only consider the [`TypeId`]; the name is kept for
/// diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for the type `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying type id
    pub fn id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Ordered (source, destination) pair identifying one mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypePair {
    pub source: TypeKey,
    pub destination: TypeKey,
}

impl TypePair {
    pub fn new(source: TypeKey, destination: TypeKey) -> Self {
        Self { source, destination }
    }

    /// Pair for the types `S` and `D`
    pub fn of<S: 'static, D: 'static>() -> Self {
        Self::new(TypeKey::of::<S>(), TypeKey::of::<D>())
    }

    /// The inverse pair (destination, source)
    pub fn reversed(&self) -> Self {
        Self::new(self.destination, self.source)
    }
}

impl fmt::Display for TypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// A type the engine can read from and write into
///
/// Field access goes through serde, so private fields take part in mapping
/// exactly like public ones. `construct` is the regular initializer; when a
/// mapping skips the constructor the instance comes from `Default::default()`
/// instead.
///
/// Fields serde does not round-trip (`#[serde(skip)]`) are invisible to the
/// engine. When mapping onto an existing object they are reset to their
/// default unless the type overrides [`Mappable::assign_mapped`].
pub trait Mappable: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    /// Build an instance through the type's initializer
    fn construct() -> Self {
        Self::default()
    }

    /// Names of the declared properties
    ///
    /// The union of the field names serde deserializes and the keys of the
    /// serialized default instance, so fields skipped on serialization by
    /// `skip_serializing_if` are still declared.
    fn declared_properties() -> Vec<String> {
        let mut names: BTreeSet<String> = deserialized_field_names::<Self>()
            .iter()
            .map(|name| name.to_string())
            .collect();
        if let Ok(Value::Object(fields)) = serde_json::to_value(Self::default()) {
            names.extend(fields.keys().cloned());
        }
        names.into_iter().collect()
    }

    /// Open property bags accept any property name
    fn is_dynamic() -> bool {
        false
    }

    /// Store a freshly mapped value into an existing instance
    ///
    /// Called by in-place mapping. Override it to carry over state serde
    /// does not see.
    fn assign_mapped(&mut self, mapped: Self) {
        *self = mapped;
    }
}

/// Untyped property bag, usable as source or destination of any mapping
impl Mappable for Map<String, Value> {
    fn declared_properties() -> Vec<String> {
        Vec::new()
    }

    fn is_dynamic() -> bool {
        true
    }
}

/// Type-erased description of a [`Mappable`] type
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    key: TypeKey,
    properties: Vec<String>,
    dynamic: bool,
    construct: fn() -> Result<Value>,
    construct_bare: fn() -> Result<Value>,
}

impl TypeDescriptor {
    /// Describe the type `T`
    pub fn of<T: Mappable>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            properties: T::declared_properties(),
            dynamic: T::is_dynamic(),
            construct: construct_document::<T>,
            construct_bare: construct_bare_document::<T>,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Declared property names
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Whether `property` is declared on this type
    pub fn declares(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }

    /// Build a fresh instance document, bypassing the initializer when
    /// `skip_constructor` is set
    pub fn instantiate(&self, skip_constructor: bool) -> Result<Value> {
        if skip_constructor {
            (self.construct_bare)()
        } else {
            (self.construct)()
        }
    }
}

fn construct_document<T: Mappable>() -> Result<Value> {
    to_document(&T::construct())
}

fn construct_bare_document<T: Mappable>() -> Result<Value> {
    to_document(&T::default())
}

/// Serialize a value into its object document
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    match serde_json::to_value(value)? {
        document @ Value::Object(_) => Ok(document),
        other => Err(Error::Shape {
            type_name: std::any::type_name::<T>().to_string(),
            message: format!("expected an object document, found {}", kind_of(&other)),
        }),
    }
}

/// Deserialize an object document back into `T`
pub fn from_document<T: DeserializeOwned>(document: Value) -> Result<T> {
    Ok(serde_json::from_value(document)?)
}

/// Field names a struct's `Deserialize` impl asks for
///
/// Empty for anything that does not deserialize as a plain struct (maps,
/// newtypes, flattened or hand-written impls).
fn deserialized_field_names<T: DeserializeOwned>() -> &'static [&'static str] {
    let mut fields: &'static [&'static str] = &[];
    let _ = T::deserialize(FieldNames {
        fields: &mut fields,
    });
    fields
}

/// Deserializer that records the field list of `deserialize_struct` and
/// produces nothing
struct FieldNames<'a> {
    fields: &'a mut &'static [&'static str],
}

impl<'de> Deserializer<'de> for FieldNames<'_> {
    type Error = de::value::Error;

    fn deserialize_any<V: Visitor<'de>>(
        self,
        _visitor: V,
    ) -> std::result::Result<V::Value, Self::Error> {
        Err(de::Error::custom("not a struct"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> std::result::Result<V::Value, Self::Error> {
        *self.fields = fields;
        Err(de::Error::custom("field names recorded"))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct Account {
        id: Option<u64>,
        owner: String,
        balance: i64,
    }

    impl Mappable for Account {
        fn construct() -> Self {
            Self {
                id: Some(7),
                ..Self::default()
            }
        }
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Wrapper(u32);

    impl Mappable for Wrapper {}

    #[test]
    fn test_type_key_equality_ignores_name() {
        assert_eq!(TypeKey::of::<Account>(), TypeKey::of::<Account>());
        assert_ne!(TypeKey::of::<Account>(), TypeKey::of::<Wrapper>());
        assert!(TypeKey::of::<Account>().name().ends_with("Account"));
    }

    #[test]
    fn test_pair_reversal() {
        let pair = TypePair::of::<Account, Wrapper>();
        let reversed = pair.reversed();
        assert_eq!(reversed.source, TypeKey::of::<Wrapper>());
        assert_eq!(reversed.destination, TypeKey::of::<Account>());
        assert_eq!(reversed.reversed(), pair);
    }

    #[test]
    fn test_declared_properties() {
        let descriptor = TypeDescriptor::of::<Account>();
        let mut properties = descriptor.properties().to_vec();
        properties.sort();
        assert_eq!(properties, vec!["balance", "id", "owner"]);
        assert!(descriptor.declares("owner"));
        assert!(!descriptor.declares("name"));
        assert!(!descriptor.is_dynamic());
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Profile {
        display_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        nick_name: Option<String>,
        #[serde(skip)]
        cache: u32,
    }

    impl Mappable for Profile {}

    #[test]
    fn test_declared_properties_include_fields_skipped_on_serialization() {
        let descriptor = TypeDescriptor::of::<Profile>();
        assert_eq!(descriptor.properties(), ["displayName", "nickName"]);
        assert!(!descriptor.declares("cache"));
    }

    #[test]
    fn test_deserialized_field_names() {
        let mut names = deserialized_field_names::<Account>().to_vec();
        names.sort_unstable();
        assert_eq!(names, ["balance", "id", "owner"]);
        assert!(deserialized_field_names::<Wrapper>().is_empty());
        assert!(deserialized_field_names::<Map<String, Value>>().is_empty());
    }

    #[test]
    fn test_instantiate_honours_skip_constructor() {
        let descriptor = TypeDescriptor::of::<Account>();
        let constructed = descriptor.instantiate(false).unwrap();
        let bare = descriptor.instantiate(true).unwrap();
        assert_eq!(constructed["id"], 7);
        assert_eq!(bare["id"], Value::Null);
    }

    #[test]
    fn test_property_bag_is_dynamic() {
        let descriptor = TypeDescriptor::of::<Map<String, Value>>();
        assert!(descriptor.is_dynamic());
        assert!(descriptor.properties().is_empty());
        assert_eq!(descriptor.instantiate(true).unwrap(), Value::Object(Map::new()));
    }

    #[test]
    fn test_non_object_documents_are_rejected() {
        let err = to_document(&Wrapper(3)).unwrap_err();
        assert!(matches!(err, Error::Shape { .. }));
        assert!(err.to_string().contains("found number"));
    }
}
