//! Code for handling IDs
use serde::de::{Deserialize, Deserializer};

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Clone, std::hash::Hash, PartialEq, Eq, serde::Deserialize, Debug, serde::Serialize,
        )]
        /// An ID type (e.g. `CityID`, `SiteID`, etc.)
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Create a new ID from a string slice
            pub fn new(id: &str) -> Self {
                $name(std::rc::Rc::from(id))
            }
        }
    };
}
pub(crate) use define_id_type;

/// Indicates that the struct has an ID field
pub trait HasID<ID> {
    /// Get the struct's ID
    fn get_id(&self) -> &ID;
}

/// Implement the `HasID` trait for the given type, assuming it has a field called `id`
macro_rules! define_id_getter {
    ($t:ty, $id_ty:ty) => {
        impl crate::id::HasID<$id_ty> for $t {
            fn get_id(&self) -> &$id_ty {
                &self.id
            }
        }
    };
}
pub(crate) use define_id_getter;

/// An identifier as it appears in upstream records, which may be numeric or textual
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawID {
    Integer(i64),
    Text(String),
}

/// Read an ID which may be encoded either as a JSON integer or as a string.
///
/// Open Charge Map gives sites integer IDs, whereas the keys of the site duration map are always
/// strings, so both forms are normalised to the string representation.
pub fn deserialise_id<'de, D, ID>(deserialiser: D) -> Result<ID, D::Error>
where
    D: Deserializer<'de>,
    ID: From<String>,
{
    let id = match RawID::deserialize(deserialiser)? {
        RawID::Integer(value) => value.to_string(),
        RawID::Text(value) => value,
    };

    Ok(ID::from(id))
}
