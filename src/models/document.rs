//! Document abstraction shared by every collection.
//!
//! A document is a plain serde-serializable record with no required fields.
//! The trait is what the CRUD factory is generic over: the repository,
//! service and route constructors all work for any `Document` implementor,
//! so adding a collection means adding a type and two constants.

use jiff_diesel::DateTime;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// A typed document stored in a named collection.
pub trait Document:
    Serialize + DeserializeOwned + Default + Clone + Send + Sync + Unpin + 'static
{
    /// Display name used in messages, e.g. "Product not found".
    const NAME: &'static str;

    /// Collection key in the store, e.g. "products".
    const COLLECTION: &'static str;

    /// Shallow-merges `patch` onto `self`.
    ///
    /// Every top-level field present in the patch replaces the corresponding
    /// field wholesale (nested sub-documents are not deep-merged); fields
    /// absent from the patch are left untouched.
    fn merge(&mut self, patch: Self);
}

/// A persisted document together with its store-assigned identity.
///
/// The timestamps are storage-internal bookkeeping; API responses expose
/// only the id and the document fields.
#[derive(Debug, Clone)]
pub struct DocumentRecord<T> {
    pub id: Uuid,
    pub data: T,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Replaces each destination field for which the patch carries `Some` value.
///
/// Used by `Document::merge` implementations; keeps the shallow-merge
/// contract in one place instead of hand-writing an `if` per field.
macro_rules! merge_present_fields {
    ($dst:expr, $patch:expr, { $($field:ident),+ $(,)? }) => {
        $(
            if let Some(value) = $patch.$field {
                $dst.$field = Some(value);
            }
        )+
    };
}

pub(crate) use merge_present_fields;
