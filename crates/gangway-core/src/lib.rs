//! gangway-core - Contract types and traits for the gangway admin adapter.
//!
//! The adapter translates a fixed admin-framework contract (list, get-one,
//! get-many, get-many-by-reference, create, update, update-many, delete,
//! delete-many, plus login/logout/check-auth/check-error/get-identity)
//! into calls against a document/auth backend. This crate holds the
//! contract shapes, validated identifier types, the record reshape, and
//! the error taxonomy; the HTTP implementation lives in
//! `gangway-appwrite`.

pub mod credentials;
pub mod error;
pub mod identity;
pub mod query;
pub mod record;
pub mod resources;
pub mod store;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use identity::Identity;
pub use query::{Filters, Pagination, Sort, SortOrder};
pub use record::Record;
pub use resources::ResourceMap;
pub use store::{IdentityStore, MemoryIdentityStore};
pub use traits::{AuthProvider, DataProvider, ListOutput, ListParams, ReferenceParams, WriteMeta};
pub use types::{CollectionId, DatabaseId, DocumentId, Endpoint, Permission, Role};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
