//! Appwrite-backed implementations of the `gangway-core` contracts.
//!
//! This crate translates the generic CRUD/list and auth contracts into
//! calls against an Appwrite deployment's REST API:
//!
//! - [`AppwriteClient`]: the shared HTTP client (project header, optional
//!   API key, installed session secret, uniform error parsing).
//! - [`AppwriteDataProvider`]: the nine CRUD/list operations over one
//!   database, with resource-name to collection-id mapping.
//! - [`AppwriteAuthProvider`]: email/password sessions plus a persisted
//!   identity snapshot.
//! - [`AppwriteAdmin`]: server-side provisioning of databases, collections
//!   and attributes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gangway_core::{
//!     AuthProvider, CollectionId, Credentials, DataProvider, DatabaseId, Endpoint, ListParams,
//!     ResourceMap,
//! };
//! use gangway_appwrite::{AppwriteAuthProvider, AppwriteClient, AppwriteDataProvider, FileIdentityStore};
//!
//! # async fn example() -> gangway_core::Result<()> {
//! let client = Arc::new(AppwriteClient::new(
//!     Endpoint::new("https://cloud.appwrite.io/v1")?,
//!     "my-project",
//! ));
//!
//! let auth = AppwriteAuthProvider::new(client.clone(), FileIdentityStore::at_default_location()?);
//! auth.login(Credentials::new("jane@example.com", "hunter2")).await?;
//!
//! let data = AppwriteDataProvider::new(
//!     client,
//!     DatabaseId::new("admin")?,
//!     ResourceMap::new().with("customers", CollectionId::new("customers")?),
//! );
//! let page = data.get_list("customers", ListParams::default()).await?;
//! println!("{} of {} customers", page.data.len(), page.total);
//! # Ok(())
//! # }
//! ```

mod admin;
mod auth;
mod client;
mod endpoints;
mod provider;
mod queries;
mod store;
mod translate;

pub use admin::{AppwriteAdmin, RelationshipType};
pub use auth::{AppwriteAuthProvider, SessionHandle};
pub use client::AppwriteClient;
pub use provider::AppwriteDataProvider;
pub use queries::QueryExpression;
pub use store::FileIdentityStore;
pub use translate::{filter_queries, pagination_queries, sort_queries};
