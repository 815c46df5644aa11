//! Adapter traits.

mod auth_provider;
mod data_provider;

pub use auth_provider::AuthProvider;
pub use data_provider::{DataProvider, ListOutput, ListParams, ReferenceParams, WriteMeta};
