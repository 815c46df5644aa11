//! Generic list-query parameter shapes.
//!
//! These are the admin framework's `{field, order}`, `{page, perPage}` and
//! `{key: value}` shapes. They carry no backend knowledge; the translation
//! into backend query expressions lives in the backend implementation
//! crate.

use serde_json::Value;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// Sort direction. Always explicit; there is no default order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(InvalidInputError::Other {
                message: format!("invalid sort order '{}', expected ASC or DESC", s),
            }
            .into()),
        }
    }
}

/// A sort over one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }
}

/// 1-indexed pagination window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub per_page: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self { page, per_page }
    }

    /// Reject out-of-range windows before any backend call.
    ///
    /// # Errors
    ///
    /// Returns an error if `page < 1` or `per_page < 1`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.page < 1 {
            return Err(InvalidInputError::Pagination {
                reason: "page is 1-indexed and must be at least 1".to_string(),
            }
            .into());
        }
        if self.per_page < 1 {
            return Err(InvalidInputError::Pagination {
                reason: "per_page must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Zero-based offset of the first row in the window. An out-of-range
    /// `page` of 0 is treated as page 1; `validate()` is what rejects it.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
        }
    }
}

/// An ordered filter mapping.
///
/// Keys may carry an operator suffix (`price_gte`, `name_contains`, ...);
/// the backend translation layer interprets them. Input order is preserved
/// so translated expression lists are reproducible.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filters(Vec<(String, Value)>);

impl Filters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// Append a filter.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.push((key.into(), value.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over key/value pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl From<Vec<(String, Value)>> for Filters {
    fn from(pairs: Vec<(String, Value)>) -> Self {
        Self(pairs)
    }
}

impl FromIterator<(String, Value)> for Filters {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
