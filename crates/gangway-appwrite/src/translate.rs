//! Translation of generic list parameters into backend query expressions.
//!
//! Pure functions with no knowledge of the resource schema. Filter keys
//! select their operator by suffix; a field whose real name ends in a
//! reserved suffix (e.g. a column literally called `status_eq`) cannot be
//! filtered verbatim; that ambiguity is inherent to the contract and is a
//! constraint on field naming, not something this layer second-guesses.

use serde_json::Value;

use gangway_core::error::InvalidInputError;
use gangway_core::{Filters, Pagination, Result, Sort, SortOrder};

use crate::queries::QueryExpression;

/// Emit exactly one sort expression. A sort on `id` targets the backend's
/// internal `$id` field, never an attribute literally named `id`.
pub fn sort_queries(sort: &Sort) -> Vec<QueryExpression> {
    let field = if sort.field == "id" {
        "$id"
    } else {
        sort.field.as_str()
    };
    vec![match sort.order {
        SortOrder::Asc => QueryExpression::order_asc(field),
        SortOrder::Desc => QueryExpression::order_desc(field),
    }]
}

/// Emit offset and limit expressions for a 1-indexed page window.
///
/// # Errors
///
/// Returns an invalid-input error for `page < 1` or `per_page < 1`,
/// before any backend call is made.
pub fn pagination_queries(pagination: &Pagination) -> Result<Vec<QueryExpression>> {
    pagination.validate()?;
    Ok(vec![
        QueryExpression::offset(pagination.offset()),
        QueryExpression::limit(u64::from(pagination.per_page)),
    ])
}

/// Translate a filter mapping into one expression per entry, preserving
/// input order.
pub fn filter_queries(filters: &Filters) -> Result<Vec<QueryExpression>> {
    filters
        .iter()
        .map(|(key, value)| filter_query(key, value))
        .collect()
}

/// Suffixes are matched exactly, in this order. `_gte`/`_lte` would also
/// end-match `_gt`/`_lt` under prefix logic; exact suffix matching keeps
/// them distinct.
fn filter_query(key: &str, value: &Value) -> Result<QueryExpression> {
    if let Some(field) = key.strip_suffix("_eq") {
        return Ok(QueryExpression::equal(field, value.clone()));
    }
    if let Some(field) = key.strip_suffix("_ne") {
        return Ok(QueryExpression::not_equal(field, value.clone()));
    }
    if let Some(field) = key.strip_suffix("_gte") {
        return Ok(QueryExpression::greater_than_equal(field, value.clone()));
    }
    if let Some(field) = key.strip_suffix("_gt") {
        return Ok(QueryExpression::greater_than(field, value.clone()));
    }
    if let Some(field) = key.strip_suffix("_lte") {
        return Ok(QueryExpression::less_than_equal(field, value.clone()));
    }
    if let Some(field) = key.strip_suffix("_lt") {
        return Ok(QueryExpression::less_than(field, value.clone()));
    }
    if let Some(field) = key.strip_suffix("_contains") {
        return Ok(QueryExpression::search(
            field,
            format!("%{}%", scalar_text(value)),
        ));
    }
    if let Some(field) = key.strip_suffix("_between") {
        let Value::Array(bounds) = value else {
            return Err(bad_between(key));
        };
        let [low, high] = bounds.as_slice() else {
            return Err(bad_between(key));
        };
        return Ok(QueryExpression::between(field, low.clone(), high.clone()));
    }
    if let Some(field) = key.strip_suffix("_isnull") {
        return Ok(QueryExpression::is_null(field));
    }
    if let Some(field) = key.strip_suffix("_isnotnull") {
        return Ok(QueryExpression::is_not_null(field));
    }
    if let Some(field) = key.strip_suffix("_startswith") {
        return Ok(QueryExpression::starts_with(field, value.clone()));
    }
    if let Some(field) = key.strip_suffix("_endswith") {
        return Ok(QueryExpression::ends_with(field, value.clone()));
    }

    // No recognized suffix: equality on the full key.
    Ok(QueryExpression::equal(key, value.clone()))
}

fn bad_between(key: &str) -> gangway_core::Error {
    InvalidInputError::Filter {
        key: key.to_string(),
        reason: "value must be an array of exactly two elements".to_string(),
    }
    .into()
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sort_on_id_uses_internal_id_field() {
        let queries = sort_queries(&Sort::new("id", SortOrder::Desc));
        assert_eq!(queries.len(), 1);
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"$id","method":"orderDesc"}"#
        );
    }

    #[test]
    fn sort_on_plain_field() {
        let queries = sort_queries(&Sort::new("last_seen", SortOrder::Asc));
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"last_seen","method":"orderAsc"}"#
        );
    }

    #[test]
    fn first_page_has_zero_offset() {
        let queries = pagination_queries(&Pagination::new(1, 10)).unwrap();
        assert_eq!(queries[0].as_str(), r#"{"method":"offset","values":[0]}"#);
        assert_eq!(queries[1].as_str(), r#"{"method":"limit","values":[10]}"#);
    }

    #[test]
    fn later_pages_multiply_out() {
        let queries = pagination_queries(&Pagination::new(3, 20)).unwrap();
        assert_eq!(queries[0].as_str(), r#"{"method":"offset","values":[40]}"#);
        assert_eq!(queries[1].as_str(), r#"{"method":"limit","values":[20]}"#);
    }

    #[test]
    fn out_of_range_pagination_is_rejected() {
        assert!(pagination_queries(&Pagination::new(0, 10)).is_err());
        assert!(pagination_queries(&Pagination::new(1, 0)).is_err());
    }

    #[test]
    fn comparison_suffixes() {
        let filters = Filters::new().with("price_gte", 10);
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"price","method":"greaterThanEqual","values":[10]}"#
        );

        let filters = Filters::new().with("price_gt", 10).with("price_lt", 20);
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"price","method":"greaterThan","values":[10]}"#
        );
        assert_eq!(
            queries[1].as_str(),
            r#"{"attribute":"price","method":"lessThan","values":[20]}"#
        );
    }

    #[test]
    fn lte_is_not_parsed_as_lt() {
        let filters = Filters::new().with("price_lte", 20);
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"price","method":"lessThanEqual","values":[20]}"#
        );
    }

    #[test]
    fn equality_suffixes() {
        let filters = Filters::new()
            .with("status_eq", "shipped")
            .with("status_ne", "cancelled");
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"status","method":"equal","values":["shipped"]}"#
        );
        assert_eq!(
            queries[1].as_str(),
            r#"{"attribute":"status","method":"notEqual","values":["cancelled"]}"#
        );
    }

    #[test]
    fn contains_wraps_value_in_percent_signs() {
        let filters = Filters::new().with("name_contains", "jane");
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"name","method":"search","values":["%jane%"]}"#
        );
    }

    #[test]
    fn between_requires_exactly_two_bounds() {
        let filters = Filters::new().with("total_between", json!([1, 2]));
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"total","method":"between","values":[1,2]}"#
        );

        let one = Filters::new().with("total_between", json!([1]));
        assert!(filter_queries(&one).is_err());

        let three = Filters::new().with("total_between", json!([1, 2, 3]));
        assert!(filter_queries(&three).is_err());

        let scalar = Filters::new().with("total_between", 1);
        assert!(filter_queries(&scalar).is_err());
    }

    #[test]
    fn null_check_suffixes() {
        let filters = Filters::new()
            .with("birthday_isnull", Value::Null)
            .with("email_isnotnull", Value::Null);
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"birthday","method":"isNull"}"#
        );
        assert_eq!(
            queries[1].as_str(),
            r#"{"attribute":"email","method":"isNotNull"}"#
        );
    }

    #[test]
    fn affix_suffixes() {
        let filters = Filters::new()
            .with("reference_startswith", "ORD-")
            .with("email_endswith", "@example.com");
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"reference","method":"startsWith","values":["ORD-"]}"#
        );
        assert_eq!(
            queries[1].as_str(),
            r#"{"attribute":"email","method":"endsWith","values":["@example.com"]}"#
        );
    }

    #[test]
    fn bare_key_is_equality_on_full_name() {
        let filters = Filters::new().with("city", "Paris");
        let queries = filter_queries(&filters).unwrap();
        assert_eq!(
            queries[0].as_str(),
            r#"{"attribute":"city","method":"equal","values":["Paris"]}"#
        );
    }

    #[test]
    fn output_preserves_filter_order() {
        let filters = Filters::new()
            .with("b", 1)
            .with("a_gte", 2)
            .with("c_isnull", Value::Null);
        let queries = filter_queries(&filters).unwrap();
        let rendered: Vec<&str> = queries.iter().map(|q| q.as_str()).collect();
        assert!(rendered[0].contains(r#""attribute":"b""#));
        assert!(rendered[1].contains(r#""attribute":"a""#));
        assert!(rendered[2].contains(r#""attribute":"c""#));
    }
}
