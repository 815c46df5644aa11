//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use gangway_appwrite::AppwriteDataProvider;
use gangway_core::{
    CollectionId, DataProvider, DatabaseId, Filters, ListParams, Pagination, ResourceMap, Sort,
    SortOrder,
};

use crate::commands::ConnectionArgs;
use crate::output;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Resource name to list
    pub resource: String,

    /// Database id
    #[arg(long, env = "APPWRITE_DATABASE_ID", default_value = "admin")]
    pub database: String,

    /// Collection id (defaults to the resource name)
    #[arg(long)]
    pub collection: Option<String>,

    /// Page number (1-indexed)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Documents per page
    #[arg(long, default_value_t = 10)]
    pub per_page: u32,

    /// Field to sort by
    #[arg(long)]
    pub sort: String,

    /// Sort direction (asc or desc)
    #[arg(long, default_value = "asc")]
    pub order: String,

    /// Filter as key=value; repeatable. Keys take operator suffixes
    /// (e.g. price_gte=10, name_contains=jane)
    #[arg(long = "filter", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let client = args.connection.client()?;

    let database = DatabaseId::new(&args.database).context("Invalid database id")?;
    let collection_id = args.collection.as_deref().unwrap_or(&args.resource);
    let collection = CollectionId::new(collection_id).context("Invalid collection id")?;
    let resources = ResourceMap::new().with(&args.resource, collection);

    let provider = AppwriteDataProvider::new(client, database, resources);

    let order: SortOrder = args
        .order
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid sort order: {}", e))?;

    let params = ListParams {
        pagination: Some(Pagination::new(args.page, args.per_page)),
        sort: Some(Sort::new(&args.sort, order)),
        filters: parse_filters(&args.filters)?,
    };

    let result = provider
        .get_list(&args.resource, params)
        .await
        .context("Failed to list documents")?;

    output::json_pretty(&result)?;
    eprintln!();
    output::field("Total", &result.total.to_string());

    Ok(())
}

/// Parse `key=value` pairs. Values that parse as JSON are kept typed;
/// anything else is a plain string.
fn parse_filters(pairs: &[String]) -> Result<Filters> {
    let mut filters = Filters::new();
    for pair in pairs {
        let (key, raw) = pair
            .split_once('=')
            .with_context(|| format!("Invalid filter '{}', expected KEY=VALUE", pair))?;
        let value = raw
            .parse::<Value>()
            .unwrap_or_else(|_| Value::String(raw.to_string()));
        filters.push(key, value);
    }
    Ok(filters)
}
