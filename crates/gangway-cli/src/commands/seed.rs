//! Seed command implementation.
//!
//! Provisions the demo database: collections, typed attributes, one
//! relationship, and a generated retail dataset.

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::warn;

use gangway_appwrite::{AppwriteAdmin, RelationshipType};
use gangway_core::{CollectionId, DatabaseId, Permission, Role};

use crate::commands::ConnectionArgs;
use crate::data;
use crate::output;

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// Database id to create
    #[arg(long, env = "APPWRITE_DATABASE_ID", default_value = "admin")]
    pub database: String,

    /// Delete and recreate the database if it already exists
    #[arg(long)]
    pub force: bool,

    /// Abort after this many failed document inserts
    #[arg(long, default_value_t = 5)]
    pub max_errors: u32,

    /// Seed for the sample data generator (random when omitted)
    #[arg(long)]
    pub rng_seed: Option<u64>,

    #[command(flatten)]
    pub connection: ConnectionArgs,
}

#[derive(Clone, Copy)]
enum Kind {
    Str(u32),
    Int,
    Float,
    Bool,
    Date,
}

struct Attr {
    key: &'static str,
    kind: Kind,
    required: bool,
    array: bool,
}

const fn attr(key: &'static str, kind: Kind) -> Attr {
    Attr {
        key,
        kind,
        required: false,
        array: false,
    }
}

const fn required(key: &'static str, kind: Kind) -> Attr {
    Attr {
        key,
        kind,
        required: true,
        array: false,
    }
}

/// Collection schemas, in creation order.
fn schema() -> Vec<(&'static str, Vec<Attr>)> {
    vec![
        (
            "baskets",
            vec![attr("product_id", Kind::Int), attr("quantity", Kind::Int)],
        ),
        (
            "orders",
            vec![
                required("id", Kind::Int),
                required("reference", Kind::Str(100)),
                attr("date", Kind::Date),
                attr("customer_id", Kind::Int),
                attr("total_ex_taxes", Kind::Float),
                attr("delivery_fees", Kind::Float),
                attr("tax_rate", Kind::Float),
                attr("taxes", Kind::Float),
                attr("total", Kind::Float),
                attr("status", Kind::Str(100)),
                attr("returned", Kind::Bool),
            ],
        ),
        (
            "customers",
            vec![
                required("id", Kind::Int),
                attr("first_name", Kind::Str(100)),
                attr("last_name", Kind::Str(100)),
                attr("email", Kind::Str(100)),
                attr("address", Kind::Str(100)),
                attr("zipcode", Kind::Str(100)),
                attr("city", Kind::Str(100)),
                attr("stateAbbr", Kind::Str(100)),
                attr("avatar", Kind::Str(100)),
                attr("birthday", Kind::Str(100)),
                attr("first_seen", Kind::Date),
                attr("last_seen", Kind::Date),
                attr("has_ordered", Kind::Bool),
                attr("latest_purchase", Kind::Date),
                attr("has_newsletter", Kind::Bool),
                Attr {
                    key: "groups",
                    kind: Kind::Str(100),
                    required: false,
                    array: true,
                },
                attr("nb_orders", Kind::Int),
                attr("total_spent", Kind::Float),
            ],
        ),
        (
            "categories",
            vec![required("id", Kind::Int), required("name", Kind::Str(100))],
        ),
        (
            "products",
            vec![
                required("id", Kind::Int),
                attr("category_id", Kind::Int),
                required("reference", Kind::Str(100)),
                attr("width", Kind::Float),
                attr("height", Kind::Float),
                attr("price", Kind::Float),
                attr("thumbnail", Kind::Str(100)),
                attr("image", Kind::Str(100)),
                attr("description", Kind::Str(5000)),
                attr("stock", Kind::Int),
                attr("sales", Kind::Float),
            ],
        ),
        (
            "invoices",
            vec![
                required("id", Kind::Int),
                attr("date", Kind::Date),
                attr("order_id", Kind::Int),
                attr("customer_id", Kind::Int),
                attr("total_ex_taxes", Kind::Float),
                attr("delivery_fees", Kind::Float),
                attr("tax_rate", Kind::Float),
                attr("taxes", Kind::Float),
                attr("total", Kind::Float),
            ],
        ),
        (
            "reviews",
            vec![
                required("id", Kind::Int),
                attr("date", Kind::Date),
                attr("status", Kind::Str(100)),
                attr("order_id", Kind::Int),
                attr("product_id", Kind::Int),
                attr("customer_id", Kind::Int),
                attr("rating", Kind::Int),
                attr("comment", Kind::Str(2000)),
            ],
        ),
    ]
}

fn seed_permissions() -> Vec<Permission> {
    vec![
        Permission::read(Role::Users),
        Permission::write(Role::Users),
        Permission::update(Role::Users),
        Permission::delete(Role::Users),
    ]
}

pub async fn run(args: SeedArgs) -> Result<()> {
    let client = args.connection.admin_client()?;
    let admin = AppwriteAdmin::new(client);
    let database = DatabaseId::new(&args.database).context("Invalid database id")?;

    if admin.database_exists(&database).await? {
        if args.force {
            output::warning(&format!(
                "Database \"{}\" already exists, deleting it",
                args.database
            ));
            admin.delete_database(&database).await?;
        } else {
            output::warning(&format!(
                "Database \"{}\" already exists. Use --force to recreate it.",
                args.database
            ));
            return Ok(());
        }
    }

    eprintln!(
        "{}",
        format!("Creating database \"{}\"...", args.database).dimmed()
    );
    admin.create_database(&database, &args.database).await?;

    let permissions = seed_permissions();

    for (name, attributes) in schema() {
        eprintln!(
            "{}",
            format!("Creating collection \"{}\"...", name).dimmed()
        );
        let collection = CollectionId::new(name)?;
        admin
            .create_collection(&database, &collection, name, &permissions)
            .await?;

        for a in attributes {
            match a.kind {
                Kind::Str(size) => {
                    admin
                        .create_string_attribute(
                            &database, &collection, a.key, size, a.required, a.array,
                        )
                        .await?
                }
                Kind::Int => {
                    admin
                        .create_integer_attribute(&database, &collection, a.key, a.required)
                        .await?
                }
                Kind::Float => {
                    admin
                        .create_float_attribute(&database, &collection, a.key, a.required)
                        .await?
                }
                Kind::Bool => {
                    admin
                        .create_boolean_attribute(&database, &collection, a.key, a.required)
                        .await?
                }
                Kind::Date => {
                    admin
                        .create_datetime_attribute(&database, &collection, a.key, a.required)
                        .await?
                }
            }
        }
    }

    admin
        .create_relationship_attribute(
            &database,
            &CollectionId::new("orders")?,
            &CollectionId::new("baskets")?,
            "basket",
            RelationshipType::OneToMany,
        )
        .await?;

    // The backend applies attributes asynchronously; inserting too early
    // rejects documents with unknown-attribute errors.
    eprintln!("{}", "Waiting for the schema to settle...".dimmed());
    tokio::time::sleep(Duration::from_secs(10)).await;

    let mut rng = match args.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let dataset = data::generate(&mut rng);

    let mut errors = 0u32;
    let mut inserted = 0u64;
    for (name, documents) in dataset.collections() {
        eprintln!(
            "{}",
            format!("Inserting data into collection \"{}\"...", name).dimmed()
        );
        let collection = CollectionId::new(name)?;

        for item in documents {
            let id = item["id"]
                .as_u64()
                .filter(|id| *id > 0)
                .map(|id| id.to_string());

            match admin
                .create_document(&database, &collection, id.as_deref(), item, &permissions)
                .await
            {
                Ok(_) => inserted += 1,
                Err(err) => {
                    warn!(error = %err, collection = name, "Failed to insert document");
                    errors += 1;
                    if errors >= args.max_errors {
                        anyhow::bail!("Reached the maximum error limit of {}", args.max_errors);
                    }
                }
            }
        }
    }

    output::success(&format!(
        "Seeded {} documents into database \"{}\"",
        inserted, args.database
    ));
    if errors > 0 {
        output::warning(&format!("{} documents failed to insert", errors));
    }

    Ok(())
}
