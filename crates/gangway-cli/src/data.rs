//! Sample retail data generation for the seed command.
//!
//! Produces a small interconnected dataset (customers, categories,
//! products, orders, invoices, reviews) with numeric ids starting at 1,
//! so documents can reuse them as their backend document id.

use chrono::{Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};

const CUSTOMER_COUNT: usize = 50;
const PRODUCTS_PER_CATEGORY: usize = 8;
const ORDER_COUNT: usize = 80;
const REVIEW_COUNT: usize = 60;

const CATEGORY_NAMES: &[&str] = &["animals", "beauty", "clothes", "food", "games", "tools"];

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Amelia", "Oliver", "Sophia", "Elijah", "Charlotte",
    "Lucas", "Isabella", "Mason", "Mia", "Ethan", "Harper", "James", "Ada", "Omar", "Yuki",
    "Priya",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Garcia", "Martin", "Dubois", "Bernard", "Rossi", "Nguyen", "Kim",
    "Tanaka", "Silva", "Kowalski", "Andersen", "Novak", "Haddad", "Okafor",
];

const CITIES: &[(&str, &str)] = &[
    ("Portland", "OR"),
    ("Austin", "TX"),
    ("Madison", "WI"),
    ("Burlington", "VT"),
    ("Asheville", "NC"),
    ("Boulder", "CO"),
    ("Ann Arbor", "MI"),
    ("Savannah", "GA"),
];

const ORDER_STATUSES: &[&str] = &["ordered", "delivered", "delivered", "delivered", "cancelled"];

const REVIEW_STATUSES: &[&str] = &["accepted", "accepted", "accepted", "pending", "rejected"];

const REVIEW_COMMENTS: &[&str] = &[
    "Exactly as described, would buy again.",
    "Arrived late but the quality makes up for it.",
    "Not what I expected from the photos.",
    "Great value for the price.",
    "The packaging was damaged but the product was fine.",
    "Five stars, my third order from this shop.",
    "Stopped working after a week.",
    "Perfect gift, the recipient loved it.",
];

/// A generated dataset. Collection vectors are ordered so that anything
/// referenced by id appears before its referrers.
pub struct Dataset {
    pub customers: Vec<Value>,
    pub categories: Vec<Value>,
    pub products: Vec<Value>,
    pub orders: Vec<Value>,
    pub invoices: Vec<Value>,
    pub reviews: Vec<Value>,
}

impl Dataset {
    /// Collections in insertion order, paired with their documents.
    pub fn collections(&self) -> [(&'static str, &[Value]); 6] {
        [
            ("customers", self.customers.as_slice()),
            ("categories", self.categories.as_slice()),
            ("products", self.products.as_slice()),
            ("orders", self.orders.as_slice()),
            ("invoices", self.invoices.as_slice()),
            ("reviews", self.reviews.as_slice()),
        ]
    }
}

pub fn generate(rng: &mut impl Rng) -> Dataset {
    let customers = customers(rng);
    let categories = categories();
    let products = products(rng, categories.len());
    let orders = orders(rng, customers.len(), products.len());
    let invoices = invoices(&orders);
    let reviews = reviews(rng, customers.len(), products.len(), orders.len());

    Dataset {
        customers,
        categories,
        products,
        orders,
        invoices,
        reviews,
    }
}

fn past_date(rng: &mut impl Rng, max_days_ago: i64) -> String {
    let days = rng.gen_range(0..max_days_ago);
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

fn customers(rng: &mut impl Rng) -> Vec<Value> {
    (1..=CUSTOMER_COUNT)
        .map(|id| {
            let first = FIRST_NAMES.choose(rng).unwrap();
            let last = LAST_NAMES.choose(rng).unwrap();
            let (city, state) = CITIES.choose(rng).unwrap();
            let has_ordered = rng.gen_bool(0.8);
            let nb_orders = if has_ordered { rng.gen_range(1..12) } else { 0 };

            json!({
                "id": id,
                "first_name": first,
                "last_name": last,
                "email": format!(
                    "{}.{}{}@example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    id
                ),
                "address": format!("{} {} St.", rng.gen_range(1..999), LAST_NAMES.choose(rng).unwrap()),
                "zipcode": format!("{:05}", rng.gen_range(10000..99999)),
                "city": city,
                "stateAbbr": state,
                "avatar": format!("https://i.pravatar.cc/150?u={}", id),
                "birthday": format!(
                    "{}-{:02}-{:02}",
                    rng.gen_range(1950..2005),
                    rng.gen_range(1..=12),
                    rng.gen_range(1..=28)
                ),
                "first_seen": past_date(rng, 900),
                "last_seen": past_date(rng, 30),
                "has_ordered": has_ordered,
                "latest_purchase": past_date(rng, 90),
                "has_newsletter": rng.gen_bool(0.5),
                "groups": if nb_orders > 8 { json!(["vip"]) } else { json!([]) },
                "nb_orders": nb_orders,
                "total_spent": round2(rng.gen_range(0.0..2500.0)),
            })
        })
        .collect()
}

fn categories() -> Vec<Value> {
    CATEGORY_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| json!({"id": i + 1, "name": name}))
        .collect()
}

fn products(rng: &mut impl Rng, category_count: usize) -> Vec<Value> {
    let mut products = Vec::new();
    let mut id = 0;
    for category_id in 1..=category_count {
        for _ in 0..PRODUCTS_PER_CATEGORY {
            id += 1;
            products.push(json!({
                "id": id,
                "category_id": category_id,
                "reference": format!("PR-{:04}", id),
                "width": round2(rng.gen_range(5.0..80.0)),
                "height": round2(rng.gen_range(5.0..80.0)),
                "price": round2(rng.gen_range(4.0..250.0)),
                "thumbnail": format!("https://picsum.photos/seed/{}/80", id),
                "image": format!("https://picsum.photos/seed/{}/600", id),
                "description": format!("A fine {} item, reference PR-{:04}.", CATEGORY_NAMES[category_id - 1], id),
                "stock": rng.gen_range(0..250),
                "sales": round2(rng.gen_range(0.0..900.0)),
            }));
        }
    }
    products
}

fn orders(rng: &mut impl Rng, customer_count: usize, _product_count: usize) -> Vec<Value> {
    (1..=ORDER_COUNT)
        .map(|id| {
            let total_ex_taxes = round2(rng.gen_range(10.0..600.0));
            let delivery_fees = round2(rng.gen_range(3.0..12.0));
            let tax_rate = *[0.12, 0.17, 0.2].choose(rng).unwrap();
            let taxes = round2(total_ex_taxes * tax_rate);
            let status = *ORDER_STATUSES.choose(rng).unwrap();

            json!({
                "id": id,
                "reference": format!("ORD-{:05}", id),
                "date": past_date(rng, 400),
                "customer_id": rng.gen_range(1..=customer_count),
                "total_ex_taxes": total_ex_taxes,
                "delivery_fees": delivery_fees,
                "tax_rate": tax_rate,
                "taxes": taxes,
                "total": round2(total_ex_taxes + delivery_fees + taxes),
                "status": status,
                "returned": status == "delivered" && rng.gen_bool(0.1),
            })
        })
        .collect()
}

/// One invoice per non-cancelled order, sharing the order's amounts.
fn invoices(orders: &[Value]) -> Vec<Value> {
    orders
        .iter()
        .filter(|order| order["status"] != "cancelled")
        .enumerate()
        .map(|(i, order)| {
            json!({
                "id": i + 1,
                "date": order["date"],
                "order_id": order["id"],
                "customer_id": order["customer_id"],
                "total_ex_taxes": order["total_ex_taxes"],
                "delivery_fees": order["delivery_fees"],
                "tax_rate": order["tax_rate"],
                "taxes": order["taxes"],
                "total": order["total"],
            })
        })
        .collect()
}

fn reviews(
    rng: &mut impl Rng,
    customer_count: usize,
    product_count: usize,
    order_count: usize,
) -> Vec<Value> {
    (1..=REVIEW_COUNT)
        .map(|id| {
            json!({
                "id": id,
                "date": past_date(rng, 400),
                "status": *REVIEW_STATUSES.choose(rng).unwrap(),
                "order_id": rng.gen_range(1..=order_count),
                "product_id": rng.gen_range(1..=product_count),
                "customer_id": rng.gen_range(1..=customer_count),
                "rating": rng.gen_range(1..=5),
                "comment": REVIEW_COMMENTS.choose(rng).unwrap(),
            })
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
