//! Turning command outcomes into text or JSON lines.

use serde_json::{json, Value};

use storekeep_catalog::{Bundle, CatalogEvent, PairAssignment, Product};
use storekeep_core::DomainError;
use storekeep_events::{Event, EventEnvelope};

use crate::config::OutputFormat;
use crate::error::SessionError;

pub const MENU: &str = "\
Options:
1. Add Product
2. Update Product
3. Delete Product
4. Add Bundle
5. Display Bundle Items
6. Display Products
7. Exit
(also: assign, bundles, history, help; arguments may follow the command on one line)";

/// What a command produced, borrowed from the catalog after it ran.
#[derive(Debug)]
pub enum Outcome<'a> {
    Added(&'a str),
    Updated(&'a str),
    Deleted(&'a str),
    Assigned {
        bundle: &'a str,
        product: &'a str,
    },
    PairAssigned {
        bundle: &'a str,
        first: &'a str,
        second: &'a str,
        outcome: &'a PairAssignment,
    },
    Products(Vec<&'a Product>),
    BundleMembers {
        bundle: &'a str,
        members: Vec<&'a Product>,
    },
    Bundles(Vec<&'a Bundle>),
    History(Vec<&'a EventEnvelope<CatalogEvent>>),
    Menu,
    Goodbye,
    Failed(&'a SessionError),
}

/// Render an outcome as the text to write (without trailing newline).
pub fn render(format: OutputFormat, outcome: &Outcome<'_>) -> String {
    match format {
        OutputFormat::Text => render_text(outcome),
        OutputFormat::Json => render_json(outcome).to_string(),
    }
}

fn render_text(outcome: &Outcome<'_>) -> String {
    match outcome {
        Outcome::Added(_) => "Product added successfully.".to_string(),
        Outcome::Updated(_) => "Product updated successfully.".to_string(),
        Outcome::Deleted(_) => "Product deleted successfully.".to_string(),
        Outcome::Assigned { bundle, product } => format!("Added {product} to bundle {bundle}."),
        Outcome::PairAssigned {
            bundle,
            first,
            second,
            outcome,
        } => {
            let line = |name: &str, result: &Result<(), DomainError>| match result {
                Ok(()) => format!("Added {name} to bundle {bundle}."),
                Err(e) => format!("Could not add {name} to bundle {bundle}: {e}."),
            };
            let mut lines = vec![line(*first, &outcome.first), line(*second, &outcome.second)];
            if outcome.is_complete() {
                lines.push("Bundle added.".to_string());
            }
            lines.join("\n")
        }
        Outcome::Products(products) if products.is_empty() => {
            "Store Inventory:\n(no products)".to_string()
        }
        Outcome::Products(products) => {
            let mut lines = vec!["Store Inventory:".to_string()];
            lines.extend(products.iter().map(|p| p.to_string()));
            lines.join("\n")
        }
        Outcome::BundleMembers { bundle, members } if members.is_empty() => {
            format!("No products found in bundle {bundle}.")
        }
        Outcome::BundleMembers { bundle, members } => {
            let mut lines = vec![format!("Products in bundle {bundle}:")];
            lines.extend(members.iter().map(|p| p.to_string()));
            lines.join("\n")
        }
        Outcome::Bundles(bundles) if bundles.is_empty() => "No bundles yet.".to_string(),
        Outcome::Bundles(bundles) => {
            let mut lines = vec!["Bundles:".to_string()];
            lines.extend(
                bundles
                    .iter()
                    .map(|b| format!("{} ({} products)", b.name(), b.len())),
            );
            lines.join("\n")
        }
        Outcome::History(entries) if entries.is_empty() => "No changes yet.".to_string(),
        Outcome::History(entries) => entries
            .iter()
            .map(|e| {
                format!(
                    "#{} {} {} {}",
                    e.sequence_number(),
                    e.payload().occurred_at().format("%H:%M:%S"),
                    e.payload().event_type(),
                    describe(e.payload())
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::Menu => MENU.to_string(),
        Outcome::Goodbye => "Exiting...".to_string(),
        Outcome::Failed(e) => format!("Error: {e}"),
    }
}

fn render_json(outcome: &Outcome<'_>) -> Value {
    let ok = |action: &str, extra: Value| {
        let mut body = json!({ "status": "ok", "action": action });
        if let (Some(body), Value::Object(extra)) = (body.as_object_mut(), extra) {
            body.extend(extra);
        }
        body
    };

    match outcome {
        Outcome::Added(name) => ok("add", json!({ "product": name })),
        Outcome::Updated(name) => ok("update", json!({ "product": name })),
        Outcome::Deleted(name) => ok("delete", json!({ "product": name })),
        Outcome::Assigned { bundle, product } => {
            ok("assign", json!({ "bundle": bundle, "product": product }))
        }
        Outcome::PairAssigned {
            bundle,
            first,
            second,
            outcome,
        } => {
            let item = |name: &str, result: &Result<(), DomainError>| match result {
                Ok(()) => json!({ "product": name, "status": "ok" }),
                Err(e) => json!({ "product": name, "status": "error", "kind": e.kind(), "message": e.to_string() }),
            };
            let status = if outcome.is_complete() { "ok" } else { "partial" };
            json!({
                "status": status,
                "action": "bundle",
                "bundle": bundle,
                "results": [item(*first, &outcome.first), item(*second, &outcome.second)],
            })
        }
        Outcome::Products(products) => ok("list", json!({ "products": products })),
        Outcome::BundleMembers { bundle, members } => {
            ok("show", json!({ "bundle": bundle, "products": members }))
        }
        Outcome::Bundles(bundles) => ok("bundles", json!({ "bundles": bundles })),
        Outcome::History(entries) => {
            let events: Vec<Value> = entries
                .iter()
                .filter_map(|e| match serde_json::to_value(e) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        tracing::warn!(
                            sequence_number = e.sequence_number(),
                            error = %err,
                            "event could not be rendered as json"
                        );
                        None
                    }
                })
                .collect();
            ok("history", json!({ "events": events }))
        }
        Outcome::Menu => ok("help", json!({ "menu": MENU })),
        Outcome::Goodbye => ok("exit", json!({})),
        Outcome::Failed(e) => json!({
            "status": "error",
            "kind": e.kind(),
            "message": e.to_string(),
        }),
    }
}

/// One-line human summary of an event.
fn describe(event: &CatalogEvent) -> String {
    match event {
        CatalogEvent::ProductAdded(e) => format!("{} at {}", e.name, e.price),
        CatalogEvent::PriceUpdated(e) => {
            format!("{}: {} -> {}", e.name, e.old_price, e.new_price)
        }
        CatalogEvent::ProductDeleted(e) if e.removed_from.is_empty() => e.name.clone(),
        CatalogEvent::ProductDeleted(e) => {
            format!("{} (left {})", e.name, e.removed_from.join(", "))
        }
        CatalogEvent::BundleCreated(e) => e.bundle.clone(),
        CatalogEvent::ProductBundled(e) => format!("{} <- {}", e.bundle, e.product),
    }
}
