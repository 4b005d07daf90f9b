use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storekeep_core::{Aggregate, AggregateRoot, CatalogId, DomainError, DomainResult, Entity};
use storekeep_events::{Event, EventEnvelope, Journal};

use crate::bundle::{Bundle, PairAssignment};
use crate::product::{Price, Product};

/// Command: AddProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddProduct {
    pub name: String,
    pub price: Price,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdatePrice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePrice {
    pub name: String,
    pub price: Price,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteProduct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteProduct {
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AssignToBundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignToBundle {
    pub bundle: String,
    pub product: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogCommand {
    AddProduct(AddProduct),
    UpdatePrice(UpdatePrice),
    DeleteProduct(DeleteProduct),
    AssignToBundle(AssignToBundle),
}

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Price,
    pub occurred_at: DateTime<Utc>,
}

/// Event: PriceUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdated {
    pub name: String,
    #[serde(rename = "old_price_cents")]
    pub old_price: Price,
    #[serde(rename = "new_price_cents")]
    pub new_price: Price,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeleted.
///
/// `removed_from` lists the bundles the product belonged to when it was deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDeleted {
    pub name: String,
    pub removed_from: Vec<String>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: BundleCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleCreated {
    pub bundle: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductBundled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductBundled {
    pub bundle: String,
    pub product: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ProductAdded(ProductAdded),
    PriceUpdated(PriceUpdated),
    ProductDeleted(ProductDeleted),
    BundleCreated(BundleCreated),
    ProductBundled(ProductBundled),
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ProductAdded(_) => "catalog.product.added",
            CatalogEvent::PriceUpdated(_) => "catalog.product.price_updated",
            CatalogEvent::ProductDeleted(_) => "catalog.product.deleted",
            CatalogEvent::BundleCreated(_) => "catalog.bundle.created",
            CatalogEvent::ProductBundled(_) => "catalog.bundle.product_assigned",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ProductAdded(e) => e.occurred_at,
            CatalogEvent::PriceUpdated(e) => e.occurred_at,
            CatalogEvent::ProductDeleted(e) => e.occurred_at,
            CatalogEvent::BundleCreated(e) => e.occurred_at,
            CatalogEvent::ProductBundled(e) => e.occurred_at,
        }
    }
}

/// Aggregate root: the store catalog.
///
/// Owns every product and bundle by value. Products live in an arena keyed by
/// a slot number that only ever grows, so iterating the arena yields insertion
/// order and deleting a product never shifts another one. Bundles are never
/// deleted, so their positions in `bundles` are stable too.
#[derive(Debug, Clone)]
pub struct Catalog {
    id: CatalogId,
    version: u64,
    products: BTreeMap<u64, Product>,
    product_index: HashMap<String, u64>,
    next_slot: u64,
    bundles: Vec<Bundle>,
    bundle_index: HashMap<String, usize>,
    journal: Journal<CatalogEvent>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::with_id(CatalogId::new())
    }

    pub fn with_id(id: CatalogId) -> Self {
        Self {
            id,
            version: 0,
            products: BTreeMap::new(),
            product_index: HashMap::new(),
            next_slot: 0,
            bundles: Vec::new(),
            bundle_index: HashMap::new(),
            journal: Journal::new(id),
        }
    }

    /// Add a new product. Fails with `DuplicateName` if the name is taken.
    pub fn add_product(&mut self, name: &str, price: Price) -> DomainResult<()> {
        self.execute(&CatalogCommand::AddProduct(AddProduct {
            name: name.to_string(),
            price,
            occurred_at: Utc::now(),
        }))?;
        tracing::debug!(product = name, %price, "product added");
        Ok(())
    }

    /// Replace the price of an existing product.
    pub fn update_product(&mut self, name: &str, price: Price) -> DomainResult<()> {
        self.execute(&CatalogCommand::UpdatePrice(UpdatePrice {
            name: name.to_string(),
            price,
            occurred_at: Utc::now(),
        }))?;
        tracing::debug!(product = name, %price, "product price updated");
        Ok(())
    }

    /// Remove a product and drop it from every bundle it belonged to.
    pub fn delete_product(&mut self, name: &str) -> DomainResult<()> {
        let events = self.execute(&CatalogCommand::DeleteProduct(DeleteProduct {
            name: name.to_string(),
            occurred_at: Utc::now(),
        }))?;
        if let Some(CatalogEvent::ProductDeleted(e)) = events.first() {
            tracing::debug!(product = name, bundles = ?e.removed_from, "product deleted");
        }
        Ok(())
    }

    /// All live products in insertion order.
    ///
    /// The iterator borrows the catalog; call again for a fresh pass.
    pub fn products(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.values()
    }

    pub fn find_product(&self, name: &str) -> Option<&Product> {
        self.product_index
            .get(name)
            .and_then(|slot| self.products.get(slot))
    }

    pub fn contains_product(&self, name: &str) -> bool {
        self.product_index.contains_key(name)
    }

    /// Number of live products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Add a product to a bundle, creating the bundle on first use.
    ///
    /// Assigning a product that is already a member is a no-op.
    pub fn assign_to_bundle(&mut self, bundle: &str, product: &str) -> DomainResult<()> {
        let events = self.execute(&CatalogCommand::AssignToBundle(AssignToBundle {
            bundle: bundle.to_string(),
            product: product.to_string(),
            occurred_at: Utc::now(),
        }))?;
        if events.is_empty() {
            tracing::debug!(bundle, product, "product already in bundle");
        } else {
            tracing::debug!(bundle, product, "product assigned to bundle");
        }
        Ok(())
    }

    /// Assign two products to one bundle, each independently of the other.
    pub fn assign_pair_to_bundle(
        &mut self,
        bundle: &str,
        first: &str,
        second: &str,
    ) -> PairAssignment {
        PairAssignment {
            first: self.assign_to_bundle(bundle, first),
            second: self.assign_to_bundle(bundle, second),
        }
    }

    /// Live products currently in `bundle`, in assignment order.
    ///
    /// Fails with `BundleNotFound` if the bundle was never created. A bundle
    /// whose members were all deleted yields an empty iterator.
    pub fn bundle_members<'a>(
        &'a self,
        bundle: &str,
    ) -> DomainResult<impl Iterator<Item = &'a Product> + use<'a>> {
        let found = self
            .find_bundle(bundle)
            .ok_or_else(|| DomainError::bundle_not_found(bundle))?;
        Ok(found
            .members()
            .filter_map(move |member| self.find_product(member)))
    }

    pub fn find_bundle(&self, name: &str) -> Option<&Bundle> {
        self.bundle_index.get(name).map(|&i| &self.bundles[i])
    }

    /// Every bundle ever created, in creation order.
    pub fn bundles(&self) -> impl Iterator<Item = &Bundle> + '_ {
        self.bundles.iter()
    }

    /// Applied events, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &EventEnvelope<CatalogEvent>> + '_ {
        self.journal.iter()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl AggregateRoot for Catalog {
    type Id = CatalogId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for Catalog {
    type Command = CatalogCommand;
    type Event = CatalogEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CatalogEvent::ProductAdded(e) => {
                let product = Product::new(e.name.clone(), e.price);
                let slot = self.next_slot;
                self.next_slot += 1;
                self.product_index.insert(product.id().clone(), slot);
                self.products.insert(slot, product);
            }
            CatalogEvent::PriceUpdated(e) => {
                if let Some(product) = self
                    .product_index
                    .get(&e.name)
                    .and_then(|slot| self.products.get_mut(slot))
                {
                    product.set_price(e.new_price);
                }
            }
            CatalogEvent::ProductDeleted(e) => {
                if let Some(slot) = self.product_index.remove(&e.name) {
                    self.products.remove(&slot);
                }
                // Sweep every bundle, not just `removed_from`, so no stale member survives.
                for bundle in &mut self.bundles {
                    bundle.remove(&e.name);
                }
            }
            CatalogEvent::BundleCreated(e) => {
                if !self.bundle_index.contains_key(&e.bundle) {
                    let bundle = Bundle::new(e.bundle.clone());
                    self.bundle_index.insert(bundle.id().clone(), self.bundles.len());
                    self.bundles.push(bundle);
                }
            }
            CatalogEvent::ProductBundled(e) => {
                if let Some(&i) = self.bundle_index.get(&e.bundle) {
                    self.bundles[i].insert(&e.product);
                }
            }
        }

        self.version += 1;
        self.journal.append(event.clone());
        tracing::trace!(
            event_type = event.event_type(),
            version = self.version,
            "applied catalog event"
        );
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CatalogCommand::AddProduct(cmd) => self.handle_add(cmd),
            CatalogCommand::UpdatePrice(cmd) => self.handle_update(cmd),
            CatalogCommand::DeleteProduct(cmd) => self.handle_delete(cmd),
            CatalogCommand::AssignToBundle(cmd) => self.handle_assign(cmd),
        }
    }
}

impl Catalog {
    fn ensure_name(kind: &str, name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation(format!("{kind} name cannot be empty")));
        }
        Ok(())
    }

    fn ensure_product(&self, name: &str) -> Result<&Product, DomainError> {
        self.find_product(name)
            .ok_or_else(|| DomainError::product_not_found(name))
    }

    fn handle_add(&self, cmd: &AddProduct) -> Result<Vec<CatalogEvent>, DomainError> {
        Self::ensure_name("product", &cmd.name)?;
        if self.contains_product(&cmd.name) {
            return Err(DomainError::duplicate_name(&cmd.name));
        }

        Ok(vec![CatalogEvent::ProductAdded(ProductAdded {
            name: cmd.name.clone(),
            price: cmd.price,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_update(&self, cmd: &UpdatePrice) -> Result<Vec<CatalogEvent>, DomainError> {
        let product = self.ensure_product(&cmd.name)?;

        Ok(vec![CatalogEvent::PriceUpdated(PriceUpdated {
            name: cmd.name.clone(),
            old_price: product.price(),
            new_price: cmd.price,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_delete(&self, cmd: &DeleteProduct) -> Result<Vec<CatalogEvent>, DomainError> {
        self.ensure_product(&cmd.name)?;

        let removed_from = self
            .bundles
            .iter()
            .filter(|b| b.contains(&cmd.name))
            .map(|b| b.name().to_string())
            .collect();

        Ok(vec![CatalogEvent::ProductDeleted(ProductDeleted {
            name: cmd.name.clone(),
            removed_from,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_assign(&self, cmd: &AssignToBundle) -> Result<Vec<CatalogEvent>, DomainError> {
        self.ensure_product(&cmd.product)?;
        Self::ensure_name("bundle", &cmd.bundle)?;

        let mut events = Vec::new();
        match self.find_bundle(&cmd.bundle) {
            Some(bundle) if bundle.contains(&cmd.product) => return Ok(events),
            Some(_) => {}
            None => events.push(CatalogEvent::BundleCreated(BundleCreated {
                bundle: cmd.bundle.clone(),
                occurred_at: cmd.occurred_at,
            })),
        }

        events.push(CatalogEvent::ProductBundled(ProductBundled {
            bundle: cmd.bundle.clone(),
            product: cmd.product.clone(),
            occurred_at: cmd.occurred_at,
        }));
        Ok(events)
    }
}
