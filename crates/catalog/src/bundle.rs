use serde::{Deserialize, Serialize};

use storekeep_core::{DomainError, DomainResult, Entity};

/// A named group of products, stored as product names in assignment order.
///
/// Membership never refers to storage positions, so deleting or reordering
/// products cannot make a bundle point at the wrong product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    name: String,
    members: Vec<String>,
}

impl Bundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Member product names in assignment order.
    pub fn members(&self) -> impl Iterator<Item = &str> + '_ {
        self.members.iter().map(String::as_str)
    }

    pub fn contains(&self, product: &str) -> bool {
        self.members.iter().any(|m| m == product)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `false` if the product was already a member.
    pub(crate) fn insert(&mut self, product: &str) -> bool {
        if self.contains(product) {
            return false;
        }
        self.members.push(product.to_string());
        true
    }

    /// Returns `false` if the product was not a member.
    pub(crate) fn remove(&mut self, product: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != product);
        self.members.len() != before
    }
}

impl Entity for Bundle {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

/// Outcome of assigning two products to one bundle.
///
/// Each half is validated and applied on its own, so one unknown product does
/// not prevent the other from joining the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairAssignment {
    pub first: DomainResult<()>,
    pub second: DomainResult<()>,
}

impl PairAssignment {
    /// Both products were assigned.
    pub fn is_complete(&self) -> bool {
        self.first.is_ok() && self.second.is_ok()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DomainError> + '_ {
        [&self.first, &self.second]
            .into_iter()
            .filter_map(|r| r.as_ref().err())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent_and_keeps_order() {
        let mut bundle = Bundle::new("SchoolKit");
        assert!(bundle.insert("Pen"));
        assert!(bundle.insert("Notebook"));
        assert!(!bundle.insert("Pen"));

        assert_eq!(bundle.members().collect::<Vec<_>>(), vec!["Pen", "Notebook"]);
        assert_eq!(bundle.len(), 2);
    }

    #[test]
    fn remove_reports_whether_member_was_present() {
        let mut bundle = Bundle::new("SchoolKit");
        bundle.insert("Pen");

        assert!(bundle.remove("Pen"));
        assert!(!bundle.remove("Pen"));
        assert!(bundle.is_empty());
    }

    #[test]
    fn names_are_compared_exactly() {
        let mut bundle = Bundle::new("Kit");
        bundle.insert("pen");
        assert!(!bundle.contains("Pen"));
        assert!(bundle.insert("Pen"));
    }

    #[test]
    fn pair_assignment_lists_only_failed_halves() {
        let outcome = PairAssignment {
            first: Ok(()),
            second: Err(DomainError::product_not_found("Ghost")),
        };

        assert!(!outcome.is_complete());
        assert_eq!(
            outcome.failures().collect::<Vec<_>>(),
            vec![&DomainError::product_not_found("Ghost")]
        );
    }
}
