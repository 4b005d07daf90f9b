use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storekeep_core::{DomainError, Entity};

/// Unit price in minor units (cents).
///
/// Any `u64` is a valid price, so a negative or non-finite amount cannot be
/// represented. Decimal text is parsed exactly into cents, never through `f64`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }
}

/// Why a price string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsePriceError {
    /// Not a decimal number at all.
    #[error("`{0}` is not a decimal number")]
    Malformed(String),

    /// A number, but not a valid price.
    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl FromStr for Price {
    type Err = ParsePriceError;

    /// Parses `12`, `12.5`, `12.50` or `.5`. At most two decimal places.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ParsePriceError::Malformed(s.to_string());

        let (negative, unsigned) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(malformed());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        if fraction.len() > 2 {
            return Err(DomainError::validation("price has more than two decimal places").into());
        }

        let too_large = || DomainError::validation("price is too large");
        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| too_large())?
        };
        let fraction: u64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<u64>().map_err(|_| malformed())? * 10,
            _ => fraction.parse().map_err(|_| malformed())?,
        };
        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(too_large)?;

        // "-0" and "-0.00" are just zero.
        if negative && cents != 0 {
            return Err(DomainError::validation("price cannot be negative").into());
        }
        Ok(Self(cents))
    }
}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A catalog product. The name is its identity within a catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    name: String,
    #[serde(rename = "price_cents")]
    price: Price,
}

impl Product {
    pub fn new(name: impl Into<String>, price: Price) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub(crate) fn set_price(&mut self, price: Price) {
        self.price = price;
    }
}

impl Entity for Product {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

impl core::fmt::Display for Product {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Product: {}, Price: {}", self.name, self.price)
    }
}
