//! Static Pricebook
//!
//! Per-ingredient, per-city COP price table embedded at compile time and
//! parsed once at startup. Cities the table does not know fall back to the
//! Bogotá column; ingredients it does not know simply get no estimate.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

use crate::error::Result;
use crate::model::{ItemQty, Unit};

/// City used when the requested one has no column
pub const DEFAULT_CITY: &str = "Bogotá, CO";

/// Unit prices for one ingredient in one city
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PriceEntry {
    /// COP per gram
    #[serde(rename = "perGram", default)]
    pub per_gram: Option<Decimal>,

    /// COP per milliliter
    #[serde(rename = "perMl", default)]
    pub per_ml: Option<Decimal>,

    /// COP per whole unit
    #[serde(rename = "perUnit", default)]
    pub per_unit: Option<Decimal>,
}

/// Lowercased ingredient name -> city -> unit prices
#[derive(Clone, Debug, Deserialize)]
pub struct Pricebook {
    #[serde(flatten)]
    rows: HashMap<String, HashMap<String, PriceEntry>>,
}

impl Pricebook {
    /// Parse a pricebook from its JSON representation
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The table shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_json_str(include_str!("../data/pricebook.co.json"))
    }

    /// Unit prices for an ingredient in a city, with the Bogotá fallback.
    /// Unknown ingredients return an empty entry.
    pub fn entry(&self, item: &str, ciudad: &str) -> PriceEntry {
        let Some(row) = self.rows.get(&item.to_lowercase()) else {
            tracing::debug!(item, "no pricebook row");
            return PriceEntry::default();
        };
        row.get(ciudad)
            .or_else(|| row.get(DEFAULT_CITY))
            .cloned()
            .unwrap_or_default()
    }

    /// Estimated COP cost for one shopping line, when the table knows a
    /// price for the line's unit
    pub fn estimate(&self, it: &ItemQty, ciudad: &str) -> Option<Decimal> {
        let prices = self.entry(&it.name, ciudad);
        let unit_price = match it.unit {
            Unit::Gram => prices.per_gram,
            Unit::Milliliter => prices.per_ml,
            Unit::Count => prices.per_unit,
        }?;
        Some(Decimal::from_f64(it.qty)? * unit_price)
    }
}
