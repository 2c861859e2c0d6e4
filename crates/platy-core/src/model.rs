//! Plan Model
//!
//! Wire types for the weekly plan. Field names follow the JSON contract
//! consumed by the frontend (`dia`, `plato`, `porCategoria`, ...), so the
//! same payload a browser stored yesterday still parses tomorrow.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Note attached to every cost block
pub const COSTS_NOTE: &str = "Precios estimados según ciudad";

/// Measurement unit after normalization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Grams
    #[serde(rename = "g")]
    Gram,

    /// Milliliters
    #[serde(rename = "ml")]
    Milliliter,

    /// Whole units (eggs, arepas, tortillas...)
    #[serde(rename = "ud")]
    Count,
}

impl Unit {
    pub fn as_str(self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Milliliter => "ml",
            Unit::Count => "ud",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ingredient line: a quantity of something in a normalized unit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemQty {
    /// Ingredient name as written by the plan source
    pub name: String,

    /// Quantity in `unit`
    pub qty: f64,

    /// Normalized unit
    pub unit: Unit,

    /// Estimated cost in COP, when the pricebook knows the ingredient
    #[serde(rename = "estCOP", default, skip_serializing_if = "Option::is_none")]
    pub est_cop: Option<f64>,
}

impl ItemQty {
    pub fn new(name: impl Into<String>, qty: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            qty,
            unit,
            est_cop: None,
        }
    }

    /// Consolidation identity: same lowercased name and same unit merge
    pub fn key(&self) -> (String, Unit) {
        (self.name.to_lowercase(), self.unit)
    }
}

/// One day of the weekly menu
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Day {
    /// Day number, 1..=7
    pub dia: u8,

    /// Dish name
    pub plato: String,

    /// Ingredients for the dish
    pub ingredientes: Vec<ItemQty>,

    /// Preparation steps
    pub pasos: Vec<String>,

    /// Optional cooking tip
    #[serde(default)]
    pub tip: String,
}

/// Batch-cooking suggestions carried alongside the menu
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(rename = "baseA", default)]
    pub base_a: String,

    #[serde(rename = "baseB", default)]
    pub base_b: String,
}

/// Currency of all cost estimates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "COP")]
    Cop,
}

/// Request context echoed back with the plan
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub ciudad: String,

    #[serde(default = "default_personas")]
    pub personas: u32,

    #[serde(default = "default_modo")]
    pub modo: String,

    #[serde(default)]
    pub moneda: Currency,
}

fn default_personas() -> u32 {
    2
}

fn default_modo() -> String {
    "Almuerzos".into()
}

/// Cost estimates per category plus the grand total, in whole COP
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Costs {
    #[serde(rename = "porCategoria", default)]
    pub por_categoria: BTreeMap<String, i64>,

    #[serde(default)]
    pub total: i64,

    #[serde(default = "default_nota")]
    pub nota: String,
}

fn default_nota() -> String {
    COSTS_NOTE.into()
}

impl Default for Costs {
    fn default() -> Self {
        Self {
            por_categoria: BTreeMap::new(),
            total: 0,
            nota: default_nota(),
        }
    }
}

/// A complete weekly plan: menu, consolidated shopping list, batch notes,
/// leftovers advice, request meta and cost estimates
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub menu: Vec<Day>,

    /// Category -> consolidated shopping lines. Always re-derived from
    /// `menu[].ingredientes`, never independently authored.
    #[serde(default)]
    pub lista: BTreeMap<String, Vec<ItemQty>>,

    #[serde(default)]
    pub batch: Batch,

    #[serde(default)]
    pub sobrantes: Vec<String>,

    pub meta: Meta,

    #[serde(default)]
    pub costos: Costs,
}

impl Plan {
    /// Structural validation mirroring what the plan schema demands:
    /// exactly 7 days, every day with at least one named, positive-quantity
    /// ingredient and at least one step.
    pub fn validate(&self) -> Result<()> {
        if self.menu.len() != 7 {
            return Err(CoreError::WrongDayCount(self.menu.len()));
        }
        for day in &self.menu {
            if !(1..=7).contains(&day.dia) {
                return Err(CoreError::DayOutOfRange(day.dia));
            }
            if day.ingredientes.is_empty() {
                return Err(CoreError::EmptyIngredients(day.dia));
            }
            if day.pasos.is_empty() {
                return Err(CoreError::EmptySteps(day.dia));
            }
            for it in &day.ingredientes {
                if it.name.is_empty() {
                    return Err(CoreError::UnnamedIngredient(day.dia));
                }
                if it.qty <= 0.0 {
                    return Err(CoreError::NonPositiveQty(day.dia, it.name.clone()));
                }
            }
        }
        Ok(())
    }

    /// All ingredients across the week, in menu order
    pub fn all_ingredients(&self) -> Vec<ItemQty> {
        self.menu
            .iter()
            .flat_map(|d| d.ingredientes.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(dia: u8) -> Day {
        Day {
            dia,
            plato: format!("Plato {dia}"),
            ingredientes: vec![ItemQty::new("arroz", 100.0, Unit::Gram)],
            pasos: vec!["Preparar".into()],
            tip: String::new(),
        }
    }

    fn plan() -> Plan {
        Plan {
            menu: (1..=7).map(day).collect(),
            lista: BTreeMap::new(),
            batch: Batch::default(),
            sobrantes: vec![],
            meta: Meta {
                ciudad: "Bogotá, CO".into(),
                personas: 2,
                modo: "Almuerzos".into(),
                moneda: Currency::Cop,
            },
            costos: Costs::default(),
        }
    }

    #[test]
    fn test_valid_plan_passes() {
        assert!(plan().validate().is_ok());
    }

    #[test]
    fn test_wrong_day_count_rejected() {
        let mut p = plan();
        p.menu.pop();
        assert!(matches!(p.validate(), Err(CoreError::WrongDayCount(6))));
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let mut p = plan();
        p.menu[2].ingredientes.clear();
        assert!(matches!(p.validate(), Err(CoreError::EmptyIngredients(3))));
    }

    #[test]
    fn test_non_positive_qty_rejected() {
        let mut p = plan();
        p.menu[0].ingredientes[0].qty = 0.0;
        assert!(matches!(p.validate(), Err(CoreError::NonPositiveQty(1, _))));
    }

    #[test]
    fn test_unit_wire_names() {
        assert_eq!(serde_json::to_string(&Unit::Gram).unwrap(), "\"g\"");
        assert_eq!(serde_json::to_string(&Unit::Count).unwrap(), "\"ud\"");
    }

    #[test]
    fn test_item_wire_shape() {
        let mut it = ItemQty::new("huevo", 4.0, Unit::Count);
        let json = serde_json::to_value(&it).unwrap();
        assert!(json.get("estCOP").is_none());

        it.est_cop = Some(2800.0);
        let json = serde_json::to_value(&it).unwrap();
        assert_eq!(json["estCOP"], serde_json::json!(2800.0));
    }

    #[test]
    fn test_costs_wire_names() {
        let json = serde_json::to_value(Costs::default()).unwrap();
        assert!(json.get("porCategoria").is_some());
        assert_eq!(json["nota"], COSTS_NOTE);
    }
}
