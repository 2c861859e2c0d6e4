//! Shopping List
//!
//! Consolidates the week's ingredients into one line per (name, unit),
//! buckets each line into a shopping category and attaches cost estimates.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::{Costs, ItemQty, Unit};
use crate::pricebook::Pricebook;

/// Fixed category table: ingredient name -> shopping aisle
pub const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Verduras",
        &["tomate", "cebolla", "pimentón", "zanahoria", "brocoli", "papa"],
    ),
    ("Proteína", &["pollo pechuga", "huevo", "queso"]),
    ("Granos", &["arroz", "pasta", "tortilla", "arepa"]),
    ("Abarrotes", &["aceite", "ajo"]),
];

/// Bucket for everything the table does not know
pub const DEFAULT_CATEGORY: &str = "Otros";

/// Category for an ingredient name, defaulting to [`DEFAULT_CATEGORY`]
pub fn category_for(name: &str) -> &'static str {
    CATEGORIES
        .iter()
        .find(|(_, names)| names.contains(&name))
        .map_or(DEFAULT_CATEGORY, |(cat, _)| *cat)
}

/// Merge identical (lowercased name, unit) entries by summing quantities.
///
/// First-seen order and casing are preserved; per-key totals are therefore
/// independent of input order.
pub fn consolidate(items: &[ItemQty]) -> Vec<ItemQty> {
    let mut merged: Vec<ItemQty> = Vec::new();
    let mut index: HashMap<(String, Unit), usize> = HashMap::new();

    for it in items {
        match index.get(&it.key()) {
            Some(&i) => merged[i].qty += it.qty,
            None => {
                index.insert(it.key(), merged.len());
                merged.push(it.clone());
            }
        }
    }

    merged
}

/// Build the categorized shopping list from already-consolidated items,
/// attaching a per-line COP estimate where the pricebook knows the item.
pub fn build_lista(
    items: &[ItemQty],
    pricebook: &Pricebook,
    ciudad: &str,
) -> BTreeMap<String, Vec<ItemQty>> {
    let mut lista: BTreeMap<String, Vec<ItemQty>> = BTreeMap::new();

    for it in items {
        let mut line = it.clone();
        line.est_cop = pricebook.estimate(it, ciudad).and_then(|d| d.to_f64());
        lista
            .entry(category_for(&it.name).to_string())
            .or_default()
            .push(line);
    }

    lista
}

/// Sum the shopping list into per-category and grand totals, in whole COP.
///
/// Category sums are rounded individually; the total is the rounded sum of
/// the unrounded category sums, so the two can differ by a peso.
pub fn build_costs(
    lista: &BTreeMap<String, Vec<ItemQty>>,
    pricebook: &Pricebook,
    ciudad: &str,
) -> Costs {
    let mut por_categoria = BTreeMap::new();
    let mut total = Decimal::ZERO;

    for (cat, items) in lista {
        let mut sum = Decimal::ZERO;
        for it in items {
            if let Some(est) = pricebook.estimate(it, ciudad) {
                sum += est;
            }
        }
        por_categoria.insert(cat.clone(), round_cop(sum));
        total += sum;
    }

    Costs {
        por_categoria,
        total: round_cop(total),
        ..Costs::default()
    }
}

fn round_cop(d: Decimal) -> i64 {
    d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<ItemQty> {
        vec![
            ItemQty::new("arroz", 100.0, Unit::Gram),
            ItemQty::new("Cebolla", 50.0, Unit::Gram),
            ItemQty::new("arroz", 80.0, Unit::Gram),
            ItemQty::new("huevo", 2.0, Unit::Count),
            ItemQty::new("cebolla", 25.0, Unit::Gram),
        ]
    }

    #[test]
    fn test_consolidate_sums_by_name_and_unit() {
        let merged = consolidate(&items());
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0].name, "arroz");
        assert_eq!(merged[0].qty, 180.0);
        // first-seen casing wins
        assert_eq!(merged[1].name, "Cebolla");
        assert_eq!(merged[1].qty, 75.0);
    }

    #[test]
    fn test_consolidate_same_name_different_unit_stays_apart() {
        let merged = consolidate(&[
            ItemQty::new("aceite", 100.0, Unit::Milliliter),
            ItemQty::new("aceite", 50.0, Unit::Gram),
        ]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_consolidate_is_order_independent() {
        let forward = consolidate(&items());
        let mut reversed_input = items();
        reversed_input.reverse();
        let reversed = consolidate(&reversed_input);

        let totals = |v: &[ItemQty]| {
            let mut m: HashMap<(String, Unit), f64> = HashMap::new();
            for it in v {
                *m.entry(it.key()).or_default() += it.qty;
            }
            m
        };
        assert_eq!(totals(&forward), totals(&reversed));
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(category_for("tomate"), "Verduras");
        assert_eq!(category_for("huevo"), "Proteína");
        assert_eq!(category_for("arepa"), "Granos");
        assert_eq!(category_for("ajo"), "Abarrotes");
        assert_eq!(category_for("chocolate"), DEFAULT_CATEGORY);
    }

    #[test]
    fn test_build_lista_buckets_and_prices() {
        let pb = Pricebook::builtin().unwrap();
        let merged = consolidate(&items());
        let lista = build_lista(&merged, &pb, "Bogotá, CO");

        assert!(lista.contains_key("Granos"));
        assert!(lista.contains_key("Verduras"));
        assert!(lista.contains_key("Proteína"));
        let granos = &lista["Granos"];
        assert_eq!(granos.len(), 1);
        assert!(granos[0].est_cop.is_some());
    }

    #[test]
    fn test_build_costs_totals_match_categories() {
        let pb = Pricebook::builtin().unwrap();
        let merged = consolidate(&items());
        let lista = build_lista(&merged, &pb, "Bogotá, CO");
        let costs = build_costs(&lista, &pb, "Bogotá, CO");

        assert!(costs.total > 0);
        let cat_sum: i64 = costs.por_categoria.values().sum();
        // per-category rounding may drift from the rounded grand total
        assert!((costs.total - cat_sum).abs() <= costs.por_categoria.len() as i64);
    }
}
