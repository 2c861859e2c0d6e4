//! Unit Normalization
//!
//! Collapses whatever the plan source wrote (`cucharada`, `taza`, `gr`,
//! `unidades`...) into the three units the shopping list works with:
//! grams, milliliters and whole units. Quantities come out friendly-rounded.

use crate::model::{ItemQty, Unit};

/// Grams per spoon (cda/cucharada/cucharadita)
pub const SPOON_G: f64 = 5.0;

/// Grams per cup of a solid ingredient
pub const CUP_G: f64 = 230.0;

/// Milliliters per cup of a liquid ingredient
pub const CUP_ML: f64 = 240.0;

/// Ingredients counted in units regardless of the unit the source wrote
const COUNT_NAMES: &[&str] = &["huevo", "pan"];

/// Name fragments that mark an ingredient as liquid for cup conversion
const LIQUID_WORDS: &[&str] = &["leche", "agua", "caldo", "aceite"];

/// Round a quantity to a human-shoppable granularity: whole numbers for
/// counts, multiples of 25 below 100 and of 50 above for mass/volume.
pub fn round_friendly(qty: f64, unit: Unit) -> f64 {
    match unit {
        Unit::Count => qty.round(),
        Unit::Gram | Unit::Milliliter => {
            if qty < 100.0 {
                (qty / 25.0).round() * 25.0
            } else {
                (qty / 50.0).round() * 50.0
            }
        }
    }
}

/// Normalize a raw (name, qty, unit) triple into one of {g, ml, ud}.
///
/// Unknown units default to grams. `huevo` and `pan` are always counted in
/// units; cups convert to milliliters when the name reads like a liquid.
pub fn normalize_unit(name: &str, qty: f64, unit: &str) -> ItemQty {
    let u = unit.to_lowercase();
    let lname = name.to_lowercase();

    if matches!(u.as_str(), "unidad" | "unidades" | "u" | "ud")
        || COUNT_NAMES.contains(&lname.as_str())
    {
        return rounded(name, qty, Unit::Count);
    }
    if matches!(u.as_str(), "gr" | "gramo" | "gramos" | "g") {
        return rounded(name, qty, Unit::Gram);
    }
    if matches!(u.as_str(), "ml" | "mililitro" | "mililitros") {
        return rounded(name, qty, Unit::Milliliter);
    }
    if matches!(u.as_str(), "cda" | "cucharada" | "cucharadita") {
        return rounded(name, qty * SPOON_G, Unit::Gram);
    }
    if matches!(u.as_str(), "taza" | "tazas" | "cup" | "cups") {
        let liquid = LIQUID_WORDS.iter().any(|w| lname.contains(w));
        return if liquid {
            rounded(name, qty * CUP_ML, Unit::Milliliter)
        } else {
            rounded(name, qty * CUP_G, Unit::Gram)
        };
    }

    // default: grams
    rounded(name, qty, Unit::Gram)
}

fn rounded(name: &str, qty: f64, unit: Unit) -> ItemQty {
    ItemQty::new(name, round_friendly(qty, unit), unit)
}
