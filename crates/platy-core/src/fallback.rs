//! Deterministic Fallback Plan
//!
//! A fixed, hand-authored week used whenever the model fails twice. The
//! endpoint must always return a usable plan, so this one is built from a
//! static recipe table with per-person portions scaled by headcount.

use crate::model::{Batch, Currency, Day, ItemQty, Meta, Plan, Unit};
use crate::pricebook::Pricebook;
use crate::shopping::{build_costs, build_lista, consolidate};
use crate::units::round_friendly;

struct BaseDay {
    dia: u8,
    plato: &'static str,
    /// (ingredient, unit, quantity per person)
    receta: &'static [(&'static str, Unit, f64)],
}

const BASE_WEEK: &[BaseDay] = &[
    BaseDay {
        dia: 1,
        plato: "Arroz con pollo",
        receta: &[
            ("arroz", Unit::Gram, 90.0),
            ("pollo pechuga", Unit::Gram, 120.0),
            ("cebolla", Unit::Gram, 50.0),
            ("aceite", Unit::Milliliter, 8.0),
        ],
    },
    BaseDay {
        dia: 2,
        plato: "Pasta con tomate",
        receta: &[
            ("pasta", Unit::Gram, 110.0),
            ("tomate", Unit::Gram, 120.0),
            ("ajo", Unit::Gram, 6.0),
            ("aceite", Unit::Milliliter, 8.0),
        ],
    },
    BaseDay {
        dia: 3,
        plato: "Arepa con queso y huevo",
        receta: &[
            ("arepa", Unit::Count, 1.0),
            ("queso", Unit::Gram, 35.0),
            ("huevo", Unit::Count, 1.0),
        ],
    },
    BaseDay {
        dia: 4,
        plato: "Salteado de verduras",
        receta: &[
            ("brocoli", Unit::Gram, 120.0),
            ("zanahoria", Unit::Gram, 80.0),
            ("cebolla", Unit::Gram, 50.0),
            ("aceite", Unit::Milliliter, 8.0),
        ],
    },
    BaseDay {
        dia: 5,
        plato: "Sopa casera",
        receta: &[
            ("zanahoria", Unit::Gram, 70.0),
            ("papa", Unit::Gram, 150.0),
            ("cebolla", Unit::Gram, 50.0),
            ("ajo", Unit::Gram, 6.0),
        ],
    },
    BaseDay {
        dia: 6,
        plato: "Tacos rápidos",
        receta: &[
            ("tortilla", Unit::Count, 2.0),
            ("queso", Unit::Gram, 25.0),
            ("pimentón", Unit::Gram, 60.0),
            ("cebolla", Unit::Gram, 50.0),
        ],
    },
    BaseDay {
        dia: 7,
        plato: "Arroz frito con sobrantes",
        receta: &[
            ("arroz", Unit::Gram, 80.0),
            ("huevo", Unit::Count, 1.0),
            ("cebolla", Unit::Gram, 40.0),
        ],
    },
];

/// Build the fallback week for a given city, headcount and meal mode.
///
/// Per-person portions are scaled by `personas` and friendly-rounded, then
/// the shopping list and costs are derived the same way as for a
/// model-generated plan.
pub fn fallback_plan(ciudad: &str, personas: u32, modo: &str, pricebook: &Pricebook) -> Plan {
    let menu: Vec<Day> = BASE_WEEK
        .iter()
        .map(|base| Day {
            dia: base.dia,
            plato: base.plato.to_string(),
            ingredientes: base
                .receta
                .iter()
                .map(|&(name, unit, per_person)| {
                    ItemQty::new(name, round_friendly(per_person * f64::from(personas), unit), unit)
                })
                .collect(),
            pasos: vec!["Preparar".into(), "Cocer".into(), "Servir".into()],
            tip: "Aprovecha bases para otros días".into(),
        })
        .collect();

    let all = consolidate(
        &menu
            .iter()
            .flat_map(|d| d.ingredientes.iter().cloned())
            .collect::<Vec<_>>(),
    );
    let lista = build_lista(&all, pricebook, ciudad);
    let costos = build_costs(&lista, pricebook, ciudad);

    Plan {
        menu,
        lista,
        batch: Batch {
            base_a: "Cocina arroz para 3 días".into(),
            base_b: "Pica sofrito para 2 preparaciones".into(),
        },
        sobrantes: vec!["Usa el pollo del lunes para tacos el sábado".into()],
        meta: Meta {
            ciudad: ciudad.to_string(),
            personas,
            modo: modo.to_string(),
            moneda: Currency::Cop,
        },
        costos,
    }
}
