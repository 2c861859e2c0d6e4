//! Plan Export
//!
//! Renders a plan as shareable plain text and wraps it in a blob object
//! URL for download. Blob URLs hold browser memory until revoked, so the
//! wizard revokes each one on replacement and on component teardown.

use platy_core::Plan;
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, Url};

/// Render a plan as plain text: menu, shopping list and cost estimates
pub fn plan_to_text(plan: &Plan) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "PLATY · Plan semanal para {} persona(s) · {}\n\n",
        plan.meta.personas, plan.meta.ciudad
    ));

    out.push_str("== MENÚ ==\n");
    for day in &plan.menu {
        out.push_str(&format!("Día {} · {}\n", day.dia, day.plato));
        for it in &day.ingredientes {
            out.push_str(&format!("  - {} {} {}\n", it.qty, it.unit, it.name));
        }
    }

    out.push_str("\n== LISTA DE COMPRAS ==\n");
    for (categoria, items) in &plan.lista {
        out.push_str(&format!("{categoria}:\n"));
        for it in items {
            out.push_str(&format!("  [ ] {} {} {}", it.qty, it.unit, it.name));
            if let Some(cost) = it.est_cop {
                out.push_str(&format!(" (~${cost:.0} COP)"));
            }
            out.push('\n');
        }
    }

    if !plan.batch.base_a.is_empty() || !plan.batch.base_b.is_empty() {
        out.push_str("\n== BATCH ==\n");
        for base in [&plan.batch.base_a, &plan.batch.base_b] {
            if !base.is_empty() {
                out.push_str(&format!("  - {base}\n"));
            }
        }
    }

    out.push_str(&format!(
        "\nTotal estimado: ${} COP ({})\n",
        plan.costos.total, plan.costos.nota
    ));

    out
}

/// Create a blob object URL holding the given text. The caller owns the
/// URL and must pass it to [`revoke_url`] when done with it.
pub fn create_text_url(text: &str) -> Option<String> {
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(text));

    let options = BlobPropertyBag::new();
    options.set_type("text/plain;charset=utf-8");

    let blob = Blob::new_with_str_sequence_and_options(&parts, &options).ok()?;
    Url::create_object_url_with_blob(&blob).ok()
}

/// Release a blob URL created by [`create_text_url`]
pub fn revoke_url(url: &str) {
    let _ = Url::revoke_object_url(url);
}

#[cfg(test)]
mod tests {
    use super::*;
    use platy_core::{Pricebook, fallback_plan};

    #[test]
    fn test_plan_to_text_lists_everything() {
        let plan = fallback_plan(
            "Bogotá, CO",
            2,
            "Almuerzos",
            &Pricebook::builtin().unwrap(),
        );
        let text = plan_to_text(&plan);

        assert!(text.contains("Plan semanal para 2 persona(s)"));
        assert!(text.contains("Día 1 · Arroz con pollo"));
        assert!(text.contains("LISTA DE COMPRAS"));
        assert!(text.contains("Granos:"));
        assert!(text.contains("Total estimado"));
    }
}
