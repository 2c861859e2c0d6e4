//! Menu Generation Service
//!
//! Per-request state machine:
//!
//! 1. Build the Spanish instruction describing the exact JSON plan shape.
//! 2. Ask the model, at most twice. Each attempt parses the raw text as
//!    JSON, normalizes ingredient units in place and validates the plan
//!    structure; any exception or rejection counts as a failed attempt and
//!    is never surfaced.
//! 3. After two failures, substitute the deterministic fallback week.
//! 4. Re-derive the consolidated shopping list, category buckets, cost
//!    estimates and request meta for model-produced plans.
//!
//! The trial paywall lives in the HTTP handler; this service only builds
//! plans.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use platy_core::{
    Currency, ItemQty, Meta, Plan, Pricebook, build_costs, build_lista, consolidate,
    fallback_plan, normalize_unit, round_friendly,
};

use crate::provider::ChatModel;

const SYSTEM_PROMPT: &str = "Eres un chef planificador que devuelve estrictamente JSON válido.";

/// User preferences for one generation request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MenuRequest {
    #[serde(default = "default_ciudad")]
    pub ciudad: String,

    #[serde(default = "default_personas")]
    pub personas: u32,

    #[serde(default = "default_modo")]
    pub modo: String,

    /// Dietary preferences, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietas: Option<String>,

    /// Allergies, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alergias: Option<String>,

    /// Available kitchen equipment, free text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipos: Option<String>,
}

fn default_ciudad() -> String {
    "Bogotá, CO".into()
}

fn default_personas() -> u32 {
    2
}

fn default_modo() -> String {
    "Almuerzos".into()
}

impl Default for MenuRequest {
    fn default() -> Self {
        Self {
            ciudad: default_ciudad(),
            personas: default_personas(),
            modo: default_modo(),
            dietas: None,
            alergias: None,
            equipos: None,
        }
    }
}

/// Which path produced the plan
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanSource {
    /// Structurally valid model output
    Model,

    /// Both model attempts failed; deterministic week substituted
    Fallback,
}

/// A finished plan plus how it was obtained
#[derive(Clone, Debug)]
pub struct GeneratedPlan {
    pub plan: Plan,
    pub source: PlanSource,
}

/// Orchestrates model calls, validation, fallback and post-processing
pub struct MenuService {
    model: Arc<dyn ChatModel>,
    pricebook: Arc<Pricebook>,
}

impl MenuService {
    pub fn new(model: Arc<dyn ChatModel>, pricebook: Arc<Pricebook>) -> Self {
        Self { model, pricebook }
    }

    /// Generate a plan for the given preferences. Always succeeds: after
    /// two failed model attempts the fallback week is returned instead.
    pub async fn generate(&self, request: &MenuRequest) -> GeneratedPlan {
        let prompt = build_prompt(request);

        let mut plan: Option<Plan> = None;
        for attempt in 1..=2u8 {
            plan = self.ask_model(&prompt).await;
            if plan.is_some() {
                break;
            }
            tracing::warn!(attempt, model = self.model.name(), "menu attempt failed");
        }

        match plan {
            Some(mut plan) => {
                self.postprocess(&mut plan, request);
                GeneratedPlan {
                    plan,
                    source: PlanSource::Model,
                }
            }
            None => {
                tracing::info!("substituting deterministic fallback plan");
                GeneratedPlan {
                    plan: fallback_plan(
                        &request.ciudad,
                        request.personas,
                        &request.modo,
                        &self.pricebook,
                    ),
                    source: PlanSource::Fallback,
                }
            }
        }
    }

    /// One model attempt: call, parse, normalize units in place, validate.
    /// Any failure along the way is `None`, never an error.
    async fn ask_model(&self, prompt: &str) -> Option<Plan> {
        let raw = match self.model.complete_json(SYSTEM_PROMPT, prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "model call failed");
                return None;
            }
        };

        let mut value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
        normalize_ingredients_in_place(&mut value);

        let plan: Plan = serde_json::from_value(value).ok()?;
        plan.validate().ok()?;
        Some(plan)
    }

    /// Rebuild everything derived: the menu's ingredients are normalized
    /// and friendly-rounded once more, consolidated across the week,
    /// bucketed, costed, and the meta is reset from the request.
    fn postprocess(&self, plan: &mut Plan, request: &MenuRequest) {
        let flat: Vec<ItemQty> = plan
            .menu
            .iter()
            .flat_map(|day| {
                day.ingredientes
                    .iter()
                    .map(|it| normalize_unit(&it.name, it.qty, it.unit.as_str()))
            })
            .map(|mut it| {
                it.qty = round_friendly(it.qty, it.unit);
                it
            })
            .collect();

        let all = consolidate(&flat);
        plan.lista = build_lista(&all, &self.pricebook, &request.ciudad);
        plan.costos = build_costs(&plan.lista, &self.pricebook, &request.ciudad);
        plan.meta = Meta {
            ciudad: request.ciudad.clone(),
            personas: request.personas,
            modo: request.modo.clone(),
            moneda: Currency::Cop,
        };
    }
}

/// Normalize every `menu[].ingredientes[]` entry of a raw model response
/// before the plan is parsed, so sloppy units ("cucharada", "taza") do not
/// fail schema validation.
fn normalize_ingredients_in_place(value: &mut serde_json::Value) {
    let Some(days) = value.get_mut("menu").and_then(|m| m.as_array_mut()) else {
        return;
    };
    for day in days {
        let Some(items) = day.get_mut("ingredientes").and_then(|i| i.as_array_mut()) else {
            continue;
        };
        for item in items {
            let name = item
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string();
            let qty = item.get("qty").and_then(serde_json::Value::as_f64).unwrap_or(0.0);
            let unit = item
                .get("unit")
                .and_then(|v| v.as_str())
                .unwrap_or("g")
                .to_string();
            if let Ok(normalized) = serde_json::to_value(normalize_unit(&name, qty, &unit)) {
                *item = normalized;
            }
        }
    }
}

/// The instruction sent to the model: a 7-day plan in a strict JSON shape,
/// nothing outside JSON.
fn build_prompt(request: &MenuRequest) -> String {
    let mut lines = vec![
        format!(
            "Genera un plan semanal (7 días) en ESPAÑOL para {} persona(s) en {}.",
            request.personas, request.ciudad
        ),
        format!(
            "Modo: {}. Respeta dietas/equipos/alergias si vienen en el payload.",
            request.modo
        ),
    ];
    if let Some(dietas) = &request.dietas {
        lines.push(format!("Dietas: {dietas}."));
    }
    if let Some(alergias) = &request.alergias {
        lines.push(format!("Alergias: {alergias}."));
    }
    if let Some(equipos) = &request.equipos {
        lines.push(format!("Equipos disponibles: {equipos}."));
    }
    lines.extend([
        "Debes devolver **solo JSON** con el siguiente esquema (campos y tipos):".into(),
        "menu[7]{dia 1..7, plato, ingredientes[{name, qty, unit('g'|'ml'|'ud')}], pasos[], tip}"
            .into(),
        "lista{Categoria: ItemQty[]}, batch{baseA, baseB}, sobrantes[], meta{ciudad, personas, modo, moneda:'COP'}"
            .into(),
        "NO agregues texto fuera de JSON.".into(),
    ]);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CannedModel(&'static str);

    #[async_trait]
    impl ChatModel for CannedModel {
        fn name(&self) -> &str {
            "canned"
        }
        async fn complete_json(&self, _system: &str, _user: &str) -> crate::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl ChatModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }
        async fn complete_json(&self, _system: &str, _user: &str) -> crate::Result<String> {
            Err(MenuError::Provider("connection refused".into()))
        }
    }

    /// Fails the first call, answers the second
    struct FlakyModel {
        calls: AtomicUsize,
        response: &'static str,
    }

    #[async_trait]
    impl ChatModel for FlakyModel {
        fn name(&self) -> &str {
            "flaky"
        }
        async fn complete_json(&self, _system: &str, _user: &str) -> crate::Result<String> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(MenuError::Provider("timeout".into()))
            } else {
                Ok(self.response.to_string())
            }
        }
    }

    fn valid_model_json() -> &'static str {
        r#"{
            "menu": [
                {"dia": 1, "plato": "Arroz con pollo",
                 "ingredientes": [
                    {"name": "arroz", "qty": 180, "unit": "g"},
                    {"name": "pollo pechuga", "qty": 1, "unit": "taza"},
                    {"name": "aceite", "qty": 5, "unit": "cucharada"}],
                 "pasos": ["Preparar", "Servir"], "tip": ""},
                {"dia": 2, "plato": "Pasta", "ingredientes": [{"name": "pasta", "qty": 220, "unit": "g"}], "pasos": ["Cocer"]},
                {"dia": 3, "plato": "Arepas", "ingredientes": [{"name": "arepa", "qty": 2, "unit": "unidades"}, {"name": "huevo", "qty": 2, "unit": "g"}], "pasos": ["Asar"]},
                {"dia": 4, "plato": "Verduras", "ingredientes": [{"name": "brocoli", "qty": 240, "unit": "g"}], "pasos": ["Saltear"]},
                {"dia": 5, "plato": "Sopa", "ingredientes": [{"name": "papa", "qty": 300, "unit": "g"}, {"name": "caldo de pollo", "qty": 2, "unit": "taza"}], "pasos": ["Hervir"]},
                {"dia": 6, "plato": "Tacos", "ingredientes": [{"name": "tortilla", "qty": 4, "unit": "ud"}], "pasos": ["Armar"]},
                {"dia": 7, "plato": "Arroz frito", "ingredientes": [{"name": "arroz", "qty": 160, "unit": "g"}], "pasos": ["Freír"]}
            ],
            "meta": {"ciudad": "", "personas": 2, "modo": "Almuerzos", "moneda": "COP"}
        }"#
    }

    fn service(model: Arc<dyn ChatModel>) -> MenuService {
        MenuService::new(model, Arc::new(Pricebook::builtin().unwrap()))
    }

    fn request() -> MenuRequest {
        MenuRequest {
            ciudad: "Bogotá, CO".into(),
            personas: 2,
            ..MenuRequest::default()
        }
    }

    #[tokio::test]
    async fn test_valid_model_output_is_postprocessed() {
        let svc = service(Arc::new(CannedModel(valid_model_json())));
        let generated = svc.generate(&request()).await;

        assert_eq!(generated.source, PlanSource::Model);
        let plan = &generated.plan;
        assert!(plan.validate().is_ok());

        // arroz on days 1 and 7 consolidates into one Granos line
        let granos = &plan.lista["Granos"];
        let arroz: Vec<_> = granos.iter().filter(|i| i.name == "arroz").collect();
        assert_eq!(arroz.len(), 1);
        assert_eq!(arroz[0].qty, 350.0); // 180 + 160 rounded to 350

        // huevo forced to a count despite the model saying grams
        let proteina = &plan.lista["Proteína"];
        assert!(proteina.iter().any(|i| i.name == "huevo"
            && i.unit == platy_core::Unit::Count));

        // caldo cup converted to milliliters, bucketed as Otros
        assert!(plan.lista["Otros"]
            .iter()
            .any(|i| i.unit == platy_core::Unit::Milliliter));

        assert_eq!(plan.meta.ciudad, "Bogotá, CO");
        assert!(plan.costos.total > 0);
    }

    #[tokio::test]
    async fn test_two_failures_yield_fallback() {
        let svc = service(Arc::new(FailingModel));
        let generated = svc.generate(&request()).await;

        assert_eq!(generated.source, PlanSource::Fallback);
        let expected = fallback_plan(
            "Bogotá, CO",
            2,
            "Almuerzos",
            &Pricebook::builtin().unwrap(),
        );
        assert_eq!(generated.plan, expected);
    }

    #[tokio::test]
    async fn test_unparseable_json_falls_back() {
        let svc = service(Arc::new(CannedModel("this is not json")));
        let generated = svc.generate(&request()).await;
        assert_eq!(generated.source, PlanSource::Fallback);
    }

    #[tokio::test]
    async fn test_wrong_day_count_falls_back() {
        let six_days = r#"{
            "menu": [
                {"dia": 1, "plato": "A", "ingredientes": [{"name": "arroz", "qty": 100, "unit": "g"}], "pasos": ["x"]},
                {"dia": 2, "plato": "B", "ingredientes": [{"name": "arroz", "qty": 100, "unit": "g"}], "pasos": ["x"]},
                {"dia": 3, "plato": "C", "ingredientes": [{"name": "arroz", "qty": 100, "unit": "g"}], "pasos": ["x"]},
                {"dia": 4, "plato": "D", "ingredientes": [{"name": "arroz", "qty": 100, "unit": "g"}], "pasos": ["x"]},
                {"dia": 5, "plato": "E", "ingredientes": [{"name": "arroz", "qty": 100, "unit": "g"}], "pasos": ["x"]},
                {"dia": 6, "plato": "F", "ingredientes": [{"name": "arroz", "qty": 100, "unit": "g"}], "pasos": ["x"]}
            ],
            "meta": {"ciudad": "", "personas": 2, "modo": "Almuerzos", "moneda": "COP"}
        }"#;
        let svc = service(Arc::new(CannedModel(six_days)));
        let generated = svc.generate(&request()).await;
        assert_eq!(generated.source, PlanSource::Fallback);
    }

    #[tokio::test]
    async fn test_second_attempt_can_succeed() {
        let svc = service(Arc::new(FlakyModel {
            calls: AtomicUsize::new(0),
            response: valid_model_json(),
        }));
        let generated = svc.generate(&request()).await;
        assert_eq!(generated.source, PlanSource::Model);
    }

    #[test]
    fn test_prompt_mentions_request_and_schema() {
        let mut req = request();
        req.alergias = Some("maní".into());
        let prompt = build_prompt(&req);
        assert!(prompt.contains("2 persona(s)"));
        assert!(prompt.contains("Bogotá, CO"));
        assert!(prompt.contains("Alergias: maní."));
        assert!(prompt.contains("solo JSON"));
        assert!(prompt.contains("menu[7]"));
    }

    #[test]
    fn test_request_defaults() {
        let req: MenuRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.ciudad, "Bogotá, CO");
        assert_eq!(req.personas, 2);
        assert_eq!(req.modo, "Almuerzos");
    }
}
