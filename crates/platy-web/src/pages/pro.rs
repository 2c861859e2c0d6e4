//! Wizard Page
//!
//! Multi-step intake (city, headcount, mode, allergies) feeding
//! `/generate-menu`, then the plan view with a plain-text export. All form
//! state lives in memory for the tab session; the export blob URL is
//! revoked on replacement and on teardown.

use leptos::prelude::*;
use platy_core::Plan;

use crate::api::{self, ApiError, WizardForm};
use crate::components::{DayCard, ListaSection, StepperDots};
use crate::export;

const CITIES: &[&str] = &["Bogotá, CO", "Medellín, CO", "Cali, CO", "Barranquilla, CO"];
const MODES: &[&str] = &["Almuerzos", "Cenas", "Ambos"];

#[component]
pub fn ProPage() -> impl IntoView {
    let (step, set_step) = signal(0usize);
    let (ciudad, set_ciudad) = signal(CITIES[0].to_string());
    let (personas, set_personas) = signal(2u32);
    let (modo, set_modo) = signal(MODES[0].to_string());
    let (alergias, set_alergias) = signal(String::new());
    let (plan, set_plan) = signal(None::<Plan>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<ApiError>);
    let (export_url, set_export_url) = signal(None::<String>);

    // blob URLs hold memory until revoked
    on_cleanup(move || {
        if let Some(url) = export_url.get_untracked() {
            export::revoke_url(&url);
        }
    });

    let generate = move |_| {
        if loading.get() {
            return;
        }
        set_loading.set(true);
        set_error.set(None);

        let form = WizardForm {
            ciudad: ciudad.get(),
            personas: personas.get(),
            modo: modo.get(),
            alergias: Some(alergias.get()).filter(|a| !a.is_empty()),
        };

        leptos::task::spawn_local(async move {
            match api::generate_menu(&form).await {
                Ok(generated) => {
                    set_plan.set(Some(generated));
                    set_step.set(3);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let export_plan = move |_| {
        if let Some(plan) = plan.get() {
            if let Some(old) = export_url.get() {
                export::revoke_url(&old);
            }
            set_export_url.set(export::create_text_url(&export::plan_to_text(&plan)));
        }
    };

    view! {
        <div class="wizard">
            <h1>"Platy Pro"</h1>
            {move || view! { <StepperDots total=4 current=step.get() /> }}

            <Show when=move || step.get() == 0>
                <div class="step">
                    <label>"¿En qué ciudad compras?"</label>
                    <select on:change=move |ev| set_ciudad.set(event_target_value(&ev))>
                        {CITIES
                            .iter()
                            .map(|c| view! { <option value=*c selected=move || ciudad.get() == *c>{*c}</option> })
                            .collect_view()}
                    </select>
                    <button class="btn btn-primary" on:click=move |_| set_step.set(1)>
                        "Siguiente"
                    </button>
                </div>
            </Show>

            <Show when=move || step.get() == 1>
                <div class="step">
                    <label>"¿Para cuántas personas?"</label>
                    <input
                        type="number"
                        min="1"
                        max="8"
                        prop:value=move || personas.get().to_string()
                        on:input=move |ev| {
                            if let Ok(n) = event_target_value(&ev).parse::<u32>() {
                                set_personas.set(n.clamp(1, 8));
                            }
                        }
                    />
                    <label>"¿Qué comidas planeamos?"</label>
                    <select on:change=move |ev| set_modo.set(event_target_value(&ev))>
                        {MODES
                            .iter()
                            .map(|m| view! { <option value=*m selected=move || modo.get() == *m>{*m}</option> })
                            .collect_view()}
                    </select>
                    <div class="nav">
                        <button class="btn" on:click=move |_| set_step.set(0)>"Atrás"</button>
                        <button class="btn btn-primary" on:click=move |_| set_step.set(2)>
                            "Siguiente"
                        </button>
                    </div>
                </div>
            </Show>

            <Show when=move || step.get() == 2>
                <div class="step">
                    <label>"Alergias o restricciones (opcional)"</label>
                    <textarea
                        placeholder="maní, lactosa..."
                        prop:value=move || alergias.get()
                        on:input=move |ev| set_alergias.set(event_target_value(&ev))
                    />
                    <div class="nav">
                        <button class="btn" on:click=move |_| set_step.set(1)>"Atrás"</button>
                        <button class="btn btn-primary" on:click=generate disabled=move || loading.get()>
                            {move || if loading.get() { "Cocinando tu plan..." } else { "Generar menú" }}
                        </button>
                    </div>
                </div>
            </Show>

            {move || {
                error
                    .get()
                    .map(|e| match e {
                        ApiError::TrialsLimit => {
                            view! {
                                <div class="paywall">
                                    <p>"Se acabaron tus intentos gratis."</p>
                                    <a href="/checkout" class="btn btn-primary">
                                        "Obtener acceso de por vida"
                                    </a>
                                </div>
                            }
                                .into_any()
                        }
                        ApiError::Other(msg) => {
                            view! { <p class="error">{format!("Algo salió mal: {msg}")}</p> }
                                .into_any()
                        }
                    })
            }}

            <Show when=move || step.get() == 3>
                {move || {
                    plan.get()
                        .map(|plan| {
                            view! {
                                <div class="plan">
                                    <h2>{format!(
                                        "Tu semana en {} para {} persona(s)",
                                        plan.meta.ciudad, plan.meta.personas
                                    )}</h2>

                                    <div class="menu">
                                        {plan
                                            .menu
                                            .iter()
                                            .map(|day| view! { <DayCard day=day.clone() /> })
                                            .collect_view()}
                                    </div>

                                    <h2>"Lista de compras"</h2>
                                    <div class="lista">
                                        {plan
                                            .lista
                                            .iter()
                                            .map(|(categoria, items)| {
                                                view! {
                                                    <ListaSection
                                                        categoria=categoria.clone()
                                                        items=items.clone()
                                                    />
                                                }
                                            })
                                            .collect_view()}
                                    </div>

                                    <p class="total">
                                        {format!(
                                            "Total estimado: ${} COP · {}",
                                            plan.costos.total, plan.costos.nota
                                        )}
                                    </p>

                                    <div class="actions">
                                        <button class="btn" on:click=export_plan>
                                            "Preparar descarga"
                                        </button>
                                        {move || {
                                            export_url
                                                .get()
                                                .map(|url| {
                                                    view! {
                                                        <a
                                                            href=url
                                                            download="platy-plan.txt"
                                                            class="btn btn-primary"
                                                        >
                                                            "Descargar plan"
                                                        </a>
                                                    }
                                                })
                                        }}
                                        <button class="btn" on:click=move |_| set_step.set(2)>
                                            "Generar otro"
                                        </button>
                                    </div>
                                </div>
                            }
                        })
                }}
            </Show>
        </div>
    }
}
