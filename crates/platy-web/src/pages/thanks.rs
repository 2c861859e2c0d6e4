//! Thanks Page
//!
//! Confirms the payment after the gateway redirect. With a transaction id
//! in the query it verifies directly; without one it scans the most recent
//! transactions for an approved one, since the payment link does not
//! always append the id.

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;

use crate::api;

#[derive(Clone, Copy, PartialEq, Eq)]
enum VerifyState {
    Loading,
    Confirmed,
    Failed,
}

#[component]
pub fn ThanksPage() -> impl IntoView {
    let query = use_query_map();
    let (state, set_state) = signal(VerifyState::Loading);

    let id = query.with_untracked(|q| q.get("id").unwrap_or_default());

    leptos::task::spawn_local(async move {
        let ok = if id.is_empty() {
            match api::recent_transactions(5).await {
                Ok(transactions) => {
                    let approved = transactions
                        .iter()
                        .find(|t| t["status"] == "APPROVED")
                        .and_then(|t| t["id"].as_str().map(str::to_string));
                    match approved {
                        Some(id) => api::verify_transaction(&id).await,
                        None => false,
                    }
                }
                Err(_) => false,
            }
        } else {
            api::verify_transaction(&id).await
        };
        set_state.set(if ok {
            VerifyState::Confirmed
        } else {
            VerifyState::Failed
        });
    });

    view! {
        <div class="thanks">
            {move || match state.get() {
                VerifyState::Loading => {
                    view! { <h1>"Confirmando tu pago…"</h1> }.into_any()
                }
                VerifyState::Confirmed => {
                    view! {
                        <div>
                            <h1>"¡Acceso activado! 🎉"</h1>
                            <p>"Ya puedes usar Platy con acceso vitalicio."</p>
                            <a href="/pro" class="btn btn-primary">"Ir a Platy Pro"</a>
                        </div>
                    }
                        .into_any()
                }
                VerifyState::Failed => {
                    view! {
                        <div>
                            <h1>"No pudimos confirmar el pago"</h1>
                            <p>
                                "Si tu pago fue aprobado, vuelve a abrir este enlace desde el "
                                "mismo navegador o escríbenos para activarte manualmente."
                            </p>
                            <div class="actions">
                                <a href="/admin" class="btn">"Contactar soporte"</a>
                                <a href="/" class="btn">"Volver"</a>
                            </div>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
