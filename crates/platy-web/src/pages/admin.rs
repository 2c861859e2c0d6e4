//! Admin Console
//!
//! Password login, recent gateway transactions and manual grant links.
//! The session lives in the 48-hour admin cookie; there is nothing to
//! remember client-side.

use leptos::prelude::*;

use crate::api;

#[component]
pub fn AdminPage() -> impl IntoView {
    let (logged, set_logged) = signal(false);
    let (password, set_password) = signal(String::new());
    let (recent, set_recent) = signal(Vec::<serde_json::Value>::new());
    let (email, set_email) = signal(String::new());
    let (grant_link, set_grant_link) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let login = move |_| {
        let pwd = password.get();
        leptos::task::spawn_local(async move {
            if api::admin_login(&pwd).await {
                set_logged.set(true);
            }
        });
    };

    let logout = move |_| {
        leptos::task::spawn_local(async move {
            api::admin_logout().await;
            set_logged.set(false);
        });
    };

    let load_recent = move |_| {
        set_loading.set(true);
        leptos::task::spawn_local(async move {
            if let Ok(transactions) = api::recent_transactions(20).await {
                set_recent.set(transactions);
            }
            set_loading.set(false);
        });
    };

    let grant = move |_| {
        set_loading.set(true);
        let target = email.get();
        leptos::task::spawn_local(async move {
            set_grant_link.set(api::admin_grant(&target).await.unwrap_or_default());
            set_loading.set(false);
        });
    };

    view! {
        <Show
            when=move || logged.get()
            fallback=move || {
                view! {
                    <div class="admin-login">
                        <h1>"Admin"</h1>
                        <p>"Ingresa tu clave de administrador"</p>
                        <input
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                        <button class="btn btn-primary" on:click=login>"Entrar"</button>
                        <p class="fine-print">"La sesión dura 48h en este dispositivo."</p>
                    </div>
                }
            }
        >
            <div class="admin-panel">
                <div class="panel-header">
                    <h1>"Panel Admin"</h1>
                    <button class="btn" on:click=logout>"Salir"</button>
                </div>

                <section class="panel-card">
                    <h2>"Transacciones recientes (Wompi)"</h2>
                    <button class="btn" on:click=load_recent>"Cargar últimas 20"</button>
                    <Show when=move || loading.get()>
                        <p>"Cargando…"</p>
                    </Show>
                    <table>
                        <thead>
                            <tr>
                                <th>"ID"</th>
                                <th>"Email"</th>
                                <th>"Monto"</th>
                                <th>"Estado"</th>
                                <th>"Fecha"</th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                recent
                                    .get()
                                    .iter()
                                    .map(|tx| {
                                        let amount = tx["amount_in_cents"]
                                            .as_i64()
                                            .map(|cents| {
                                                format!(
                                                    "${:.0} {}",
                                                    cents as f64 / 100.0,
                                                    tx["currency"].as_str().unwrap_or("COP"),
                                                )
                                            })
                                            .unwrap_or_else(|| "-".into());
                                        view! {
                                            <tr>
                                                <td>{tx["id"].as_str().unwrap_or("-").to_string()}</td>
                                                <td>
                                                    {tx["customer_email"]
                                                        .as_str()
                                                        .unwrap_or("-")
                                                        .to_string()}
                                                </td>
                                                <td>{amount}</td>
                                                <td>{tx["status"].as_str().unwrap_or("-").to_string()}</td>
                                                <td>{tx["created_at"].as_str().unwrap_or("-").to_string()}</td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </section>

                <section class="panel-card">
                    <h2>"Generar acceso manual"</h2>
                    <p>"Crea un link de activación para un email (útil si pagó por otro medio)."</p>
                    <div class="grant-form">
                        <input
                            placeholder="email@cliente.com"
                            prop:value=move || email.get()
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                        <button class="btn btn-primary" on:click=grant>"Generar"</button>
                    </div>
                    <Show when=move || !grant_link.get().is_empty()>
                        <div class="grant-link">
                            <p class="fine-print">"Link de activación (vence en 48h):"</p>
                            <a href=move || grant_link.get()>{move || grant_link.get()}</a>
                        </div>
                    </Show>
                </section>
            </div>
        </Show>
    }
}
