//! Landing Page

use leptos::prelude::*;

use crate::api;

#[component]
pub fn HomePage() -> impl IntoView {
    let (lifetime_usd, set_lifetime_usd) = signal(9.97f64);
    let (free_trials, set_free_trials) = signal(3u32);

    leptos::task::spawn_local(async move {
        if let Ok(site) = api::fetch_site().await {
            set_lifetime_usd.set(site.lifetime_usd);
            set_free_trials.set(site.free_trials);
        }
    });

    view! {
        <div class="home">
            <header class="hero">
                <h1>"PLATY"</h1>
                <p class="tagline">"Tu menú semanal con lista de compras y costos, en un minuto"</p>
                <div class="cta">
                    <a href="/pro" class="btn btn-primary">"Crear mi menú"</a>
                    <a href="#oferta" class="btn">"Ver oferta"</a>
                </div>
            </header>

            <section class="features">
                <div class="feature">
                    <h3>"🍲 7 días resueltos"</h3>
                    <p>"Un plato por día con pasos simples y bases que se reaprovechan."</p>
                </div>
                <div class="feature">
                    <h3>"🛒 Lista consolidada"</h3>
                    <p>"Una sola compra semanal, agrupada por categoría y con cantidades redondeadas."</p>
                </div>
                <div class="feature">
                    <h3>"💰 Costos por ciudad"</h3>
                    <p>"Estimados en COP según los precios de tu ciudad."</p>
                </div>
            </section>

            <section id="oferta" class="offer">
                <h2>"Acceso de por vida"</h2>
                <div class="price">
                    {move || format!("${:.2} USD", lifetime_usd.get())}
                    <span>" · pago único"</span>
                </div>
                <p>
                    {move || {
                        format!(
                            "Acceso de por vida. {} intentos gratis para probar.",
                            free_trials.get()
                        )
                    }}
                </p>
                <a href="/checkout" class="btn btn-primary">"Comprar ahora"</a>
                <p class="fine-print">"Pago único · Sin mensualidades · Garantía de 7 días"</p>
            </section>
        </div>
    }
}
