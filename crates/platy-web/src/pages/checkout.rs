//! Checkout Page
//!
//! Client-side redirect to the hosted Wompi payment link. No server state
//! is created; confirmation happens on /thanks after the gateway calls
//! back.

use leptos::prelude::*;

use crate::api;

#[component]
pub fn CheckoutPage() -> impl IntoView {
    // None = still loading the site config
    let (link, set_link) = signal(None::<Option<String>>);

    leptos::task::spawn_local(async move {
        let checkout = api::fetch_site().await.ok().and_then(|site| site.checkout_link);
        if let (Some(url), Some(window)) = (checkout.as_ref(), web_sys::window()) {
            let _ = window.location().set_href(url);
        }
        set_link.set(Some(checkout));
    });

    view! {
        <div class="checkout">
            <h1>"Redirigiendo al pago seguro…"</h1>
            {move || match link.get() {
                None => view! { <p>"Un momento…"</p> }.into_any(),
                Some(Some(url)) => {
                    view! {
                        <div>
                            <p>"Si no avanza automáticamente, toca el botón:"</p>
                            <a href=url class="btn btn-primary">"Ir a pagar en Wompi"</a>
                        </div>
                    }
                        .into_any()
                }
                Some(None) => {
                    view! {
                        <div>
                            <p>
                                "Configura "<code>"PUBLIC_WOMPI_LINK"</code>
                                " con tu enlace de pago de Wompi."
                            </p>
                            <a href="/" class="btn">"Volver"</a>
                        </div>
                    }
                        .into_any()
                }
            }}
            <p class="fine-print">"Pago único · Sin mensualidades · Garantía de 7 días"</p>
        </div>
    }
}
