//! Main App Component

use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::pages::{AdminPage, CheckoutPage, HomePage, ProPage, ThanksPage};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Página no encontrada"</p> }>
                    <Route path=path!("/") view=HomePage />
                    <Route path=path!("/pro") view=ProPage />
                    <Route path=path!("/checkout") view=CheckoutPage />
                    <Route path=path!("/thanks") view=ThanksPage />
                    <Route path=path!("/admin") view=AdminPage />
                </Routes>
            </main>
        </Router>
    }
}
