//! UI Components

use leptos::prelude::*;
use platy_core::{Day, ItemQty};

/// Wizard progress dots
#[component]
pub fn StepperDots(total: usize, current: usize) -> impl IntoView {
    view! {
        <div class="stepper">
            {(0..total)
                .map(|i| {
                    let class = if i == current { "dot dot-active" } else { "dot" };
                    view! { <span class=class></span> }
                })
                .collect_view()}
        </div>
    }
}

/// One day of the menu
#[component]
pub fn DayCard(day: Day) -> impl IntoView {
    let has_tip = !day.tip.is_empty();
    view! {
        <div class="day-card">
            <h3>{format!("Día {} · {}", day.dia, day.plato)}</h3>
            <ul class="ingredients">
                {day.ingredientes
                    .iter()
                    .map(|it| view! { <li>{format_item(it)}</li> })
                    .collect_view()}
            </ul>
            <ol class="steps">
                {day.pasos.iter().map(|p| view! { <li>{p.clone()}</li> }).collect_view()}
            </ol>
            <Show when=move || has_tip>
                <p class="tip">{day.tip.clone()}</p>
            </Show>
        </div>
    }
}

/// One category of the shopping list
#[component]
pub fn ListaSection(categoria: String, items: Vec<ItemQty>) -> impl IntoView {
    view! {
        <div class="lista-section">
            <h4>{categoria}</h4>
            <ul>
                {items
                    .iter()
                    .map(|it| {
                        let cost = it
                            .est_cop
                            .map(|c| format!(" · ~${:.0} COP", c))
                            .unwrap_or_default();
                        view! { <li>{format!("{}{cost}", format_item(it))}</li> }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}

fn format_item(it: &ItemQty) -> String {
    format!("{} {} {}", it.qty, it.unit, it.name)
}
