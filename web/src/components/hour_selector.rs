use std::collections::BTreeSet;

use leptos::prelude::*;
use shared_types::{HourSlot, SelectedHours};
use thaw::*;

#[component]
pub fn HourSelector(
    #[prop(into)] bookable_hours: Signal<Vec<HourSlot>>,
    #[prop(into)] occupied_hours: Signal<BTreeSet<HourSlot>>,
    #[prop(into)] selected_hours: Signal<SelectedHours>,
    on_hour_click: impl Fn(HourSlot) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    view! {
        <div class="hour-selector">
            {move || {
                let hours = bookable_hours.get();

                if hours.is_empty() {
                    view! {
                        <div class="time-slot-picker-empty">
                            <p>"No hay horarios disponibles para esta fecha."</p>
                        </div>
                    }
                    .into_any()
                } else {
                    view! {
                        <div class="time-slot-picker-grid">
                            {hours
                                .into_iter()
                                .map(|hour| {
                                    let is_occupied =
                                        Signal::derive(move || occupied_hours.with(|o| o.contains(&hour)));
                                    let appearance = Signal::derive(move || {
                                        if selected_hours.with(|s| s.contains(&hour)) {
                                            ButtonAppearance::Primary
                                        } else {
                                            ButtonAppearance::Secondary
                                        }
                                    });

                                    view! {
                                        <Button
                                            class="time-slot-button"
                                            appearance=appearance
                                            disabled=is_occupied
                                            on_click=move |_| on_hour_click(hour)
                                        >
                                            <div class="time-slot-button-content">
                                                <span class="time-slot-time">{hour.to_string()}</span>
                                                <span class="time-slot-label">
                                                    {move || if is_occupied.get() { "Ocupado" } else { "Disponible" }}
                                                </span>
                                            </div>
                                        </Button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
