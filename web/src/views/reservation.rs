use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use shared_types::{
    PaymentField, PriceSummary, ReservationEvent, ReservationState, Transition,
    SUCCESS_BANNER_DURATION,
};
use thaw::*;

use crate::components::{
    Dropdown, ErrorView, HourSelector, LoadingView, PaymentForm, ReservationCalendar,
    SuccessBanner,
};
use crate::server::{
    get_bookable_hours, get_booking_options, get_occupied_dates, get_occupied_hours, get_user,
};

const RESERVATION_STEPS: [&str; 4] = [
    "Selecciona tu zona o ciudad y el lugar donde deseas alquilar una cancha.",
    "Elige el tipo de cancha y la cancha específica que mejor se adapte a tu equipo.",
    "Selecciona la fecha y el horario disponible que prefieras.",
    "Ingresa tu método de pago y confirma la reservación.",
];

const PAYMENT_NOTE: &str =
    "Tu pago se procesa de forma segura. No almacenamos los datos de tu tarjeta.";

#[component]
pub fn ReservationPage() -> impl IntoView {
    let state = RwSignal::new(ReservationState::new());

    // Rejected events are logged and leave the state as it was.
    let dispatch = move |event: ReservationEvent| -> Option<Transition> {
        match state.try_update(|s| s.apply(event))? {
            Ok(transition) => Some(transition),
            Err(e) => {
                warn!("Reservation event rejected: {}", e);
                None
            }
        }
    };

    let booking_options = Resource::new(|| (), |_| get_booking_options());
    let occupied_dates = Resource::new(|| (), |_| get_occupied_dates());
    let bookable_hours = Resource::new(|| (), |_| get_bookable_hours());
    let user = Resource::new(|| (), |_| get_user());

    Effect::new(move |_| match booking_options.get() {
        Some(Ok(options)) => {
            dispatch(ReservationEvent::OptionsLoaded(options));
        }
        Some(Err(e)) => error!("Failed to load booking options: {}", e),
        None => {}
    });

    Effect::new(move |_| match occupied_dates.get() {
        Some(Ok(dates)) => {
            dispatch(ReservationEvent::OccupiedDatesLoaded(dates));
        }
        Some(Err(e)) => error!("Failed to load occupied dates: {}", e),
        None => {}
    });

    let selected_date = Memo::new(move |_| state.with(|s| s.selected_date()));

    // Responses for a date that is no longer selected are dropped by the state.
    Effect::new(move |_| {
        if let Some(date) = selected_date.get() {
            spawn_local(async move {
                match get_occupied_hours(date.format("%Y-%m-%d").to_string()).await {
                    Ok(hours) => {
                        dispatch(ReservationEvent::OccupiedHoursLoaded { date, hours });
                    }
                    Err(e) => error!("Failed to load occupied hours for {}: {}", date, e),
                }
            });
        }
    });

    let load_error = Signal::derive(move || {
        [
            booking_options.get().and_then(Result::err),
            occupied_dates.get().and_then(Result::err),
            bookable_hours.get().and_then(Result::err),
        ]
        .into_iter()
        .flatten()
        .next()
        .map(|e| format!("No se pudieron cargar los datos de la reservación: {}", e))
    });

    let occupied_date_set = Memo::new(move |_| state.with(|s| s.occupied_dates().clone()));
    let occupied_hours = Memo::new(move |_| state.with(|s| s.occupied_hours().clone()));
    let selected_hours = Memo::new(move |_| state.with(|s| s.selected_hours().clone()));
    let payment = Memo::new(move |_| state.with(|s| s.payment().clone()));
    let selection = Memo::new(move |_| state.with(|s| s.selection().clone()));
    let priced_court = Memo::new(move |_| state.with(|s| s.priced_court()));
    let summary = Memo::new(move |_| state.with(|s| s.summary()));
    let can_confirm = Memo::new(move |_| state.with(|s| s.can_confirm()));
    let payment_succeeded = Memo::new(move |_| state.with(|s| s.payment_succeeded()));
    let hours = Signal::derive(move || {
        bookable_hours
            .get()
            .and_then(Result::ok)
            .unwrap_or_default()
    });

    let banner_timer = StoredValue::new(None::<TimeoutHandle>);

    let confirm = move || {
        let Some(Transition::Confirmed(reservation)) = dispatch(ReservationEvent::Confirmed) else {
            return;
        };

        log!(
            "Reservation confirmed: {} on {} from {} to {}, total {}, card ending {}",
            reservation.court.name,
            reservation.date,
            reservation.summary.start_hour,
            reservation.summary.end_hour,
            reservation.summary.total,
            reservation.card_last4
        );

        match set_timeout_with_handle(
            move || {
                dispatch(ReservationEvent::BannerExpired);
            },
            SUCCESS_BANNER_DURATION,
        ) {
            Ok(handle) => banner_timer.update_value(|slot| {
                if let Some(previous) = slot.replace(handle) {
                    previous.clear();
                }
            }),
            Err(e) => error!("Failed to schedule banner dismissal: {:?}", e),
        }
    };

    on_cleanup(move || {
        banner_timer.try_update_value(|slot| {
            if let Some(handle) = slot.take() {
                handle.clear();
            }
        });
    });

    let on_payment_change = move |field: PaymentField, value: String| {
        let event = match field {
            PaymentField::CardNumber => ReservationEvent::CardNumberChanged(value),
            PaymentField::Expiry => ReservationEvent::ExpiryChanged(value),
            PaymentField::Cvv => ReservationEvent::CvvChanged(value),
        };
        dispatch(event);
    };

    view! {
        <div class="reservation-page">
            <section class="reservation-intro">
                <h1 class="reservation-title">"Crear reservación"</h1>
                <p class="reservation-subtitle">
                    "Sigue estos pasos para reservar tu cancha de forma rápida y segura."
                </p>
                <ul class="reservation-steps">
                    <li class="reservation-steps-heading">"Pasos para reservar tu cancha:"</li>
                    {numbered_steps()
                        .into_iter()
                        .map(|step| view! { <li>{step}</li> })
                        .collect_view()}
                    <li class="reservation-steps-heading">"¡Listo! Solo te queda llegar a jugar."</li>
                </ul>
            </section>

            <Suspense fallback=|| view! { <LoadingView message="Cargando opciones de reservación...".to_string() /> }>
                {move || load_error.get().map(|message| view! { <ErrorView message=Some(message) /> })}
            </Suspense>

            <section class="reservation-section">
                <h2>"1. Elige tu cancha"</h2>
                <div class="reservation-dropdowns">
                    <Dropdown
                        id="zone"
                        label="Zona"
                        options=Signal::derive(move || state.with(|s| s.zone_options()))
                        value=Signal::derive(move || selection.with(|s| s.zone.clone()))
                        on_change=move |zone| {
                            dispatch(ReservationEvent::ZoneSelected(zone));
                        }
                    />
                    <Dropdown
                        id="place"
                        label="Lugar"
                        options=Signal::derive(move || state.with(|s| s.place_options()))
                        value=Signal::derive(move || selection.with(|s| s.place.clone()))
                        on_change=move |place| {
                            dispatch(ReservationEvent::PlaceSelected(place));
                        }
                    />
                    <Dropdown
                        id="court-type"
                        label="Tipo de cancha"
                        options=Signal::derive(move || state.with(|s| s.court_type_options()))
                        value=Signal::derive(move || selection.with(|s| s.court_type.clone()))
                        on_change=move |court_type| {
                            dispatch(ReservationEvent::CourtTypeSelected(court_type));
                        }
                    />
                    <Dropdown
                        id="court"
                        label="Cancha"
                        options=Signal::derive(move || state.with(|s| s.court_options()))
                        value=Signal::derive(move || selection.with(|s| s.court.clone()))
                        on_change=move |court| {
                            dispatch(ReservationEvent::CourtSelected(court));
                        }
                    />
                </div>
            </section>

            <section class="reservation-section">
                <h2>"2. Elige fecha y horario"</h2>
                <div class="reservation-schedule">
                    <ReservationCalendar
                        occupied_dates=occupied_date_set
                        selected_date=selected_date
                        on_date_change=move |date| {
                            dispatch(ReservationEvent::DateSelected(Some(date)));
                        }
                    />

                    {move || match selected_date.get() {
                        Some(date) => view! {
                            <div class="reservation-hours">
                                <h3>{format!("Horarios para el {}", date.format("%d/%m/%Y"))}</h3>
                                <HourSelector
                                    bookable_hours=hours
                                    occupied_hours=occupied_hours
                                    selected_hours=selected_hours
                                    on_hour_click=move |hour| {
                                        dispatch(ReservationEvent::HourToggled(hour));
                                    }
                                />
                            </div>
                        }
                        .into_any(),
                        None => view! {
                            <p class="reservation-hint">
                                "Selecciona una fecha para ver los horarios disponibles."
                            </p>
                        }
                        .into_any(),
                    }}
                </div>
            </section>

            <section class="reservation-section">
                <h2>"3. Datos personales"</h2>
                <Suspense fallback=|| view! { <LoadingView /> }>
                    {move || user.get().map(|result| match result {
                        Ok(user) => view! {
                            <div class="reservation-user">
                                <p><strong>"Nombre: "</strong>{user.name}</p>
                                <p><strong>"Correo: "</strong>{user.email}</p>
                            </div>
                        }
                        .into_any(),
                        Err(e) => view! {
                            <ErrorView message=Some(format!("No se pudo cargar el usuario: {}", e)) />
                        }
                        .into_any(),
                    })}
                </Suspense>
            </section>

            <section class="reservation-section">
                <h2>"4. Detalles de la reserva"</h2>
                <div class="reservation-details">
                    {move || {
                        let court = priced_court.get();
                        let detail = move |value: Option<String>| value.unwrap_or_else(|| "-".to_string());
                        view! {
                            <p><strong>"Lugar: "</strong>{detail(court.as_ref().map(|c| c.place.clone()))}</p>
                            <p><strong>"Zona: "</strong>{detail(court.as_ref().map(|c| c.zone.clone()))}</p>
                            <p><strong>"Cancha: "</strong>{detail(court.as_ref().map(|c| c.name.clone()))}</p>
                        }
                    }}
                    {move || {
                        let date = selected_date.get().map(|d| d.format("%d/%m/%Y").to_string());
                        let summary = summary.get();
                        let start = summary.as_ref().map(|s| s.start_hour.to_string());
                        let end = summary.as_ref().map(|s| s.end_hour.to_string());
                        let total = summary.as_ref().map(|s| s.total.to_string());
                        let blocks = summary
                            .as_ref()
                            .filter(|s| !s.is_contiguous())
                            .map(|s| {
                                s.blocks
                                    .iter()
                                    .map(ToString::to_string)
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            });

                        view! {
                            <p><strong>"Fecha: "</strong>{date.unwrap_or_else(|| "-".to_string())}</p>
                            <p><strong>"Entrada: "</strong>{start.unwrap_or_else(|| "-".to_string())}</p>
                            <p><strong>"Salida: "</strong>{end.unwrap_or_else(|| "-".to_string())}</p>
                            {blocks.map(|blocks| view! {
                                <p class="reservation-blocks"><strong>"Bloques: "</strong>{blocks}</p>
                            })}
                            <p class="reservation-total">
                                <strong>"Precio total: "</strong>{total.unwrap_or_else(|| "-".to_string())}
                            </p>
                        }
                    }}
                </div>
            </section>

            <section class="reservation-section">
                <h2>"5. Forma de pago"</h2>
                <Dropdown
                    id="payment-method"
                    label="Método de pago"
                    options=Signal::derive(move || state.with(|s| s.payment_method_options()))
                    value=Signal::derive(move || selection.with(|s| s.payment_method.clone()))
                    on_change=move |method| {
                        dispatch(ReservationEvent::PaymentMethodSelected(method));
                    }
                />
                <PaymentForm payment=payment on_change=on_payment_change />

                <Button
                    class="reservation-confirm"
                    appearance=ButtonAppearance::Primary
                    block=true
                    disabled=Signal::derive(move || !can_confirm.get())
                    on_click=move |_| confirm()
                >
                    {move || summary.with(|s| confirm_label(s.as_ref()))}
                </Button>

                <p class="reservation-note">
                    {PAYMENT_NOTE}
                </p>

                <SuccessBanner visible=payment_succeeded />
            </section>
        </div>
    }
}

fn numbered_steps() -> Vec<String> {
    RESERVATION_STEPS
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect()
}

/// The total is only quoted once at least one hour is picked.
fn confirm_label(summary: Option<&PriceSummary>) -> String {
    match summary {
        Some(summary) => format!("Confirmar y pagar - {}", summary.total),
        None => "Confirmar y pagar".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use shared_types::{HourSlot, Money, PriceSummary, SelectedHours};

    use super::{confirm_label, numbered_steps, PAYMENT_NOTE};

    #[test]
    fn test_confirm_label_quotes_total_only_with_hours() {
        assert_eq!(confirm_label(None), "Confirmar y pagar");

        let hours: SelectedHours = [10, 11].into_iter().filter_map(HourSlot::new).collect();
        let summary = PriceSummary::from_selection(&hours, Money::from_cents(1000)).unwrap();
        assert_eq!(confirm_label(Some(&summary)), "Confirmar y pagar - $20.00");
    }

    #[test]
    fn test_steps_are_numbered() {
        let steps = numbered_steps();
        assert_eq!(steps.len(), 4);
        assert!(steps[0].starts_with("1. Selecciona tu zona"));
        assert!(steps[3].starts_with("4. Ingresa tu método de pago"));
    }

    #[test]
    fn test_payment_note_promises_no_charge_or_email() {
        assert!(PAYMENT_NOTE.contains("No almacenamos los datos de tu tarjeta"));
        assert!(!PAYMENT_NOTE.contains("cobro"));
        assert!(!PAYMENT_NOTE.contains("correo"));
    }
}
