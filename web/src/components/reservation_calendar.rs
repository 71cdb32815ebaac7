use std::collections::BTreeSet;

use chrono::{Datelike, Months, NaiveDate};
use leptos::prelude::*;
use thaw::*;

const WEEKDAYS: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

const MONTHS: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Month calendar where occupied dates cannot be picked.
#[component]
pub fn ReservationCalendar(
    #[prop(into)] occupied_dates: Signal<BTreeSet<NaiveDate>>,
    #[prop(into)] selected_date: Signal<Option<NaiveDate>>,
    on_date_change: impl Fn(NaiveDate) + 'static + Copy + Send + Sync,
) -> impl IntoView {
    let today = chrono::Local::now().date_naive();
    let visible_month = RwSignal::new(occupied_dates.with_untracked(|occupied| {
        initial_month(selected_date.get_untracked(), occupied, today)
    }));
    let navigated = StoredValue::new(false);

    // Follow the loaded availability until the user pages through months.
    Effect::new(move |_| {
        let month = occupied_dates.with(|occupied| initial_month(selected_date.get(), occupied, today));
        if !navigated.get_value() {
            visible_month.set(month);
        }
    });

    view! {
        <div class="reservation-calendar">
            <div class="date-picker-header">
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=move |_| {
                        navigated.set_value(true);
                        visible_month.update(|month| *month = shift_month(*month, -1));
                    }
                >
                    "←"
                </Button>

                <div class="month-label">
                    {move || month_label(visible_month.get())}
                </div>

                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=move |_| {
                        navigated.set_value(true);
                        visible_month.update(|month| *month = shift_month(*month, 1));
                    }
                >
                    "→"
                </Button>
            </div>

            <div class="date-picker-calendar">
                <div class="weekday-headers">
                    {WEEKDAYS
                        .iter()
                        .map(|day| view! { <div class="weekday-header">{*day}</div> })
                        .collect_view()}
                </div>

                <div class="calendar-days">
                    {move || {
                        let occupied = occupied_dates.get();
                        let selected = selected_date.get();

                        month_grid(visible_month.get())
                            .into_iter()
                            .map(|cell| match cell {
                                Some(date) => {
                                    let is_occupied = occupied.contains(&date);
                                    let is_selected = selected == Some(date);

                                    view! {
                                        <button
                                            class="calendar-day"
                                            class:available=!is_occupied
                                            class:unavailable=is_occupied
                                            class:selected=is_selected
                                            disabled=is_occupied
                                            on:click=move |_| {
                                                if !is_occupied {
                                                    on_date_change(date);
                                                }
                                            }
                                        >
                                            {date.day()}
                                        </button>
                                    }
                                    .into_any()
                                }
                                None => view! { <div class="calendar-day empty"></div> }.into_any(),
                            })
                            .collect_view()
                    }}
                </div>
            </div>
        </div>
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Month shown first: the selected date, else the earliest occupied date,
/// else `today`.
fn initial_month(
    selected: Option<NaiveDate>,
    occupied: &BTreeSet<NaiveDate>,
    today: NaiveDate,
) -> NaiveDate {
    first_of_month(selected.or_else(|| occupied.first().copied()).unwrap_or(today))
}

fn shift_month(first: NaiveDate, offset: i32) -> NaiveDate {
    let months = Months::new(offset.unsigned_abs());
    let shifted = if offset >= 0 {
        first.checked_add_months(months)
    } else {
        first.checked_sub_months(months)
    };
    shifted.unwrap_or(first)
}

fn month_label(first: NaiveDate) -> String {
    format!("{} {}", MONTHS[first.month0() as usize], first.year())
}

/// Cells of a Sunday-first month view; `None` pads the first week.
fn month_grid(first: NaiveDate) -> Vec<Option<NaiveDate>> {
    let padding = first.weekday().num_days_from_sunday() as usize;
    let next_month = shift_month(first, 1);

    std::iter::repeat(None)
        .take(padding)
        .chain(
            first
                .iter_days()
                .take_while(|day| *day < next_month)
                .map(Some),
        )
        .collect()
}
