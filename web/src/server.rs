use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::server;
use shared_types::{BookingOptions, HourSlot, User};

#[cfg(feature = "ssr")]
use crate::db::{repository, store::get_catalog};

#[cfg(feature = "ssr")]
fn catalog() -> Result<&'static shared_types::Catalog, ServerFnError> {
    get_catalog().map_err(|e| ServerFnError::new(format!("Catalog error: {}", e)))
}

#[server]
pub async fn get_booking_options() -> Result<BookingOptions, ServerFnError> {
    let options = repository::get_booking_options(catalog()?);
    tracing::debug!(
        zones = options.zones.len(),
        places = options.places.len(),
        courts = options.courts.len(),
        "Serving booking options"
    );
    Ok(options)
}

#[server]
pub async fn get_occupied_dates() -> Result<Vec<NaiveDate>, ServerFnError> {
    Ok(repository::get_occupied_dates(catalog()?))
}

#[server]
pub async fn get_occupied_hours(date: String) -> Result<Vec<HourSlot>, ServerFnError> {
    match repository::get_occupied_hours(catalog()?, &date) {
        Ok(hours) => {
            tracing::debug!(%date, occupied = hours.len(), "Serving occupied hours");
            Ok(hours)
        }
        Err(e) => {
            tracing::warn!(%date, "Rejected occupied hours lookup: {}", e);
            Err(ServerFnError::new(e.to_string()))
        }
    }
}

#[server]
pub async fn get_bookable_hours() -> Result<Vec<HourSlot>, ServerFnError> {
    Ok(repository::get_bookable_hours(catalog()?))
}

#[server]
pub async fn get_user() -> Result<User, ServerFnError> {
    Ok(repository::get_user(catalog()?))
}
