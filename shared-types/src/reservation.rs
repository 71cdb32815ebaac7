//! State of the reservation screen and the events that change it.
//!
//! Every user interaction and every loader response becomes a
//! [`ReservationEvent`]; [`ReservationState::apply`] is the only way the
//! state moves. A rejected event leaves the state untouched.

use std::collections::BTreeSet;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{BookingOptions, CourtDetails, SelectOption};
use crate::hours::{HourSlot, SelectedHours};
use crate::payment::{PaymentError, PaymentFields};
use crate::pricing::PriceSummary;

/// How long the confirmation banner stays up after a successful payment.
pub const SUCCESS_BANNER_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReservationError {
    #[error("{0} is already booked")]
    HourOccupied(HourSlot),
    #[error("{0} is fully booked")]
    DateOccupied(NaiveDate),
    #[error("no date selected")]
    MissingDate,
    #[error("no hours selected")]
    MissingHours,
    #[error("no court available to price the reservation")]
    MissingCourt,
    #[error("unknown {kind} '{value}'")]
    UnknownOption { kind: &'static str, value: String },
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationEvent {
    OptionsLoaded(BookingOptions),
    OccupiedDatesLoaded(Vec<NaiveDate>),
    DateSelected(Option<NaiveDate>),
    OccupiedHoursLoaded { date: NaiveDate, hours: Vec<HourSlot> },
    HourToggled(HourSlot),
    ZoneSelected(Option<String>),
    PlaceSelected(Option<String>),
    CourtTypeSelected(Option<String>),
    CourtSelected(Option<String>),
    PaymentMethodSelected(Option<String>),
    CardNumberChanged(String),
    ExpiryChanged(String),
    CvvChanged(String),
    Confirmed,
    BannerExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Updated,
    /// The event carried nothing new, e.g. a stale loader response.
    Ignored,
    Confirmed(Reservation),
}

/// Receipt of a confirmed reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub date: NaiveDate,
    pub hours: Vec<HourSlot>,
    pub summary: PriceSummary,
    pub court: CourtDetails,
    pub payment_method: Option<String>,
    pub card_last4: String,
}

/// Values picked in the court and payment-method dropdowns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtSelection {
    pub zone: Option<String>,
    pub place: Option<String>,
    pub court_type: Option<String>,
    pub court: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationState {
    options: BookingOptions,
    occupied_dates: BTreeSet<NaiveDate>,
    selection: CourtSelection,
    selected_date: Option<NaiveDate>,
    occupied_hours: BTreeSet<HourSlot>,
    selected_hours: SelectedHours,
    payment: PaymentFields,
    payment_succeeded: bool,
}

impl ReservationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> &BookingOptions {
        &self.options
    }

    pub fn selection(&self) -> &CourtSelection {
        &self.selection
    }

    pub fn occupied_dates(&self) -> &BTreeSet<NaiveDate> {
        &self.occupied_dates
    }

    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    pub fn occupied_hours(&self) -> &BTreeSet<HourSlot> {
        &self.occupied_hours
    }

    pub fn selected_hours(&self) -> &SelectedHours {
        &self.selected_hours
    }

    pub fn payment(&self) -> &PaymentFields {
        &self.payment
    }

    pub fn payment_succeeded(&self) -> bool {
        self.payment_succeeded
    }

    pub fn is_payment_valid(&self) -> bool {
        self.payment.is_valid()
    }

    /// Court the total is priced with: the selected one, or the featured
    /// court while nothing is selected.
    pub fn priced_court(&self) -> Option<CourtDetails> {
        self.selection
            .court
            .as_deref()
            .and_then(|code| self.options.court_details(code))
            .or_else(|| self.options.featured_court_details())
    }

    pub fn summary(&self) -> Option<PriceSummary> {
        let court = self.priced_court()?;
        PriceSummary::from_selection(&self.selected_hours, court.price_per_hour)
    }

    /// First reason the reservation cannot be confirmed yet.
    pub fn confirm_blocker(&self) -> Option<ReservationError> {
        if self.selected_date.is_none() {
            return Some(ReservationError::MissingDate);
        }
        if self.selected_hours.is_empty() {
            return Some(ReservationError::MissingHours);
        }
        if self.priced_court().is_none() {
            return Some(ReservationError::MissingCourt);
        }
        self.payment.validate().err().map(ReservationError::from)
    }

    pub fn can_confirm(&self) -> bool {
        self.confirm_blocker().is_none()
    }

    pub fn zone_options(&self) -> Vec<SelectOption> {
        self.options.zone_options()
    }

    pub fn place_options(&self) -> Vec<SelectOption> {
        self.options
            .places_in(self.selection.zone.as_deref())
            .map(|p| SelectOption::new(&p.name, &p.code))
            .collect()
    }

    pub fn court_type_options(&self) -> Vec<SelectOption> {
        self.options.court_type_options()
    }

    pub fn court_options(&self) -> Vec<SelectOption> {
        self.options
            .courts_matching(
                self.selection.zone.as_deref(),
                self.selection.place.as_deref(),
                self.selection.court_type.as_deref(),
            )
            .map(|c| SelectOption::new(&c.name, &c.code))
            .collect()
    }

    pub fn payment_method_options(&self) -> Vec<SelectOption> {
        self.options.payment_method_options()
    }

    pub fn apply(&mut self, event: ReservationEvent) -> Result<Transition, ReservationError> {
        match event {
            ReservationEvent::OptionsLoaded(options) => {
                self.options = options;
                self.selection = CourtSelection::default();
                Ok(Transition::Updated)
            }
            ReservationEvent::OccupiedDatesLoaded(dates) => {
                self.occupied_dates = dates.into_iter().collect();
                Ok(Transition::Updated)
            }
            ReservationEvent::DateSelected(date) => self.select_date(date),
            ReservationEvent::OccupiedHoursLoaded { date, hours } => {
                if self.selected_date != Some(date) {
                    return Ok(Transition::Ignored);
                }
                self.occupied_hours = hours.into_iter().collect();
                let occupied = &self.occupied_hours;
                self.selected_hours = self
                    .selected_hours
                    .iter()
                    .filter(|h| !occupied.contains(h))
                    .collect();
                Ok(Transition::Updated)
            }
            ReservationEvent::HourToggled(hour) => self.toggle_hour(hour),
            ReservationEvent::ZoneSelected(zone) => self.select_zone(zone),
            ReservationEvent::PlaceSelected(place) => self.select_place(place),
            ReservationEvent::CourtTypeSelected(court_type) => self.select_court_type(court_type),
            ReservationEvent::CourtSelected(court) => self.select_court(court),
            ReservationEvent::PaymentMethodSelected(method) => {
                if let Some(code) = method.as_deref() {
                    if self.options.payment_method(code).is_none() {
                        return Err(unknown("payment method", code));
                    }
                }
                self.selection.payment_method = method;
                Ok(Transition::Updated)
            }
            ReservationEvent::CardNumberChanged(raw) => {
                self.payment.set_card_number(&raw);
                Ok(Transition::Updated)
            }
            ReservationEvent::ExpiryChanged(raw) => {
                self.payment.set_expiry(&raw);
                Ok(Transition::Updated)
            }
            ReservationEvent::CvvChanged(raw) => {
                self.payment.set_cvv(&raw);
                Ok(Transition::Updated)
            }
            ReservationEvent::Confirmed => self.confirm(),
            ReservationEvent::BannerExpired => {
                if !self.payment_succeeded {
                    return Ok(Transition::Ignored);
                }
                self.payment_succeeded = false;
                Ok(Transition::Updated)
            }
        }
    }

    fn select_date(&mut self, date: Option<NaiveDate>) -> Result<Transition, ReservationError> {
        if let Some(date) = date {
            if self.occupied_dates.contains(&date) {
                return Err(ReservationError::DateOccupied(date));
            }
        }

        // Any date pick starts a fresh hour selection. Occupied hours only
        // belong to the date they were loaded for.
        if self.selected_date != date {
            self.occupied_hours.clear();
        }
        self.selected_date = date;
        self.selected_hours.clear();
        Ok(Transition::Updated)
    }

    fn toggle_hour(&mut self, hour: HourSlot) -> Result<Transition, ReservationError> {
        if self.selected_date.is_none() {
            return Err(ReservationError::MissingDate);
        }
        if self.occupied_hours.contains(&hour) {
            return Err(ReservationError::HourOccupied(hour));
        }
        self.selected_hours.toggle(hour);
        Ok(Transition::Updated)
    }

    fn select_zone(&mut self, zone: Option<String>) -> Result<Transition, ReservationError> {
        if zone == self.selection.zone {
            return Ok(Transition::Ignored);
        }
        if let Some(code) = zone.as_deref() {
            if self.options.zone(code).is_none() {
                return Err(unknown("zone", code));
            }
        }

        self.selection.zone = zone;
        self.selection.place = None;
        self.selection.court = None;
        Ok(Transition::Updated)
    }

    fn select_place(&mut self, place: Option<String>) -> Result<Transition, ReservationError> {
        if place == self.selection.place {
            return Ok(Transition::Ignored);
        }
        if let Some(code) = place.as_deref() {
            let in_zone = self
                .options
                .places_in(self.selection.zone.as_deref())
                .any(|p| p.code == code);
            if !in_zone {
                return Err(unknown("place", code));
            }
        }

        self.selection.place = place;
        self.selection.court = None;
        Ok(Transition::Updated)
    }

    fn select_court_type(&mut self, court_type: Option<String>) -> Result<Transition, ReservationError> {
        if let Some(code) = court_type.as_deref() {
            if self.options.court_type(code).is_none() {
                return Err(unknown("court type", code));
            }
        }

        let court_mismatch = match (self.selection.court.as_deref(), court_type.as_deref()) {
            (Some(court), Some(ty)) => self.options.court(court).is_some_and(|c| c.court_type != ty),
            _ => false,
        };
        if court_mismatch {
            self.selection.court = None;
        }
        self.selection.court_type = court_type;
        Ok(Transition::Updated)
    }

    fn select_court(&mut self, court: Option<String>) -> Result<Transition, ReservationError> {
        let Some(code) = court else {
            self.selection.court = None;
            return Ok(Transition::Updated);
        };

        let selection = &self.selection;
        let found = self
            .options
            .courts_matching(
                selection.zone.as_deref(),
                selection.place.as_deref(),
                selection.court_type.as_deref(),
            )
            .find(|c| c.code == code)
            .cloned()
            .ok_or_else(|| unknown("court", &code))?;

        // Fill in the parents so the other dropdowns agree with the court.
        let zone = self.options.place(&found.place).map(|p| p.zone.clone());
        self.selection.zone = zone;
        self.selection.place = Some(found.place);
        self.selection.court_type = Some(found.court_type);
        self.selection.court = Some(found.code);
        Ok(Transition::Updated)
    }

    fn confirm(&mut self) -> Result<Transition, ReservationError> {
        if let Some(blocker) = self.confirm_blocker() {
            return Err(blocker);
        }

        let (Some(date), Some(summary), Some(court), Some(card_last4)) = (
            self.selected_date,
            self.summary(),
            self.priced_court(),
            self.payment.card_last4(),
        ) else {
            return Err(ReservationError::MissingCourt);
        };

        let payment_method = self
            .selection
            .payment_method
            .as_deref()
            .and_then(|code| self.options.payment_method(code))
            .map(|m| m.name.clone());

        let reservation = Reservation {
            date,
            hours: self.selected_hours.to_vec(),
            summary,
            court,
            payment_method,
            card_last4,
        };

        self.payment_succeeded = true;
        self.payment.clear();
        self.selected_date = None;
        self.selected_hours.clear();
        self.occupied_hours.clear();
        self.selection = CourtSelection::default();

        Ok(Transition::Confirmed(reservation))
    }
}

fn unknown(kind: &'static str, value: &str) -> ReservationError {
    ReservationError::UnknownOption {
        kind,
        value: value.to_string(),
    }
}
