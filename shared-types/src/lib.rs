pub mod catalog;
pub mod hours;
pub mod money;
pub mod payment;
pub mod pricing;
pub mod reservation;

pub use catalog::{
    BookingOptions, Catalog, CatalogError, Court, CourtDetails, CourtType, PaymentMethod, Place,
    SelectOption, User, Zone,
};
pub use hours::{HourBoundary, HourRange, HourSlot, SelectedHours};
pub use money::Money;
pub use payment::{PaymentError, PaymentField, PaymentFields};
pub use pricing::PriceSummary;
pub use reservation::{
    CourtSelection, Reservation, ReservationError, ReservationEvent, ReservationState, Transition,
    SUCCESS_BANNER_DURATION,
};
