pub mod dropdown;
pub mod error;
pub mod hour_selector;
pub mod loading;
pub mod payment_form;
pub mod reservation_calendar;
pub mod success_banner;

pub use dropdown::Dropdown;
pub use error::ErrorView;
pub use hour_selector::HourSelector;
pub use loading::LoadingView;
pub use payment_form::PaymentForm;
pub use reservation_calendar::ReservationCalendar;
pub use success_banner::SuccessBanner;
