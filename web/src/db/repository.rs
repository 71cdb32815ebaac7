use chrono::NaiveDate;
use shared_types::{BookingOptions, Catalog, HourSlot, User};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RepositoryError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub fn get_booking_options(catalog: &Catalog) -> BookingOptions {
    catalog.options.clone()
}

pub fn get_occupied_dates(catalog: &Catalog) -> Vec<NaiveDate> {
    catalog.occupied_dates()
}

pub fn get_occupied_hours(catalog: &Catalog, date: &str) -> Result<Vec<HourSlot>, RepositoryError> {
    let date = parse_date(date)?;
    Ok(catalog.occupied_hours_on(date))
}

pub fn get_bookable_hours(catalog: &Catalog) -> Vec<HourSlot> {
    catalog.bookable_hours()
}

pub fn get_user(catalog: &Catalog) -> User {
    catalog.user.clone()
}

fn parse_date(date: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| RepositoryError::InvalidDate(date.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occupied_hours_by_date_string() {
        let catalog = Catalog::demo();

        let hours: Vec<String> = get_occupied_hours(&catalog, "2025-06-18")
            .unwrap()
            .into_iter()
            .map(|h| h.to_string())
            .collect();
        assert_eq!(hours, vec!["08:00", "12:00", "15:00"]);

        assert!(get_occupied_hours(&catalog, "2025-06-19").unwrap().is_empty());
    }

    #[test]
    fn test_occupied_hours_rejects_bad_date() {
        let catalog = Catalog::demo();
        assert_eq!(
            get_occupied_hours(&catalog, "16/06/2025"),
            Err(RepositoryError::InvalidDate("16/06/2025".to_string()))
        );
    }

    #[test]
    fn test_occupied_dates_are_sorted() {
        let dates: Vec<String> = get_occupied_dates(&Catalog::demo())
            .iter()
            .map(|d| d.to_string())
            .collect();
        assert_eq!(dates, vec!["2025-06-15", "2025-06-17", "2025-06-20"]);
    }

    #[test]
    fn test_user_and_options() {
        let catalog = Catalog::demo();
        assert_eq!(get_user(&catalog).email, "jenn@example.com");
        assert_eq!(get_booking_options(&catalog).zones.len(), 3);
        assert_eq!(get_bookable_hours(&catalog).len(), 14);
    }
}
