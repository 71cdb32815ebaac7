use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::hours::HourSlot;
use crate::money::Money;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid hour '{0}', expected HH:00")]
    InvalidHour(String),
    #[error("invalid amount '{0}'")]
    InvalidMoney(String),
    #[error("{kind} '{code}' references unknown {target} '{reference}'")]
    UnknownReference {
        kind: &'static str,
        code: String,
        target: &'static str,
        reference: String,
    },
    #[error("duplicate {kind} code '{code}'")]
    DuplicateCode { kind: &'static str, code: String },
    #[error("opening hours are empty: {open} - {close}")]
    EmptyOpeningHours { open: HourSlot, close: HourSlot },
}

/// A label/value pair used to populate a selection control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub code: String,
    pub name: String,
    pub zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtType {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub code: String,
    pub name: String,
    pub place: String,
    pub court_type: String,
    pub price_per_hour: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub code: String,
    pub name: String,
}

/// Court as shown in the reservation details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourtDetails {
    pub code: String,
    pub name: String,
    pub place: String,
    pub zone: String,
    pub price_per_hour: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// Everything the reservation dropdowns are filled from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingOptions {
    /// Court priced and displayed while the user has not picked one.
    pub featured_court: String,
    pub zones: Vec<Zone>,
    pub places: Vec<Place>,
    pub court_types: Vec<CourtType>,
    pub courts: Vec<Court>,
    pub payment_methods: Vec<PaymentMethod>,
}

impl BookingOptions {
    pub fn zone(&self, code: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.code == code)
    }

    pub fn place(&self, code: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.code == code)
    }

    pub fn court_type(&self, code: &str) -> Option<&CourtType> {
        self.court_types.iter().find(|t| t.code == code)
    }

    pub fn court(&self, code: &str) -> Option<&Court> {
        self.courts.iter().find(|c| c.code == code)
    }

    pub fn payment_method(&self, code: &str) -> Option<&PaymentMethod> {
        self.payment_methods.iter().find(|m| m.code == code)
    }

    pub fn places_in<'a>(&'a self, zone: Option<&'a str>) -> impl Iterator<Item = &'a Place> + 'a {
        self.places
            .iter()
            .filter(move |p| zone.map_or(true, |z| p.zone == z))
    }

    pub fn courts_matching<'a>(
        &'a self,
        zone: Option<&'a str>,
        place: Option<&'a str>,
        court_type: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Court> + 'a {
        self.courts.iter().filter(move |c| {
            place.map_or(true, |p| c.place == p)
                && court_type.map_or(true, |t| c.court_type == t)
                && zone.map_or(true, |z| {
                    self.place(&c.place).is_some_and(|p| p.zone == z)
                })
        })
    }

    pub fn court_details(&self, code: &str) -> Option<CourtDetails> {
        let court = self.court(code)?;
        let place = self.place(&court.place)?;
        let zone = self.zone(&place.zone)?;

        Some(CourtDetails {
            code: court.code.clone(),
            name: court.name.clone(),
            place: place.name.clone(),
            zone: zone.name.clone(),
            price_per_hour: court.price_per_hour,
        })
    }

    pub fn featured_court_details(&self) -> Option<CourtDetails> {
        self.court_details(&self.featured_court)
    }

    pub fn zone_options(&self) -> Vec<SelectOption> {
        self.zones.iter().map(|z| SelectOption::new(&z.name, &z.code)).collect()
    }

    pub fn court_type_options(&self) -> Vec<SelectOption> {
        self.court_types
            .iter()
            .map(|t| SelectOption::new(&t.name, &t.code))
            .collect()
    }

    pub fn payment_method_options(&self) -> Vec<SelectOption> {
        self.payment_methods
            .iter()
            .map(|m| SelectOption::new(&m.name, &m.code))
            .collect()
    }

    fn validate(&self) -> Result<(), CatalogError> {
        ensure_unique("zone", self.zones.iter().map(|z| z.code.as_str()))?;
        ensure_unique("place", self.places.iter().map(|p| p.code.as_str()))?;
        ensure_unique("court type", self.court_types.iter().map(|t| t.code.as_str()))?;
        ensure_unique("court", self.courts.iter().map(|c| c.code.as_str()))?;
        ensure_unique("payment method", self.payment_methods.iter().map(|m| m.code.as_str()))?;

        for place in &self.places {
            if self.zone(&place.zone).is_none() {
                return Err(CatalogError::UnknownReference {
                    kind: "place",
                    code: place.code.clone(),
                    target: "zone",
                    reference: place.zone.clone(),
                });
            }
        }

        for court in &self.courts {
            if self.place(&court.place).is_none() {
                return Err(CatalogError::UnknownReference {
                    kind: "court",
                    code: court.code.clone(),
                    target: "place",
                    reference: court.place.clone(),
                });
            }
            if self.court_type(&court.court_type).is_none() {
                return Err(CatalogError::UnknownReference {
                    kind: "court",
                    code: court.code.clone(),
                    target: "court type",
                    reference: court.court_type.clone(),
                });
            }
        }

        Ok(())
    }
}

fn ensure_unique<'a>(
    kind: &'static str,
    codes: impl Iterator<Item = &'a str>,
) -> Result<(), CatalogError> {
    let mut seen = BTreeSet::new();
    for code in codes {
        if !seen.insert(code) {
            return Err(CatalogError::DuplicateCode {
                kind,
                code: code.to_string(),
            });
        }
    }
    Ok(())
}

/// Static reservation data: options, availability and the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub options: BookingOptions,
    pub user: User,
    /// First and last bookable slot of the day, inclusive.
    pub opening_hours: (HourSlot, HourSlot),
    #[serde(default)]
    pub occupied_dates: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub occupied_hours: BTreeMap<NaiveDate, BTreeSet<HourSlot>>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        self.options.validate()?;

        if self.options.featured_court_details().is_none() {
            return Err(CatalogError::UnknownReference {
                kind: "catalog",
                code: "featured_court".to_string(),
                target: "court",
                reference: self.options.featured_court.clone(),
            });
        }

        let (open, close) = self.opening_hours;
        if open > close {
            return Err(CatalogError::EmptyOpeningHours { open, close });
        }

        Ok(())
    }

    pub fn featured_court(&self) -> Option<CourtDetails> {
        self.options.featured_court_details()
    }

    pub fn occupied_dates(&self) -> Vec<NaiveDate> {
        self.occupied_dates.iter().copied().collect()
    }

    /// Booked hours on `date`, empty when the date has no bookings.
    pub fn occupied_hours_on(&self, date: NaiveDate) -> Vec<HourSlot> {
        self.occupied_hours
            .get(&date)
            .map(|hours| hours.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn bookable_hours(&self) -> Vec<HourSlot> {
        let (open, close) = self.opening_hours;
        (open.hour()..=close.hour()).filter_map(HourSlot::new).collect()
    }

    pub fn demo() -> Self {
        let zone = |code: &str, name: &str| Zone {
            code: code.into(),
            name: name.into(),
        };
        let place = |code: &str, name: &str, zone: &str| Place {
            code: code.into(),
            name: name.into(),
            zone: zone.into(),
        };
        let court_type = |code: &str, name: &str| CourtType {
            code: code.into(),
            name: name.into(),
        };
        let court = |code: &str, name: &str, place: &str, court_type: &str, cents: u64| Court {
            code: code.into(),
            name: name.into(),
            place: place.into(),
            court_type: court_type.into(),
            price_per_hour: Money::from_cents(cents),
        };
        let method = |code: &str, name: &str| PaymentMethod {
            code: code.into(),
            name: name.into(),
        };
        let hour = |h: u8| HourSlot::new(h).unwrap_or(HourSlot::MIDNIGHT);
        let date = |y: i32, m: u32, d: u32| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();

        let options = BookingOptions {
            featured_court: "CDA-F5".to_string(),
            zones: vec![
                zone("SV", "San Salvador"),
                zone("ST", "Santa Tecla"),
                zone("SO", "Soyapango"),
            ],
            places: vec![
                place("CDA", "Complejo Deportivo A", "SV"),
                place("PEC", "Parque Cuscatlán", "SV"),
                place("PST", "Polideportivo Santa Tecla", "ST"),
                place("CMS", "Cancha Municipal Soyapango", "SO"),
            ],
            court_types: vec![
                court_type("F5", "Fútbol 5"),
                court_type("F7", "Fútbol 7"),
                court_type("BSK", "Baloncesto"),
            ],
            courts: vec![
                court("CDA-F5", "Cancha Fútbol 5", "CDA", "F5", 1000),
                court("CDA-F7", "Cancha Fútbol 7", "CDA", "F7", 1500),
                court("PEC-BSK", "Cancha de Baloncesto", "PEC", "BSK", 800),
                court("PST-F5", "Cancha Fútbol 5 Norte", "PST", "F5", 1200),
                court("CMS-F7", "Cancha Fútbol 7 Municipal", "CMS", "F7", 900),
            ],
            payment_methods: vec![
                method("CARD", "Tarjeta de crédito/débito"),
            ],
        };

        let occupied_hours = BTreeMap::from([
            (date(2025, 6, 16), BTreeSet::from([hour(10), hour(13)])),
            (date(2025, 6, 18), BTreeSet::from([hour(8), hour(12), hour(15)])),
        ]);

        Self {
            options,
            user: User {
                name: "Jennifer López".to_string(),
                email: "jenn@example.com".to_string(),
            },
            opening_hours: (hour(8), hour(21)),
            occupied_dates: BTreeSet::from([
                date(2025, 6, 15),
                date(2025, 6, 17),
                date(2025, 6, 20),
            ]),
            occupied_hours,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{Catalog, CatalogError};
    use crate::hours::HourSlot;
    use crate::money::Money;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_demo_catalog_is_valid() {
        let catalog = Catalog::demo();
        catalog.validate().unwrap();

        let zones: Vec<_> = catalog
            .options
            .zone_options()
            .into_iter()
            .map(|o| (o.label, o.value))
            .collect();
        assert_eq!(
            zones,
            vec![
                ("San Salvador".to_string(), "SV".to_string()),
                ("Santa Tecla".to_string(), "ST".to_string()),
                ("Soyapango".to_string(), "SO".to_string()),
            ]
        );
    }

    #[test]
    fn test_featured_court_details() {
        let court = Catalog::demo().featured_court().unwrap();
        assert_eq!(court.name, "Cancha Fútbol 5");
        assert_eq!(court.place, "Complejo Deportivo A");
        assert_eq!(court.zone, "San Salvador");
        assert_eq!(court.price_per_hour, Money::from_cents(1000));
    }

    #[test]
    fn test_occupied_hours_lookup() {
        let catalog = Catalog::demo();
        let hours: Vec<String> = catalog
            .occupied_hours_on(date(2025, 6, 16))
            .iter()
            .map(|h| h.to_string())
            .collect();

        assert_eq!(hours, vec!["10:00", "13:00"]);
        assert!(catalog.occupied_hours_on(date(2025, 6, 19)).is_empty());
    }

    #[test]
    fn test_bookable_hours() {
        let hours = Catalog::demo().bookable_hours();
        assert_eq!(hours.first(), HourSlot::new(8).as_ref());
        assert_eq!(hours.last(), HourSlot::new(21).as_ref());
        assert_eq!(hours.len(), 14);
    }

    #[test]
    fn test_courts_cascade_by_zone_place_and_type() {
        let options = Catalog::demo().options;

        let in_sv: Vec<_> = options
            .courts_matching(Some("SV"), None, None)
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(in_sv, vec!["CDA-F5", "CDA-F7", "PEC-BSK"]);

        let f7_at_cda: Vec<_> = options
            .courts_matching(None, Some("CDA"), Some("F7"))
            .map(|c| c.code.as_str())
            .collect();
        assert_eq!(f7_at_cda, vec!["CDA-F7"]);

        let places_in_st: Vec<_> = options.places_in(Some("ST")).map(|p| p.code.as_str()).collect();
        assert_eq!(places_in_st, vec!["PST"]);
    }

    #[test]
    fn test_catalog_json_round_trip() {
        let json = serde_json::to_string(&Catalog::demo()).unwrap();
        assert!(json.contains("\"2025-06-16\":[\"10:00\",\"13:00\"]"));
        assert!(json.contains("\"price_per_hour\":\"10.00\""));

        let parsed = Catalog::from_json(&json).unwrap();
        assert_eq!(parsed, Catalog::demo());
    }

    #[test]
    fn test_catalog_rejects_dangling_place() {
        let mut catalog = Catalog::demo();
        catalog.options.courts[0].place = "NOPE".to_string();
        let json = serde_json::to_string(&catalog).unwrap();

        match Catalog::from_json(&json) {
            Err(CatalogError::UnknownReference { reference, .. }) => assert_eq!(reference, "NOPE"),
            other => panic!("expected unknown reference, got {other:?}"),
        }
    }

    #[test]
    fn test_sample_catalog_file_loads() {
        let catalog = Catalog::from_json(include_str!("../../data/catalog.json")).unwrap();

        assert_eq!(catalog.bookable_hours().len(), 16);
        assert_eq!(
            catalog.options.court("PLL-TEN").unwrap().price_per_hour,
            Money::from_cents(750)
        );
        assert_eq!(catalog.occupied_dates(), vec![date(2025, 7, 4)]);
        assert_eq!(catalog.occupied_hours_on(date(2025, 7, 1)).len(), 3);
    }

    #[test]
    fn test_catalog_rejects_duplicate_codes() {
        let mut catalog = Catalog::demo();
        let repeated = catalog.options.zones[0].clone();
        catalog.options.zones.push(repeated);
        let json = serde_json::to_string(&catalog).unwrap();

        match Catalog::from_json(&json) {
            Err(CatalogError::DuplicateCode { kind, code }) => {
                assert_eq!(kind, "zone");
                assert_eq!(code, "SV");
            }
            other => panic!("expected duplicate code, got {other:?}"),
        }

        let mut catalog = Catalog::demo();
        let repeated = catalog.options.courts[2].clone();
        catalog.options.courts.push(repeated);
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DuplicateCode { kind: "court", .. })
        ));
    }

    #[test]
    fn test_catalog_rejects_bad_hour() {
        let json = serde_json::to_string(&Catalog::demo())
            .unwrap()
            .replace("\"13:00\"", "\"13:30\"");

        assert!(matches!(Catalog::from_json(&json), Err(CatalogError::Parse(_))));
    }
}
