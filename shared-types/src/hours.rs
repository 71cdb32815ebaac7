use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CatalogError;

/// One bookable hour, starting at `HH:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HourSlot(u8);

impl HourSlot {
    pub const MIDNIGHT: HourSlot = HourSlot(0);

    pub fn new(hour: u8) -> Option<Self> {
        (hour < 24).then_some(Self(hour))
    }

    pub const fn hour(&self) -> u8 {
        self.0
    }

    /// The hour at which a booking of this single slot ends.
    pub const fn end(&self) -> HourBoundary {
        HourBoundary(self.0 + 1)
    }
}

impl fmt::Display for HourSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:00", self.0)
    }
}

impl FromStr for HourSlot {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidHour(s.to_string());
        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;

        if minute != "00"
            || hour.is_empty()
            || hour.len() > 2
            || !hour.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        hour.parse::<u8>()
            .ok()
            .and_then(HourSlot::new)
            .ok_or_else(invalid)
    }
}

impl TryFrom<String> for HourSlot {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HourSlot> for String {
    fn from(value: HourSlot) -> Self {
        value.to_string()
    }
}

/// End of a booked range, `1:00` through `24:00`. Rendered without
/// zero padding (`9:00`, `12:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct HourBoundary(u8);

impl HourBoundary {
    pub const fn hour(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for HourBoundary {
    type Error = CatalogError;

    fn try_from(hour: u8) -> Result<Self, Self::Error> {
        if (1..=24).contains(&hour) {
            Ok(Self(hour))
        } else {
            Err(CatalogError::InvalidHour(format!("{}:00", hour)))
        }
    }
}

impl From<HourBoundary> for u8 {
    fn from(value: HourBoundary) -> Self {
        value.0
    }
}

impl fmt::Display for HourBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:00", self.0)
    }
}

/// A contiguous run of booked hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourRange {
    pub start: HourSlot,
    pub end: HourBoundary,
}

impl fmt::Display for HourRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Hours picked by the user, always ascending and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedHours(BTreeSet<HourSlot>);

impl SelectedHours {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes `hour` if present, inserts it otherwise. Returns whether the
    /// hour is selected afterwards.
    pub fn toggle(&mut self, hour: HourSlot) -> bool {
        if self.0.remove(&hour) {
            false
        } else {
            self.0.insert(hour);
            true
        }
    }

    pub fn contains(&self, hour: &HourSlot) -> bool {
        self.0.contains(hour)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn first(&self) -> Option<HourSlot> {
        self.0.first().copied()
    }

    pub fn last(&self) -> Option<HourSlot> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = HourSlot> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<HourSlot> {
        self.iter().collect()
    }

    /// Splits the selection into contiguous ranges.
    pub fn blocks(&self) -> Vec<HourRange> {
        let mut blocks: Vec<HourRange> = Vec::new();

        for hour in self.iter() {
            match blocks.last_mut() {
                Some(block) if block.end.hour() == hour.hour() => block.end = hour.end(),
                _ => blocks.push(HourRange {
                    start: hour,
                    end: hour.end(),
                }),
            }
        }

        blocks
    }
}

impl FromIterator<HourSlot> for SelectedHours {
    fn from_iter<T: IntoIterator<Item = HourSlot>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
