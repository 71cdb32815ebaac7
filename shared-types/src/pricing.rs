use serde::{Deserialize, Serialize};

use crate::hours::{HourBoundary, HourRange, HourSlot, SelectedHours};
use crate::money::Money;

/// Values shown in the reservation details, derived from the selected hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub start_hour: HourSlot,
    /// One hour past the latest selected slot. Spans any gaps in the
    /// selection; see `blocks` for the actual booked ranges.
    pub end_hour: HourBoundary,
    pub blocks: Vec<HourRange>,
    pub hours: usize,
    pub price_per_hour: Money,
    pub total: Money,
}

impl PriceSummary {
    /// Returns `None` when no hour is selected.
    pub fn from_selection(hours: &SelectedHours, price_per_hour: Money) -> Option<Self> {
        let start_hour = hours.first()?;
        let end_hour = hours.last()?.end();

        Some(Self {
            start_hour,
            end_hour,
            blocks: hours.blocks(),
            hours: hours.len(),
            price_per_hour,
            total: price_per_hour.times(hours.len()),
        })
    }

    pub fn is_contiguous(&self) -> bool {
        self.blocks.len() <= 1
    }
}

#[cfg(test)]
mod tests {
    use super::PriceSummary;
    use crate::hours::{HourSlot, SelectedHours};
    use crate::money::Money;

    fn hours(list: &[u8]) -> SelectedHours {
        list.iter().map(|h| HourSlot::new(*h).unwrap()).collect()
    }

    #[test]
    fn test_summary_for_contiguous_selection() {
        let summary = PriceSummary::from_selection(&hours(&[10, 11]), Money::from_cents(1000)).unwrap();

        assert_eq!(summary.start_hour.to_string(), "10:00");
        assert_eq!(summary.end_hour.to_string(), "12:00");
        assert_eq!(summary.total.to_string(), "$20.00");
        assert!(summary.is_contiguous());
    }

    #[test]
    fn test_total_is_count_times_rate() {
        let rate = Money::from_cents(1000);
        for n in 1..=14u8 {
            let selection: Vec<u8> = (8..8 + n).collect();
            let summary = PriceSummary::from_selection(&hours(&selection), rate).unwrap();
            assert_eq!(summary.total, Money::from_cents(1000 * n as u64));
        }
    }

    #[test]
    fn test_end_hour_spans_gaps() {
        let summary = PriceSummary::from_selection(&hours(&[10, 14]), Money::from_cents(1000)).unwrap();

        assert_eq!(summary.end_hour.hour(), 15);
        assert_eq!(summary.blocks.len(), 2);
        assert!(!summary.is_contiguous());
        assert_eq!(summary.total.to_string(), "$20.00");
    }

    #[test]
    fn test_empty_selection_has_no_summary() {
        assert!(PriceSummary::from_selection(&SelectedHours::new(), Money::from_cents(1000)).is_none());
    }
}
