use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const CARD_NUMBER_MAX_LEN: usize = 16;
pub const EXPIRY_MAX_LEN: usize = 5;
pub const CVV_MAX_LEN: usize = 3;

static CARD_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{16}$").expect("valid card number pattern"));
static EXPIRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").expect("valid expiry pattern"));
static CVV_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}$").expect("valid cvv pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentField {
    CardNumber,
    Expiry,
    Cvv,
}

impl fmt::Display for PaymentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentField::CardNumber => "card number",
            PaymentField::Expiry => "expiry",
            PaymentField::Cvv => "cvv",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("invalid payment fields: {0:?}")]
    InvalidFields(Vec<PaymentField>),
}

/// Card details as typed in the payment form.
///
/// Setters sanitize the raw input the same way the form inputs do: card
/// number and CVV keep digits only, and every field is cut to its max length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFields {
    card_number: String,
    expiry: String,
    cvv: String,
}

impl PaymentFields {
    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn expiry(&self) -> &str {
        &self.expiry
    }

    pub fn cvv(&self) -> &str {
        &self.cvv
    }

    pub fn set_card_number(&mut self, raw: &str) {
        self.card_number = digits_only(raw, CARD_NUMBER_MAX_LEN);
    }

    pub fn set_expiry(&mut self, raw: &str) {
        self.expiry = raw.chars().take(EXPIRY_MAX_LEN).collect();
    }

    pub fn set_cvv(&mut self, raw: &str) {
        self.cvv = digits_only(raw, CVV_MAX_LEN);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn invalid_fields(&self) -> Vec<PaymentField> {
        let mut invalid = Vec::new();
        if !CARD_NUMBER_RE.is_match(&self.card_number) {
            invalid.push(PaymentField::CardNumber);
        }
        if !EXPIRY_RE.is_match(&self.expiry) {
            invalid.push(PaymentField::Expiry);
        }
        if !CVV_RE.is_match(&self.cvv) {
            invalid.push(PaymentField::Cvv);
        }
        invalid
    }

    pub fn validate(&self) -> Result<(), PaymentError> {
        let invalid = self.invalid_fields();
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(PaymentError::InvalidFields(invalid))
        }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }

    /// Last four digits of the card, if a full number was entered.
    pub fn card_last4(&self) -> Option<String> {
        CARD_NUMBER_RE
            .is_match(&self.card_number)
            .then(|| self.card_number[self.card_number.len() - 4..].to_string())
    }
}

fn digits_only(raw: &str, max_len: usize) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(max_len).collect()
}

#[cfg(test)]
mod tests {
    use super::{PaymentError, PaymentField, PaymentFields};

    fn fields(card: &str, expiry: &str, cvv: &str) -> PaymentFields {
        let mut fields = PaymentFields::default();
        fields.set_card_number(card);
        fields.set_expiry(expiry);
        fields.set_cvv(cvv);
        fields
    }

    #[test]
    fn test_valid_fields() {
        let fields = fields("4111111111111111", "12/26", "123");
        assert!(fields.is_valid());
        assert_eq!(fields.validate(), Ok(()));
        assert_eq!(fields.card_last4().as_deref(), Some("1111"));
    }

    #[test]
    fn test_card_number_is_sanitized() {
        let fields = fields("4111 1111-1111 1111 9999", "", "");
        assert_eq!(fields.card_number(), "4111111111111111");
    }

    #[test]
    fn test_cvv_is_sanitized() {
        let fields = fields("", "", "1a2b3c4");
        assert_eq!(fields.cvv(), "123");
    }

    #[test]
    fn test_expiry_is_truncated_not_sanitized() {
        let fields = fields("", "12/2026", "");
        assert_eq!(fields.expiry(), "12/20");
    }

    #[test]
    fn test_short_card_number_is_invalid() {
        let fields = fields("411111111111111", "12/26", "123");
        assert_eq!(
            fields.validate(),
            Err(PaymentError::InvalidFields(vec![PaymentField::CardNumber]))
        );
        assert_eq!(fields.card_last4(), None);
    }

    #[test]
    fn test_expiry_month_range() {
        for expiry in ["00/26", "13/26", "1/26", "12-26", "12/2"] {
            assert!(!fields("4111111111111111", expiry, "123").is_valid(), "{expiry}");
        }
        for expiry in ["01/00", "09/30", "10/99", "12/26"] {
            assert!(fields("4111111111111111", expiry, "123").is_valid(), "{expiry}");
        }
    }

    #[test]
    fn test_short_cvv_is_invalid() {
        assert_eq!(
            fields("4111111111111111", "12/26", "12").invalid_fields(),
            vec![PaymentField::Cvv]
        );
    }

    #[test]
    fn test_empty_fields_report_all() {
        assert_eq!(
            PaymentFields::default().invalid_fields(),
            vec![PaymentField::CardNumber, PaymentField::Expiry, PaymentField::Cvv]
        );
    }

    #[test]
    fn test_clear() {
        let mut fields = fields("4111111111111111", "12/26", "123");
        fields.clear();
        assert_eq!(fields, PaymentFields::default());
    }
}
