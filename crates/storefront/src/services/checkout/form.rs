//! Checkout form fields and validation.

use core::fmt;

use premium_core::{Bank, PaymentMode};

use super::CheckoutError;
use super::city::city_for_pincode;
use crate::models::ShippingAddress;

/// A checkout form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address1,
    Pincode,
    CardNumber,
    ExpiryDate,
    Cvv,
    UpiId,
    Bank,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Address1 => "address line 1",
            Self::Pincode => "pincode",
            Self::CardNumber => "card number",
            Self::ExpiryDate => "expiry date",
            Self::Cvv => "CVV",
            Self::UpiId => "UPI ID",
            Self::Bank => "bank",
        };
        f.write_str(label)
    }
}

/// Raw checkout form input.
///
/// Only the fields belonging to the selected payment mode are looked at.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub address1: String,
    pub address2: String,
    pub landmark: String,
    pub pincode: String,
    pub payment_mode: PaymentMode,
    pub card_number: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
    pub upi_id: String,
    pub bank: Option<Bank>,
}

/// Payment details accepted by validation. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentDetails {
    Card {
        mode: PaymentMode,
        last_four: String,
    },
    Upi {
        id: String,
    },
    Netbanking(Bank),
    CashOnDelivery,
}

impl PaymentDetails {
    #[must_use]
    pub const fn mode(&self) -> PaymentMode {
        match self {
            Self::Card { mode, .. } => *mode,
            Self::Upi { .. } => PaymentMode::Upi,
            Self::Netbanking(_) => PaymentMode::Netbanking,
            Self::CashOnDelivery => PaymentMode::Cod,
        }
    }
}

/// A form that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedCheckout {
    pub address: ShippingAddress,
    pub payment: PaymentDetails,
}

impl CheckoutForm {
    /// Check required fields and resolve the city.
    ///
    /// Address line 1 and pincode are always required. Card modes need a
    /// card number (12-19 digits), an `MM/YY` expiry and a 3-4 digit CVV;
    /// UPI needs an ID; net banking needs a bank; cash on delivery needs
    /// nothing more.
    ///
    /// # Errors
    ///
    /// Returns the first `CheckoutError::MissingField` or
    /// `CheckoutError::InvalidField` found.
    pub fn validate(&self) -> Result<ValidatedCheckout, CheckoutError> {
        let address1 = required(&self.address1, Field::Address1)?;
        let pincode = required(&self.pincode, Field::Pincode)?;

        let payment = match self.payment_mode {
            mode @ (PaymentMode::Debit | PaymentMode::Credit) => {
                let digits = card_digits(required(&self.card_number, Field::CardNumber)?)?;
                check_expiry(required(&self.expiry_date, Field::ExpiryDate)?)?;
                check_cvv(required(&self.cvv, Field::Cvv)?)?;
                let last_four = digits.get(digits.len() - 4..).unwrap_or_default().to_string();
                PaymentDetails::Card { mode, last_four }
            }
            PaymentMode::Upi => {
                let id = required(&self.upi_id, Field::UpiId)?;
                if !id.contains('@') {
                    return Err(invalid(Field::UpiId, "expected an ID like name@bank"));
                }
                PaymentDetails::Upi { id: id.to_string() }
            }
            PaymentMode::Netbanking => {
                PaymentDetails::Netbanking(self.bank.ok_or(CheckoutError::MissingField(Field::Bank))?)
            }
            PaymentMode::Cod => PaymentDetails::CashOnDelivery,
        };

        Ok(ValidatedCheckout {
            address: ShippingAddress {
                address1: address1.to_string(),
                address2: self.address2.trim().to_string(),
                landmark: self.landmark.trim().to_string(),
                pincode: pincode.to_string(),
                city: city_for_pincode(pincode).to_string(),
            },
            payment,
        })
    }
}

fn required(value: &str, field: Field) -> Result<&str, CheckoutError> {
    let value = value.trim();
    if value.is_empty() {
        Err(CheckoutError::MissingField(field))
    } else {
        Ok(value)
    }
}

fn invalid(field: Field, reason: &'static str) -> CheckoutError {
    CheckoutError::InvalidField { field, reason }
}

fn card_digits(number: &str) -> Result<String, CheckoutError> {
    let compact: String = number.chars().filter(|c| !matches!(c, ' ' | '-')).collect();
    if !compact.chars().all(|c| c.is_ascii_digit()) || !(12..=19).contains(&compact.len()) {
        return Err(invalid(Field::CardNumber, "expected 12 to 19 digits"));
    }
    Ok(compact)
}

fn check_expiry(expiry: &str) -> Result<(), CheckoutError> {
    let err = || invalid(Field::ExpiryDate, "expected MM/YY");
    let (month, year) = expiry.split_once('/').ok_or_else(err)?;
    let month: u8 = month.parse().map_err(|_| err())?;
    if !(1..=12).contains(&month) || year.len() != 2 || !year.chars().all(|c| c.is_ascii_digit()) {
        return Err(err());
    }
    Ok(())
}

fn check_cvv(cvv: &str) -> Result<(), CheckoutError> {
    if (3..=4).contains(&cvv.len()) && cvv.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid(Field::Cvv, "expected 3 or 4 digits"))
    }
}
