//! Enumerated choices shoppers make: payment mode, bank and gender.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an order is paid for.
///
/// Serialized in lowercase (`"debit"`, `"cod"`, ...) to match the persisted
/// order record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMode {
    /// Debit card (needs card number, expiry and CVV).
    #[default]
    Debit,
    /// Credit card (needs card number, expiry and CVV).
    Credit,
    /// UPI transfer (needs a UPI ID).
    Upi,
    /// Net banking (needs a bank selection).
    Netbanking,
    /// Cash on delivery (needs nothing).
    Cod,
}

impl PaymentMode {
    /// All payment modes in display order.
    pub const ALL: [Self; 5] = [
        Self::Debit,
        Self::Credit,
        Self::Upi,
        Self::Netbanking,
        Self::Cod,
    ];

    /// Whether this mode collects card details.
    #[must_use]
    pub const fn is_card(self) -> bool {
        matches!(self, Self::Debit | Self::Credit)
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debit => "Debit Card",
            Self::Credit => "Credit Card",
            Self::Upi => "UPI",
            Self::Netbanking => "Netbanking",
            Self::Cod => "Cash on Delivery",
        }
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debit => write!(f, "debit"),
            Self::Credit => write!(f, "credit"),
            Self::Upi => write!(f, "upi"),
            Self::Netbanking => write!(f, "netbanking"),
            Self::Cod => write!(f, "cod"),
        }
    }
}

impl FromStr for PaymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debit" => Ok(Self::Debit),
            "credit" => Ok(Self::Credit),
            "upi" => Ok(Self::Upi),
            "netbanking" => Ok(Self::Netbanking),
            "cod" => Ok(Self::Cod),
            other => Err(format!("invalid payment mode: {other}")),
        }
    }
}

/// Banks offered for net banking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Sbi,
    Hdfc,
    Icici,
    Axis,
}

impl Bank {
    /// Full bank name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sbi => "State Bank of India",
            Self::Hdfc => "HDFC Bank",
            Self::Icici => "ICICI Bank",
            Self::Axis => "Axis Bank",
        }
    }
}

impl FromStr for Bank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sbi" => Ok(Self::Sbi),
            "hdfc" => Ok(Self::Hdfc),
            "icici" => Ok(Self::Icici),
            "axis" => Ok(Self::Axis),
            other => Err(format!("invalid bank: {other}")),
        }
    }
}

/// Self-reported gender on a shopper profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "other" => Ok(Self::Other),
            other => Err(format!("invalid gender: {other}")),
        }
    }
}
