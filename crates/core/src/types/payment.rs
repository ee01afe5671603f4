//! Payment method selection.

use serde::{Deserialize, Serialize};

/// Payment method chosen on the payment panel.
///
/// The presentation layer derives the highlighted option from this value.
/// Exactly one method can be selected at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// UPI transfer.
    Upi,
    /// Card on delivery terminal.
    Card,
    /// Cash on delivery.
    #[serde(rename = "cod", alias = "cash_on_delivery")]
    CashOnDelivery,
}

impl PaymentMethod {
    /// All selectable methods in display order.
    pub const ALL: [Self; 3] = [Self::Upi, Self::Card, Self::CashOnDelivery];

    /// Returns the lowercase method code used by the option markup.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Upi => "upi",
            Self::Card => "card",
            Self::CashOnDelivery => "cod",
        }
    }
}

/// Formats the uppercase code shown in the order message (e.g. `COD`).
impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upi => write!(f, "UPI"),
            Self::Card => write!(f, "CARD"),
            Self::CashOnDelivery => write!(f, "COD"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upi" => Ok(Self::Upi),
            "card" => Ok(Self::Card),
            "cod" | "cash_on_delivery" => Ok(Self::CashOnDelivery),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_uppercase_code() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.to_string(), method.code().to_ascii_uppercase());
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("UPI".parse::<PaymentMethod>().unwrap(), PaymentMethod::Upi);
        assert_eq!(
            "cash_on_delivery".parse::<PaymentMethod>().unwrap(),
            PaymentMethod::CashOnDelivery
        );
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap();
        assert_eq!(json, "\"cod\"");

        let parsed: PaymentMethod = serde_json::from_str("\"card\"").unwrap();
        assert_eq!(parsed, PaymentMethod::Card);
    }
}
