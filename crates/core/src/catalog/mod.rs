//! Storefront catalog rules that feed the triage engine.
//!
//! The catalog collaborator raises one ticket per add-to-cart event. When it
//! has no explicit severity it derives one from the product price.

use crate::ticket::{Severity, TicketError};

/// Products priced below this get severity 1.
pub const LOW_PRICE_CEILING: f64 = 50.0;

/// Products priced below this (and at or above [`LOW_PRICE_CEILING`]) get severity 3.
pub const MID_PRICE_CEILING: f64 = 150.0;

/// Map a product price to a ticket severity: `< 50` is 1, `< 150` is 3,
/// anything else is 5.
pub fn severity_for_price(price: f64) -> Result<Severity, TicketError> {
    if !price.is_finite() || price < 0.0 {
        return Err(TicketError::InvalidPrice(price));
    }

    let severity = if price < LOW_PRICE_CEILING {
        1
    } else if price < MID_PRICE_CEILING {
        3
    } else {
        5
    };
    Severity::new(severity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn severity(price: f64) -> u8 {
        severity_for_price(price).unwrap().value()
    }

    #[test]
    fn test_price_bands() {
        assert_eq!(severity(0.0), 1);
        assert_eq!(severity(49.99), 1);
        assert_eq!(severity(50.0), 3);
        assert_eq!(severity(149.99), 3);
        assert_eq!(severity(150.0), 5);
        assert_eq!(severity(1299.0), 5);
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(matches!(
            severity_for_price(-1.0),
            Err(TicketError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_non_finite_price_rejected() {
        assert!(severity_for_price(f64::NAN).is_err());
        assert!(severity_for_price(f64::INFINITY).is_err());
    }
}
