//! Checkout-side helpers for the delivery-date cart attribute.

/// The cart/order attribute the checkout widget writes the chosen date to.
pub const DELIVERY_DATE_ATTRIBUTE: &str = "Delivery Date";

/// Format a date the way the attribute contract expects (`YYYY-MM-DD`).
pub fn format_iso_date(date: time::Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// The attribute value to set on first render, if any.
///
/// Returns `Some(today)` only when no delivery date is attached yet, so a
/// re-render with the attribute already present is a no-op. An empty string
/// counts as absent, matching how cleared attributes come back.
pub fn initial_delivery_date(existing: Option<&str>, today: time::Date) -> Option<String> {
    match existing {
        Some(value) if !value.is_empty() => None,
        _ => Some(format_iso_date(today)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::{Date, Month};

    fn july_fourth() -> Date {
        Date::from_calendar_date(2024, Month::July, 4).unwrap()
    }

    #[test]
    fn formats_iso_with_zero_padding() {
        let date = Date::from_calendar_date(2024, Month::January, 7).unwrap();
        assert_eq!(format_iso_date(date), "2024-01-07");
    }

    #[test]
    fn sets_today_when_attribute_absent() {
        assert_eq!(
            initial_delivery_date(None, july_fourth()),
            Some("2024-07-04".to_owned())
        );
        assert_eq!(
            initial_delivery_date(Some(""), july_fourth()),
            Some("2024-07-04".to_owned())
        );
    }

    #[test]
    fn idempotent_when_attribute_present() {
        assert_eq!(initial_delivery_date(Some("2024-06-01"), july_fourth()), None);
    }
}
