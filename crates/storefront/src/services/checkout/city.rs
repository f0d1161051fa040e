//! Pincode to city lookup.

/// City shown for pincodes missing from the lookup table.
pub const UNKNOWN_CITY: &str = "Unknown City";

const CITIES: &[(&str, &str)] = &[
    ("110001", "New Delhi"),
    ("400001", "Mumbai"),
    ("560001", "Bengaluru"),
    ("700001", "Kolkata"),
    ("600001", "Chennai"),
];

/// Resolve a pincode to its city, or [`UNKNOWN_CITY`].
#[must_use]
pub fn city_for_pincode(pincode: &str) -> &'static str {
    let pincode = pincode.trim();
    CITIES
        .iter()
        .find(|(pin, _)| *pin == pincode)
        .map_or(UNKNOWN_CITY, |(_, city)| city)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pincodes() {
        assert_eq!(city_for_pincode("560001"), "Bengaluru");
        assert_eq!(city_for_pincode(" 110001 "), "New Delhi");
    }

    #[test]
    fn test_unknown_pincode() {
        assert_eq!(city_for_pincode("999999"), UNKNOWN_CITY);
        assert_eq!(city_for_pincode(""), UNKNOWN_CITY);
    }
}
