//! Time helpers.
//!
//! All timestamps in the schema are timezone-naive and interpreted as UTC,
//! so "now" is always the current UTC wall-clock datetime.

use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use jiff_diesel::ToDiesel;

/// Current UTC datetime.
pub fn now() -> DateTime {
    jiff::Timestamp::now().to_zoned(TimeZone::UTC).datetime()
}

/// Current UTC datetime as the diesel wrapper type used in models.
pub fn now_db() -> jiff_diesel::DateTime {
    now().to_diesel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_roundtrips_through_diesel_wrapper() {
        let db_now = now_db();
        let plain = db_now.to_jiff();
        // Sanity: the wrapper holds a real datetime from this century.
        assert!(plain.year() >= 2024);
    }
}
