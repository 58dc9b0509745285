use chrono::{DateTime, Local, TimeZone, Utc};

/// Render a stored timestamp in the viewer's local time.
#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    format_datetime_in(value, &Local)
}

#[must_use]
pub fn format_datetime_in<Tz>(value: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    value
        .with_timezone(tz)
        .format("%b %-d, %Y, %-I:%M %p")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    #[test]
    fn formats_in_requested_zone() {
        assert_eq!(format_datetime_in(fixed_now(), &Utc), "Nov 14, 2023, 10:13 PM");
    }
}
