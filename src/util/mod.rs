use std::fmt;

/// A date-only calendar value.
///
/// Entry timestamps from the backend carry a time-of-day (and sometimes a
/// timezone suffix) that is meaningless to the one-entry-per-day contract.
/// Comparing `CalendarDay`s is structural, so two representations of the
/// same day are always equal regardless of how the instant was written.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct CalendarDay {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CalendarDay {
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Truncates an ISO-ish timestamp (`YYYY-MM-DD`, `YYYY-MM-DDTHH:MM:SS`,
    /// with or without a zone suffix) to its calendar day.
    ///
    /// Returns `None` when the leading ten characters are not a date.
    pub fn from_timestamp(ts: &str) -> Option<Self> {
        let ts = ts.trim();
        if ts.len() < 10 || !ts.is_char_boundary(10) {
            return None;
        }

        let (date_part, rest) = ts.split_at(10);
        let mut parts = date_part.split('-');

        let year: i32 = parts.next()?.parse().ok()?;
        let month: u8 = parts.next()?.parse().ok()?;
        let day: u8 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }

        // Anything after the date must be a time/zone separator,
        // otherwise "2024-01-012" would silently truncate.
        if let Some(c) = rest.chars().next() {
            if c != 'T' && c != ' ' {
                return None;
            }
        }

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return None;
        }

        Some(Self { year, month, day })
    }

    /// The current calendar day in the viewer's local timezone
    /// (browser runtime clock).
    pub fn today_local() -> Self {
        let d = js_sys::Date::new_0();
        Self {
            year: d.get_full_year() as i32,
            month: (d.get_month() + 1) as u8,
            day: d.get_date() as u8,
        }
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_plain_date() {
        let d = CalendarDay::from_timestamp("2024-01-01").expect("should parse");
        assert_eq!(d, CalendarDay::new(2024, 1, 1));
    }

    #[test]
    fn truncates_full_timestamp() {
        let d = CalendarDay::from_timestamp("2024-01-01T23:59:59").expect("should parse");
        assert_eq!(d, CalendarDay::new(2024, 1, 1));
    }

    #[test]
    fn equality_ignores_time_and_zone_representation() {
        let a = CalendarDay::from_timestamp("2024-03-07T00:00:00Z").expect("should parse");
        let b = CalendarDay::from_timestamp("2024-03-07T18:30:00+02:00").expect("should parse");
        let c = CalendarDay::from_timestamp("2024-03-07 09:15:00").expect("should parse");
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn different_days_are_unequal() {
        let a = CalendarDay::from_timestamp("2024-01-01T23:59:59").expect("should parse");
        let b = CalendarDay::from_timestamp("2024-01-02T00:00:00").expect("should parse");
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_garbage() {
        assert!(CalendarDay::from_timestamp("").is_none());
        assert!(CalendarDay::from_timestamp("today").is_none());
        assert!(CalendarDay::from_timestamp("2024-1-1").is_none());
        assert!(CalendarDay::from_timestamp("2024-13-01").is_none());
        assert!(CalendarDay::from_timestamp("2024-01-00").is_none());
        assert!(CalendarDay::from_timestamp("2024-01-012").is_none());
    }

    #[test]
    fn display_is_iso_date() {
        assert_eq!(CalendarDay::new(2024, 3, 7).to_string(), "2024-03-07");
        assert_eq!(CalendarDay::new(987, 11, 30).to_string(), "0987-11-30");
    }

    #[test]
    fn display_roundtrips_through_from_timestamp() {
        let d = CalendarDay::new(2024, 12, 31);
        assert_eq!(CalendarDay::from_timestamp(&d.to_string()), Some(d));
    }
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn today_local_is_a_plausible_day() {
        let d = CalendarDay::today_local();
        assert!(d.year >= 2024);
        assert!((1..=12).contains(&d.month));
        assert!((1..=31).contains(&d.day));
        // And the wire form parses back to the same day.
        assert_eq!(CalendarDay::from_timestamp(&d.to_string()), Some(d));
    }
}
