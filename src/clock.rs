use chrono::{Local, NaiveDateTime};

/// Format of the invoice number and of the download filename timestamp.
pub const COMPACT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
/// Format of the human-readable invoice date.
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of wall-clock time for invoice numbering and download names.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall clock, second resolution is all that is ever observed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn compact_timestamp(at: NaiveDateTime) -> String {
    at.format(COMPACT_TIMESTAMP_FORMAT).to_string()
}

pub fn display_timestamp(at: NaiveDateTime) -> String {
    at.format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    #[test]
    fn formats_both_timestamp_styles() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 2)
            .unwrap();
        assert_eq!(compact_timestamp(at), "20240307090502");
        assert_eq!(display_timestamp(at), "2024-03-07 09:05:02");
    }

    #[test]
    fn fixed_clock_does_not_advance() {
        let at = NaiveDate::from_ymd_opt(2025, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let clock = FixedClock(at);
        assert_eq!(clock.now(), clock.now());
    }

    proptest! {
        #[test]
        fn compact_form_is_display_form_without_separators(secs in 0i64..4_102_444_800i64) {
            let at = chrono::DateTime::from_timestamp(secs, 0).unwrap().naive_utc();
            let compact = compact_timestamp(at);
            prop_assert_eq!(compact.len(), 14);
            prop_assert!(compact.chars().all(|c| c.is_ascii_digit()));
            let stripped: String = display_timestamp(at)
                .chars()
                .filter(|c| c.is_ascii_digit())
                .collect();
            prop_assert_eq!(compact, stripped);
        }
    }
}
