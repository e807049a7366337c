//! Source of the evaluation instant.

use chrono::{Local, NaiveDateTime};

/// Where "now" comes from when classifying shows.
///
/// Show start times are stored without a timezone and entered as local
/// wall-clock times, so the system clock is read in local time as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    /// The host's local wall clock.
    #[default]
    System,
    /// A pinned instant.
    Fixed(NaiveDateTime),
}

impl Clock {
    /// Reads the current instant.
    #[must_use]
    pub fn now(self) -> NaiveDateTime {
        match self {
            Self::System => Local::now().naive_local(),
            Self::Fixed(instant) => instant,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn fixed_clock_does_not_move() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1);
        let Some(instant) = date.and_then(|d| d.and_hms_opt(0, 0, 0)) else {
            panic!("valid timestamp");
        };
        let clock = Clock::Fixed(instant);
        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_advances() {
        let first = Clock::System.now();
        let second = Clock::System.now();
        assert!(second >= first);
    }
}
