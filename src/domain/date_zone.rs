//! Zone used to read stored timestamps back as calendar dates.

use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};

use crate::errors::FinanceError;

/// The app persists timestamps in UTC and shows them in the device zone, so an
/// expense entered at 22:00 on the last day of a month stays in that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateZone {
    /// Zone of the host running the crate.
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl DateZone {
    pub fn utc() -> Self {
        DateZone::Fixed(Utc.fix())
    }

    /// Offset east of UTC, e.g. `-180` for Brasília.
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, FinanceError> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(DateZone::Fixed)
            .ok_or_else(|| {
                FinanceError::InvalidInput(format!("utc offset of {} minutes is out of range", minutes))
            })
    }

    pub fn date_of(&self, stamp: DateTime<FixedOffset>) -> NaiveDate {
        match self {
            DateZone::Local => stamp.with_timezone(&Local).date_naive(),
            DateZone::Fixed(offset) => stamp.with_timezone(offset).date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(raw: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(raw).unwrap()
    }

    #[test]
    fn late_evening_utc_stamp_belongs_to_previous_local_day() {
        let brasilia = DateZone::from_offset_minutes(-180).unwrap();
        let stored = stamp("2024-05-01T01:00:00.000Z");
        assert_eq!(
            brasilia.date_of(stored),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap()
        );
        assert_eq!(
            DateZone::utc().date_of(stored),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn local_zone_matches_chrono_local() {
        let stored = stamp("2024-04-13T15:20:11Z");
        assert_eq!(
            DateZone::Local.date_of(stored),
            stored.with_timezone(&Local).date_naive()
        );
    }

    #[test]
    fn rejects_offsets_beyond_a_day() {
        assert!(DateZone::from_offset_minutes(24 * 60).is_err());
        assert!(DateZone::from_offset_minutes(i32::MAX).is_err());
        assert!(DateZone::from_offset_minutes(14 * 60).is_ok());
    }
}
